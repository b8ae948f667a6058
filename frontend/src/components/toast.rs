// Non-blocking notifications for finished or failed requests
use gloo_timers::callback::Timeout;
use std::rc::Rc;
use yew::prelude::*;

const TOAST_TIMEOUT_MS: u32 = 4_000;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ToastKind {
    Success,
    Error,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Toast {
    pub id: u32,
    pub kind: ToastKind,
    pub message: String,
}

#[derive(Default, PartialEq)]
struct ToastList {
    toasts: Vec<Toast>,
}

enum ToastAction {
    Push(Toast),
    Dismiss(u32),
}

impl Reducible for ToastList {
    type Action = ToastAction;

    fn reduce(self: Rc<Self>, action: Self::Action) -> Rc<Self> {
        let mut toasts = self.toasts.clone();
        match action {
            ToastAction::Push(toast) => toasts.push(toast),
            ToastAction::Dismiss(id) => toasts.retain(|t| t.id != id),
        }
        Rc::new(ToastList { toasts })
    }
}

#[derive(Clone, PartialEq)]
pub struct ToastContext {
    pub toasts: Vec<Toast>,
    push: Callback<(ToastKind, String)>,
    dismiss: Callback<u32>,
}

impl ToastContext {
    pub fn success(&self, message: impl Into<String>) {
        self.push.emit((ToastKind::Success, message.into()));
    }

    pub fn error(&self, message: impl Into<String>) {
        self.push.emit((ToastKind::Error, message.into()));
    }
}

#[derive(Properties, PartialEq)]
pub struct ToastProviderProps {
    pub children: Html,
}

#[function_component(ToastProvider)]
pub fn toast_provider(props: &ToastProviderProps) -> Html {
    let list = use_reducer(ToastList::default);
    let next_id = use_mut_ref(|| 0u32);

    let dismiss = {
        let list = list.dispatcher();
        Callback::from(move |id: u32| list.dispatch(ToastAction::Dismiss(id)))
    };

    let push = {
        let dispatcher = list.dispatcher();
        let dismiss = dismiss.clone();
        Callback::from(move |(kind, message): (ToastKind, String)| {
            let id = {
                let mut next_id = next_id.borrow_mut();
                *next_id += 1;
                *next_id
            };
            dispatcher.dispatch(ToastAction::Push(Toast { id, kind, message }));
            let dismiss = dismiss.clone();
            Timeout::new(TOAST_TIMEOUT_MS, move || dismiss.emit(id)).forget();
        })
    };

    let ctx = ToastContext {
        toasts: list.toasts.clone(),
        push,
        dismiss,
    };

    html! {
        <ContextProvider<ToastContext> context={ctx}>
            { props.children.clone() }
        </ContextProvider<ToastContext>>
    }
}

#[hook]
pub fn use_toast() -> ToastContext {
    use_context::<ToastContext>().unwrap_or_else(|| ToastContext {
        toasts: Vec::new(),
        push: Callback::noop(),
        dismiss: Callback::noop(),
    })
}

#[function_component(Toaster)]
pub fn toaster() -> Html {
    let ctx = use_toast();

    html! {
        <div class="fixed bottom-4 right-4 z-50 space-y-2 w-80">
            { for ctx.toasts.iter().map(|toast| {
                let id = toast.id;
                let onclick = ctx.dismiss.reform(move |_: MouseEvent| id);
                let classes = match toast.kind {
                    ToastKind::Success => "bg-green-50 border-green-300 text-green-800",
                    ToastKind::Error => "bg-red-50 border-red-300 text-red-800",
                };
                html! {
                    <div key={id} class={classes!("flex", "items-start", "justify-between", "border", "rounded-lg", "px-4", "py-3", "shadow", classes)}>
                        <span class="text-sm">{ &toast.message }</span>
                        <button {onclick} class="ml-3 text-sm opacity-60 hover:opacity-100">{"×"}</button>
                    </div>
                }
            })}
        </div>
    }
}
