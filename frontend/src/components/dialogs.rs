// Modal building blocks shared by the builder dialogs and the CRM forms
use apexleads_shared::ValidationErrors;
use yew::prelude::*;

#[derive(Properties, PartialEq)]
pub struct ModalProps {
    pub title: AttrValue,
    #[prop_or_default]
    pub description: Option<AttrValue>,
    pub on_close: Callback<()>,
    pub children: Html,
}

#[function_component(Modal)]
pub fn modal(props: &ModalProps) -> Html {
    let on_backdrop = props.on_close.reform(|_: MouseEvent| ());
    let stop = Callback::from(|e: MouseEvent| e.stop_propagation());

    html! {
        <div class="fixed inset-0 z-40 flex items-center justify-center bg-black/40" onclick={on_backdrop}>
            <div class="w-full max-w-md rounded-lg bg-white dark:bg-gray-800 shadow-xl p-6" onclick={stop}>
                <h2 class="text-lg font-semibold text-gray-900 dark:text-white">{ props.title.clone() }</h2>
                if let Some(description) = &props.description {
                    <p class="mt-1 text-sm text-gray-500">{ description.clone() }</p>
                }
                <div class="mt-4">
                    { props.children.clone() }
                </div>
            </div>
        </div>
    }
}

#[derive(Properties, PartialEq)]
pub struct TextFieldProps {
    pub label: AttrValue,
    pub value: String,
    pub on_input: Callback<String>,
    #[prop_or_default]
    pub errors: Vec<String>,
    #[prop_or_default]
    pub placeholder: Option<AttrValue>,
}

#[function_component(TextField)]
pub fn text_field(props: &TextFieldProps) -> Html {
    let oninput = props.on_input.reform(|e: InputEvent| {
        let input: web_sys::HtmlInputElement = e.target_unchecked_into();
        input.value()
    });
    let border = if props.errors.is_empty() { "border-gray-300" } else { "border-red-500" };

    html! {
        <label class="block mb-4">
            <span class="block text-sm font-medium text-gray-700 dark:text-gray-300 mb-1">{ props.label.clone() }</span>
            <input
                type="text"
                value={props.value.clone()}
                {oninput}
                placeholder={props.placeholder.clone()}
                class={classes!("w-full", "px-3", "py-2", "rounded-lg", "border", "text-sm", border)}
            />
            { for props.errors.iter().map(|message| html! {
                <span class="block mt-1 text-xs text-red-600">{ message }</span>
            })}
        </label>
    }
}

/// Messages recorded for one field, empty when the field is fine.
pub fn field_errors(errors: &Option<ValidationErrors>, field: &str) -> Vec<String> {
    errors
        .as_ref()
        .and_then(|e| e.field(field))
        .map(<[String]>::to_vec)
        .unwrap_or_default()
}

#[derive(Properties, PartialEq)]
pub struct DialogFooterProps {
    pub on_cancel: Callback<()>,
    pub submit_label: AttrValue,
    #[prop_or_default]
    pub danger: bool,
}

#[function_component(DialogFooter)]
pub fn dialog_footer(props: &DialogFooterProps) -> Html {
    let on_cancel = props.on_cancel.reform(|_: MouseEvent| ());
    let submit = if props.danger {
        "px-4 py-2 rounded-lg text-sm font-medium bg-red-600 hover:bg-red-700 text-white"
    } else {
        "px-4 py-2 rounded-lg text-sm font-medium bg-indigo-600 hover:bg-indigo-700 text-white"
    };

    html! {
        <div class="flex justify-end space-x-2 pt-2">
            <button type="button" onclick={on_cancel} class="px-4 py-2 rounded-lg text-sm border border-gray-300 text-gray-700 dark:text-gray-200">
                {"Cancel"}
            </button>
            <button type="submit" class={submit}>{ props.submit_label.clone() }</button>
        </div>
    }
}

/// Turns a form submit into a plain callback without reloading the page.
pub fn on_submit(callback: Callback<()>) -> Callback<SubmitEvent> {
    Callback::from(move |e: SubmitEvent| {
        e.prevent_default();
        callback.emit(());
    })
}

#[derive(Properties, PartialEq)]
pub struct ConfirmDeleteProps {
    pub title: AttrValue,
    pub message: AttrValue,
    pub on_confirm: Callback<()>,
    pub on_close: Callback<()>,
}

#[function_component(ConfirmDelete)]
pub fn confirm_delete(props: &ConfirmDeleteProps) -> Html {
    html! {
        <Modal title={props.title.clone()} on_close={props.on_close.clone()}>
            <form onsubmit={on_submit(props.on_confirm.clone())}>
                <p class="text-sm text-gray-600 dark:text-gray-300 mb-4">{ props.message.clone() }</p>
                <DialogFooter on_cancel={props.on_close.clone()} submit_label="Delete" danger=true />
            </form>
        </Modal>
    }
}

/// One button per kind; picking one submits the add dialog.
#[derive(Properties, PartialEq)]
pub struct KindPickerProps<K: Copy + PartialEq + 'static> {
    pub title: AttrValue,
    pub kinds: Vec<(K, &'static str)>,
    pub on_pick: Callback<K>,
    pub on_close: Callback<()>,
}

#[function_component(KindPicker)]
pub fn kind_picker<K: Copy + PartialEq + 'static>(props: &KindPickerProps<K>) -> Html {
    html! {
        <Modal title={props.title.clone()} on_close={props.on_close.clone()}>
            <div class="grid grid-cols-2 gap-2">
                { for props.kinds.iter().map(|(kind, label)| {
                    let kind = *kind;
                    let onclick = props.on_pick.reform(move |_: MouseEvent| kind);
                    html! {
                        <button {onclick} class="px-3 py-3 rounded-lg border border-gray-200 text-sm font-medium text-gray-700 dark:text-gray-200 hover:border-indigo-400 hover:bg-indigo-50 dark:hover:bg-gray-700">
                            { *label }
                        </button>
                    }
                })}
            </div>
        </Modal>
    }
}
