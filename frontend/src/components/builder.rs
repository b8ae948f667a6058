// Glue between the builder pages and the shared editing store
use apexleads_shared::BuilderError;
use apexleads_shared::builder::{BuilderDocument, BuilderStore, DialogState, EdgeChange, NodeChange};
use std::future::Future;
use std::rc::Rc;
use tracing::debug;
use wasm_bindgen_futures::spawn_local;
use yew::prelude::*;
use yew_router::prelude::*;

use super::toast::{ToastContext, use_toast};
use crate::routes::Route;
use crate::services::ApiResult;

/// `BuilderStore` behind a yew reducer. Every action maps onto one store operation.
#[derive(PartialEq)]
pub struct BuilderState<D: BuilderDocument> {
    pub store: BuilderStore<D>,
}

impl<D: BuilderDocument> Default for BuilderState<D> {
    fn default() -> Self {
        Self {
            store: BuilderStore::new(),
        }
    }
}

pub enum BuilderAction<D: BuilderDocument> {
    Load(D),
    NodesChange(Vec<NodeChange>),
    EdgesChange(Vec<EdgeChange>),
    Open(DialogState<D::Step>),
    OpenEdit(String),
    Close,
    SubmitAdd(D::StepKind),
    SubmitEdit(D::Step),
    ConfirmDelete,
    SaveStarted,
    SaveFinished(Result<D, BuilderError>),
}

impl<D: BuilderDocument + 'static> Reducible for BuilderState<D> {
    type Action = BuilderAction<D>;

    fn reduce(self: Rc<Self>, action: Self::Action) -> Rc<Self> {
        let mut store = self.store.clone();
        match action {
            BuilderAction::Load(document) => store.load(document),
            BuilderAction::NodesChange(changes) => store.apply_node_changes(&changes),
            BuilderAction::EdgesChange(changes) => store.apply_edge_changes(&changes),
            BuilderAction::Open(dialog) => store.open_dialog(dialog),
            BuilderAction::OpenEdit(node_id) => store.open_edit(&node_id),
            BuilderAction::Close => store.close_dialog(),
            BuilderAction::SubmitAdd(kind) => store.submit_add(kind),
            BuilderAction::SubmitEdit(step) => {
                store.submit_edit(step);
            }
            BuilderAction::ConfirmDelete => store.confirm_delete(),
            BuilderAction::SaveStarted => {
                // The page checks the guard before dispatching, so a refusal here
                // means another save is already pending.
                if let Err(err) = store.begin_save() {
                    debug!(entity = D::ENTITY, error = %err, "save start ignored");
                }
            }
            BuilderAction::SaveFinished(result) => {
                // The failure was already toasted by the save callback.
                if let Err(err) = store.finish_save(result) {
                    debug!(entity = D::ENTITY, error = %err, "save finished with error");
                }
            }
        }
        Rc::new(Self { store })
    }
}

pub type BuilderHandle<D> = UseReducerHandle<BuilderState<D>>;

#[derive(Clone, Debug, PartialEq)]
pub enum LoadStatus {
    Loading,
    Ready,
    NotFound,
    Failed(String),
}

/// Fetches the document once per id and loads it into a fresh store.
/// The returned callback fetches again after a failed load.
#[hook]
pub fn use_builder<D, F, Fut>(id: String, fetch: F) -> (BuilderHandle<D>, UseStateHandle<LoadStatus>, Callback<MouseEvent>)
where
    D: BuilderDocument + 'static,
    F: Fn(String) -> Fut + 'static,
    Fut: Future<Output = ApiResult<D>> + 'static,
{
    let state = use_reducer(BuilderState::<D>::default);
    let status = use_state(|| LoadStatus::Loading);
    let attempt = use_state(|| 0u32);
    let toast = use_toast();

    {
        let state = state.clone();
        let status = status.clone();
        use_effect_with((id, *attempt), move |(id, _)| {
            status.set(LoadStatus::Loading);
            let request = fetch(id.clone());
            spawn_local(async move {
                match request.await {
                    Ok(document) => {
                        state.dispatch(BuilderAction::Load(document));
                        status.set(LoadStatus::Ready);
                    }
                    Err(e) if e.is_not_found() => status.set(LoadStatus::NotFound),
                    Err(e) => {
                        toast.error(format!("Failed to fetch {} details.", D::ENTITY));
                        status.set(LoadStatus::Failed(e.message));
                    }
                }
            });
            || ()
        });
    }

    let retry = {
        let attempt = attempt.clone();
        Callback::from(move |_: MouseEvent| attempt.set(*attempt + 1))
    };

    (state, status, retry)
}

/// Save button handler: one PUT of the whole document, guarded against double submits.
/// A failed save keeps the local edits so the user can try again.
pub fn save_callback<D, F, Fut>(state: &BuilderHandle<D>, toast: &ToastContext, save: F) -> Callback<MouseEvent>
where
    D: BuilderDocument + 'static,
    F: Fn(D) -> Fut + 'static,
    Fut: Future<Output = ApiResult<D>> + 'static,
{
    let state = state.clone();
    let toast = toast.clone();
    Callback::from(move |_: MouseEvent| {
        let mut probe = state.store.clone();
        let payload = match probe.begin_save() {
            Ok(payload) => payload,
            Err(BuilderError::SaveInFlight) => return,
            Err(e) => {
                toast.error(e.to_string());
                return;
            }
        };
        state.dispatch(BuilderAction::SaveStarted);

        let state = state.clone();
        let toast = toast.clone();
        let request = save(payload);
        spawn_local(async move {
            let result = request.await.map_err(|e| e.into_builder_error(D::ENTITY));
            match &result {
                Ok(_) => toast.success(format!("{} saved successfully.", capitalize(D::ENTITY))),
                Err(e) => toast.error(e.to_string()),
            }
            state.dispatch(BuilderAction::SaveFinished(result));
        });
    })
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

#[derive(Properties, PartialEq)]
pub struct BuilderShellProps {
    pub title: AttrValue,
    pub back: Route,
    pub saving: bool,
    pub on_save: Callback<MouseEvent>,
    pub children: Html,
}

#[function_component(BuilderShell)]
pub fn builder_shell(props: &BuilderShellProps) -> Html {
    html! {
        <div class="w-full h-screen flex flex-col">
            <header class="p-4 border-b border-gray-200 flex items-center justify-between bg-white dark:bg-gray-800">
                <div class="flex items-center space-x-4">
                    <Link<Route> to={props.back.clone()} classes="text-gray-500 hover:text-gray-900">
                        <svg class="w-5 h-5" fill="none" stroke="currentColor" viewBox="0 0 24 24">
                            <path stroke-linecap="round" stroke-linejoin="round" stroke-width="2" d="M10 19l-7-7m0 0l7-7m-7 7h18"/>
                        </svg>
                    </Link<Route>>
                    <h1 class="text-xl font-semibold tracking-tight text-gray-900 dark:text-white">{ props.title.clone() }</h1>
                </div>
                <button
                    onclick={props.on_save.clone()}
                    disabled={props.saving}
                    class="px-4 py-2 rounded-lg text-sm font-medium bg-indigo-600 hover:bg-indigo-700 text-white disabled:opacity-50"
                >
                    { if props.saving { "Saving..." } else { "Save" } }
                </button>
            </header>
            <div class="flex-1 overflow-hidden">
                { props.children.clone() }
            </div>
        </div>
    }
}

#[derive(Properties, PartialEq)]
pub struct BuilderStatusProps {
    pub status: LoadStatus,
    pub entity: AttrValue,
    pub back: Route,
    pub back_label: AttrValue,
    pub on_retry: Callback<MouseEvent>,
}

/// Heading and detail for a load that did not produce a document.
fn load_failure_text(status: &LoadStatus, entity: &str) -> Option<(String, String)> {
    match status {
        LoadStatus::Loading | LoadStatus::Ready => None,
        LoadStatus::NotFound => Some((
            format!("{} not found", entity),
            format!("The requested {} does not exist.", entity.to_lowercase()),
        )),
        LoadStatus::Failed(message) => Some((format!("Could not load {}", entity.to_lowercase()), message.clone())),
    }
}

/// What a builder page shows instead of the canvas while loading or after a failed fetch.
#[function_component(BuilderStatus)]
pub fn builder_status(props: &BuilderStatusProps) -> Html {
    let Some((heading, detail)) = load_failure_text(&props.status, &props.entity) else {
        return html! {
            <div class="w-full h-full p-4 space-y-4">
                <div class="h-12 w-1/4 rounded bg-gray-200 animate-pulse"></div>
                <div class="w-full h-96 rounded bg-gray-200 animate-pulse"></div>
            </div>
        };
    };
    let retryable = matches!(props.status, LoadStatus::Failed(_));

    html! {
        <div class="text-center py-20">
            <h2 class="text-2xl font-semibold text-gray-900 dark:text-white">{ heading }</h2>
            <p class="text-gray-500 mt-2">{ detail }</p>
            <div class="mt-4 flex justify-center space-x-3">
                if retryable {
                    <button onclick={props.on_retry.clone()} class="px-4 py-2 rounded-lg border border-gray-300 text-sm text-gray-700 hover:bg-gray-50">
                        {"Try again"}
                    </button>
                }
                <Link<Route> to={props.back.clone()} classes="inline-block px-4 py-2 rounded-lg bg-indigo-600 text-white text-sm">
                    { props.back_label.clone() }
                </Link<Route>>
            </div>
        </div>
    }
}
