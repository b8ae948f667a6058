// Funnel builder: the linear step chain on a canvas
use apexleads_shared::builder::{DialogState, EdgeChange, NodeChange};
use apexleads_shared::validation::StepForm;
use apexleads_shared::{Funnel, FunnelStep, FunnelStepType, ValidationErrors};
use yew::prelude::*;

use crate::components::builder::{
    BuilderAction, BuilderShell, BuilderStatus, LoadStatus, save_callback, use_builder,
};
use crate::components::canvas::FlowCanvas;
use crate::components::dialogs::{ConfirmDelete, DialogFooter, KindPicker, Modal, TextField, field_errors, on_submit};
use crate::components::toast::use_toast;
use crate::routes::Route;
use crate::services::funnels;

#[derive(Properties, PartialEq)]
pub struct FunnelBuilderProps {
    pub id: String,
}

#[function_component(FunnelBuilderPage)]
pub fn funnel_builder_page(props: &FunnelBuilderProps) -> Html {
    let toast = use_toast();
    let (state, status, retry) = use_builder::<Funnel, _, _>(props.id.clone(), |id| async move { funnels::get(&id).await });

    let funnel = match state.store.document() {
        Some(funnel) if *status == LoadStatus::Ready => funnel.clone(),
        _ => {
            return html! {
                <BuilderStatus
                    status={(*status).clone()}
                    on_retry={retry}
                    entity="Funnel"
                    back={Route::Funnels}
                    back_label="Back to Funnels"
                />
            };
        }
    };

    let on_nodes_change = {
        let state = state.clone();
        Callback::from(move |changes: Vec<NodeChange>| state.dispatch(BuilderAction::NodesChange(changes)))
    };

    let on_edges_change = {
        let state = state.clone();
        Callback::from(move |changes: Vec<EdgeChange>| state.dispatch(BuilderAction::EdgesChange(changes)))
    };

    let on_add = {
        let state = state.clone();
        Callback::from(move |node_id: String| {
            state.dispatch(BuilderAction::Open(DialogState::AddStep { parent_node_id: node_id }))
        })
    };

    let on_edit = {
        let state = state.clone();
        Callback::from(move |node_id: String| state.dispatch(BuilderAction::OpenEdit(node_id)))
    };

    let on_delete = {
        let state = state.clone();
        Callback::from(move |node_id: String| state.dispatch(BuilderAction::Open(DialogState::DeleteStep { node_id })))
    };

    let on_close = {
        let state = state.clone();
        Callback::from(move |_: ()| state.dispatch(BuilderAction::Close))
    };

    let on_save = save_callback(&state, &toast, |funnel: Funnel| async move { funnels::save(&funnel).await });

    let dialog = match state.store.dialog() {
        DialogState::AddStep { .. } | DialogState::AddAction { .. } => {
            let on_pick = {
                let state = state.clone();
                Callback::from(move |kind: FunnelStepType| state.dispatch(BuilderAction::SubmitAdd(kind)))
            };
            let kinds = FunnelStepType::all().iter().map(|t| (*t, t.label())).collect::<Vec<_>>();
            html! {
                <KindPicker<FunnelStepType> title="Add Step" {kinds} {on_pick} on_close={on_close.clone()} />
            }
        }
        DialogState::EditStep { step, node_id } => {
            let on_submit = {
                let state = state.clone();
                Callback::from(move |step: FunnelStep| state.dispatch(BuilderAction::SubmitEdit(step)))
            };
            html! {
                <EditStepDialog key={node_id.clone()} step={step.clone()} {on_submit} on_close={on_close.clone()} />
            }
        }
        DialogState::DeleteStep { .. } => {
            let on_confirm = {
                let state = state.clone();
                Callback::from(move |_: ()| state.dispatch(BuilderAction::ConfirmDelete))
            };
            html! {
                <ConfirmDelete
                    title="Delete Step"
                    message="This step will be removed and the steps after it move up."
                    {on_confirm}
                    on_close={on_close.clone()}
                />
            }
        }
        DialogState::None => html! {},
    };

    html! {
        <BuilderShell title={funnel.name.clone()} back={Route::Funnels} saving={state.store.is_saving()} {on_save}>
            <FlowCanvas graph={state.store.graph().clone()} {on_nodes_change} {on_edges_change} {on_add} {on_edit} {on_delete} />
            { dialog }
        </BuilderShell>
    }
}

#[derive(Properties, PartialEq)]
struct EditStepDialogProps {
    step: FunnelStep,
    on_submit: Callback<FunnelStep>,
    on_close: Callback<()>,
}

#[function_component(EditStepDialog)]
fn edit_step_dialog(props: &EditStepDialogProps) -> Html {
    let form = use_state(|| StepForm {
        name: props.step.name.clone(),
        path: props.step.path.clone(),
    });
    let errors = use_state(|| None::<ValidationErrors>);

    let on_name = {
        let form = form.clone();
        Callback::from(move |name: String| form.set(StepForm { name, ..(*form).clone() }))
    };
    let on_path = {
        let form = form.clone();
        Callback::from(move |path: String| form.set(StepForm { path, ..(*form).clone() }))
    };

    let submit = {
        let form = form.clone();
        let errors = errors.clone();
        let step = props.step.clone();
        let on_submit = props.on_submit.clone();
        Callback::from(move |_: ()| match form.validate() {
            Ok(()) => on_submit.emit(FunnelStep {
                name: form.name.trim().to_string(),
                path: form.path.trim().to_string(),
                ..step.clone()
            }),
            Err(e) => errors.set(Some(e)),
        })
    };

    html! {
        <Modal title="Edit Step" description="Rename this step or change the path it is served on." on_close={props.on_close.clone()}>
            <form onsubmit={on_submit(submit)}>
                <TextField label="Step Name" value={form.name.clone()} on_input={on_name} errors={field_errors(&errors, "name")} />
                <TextField
                    label="Path"
                    value={form.path.clone()}
                    on_input={on_path}
                    errors={field_errors(&errors, "path")}
                    placeholder="/checkout"
                />
                <DialogFooter on_cancel={props.on_close.clone()} submit_label="Save Changes" />
            </form>
        </Modal>
    }
}
