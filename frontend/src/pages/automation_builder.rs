// Automation builder: the workflow tree on a canvas
use apexleads_shared::builder::{DialogState, EdgeChange, NodeChange};
use apexleads_shared::validation::ActionForm;
use apexleads_shared::{ActionType, ValidationErrors, Workflow, WorkflowAction};
use yew::prelude::*;

use crate::components::builder::{
    BuilderAction, BuilderShell, BuilderStatus, LoadStatus, save_callback, use_builder,
};
use crate::components::canvas::FlowCanvas;
use crate::components::dialogs::{ConfirmDelete, DialogFooter, KindPicker, Modal, TextField, field_errors, on_submit};
use crate::components::toast::use_toast;
use crate::routes::Route;
use crate::services::workflows;

#[derive(Properties, PartialEq)]
pub struct AutomationBuilderProps {
    pub id: String,
}

#[function_component(AutomationBuilderPage)]
pub fn automation_builder_page(props: &AutomationBuilderProps) -> Html {
    let toast = use_toast();
    let (state, status, retry) = use_builder::<Workflow, _, _>(props.id.clone(), |id| async move { workflows::get(&id).await });

    let workflow = match state.store.document() {
        Some(workflow) if *status == LoadStatus::Ready => workflow.clone(),
        _ => {
            return html! {
                <BuilderStatus
                    status={(*status).clone()}
                    on_retry={retry}
                    entity="Workflow"
                    back={Route::Automations}
                    back_label="Back to Automations"
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

    // A branch placeholder carries the handle its new action hangs from.
    let on_add = {
        let state = state.clone();
        Callback::from(move |node_id: String| {
            let source_handle = state
                .store
                .graph()
                .node(&node_id)
                .and_then(|n| n.as_placeholder())
                .and_then(|p| p.source_handle);
            state.dispatch(BuilderAction::Open(DialogState::AddAction {
                parent_node_id: node_id,
                source_handle,
            }));
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

    let on_save = save_callback(&state, &toast, |workflow: Workflow| async move { workflows::save(&workflow).await });

    let dialog = match state.store.dialog() {
        DialogState::AddAction { .. } | DialogState::AddStep { .. } => {
            let on_pick = {
                let state = state.clone();
                Callback::from(move |kind: ActionType| state.dispatch(BuilderAction::SubmitAdd(kind)))
            };
            let kinds = ActionType::all().iter().map(|t| (*t, t.label())).collect::<Vec<_>>();
            html! {
                <KindPicker<ActionType> title="Add Action" {kinds} {on_pick} on_close={on_close.clone()} />
            }
        }
        DialogState::EditStep { step, node_id } => {
            let on_submit = {
                let state = state.clone();
                Callback::from(move |action: WorkflowAction| state.dispatch(BuilderAction::SubmitEdit(action)))
            };
            html! {
                <EditActionDialog key={node_id.clone()} action={step.clone()} {on_submit} on_close={on_close.clone()} />
            }
        }
        DialogState::DeleteStep { .. } => {
            let on_confirm = {
                let state = state.clone();
                Callback::from(move |_: ()| state.dispatch(BuilderAction::ConfirmDelete))
            };
            html! {
                <ConfirmDelete
                    title="Delete Action"
                    message="This action will be removed. Deleting an If/Else also removes both of its branches."
                    {on_confirm}
                    on_close={on_close.clone()}
                />
            }
        }
        DialogState::None => html! {},
    };

    html! {
        <BuilderShell title={workflow.name.clone()} back={Route::Automations} saving={state.store.is_saving()} {on_save}>
            <FlowCanvas graph={state.store.graph().clone()} {on_nodes_change} {on_edges_change} {on_add} {on_edit} {on_delete} />
            { dialog }
        </BuilderShell>
    }
}

#[derive(Properties, PartialEq)]
struct EditActionDialogProps {
    action: WorkflowAction,
    on_submit: Callback<WorkflowAction>,
    on_close: Callback<()>,
}

#[function_component(EditActionDialog)]
fn edit_action_dialog(props: &EditActionDialogProps) -> Html {
    let form = use_state(|| ActionForm {
        name: props.action.name.clone(),
        details: props.action.details.clone(),
    });
    let errors = use_state(|| None::<ValidationErrors>);

    let on_name = {
        let form = form.clone();
        Callback::from(move |name: String| form.set(ActionForm { name, ..(*form).clone() }))
    };
    let on_details = {
        let form = form.clone();
        Callback::from(move |details: String| form.set(ActionForm { details, ..(*form).clone() }))
    };

    let submit = {
        let form = form.clone();
        let errors = errors.clone();
        let action = props.action.clone();
        let on_submit = props.on_submit.clone();
        Callback::from(move |_: ()| match form.validate() {
            Ok(()) => on_submit.emit(WorkflowAction {
                name: form.name.trim().to_string(),
                details: form.details.trim().to_string(),
                ..action.clone()
            }),
            Err(e) => errors.set(Some(e)),
        })
    };

    html! {
        <Modal title="Edit Action" description="Update the details for this workflow action." on_close={props.on_close.clone()}>
            <form onsubmit={on_submit(submit)}>
                <TextField label="Action Name" value={form.name.clone()} on_input={on_name} errors={field_errors(&errors, "name")} />
                <TextField label="Details" value={form.details.clone()} on_input={on_details} errors={field_errors(&errors, "details")} />
                <DialogFooter on_cancel={props.on_close.clone()} submit_label="Save Changes" />
            </form>
        </Modal>
    }
}
