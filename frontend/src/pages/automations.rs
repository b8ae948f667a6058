// Automations page - workflow list with create, status toggle and delete
use apexleads_shared::{Status, Workflow};
use wasm_bindgen_futures::spawn_local;
use yew::prelude::*;
use yew_router::prelude::*;

use crate::components::dialogs::{ConfirmDelete, DialogFooter, Modal, TextField, on_submit};
use crate::components::toast::use_toast;
use crate::routes::Route;
use crate::services::workflows;

pub fn status_badge(status: Status) -> Html {
    let (label, classes) = match status {
        Status::Active => ("active", "bg-green-100 text-green-800"),
        Status::Inactive => ("inactive", "bg-gray-100 text-gray-600"),
    };
    html! {
        <span class={classes!("px-2", "py-0.5", "rounded-full", "text-xs", "font-medium", classes)}>{ label }</span>
    }
}

#[function_component(AutomationListPage)]
pub fn automation_list_page() -> Html {
    let workflows = use_state(|| None::<Vec<Workflow>>);
    let reload = use_state(|| 0u32);
    let creating = use_state(|| false);
    let deleting = use_state(|| None::<Workflow>);
    let toast = use_toast();
    let navigator = use_navigator();

    // Fetch workflows on mount and after every change
    {
        let workflows = workflows.clone();
        let toast = toast.clone();
        use_effect_with(*reload, move |_| {
            spawn_local(async move {
                match workflows::list().await {
                    Ok(list) => workflows.set(Some(list)),
                    Err(e) => {
                        toast.error(format!("Failed to load workflows: {}", e));
                        workflows.set(Some(Vec::new()));
                    }
                }
            });
            || ()
        });
    }

    let refresh = {
        let reload = reload.clone();
        Callback::from(move |_: ()| reload.set(*reload + 1))
    };

    let on_create = {
        let creating = creating.clone();
        let toast = toast.clone();
        Callback::from(move |name: String| {
            let creating = creating.clone();
            let toast = toast.clone();
            let navigator = navigator.clone();
            spawn_local(async move {
                match workflows::create(&name).await {
                    Ok(workflow) => {
                        toast.success("Workflow created.");
                        creating.set(false);
                        if let Some(navigator) = navigator {
                            navigator.push(&Route::AutomationBuilder { id: workflow.id });
                        }
                    }
                    Err(e) => toast.error(e.summary()),
                }
            });
        })
    };

    let on_toggle = {
        let toast = toast.clone();
        let refresh = refresh.clone();
        Callback::from(move |workflow: Workflow| {
            let toast = toast.clone();
            let refresh = refresh.clone();
            spawn_local(async move {
                match workflows::set_status(&workflow.id, workflow.status.toggled()).await {
                    Ok(_) => refresh.emit(()),
                    Err(e) => toast.error(e.summary()),
                }
            });
        })
    };

    let on_confirm_delete = {
        let deleting = deleting.clone();
        let toast = toast.clone();
        let refresh = refresh.clone();
        Callback::from(move |_: ()| {
            let Some(workflow) = (*deleting).clone() else {
                return;
            };
            deleting.set(None);
            let toast = toast.clone();
            let refresh = refresh.clone();
            spawn_local(async move {
                match workflows::delete(&workflow.id).await {
                    Ok(()) => {
                        toast.success("Workflow deleted.");
                        refresh.emit(());
                    }
                    Err(e) => toast.error(e.summary()),
                }
            });
        })
    };

    let open_create = {
        let creating = creating.clone();
        Callback::from(move |_: MouseEvent| creating.set(true))
    };
    let close_create = {
        let creating = creating.clone();
        Callback::from(move |_: ()| creating.set(false))
    };
    let close_delete = {
        let deleting = deleting.clone();
        Callback::from(move |_: ()| deleting.set(None))
    };

    html! {
        <div class="p-8 space-y-6">
            <div class="flex items-center justify-between">
                <div>
                    <h1 class="text-2xl font-bold text-gray-900 dark:text-white">{"Automations"}</h1>
                    <p class="text-sm text-gray-500">{"Workflows that run when a trigger fires."}</p>
                </div>
                <button onclick={open_create} class="px-4 py-2 rounded-lg text-sm font-medium bg-indigo-600 hover:bg-indigo-700 text-white">
                    {"New Workflow"}
                </button>
            </div>

            {
                match &*workflows {
                    None => html! {
                        <div class="h-40 rounded-lg bg-gray-200 animate-pulse"></div>
                    },
                    Some(list) if list.is_empty() => html! {
                        <div class="text-center py-16 text-gray-500">{"No workflows yet."}</div>
                    },
                    Some(list) => html! {
                        <div class="bg-white dark:bg-gray-800 rounded-lg shadow divide-y divide-gray-100 dark:divide-gray-700">
                            { for list.iter().map(|workflow| {
                                let toggle = {
                                    let workflow = workflow.clone();
                                    on_toggle.reform(move |_: MouseEvent| workflow.clone())
                                };
                                let delete = {
                                    let deleting = deleting.clone();
                                    let workflow = workflow.clone();
                                    Callback::from(move |_: MouseEvent| deleting.set(Some(workflow.clone())))
                                };
                                let toggle_label = match workflow.status {
                                    Status::Active => "Deactivate",
                                    Status::Inactive => "Activate",
                                };
                                html! {
                                    <div key={workflow.id.clone()} class="flex items-center justify-between px-6 py-4">
                                        <div>
                                            <Link<Route> to={Route::AutomationBuilder { id: workflow.id.clone() }} classes="font-medium text-gray-900 dark:text-white hover:text-indigo-600">
                                                { &workflow.name }
                                            </Link<Route>>
                                            <p class="text-xs text-gray-500 mt-1">
                                                { format!("{} · {} actions", workflow.trigger.name, workflow.actions.len()) }
                                            </p>
                                        </div>
                                        <div class="flex items-center space-x-3">
                                            { status_badge(workflow.status) }
                                            <button onclick={toggle} class="text-sm text-indigo-600 hover:underline">{ toggle_label }</button>
                                            <button onclick={delete} class="text-sm text-red-600 hover:underline">{"Delete"}</button>
                                        </div>
                                    </div>
                                }
                            })}
                        </div>
                    },
                }
            }

            if *creating {
                <NameDialog title="New Workflow" on_submit={on_create} on_close={close_create} />
            }
            if let Some(workflow) = &*deleting {
                <ConfirmDelete
                    title="Delete Workflow"
                    message={format!("\"{}\" will be deleted permanently.", workflow.name)}
                    on_confirm={on_confirm_delete}
                    on_close={close_delete}
                />
            }
        </div>
    }
}

#[derive(Properties, PartialEq)]
struct NameDialogProps {
    title: AttrValue,
    on_submit: Callback<String>,
    on_close: Callback<()>,
}

#[function_component(NameDialog)]
fn name_dialog(props: &NameDialogProps) -> Html {
    let name = use_state(String::new);
    let error = use_state(Vec::<String>::new);

    let on_input = {
        let name = name.clone();
        Callback::from(move |value: String| name.set(value))
    };

    let submit = {
        let name = name.clone();
        let error = error.clone();
        let on_submit = props.on_submit.clone();
        Callback::from(move |_: ()| {
            let trimmed = name.trim();
            if trimmed.is_empty() {
                error.set(vec!["Name is required".to_string()]);
            } else {
                on_submit.emit(trimmed.to_string());
            }
        })
    };

    html! {
        <Modal title={props.title.clone()} on_close={props.on_close.clone()}>
            <form onsubmit={on_submit(submit)}>
                <TextField label="Name" value={(*name).clone()} {on_input} errors={(*error).clone()} />
                <DialogFooter on_cancel={props.on_close.clone()} submit_label="Create" />
            </form>
        </Modal>
    }
}
