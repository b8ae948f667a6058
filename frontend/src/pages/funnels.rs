// Funnels page - funnel list with create, status toggle and delete
use apexleads_shared::{Funnel, Status};
use wasm_bindgen_futures::spawn_local;
use yew::prelude::*;
use yew_router::prelude::*;

use super::automations::status_badge;
use crate::components::dialogs::{ConfirmDelete, DialogFooter, Modal, TextField, on_submit};
use crate::components::toast::use_toast;
use crate::routes::Route;
use crate::services::funnels::{self, CreateFunnelRequest};

#[function_component(FunnelListPage)]
pub fn funnel_list_page() -> Html {
    let funnels = use_state(|| None::<Vec<Funnel>>);
    let reload = use_state(|| 0u32);
    let creating = use_state(|| false);
    let deleting = use_state(|| None::<Funnel>);
    let toast = use_toast();
    let navigator = use_navigator();

    {
        let funnels = funnels.clone();
        let toast = toast.clone();
        use_effect_with(*reload, move |_| {
            spawn_local(async move {
                match funnels::list().await {
                    Ok(list) => funnels.set(Some(list)),
                    Err(e) => {
                        toast.error(format!("Failed to load funnels: {}", e));
                        funnels.set(Some(Vec::new()));
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
        Callback::from(move |request: CreateFunnelRequest| {
            let creating = creating.clone();
            let toast = toast.clone();
            let navigator = navigator.clone();
            spawn_local(async move {
                match funnels::create(&request).await {
                    Ok(funnel) => {
                        toast.success("Funnel created.");
                        creating.set(false);
                        if let Some(navigator) = navigator {
                            navigator.push(&Route::FunnelBuilder { id: funnel.id });
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
        Callback::from(move |funnel: Funnel| {
            let toast = toast.clone();
            let refresh = refresh.clone();
            spawn_local(async move {
                match funnels::set_status(&funnel.id, funnel.status.toggled()).await {
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
            let Some(funnel) = (*deleting).clone() else {
                return;
            };
            deleting.set(None);
            let toast = toast.clone();
            let refresh = refresh.clone();
            spawn_local(async move {
                match funnels::delete(&funnel.id).await {
                    Ok(()) => {
                        toast.success("Funnel deleted.");
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
                    <h1 class="text-2xl font-bold text-gray-900 dark:text-white">{"Funnels"}</h1>
                    <p class="text-sm text-gray-500">{"Step-by-step pages that turn visitors into leads."}</p>
                </div>
                <button onclick={open_create} class="px-4 py-2 rounded-lg text-sm font-medium bg-indigo-600 hover:bg-indigo-700 text-white">
                    {"New Funnel"}
                </button>
            </div>

            {
                match &*funnels {
                    None => html! {
                        <div class="h-40 rounded-lg bg-gray-200 animate-pulse"></div>
                    },
                    Some(list) if list.is_empty() => html! {
                        <div class="text-center py-16 text-gray-500">{"No funnels yet."}</div>
                    },
                    Some(list) => html! {
                        <div class="grid grid-cols-1 md:grid-cols-2 xl:grid-cols-3 gap-4">
                            { for list.iter().map(|funnel| {
                                let toggle = {
                                    let funnel = funnel.clone();
                                    on_toggle.reform(move |_: MouseEvent| funnel.clone())
                                };
                                let delete = {
                                    let deleting = deleting.clone();
                                    let funnel = funnel.clone();
                                    Callback::from(move |_: MouseEvent| deleting.set(Some(funnel.clone())))
                                };
                                let toggle_label = match funnel.status {
                                    Status::Active => "Deactivate",
                                    Status::Inactive => "Activate",
                                };
                                html! {
                                    <div key={funnel.id.clone()} class="bg-white dark:bg-gray-800 rounded-lg shadow p-5">
                                        <div class="flex items-start justify-between">
                                            <Link<Route> to={Route::FunnelBuilder { id: funnel.id.clone() }} classes="font-semibold text-gray-900 dark:text-white hover:text-indigo-600">
                                                { &funnel.name }
                                            </Link<Route>>
                                            { status_badge(funnel.status) }
                                        </div>
                                        <p class="text-sm text-gray-500 mt-1">{ &funnel.domain }</p>
                                        <p class="text-xs text-gray-400 mt-3">{ format!("{} steps", funnel.steps.len()) }</p>
                                        <div class="flex space-x-3 mt-4">
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
                <CreateFunnelDialog on_submit={on_create} on_close={close_create} />
            }
            if let Some(funnel) = &*deleting {
                <ConfirmDelete
                    title="Delete Funnel"
                    message={format!("\"{}\" and all of its steps will be deleted.", funnel.name)}
                    on_confirm={on_confirm_delete}
                    on_close={close_delete}
                />
            }
        </div>
    }
}

#[derive(Properties, PartialEq)]
struct CreateFunnelDialogProps {
    on_submit: Callback<CreateFunnelRequest>,
    on_close: Callback<()>,
}

#[function_component(CreateFunnelDialog)]
fn create_funnel_dialog(props: &CreateFunnelDialogProps) -> Html {
    let name = use_state(String::new);
    let domain = use_state(String::new);
    let error = use_state(Vec::<String>::new);

    let on_name = {
        let name = name.clone();
        Callback::from(move |value: String| name.set(value))
    };
    let on_domain = {
        let domain = domain.clone();
        Callback::from(move |value: String| domain.set(value))
    };

    let submit = {
        let name = name.clone();
        let domain = domain.clone();
        let error = error.clone();
        let on_submit = props.on_submit.clone();
        Callback::from(move |_: ()| {
            if name.trim().is_empty() {
                error.set(vec!["Name is required".to_string()]);
                return;
            }
            on_submit.emit(CreateFunnelRequest {
                name: name.trim().to_string(),
                domain: domain.trim().to_string(),
            });
        })
    };

    html! {
        <Modal title="New Funnel" on_close={props.on_close.clone()}>
            <form onsubmit={on_submit(submit)}>
                <TextField label="Name" value={(*name).clone()} on_input={on_name} errors={(*error).clone()} />
                <TextField label="Domain" value={(*domain).clone()} on_input={on_domain} placeholder="offers.example.com" />
                <DialogFooter on_cancel={props.on_close.clone()} submit_label="Create" />
            </form>
        </Modal>
    }
}
