// Contacts page - contact table with inline create form
use apexleads_shared::validation::ContactForm;
use apexleads_shared::{Contact, ContactStatus, ValidationErrors};
use wasm_bindgen_futures::spawn_local;
use web_sys::HtmlSelectElement;
use yew::prelude::*;

use crate::components::dialogs::{ConfirmDelete, DialogFooter, Modal, TextField, field_errors, on_submit};
use crate::components::toast::use_toast;
use crate::services::contacts::{self, CreateContactRequest};

const STATUSES: [ContactStatus; 3] = [ContactStatus::Lead, ContactStatus::Active, ContactStatus::Inactive];

fn status_label(status: ContactStatus) -> &'static str {
    match status {
        ContactStatus::Lead => "Lead",
        ContactStatus::Active => "Active",
        ContactStatus::Inactive => "Inactive",
    }
}

fn status_from_label(label: &str) -> Option<ContactStatus> {
    STATUSES.into_iter().find(|s| status_label(*s) == label)
}

#[function_component(ContactsPage)]
pub fn contacts_page() -> Html {
    let contacts = use_state(|| None::<Vec<Contact>>);
    let reload = use_state(|| 0u32);
    let creating = use_state(|| false);
    let deleting = use_state(|| None::<Contact>);
    let search = use_state(String::new);
    let toast = use_toast();

    {
        let contacts = contacts.clone();
        let toast = toast.clone();
        use_effect_with(*reload, move |_| {
            spawn_local(async move {
                match contacts::list().await {
                    Ok(list) => contacts.set(Some(list)),
                    Err(e) => {
                        toast.error(format!("Failed to load contacts: {}", e));
                        contacts.set(Some(Vec::new()));
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

    let on_created = {
        let creating = creating.clone();
        let refresh = refresh.clone();
        Callback::from(move |_: ()| {
            creating.set(false);
            refresh.emit(());
        })
    };

    let on_status = {
        let toast = toast.clone();
        let refresh = refresh.clone();
        Callback::from(move |(id, status): (String, ContactStatus)| {
            let toast = toast.clone();
            let refresh = refresh.clone();
            spawn_local(async move {
                match contacts::set_status(&id, status).await {
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
            let Some(contact) = (*deleting).clone() else {
                return;
            };
            deleting.set(None);
            let toast = toast.clone();
            let refresh = refresh.clone();
            spawn_local(async move {
                match contacts::delete(&contact.id).await {
                    Ok(()) => {
                        toast.success("Contact deleted.");
                        refresh.emit(());
                    }
                    Err(e) => toast.error(e.summary()),
                }
            });
        })
    };

    let on_search = {
        let search = search.clone();
        Callback::from(move |value: String| search.set(value))
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

    let query = search.trim().to_lowercase();
    let visible: Vec<Contact> = contacts
        .as_ref()
        .map(|list| {
            list.iter()
                .filter(|c| {
                    query.is_empty()
                        || c.name.to_lowercase().contains(&query)
                        || c.email.to_lowercase().contains(&query)
                        || c.company.to_lowercase().contains(&query)
                })
                .cloned()
                .collect()
        })
        .unwrap_or_default();

    html! {
        <div class="p-8 space-y-6">
            <div class="flex items-center justify-between">
                <h1 class="text-2xl font-bold text-gray-900 dark:text-white">{"Contacts"}</h1>
                <button onclick={open_create} class="px-4 py-2 rounded-lg text-sm font-medium bg-indigo-600 hover:bg-indigo-700 text-white">
                    {"Add Contact"}
                </button>
            </div>

            <div class="max-w-sm">
                <TextField label="Search" value={(*search).clone()} on_input={on_search} placeholder="Name, email or company" />
            </div>

            if contacts.is_none() {
                <div class="h-40 rounded-lg bg-gray-200 animate-pulse"></div>
            } else {
                <div class="bg-white dark:bg-gray-800 rounded-lg shadow overflow-hidden">
                    <table class="min-w-full divide-y divide-gray-200 dark:divide-gray-700">
                        <thead class="bg-gray-50 dark:bg-gray-900">
                            <tr>
                                <th class="px-6 py-3 text-left text-xs font-medium text-gray-500 uppercase">{"Name"}</th>
                                <th class="px-6 py-3 text-left text-xs font-medium text-gray-500 uppercase">{"Email"}</th>
                                <th class="px-6 py-3 text-left text-xs font-medium text-gray-500 uppercase">{"Phone"}</th>
                                <th class="px-6 py-3 text-left text-xs font-medium text-gray-500 uppercase">{"Company"}</th>
                                <th class="px-6 py-3 text-left text-xs font-medium text-gray-500 uppercase">{"Status"}</th>
                                <th class="px-6 py-3"></th>
                            </tr>
                        </thead>
                        <tbody class="divide-y divide-gray-100 dark:divide-gray-700">
                            { for visible.iter().map(|contact| {
                                let onchange = {
                                    let id = contact.id.clone();
                                    let on_status = on_status.clone();
                                    Callback::from(move |e: Event| {
                                        let select: HtmlSelectElement = e.target_unchecked_into();
                                        if let Some(status) = status_from_label(&select.value()) {
                                            on_status.emit((id.clone(), status));
                                        }
                                    })
                                };
                                let delete = {
                                    let deleting = deleting.clone();
                                    let contact = contact.clone();
                                    Callback::from(move |_: MouseEvent| deleting.set(Some(contact.clone())))
                                };
                                html! {
                                    <tr key={contact.id.clone()}>
                                        <td class="px-6 py-4 text-sm font-medium text-gray-900 dark:text-white">{ &contact.name }</td>
                                        <td class="px-6 py-4 text-sm text-gray-600 dark:text-gray-300">{ &contact.email }</td>
                                        <td class="px-6 py-4 text-sm text-gray-600 dark:text-gray-300">{ &contact.phone }</td>
                                        <td class="px-6 py-4 text-sm text-gray-600 dark:text-gray-300">{ &contact.company }</td>
                                        <td class="px-6 py-4 text-sm">
                                            <select {onchange} class="rounded border border-gray-300 px-2 py-1 text-sm">
                                                { for STATUSES.iter().map(|status| html! {
                                                    <option value={status_label(*status)} selected={*status == contact.status}>
                                                        { status_label(*status) }
                                                    </option>
                                                })}
                                            </select>
                                        </td>
                                        <td class="px-6 py-4 text-right">
                                            <button onclick={delete} class="text-sm text-red-600 hover:underline">{"Delete"}</button>
                                        </td>
                                    </tr>
                                }
                            })}
                        </tbody>
                    </table>
                    if visible.is_empty() {
                        <div class="text-center py-10 text-gray-500 text-sm">{"No contacts match."}</div>
                    }
                </div>
            }

            if *creating {
                <CreateContactDialog on_created={on_created} on_close={close_create} />
            }
            if let Some(contact) = &*deleting {
                <ConfirmDelete
                    title="Delete Contact"
                    message={format!("{} will be removed from your contacts.", contact.name)}
                    on_confirm={on_confirm_delete}
                    on_close={close_delete}
                />
            }
        </div>
    }
}

#[derive(Properties, PartialEq)]
struct CreateContactDialogProps {
    on_created: Callback<()>,
    on_close: Callback<()>,
}

#[function_component(CreateContactDialog)]
fn create_contact_dialog(props: &CreateContactDialogProps) -> Html {
    let form = use_state(ContactForm::default);
    let phone = use_state(String::new);
    let company = use_state(String::new);
    let errors = use_state(|| None::<ValidationErrors>);
    let toast = use_toast();

    let on_name = {
        let form = form.clone();
        Callback::from(move |name: String| form.set(ContactForm { name, ..(*form).clone() }))
    };
    let on_email = {
        let form = form.clone();
        Callback::from(move |email: String| form.set(ContactForm { email, ..(*form).clone() }))
    };
    let on_phone = {
        let phone = phone.clone();
        Callback::from(move |value: String| phone.set(value))
    };
    let on_company = {
        let company = company.clone();
        Callback::from(move |value: String| company.set(value))
    };

    // Server-side field errors land in the same slots as the local ones.
    let submit = {
        let form = form.clone();
        let phone = phone.clone();
        let company = company.clone();
        let errors = errors.clone();
        let on_created = props.on_created.clone();
        Callback::from(move |_: ()| {
            if let Err(e) = form.validate() {
                errors.set(Some(e));
                return;
            }
            let request = CreateContactRequest {
                name: form.name.trim().to_string(),
                email: form.email.trim().to_string(),
                phone: phone.trim().to_string(),
                company: company.trim().to_string(),
            };
            let errors = errors.clone();
            let toast = toast.clone();
            let on_created = on_created.clone();
            spawn_local(async move {
                match contacts::create(&request).await {
                    Ok(contact) => {
                        toast.success(format!("{} added.", contact.name));
                        on_created.emit(());
                    }
                    Err(e) => {
                        if let Some(details) = e.details.clone() {
                            errors.set(Some(ValidationErrors::from(details)));
                        }
                        toast.error(e.summary());
                    }
                }
            });
        })
    };

    html! {
        <Modal title="Add Contact" on_close={props.on_close.clone()}>
            <form onsubmit={on_submit(submit)}>
                <TextField label="Name" value={form.name.clone()} on_input={on_name} errors={field_errors(&errors, "name")} />
                <TextField label="Email" value={form.email.clone()} on_input={on_email} errors={field_errors(&errors, "email")} />
                <TextField label="Phone" value={(*phone).clone()} on_input={on_phone} />
                <TextField label="Company" value={(*company).clone()} on_input={on_company} />
                <DialogFooter on_cancel={props.on_close.clone()} submit_label="Add Contact" />
            </form>
        </Modal>
    }
}
