// Calendar page - upcoming appointments grouped by day
use apexleads_shared::validation::validate_appointment;
use apexleads_shared::{Appointment, ValidationErrors};
use chrono::{NaiveDate, NaiveTime};
use std::collections::BTreeMap;
use wasm_bindgen_futures::spawn_local;
use yew::prelude::*;

use crate::components::dialogs::{DialogFooter, Modal, TextField, field_errors, on_submit};
use crate::components::toast::use_toast;
use crate::services::appointments::{self, CreateAppointmentRequest};

#[derive(Clone, Debug, Default, PartialEq)]
struct AppointmentForm {
    title: String,
    date: String,
    start_time: String,
    end_time: String,
}

impl AppointmentForm {
    /// Parses the raw inputs, then applies the same rules the server does.
    fn parse(&self) -> Result<CreateAppointmentRequest, ValidationErrors> {
        let date = NaiveDate::parse_from_str(self.date.trim(), "%Y-%m-%d").ok();
        let start_time = NaiveTime::parse_from_str(self.start_time.trim(), "%H:%M").ok();
        let end_time = NaiveTime::parse_from_str(self.end_time.trim(), "%H:%M").ok();

        let (Some(date), Some(start_time), Some(end_time)) = (date, start_time, end_time) else {
            return Err(ValidationErrors::new()
                .check(self.title.trim().is_empty(), "title", "Title is required")
                .check(date.is_none(), "date", "Use YYYY-MM-DD")
                .check(start_time.is_none(), "startTime", "Use HH:MM")
                .check(end_time.is_none(), "endTime", "Use HH:MM"));
        };

        let request = CreateAppointmentRequest {
            title: self.title.trim().to_string(),
            date,
            start_time,
            end_time,
        };
        validate_appointment(&Appointment {
            id: String::new(),
            title: request.title.clone(),
            date,
            start_time,
            end_time,
        })?;
        Ok(request)
    }
}

#[function_component(CalendarPage)]
pub fn calendar_page() -> Html {
    let appointments = use_state(|| None::<Vec<Appointment>>);
    let reload = use_state(|| 0u32);
    let creating = use_state(|| false);
    let toast = use_toast();

    {
        let appointments = appointments.clone();
        let toast = toast.clone();
        use_effect_with(*reload, move |_| {
            spawn_local(async move {
                match appointments::list().await {
                    Ok(list) => appointments.set(Some(list)),
                    Err(e) => {
                        toast.error(format!("Failed to load appointments: {}", e));
                        appointments.set(Some(Vec::new()));
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

    let on_delete = {
        let toast = toast.clone();
        let refresh = refresh.clone();
        Callback::from(move |id: String| {
            let toast = toast.clone();
            let refresh = refresh.clone();
            spawn_local(async move {
                match appointments::delete(&id).await {
                    Ok(()) => refresh.emit(()),
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

    // The server already sorts by date and start time.
    let mut by_day: BTreeMap<NaiveDate, Vec<Appointment>> = BTreeMap::new();
    for appointment in appointments.iter().flatten() {
        by_day.entry(appointment.date).or_default().push(appointment.clone());
    }

    html! {
        <div class="p-8 space-y-6">
            <div class="flex items-center justify-between">
                <h1 class="text-2xl font-bold text-gray-900 dark:text-white">{"Calendar"}</h1>
                <button onclick={open_create} class="px-4 py-2 rounded-lg text-sm font-medium bg-indigo-600 hover:bg-indigo-700 text-white">
                    {"New Appointment"}
                </button>
            </div>

            if appointments.is_none() {
                <div class="h-40 rounded-lg bg-gray-200 animate-pulse"></div>
            } else if by_day.is_empty() {
                <div class="text-center py-16 text-gray-500">{"No appointments scheduled."}</div>
            } else {
                { for by_day.iter().map(|(day, items)| html! {
                    <section key={day.to_string()} class="bg-white dark:bg-gray-800 rounded-lg shadow">
                        <h2 class="px-6 py-3 border-b border-gray-100 dark:border-gray-700 font-semibold text-gray-800 dark:text-gray-100">
                            { day.format("%A, %B %-d, %Y").to_string() }
                        </h2>
                        <ul class="divide-y divide-gray-100 dark:divide-gray-700">
                            { for items.iter().map(|appointment| {
                                let id = appointment.id.clone();
                                let onclick = on_delete.reform(move |_: MouseEvent| id.clone());
                                html! {
                                    <li key={appointment.id.clone()} class="flex items-center justify-between px-6 py-3">
                                        <div>
                                            <p class="text-sm font-medium text-gray-900 dark:text-white">{ &appointment.title }</p>
                                            <p class="text-xs text-gray-500">
                                                { format!("{} - {}", appointment.start_time.format("%H:%M"), appointment.end_time.format("%H:%M")) }
                                            </p>
                                        </div>
                                        <button {onclick} class="text-sm text-red-600 hover:underline">{"Cancel"}</button>
                                    </li>
                                }
                            })}
                        </ul>
                    </section>
                })}
            }

            if *creating {
                <CreateAppointmentDialog on_created={on_created} on_close={close_create} />
            }
        </div>
    }
}

#[derive(Properties, PartialEq)]
struct CreateAppointmentDialogProps {
    on_created: Callback<()>,
    on_close: Callback<()>,
}

#[function_component(CreateAppointmentDialog)]
fn create_appointment_dialog(props: &CreateAppointmentDialogProps) -> Html {
    let form = use_state(AppointmentForm::default);
    let errors = use_state(|| None::<ValidationErrors>);
    let toast = use_toast();

    let on_title = {
        let form = form.clone();
        Callback::from(move |title: String| form.set(AppointmentForm { title, ..(*form).clone() }))
    };
    let on_date = {
        let form = form.clone();
        Callback::from(move |date: String| form.set(AppointmentForm { date, ..(*form).clone() }))
    };
    let on_start = {
        let form = form.clone();
        Callback::from(move |start_time: String| form.set(AppointmentForm { start_time, ..(*form).clone() }))
    };
    let on_end = {
        let form = form.clone();
        Callback::from(move |end_time: String| form.set(AppointmentForm { end_time, ..(*form).clone() }))
    };

    let submit = {
        let form = form.clone();
        let errors = errors.clone();
        let on_created = props.on_created.clone();
        Callback::from(move |_: ()| {
            let request = match form.parse() {
                Ok(request) => request,
                Err(e) => {
                    errors.set(Some(e));
                    return;
                }
            };
            let errors = errors.clone();
            let toast = toast.clone();
            let on_created = on_created.clone();
            spawn_local(async move {
                match appointments::create(&request).await {
                    Ok(appointment) => {
                        toast.success(format!("{} scheduled.", appointment.title));
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
        <Modal title="New Appointment" on_close={props.on_close.clone()}>
            <form onsubmit={on_submit(submit)}>
                <TextField label="Title" value={form.title.clone()} on_input={on_title} errors={field_errors(&errors, "title")} />
                <TextField label="Date" value={form.date.clone()} on_input={on_date} errors={field_errors(&errors, "date")} placeholder="2024-06-10" />
                <div class="grid grid-cols-2 gap-3">
                    <TextField label="Start" value={form.start_time.clone()} on_input={on_start} errors={field_errors(&errors, "startTime")} placeholder="09:00" />
                    <TextField label="End" value={form.end_time.clone()} on_input={on_end} errors={field_errors(&errors, "endTime")} placeholder="09:30" />
                </div>
                <DialogFooter on_cancel={props.on_close.clone()} submit_label="Schedule" />
            </form>
        </Modal>
    }
}
