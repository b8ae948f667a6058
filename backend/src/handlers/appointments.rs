use axum::{
    Router,
    extract::{Path, State},
    http::StatusCode,
    response::Json,
    routing::{delete, get},
};
use apexleads_shared::{Appointment, hh_mm, validation::validate_appointment};
use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use uuid::Uuid;

use crate::AppState;
use crate::error::ApiResult;

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AppointmentCreate {
    pub title: String,
    pub date: NaiveDate,
    #[serde(with = "hh_mm")]
    pub start_time: NaiveTime,
    #[serde(with = "hh_mm")]
    pub end_time: NaiveTime,
}

pub fn appointment_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/", get(list_appointments).post(create_appointment))
        .route("/:id", delete(delete_appointment))
}

async fn list_appointments(State(state): State<Arc<AppState>>) -> Json<Vec<Appointment>> {
    let mut appointments = state.db.appointments.list().await;
    appointments.sort_by_key(|a| (a.date, a.start_time));
    Json(appointments)
}

async fn create_appointment(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<AppointmentCreate>,
) -> ApiResult<(StatusCode, Json<Appointment>)> {
    let appointment = Appointment {
        id: Uuid::new_v4().to_string(),
        title: payload.title.trim().to_string(),
        date: payload.date,
        start_time: payload.start_time,
        end_time: payload.end_time,
    };
    validate_appointment(&appointment)?;

    let appointment = state.db.appointments.insert(appointment).await?;
    Ok((StatusCode::CREATED, Json(appointment)))
}

async fn delete_appointment(State(state): State<Arc<AppState>>, Path(id): Path<String>) -> ApiResult<StatusCode> {
    state.db.appointments.delete(&id).await?;
    Ok(StatusCode::NO_CONTENT)
}
