use axum::{
    Router,
    extract::{Path, State},
    http::StatusCode,
    response::Json,
    routing::{get, put},
};
use apexleads_shared::{Contact, ContactStatus, validation::ContactForm};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use uuid::Uuid;

use crate::AppState;
use crate::error::ApiResult;

#[derive(Debug, Serialize, Deserialize)]
pub struct ContactCreate {
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub company: String,
    pub status: Option<ContactStatus>,
}

#[derive(Debug, Default, Serialize, Deserialize)]
pub struct ContactUpdate {
    pub name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub company: Option<String>,
    pub status: Option<ContactStatus>,
}

pub fn contact_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/", get(list_contacts).post(create_contact))
        .route("/:id", put(update_contact).delete(delete_contact))
}

async fn list_contacts(State(state): State<Arc<AppState>>) -> Json<Vec<Contact>> {
    Json(state.db.contacts.list().await)
}

async fn create_contact(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<ContactCreate>,
) -> ApiResult<(StatusCode, Json<Contact>)> {
    ContactForm {
        name: payload.name.clone(),
        email: payload.email.clone(),
    }
    .validate()?;

    let contact = Contact {
        id: Uuid::new_v4().to_string(),
        name: payload.name.trim().to_string(),
        email: payload.email.trim().to_string(),
        phone: payload.phone,
        company: payload.company,
        status: payload.status.unwrap_or(ContactStatus::Lead),
        created_at: Utc::now(),
    };
    let contact = state.db.contacts.insert(contact).await?;
    tracing::info!(contact_id = %contact.id, "contact created");
    Ok((StatusCode::CREATED, Json(contact)))
}

async fn update_contact(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    Json(payload): Json<ContactUpdate>,
) -> ApiResult<Json<Contact>> {
    let contact = state
        .db
        .contacts
        .update(&id, |contact| {
            if let Some(name) = payload.name {
                contact.name = name;
            }
            if let Some(email) = payload.email {
                contact.email = email;
            }
            if let Some(phone) = payload.phone {
                contact.phone = phone;
            }
            if let Some(company) = payload.company {
                contact.company = company;
            }
            if let Some(status) = payload.status {
                contact.status = status;
            }
            ContactForm {
                name: contact.name.clone(),
                email: contact.email.clone(),
            }
            .validate()?;
            Ok(())
        })
        .await?;
    Ok(Json(contact))
}

async fn delete_contact(State(state): State<Arc<AppState>>, Path(id): Path<String>) -> ApiResult<StatusCode> {
    state.db.contacts.delete(&id).await?;
    Ok(StatusCode::NO_CONTENT)
}
