use axum::{
    Router,
    extract::{Path, State},
    http::StatusCode,
    response::Json,
    routing::get,
};
use apexleads_shared::{Funnel, Status, validation::validate_funnel};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::AppState;
use crate::error::{ApiError, ApiResult};

#[derive(Debug, Serialize, Deserialize)]
pub struct FunnelCreate {
    pub name: String,
    #[serde(default)]
    pub domain: Option<String>,
}

#[derive(Debug, Default, Serialize, Deserialize)]
pub struct FunnelPatch {
    pub name: Option<String>,
    pub domain: Option<String>,
    pub status: Option<Status>,
}

pub fn funnel_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/", get(list_funnels).post(create_funnel))
        .route(
            "/:id",
            get(get_funnel).put(save_funnel).patch(patch_funnel).delete(delete_funnel),
        )
}

async fn list_funnels(State(state): State<Arc<AppState>>) -> Json<Vec<Funnel>> {
    Json(state.db.funnels.list().await)
}

async fn create_funnel(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<FunnelCreate>,
) -> ApiResult<(StatusCode, Json<Funnel>)> {
    let funnel = Funnel::new(payload.name.trim(), payload.domain.unwrap_or_default().trim());
    validate_funnel(&funnel)?;

    let funnel = state.db.funnels.insert(funnel).await?;
    tracing::info!(funnel_id = %funnel.id, "funnel created");
    Ok((StatusCode::CREATED, Json(funnel)))
}

async fn get_funnel(State(state): State<Arc<AppState>>, Path(id): Path<String>) -> ApiResult<Json<Funnel>> {
    Ok(Json(state.db.funnels.get(&id).await?))
}

/// Whole-object save from the builder.
async fn save_funnel(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    Json(funnel): Json<Funnel>,
) -> ApiResult<Json<Funnel>> {
    if funnel.id != id {
        return Err(ApiError::bad_request(format!(
            "Funnel id {} does not match path id {}",
            funnel.id, id
        )));
    }
    validate_funnel(&funnel)?;

    let funnel = state.db.funnels.replace(funnel).await?;
    tracing::info!(funnel_id = %funnel.id, steps = funnel.steps.len(), "funnel saved");
    Ok(Json(funnel))
}

async fn patch_funnel(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    Json(payload): Json<FunnelPatch>,
) -> ApiResult<Json<Funnel>> {
    let funnel = state
        .db
        .funnels
        .update(&id, |funnel| {
            if let Some(name) = payload.name {
                funnel.name = name.trim().to_string();
            }
            if let Some(domain) = payload.domain {
                funnel.domain = domain.trim().to_string();
            }
            if let Some(status) = payload.status {
                funnel.status = status;
            }
            validate_funnel(funnel)?;
            Ok(())
        })
        .await?;
    Ok(Json(funnel))
}

async fn delete_funnel(State(state): State<Arc<AppState>>, Path(id): Path<String>) -> ApiResult<StatusCode> {
    state.db.funnels.delete(&id).await?;
    tracing::info!(funnel_id = %id, "funnel deleted");
    Ok(StatusCode::NO_CONTENT)
}
