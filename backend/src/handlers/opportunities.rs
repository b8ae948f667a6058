use axum::{
    Router,
    extract::{Path, State},
    http::StatusCode,
    response::Json,
    routing::{get, patch},
};
use apexleads_shared::{Opportunity, PipelineStage};
use chrono::Utc;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use uuid::Uuid;

use crate::AppState;
use crate::error::{ApiError, ApiResult, AppError};

/// The kanban board: every card plus the columns they sit in.
#[derive(Debug, Serialize, Deserialize)]
pub struct PipelineResponse {
    pub opportunities: Vec<Opportunity>,
    pub stages: Vec<PipelineStage>,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OpportunityCreate {
    pub title: String,
    pub contact_name: String,
    #[serde(with = "rust_decimal::serde::float")]
    pub value: Decimal,
    pub stage_id: String,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StageMove {
    pub stage_id: String,
}

pub fn opportunity_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/", get(get_pipeline).post(create_opportunity))
        .route("/:id/stage", patch(move_opportunity))
}

async fn get_pipeline(State(state): State<Arc<AppState>>) -> Json<PipelineResponse> {
    Json(PipelineResponse {
        opportunities: state.db.opportunities.list().await,
        stages: state.db.stages.list().await,
    })
}

async fn create_opportunity(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<OpportunityCreate>,
) -> ApiResult<(StatusCode, Json<Opportunity>)> {
    if payload.title.trim().is_empty() {
        return Err(ApiError::validation_single("title", "Title is required"));
    }
    if payload.value.is_sign_negative() {
        return Err(ApiError::validation_single("value", "Value must not be negative"));
    }
    if !state.db.stages.contains(&payload.stage_id).await {
        return Err(ApiError::bad_request(format!("Unknown stage {}", payload.stage_id)));
    }

    let now = Utc::now();
    let opportunity = Opportunity {
        id: Uuid::new_v4().to_string(),
        title: payload.title.trim().to_string(),
        contact_name: payload.contact_name,
        value: payload.value,
        stage_id: payload.stage_id,
        last_update: now,
        created_at: now,
    };
    let opportunity = state.db.opportunities.insert(opportunity).await?;
    Ok((StatusCode::CREATED, Json(opportunity)))
}

async fn move_opportunity(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    Json(payload): Json<StageMove>,
) -> ApiResult<Json<Opportunity>> {
    if !state.db.stages.contains(&payload.stage_id).await {
        return Err(AppError::BadRequest(format!("Unknown stage {}", payload.stage_id)));
    }
    let opportunity = state
        .db
        .opportunities
        .update(&id, |opportunity| {
            opportunity.stage_id = payload.stage_id;
            opportunity.last_update = Utc::now();
            Ok(())
        })
        .await?;
    tracing::debug!(opportunity_id = %id, stage_id = %opportunity.stage_id, "opportunity moved");
    Ok(Json(opportunity))
}
