use axum::{
    Router,
    extract::{Path, State},
    http::StatusCode,
    response::Json,
    routing::get,
};
use apexleads_shared::{Status, Workflow, validation::validate_workflow};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::AppState;
use crate::error::{ApiError, ApiResult};

#[derive(Debug, Serialize, Deserialize)]
pub struct WorkflowCreate {
    pub name: String,
}

#[derive(Debug, Default, Serialize, Deserialize)]
pub struct WorkflowPatch {
    pub name: Option<String>,
    pub status: Option<Status>,
}

pub fn workflow_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/", get(list_workflows).post(create_workflow))
        .route(
            "/:id",
            get(get_workflow)
                .put(save_workflow)
                .patch(patch_workflow)
                .delete(delete_workflow),
        )
}

async fn list_workflows(State(state): State<Arc<AppState>>) -> Json<Vec<Workflow>> {
    Json(state.db.workflows.list().await)
}

async fn create_workflow(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<WorkflowCreate>,
) -> ApiResult<(StatusCode, Json<Workflow>)> {
    let workflow = Workflow::new(payload.name.trim());
    validate_workflow(&workflow)?;

    let workflow = state.db.workflows.insert(workflow).await?;
    tracing::info!(workflow_id = %workflow.id, "workflow created");
    Ok((StatusCode::CREATED, Json(workflow)))
}

async fn get_workflow(State(state): State<Arc<AppState>>, Path(id): Path<String>) -> ApiResult<Json<Workflow>> {
    Ok(Json(state.db.workflows.get(&id).await?))
}

/// Whole-object save from the builder.
async fn save_workflow(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    Json(workflow): Json<Workflow>,
) -> ApiResult<Json<Workflow>> {
    if workflow.id != id {
        return Err(ApiError::bad_request(format!(
            "Workflow id {} does not match path id {}",
            workflow.id, id
        )));
    }
    validate_workflow(&workflow)?;

    let workflow = state.db.workflows.replace(workflow).await?;
    tracing::info!(workflow_id = %workflow.id, actions = workflow.actions.len(), "workflow saved");
    Ok(Json(workflow))
}

async fn patch_workflow(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    Json(payload): Json<WorkflowPatch>,
) -> ApiResult<Json<Workflow>> {
    let workflow = state
        .db
        .workflows
        .update(&id, |workflow| {
            if let Some(name) = payload.name {
                workflow.name = name.trim().to_string();
            }
            if let Some(status) = payload.status {
                workflow.status = status;
            }
            validate_workflow(workflow)?;
            Ok(())
        })
        .await?;
    Ok(Json(workflow))
}

async fn delete_workflow(State(state): State<Arc<AppState>>, Path(id): Path<String>) -> ApiResult<StatusCode> {
    state.db.workflows.delete(&id).await?;
    tracing::info!(workflow_id = %id, "workflow deleted");
    Ok(StatusCode::NO_CONTENT)
}
