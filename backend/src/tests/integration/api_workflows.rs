use apexleads_shared::builder::{TRIGGER_NODE_ID, WorkflowBuilder};
use apexleads_shared::{ActionType, Workflow};
use axum::http::{Method, StatusCode};
use serde_json::json;

use crate::tests::{TestContext, fixtures::workflow_name};

#[tokio::test]
async fn test_list_seeds_on_first_access() {
    let ctx = TestContext::new();
    let (status, body) = ctx.get("/api/workflows").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body.as_array().unwrap().len(), 2);
}

#[tokio::test]
async fn test_create_then_fetch_workflow() {
    let ctx = TestContext::new();
    let name = workflow_name();

    let (status, created) = ctx
        .request(Method::POST, "/api/workflows", Some(json!({"name": name})))
        .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(created["status"], "inactive");
    assert_eq!(created["trigger"]["type"], "contact_created");
    assert_eq!(created["actions"], json!([]));

    let id = created["id"].as_str().unwrap();
    let (status, fetched) = ctx.get(&format!("/api/workflows/{}", id)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(fetched, created);
}

#[tokio::test]
async fn test_create_requires_name() {
    let ctx = TestContext::new();
    let (status, body) = ctx
        .request(Method::POST, "/api/workflows", Some(json!({"name": "   "})))
        .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["code"], "VALIDATION_ERROR");
    assert!(body["details"]["name"].is_array());
}

#[tokio::test]
async fn test_unknown_workflow_is_not_found() {
    let ctx = TestContext::new();
    let (status, body) = ctx.get("/api/workflows/wf-missing").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["code"], "NOT_FOUND");
    assert_eq!(body["message"], "Workflow not found");
}

#[tokio::test]
async fn test_builder_save_round_trip() {
    let ctx = TestContext::new();
    let (_, body) = ctx.get("/api/workflows/wf-2").await;
    let workflow: Workflow = serde_json::from_value(body).unwrap();

    let mut builder = WorkflowBuilder::loaded(workflow);
    builder.insert_step(TRIGGER_NODE_ID, None, ActionType::AddTag);
    builder.delete_step("action-3");
    let payload = builder.begin_save().unwrap();

    let (status, saved) = ctx
        .request(
            Method::PUT,
            "/api/workflows/wf-2",
            Some(serde_json::to_value(&payload).unwrap()),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    let saved: Workflow = serde_json::from_value(saved).unwrap();
    assert!(builder.finish_save(Ok(saved)).is_ok());

    let (_, body) = ctx.get("/api/workflows/wf-2").await;
    let types: Vec<&str> = body["actions"]
        .as_array()
        .unwrap()
        .iter()
        .map(|a| a["type"].as_str().unwrap())
        .collect();
    assert_eq!(types, ["add_tag", "send_email", "wait"]);
}

#[tokio::test]
async fn test_branches_survive_save() {
    let ctx = TestContext::new();
    let (_, body) = ctx.get("/api/workflows/wf-1").await;
    let original: Workflow = serde_json::from_value(body).unwrap();

    let builder = WorkflowBuilder::loaded(original.clone());
    let payload = builder.persistable_payload().unwrap();
    let (status, saved) = ctx
        .request(
            Method::PUT,
            "/api/workflows/wf-1",
            Some(serde_json::to_value(&payload).unwrap()),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(serde_json::from_value::<Workflow>(saved).unwrap(), original);
}

#[tokio::test]
async fn test_save_rejects_mismatched_id() {
    let ctx = TestContext::new();
    let (_, mut body) = ctx.get("/api/workflows/wf-1").await;
    body["id"] = json!("wf-2");

    let (status, body) = ctx.request(Method::PUT, "/api/workflows/wf-1", Some(body)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "BAD_REQUEST");
}

#[tokio::test]
async fn test_save_validates_actions() {
    let ctx = TestContext::new();
    let (_, mut body) = ctx.get("/api/workflows/wf-2").await;
    body["actions"][1]["details"] = json!("");

    let (status, body) = ctx.request(Method::PUT, "/api/workflows/wf-2", Some(body)).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert!(body["details"]["actions[1].details"].is_array());
}

#[tokio::test]
async fn test_patch_toggles_status() {
    let ctx = TestContext::new();
    let (status, body) = ctx
        .request(Method::PATCH, "/api/workflows/wf-2", Some(json!({"status": "active"})))
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "active");
    assert_eq!(body["name"], "Appointment Reminder");
}

#[tokio::test]
async fn test_delete_workflow() {
    let ctx = TestContext::new();
    let (status, _) = ctx.request(Method::DELETE, "/api/workflows/wf-1", None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (status, _) = ctx.get("/api/workflows/wf-1").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    let (status, _) = ctx.request(Method::DELETE, "/api/workflows/wf-1", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}
