use apexleads_shared::builder::{DialogState, FINAL_PLACEHOLDER_ID, FunnelBuilder};
use apexleads_shared::{Funnel, FunnelStepType};
use axum::http::{Method, StatusCode};
use serde_json::json;

use crate::config::Config;
use crate::tests::{TestContext, fixtures::FunnelFixture};

#[tokio::test]
async fn test_create_funnel_with_landing_page() {
    let ctx = TestContext::new();
    let fixture = FunnelFixture::default();

    let (status, body) = ctx.request(Method::POST, "/api/funnels", Some(fixture.to_json())).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["name"], fixture.name.as_str());
    assert_eq!(body["domain"], fixture.domain.as_str());
    assert_eq!(body["steps"].as_array().unwrap().len(), 1);
    assert_eq!(body["steps"][0]["path"], "/");

    let (_, list) = ctx.get("/api/funnels").await;
    assert_eq!(list.as_array().unwrap().len(), 3);
}

#[tokio::test]
async fn test_builder_insert_and_save() {
    let ctx = TestContext::new();
    let (_, body) = ctx.get("/api/funnels/funnel-1").await;
    let funnel: Funnel = serde_json::from_value(body).unwrap();

    let mut builder = FunnelBuilder::loaded(funnel);
    builder.open_dialog(DialogState::AddStep {
        parent_node_id: "step-2".to_string(),
    });
    builder.submit_add(FunnelStepType::Upsell);
    let payload = builder.begin_save().unwrap();

    let (status, saved) = ctx
        .request(
            Method::PUT,
            "/api/funnels/funnel-1",
            Some(serde_json::to_value(&payload).unwrap()),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    let saved: Funnel = serde_json::from_value(saved).unwrap();
    let types: Vec<FunnelStepType> = saved.steps.iter().map(|s| s.step_type).collect();
    assert_eq!(
        types,
        [
            FunnelStepType::Page,
            FunnelStepType::Form,
            FunnelStepType::Upsell,
            FunnelStepType::ThankYou
        ]
    );
    assert!(builder.finish_save(Ok(saved)).is_ok());
}

#[tokio::test]
async fn test_empty_funnel_round_trips() {
    let ctx = TestContext::new();
    let (_, mut body) = ctx.get("/api/funnels/funnel-2").await;
    body["steps"] = json!([]);
    let (status, _) = ctx.request(Method::PUT, "/api/funnels/funnel-2", Some(body)).await;
    assert_eq!(status, StatusCode::OK);

    let (_, body) = ctx.get("/api/funnels/funnel-2").await;
    let funnel: Funnel = serde_json::from_value(body).unwrap();
    let mut builder = FunnelBuilder::loaded(funnel);
    assert_eq!(builder.nodes().len(), 1);

    builder.insert_step(FINAL_PLACEHOLDER_ID, None, FunnelStepType::Page);
    assert_eq!(builder.persistable_payload().unwrap().steps.len(), 1);
}

#[tokio::test]
async fn test_save_rejects_bad_paths() {
    let ctx = TestContext::new();
    let (_, mut body) = ctx.get("/api/funnels/funnel-1").await;
    body["steps"][1]["path"] = json!("opt-in");

    let (status, body) = ctx.request(Method::PUT, "/api/funnels/funnel-1", Some(body)).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["details"]["steps[1].path"], json!(["Path must start with /"]));
}

#[tokio::test]
async fn test_save_rejects_mismatched_id() {
    let ctx = TestContext::new();
    let (_, body) = ctx.get("/api/funnels/funnel-1").await;
    let (status, _) = ctx.request(Method::PUT, "/api/funnels/funnel-2", Some(body)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_save_unknown_funnel_is_not_found() {
    let ctx = TestContext::new();
    let (_, mut body) = ctx.get("/api/funnels/funnel-1").await;
    body["id"] = json!("funnel-404");
    let (status, _) = ctx.request(Method::PUT, "/api/funnels/funnel-404", Some(body)).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_patch_renames_funnel() {
    let ctx = TestContext::new();
    let (status, body) = ctx
        .request(
            Method::PATCH,
            "/api/funnels/funnel-2",
            Some(json!({"name": "Spring Webinar", "status": "active"})),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["name"], "Spring Webinar");
    assert_eq!(body["status"], "active");
    assert_eq!(body["steps"].as_array().unwrap().len(), 2);
}

#[tokio::test]
async fn test_unseeded_database_starts_empty() {
    let ctx = TestContext::with_config(Config {
        seed_mock_data: false,
        ..Config::default()
    });
    let (status, body) = ctx.get("/api/funnels").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!([]));
}
