use apexleads_shared::pipeline::PipelineBoard;
use apexleads_shared::{Opportunity, PipelineStage};
use axum::http::{Method, StatusCode};
use serde_json::json;

use crate::tests::TestContext;
use crate::tests::fixtures::{ContactFixture, appointment_json};

#[tokio::test]
async fn test_health_and_dashboard() {
    let ctx = TestContext::new();
    let (status, body) = ctx.get("/health").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "healthy");

    let (status, stats) = ctx.get("/api/dashboard-stats").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(stats["pipelineValue"], json!(53000.0));

    let (_, chart) = ctx.get("/api/revenue-chart").await;
    assert_eq!(chart.as_array().unwrap().len(), 6);
    assert_eq!(chart[0], json!({"name": "Jan", "value": 4000}));
}

#[tokio::test]
async fn test_contact_lifecycle() {
    let ctx = TestContext::new();
    let fixture = ContactFixture::default();

    let (status, created) = ctx.request(Method::POST, "/api/contacts", Some(fixture.to_json())).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(created["status"], "Lead");
    let id = created["id"].as_str().unwrap().to_string();

    let (status, updated) = ctx
        .request(
            Method::PUT,
            &format!("/api/contacts/{}", id),
            Some(json!({"status": "Active", "company": "Apex Partners"})),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated["status"], "Active");
    assert_eq!(updated["company"], "Apex Partners");
    assert_eq!(updated["email"], fixture.email.as_str());

    let (_, list) = ctx.get("/api/contacts").await;
    assert_eq!(list.as_array().unwrap().len(), 7);

    let (status, _) = ctx.request(Method::DELETE, &format!("/api/contacts/{}", id), None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);
    let (status, _) = ctx.request(Method::DELETE, &format!("/api/contacts/{}", id), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_contact_requires_valid_email() {
    let ctx = TestContext::new();
    let (status, body) = ctx
        .request(
            Method::POST,
            "/api/contacts",
            Some(json!({"name": "Grace Hopper", "email": "grace.example.com"})),
        )
        .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert!(body["details"]["email"].is_array());
}

#[tokio::test]
async fn test_pipeline_move_and_rollback() {
    let ctx = TestContext::new();
    let (status, body) = ctx.get("/api/opportunities").await;
    assert_eq!(status, StatusCode::OK);
    let opportunities: Vec<Opportunity> = serde_json::from_value(body["opportunities"].clone()).unwrap();
    let stages: Vec<PipelineStage> = serde_json::from_value(body["stages"].clone()).unwrap();
    let mut board = PipelineBoard::new(stages, opportunities);

    let accepted = board.move_card("opp-2", "stage-3").unwrap();
    let (status, saved) = ctx
        .request(
            Method::PATCH,
            &format!("/api/opportunities/{}/stage", accepted.opportunity_id),
            Some(json!({"stageId": accepted.to_stage})),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    board.confirm(serde_json::from_value(saved).unwrap());
    assert_eq!(board.columns()[2].cards.len(), 2);

    let refused = board.move_card("opp-3", "stage-5").unwrap();
    let (status, _) = ctx
        .request(
            Method::PATCH,
            "/api/opportunities/opp-missing/stage",
            Some(json!({"stageId": refused.to_stage})),
        )
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    board.rollback(refused);
    assert_eq!(board.columns()[3].cards[0].id, "opp-3");
}

#[tokio::test]
async fn test_move_to_unknown_stage_is_bad_request() {
    let ctx = TestContext::new();
    let (status, body) = ctx
        .request(
            Method::PATCH,
            "/api/opportunities/opp-1/stage",
            Some(json!({"stageId": "stage-archived"})),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "BAD_REQUEST");
}

#[tokio::test]
async fn test_create_opportunity() {
    let ctx = TestContext::new();
    let (status, body) = ctx
        .request(
            Method::POST,
            "/api/opportunities",
            Some(json!({"title": "Annual Retainer", "contactName": "Diana Prince", "value": 24000, "stageId": "stage-2"})),
        )
        .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["value"], json!(24000.0));

    let (_, board) = ctx.get("/api/opportunities").await;
    assert_eq!(board["opportunities"].as_array().unwrap().len(), 8);
}

#[tokio::test]
async fn test_appointments() {
    let ctx = TestContext::new();
    let (status, created) = ctx
        .request(
            Method::POST,
            "/api/appointments",
            Some(appointment_json("Quarterly review", "13:00", "13:45")),
        )
        .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(created["startTime"], "13:00");

    let (status, body) = ctx
        .request(
            Method::POST,
            "/api/appointments",
            Some(appointment_json("Backwards", "15:00", "14:00")),
        )
        .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert!(body["details"]["endTime"].is_array());

    let id = created["id"].as_str().unwrap();
    let (status, _) = ctx
        .request(Method::DELETE, &format!("/api/appointments/{}", id), None)
        .await;
    assert_eq!(status, StatusCode::NO_CONTENT);
    let (_, list) = ctx.get("/api/appointments").await;
    assert_eq!(list.as_array().unwrap().len(), 3);
}
