use axum::{http::StatusCode, response::Json};
use apexleads_shared::{ChartPoint, DashboardStats, mock_data};
use serde_json::json;

pub mod appointments;
pub mod contacts;
pub mod funnels;
pub mod opportunities;
pub mod workflows;

pub use appointments::appointment_routes;
pub use contacts::contact_routes;
pub use funnels::funnel_routes;
pub use opportunities::opportunity_routes;
pub use workflows::workflow_routes;

pub async fn health_check() -> (StatusCode, Json<serde_json::Value>) {
    (StatusCode::OK, Json(json!({"status": "healthy", "service": "apexleads-api"})))
}

pub async fn dashboard_stats() -> Json<DashboardStats> {
    Json(mock_data::dashboard_stats())
}

pub async fn revenue_chart() -> Json<Vec<ChartPoint>> {
    Json(mock_data::revenue_chart())
}
