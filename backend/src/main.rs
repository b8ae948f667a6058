use axum::{
    Router,
    http::{HeaderValue, Method},
    routing::get,
};
use std::sync::Arc;
use tower::ServiceBuilder;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

mod config;
mod database;
mod error;
mod handlers;

pub use error::{ApiError, ApiResult, AppError};

#[cfg(test)]
mod tests;

pub struct AppState {
    pub db: database::Database,
}

impl AppState {
    pub fn new(config: &config::Config) -> Self {
        Self {
            db: database::Database::new(config.seed_mock_data),
        }
    }
}

fn cors_layer(config: &config::Config) -> anyhow::Result<CorsLayer> {
    let cors = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::PATCH, Method::DELETE])
        .allow_headers(Any);
    Ok(match &config.cors_allow_origin {
        Some(origin) => cors.allow_origin(origin.parse::<HeaderValue>()?),
        None => cors.allow_origin(Any),
    })
}

pub fn build_router(state: Arc<AppState>, config: &config::Config) -> anyhow::Result<Router> {
    let app = Router::new()
        .route("/", get(|| async { "ApexLeads CRM API v0.1.0" }))
        .route("/health", get(handlers::health_check))
        .route("/api/dashboard-stats", get(handlers::dashboard_stats))
        .route("/api/revenue-chart", get(handlers::revenue_chart))
        .nest("/api/contacts", handlers::contact_routes())
        .nest("/api/opportunities", handlers::opportunity_routes())
        .nest("/api/appointments", handlers::appointment_routes())
        .nest("/api/workflows", handlers::workflow_routes())
        .nest("/api/funnels", handlers::funnel_routes())
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(cors_layer(config)?),
        )
        .with_state(state);
    Ok(app)
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv::dotenv().ok();

    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = config::Config::from_env()?;
    let app_state = Arc::new(AppState::new(&config));
    let app = build_router(app_state, &config)?;

    let listener = tokio::net::TcpListener::bind(&config.server_addr).await?;
    tracing::info!(seed_mock_data = config.seed_mock_data, "Server running on {}", config.server_addr);

    axum::serve(listener, app).await?;

    Ok(())
}
