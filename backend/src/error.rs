//! Standardized error handling for the ApexLeads API
//!
//! Every failing endpoint answers with the same JSON body, see [`ApiError`].

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use apexleads_shared::ValidationErrors;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Standard API error response
#[derive(Debug, Serialize, Deserialize)]
pub struct ApiError {
    /// Error code (e.g., "VALIDATION_ERROR", "NOT_FOUND")
    pub code: String,
    /// Human-readable error message
    pub message: String,
    /// Optional field-level errors for validation
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<HashMap<String, Vec<String>>>,
    /// ISO 8601 timestamp
    pub timestamp: String,
    /// Request path that caused the error
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
}

impl ApiError {
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            details: None,
            timestamp: chrono::Utc::now().to_rfc3339(),
            path: None,
        }
    }

    /// Create a 404 Not Found error
    pub fn not_found(resource: impl Into<String>) -> AppError {
        AppError::NotFound(resource.into())
    }

    /// Create a 400 Bad Request error
    pub fn bad_request(message: impl Into<String>) -> AppError {
        AppError::BadRequest(message.into())
    }

    /// Create a validation error with a single field error
    pub fn validation_single(field: impl Into<String>, message: impl Into<String>) -> AppError {
        let mut details = HashMap::new();
        details.insert(field.into(), vec![message.into()]);
        AppError::ValidationError { details }
    }
}

/// Application error type that can be converted to HTTP responses
#[derive(Debug)]
pub enum AppError {
    NotFound(String),
    Conflict(String),
    BadRequest(String),
    ValidationError { details: HashMap<String, Vec<String>> },
    InternalError(String),
}

impl AppError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::Conflict(_) => StatusCode::CONFLICT,
            Self::BadRequest(_) => StatusCode::BAD_REQUEST,
            Self::ValidationError { .. } => StatusCode::UNPROCESSABLE_ENTITY,
            Self::InternalError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn error_code(&self) -> &'static str {
        match self {
            Self::NotFound(_) => "NOT_FOUND",
            Self::Conflict(_) => "CONFLICT",
            Self::BadRequest(_) => "BAD_REQUEST",
            Self::ValidationError { .. } => "VALIDATION_ERROR",
            Self::InternalError(_) => "INTERNAL_ERROR",
        }
    }

    pub fn message(&self) -> String {
        match self {
            Self::NotFound(resource) => format!("{} not found", resource),
            Self::Conflict(msg) | Self::BadRequest(msg) => msg.clone(),
            Self::ValidationError { .. } => "Validation failed".to_string(),
            Self::InternalError(msg) => {
                tracing::error!("Internal error: {}", msg);
                "An internal error occurred".to_string()
            }
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let mut error = ApiError::new(self.error_code(), self.message());

        if let Self::ValidationError { details } = self {
            error.details = Some(details);
        }

        (status, Json(error)).into_response()
    }
}

impl From<ValidationErrors> for AppError {
    fn from(errors: ValidationErrors) -> Self {
        Self::ValidationError {
            details: errors.into_map().into_iter().collect(),
        }
    }
}

/// Result type alias for handlers
pub type ApiResult<T> = Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_errors_convert() {
        let errors = ValidationErrors::new()
            .check(true, "path", "Path must start with /")
            .check(true, "name", "Name is required");

        let AppError::ValidationError { details } = AppError::from(errors) else {
            panic!("expected a validation error");
        };
        assert_eq!(details.get("path").unwrap(), &vec!["Path must start with /".to_string()]);
        assert_eq!(details.len(), 2);
    }

    #[test]
    fn test_error_codes() {
        assert_eq!(AppError::NotFound("Workflow".to_string()).status_code(), StatusCode::NOT_FOUND);
        assert_eq!(AppError::BadRequest("x".to_string()).error_code(), "BAD_REQUEST");
        assert_eq!(
            ApiError::validation_single("title", "Title is required").status_code(),
            StatusCode::UNPROCESSABLE_ENTITY
        );
    }
}
