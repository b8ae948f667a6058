// API service layer for communicating with backend
use apexleads_shared::BuilderError;
use gloo_net::http::{Request, Response};
use serde::{Deserialize, Serialize, de::DeserializeOwned};
use std::collections::BTreeMap;

const API_BASE_URL: &str = "/api";

// ============================================
// ERROR HANDLING
// ============================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiError {
    pub message: String,
    pub code: Option<String>,
    #[serde(default)]
    pub details: Option<BTreeMap<String, Vec<String>>>,
}

impl ApiError {
    fn local(message: impl ToString, code: &str) -> Self {
        Self {
            message: message.to_string(),
            code: Some(code.to_string()),
            details: None,
        }
    }

    pub fn is_not_found(&self) -> bool {
        self.code.as_deref() == Some("NOT_FOUND")
    }

    /// The first field message when the server rejected a form, else the plain message.
    pub fn summary(&self) -> String {
        self.details
            .as_ref()
            .and_then(|details| details.iter().next())
            .and_then(|(field, messages)| messages.first().map(|m| format!("{}: {}", field, m)))
            .unwrap_or_else(|| self.message.clone())
    }

    pub fn into_builder_error(self, entity: &str) -> BuilderError {
        BuilderError::PersistenceFailure {
            entity: entity.to_string(),
            message: self.summary(),
        }
    }
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

pub type ApiResult<T> = Result<T, ApiError>;

// ============================================
// HTTP CLIENT
// ============================================

pub struct ApiClient;

impl ApiClient {
    fn url(endpoint: &str) -> String {
        format!("{}{}", API_BASE_URL, endpoint)
    }

    async fn send(request: Result<Request, gloo_net::Error>) -> ApiResult<Response> {
        let request = request.map_err(|e| ApiError::local(e, "SERIALIZE_ERROR"))?;
        let response = request
            .send()
            .await
            .map_err(|e| ApiError::local(e, "NETWORK_ERROR"))?;

        if response.ok() {
            Ok(response)
        } else {
            let status = response.status();
            Err(response
                .json::<ApiError>()
                .await
                .unwrap_or_else(|_| ApiError::local(format!("HTTP Error: {}", status), &format!("HTTP_{}", status))))
        }
    }

    async fn parse<T: DeserializeOwned>(response: Response) -> ApiResult<T> {
        response
            .json::<T>()
            .await
            .map_err(|e| ApiError::local(e, "PARSE_ERROR"))
    }

    // GET request
    pub async fn get<T: DeserializeOwned>(endpoint: &str) -> ApiResult<T> {
        let response = Self::send(Request::get(&Self::url(endpoint)).build()).await?;
        Self::parse(response).await
    }

    // POST request
    pub async fn post<T: DeserializeOwned, B: Serialize>(endpoint: &str, body: &B) -> ApiResult<T> {
        let response = Self::send(Request::post(&Self::url(endpoint)).json(body)).await?;
        Self::parse(response).await
    }

    // PUT request
    pub async fn put<T: DeserializeOwned, B: Serialize>(endpoint: &str, body: &B) -> ApiResult<T> {
        let response = Self::send(Request::put(&Self::url(endpoint)).json(body)).await?;
        Self::parse(response).await
    }

    // PATCH request
    pub async fn patch<T: DeserializeOwned, B: Serialize>(endpoint: &str, body: &B) -> ApiResult<T> {
        let response = Self::send(Request::patch(&Self::url(endpoint)).json(body)).await?;
        Self::parse(response).await
    }

    // DELETE request, the server answers 204 with no body
    pub async fn delete(endpoint: &str) -> ApiResult<()> {
        Self::send(Request::delete(&Self::url(endpoint)).build()).await?;
        Ok(())
    }
}

// ============================================
// DASHBOARD SERVICE
// ============================================

pub mod dashboard {
    use super::*;
    use apexleads_shared::{ChartPoint, DashboardStats};

    pub async fn get_stats() -> ApiResult<DashboardStats> {
        ApiClient::get("/dashboard-stats").await
    }

    pub async fn get_revenue_chart() -> ApiResult<Vec<ChartPoint>> {
        ApiClient::get("/revenue-chart").await
    }
}

// ============================================
// CONTACTS SERVICE
// ============================================

pub mod contacts {
    use super::*;
    use apexleads_shared::{Contact, ContactStatus};

    #[derive(Debug, Clone, Serialize)]
    pub struct CreateContactRequest {
        pub name: String,
        pub email: String,
        pub phone: String,
        pub company: String,
    }

    #[derive(Debug, Clone, Serialize)]
    pub struct UpdateContactRequest {
        pub status: ContactStatus,
    }

    pub async fn list() -> ApiResult<Vec<Contact>> {
        ApiClient::get("/contacts").await
    }

    pub async fn create(contact: &CreateContactRequest) -> ApiResult<Contact> {
        ApiClient::post("/contacts", contact).await
    }

    pub async fn set_status(id: &str, status: ContactStatus) -> ApiResult<Contact> {
        ApiClient::put(&format!("/contacts/{}", id), &UpdateContactRequest { status }).await
    }

    pub async fn delete(id: &str) -> ApiResult<()> {
        ApiClient::delete(&format!("/contacts/{}", id)).await
    }
}

// ============================================
// OPPORTUNITIES SERVICE
// ============================================

pub mod opportunities {
    use super::*;
    use apexleads_shared::{Opportunity, PipelineStage};

    #[derive(Debug, Clone, Deserialize)]
    pub struct PipelineResponse {
        pub opportunities: Vec<Opportunity>,
        pub stages: Vec<PipelineStage>,
    }

    #[derive(Debug, Clone, Serialize)]
    #[serde(rename_all = "camelCase")]
    struct StageMove<'a> {
        stage_id: &'a str,
    }

    pub async fn get_pipeline() -> ApiResult<PipelineResponse> {
        ApiClient::get("/opportunities").await
    }

    pub async fn move_to_stage(id: &str, stage_id: &str) -> ApiResult<Opportunity> {
        ApiClient::patch(&format!("/opportunities/{}/stage", id), &StageMove { stage_id }).await
    }
}

// ============================================
// APPOINTMENTS SERVICE
// ============================================

pub mod appointments {
    use super::*;
    use apexleads_shared::{Appointment, hh_mm};
    use chrono::{NaiveDate, NaiveTime};

    #[derive(Debug, Clone, Serialize)]
    #[serde(rename_all = "camelCase")]
    pub struct CreateAppointmentRequest {
        pub title: String,
        pub date: NaiveDate,
        #[serde(with = "hh_mm")]
        pub start_time: NaiveTime,
        #[serde(with = "hh_mm")]
        pub end_time: NaiveTime,
    }

    pub async fn list() -> ApiResult<Vec<Appointment>> {
        ApiClient::get("/appointments").await
    }

    pub async fn create(appointment: &CreateAppointmentRequest) -> ApiResult<Appointment> {
        ApiClient::post("/appointments", appointment).await
    }

    pub async fn delete(id: &str) -> ApiResult<()> {
        ApiClient::delete(&format!("/appointments/{}", id)).await
    }
}

// ============================================
// WORKFLOWS SERVICE
// ============================================

pub mod workflows {
    use super::*;
    use apexleads_shared::{Status, Workflow};

    #[derive(Debug, Clone, Serialize)]
    pub struct CreateWorkflowRequest {
        pub name: String,
    }

    #[derive(Debug, Clone, Serialize)]
    struct StatusPatch {
        status: Status,
    }

    pub async fn list() -> ApiResult<Vec<Workflow>> {
        ApiClient::get("/workflows").await
    }

    pub async fn get(id: &str) -> ApiResult<Workflow> {
        ApiClient::get(&format!("/workflows/{}", id)).await
    }

    pub async fn create(name: &str) -> ApiResult<Workflow> {
        ApiClient::post("/workflows", &CreateWorkflowRequest { name: name.to_string() }).await
    }

    /// Whole-object save from the builder.
    pub async fn save(workflow: &Workflow) -> ApiResult<Workflow> {
        ApiClient::put(&format!("/workflows/{}", workflow.id), workflow).await
    }

    pub async fn set_status(id: &str, status: Status) -> ApiResult<Workflow> {
        ApiClient::patch(&format!("/workflows/{}", id), &StatusPatch { status }).await
    }

    pub async fn delete(id: &str) -> ApiResult<()> {
        ApiClient::delete(&format!("/workflows/{}", id)).await
    }
}

// ============================================
// FUNNELS SERVICE
// ============================================

pub mod funnels {
    use super::*;
    use apexleads_shared::{Funnel, Status};

    #[derive(Debug, Clone, Serialize)]
    pub struct CreateFunnelRequest {
        pub name: String,
        pub domain: String,
    }

    #[derive(Debug, Clone, Serialize)]
    struct StatusPatch {
        status: Status,
    }

    pub async fn list() -> ApiResult<Vec<Funnel>> {
        ApiClient::get("/funnels").await
    }

    pub async fn get(id: &str) -> ApiResult<Funnel> {
        ApiClient::get(&format!("/funnels/{}", id)).await
    }

    pub async fn create(funnel: &CreateFunnelRequest) -> ApiResult<Funnel> {
        ApiClient::post("/funnels", funnel).await
    }

    /// Whole-object save from the builder.
    pub async fn save(funnel: &Funnel) -> ApiResult<Funnel> {
        ApiClient::put(&format!("/funnels/{}", funnel.id), funnel).await
    }

    pub async fn set_status(id: &str, status: Status) -> ApiResult<Funnel> {
        ApiClient::patch(&format!("/funnels/{}", id), &StatusPatch { status }).await
    }

    pub async fn delete(id: &str) -> ApiResult<()> {
        ApiClient::delete(&format!("/funnels/{}", id)).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn summary_prefers_first_field_message() {
        let body = r#"{"code":"VALIDATION_ERROR","message":"Validation failed","details":{"steps[1].path":["Path must start with /"]},"timestamp":"2024-06-03T10:00:00Z"}"#;
        let error: ApiError = serde_json::from_str(body).unwrap();
        assert_eq!(error.summary(), "steps[1].path: Path must start with /");
        assert!(!error.is_not_found());
    }

    #[test]
    fn not_found_maps_to_persistence_failure() {
        let body = r#"{"code":"NOT_FOUND","message":"Workflow not found","timestamp":"2024-06-03T10:00:00Z"}"#;
        let error: ApiError = serde_json::from_str(body).unwrap();
        assert!(error.is_not_found());
        assert_eq!(
            error.into_builder_error("workflow"),
            BuilderError::PersistenceFailure {
                entity: "workflow".to_string(),
                message: "Workflow not found".to_string(),
            }
        );
    }
}
