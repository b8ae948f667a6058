use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

pub mod builder;
pub mod error;
pub mod mock_data;
pub mod pipeline;
pub mod validation;

pub use error::{BuilderError, ValidationErrors};

// ===== CRM =====

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ContactStatus {
    Lead,
    Active,
    Inactive,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Contact {
    pub id: String,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub company: String,
    pub status: ContactStatus,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PipelineStage {
    pub id: String,
    pub title: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Opportunity {
    pub id: String,
    pub title: String,
    pub contact_name: String,
    #[serde(with = "rust_decimal::serde::float")]
    pub value: Decimal,
    pub stage_id: String,
    pub last_update: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Appointment {
    pub id: String,
    pub title: String,
    pub date: NaiveDate,
    #[serde(with = "hh_mm")]
    pub start_time: NaiveTime,
    #[serde(with = "hh_mm")]
    pub end_time: NaiveTime,
}

/// Serde adapter for wall-clock times written as `HH:MM`.
pub mod hh_mm {
    use chrono::NaiveTime;
    use serde::{Deserialize, Deserializer, Serializer};

    const FORMAT: &str = "%H:%M";

    pub fn serialize<S: Serializer>(time: &NaiveTime, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&time.format(FORMAT).to_string())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<NaiveTime, D::Error> {
        let raw = String::deserialize(deserializer)?;
        NaiveTime::parse_from_str(&raw, FORMAT).map_err(serde::de::Error::custom)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardStats {
    pub opportunities: u32,
    #[serde(with = "rust_decimal::serde::float")]
    pub pipeline_value: Decimal,
    pub conversion_rate: f64,
    #[serde(with = "rust_decimal::serde::float")]
    pub closed_won_value: Decimal,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartPoint {
    pub name: String,
    pub value: u32,
}

// ===== Marketing =====

/// Active/inactive switch shared by workflows and funnels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Status {
    Active,
    #[default]
    Inactive,
}

impl Status {
    pub fn toggled(self) -> Self {
        match self {
            Status::Active => Status::Inactive,
            Status::Inactive => Status::Active,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TriggerType {
    ContactCreated,
    FormSubmitted,
    AppointmentBooked,
    TagAdded,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkflowTrigger {
    #[serde(rename = "type")]
    pub trigger_type: TriggerType,
    pub name: String,
}

impl Default for WorkflowTrigger {
    fn default() -> Self {
        Self {
            trigger_type: TriggerType::ContactCreated,
            name: "When a new contact is created".to_string(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActionType {
    SendEmail,
    AddTag,
    Wait,
    IfElse,
    SendSms,
}

impl ActionType {
    pub fn label(&self) -> &'static str {
        match self {
            ActionType::SendEmail => "Send Email",
            ActionType::AddTag => "Add Tag",
            ActionType::Wait => "Wait",
            ActionType::IfElse => "If/Else",
            ActionType::SendSms => "Send SMS",
        }
    }

    pub fn all() -> [ActionType; 5] {
        [
            ActionType::SendEmail,
            ActionType::AddTag,
            ActionType::Wait,
            ActionType::IfElse,
            ActionType::SendSms,
        ]
    }
}

/// The two successor paths of an `if_else` action.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct BranchPaths {
    #[serde(default)]
    pub yes: Vec<WorkflowAction>,
    #[serde(default)]
    pub no: Vec<WorkflowAction>,
}

impl BranchPaths {
    pub fn is_empty(&self) -> bool {
        self.yes.is_empty() && self.no.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkflowAction {
    #[serde(rename = "type")]
    pub action_type: ActionType,
    pub name: String,
    pub details: String,
    /// Only meaningful on `if_else`; absent for flat workflows.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub branches: Option<BranchPaths>,
}

impl WorkflowAction {
    pub fn new(action_type: ActionType, name: impl Into<String>, details: impl Into<String>) -> Self {
        Self {
            action_type,
            name: name.into(),
            details: details.into(),
            branches: None,
        }
    }

    /// A freshly added action, before the user has filled in the edit form.
    pub fn draft(action_type: ActionType) -> Self {
        let details = match action_type {
            ActionType::SendEmail => "Choose an email template",
            ActionType::AddTag => "Choose a tag",
            ActionType::Wait => "Wait 1 day",
            ActionType::IfElse => "Define a condition",
            ActionType::SendSms => "Write the message",
        };
        Self::new(action_type, action_type.label(), details)
    }

    pub fn is_branch(&self) -> bool {
        self.action_type == ActionType::IfElse
    }

    /// The action without its branch subtrees.
    pub fn without_branches(&self) -> Self {
        Self {
            branches: None,
            ..self.clone()
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Workflow {
    pub id: String,
    pub name: String,
    pub trigger: WorkflowTrigger,
    pub actions: Vec<WorkflowAction>,
    pub status: Status,
    pub created_at: DateTime<Utc>,
}

impl Workflow {
    /// An inactive workflow with the default trigger and no actions.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            name: name.into(),
            trigger: WorkflowTrigger::default(),
            actions: Vec::new(),
            status: Status::Inactive,
            created_at: Utc::now(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FunnelStepType {
    Page,
    Form,
    Upsell,
    ThankYou,
}

impl FunnelStepType {
    pub fn label(&self) -> &'static str {
        match self {
            FunnelStepType::Page => "Page",
            FunnelStepType::Form => "Form",
            FunnelStepType::Upsell => "Upsell",
            FunnelStepType::ThankYou => "Thank You",
        }
    }

    pub fn slug(&self) -> &'static str {
        match self {
            FunnelStepType::Page => "page",
            FunnelStepType::Form => "form",
            FunnelStepType::Upsell => "upsell",
            FunnelStepType::ThankYou => "thank-you",
        }
    }

    pub fn all() -> [FunnelStepType; 4] {
        [
            FunnelStepType::Page,
            FunnelStepType::Form,
            FunnelStepType::Upsell,
            FunnelStepType::ThankYou,
        ]
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FunnelStep {
    pub id: String,
    #[serde(rename = "type")]
    pub step_type: FunnelStepType,
    pub name: String,
    pub path: String,
}

impl FunnelStep {
    /// A new step with a fresh id and a placeholder name and path.
    pub fn draft(step_type: FunnelStepType) -> Self {
        let id = Uuid::new_v4().to_string();
        let path = format!("/{}-{}", step_type.slug(), &id[..8]);
        Self {
            id,
            step_type,
            name: format!("New {}", step_type.label()),
            path,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Funnel {
    pub id: String,
    pub name: String,
    pub domain: String,
    pub steps: Vec<FunnelStep>,
    pub status: Status,
    pub created_at: DateTime<Utc>,
}

impl Funnel {
    /// An inactive funnel starting with a single landing page.
    pub fn new(name: impl Into<String>, domain: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            name: name.into(),
            domain: domain.into(),
            steps: vec![FunnelStep {
                id: Uuid::new_v4().to_string(),
                step_type: FunnelStepType::Page,
                name: "Landing Page".to_string(),
                path: "/".to_string(),
            }],
            status: Status::Inactive,
            created_at: Utc::now(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn flat_action_omits_branches() {
        let action = WorkflowAction::new(ActionType::SendEmail, "Welcome", "Send welcome email");
        let value = serde_json::to_value(&action).unwrap();
        assert_eq!(
            value,
            json!({"type": "send_email", "name": "Welcome", "details": "Send welcome email"})
        );
    }

    #[test]
    fn appointment_times_use_hh_mm() {
        let appointment: Appointment = serde_json::from_value(json!({
            "id": "appt-1",
            "title": "Demo call",
            "date": "2024-03-01",
            "startTime": "09:30",
            "endTime": "10:15"
        }))
        .unwrap();
        assert_eq!(appointment.start_time, NaiveTime::from_hms_opt(9, 30, 0).unwrap());
        let value = serde_json::to_value(&appointment).unwrap();
        assert_eq!(value["endTime"], "10:15");
    }

    #[test]
    fn draft_step_path_starts_with_slash() {
        let step = FunnelStep::draft(FunnelStepType::ThankYou);
        assert!(step.path.starts_with("/thank-you-"));
        assert_eq!(step.name, "New Thank You");
    }

    #[test]
    fn opportunity_value_is_a_json_number() {
        let opp = Opportunity {
            id: "opp-1".to_string(),
            title: "Website Redesign".to_string(),
            contact_name: "Alice Johnson".to_string(),
            value: Decimal::new(5000, 0),
            stage_id: "stage-3".to_string(),
            last_update: Utc::now(),
            created_at: Utc::now(),
        };
        let value = serde_json::to_value(&opp).unwrap();
        assert_eq!(value["value"], json!(5000.0));
    }
}
