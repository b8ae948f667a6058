//! Seed rows the API serves before anything has been written.

use chrono::{DateTime, Duration, NaiveDate, NaiveTime, TimeZone, Utc};
use rust_decimal::Decimal;

use crate::{
    ActionType, Appointment, BranchPaths, ChartPoint, Contact, ContactStatus, DashboardStats, Funnel, FunnelStep,
    FunnelStepType, Opportunity, PipelineStage, Status, TriggerType, Workflow, WorkflowAction, WorkflowTrigger,
};

fn day(year: i32, month: u32, day: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(year, month, day, 0, 0, 0)
        .single()
        .unwrap_or_default()
}

fn time(hour: u32, minute: u32) -> NaiveTime {
    NaiveTime::from_hms_opt(hour, minute, 0).unwrap_or_default()
}

pub fn contacts() -> Vec<Contact> {
    let contact = |id: &str, name: &str, email: &str, phone: &str, company: &str, status, created_at| Contact {
        id: id.to_string(),
        name: name.to_string(),
        email: email.to_string(),
        phone: phone.to_string(),
        company: company.to_string(),
        status,
        created_at,
    };
    vec![
        contact("contact-1", "Alice Johnson", "alice.j@example.com", "123-456-7890", "Innovate Inc.", ContactStatus::Active, day(2023, 5, 10)),
        contact("contact-2", "Bob Williams", "bob.w@example.com", "234-567-8901", "Solutions Co.", ContactStatus::Lead, day(2023, 6, 15)),
        contact("contact-3", "Charlie Brown", "charlie.b@example.com", "345-678-9012", "Tech Forward", ContactStatus::Active, day(2023, 7, 20)),
        contact("contact-4", "Diana Prince", "diana.p@example.com", "456-789-0123", "Global Dynamics", ContactStatus::Inactive, day(2023, 8, 1)),
        contact("contact-5", "Ethan Hunt", "ethan.h@example.com", "567-890-1234", "Synergy Corp", ContactStatus::Lead, day(2023, 9, 5)),
        contact("contact-6", "Fiona Glenanne", "fiona.g@example.com", "678-901-2345", "NextGen Solutions", ContactStatus::Active, day(2023, 10, 11)),
    ]
}

pub fn pipeline_stages() -> Vec<PipelineStage> {
    [
        ("stage-1", "New Lead"),
        ("stage-2", "Contacted"),
        ("stage-3", "Proposal Sent"),
        ("stage-4", "Negotiation"),
        ("stage-5", "Won"),
    ]
    .into_iter()
    .map(|(id, title)| PipelineStage {
        id: id.to_string(),
        title: title.to_string(),
    })
    .collect()
}

pub fn opportunities() -> Vec<Opportunity> {
    let now = Utc::now();
    [
        ("opp-1", "Website Redesign", "Alice Johnson", 5000, "stage-3", Duration::days(2)),
        ("opp-2", "Marketing Campaign", "Bob Williams", 2500, "stage-1", Duration::hours(5)),
        ("opp-3", "Cloud Migration", "Charlie Brown", 12000, "stage-4", Duration::days(1)),
        ("opp-4", "SEO Optimization", "Ethan Hunt", 3000, "stage-2", Duration::days(3)),
        ("opp-5", "E-commerce Platform", "Fiona Glenanne", 8500, "stage-5", Duration::weeks(1)),
        ("opp-6", "Mobile App Dev", "Alice Johnson", 15000, "stage-1", Duration::zero()),
        ("opp-7", "CRM Implementation", "Charlie Brown", 7000, "stage-2", Duration::days(4)),
    ]
    .into_iter()
    .map(|(id, title, contact_name, value, stage_id, age)| Opportunity {
        id: id.to_string(),
        title: title.to_string(),
        contact_name: contact_name.to_string(),
        value: Decimal::new(value, 0),
        stage_id: stage_id.to_string(),
        last_update: now - age,
        created_at: now - age,
    })
    .collect()
}

pub fn appointments() -> Vec<Appointment> {
    let today = Utc::now().date_naive();
    let appointment = |id: &str, title: &str, date: NaiveDate, start, end| Appointment {
        id: id.to_string(),
        title: title.to_string(),
        date,
        start_time: start,
        end_time: end,
    };
    vec![
        appointment("appt-1", "Discovery call with Alice Johnson", today, time(9, 30), time(10, 0)),
        appointment("appt-2", "Proposal review: Cloud Migration", today, time(14, 0), time(15, 0)),
        appointment("appt-3", "Onboarding kickoff", today + Duration::days(2), time(11, 0), time(12, 0)),
    ]
}

pub fn workflows() -> Vec<Workflow> {
    vec![
        Workflow {
            id: "wf-1".to_string(),
            name: "New Lead Nurture".to_string(),
            trigger: WorkflowTrigger::default(),
            actions: vec![
                WorkflowAction::new(ActionType::SendEmail, "Welcome email", "Template: Welcome to ApexLeads"),
                WorkflowAction::new(ActionType::Wait, "Wait 2 days", "2 days"),
                WorkflowAction {
                    branches: Some(BranchPaths {
                        yes: vec![WorkflowAction::new(ActionType::AddTag, "Tag engaged", "Tag: engaged")],
                        no: vec![WorkflowAction::new(ActionType::SendSms, "SMS nudge", "Did you see our email?")],
                    }),
                    ..WorkflowAction::new(ActionType::IfElse, "Opened welcome email?", "Email opened")
                },
            ],
            status: Status::Active,
            created_at: day(2024, 1, 15),
        },
        Workflow {
            id: "wf-2".to_string(),
            name: "Appointment Reminder".to_string(),
            trigger: WorkflowTrigger {
                trigger_type: TriggerType::AppointmentBooked,
                name: "When an appointment is booked".to_string(),
            },
            actions: vec![
                WorkflowAction::new(ActionType::SendEmail, "Confirmation", "Template: Appointment confirmed"),
                WorkflowAction::new(ActionType::Wait, "Wait until the day before", "1 day before"),
                WorkflowAction::new(ActionType::SendSms, "Reminder SMS", "See you tomorrow!"),
            ],
            status: Status::Inactive,
            created_at: day(2024, 2, 3),
        },
    ]
}

pub fn funnels() -> Vec<Funnel> {
    let step = |id: &str, step_type, name: &str, path: &str| FunnelStep {
        id: id.to_string(),
        step_type,
        name: name.to_string(),
        path: path.to_string(),
    };
    vec![
        Funnel {
            id: "funnel-1".to_string(),
            name: "Free Ebook Opt-in".to_string(),
            domain: "offers.apexleads.io".to_string(),
            steps: vec![
                step("step-1", FunnelStepType::Page, "Landing Page", "/"),
                step("step-2", FunnelStepType::Form, "Opt-in Form", "/opt-in"),
                step("step-3", FunnelStepType::ThankYou, "Thank You", "/thank-you"),
            ],
            status: Status::Active,
            created_at: day(2024, 1, 20),
        },
        Funnel {
            id: "funnel-2".to_string(),
            name: "Webinar Registration".to_string(),
            domain: "webinar.apexleads.io".to_string(),
            steps: vec![
                step("step-4", FunnelStepType::Page, "Registration", "/"),
                step("step-5", FunnelStepType::Upsell, "Replay Access", "/replay"),
            ],
            status: Status::Inactive,
            created_at: day(2024, 3, 8),
        },
    ]
}

pub fn dashboard_stats() -> DashboardStats {
    DashboardStats {
        opportunities: 12,
        pipeline_value: Decimal::new(53000, 0),
        conversion_rate: 15.6,
        closed_won_value: Decimal::new(8500, 0),
    }
}

pub fn revenue_chart() -> Vec<ChartPoint> {
    [("Jan", 4000), ("Feb", 3000), ("Mar", 5000), ("Apr", 4500), ("May", 6000), ("Jun", 5500)]
        .into_iter()
        .map(|(name, value)| ChartPoint {
            name: name.to_string(),
            value,
        })
        .collect()
}
