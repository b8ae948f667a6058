//! Form-level validation for the builder dialogs and the CRM forms.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::{Appointment, Funnel, ValidationErrors, Workflow, WorkflowAction};

const MIN_NAME_LEN: usize = 2;

fn too_short(value: &str, min: usize) -> bool {
    value.trim().chars().count() < min
}

/// Edit form for a workflow action.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActionForm {
    pub name: String,
    pub details: String,
}

impl ActionForm {
    pub fn validate(&self) -> Result<(), ValidationErrors> {
        ValidationErrors::new()
            .check(too_short(&self.name, MIN_NAME_LEN), "name", "Name is required")
            .check(too_short(&self.details, MIN_NAME_LEN), "details", "Details are required")
            .into_result()
    }
}

/// Edit form for a funnel step.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StepForm {
    pub name: String,
    pub path: String,
}

impl StepForm {
    pub fn validate(&self) -> Result<(), ValidationErrors> {
        let path = self.path.trim();
        ValidationErrors::new()
            .check(too_short(&self.name, MIN_NAME_LEN), "name", "Name is required")
            .check(path.is_empty(), "path", "Path is required")
            .check(!path.is_empty() && !path.starts_with('/'), "path", "Path must start with /")
            .into_result()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactForm {
    pub name: String,
    pub email: String,
}

impl ContactForm {
    pub fn validate(&self) -> Result<(), ValidationErrors> {
        let email = self.email.trim();
        ValidationErrors::new()
            .check(self.name.trim().is_empty(), "name", "Name is required")
            .check(email.is_empty(), "email", "Email is required")
            .check(!email.is_empty() && !email.contains('@'), "email", "Invalid email format")
            .into_result()
    }
}

/// Whole-document check run before a builder save is accepted.
pub fn validate_workflow(workflow: &Workflow) -> Result<(), ValidationErrors> {
    fn check_actions(actions: &[WorkflowAction], prefix: &str, errors: &mut ValidationErrors) {
        for (i, action) in actions.iter().enumerate() {
            let field = format!("{}[{}]", prefix, i);
            let form = ActionForm {
                name: action.name.clone(),
                details: action.details.clone(),
            };
            if let Err(form_errors) = form.validate() {
                for (name, messages) in form_errors.into_map() {
                    for message in messages {
                        errors.add(&format!("{}.{}", field, name), message);
                    }
                }
            }
            if let Some(branches) = &action.branches {
                if !action.is_branch() {
                    errors.add(&field, "Only if/else actions can have branches");
                }
                check_actions(&branches.yes, &format!("{}.yes", field), errors);
                check_actions(&branches.no, &format!("{}.no", field), errors);
            }
        }
    }

    let mut errors = ValidationErrors::new().check(workflow.name.trim().is_empty(), "name", "Name is required");
    check_actions(&workflow.actions, "actions", &mut errors);
    errors.into_result()
}

pub fn validate_funnel(funnel: &Funnel) -> Result<(), ValidationErrors> {
    let mut errors = ValidationErrors::new().check(funnel.name.trim().is_empty(), "name", "Name is required");
    let mut seen = HashSet::new();
    for (i, step) in funnel.steps.iter().enumerate() {
        let field = format!("steps[{}]", i);
        let form = StepForm {
            name: step.name.clone(),
            path: step.path.clone(),
        };
        if let Err(form_errors) = form.validate() {
            for (name, messages) in form_errors.into_map() {
                for message in messages {
                    errors.add(&format!("{}.{}", field, name), message);
                }
            }
        }
        if !seen.insert(step.id.as_str()) {
            errors.add(&format!("{}.id", field), "Duplicate step id");
        }
    }
    errors.into_result()
}

/// An appointment must end after it starts.
pub fn validate_appointment(appointment: &Appointment) -> Result<(), ValidationErrors> {
    ValidationErrors::new()
        .check(appointment.title.trim().is_empty(), "title", "Title is required")
        .check(
            appointment.end_time <= appointment.start_time,
            "endTime",
            "End time must be after start time",
        )
        .into_result()
}
