//! Error taxonomy shared by the builders, the forms and the API client.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Field-level validation messages, keyed by field name.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ValidationErrors(BTreeMap<String, Vec<String>>);

impl ValidationErrors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, field: &str, message: impl Into<String>) {
        self.0
            .entry(field.to_string())
            .or_default()
            .push(message.into());
    }

    /// Builder-style variant of [`add`](Self::add) that only records the message when `failed`.
    pub fn check(mut self, failed: bool, field: &str, message: &str) -> Self {
        if failed {
            self.add(field, message);
        }
        self
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn field(&self, field: &str) -> Option<&[String]> {
        self.0.get(field).map(Vec::as_slice)
    }

    pub fn fields(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    pub fn into_map(self) -> BTreeMap<String, Vec<String>> {
        self.0
    }

    pub fn into_result(self) -> Result<(), ValidationErrors> {
        if self.is_empty() { Ok(()) } else { Err(self) }
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for (field, messages) in &self.0 {
            for message in messages {
                if !first {
                    f.write_str("; ")?;
                }
                write!(f, "{}: {}", field, message)?;
                first = false;
            }
        }
        Ok(())
    }
}

impl std::error::Error for ValidationErrors {}

impl From<BTreeMap<String, Vec<String>>> for ValidationErrors {
    fn from(map: BTreeMap<String, Vec<String>>) -> Self {
        Self(map)
    }
}

/// Failures a builder session can surface to the user.
///
/// Mutations on unknown or invalid node ids are not errors: they return the
/// graph unchanged.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum BuilderError {
    #[error("{0} not found")]
    NotFound(String),

    #[error("validation failed: {0}")]
    Validation(#[from] ValidationErrors),

    #[error("failed to save {entity}: {message}")]
    PersistenceFailure { entity: String, message: String },

    #[error("a save is already in progress")]
    SaveInFlight,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn collects_messages_per_field() {
        let errors = ValidationErrors::new()
            .check(true, "name", "Name is required")
            .check(false, "path", "Path is required")
            .check(true, "name", "Name is too short");

        assert_eq!(errors.field("name").unwrap().len(), 2);
        assert!(errors.field("path").is_none());
        assert_eq!(errors.to_string(), "name: Name is required; name: Name is too short");
    }

    #[test]
    fn empty_errors_are_ok() {
        assert!(ValidationErrors::new().into_result().is_ok());
    }
}
