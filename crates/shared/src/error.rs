use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldError {
    pub field: String,
    pub reason: String,
}

impl FieldError {
    pub fn new(field: impl Into<String>, reason: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            reason: reason.into(),
        }
    }
}

/// Every field of a submission that failed validation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid {kind}: {}", describe(.errors))]
pub struct ValidationError {
    pub kind: &'static str,
    pub errors: Vec<FieldError>,
}

impl ValidationError {
    pub fn new(kind: &'static str, errors: Vec<FieldError>) -> Self {
        Self { kind, errors }
    }

    pub fn has_field(&self, field: &str) -> bool {
        self.errors.iter().any(|error| error.field == field)
    }
}

fn describe(errors: &[FieldError]) -> String {
    errors
        .iter()
        .map(|error| format!("{} {}", error.field, error.reason))
        .collect::<Vec<_>>()
        .join("; ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_lists_every_field() {
        let err = ValidationError::new(
            "contact message",
            vec![
                FieldError::new("email", "must be a valid email address"),
                FieldError::new("message", "must not be empty"),
            ],
        );

        assert_eq!(
            err.to_string(),
            "invalid contact message: email must be a valid email address; message must not be empty"
        );
        assert!(err.has_field("message"));
        assert!(!err.has_field("name"));
    }
}
