// src/backend/error.rs
use candid::CandidType;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use validator::{ValidationErrors, ValidationErrorsKind};

/// A single offending field, with a dotted path for nested fields
/// (e.g. `recipient.city`).
#[derive(CandidType, Deserialize, Serialize, Clone, Debug, PartialEq, Eq)]
pub struct FieldError {
    pub field: String,
    pub message: String,
}

impl FieldError {
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self { field: field.into(), message: message.into() }
    }
}

fn describe(errors: &[FieldError]) -> String {
    errors
        .iter()
        .map(|e| format!("{}: {}", e.field, e.message))
        .collect::<Vec<_>>()
        .join("; ")
}

#[derive(CandidType, Deserialize, Error, Debug, PartialEq, Eq)]
pub enum ShipmentError {
    #[error("Validation failed: {}", describe(.0))]
    ValidationFailed(Vec<FieldError>),

    #[error("Shipment not found: {0}")]
    ShipmentNotFound(String),

    #[error("Draft not found: {0}")]
    DraftNotFound(String),

    /// Duplicate key. The caller is expected to pick a new number and retry.
    #[error("Tracking number already in use: {0}")]
    TrackingNumberTaken(String),

    #[error("Storage error: {0}")]
    StorageError(String),

    #[error("Not authorized: {0}")]
    NotAuthorized(String),

    #[error("Internal canister error: {0}")]
    InternalError(String),
}

fn flatten(prefix: &str, errors: &ValidationErrors, out: &mut Vec<FieldError>) {
    for (field, kind) in errors.errors() {
        let path = if prefix.is_empty() {
            field.to_string()
        } else {
            format!("{}.{}", prefix, field)
        };
        match kind {
            ValidationErrorsKind::Field(field_errors) => {
                for err in field_errors {
                    let message = err
                        .message
                        .as_ref()
                        .map(|m| m.to_string())
                        .unwrap_or_else(|| format!("failed '{}' check", err.code));
                    out.push(FieldError::new(path.clone(), message));
                }
            }
            ValidationErrorsKind::Struct(nested) => flatten(&path, nested, out),
            ValidationErrorsKind::List(items) => {
                for (index, nested) in items {
                    flatten(&format!("{}[{}]", path, index), nested, out);
                }
            }
        }
    }
}

impl From<ValidationErrors> for ShipmentError {
    fn from(errors: ValidationErrors) -> Self {
        let mut fields = Vec::new();
        flatten("", &errors, &mut fields);
        fields.sort_by(|a, b| a.field.cmp(&b.field).then_with(|| a.message.cmp(&b.message)));
        ShipmentError::ValidationFailed(fields)
    }
}

impl ShipmentError {
    /// Wraps a stable-memory write failure.
    pub fn storage(context: &str, err: impl std::fmt::Debug) -> Self {
        ShipmentError::StorageError(format!("{}: {:?}", context, err))
    }
}

pub type ShipmentResult<T> = Result<T, ShipmentError>;
