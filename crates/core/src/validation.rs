//! Field-level input-violation reporting.
//!
//! Request DTOs derive `validator::Validate`; this module flattens the
//! resulting error map into a stable, serializable list that the API layer
//! returns as the `errors` array of a 400 response.

use serde::Serialize;
use validator::ValidationErrors;

/// A single field-level rule violation.
#[derive(Debug, Clone, Serialize)]
pub struct FieldViolation {
    pub field: String,
    pub message: String,
}

/// Flatten `validator` output into a list of violations, sorted by field
/// name so the response shape is deterministic.
pub fn field_violations(errors: &ValidationErrors) -> Vec<FieldViolation> {
    let mut violations: Vec<FieldViolation> = errors
        .field_errors()
        .iter()
        .flat_map(|(field, field_errors)| {
            field_errors.iter().map(move |e| FieldViolation {
                field: field.to_string(),
                message: e
                    .message
                    .as_ref()
                    .map(|m| m.to_string())
                    .unwrap_or_else(|| format!("{field} is invalid")),
            })
        })
        .collect();
    violations.sort_by(|a, b| a.field.cmp(&b.field));
    violations
}
