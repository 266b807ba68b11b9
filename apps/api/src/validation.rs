use crate::errors::AppError;

/// Rejects a missing or whitespace-only required field.
pub fn require_non_blank(value: Option<&str>, field_name: &str) -> Result<(), AppError> {
    match value {
        Some(v) if !v.trim().is_empty() => Ok(()),
        _ => Err(AppError::Validation(format!("{field_name} is required"))),
    }
}
