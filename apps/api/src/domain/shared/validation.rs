use super::errors::DomainError;
use validator::ValidationErrors;

/// Collapse the errors of a single-field value object into a domain error
/// reported against `field`.
pub fn into_domain_error(errors: ValidationErrors, field: &str) -> DomainError {
    let message = errors
        .field_errors()
        .values()
        .flat_map(|errs| errs.iter())
        .find_map(|e| e.message.as_ref().map(|m| m.to_string()))
        .unwrap_or_else(|| format!("Invalid {}", field));
    DomainError::validation(field, message)
}
