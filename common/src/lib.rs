pub mod config;
pub mod logger;

use validator::{ValidationError, ValidationErrors};

/// Flattens validator output into a single `; `-joined message.
///
/// Field order follows the validator's map iteration, so callers should not
/// rely on the order when more than one field fails.
pub fn format_validation_errors(errors: &ValidationErrors) -> String {
    errors
        .field_errors()
        .values()
        .flat_map(|errs| {
            errs.iter()
                .filter_map(|e| e.message.as_ref().map(|m| m.to_string()))
        })
        .collect::<Vec<_>>()
        .join("; ")
}

/// Custom validator rejecting empty or whitespace-only strings.
pub fn not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::new("blank"));
    }
    Ok(())
}
