// Error types for validation

use crate::ValidationResult;
use thiserror::Error;

/// Failure while fetching a rule's target value.
///
/// Resolution errors are recovered by the [`Validator`](crate::Validator):
/// they are recorded in the [`ValidationResult`] under the rule's label
/// (or the validator's name, when the rule list itself cannot be built)
/// instead of propagating to the caller.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ResolutionError {
    #[error("Missing attribute: {0}.")]
    MissingAttribute(String),

    #[error("Missing key: {0}.")]
    MissingKey(String),

    #[error("Index out of bounds: {0}.")]
    IndexOutOfBounds(usize),

    #[error("{0}")]
    Other(String),
}

/// Raised by [`Validator::check`](crate::Validator::check) and
/// [`guarded`](crate::guarded) when validation fails.
///
/// Carries the full [`ValidationResult`] so callers can inspect the
/// per-label error messages.
#[derive(Error, Debug, Clone)]
#[error("Data did not validate.")]
pub struct ValidationError {
    result: ValidationResult,
}

impl ValidationError {
    pub fn new(result: ValidationResult) -> Self {
        Self { result }
    }

    /// The validation report that triggered this error.
    pub fn result(&self) -> &ValidationResult {
        &self.result
    }

    pub fn into_result(self) -> ValidationResult {
        self.result
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolution_error_display() {
        let error = ResolutionError::MissingKey("name".to_string());
        assert_eq!(error.to_string(), "Missing key: name.");

        let error = ResolutionError::MissingAttribute("age".to_string());
        assert_eq!(error.to_string(), "Missing attribute: age.");

        let error = ResolutionError::IndexOutOfBounds(7);
        assert_eq!(error.to_string(), "Index out of bounds: 7.");
    }

    #[test]
    fn test_validation_error_exposes_result() {
        let mut result = ValidationResult::new();
        result.append_error("name", "Invalid or empty string.");

        let error = ValidationError::new(result.clone());
        assert_eq!(error.to_string(), "Data did not validate.");
        assert_eq!(error.result(), &result);
        assert_eq!(error.into_result(), result);
    }
}
