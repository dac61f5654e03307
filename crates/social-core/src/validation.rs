//! Validation utilities.

use crate::FieldError;
use validator::{Validate, ValidationErrors};

/// Extension trait for validation.
pub trait ValidateExt: Validate {
    /// Validates the struct and returns every violation found, sorted by field.
    fn violations(&self) -> Vec<FieldError> {
        self.validate()
            .map_or_else(|errors| field_errors(&errors), |()| Vec::new())
    }
}

impl<T: Validate> ValidateExt for T {}

/// Converts `validator::ValidationErrors` into field errors.
///
/// A constraint without an explicit message falls back to its code. The
/// output is sorted by field, then code, so callers get a stable order.
#[must_use]
pub fn field_errors(errors: &ValidationErrors) -> Vec<FieldError> {
    let mut field_errors: Vec<FieldError> = errors
        .field_errors()
        .into_iter()
        .flat_map(|(field, errors)| {
            errors.iter().map(move |error| FieldError {
                field: field.to_string(),
                message: error
                    .message
                    .as_ref()
                    .map_or_else(|| error.code.to_string(), ToString::to_string),
                code: error.code.to_string(),
            })
        })
        .collect();

    field_errors.sort_by(|a, b| a.field.cmp(&b.field).then_with(|| a.code.cmp(&b.code)));
    field_errors
}

/// Common validation functions.
pub mod rules {
    use validator::ValidationError;

    /// Validates that a string is not blank (not empty after trimming).
    pub fn not_blank(value: &str) -> Result<(), ValidationError> {
        if value.trim().is_empty() {
            return Err(ValidationError::new("not_blank"));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::rules::*;
    use super::*;

    #[derive(Debug, Validate)]
    struct Sample {
        #[validate(length(min = 3, message = "Label must be at least 3 characters"))]
        label: String,
        #[validate(range(min = 0))]
        count: i32,
    }

    #[test]
    fn test_not_blank() {
        assert!(not_blank("hello").is_ok());
        assert!(not_blank("   ").is_err());
        assert!(not_blank("").is_err());
    }

    #[test]
    fn test_valid_struct_has_no_violations() {
        let sample = Sample {
            label: "valid".to_string(),
            count: 1,
        };
        assert!(sample.violations().is_empty());
    }

    #[test]
    fn test_violations_sorted_with_message_fallback() {
        let sample = Sample {
            label: "ab".to_string(),
            count: -1,
        };

        let violations = sample.violations();
        assert_eq!(violations.len(), 2);
        assert_eq!(violations[0].field, "count");
        assert_eq!(violations[0].code, "range");
        assert_eq!(violations[0].message, "range");
        assert_eq!(violations[1].field, "label");
        assert_eq!(violations[1].message, "Label must be at least 3 characters");
    }
}
