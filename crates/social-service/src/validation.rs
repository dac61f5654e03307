//! Payload validation.

use crate::dto::UserRequest;
use social_core::{FieldError, ValidateExt};

/// Checks a user payload against its field constraints.
///
/// An empty result means the payload may be persisted.
pub trait UserValidator: Send + Sync {
    /// Returns every violation found, sorted by field.
    fn validate(&self, request: &UserRequest) -> Vec<FieldError>;
}

/// Validator evaluating the constraints declared on [`UserRequest`].
#[derive(Debug, Clone, Copy, Default)]
pub struct ConstraintValidator;

impl ConstraintValidator {
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl UserValidator for ConstraintValidator {
    fn validate(&self, request: &UserRequest) -> Vec<FieldError> {
        request.violations()
    }
}
