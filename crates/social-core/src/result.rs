//! Result type aliases for the Social service.

use crate::SocialError;

/// A specialized `Result` type for Social operations.
pub type SocialResult<T> = Result<T, SocialError>;
