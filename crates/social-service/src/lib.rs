//! # Social Service
//!
//! Business logic for the user resource: payload validation and
//! transactional create, list, update and delete.

pub mod dto;
pub mod r#impl;
pub mod user_service;
pub mod validation;

pub use dto::*;
pub use r#impl::UserServiceImpl;
pub use user_service::*;
pub use validation::*;
