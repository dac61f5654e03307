//! MySQL adapter.

mod user_repository;

pub use user_repository::*;
