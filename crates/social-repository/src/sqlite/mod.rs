//! SQLite adapter, for embedded and in-memory stores.

mod user_repository;

pub use user_repository::*;
