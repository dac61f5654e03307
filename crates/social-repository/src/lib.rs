//! # Social Repository
//!
//! Data access for the user resource:
//!
//! ```text
//! Service
//!   ↓  Arc<dyn UserRepository>    (shared store handle)
//!   ↓  Box<dyn UserTransaction>   (one per mutating request)
//! MySqlUserRepository / SqliteUserRepository
//!   ↓
//! MySQL / SQLite
//! ```
//!
//! [`create_user_repository`] picks the adapter from the database URL.

pub mod health;
pub mod mysql;
pub mod pool;
mod row;
pub mod sqlite;
pub mod traits;

pub use health::*;
pub use mysql::*;
pub use pool::*;
pub use sqlite::*;
pub use traits::*;
