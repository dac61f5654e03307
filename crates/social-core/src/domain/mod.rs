//! Domain entities.
//!
//! Entities are plain data. Persistence lives behind the repository traits in
//! `social-repository`; nothing here knows about storage.

mod user;

pub use user::*;
