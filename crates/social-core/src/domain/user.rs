//! User entity.

use crate::UserId;
use serde::{Deserialize, Serialize};

/// A persisted user record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    /// Store-assigned identifier.
    pub id: UserId,

    /// Display name.
    pub name: String,

    /// Age in years.
    pub age: i32,
}

impl User {
    /// Creates a user record with an already assigned id.
    #[must_use]
    pub fn new(id: UserId, name: impl Into<String>, age: i32) -> Self {
        Self {
            id,
            name: name.into(),
            age,
        }
    }
}

/// A user that has not been persisted yet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewUser {
    pub name: String,
    pub age: i32,
}

impl NewUser {
    /// Creates a new, id-less user.
    #[must_use]
    pub fn new(name: impl Into<String>, age: i32) -> Self {
        Self {
            name: name.into(),
            age,
        }
    }

    /// Attaches the id the store assigned on insert.
    #[must_use]
    pub fn with_id(self, id: UserId) -> User {
        User {
            id,
            name: self.name,
            age: self.age,
        }
    }
}
