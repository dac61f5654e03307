//! Row mapping shared by the SQL adapters.

use social_core::{User, UserId};
use sqlx::FromRow;

/// Database row representation of a user.
#[derive(Debug, FromRow)]
pub(crate) struct UserRow {
    pub id: i64,
    pub name: String,
    pub age: i32,
}

impl From<UserRow> for User {
    fn from(row: UserRow) -> Self {
        User::new(UserId::new(row.id), row.name, row.age)
    }
}

/// Converts a `COUNT(*)` result to the unsigned count.
pub(crate) fn to_count(value: i64) -> u64 {
    u64::try_from(value).unwrap_or_default()
}
