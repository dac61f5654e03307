//! Repository traits.

use async_trait::async_trait;
use social_core::{NewUser, SocialResult, User, UserId};

/// Shared handle to the user store.
///
/// Reads that need no isolation run directly against the pool; every
/// mutating operation goes through a [`UserTransaction`] obtained from
/// [`begin`](UserRepository::begin).
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Opens a new transaction.
    async fn begin(&self) -> SocialResult<Box<dyn UserTransaction>>;

    /// Returns every user, ordered by id.
    async fn find_all(&self) -> SocialResult<Vec<User>>;

    /// Counts stored users.
    async fn count(&self) -> SocialResult<u64>;

    /// Checks that the store answers.
    async fn ping(&self) -> SocialResult<()>;

    /// Closes the underlying pool.
    async fn close(&self);
}

/// A unit of work against the user store.
///
/// Dropping a transaction without calling [`commit`](UserTransaction::commit)
/// rolls it back and returns the connection to the pool.
#[async_trait]
pub trait UserTransaction: Send {
    /// Inserts a new user and returns it with its assigned id.
    async fn insert(&mut self, user: &NewUser) -> SocialResult<User>;

    /// Finds a user by id.
    async fn find_by_id(&mut self, id: UserId) -> SocialResult<Option<User>>;

    /// Writes name and age of an existing user.
    async fn update(&mut self, user: &User) -> SocialResult<User>;

    /// Deletes a user. Returns false when no row had that id.
    async fn delete(&mut self, id: UserId) -> SocialResult<bool>;

    /// Commits all writes of this transaction.
    async fn commit(self: Box<Self>) -> SocialResult<()>;

    /// Discards all writes of this transaction.
    async fn rollback(self: Box<Self>) -> SocialResult<()>;
}
