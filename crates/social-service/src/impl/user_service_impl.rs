//! User service implementation.

use crate::dto::{UserRequest, UserResponse};
use crate::user_service::UserService;
use crate::validation::UserValidator;
use async_trait::async_trait;
use social_core::{NewUser, SocialError, SocialResult, User, UserId};
use social_repository::{UserRepository, UserTransaction};
use std::sync::Arc;
use tracing::{debug, info, warn};

/// User service backed by an injected store and validator.
pub struct UserServiceImpl {
    user_repository: Arc<dyn UserRepository>,
    validator: Arc<dyn UserValidator>,
}

impl UserServiceImpl {
    /// Creates a new user service.
    pub fn new(user_repository: Arc<dyn UserRepository>, validator: Arc<dyn UserValidator>) -> Self {
        Self {
            user_repository,
            validator,
        }
    }

    /// Runs the validator and turns a clean payload into a store candidate.
    fn validated(&self, request: UserRequest) -> SocialResult<NewUser> {
        let violations = self.validator.validate(&request);
        if !violations.is_empty() {
            debug!("Rejecting user payload with {} violation(s)", violations.len());
            return Err(SocialError::validation(violations));
        }
        request.into_new_user()
    }

    async fn apply_update(
        tx: &mut dyn UserTransaction,
        id: UserId,
        changes: NewUser,
    ) -> SocialResult<User> {
        let mut user = tx
            .find_by_id(id)
            .await?
            .ok_or_else(|| SocialError::not_found("User", id))?;

        user.name = changes.name;
        user.age = changes.age;

        tx.update(&user).await
    }

    async fn remove(tx: &mut dyn UserTransaction, id: UserId) -> SocialResult<()> {
        if tx.find_by_id(id).await?.is_none() || !tx.delete(id).await? {
            return Err(SocialError::not_found("User", id));
        }
        Ok(())
    }
}

/// Commits the transaction when `result` is a success, rolls it back
/// otherwise. A failed rollback is logged and the operation error returned.
async fn finish<T: Send>(
    tx: Box<dyn UserTransaction>,
    result: SocialResult<T>,
) -> SocialResult<T> {
    match result {
        Ok(value) => {
            tx.commit().await?;
            Ok(value)
        }
        Err(err) => {
            if let Err(rollback_err) = tx.rollback().await {
                warn!("Transaction rollback failed: {}", rollback_err);
            }
            Err(err)
        }
    }
}

#[async_trait]
impl UserService for UserServiceImpl {
    async fn create_user(&self, request: UserRequest) -> SocialResult<UserResponse> {
        debug!("Creating user: {:?}", request.name);

        let new_user = self.validated(request)?;

        let mut tx = self.user_repository.begin().await?;
        let result = tx.insert(&new_user).await;
        let user = finish(tx, result).await?;

        info!("User created: {}", user.id);
        Ok(UserResponse::from(user))
    }

    async fn list_users(&self) -> SocialResult<Vec<UserResponse>> {
        debug!("Listing users");

        let users = self.user_repository.find_all().await?;
        Ok(users.into_iter().map(UserResponse::from).collect())
    }

    async fn update_user(&self, id: UserId, request: UserRequest) -> SocialResult<UserResponse> {
        debug!("Updating user: {}", id);

        let changes = self.validated(request)?;

        let mut tx = self.user_repository.begin().await?;
        let result = Self::apply_update(tx.as_mut(), id, changes).await;
        let user = finish(tx, result).await?;

        info!("User updated: {}", id);
        Ok(UserResponse::from(user))
    }

    async fn delete_user(&self, id: UserId) -> SocialResult<()> {
        debug!("Deleting user: {}", id);

        let mut tx = self.user_repository.begin().await?;
        let result = Self::remove(tx.as_mut(), id).await;
        finish(tx, result).await?;

        info!("User deleted: {}", id);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validation::ConstraintValidator;
    use std::collections::BTreeMap;
    use std::sync::Mutex;

    #[derive(Debug, Clone, Default)]
    struct Store {
        users: BTreeMap<UserId, User>,
        next_id: i64,
    }

    #[derive(Debug, Default)]
    struct Stats {
        begun: usize,
        committed: usize,
        rolled_back: usize,
    }

    /// In-memory store whose transactions work on a staged copy that
    /// replaces the committed state on commit.
    #[derive(Default)]
    struct MockUserRepository {
        store: Arc<Mutex<Store>>,
        stats: Arc<Mutex<Stats>>,
        fail_writes: bool,
    }

    impl MockUserRepository {
        fn new() -> Self {
            Self::default()
        }

        fn failing() -> Self {
            Self {
                fail_writes: true,
                ..Self::default()
            }
        }

        fn with_users(users: Vec<(&str, i32)>) -> Self {
            let repo = Self::new();
            {
                let mut store = repo.store.lock().unwrap();
                for (name, age) in users {
                    store.next_id += 1;
                    let id = UserId::new(store.next_id);
                    store.users.insert(id, User::new(id, name, age));
                }
            }
            repo
        }

        fn users(&self) -> Vec<User> {
            self.store.lock().unwrap().users.values().cloned().collect()
        }

        fn begun(&self) -> usize {
            self.stats.lock().unwrap().begun
        }

        fn committed(&self) -> usize {
            self.stats.lock().unwrap().committed
        }

        fn rolled_back(&self) -> usize {
            self.stats.lock().unwrap().rolled_back
        }
    }

    struct MockTransaction {
        staged: Store,
        store: Arc<Mutex<Store>>,
        stats: Arc<Mutex<Stats>>,
        fail_writes: bool,
    }

    impl MockTransaction {
        fn check_write(&self) -> SocialResult<()> {
            if self.fail_writes {
                return Err(SocialError::Database("connection reset".to_string()));
            }
            Ok(())
        }
    }

    #[async_trait]
    impl UserRepository for MockUserRepository {
        async fn begin(&self) -> SocialResult<Box<dyn UserTransaction>> {
            self.stats.lock().unwrap().begun += 1;
            Ok(Box::new(MockTransaction {
                staged: self.store.lock().unwrap().clone(),
                store: Arc::clone(&self.store),
                stats: Arc::clone(&self.stats),
                fail_writes: self.fail_writes,
            }))
        }

        async fn find_all(&self) -> SocialResult<Vec<User>> {
            Ok(self.users())
        }

        async fn count(&self) -> SocialResult<u64> {
            Ok(self.store.lock().unwrap().users.len() as u64)
        }

        async fn ping(&self) -> SocialResult<()> {
            Ok(())
        }

        async fn close(&self) {}
    }

    #[async_trait]
    impl UserTransaction for MockTransaction {
        async fn insert(&mut self, user: &NewUser) -> SocialResult<User> {
            self.check_write()?;
            self.staged.next_id += 1;
            let user = user.clone().with_id(UserId::new(self.staged.next_id));
            self.staged.users.insert(user.id, user.clone());
            Ok(user)
        }

        async fn find_by_id(&mut self, id: UserId) -> SocialResult<Option<User>> {
            Ok(self.staged.users.get(&id).cloned())
        }

        async fn update(&mut self, user: &User) -> SocialResult<User> {
            self.check_write()?;
            self.staged.users.insert(user.id, user.clone());
            Ok(user.clone())
        }

        async fn delete(&mut self, id: UserId) -> SocialResult<bool> {
            self.check_write()?;
            Ok(self.staged.users.remove(&id).is_some())
        }

        async fn commit(self: Box<Self>) -> SocialResult<()> {
            let Self {
                staged,
                store,
                stats,
                ..
            } = *self;
            *store.lock().unwrap() = staged;
            stats.lock().unwrap().committed += 1;
            Ok(())
        }

        async fn rollback(self: Box<Self>) -> SocialResult<()> {
            self.stats.lock().unwrap().rolled_back += 1;
            Ok(())
        }
    }

    fn service(repo: &Arc<MockUserRepository>) -> UserServiceImpl {
        UserServiceImpl::new(repo.clone(), Arc::new(ConstraintValidator::new()))
    }

    #[tokio::test]
    async fn test_create_user_success() {
        let repo = Arc::new(MockUserRepository::new());
        let service = service(&repo);

        let response = service
            .create_user(UserRequest::new("Ana", 30))
            .await
            .unwrap();

        assert_eq!(response.id, UserId::new(1));
        assert_eq!(response.name, "Ana");
        assert_eq!(response.age, 30);
        assert_eq!(repo.users().len(), 1);
        assert_eq!(repo.committed(), 1);
    }

    #[tokio::test]
    async fn test_create_user_validation_error_opens_no_transaction() {
        let repo = Arc::new(MockUserRepository::new());
        let service = service(&repo);

        let result = service.create_user(UserRequest::new("", -1)).await;

        match result {
            Err(SocialError::Validation { violations, .. }) => {
                let fields: Vec<&str> = violations.iter().map(|v| v.field.as_str()).collect();
                assert_eq!(fields, vec!["age", "name"]);
            }
            other => panic!("Expected Validation error, got {:?}", other),
        }
        assert!(repo.users().is_empty());
        assert_eq!(repo.begun(), 0);
    }

    #[tokio::test]
    async fn test_create_user_missing_name() {
        let repo = Arc::new(MockUserRepository::new());
        let service = service(&repo);

        let request = UserRequest {
            name: None,
            age: Some(30),
        };
        let err = service.create_user(request).await.unwrap_err();

        assert_eq!(err.violations().unwrap()[0].field, "name");
        assert_eq!(err.violations().unwrap()[0].message, "Name is required");
        assert!(repo.users().is_empty());
    }

    #[tokio::test]
    async fn test_list_users() {
        let repo = Arc::new(MockUserRepository::with_users(vec![("Ana", 30), ("Bruno", 25)]));
        let service = service(&repo);

        let users = service.list_users().await.unwrap();

        assert_eq!(users.len(), 2);
        assert_eq!(users[0].name, "Ana");
        assert_eq!(users[1].name, "Bruno");
    }

    #[tokio::test]
    async fn test_list_users_empty() {
        let repo = Arc::new(MockUserRepository::new());
        assert!(service(&repo).list_users().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_update_user_success() {
        let repo = Arc::new(MockUserRepository::with_users(vec![("Ana", 30), ("Bruno", 25)]));
        let service = service(&repo);

        let response = service
            .update_user(UserId::new(1), UserRequest::new("Ana Silva", 31))
            .await
            .unwrap();

        assert_eq!(response.id, UserId::new(1));
        assert_eq!(response.name, "Ana Silva");
        assert_eq!(response.age, 31);
        assert_eq!(
            repo.users(),
            vec![
                User::new(UserId::new(1), "Ana Silva", 31),
                User::new(UserId::new(2), "Bruno", 25),
            ]
        );
    }

    #[tokio::test]
    async fn test_update_user_not_found_rolls_back() {
        let repo = Arc::new(MockUserRepository::with_users(vec![("Ana", 30)]));
        let service = service(&repo);

        let result = service
            .update_user(UserId::new(99), UserRequest::new("Ghost", 40))
            .await;

        assert!(matches!(result, Err(SocialError::NotFound { .. })));
        assert_eq!(repo.rolled_back(), 1);
        assert_eq!(repo.committed(), 0);
        assert_eq!(repo.users(), vec![User::new(UserId::new(1), "Ana", 30)]);
    }

    #[tokio::test]
    async fn test_update_user_validates_before_lookup() {
        let repo = Arc::new(MockUserRepository::new());
        let service = service(&repo);

        let result = service
            .update_user(UserId::new(99), UserRequest::new("Ana", -5))
            .await;

        assert!(matches!(result, Err(SocialError::Validation { .. })));
        assert_eq!(repo.begun(), 0);
    }

    #[tokio::test]
    async fn test_delete_user_success() {
        let repo = Arc::new(MockUserRepository::with_users(vec![("Ana", 30), ("Bruno", 25)]));
        let service = service(&repo);

        service.delete_user(UserId::new(1)).await.unwrap();

        assert_eq!(repo.users(), vec![User::new(UserId::new(2), "Bruno", 25)]);
        assert_eq!(repo.committed(), 1);
    }

    #[tokio::test]
    async fn test_delete_user_not_found() {
        let repo = Arc::new(MockUserRepository::with_users(vec![("Ana", 30)]));
        let service = service(&repo);

        let result = service.delete_user(UserId::new(99)).await;

        assert!(matches!(result, Err(SocialError::NotFound { .. })));
        assert_eq!(repo.rolled_back(), 1);
        assert_eq!(repo.users().len(), 1);
    }

    #[tokio::test]
    async fn test_store_failure_rolls_back_and_propagates() {
        let repo = Arc::new(MockUserRepository::failing());
        let service = service(&repo);

        let result = service.create_user(UserRequest::new("Ana", 30)).await;

        match result {
            Err(err @ SocialError::Database(_)) => assert!(err.is_server_error()),
            other => panic!("Expected Database error, got {:?}", other),
        }
        assert_eq!(repo.rolled_back(), 1);
        assert_eq!(repo.committed(), 0);
        assert!(repo.users().is_empty());
    }

    #[tokio::test]
    async fn test_custom_validator_is_used() {
        struct RejectAll;

        impl UserValidator for RejectAll {
            fn validate(&self, _request: &UserRequest) -> Vec<social_core::FieldError> {
                vec![social_core::FieldError::new("name", "Name is taken", "taken")]
            }
        }

        let repo = Arc::new(MockUserRepository::new());
        let service = UserServiceImpl::new(repo.clone(), Arc::new(RejectAll));

        let err = service
            .create_user(UserRequest::new("Ana", 30))
            .await
            .unwrap_err();

        assert_eq!(err.violations().unwrap()[0].code, "taken");
        assert!(repo.users().is_empty());
    }
}
