//! Concurrent service calls against a file-backed SQLite store.

use social_config::DatabaseConfig;
use social_repository::{SqliteUserRepository, UserRepository};
use social_service::{ConstraintValidator, UserRequest, UserService, UserServiceImpl};
use std::sync::Arc;

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_updates_on_existing_users_succeed() {
    let dir = tempfile::tempdir().unwrap();
    let url = format!("sqlite://{}", dir.path().join("social.db").display());
    let repository = Arc::new(
        SqliteUserRepository::connect(&DatabaseConfig::with_url(url))
            .await
            .expect("Failed to open file store"),
    );
    let service = Arc::new(UserServiceImpl::new(
        repository.clone(),
        Arc::new(ConstraintValidator::new()),
    ));

    let mut ids = Vec::new();
    for i in 0..8 {
        let created = service
            .create_user(UserRequest::new(format!("user-{}", i), 20))
            .await
            .unwrap();
        ids.push(created.id);
    }

    let mut handles = Vec::new();
    for round in 0..160_usize {
        let service = Arc::clone(&service);
        let id = ids[round % ids.len()];
        handles.push(tokio::spawn(async move {
            service
                .update_user(id, UserRequest::new(format!("renamed-{}", round), 21))
                .await
        }));
    }

    let mut failures = Vec::new();
    for handle in handles {
        if let Err(e) = handle.await.unwrap() {
            failures.push(e.to_string());
        }
    }
    assert!(failures.is_empty(), "failed updates: {:?}", failures);

    let users = service.list_users().await.unwrap();
    assert_eq!(users.len(), 8);
    assert!(users.iter().all(|user| user.age == 21 && user.name.starts_with("renamed-")));
    repository.close().await;
}
