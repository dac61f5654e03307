//! Store health check.

use crate::traits::UserRepository;
use async_trait::async_trait;
use social_core::{HealthCheck, HealthStatus};
use std::sync::Arc;
use tracing::warn;

/// Reports the user store as healthy while it answers a ping.
pub struct StoreHealthCheck {
    repository: Arc<dyn UserRepository>,
}

impl StoreHealthCheck {
    #[must_use]
    pub fn new(repository: Arc<dyn UserRepository>) -> Self {
        Self { repository }
    }
}

#[async_trait]
impl HealthCheck for StoreHealthCheck {
    fn name(&self) -> &str {
        "database"
    }

    async fn check(&self) -> HealthStatus {
        match self.repository.ping().await {
            Ok(()) => HealthStatus::Healthy,
            Err(e) => {
                warn!("Database health check failed: {}", e);
                HealthStatus::Unhealthy(e.to_string())
            }
        }
    }
}
