//! Application wiring.

use axum::Router;
use social_config::AppConfig;
use social_core::{SocialError, SocialResult};
use social_repository::{create_user_repository, StoreHealthCheck, UserRepository};
use social_rest::{create_router, AppState};
use social_service::{ConstraintValidator, UserServiceImpl};
use std::future::Future;
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::info;

/// A fully wired server, ready to serve.
pub struct Application {
    config: AppConfig,
    repository: Arc<dyn UserRepository>,
    router: Router,
}

impl Application {
    /// Connects the store and builds the service graph by constructor
    /// injection.
    pub async fn build(config: AppConfig) -> SocialResult<Self> {
        let repository = create_user_repository(&config.database).await?;
        let validator = Arc::new(ConstraintValidator::new());
        let user_service = Arc::new(UserServiceImpl::new(Arc::clone(&repository), validator));

        let state = AppState::new(user_service)
            .with_health_check(Arc::new(StoreHealthCheck::new(Arc::clone(&repository))));
        let router = create_router(state, &config.server);

        Ok(Self {
            config,
            repository,
            router,
        })
    }

    /// Returns the configuration the application was built with.
    #[must_use]
    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    /// Returns the user store.
    #[must_use]
    pub fn repository(&self) -> Arc<dyn UserRepository> {
        Arc::clone(&self.repository)
    }

    /// Binds the configured address.
    pub async fn bind(&self) -> SocialResult<TcpListener> {
        let addr = self.config.server.addr();
        TcpListener::bind(&addr)
            .await
            .map_err(|e| SocialError::internal(format!("Failed to bind {}: {}", addr, e)))
    }

    /// Serves requests until `shutdown` resolves, then closes the store.
    pub async fn serve<F>(self, listener: TcpListener, shutdown: F) -> SocialResult<()>
    where
        F: Future<Output = ()> + Send + 'static,
    {
        if let Ok(addr) = listener.local_addr() {
            info!("Starting REST server on http://{}", addr);
        }

        let result = axum::serve(listener, self.router)
            .with_graceful_shutdown(shutdown)
            .await
            .map_err(|e| SocialError::internal(format!("REST server error: {}", e)));

        self.repository.close().await;
        info!("Server shutdown complete");
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sqlite_config() -> AppConfig {
        let mut config = AppConfig::default();
        config.database.url = "sqlite::memory:".to_string();
        config.server.host = "127.0.0.1".to_string();
        config.server.port = 0;
        config
    }

    #[tokio::test]
    async fn test_build_with_sqlite_store() {
        let app = Application::build(sqlite_config()).await.unwrap();

        assert_eq!(app.repository().count().await.unwrap(), 0);
        assert_eq!(app.config().database.url, "sqlite::memory:");
    }

    #[tokio::test]
    async fn test_build_rejects_unknown_backend() {
        let mut config = sqlite_config();
        config.database.url = "postgres://localhost/social".to_string();

        assert!(matches!(
            Application::build(config).await,
            Err(SocialError::Configuration(_))
        ));
    }

    #[tokio::test]
    async fn test_serve_stops_on_shutdown_and_closes_store() {
        let app = Application::build(sqlite_config()).await.unwrap();
        let repository = app.repository();
        let listener = app.bind().await.unwrap();

        app.serve(listener, async {}).await.unwrap();

        assert!(repository.ping().await.is_err());
    }
}
