//! Store selection and connection.

use crate::traits::UserRepository;
use crate::{MySqlUserRepository, SqliteUserRepository};
use social_config::{DatabaseBackend, DatabaseConfig};
use social_core::{SocialError, SocialResult};
use std::sync::Arc;
use tracing::info;

/// Connects the user store named by `config.url`.
///
/// `mysql://` URLs select [`MySqlUserRepository`], `sqlite:` URLs select
/// [`SqliteUserRepository`]. Any other scheme is a configuration error.
pub async fn create_user_repository(
    config: &DatabaseConfig,
) -> SocialResult<Arc<dyn UserRepository>> {
    let backend = config.backend().ok_or_else(|| {
        SocialError::Configuration("Unsupported database URL scheme".to_string())
    })?;

    info!(?backend, "Creating user repository");

    let repository: Arc<dyn UserRepository> = match backend {
        DatabaseBackend::MySql => Arc::new(MySqlUserRepository::connect(config).await?),
        DatabaseBackend::Sqlite => Arc::new(SqliteUserRepository::connect(config).await?),
    };

    Ok(repository)
}
