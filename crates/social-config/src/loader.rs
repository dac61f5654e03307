//! Configuration loader with layered sources.

use crate::{AppConfig, DatabaseBackend};
use config::{Config, ConfigError, Environment, File};
use social_core::SocialError;
use std::path::Path;
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::{debug, info, warn};

/// Environment variable selecting the environment-specific config file.
pub const ENVIRONMENT_VAR: &str = "SOCIAL_ENVIRONMENT";

/// Prefix of environment variable overrides (`SOCIAL__SERVER__PORT=9000`).
pub const ENV_PREFIX: &str = "SOCIAL";

/// Configuration loader with runtime refresh support.
#[derive(Clone)]
pub struct ConfigLoader {
    config: Arc<RwLock<AppConfig>>,
    config_dir: String,
}

impl ConfigLoader {
    /// Creates a new configuration loader.
    ///
    /// Configuration is loaded from multiple sources in order:
    /// 1. `{config_dir}/default.toml` - Default values
    /// 2. `{config_dir}/{environment}.toml` - Environment-specific overrides
    /// 3. `{config_dir}/local.toml` - Local overrides
    /// 4. Environment variables with `SOCIAL__` prefix
    pub fn new(config_dir: impl Into<String>) -> Result<Self, SocialError> {
        let config_dir = config_dir.into();
        let config = Self::load_config(&config_dir)?;

        Ok(Self {
            config: Arc::new(RwLock::new(config)),
            config_dir,
        })
    }

    /// Loads configuration from the default location (`./config`).
    pub fn from_default_location() -> Result<Self, SocialError> {
        Self::new("./config")
    }

    /// Returns the current configuration.
    pub async fn get(&self) -> AppConfig {
        self.config.read().await.clone()
    }

    /// Reloads the configuration from disk.
    ///
    /// On failure the previous configuration stays in place.
    pub async fn reload(&self) -> Result<(), SocialError> {
        let new_config = Self::load_config(&self.config_dir)?;
        let mut config = self.config.write().await;
        *config = new_config;
        info!("Configuration reloaded successfully");
        Ok(())
    }

    fn load_config(config_dir: &str) -> Result<AppConfig, SocialError> {
        if let Err(e) = dotenvy::dotenv() {
            debug!("No .env file found or error loading it: {}", e);
        }

        let environment =
            std::env::var(ENVIRONMENT_VAR).unwrap_or_else(|_| "development".to_string());

        info!("Loading configuration for environment: {}", environment);

        let mut builder = Config::builder();

        for name in ["default", environment.as_str(), "local"] {
            let path = format!("{}/{}.toml", config_dir, name);
            if Path::new(&path).exists() {
                debug!("Loading config from: {}", path);
                builder = builder.add_source(File::with_name(&path).required(false));
            }
        }

        builder = builder.add_source(
            Environment::with_prefix(ENV_PREFIX)
                .separator("__")
                .try_parsing(true),
        );

        let config = builder.build().map_err(config_error)?;

        let mut app_config: AppConfig = config.try_deserialize().map_err(config_error)?;
        app_config.app.environment = environment;

        validate_config(&app_config)?;

        Ok(app_config)
    }
}

/// Validates a loaded configuration, failing fast on values the server
/// cannot start with.
pub fn validate_config(config: &AppConfig) -> Result<(), SocialError> {
    let database = &config.database;

    if database.url.trim().is_empty() {
        return Err(SocialError::Configuration(
            "Database URL is required".to_string(),
        ));
    }

    if database.backend().is_none() {
        return Err(SocialError::Configuration(format!(
            "Unsupported database URL scheme: {} (expected mysql:// or sqlite:)",
            redact_url(&database.url)
        )));
    }

    if config.server.port == 0 {
        return Err(SocialError::Configuration(
            "Server port must be between 1 and 65535".to_string(),
        ));
    }

    if database.max_connections == 0 || database.min_connections > database.max_connections {
        return Err(SocialError::Configuration(format!(
            "Invalid pool size: min ({}) cannot be greater than max ({})",
            database.min_connections, database.max_connections
        )));
    }

    if config.app.environment == "production"
        && database.backend() == Some(DatabaseBackend::Sqlite)
    {
        warn!("Using an SQLite store in production");
    }

    Ok(())
}

fn redact_url(url: &str) -> &str {
    url.split_once("://").map_or(url, |(scheme, _)| scheme)
}

fn config_error(err: ConfigError) -> SocialError {
    SocialError::Configuration(err.to_string())
}
