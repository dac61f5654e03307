//! Server startup utilities.

use social_config::AppConfig;
use tracing::{info, warn};

/// Prints the startup banner.
pub fn print_banner() {
    info!(r#"
   _____            _       __
  / ___/____  _____(_)___ _/ /
  \__ \/ __ \/ ___/ / __ `/ /
 ___/ / /_/ / /__/ / /_/ / /
/____/\____/\___/_/\__,_/_/   users
    "#);
}

/// Prints server startup information.
pub fn print_startup_info(config: &AppConfig) {
    let separator = "=".repeat(60);
    let addr = config.server.addr();
    info!("{}", separator);
    info!("Environment: {}", config.app.environment);
    info!("Users API:   http://{}/users", addr);
    info!("Health:      http://{}/health", addr);
    info!("API Docs:    http://{}/api-docs/openapi.json", addr);
    info!("{}", separator);

    if let Some(message) = storage_warning(config) {
        warn!("{}", message);
    }
}

/// Returns a notice when the configured store does not survive a restart.
fn storage_warning(config: &AppConfig) -> Option<&'static str> {
    config
        .database
        .is_in_memory()
        .then_some("Users are kept in an in-memory SQLite database and are lost on restart")
}
