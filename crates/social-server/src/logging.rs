//! Tracing subscriber setup.

use social_config::{LogFormat, ObservabilityConfig};
use social_core::{SocialError, SocialResult};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Installs the global subscriber.
///
/// `RUST_LOG` wins over `observability.log_level` when set.
pub fn init_logging(config: &ObservabilityConfig) -> SocialResult<()> {
    let filter = build_filter(config)?;
    let registry = tracing_subscriber::registry().with(filter);

    let result = match config.log_format {
        LogFormat::Json => registry.with(fmt::layer().json().with_target(true)).try_init(),
        LogFormat::Pretty => registry.with(fmt::layer().with_target(true)).try_init(),
    };

    result.map_err(|e| SocialError::internal(format!("Failed to initialise logging: {}", e)))
}

fn build_filter(config: &ObservabilityConfig) -> SocialResult<EnvFilter> {
    if let Ok(filter) = EnvFilter::try_from_default_env() {
        return Ok(filter);
    }

    EnvFilter::try_new(&config.log_level).map_err(|e| {
        SocialError::Configuration(format!("Invalid log level '{}': {}", config.log_level, e))
    })
}
