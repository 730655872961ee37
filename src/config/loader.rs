//! Configuration loading from disk.

use std::fs;
use std::path::Path;

use thiserror::Error;

use crate::config::schema::AppConfig;

/// Error type for configuration loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Parse error: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation failed: {0}")]
    Validation(String),
}

/// Load and validate configuration from a TOML file.
pub fn load_config(path: &Path) -> Result<AppConfig, ConfigError> {
    let content = fs::read_to_string(path)?;
    let config: AppConfig = toml::from_str(&content)?;

    validate(&config)?;

    Ok(config)
}

/// Semantic checks serde cannot express.
fn validate(config: &AppConfig) -> Result<(), ConfigError> {
    if config.chain.failure_modulus == 0 {
        return Err(ConfigError::Validation(
            "chain.failure_modulus must be >= 1".to_string(),
        ));
    }
    if !config.chain.max_delay_secs.is_finite() || config.chain.max_delay_secs < 0.0 {
        return Err(ConfigError::Validation(
            "chain.max_delay_secs must be a finite non-negative number".to_string(),
        ));
    }
    if config.server.bind_address.is_empty() {
        return Err(ConfigError::Validation(
            "server.bind_address must not be empty".to_string(),
        ));
    }
    Ok(())
}
