//! Configuration file loading and validation.

use crate::error::ConfigError;
use crate::types::ToolConfig;
use std::path::Path;

/// Loads and validates an `anvil.toml` configuration file.
pub fn load_config(path: &Path) -> Result<ToolConfig, ConfigError> {
    let content = std::fs::read_to_string(path)?;
    load_config_from_str(&content)
}

/// Parses and validates an `anvil.toml` configuration from a string.
///
/// Useful for testing without filesystem dependencies.
pub fn load_config_from_str(content: &str) -> Result<ToolConfig, ConfigError> {
    let config: ToolConfig =
        toml::from_str(content).map_err(|e| ConfigError::ParseError(e.to_string()))?;
    validate_config(&config)?;
    Ok(config)
}

/// Validates that configuration values are consistent.
fn validate_config(config: &ToolConfig) -> Result<(), ConfigError> {
    let anneal = &config.anneal;
    if !anneal.initial_temp.is_finite() || anneal.initial_temp <= 0.0 {
        return Err(ConfigError::ValidationError(
            "anneal.initial_temp must be a positive finite number".to_string(),
        ));
    }
    if !(anneal.cooling > 0.0 && anneal.cooling < 1.0) {
        return Err(ConfigError::ValidationError(
            "anneal.cooling must be in (0, 1)".to_string(),
        ));
    }
    if anneal.time_limit_secs == 0 {
        return Err(ConfigError::ValidationError(
            "anneal.time_limit_secs must be positive".to_string(),
        ));
    }
    if config.output.status_file.is_empty() {
        return Err(ConfigError::ValidationError(
            "output.status_file must not be empty".to_string(),
        ));
    }
    Ok(())
}
