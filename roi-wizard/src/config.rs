//! Engine settings loaded from a TOML file.
//!
//! Every key is optional; missing keys fall back to [`EngineConfig::default`].
//!
//! ```toml
//! training_cost_mode = "perHead"   # or "flat"
//! training_cost_value = 400
//! annual_working_hours = 2080
//! default_currency = "EUR"
//!
//! [exchange_rates]
//! EUR = 1
//! USD = 1.08
//! ```

use std::path::Path;

use roi_core::{EngineConfig, EngineConfigError};
use thiserror::Error;
use tracing::debug;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("cannot read config file '{path}': {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid TOML in config file: {0}")]
    Parse(#[from] toml::de::Error),

    #[error(transparent)]
    Invalid(#[from] EngineConfigError),
}

/// Parses and validates configuration text.
pub fn parse_config(text: &str) -> Result<EngineConfig, ConfigError> {
    let config: EngineConfig = toml::from_str(text)?;
    config.validate()?;
    Ok(config)
}

/// Loads configuration from `path`, or returns the defaults when `None`.
pub fn load_config(path: Option<&Path>) -> Result<EngineConfig, ConfigError> {
    let Some(path) = path else {
        debug!("no config file given; using defaults");
        return Ok(EngineConfig::default());
    };

    let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
        path: path.display().to_string(),
        source,
    })?;
    let config = parse_config(&text)?;
    debug!(path = %path.display(), ?config, "loaded config");
    Ok(config)
}
