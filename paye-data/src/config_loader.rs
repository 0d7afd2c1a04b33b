//! Loads a [`TaxConfig`] from TOML.
//!
//! ## File format
//!
//! Every key is optional; anything left out takes the built-in 2026 value.
//! Bands are an array of tables and may appear in any order. Omitting
//! `upper_bound` makes a band unbounded. `effective_date` must be a quoted
//! `YYYY-MM-DD` string.
//!
//! ```toml
//! version_name = "Lagos pilot"
//! effective_date = "2026-07-01"
//! rent_relief_percent = 0.2
//! rent_relief_cap = 500000
//!
//! [[bands]]
//! id = "1"
//! lower_bound = 0
//! upper_bound = 1000000
//! rate = 0
//!
//! [[bands]]
//! id = "2"
//! lower_bound = 1000000
//! rate = 0.1
//! ```
//!
//! Loaded configs are validated and returned with their bands sorted.

use std::path::{Path, PathBuf};

use paye_core::{TaxConfig, TaxConfigError};
use thiserror::Error;
use tracing::{debug, info};

/// Environment variable consulted for a config path when none is given.
pub const CONFIG_ENV_VAR: &str = "PAYE_CONFIG";

/// Errors that can occur when loading a tax configuration.
#[derive(Debug, Error)]
pub enum ConfigLoadError {
    #[error("cannot read config file '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("TOML parse error: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("invalid tax config: {0}")]
    Invalid(#[from] TaxConfigError),
}

/// Loader for tax configurations stored as TOML.
pub struct ConfigLoader;

impl ConfigLoader {
    /// Parse and validate a config from TOML text.
    pub fn parse(input: &str) -> Result<TaxConfig, ConfigLoadError> {
        let config: TaxConfig = toml::from_str(input)?;
        config.validate()?;
        debug!(version = %config.version_name, bands = config.bands.len(), "parsed tax config");
        Ok(config.sorted())
    }

    /// Read, parse and validate the config at `path`.
    pub fn load(path: &Path) -> Result<TaxConfig, ConfigLoadError> {
        let contents = std::fs::read_to_string(path).map_err(|source| ConfigLoadError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::parse(&contents)?;
        info!(path = %path.display(), version = %config.version_name, "loaded tax config");
        Ok(config)
    }

    /// Loads `path` when given, otherwise the built-in schedule.
    pub fn resolve(path: Option<&Path>) -> Result<TaxConfig, ConfigLoadError> {
        match path {
            Some(path) => Self::load(path),
            None => {
                let config = TaxConfig::default();
                info!(version = %config.version_name, "using built-in tax config");
                Ok(config)
            }
        }
    }
}
