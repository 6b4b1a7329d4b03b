//! Dispatcher configuration.
//!
//! ```toml
//! [default_cors]
//! allow_origin = "https://example.com"
//! allow_headers = "content-type"
//! ```
//!
//! `default_cors = true` and `default_cors = false` are accepted as well.

use crate::http_router::CorsOptions;

use std::fs;
use std::path::Path;

use serde::Deserialize;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config file")]
    Io(#[from] std::io::Error),

    #[error("failed to parse config")]
    Parse(#[from] toml::de::Error),
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct DispatchConfig {
    /// CORS rule for routes registered without their own.
    pub default_cors: CorsOptions,
}

impl DispatchConfig {
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(s)?)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }
}
