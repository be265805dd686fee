//! Engine configuration, read from `rdm.toml`.
//!
//! Every value has a built-in default, so a missing file is not an error.

use crate::error::{ModelError, ModelResult};
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::{info, warn};

/// Placeholder written into numeric fields that have no better default.
pub const NONUM: i64 = -999_999;
/// Placeholder written into string fields that have no better default.
pub const NOSTR: &str = "dummy value";
/// Placeholder file name.
pub const NOFN: &str = "none";

/// Sentinels used by default synthesis and the flat-dict namespace.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ModelConfig {
    /// Out-of-band value for int and float fields.
    #[serde(default = "default_numeric_sentinel")]
    pub numeric_sentinel: i64,
    /// Placeholder for string fields.
    #[serde(default = "default_string_placeholder")]
    pub string_placeholder: String,
    /// Token every flat-dict path is prefixed with.
    #[serde(default = "default_flat_namespace")]
    pub flat_namespace: String,
}

fn default_numeric_sentinel() -> i64 {
    NONUM
}

fn default_string_placeholder() -> String {
    NOSTR.to_string()
}

fn default_flat_namespace() -> String {
    "roman".to_string()
}

impl Default for ModelConfig {
    fn default() -> Self {
        Self {
            numeric_sentinel: default_numeric_sentinel(),
            string_placeholder: default_string_placeholder(),
            flat_namespace: default_flat_namespace(),
        }
    }
}

impl ModelConfig {
    /// Parses a TOML document.
    pub fn from_toml(contents: &str) -> ModelResult<Self> {
        let config: Self = toml::from_str(contents)?;
        config.check()?;
        Ok(config)
    }

    /// Loads configuration from `path`. A missing file gives the defaults;
    /// an unreadable or malformed one is an error.
    pub fn load_from(path: &Path) -> ModelResult<Self> {
        if !path.exists() {
            info!("No config file found at {:?}, using defaults", path);
            return Ok(Self::default());
        }
        let contents = std::fs::read_to_string(path)?;
        let config = Self::from_toml(&contents)?;
        info!("Loaded model config from {:?}", path);
        Ok(config)
    }

    /// Like [`ModelConfig::load_from`], but falls back to the defaults with
    /// a warning instead of failing.
    #[must_use]
    pub fn load_or_default(path: &Path) -> Self {
        Self::load_from(path).unwrap_or_else(|e| {
            warn!(
                "Failed to load config {:?}: {}. Falling back to defaults.",
                path, e
            );
            Self::default()
        })
    }

    fn check(&self) -> ModelResult<()> {
        if self.flat_namespace.contains('.') {
            return Err(ModelError::Config(format!(
                "flat_namespace {:?} must be a single path segment",
                self.flat_namespace
            )));
        }
        Ok(())
    }
}
