//! Error types for the model engine.

use std::fmt;
use thiserror::Error;

/// Result type for model operations.
pub type ModelResult<T> = Result<T, ModelError>;

/// Errors that can occur building, mutating or loading models.
#[derive(Debug, Error)]
pub enum ModelError {
    /// One or more fields violate their declared type.
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// Item access with a key that is neither a field nor an extra.
    #[error("{model} has no field {key:?}")]
    UnknownField { model: String, key: String },

    /// A custom adaptor could not build a default value.
    #[error("adaptor {adaptor} failed: {message}")]
    Adaptor { adaptor: String, message: String },

    /// Input that should have been a mapping was something else.
    #[error("expected a mapping for {model}, got {actual}")]
    NotAMapping { model: String, actual: &'static str },

    /// Invalid configuration value.
    #[error("invalid configuration: {0}")]
    Config(String),

    /// Configuration file could not be parsed.
    #[error("config parse error: {0}")]
    Toml(#[from] toml::de::Error),

    /// IO error (file system).
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Malformed JSON handed to a parser (e.g. archive extras).
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// A single offending field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldError {
    /// Dotted path from the validated model to the field (`meta.exposure.nresultants`).
    pub path: String,
    pub message: String,
}

impl FieldError {
    pub fn new(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            message: message.into(),
        }
    }
}

impl fmt::Display for FieldError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.path, self.message)
    }
}

/// Every field that failed one validation pass over a model.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    pub model: String,
    pub errors: Vec<FieldError>,
}

impl ValidationError {
    pub fn new(model: impl Into<String>, errors: Vec<FieldError>) -> Self {
        Self {
            model: model.into(),
            errors,
        }
    }

    /// Paths of the offending fields, in the order they were found.
    pub fn paths(&self) -> impl Iterator<Item = &str> {
        self.errors.iter().map(|e| e.path.as_str())
    }

    /// Returns true if `path` is among the offending fields.
    #[must_use]
    pub fn has_path(&self, path: &str) -> bool {
        self.paths().any(|p| p == path)
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let plural = if self.errors.len() == 1 { "" } else { "s" };
        write!(
            f,
            "{} validation error{} for {}",
            self.errors.len(),
            plural,
            self.model
        )?;
        for error in &self.errors {
            write!(f, "\n  {error}")?;
        }
        Ok(())
    }
}

impl std::error::Error for ValidationError {}

impl ModelError {
    /// The validation failure behind this error, if that is what it is.
    #[must_use]
    pub fn as_validation(&self) -> Option<&ValidationError> {
        match self {
            Self::Validation(e) => Some(e),
            _ => None,
        }
    }
}
