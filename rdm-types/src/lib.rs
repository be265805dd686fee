//! Leaf value types for Roman data models.
//!
//! This crate holds the value types that model fields store but that know
//! nothing about models themselves:
//! - [`Time`] — a UTC instant with the canonical `isot` string form
//! - [`NdArray`] — a bulk numeric array whose buffer is shared between shallow copies
//! - [`Transform`] — a composable coordinate transform (shifts, scales, `&` and `|` compounds)
//!
//! Model-aware types (values, schemas, instances) live in `rdm-model`.

mod array;
mod time;
mod transform;

pub use array::{DType, NdArray};
pub use time::Time;
pub use transform::{CompoundOp, Transform};

/// Result type alias using the crate's error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur constructing or using leaf values.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum Error {
    #[error("invalid time {value:?}: {reason}")]
    InvalidTime { value: String, reason: String },

    #[error("array of shape {shape:?} needs {expected} elements, got {actual}")]
    ShapeMismatch {
        shape: Vec<usize>,
        expected: usize,
        actual: usize,
    },

    #[error("array of shape {shape:?} is too large")]
    ShapeTooLarge { shape: Vec<usize> },

    #[error("transform takes {expected} inputs, got {actual}")]
    InputMismatch { expected: usize, actual: usize },
}
