//! Composable coordinate transforms.
//!
//! Distortion reference files carry a compound transform built from simple
//! one-dimensional models. `a & b` runs `a` and `b` side by side on
//! separate inputs; `a | b` feeds the outputs of `a` into `b`.

use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{BitAnd, BitOr};

/// How the two halves of a compound transform are joined.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CompoundOp {
    /// `&`: inputs are split between the halves, outputs are concatenated.
    Join,
    /// `|`: outputs of the left half become inputs of the right half.
    Compose,
}

/// A coordinate transform.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Transform {
    Shift(f64),
    Scale(f64),
    Compound {
        op: CompoundOp,
        left: Box<Transform>,
        right: Box<Transform>,
    },
}

impl Transform {
    #[must_use]
    pub const fn shift(offset: f64) -> Self {
        Self::Shift(offset)
    }

    #[must_use]
    pub const fn scale(factor: f64) -> Self {
        Self::Scale(factor)
    }

    /// Number of inputs the transform consumes.
    #[must_use]
    pub fn n_inputs(&self) -> usize {
        match self {
            Self::Shift(_) | Self::Scale(_) => 1,
            Self::Compound { op: CompoundOp::Join, left, right } => left.n_inputs() + right.n_inputs(),
            Self::Compound { op: CompoundOp::Compose, left, .. } => left.n_inputs(),
        }
    }

    /// Number of outputs the transform produces.
    #[must_use]
    pub fn n_outputs(&self) -> usize {
        match self {
            Self::Shift(_) | Self::Scale(_) => 1,
            Self::Compound { op: CompoundOp::Join, left, right } => left.n_outputs() + right.n_outputs(),
            Self::Compound { op: CompoundOp::Compose, right, .. } => right.n_outputs(),
        }
    }

    /// Applies the transform to one point.
    pub fn evaluate(&self, inputs: &[f64]) -> Result<Vec<f64>> {
        if inputs.len() != self.n_inputs() {
            return Err(Error::InputMismatch {
                expected: self.n_inputs(),
                actual: inputs.len(),
            });
        }
        match self {
            Self::Shift(offset) => Ok(vec![inputs[0] + offset]),
            Self::Scale(factor) => Ok(vec![inputs[0] * factor]),
            Self::Compound { op: CompoundOp::Join, left, right } => {
                let (l, r) = inputs.split_at(left.n_inputs());
                let mut out = left.evaluate(l)?;
                out.extend(right.evaluate(r)?);
                Ok(out)
            }
            Self::Compound { op: CompoundOp::Compose, left, right } => {
                right.evaluate(&left.evaluate(inputs)?)
            }
        }
    }
}

impl BitAnd for Transform {
    type Output = Self;

    fn bitand(self, rhs: Self) -> Self {
        Self::Compound {
            op: CompoundOp::Join,
            left: Box::new(self),
            right: Box::new(rhs),
        }
    }
}

impl BitOr for Transform {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self {
        Self::Compound {
            op: CompoundOp::Compose,
            left: Box::new(self),
            right: Box::new(rhs),
        }
    }
}

impl fmt::Display for Transform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Shift(offset) => write!(f, "Shift({offset})"),
            Self::Scale(factor) => write!(f, "Scale({factor})"),
            Self::Compound { op, left, right } => {
                let sym = match op {
                    CompoundOp::Join => '&',
                    CompoundOp::Compose => '|',
                };
                write!(f, "[{left} {sym} {right}]")
            }
        }
    }
}
