//! Bulk numeric arrays.
//!
//! Science and quality arrays are stored row-major as `f64` together with
//! the dtype they are written as. The buffer sits behind an `Arc` so a
//! shallow model copy shares it; writes go through [`NdArray::data_mut`],
//! which detaches a shared buffer first.

use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;

/// Element type an array is written as.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DType {
    #[serde(rename = "uint8")]
    U8,
    #[serde(rename = "uint16")]
    U16,
    #[serde(rename = "uint32")]
    U32,
    #[serde(rename = "int32")]
    I32,
    #[serde(rename = "float32")]
    F32,
    #[serde(rename = "float64")]
    F64,
}

impl fmt::Display for DType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::U8 => "uint8",
            Self::U16 => "uint16",
            Self::U32 => "uint32",
            Self::I32 => "int32",
            Self::F32 => "float32",
            Self::F64 => "float64",
        };
        f.write_str(name)
    }
}

fn element_count(shape: &[usize]) -> Result<usize> {
    shape
        .iter()
        .try_fold(1usize, |n, &extent| n.checked_mul(extent))
        .ok_or_else(|| Error::ShapeTooLarge { shape: shape.to_vec() })
}

/// An n-dimensional numeric array.
#[derive(Debug, Clone)]
pub struct NdArray {
    dtype: DType,
    shape: Vec<usize>,
    data: Arc<Vec<f64>>,
}

impl NdArray {
    /// Creates a zero-filled array.
    pub fn zeros(dtype: DType, shape: &[usize]) -> Result<Self> {
        Self::filled(dtype, shape, 0.0)
    }

    /// Creates an array with every element set to `value`.
    ///
    /// Fails when the element count overflows or cannot be allocated.
    pub fn filled(dtype: DType, shape: &[usize], value: f64) -> Result<Self> {
        let len = element_count(shape)?;
        let mut data = Vec::new();
        data.try_reserve_exact(len)
            .map_err(|_| Error::ShapeTooLarge { shape: shape.to_vec() })?;
        data.resize(len, value);
        Ok(Self {
            dtype,
            shape: shape.to_vec(),
            data: Arc::new(data),
        })
    }

    /// Creates an array from row-major data.
    ///
    /// Fails when `data.len()` is not the product of `shape`.
    pub fn from_vec(dtype: DType, shape: &[usize], data: Vec<f64>) -> Result<Self> {
        let expected = element_count(shape)?;
        if expected != data.len() {
            return Err(Error::ShapeMismatch {
                shape: shape.to_vec(),
                expected,
                actual: data.len(),
            });
        }
        Ok(Self {
            dtype,
            shape: shape.to_vec(),
            data: Arc::new(data),
        })
    }

    #[must_use]
    pub const fn dtype(&self) -> DType {
        self.dtype
    }

    #[must_use]
    pub fn shape(&self) -> &[usize] {
        &self.shape
    }

    #[must_use]
    pub fn ndim(&self) -> usize {
        self.shape.len()
    }

    /// Number of elements.
    #[must_use]
    pub fn len(&self) -> usize {
        self.data.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Row-major element view.
    #[must_use]
    pub fn data(&self) -> &[f64] {
        &self.data
    }

    /// Mutable element view. Detaches the buffer if a copy still shares it.
    pub fn data_mut(&mut self) -> &mut [f64] {
        Arc::make_mut(&mut self.data).as_mut_slice()
    }

    /// Copy that owns its own buffer.
    #[must_use]
    pub fn deep_clone(&self) -> Self {
        Self {
            dtype: self.dtype,
            shape: self.shape.clone(),
            data: Arc::new(self.data.as_ref().clone()),
        }
    }

    /// Returns true if both arrays point at the same buffer.
    #[must_use]
    pub fn shares_buffer(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.data, &other.data)
    }
}

impl PartialEq for NdArray {
    fn eq(&self, other: &Self) -> bool {
        self.dtype == other.dtype && self.shape == other.shape && self.data == other.data
    }
}

impl fmt::Display for NdArray {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "<array {} {:?}>", self.dtype, self.shape)
    }
}
