//! Custom adaptors for field types the generic rules cannot handle.
//!
//! An adaptor owns both halves of a field type: it validates (and may
//! convert) assigned values, and it builds a schema-valid default. The
//! engine treats adaptors as opaque and only calls through this trait.

use crate::error::{ModelError, ModelResult};
use crate::value::{Dict, Value};
use rdm_types::{DType, NdArray, Time};
use std::fmt;

/// Strategy object bound to one field type.
pub trait Adaptor: fmt::Debug + Send + Sync {
    /// Name shown in annotations and error messages.
    fn name(&self) -> &str;

    /// Builds a default value. `args` are the keyword arguments passed to
    /// `make_default`, forwarded unchanged.
    fn make_default(&self, args: &DefaultArgs) -> ModelResult<Value>;

    /// Validates an assigned value, returning the value to store.
    /// Return `Err(message)` to reject it.
    fn validate(&self, value: Value) -> Result<Value, String> {
        Ok(value)
    }
}

/// Keyword arguments threaded through default construction.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DefaultArgs(Dict);

impl DefaultArgs {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds an argument, builder style.
    #[must_use]
    pub fn with(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.0.insert(key.into(), value.into());
        self
    }

    #[must_use]
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    /// The argument under `key`, or `fallback` when absent.
    #[must_use]
    pub fn get_or(&self, key: &str, fallback: impl Into<Value>) -> Value {
        self.0.get(key).cloned().unwrap_or_else(|| fallback.into())
    }

    /// The `shape` argument as array dimensions, if given as a list of non-negative ints.
    #[must_use]
    pub fn shape(&self) -> Option<Vec<usize>> {
        self.0
            .get("shape")?
            .as_list()?
            .iter()
            .map(|v| v.as_i64().and_then(|i| usize::try_from(i).ok()))
            .collect()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<Dict> for DefaultArgs {
    fn from(d: Dict) -> Self {
        Self(d)
    }
}

/// Adaptor for UTC times. Accepts times and `isot`/RFC 3339 strings.
#[derive(Debug, Clone, Copy, Default)]
pub struct TimeAdaptor;

impl TimeAdaptor {
    /// `2020-01-01T00:00:00.000`, the date every default product carries.
    #[must_use]
    pub fn default_time() -> Time {
        Time::reference_epoch()
    }
}

impl Adaptor for TimeAdaptor {
    fn name(&self) -> &str {
        "time"
    }

    fn make_default(&self, args: &DefaultArgs) -> ModelResult<Value> {
        match args.get("time") {
            None => Ok(Value::Time(Self::default_time())),
            Some(v) => self.validate(v.clone()).map_err(|message| ModelError::Adaptor {
                adaptor: self.name().to_string(),
                message,
            }),
        }
    }

    fn validate(&self, value: Value) -> Result<Value, String> {
        match value {
            Value::Time(t) => Ok(Value::Time(t)),
            Value::Str(s) => Time::parse(&s).map(Value::Time).map_err(|e| e.to_string()),
            other => Err(format!("expected time, got {}", other.type_name())),
        }
    }
}

/// Adaptor for fixed-rank arrays of one dtype.
#[derive(Debug, Clone)]
pub struct ArrayAdaptor {
    name: String,
    dtype: DType,
    ndim: usize,
}

impl ArrayAdaptor {
    /// Extent of every axis when no `shape` argument is given.
    pub const DEFAULT_EXTENT: usize = 8;

    #[must_use]
    pub fn new(dtype: DType, ndim: usize) -> Self {
        Self {
            name: format!("ndarray[{dtype}, {ndim}d]"),
            dtype,
            ndim,
        }
    }

    #[must_use]
    pub const fn dtype(&self) -> DType {
        self.dtype
    }

    #[must_use]
    pub const fn ndim(&self) -> usize {
        self.ndim
    }

    /// Shape of the default array: the trailing `ndim` entries of the
    /// `shape` argument, so one `shape` can serve cubes and images alike.
    fn default_shape(&self, args: &DefaultArgs) -> ModelResult<Vec<usize>> {
        match args.shape() {
            None => Ok(vec![Self::DEFAULT_EXTENT; self.ndim]),
            Some(shape) if shape.len() >= self.ndim => Ok(shape[shape.len() - self.ndim..].to_vec()),
            Some(shape) => Err(ModelError::Adaptor {
                adaptor: self.name.clone(),
                message: format!("shape {shape:?} has fewer than {} dimensions", self.ndim),
            }),
        }
    }
}

impl Adaptor for ArrayAdaptor {
    fn name(&self) -> &str {
        &self.name
    }

    fn make_default(&self, args: &DefaultArgs) -> ModelResult<Value> {
        let shape = self.default_shape(args)?;
        let array = NdArray::zeros(self.dtype, &shape).map_err(|e| ModelError::Adaptor {
            adaptor: self.name.clone(),
            message: e.to_string(),
        })?;
        Ok(Value::Array(array))
    }

    fn validate(&self, value: Value) -> Result<Value, String> {
        match value {
            Value::Array(a) if a.ndim() != self.ndim => Err(format!(
                "expected {}-dimensional array, got {} dimensions",
                self.ndim,
                a.ndim()
            )),
            Value::Array(a) if a.dtype() != self.dtype => {
                Err(format!("expected {} array, got {}", self.dtype, a.dtype()))
            }
            Value::Array(a) => Ok(Value::Array(a)),
            other => Err(format!("expected array, got {}", other.type_name())),
        }
    }
}
