//! The value tree stored in model fields and handed to the container writer.

use crate::DataModel;
use indexmap::IndexMap;
use rdm_types::{NdArray, Time, Transform};
use serde::ser::{SerializeMap, SerializeStruct};
use serde::{Serialize, Serializer};

/// An insertion-ordered mapping with string keys.
pub type Dict = IndexMap<String, Value>;

/// A member of an enumeration, carrying the value it stands for.
///
/// Validated fields store the underlying value rather than the member;
/// members only survive inside extras or values written while validation
/// was paused.
#[derive(Debug, Clone, PartialEq)]
pub struct EnumMember {
    enum_name: String,
    name: String,
    value: Box<Value>,
}

impl EnumMember {
    pub fn new(enum_name: impl Into<String>, name: impl Into<String>, value: impl Into<Value>) -> Self {
        Self {
            enum_name: enum_name.into(),
            name: name.into(),
            value: Box::new(value.into()),
        }
    }

    #[must_use]
    pub fn enum_name(&self) -> &str {
        &self.enum_name
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The value this member stands for. May itself be a member.
    #[must_use]
    pub fn value(&self) -> &Value {
        &self.value
    }

    /// Unwraps nested members down to a plain value.
    #[must_use]
    pub fn innermost(&self) -> &Value {
        match self.value.as_ref() {
            Value::Enum(inner) => inner.innermost(),
            other => other,
        }
    }
}

/// A field value or tree node.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum Value {
    #[default]
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    Str(String),
    Enum(EnumMember),
    Time(Time),
    Array(NdArray),
    Transform(Transform),
    List(Vec<Value>),
    Dict(Dict),
    Model(Box<DataModel>),
}

impl Value {
    /// Short name of the variant, used in validation messages.
    #[must_use]
    pub const fn type_name(&self) -> &'static str {
        match self {
            Self::Null => "null",
            Self::Bool(_) => "bool",
            Self::Int(_) => "int",
            Self::Float(_) => "float",
            Self::Str(_) => "str",
            Self::Enum(_) => "enum",
            Self::Time(_) => "time",
            Self::Array(_) => "array",
            Self::Transform(_) => "transform",
            Self::List(_) => "list",
            Self::Dict(_) => "dict",
            Self::Model(_) => "model",
        }
    }

    #[must_use]
    pub const fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    #[must_use]
    pub const fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(b) => Some(*b),
            _ => None,
        }
    }

    #[must_use]
    pub const fn as_i64(&self) -> Option<i64> {
        match self {
            Self::Int(i) => Some(*i),
            _ => None,
        }
    }

    /// Numeric view; ints widen to float.
    #[must_use]
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Self::Float(f) => Some(*f),
            Self::Int(i) => Some(*i as f64),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Str(s) => Some(s),
            _ => None,
        }
    }

    #[must_use]
    pub const fn as_time(&self) -> Option<&Time> {
        match self {
            Self::Time(t) => Some(t),
            _ => None,
        }
    }

    #[must_use]
    pub const fn as_array(&self) -> Option<&NdArray> {
        match self {
            Self::Array(a) => Some(a),
            _ => None,
        }
    }

    #[must_use]
    pub const fn as_transform(&self) -> Option<&Transform> {
        match self {
            Self::Transform(t) => Some(t),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_list(&self) -> Option<&[Value]> {
        match self {
            Self::List(items) => Some(items),
            _ => None,
        }
    }

    #[must_use]
    pub const fn as_dict(&self) -> Option<&Dict> {
        match self {
            Self::Dict(d) => Some(d),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_model(&self) -> Option<&DataModel> {
        match self {
            Self::Model(m) => Some(m),
            _ => None,
        }
    }

    pub fn as_model_mut(&mut self) -> Option<&mut DataModel> {
        match self {
            Self::Model(m) => Some(m),
            _ => None,
        }
    }

    /// The string a value takes when used as a mapping key.
    #[must_use]
    pub fn key_string(&self) -> Option<String> {
        match self {
            Self::Str(s) => Some(s.clone()),
            Self::Int(i) => Some(i.to_string()),
            Self::Bool(b) => Some(b.to_string()),
            Self::Enum(m) => m.innermost().key_string(),
            _ => None,
        }
    }

    /// Clone that gives every array its own buffer.
    #[must_use]
    pub fn deep_clone(&self) -> Self {
        match self {
            Self::Array(a) => Self::Array(a.deep_clone()),
            Self::List(items) => Self::List(items.iter().map(Self::deep_clone).collect()),
            Self::Dict(d) => Self::Dict(d.iter().map(|(k, v)| (k.clone(), v.deep_clone())).collect()),
            Self::Model(m) => Self::Model(Box::new(m.copy(true))),
            Self::Enum(m) => Self::Enum(EnumMember {
                enum_name: m.enum_name.clone(),
                name: m.name.clone(),
                value: Box::new(m.value.deep_clone()),
            }),
            other => other.clone(),
        }
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Self::Bool(b)
    }
}

impl From<i64> for Value {
    fn from(i: i64) -> Self {
        Self::Int(i)
    }
}

impl From<i32> for Value {
    fn from(i: i32) -> Self {
        Self::Int(i64::from(i))
    }
}

impl From<u32> for Value {
    fn from(i: u32) -> Self {
        Self::Int(i64::from(i))
    }
}

impl From<f64> for Value {
    fn from(f: f64) -> Self {
        Self::Float(f)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Self::Str(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Self::Str(s)
    }
}

impl From<Time> for Value {
    fn from(t: Time) -> Self {
        Self::Time(t)
    }
}

impl From<NdArray> for Value {
    fn from(a: NdArray) -> Self {
        Self::Array(a)
    }
}

impl From<Transform> for Value {
    fn from(t: Transform) -> Self {
        Self::Transform(t)
    }
}

impl From<EnumMember> for Value {
    fn from(m: EnumMember) -> Self {
        Self::Enum(m)
    }
}

impl From<Dict> for Value {
    fn from(d: Dict) -> Self {
        Self::Dict(d)
    }
}

impl From<DataModel> for Value {
    fn from(m: DataModel) -> Self {
        Self::Model(Box::new(m))
    }
}

impl<T: Into<Value>> From<Vec<T>> for Value {
    fn from(items: Vec<T>) -> Self {
        Self::List(items.into_iter().map(Into::into).collect())
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(opt: Option<T>) -> Self {
        opt.map_or(Self::Null, Into::into)
    }
}

impl From<serde_json::Value> for Value {
    fn from(json: serde_json::Value) -> Self {
        match json {
            serde_json::Value::Null => Self::Null,
            serde_json::Value::Bool(b) => Self::Bool(b),
            serde_json::Value::Number(n) => match n.as_i64() {
                Some(i) => Self::Int(i),
                None => Self::Float(n.as_f64().unwrap_or(f64::NAN)),
            },
            serde_json::Value::String(s) => Self::Str(s),
            serde_json::Value::Array(items) => Self::List(items.into_iter().map(Self::from).collect()),
            serde_json::Value::Object(map) => {
                Self::Dict(map.into_iter().map(|(k, v)| (k, Self::from(v))).collect())
            }
        }
    }
}

impl Serialize for Value {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Null => serializer.serialize_none(),
            Self::Bool(b) => serializer.serialize_bool(*b),
            Self::Int(i) => serializer.serialize_i64(*i),
            Self::Float(f) => serializer.serialize_f64(*f),
            Self::Str(s) => serializer.serialize_str(s),
            Self::Enum(m) => m.value().serialize(serializer),
            Self::Time(t) => t.serialize(serializer),
            Self::Array(a) => {
                let mut s = serializer.serialize_struct("NdArray", 3)?;
                s.serialize_field("dtype", &a.dtype())?;
                s.serialize_field("shape", a.shape())?;
                s.serialize_field("data", a.data())?;
                s.end()
            }
            Self::Transform(t) => t.serialize(serializer),
            Self::List(items) => serializer.collect_seq(items),
            Self::Dict(d) => serializer.collect_map(d),
            Self::Model(m) => {
                let tree = m.to_tree();
                let mut map = serializer.serialize_map(Some(tree.len()))?;
                for (k, v) in &tree {
                    map.serialize_entry(k, v)?;
                }
                map.end()
            }
        }
    }
}

/// Builds a [`Dict`] from `key => value` pairs.
///
/// ```
/// use rdm_model::{dict, Value};
///
/// let d = dict! { "name" => "M1", "count" => 3 };
/// assert_eq!(d["count"], Value::Int(3));
/// ```
#[macro_export]
macro_rules! dict {
    () => { $crate::Dict::new() };
    ($($key:expr => $value:expr),+ $(,)?) => {{
        let mut d = $crate::Dict::new();
        $( d.insert(::std::string::String::from($key), $crate::Value::from($value)); )+
        d
    }};
}
