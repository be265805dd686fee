//! Field type annotations and the resolver the synthesizer dispatches on.
//!
//! Annotations are plain data handed over by the schema provider, so
//! telling a nested model apart from a scalar is a `match`, not a guess.

use crate::adaptor::Adaptor;
use crate::schema::ModelSchema;
use crate::value::{EnumMember, Value};
use std::fmt;
use std::sync::Arc;

/// A closed set of named values.
#[derive(Debug, Clone, PartialEq)]
pub struct EnumType {
    name: String,
    members: Vec<(String, Value)>,
}

impl EnumType {
    /// Creates an enumeration from `(member name, value)` pairs in declaration order.
    pub fn new<N, V>(name: impl Into<String>, members: impl IntoIterator<Item = (N, V)>) -> Self
    where
        N: Into<String>,
        V: Into<Value>,
    {
        Self {
            name: name.into(),
            members: members
                .into_iter()
                .map(|(n, v)| (n.into(), v.into()))
                .collect(),
        }
    }

    /// String enumeration whose member names equal their values.
    pub fn of_strings(name: impl Into<String>, values: &[&str]) -> Self {
        Self::new(name, values.iter().map(|v| (*v, *v)))
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn members(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.members.iter().map(|(n, v)| (n.as_str(), v))
    }

    /// Value of the first declared member.
    #[must_use]
    pub fn first_value(&self) -> Option<&Value> {
        self.members.first().map(|(_, v)| v)
    }

    /// Looks a member up by name.
    #[must_use]
    pub fn member(&self, name: &str) -> Option<EnumMember> {
        self.members
            .iter()
            .find(|(n, _)| n == name)
            .map(|(n, v)| EnumMember::new(self.name.clone(), n.clone(), v.clone()))
    }

    /// Returns true if some member stands for `value`.
    #[must_use]
    pub fn contains_value(&self, value: &Value) -> bool {
        self.members.iter().any(|(_, v)| v == value)
    }
}

/// A declared field type.
#[derive(Debug, Clone)]
pub enum TypeExpr {
    Any,
    Bool,
    Int,
    Float,
    Str,
    Time,
    Array,
    Transform,
    Enum(Arc<EnumType>),
    Model(Arc<ModelSchema>),
    /// A sequence; the type arguments listed in the annotation (may be empty).
    List(Vec<TypeExpr>),
    /// A mapping from key type to value type.
    Dict(Box<TypeExpr>, Box<TypeExpr>),
    Optional(Box<TypeExpr>),
    /// A type whose validation and default construction belong to an adaptor.
    Custom(Arc<dyn Adaptor>),
}

/// Origin of a generic container annotation, with its type arguments.
#[derive(Debug, Clone, Copy)]
pub enum Container<'a> {
    Mapping { key: &'a TypeExpr, value: &'a TypeExpr },
    Sequence(&'a [TypeExpr]),
}

impl TypeExpr {
    /// `list[elem]`
    #[must_use]
    pub fn list(elem: Self) -> Self {
        Self::List(vec![elem])
    }

    /// A bare `list` with no type arguments.
    #[must_use]
    pub const fn bare_list() -> Self {
        Self::List(Vec::new())
    }

    /// `dict[key, value]`
    #[must_use]
    pub fn dict(key: Self, value: Self) -> Self {
        Self::Dict(Box::new(key), Box::new(value))
    }

    /// `Optional[inner]`
    #[must_use]
    pub fn optional(inner: Self) -> Self {
        Self::Optional(Box::new(inner))
    }

    #[must_use]
    pub fn model(schema: &Arc<ModelSchema>) -> Self {
        Self::Model(Arc::clone(schema))
    }

    #[must_use]
    pub fn enumeration(e: EnumType) -> Self {
        Self::Enum(Arc::new(e))
    }

    pub fn custom(adaptor: impl Adaptor + 'static) -> Self {
        Self::Custom(Arc::new(adaptor))
    }

    /// Returns true if `null` is an accepted value.
    #[must_use]
    pub const fn is_optional(&self) -> bool {
        matches!(self, Self::Optional(_))
    }

    /// The type default dispatch keys on: every `Optional` layer stripped.
    #[must_use]
    pub fn leaf(&self) -> &Self {
        let mut ty = self;
        while let Self::Optional(inner) = ty {
            ty = &**inner;
        }
        ty
    }

    /// Container origin and type arguments, if the leaf is a list or dict.
    #[must_use]
    pub fn container(&self) -> Option<Container<'_>> {
        match self.leaf() {
            Self::List(args) => Some(Container::Sequence(args)),
            Self::Dict(key, value) => Some(Container::Mapping { key, value }),
            _ => None,
        }
    }

    /// The nested schema, if the leaf is a model.
    #[must_use]
    pub fn nested_model(&self) -> Option<&Arc<ModelSchema>> {
        match self.leaf() {
            Self::Model(schema) => Some(schema),
            _ => None,
        }
    }

    /// The adaptor bound to this annotation, if any.
    #[must_use]
    pub fn adaptor(&self) -> Option<&Arc<dyn Adaptor>> {
        match self.leaf() {
            Self::Custom(adaptor) => Some(adaptor),
            _ => None,
        }
    }
}

impl PartialEq for TypeExpr {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Any, Self::Any)
            | (Self::Bool, Self::Bool)
            | (Self::Int, Self::Int)
            | (Self::Float, Self::Float)
            | (Self::Str, Self::Str)
            | (Self::Time, Self::Time)
            | (Self::Array, Self::Array)
            | (Self::Transform, Self::Transform) => true,
            (Self::Enum(a), Self::Enum(b)) => a == b,
            (Self::Model(a), Self::Model(b)) => a.uri() == b.uri(),
            (Self::List(a), Self::List(b)) => a == b,
            (Self::Dict(ak, av), Self::Dict(bk, bv)) => ak == bk && av == bv,
            (Self::Optional(a), Self::Optional(b)) => a == b,
            (Self::Custom(a), Self::Custom(b)) => a.name() == b.name(),
            _ => false,
        }
    }
}

impl fmt::Display for TypeExpr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Any => f.write_str("any"),
            Self::Bool => f.write_str("bool"),
            Self::Int => f.write_str("int"),
            Self::Float => f.write_str("float"),
            Self::Str => f.write_str("str"),
            Self::Time => f.write_str("time"),
            Self::Array => f.write_str("array"),
            Self::Transform => f.write_str("transform"),
            Self::Enum(e) => f.write_str(e.name()),
            Self::Model(schema) => f.write_str(schema.name()),
            Self::List(args) if args.is_empty() => f.write_str("list"),
            Self::List(args) => {
                f.write_str("list[")?;
                for (i, arg) in args.iter().enumerate() {
                    if i > 0 {
                        f.write_str(" | ")?;
                    }
                    write!(f, "{arg}")?;
                }
                f.write_str("]")
            }
            Self::Dict(key, value) => write!(f, "dict[{key}, {value}]"),
            Self::Optional(inner) => write!(f, "Optional[{inner}]"),
            Self::Custom(adaptor) => f.write_str(adaptor.name()),
        }
    }
}
