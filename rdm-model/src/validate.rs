//! Type checking and coercion of values against annotations.
//!
//! Every check takes ownership of the value and hands back the value to
//! store (ints widened to floats, strings parsed to times, dicts built into
//! nested models, enum members replaced by their values). Failures are
//! collected with their dotted path so one pass reports every bad field.

use crate::annotation::{EnumType, TypeExpr};
use crate::error::{FieldError, ModelError, ModelResult, ValidationError};
use crate::model::DataModel;
use crate::schema::ModelSchema;
use crate::value::{Dict, Value};
use rdm_types::Time;
use std::sync::Arc;

/// Joins a path prefix and a segment with `.`.
pub(crate) fn join_path(prefix: &str, segment: &str) -> String {
    if prefix.is_empty() {
        segment.to_string()
    } else {
        format!("{prefix}.{segment}")
    }
}

fn fail(errors: &mut Vec<FieldError>, path: &str, message: impl Into<String>) -> Option<Value> {
    errors.push(FieldError::new(path, message));
    None
}

fn mismatch(errors: &mut Vec<FieldError>, path: &str, ty: &TypeExpr, value: &Value) -> Option<Value> {
    fail(errors, path, format!("expected {ty}, got {}", value.type_name()))
}

/// Returns true if `f` is integral and inside the `i64` range.
fn is_exact_i64(f: f64) -> bool {
    // 2^63 is exactly representable; i64::MAX is not.
    const LIMIT: f64 = 9_223_372_036_854_775_808.0;
    f.fract() == 0.0 && (-LIMIT..LIMIT).contains(&f)
}

/// Checks `value` against `ty`, returning the value to store.
///
/// Returns `None` after recording at least one error.
pub(crate) fn coerce(
    ty: &TypeExpr,
    value: Value,
    path: &str,
    errors: &mut Vec<FieldError>,
) -> Option<Value> {
    match (ty, value) {
        (TypeExpr::Any, v) => Some(v),
        (TypeExpr::Optional(_), Value::Null) => Some(Value::Null),
        (TypeExpr::Optional(inner), v) => coerce(inner, v, path, errors),

        (TypeExpr::Bool, v @ Value::Bool(_)) => Some(v),
        (TypeExpr::Int, v @ Value::Int(_)) => Some(v),
        (TypeExpr::Int, Value::Float(f)) if is_exact_i64(f) => Some(Value::Int(f as i64)),
        (TypeExpr::Float, v @ Value::Float(_)) => Some(v),
        (TypeExpr::Float, Value::Int(i)) => Some(Value::Float(i as f64)),
        (TypeExpr::Str, v @ Value::Str(_)) => Some(v),
        (TypeExpr::Time, v @ Value::Time(_)) => Some(v),
        (TypeExpr::Time, Value::Str(s)) => match Time::parse(&s) {
            Ok(t) => Some(Value::Time(t)),
            Err(e) => fail(errors, path, e.to_string()),
        },
        (TypeExpr::Array, v @ Value::Array(_)) => Some(v),
        (TypeExpr::Transform, v @ Value::Transform(_)) => Some(v),

        (TypeExpr::Enum(e), v) => coerce_enum(e, v, path, errors),
        (TypeExpr::Model(schema), v) => coerce_model(schema, v, path, errors),
        (TypeExpr::List(args), Value::List(items)) => coerce_list(args, items, path, errors),
        (TypeExpr::Dict(key, value), Value::Dict(map)) => coerce_dict(key, value, map, path, errors),
        (TypeExpr::Custom(adaptor), v) => match adaptor.validate(v) {
            Ok(v) => Some(v),
            Err(message) => fail(errors, path, message),
        },

        (ty, v) => mismatch(errors, path, ty, &v),
    }
}

fn coerce_enum(e: &EnumType, value: Value, path: &str, errors: &mut Vec<FieldError>) -> Option<Value> {
    // Members are stored as the value they stand for.
    let value = match value {
        Value::Enum(member) if member.enum_name() == e.name() => member.value().clone(),
        Value::Enum(member) => member.innermost().clone(),
        other => other,
    };
    if e.contains_value(&value) {
        return Some(value);
    }
    let allowed: Vec<String> = e
        .members()
        .map(|(_, v)| v.key_string().unwrap_or_else(|| v.type_name().to_string()))
        .collect();
    fail(
        errors,
        path,
        format!("expected one of {} ({}), got {value:?}", e.name(), allowed.join(", ")),
    )
}

fn coerce_model(
    schema: &Arc<ModelSchema>,
    value: Value,
    path: &str,
    errors: &mut Vec<FieldError>,
) -> Option<Value> {
    match value {
        Value::Model(mut model) if model.schema().uri() == schema.uri() => {
            if model.revalidate_instances() {
                let before = errors.len();
                model.check_into(path, errors);
                if errors.len() > before {
                    return None;
                }
            }
            // Nothing guards the stored instance, so it must not stay paused.
            model.flags = model.flags.unpaused();
            Some(Value::Model(model))
        }
        Value::Model(model) => fail(
            errors,
            path,
            format!("expected {}, got {}", schema.name(), model.schema().name()),
        ),
        Value::Dict(map) => {
            DataModel::construct(schema, map, path, errors).map(|m| Value::Model(Box::new(m)))
        }
        other => fail(
            errors,
            path,
            format!("expected {} or a mapping, got {}", schema.name(), other.type_name()),
        ),
    }
}

fn coerce_list(
    args: &[TypeExpr],
    items: Vec<Value>,
    path: &str,
    errors: &mut Vec<FieldError>,
) -> Option<Value> {
    if args.is_empty() {
        return Some(Value::List(items));
    }
    let before = errors.len();
    let mut out = Vec::with_capacity(items.len());
    for (i, item) in items.into_iter().enumerate() {
        let item_path = join_path(path, &i.to_string());
        if let [only] = args {
            if let Some(v) = coerce(only, item, &item_path, errors) {
                out.push(v);
            }
            continue;
        }
        // Several type arguments: the first one that accepts the item wins.
        let mut scratch = Vec::new();
        let accepted = args
            .iter()
            .find_map(|arg| coerce(arg, item.clone(), &item_path, &mut scratch));
        match accepted {
            Some(v) => out.push(v),
            None => {
                let expected = TypeExpr::List(args.to_vec());
                fail(errors, &item_path, format!("no member of {expected} accepts {}", item.type_name()));
            }
        }
    }
    (errors.len() == before).then_some(Value::List(out))
}

fn coerce_key(key_ty: &TypeExpr, key: &str) -> Result<(), String> {
    match key_ty.leaf() {
        TypeExpr::Any | TypeExpr::Str => Ok(()),
        TypeExpr::Int => key
            .parse::<i64>()
            .map(|_| ())
            .map_err(|_| format!("key {key:?} is not an int")),
        TypeExpr::Enum(e) if e.contains_value(&Value::Str(key.to_string())) => Ok(()),
        TypeExpr::Enum(e) => Err(format!("key {key:?} is not a member of {}", e.name())),
        other => Err(format!("{other} cannot be used as a key type")),
    }
}

fn coerce_dict(
    key_ty: &TypeExpr,
    value_ty: &TypeExpr,
    map: Dict,
    path: &str,
    errors: &mut Vec<FieldError>,
) -> Option<Value> {
    let before = errors.len();
    let mut out = Dict::with_capacity(map.len());
    for (key, value) in map {
        let entry_path = join_path(path, &key);
        if let Err(message) = coerce_key(key_ty, &key) {
            errors.push(FieldError::new(entry_path, message));
            continue;
        }
        if let Some(v) = coerce(value_ty, value, &entry_path, errors) {
            out.insert(key, v);
        }
    }
    (errors.len() == before).then_some(Value::Dict(out))
}

impl ModelSchema {
    /// Checks a value for one field (by name or alias), returning the value
    /// that assignment would store.
    pub fn validate_value(&self, key: &str, value: Value) -> ModelResult<Value> {
        let field = self.field(key).ok_or_else(|| ModelError::UnknownField {
            model: self.name().to_string(),
            key: key.to_string(),
        })?;
        let mut errors = Vec::new();
        match coerce(field.annotation(), value, field.external_name(), &mut errors) {
            Some(v) if errors.is_empty() => Ok(v),
            _ => Err(ValidationError::new(self.name(), errors).into()),
        }
    }
}
