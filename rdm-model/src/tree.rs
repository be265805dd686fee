//! Conversion of instances into plain trees.
//!
//! `to_tree` is the handoff to the container writer and stops at tagged
//! models, which the writer serializes through their own tag. `dump` goes
//! all the way down and is what default synthesis merges overrides into.

use crate::model::DataModel;
use crate::value::{Dict, Value};

impl DataModel {
    /// Plain tree of this instance, keyed by external field names.
    ///
    /// Untagged nested models are inlined as dicts; tagged ones are left
    /// in place as [`Value::Model`]. Enum members become their values.
    #[must_use]
    pub fn to_tree(&self) -> Dict {
        self.iter_external()
            .map(|(name, value)| (name.to_string(), tree_value(value)))
            .collect()
    }

    /// Fully nested dict of this instance: every model, tagged or not,
    /// becomes a dict keyed by external field names.
    #[must_use]
    pub fn dump(&self) -> Dict {
        self.iter_external()
            .map(|(name, value)| (name.to_string(), dump_value(value)))
            .collect()
    }
}

fn tree_value(value: &Value) -> Value {
    match value {
        Value::Model(model) if !model.is_tagged() => Value::Dict(model.to_tree()),
        Value::Dict(map) => Value::Dict(
            map.iter()
                .map(|(k, v)| (k.clone(), tree_value(v)))
                .collect(),
        ),
        Value::List(items) => Value::List(items.iter().map(tree_value).collect()),
        Value::Enum(member) => member.value().clone(),
        other => other.clone(),
    }
}

pub(crate) fn dump_value(value: &Value) -> Value {
    match value {
        Value::Model(model) => Value::Dict(model.dump()),
        Value::Dict(map) => Value::Dict(
            map.iter()
                .map(|(k, v)| (k.clone(), dump_value(v)))
                .collect(),
        ),
        Value::List(items) => Value::List(items.iter().map(dump_value).collect()),
        Value::Enum(member) => dump_value(member.innermost()),
        other => other.clone(),
    }
}
