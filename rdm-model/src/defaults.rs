//! Default synthesis: fully valid instances from schema information alone.
//!
//! For each field, in priority order:
//! 1. a static, non-null schema default;
//! 2. the field's adaptor;
//! 3. the [`special_cases`] table;
//! 4. generic mapping expansion (one entry per expected key);
//! 5. generic sequence expansion (one element per type argument);
//! 6. generic scalar defaults (nested models recurse).
//!
//! Fields no rule covers are left out, so a required one must come from the
//! caller. Overrides are deep-merged into the dumped defaults and the result
//! is validated once.

use crate::adaptor::DefaultArgs;
use crate::annotation::{Container, TypeExpr};
use crate::config::ModelConfig;
use crate::error::ModelResult;
use crate::model::DataModel;
use crate::schema::ModelSchema;
use crate::tree::dump_value;
use crate::value::{Dict, Value};
use rdm_types::Transform;
use std::sync::Arc;
use tracing::debug;

/// Photometry table keys: the WFI optical elements plus dark.
///
/// Pending schema enrichment: the schema constrains these keys with a
/// pattern the model generator does not carry over yet.
pub const PHOT_TABLE_KEYS: [&str; 11] = [
    "F062", "F087", "F106", "F129", "F146", "F158", "F184", "F213", "GRISM", "PRISM", "DARK",
];

/// Literal defaults for fields whose valid shape the schemas do not encode yet.
///
/// Pending schema enrichment: each entry should disappear once the schema
/// carries enough information for the generic rules.
#[must_use]
pub fn special_cases(name: &str) -> Option<Value> {
    match name {
        // Resultants as lists of read numbers; a list of lists is beyond the generic rules.
        "read_pattern" => Some(Value::from(vec![
            vec![1],
            vec![2, 3],
            vec![4],
            vec![5, 6, 7, 8],
            vec![9, 10],
            vec![11],
        ])),
        // Must match a pattern the schema does not carry.
        "p_exptype" => Some(Value::from("WFI_IMAGE|WFI_GRISM|WFI_PRISM|")),
        // Compound transform that the schemas do not describe yet.
        "coordinate_distortion_transform" => Some(Value::Transform(
            Transform::shift(1.0) & Transform::shift(2.0),
        )),
        // Regression tests compare against this name.
        "tweakreg_catalog_name" => Some(Value::from("filename_tweakreg_catalog.asdf")),
        _ => None,
    }
}

/// Deep-merges `overrides` into `base`.
///
/// Nested dicts merge key by key; any other override value replaces the
/// base value outright.
pub fn merge_dicts(base: &mut Dict, overrides: Dict) {
    for (key, value) in overrides {
        if let Value::Dict(nested) = value {
            if let Some(Value::Dict(existing)) = base.get_mut(&key) {
                merge_dicts(existing, nested);
                continue;
            }
            base.insert(key, Value::Dict(nested));
        } else {
            base.insert(key, value);
        }
    }
}

/// Schema-aware merge: override keys may use internal names or aliases,
/// and land under the external name the dump uses.
fn merge_overrides(schema: &ModelSchema, base: &mut Dict, overrides: Dict) {
    for (key, value) in overrides {
        let field = schema.field(&key);
        let key = field.map_or(key, |f| f.external_name().to_string());
        if let Value::Dict(update) = value {
            if let Some(Value::Dict(existing)) = base.get_mut(&key) {
                match field {
                    Some(field) => merge_typed(field.annotation(), existing, update),
                    None => merge_dicts(existing, update),
                }
                continue;
            }
            base.insert(key, Value::Dict(update));
        } else {
            base.insert(key, value);
        }
    }
}

/// Merges a dict override into a dumped value of type `ty`. Models, and
/// mappings whose values are models, merge through their schema.
fn merge_typed(ty: &TypeExpr, existing: &mut Dict, update: Dict) {
    if let Some(schema) = ty.nested_model() {
        merge_overrides(schema, existing, update);
        return;
    }
    let entry_ty = match ty.container() {
        Some(Container::Mapping { value, .. })
            if value.nested_model().is_some() || value.container().is_some() =>
        {
            value
        }
        _ => {
            merge_dicts(existing, update);
            return;
        }
    };
    for (key, value) in update {
        if let Value::Dict(entry) = value {
            if let Some(Value::Dict(current)) = existing.get_mut(&key) {
                merge_typed(entry_ty, current, entry);
                continue;
            }
            existing.insert(key, Value::Dict(entry));
        } else {
            existing.insert(key, value);
        }
    }
}

/// Builds default instances.
#[derive(Debug, Clone, Default)]
pub struct Synthesizer {
    config: ModelConfig,
}

impl Synthesizer {
    #[must_use]
    pub const fn new(config: ModelConfig) -> Self {
        Self { config }
    }

    #[must_use]
    pub const fn config(&self) -> &ModelConfig {
        &self.config
    }

    /// Synthesizes a default instance of `schema` and merges `data` over it.
    ///
    /// `data` is a nested mapping in the shape of the model; `args` are
    /// forwarded to adaptors and nested synthesis.
    pub fn make_default(
        &self,
        schema: &Arc<ModelSchema>,
        data: Option<Dict>,
        args: &DefaultArgs,
    ) -> ModelResult<DataModel> {
        let mut merged: Dict = self
            .field_defaults(schema, args)?
            .iter()
            .map(|(name, value)| (name.clone(), dump_value(value)))
            .collect();
        if let Some(data) = data {
            merge_overrides(schema, &mut merged, data);
        }
        DataModel::new(schema, merged)
    }

    /// Default value of every field a rule covers, keyed by external name.
    pub fn field_defaults(&self, schema: &Arc<ModelSchema>, args: &DefaultArgs) -> ModelResult<Dict> {
        let mut defaults = Dict::with_capacity(schema.fields().len());
        for field in schema.fields() {
            let name = field.external_name();
            let annotation = field.annotation();

            let (value, rule) = if let Some(default) = field.default().filter(|d| !d.is_null()) {
                (Some(default.clone()), "schema")
            } else if let Some(adaptor) = annotation.adaptor() {
                (Some(adaptor.make_default(args)?), "adaptor")
            } else if let Some(value) = special_cases(name) {
                (Some(value), "special case")
            } else {
                match annotation.container() {
                    Some(Container::Mapping { key, value }) => {
                        (Some(self.default_dict(name, key, value, args)?), "mapping")
                    }
                    Some(Container::Sequence(types)) => (Some(self.default_list(types, args)?), "sequence"),
                    None => (self.default_for(annotation, args)?, "type"),
                }
            };

            match value {
                Some(value) => {
                    debug!(model = %schema.name(), field = %name, rule, "synthesized default");
                    defaults.insert(name.to_string(), value);
                }
                None => {
                    debug!(model = %schema.name(), field = %name, annotation = %annotation, "no default rule applies, field omitted");
                }
            }
        }
        Ok(defaults)
    }

    /// Generic default for a type, or `None` if no rule covers it.
    fn default_for(&self, ty: &TypeExpr, args: &DefaultArgs) -> ModelResult<Option<Value>> {
        let ty = ty.leaf();
        if let Some(adaptor) = ty.adaptor() {
            return adaptor.make_default(args).map(Some);
        }
        let value = match ty {
            TypeExpr::Model(schema) => Some(Value::from(self.make_default(schema, None, args)?)),
            TypeExpr::Int => Some(Value::Int(self.config.numeric_sentinel)),
            TypeExpr::Float => Some(Value::Float(self.config.numeric_sentinel as f64)),
            TypeExpr::Str => Some(Value::Str(self.config.string_placeholder.clone())),
            TypeExpr::Bool => Some(Value::Bool(false)),
            TypeExpr::Enum(e) => e.first_value().cloned(),
            TypeExpr::List(types) => Some(self.default_list(types, args)?),
            TypeExpr::Dict(key, value) => Some(self.default_dict("", key, value, args)?),
            _ => None,
        };
        Ok(value)
    }

    fn default_list(&self, types: &[TypeExpr], args: &DefaultArgs) -> ModelResult<Value> {
        let mut items = Vec::with_capacity(types.len());
        for ty in types {
            if let Some(item) = self.default_for(ty, args)? {
                items.push(item);
            }
        }
        Ok(Value::List(items))
    }

    fn default_dict(
        &self,
        name: &str,
        key: &TypeExpr,
        value: &TypeExpr,
        args: &DefaultArgs,
    ) -> ModelResult<Value> {
        let keys: Vec<String> = if name == "phot_table" {
            PHOT_TABLE_KEYS.iter().map(|k| (*k).to_string()).collect()
        } else {
            self.default_for(key, args)?
                .and_then(|k| k.key_string())
                .into_iter()
                .collect()
        };
        let mut entries = Dict::with_capacity(keys.len());
        for key in keys {
            if let Some(v) = self.default_for(value, args)? {
                entries.insert(key, v);
            }
        }
        Ok(Value::Dict(entries))
    }
}

impl DataModel {
    /// Synthesizes a default instance with the built-in configuration.
    ///
    /// See [`Synthesizer::make_default`].
    pub fn make_default(
        schema: &Arc<ModelSchema>,
        data: Option<Dict>,
        args: &DefaultArgs,
    ) -> ModelResult<Self> {
        Synthesizer::default().make_default(schema, data, args)
    }
}
