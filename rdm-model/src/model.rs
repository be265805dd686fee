//! Live model instances.

use crate::error::{FieldError, ModelError, ModelResult, ValidationError};
use crate::metadata::ArchiveMetadata;
use crate::schema::ModelSchema;
use crate::validate::{coerce, join_path};
use crate::value::{Dict, Value};
use std::ops::Index;
use std::sync::Arc;

/// Instance-local validation switches.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct ValidationFlags {
    /// Check values as they are assigned.
    pub(crate) validate_assignment: bool,
    /// Re-check this instance whenever it is handed to a validating parent.
    pub(crate) revalidate_instances: bool,
    /// Route `set_item` through validated assignment.
    pub(crate) validate_setitem: bool,
}

impl ValidationFlags {
    /// The same flags with any pause lifted.
    pub(crate) const fn unpaused(self) -> Self {
        Self {
            validate_assignment: true,
            revalidate_instances: true,
            validate_setitem: self.validate_setitem,
        }
    }
}

impl Default for ValidationFlags {
    fn default() -> Self {
        Self {
            validate_assignment: true,
            revalidate_instances: true,
            validate_setitem: true,
        }
    }
}

/// A live, validated realization of a [`ModelSchema`].
///
/// Holds one value per declared field, in declaration order, plus an
/// ordered map of extra keys the schema does not declare. Cloning is an
/// exact shallow copy, paused flags included: arrays share their buffers
/// until written. [`DataModel::copy`] gives an unpaused copy, with
/// independent buffers when `deep` is true.
#[derive(Debug, Clone)]
pub struct DataModel {
    schema: Arc<ModelSchema>,
    values: Vec<Value>,
    extra: Dict,
    pub(crate) flags: ValidationFlags,
}

impl DataModel {
    /// Builds an instance from a mapping keyed by field name or alias.
    ///
    /// Missing fields take their static default; fields without one are
    /// required. Unknown keys are kept as extras.
    pub fn new(schema: &Arc<ModelSchema>, data: Dict) -> ModelResult<Self> {
        let mut errors = Vec::new();
        match Self::construct(schema, data, "", &mut errors) {
            Some(model) if errors.is_empty() => Ok(model),
            _ => Err(ValidationError::new(schema.name(), errors).into()),
        }
    }

    /// Builds an instance from a JSON object.
    pub fn from_json(schema: &Arc<ModelSchema>, json: serde_json::Value) -> ModelResult<Self> {
        match Value::from(json) {
            Value::Dict(data) => Self::new(schema, data),
            other => Err(ModelError::NotAMapping {
                model: schema.name().to_string(),
                actual: other.type_name(),
            }),
        }
    }

    pub(crate) fn construct(
        schema: &Arc<ModelSchema>,
        mut data: Dict,
        path: &str,
        errors: &mut Vec<FieldError>,
    ) -> Option<Self> {
        let before = errors.len();
        let mut values = Vec::with_capacity(schema.fields().len());
        for field in schema.fields() {
            // The alias wins when a mapping carries both spellings.
            let by_alias = field.alias().and_then(|a| data.shift_remove(a));
            let by_name = data.shift_remove(field.name());
            let field_path = join_path(path, field.external_name());
            let value = match (by_alias.or(by_name), field.default()) {
                (Some(v), _) => coerce(field.annotation(), v, &field_path, errors).unwrap_or_default(),
                (None, Some(default)) => default.clone(),
                (None, None) => {
                    errors.push(FieldError::new(field_path, "field required"));
                    Value::Null
                }
            };
            values.push(value);
        }
        (errors.len() == before).then(|| Self {
            schema: Arc::clone(schema),
            values,
            extra: data,
            flags: ValidationFlags::default(),
        })
    }

    #[must_use]
    pub const fn schema(&self) -> &Arc<ModelSchema> {
        &self.schema
    }

    /// Returns true if the container format serializes this instance on its own.
    #[must_use]
    pub fn is_tagged(&self) -> bool {
        self.schema.is_tagged()
    }

    /// Extra keys not declared by the schema.
    #[must_use]
    pub const fn extra(&self) -> &Dict {
        &self.extra
    }

    /// Value of a field (by name or alias) or extra key.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&Value> {
        match self.schema.position(key) {
            Some(i) => Some(&self.values[i]),
            None => self.extra.get(key),
        }
    }

    /// Like [`DataModel::get`], but a missing key is an error.
    pub fn get_item(&self, key: &str) -> ModelResult<&Value> {
        self.get(key).ok_or_else(|| ModelError::UnknownField {
            model: self.schema.name().to_string(),
            key: key.to_string(),
        })
    }

    /// Nested model stored under `key`, for in-place (validated) edits.
    pub fn model_mut(&mut self, key: &str) -> Option<&mut DataModel> {
        match self.schema.position(key) {
            Some(i) => self.values[i].as_model_mut(),
            None => self.extra.get_mut(key).and_then(Value::as_model_mut),
        }
    }

    /// Returns true if `key` is a declared field or a stored extra.
    #[must_use]
    pub fn contains(&self, key: &str) -> bool {
        self.schema.position(key).is_some() || self.extra.contains_key(key)
    }

    /// Assigns a field. Declared fields are validated unless validation is
    /// paused; a rejected value leaves the instance unchanged. Unknown keys
    /// are stored as extras.
    pub fn set(&mut self, key: &str, value: impl Into<Value>) -> ModelResult<()> {
        let value = value.into();
        let Some(i) = self.schema.position(key) else {
            self.extra.insert(key.to_string(), value);
            return Ok(());
        };
        if !self.flags.validate_assignment {
            self.values[i] = value;
            return Ok(());
        }
        self.values[i] = self.schema.validate_value(key, value)?;
        Ok(())
    }

    /// Archive descriptors of this instance's schema.
    #[must_use]
    pub fn archive_metadata(&self) -> ArchiveMetadata {
        self.schema.archive_metadata()
    }

    /// Full revalidation of every field against the schema.
    pub fn revalidate(&self) -> ModelResult<()> {
        let mut errors = Vec::new();
        self.check_into("", &mut errors);
        if errors.is_empty() {
            Ok(())
        } else {
            Err(ValidationError::new(self.schema.name(), errors).into())
        }
    }

    pub(crate) fn check_into(&self, path: &str, errors: &mut Vec<FieldError>) {
        for (field, value) in self.schema.fields().iter().zip(&self.values) {
            let field_path = join_path(path, field.external_name());
            // Full revalidation descends into nested instances whatever their flags say.
            match (value, field.annotation().nested_model()) {
                (Value::Model(nested), Some(schema)) if nested.schema().uri() == schema.uri() => {
                    nested.check_into(&field_path, errors);
                }
                _ => {
                    coerce(field.annotation(), value.clone(), &field_path, errors);
                }
            }
        }
    }

    /// Changes whether `set_item` validates.
    pub fn set_validate_setitem(&mut self, value: bool) {
        self.flags.validate_setitem = value;
    }

    #[must_use]
    pub const fn validate_setitem(&self) -> bool {
        self.flags.validate_setitem
    }

    #[must_use]
    pub const fn validate_assignment(&self) -> bool {
        self.flags.validate_assignment
    }

    #[must_use]
    pub const fn revalidate_instances(&self) -> bool {
        self.flags.revalidate_instances
    }

    /// Fields (internal names, declaration order) followed by extras.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.schema
            .fields()
            .iter()
            .map(|f| f.name())
            .zip(&self.values)
            .chain(self.extra.iter().map(|(k, v)| (k.as_str(), v)))
    }

    /// Fields under their external names, followed by extras.
    pub(crate) fn iter_external(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.schema
            .fields()
            .iter()
            .map(|f| f.external_name())
            .zip(&self.values)
            .chain(self.extra.iter().map(|(k, v)| (k.as_str(), v)))
    }

    /// Copies the instance. A shallow copy shares array buffers with the
    /// original; a deep copy owns its own. `validate_setitem` is carried
    /// over; a pause is not.
    #[must_use]
    pub fn copy(&self, deep: bool) -> Self {
        if !deep {
            let mut copy = self.clone();
            copy.flags = self.flags.unpaused();
            return copy;
        }
        Self {
            schema: Arc::clone(&self.schema),
            values: self.values.iter().map(Value::deep_clone).collect(),
            extra: self
                .extra
                .iter()
                .map(|(k, v)| (k.clone(), v.deep_clone()))
                .collect(),
            flags: self.flags.unpaused(),
        }
    }
}

impl PartialEq for DataModel {
    fn eq(&self, other: &Self) -> bool {
        self.schema.uri() == other.schema.uri()
            && self.values == other.values
            && self.extra == other.extra
    }
}

impl Index<&str> for DataModel {
    type Output = Value;

    /// # Panics
    ///
    /// Panics if `key` is neither a field nor an extra.
    fn index(&self, key: &str) -> &Value {
        match self.get(key) {
            Some(value) => value,
            None => panic!("{} has no field {key:?}", self.schema.name()),
        }
    }
}
