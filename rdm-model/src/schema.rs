//! Schema provider: named, versioned models made of typed fields.

use crate::alias;
use crate::annotation::TypeExpr;
use crate::metadata::{Archive, ArchiveEntry, ArchiveMetadata};
use crate::value::Value;
use std::collections::HashMap;
use std::sync::Arc;

const SCHEMA_PREFIX: &str = "asdf://stsci.edu/datamodels/roman/schemas";
const TAG_PREFIX: &str = "asdf://stsci.edu/datamodels/roman/tags";

/// One declared field of a model.
#[derive(Debug, Clone)]
pub struct FieldSpec {
    name: String,
    alias: Option<String>,
    annotation: TypeExpr,
    default: Option<Value>,
    archive: Option<Archive>,
    description: Option<String>,
}

impl FieldSpec {
    /// Declares a field with no default.
    ///
    /// Names ending in `_` whose stem is a reserved word (`pass_`, `type_`)
    /// are aliased to the stem automatically.
    pub fn new(name: impl Into<String>, annotation: TypeExpr) -> Self {
        let name = name.into();
        let external = alias::field_name(&name);
        let alias = (external != name).then(|| external.to_string());
        Self {
            name,
            alias,
            annotation,
            default: None,
            archive: None,
            description: None,
        }
    }

    /// Declares an `Optional[annotation]` field defaulting to null.
    pub fn optional(name: impl Into<String>, annotation: TypeExpr) -> Self {
        Self::new(name, TypeExpr::optional(annotation)).with_default(Value::Null)
    }

    #[must_use]
    pub fn with_default(mut self, default: impl Into<Value>) -> Self {
        self.default = Some(default.into());
        self
    }

    #[must_use]
    pub fn with_alias(mut self, alias: impl Into<String>) -> Self {
        self.alias = Some(alias.into());
        self
    }

    #[must_use]
    pub fn with_archive(mut self, archive: Archive) -> Self {
        self.archive = Some(archive);
        self
    }

    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Internal (identifier-safe) name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn alias(&self) -> Option<&str> {
        self.alias.as_deref()
    }

    /// Name the field is written under: the alias if there is one.
    #[must_use]
    pub fn external_name(&self) -> &str {
        self.alias.as_deref().unwrap_or(&self.name)
    }

    #[must_use]
    pub const fn annotation(&self) -> &TypeExpr {
        &self.annotation
    }

    /// Static default. `None` means undefined, which is not the same as a null default.
    #[must_use]
    pub const fn default(&self) -> Option<&Value> {
        self.default.as_ref()
    }

    #[must_use]
    pub const fn archive(&self) -> Option<&Archive> {
        self.archive.as_ref()
    }

    #[must_use]
    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    /// Returns true if construction must supply a value.
    #[must_use]
    pub const fn is_required(&self) -> bool {
        self.default.is_none()
    }
}

/// A named, versioned schema of typed fields.
#[derive(Debug)]
pub struct ModelSchema {
    name: String,
    version: String,
    tag: Option<String>,
    description: Option<String>,
    fields: Vec<FieldSpec>,
    index: HashMap<String, usize>,
}

impl ModelSchema {
    /// Starts a schema declaration.
    pub fn builder(name: impl Into<String>, version: impl Into<String>) -> SchemaBuilder {
        SchemaBuilder {
            name: name.into(),
            version: version.into(),
            tagged: false,
            description: None,
            fields: Vec::new(),
        }
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn version(&self) -> &str {
        &self.version
    }

    /// Schema URI, e.g. `asdf://stsci.edu/datamodels/roman/schemas/exposure-1.0.0`.
    #[must_use]
    pub fn uri(&self) -> String {
        format!("{SCHEMA_PREFIX}/{}-{}", self.name, self.version)
    }

    /// Tag URI for independently serializable models.
    #[must_use]
    pub fn tag(&self) -> Option<&str> {
        self.tag.as_deref()
    }

    #[must_use]
    pub const fn is_tagged(&self) -> bool {
        self.tag.is_some()
    }

    #[must_use]
    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    /// Fields in declaration order.
    #[must_use]
    pub fn fields(&self) -> &[FieldSpec] {
        &self.fields
    }

    /// Position of the field named `key` (internal name or alias).
    #[must_use]
    pub fn position(&self, key: &str) -> Option<usize> {
        self.index.get(key).copied()
    }

    /// Field named `key` (internal name or alias).
    #[must_use]
    pub fn field(&self, key: &str) -> Option<&FieldSpec> {
        self.position(key).map(|i| &self.fields[i])
    }

    /// External name of a field; unknown names map through the reserved-word rule.
    #[must_use]
    pub fn external_name<'a>(&'a self, name: &'a str) -> &'a str {
        self.field(name)
            .map_or_else(|| alias::field_name(name), FieldSpec::external_name)
    }

    /// Internal name of the field written under `key`.
    #[must_use]
    pub fn internal_name(&self, key: &str) -> Option<&str> {
        self.field(key).map(FieldSpec::name)
    }

    /// Collects non-empty archive descriptors across the field tree.
    ///
    /// A field with its own descriptor contributes it; otherwise a nested
    /// model field contributes its own metadata when that is non-empty.
    #[must_use]
    pub fn archive_metadata(&self) -> ArchiveMetadata {
        let mut metadata = ArchiveMetadata::new();
        for field in &self.fields {
            let name = field.external_name().to_string();
            if let Some(archive) = field.archive().filter(|a| a.has_info()) {
                metadata.insert(name, ArchiveEntry::Archive(archive.clone()));
                continue;
            }
            if let Some(nested) = field.annotation().nested_model() {
                let nested = nested.archive_metadata();
                if !nested.is_empty() {
                    metadata.insert(name, ArchiveEntry::Nested(nested));
                }
            }
        }
        metadata
    }
}

/// Builder returned by [`ModelSchema::builder`].
#[derive(Debug)]
pub struct SchemaBuilder {
    name: String,
    version: String,
    tagged: bool,
    description: Option<String>,
    fields: Vec<FieldSpec>,
}

impl SchemaBuilder {
    /// Marks instances as tagged: independently serializable by the container format.
    #[must_use]
    pub const fn tagged(mut self) -> Self {
        self.tagged = true;
        self
    }

    #[must_use]
    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    #[must_use]
    pub fn field(mut self, field: FieldSpec) -> Self {
        self.fields.push(field);
        self
    }

    /// Finishes the declaration.
    ///
    /// # Panics
    ///
    /// Panics if two fields share a name or alias. Schemas are static
    /// declarations, so this is a programming error.
    #[must_use]
    pub fn build(self) -> Arc<ModelSchema> {
        let mut index = HashMap::with_capacity(self.fields.len() * 2);
        for (i, field) in self.fields.iter().enumerate() {
            for key in std::iter::once(field.name()).chain(field.alias()) {
                let previous = index.insert(key.to_string(), i);
                assert!(
                    previous.is_none_or(|p| p == i),
                    "duplicate field {key:?} in schema {}",
                    self.name
                );
            }
        }
        let tag = self
            .tagged
            .then(|| format!("{TAG_PREFIX}/{}-{}", self.name, self.version));
        Arc::new(ModelSchema {
            name: self.name,
            version: self.version,
            tag,
            description: self.description,
            fields: self.fields,
            index,
        })
    }
}
