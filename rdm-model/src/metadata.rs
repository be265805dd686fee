//! Archive metadata attached to schema fields.
//!
//! Schemas annotate fields with hints for the archive catalog: where a
//! value comes from, which standard it follows, where it is stored. The
//! descriptors are pure data; the only behavior is [`Archive::has_info`].

use crate::error::ModelResult;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Archive hints for one field.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Archive {
    /// Where the value originates (`TBD`, `SDF`, `PSS:dms_data.filename`, ...).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub origin: Option<String>,
    /// Standard the value conforms to.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub standard: Option<String>,
    /// Archive column type (`nvarchar(120)`, `float`, ...).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub datatype: Option<String>,
    /// Archive tables the value is copied into.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub destination: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub special_processing: Option<String>,
    /// Set when the value is entered by hand rather than by the pipeline.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub manual: Option<bool>,
}

impl Archive {
    /// Parses the extra keys a schema attaches to a field. `None` gives an empty descriptor.
    pub fn from_extra(extra: Option<&serde_json::Value>) -> ModelResult<Self> {
        match extra {
            Some(value) => Ok(serde_json::from_value(value.clone())?),
            None => Ok(Self::default()),
        }
    }

    /// Returns true if at least one key is populated.
    #[must_use]
    pub fn has_info(&self) -> bool {
        self.origin.is_some()
            || self.standard.is_some()
            || self.datatype.is_some()
            || !self.destination.is_empty()
            || self.special_processing.is_some()
            || self.manual.is_some()
    }

    #[must_use]
    pub fn with_origin(mut self, origin: impl Into<String>) -> Self {
        self.origin = Some(origin.into());
        self
    }

    #[must_use]
    pub fn with_standard(mut self, standard: impl Into<String>) -> Self {
        self.standard = Some(standard.into());
        self
    }

    #[must_use]
    pub fn with_datatype(mut self, datatype: impl Into<String>) -> Self {
        self.datatype = Some(datatype.into());
        self
    }

    #[must_use]
    pub fn with_destination(mut self, tables: &[&str]) -> Self {
        self.destination = tables.iter().map(|t| (*t).to_string()).collect();
        self
    }

    #[must_use]
    pub fn with_special_processing(mut self, note: impl Into<String>) -> Self {
        self.special_processing = Some(note.into());
        self
    }

    #[must_use]
    pub const fn manual(mut self) -> Self {
        self.manual = Some(true);
        self
    }
}

/// Archive metadata for a model, keyed by external field name.
pub type ArchiveMetadata = IndexMap<String, ArchiveEntry>;

/// Either a field's own descriptor or the metadata of the model it holds.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum ArchiveEntry {
    Archive(Archive),
    Nested(ArchiveMetadata),
}

impl ArchiveEntry {
    #[must_use]
    pub const fn as_archive(&self) -> Option<&Archive> {
        match self {
            Self::Archive(a) => Some(a),
            Self::Nested(_) => None,
        }
    }

    #[must_use]
    pub const fn as_nested(&self) -> Option<&ArchiveMetadata> {
        match self {
            Self::Nested(m) => Some(m),
            Self::Archive(_) => None,
        }
    }
}
