//! Model introspection and default synthesis for Roman data models.
//!
//! Defines the machinery every concrete data model is built on:
//! - [`ModelSchema`] / [`FieldSpec`] — declared fields, aliases, static defaults, archive metadata
//! - [`TypeExpr`] — field annotations, with the resolver that strips `Optional` and exposes containers
//! - [`DataModel`] — a live, validated instance (get/set, copy, tree and flat views)
//! - [`Synthesizer`] — builds schema-valid default instances and merges caller overrides
//! - [`ValidationPause`] — scoped suspension of assignment checks for batches of writes
//! - [`Adaptor`] — strategy trait for field types the generic rules cannot handle
//!
//! Concrete schemas live in `rdm-schemas`; leaf value types in `rdm-types`.

mod adaptor;
pub mod alias;
mod annotation;
mod config;
mod defaults;
mod error;
mod flat;
mod metadata;
mod model;
mod pause;
mod schema;
mod tree;
mod validate;
mod value;

pub use adaptor::{Adaptor, ArrayAdaptor, DefaultArgs, TimeAdaptor};
pub use annotation::{Container, EnumType, TypeExpr};
pub use config::{ModelConfig, NOFN, NONUM, NOSTR};
pub use defaults::{merge_dicts, special_cases, Synthesizer, PHOT_TABLE_KEYS};
pub use error::{FieldError, ModelError, ModelResult, ValidationError};
pub use flat::FlatItems;
pub use metadata::{Archive, ArchiveEntry, ArchiveMetadata};
pub use model::DataModel;
pub use pause::{PauseOptions, ValidationPause};
pub use schema::{FieldSpec, ModelSchema, SchemaBuilder};
pub use value::{Dict, EnumMember, Value};
