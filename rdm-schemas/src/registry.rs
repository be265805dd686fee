//! Lookup of the schemas this crate declares.

use crate::basic::BASIC;
use crate::exposure::{EXPOSURE, OBSERVATION};
use crate::image::{IMAGE_META, RESAMPLE, SOURCE_CATALOG, WFI_IMAGE};
use crate::reference::{DISTORTION_REF, PHOT_ENTRY, REF_META, WFI_IMG_PHOTOM};
use indexmap::IndexMap;
use rdm_model::ModelSchema;
use std::sync::{Arc, LazyLock};
use tracing::debug;

static REGISTRY: LazyLock<IndexMap<String, Arc<ModelSchema>>> = LazyLock::new(|| {
    let schemas = [
        &BASIC,
        &EXPOSURE,
        &OBSERVATION,
        &SOURCE_CATALOG,
        &RESAMPLE,
        &IMAGE_META,
        &WFI_IMAGE,
        &REF_META,
        &PHOT_ENTRY,
        &WFI_IMG_PHOTOM,
        &DISTORTION_REF,
    ];
    let registry: IndexMap<_, _> = schemas
        .into_iter()
        .map(|schema| (schema.name().to_string(), Arc::clone(&**schema)))
        .collect();
    debug!(count = registry.len(), "schema registry initialized");
    registry
});

/// Every declared schema, in dependency order.
pub fn all() -> impl Iterator<Item = &'static Arc<ModelSchema>> {
    REGISTRY.values()
}

/// Only the tagged schemas: the ones that are products on their own.
pub fn tagged() -> impl Iterator<Item = &'static Arc<ModelSchema>> {
    all().filter(|schema| schema.is_tagged())
}

/// Looks a schema up by name (`wfi_image`) or by URI.
#[must_use]
pub fn by_name(name: &str) -> Option<&'static Arc<ModelSchema>> {
    REGISTRY
        .get(name)
        .or_else(|| REGISTRY.values().find(|schema| schema.uri() == name))
}
