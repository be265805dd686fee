//! Reference files used by calibration steps.

use crate::basic::BASIC;
use rdm_model::{FieldSpec, ModelSchema, TimeAdaptor, TypeExpr};
use std::sync::{Arc, LazyLock};

/// Metadata common to reference files.
pub static REF_META: LazyLock<Arc<ModelSchema>> = LazyLock::new(|| {
    ModelSchema::builder("ref_common", "1.0.0")
        .field(FieldSpec::new("basic", TypeExpr::model(&BASIC)))
        .field(FieldSpec::new("reftype", TypeExpr::Str))
        .field(FieldSpec::new("pedigree", TypeExpr::Str))
        .field(FieldSpec::new("description", TypeExpr::Str))
        .field(FieldSpec::new("author", TypeExpr::Str))
        .field(FieldSpec::new("useafter", TypeExpr::custom(TimeAdaptor)))
        .build()
});

/// One row of the photometry table. Values may be null for elements without a calibration.
pub static PHOT_ENTRY: LazyLock<Arc<ModelSchema>> = LazyLock::new(|| {
    ModelSchema::builder("phot_entry", "1.0.0")
        .field(FieldSpec::optional("photmjsr", TypeExpr::Float))
        .field(FieldSpec::optional("uncertainty", TypeExpr::Float))
        .field(FieldSpec::optional("pixelareasr", TypeExpr::Float))
        .build()
});

/// Photometric conversion factors per optical element.
pub static WFI_IMG_PHOTOM: LazyLock<Arc<ModelSchema>> = LazyLock::new(|| {
    ModelSchema::builder("wfi_img_photom", "1.0.0")
        .tagged()
        .field(FieldSpec::new("meta", TypeExpr::model(&REF_META)))
        .field(FieldSpec::new(
            "phot_table",
            TypeExpr::dict(TypeExpr::Str, TypeExpr::model(&PHOT_ENTRY)),
        ))
        .build()
});

/// Coordinate distortion reference.
pub static DISTORTION_REF: LazyLock<Arc<ModelSchema>> = LazyLock::new(|| {
    ModelSchema::builder("distortion", "1.0.0")
        .tagged()
        .field(FieldSpec::new("meta", TypeExpr::model(&REF_META)))
        .field(FieldSpec::new("coordinate_distortion_transform", TypeExpr::Transform))
        .field(FieldSpec::new("input_units", TypeExpr::Str))
        .field(FieldSpec::new("output_units", TypeExpr::Str))
        .build()
});
