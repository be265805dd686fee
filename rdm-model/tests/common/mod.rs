//! Shared schemas for engine tests.

#![allow(dead_code)]

use rdm_model::{
    Archive, ArrayAdaptor, EnumType, FieldSpec, ModelSchema, TimeAdaptor, TypeExpr,
};
use rdm_types::DType;
use std::sync::{Arc, LazyLock};

/// `{name: str, count: int, tags: list}`.
pub static EXAMPLE: LazyLock<Arc<ModelSchema>> = LazyLock::new(|| {
    ModelSchema::builder("example", "1.0.0")
        .field(FieldSpec::new("name", TypeExpr::Str))
        .field(FieldSpec::new("count", TypeExpr::Int))
        .field(FieldSpec::new("tags", TypeExpr::bare_list()))
        .build()
});

/// A model whose fields carry no archive hints.
pub static PLAIN: LazyLock<Arc<ModelSchema>> = LazyLock::new(|| {
    ModelSchema::builder("plain", "1.0.0")
        .field(FieldSpec::new("comment", TypeExpr::Str))
        .field(FieldSpec::optional("weight", TypeExpr::Float))
        .build()
});

pub fn exposure_type() -> EnumType {
    EnumType::of_strings("ExposureType", &["WFI_IMAGE", "WFI_GRISM", "WFI_PRISM", "WFI_DARK"])
}

pub static EXPOSURE: LazyLock<Arc<ModelSchema>> = LazyLock::new(|| {
    ModelSchema::builder("exposure", "1.0.0")
        .field(
            FieldSpec::new("type_", TypeExpr::enumeration(exposure_type())).with_archive(
                Archive::default()
                    .with_origin("PSS:dms_data.exposure_type")
                    .with_datatype("nvarchar(25)")
                    .with_destination(&["WFIExposure.exposure_type"]),
            ),
        )
        .field(
            FieldSpec::new("start_time", TypeExpr::custom(TimeAdaptor)).with_archive(
                Archive::default()
                    .with_origin("TBD")
                    .with_datatype("datetime2")
                    .with_destination(&["WFIExposure.exposure_start_time"]),
            ),
        )
        .field(FieldSpec::new("nresultants", TypeExpr::Int))
        .field(FieldSpec::new("read_pattern", TypeExpr::list(TypeExpr::list(TypeExpr::Int))))
        .field(FieldSpec::optional("truncated", TypeExpr::Bool))
        .field(FieldSpec::new("exposure_time", TypeExpr::Float))
        .build()
});

pub static OBSERVATION: LazyLock<Arc<ModelSchema>> = LazyLock::new(|| {
    ModelSchema::builder("observation", "1.0.0")
        .field(FieldSpec::new("program", TypeExpr::Str).with_archive(
            Archive::default()
                .with_origin("PSS:dms_data.program")
                .with_destination(&["WFIExposure.program", "GuideWindow.program"]),
        ))
        .field(FieldSpec::new("pass_", TypeExpr::Int))
        .field(FieldSpec::new("visit", TypeExpr::Int))
        .build()
});

/// Untagged container of the exposure and observation blocks.
pub static META: LazyLock<Arc<ModelSchema>> = LazyLock::new(|| {
    ModelSchema::builder("meta", "1.0.0")
        .field(FieldSpec::new("filename", TypeExpr::Str).with_default("none"))
        .field(FieldSpec::new("exposure", TypeExpr::model(&EXPOSURE)))
        .field(FieldSpec::new("observation", TypeExpr::model(&OBSERVATION)))
        .field(FieldSpec::new("notes", TypeExpr::model(&PLAIN)))
        .build()
});

pub static IMAGE: LazyLock<Arc<ModelSchema>> = LazyLock::new(|| {
    ModelSchema::builder("wfi_image", "1.0.0")
        .tagged()
        .field(FieldSpec::new("meta", TypeExpr::model(&META)))
        .field(FieldSpec::new("data", TypeExpr::custom(ArrayAdaptor::new(DType::F32, 2))))
        .field(FieldSpec::new("dq", TypeExpr::custom(ArrayAdaptor::new(DType::U32, 2))))
        .field(FieldSpec::new("cal_logs", TypeExpr::list(TypeExpr::Str)))
        .build()
});

pub static PHOT_ENTRY: LazyLock<Arc<ModelSchema>> = LazyLock::new(|| {
    ModelSchema::builder("phot_entry", "1.0.0")
        .field(FieldSpec::optional("photmjsr", TypeExpr::Float))
        .field(FieldSpec::optional("uncertainty", TypeExpr::Float))
        .build()
});

pub static PHOTOMETRY: LazyLock<Arc<ModelSchema>> = LazyLock::new(|| {
    ModelSchema::builder("wfi_img_photom", "1.0.0")
        .tagged()
        .field(FieldSpec::new(
            "phot_table",
            TypeExpr::dict(TypeExpr::Str, TypeExpr::model(&PHOT_ENTRY)),
        ))
        .build()
});

pub static DISTORTION: LazyLock<Arc<ModelSchema>> = LazyLock::new(|| {
    ModelSchema::builder("distortion", "1.0.0")
        .tagged()
        .field(FieldSpec::new("coordinate_distortion_transform", TypeExpr::Transform))
        .field(FieldSpec::new("comment", TypeExpr::Str))
        .build()
});

/// Untagged product that embeds a tagged reference model.
pub static PRODUCT: LazyLock<Arc<ModelSchema>> = LazyLock::new(|| {
    ModelSchema::builder("product", "1.0.0")
        .field(FieldSpec::new("name", TypeExpr::Str))
        .field(FieldSpec::new("reference", TypeExpr::model(&DISTORTION)))
        .field(FieldSpec::new("exposure", TypeExpr::model(&EXPOSURE)))
        .build()
});
