//! Calibrated WFI image products.

use crate::basic::BASIC;
use crate::enums;
use crate::exposure::{EXPOSURE, OBSERVATION};
use rdm_model::{ArrayAdaptor, FieldSpec, ModelSchema, TypeExpr};
use rdm_types::DType;
use std::sync::{Arc, LazyLock};

/// Catalog produced for the tweakreg step.
pub static SOURCE_CATALOG: LazyLock<Arc<ModelSchema>> = LazyLock::new(|| {
    ModelSchema::builder("source_catalog", "1.0.0")
        .field(FieldSpec::new("tweakreg_catalog_name", TypeExpr::Str))
        .build()
});

/// Parameters of the resample step.
pub static RESAMPLE: LazyLock<Arc<ModelSchema>> = LazyLock::new(|| {
    ModelSchema::builder("resample", "1.0.0")
        .field(FieldSpec::new("good_bits", TypeExpr::Str))
        .field(FieldSpec::new("pixel_scale_ratio", TypeExpr::Float))
        .field(FieldSpec::new("pixfrac", TypeExpr::Float))
        .field(FieldSpec::new("pointings", TypeExpr::Int))
        .field(FieldSpec::new("product_exposure_time", TypeExpr::Float))
        .field(FieldSpec::new("weight_type", TypeExpr::enumeration(enums::weight_type())))
        .field(FieldSpec::new("members", TypeExpr::list(TypeExpr::Str)))
        .build()
});

pub static IMAGE_META: LazyLock<Arc<ModelSchema>> = LazyLock::new(|| {
    ModelSchema::builder("wfi_image_meta", "1.0.0")
        .field(FieldSpec::new("basic", TypeExpr::model(&BASIC)))
        .field(FieldSpec::new("exposure", TypeExpr::model(&EXPOSURE)))
        .field(FieldSpec::new("observation", TypeExpr::model(&OBSERVATION)))
        .field(FieldSpec::optional("source_catalog", TypeExpr::model(&SOURCE_CATALOG)))
        .field(FieldSpec::optional("resample", TypeExpr::model(&RESAMPLE)))
        .build()
});

/// Level 2 calibrated image.
pub static WFI_IMAGE: LazyLock<Arc<ModelSchema>> = LazyLock::new(|| {
    let image = || TypeExpr::custom(ArrayAdaptor::new(DType::F32, 2));
    ModelSchema::builder("wfi_image", "1.0.0")
        .tagged()
        .description("Calibrated WFI image")
        .field(FieldSpec::new("meta", TypeExpr::model(&IMAGE_META)))
        .field(FieldSpec::new("data", image()))
        .field(FieldSpec::new("dq", TypeExpr::custom(ArrayAdaptor::new(DType::U32, 2))))
        .field(FieldSpec::new("err", image()))
        .field(FieldSpec::new("var_poisson", image()))
        .field(FieldSpec::new("var_rnoise", image()))
        .field(FieldSpec::new("amp33", TypeExpr::custom(ArrayAdaptor::new(DType::U16, 3))))
        .field(FieldSpec::new("cal_logs", TypeExpr::list(TypeExpr::Str)))
        .build()
});
