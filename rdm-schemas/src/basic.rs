//! Basic file-level metadata carried by every product.

use crate::enums;
use rdm_model::{
    Archive, DefaultArgs, Dict, FieldSpec, ModelSchema, TimeAdaptor, TypeExpr, Value, NOFN, NOSTR,
};
use rdm_types::Time;
use std::sync::{Arc, LazyLock};

fn sdf(column: &str, datatype: &str) -> Archive {
    let science = format!("ScienceCommon.{column}");
    let guide = format!("GuideWindow.{column}");
    Archive::default()
        .with_origin("TBD")
        .with_datatype(datatype)
        .with_destination(&[science.as_str(), guide.as_str()])
}

pub static BASIC: LazyLock<Arc<ModelSchema>> = LazyLock::new(|| {
    ModelSchema::builder("basic", "1.0.0")
        .description("Basic metadata common to all Roman files")
        .field(
            FieldSpec::new("calibration_software_name", TypeExpr::Str)
                .with_archive(sdf("calibration_software_name", "nvarchar(120)")),
        )
        .field(
            FieldSpec::new("calibration_software_version", TypeExpr::Str)
                .with_archive(sdf("calibration_software_version", "nvarchar(120)")),
        )
        .field(FieldSpec::new("product_type", TypeExpr::Str).with_archive(sdf("product_type", "nvarchar(50)")))
        .field(
            FieldSpec::new("filename", TypeExpr::Str)
                .with_description("Name of the file at creation time")
                .with_archive(
                    Archive::default()
                        .with_origin("TBD")
                        .with_datatype("nvarchar(120)")
                        .with_destination(&["ScienceCommon.filename", "GuideWindow.filename"])
                        .with_special_processing("VALUE_REQUIRED"),
                ),
        )
        .field(FieldSpec::new("file_date", TypeExpr::custom(TimeAdaptor)).with_archive(sdf("file_date", "datetime2")))
        .field(FieldSpec::new("model_type", TypeExpr::Str).with_archive(sdf("model_type", "nvarchar(50)")))
        .field(FieldSpec::new("origin", TypeExpr::enumeration(enums::origin())).with_archive(sdf("origin", "nvarchar(15)")))
        .field(FieldSpec::new("prd_version", TypeExpr::Str).with_archive(sdf("prd_version", "nvarchar(120)")))
        .field(
            FieldSpec::new("sdf_software_version", TypeExpr::Str)
                .with_archive(sdf("sdf_software_version", "nvarchar(120)")),
        )
        .field(
            FieldSpec::new("telescope", TypeExpr::enumeration(enums::telescope()))
                .with_archive(sdf("telescope", "nvarchar(5)")),
        )
        .build()
});

/// Basic metadata with values that read like a real product.
///
/// Every key can be overridden through `args`. Meant to be passed as the
/// `data` of `make_default`.
#[must_use]
pub fn mk_basic_meta(args: &DefaultArgs) -> Dict {
    let defaults: [(&str, Value); 10] = [
        ("calibration_software_name", "RomanCAL".into()),
        ("calibration_software_version", "9.9.0".into()),
        ("product_type", "l2".into()),
        ("filename", NOFN.into()),
        ("file_date", Time::reference_epoch().into()),
        ("model_type", NOSTR.into()),
        ("origin", "STSCI/SOC".into()),
        ("prd_version", "8.8.8".into()),
        ("sdf_software_version", "7.7.7".into()),
        ("telescope", "ROMAN".into()),
    ];
    defaults
        .into_iter()
        .map(|(key, fallback)| (key.to_string(), args.get_or(key, fallback)))
        .collect()
}
