//! Exposure and observation blocks of level 1 and 2 metadata.

use crate::enums;
use rdm_model::{Archive, FieldSpec, ModelSchema, TimeAdaptor, TypeExpr};
use std::sync::{Arc, LazyLock};

fn exposure_column(column: &str, datatype: &str) -> Archive {
    let destination = format!("WFIExposure.exposure_{column}");
    Archive::default()
        .with_origin("TBD")
        .with_datatype(datatype)
        .with_destination(&[destination.as_str()])
}

pub static EXPOSURE: LazyLock<Arc<ModelSchema>> = LazyLock::new(|| {
    ModelSchema::builder("exposure", "1.0.0")
        .description("Exposure information")
        .field(
            FieldSpec::new("type_", TypeExpr::enumeration(enums::exposure_type()))
                .with_archive(exposure_column("type", "nvarchar(25)")),
        )
        .field(
            FieldSpec::new("start_time", TypeExpr::custom(TimeAdaptor))
                .with_archive(exposure_column("start_time", "datetime2")),
        )
        .field(
            FieldSpec::new("end_time", TypeExpr::custom(TimeAdaptor))
                .with_archive(exposure_column("end_time", "datetime2")),
        )
        .field(FieldSpec::new("nresultants", TypeExpr::Int).with_archive(exposure_column("nresultants", "int")))
        .field(FieldSpec::new("frame_time", TypeExpr::Float))
        .field(FieldSpec::new("exposure_time", TypeExpr::Float))
        .field(FieldSpec::new("effective_exposure_time", TypeExpr::Float))
        .field(FieldSpec::new("ma_table_name", TypeExpr::Str).with_archive(exposure_column("ma_table_name", "nvarchar(100)")))
        .field(FieldSpec::new("ma_table_number", TypeExpr::Int))
        .field(
            FieldSpec::new("read_pattern", TypeExpr::list(TypeExpr::list(TypeExpr::Int)))
                .with_description("Reads that make up each resultant"),
        )
        .field(FieldSpec::new("truncated", TypeExpr::Bool))
        .field(
            FieldSpec::new("p_exptype", TypeExpr::Str)
                .with_description("Exposure types a reference file applies to, `|`-separated"),
        )
        .build()
});

pub static OBSERVATION: LazyLock<Arc<ModelSchema>> = LazyLock::new(|| {
    let science = |column: &str| {
        let destination = format!("WFIExposure.{column}");
        Archive::default()
            .with_origin("PSS:dms_data")
            .with_datatype("int")
            .with_destination(&[destination.as_str()])
    };
    ModelSchema::builder("observation", "1.0.0")
        .description("Observation identifiers")
        .field(FieldSpec::new("observation_id", TypeExpr::Str))
        .field(FieldSpec::new("visit_id", TypeExpr::Str))
        .field(FieldSpec::new("program", TypeExpr::Int).with_archive(science("program")))
        .field(FieldSpec::new("execution_plan", TypeExpr::Int).with_archive(science("execution_plan")))
        .field(FieldSpec::new("pass_", TypeExpr::Int).with_archive(science("pass")))
        .field(FieldSpec::new("segment", TypeExpr::Int).with_archive(science("segment")))
        .field(FieldSpec::new("observation", TypeExpr::Int).with_archive(science("observation")))
        .field(FieldSpec::new("visit", TypeExpr::Int).with_archive(science("visit")))
        .field(FieldSpec::new("visit_file_group", TypeExpr::Int))
        .field(FieldSpec::new("visit_file_sequence", TypeExpr::Int))
        .field(FieldSpec::new("visit_file_activity", TypeExpr::Str))
        .field(FieldSpec::new("exposure", TypeExpr::Int).with_archive(science("exposure")))
        .build()
});
