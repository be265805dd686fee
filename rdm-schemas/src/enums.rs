//! Enumerations shared across schemas.

use rdm_model::EnumType;

/// Observatory a product was taken with.
#[must_use]
pub fn telescope() -> EnumType {
    EnumType::of_strings("Telescope", &["ROMAN"])
}

/// Institution that produced a file.
#[must_use]
pub fn origin() -> EnumType {
    EnumType::of_strings("Origin", &["STSCI/SOC", "STSCI", "IPAC/SSC"])
}

/// WFI exposure modes.
#[must_use]
pub fn exposure_type() -> EnumType {
    EnumType::of_strings(
        "ExposureType",
        &[
            "WFI_IMAGE",
            "WFI_GRISM",
            "WFI_PRISM",
            "WFI_DARK",
            "WFI_FLAT",
            "WFI_WFSC",
        ],
    )
}

/// Pixel weighting used when resampling.
#[must_use]
pub fn weight_type() -> EnumType {
    EnumType::of_strings("WeightType", &["exptime", "ivm"])
}
