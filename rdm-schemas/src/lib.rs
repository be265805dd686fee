//! Concrete Roman data product schemas.
//!
//! Declares a representative slice of the Roman schema tree on top of
//! `rdm-model`:
//! - [`BASIC`], [`EXPOSURE`], [`OBSERVATION`] — metadata blocks shared by products
//! - [`WFI_IMAGE`] — the tagged level 2 image, with its [`IMAGE_META`]
//! - [`WFI_IMG_PHOTOM`], [`DISTORTION_REF`] — tagged reference files
//! - [`mk_basic_meta`] — realistic basic metadata to merge over synthesized defaults
//!
//! Schemas are built on first use and shared. Use [`registry`] to iterate
//! over all of them or to look one up by name.

mod basic;
pub mod enums;
mod exposure;
mod image;
mod reference;
pub mod registry;

pub use basic::{mk_basic_meta, BASIC};
pub use exposure::{EXPOSURE, OBSERVATION};
pub use image::{IMAGE_META, RESAMPLE, SOURCE_CATALOG, WFI_IMAGE};
pub use reference::{DISTORTION_REF, PHOT_ENTRY, REF_META, WFI_IMG_PHOTOM};
