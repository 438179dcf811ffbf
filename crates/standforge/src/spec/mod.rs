//! Dimensional spec: data model, raw form input, and the spec generator.
//!
//! Purpose
//! - `Spec` is the single, fully populated description of a stand, its
//!   product, and the per-shelf arrangement. Builders and the contract read
//!   only this.
//! - `generate` resolves every default in one place, including the floor
//!   height auto-scale rule.

pub mod form;
mod generate;
mod types;

pub use form::{FormData, DEFAULT_STAND_TYPE};
pub use generate::{
    floor_autoscale_height, generate_spec_from_form_data, generate_spec_with_defaults,
    SpecDefaults,
};
pub use types::{used_depth_cm, Layout, ProductDims, Spec, SpecError, SpecMetadata, StandDims};
