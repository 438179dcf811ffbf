//! Curated entry points for callers that want the whole pipeline.
//!
//! `generate` runs form → spec → {contract, build} → validation in one call.
//! Reach into the modules directly for anything finer grained.

// Spec
pub use crate::spec::{
    floor_autoscale_height, generate_spec_from_form_data, generate_spec_with_defaults, FormData,
    Layout, ProductDims, Spec, SpecDefaults, SpecError, SpecMetadata, StandDims,
};
// Contract
pub use crate::contract::{
    drift_report, generate_contract, validate_built_geometry, Contract, Drift, DriftField,
};
// Layout
pub use crate::layout::{grid_cells, plan_tiers, tier_scale, GridCell, GridParams, TierPlan};
// Stands
pub use crate::stand::{
    build_stand, build_stand_group, build_stand_group_with, ArchetypeExtras, BuildOptions,
    BuiltStand, GeometryMetadata, StandSpec, StandTag, StandType, TierSummary,
};
// Surfaces and annotation
pub use crate::annotate::{dimension_line, stand_dimension_lines, DimensionLine, Tick};
pub use crate::materials::{Material, MaterialParams, MaterialSet, SurfaceRole};
pub use crate::surface::{normal_variation, roughness_variation, SurfaceCfg, SurfaceSeed};

use serde::Serialize;

/// One pipeline run.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Generation {
    pub spec: Spec,
    pub contract: Contract,
    pub built: BuiltStand,
    /// Validator verdict for `built` against `spec`.
    pub valid: bool,
}

/// Form to validated geometry with the current clock and entropy surfaces.
pub fn generate(form: &FormData) -> Generation {
    generate_with(form, &BuildOptions::default())
}

pub fn generate_with(form: &FormData, opts: &BuildOptions) -> Generation {
    let spec = generate_spec_from_form_data(form);
    let contract = generate_contract(&spec);
    let built = build_stand_group_with(&spec, form, opts);
    let valid = validate_built_geometry(&built, &spec);
    Generation {
        spec,
        contract,
        built,
        valid,
    }
}
