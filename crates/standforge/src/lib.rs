//! Parametric display-stand geometry.
//!
//! Form input resolves to a `Spec`; the spec yields both a `Contract` (the
//! dimensional promise for downstream stages) and a `BuiltStand` (node tree
//! plus metadata) from one of six archetype builders. The contract validator
//! certifies that what was built is what was promised.
//!
//! Conventions
//! - Centimeters throughout. Y up, X across the stand front, +Z toward the viewer.
//! - Everything is synchronous and pure except the clock stamp and the
//!   surface-detail rng, both injectable through `BuildOptions`.

pub mod annotate;
pub mod api;
pub mod cfg;
pub mod contract;
pub mod layout;
pub mod materials;
pub mod scene;
pub mod spec;
pub mod stand;
pub mod surface;

/// Library version string.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub use contract::{generate_contract, validate_built_geometry, Contract};
pub use spec::{generate_spec_from_form_data, FormData, Spec};
pub use stand::{build_stand_group, build_stand_group_with, BuildOptions, BuiltStand, StandType};

/// Common exports for quick imports in callers.
pub mod prelude {
    pub use crate::annotate::{dimension_line, stand_dimension_lines, DimensionLine};
    pub use crate::contract::{
        drift_report, generate_contract, validate_built_geometry, Contract, Drift,
    };
    pub use crate::scene::{Aabb, Node, NodeKind, Shape, Transform};
    pub use crate::spec::{
        generate_spec_from_form_data, FormData, Layout, ProductDims, Spec, StandDims,
    };
    pub use crate::stand::{
        build_stand_group, build_stand_group_with, BuildOptions, BuiltStand, GeometryMetadata,
        StandType,
    };
    pub use nalgebra::Vector3 as Vec3;
}
