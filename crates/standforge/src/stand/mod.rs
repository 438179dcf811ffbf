//! Stand archetypes: the factory and the six builders.
//!
//! Purpose
//! - One entry point, `build_stand_group`, turns a `Spec` plus the raw form
//!   into a `BuiltStand`: node tree, metadata echo, material set.
//!
//! Model
//! - The form's `standType` label resolves by exact match to a `StandType`.
//!   Unrecognized labels log a warning and build as a tabletop; the label is
//!   still echoed verbatim into metadata.
//! - Builders are pure functions of `StandSpec`. Clock and surface rng enter
//!   only through `BuildOptions`, so `build_stand_group_with` with a fixed
//!   timestamp and seed is fully reproducible.
//! - A spec that breaks the depth-fit invariant is built as given and logged.

mod builders;
mod types;

pub use types::{
    ArchetypeExtras, BuildOptions, BuiltStand, GeometryMetadata, StandSpec, StandTag, StandType,
    TierSummary,
};

use crate::spec::{FormData, Spec};
use builders::{corner, floor, multi_tier, rotating, tabletop, wall_mount};

/// Build with the current time and entropy-seeded surface detail.
pub fn build_stand_group(spec: &Spec, form: &FormData) -> BuiltStand {
    build_stand_group_with(spec, form, &BuildOptions::default())
}

pub fn build_stand_group_with(spec: &Spec, form: &FormData, opts: &BuildOptions) -> BuiltStand {
    build_stand(&StandSpec::new(spec.clone(), form), opts)
}

/// Dispatch an already-resolved `StandSpec`.
pub fn build_stand(stand: &StandSpec, opts: &BuildOptions) -> BuiltStand {
    if let Err(err) = stand.spec.check() {
        tracing::warn!(%err, stand_type = stand.tag.label(), "building spec that fails its checks");
    }
    let asm = match &stand.tag {
        StandTag::Known(kind) => match kind {
            StandType::Tabletop => tabletop::assemble(stand),
            StandType::Floor => floor::assemble(stand),
            StandType::WallMount => wall_mount::assemble(stand),
            StandType::Corner => corner::assemble(stand),
            StandType::Rotating => rotating::assemble(stand),
            StandType::MultiTier => multi_tier::assemble(stand),
        },
        StandTag::Unknown(label) => {
            tracing::warn!(stand_type = %label, "unknown stand type, building tabletop");
            tabletop::assemble(stand)
        }
    };
    tracing::debug!(
        stand_type = stand.tag.label(),
        shelves = stand.shelf_count,
        nodes = asm.root.walk().len(),
        total_products = asm.total_products,
        "stand assembled"
    );
    builders::finish(stand, asm, opts)
}
