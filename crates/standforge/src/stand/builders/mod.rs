//! Archetype builders.
//!
//! Each builder is a pure function of a `StandSpec` returning an `Assembly`
//! (node tree, product total, archetype extras). `finish` stamps time and
//! materials onto it, so only the factory touches the clock or the rng.

pub(crate) mod corner;
pub(crate) mod floor;
pub(crate) mod multi_tier;
pub(crate) mod rotating;
pub(crate) mod tabletop;
pub(crate) mod wall_mount;

use chrono::Utc;
use nalgebra::Vector3;

use super::types::{ArchetypeExtras, BuildOptions, BuiltStand, GeometryMetadata, StandSpec};
use crate::layout::{grid_cells, GridParams};
use crate::materials::{MaterialSet, SurfaceRole};
use crate::scene::{Node, NodeKind, ProductSlot, Shape, Transform};

/// Name of every archetype's root group.
pub(crate) const ROOT_NAME: &str = "display-stand";

pub(crate) struct Assembly {
    pub root: Node,
    pub total_products: u32,
    pub extras: ArchetypeExtras,
    pub tier_count: Option<u32>,
}

pub(crate) fn finish(stand: &StandSpec, asm: Assembly, opts: &BuildOptions) -> BuiltStand {
    let generated_at = opts.generated_at.unwrap_or_else(Utc::now);
    let materials = MaterialSet::generate(&opts.surface, opts.surface_seed);
    let mut metadata = GeometryMetadata::new(stand, asm.total_products, generated_at, asm.extras);
    metadata.tier_count = asm.tier_count;
    BuiltStand {
        root: asm.root,
        metadata,
        materials,
    }
}

/// Grid parameters for a surface carrying the stand's full arrangement.
pub(crate) fn full_grid(stand: &StandSpec, surface_depth: f64, front_inset: f64) -> GridParams {
    let layout = stand.layout();
    GridParams {
        front_face_count: layout.columns,
        back_to_back_count: layout.depth_count,
        product: *stand.product(),
        gaps_depth: layout.gaps_depth,
        surface_depth,
        front_inset,
    }
}

/// Product boxes resting on a board centered at `(origin.x, shelf_y, origin.z)`.
pub(crate) fn products_on(
    level: u32,
    grid: &GridParams,
    shelf_y: f64,
    thickness: f64,
    origin: Vector3<f64>,
) -> impl Iterator<Item = Node> + '_ {
    let shape = Shape::cuboid(grid.product.width, grid.product.height, grid.product.depth);
    grid_cells(grid, shelf_y, thickness).into_iter().map(move |cell| {
        let c = origin + cell.center;
        Node::solid(
            format!("product-{level}-{}-{}", cell.row, cell.depth_index),
            NodeKind::Product,
            shape,
            SurfaceRole::Product,
            Transform::at(c.x, c.y, c.z),
        )
        .with_slot(ProductSlot {
            level,
            row: cell.row,
            depth_index: cell.depth_index,
        })
    })
}

/// Horizontal board centered at `(0, y, 0)`.
pub(crate) fn board(
    name: String,
    kind: NodeKind,
    width: f64,
    thickness: f64,
    depth: f64,
    y: f64,
) -> Node {
    Node::solid(
        name,
        kind,
        Shape::cuboid(width, thickness, depth),
        SurfaceRole::Tray,
        Transform::at(0.0, y, 0.0),
    )
}

/// Structural box centered at `at`.
pub(crate) fn structure(name: &str, kind: NodeKind, size: Vector3<f64>, at: Vector3<f64>) -> Node {
    Node::solid(
        name,
        kind,
        Shape::cuboid(size.x, size.y, size.z),
        SurfaceRole::Structure,
        Transform::at(at.x, at.y, at.z),
    )
}
