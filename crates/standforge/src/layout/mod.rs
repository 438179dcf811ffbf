//! Grid layout: front-face × back-to-back product placement on one surface.
//!
//! Purpose
//! - One placement rule shared by every builder, so an arrangement means the
//!   same thing on a tabletop shelf, a floor shelf, or a tier.
//!
//! Model (surface-local coordinates, surface centered at x = z = 0)
//! - Row i:   `x = -((ff - 1) * pw) / 2 + i * pw` (group centered).
//! - Depth j: `z = surface_depth / 2 - pd / 2 - front_inset - j * (pd + gap)`
//!   (foremost product flush with the front edge, minus the inset used by
//!   archetypes with front pillars).
//! - Vertical: `y = shelf_y + thickness / 2 + ph / 2` where `shelf_y` is the
//!   center height of the shelf board.
//!
//! Multi-tier shrinkage
//! - Tier t is scaled by `max(MIN_TIER_SCALE, 1 - 0.15 t)`; its counts are
//!   `max(1, floor(count * scale))`, so upper tiers hold fewer products.

use nalgebra::Vector3;

use crate::cfg::{MIN_TIER_SCALE, TIER_SHRINK_PER_LEVEL};
use crate::spec::{used_depth_cm, ProductDims};

/// Inputs for one surface's grid.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GridParams {
    pub front_face_count: u32,
    pub back_to_back_count: u32,
    pub product: ProductDims,
    pub gaps_depth: f64,
    /// Depth of the surface the grid sits on (stand or tier depth).
    pub surface_depth: f64,
    /// Extra inward shift of the front row.
    pub front_inset: f64,
}

/// One product position in surface-local coordinates.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GridCell {
    pub row: u32,
    pub depth_index: u32,
    pub center: Vector3<f64>,
}

#[inline]
pub fn row_x(row: u32, front_face_count: u32, product_width: f64) -> f64 {
    -((front_face_count.saturating_sub(1)) as f64 * product_width) / 2.0
        + row as f64 * product_width
}

#[inline]
pub fn depth_z(depth_index: u32, p: &GridParams) -> f64 {
    p.surface_depth / 2.0 - p.product.depth / 2.0 - p.front_inset
        - depth_index as f64 * (p.product.depth + p.gaps_depth)
}

#[inline]
pub fn product_center_y(shelf_y: f64, shelf_thickness: f64, product_height: f64) -> f64 {
    shelf_y + shelf_thickness / 2.0 + product_height / 2.0
}

/// Every cell of the grid, row-major (rows outer, depth inner).
pub fn grid_cells(p: &GridParams, shelf_y: f64, shelf_thickness: f64) -> Vec<GridCell> {
    let y = product_center_y(shelf_y, shelf_thickness, p.product.height);
    let cells = products_per_surface(p.front_face_count, p.back_to_back_count);
    let mut out = Vec::with_capacity(cells as usize);
    for row in 0..p.front_face_count {
        let x = row_x(row, p.front_face_count, p.product.width);
        for depth_index in 0..p.back_to_back_count {
            out.push(GridCell {
                row,
                depth_index,
                center: Vector3::new(x, y, depth_z(depth_index, p)),
            });
        }
    }
    out
}

/// Product counts saturate at `u32::MAX` instead of wrapping.
#[inline]
pub fn products_per_surface(front_face_count: u32, back_to_back_count: u32) -> u32 {
    front_face_count.saturating_mul(back_to_back_count)
}

/// Total for archetypes where every shelf holds the full grid.
#[inline]
pub fn uniform_total(front_face_count: u32, back_to_back_count: u32, shelf_count: u32) -> u32 {
    products_per_surface(front_face_count, back_to_back_count).saturating_mul(shelf_count)
}

/// Scale of tier `t` (0-indexed), floored at `MIN_TIER_SCALE`.
#[inline]
pub fn tier_scale(tier: u32) -> f64 {
    (1.0 - TIER_SHRINK_PER_LEVEL * tier as f64).max(MIN_TIER_SCALE)
}

/// `max(1, floor(count * scale))`.
#[inline]
pub fn scaled_count(count: u32, scale: f64) -> u32 {
    ((count as f64 * scale).floor() as u32).max(1)
}

/// Per-tier plan for the multi-tier archetype.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TierPlan {
    pub index: u32,
    pub scale: f64,
    pub front_face_count: u32,
    pub back_to_back_count: u32,
    pub width: f64,
    pub depth: f64,
    /// True when the footprint was widened past `scale * stand` to hold its grid.
    pub widened: bool,
}

impl TierPlan {
    #[inline]
    pub fn products(&self) -> u32 {
        products_per_surface(self.front_face_count, self.back_to_back_count)
    }
}

/// Plan `tier_count` shrinking tiers over a `stand_width × stand_depth` footprint.
///
/// Tiers whose floored grid would overhang the shrunken footprint are widened
/// to the grid's extent; counts never change.
pub fn plan_tiers(
    tier_count: u32,
    stand_width: f64,
    stand_depth: f64,
    front_face_count: u32,
    back_to_back_count: u32,
    product: &ProductDims,
    gaps_depth: f64,
) -> Vec<TierPlan> {
    (0..tier_count)
        .map(|index| {
            let scale = tier_scale(index);
            let ff = scaled_count(front_face_count, scale);
            let bb = scaled_count(back_to_back_count, scale);
            let need_w = ff as f64 * product.width;
            let need_d = used_depth_cm(bb, product.depth, gaps_depth);
            let scaled_w = stand_width * scale;
            let scaled_d = stand_depth * scale;
            let widened = need_w > scaled_w || need_d > scaled_d;
            TierPlan {
                index,
                scale,
                front_face_count: ff,
                back_to_back_count: bb,
                width: scaled_w.max(need_w),
                depth: scaled_d.max(need_d),
                widened,
            }
        })
        .collect()
}

pub fn tiered_total(plans: &[TierPlan]) -> u32 {
    plans
        .iter()
        .map(TierPlan::products)
        .fold(0, u32::saturating_add)
}
