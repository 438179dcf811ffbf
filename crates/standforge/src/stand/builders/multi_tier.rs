//! Multi-tier: shrinking platforms, each its own shelf.
//!
//! Tier i's board is centered at `i * (H / N) + t/2`; its footprint and grid
//! come from `plan_tiers`. Products use the tier's depth for front alignment.

use nalgebra::Vector3;

use super::{board, products_on, Assembly, ROOT_NAME};
use crate::layout::{plan_tiers, tiered_total, GridParams};
use crate::scene::{Node, NodeKind};
use crate::stand::types::{ArchetypeExtras, StandSpec, TierSummary};

pub(crate) fn assemble(stand: &StandSpec) -> Assembly {
    let dims = stand.stand();
    let layout = stand.layout();
    let product = *stand.product();
    let t = dims.shelf_thickness;
    let n = stand.shelf_count;

    let plans = plan_tiers(
        n,
        dims.width,
        dims.depth,
        layout.columns,
        layout.depth_count,
        &product,
        layout.gaps_depth,
    );

    let step = dims.height / n as f64;
    let mut root = Node::group(ROOT_NAME);
    for plan in &plans {
        if plan.widened {
            tracing::debug!(
                tier = plan.index,
                scale = plan.scale,
                width = plan.width,
                depth = plan.depth,
                "tier widened to hold its grid"
            );
        }
        let tier_y = plan.index as f64 * step + t / 2.0;
        root.push(board(
            format!("tier-{}", plan.index),
            NodeKind::Tier,
            plan.width,
            t,
            plan.depth,
            tier_y,
        ));
        let grid = GridParams {
            front_face_count: plan.front_face_count,
            back_to_back_count: plan.back_to_back_count,
            product,
            gaps_depth: layout.gaps_depth,
            surface_depth: plan.depth,
            front_inset: 0.0,
        };
        root.children
            .extend(products_on(plan.index, &grid, tier_y, t, Vector3::zeros()));
    }

    let tiers = plans
        .iter()
        .map(|p| TierSummary {
            index: p.index,
            scale: p.scale,
            width: p.width,
            depth: p.depth,
            front_face_count: p.front_face_count,
            back_to_back_count: p.back_to_back_count,
            products: p.products(),
            widened: p.widened,
        })
        .collect();

    Assembly {
        root,
        total_products: tiered_total(&plans),
        extras: ArchetypeExtras::MultiTier { tiers },
        tier_count: Some(n),
    }
}
