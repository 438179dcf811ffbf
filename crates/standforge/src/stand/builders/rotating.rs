//! Rotating: a turntable disc with the tabletop assembly resting on it.

use super::{tabletop, Assembly, ROOT_NAME};
use crate::cfg::{TURNTABLE_HEIGHT_CM, TURNTABLE_MARGIN_CM, TURNTABLE_SEGMENTS};
use crate::materials::SurfaceRole;
use crate::scene::{Node, NodeKind, Shape, Transform};
use crate::stand::types::{ArchetypeExtras, StandSpec};

/// Disc radius: half the larger footprint side plus the margin.
#[inline]
pub(crate) fn turntable_radius(width: f64, depth: f64) -> f64 {
    width.max(depth) / 2.0 + TURNTABLE_MARGIN_CM
}

pub(crate) fn assemble(stand: &StandSpec) -> Assembly {
    let dims = stand.stand();
    let radius = turntable_radius(dims.width, dims.depth);
    let height = TURNTABLE_HEIGHT_CM;

    let mut body = tabletop::assemble(stand);
    body.root.name = "stand-body".to_string();
    body.root.transform = Transform::at(0.0, height, 0.0);

    let mut root = Node::group(ROOT_NAME);
    root.push(Node::solid(
        "turntable",
        NodeKind::Turntable,
        Shape::cylinder(radius, height, TURNTABLE_SEGMENTS),
        SurfaceRole::Structure,
        Transform::at(0.0, height / 2.0, 0.0),
    ));
    root.push(body.root);

    Assembly {
        root,
        total_products: body.total_products,
        extras: ArchetypeExtras::Rotating {
            turntable_radius: radius,
            turntable_height: height,
        },
        tier_count: None,
    }
}
