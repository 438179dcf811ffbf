//! Wall mount: full-height back plate, four mount markers, cantilevered
//! shelves on paired support arms. No base.
//!
//! The plate's front face is the back edge of the footprint (`z = -D/2`);
//! arms run from it to the shelf front. Markers sit behind the plate, axis
//! along Z, inset from the plate corners.

use std::f64::consts::FRAC_PI_2;

use nalgebra::Vector3;

use super::{board, full_grid, products_on, structure, Assembly, ROOT_NAME};
use crate::cfg::{
    MOUNT_MARKER_DEPTH_CM, MOUNT_MARKER_INSET_CM, MOUNT_MARKER_RADIUS_CM, SUPPORT_ARM_HEIGHT_CM,
    SUPPORT_ARM_SPREAD, SUPPORT_ARM_WIDTH_CM, WALL_PLATE_THICKNESS_CM, WALL_SHELF_WIDTH_RATIO,
};
use crate::layout::uniform_total;
use crate::materials::SurfaceRole;
use crate::scene::{Node, NodeKind, Shape, Transform};
use crate::stand::types::{ArchetypeExtras, StandSpec};

/// Mount marker centers for a `width × height` plate whose front face is at `front_z`.
pub(crate) fn mounting_points(width: f64, height: f64, front_z: f64) -> Vec<Vector3<f64>> {
    let x = width / 2.0 - MOUNT_MARKER_INSET_CM;
    let z = front_z - WALL_PLATE_THICKNESS_CM - MOUNT_MARKER_DEPTH_CM / 2.0;
    let (low, high) = (MOUNT_MARKER_INSET_CM, height - MOUNT_MARKER_INSET_CM);
    vec![
        Vector3::new(-x, high, z),
        Vector3::new(x, high, z),
        Vector3::new(-x, low, z),
        Vector3::new(x, low, z),
    ]
}

pub(crate) fn assemble(stand: &StandSpec) -> Assembly {
    let dims = stand.stand();
    let (w, d, h, t) = (dims.width, dims.depth, dims.height, dims.shelf_thickness);
    let n = stand.shelf_count;
    let plate = WALL_PLATE_THICKNESS_CM;
    let back_z = -d / 2.0;

    let mut root = Node::group(ROOT_NAME);
    root.push(structure(
        "back-plate",
        NodeKind::Panel,
        Vector3::new(w, h, plate),
        Vector3::new(0.0, h / 2.0, back_z - plate / 2.0),
    ));

    let points = mounting_points(w, h, back_z);
    let marker = Shape::cylinder(MOUNT_MARKER_RADIUS_CM, MOUNT_MARKER_DEPTH_CM, 16);
    for (i, p) in points.iter().enumerate() {
        root.push(Node::solid(
            format!("mount-{i}"),
            NodeKind::MountPoint,
            marker,
            SurfaceRole::Structure,
            Transform::at(p.x, p.y, p.z).rotated_x(FRAC_PI_2),
        ));
    }

    let shelf_w = w * WALL_SHELF_WIDTH_RATIO;
    let arm_x = shelf_w / 2.0 * SUPPORT_ARM_SPREAD;
    let grid = full_grid(stand, d, 0.0);
    let spacing = (h - t) / n as f64;
    for level in 0..n {
        let shelf_y = t / 2.0 + level as f64 * spacing;
        root.push(board(format!("shelf-{level}"), NodeKind::Shelf, shelf_w, t, d, shelf_y));
        let arm_y = shelf_y - t / 2.0 - SUPPORT_ARM_HEIGHT_CM / 2.0;
        for (side, x) in [("left", -arm_x), ("right", arm_x)] {
            root.push(structure(
                &format!("arm-{level}-{side}"),
                NodeKind::Support,
                Vector3::new(SUPPORT_ARM_WIDTH_CM, SUPPORT_ARM_HEIGHT_CM, d),
                Vector3::new(x, arm_y, 0.0),
            ));
        }
        root.children
            .extend(products_on(level, &grid, shelf_y, t, Vector3::zeros()));
    }

    Assembly {
        root,
        total_products: uniform_total(grid.front_face_count, grid.back_to_back_count, n),
        extras: ArchetypeExtras::WallMount {
            mounting_points: points,
        },
        tier_count: None,
    }
}
