//! Tabletop: base board, enclosing side and back walls, evenly spaced shelves.
//!
//! The base top is level 0; boards for levels 1..N-1 sit at
//! `t/2 + i * (H - t) / N`. Walls stand outside the `W × D` footprint so the
//! full depth stays usable. Corner and Rotating reuse this assembly.

use nalgebra::Vector3;

use super::{board, full_grid, products_on, structure, Assembly, ROOT_NAME};
use crate::cfg::WALL_THICKNESS_CM;
use crate::layout::uniform_total;
use crate::scene::{Node, NodeKind};
use crate::stand::types::{ArchetypeExtras, StandSpec};

pub(crate) fn assemble(stand: &StandSpec) -> Assembly {
    let dims = stand.stand();
    let (w, d, h, t) = (dims.width, dims.depth, dims.height, dims.shelf_thickness);
    let n = stand.shelf_count;
    let wall = WALL_THICKNESS_CM;

    let mut root = Node::group(ROOT_NAME);
    root.push(structure(
        "base",
        NodeKind::Base,
        Vector3::new(w, t, d),
        Vector3::new(0.0, t / 2.0, 0.0),
    ));
    let side_x = w / 2.0 + wall / 2.0;
    for (name, x) in [("wall-left", -side_x), ("wall-right", side_x)] {
        root.push(structure(
            name,
            NodeKind::Wall,
            Vector3::new(wall, h, d),
            Vector3::new(x, h / 2.0, 0.0),
        ));
    }
    root.push(structure(
        "wall-back",
        NodeKind::Wall,
        Vector3::new(w + 2.0 * wall, h, wall),
        Vector3::new(0.0, h / 2.0, -(d / 2.0 + wall / 2.0)),
    ));

    let grid = full_grid(stand, d, 0.0);
    let spacing = (h - t) / n as f64;
    for level in 0..n {
        let shelf_y = t / 2.0 + level as f64 * spacing;
        if level > 0 {
            root.push(board(format!("shelf-{level}"), NodeKind::Shelf, w, t, d, shelf_y));
        }
        root.children
            .extend(products_on(level, &grid, shelf_y, t, Vector3::zeros()));
    }

    Assembly {
        root,
        total_products: uniform_total(grid.front_face_count, grid.back_to_back_count, n),
        extras: ArchetypeExtras::Tabletop,
        tier_count: None,
    }
}
