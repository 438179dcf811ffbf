//! Floor: oversized plinth, four corner pillars, optional back panel and
//! mid-span brackets.
//!
//! Shelf i is centered at `baseHeight + t/2 + i * s` with
//! `s = (H - baseHeight) / (N + 1)`, leaving headroom above the top shelf.
//! Shelves are one pillar width narrower than the stand. Products keep half a
//! pillar clear of the front edge, or whatever depth the run leaves spare if
//! that is less, so a fully packed run still ends at the back edge.

use nalgebra::Vector3;

use super::{board, full_grid, products_on, structure, Assembly, ROOT_NAME};
use crate::cfg::{
    BRACKET_MIN_DEPTH_CM, BRACKET_MIN_WIDTH_CM, BRACKET_SECTION_CM, FLOOR_BACK_PANEL_MIN_HEIGHT_CM,
    FLOOR_BASE_HEIGHT_CM, FLOOR_BASE_OVERSIZE_CM, PILLAR_WIDTH_CM, WALL_THICKNESS_CM,
};
use crate::layout::uniform_total;
use crate::scene::{Node, NodeKind};
use crate::stand::types::{ArchetypeExtras, StandSpec};

pub(crate) fn assemble(stand: &StandSpec) -> Assembly {
    let dims = stand.stand();
    let (w, d, h, t) = (dims.width, dims.depth, dims.height, dims.shelf_thickness);
    let n = stand.shelf_count;
    let base_h = FLOOR_BASE_HEIGHT_CM;
    let pillar = PILLAR_WIDTH_CM;

    let mut root = Node::group(ROOT_NAME);
    root.push(structure(
        "base",
        NodeKind::Base,
        Vector3::new(w + FLOOR_BASE_OVERSIZE_CM, base_h, d + FLOOR_BASE_OVERSIZE_CM),
        Vector3::new(0.0, base_h / 2.0, 0.0),
    ));

    let rise = h - base_h;
    let px = w / 2.0 - pillar / 2.0;
    let pz = d / 2.0 - pillar / 2.0;
    let corners = [
        ("pillar-front-left", -px, pz),
        ("pillar-front-right", px, pz),
        ("pillar-back-left", -px, -pz),
        ("pillar-back-right", px, -pz),
    ];
    for (name, x, z) in corners {
        root.push(structure(
            name,
            NodeKind::Pillar,
            Vector3::new(pillar, rise, pillar),
            Vector3::new(x, base_h + rise / 2.0, z),
        ));
    }

    let back_panel = h > FLOOR_BACK_PANEL_MIN_HEIGHT_CM;
    if back_panel {
        root.push(structure(
            "back-panel",
            NodeKind::Panel,
            Vector3::new(w, rise, WALL_THICKNESS_CM),
            Vector3::new(0.0, base_h + rise / 2.0, -(d / 2.0 + WALL_THICKNESS_CM / 2.0)),
        ));
    }

    let span_w = w - pillar;
    let long_span = w > BRACKET_MIN_WIDTH_CM;
    let deep_span = d > BRACKET_MIN_DEPTH_CM;
    let front_inset = (pillar / 2.0).min(stand.spec.depth_slack_cm().max(0.0));
    let grid = full_grid(stand, d, front_inset);
    let spacing = rise / (n + 1) as f64;
    let bracket = BRACKET_SECTION_CM;
    for level in 0..n {
        let shelf_y = base_h + t / 2.0 + level as f64 * spacing;
        root.push(board(format!("shelf-{level}"), NodeKind::Shelf, span_w, t, d, shelf_y));
        // The bottom shelf rests on the plinth.
        if level > 0 {
            let y = shelf_y - t / 2.0 - bracket / 2.0;
            if long_span {
                root.push(structure(
                    &format!("bracket-{level}-depth"),
                    NodeKind::Bracket,
                    Vector3::new(bracket, bracket, d - 2.0 * pillar),
                    Vector3::new(0.0, y, 0.0),
                ));
            }
            if deep_span {
                root.push(structure(
                    &format!("bracket-{level}-width"),
                    NodeKind::Bracket,
                    Vector3::new(span_w, bracket, bracket),
                    Vector3::new(0.0, y, 0.0),
                ));
            }
        }
        root.children
            .extend(products_on(level, &grid, shelf_y, t, Vector3::zeros()));
    }

    Assembly {
        root,
        total_products: uniform_total(grid.front_face_count, grid.back_to_back_count, n),
        extras: ArchetypeExtras::Floor {
            base_height: base_h,
            pillar_support: true,
            back_panel,
            mid_span_brackets: long_span || deep_span,
        },
        tier_count: None,
    }
}
