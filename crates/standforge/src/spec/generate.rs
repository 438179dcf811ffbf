//! Form input → canonical `Spec`.
//!
//! All defaulting happens here, once, so builders never see a missing field.

use serde_json::Value;

use super::form::{non_negative_f64, positive_count, positive_f64, FormData};
use super::types::{Layout, ProductDims, Spec, SpecMetadata, StandDims};
use crate::cfg::{
    FLOOR_HEIGHT_PAD_CM, FLOOR_HEIGHT_PER_SHELF_CM, FLOOR_MIN_HEIGHT_CM, MAX_GRID_COUNT,
    SHELF_THICKNESS_CM, TABLETOP_SCALE_MAX_HEIGHT_CM,
};
use crate::stand::StandType;

/// Values used for any absent or unusable form field.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SpecDefaults {
    pub stand: StandDims,
    pub product: ProductDims,
    pub layout: Layout,
}

impl Default for SpecDefaults {
    fn default() -> Self {
        Self {
            stand: StandDims {
                width: 15.0,
                depth: 30.0,
                height: 30.0,
                shelf_thickness: SHELF_THICKNESS_CM,
            },
            product: ProductDims {
                width: 13.0,
                height: 5.0,
                depth: 2.5,
            },
            layout: Layout {
                columns: 1,
                depth_count: 12,
                gaps_depth: 0.0,
            },
        }
    }
}

/// Build a `Spec` from loosely typed form input. Never fails.
pub fn generate_spec_from_form_data(form: &FormData) -> Spec {
    generate_spec_with_defaults(form, &SpecDefaults::default())
}

pub fn generate_spec_with_defaults(form: &FormData, defaults: &SpecDefaults) -> Spec {
    let num = |v: &Option<Value>, fallback: f64| positive_f64(v.as_ref()).unwrap_or(fallback);
    let count = |v: &Option<Value>, fallback: u32| {
        positive_count(v.as_ref(), MAX_GRID_COUNT).unwrap_or(fallback)
    };

    let stand_type = form.stand_type_label();
    let shelf_count = form.shelf_count_or_default();

    let requested_height = num(&form.stand_height, defaults.stand.height);
    let (height, original_height) =
        match floor_autoscale_height(&stand_type, requested_height, shelf_count) {
            Some(scaled) => {
                tracing::info!(
                    requested_cm = requested_height,
                    scaled_cm = scaled,
                    shelf_count,
                    "floor stand height raised to floor scale"
                );
                (scaled, Some(requested_height))
            }
            None => (requested_height, None),
        };

    Spec {
        stand: StandDims {
            width: num(&form.stand_width, defaults.stand.width),
            depth: num(&form.stand_depth, defaults.stand.depth),
            height,
            // Not a form field.
            shelf_thickness: defaults.stand.shelf_thickness,
        },
        product: ProductDims {
            width: num(&form.product_width, defaults.product.width),
            height: num(&form.product_height, defaults.product.height),
            depth: num(&form.product_depth, defaults.product.depth),
        },
        layout: Layout {
            columns: count(&form.front_face_count, defaults.layout.columns),
            depth_count: count(&form.back_to_back_count, defaults.layout.depth_count),
            gaps_depth: non_negative_f64(form.gaps_depth.as_ref())
                .unwrap_or(defaults.layout.gaps_depth),
        },
        metadata: Some(SpecMetadata {
            stand_type: Some(stand_type),
            shelf_count: Some(shelf_count),
            original_height,
        }),
    }
}

/// Replacement height for a floor stand given tabletop-scale input, if any.
///
/// Only the `Floor Stand` archetype is corrected.
pub fn floor_autoscale_height(stand_type: &str, height: f64, shelf_count: u32) -> Option<f64> {
    if StandType::from_label(stand_type) != Some(StandType::Floor) {
        return None;
    }
    if height > TABLETOP_SCALE_MAX_HEIGHT_CM {
        return None;
    }
    let by_shelves = shelf_count as f64 * FLOOR_HEIGHT_PER_SHELF_CM + FLOOR_HEIGHT_PAD_CM;
    Some(FLOOR_MIN_HEIGHT_CM.max(by_shelves))
}
