//! Canonical stand/product/layout data model.
//!
//! - `Spec`: the fully resolved configuration every downstream stage reads.
//! - `SpecError`: why a `Spec` breaks an invariant (strict constructor only;
//!   the form path never fails).

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::cfg::MAX_GRID_COUNT;

/// Stand block in centimeters. All fields are > 0.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StandDims {
    pub width: f64,
    pub depth: f64,
    pub height: f64,
    pub shelf_thickness: f64,
}

/// Product box in centimeters. All fields are > 0.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductDims {
    pub width: f64,
    pub height: f64,
    pub depth: f64,
}

/// Per-shelf arrangement: `columns` across the front, `depth_count` back to back.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Layout {
    pub columns: u32,
    pub depth_count: u32,
    /// Gap between consecutive depth-wise products (cm, >= 0).
    pub gaps_depth: f64,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SpecMetadata {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stand_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub shelf_count: Option<u32>,
    /// Height before the floor auto-scale rule replaced it.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub original_height: Option<f64>,
}

/// Canonical stand configuration.
///
/// Invariant (checked by `check`, not enforced on the lenient path):
/// `depth_count * product.depth + (depth_count - 1) * gaps_depth <= stand.depth`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Spec {
    pub stand: StandDims,
    pub product: ProductDims,
    pub layout: Layout,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata: Option<SpecMetadata>,
}

impl Spec {
    /// Strict constructor: every dimension positive, counts in
    /// `1..=MAX_GRID_COUNT`, run fits.
    pub fn new(stand: StandDims, product: ProductDims, layout: Layout) -> Result<Self, SpecError> {
        let spec = Self {
            stand,
            product,
            layout,
            metadata: None,
        };
        spec.check()?;
        Ok(spec)
    }

    pub fn with_metadata(mut self, metadata: SpecMetadata) -> Self {
        self.metadata = Some(metadata);
        self
    }

    /// Depth consumed by one shelf's depth-wise product run.
    #[inline]
    pub fn used_depth_cm(&self) -> f64 {
        used_depth_cm(self.layout.depth_count, self.product.depth, self.layout.gaps_depth)
    }

    /// Saturates at `u32::MAX` for specs built around `check`.
    #[inline]
    pub fn products_per_shelf(&self) -> u32 {
        self.layout.columns.saturating_mul(self.layout.depth_count)
    }

    /// Unused stand depth behind the last product (negative when overflowing).
    #[inline]
    pub fn depth_slack_cm(&self) -> f64 {
        self.stand.depth - self.used_depth_cm()
    }

    pub fn check(&self) -> Result<(), SpecError> {
        let dims = [
            ("stand.width", self.stand.width),
            ("stand.depth", self.stand.depth),
            ("stand.height", self.stand.height),
            ("stand.shelfThickness", self.stand.shelf_thickness),
            ("product.width", self.product.width),
            ("product.height", self.product.height),
            ("product.depth", self.product.depth),
        ];
        for (field, value) in dims {
            if !(value.is_finite() && value > 0.0) {
                return Err(SpecError::NonPositive { field, value });
            }
        }
        if self.layout.columns == 0 {
            return Err(SpecError::ZeroCount {
                field: "layout.columns",
            });
        }
        if self.layout.depth_count == 0 {
            return Err(SpecError::ZeroCount {
                field: "layout.depthCount",
            });
        }
        for (field, value) in [
            ("layout.columns", self.layout.columns),
            ("layout.depthCount", self.layout.depth_count),
        ] {
            if value > MAX_GRID_COUNT {
                return Err(SpecError::CountTooLarge {
                    field,
                    value,
                    max: MAX_GRID_COUNT,
                });
            }
        }
        if !(self.layout.gaps_depth.is_finite() && self.layout.gaps_depth >= 0.0) {
            return Err(SpecError::NegativeGap {
                value: self.layout.gaps_depth,
            });
        }
        let used = self.used_depth_cm();
        // Exact packing must pass; allow float noise from the gap sum.
        if used > self.stand.depth + 1e-9 {
            return Err(SpecError::DepthOverflow {
                used_cm: used,
                available_cm: self.stand.depth,
            });
        }
        Ok(())
    }
}

/// `count * depth + (count - 1) * gap`; zero for an empty run.
#[inline]
pub fn used_depth_cm(count: u32, product_depth: f64, gap: f64) -> f64 {
    if count == 0 {
        return 0.0;
    }
    count as f64 * product_depth + (count - 1) as f64 * gap
}

/// Invariant violations of a `Spec`.
#[derive(Clone, Debug, PartialEq)]
pub enum SpecError {
    NonPositive { field: &'static str, value: f64 },
    ZeroCount { field: &'static str },
    CountTooLarge { field: &'static str, value: u32, max: u32 },
    NegativeGap { value: f64 },
    DepthOverflow { used_cm: f64, available_cm: f64 },
}

impl fmt::Display for SpecError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NonPositive { field, value } => {
                write!(f, "{field} must be finite and > 0 (got {value})")
            }
            Self::ZeroCount { field } => write!(f, "{field} must be >= 1"),
            Self::CountTooLarge { field, value, max } => {
                write!(f, "{field} must be <= {max} (got {value})")
            }
            Self::NegativeGap { value } => {
                write!(f, "layout.gapsDepth must be finite and >= 0 (got {value})")
            }
            Self::DepthOverflow {
                used_cm,
                available_cm,
            } => write!(
                f,
                "depth-wise product run of {used_cm} cm exceeds stand depth {available_cm} cm"
            ),
        }
    }
}

impl std::error::Error for SpecError {}
