//! Archetype tags, the per-request `StandSpec`, and the built result.

use chrono::{DateTime, Utc};
use nalgebra::Vector3;
use serde::{Deserialize, Serialize};

use crate::materials::MaterialSet;
use crate::scene::Node;
use crate::spec::{FormData, Layout, ProductDims, Spec, StandDims};
use crate::surface::SurfaceCfg;

/// The six structural families.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum StandType {
    Tabletop,
    Floor,
    WallMount,
    Corner,
    Rotating,
    MultiTier,
}

impl StandType {
    pub const ALL: [StandType; 6] = [
        Self::Tabletop,
        Self::Floor,
        Self::WallMount,
        Self::Corner,
        Self::Rotating,
        Self::MultiTier,
    ];

    /// Form label, e.g. `"Wall Mount Stand"`.
    pub fn label(self) -> &'static str {
        match self {
            Self::Tabletop => "Tabletop Stand",
            Self::Floor => "Floor Stand",
            Self::WallMount => "Wall Mount Stand",
            Self::Corner => "Corner Stand",
            Self::Rotating => "Rotating Stand",
            Self::MultiTier => "Multi-tier Stand",
        }
    }

    /// Exact label match only.
    pub fn from_label(label: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|t| t.label() == label)
    }
}

/// A caller's archetype label, resolved.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum StandTag {
    Known(StandType),
    /// Unrecognized label, kept verbatim; built as a tabletop.
    Unknown(String),
}

impl StandTag {
    pub fn parse(label: &str) -> Self {
        match StandType::from_label(label) {
            Some(t) => Self::Known(t),
            None => Self::Unknown(label.to_string()),
        }
    }

    /// The label echoed into metadata.
    pub fn label(&self) -> &str {
        match self {
            Self::Known(t) => t.label(),
            Self::Unknown(raw) => raw,
        }
    }
}

/// A `Spec` bound to one generation request. Built once, consumed by one builder.
#[derive(Clone, Debug, PartialEq)]
pub struct StandSpec {
    pub spec: Spec,
    pub tag: StandTag,
    /// Shelves (or tiers), >= 1.
    pub shelf_count: u32,
    pub form: FormData,
}

impl StandSpec {
    /// Reads `standType` and `shelfCount` from the form (defaults: tabletop, 1).
    pub fn new(spec: Spec, form: &FormData) -> Self {
        Self {
            tag: StandTag::parse(&form.stand_type_label()),
            shelf_count: form.shelf_count_or_default(),
            spec,
            form: form.clone(),
        }
    }

    #[inline]
    pub fn stand(&self) -> &StandDims {
        &self.spec.stand
    }

    #[inline]
    pub fn product(&self) -> &ProductDims {
        &self.spec.product
    }

    #[inline]
    pub fn layout(&self) -> &Layout {
        &self.spec.layout
    }
}

/// Knobs that make a build reproducible.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct BuildOptions {
    /// Fixed generation time; `None` stamps `Utc::now()`.
    pub generated_at: Option<DateTime<Utc>>,
    /// Surface-detail seed; `None` draws from entropy.
    pub surface_seed: Option<u64>,
    pub surface: SurfaceCfg,
}

impl BuildOptions {
    /// Fully deterministic options (fixed clock, fixed seed).
    pub fn seeded(seed: u64, generated_at: DateTime<Utc>) -> Self {
        Self {
            generated_at: Some(generated_at),
            surface_seed: Some(seed),
            surface: SurfaceCfg::default(),
        }
    }
}

/// Per-tier record for multi-tier stands.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TierSummary {
    pub index: u32,
    pub scale: f64,
    pub width: f64,
    pub depth: f64,
    pub front_face_count: u32,
    pub back_to_back_count: u32,
    pub products: u32,
    pub widened: bool,
}

/// Archetype-specific metadata.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "archetype", rename_all = "camelCase")]
pub enum ArchetypeExtras {
    Tabletop,
    #[serde(rename_all = "camelCase")]
    Floor {
        base_height: f64,
        pillar_support: bool,
        back_panel: bool,
        mid_span_brackets: bool,
    },
    #[serde(rename_all = "camelCase")]
    WallMount { mounting_points: Vec<Vector3<f64>> },
    #[serde(rename_all = "camelCase")]
    Corner { rotation_deg: f64 },
    #[serde(rename_all = "camelCase")]
    Rotating {
        turntable_radius: f64,
        turntable_height: f64,
    },
    MultiTier { tiers: Vec<TierSummary> },
}

/// What was actually built; the only input the contract validator inspects.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GeometryMetadata {
    /// Echo of the spec the builder consumed.
    pub spec: Spec,
    pub stand_dimensions: StandDims,
    pub product_dimensions: ProductDims,
    pub layout: Layout,
    pub total_products: u32,
    pub front_face_count: u32,
    pub back_to_back_count: u32,
    pub shelf_count: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tier_count: Option<u32>,
    /// Caller's label, verbatim (unknown labels included).
    pub stand_type: String,
    pub generated_at: DateTime<Utc>,
    pub extras: ArchetypeExtras,
}

impl GeometryMetadata {
    pub(crate) fn new(
        stand: &StandSpec,
        total_products: u32,
        generated_at: DateTime<Utc>,
        extras: ArchetypeExtras,
    ) -> Self {
        let spec = &stand.spec;
        Self {
            spec: spec.clone(),
            stand_dimensions: spec.stand,
            product_dimensions: spec.product,
            layout: spec.layout,
            total_products,
            front_face_count: spec.layout.columns,
            back_to_back_count: spec.layout.depth_count,
            shelf_count: stand.shelf_count,
            tier_count: None,
            stand_type: stand.tag.label().to_string(),
            generated_at,
            extras,
        }
    }
}

/// Built geometry: node tree, metadata, and the material set used.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BuiltStand {
    pub root: Node,
    pub metadata: GeometryMetadata,
    pub materials: MaterialSet,
}
