//! Contract: the binding dimensional promise handed downstream, and the
//! checks that certify a build against it.
//!
//! Purpose
//! - `generate_contract` derives the contract from a `Spec`, recomputing the
//!   checksum rather than trusting cached values.
//! - `validate_built_geometry` is the deterministic drift guard: it compares
//!   the spec echoed in build metadata against the spec under test.
//!
//! Notes
//! - The checksum counts one shelf (`columns * depthCount`), never the stand.
//! - The forbid list is advisory text for a non-deterministic consumer; only
//!   the validator here is enforced.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::spec::Spec;
use crate::stand::{ArchetypeExtras, BuiltStand};

pub const CAMERA: &str = "orthographic 3/4";

pub const FORBID: [&str; 8] = [
    "change_dimensions",
    "extra_rows",
    "stagger",
    "count_drift",
    "rotate_products",
    "add_products",
    "remove_products",
    "change_layout",
];

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct StandCm {
    pub width: f64,
    pub depth: f64,
    pub height: f64,
    pub shelf_thickness: f64,
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct ProductCm {
    pub width: f64,
    pub height: f64,
    pub depth: f64,
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Arrangement {
    pub columns_across: u32,
    pub depth_count: u32,
    pub gaps_depth_cm: f64,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Checksum {
    /// Products on one shelf.
    pub total_products: u32,
    pub used_depth_cm: f64,
    /// `"{columns}x{depthCount}_{gaps}"`, e.g. `"1x12_no_gaps"`.
    pub verification: String,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Contract {
    pub stand_cm: StandCm,
    pub product_cm: ProductCm,
    pub arrangement: Arrangement,
    pub camera: String,
    pub forbid: Vec<String>,
    pub checksum: Checksum,
}

/// `"no_gaps"` or `"{gap}cm_gaps"`.
pub fn gap_description(gaps_depth: f64) -> String {
    if gaps_depth > 0.0 {
        format!("{gaps_depth}cm_gaps")
    } else {
        "no_gaps".to_string()
    }
}

pub fn verification_string(columns: u32, depth_count: u32, gaps_depth: f64) -> String {
    format!("{columns}x{depth_count}_{}", gap_description(gaps_depth))
}

pub fn generate_contract(spec: &Spec) -> Contract {
    let l = &spec.layout;
    Contract {
        stand_cm: StandCm {
            width: spec.stand.width,
            depth: spec.stand.depth,
            height: spec.stand.height,
            shelf_thickness: spec.stand.shelf_thickness,
        },
        product_cm: ProductCm {
            width: spec.product.width,
            height: spec.product.height,
            depth: spec.product.depth,
        },
        arrangement: Arrangement {
            columns_across: l.columns,
            depth_count: l.depth_count,
            gaps_depth_cm: l.gaps_depth,
        },
        camera: CAMERA.to_string(),
        forbid: FORBID.iter().map(|s| s.to_string()).collect(),
        checksum: Checksum {
            total_products: spec.products_per_shelf(),
            used_depth_cm: spec.used_depth_cm(),
            verification: verification_string(l.columns, l.depth_count, l.gaps_depth),
        },
    }
}

/// A compared quantity.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DriftField {
    StandWidth,
    StandDepth,
    StandHeight,
    ShelfThickness,
    ProductWidth,
    ProductHeight,
    ProductDepth,
    Columns,
    DepthCount,
    GapsDepth,
    /// Products on the (first) shelf.
    ShelfProducts,
}

impl DriftField {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::StandWidth => "stand_width",
            Self::StandDepth => "stand_depth",
            Self::StandHeight => "stand_height",
            Self::ShelfThickness => "shelf_thickness",
            Self::ProductWidth => "product_width",
            Self::ProductHeight => "product_height",
            Self::ProductDepth => "product_depth",
            Self::Columns => "columns",
            Self::DepthCount => "depth_count",
            Self::GapsDepth => "gaps_depth",
            Self::ShelfProducts => "shelf_products",
        }
    }
}

/// One mismatch between what was promised and what was built.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Drift {
    pub field: DriftField,
    pub expected: f64,
    pub actual: f64,
}

impl fmt::Display for Drift {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}: expected {}, built {}",
            self.field.as_str(),
            self.expected,
            self.actual
        )
    }
}

fn compare(out: &mut Vec<Drift>, field: DriftField, expected: f64, actual: f64) {
    if expected != actual {
        out.push(Drift {
            field,
            expected,
            actual,
        });
    }
}

/// Every mismatch between `spec` and the spec echoed in `built`'s metadata.
///
/// Compares stand W/D/H, depth count, columns and depth gap; exact equality.
pub fn drift_report(built: &BuiltStand, spec: &Spec) -> Vec<Drift> {
    let echoed = &built.metadata.spec;
    let mut out = Vec::new();
    compare(&mut out, DriftField::StandWidth, spec.stand.width, echoed.stand.width);
    compare(&mut out, DriftField::StandDepth, spec.stand.depth, echoed.stand.depth);
    compare(&mut out, DriftField::StandHeight, spec.stand.height, echoed.stand.height);
    compare(
        &mut out,
        DriftField::DepthCount,
        spec.layout.depth_count as f64,
        echoed.layout.depth_count as f64,
    );
    compare(
        &mut out,
        DriftField::Columns,
        spec.layout.columns as f64,
        echoed.layout.columns as f64,
    );
    compare(
        &mut out,
        DriftField::GapsDepth,
        spec.layout.gaps_depth,
        echoed.layout.gaps_depth,
    );
    out
}

/// True only when the build echoes `spec` without drift. A `false` means the
/// geometry must be rejected and regenerated.
pub fn validate_built_geometry(built: &BuiltStand, spec: &Spec) -> bool {
    let drift = drift_report(built, spec);
    for d in &drift {
        tracing::warn!(
            field = d.field.as_str(),
            expected = d.expected,
            actual = d.actual,
            "geometry drifted from spec"
        );
    }
    drift.is_empty()
}

impl Contract {
    /// Check a build against this contract: dimensions, arrangement, and the
    /// product count on the first shelf (tier 0 for multi-tier stands).
    pub fn audit(&self, built: &BuiltStand) -> Vec<Drift> {
        let meta = &built.metadata;
        let stand = &meta.stand_dimensions;
        let product = &meta.product_dimensions;
        let mut out = Vec::new();
        compare(&mut out, DriftField::StandWidth, self.stand_cm.width, stand.width);
        compare(&mut out, DriftField::StandDepth, self.stand_cm.depth, stand.depth);
        compare(&mut out, DriftField::StandHeight, self.stand_cm.height, stand.height);
        compare(
            &mut out,
            DriftField::ShelfThickness,
            self.stand_cm.shelf_thickness,
            stand.shelf_thickness,
        );
        compare(&mut out, DriftField::ProductWidth, self.product_cm.width, product.width);
        compare(&mut out, DriftField::ProductHeight, self.product_cm.height, product.height);
        compare(&mut out, DriftField::ProductDepth, self.product_cm.depth, product.depth);
        compare(
            &mut out,
            DriftField::Columns,
            self.arrangement.columns_across as f64,
            meta.front_face_count as f64,
        );
        compare(
            &mut out,
            DriftField::DepthCount,
            self.arrangement.depth_count as f64,
            meta.back_to_back_count as f64,
        );
        compare(
            &mut out,
            DriftField::GapsDepth,
            self.arrangement.gaps_depth_cm,
            meta.layout.gaps_depth,
        );
        let first_shelf = match &meta.extras {
            ArchetypeExtras::MultiTier { tiers } => tiers.first().map_or(0, |t| t.products),
            _ if meta.shelf_count > 0 => meta.total_products / meta.shelf_count,
            _ => 0,
        };
        compare(
            &mut out,
            DriftField::ShelfProducts,
            self.checksum.total_products as f64,
            first_shelf as f64,
        );
        out
    }

    /// The contract as the plain-text constraint block given to the image stage.
    pub fn to_constraint_text(&self) -> String {
        let s = &self.stand_cm;
        let p = &self.product_cm;
        let a = &self.arrangement;
        let gaps = if a.gaps_depth_cm > 0.0 {
            format!("{} cm gaps between depth-wise products", a.gaps_depth_cm)
        } else {
            "no gaps between depth-wise products".to_string()
        };
        let mut text = String::new();
        text.push_str(&format!(
            "STAND (cm): width {}, depth {}, height {}, shelf thickness {}\n",
            s.width, s.depth, s.height, s.shelf_thickness
        ));
        text.push_str(&format!(
            "PRODUCT (cm): width {}, height {}, depth {}\n",
            p.width, p.height, p.depth
        ));
        text.push_str(&format!(
            "ARRANGEMENT: {} across, {} deep per shelf, {gaps}\n",
            a.columns_across, a.depth_count
        ));
        text.push_str(&format!("CAMERA: {}\n", self.camera));
        text.push_str(&format!(
            "CHECKSUM: {} products per shelf, {} cm depth used, {}\n",
            self.checksum.total_products, self.checksum.used_depth_cm, self.checksum.verification
        ));
        text.push_str(&format!("FORBID: {}\n", self.forbid.join(", ")));
        text
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cfg::MAX_GRID_COUNT;
    use crate::scene::NodeKind;
    use crate::spec::{
        generate_spec_from_form_data, used_depth_cm, FormData, Layout, ProductDims, StandDims,
    };
    use crate::stand::{build_stand_group_with, BuildOptions, StandType};
    use crate::surface::SurfaceCfg;
    use proptest::prelude::*;
    use serde_json::json;

    fn default_spec() -> Spec {
        generate_spec_from_form_data(&FormData::default())
    }

    fn opts() -> BuildOptions {
        BuildOptions {
            surface_seed: Some(3),
            surface: SurfaceCfg { size: 2 },
            ..BuildOptions::default()
        }
    }

    fn built_for(kind: StandType, spec: &Spec) -> BuiltStand {
        let form = FormData::from_value(json!({ "standType": kind.label(), "shelfCount": 3 }));
        build_stand_group_with(spec, &form, &opts())
    }

    #[test]
    fn default_contract_is_fully_packed() {
        let c = generate_contract(&default_spec());
        assert_eq!(c.checksum.total_products, 12);
        assert_eq!(c.checksum.used_depth_cm, 30.0);
        assert_eq!(c.checksum.used_depth_cm, c.stand_cm.depth);
        assert_eq!(c.checksum.verification, "1x12_no_gaps");
        assert_eq!(c.camera, "orthographic 3/4");
        assert_eq!(c.forbid.len(), 8);
        assert_eq!(c.forbid[0], "change_dimensions");
    }

    #[test]
    fn oversized_counts_give_a_capped_checksum() {
        let form = FormData::from_value(json!({
            "frontFaceCount": 70000,
            "backToBackCount": 70000,
        }));
        let c = generate_contract(&generate_spec_from_form_data(&form));
        assert_eq!(c.arrangement.columns_across, MAX_GRID_COUNT);
        assert_eq!(c.checksum.total_products, MAX_GRID_COUNT * MAX_GRID_COUNT);
    }

    #[test]
    fn gap_description_formats() {
        assert_eq!(gap_description(0.0), "no_gaps");
        assert_eq!(gap_description(0.5), "0.5cm_gaps");
        assert_eq!(verification_string(2, 4, 1.0), "2x4_1cm_gaps");
    }

    #[test]
    fn contract_json_uses_snake_case() {
        let v = serde_json::to_value(generate_contract(&default_spec())).unwrap();
        assert_eq!(v["stand_cm"]["shelf_thickness"], 2.0);
        assert_eq!(v["arrangement"]["columns_across"], 1);
        assert_eq!(v["arrangement"]["gaps_depth_cm"], 0.0);
        assert_eq!(v["checksum"]["used_depth_cm"], 30.0);
    }

    #[test]
    fn every_archetype_round_trips() {
        let spec = default_spec();
        for kind in StandType::ALL {
            let built = built_for(kind, &spec);
            assert!(validate_built_geometry(&built, &spec), "{kind:?}");
            assert!(generate_contract(&spec).audit(&built).is_empty(), "{kind:?}");
        }
    }

    #[test]
    fn mutating_any_checked_field_flips_the_verdict() {
        let spec = default_spec();
        let built = built_for(StandType::Tabletop, &spec);
        let mutations: [(DriftField, fn(&mut Spec)); 6] = [
            (DriftField::StandWidth, |s| s.stand.width += 1.0),
            (DriftField::StandDepth, |s| s.stand.depth += 1.0),
            (DriftField::StandHeight, |s| s.stand.height += 1.0),
            (DriftField::DepthCount, |s| s.layout.depth_count += 1),
            (DriftField::Columns, |s| s.layout.columns += 1),
            (DriftField::GapsDepth, |s| s.layout.gaps_depth += 0.5),
        ];
        for (field, mutate) in mutations {
            let mut other = spec.clone();
            mutate(&mut other);
            assert!(!validate_built_geometry(&built, &other), "{field:?}");
            let report = drift_report(&built, &other);
            assert_eq!(report.len(), 1);
            assert_eq!(report[0].field, field);
        }
    }

    #[test]
    fn audit_catches_count_tampering() {
        let spec = default_spec();
        let contract = generate_contract(&spec);
        let mut built = built_for(StandType::Floor, &spec);
        // Floor auto-scale is not applied to a hand-built spec, so dimensions hold.
        assert!(contract.audit(&built).is_empty());
        built.metadata.total_products += 3;
        let drift = contract.audit(&built);
        assert_eq!(drift.len(), 1);
        assert_eq!(drift[0].field, DriftField::ShelfProducts);
        assert_eq!(drift[0].to_string(), "shelf_products: expected 12, built 13");
    }

    #[test]
    fn audit_reads_first_tier_for_multi_tier() {
        let spec = default_spec();
        let built = built_for(StandType::MultiTier, &spec);
        assert_eq!(built.metadata.total_products, 30);
        assert!(generate_contract(&spec).audit(&built).is_empty());
    }

    #[test]
    fn constraint_text_lists_promise() {
        let spec = Spec::new(
            StandDims {
                width: 20.0,
                depth: 30.0,
                height: 25.0,
                shelf_thickness: 2.0,
            },
            ProductDims {
                width: 6.0,
                height: 10.0,
                depth: 4.0,
            },
            Layout {
                columns: 3,
                depth_count: 5,
                gaps_depth: 1.5,
            },
        )
        .unwrap();
        let text = generate_contract(&spec).to_constraint_text();
        assert!(text.contains("ARRANGEMENT: 3 across, 5 deep per shelf, 1.5 cm gaps"));
        assert!(text.contains("CHECKSUM: 15 products per shelf, 26 cm depth used, 3x5_1.5cm_gaps"));
        assert!(text.contains("FORBID: change_dimensions, extra_rows, stagger"));
        assert_eq!(text.lines().count(), 6);
    }

    proptest! {
        #[test]
        fn checksum_is_per_shelf(
            ff in 1u32..10,
            bb in 1u32..30,
            gap in 0.0f64..3.0,
            shelves in 1u32..6,
        ) {
            let form = FormData::from_value(json!({
                "frontFaceCount": ff,
                "backToBackCount": bb,
                "gapsDepth": gap,
                "shelfCount": shelves,
            }));
            let spec = generate_spec_from_form_data(&form);
            let c = generate_contract(&spec);
            prop_assert_eq!(c.checksum.total_products, ff * bb);
            let used = bb as f64 * 2.5 + (bb - 1) as f64 * spec.layout.gaps_depth;
            prop_assert!((c.checksum.used_depth_cm - used).abs() < 1e-9);
        }

        #[test]
        fn random_forms_round_trip_for_every_archetype(
            ff in 1u32..5,
            bb in 1u32..15,
            gap in 0.0f64..2.0,
            width in 10.0f64..60.0,
            spare_depth in 0.0f64..20.0,
            height in 20.0f64..150.0,
            shelves in 1u32..5,
            pick in 0usize..6,
        ) {
            let kind = StandType::ALL[pick];
            let form = FormData::from_value(json!({
                "standType": kind.label(),
                "standWidth": width,
                "standDepth": used_depth_cm(bb, 2.5, gap) + spare_depth,
                "standHeight": height,
                "frontFaceCount": ff,
                "backToBackCount": bb,
                "gapsDepth": gap,
                "shelfCount": shelves,
            }));
            let spec = generate_spec_from_form_data(&form);
            prop_assert!(spec.check().is_ok());
            let built = build_stand_group_with(&spec, &form, &opts());
            prop_assert!(validate_built_geometry(&built, &spec), "{:?}", kind);
            let audit = generate_contract(&spec).audit(&built);
            prop_assert!(audit.is_empty(), "{:?}: {:?}", kind, audit);
            let placed = built.root.count_kind(NodeKind::Product) as u32;
            prop_assert_eq!(placed, built.metadata.total_products);
        }
    }
}
