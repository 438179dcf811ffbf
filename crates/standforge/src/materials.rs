//! Shared surface roles and their material parameters.
//!
//! Every builder draws from the same three roles; a `MaterialSet` is created
//! once per build and carries the procedural surface detail for each role.

use serde::{Deserialize, Serialize};

use crate::surface::{normal_variation, rng_for, roughness_variation, SurfaceCfg, SurfaceSeed};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SurfaceRole {
    /// Body panels, pillars, bases, supports.
    Structure,
    /// Shelves, trays, tiers.
    Tray,
    Product,
}

impl SurfaceRole {
    pub const ALL: [SurfaceRole; 3] = [Self::Structure, Self::Tray, Self::Product];

    /// Stable per-role rng stream index.
    #[inline]
    fn stream(self) -> u64 {
        match self {
            Self::Structure => 0,
            Self::Tray => 1,
            Self::Product => 2,
        }
    }
}

/// Physical parameters of one role.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MaterialParams {
    /// Base color intent as 0xRRGGBB.
    pub color: u32,
    pub roughness: f64,
    pub metalness: f64,
    pub reflectivity: f64,
    /// Normal tilt noise amplitude.
    pub normal_strength: f64,
    /// Per-texel roughness band.
    pub roughness_min: f64,
    pub roughness_max: f64,
}

impl MaterialParams {
    pub fn for_role(role: SurfaceRole) -> Self {
        match role {
            SurfaceRole::Structure => Self {
                color: 0xf4f4f2,
                roughness: 0.6,
                metalness: 0.0,
                reflectivity: 0.2,
                normal_strength: 0.06,
                roughness_min: 0.55,
                roughness_max: 0.7,
            },
            SurfaceRole::Tray => Self {
                color: 0xe8e8e6,
                roughness: 0.4,
                metalness: 0.05,
                reflectivity: 0.35,
                normal_strength: 0.04,
                roughness_min: 0.35,
                roughness_max: 0.5,
            },
            SurfaceRole::Product => Self {
                color: 0x3a7bd5,
                roughness: 0.3,
                metalness: 0.1,
                reflectivity: 0.5,
                normal_strength: 0.02,
                roughness_min: 0.25,
                roughness_max: 0.35,
            },
        }
    }
}

/// Texel maps for one role; in memory only.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct SurfaceDetail {
    pub size: usize,
    /// Packed xyz unit normals, `size * size * 3`.
    pub normals: Vec<f32>,
    /// `size * size` roughness values.
    pub roughness: Vec<f32>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Material {
    pub role: SurfaceRole,
    pub params: MaterialParams,
    #[serde(skip)]
    pub detail: SurfaceDetail,
}

impl Material {
    pub fn generate(role: SurfaceRole, cfg: &SurfaceCfg, seed: Option<u64>) -> Self {
        let params = MaterialParams::for_role(role);
        let mut rng = rng_for(seed.map(|s| SurfaceSeed::new(s, role.stream())));
        let normals = normal_variation(cfg.size, params.normal_strength, &mut rng);
        let roughness =
            roughness_variation(cfg.size, params.roughness_min, params.roughness_max, &mut rng);
        Self {
            role,
            params,
            detail: SurfaceDetail {
                size: cfg.size,
                normals,
                roughness,
            },
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MaterialSet {
    pub structure: Material,
    pub tray: Material,
    pub product: Material,
}

impl MaterialSet {
    pub fn generate(cfg: &SurfaceCfg, seed: Option<u64>) -> Self {
        Self {
            structure: Material::generate(SurfaceRole::Structure, cfg, seed),
            tray: Material::generate(SurfaceRole::Tray, cfg, seed),
            product: Material::generate(SurfaceRole::Product, cfg, seed),
        }
    }

    pub fn get(&self, role: SurfaceRole) -> &Material {
        match role {
            SurfaceRole::Structure => &self.structure,
            SurfaceRole::Tray => &self.tray,
            SurfaceRole::Product => &self.product,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn seeded_sets_are_reproducible() {
        let cfg = SurfaceCfg { size: 8 };
        let a = MaterialSet::generate(&cfg, Some(11));
        let b = MaterialSet::generate(&cfg, Some(11));
        assert_eq!(a, b);
        // Roles draw from distinct streams.
        assert_ne!(a.structure.detail.roughness, a.tray.detail.roughness);
    }

    #[test]
    fn roughness_detail_respects_role_band() {
        let cfg = SurfaceCfg { size: 8 };
        let set = MaterialSet::generate(&cfg, Some(5));
        for role in SurfaceRole::ALL {
            let m = set.get(role);
            assert_eq!(m.role, role);
            assert_eq!(m.detail.normals.len(), 8 * 8 * 3);
            let lo = m.params.roughness_min as f32;
            let hi = m.params.roughness_max as f32;
            assert!(m.detail.roughness.iter().all(|r| *r >= lo && *r <= hi));
        }
    }

    #[test]
    fn detail_is_not_serialized() {
        let set = MaterialSet::generate(&SurfaceCfg { size: 2 }, Some(1));
        let v = serde_json::to_value(&set).unwrap();
        assert!(v["product"].get("detail").is_none());
        assert_eq!(v["product"]["params"]["color"], 0x3a7bd5);
    }
}
