//! Construction constants for stand geometry (centimeters unless noted).
//!
//! Policy
//! - Fixed constants, shared by every builder. A stand never carries its own
//!   one-off dimensions; anything a caller may vary lives in `Spec`.

/// Fixed shelf/tray thickness written into every generated `Spec`.
pub const SHELF_THICKNESS_CM: f64 = 2.0;
/// Side/back panel thickness for enclosed archetypes.
pub const WALL_THICKNESS_CM: f64 = 1.0;

// Floor stand.
pub const FLOOR_BASE_HEIGHT_CM: f64 = 5.0;
/// Added to each footprint dimension of the floor base.
pub const FLOOR_BASE_OVERSIZE_CM: f64 = 2.0;
pub const PILLAR_WIDTH_CM: f64 = 2.0;
/// Back panel only above this stand height.
pub const FLOOR_BACK_PANEL_MIN_HEIGHT_CM: f64 = 60.0;
pub const BRACKET_MIN_WIDTH_CM: f64 = 30.0;
pub const BRACKET_MIN_DEPTH_CM: f64 = 40.0;
pub const BRACKET_SECTION_CM: f64 = 1.5;

// Floor height auto-scale.
pub const FLOOR_MIN_HEIGHT_CM: f64 = 120.0;
pub const FLOOR_HEIGHT_PER_SHELF_CM: f64 = 25.0;
pub const FLOOR_HEIGHT_PAD_CM: f64 = 20.0;
/// Heights at or below this are treated as tabletop-scale input.
pub const TABLETOP_SCALE_MAX_HEIGHT_CM: f64 = 50.0;

// Wall mount.
pub const WALL_PLATE_THICKNESS_CM: f64 = 1.0;
pub const WALL_SHELF_WIDTH_RATIO: f64 = 0.9;
pub const MOUNT_MARKER_RADIUS_CM: f64 = 0.6;
pub const MOUNT_MARKER_DEPTH_CM: f64 = 0.8;
pub const MOUNT_MARKER_INSET_CM: f64 = 2.0;
pub const SUPPORT_ARM_WIDTH_CM: f64 = 1.0;
pub const SUPPORT_ARM_HEIGHT_CM: f64 = 2.0;
/// Arm x position as a fraction of the shelf half-width.
pub const SUPPORT_ARM_SPREAD: f64 = 0.7;

// Corner / rotating.
pub const CORNER_ROTATION_RAD: f64 = std::f64::consts::FRAC_PI_4;
pub const TURNTABLE_MARGIN_CM: f64 = 2.0;
pub const TURNTABLE_HEIGHT_CM: f64 = 2.0;
pub const TURNTABLE_SEGMENTS: u32 = 48;

// Multi-tier.
pub const TIER_SHRINK_PER_LEVEL: f64 = 0.15;
/// Lower bound for `1 - 0.15 t`; only reached from the seventh tier on.
pub const MIN_TIER_SCALE: f64 = 0.1;

// Annotation.
pub const DIMENSION_TICK_CM: f64 = 1.0;

// Form limits. Larger counts read from a form are clamped down to these.
/// Upper bound for front-face and back-to-back counts.
pub const MAX_GRID_COUNT: u32 = 200;
/// Upper bound for shelf/tier counts.
pub const MAX_SHELF_COUNT: u32 = 50;
