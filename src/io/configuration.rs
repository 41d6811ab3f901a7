//! Pattern geometry constants and runtime configuration defaults

/// Number of neighbourhood slots a rule classifies
pub const PATTERN_SIZE: usize = 35;

/// Slots 0..5 lie on the vertical axis and never move under rotation
pub const ON_AXIS_SLOTS: usize = 5;

/// Number of upright rotations searched during matching
pub const ROTATIONS: usize = 6;

/// Largest planar radius any pattern slot reaches
pub const MAX_SEARCH_RADIUS: u32 = 2;

/// Largest vertical offset any pattern slot reaches
pub const MAX_LAYER_OFFSET: i32 = 2;

// Cells must fit the 16-bit contract to be evaluated
/// Smallest usable coordinate on any axis
pub const CELL_COORD_MIN: i32 = i16::MIN as i32;
/// Largest usable coordinate on any axis
pub const CELL_COORD_MAX: i32 = i16::MAX as i32;

// Output settings
/// Suffix added to output filenames
pub const OUTPUT_SUFFIX: &str = "_tiles";
/// Suffix added to preview image filenames
pub const PREVIEW_SUFFIX: &str = "_preview";
/// Default pixels per unit cell radius in preview images
pub const DEFAULT_PREVIEW_SCALE: u32 = 12;
/// Upper limit on preview image edge length in pixels
pub const MAX_PREVIEW_DIMENSION: u32 = 8192;
