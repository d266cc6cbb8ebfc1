//! Fixed values for the backdrop field
//!
//! Tunable copies of most of these live in [`crate::FieldParams`] and
//! [`crate::MotionParams`]; the constants are their defaults.

/// Viewports narrower than this (logical pixels) get the compact field
pub const COMPACT_BREAKPOINT: f32 = 768.0;

/// Point count on narrow viewports
pub const COMPACT_POINT_COUNT: usize = 50;

/// Point count on everything else
pub const FULL_POINT_COUNT: usize = 100;

/// Half-width of the cube points are scattered in.
/// Each position component is sampled from [-EXTENT, EXTENT).
pub const POSITION_EXTENT: f32 = 5.0;

/// Point size range, half-open
pub const MIN_POINT_SIZE: f32 = 1.0;
pub const MAX_POINT_SIZE: f32 = 4.0;

/// Cloud rotation rate about the x axis (radians per second)
pub const ROTATION_RATE_X: f32 = 0.05;

/// Cloud rotation rate about the y axis (radians per second)
pub const ROTATION_RATE_Y: f32 = 0.075;
