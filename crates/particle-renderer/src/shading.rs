//! Host-side mirror of the point-cloud shading program
//!
//! `point_cloud.wgsl` evaluates these same formulas on the GPU; the
//! constants here are what the renderer uploads in the frame uniform.

use glam::Vec2;

/// Pixel size of a unit point one unit in front of the camera
pub const SIZE_ATTENUATION: f32 = 300.0;

/// Relative amplitude of the per-point size pulse
pub const PULSE_AMPLITUDE: f32 = 0.1;

/// Global opacity applied on top of the sprite falloff
pub const POINT_OPACITY: f32 = 0.6;

/// Sprite radius in point-sprite coordinates, where alpha reaches zero
pub const SPRITE_RADIUS: f32 = 0.5;

/// Cubic Hermite interpolation, same as WGSL `smoothstep`
pub fn smoothstep(edge0: f32, edge1: f32, x: f32) -> f32 {
    let t = ((x - edge0) / (edge1 - edge0)).clamp(0.0, 1.0);
    t * t * (3.0 - 2.0 * t)
}

/// Size multiplier in [1 - amplitude, 1 + amplitude]
pub fn pulse(time: f32, x: f32) -> f32 {
    1.0 + (time + x).sin() * PULSE_AMPLITUDE
}

/// Screen-space point size in pixels.
///
/// `view_depth` is the view-space z of the point, negative in front of the
/// camera; `x` is the point's object-space x, which sets its pulse phase.
pub fn point_size(size: f32, view_depth: f32, time: f32, x: f32) -> f32 {
    size * (SIZE_ATTENUATION / -view_depth) * pulse(time, x)
}

/// Soft-disc falloff for a sprite coordinate in [0, 1]²
pub fn sprite_alpha(coord: Vec2) -> f32 {
    let distance = coord.distance(Vec2::splat(0.5));
    1.0 - smoothstep(0.0, SPRITE_RADIUS, distance)
}

/// Final fragment alpha
pub fn fragment_alpha(coord: Vec2) -> f32 {
    sprite_alpha(coord) * POINT_OPACITY
}
