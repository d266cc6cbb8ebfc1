//! Point entity stored in the cloud's instance buffer

use bytemuck::{Pod, Zeroable};
use glam::Vec3;

/// GPU-compatible point.
/// Laid out to be read directly as a per-instance vertex buffer:
/// `position` at offset 0, `size` at 12, `color` at 16.
#[repr(C)]
#[derive(Clone, Copy, Debug, PartialEq, Pod, Zeroable)]
pub struct Point {
    /// Object-space position
    pub position: [f32; 3],
    /// Base sprite size before perspective scaling
    pub size: f32,
    /// Linear RGB
    pub color: [f32; 3],
    pub _padding: f32,
}

impl Point {
    pub fn new(position: Vec3, size: f32, color: [f32; 3]) -> Self {
        Self {
            position: position.to_array(),
            size,
            color,
            _padding: 0.0,
        }
    }

    pub fn position(&self) -> Vec3 {
        Vec3::from_array(self.position)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_layout_matches_instance_stride() {
        assert_eq!(std::mem::size_of::<Point>(), 32);
        assert_eq!(std::mem::align_of::<Point>(), 4);
    }

    #[test]
    fn test_position_round_trips_through_vec3() {
        let p = Point::new(Vec3::new(1.0, -2.0, 3.5), 2.0, [0.5, 0.6, 0.9]);
        assert_eq!(p.position(), Vec3::new(1.0, -2.0, 3.5));
        assert_eq!(p._padding, 0.0);
    }
}
