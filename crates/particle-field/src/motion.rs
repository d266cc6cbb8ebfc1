//! Time-driven motion of the cloud

use std::f64::consts::TAU;

use glam::{DVec2, Vec2};

use crate::constants::{ROTATION_RATE_X, ROTATION_RATE_Y};

/// Rotation rates for the cloud, radians per second
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MotionParams {
    pub rotation_rate_x: f32,
    pub rotation_rate_y: f32,
}

impl Default for MotionParams {
    fn default() -> Self {
        Self {
            rotation_rate_x: ROTATION_RATE_X,
            rotation_rate_y: ROTATION_RATE_Y,
        }
    }
}

/// Per-frame render state, recomputed from the frame timestamp.
///
/// Nothing accumulates between frames: the same timestamp always yields the
/// same rotation. `time` and `rotation` grow without bound in `f64`; the
/// `shader_*` accessors reduce them modulo a full turn before narrowing, so
/// consecutive frames stay distinct after days of uptime.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct CloudMotion {
    /// Seconds since the loop started
    pub time: f64,
    /// Rotation about x (`.x`) and y (`.y`), radians
    pub rotation: DVec2,
}

impl CloudMotion {
    pub fn at(now_millis: f64, params: &MotionParams) -> Self {
        let time = now_millis / 1000.0;
        Self {
            time,
            rotation: DVec2::new(
                time * params.rotation_rate_x as f64,
                time * params.rotation_rate_y as f64,
            ),
        }
    }

    /// Time as the shader sees it. Only feeds `sin`, so a full period is dropped.
    pub fn shader_time(&self) -> f32 {
        self.time.rem_euclid(TAU) as f32
    }

    /// Rotation angles as the model matrix sees them
    pub fn shader_rotation(&self) -> Vec2 {
        Vec2::new(
            self.rotation.x.rem_euclid(TAU) as f32,
            self.rotation.y.rem_euclid(TAU) as f32,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_linear_time_to_rotation() {
        let params = MotionParams::default();
        let one = CloudMotion::at(1000.0, &params);
        let two = CloudMotion::at(2000.0, &params);

        assert!((one.rotation.x - 0.05).abs() < 1e-6);
        assert!((two.rotation.x - 0.10).abs() < 1e-6);
        assert!((one.rotation.y - 0.075).abs() < 1e-6);
        assert!((two.rotation.y - 0.15).abs() < 1e-6);
        assert_eq!(two.time, 2.0);
    }

    #[test]
    fn test_monotonic() {
        let params = MotionParams::default();
        let mut prev = CloudMotion::at(16.0, &params);
        for frame in 2..600 {
            let next = CloudMotion::at(frame as f64 * 16.0, &params);
            assert!(next.time > prev.time);
            assert!(next.rotation.x > prev.rotation.x);
            assert!(next.rotation.y > prev.rotation.y);
            prev = next;
        }
    }

    #[test]
    fn test_long_uptime_frames_stay_distinct() {
        // About 83 hours in
        let params = MotionParams::default();
        let start = 300_000_000.0;
        let mut prev = CloudMotion::at(start, &params);
        for frame in 1..200 {
            let next = CloudMotion::at(start + frame as f64 * 16.0, &params);
            assert!(next.time > prev.time);
            assert!(next.rotation.x > prev.rotation.x);
            assert!(next.rotation.y > prev.rotation.y);
            assert_ne!(next.shader_time(), prev.shader_time());
            assert_ne!(next.shader_rotation().x, prev.shader_rotation().x);
            assert_ne!(next.shader_rotation().y, prev.shader_rotation().y);
            prev = next;
        }
    }

    #[test]
    fn test_shader_values_match_unwrapped_phase() {
        let params = MotionParams::default();
        let m = CloudMotion::at(300_000_000.0, &params);

        assert!(m.shader_time() >= 0.0 && (m.shader_time() as f64) < TAU);
        let expected = m.time.sin();
        assert!(((m.shader_time() as f64).sin() - expected).abs() < 1e-5);

        let r = m.shader_rotation();
        assert!(((r.x as f64).cos() - m.rotation.x.cos()).abs() < 1e-5);
        assert!(((r.y as f64).sin() - m.rotation.y.sin()).abs() < 1e-5);
    }

    #[test]
    fn test_zero_is_identity() {
        let m = CloudMotion::at(0.0, &MotionParams::default());
        assert_eq!(m, CloudMotion::default());
    }
}
