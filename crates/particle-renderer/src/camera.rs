//! Perspective camera and viewport math

use bytemuck::{Pod, Zeroable};
use glam::{EulerRot, Mat4, Vec2, Vec3};

/// Upper bound on the device pixel ratio used for the backing surface
pub const MAX_PIXEL_RATIO: f32 = 2.0;

/// Frame uniform for GPU.
/// Field order matches `FrameUniform` in `point_cloud.wgsl`.
#[repr(C)]
#[derive(Clone, Copy, Debug, Pod, Zeroable)]
pub struct CameraUniform {
    pub model_view: [[f32; 4]; 4],
    pub projection: [[f32; 4]; 4],
    /// Backing surface size in pixels
    pub target_size: [f32; 2],
    pub time: f32,
    pub opacity: f32,
    pub size_attenuation: f32,
    pub pulse_amplitude: f32,
    pub _padding: [f32; 2],
}

/// Drawable area in logical pixels plus the host's scale factor
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Viewport {
    pub width: f32,
    pub height: f32,
    pub scale_factor: f32,
}

impl Viewport {
    pub fn new(width: f32, height: f32) -> Self {
        Self {
            width,
            height,
            scale_factor: 1.0,
        }
    }

    pub fn with_scale_factor(mut self, scale_factor: f32) -> Self {
        self.scale_factor = scale_factor;
        self
    }

    /// Build from a physical window size (what windowing systems report)
    pub fn from_physical(width: u32, height: u32, scale_factor: f64) -> Self {
        let scale = scale_factor as f32;
        Self::new(width as f32 / scale, height as f32 / scale).with_scale_factor(scale)
    }

    pub fn is_valid(&self) -> bool {
        self.width > 0.0
            && self.height > 0.0
            && self.width.is_finite()
            && self.height.is_finite()
            && self.scale_factor > 0.0
    }

    pub fn aspect(&self) -> f32 {
        self.width / self.height
    }

    pub fn pixel_ratio(&self, max_pixel_ratio: f32) -> f32 {
        self.scale_factor.min(max_pixel_ratio)
    }

    /// Size of the buffer actually shaded, after capping the pixel ratio
    pub fn backing_size(&self, max_pixel_ratio: f32) -> (u32, u32) {
        let ratio = self.pixel_ratio(max_pixel_ratio);
        scaled(self.width, self.height, ratio)
    }

    /// Size of the presentable window surface
    pub fn physical_size(&self) -> (u32, u32) {
        scaled(self.width, self.height, self.scale_factor)
    }
}

fn scaled(width: f32, height: f32, ratio: f32) -> (u32, u32) {
    (
        ((width * ratio).round() as u32).max(1),
        ((height * ratio).round() as u32).max(1),
    )
}

/// Projection settings
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CameraSettings {
    pub fov_y_degrees: f32,
    pub znear: f32,
    pub zfar: f32,
    /// Distance from the origin along +z
    pub distance: f32,
}

impl Default for CameraSettings {
    fn default() -> Self {
        Self {
            fov_y_degrees: 75.0,
            znear: 0.1,
            zfar: 1000.0,
            distance: 5.0,
        }
    }
}

/// Fixed camera on the +z axis looking at the origin
#[derive(Clone, Debug, PartialEq)]
pub struct Camera {
    pub position: Vec3,
    pub aspect: f32,
    pub fovy: f32,
    pub znear: f32,
    pub zfar: f32,
    projection: Mat4,
}

impl Camera {
    pub fn new(settings: &CameraSettings, aspect: f32) -> Self {
        let mut camera = Self {
            position: Vec3::new(0.0, 0.0, settings.distance),
            aspect,
            fovy: settings.fov_y_degrees.to_radians(),
            znear: settings.znear,
            zfar: settings.zfar,
            projection: Mat4::IDENTITY,
        };
        camera.update_projection_matrix();
        camera
    }

    /// Recompute the cached projection after changing any lens field
    pub fn update_projection_matrix(&mut self) {
        self.projection = Mat4::perspective_rh(self.fovy, self.aspect, self.znear, self.zfar);
    }

    pub fn resize(&mut self, viewport: &Viewport) {
        self.aspect = viewport.aspect();
        self.update_projection_matrix();
    }

    pub fn projection(&self) -> Mat4 {
        self.projection
    }

    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at_rh(self.position, self.position - Vec3::Z, Vec3::Y)
    }

    pub fn to_uniform(
        &self,
        model: Mat4,
        target_size: (u32, u32),
        time: f32,
        opacity: f32,
        size_attenuation: f32,
        pulse_amplitude: f32,
    ) -> CameraUniform {
        CameraUniform {
            model_view: (self.view_matrix() * model).to_cols_array_2d(),
            projection: self.projection.to_cols_array_2d(),
            target_size: [target_size.0 as f32, target_size.1 as f32],
            time,
            opacity,
            size_attenuation,
            pulse_amplitude,
            _padding: [0.0; 2],
        }
    }
}

/// Object transform for a cloud rotated by `rotation` (x then y, radians)
pub fn cloud_model_matrix(rotation: Vec2) -> Mat4 {
    Mat4::from_euler(EulerRot::XYZ, rotation.x, rotation.y, 0.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_uniform_is_16_byte_aligned() {
        assert_eq!(std::mem::size_of::<CameraUniform>() % 16, 0);
        assert_eq!(std::mem::size_of::<CameraUniform>(), 160);
    }

    #[test]
    fn test_default_lens() {
        let camera = Camera::new(&CameraSettings::default(), 1024.0 / 768.0);
        assert_eq!(camera.position, Vec3::new(0.0, 0.0, 5.0));
        assert!((camera.fovy - 75.0_f32.to_radians()).abs() < 1e-6);
        assert_eq!(camera.znear, 0.1);
        assert_eq!(camera.zfar, 1000.0);
    }

    #[test]
    fn test_origin_is_in_front_of_camera() {
        let camera = Camera::new(&CameraSettings::default(), 1.0);
        let view_pos = camera.view_matrix().transform_point3(Vec3::ZERO);
        assert!((view_pos.z + 5.0).abs() < 1e-5);
    }

    #[test]
    fn test_resize_is_idempotent() {
        let mut camera = Camera::new(&CameraSettings::default(), 1.0);
        let viewport = Viewport::new(375.0, 812.0);

        camera.resize(&viewport);
        let first = camera.clone();
        camera.resize(&viewport);

        assert_eq!(camera, first);
        assert!((camera.aspect - 375.0 / 812.0).abs() < 1e-6);
    }

    #[test]
    fn test_pixel_ratio_is_capped() {
        let retina = Viewport::new(800.0, 600.0).with_scale_factor(3.0);
        assert_eq!(retina.pixel_ratio(MAX_PIXEL_RATIO), 2.0);
        assert_eq!(retina.backing_size(MAX_PIXEL_RATIO), (1600, 1200));
        assert_eq!(retina.physical_size(), (2400, 1800));

        let plain = Viewport::new(800.0, 600.0).with_scale_factor(1.5);
        assert_eq!(plain.backing_size(MAX_PIXEL_RATIO), (1200, 900));
    }

    #[test]
    fn test_from_physical() {
        let viewport = Viewport::from_physical(2048, 1536, 2.0);
        assert_eq!(viewport.width, 1024.0);
        assert_eq!(viewport.height, 768.0);
        assert_eq!(viewport.physical_size(), (2048, 1536));
    }

    #[test]
    fn test_invalid_viewports() {
        assert!(!Viewport::new(0.0, 600.0).is_valid());
        assert!(!Viewport::new(800.0, f32::NAN).is_valid());
        assert!(Viewport::new(1.0, 1.0).is_valid());
    }

    #[test]
    fn test_model_matrix_rotates_x_first() {
        let m = cloud_model_matrix(Vec2::new(std::f32::consts::FRAC_PI_2, 0.0));
        let v = m.transform_vector3(Vec3::Y);
        assert!((v - Vec3::Z).length() < 1e-5);
    }
}
