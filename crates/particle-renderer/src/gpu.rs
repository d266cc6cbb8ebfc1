//! wgpu-backed [`SceneRenderer`] bound to a window surface

use particle_field::Theme;

use crate::backdrop::{FrameView, SceneRenderer};
use crate::camera::{cloud_model_matrix, Viewport};
use crate::composite::Compositor;
use crate::error::{BackdropError, RenderError};
use crate::renderer::PointCloudRenderer;
use crate::shading::{POINT_OPACITY, PULSE_AMPLITUDE, SIZE_ATTENUATION};

/// Background behind the cloud for `theme`, in linear space
pub fn clear_color(theme: Theme) -> wgpu::Color {
    let base = match theme {
        Theme::Dark => catppuccin::PALETTE.mocha.colors.base.rgb,
        Theme::Light => catppuccin::PALETTE.latte.colors.base.rgb,
    };
    wgpu::Color {
        r: srgb_to_linear(base.r),
        g: srgb_to_linear(base.g),
        b: srgb_to_linear(base.b),
        a: 1.0,
    }
}

fn srgb_to_linear(c: u8) -> f64 {
    let x = c as f64 / 255.0;
    if x <= 0.04045 {
        x / 12.92
    } else {
        ((x + 0.055) / 1.055).powf(2.4)
    }
}

pub struct GpuScene {
    surface: wgpu::Surface<'static>,
    device: wgpu::Device,
    queue: wgpu::Queue,
    config: wgpu::SurfaceConfiguration,
    cloud_renderer: PointCloudRenderer,
    compositor: Compositor,
    max_pixel_ratio: f32,
}

impl GpuScene {
    /// Acquire a surface for `target` and build the pipelines.
    ///
    /// Any failure here means there is nothing to draw on; callers should
    /// not start a frame loop.
    pub async fn new(
        target: impl Into<wgpu::SurfaceTarget<'static>>,
        viewport: Viewport,
        max_pixel_ratio: f32,
    ) -> Result<Self, BackdropError> {
        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends: wgpu::Backends::PRIMARY,
            ..Default::default()
        });

        let surface = instance.create_surface(target)?;

        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::LowPower,
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
            .map_err(|_| BackdropError::NoAdapter)?;

        log::info!("✓ Using GPU: {}", adapter.get_info().name);

        let (device, queue) = adapter
            .request_device(&wgpu::DeviceDescriptor {
                label: Some("Backdrop Device"),
                required_features: wgpu::Features::empty(),
                required_limits: wgpu::Limits::downlevel_webgl2_defaults()
                    .using_resolution(adapter.limits()),
                memory_hints: wgpu::MemoryHints::default(),
                experimental_features: wgpu::ExperimentalFeatures::default(),
                trace: wgpu::Trace::Off,
            })
            .await?;

        let surface_caps = surface.get_capabilities(&adapter);
        let surface_format = surface_caps
            .formats
            .iter()
            .find(|f| f.is_srgb())
            .or_else(|| surface_caps.formats.first())
            .copied()
            .ok_or(BackdropError::UnsupportedSurface)?;
        let alpha_mode = surface_caps
            .alpha_modes
            .first()
            .copied()
            .ok_or(BackdropError::UnsupportedSurface)?;

        let (width, height) = viewport.physical_size();
        let config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format: surface_format,
            width,
            height,
            // Vsync paces frames at the display refresh rate
            present_mode: wgpu::PresentMode::AutoVsync,
            alpha_mode,
            view_formats: vec![],
            desired_maximum_frame_latency: 2,
        };
        surface.configure(&device, &config);

        let cloud_renderer = PointCloudRenderer::new(&device, surface_format);
        let compositor =
            Compositor::new(&device, surface_format, viewport.backing_size(max_pixel_ratio));
        log::info!("✓ Point cloud renderer initialized ({:?})", surface_format);

        Ok(Self {
            surface,
            device,
            queue,
            config,
            cloud_renderer,
            compositor,
            max_pixel_ratio,
        })
    }
}

impl SceneRenderer for GpuScene {
    fn resize(&mut self, viewport: &Viewport) {
        let (width, height) = viewport.physical_size();
        self.config.width = width;
        self.config.height = height;
        // Always reconfigure: a lost or outdated surface recovers through here too
        self.surface.configure(&self.device, &self.config);
        self.compositor
            .resize(&self.device, viewport.backing_size(self.max_pixel_ratio));
    }

    fn render(&mut self, frame: &FrameView<'_>) -> Result<(), RenderError> {
        let output = self.surface.get_current_texture()?;
        let surface_view = output
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());

        let (instances, motion) = match &frame.cloud {
            Some(cloud) => {
                if cloud.colors_dirty {
                    self.cloud_renderer
                        .upload_points(&self.device, &self.queue, cloud.points);
                }
                (cloud.points.len() as u32, cloud.motion)
            }
            None => (0, Default::default()),
        };

        let uniform = frame.camera.to_uniform(
            cloud_model_matrix(motion.shader_rotation()),
            self.compositor.size(),
            motion.shader_time(),
            POINT_OPACITY,
            SIZE_ATTENUATION,
            PULSE_AMPLITUDE,
        );

        let mut encoder = self
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("Backdrop Encoder"),
            });

        self.cloud_renderer.render(
            &self.queue,
            &mut encoder,
            self.compositor.target_view(),
            &uniform,
            clear_color(frame.theme),
            instances,
        );
        self.compositor.composite(&mut encoder, &surface_view);

        self.queue.submit(std::iter::once(encoder.finish()));
        output.present();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_srgb_endpoints() {
        assert_eq!(srgb_to_linear(0), 0.0);
        assert!((srgb_to_linear(255) - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_mocha_base_matches_known_linear_value() {
        // Mocha base is #1e1e2e
        let c = clear_color(Theme::Dark);
        assert!((c.r - 0.01298).abs() < 1e-4);
        assert!((c.b - 0.02732).abs() < 1e-4);
        assert_eq!(c.a, 1.0);
    }

    #[test]
    fn test_light_background_is_brighter() {
        let light = clear_color(Theme::Light);
        let dark = clear_color(Theme::Dark);
        assert!(light.r > dark.r && light.g > dark.g && light.b > dark.b);
    }
}
