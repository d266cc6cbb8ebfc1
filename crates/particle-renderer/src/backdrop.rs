//! The particle backdrop: an owned context driving one animated point cloud
//!
//! A [`Backdrop`] is created empty and becomes live with
//! [`Backdrop::initialize`], which builds the camera and the field, binds a
//! [`SceneRenderer`], and starts the frame loop. The host then forwards
//! three kinds of events:
//!
//! - [`Backdrop::on_frame`] once per display refresh
//! - [`Backdrop::on_resize`] when the drawable area changes
//! - [`Backdrop::on_theme_change`] when the page theme flips
//!
//! All of these run on the host's UI thread, so effects of a resize or a
//! theme change are visible to the very next frame.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use particle_field::{CloudMotion, FieldParams, MotionParams, ParticleField, Point, Theme};
use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::camera::{Camera, CameraSettings, Viewport, MAX_PIXEL_RATIO};
use crate::error::{BackdropError, RenderError};

/// What a renderer needs to draw one frame
#[derive(Clone, Copy, Debug)]
pub struct FrameView<'a> {
    pub camera: &'a Camera,
    pub theme: Theme,
    /// `None` renders an empty scene
    pub cloud: Option<CloudView<'a>>,
}

#[derive(Clone, Copy, Debug)]
pub struct CloudView<'a> {
    pub points: &'a [Point],
    /// Point data changed since the last successful frame
    pub colors_dirty: bool,
    pub motion: CloudMotion,
}

/// Drawing backend bound to a drawable surface
pub trait SceneRenderer {
    /// Match the backing surface to `viewport`
    fn resize(&mut self, viewport: &Viewport);

    fn render(&mut self, frame: &FrameView<'_>) -> Result<(), RenderError>;
}

/// Shared switch for the frame loop.
///
/// Cloning yields another handle to the same loop.
#[derive(Clone, Debug)]
pub struct LoopHandle {
    running: Arc<AtomicBool>,
}

impl LoopHandle {
    fn started() -> Self {
        Self {
            running: Arc::new(AtomicBool::new(true)),
        }
    }

    pub fn stop(&self) {
        if self.running.swap(false, Ordering::Relaxed) {
            log::debug!("Frame loop stopped");
        }
    }

    pub fn resume(&self) {
        if !self.running.swap(true, Ordering::Relaxed) {
            log::debug!("Frame loop resumed");
        }
    }

    pub fn is_running(&self) -> bool {
        self.running.load(Ordering::Relaxed)
    }
}

/// Everything tunable about a backdrop
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BackdropSettings {
    pub field: FieldParams,
    pub motion: MotionParams,
    pub camera: CameraSettings,
    pub max_pixel_ratio: f32,
    /// Fixed seed for reproducible fields; `None` seeds from the OS
    pub seed: Option<u64>,
}

impl Default for BackdropSettings {
    fn default() -> Self {
        Self {
            field: FieldParams::default(),
            motion: MotionParams::default(),
            camera: CameraSettings::default(),
            max_pixel_ratio: MAX_PIXEL_RATIO,
            seed: None,
        }
    }
}

struct PointCloud {
    field: ParticleField,
    motion: CloudMotion,
}

pub struct Backdrop<R> {
    settings: BackdropSettings,
    rng: StdRng,
    renderer: Option<R>,
    camera: Camera,
    viewport: Viewport,
    theme: Theme,
    cloud: Option<PointCloud>,
    frame_loop: Option<LoopHandle>,
}

impl<R: SceneRenderer> Backdrop<R> {
    pub fn new(settings: BackdropSettings) -> Self {
        let rng = match settings.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };
        Self {
            settings,
            rng,
            renderer: None,
            camera: Camera::new(&settings.camera, 1.0),
            viewport: Viewport::new(1.0, 1.0),
            theme: Theme::default(),
            cloud: None,
            frame_loop: None,
        }
    }

    /// Bind `renderer`, build camera and field, and start the frame loop.
    ///
    /// Fails with [`BackdropError::AlreadyInitialized`] unless the backdrop
    /// is fresh or has been through [`Backdrop::teardown`].
    pub fn initialize(
        &mut self,
        mut renderer: R,
        viewport: Viewport,
        theme: Theme,
    ) -> Result<LoopHandle, BackdropError> {
        if self.renderer.is_some() {
            return Err(BackdropError::AlreadyInitialized);
        }
        if !viewport.is_valid() {
            return Err(BackdropError::InvalidViewport {
                width: viewport.width,
                height: viewport.height,
            });
        }

        self.viewport = viewport;
        self.theme = theme;
        self.camera = Camera::new(&self.settings.camera, viewport.aspect());
        renderer.resize(&viewport);
        self.renderer = Some(renderer);

        let field =
            ParticleField::generate(viewport.width, theme, &self.settings.field, &mut self.rng);
        self.cloud = Some(PointCloud {
            field,
            motion: CloudMotion::default(),
        });

        let handle = LoopHandle::started();
        self.frame_loop = Some(handle.clone());
        log::info!(
            "✓ Backdrop initialized ({:.0}x{:.0} @ {:.2}x, {} theme)",
            viewport.width,
            viewport.height,
            viewport.pixel_ratio(self.settings.max_pixel_ratio),
            theme
        );
        Ok(handle)
    }

    /// Advance to `now_millis` and draw one frame.
    ///
    /// A no-op before initialization or while the loop is stopped.
    pub fn on_frame(&mut self, now_millis: f64) -> Result<(), RenderError> {
        if !self.is_running() {
            log::trace!("Frame skipped: loop not running");
            return Ok(());
        }
        let Some(renderer) = self.renderer.as_mut() else {
            return Ok(());
        };

        if let Some(cloud) = self.cloud.as_mut() {
            cloud.motion = CloudMotion::at(now_millis, &self.settings.motion);
        }

        let frame = FrameView {
            camera: &self.camera,
            theme: self.theme,
            // An empty field draws as an empty scene
            cloud: self
                .cloud
                .as_ref()
                .filter(|cloud| !cloud.field.is_empty())
                .map(|cloud| CloudView {
                    points: cloud.field.points(),
                    colors_dirty: cloud.field.colors_dirty(),
                    motion: cloud.motion,
                }),
        };
        renderer.render(&frame)?;

        if let Some(cloud) = self.cloud.as_mut() {
            cloud.field.mark_uploaded();
        }
        Ok(())
    }

    /// Update camera aspect and backing surface. Zero-sized viewports
    /// (minimized windows) are ignored.
    pub fn on_resize(&mut self, viewport: Viewport) {
        if !viewport.is_valid() {
            log::trace!("Ignoring degenerate viewport {:?}", viewport);
            return;
        }
        self.viewport = viewport;
        self.camera.resize(&viewport);
        if let Some(renderer) = self.renderer.as_mut() {
            renderer.resize(&viewport);
        }
        log::debug!(
            "Viewport resized to {:.0}x{:.0} (aspect {:.4})",
            viewport.width,
            viewport.height,
            self.camera.aspect
        );
    }

    /// Recolor every point from `theme`'s palette
    pub fn on_theme_change(&mut self, theme: Theme) {
        self.theme = theme;
        if let Some(cloud) = self.cloud.as_mut() {
            cloud.field.recolor(theme, &mut self.rng);
        }
    }

    /// Stop the loop and release renderer and cloud.
    /// The backdrop can be initialized again afterwards.
    pub fn teardown(&mut self) {
        if let Some(handle) = self.frame_loop.take() {
            handle.stop();
        }
        self.cloud = None;
        self.renderer = None;
        log::debug!("Backdrop torn down");
    }

    pub fn is_initialized(&self) -> bool {
        self.renderer.is_some()
    }

    pub fn is_running(&self) -> bool {
        self.frame_loop.as_ref().is_some_and(LoopHandle::is_running)
    }

    pub fn field(&self) -> Option<&ParticleField> {
        self.cloud.as_ref().map(|cloud| &cloud.field)
    }

    pub fn motion(&self) -> Option<CloudMotion> {
        self.cloud.as_ref().map(|cloud| cloud.motion)
    }

    pub fn camera(&self) -> &Camera {
        &self.camera
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    pub fn theme(&self) -> Theme {
        self.theme
    }

    pub fn renderer(&self) -> Option<&R> {
        self.renderer.as_ref()
    }

    pub fn renderer_mut(&mut self) -> Option<&mut R> {
        self.renderer.as_mut()
    }

    pub fn settings(&self) -> &BackdropSettings {
        &self.settings
    }
}
