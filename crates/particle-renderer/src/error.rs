//! Error types for the backdrop renderer

use thiserror::Error;

/// Failures that prevent the backdrop from starting
#[derive(Error, Debug)]
pub enum BackdropError {
    #[error("failed to create drawable surface: {0}")]
    SurfaceCreation(#[from] wgpu::CreateSurfaceError),

    #[error("no compatible GPU adapter found")]
    NoAdapter,

    #[error("failed to request device: {0}")]
    DeviceRequest(#[from] wgpu::RequestDeviceError),

    #[error("surface reports no supported formats for this adapter")]
    UnsupportedSurface,

    #[error("backdrop is already initialized; tear it down first")]
    AlreadyInitialized,

    #[error("invalid viewport {width}x{height}")]
    InvalidViewport { width: f32, height: f32 },
}

/// Per-frame failures
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RenderError {
    #[error("surface lost")]
    SurfaceLost,

    #[error("surface outdated")]
    SurfaceOutdated,

    #[error("timed out acquiring surface texture")]
    Timeout,

    #[error("out of memory")]
    OutOfMemory,

    #[error("render error: {0}")]
    Other(String),
}

impl RenderError {
    /// Whether reconfiguring the surface is expected to fix this
    pub fn needs_reconfigure(&self) -> bool {
        matches!(self, RenderError::SurfaceLost | RenderError::SurfaceOutdated)
    }
}

impl From<wgpu::SurfaceError> for RenderError {
    fn from(err: wgpu::SurfaceError) -> Self {
        match err {
            wgpu::SurfaceError::Lost => RenderError::SurfaceLost,
            wgpu::SurfaceError::Outdated => RenderError::SurfaceOutdated,
            wgpu::SurfaceError::Timeout => RenderError::Timeout,
            wgpu::SurfaceError::OutOfMemory => RenderError::OutOfMemory,
            other => RenderError::Other(other.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_surface_errors_map() {
        assert_eq!(RenderError::from(wgpu::SurfaceError::Lost), RenderError::SurfaceLost);
        assert_eq!(
            RenderError::from(wgpu::SurfaceError::Outdated),
            RenderError::SurfaceOutdated
        );
        assert_eq!(RenderError::from(wgpu::SurfaceError::OutOfMemory), RenderError::OutOfMemory);
    }

    #[test]
    fn test_reconfigure_only_for_lost_or_outdated() {
        assert!(RenderError::SurfaceLost.needs_reconfigure());
        assert!(RenderError::SurfaceOutdated.needs_reconfigure());
        assert!(!RenderError::Timeout.needs_reconfigure());
        assert!(!RenderError::OutOfMemory.needs_reconfigure());
    }
}
