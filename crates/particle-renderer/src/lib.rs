//! # Particle Renderer
//!
//! Ambient point-cloud backdrop: camera, shading pipeline and the owned
//! [`Backdrop`] context a host drives with frame, resize and theme events.

pub mod backdrop;
pub mod camera;
pub mod composite;
pub mod error;
pub mod gpu;
pub mod renderer;
pub mod shading;

pub use backdrop::*;
pub use camera::*;
pub use composite::*;
pub use error::*;
pub use gpu::*;
pub use renderer::*;
