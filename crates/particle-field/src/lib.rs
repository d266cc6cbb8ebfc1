//! # Particle Field
//!
//! CPU-side data model for the ambient point-cloud backdrop: the points
//! themselves, the light/dark palettes they are colored from, and the
//! time-driven motion of the cloud.

pub mod constants;
pub mod field;
pub mod motion;
pub mod point;
pub mod theme;

pub use constants::*;
pub use field::*;
pub use motion::*;
pub use point::*;
pub use theme::*;
