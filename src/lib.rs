//! # glowfield
//!
//! A drifting field of glowing particles, rendered with wgpu.
//!
//! A fixed pool of particles is spawned at random inside a slab in front of
//! the camera. Every frame each particle ages, drifts along its velocity,
//! swells and shrinks, and fades in and out; once its lifetime is up it is
//! re-randomized in place. The whole field slowly turns about the Y axis.
//! Particles are drawn as additive point sprites with a soft radial falloff.
//!
//! ## Quick Start
//!
//! ```ignore
//! use glowfield::prelude::*;
//!
//! fn main() -> Result<(), RunError> {
//!     env_logger::init();
//!     glowfield::run(FieldConfig::default().with_particle_count(300))
//! }
//! ```
//!
//! ## Headless use
//!
//! [`ParticleField`] owns all animated state and needs no GPU:
//!
//! ```ignore
//! let mut field = ParticleField::new(&FieldConfig::default().with_seed(1));
//! field.tick(1.0 / 60.0);
//! let vertices: &[ParticleGpu] = field.gpu_particles();
//! ```

pub mod color;
pub mod config;
pub mod error;
pub mod field;
mod gpu;
pub mod math;
pub mod particle;
mod shader;
pub mod time;
mod window;

pub use color::Rgb;
pub use config::{max_particle_count, CameraConfig, FieldConfig, FloatRange, WindowConfig};
pub use error::{ConfigError, GpuError, RunError};
pub use field::ParticleField;
pub use glam::{Mat4, Vec3};
pub use gpu::Camera;
pub use particle::{Particle, ParticleGpu, ParticlePool};
pub use shader::SHADER_SOURCE;
pub use time::FrameClock;
pub use window::run;

/// Convenient re-exports for common usage.
pub mod prelude {
    pub use crate::color::Rgb;
    pub use crate::config::{FieldConfig, FloatRange};
    pub use crate::error::RunError;
    pub use crate::field::ParticleField;
    pub use crate::particle::ParticleGpu;
    pub use crate::window::run;
}
