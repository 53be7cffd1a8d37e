//! The animated particle field.
//!
//! [`ParticleField`] is everything that changes from frame to frame: the
//! particle pool and the slow rotation of the whole scene about the Y axis.
//! It has no GPU state, so the whole animation can be driven headlessly.

use glam::Mat4;
use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::config::FieldConfig;
use crate::particle::{ParticleGpu, ParticlePool};

/// Particle pool plus scene rotation, advanced once per frame.
pub struct ParticleField {
    pool: ParticlePool<StdRng>,
    gpu_data: Vec<ParticleGpu>,
    rotation_y: f32,
    rotation_speed: f32,
}

impl ParticleField {
    /// Build a field from a validated config.
    pub fn new(config: &FieldConfig) -> Self {
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        let pool = ParticlePool::new(config, rng);
        let gpu_data = pool.to_gpu();

        log::debug!(
            "spawned {} particles (seed: {:?})",
            pool.len(),
            config.seed
        );

        Self {
            pool,
            gpu_data,
            rotation_y: 0.0,
            rotation_speed: config.rotation_speed,
        }
    }

    /// Advance the field by `delta` seconds.
    ///
    /// Negative or non-finite deltas are treated as 0.
    pub fn tick(&mut self, delta: f32) {
        let delta = if delta.is_finite() { delta.max(0.0) } else { 0.0 };

        self.pool.update(delta);
        self.pool.write_gpu(&mut self.gpu_data);
        self.rotation_y += delta * self.rotation_speed;
    }

    /// Current scene rotation about Y in radians.
    #[inline]
    pub fn rotation(&self) -> f32 {
        self.rotation_y
    }

    /// Model matrix applied to every particle.
    pub fn model_matrix(&self) -> Mat4 {
        Mat4::from_rotation_y(self.rotation_y)
    }

    /// Vertex data as of the latest tick, ready for upload.
    #[inline]
    pub fn gpu_particles(&self) -> &[ParticleGpu] {
        &self.gpu_data
    }

    #[inline]
    pub fn particles(&self) -> &ParticlePool<StdRng> {
        &self.pool
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.pool.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.pool.is_empty()
    }
}
