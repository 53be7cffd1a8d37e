//! The particle pool and its per-frame update.
//!
//! The pool is a fixed array: slot `i` always describes particle `i`. A
//! particle whose age reaches its lifetime is not removed, it is re-randomized
//! in place and starts a new life from age zero.
//!
//! Over one life, with `t = age / lifetime`:
//!
//! | Attribute | Value |
//! |-----------|-------|
//! | position | integrates `velocity * speed_multiplier` |
//! | size | oscillates once between `size_range` and shrinks toward the end |
//! | opacity | rises from `opacity_floor` to `floor + peak` at mid-life, then falls back |

use std::f32::consts::{PI, TAU};

use bytemuck::{Pod, Zeroable};
use glam::Vec3;
use rand::Rng;

use crate::config::FieldConfig;
use crate::math::{lerp, rand_float, rand_float_spread, smoothstep};

/// One particle of the field.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Particle {
    pub position: Vec3,
    pub velocity: Vec3,
    /// Seconds since (re)spawn.
    pub age: f32,
    /// Seconds until respawn.
    pub lifetime: f32,
    pub size: f32,
    pub opacity: f32,
}

impl Particle {
    /// Fraction of the lifetime already lived, in `[0, 1)` after an update.
    #[inline]
    pub fn life_fraction(&self) -> f32 {
        self.age / self.lifetime
    }

    #[inline]
    pub fn to_gpu(&self) -> ParticleGpu {
        ParticleGpu {
            position: self.position.to_array(),
            size: self.size,
            opacity: self.opacity,
            _padding: [0.0; 3],
        }
    }
}

/// Vertex layout of one particle instance.
///
/// Must match `ParticleInput` in `src/shader.wgsl`.
#[repr(C)]
#[derive(Copy, Clone, Debug, Default, PartialEq, Pod, Zeroable)]
pub struct ParticleGpu {
    pub position: [f32; 3],
    pub size: f32,
    pub opacity: f32,
    pub _padding: [f32; 3],
}

impl ParticleGpu {
    pub const SIZE_OFFSET: u32 = 12;
    pub const OPACITY_OFFSET: u32 = 16;
}

/// Spawn and animation parameters, pulled out of [`FieldConfig`] once.
#[derive(Clone, Debug)]
struct Motion {
    spread: f32,
    depth_spread: f32,
    depth_offset: f32,
    lateral_speed: f32,
    forward_speed: (f32, f32),
    lifetime: (f32, f32),
    spawn_size: (f32, f32),
    speed_multiplier: f32,
    size_range: (f32, f32),
    shrink: f32,
    opacity_floor: f32,
    opacity_peak: f32,
}

impl Motion {
    fn from_config(config: &FieldConfig) -> Self {
        Self {
            spread: config.spread,
            depth_spread: config.spread * config.depth_spread_factor,
            depth_offset: config.depth_offset,
            lateral_speed: config.lateral_speed,
            forward_speed: (config.forward_speed.min, config.forward_speed.max),
            lifetime: (config.lifetime.min, config.lifetime.max),
            spawn_size: (config.spawn_size.min, config.spawn_size.max),
            speed_multiplier: config.speed_multiplier,
            size_range: (config.size_range.min, config.size_range.max),
            shrink: config.shrink,
            opacity_floor: config.opacity_floor,
            opacity_peak: config.opacity_peak,
        }
    }

    fn spawn<R: Rng + ?Sized>(&self, rng: &mut R) -> Particle {
        Particle {
            position: Vec3::new(
                rand_float_spread(rng, self.spread),
                rand_float_spread(rng, self.spread),
                rand_float_spread(rng, self.depth_spread) + self.depth_offset,
            ),
            velocity: Vec3::new(
                rand_float_spread(rng, self.lateral_speed),
                rand_float_spread(rng, self.lateral_speed),
                rand_float(rng, self.forward_speed.0, self.forward_speed.1),
            ),
            lifetime: rand_float(rng, self.lifetime.0, self.lifetime.1),
            age: 0.0,
            size: rand_float(rng, self.spawn_size.0, self.spawn_size.1),
            opacity: 0.0,
        }
    }
}

/// Fixed-size pool of particles.
pub struct ParticlePool<R: Rng> {
    particles: Vec<Particle>,
    motion: Motion,
    rng: R,
}

impl<R: Rng> ParticlePool<R> {
    /// Create `config.particle_count` freshly randomized particles.
    ///
    /// The config is expected to be validated.
    pub fn new(config: &FieldConfig, mut rng: R) -> Self {
        let motion = Motion::from_config(config);
        let particles = (0..config.particle_count)
            .map(|_| motion.spawn(&mut rng))
            .collect();
        Self {
            particles,
            motion,
            rng,
        }
    }

    /// Re-randomize particle `index` in place.
    ///
    /// # Panics
    ///
    /// Panics if `index` is out of bounds.
    pub fn respawn(&mut self, index: usize) {
        self.particles[index] = self.motion.spawn(&mut self.rng);
    }

    /// Advance every particle by `delta` seconds.
    pub fn update(&mut self, delta: f32) {
        let m = &self.motion;
        for p in self.particles.iter_mut() {
            p.age += delta;
            if p.age >= p.lifetime {
                *p = m.spawn(&mut self.rng);
            }

            let t = p.life_fraction();
            let ease = smoothstep(t, 0.0, 1.0);
            let wobble = (t * TAU).sin() * 0.5 + 0.5;

            p.position += p.velocity * delta * m.speed_multiplier;
            p.size = lerp(m.size_range.0, m.size_range.1, wobble) * (1.0 - ease * m.shrink);
            p.opacity = (t * PI).sin() * m.opacity_peak + m.opacity_floor;
        }
    }

    /// Pack every particle into `out`, which must hold exactly `len()` entries.
    pub fn write_gpu(&self, out: &mut [ParticleGpu]) {
        debug_assert_eq!(out.len(), self.particles.len());
        for (dst, p) in out.iter_mut().zip(&self.particles) {
            *dst = p.to_gpu();
        }
    }

    pub fn to_gpu(&self) -> Vec<ParticleGpu> {
        self.particles.iter().map(Particle::to_gpu).collect()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.particles.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.particles.is_empty()
    }

    #[inline]
    pub fn get(&self, index: usize) -> Option<&Particle> {
        self.particles.get(index)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Particle> {
        self.particles.iter()
    }

    pub fn as_slice(&self) -> &[Particle] {
        &self.particles
    }

    #[cfg(test)]
    pub(crate) fn particles_mut(&mut self) -> &mut [Particle] {
        &mut self.particles
    }
}
