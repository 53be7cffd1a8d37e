//! Configuration for a particle field.
//!
//! A [`FieldConfig`] holds every tunable of the field. The defaults reproduce
//! the stock look: 200 pale blue particles drifting away from the camera over
//! a dark navy background. Configs can be saved to and loaded from JSON, and
//! any key missing from a file falls back to its default.
//!
//! # Example
//!
//! ```ignore
//! let config = FieldConfig::default()
//!     .with_particle_count(400)
//!     .with_seed(42)
//!     .with_color(Rgb::from_hex(0xffb060));
//! config.save("warm.json")?;
//! ```

use std::fs;
use std::path::Path;

use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::color::Rgb;
use crate::error::ConfigError;
use crate::particle::ParticleGpu;

/// Largest pool whose vertex buffer fits wgpu's default `max_buffer_size`.
pub fn max_particle_count() -> u32 {
    let max_bytes = wgpu::Limits::default().max_buffer_size;
    let per_particle = std::mem::size_of::<ParticleGpu>() as u64;
    (max_bytes / per_particle).min(u32::MAX as u64) as u32
}

/// A closed `min..=max` range of floats.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq)]
pub struct FloatRange {
    pub min: f32,
    pub max: f32,
}

impl FloatRange {
    pub const fn new(min: f32, max: f32) -> Self {
        Self { min, max }
    }

    fn check(&self, name: &str) -> Result<(), ConfigError> {
        if !self.min.is_finite() || !self.max.is_finite() {
            return Err(ConfigError::Invalid(format!("{} must be finite", name)));
        }
        if self.min > self.max {
            return Err(ConfigError::Invalid(format!(
                "{} has min {} greater than max {}",
                name, self.min, self.max
            )));
        }
        Ok(())
    }
}

/// Perspective camera settings.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct CameraConfig {
    /// Vertical field of view in degrees.
    pub fov_degrees: f32,
    pub near: f32,
    pub far: f32,
    pub position: [f32; 3],
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            fov_degrees: 60.0,
            near: 0.1,
            far: 1000.0,
            position: [0.0, 0.0, 75.0],
        }
    }
}

impl CameraConfig {
    pub fn position(&self) -> Vec3 {
        Vec3::from_array(self.position)
    }
}

/// Window attributes.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct WindowConfig {
    pub title: String,
    /// Logical width in points.
    pub width: u32,
    /// Logical height in points.
    pub height: u32,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            title: "glowfield".into(),
            width: 1280,
            height: 720,
        }
    }
}

/// Complete field configuration.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct FieldConfig {
    /// Number of particles in the pool. Fixed for the lifetime of the field.
    pub particle_count: u32,
    /// Spawn extent on X and Y, centered on the origin.
    pub spread: f32,
    /// Spawn extent on Z as a fraction of `spread`.
    pub depth_spread_factor: f32,
    /// Added to every spawned Z coordinate.
    pub depth_offset: f32,
    /// Extent of the X/Y spawn velocity, centered on zero.
    pub lateral_speed: f32,
    /// Z spawn velocity.
    pub forward_speed: FloatRange,
    /// Seconds a particle lives before it respawns.
    pub lifetime: FloatRange,
    /// Size assigned at spawn, before the first tick resizes it.
    pub spawn_size: FloatRange,
    /// Scales velocity when integrating position.
    pub speed_multiplier: f32,
    /// Endpoints of the size oscillation over a lifetime.
    pub size_range: FloatRange,
    /// Fraction of the size lost by the end of a lifetime.
    pub shrink: f32,
    pub opacity_floor: f32,
    pub opacity_peak: f32,
    /// Scene rotation about Y, in radians per second.
    pub rotation_speed: f32,
    pub color: Rgb,
    pub background: Rgb,
    pub background_alpha: f32,
    /// Pixel size of a size-1 particle at view depth 1.
    pub point_scale: f32,
    /// Inner and outer radius of the sprite glow, where 0.5 is the sprite edge.
    pub falloff: FloatRange,
    pub camera: CameraConfig,
    /// Multisample count. Falls back to 1 when the adapter can't do it.
    pub msaa_samples: u32,
    /// Fixed RNG seed. `None` seeds from entropy.
    pub seed: Option<u64>,
    pub window: WindowConfig,
}

impl Default for FieldConfig {
    fn default() -> Self {
        Self {
            particle_count: 200,
            spread: 50.0,
            depth_spread_factor: 0.5,
            depth_offset: -20.0,
            lateral_speed: 1.2,
            forward_speed: FloatRange::new(-0.6, -0.2),
            lifetime: FloatRange::new(2.5, 5.5),
            spawn_size: FloatRange::new(4.0, 10.0),
            speed_multiplier: 6.0,
            size_range: FloatRange::new(6.0, 14.0),
            shrink: 0.4,
            opacity_floor: 0.2,
            opacity_peak: 0.8,
            rotation_speed: 0.08,
            color: Rgb::from_hex(0x8ad5ff),
            background: Rgb::from_hex(0x0b1020),
            background_alpha: 0.8,
            point_scale: 300.0,
            falloff: FloatRange::new(0.25, 0.55),
            camera: CameraConfig::default(),
            msaa_samples: 4,
            seed: None,
            window: WindowConfig::default(),
        }
    }
}

impl FieldConfig {
    /// Set the number of particles.
    pub fn with_particle_count(mut self, count: u32) -> Self {
        self.particle_count = count;
        self
    }

    /// Use a fixed RNG seed so the field is reproducible.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Set the X/Y spawn extent.
    pub fn with_spread(mut self, spread: f32) -> Self {
        self.spread = spread;
        self
    }

    /// Set the scene rotation speed in radians per second.
    pub fn with_rotation_speed(mut self, speed: f32) -> Self {
        self.rotation_speed = speed;
        self
    }

    /// Set the particle tint.
    pub fn with_color(mut self, color: Rgb) -> Self {
        self.color = color;
        self
    }

    /// Set the clear color and its alpha.
    pub fn with_background(mut self, color: Rgb, alpha: f32) -> Self {
        self.background = color;
        self.background_alpha = alpha;
        self
    }

    /// Set the multisample count (1 disables antialiasing).
    pub fn with_msaa_samples(mut self, samples: u32) -> Self {
        self.msaa_samples = samples;
        self
    }

    /// Save the configuration to a JSON file.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), ConfigError> {
        let json = serde_json::to_string_pretty(self)?;
        fs::write(path, json)?;
        Ok(())
    }

    /// Load and validate a configuration from a JSON file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let json = fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    /// Parse and validate a configuration from a JSON string.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Check that every value is usable.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.particle_count == 0 {
            return Err(ConfigError::Invalid("particle_count must be at least 1".into()));
        }
        let max_count = max_particle_count();
        if self.particle_count > max_count {
            return Err(ConfigError::Invalid(format!(
                "particle_count {} exceeds the maximum of {}",
                self.particle_count, max_count
            )));
        }

        let scalars = [
            ("spread", self.spread),
            ("depth_spread_factor", self.depth_spread_factor),
            ("depth_offset", self.depth_offset),
            ("lateral_speed", self.lateral_speed),
            ("speed_multiplier", self.speed_multiplier),
            ("shrink", self.shrink),
            ("opacity_floor", self.opacity_floor),
            ("opacity_peak", self.opacity_peak),
            ("rotation_speed", self.rotation_speed),
            ("background_alpha", self.background_alpha),
            ("point_scale", self.point_scale),
        ];
        for (name, value) in scalars {
            if !value.is_finite() {
                return Err(ConfigError::Invalid(format!("{} must be finite", name)));
            }
        }
        for (name, value) in [("spread", self.spread), ("lateral_speed", self.lateral_speed)] {
            if value < 0.0 {
                return Err(ConfigError::Invalid(format!("{} must not be negative", name)));
            }
        }
        if !(0.0..=1.0).contains(&self.background_alpha) {
            return Err(ConfigError::Invalid("background_alpha must be within 0..=1".into()));
        }

        self.forward_speed.check("forward_speed")?;
        self.lifetime.check("lifetime")?;
        self.spawn_size.check("spawn_size")?;
        self.size_range.check("size_range")?;
        self.falloff.check("falloff")?;
        // smoothstep is undefined for equal edges
        if self.falloff.min < 0.0 || self.falloff.min >= self.falloff.max {
            return Err(ConfigError::Invalid(
                "falloff must satisfy 0 <= min < max".into(),
            ));
        }

        // age / lifetime must stay finite
        if self.lifetime.min <= 0.0 {
            return Err(ConfigError::Invalid("lifetime.min must be positive".into()));
        }

        if ![1, 2, 4, 8].contains(&self.msaa_samples) {
            return Err(ConfigError::Invalid(format!(
                "msaa_samples must be 1, 2, 4 or 8, got {}",
                self.msaa_samples
            )));
        }

        let camera = &self.camera;
        if !(camera.fov_degrees > 0.0 && camera.fov_degrees < 180.0) {
            return Err(ConfigError::Invalid("camera.fov_degrees must be within (0, 180)".into()));
        }
        if !(camera.near > 0.0 && camera.far > camera.near && camera.far.is_finite()) {
            return Err(ConfigError::Invalid(
                "camera planes must satisfy 0 < near < far".into(),
            ));
        }
        if !camera.position.iter().all(|c| c.is_finite()) {
            return Err(ConfigError::Invalid("camera.position must be finite".into()));
        }

        if self.window.width == 0 || self.window.height == 0 {
            return Err(ConfigError::Invalid("window size must be non-zero".into()));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        let config = FieldConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.particle_count, 200);
        assert_eq!(config.color.to_hex(), 0x8ad5ff);
        assert_eq!(config.background.to_hex(), 0x0b1020);
        assert_eq!(config.camera.position(), Vec3::new(0.0, 0.0, 75.0));
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let config = FieldConfig::from_json(r##"{ "particle_count": 50, "color": "#ff8800" }"##)
            .unwrap();
        assert_eq!(config.particle_count, 50);
        assert_eq!(config.color.to_hex(), 0xff8800);
        assert_eq!(config.lifetime, FloatRange::new(2.5, 5.5));
        assert_eq!(config.camera.fov_degrees, 60.0);
    }

    #[test]
    fn test_partial_nested_json() {
        let config = FieldConfig::from_json(r#"{ "camera": { "fov_degrees": 45.0 } }"#).unwrap();
        assert_eq!(config.camera.fov_degrees, 45.0);
        assert_eq!(config.camera.far, 1000.0);
    }

    #[test]
    fn test_rejects_zero_particles() {
        let config = FieldConfig::default().with_particle_count(0);
        assert!(matches!(config.validate(), Err(ConfigError::Invalid(_))));
    }

    #[test]
    fn test_particle_count_upper_bound() {
        let max = max_particle_count();
        assert_eq!(max, 8_388_608);
        assert!(FieldConfig::default().with_particle_count(max).validate().is_ok());
        assert!(FieldConfig::default().with_particle_count(max + 1).validate().is_err());

        let err = FieldConfig::from_json(r#"{ "particle_count": 4294967295 }"#).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));
    }

    #[test]
    fn test_rejects_inverted_range() {
        let mut config = FieldConfig::default();
        config.lifetime = FloatRange::new(5.0, 1.0);
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_rejects_non_positive_lifetime() {
        let mut config = FieldConfig::default();
        config.lifetime = FloatRange::new(0.0, 1.0);
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_rejects_bad_msaa_and_camera() {
        assert!(FieldConfig::default().with_msaa_samples(3).validate().is_err());

        let mut config = FieldConfig::default();
        config.camera.far = config.camera.near;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_rejects_nan() {
        let config = FieldConfig::default().with_rotation_speed(f32::NAN);
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_rejects_bad_color_in_json() {
        let err = FieldConfig::from_json(r#"{ "color": "blue" }"#).unwrap_err();
        assert!(matches!(err, ConfigError::Json(_)));
    }

    #[test]
    fn test_from_json_validates() {
        let err = FieldConfig::from_json(r#"{ "particle_count": 0 }"#).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));
    }
}
