//! Drives the particle field headlessly through many frames.

use glowfield::{ConfigError, FieldConfig, FloatRange, ParticleField, Rgb};

const FRAME: f32 = 1.0 / 60.0;

#[test]
fn test_seeded_fields_are_reproducible() {
    let config = FieldConfig::default().with_seed(1234);
    let mut a = ParticleField::new(&config);
    let mut b = ParticleField::new(&config);

    for _ in 0..600 {
        a.tick(FRAME);
        b.tick(FRAME);
    }
    assert_eq!(a.gpu_particles(), b.gpu_particles());
}

#[test]
fn test_different_seeds_differ() {
    let a = ParticleField::new(&FieldConfig::default().with_seed(1));
    let b = ParticleField::new(&FieldConfig::default().with_seed(2));
    assert_ne!(a.gpu_particles(), b.gpu_particles());
}

#[test]
fn test_pool_size_is_fixed() {
    let mut field = ParticleField::new(&FieldConfig::default().with_particle_count(37).with_seed(5));
    for _ in 0..1_000 {
        field.tick(FRAME);
        assert_eq!(field.len(), 37);
        assert_eq!(field.gpu_particles().len(), 37);
    }
}

#[test]
fn test_every_particle_recycles() {
    // Longest lifetime is 5.5s, so ten seconds recycles everyone at least once
    let mut field = ParticleField::new(&FieldConfig::default().with_seed(8));
    let mut recycled = vec![false; field.len()];
    let mut last_age: Vec<f32> = field.particles().iter().map(|p| p.age).collect();

    for _ in 0..600 {
        field.tick(FRAME);
        for (i, p) in field.particles().iter().enumerate() {
            if p.age < last_age[i] {
                recycled[i] = true;
            }
            last_age[i] = p.age;
        }
    }
    assert!(recycled.iter().all(|&r| r));
}

#[test]
fn test_particles_stay_near_the_slab() {
    // Max travel per life: 0.6 units/s * 6 * 5.5s = 19.8 per axis
    let mut field = ParticleField::new(&FieldConfig::default().with_seed(21));
    for _ in 0..1_200 {
        field.tick(FRAME);
        for p in field.particles().iter() {
            assert!(p.position.x.abs() <= 25.0 + 19.8 + 0.1);
            assert!(p.position.y.abs() <= 25.0 + 19.8 + 0.1);
            assert!(p.position.z <= -7.5 && p.position.z >= -32.5 - 19.8 - 0.1);
        }
    }
}

#[test]
fn test_opacity_is_faded_in_and_out() {
    let mut field = ParticleField::new(&FieldConfig::default().with_seed(4));
    for _ in 0..300 {
        field.tick(FRAME);
        for gpu in field.gpu_particles() {
            assert!(gpu.opacity >= 0.2 - 1e-5 && gpu.opacity <= 1.0 + 1e-5);
        }
    }
}

#[test]
fn test_rotation_follows_config() {
    let mut field =
        ParticleField::new(&FieldConfig::default().with_seed(4).with_rotation_speed(0.5));
    for _ in 0..60 {
        field.tick(FRAME);
    }
    assert!((field.rotation() - 0.5).abs() < 1e-4);
}

#[test]
fn test_custom_motion_config() {
    let mut config = FieldConfig::default().with_seed(11).with_spread(0.0);
    config.lateral_speed = 0.0;
    config.forward_speed = FloatRange::new(-1.0, -1.0);
    config.depth_offset = -10.0;
    config.depth_spread_factor = 0.0;
    config.lifetime = FloatRange::new(100.0, 100.0);

    let mut field = ParticleField::new(&config);
    field.tick(0.5);
    for p in field.particles().iter() {
        assert_eq!(p.position.x, 0.0);
        assert_eq!(p.position.y, 0.0);
        assert!((p.position.z - (-10.0 - 3.0)).abs() < 1e-5);
    }
}

#[test]
fn test_config_file_round_trip() {
    let path = std::env::temp_dir().join(format!("glowfield-{}.json", std::process::id()));
    let config = FieldConfig::default()
        .with_particle_count(64)
        .with_seed(99)
        .with_color(Rgb::from_hex(0xffb060))
        .with_background(Rgb::from_hex(0x000000), 1.0);

    config.save(&path).unwrap();
    let loaded = FieldConfig::load(&path).unwrap();
    std::fs::remove_file(&path).ok();

    assert_eq!(loaded, config);
}

#[test]
fn test_missing_config_file() {
    let err = FieldConfig::load("/definitely/not/here.json").unwrap_err();
    assert!(matches!(err, ConfigError::Io(_)));
}

#[test]
fn test_bundled_config_loads() {
    let path = concat!(env!("CARGO_MANIFEST_DIR"), "/configs/ember.json");
    let config = FieldConfig::load(path).unwrap();
    assert_eq!(config.particle_count, 320);
    assert_eq!(config.seed, Some(7));
    assert_eq!(config.color.to_hex(), 0xffb060);
    // Unlisted keys keep their defaults
    assert_eq!(config.point_scale, 300.0);

    let field = ParticleField::new(&config);
    assert_eq!(field.len(), 320);
}
