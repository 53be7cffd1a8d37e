//! Scalar helpers used by the particle update.

use rand::Rng;

/// Uniform random float in `[lo, hi)`.
///
/// Unlike `Rng::gen_range` this accepts `lo == hi` (and returns `lo`).
#[inline]
pub fn rand_float<R: Rng + ?Sized>(rng: &mut R, lo: f32, hi: f32) -> f32 {
    lo + rng.gen::<f32>() * (hi - lo)
}

/// Uniform random float in `(-range / 2, range / 2]`.
#[inline]
pub fn rand_float_spread<R: Rng + ?Sized>(rng: &mut R, range: f32) -> f32 {
    range * (0.5 - rng.gen::<f32>())
}

/// Hermite interpolation of `x` between `min` and `max`.
///
/// Returns 0 at or below `min` and 1 at or above `max`.
#[inline]
pub fn smoothstep(x: f32, min: f32, max: f32) -> f32 {
    if x <= min {
        return 0.0;
    }
    if x >= max {
        return 1.0;
    }
    let x = (x - min) / (max - min);
    x * x * (3.0 - 2.0 * x)
}

#[inline]
pub fn lerp(a: f32, b: f32, t: f32) -> f32 {
    a + (b - a) * t
}
