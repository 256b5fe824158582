//! Seeded uniform random sampling.
//!
//! All randomness in a render flows through one [`Sampler`], which the
//! caller owns and passes down by `&mut`. Pinning the seed pins the image.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tiny_math::{Vec2, Vec3};

/// Seed used by [`Sampler::default`].
pub const DEFAULT_SEED: u64 = 5489;

/// Source of uniformly distributed scalars and vectors.
#[derive(Debug, Clone)]
pub struct Sampler {
    rng: StdRng,
}

impl Sampler {
    /// Create a sampler with a pinned seed.
    pub fn new(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Uniform float in `[0, 1)`.
    #[inline]
    pub fn uniform_f32(&mut self) -> f32 {
        self.rng.gen::<f32>()
    }

    /// Uniform float in `[min, max)`.
    #[inline]
    pub fn uniform_f32_range(&mut self, min: f32, max: f32) -> f32 {
        min + (max - min) * self.uniform_f32()
    }

    pub fn uniform_vec2(&mut self) -> Vec2 {
        Vec2::new(self.uniform_f32(), self.uniform_f32())
    }

    pub fn uniform_vec2_range(&mut self, min: f32, max: f32) -> Vec2 {
        Vec2::new(
            self.uniform_f32_range(min, max),
            self.uniform_f32_range(min, max),
        )
    }

    pub fn uniform_vec3(&mut self) -> Vec3 {
        Vec3::new(self.uniform_f32(), self.uniform_f32(), self.uniform_f32())
    }

    pub fn uniform_vec3_range(&mut self, min: f32, max: f32) -> Vec3 {
        Vec3::new(
            self.uniform_f32_range(min, max),
            self.uniform_f32_range(min, max),
            self.uniform_f32_range(min, max),
        )
    }

    /// Uniformly distributed unit vector.
    ///
    /// Rejection-samples the `[-1, 1]^3` cube until a point lands inside the
    /// unit ball (and not at the origin), then projects it onto the sphere.
    /// Each attempt succeeds with probability ~pi/6.
    pub fn unit_vec3_on_sphere(&mut self) -> Vec3 {
        loop {
            let v = self.uniform_vec3_range(-1.0, 1.0);
            let len_sq = v.length_squared();
            if f32::MIN_POSITIVE < len_sq && len_sq <= 1.0 {
                return v / len_sq.sqrt();
            }
        }
    }
}

impl Default for Sampler {
    fn default() -> Self {
        Self::new(DEFAULT_SEED)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tiny_math::Interval;

    #[test]
    fn test_uniform_f32_in_unit_range() {
        let mut sampler = Sampler::new(1);
        for _ in 0..10_000 {
            let x = sampler.uniform_f32();
            assert!((0.0..1.0).contains(&x), "{x} outside [0, 1)");
        }
    }

    #[test]
    fn test_uniform_range_remap() {
        let mut sampler = Sampler::new(2);
        let bounds = Interval::new(-0.5, 0.5);
        for _ in 0..10_000 {
            let offset = sampler.uniform_vec2_range(-0.5, 0.5);
            assert!(bounds.contains(offset.x));
            assert!(bounds.contains(offset.y));
        }
    }

    #[test]
    fn test_uniform_vec3_components_in_unit_range() {
        let mut sampler = Sampler::new(3);
        for _ in 0..1_000 {
            let v = sampler.uniform_vec3();
            assert!(v.min_element() >= 0.0 && v.max_element() < 1.0);
            let u = sampler.uniform_vec2();
            assert!(u.min_element() >= 0.0 && u.max_element() < 1.0);
        }
    }

    #[test]
    fn test_unit_vectors_are_normalized() {
        let mut sampler = Sampler::new(4);
        for _ in 0..10_000 {
            let v = sampler.unit_vec3_on_sphere();
            assert!((v.length() - 1.0).abs() < 1e-5, "length {}", v.length());
        }
    }

    #[test]
    fn test_unit_vectors_are_centered() {
        let mut sampler = Sampler::new(5);
        let n = 50_000;
        let mut sum = Vec3::ZERO;
        for _ in 0..n {
            sum += sampler.unit_vec3_on_sphere();
        }
        let mean = sum / n as f32;
        assert!(mean.length() < 0.03, "mean {mean:?} is biased");
    }

    #[test]
    fn test_same_seed_same_stream() {
        let mut a = Sampler::new(42);
        let mut b = Sampler::new(42);
        for _ in 0..100 {
            assert_eq!(a.uniform_f32(), b.uniform_f32());
        }

        let mut c = Sampler::default();
        let mut d = Sampler::new(DEFAULT_SEED);
        assert_eq!(c.unit_vec3_on_sphere(), d.unit_vec3_on_sphere());
    }
}
