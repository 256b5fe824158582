//! Surface materials and ray scattering.

use crate::{Ray, Sampler};
use tiny_math::Vec3;

/// Color type alias (linear RGB, typically 0-1)
pub type Color = Vec3;

/// Surface description shared by every sphere.
///
/// A material is either a perfect mirror (`metallic != 0`) or a diffuse
/// scatterer. `roughness` is carried along with the material but does not
/// affect scattering.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Material {
    /// Per-channel reflectance
    pub albedo: Color,
    /// Surface roughness (stored, not used by `scatter`)
    pub roughness: f32,
    /// Any non-zero value makes the surface a mirror
    pub metallic: f32,
}

impl Material {
    pub fn new(albedo: Color, roughness: f32, metallic: f32) -> Self {
        Self {
            albedo,
            roughness,
            metallic,
        }
    }

    /// Fully rough diffuse material.
    pub fn diffuse(albedo: Color) -> Self {
        Self::new(albedo, 1.0, 0.0)
    }

    /// Perfect mirror.
    pub fn mirror(albedo: Color) -> Self {
        Self::new(albedo, 1.0, 1.0)
    }

    #[inline]
    pub fn is_metallic(&self) -> bool {
        self.metallic != 0.0
    }

    /// Build the ray leaving `hit_point` after `ray_in` struck the surface.
    ///
    /// Mirrors reflect the incoming direction about `normal` and draw no
    /// random numbers. Diffuse surfaces scatter along `normal` plus a random
    /// unit vector, which biases directions into the normal's hemisphere.
    pub fn scatter(
        &self,
        ray_in: &Ray,
        hit_point: Vec3,
        normal: Vec3,
        sampler: &mut Sampler,
    ) -> Ray {
        if self.is_metallic() {
            return Ray::new(hit_point, reflect(ray_in.direction(), normal));
        }

        let mut scatter_direction = normal + sampler.unit_vec3_on_sphere();

        // Catch degenerate scatter direction
        if near_zero(scatter_direction) {
            scatter_direction = normal;
        }

        Ray::new(hit_point, scatter_direction)
    }
}

impl Default for Material {
    fn default() -> Self {
        Self::diffuse(Color::splat(0.5))
    }
}

// =============================================================================
// Helper functions
// =============================================================================

/// Reflect a vector about a normal.
#[inline]
pub(crate) fn reflect(v: Vec3, n: Vec3) -> Vec3 {
    v - 2.0 * v.dot(n) * n
}

/// True when every component is within machine epsilon of zero.
#[inline]
pub(crate) fn near_zero(v: Vec3) -> bool {
    v.abs().max_element() < f32::EPSILON
}
