//! Sphere primitive for ray tracing.

use crate::{Material, Ray};
use tiny_math::{Interval, Vec3};

/// A sphere primitive with its own material.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sphere {
    pub center: Vec3,
    pub radius: f32,
    pub material: Material,
}

impl Sphere {
    /// Create a new sphere.
    ///
    /// The radius is checked when the sphere is placed in a [`crate::Scene`].
    pub fn new(center: Vec3, radius: f32, material: Material) -> Self {
        Self {
            center,
            radius,
            material,
        }
    }

    /// Distance along `ray` to the nearest intersection strictly inside `ray_t`.
    ///
    /// The near root is preferred; when it falls outside the interval (behind
    /// the origin or inside the epsilon shell) the far root is tried, which
    /// also covers rays starting inside the sphere.
    pub fn intersect(&self, ray: &Ray, ray_t: Interval) -> Option<f32> {
        let oc = self.center - ray.origin();
        let a = ray.direction().length_squared();
        let h = ray.direction().dot(oc);
        let c = oc.length_squared() - self.radius * self.radius;

        let discriminant = h * h - a * c;
        if discriminant < 0.0 {
            return None;
        }

        let sqrtd = discriminant.sqrt();

        // Find the nearest root in the acceptable range
        let mut root = (h - sqrtd) / a;
        if !ray_t.surrounds(root) {
            root = (h + sqrtd) / a;
            if !ray_t.surrounds(root) {
                return None;
            }
        }

        Some(root)
    }

    /// Outward unit normal at a point on the surface.
    #[inline]
    pub fn outward_normal(&self, p: Vec3) -> Vec3 {
        (p - self.center) / self.radius
    }
}
