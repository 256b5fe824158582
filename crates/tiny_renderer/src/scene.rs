//! Static scene description: a camera and an ordered list of spheres.

use crate::{Camera, Color, Material, Ray, RenderError, RenderResult, Sphere};
use tiny_math::{Interval, Vec3};

/// Minimum hit distance; keeps scattered rays from re-hitting their origin
/// surface through floating-point error.
pub const T_MIN: f32 = 0.001;

/// Result of a successful intersection query.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HitRecord {
    /// Index of the struck sphere in [`Scene::spheres`]
    pub sphere: usize,
    /// Parameter t where the intersection occurs
    pub t: f32,
}

/// Camera plus spheres. Read-only once built.
#[derive(Debug, Clone)]
pub struct Scene {
    camera: Camera,
    spheres: Vec<Sphere>,
}

impl Scene {
    /// Build a scene, rejecting spheres without a finite positive radius.
    pub fn new(camera: Camera, spheres: Vec<Sphere>) -> RenderResult<Self> {
        for (index, sphere) in spheres.iter().enumerate() {
            if !(sphere.radius.is_finite() && sphere.radius > 0.0) {
                return Err(RenderError::InvalidRadius {
                    index,
                    radius: sphere.radius,
                });
            }
        }

        Ok(Self { camera, spheres })
    }

    /// The built-in demo scene: a grey diffuse ball and a mirror ball
    /// resting above a large green ground sphere.
    pub fn demo() -> Self {
        Self {
            camera: Camera::new(Vec3::ZERO),
            spheres: vec![
                Sphere::new(
                    Vec3::new(0.0, 0.0, -1.0),
                    0.2,
                    Material::new(Color::new(0.5, 0.5, 0.5), 1.0, 0.0),
                ),
                Sphere::new(
                    Vec3::new(0.45, 0.0, -1.0),
                    0.2,
                    Material::new(Color::new(1.0, 1.0, 1.0), 1.0, 1.0),
                ),
                Sphere::new(
                    Vec3::new(0.0, -100.21, -1.0),
                    100.0,
                    Material::new(Color::new(0.4, 0.8, 0.5), 1.0, 0.0),
                ),
            ],
        }
    }

    pub fn camera(&self) -> &Camera {
        &self.camera
    }

    pub fn spheres(&self) -> &[Sphere] {
        &self.spheres
    }

    /// Get a sphere by the index stored in a [`HitRecord`].
    pub fn sphere(&self, index: usize) -> &Sphere {
        &self.spheres[index]
    }

    /// Find the nearest sphere hit by `ray` within `ray_t`.
    ///
    /// Each sphere is tested against the interval narrowed to the closest
    /// hit so far, so on an exact tie the earlier sphere wins.
    pub fn hit(&self, ray: &Ray, ray_t: Interval) -> Option<HitRecord> {
        let mut closest: Option<HitRecord> = None;
        let mut closest_so_far = ray_t.max;

        for (index, sphere) in self.spheres.iter().enumerate() {
            let interval = Interval::new(ray_t.min, closest_so_far);
            if let Some(t) = sphere.intersect(ray, interval) {
                closest_so_far = t;
                closest = Some(HitRecord { sphere: index, t });
            }
        }

        closest
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn hit_interval() -> Interval {
        Interval::new(T_MIN, f32::INFINITY)
    }

    #[test]
    fn test_nearest_sphere_wins() {
        let scene = Scene::new(
            Camera::default(),
            vec![
                Sphere::new(Vec3::new(0.0, 0.0, -5.0), 1.0, Material::default()),
                Sphere::new(Vec3::new(0.0, 0.0, -2.0), 0.5, Material::default()),
            ],
        )
        .unwrap();

        let ray = Ray::new(Vec3::ZERO, Vec3::NEG_Z);
        let rec = scene.hit(&ray, hit_interval()).unwrap();
        assert_eq!(rec.sphere, 1);
        assert!((rec.t - 1.5).abs() < 1e-6);
    }

    #[test]
    fn test_tie_goes_to_first_sphere() {
        let a = Sphere::new(Vec3::new(0.0, 0.0, -3.0), 1.0, Material::diffuse(Color::X));
        let b = Sphere::new(Vec3::new(0.0, 0.0, -3.0), 1.0, Material::diffuse(Color::Y));
        let scene = Scene::new(Camera::default(), vec![a, b]).unwrap();

        let ray = Ray::new(Vec3::ZERO, Vec3::NEG_Z);
        let rec = scene.hit(&ray, hit_interval()).unwrap();
        assert_eq!(rec.sphere, 0);
        assert_eq!(scene.sphere(rec.sphere).material.albedo, Color::X);
    }

    #[test]
    fn test_miss_returns_none() {
        let scene = Scene::demo();
        let ray = Ray::new(Vec3::ZERO, Vec3::Y);
        assert_eq!(scene.hit(&ray, hit_interval()), None);

        let empty = Scene::new(Camera::default(), Vec::new()).unwrap();
        assert_eq!(empty.hit(&ray, hit_interval()), None);
    }

    #[test]
    fn test_invalid_radius_rejected() {
        let spheres = vec![
            Sphere::new(Vec3::ZERO, 1.0, Material::default()),
            Sphere::new(Vec3::ONE, 0.0, Material::default()),
        ];
        match Scene::new(Camera::default(), spheres) {
            Err(RenderError::InvalidRadius { index, radius }) => {
                assert_eq!(index, 1);
                assert_eq!(radius, 0.0);
            }
            other => panic!("expected InvalidRadius, got {other:?}"),
        }

        let nan = vec![Sphere::new(Vec3::ZERO, f32::NAN, Material::default())];
        assert!(Scene::new(Camera::default(), nan).is_err());
        let negative = vec![Sphere::new(Vec3::ZERO, -2.0, Material::default())];
        assert!(Scene::new(Camera::default(), negative).is_err());
    }

    #[test]
    fn test_demo_scene_layout() {
        let scene = Scene::demo();
        assert_eq!(scene.camera().position, Vec3::ZERO);
        assert_eq!(scene.spheres().len(), 3);
        assert!(!scene.sphere(0).material.is_metallic());
        assert!(scene.sphere(1).material.is_metallic());
        assert_eq!(scene.sphere(2).radius, 100.0);

        // The demo scene passes its own validation
        let rebuilt = Scene::new(*scene.camera(), scene.spheres().to_vec()).unwrap();
        assert_eq!(rebuilt.spheres(), scene.spheres());
    }

    #[test]
    fn test_demo_center_ray_hits_grey_ball() {
        let scene = Scene::demo();
        let ray = Ray::new(Vec3::ZERO, Vec3::NEG_Z);
        let rec = scene.hit(&ray, hit_interval()).unwrap();
        assert_eq!(rec.sphere, 0);
        assert!((rec.t - 0.8).abs() < 1e-5);
    }
}
