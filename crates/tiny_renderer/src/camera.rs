//! Pinhole camera and pixel-to-image-plane mapping.

use crate::Ray;
use tiny_math::{Vec2, Vec3};

/// Camera for generating rays into the scene.
///
/// The camera only has a position; it always looks down -Z through the
/// image plane at `z = -1`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Camera {
    pub position: Vec3,
}

impl Camera {
    pub fn new(position: Vec3) -> Self {
        Self { position }
    }

    /// Ray from the camera through a point on the image plane.
    ///
    /// The returned direction is normalized.
    pub fn ray_through(&self, plane_point: Vec2) -> Ray {
        let target = plane_point.extend(-1.0);
        Ray::new(self.position, (target - self.position).normalize())
    }
}

impl Default for Camera {
    fn default() -> Self {
        Self::new(Vec3::ZERO)
    }
}

/// Maps (sub)pixel coordinates onto the image plane.
///
/// Built once per render from the image size and vertical field of view.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Projection {
    width: u32,
    height: u32,
    aspect_ratio: f32,
    // tan(vfov / 2)
    fov_scale: f32,
}

impl Projection {
    /// Create a projection for a `width` x `height` image and a vertical
    /// field of view in degrees.
    pub fn new(width: u32, height: u32, vfov: f32) -> Self {
        Self {
            width,
            height,
            aspect_ratio: width as f32 / height as f32,
            fov_scale: (vfov.to_radians() / 2.0).tan(),
        }
    }

    pub fn aspect_ratio(&self) -> f32 {
        self.aspect_ratio
    }

    pub fn fov_scale(&self) -> f32 {
        self.fov_scale
    }

    /// Image-plane coordinates of the pixel position `(x, y)`.
    ///
    /// Integer coordinates address the pixel's top-left corner, so the
    /// `+ 0.5` lands on its center. `y` grows downwards in the image and
    /// upwards on the plane.
    pub fn pixel_to_world(&self, x: f32, y: f32) -> Vec2 {
        let w = self.width as f32;
        let h = self.height as f32;
        Vec2::new(
            (2.0 * ((x + 0.5) / w) - 1.0) * self.aspect_ratio * self.fov_scale,
            (1.0 - 2.0 * ((y + 0.5) / h)) * self.fov_scale,
        )
    }
}
