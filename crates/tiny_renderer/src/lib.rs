//! tinytracer renderer - CPU path tracing of sphere scenes.
//!
//! A small Monte Carlo path tracer: pinhole camera rays, analytic
//! ray-sphere intersection, recursive diffuse/mirror scattering against a
//! flat sky, and multi-sampled pixels packed as `RGBA8888`.
//!
//! Rendering is single-threaded and deterministic for a given [`Sampler`]
//! seed.

mod camera;
mod error;
mod material;
mod renderer;
mod sampler;
mod scene;
mod sphere;

pub use camera::{Camera, Projection};
pub use error::{RenderError, RenderResult};
pub use material::{Color, Material};
pub use renderer::{
    pack_rgba, ray_color, render, render_pixel, tone_map, PixelBuffer, RenderConfig,
    DISPLAY_DIVISOR, SKY_COLOR,
};
pub use sampler::{Sampler, DEFAULT_SEED};
pub use scene::{HitRecord, Scene, T_MIN};
pub use sphere::Sphere;

/// Re-export Vec3 and common math types from tiny_math
pub use tiny_math::{Interval, Ray, Vec2, Vec3};
