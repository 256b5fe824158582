//! Core path tracing renderer.
//!
//! Implements Monte Carlo path tracing with:
//! - Recursive ray tracing with a fixed bounce depth
//! - Anti-aliasing via jittered multi-sampling
//! - Gamma correction (gamma = 2.0) and packing to `RGBA8888`

use std::path::Path;
use std::time::Instant;

use crate::{Color, Projection, Ray, RenderError, RenderResult, Sampler, Scene, T_MIN};
use tiny_math::{Interval, Vec2};

/// Flat ambient color returned by rays that leave the scene.
pub const SKY_COLOR: Color = Color::new(0.5, 0.8, 0.9);

/// Image size is the display size divided by this.
pub const DISPLAY_DIVISOR: u32 = 3;

/// Fraction of the albedo-weighted incoming light carried by each bounce.
const BOUNCE_ATTENUATION: f32 = 0.25;

/// Render configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderConfig {
    pub image_width: u32,
    pub image_height: u32,
    /// Samples per pixel for anti-aliasing
    pub samples_per_pixel: u32,
    /// Maximum ray bounce depth
    pub max_depth: u32,
    /// Vertical field of view in degrees
    pub vfov: f32,
    /// Color of rays that hit nothing
    pub background: Color,
    /// Randomly offset each sample inside its pixel
    pub jitter: bool,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            image_width: 640,
            image_height: 360,
            samples_per_pixel: 150,
            max_depth: 50,
            vfov: 60.0,
            background: SKY_COLOR,
            jitter: true,
        }
    }
}

impl RenderConfig {
    /// Default settings with the image sized to a third of the display.
    pub fn for_display(display_width: u32, display_height: u32) -> Self {
        Self::default().with_resolution(
            display_width / DISPLAY_DIVISOR,
            display_height / DISPLAY_DIVISOR,
        )
    }

    /// Set image resolution.
    pub fn with_resolution(mut self, width: u32, height: u32) -> Self {
        self.image_width = width;
        self.image_height = height;
        self
    }

    /// Set quality settings.
    pub fn with_quality(mut self, samples_per_pixel: u32, max_depth: u32) -> Self {
        self.samples_per_pixel = samples_per_pixel;
        self.max_depth = max_depth;
        self
    }

    /// Enable or disable sub-pixel jitter.
    pub fn with_jitter(mut self, jitter: bool) -> Self {
        self.jitter = jitter;
        self
    }

    /// Check that the configuration describes a renderable image.
    pub fn validate(&self) -> RenderResult<()> {
        if self.image_width == 0 || self.image_height == 0 {
            return Err(RenderError::EmptyImage {
                width: self.image_width,
                height: self.image_height,
            });
        }
        if self.samples_per_pixel == 0 {
            return Err(RenderError::NoSamples);
        }
        Ok(())
    }

    /// Pinhole projection for this image size and field of view.
    pub fn projection(&self) -> Projection {
        Projection::new(self.image_width, self.image_height, self.vfov)
    }
}

/// Compute the color seen by a ray.
///
/// Traces the ray through the scene, scattering off each surface it hits
/// until it escapes to the sky or runs out of depth. Every bounce scales the
/// returned light by a quarter of the surface albedo. There are no emitters:
/// all light comes from the background.
pub fn ray_color(
    ray: &Ray,
    scene: &Scene,
    depth: u32,
    config: &RenderConfig,
    sampler: &mut Sampler,
) -> Color {
    // If we've exceeded max depth, return black (no light)
    if depth == 0 {
        return Color::ZERO;
    }

    let Some(rec) = scene.hit(ray, Interval::new(T_MIN, f32::INFINITY)) else {
        return config.background;
    };

    let sphere = scene.sphere(rec.sphere);
    let p = ray.at(rec.t);
    let normal = sphere.outward_normal(p);

    let scattered = sphere.material.scatter(ray, p, normal, sampler);
    let incoming = ray_color(&scattered, scene, depth - 1, config, sampler);

    BOUNCE_ATTENUATION * sphere.material.albedo * incoming
}

/// Render a single pixel with multi-sampling.
///
/// Returns the average linear color of all samples.
pub fn render_pixel(
    scene: &Scene,
    projection: &Projection,
    x: u32,
    y: u32,
    config: &RenderConfig,
    sampler: &mut Sampler,
) -> Color {
    let camera = scene.camera();
    let mut pixel_color = Color::ZERO;

    for _ in 0..config.samples_per_pixel {
        let offset = if config.jitter {
            sampler.uniform_vec2_range(-0.5, 0.5)
        } else {
            Vec2::ZERO
        };
        let plane_point = projection.pixel_to_world(x as f32 + offset.x, y as f32 + offset.y);
        let ray = camera.ray_through(plane_point);
        pixel_color += ray_color(&ray, scene, config.max_depth, config, sampler);
    }

    // Average the samples
    pixel_color / config.samples_per_pixel as f32
}

/// Gamma-correct (gamma = 2.0) and clamp a linear color to `[0, 1]`.
#[inline]
pub fn tone_map(color: Color) -> Color {
    let channel = |linear: f32| Interval::UNIT.clamp(linear.max(0.0).sqrt());
    Color::new(channel(color.x), channel(color.y), channel(color.z))
}

/// Pack an averaged linear color as `0xRRGGBBAA` with opaque alpha.
pub fn pack_rgba(color: Color) -> u32 {
    let c = tone_map(color) * 255.0;
    (c.x as u32) << 24 | (c.y as u32) << 16 | (c.z as u32) << 8 | 0xFF
}

/// Row-major buffer of packed `RGBA8888` pixels.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PixelBuffer {
    width: u32,
    height: u32,
    pixels: Vec<u32>,
}

impl PixelBuffer {
    /// Create a new buffer filled with opaque black.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            pixels: vec![0x0000_00FF; (width as usize) * (height as usize)],
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Get the packed pixel at (x, y).
    pub fn get(&self, x: u32, y: u32) -> u32 {
        self.pixels[self.index(x, y)]
    }

    /// Set the packed pixel at (x, y).
    pub fn set(&mut self, x: u32, y: u32, rgba: u32) {
        let index = self.index(x, y);
        self.pixels[index] = rgba;
    }

    /// All pixels in row-major order.
    pub fn pixels(&self) -> &[u32] {
        &self.pixels
    }

    /// Unpack to `R, G, B, A` bytes (for saving).
    pub fn to_rgba8(&self) -> Vec<u8> {
        self.pixels.iter().flat_map(|p| p.to_be_bytes()).collect()
    }

    /// Write the buffer as an image; the format follows the file extension.
    pub fn save(&self, path: impl AsRef<Path>) -> RenderResult<()> {
        let path = path.as_ref();
        image::save_buffer(
            path,
            &self.to_rgba8(),
            self.width,
            self.height,
            image::ColorType::Rgba8,
        )?;
        log::info!("Saved {}x{} image to {}", self.width, self.height, path.display());
        Ok(())
    }

    #[inline]
    fn index(&self, x: u32, y: u32) -> usize {
        (y as usize) * (self.width as usize) + (x as usize)
    }
}

/// Render the entire scene to a pixel buffer.
///
/// Runs to completion on the calling thread, one row at a time.
pub fn render(
    scene: &Scene,
    config: &RenderConfig,
    sampler: &mut Sampler,
) -> RenderResult<PixelBuffer> {
    config.validate()?;

    let width = config.image_width;
    let height = config.image_height;
    let projection = config.projection();
    let mut image = PixelBuffer::new(width, height);

    log::info!(
        "Rendering {}x{} @ {} spp, depth {}",
        width,
        height,
        config.samples_per_pixel,
        config.max_depth
    );
    let start = Instant::now();

    for y in 0..height {
        for x in 0..width {
            let color = render_pixel(scene, &projection, x, y, config, sampler);
            image.set(x, y, pack_rgba(color));
        }
        log::trace!("Row {}/{} done", y + 1, height);
    }

    log::info!("Rendered in {:?}", start.elapsed());
    Ok(image)
}
