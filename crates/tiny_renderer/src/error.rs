//! Errors raised while building scenes and producing images.

use thiserror::Error;

/// Errors that can occur while setting up or writing a render.
#[derive(Error, Debug)]
pub enum RenderError {
    #[error("Sphere {index} has invalid radius {radius} (must be finite and > 0)")]
    InvalidRadius { index: usize, radius: f32 },

    #[error("Image dimensions {width}x{height} contain no pixels")]
    EmptyImage { width: u32, height: u32 },

    #[error("Samples per pixel must be at least 1")]
    NoSamples,

    #[error("Image encoding error: {0}")]
    Image(#[from] image::ImageError),
}

pub type RenderResult<T> = Result<T, RenderError>;
