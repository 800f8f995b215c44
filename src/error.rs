//! Error types for scene setup and frame output.
//!
//! Tracing itself is infallible; these only surface while validating input or writing
//! the finished picture.

use thiserror::Error;

/// Camera parameters that cannot produce an orthonormal basis or a valid lens.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CameraError {
    /// Look-from and look-at coincide, so there is no view direction.
    #[error("camera looks at its own position")]
    ZeroViewDirection,

    /// View-up is zero or parallel to the view direction.
    #[error("view-up vector is parallel to the view direction")]
    DegenerateViewUp,

    /// Vertical field of view outside (0, 180) degrees.
    #[error("vertical field of view {0} is outside (0, 180) degrees")]
    FieldOfView(f64),

    #[error("aspect ratio must be positive, got {0}")]
    AspectRatio(f64),

    #[error("aperture must not be negative, got {0}")]
    Aperture(f64),

    #[error("focus distance must be positive, got {0}")]
    FocusDistance(f64),
}

/// Invalid render settings.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SettingsError {
    /// Image needs at least two pixels on each axis to map pixels onto the image plane.
    #[error("image must be at least 2x2 pixels, got {width}x{height}")]
    ImageTooSmall { width: u32, height: u32 },

    #[error("samples per pixel must be at least 1")]
    NoSamples,

    #[error("max depth must be at least 1")]
    NoDepth,

    #[error("gamma must be positive, got {0}")]
    Gamma(f64),

    #[error("aspect ratio must be positive, got {0}")]
    AspectRatio(f64),

    #[error("lines per chunk must be at least 1")]
    EmptyChunk,
}

/// Errors returned by the render driver.
#[derive(Error, Debug)]
pub enum Error {
    #[error("invalid camera: {0}")]
    Camera(#[from] CameraError),

    #[error("invalid settings: {0}")]
    Settings(#[from] SettingsError),

    #[error("failed to write image: {0}")]
    Image(#[from] image::ImageError),
}

pub type Result<T> = std::result::Result<T, Error>;
