//! Recursive Monte Carlo ray tracer for scenes of spheres, following the
//! [Ray Tracing in One Weekend](https://raytracing.github.io/) book series.
//!
//! Randomness is never global: every sampling function takes the caller's
//! [`fastrand::Rng`], and [`render::render_frame`] gives each parallel chunk its own
//! seeded generator.

pub mod camera;
pub mod error;
pub mod material;
pub mod object;
pub mod picture;
pub mod ray;
pub mod render;
pub mod scenes;
pub mod settings;
pub mod vector;

pub use camera::{Camera, CameraSettings};
pub use error::{CameraError, Error, Result, SettingsError};
pub use material::Material;
pub use object::{Hittable, Scene, Sphere};
pub use picture::{Color, Picture, Rgb8};
pub use ray::{Face, Hit, Ray};
pub use render::{ray_color, render_frame, render_pixel};
pub use settings::RenderSettings;
