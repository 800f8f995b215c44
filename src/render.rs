use std::time::Instant;

use fastrand::Rng;
use log::{debug, info, trace};
use rayon::prelude::*;

use crate::camera::Camera;
use crate::error::SettingsError;
use crate::object::Hittable;
use crate::picture::{Color, Picture, Rgb8};
use crate::ray::Ray;
use crate::settings::RenderSettings;

/// Lower bound of every scene query, keeps scattered rays from re-hitting their origin.
pub const T_MIN: f64 = 0.001;

const SKY_BLUE: Color = Color::new(0.5, 0.7, 1.0);

/// White at the bottom blending into sky blue at the top.
pub fn background(ray: &Ray) -> Color {
    let unit_direction = ray.direction.normalize();
    let t = 0.5 * (unit_direction.y + 1.0);
    (1.0 - t) * Color::WHITE + t * SKY_BLUE
}

/// Radiance arriving along `ray`, following at most `depth` bounces.
///
/// Recursion depth equals `depth` in the worst case.
pub fn ray_color(ray: &Ray, world: &impl Hittable, depth: u32, rng: &mut Rng) -> Color {
    if depth == 0 {
        return Color::BLACK;
    }

    if let Some(hit) = world.hit(ray, T_MIN, f64::INFINITY) {
        return match hit.material.scatter(ray, &hit, rng) {
            Some((attenuation, scattered)) => {
                attenuation * ray_color(&scattered, world, depth - 1, rng)
            }
            None => Color::BLACK,
        };
    }

    background(ray)
}

/// Sum of `samples_per_pixel` jittered samples for pixel `(x, y)`, row 0 at the top.
pub fn sample_pixel(
    x: u32,
    y: u32,
    camera: &Camera,
    world: &impl Hittable,
    settings: &RenderSettings,
    rng: &mut Rng,
) -> Color {
    let width = (settings.width - 1) as f64;
    let height = (settings.height - 1) as f64;
    let row = settings.height - 1 - y;
    (0..settings.samples_per_pixel)
        .map(|_| {
            let s = (x as f64 + rng.f64()) / width;
            let t = (row as f64 + rng.f64()) / height;
            let ray = camera.get_ray(s, t, rng);
            ray_color(&ray, world, settings.max_depth, rng)
        })
        .sum()
}

/// Produces the final color of a single pixel.
pub fn render_pixel(
    x: u32,
    y: u32,
    camera: &Camera,
    world: &impl Hittable,
    settings: &RenderSettings,
    rng: &mut Rng,
) -> Rgb8 {
    let sum = sample_pixel(x, y, camera, world, settings, rng);
    Rgb8::from_samples(sum, settings.samples_per_pixel, settings.gamma)
}

fn render_chunk(
    index: usize,
    chunk: &mut [Rgb8],
    camera: &Camera,
    world: &impl Hittable,
    settings: &RenderSettings,
) {
    let width = settings.width as usize;
    let first = index * width * settings.lines_per_chunk as usize;
    let mut rng = Rng::with_seed(settings.seed.wrapping_add(index as u64));
    trace!(target: "render", "Rendering chunk {} ({} pixels)", index, chunk.len());

    for (offset, pixel) in chunk.iter_mut().enumerate() {
        let i = first + offset;
        let (x, y) = ((i % width) as u32, (i / width) as u32);
        *pixel = render_pixel(x, y, camera, world, settings, &mut rng);
    }
}

/// Renders the whole frame, splitting it into bands of rows rendered in parallel.
///
/// Each band owns a generator seeded from `settings.seed` and its index, so the
/// result does not depend on how rayon schedules the bands. Settings are checked
/// first, since the public fields can be set to values no frame can be rendered with.
pub fn render_frame(
    world: &impl Hittable,
    camera: &Camera,
    settings: &RenderSettings,
) -> Result<Picture<Vec<Rgb8>>, SettingsError> {
    let settings = &settings.clone().validated()?;
    let mut picture = Picture::blank(settings.width, settings.height);
    let chunk_len = settings.width as usize * settings.lines_per_chunk as usize;

    info!(
        target: "render",
        "Rendering {}x{} at {} samples per pixel, max depth {}",
        settings.width, settings.height, settings.samples_per_pixel, settings.max_depth
    );
    debug!(
        target: "render",
        "{} chunks on {} threads",
        picture.buffer().len().div_ceil(chunk_len),
        rayon::current_num_threads()
    );
    let start = Instant::now();

    picture
        .buffer_mut()
        .par_chunks_mut(chunk_len)
        .enumerate()
        .for_each(|(index, chunk)| render_chunk(index, chunk, camera, world, settings));

    info!(target: "render", "Finished rendering. Took {:?}", start.elapsed());
    Ok(picture)
}
