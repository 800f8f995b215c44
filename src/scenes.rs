//! Built-in demo scenes, each paired with the camera it is meant to be seen through.

use std::sync::Arc;

use fastrand::Rng;
use log::debug;
use nalgebra::{point, vector};

use crate::camera::{Camera, CameraSettings};
use crate::error::CameraError;
use crate::material::Material;
use crate::object::{Scene, Sphere};
use crate::picture::Color;
use crate::vector::random_range;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Preset {
    /// Diffuse, metal and hollow glass spheres on a diffuse ground.
    ThreeSpheres,
    /// Ground covered with small random spheres around three large ones.
    Random,
}

/// Mixed into the render seed before laying out the random scene, so the layout
/// stream never coincides with the stream of any render chunk.
const LAYOUT_SEED_SALT: u64 = 0x9E37_79B9_7F4A_7C15;

/// Seed of the generator that lays out [`Preset::Random`] for a given render seed.
pub fn layout_seed(seed: u64) -> u64 {
    seed ^ LAYOUT_SEED_SALT
}

/// Builds the scene for `preset` and its camera at `aspect_ratio`.
///
/// `seed` only matters for [`Preset::Random`].
pub fn build(preset: Preset, aspect_ratio: f64, seed: u64) -> Result<(Scene, Camera), CameraError> {
    let (scene, camera) = match preset {
        Preset::ThreeSpheres => (three_spheres(), three_spheres_camera(aspect_ratio)),
        Preset::Random => (random_spheres(&mut Rng::with_seed(layout_seed(seed))), random_spheres_camera(aspect_ratio)),
    };
    debug!(target: "render", "Built {:?} scene with {} objects", preset, scene.len());
    Ok((scene, Camera::new(&camera)?))
}

pub fn three_spheres() -> Scene {
    let ground = Arc::new(Material::lambert(Color::new(0.8, 0.8, 0.0)));
    let center = Arc::new(Material::lambert(Color::new(0.1, 0.2, 0.5)));
    let glass = Arc::new(Material::dielectric(1.5));
    let metal = Arc::new(Material::metal(Color::new(0.8, 0.6, 0.2), 0.0));

    [
        Sphere::new(point![0.0, -100.5, -1.0], 100.0, ground),
        Sphere::new(point![0.0, 0.0, -1.0], 0.5, center),
        // hollow glass: outer shell plus an inverted inner surface
        Sphere::new(point![-1.0, 0.0, -1.0], 0.5, glass.clone()),
        Sphere::new(point![-1.0, 0.0, -1.0], -0.45, glass),
        Sphere::new(point![1.0, 0.0, -1.0], 0.5, metal),
    ]
    .into_iter()
    .collect()
}

fn three_spheres_camera(aspect_ratio: f64) -> CameraSettings {
    let look_from = point![3.0, 3.0, 2.0];
    let look_at = point![0.0, 0.0, -1.0];
    CameraSettings {
        look_from,
        look_at,
        view_up: vector![0.0, 1.0, 0.0],
        vertical_fov: 20.0,
        aspect_ratio,
        aperture: 0.1,
        focus_distance: (look_from - look_at).norm(),
    }
}

pub fn random_spheres(rng: &mut Rng) -> Scene {
    let mut scene = Scene::new();

    let ground = Arc::new(Material::lambert(Color::new(0.5, 0.5, 0.5)));
    scene.add_sphere(Sphere::new(point![0.0, -1000.0, 0.0], 1000.0, ground));

    let clearing = point![4.0, 0.2, 0.0];
    for a in -11..11 {
        for b in -11..11 {
            let center = point![
                a as f64 + 0.9 * rng.f64(),
                0.2,
                b as f64 + 0.9 * rng.f64()
            ];
            if (center - clearing).norm() <= 0.9 {
                continue;
            }

            let choose_material = rng.f64();
            let material = if choose_material < 0.8 {
                Material::lambert(Color::random(rng) * Color::random(rng))
            } else if choose_material < 0.95 {
                let albedo = Color::new(
                    random_range(rng, 0.5, 1.0),
                    random_range(rng, 0.5, 1.0),
                    random_range(rng, 0.5, 1.0),
                );
                Material::metal(albedo, random_range(rng, 0.0, 0.5))
            } else {
                Material::dielectric(1.5)
            };
            scene.add_sphere(Sphere::new(center, 0.2, Arc::new(material)));
        }
    }

    scene.extend([
        Sphere::new(point![0.0, 1.0, 0.0], 1.0, Arc::new(Material::dielectric(1.5))),
        Sphere::new(point![-4.0, 1.0, 0.0], 1.0, Arc::new(Material::lambert(Color::new(0.4, 0.2, 0.1)))),
        Sphere::new(point![4.0, 1.0, 0.0], 1.0, Arc::new(Material::metal(Color::new(0.7, 0.6, 0.5), 0.0))),
    ]);
    scene
}

fn random_spheres_camera(aspect_ratio: f64) -> CameraSettings {
    CameraSettings {
        look_from: point![13.0, 2.0, 3.0],
        look_at: point![0.0, 0.0, 0.0],
        view_up: vector![0.0, 1.0, 0.0],
        vertical_fov: 20.0,
        aspect_ratio,
        aperture: 0.1,
        focus_distance: 10.0,
    }
}

#[cfg(test)]
mod tests {
    use nalgebra::{point, vector};

    use super::*;
    use crate::object::Hittable;
    use crate::ray::Ray;

    #[test]
    fn test_three_spheres() {
        let (scene, camera) = build(Preset::ThreeSpheres, 16.0 / 9.0, 0).expect("valid camera");
        assert_eq!(scene.len(), 5);
        // aimed at the center sphere
        let ray = camera.get_ray(0.5, 0.5, &mut Rng::with_seed(0));
        assert!(scene.hit(&ray, 0.001, f64::INFINITY).is_some());
    }

    #[test]
    fn test_hollow_glass_has_inner_surface() {
        let scene = three_spheres();
        let ray = Ray::new(point![-1.0, 2.0, -1.0], vector![0.0, -1.0, 0.0]);
        let outer = scene.hit(&ray, 0.001, f64::INFINITY).expect("outer shell");
        assert!((outer.t - 1.5).abs() < 1e-12);
        let inner = scene.hit(&ray, outer.t, f64::INFINITY).expect("inner shell");
        assert!((inner.t - 1.55).abs() < 1e-12);
        // entering the bubble counts as leaving the glass
        assert!(!inner.front_face());
    }

    #[test]
    fn test_random_scene_is_seeded() {
        let (a, _) = build(Preset::Random, 1.5, 7).expect("valid camera");
        let (b, _) = build(Preset::Random, 1.5, 7).expect("valid camera");
        assert_eq!(a.len(), b.len());
        assert!(a.len() > 4 && a.len() <= 4 + 22 * 22);

        let mut rng = Rng::with_seed(0);
        for _ in 0..20 {
            let ray = Ray::new(point![13.0, 2.0, 3.0], crate::vector::random_unit_vec(&mut rng));
            let ta = a.hit(&ray, 0.001, f64::INFINITY).map(|hit| hit.t);
            let tb = b.hit(&ray, 0.001, f64::INFINITY).map(|hit| hit.t);
            assert_eq!(ta, tb);
        }
    }

    #[test]
    fn test_layout_stream_differs_from_chunk_streams() {
        for seed in [0, 1, 7, 42, u64::MAX] {
            let mut layout = Rng::with_seed(layout_seed(seed));
            let first_draws: Vec<u64> = (0..4).map(|_| layout.u64(..)).collect();
            for chunk in 0..1024u64 {
                let render_seed = seed.wrapping_add(chunk);
                assert_ne!(layout_seed(seed), render_seed);
                let mut render = Rng::with_seed(render_seed);
                let draws: Vec<u64> = (0..4).map(|_| render.u64(..)).collect();
                assert_ne!(first_draws, draws);
            }
        }
    }
}
