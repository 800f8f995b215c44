use std::f64::consts::TAU;
use std::iter::repeat_with;

use fastrand::Rng;
use nalgebra::{vector, Point3, Vector3};

pub type Vec3 = Vector3<f64>;
pub type Point = Point3<f64>;

/// Uniform value in `[min, max)`.
pub fn random_range(rng: &mut Rng, min: f64, max: f64) -> f64 {
    min + (max - min) * rng.f64()
}

/// Vector with each component uniform in `[min, max)`.
pub fn random_vec(rng: &mut Rng, min: f64, max: f64) -> Vec3 {
    vector![
        random_range(rng, min, max),
        random_range(rng, min, max),
        random_range(rng, min, max)
    ]
}

/// Uniform point on the unit sphere, using the (azimuth, z) parametrization.
pub fn random_unit_vec(rng: &mut Rng) -> Vec3 {
    let z = random_range(rng, -1.0, 1.0);
    let a = random_range(rng, 0.0, TAU);
    let r = (1.0 - z * z).sqrt();
    vector![r * a.cos(), r * a.sin(), z]
}

pub fn random_vec_in_unit_sphere(rng: &mut Rng) -> Vec3 {
    repeat_with(|| random_vec(rng, -1.0, 1.0))
        .find(|vec| vec.norm_squared() < 1.0)
        .expect("infinite iterator")
}

pub fn random_vec_in_unit_disk(rng: &mut Rng) -> Vec3 {
    repeat_with(|| vector![random_range(rng, -1.0, 1.0), random_range(rng, -1.0, 1.0), 0.0])
        .find(|vec| vec.norm_squared() < 1.0)
        .expect("infinite iterator")
}

pub fn reflect(v: &Vec3, n: &Vec3) -> Vec3 {
    v - 2.0 * v.dot(n) * n
}

/// Snell's law for a unit incident vector `uv` against unit normal `n`.
///
/// `etai_over_etat` is the ratio of refractive indices. The caller must have ruled out
/// total internal reflection; the remaining rounding error near the critical angle is
/// absorbed by taking the magnitude under the root.
pub fn refract(uv: &Vec3, n: &Vec3, etai_over_etat: f64) -> Vec3 {
    let cos_theta = (-uv).dot(n);
    let r_out_parallel = etai_over_etat * (uv + cos_theta * n);
    let r_out_perp = -(1.0 - r_out_parallel.norm_squared()).abs().sqrt() * n;
    r_out_parallel + r_out_perp
}
