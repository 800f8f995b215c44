use fastrand::Rng;

use crate::picture::Color;
use crate::ray::{Face, Hit, Ray};
use crate::vector::{random_unit_vec, random_vec_in_unit_sphere, reflect, refract};

#[derive(Clone, Debug, PartialEq)]
pub enum Material {
    Lambert { albedo: Color },
    Metal { albedo: Color, fuzz: f64 },
    Dielectric { index_of_refraction: f64 },
}

/// Schlick's approximation of the reflection probability at a glass boundary.
fn reflectance(cosine: f64, ref_idx: f64) -> f64 {
    let r0 = ((1.0 - ref_idx) / (1.0 + ref_idx)).powi(2);
    r0 + (1.0 - r0) * (1.0 - cosine).powi(5)
}

impl Material {
    /// Returns the attenuation and scattered ray, or `None` when the ray is absorbed.
    pub fn scatter(&self, ray: &Ray, hit: &Hit, rng: &mut Rng) -> Option<(Color, Ray)> {
        match self {
            Material::Lambert { albedo } => {
                let mut scatter_direction = hit.normal + random_unit_vec(rng);
                // the random vector can cancel the normal out
                if scatter_direction.norm_squared() < 1e-16 {
                    scatter_direction = hit.normal;
                }
                Some((*albedo, Ray::new(hit.point, scatter_direction)))
            }
            Material::Metal { albedo, fuzz } => {
                let reflected = reflect(&ray.direction.normalize(), &hit.normal)
                    + *fuzz * random_vec_in_unit_sphere(rng);
                if reflected.dot(&hit.normal) <= 0.0 {
                    return None;
                }
                Some((*albedo, Ray::new(hit.point, reflected)))
            }
            Material::Dielectric { index_of_refraction } => {
                let refraction_ratio = match hit.face {
                    Face::Front => 1.0 / index_of_refraction,
                    Face::Back => *index_of_refraction,
                };

                let unit_direction = ray.direction.normalize();

                let cos_theta = (-unit_direction).dot(&hit.normal).min(1.0);
                let sin_theta = (1.0 - cos_theta * cos_theta).sqrt();

                let total_internal_reflection = refraction_ratio * sin_theta > 1.0;
                let direction = if total_internal_reflection
                    || rng.f64() < reflectance(cos_theta, refraction_ratio)
                {
                    reflect(&unit_direction, &hit.normal)
                } else {
                    refract(&unit_direction, &hit.normal, refraction_ratio)
                };

                Some((Color::WHITE, Ray::new(hit.point, direction)))
            }
        }
    }

    pub fn lambert(albedo: Color) -> Material {
        Material::Lambert { albedo }
    }

    /// Metal with `fuzz` clamped into `[0, 1]`.
    pub fn metal(albedo: Color, fuzz: f64) -> Material {
        Material::Metal {
            albedo,
            fuzz: fuzz.clamp(0.0, 1.0),
        }
    }

    pub fn dielectric(index_of_refraction: f64) -> Material {
        Material::Dielectric { index_of_refraction }
    }
}
