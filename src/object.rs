use std::sync::Arc;

use crate::material::Material;
use crate::ray::{Face, Hit, Ray};
use crate::vector::Point;

/// Anything a ray can intersect.
///
/// `hit` reports the nearest intersection whose parameter lies strictly inside
/// `(t_min, t_max)`.
pub trait Hittable: Send + Sync {
    fn hit(&self, ray: &Ray, t_min: f64, t_max: f64) -> Option<Hit<'_>>;
}

#[derive(Clone, Debug)]
pub struct Sphere {
    pub center: Point,
    /// A negative radius flips the normals, which turns the sphere into a hollow shell
    /// when nested inside a second sphere of the same material.
    pub radius: f64,
    pub material: Arc<Material>,
}

impl Sphere {
    pub fn new(center: Point, radius: f64, material: Arc<Material>) -> Self {
        Sphere { center, radius, material }
    }
}

impl Hittable for Sphere {
    fn hit(&self, ray: &Ray, t_min: f64, t_max: f64) -> Option<Hit<'_>> {
        let oc = ray.origin - self.center;
        let a = ray.direction.norm_squared();
        let half_b = oc.dot(&ray.direction);
        let c = oc.norm_squared() - self.radius * self.radius;

        let discriminant = half_b * half_b - a * c;
        if discriminant <= 0.0 {
            return None;
        }
        let sqrtd = discriminant.sqrt();
        let in_range = |t: f64| t_min < t && t < t_max;

        // find the nearest root that lies in the acceptable range.
        let mut root = (-half_b - sqrtd) / a;
        if !in_range(root) {
            root = (-half_b + sqrtd) / a;
            if !in_range(root) {
                return None;
            }
        }

        let point = ray.at(root);
        let outward_normal = (point - self.center) / self.radius;
        let (face, normal) = if ray.direction.dot(&outward_normal) < 0.0 {
            (Face::Front, outward_normal)
        } else {
            (Face::Back, -outward_normal)
        };
        Some(Hit {
            point,
            normal,
            face,
            t: root,
            material: &self.material,
        })
    }
}

/// Flat list of objects scanned linearly on every query.
///
/// Built up front and then shared read-only with the render workers; mutation needs
/// `&mut self`, so it can never overlap a render borrowing the scene.
#[derive(Clone, Default)]
pub struct Scene {
    objects: Vec<Arc<dyn Hittable>>,
}

impl Scene {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, object: Arc<dyn Hittable>) {
        self.objects.push(object);
    }

    pub fn add_sphere(&mut self, sphere: Sphere) {
        self.add(Arc::new(sphere));
    }

    pub fn clear(&mut self) {
        self.objects.clear();
    }

    pub fn len(&self) -> usize {
        self.objects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }
}

impl FromIterator<Sphere> for Scene {
    fn from_iter<I: IntoIterator<Item=Sphere>>(iter: I) -> Self {
        let mut scene = Scene::new();
        scene.extend(iter);
        scene
    }
}

impl Extend<Sphere> for Scene {
    fn extend<I: IntoIterator<Item=Sphere>>(&mut self, iter: I) {
        for sphere in iter {
            self.add_sphere(sphere);
        }
    }
}

impl Hittable for Scene {
    fn hit(&self, ray: &Ray, t_min: f64, t_max: f64) -> Option<Hit<'_>> {
        let mut closest: Option<Hit> = None;
        for object in &self.objects {
            let closest_so_far = closest.as_ref().map_or(t_max, |hit| hit.t);
            if let Some(hit) = object.hit(ray, t_min, closest_so_far) {
                closest = Some(hit);
            }
        }
        closest
    }
}
