use fastrand::Rng;

use crate::error::CameraError;
use crate::ray::Ray;
use crate::vector::{random_vec_in_unit_disk, Point, Vec3};

/// Placement and lens of a thin-lens camera.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CameraSettings {
    pub look_from: Point,
    pub look_at: Point,
    pub view_up: Vec3,
    /// Top to bottom, in degrees.
    pub vertical_fov: f64,
    pub aspect_ratio: f64,
    pub aperture: f64,
    pub focus_distance: f64,
}

/// Thin-lens camera. Rays leave from a random point on the lens disk and converge on
/// the focal plane, which produces depth of field.
#[derive(Clone, Debug, PartialEq)]
pub struct Camera {
    origin: Point,
    lower_left_corner: Point,
    horizontal: Vec3,
    vertical: Vec3,
    u: Vec3,
    v: Vec3,
    w: Vec3,
    lens_radius: f64,
}

impl Camera {
    pub fn new(settings: &CameraSettings) -> Result<Self, CameraError> {
        let CameraSettings {
            look_from,
            look_at,
            view_up,
            vertical_fov,
            aspect_ratio,
            aperture,
            focus_distance,
        } = *settings;

        if !(vertical_fov > 0.0 && vertical_fov < 180.0) {
            return Err(CameraError::FieldOfView(vertical_fov));
        }
        if !(aspect_ratio > 0.0) {
            return Err(CameraError::AspectRatio(aspect_ratio));
        }
        if !(aperture >= 0.0) {
            return Err(CameraError::Aperture(aperture));
        }
        if !(focus_distance > 0.0) {
            return Err(CameraError::FocusDistance(focus_distance));
        }

        let back = look_from - look_at;
        if back.norm_squared() == 0.0 {
            return Err(CameraError::ZeroViewDirection);
        }
        let w = back.normalize();
        let across = view_up.cross(&w);
        if across.norm_squared() < 1e-24 {
            return Err(CameraError::DegenerateViewUp);
        }
        let u = across.normalize();
        let v = w.cross(&u);

        let half_height = (vertical_fov.to_radians() / 2.0).tan();
        let half_width = aspect_ratio * half_height;

        let horizontal = 2.0 * half_width * focus_distance * u;
        let vertical = 2.0 * half_height * focus_distance * v;
        let lower_left_corner = look_from - horizontal / 2.0 - vertical / 2.0 - focus_distance * w;

        Ok(Camera {
            origin: look_from,
            lower_left_corner,
            horizontal,
            vertical,
            u,
            v,
            w,
            lens_radius: aperture / 2.0,
        })
    }

    /// Ray through the image plane at `(s, t)`, both in `[0, 1]` from the lower left.
    ///
    /// Draws two or more numbers from `rng` for the lens sample.
    pub fn get_ray(&self, s: f64, t: f64, rng: &mut Rng) -> Ray {
        let rd = self.lens_radius * random_vec_in_unit_disk(rng);
        let offset = self.u * rd.x + self.v * rd.y;
        let target = self.lower_left_corner + s * self.horizontal + t * self.vertical;
        Ray::new(self.origin + offset, target - self.origin - offset)
    }

    pub fn origin(&self) -> Point {
        self.origin
    }
}

#[cfg(test)]
mod tests {
    use nalgebra::{point, vector};

    use super::*;

    fn settings() -> CameraSettings {
        CameraSettings {
            look_from: point![0.0, 0.0, 0.0],
            look_at: point![0.0, 0.0, -1.0],
            view_up: vector![0.0, 1.0, 0.0],
            vertical_fov: 90.0,
            aspect_ratio: 2.0,
            aperture: 0.0,
            focus_distance: 1.0,
        }
    }

    #[test]
    fn test_pinhole_corners() {
        let camera = Camera::new(&settings()).expect("valid camera");
        let mut rng = Rng::with_seed(1);

        let center = camera.get_ray(0.5, 0.5, &mut rng);
        assert_eq!(center.origin, point![0.0, 0.0, 0.0]);
        assert!((center.direction - vector![0.0, 0.0, -1.0]).norm() < 1e-12);

        // 90 degree fov at distance 1 spans [-1, 1] vertically and [-2, 2] horizontally
        let lower_left = camera.get_ray(0.0, 0.0, &mut rng);
        assert!((lower_left.direction - vector![-2.0, -1.0, -1.0]).norm() < 1e-12);
        let upper_right = camera.get_ray(1.0, 1.0, &mut rng);
        assert!((upper_right.direction - vector![2.0, 1.0, -1.0]).norm() < 1e-12);
    }

    #[test]
    fn test_basis_is_orthonormal() {
        let camera = Camera::new(&CameraSettings {
            look_from: point![13.0, 2.0, 3.0],
            look_at: point![0.0, 0.0, 0.0],
            ..settings()
        })
        .expect("valid camera");
        for (a, b) in [(camera.u, camera.v), (camera.v, camera.w), (camera.w, camera.u)] {
            assert!(a.dot(&b).abs() < 1e-12);
        }
        for axis in [camera.u, camera.v, camera.w] {
            assert!((axis.norm() - 1.0).abs() < 1e-12);
        }
        assert!((camera.w - vector![13.0, 2.0, 3.0].normalize()).norm() < 1e-12);
    }

    #[test]
    fn test_lens_rays_converge_on_focal_plane() {
        let camera = Camera::new(&CameraSettings {
            aperture: 0.5,
            focus_distance: 4.0,
            ..settings()
        })
        .expect("valid camera");
        let mut rng = Rng::with_seed(99);
        let focus_point = point![0.0, 0.0, -4.0];
        for _ in 0..100 {
            let ray = camera.get_ray(0.5, 0.5, &mut rng);
            assert!((ray.origin - camera.origin()).norm() <= 0.25);
            assert_eq!(ray.origin.z, 0.0);
            assert!((ray.at(1.0) - focus_point).norm() < 1e-12);
        }
    }

    #[test]
    fn test_rejects_degenerate_settings() {
        let cases = [
            (CameraSettings { look_at: point![0.0, 0.0, 0.0], ..settings() }, CameraError::ZeroViewDirection),
            (CameraSettings { view_up: vector![0.0, 0.0, 2.0], ..settings() }, CameraError::DegenerateViewUp),
            (CameraSettings { view_up: vector![0.0, 0.0, 0.0], ..settings() }, CameraError::DegenerateViewUp),
            (CameraSettings { vertical_fov: 0.0, ..settings() }, CameraError::FieldOfView(0.0)),
            (CameraSettings { vertical_fov: 180.0, ..settings() }, CameraError::FieldOfView(180.0)),
            (CameraSettings { aspect_ratio: -1.0, ..settings() }, CameraError::AspectRatio(-1.0)),
            (CameraSettings { aperture: -0.1, ..settings() }, CameraError::Aperture(-0.1)),
            (CameraSettings { focus_distance: 0.0, ..settings() }, CameraError::FocusDistance(0.0)),
        ];
        for (settings, expected) in cases {
            assert_eq!(Camera::new(&settings), Err(expected));
        }
    }
}
