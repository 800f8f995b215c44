use crate::material::Material;
use crate::vector::{Point, Vec3};

#[derive(Clone, Debug)]
pub struct Ray {
    pub origin: Point,
    pub direction: Vec3,
}

impl Ray {
    pub fn new(origin: Point, direction: Vec3) -> Self {
        Self { origin, direction }
    }

    pub fn at(&self, t: f64) -> Point {
        self.origin + self.direction * t
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Face {
    Front,
    Back,
}

/// Nearest intersection found by a hit query.
///
/// `normal` always points against the incoming ray; `face` records which side was hit.
/// The material is borrowed from the object that was hit, so queries never touch the
/// shared reference counts.
#[derive(Clone, Copy, Debug)]
pub struct Hit<'a> {
    pub point: Point,
    pub normal: Vec3,
    pub face: Face,
    pub t: f64,
    pub material: &'a Material,
}

impl Hit<'_> {
    pub fn front_face(&self) -> bool {
        self.face == Face::Front
    }
}

#[cfg(test)]
mod tests {
    use nalgebra::{point, vector};

    use super::*;

    #[test]
    fn test_at() {
        let ray = Ray::new(point![1.0, 2.0, 3.0], vector![0.0, 0.0, -2.0]);
        assert_eq!(ray.at(0.0), point![1.0, 2.0, 3.0]);
        assert_eq!(ray.at(1.5), point![1.0, 2.0, 0.0]);
    }
}
