#[allow(unused_imports)]
use crate::core::prelude::*;

use serde::{Deserialize, Serialize};
use std::fmt;
use std::fmt::Formatter;

/// A plane in Hessian normal form: points `p` on the plane satisfy `normal.dot(p) + distance == 0`.
///
/// The normal is kept unit length by every constructor. The default plane has a zero normal,
/// which the geometry helpers treat as degenerate.
///
/// ```
/// use glongge_math::core::prelude::*;
///
/// let ground = Plane::from_normal_and_point(Vec3::up(), Vec3::new(0.0, 2.0, 0.0));
/// assert_eq!(ground.distance, -2.0);
/// assert!(ground.side(Vec3::new(5.0, 3.0, 1.0)));
/// ```
#[derive(
    Default, Debug, Copy, Clone, PartialEq, Serialize, Deserialize, bincode::Encode, bincode::Decode,
)]
pub struct Plane {
    pub normal: Vec3,
    pub distance: f32,
}

impl Plane {
    pub fn from_normal_and_point(normal: Vec3, point: Vec3) -> Self {
        let normal = normal.normed();
        Self {
            normal,
            distance: -normal.dot(point),
        }
    }
    pub fn from_normal_and_distance(normal: Vec3, distance: f32) -> Self {
        Self {
            normal: normal.normed(),
            distance,
        }
    }
    /// Builds the plane through three points, winding clockwise when viewed from the side the
    /// normal points to. Collinear points give a zero normal.
    pub fn from_points(a: Vec3, b: Vec3, c: Vec3) -> Self {
        let normal = (b - a).cross(c - a).normed();
        Self {
            normal,
            distance: -normal.dot(a),
        }
    }

    pub fn set_normal_and_position(&mut self, normal: Vec3, point: Vec3) {
        *self = Self::from_normal_and_point(normal, point);
    }
    pub fn set_3_points(&mut self, a: Vec3, b: Vec3, c: Vec3) {
        *self = Self::from_points(a, b, c);
    }

    pub fn flip(&mut self) {
        self.normal = -self.normal;
        self.distance = -self.distance;
    }
    #[must_use]
    pub fn flipped(&self) -> Plane {
        Plane {
            normal: -self.normal,
            distance: -self.distance,
        }
    }

    pub fn translate(&mut self, translation: Vec3) {
        self.distance += self.normal.dot(translation);
    }
    #[must_use]
    pub fn translated(&self, translation: Vec3) -> Plane {
        let mut rv = *self;
        rv.translate(translation);
        rv
    }

    pub fn closest_point(&self, point: Vec3) -> Vec3 {
        point - self.normal * self.distance_to_point(point)
    }
    /// Signed distance; positive on the side the normal points to.
    pub fn distance_to_point(&self, point: Vec3) -> f32 {
        self.normal.dot(point) + self.distance
    }
    pub fn side(&self, point: Vec3) -> bool {
        self.distance_to_point(point) > 0.0
    }
    pub fn same_side(&self, a: Vec3, b: Vec3) -> bool {
        let da = self.distance_to_point(a);
        let db = self.distance_to_point(b);
        (da > 0.0 && db > 0.0) || (da <= 0.0 && db <= 0.0)
    }

    /// Intersects a ray with this plane. Returns whether the ray hits in front of its origin,
    /// and the distance along the ray to the intersection. The distance is negative if the
    /// plane is behind the ray, and 0 if the ray is parallel to the plane.
    pub fn raycast(&self, ray: &Ray) -> (bool, f32) {
        let along = ray.direction.dot(self.normal);
        if mathf::approximately(along, 0.0) {
            return (false, 0.0);
        }
        let enter = (-ray.origin.dot(self.normal) - self.distance) / along;
        (enter > 0.0, enter)
    }
}

impl fmt::Display for Plane {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "Plane[normal={}, distance={}]", self.normal, self.distance)
    }
}

#[derive(
    Default, Debug, Copy, Clone, PartialEq, Serialize, Deserialize, bincode::Encode, bincode::Decode,
)]
pub struct Ray {
    pub origin: Vec3,
    pub direction: Vec3,
}

impl Ray {
    pub fn new(origin: Vec3, direction: Vec3) -> Self {
        Self {
            origin,
            direction: direction.normed(),
        }
    }
    pub fn point(&self, distance: f32) -> Vec3 {
        self.origin + self.direction * distance
    }
}

impl fmt::Display for Ray {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "Ray[origin={}, direction={}]", self.origin, self.direction)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_points_winding() {
        // Clockwise viewed from above gives an upward normal in a left-handed world.
        let p = Plane::from_points(
            Vec3::zero(),
            Vec3::forward(),
            Vec3::right(),
        );
        assert_eq!(p.normal, Vec3::up());
        assert_eq!(p.distance, 0.0);

        let collinear = Plane::from_points(Vec3::zero(), Vec3::one(), Vec3::splat(2.0));
        assert_eq!(collinear.normal, Vec3::zero());

        let mut q = Plane::default();
        q.set_3_points(Vec3::zero(), Vec3::forward(), Vec3::right());
        assert_eq!(q, p);
    }

    #[test]
    fn distances() {
        let p = Plane::from_normal_and_point(Vec3::new(0.0, 5.0, 0.0), Vec3::new(0.0, 1.0, 0.0));
        assert_eq!(p.normal, Vec3::up());
        assert_eq!(p.distance_to_point(Vec3::new(3.0, 4.0, -2.0)), 3.0);
        assert_eq!(p.distance_to_point(Vec3::zero()), -1.0);
        assert_eq!(
            p.closest_point(Vec3::new(3.0, 4.0, -2.0)),
            Vec3::new(3.0, 1.0, -2.0)
        );
        assert!(p.side(Vec3::splat(2.0)));
        assert!(!p.side(Vec3::up()));
        assert!(p.same_side(Vec3::splat(2.0), Vec3::splat(3.0)));
        assert!(!p.same_side(Vec3::splat(2.0), Vec3::zero()));
        assert!(p.same_side(Vec3::up(), Vec3::zero()));

        let d = Plane::from_normal_and_distance(Vec3::new(0.0, 0.0, 2.0), 4.0);
        assert_eq!(d.normal, Vec3::forward());
        assert_eq!(d.distance_to_point(Vec3::zero()), 4.0);
    }

    #[test]
    fn flip_and_translate() {
        let mut p = Plane::from_normal_and_point(Vec3::up(), Vec3::up());
        let flipped = p.flipped();
        assert_eq!(flipped.normal, Vec3::down());
        assert_eq!(flipped.distance, 1.0);
        p.flip();
        assert_eq!(p, flipped);

        let p = Plane::from_normal_and_point(Vec3::up(), Vec3::zero());
        let moved = p.translated(Vec3::new(7.0, 2.0, 0.0));
        assert_eq!(moved.distance, 2.0);
        assert_eq!(moved.distance_to_point(Vec3::zero()), 2.0);
        let mut q = p;
        q.translate(Vec3::new(7.0, 2.0, 0.0));
        assert_eq!(q, moved);
        q.set_normal_and_position(Vec3::right(), Vec3::right());
        assert_eq!(q.distance, -1.0);
    }

    #[test]
    fn raycast() {
        let ground = Plane::from_normal_and_point(Vec3::up(), Vec3::zero());
        let (hit, enter) = ground.raycast(&Ray::new(Vec3::new(1.0, 3.0, 1.0), Vec3::down()));
        assert!(hit);
        assert_eq!(enter, 3.0);

        // Pointing away still reports where the line meets the plane.
        let (hit, enter) = ground.raycast(&Ray::new(Vec3::new(1.0, 3.0, 1.0), Vec3::up()));
        assert!(!hit);
        assert_eq!(enter, -3.0);

        let (hit, enter) = ground.raycast(&Ray::new(Vec3::up(), Vec3::right()));
        assert!(!hit);
        assert_eq!(enter, 0.0);
    }

    #[test]
    fn ray_points() {
        let ray = Ray::new(Vec3::one(), Vec3::new(0.0, 0.0, 10.0));
        assert_eq!(ray.direction, Vec3::forward());
        assert_eq!(ray.point(2.5), Vec3::new(1.0, 1.0, 3.5));
    }
}
