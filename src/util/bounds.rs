#[allow(unused_imports)]
use crate::core::prelude::*;

use itertools::iproduct;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fmt::Formatter;

/// An axis-aligned bounding box, stored as a centre and half-size (`extents`).
///
/// `size()` is always `2 * extents()`. Nothing stops the extents from being negative, but such
/// a box contains nothing and intersects nothing.
#[derive(
    Default, Debug, Copy, Clone, PartialEq, Serialize, Deserialize, bincode::Encode, bincode::Decode,
)]
pub struct Bounds {
    centre: Vec3,
    extents: Vec3,
}

impl Bounds {
    pub fn new(centre: Vec3, size: Vec3) -> Self {
        Self {
            centre,
            extents: size * 0.5,
        }
    }

    pub fn from_min_max(min: Vec3, max: Vec3) -> Self {
        let mut rv = Self::default();
        rv.set_min_max(min, max);
        rv
    }

    pub fn centre(&self) -> Vec3 {
        self.centre
    }
    pub fn set_centre(&mut self, centre: Vec3) {
        self.centre = centre;
    }
    pub fn extents(&self) -> Vec3 {
        self.extents
    }
    pub fn set_extents(&mut self, extents: Vec3) {
        self.extents = extents;
    }
    pub fn size(&self) -> Vec3 {
        self.extents * 2.0
    }
    pub fn set_size(&mut self, size: Vec3) {
        self.extents = size * 0.5;
    }

    pub fn min(&self) -> Vec3 {
        self.centre - self.extents
    }
    pub fn set_min(&mut self, min: Vec3) {
        self.set_min_max(min, self.max());
    }
    pub fn max(&self) -> Vec3 {
        self.centre + self.extents
    }
    pub fn set_max(&mut self, max: Vec3) {
        self.set_min_max(self.min(), max);
    }

    pub fn set_min_max(&mut self, min: Vec3, max: Vec3) {
        self.extents = (max - min) * 0.5;
        self.centre = min + self.extents;
    }

    /// Grows the box to include `point`.
    pub fn encapsulate_point(&mut self, point: Vec3) {
        self.set_min_max(self.min().min(point), self.max().max(point));
    }

    /// Grows the box to include `other`.
    pub fn encapsulate_bounds(&mut self, other: &Bounds) {
        self.encapsulate_point(other.centre - other.extents);
        self.encapsulate_point(other.centre + other.extents);
    }

    /// Grows the size by `amount` along every axis.
    pub fn expand(&mut self, amount: f32) {
        self.extents += Vec3::splat(amount * 0.5);
    }
    pub fn expand_vec3(&mut self, amount: Vec3) {
        self.extents += amount * 0.5;
    }

    /// Whether `point` is inside the box or on its boundary.
    pub fn contains(&self, point: Vec3) -> bool {
        let (min, max) = (self.min(), self.max());
        (0..3).all(|i| point[i] >= min[i] && point[i] <= max[i])
    }

    /// Whether the two boxes overlap. Boxes that only touch count as intersecting.
    pub fn intersects(&self, other: &Bounds) -> bool {
        let (min, max) = (self.min(), self.max());
        let (other_min, other_max) = (other.min(), other.max());
        (0..3).all(|i| min[i] <= other_max[i] && max[i] >= other_min[i])
    }

    /// Slab test. Returns the distance along the ray at which it enters the box, which is
    /// negative if the ray starts inside. `None` if the ray misses, the box is behind it, or
    /// the ray has no direction.
    pub fn intersect_ray(&self, ray: &Ray) -> Option<f32> {
        if ray.direction.len_squared() <= 0.0 {
            return None;
        }
        let (min, max) = (self.min(), self.max());
        let mut t_min = f32::NEG_INFINITY;
        let mut t_max = f32::INFINITY;
        for i in 0..3 {
            let origin = ray.origin[i];
            let direction = ray.direction[i];
            if direction == 0.0 {
                // Parallel to this slab: either always inside it or never.
                if origin < min[i] || origin > max[i] {
                    return None;
                }
                continue;
            }
            let t1 = (min[i] - origin) / direction;
            let t2 = (max[i] - origin) / direction;
            t_min = t_min.max(t1.min(t2));
            t_max = t_max.min(t1.max(t2));
            if t_min > t_max {
                return None;
            }
        }
        if t_max < 0.0 {
            None
        } else {
            Some(t_min)
        }
    }

    /// The point in (or on) the box closest to `point`.
    pub fn closest_point(&self, point: Vec3) -> Vec3 {
        let (min, max) = (self.min(), self.max());
        Vec3::new(
            mathf::clamp(point.x, min.x, max.x),
            mathf::clamp(point.y, min.y, max.y),
            mathf::clamp(point.z, min.z, max.z),
        )
    }

    /// Squared distance from `point` to the box; zero inside.
    pub fn sqr_distance(&self, point: Vec3) -> f32 {
        (point - self.closest_point(point)).len_squared()
    }
}

impl fmt::Display for Bounds {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Bounds[centre={}, extents={}]",
            self.centre, self.extents
        )
    }
}

/// An axis-aligned box of integer coordinates, stored as a corner `position` and `size`.
///
/// The size may be negative; `min()` and `max()` always return the normalised corners.
/// Containment is half-open: `min` is inside, `max` is not.
#[derive(
    Default,
    Debug,
    Copy,
    Clone,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    bincode::Encode,
    bincode::Decode,
)]
pub struct BoundsInt {
    pub position: Vec3i,
    pub size: Vec3i,
}

impl BoundsInt {
    pub fn new(position: Vec3i, size: Vec3i) -> Self {
        Self { position, size }
    }

    pub fn min(&self) -> Vec3i {
        self.position.component_min(self.position + self.size)
    }
    pub fn max(&self) -> Vec3i {
        self.position.component_max(self.position + self.size)
    }

    /// Moves the minimum corner, keeping the maximum corner where it is.
    pub fn set_min(&mut self, min: Vec3i) {
        let max = self.max();
        self.position = min;
        self.size = max - min;
    }
    /// Moves the maximum corner, keeping the minimum corner where it is.
    pub fn set_max(&mut self, max: Vec3i) {
        let min = self.min();
        self.position = min;
        self.size = max - min;
    }
    pub fn set_min_max(&mut self, min: Vec3i, max: Vec3i) {
        self.position = min;
        self.size = max - min;
    }

    pub fn centre(&self) -> Vec3 {
        self.position.as_vec3() + self.size.as_vec3() * 0.5
    }

    /// Shrinks this box so that it lies within `bounds`.
    pub fn clamp_to_bounds(&mut self, bounds: &BoundsInt) {
        let (bounds_min, bounds_max) = (bounds.min(), bounds.max());
        self.position = self.position.component_clamp(bounds_min, bounds_max);
        self.size = self.size.component_min(bounds_max - self.position);
    }

    pub fn contains(&self, point: Vec3i) -> bool {
        let (min, max) = (self.min(), self.max());
        (0..3).all(|i| point[i] >= min[i] && point[i] < max[i])
    }

    /// Iterates over every contained position, `x` fastest, then `y`, then `z`.
    pub fn all_positions_within(&self) -> impl Iterator<Item = Vec3i> {
        let (min, max) = (self.min(), self.max());
        iproduct!(min.z..max.z, min.y..max.y, min.x..max.x).map(|(z, y, x)| Vec3i::new(x, y, z))
    }
}

impl fmt::Display for BoundsInt {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "BoundsInt[position={}, size={}]",
            self.position, self.size
        )
    }
}

#[derive(
    Default, Debug, Copy, Clone, PartialEq, Serialize, Deserialize, bincode::Encode, bincode::Decode,
)]
pub struct BoundingSphere {
    pub position: Vec3,
    pub radius: f32,
}

impl BoundingSphere {
    pub fn new(position: Vec3, radius: f32) -> Self {
        Self { position, radius }
    }

    /// Packs as `(x, y, z, radius)`.
    pub fn from_vec4(v: Vec4) -> Self {
        Self {
            position: v.xyz(),
            radius: v.w,
        }
    }

    pub fn contains(&self, point: Vec3) -> bool {
        (point - self.position).len_squared() <= self.radius * self.radius
    }

    pub fn intersects(&self, other: &BoundingSphere) -> bool {
        let radii = self.radius + other.radius;
        (other.position - self.position).len_squared() <= radii * radii
    }
}
