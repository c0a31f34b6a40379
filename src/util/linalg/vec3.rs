#[allow(unused_imports)]
use crate::core::prelude::*;

use crate::util::assert::check_lt;
use crate::util::gg_float;
use bytemuck::{Pod, Zeroable};
use num_traits::Zero;
use serde::{Deserialize, Serialize};
use std::iter::Sum;
use std::{
    fmt,
    fmt::Formatter,
    ops::{Add, AddAssign, Div, DivAssign, Index, IndexMut, Mul, MulAssign, Neg, Sub, SubAssign},
};

/// A 3D vector using 32-bit floating point coordinates.
///
/// World space is left-handed: `x` points right, `y` up and `z` forward.
///
/// Equality is approximate in the same way as for [`Vec2`]: the squared length of the
/// difference must be below [`EPSILON_SQUARED`](crate::core::config::EPSILON_SQUARED).
#[repr(C)]
#[derive(
    Default,
    Debug,
    Copy,
    Clone,
    Pod,
    Zeroable,
    Serialize,
    Deserialize,
    bincode::Encode,
    bincode::Decode,
)]
pub struct Vec3 {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl PartialEq for Vec3 {
    fn eq(&self, other: &Self) -> bool {
        (*self - *other).len_squared() < EPSILON_SQUARED
    }
}

impl Vec3 {
    pub const fn new(x: f32, y: f32, z: f32) -> Vec3 {
        Vec3 { x, y, z }
    }

    #[must_use]
    pub fn right() -> Vec3 {
        Vec3::new(1.0, 0.0, 0.0)
    }
    #[must_use]
    pub fn left() -> Vec3 {
        Vec3::new(-1.0, 0.0, 0.0)
    }
    #[must_use]
    pub fn up() -> Vec3 {
        Vec3::new(0.0, 1.0, 0.0)
    }
    #[must_use]
    pub fn down() -> Vec3 {
        Vec3::new(0.0, -1.0, 0.0)
    }
    #[must_use]
    pub fn forward() -> Vec3 {
        Vec3::new(0.0, 0.0, 1.0)
    }
    #[must_use]
    pub fn back() -> Vec3 {
        Vec3::new(0.0, 0.0, -1.0)
    }
    #[must_use]
    pub fn one() -> Vec3 {
        Vec3::splat(1.0)
    }
    #[must_use]
    pub fn zero() -> Vec3 {
        Vec3::splat(0.0)
    }
    #[must_use]
    pub fn positive_infinity() -> Vec3 {
        Vec3::splat(f32::INFINITY)
    }
    #[must_use]
    pub fn negative_infinity() -> Vec3 {
        Vec3::splat(f32::NEG_INFINITY)
    }

    #[must_use]
    pub fn splat(v: f32) -> Vec3 {
        Vec3 { x: v, y: v, z: v }
    }

    pub fn set(&mut self, x: f32, y: f32, z: f32) {
        self.x = x;
        self.y = y;
        self.z = z;
    }

    pub fn try_get(&self, index: usize) -> Result<f32> {
        match index {
            0 => Ok(self.x),
            1 => Ok(self.y),
            2 => Ok(self.z),
            _ => bail!("Vec3: index out of range: {index}"),
        }
    }

    #[must_use]
    pub fn xy(&self) -> Vec2 {
        Vec2 {
            x: self.x,
            y: self.y,
        }
    }

    #[must_use]
    pub fn len_squared(&self) -> f32 {
        self.dot(*self)
    }
    #[must_use]
    pub fn len(&self) -> f32 {
        self.len_squared().sqrt()
    }

    /// Returns a unit vector in the same direction, or zero if the length is at most
    /// [`EPSILON`](crate::core::config::EPSILON).
    #[must_use]
    pub fn normed(&self) -> Vec3 {
        let len = self.len();
        if len > EPSILON {
            *self / len
        } else {
            Vec3::zero()
        }
    }
    pub fn normalise(&mut self) {
        *self = self.normed();
    }

    #[must_use]
    pub fn dot(&self, other: Vec3) -> f32 {
        self.x * other.x + self.y * other.y + self.z * other.z
    }

    #[must_use]
    pub fn cross(&self, other: Vec3) -> Vec3 {
        Vec3 {
            x: self.y * other.z - self.z * other.y,
            y: self.z * other.x - self.x * other.z,
            z: self.x * other.y - self.y * other.x,
        }
    }

    #[must_use]
    pub fn dist(&self, other: Vec3) -> f32 {
        (other - *self).len()
    }

    /// Unsigned angle between the two vectors in degrees, in [0, 180].
    #[must_use]
    pub fn angle_degrees(&self, other: Vec3) -> f32 {
        let denominator = (self.len_squared() * other.len_squared()).sqrt();
        if denominator < EPSILON_NORMAL_SQRT {
            return 0.0;
        }
        let cos = mathf::clamp(self.dot(other) / denominator, -1.0, 1.0);
        cos.acos() * RAD_TO_DEG
    }

    /// Angle from `self` to `other` in degrees, signed by which side of `axis` the rotation
    /// lies on.
    #[must_use]
    pub fn signed_angle_degrees(&self, other: Vec3, axis: Vec3) -> f32 {
        self.angle_degrees(other) * mathf::sign(axis.dot(self.cross(other)))
    }

    /// Reflects the vector off the plane defined by `normal`, which should be normalised.
    #[must_use]
    pub fn reflect(&self, normal: Vec3) -> Vec3 {
        let factor = -2.0 * normal.dot(*self);
        factor * normal + *self
    }

    /// Projects the vector onto `onto`. Returns zero if `onto` is (nearly) zero.
    #[must_use]
    pub fn project(&self, onto: Vec3) -> Vec3 {
        let len_squared = onto.len_squared();
        if len_squared < MIN_POSITIVE_SUBNORMAL {
            return Vec3::zero();
        }
        onto * self.dot(onto) / len_squared
    }

    /// Projects the vector onto the plane through the origin with the given normal.
    #[must_use]
    pub fn project_on_plane(&self, plane_normal: Vec3) -> Vec3 {
        let len_squared = plane_normal.len_squared();
        if len_squared < MIN_POSITIVE_SUBNORMAL {
            return *self;
        }
        *self - plane_normal * self.dot(plane_normal) / len_squared
    }

    #[must_use]
    pub fn scale(&self, other: Vec3) -> Vec3 {
        Vec3 {
            x: self.x * other.x,
            y: self.y * other.y,
            z: self.z * other.z,
        }
    }

    #[must_use]
    pub fn min(&self, other: Vec3) -> Vec3 {
        Vec3 {
            x: self.x.min(other.x),
            y: self.y.min(other.y),
            z: self.z.min(other.z),
        }
    }
    #[must_use]
    pub fn max(&self, other: Vec3) -> Vec3 {
        Vec3 {
            x: self.x.max(other.x),
            y: self.y.max(other.y),
            z: self.z.max(other.z),
        }
    }
    #[must_use]
    pub fn abs(&self) -> Vec3 {
        Vec3 {
            x: self.x.abs(),
            y: self.y.abs(),
            z: self.z.abs(),
        }
    }

    #[must_use]
    pub fn clamp_len(&self, max_len: f32) -> Vec3 {
        let len_squared = self.len_squared();
        if len_squared > max_len * max_len {
            *self / len_squared.sqrt() * max_len
        } else {
            *self
        }
    }

    #[must_use]
    pub fn move_towards(&self, target: Vec3, max_delta: f32) -> Vec3 {
        let to_target = target - *self;
        let dist_squared = to_target.len_squared();
        if dist_squared == 0.0 || (max_delta >= 0.0 && dist_squared <= max_delta * max_delta) {
            return target;
        }
        *self + to_target / dist_squared.sqrt() * max_delta
    }

    #[must_use]
    pub fn lerp(&self, to: Vec3, t: f32) -> Vec3 {
        self.lerp_unclamped(to, mathf::clamp01(t))
    }
    #[must_use]
    pub fn lerp_unclamped(&self, to: Vec3, t: f32) -> Vec3 {
        Vec3 {
            x: self.x + (to.x - self.x) * t,
            y: self.y + (to.y - self.y) * t,
            z: self.z + (to.z - self.z) * t,
        }
    }

    /// Spherically interpolates between two vectors, with `t` clamped to [0, 1].
    ///
    /// The direction rotates at constant angular speed while the length is interpolated
    /// linearly. Falls back to [`lerp`](Vec3::lerp) when either vector is (nearly) zero or the
    /// two point the same way.
    #[must_use]
    pub fn slerp(&self, to: Vec3, t: f32) -> Vec3 {
        self.slerp_unclamped(to, mathf::clamp01(t))
    }

    #[must_use]
    pub fn slerp_unclamped(&self, to: Vec3, t: f32) -> Vec3 {
        let from_len = self.len();
        let to_len = to.len();
        if from_len < EPSILON || to_len < EPSILON {
            return self.lerp_unclamped(to, t);
        }
        let len = mathf::lerp_unclamped(from_len, to_len, t);
        let cos = self.dot(to) / (from_len * to_len);
        let from_norm = *self / from_len;
        if cos > 1.0 - EPSILON {
            self.lerp_unclamped(to, t)
        } else if cos < -1.0 + EPSILON {
            // Opposite directions: any perpendicular axis will do.
            let axis = from_norm.any_orthonormal();
            Quaternion::angle_axis(180.0 * t, axis) * from_norm * len
        } else {
            let axis = self.cross(to).normed();
            let angle = cos.acos() * RAD_TO_DEG * t;
            Quaternion::angle_axis(angle, axis) * from_norm * len
        }
    }

    /// Rotates towards `target` by at most `max_degrees_delta`, while moving the length
    /// towards the target's length by at most `max_len_delta`.
    #[must_use]
    pub fn rotate_towards(&self, target: Vec3, max_degrees_delta: f32, max_len_delta: f32) -> Vec3 {
        let from_len = self.len();
        let to_len = target.len();
        if from_len <= EPSILON || to_len <= EPSILON {
            return self.move_towards(target, max_len_delta);
        }
        let from_norm = *self / from_len;
        let to_norm = target / to_len;
        let cos = from_norm.dot(to_norm);
        if cos > 1.0 - EPSILON {
            return self.move_towards(target, max_len_delta);
        }
        let (axis, angle) = if cos < -1.0 + EPSILON {
            (from_norm.any_orthonormal(), max_degrees_delta)
        } else {
            let angle = cos.acos() * RAD_TO_DEG;
            (
                from_norm.cross(to_norm).normed(),
                max_degrees_delta.min(angle),
            )
        };
        let len = mathf::move_towards(from_len, to_len, max_len_delta.max(0.0));
        Quaternion::angle_axis(angle, axis) * from_norm * len
    }

    /// Returns some unit vector perpendicular to this one, which must be normalised.
    #[must_use]
    pub fn any_orthonormal(&self) -> Vec3 {
        if self.z.abs() > std::f32::consts::FRAC_1_SQRT_2 {
            let k = 1.0 / (self.y * self.y + self.z * self.z).sqrt();
            Vec3::new(0.0, -self.z * k, self.y * k)
        } else {
            let k = 1.0 / (self.x * self.x + self.y * self.y).sqrt();
            Vec3::new(-self.y * k, self.x * k, 0.0)
        }
    }

    /// Makes `normal` unit length, and `tangent` unit length and perpendicular to it.
    ///
    /// If `tangent` is parallel to `normal`, an arbitrary perpendicular is chosen. A zero
    /// `normal` becomes [`Vec3::right`].
    pub fn ortho_normalise(normal: &mut Vec3, tangent: &mut Vec3) {
        let len = normal.len();
        *normal = if len > EPSILON {
            *normal / len
        } else {
            Vec3::right()
        };
        *tangent -= normal.dot(*tangent) * *normal;
        let len = tangent.len();
        *tangent = if len < EPSILON {
            normal.any_orthonormal()
        } else {
            *tangent / len
        };
    }

    /// As [`ortho_normalise`](Vec3::ortho_normalise), additionally making `binormal` unit length
    /// and perpendicular to both.
    pub fn ortho_normalise_3(normal: &mut Vec3, tangent: &mut Vec3, binormal: &mut Vec3) {
        Vec3::ortho_normalise(normal, tangent);
        *binormal -= normal.dot(*binormal) * *normal + tangent.dot(*binormal) * *tangent;
        let len = binormal.len();
        *binormal = if len > EPSILON {
            *binormal / len
        } else {
            normal.cross(*tangent)
        };
    }

    /// Vector version of [`mathf::smooth_damp`].
    #[must_use]
    pub fn smooth_damp(
        &self,
        target: Vec3,
        velocity: &mut Vec3,
        smooth_time: f32,
        max_speed: f32,
        delta_time: f32,
    ) -> Vec3 {
        let smooth_time = smooth_time.max(SMOOTH_DAMP_MIN_TIME);
        let omega = 2.0 / smooth_time;
        let x = omega * delta_time;
        let exp = 1.0 / (1.0 + x + 0.48 * x * x + 0.235 * x * x * x);

        let original_to = target;
        let change = (*self - target).clamp_len(max_speed * smooth_time);
        let target = *self - change;

        let temp = (*velocity + omega * change) * delta_time;
        *velocity = (*velocity - omega * temp) * exp;
        let output = target + (change + temp) * exp;

        if (original_to - *self).dot(output - original_to) > 0.0 {
            *velocity = Vec3::zero();
            return original_to;
        }
        output
    }

    pub fn almost_eq(&self, rhs: Vec3) -> bool {
        *self == rhs
    }

    #[must_use]
    pub fn round_to_int(&self) -> Vec3i {
        Vec3i {
            x: mathf::round_to_int(self.x),
            y: mathf::round_to_int(self.y),
            z: mathf::round_to_int(self.z),
        }
    }
    #[must_use]
    pub fn floor_to_int(&self) -> Vec3i {
        Vec3i {
            x: mathf::floor_to_int(self.x),
            y: mathf::floor_to_int(self.y),
            z: mathf::floor_to_int(self.z),
        }
    }
    #[must_use]
    pub fn ceil_to_int(&self) -> Vec3i {
        Vec3i {
            x: mathf::ceil_to_int(self.x),
            y: mathf::ceil_to_int(self.y),
            z: mathf::ceil_to_int(self.z),
        }
    }
}

impl Index<usize> for Vec3 {
    type Output = f32;

    fn index(&self, index: usize) -> &Self::Output {
        check_lt!(index, 3);
        match index {
            0 => &self.x,
            1 => &self.y,
            _ => &self.z,
        }
    }
}
impl IndexMut<usize> for Vec3 {
    fn index_mut(&mut self, index: usize) -> &mut Self::Output {
        check_lt!(index, 3);
        match index {
            0 => &mut self.x,
            1 => &mut self.y,
            _ => &mut self.z,
        }
    }
}

impl Zero for Vec3 {
    fn zero() -> Self {
        Vec3::zero()
    }

    fn is_zero(&self) -> bool {
        *self == Vec3::zero()
    }
}

impl From<[f32; 3]> for Vec3 {
    fn from(value: [f32; 3]) -> Self {
        Vec3::new(value[0], value[1], value[2])
    }
}
impl From<Vec3> for [f32; 3] {
    fn from(value: Vec3) -> Self {
        [value.x, value.y, value.z]
    }
}
impl From<Vec2> for Vec3 {
    fn from(value: Vec2) -> Self {
        Vec3::new(value.x, value.y, 0.0)
    }
}
impl From<Vec4> for Vec3 {
    fn from(value: Vec4) -> Self {
        Vec3::new(value.x, value.y, value.z)
    }
}
impl From<Vec3i> for Vec3 {
    fn from(value: Vec3i) -> Self {
        Vec3::new(value.x as f32, value.y as f32, value.z as f32)
    }
}

impl fmt::Display for Vec3 {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "vec(")?;
        if let Some(p) = f.precision() {
            write!(f, "{0:.1$}, {2:.1$}, {3:.1$}", self.x, p, self.y, self.z)?;
        } else {
            write!(f, "{}, {}, {}", self.x, self.y, self.z)?;
        }
        write!(f, ")")
    }
}

impl Add<Vec3> for Vec3 {
    type Output = Vec3;

    fn add(self, rhs: Vec3) -> Self::Output {
        Vec3::new(self.x + rhs.x, self.y + rhs.y, self.z + rhs.z)
    }
}
impl AddAssign<Vec3> for Vec3 {
    fn add_assign(&mut self, rhs: Vec3) {
        *self = *self + rhs;
    }
}
impl Sub<Vec3> for Vec3 {
    type Output = Vec3;

    fn sub(self, rhs: Vec3) -> Self::Output {
        Vec3::new(self.x - rhs.x, self.y - rhs.y, self.z - rhs.z)
    }
}
impl SubAssign<Vec3> for Vec3 {
    fn sub_assign(&mut self, rhs: Vec3) {
        *self = *self - rhs;
    }
}
impl Sum<Vec3> for Vec3 {
    fn sum<I: Iterator<Item = Vec3>>(iter: I) -> Self {
        iter.fold(Vec3::zero(), Vec3::add)
    }
}

impl Mul<Vec3> for Vec3 {
    type Output = Vec3;

    fn mul(self, rhs: Vec3) -> Self::Output {
        self.scale(rhs)
    }
}
impl Mul<f32> for Vec3 {
    type Output = Vec3;

    fn mul(self, rhs: f32) -> Self::Output {
        Vec3::new(self.x * rhs, self.y * rhs, self.z * rhs)
    }
}
impl Mul<Vec3> for f32 {
    type Output = Vec3;

    fn mul(self, rhs: Vec3) -> Self::Output {
        rhs * self
    }
}
impl MulAssign<f32> for Vec3 {
    fn mul_assign(&mut self, rhs: f32) {
        *self = *self * rhs;
    }
}

impl Div<Vec3> for Vec3 {
    type Output = Vec3;

    fn div(self, rhs: Vec3) -> Self::Output {
        Vec3::new(self.x / rhs.x, self.y / rhs.y, self.z / rhs.z)
    }
}
impl Div<f32> for Vec3 {
    type Output = Vec3;

    fn div(self, rhs: f32) -> Self::Output {
        Vec3::new(self.x / rhs, self.y / rhs, self.z / rhs)
    }
}
impl DivAssign<f32> for Vec3 {
    fn div_assign(&mut self, rhs: f32) {
        *self = *self / rhs;
    }
}

impl Neg for Vec3 {
    type Output = Vec3;

    fn neg(self) -> Self::Output {
        Vec3::new(
            gg_float::force_positive_zero(-self.x),
            gg_float::force_positive_zero(-self.y),
            gg_float::force_positive_zero(-self.z),
        )
    }
}
