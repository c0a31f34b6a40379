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

/// A 4D vector, mostly used for homogeneous coordinates and as the storage for shader
/// parameters. Equality is approximate, as for [`Vec3`].
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
pub struct Vec4 {
    pub x: f32,
    pub y: f32,
    pub z: f32,
    pub w: f32,
}

impl PartialEq for Vec4 {
    fn eq(&self, other: &Self) -> bool {
        (*self - *other).len_squared() < EPSILON_SQUARED
    }
}

impl Vec4 {
    pub const fn new(x: f32, y: f32, z: f32, w: f32) -> Vec4 {
        Vec4 { x, y, z, w }
    }

    #[must_use]
    pub fn zero() -> Vec4 {
        Vec4::splat(0.0)
    }
    #[must_use]
    pub fn one() -> Vec4 {
        Vec4::splat(1.0)
    }
    #[must_use]
    pub fn positive_infinity() -> Vec4 {
        Vec4::splat(f32::INFINITY)
    }
    #[must_use]
    pub fn negative_infinity() -> Vec4 {
        Vec4::splat(f32::NEG_INFINITY)
    }
    #[must_use]
    pub fn splat(v: f32) -> Vec4 {
        Vec4::new(v, v, v, v)
    }

    pub fn set(&mut self, x: f32, y: f32, z: f32, w: f32) {
        *self = Vec4::new(x, y, z, w);
    }

    pub fn try_get(&self, index: usize) -> Result<f32> {
        match index {
            0 => Ok(self.x),
            1 => Ok(self.y),
            2 => Ok(self.z),
            3 => Ok(self.w),
            _ => bail!("Vec4: index out of range: {index}"),
        }
    }

    #[must_use]
    pub fn xyz(&self) -> Vec3 {
        Vec3::new(self.x, self.y, self.z)
    }

    #[must_use]
    pub fn dot(&self, other: Vec4) -> f32 {
        self.x * other.x + self.y * other.y + self.z * other.z + self.w * other.w
    }
    #[must_use]
    pub fn len_squared(&self) -> f32 {
        self.dot(*self)
    }
    #[must_use]
    pub fn len(&self) -> f32 {
        self.len_squared().sqrt()
    }
    #[must_use]
    pub fn dist(&self, other: Vec4) -> f32 {
        (other - *self).len()
    }

    #[must_use]
    pub fn normed(&self) -> Vec4 {
        let len = self.len();
        if len > EPSILON {
            *self / len
        } else {
            Vec4::zero()
        }
    }
    pub fn normalise(&mut self) {
        *self = self.normed();
    }

    #[must_use]
    pub fn project(&self, onto: Vec4) -> Vec4 {
        let len_squared = onto.len_squared();
        if len_squared < MIN_POSITIVE_SUBNORMAL {
            return Vec4::zero();
        }
        onto * self.dot(onto) / len_squared
    }

    #[must_use]
    pub fn scale(&self, other: Vec4) -> Vec4 {
        Vec4::new(
            self.x * other.x,
            self.y * other.y,
            self.z * other.z,
            self.w * other.w,
        )
    }
    #[must_use]
    pub fn min(&self, other: Vec4) -> Vec4 {
        Vec4::new(
            self.x.min(other.x),
            self.y.min(other.y),
            self.z.min(other.z),
            self.w.min(other.w),
        )
    }
    #[must_use]
    pub fn max(&self, other: Vec4) -> Vec4 {
        Vec4::new(
            self.x.max(other.x),
            self.y.max(other.y),
            self.z.max(other.z),
            self.w.max(other.w),
        )
    }

    #[must_use]
    pub fn clamp_len(&self, max_len: f32) -> Vec4 {
        let len_squared = self.len_squared();
        if len_squared > max_len * max_len {
            *self / len_squared.sqrt() * max_len
        } else {
            *self
        }
    }

    #[must_use]
    pub fn move_towards(&self, target: Vec4, max_delta: f32) -> Vec4 {
        let to_target = target - *self;
        let dist_squared = to_target.len_squared();
        if dist_squared == 0.0 || (max_delta >= 0.0 && dist_squared <= max_delta * max_delta) {
            return target;
        }
        *self + to_target / dist_squared.sqrt() * max_delta
    }

    #[must_use]
    pub fn lerp(&self, to: Vec4, t: f32) -> Vec4 {
        self.lerp_unclamped(to, mathf::clamp01(t))
    }
    #[must_use]
    pub fn lerp_unclamped(&self, to: Vec4, t: f32) -> Vec4 {
        *self + (to - *self) * t
    }

    pub fn almost_eq(&self, rhs: Vec4) -> bool {
        *self == rhs
    }
}

impl Index<usize> for Vec4 {
    type Output = f32;

    fn index(&self, index: usize) -> &Self::Output {
        check_lt!(index, 4);
        match index {
            0 => &self.x,
            1 => &self.y,
            2 => &self.z,
            _ => &self.w,
        }
    }
}
impl IndexMut<usize> for Vec4 {
    fn index_mut(&mut self, index: usize) -> &mut Self::Output {
        check_lt!(index, 4);
        match index {
            0 => &mut self.x,
            1 => &mut self.y,
            2 => &mut self.z,
            _ => &mut self.w,
        }
    }
}

impl Zero for Vec4 {
    fn zero() -> Self {
        Vec4::zero()
    }

    fn is_zero(&self) -> bool {
        *self == Vec4::zero()
    }
}

impl From<[f32; 4]> for Vec4 {
    fn from(value: [f32; 4]) -> Self {
        Vec4::new(value[0], value[1], value[2], value[3])
    }
}
impl From<Vec4> for [f32; 4] {
    fn from(value: Vec4) -> Self {
        [value.x, value.y, value.z, value.w]
    }
}
impl From<Vec3> for Vec4 {
    fn from(value: Vec3) -> Self {
        Vec4::new(value.x, value.y, value.z, 0.0)
    }
}
impl From<Vec2> for Vec4 {
    fn from(value: Vec2) -> Self {
        Vec4::new(value.x, value.y, 0.0, 0.0)
    }
}

impl fmt::Display for Vec4 {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "vec(")?;
        if let Some(p) = f.precision() {
            write!(
                f,
                "{0:.1$}, {2:.1$}, {3:.1$}, {4:.1$}",
                self.x, p, self.y, self.z, self.w
            )?;
        } else {
            write!(f, "{}, {}, {}, {}", self.x, self.y, self.z, self.w)?;
        }
        write!(f, ")")
    }
}

impl Add<Vec4> for Vec4 {
    type Output = Vec4;

    fn add(self, rhs: Vec4) -> Self::Output {
        Vec4::new(
            self.x + rhs.x,
            self.y + rhs.y,
            self.z + rhs.z,
            self.w + rhs.w,
        )
    }
}
impl AddAssign<Vec4> for Vec4 {
    fn add_assign(&mut self, rhs: Vec4) {
        *self = *self + rhs;
    }
}
impl Sub<Vec4> for Vec4 {
    type Output = Vec4;

    fn sub(self, rhs: Vec4) -> Self::Output {
        Vec4::new(
            self.x - rhs.x,
            self.y - rhs.y,
            self.z - rhs.z,
            self.w - rhs.w,
        )
    }
}
impl SubAssign<Vec4> for Vec4 {
    fn sub_assign(&mut self, rhs: Vec4) {
        *self = *self - rhs;
    }
}
impl Sum<Vec4> for Vec4 {
    fn sum<I: Iterator<Item = Vec4>>(iter: I) -> Self {
        iter.fold(Vec4::zero(), Vec4::add)
    }
}
impl Mul<Vec4> for Vec4 {
    type Output = Vec4;

    fn mul(self, rhs: Vec4) -> Self::Output {
        self.scale(rhs)
    }
}
impl Mul<f32> for Vec4 {
    type Output = Vec4;

    fn mul(self, rhs: f32) -> Self::Output {
        Vec4::new(self.x * rhs, self.y * rhs, self.z * rhs, self.w * rhs)
    }
}
impl Mul<Vec4> for f32 {
    type Output = Vec4;

    fn mul(self, rhs: Vec4) -> Self::Output {
        rhs * self
    }
}
impl MulAssign<f32> for Vec4 {
    fn mul_assign(&mut self, rhs: f32) {
        *self = *self * rhs;
    }
}
impl Div<Vec4> for Vec4 {
    type Output = Vec4;

    fn div(self, rhs: Vec4) -> Self::Output {
        Vec4::new(
            self.x / rhs.x,
            self.y / rhs.y,
            self.z / rhs.z,
            self.w / rhs.w,
        )
    }
}
impl Div<f32> for Vec4 {
    type Output = Vec4;

    fn div(self, rhs: f32) -> Self::Output {
        Vec4::new(self.x / rhs, self.y / rhs, self.z / rhs, self.w / rhs)
    }
}
impl DivAssign<f32> for Vec4 {
    fn div_assign(&mut self, rhs: f32) {
        *self = *self / rhs;
    }
}
impl Neg for Vec4 {
    type Output = Vec4;

    fn neg(self) -> Self::Output {
        Vec4::new(
            gg_float::force_positive_zero(-self.x),
            gg_float::force_positive_zero(-self.y),
            gg_float::force_positive_zero(-self.z),
            gg_float::force_positive_zero(-self.w),
        )
    }
}
