#[allow(unused_imports)]
use crate::core::prelude::*;

use crate::util::assert::check_lt;
use num_traits::Zero;
use serde::{Deserialize, Serialize};
use std::{
    fmt,
    fmt::Formatter,
    ops::{Add, AddAssign, Div, Index, IndexMut, Mul, MulAssign, Neg, Sub, SubAssign},
};

/// A 2D vector of `i32` coordinates, used for grid positions and pixel sizes.
///
/// Unlike [`Vec2`], equality is exact and the type is totally ordered (by `x`, then `y`), so it
/// can be used as a map key.
#[derive(
    Default,
    Debug,
    Eq,
    PartialEq,
    Ord,
    PartialOrd,
    Copy,
    Clone,
    Hash,
    Serialize,
    Deserialize,
    bincode::Encode,
    bincode::Decode,
)]
pub struct Vec2i {
    pub x: i32,
    pub y: i32,
}

impl Vec2i {
    #[must_use]
    pub fn right() -> Vec2i {
        Vec2i { x: 1, y: 0 }
    }
    #[must_use]
    pub fn up() -> Vec2i {
        Vec2i { x: 0, y: 1 }
    }
    #[must_use]
    pub fn left() -> Vec2i {
        Vec2i { x: -1, y: 0 }
    }
    #[must_use]
    pub fn down() -> Vec2i {
        Vec2i { x: 0, y: -1 }
    }
    #[must_use]
    pub fn one() -> Vec2i {
        Vec2i { x: 1, y: 1 }
    }
    #[must_use]
    pub fn zero() -> Vec2i {
        Vec2i { x: 0, y: 0 }
    }
    #[must_use]
    pub fn splat(value: i32) -> Self {
        Self { x: value, y: value }
    }

    pub fn as_vec2(&self) -> Vec2 {
        Into::<Vec2>::into(*self)
    }

    pub fn try_get(&self, index: usize) -> Result<i32> {
        match index {
            0 => Ok(self.x),
            1 => Ok(self.y),
            _ => bail!("Vec2i: index out of range: {index}"),
        }
    }

    pub fn len_squared(&self) -> i32 {
        self.x * self.x + self.y * self.y
    }
    pub fn len(&self) -> f32 {
        (self.len_squared() as f32).sqrt()
    }
    pub fn dist(&self, other: Vec2i) -> f32 {
        (other - *self).len()
    }

    #[must_use]
    pub fn scale(&self, other: Vec2i) -> Vec2i {
        Vec2i {
            x: self.x * other.x,
            y: self.y * other.y,
        }
    }
    #[must_use]
    pub fn component_min(&self, other: Vec2i) -> Vec2i {
        Vec2i {
            x: self.x.min(other.x),
            y: self.y.min(other.y),
        }
    }
    #[must_use]
    pub fn component_max(&self, other: Vec2i) -> Vec2i {
        Vec2i {
            x: self.x.max(other.x),
            y: self.y.max(other.y),
        }
    }
    /// Clamps each component into `[min, max]`. Never panics, even if `min > max`.
    ///
    /// Named apart from [`Ord::clamp`], which compares lexicographically and panics on an
    /// inverted range.
    #[must_use]
    pub fn component_clamp(&self, min: Vec2i, max: Vec2i) -> Vec2i {
        Vec2i {
            x: self.x.max(min.x).min(max.x),
            y: self.y.max(min.y).min(max.y),
        }
    }
}

impl Index<usize> for Vec2i {
    type Output = i32;

    fn index(&self, index: usize) -> &Self::Output {
        check_lt!(index, 2);
        if index == 0 {
            &self.x
        } else {
            &self.y
        }
    }
}
impl IndexMut<usize> for Vec2i {
    fn index_mut(&mut self, index: usize) -> &mut Self::Output {
        check_lt!(index, 2);
        if index == 0 {
            &mut self.x
        } else {
            &mut self.y
        }
    }
}

impl Zero for Vec2i {
    fn zero() -> Self {
        Self::zero()
    }

    fn is_zero(&self) -> bool {
        *self == Self::zero()
    }
}

impl From<[i32; 2]> for Vec2i {
    fn from(value: [i32; 2]) -> Self {
        Vec2i {
            x: value[0],
            y: value[1],
        }
    }
}
impl From<Vec2i> for [i32; 2] {
    fn from(value: Vec2i) -> Self {
        [value.x, value.y]
    }
}
impl From<Vec3i> for Vec2i {
    fn from(value: Vec3i) -> Self {
        Vec2i {
            x: value.x,
            y: value.y,
        }
    }
}

impl fmt::Display for Vec2i {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "vec({}, {})", self.x, self.y)
    }
}

impl Add<Vec2i> for Vec2i {
    type Output = Vec2i;

    fn add(self, rhs: Vec2i) -> Self::Output {
        Vec2i {
            x: self.x + rhs.x,
            y: self.y + rhs.y,
        }
    }
}
impl AddAssign<Vec2i> for Vec2i {
    fn add_assign(&mut self, rhs: Vec2i) {
        self.x += rhs.x;
        self.y += rhs.y;
    }
}
impl Sub<Vec2i> for Vec2i {
    type Output = Vec2i;

    fn sub(self, rhs: Vec2i) -> Self::Output {
        Vec2i {
            x: self.x - rhs.x,
            y: self.y - rhs.y,
        }
    }
}
impl SubAssign<Vec2i> for Vec2i {
    fn sub_assign(&mut self, rhs: Vec2i) {
        self.x -= rhs.x;
        self.y -= rhs.y;
    }
}
impl Mul<Vec2i> for Vec2i {
    type Output = Vec2i;

    fn mul(self, rhs: Vec2i) -> Self::Output {
        self.scale(rhs)
    }
}
impl Mul<i32> for Vec2i {
    type Output = Vec2i;

    fn mul(self, rhs: i32) -> Self::Output {
        rhs * self
    }
}
impl Mul<Vec2i> for i32 {
    type Output = Vec2i;

    fn mul(self, rhs: Vec2i) -> Self::Output {
        Vec2i {
            x: self * rhs.x,
            y: self * rhs.y,
        }
    }
}
impl MulAssign<i32> for Vec2i {
    fn mul_assign(&mut self, rhs: i32) {
        self.x *= rhs;
        self.y *= rhs;
    }
}
impl Div<i32> for Vec2i {
    type Output = Vec2i;

    fn div(self, rhs: i32) -> Self::Output {
        Vec2i {
            x: self.x / rhs,
            y: self.y / rhs,
        }
    }
}
impl Neg for Vec2i {
    type Output = Vec2i;

    fn neg(self) -> Self::Output {
        Vec2i {
            x: -self.x,
            y: -self.y,
        }
    }
}

/// A 3D vector of `i32` coordinates, used for voxel positions and [`BoundsInt`].
#[derive(
    Default,
    Debug,
    Eq,
    PartialEq,
    Ord,
    PartialOrd,
    Copy,
    Clone,
    Hash,
    Serialize,
    Deserialize,
    bincode::Encode,
    bincode::Decode,
)]
pub struct Vec3i {
    pub x: i32,
    pub y: i32,
    pub z: i32,
}

impl Vec3i {
    pub const fn new(x: i32, y: i32, z: i32) -> Vec3i {
        Vec3i { x, y, z }
    }

    #[must_use]
    pub fn right() -> Vec3i {
        Vec3i::new(1, 0, 0)
    }
    #[must_use]
    pub fn left() -> Vec3i {
        Vec3i::new(-1, 0, 0)
    }
    #[must_use]
    pub fn up() -> Vec3i {
        Vec3i::new(0, 1, 0)
    }
    #[must_use]
    pub fn down() -> Vec3i {
        Vec3i::new(0, -1, 0)
    }
    #[must_use]
    pub fn forward() -> Vec3i {
        Vec3i::new(0, 0, 1)
    }
    #[must_use]
    pub fn back() -> Vec3i {
        Vec3i::new(0, 0, -1)
    }
    #[must_use]
    pub fn one() -> Vec3i {
        Vec3i::splat(1)
    }
    #[must_use]
    pub fn zero() -> Vec3i {
        Vec3i::splat(0)
    }
    #[must_use]
    pub fn splat(value: i32) -> Vec3i {
        Vec3i::new(value, value, value)
    }

    pub fn as_vec3(&self) -> Vec3 {
        Into::<Vec3>::into(*self)
    }

    pub fn try_get(&self, index: usize) -> Result<i32> {
        match index {
            0 => Ok(self.x),
            1 => Ok(self.y),
            2 => Ok(self.z),
            _ => bail!("Vec3i: index out of range: {index}"),
        }
    }

    pub fn len_squared(&self) -> i32 {
        self.x * self.x + self.y * self.y + self.z * self.z
    }
    pub fn len(&self) -> f32 {
        (self.len_squared() as f32).sqrt()
    }
    pub fn dist(&self, other: Vec3i) -> f32 {
        (other - *self).len()
    }

    #[must_use]
    pub fn scale(&self, other: Vec3i) -> Vec3i {
        Vec3i::new(self.x * other.x, self.y * other.y, self.z * other.z)
    }
    #[must_use]
    pub fn component_min(&self, other: Vec3i) -> Vec3i {
        Vec3i::new(
            self.x.min(other.x),
            self.y.min(other.y),
            self.z.min(other.z),
        )
    }
    #[must_use]
    pub fn component_max(&self, other: Vec3i) -> Vec3i {
        Vec3i::new(
            self.x.max(other.x),
            self.y.max(other.y),
            self.z.max(other.z),
        )
    }
    /// Clamps each component into `[min, max]`. Never panics, even if `min > max`.
    #[must_use]
    pub fn component_clamp(&self, min: Vec3i, max: Vec3i) -> Vec3i {
        self.component_max(min).component_min(max)
    }
}

impl Index<usize> for Vec3i {
    type Output = i32;

    fn index(&self, index: usize) -> &Self::Output {
        check_lt!(index, 3);
        match index {
            0 => &self.x,
            1 => &self.y,
            _ => &self.z,
        }
    }
}
impl IndexMut<usize> for Vec3i {
    fn index_mut(&mut self, index: usize) -> &mut Self::Output {
        check_lt!(index, 3);
        match index {
            0 => &mut self.x,
            1 => &mut self.y,
            _ => &mut self.z,
        }
    }
}

impl Zero for Vec3i {
    fn zero() -> Self {
        Self::zero()
    }

    fn is_zero(&self) -> bool {
        *self == Self::zero()
    }
}

impl From<[i32; 3]> for Vec3i {
    fn from(value: [i32; 3]) -> Self {
        Vec3i::new(value[0], value[1], value[2])
    }
}
impl From<Vec3i> for [i32; 3] {
    fn from(value: Vec3i) -> Self {
        [value.x, value.y, value.z]
    }
}
impl From<Vec2i> for Vec3i {
    fn from(value: Vec2i) -> Self {
        Vec3i::new(value.x, value.y, 0)
    }
}

impl fmt::Display for Vec3i {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "vec({}, {}, {})", self.x, self.y, self.z)
    }
}

impl Add<Vec3i> for Vec3i {
    type Output = Vec3i;

    fn add(self, rhs: Vec3i) -> Self::Output {
        Vec3i::new(self.x + rhs.x, self.y + rhs.y, self.z + rhs.z)
    }
}
impl AddAssign<Vec3i> for Vec3i {
    fn add_assign(&mut self, rhs: Vec3i) {
        *self = *self + rhs;
    }
}
impl Sub<Vec3i> for Vec3i {
    type Output = Vec3i;

    fn sub(self, rhs: Vec3i) -> Self::Output {
        Vec3i::new(self.x - rhs.x, self.y - rhs.y, self.z - rhs.z)
    }
}
impl SubAssign<Vec3i> for Vec3i {
    fn sub_assign(&mut self, rhs: Vec3i) {
        *self = *self - rhs;
    }
}
impl Mul<Vec3i> for Vec3i {
    type Output = Vec3i;

    fn mul(self, rhs: Vec3i) -> Self::Output {
        self.scale(rhs)
    }
}
impl Mul<i32> for Vec3i {
    type Output = Vec3i;

    fn mul(self, rhs: i32) -> Self::Output {
        Vec3i::new(self.x * rhs, self.y * rhs, self.z * rhs)
    }
}
impl Mul<Vec3i> for i32 {
    type Output = Vec3i;

    fn mul(self, rhs: Vec3i) -> Self::Output {
        rhs * self
    }
}
impl MulAssign<i32> for Vec3i {
    fn mul_assign(&mut self, rhs: i32) {
        *self = *self * rhs;
    }
}
impl Div<i32> for Vec3i {
    type Output = Vec3i;

    fn div(self, rhs: i32) -> Self::Output {
        Vec3i::new(self.x / rhs, self.y / rhs, self.z / rhs)
    }
}
impl Neg for Vec3i {
    type Output = Vec3i;

    fn neg(self) -> Self::Output {
        Vec3i::new(-self.x, -self.y, -self.z)
    }
}
