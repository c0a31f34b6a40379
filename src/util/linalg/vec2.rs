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

/// A 2D vector using 32-bit floating point coordinates, with `y` pointing up.
///
/// # Equality
/// Two vectors compare equal when the squared length of their difference is below
/// [`EPSILON_SQUARED`](crate::core::config::EPSILON_SQUARED). This absorbs floating point
/// noise, but it is not transitive: `a == b` and `b == c` do not imply `a == c`. For that
/// reason [`Vec2`] does not implement [`Eq`].
///
/// # Examples
///
/// ```
/// use glongge_math::core::prelude::*;
///
/// let v = Vec2 { x: 3.0, y: 4.0 };
/// assert_eq!(v.len(), 5.0);
/// assert_eq!(v.normed(), Vec2 { x: 0.6, y: 0.8 });
/// ```
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
pub struct Vec2 {
    pub x: f32,
    pub y: f32,
}

impl PartialEq for Vec2 {
    fn eq(&self, other: &Self) -> bool {
        (*self - *other).len_squared() < EPSILON_SQUARED
    }
}

impl Vec2 {
    pub const fn new(x: f32, y: f32) -> Vec2 {
        Vec2 { x, y }
    }

    /// Returns a unit vector pointing to the right (positive x-axis).
    #[must_use]
    pub fn right() -> Vec2 {
        Vec2 { x: 1.0, y: 0.0 }
    }
    /// Returns a unit vector pointing upward (positive y-axis).
    #[must_use]
    pub fn up() -> Vec2 {
        Vec2 { x: 0.0, y: 1.0 }
    }
    #[must_use]
    pub fn left() -> Vec2 {
        Vec2 { x: -1.0, y: 0.0 }
    }
    #[must_use]
    pub fn down() -> Vec2 {
        Vec2 { x: 0.0, y: -1.0 }
    }
    #[must_use]
    pub fn one() -> Vec2 {
        Vec2 { x: 1.0, y: 1.0 }
    }
    #[must_use]
    pub fn zero() -> Vec2 {
        Vec2 { x: 0.0, y: 0.0 }
    }
    #[must_use]
    pub fn positive_infinity() -> Vec2 {
        Vec2::splat(f32::INFINITY)
    }
    #[must_use]
    pub fn negative_infinity() -> Vec2 {
        Vec2::splat(f32::NEG_INFINITY)
    }

    #[must_use]
    pub fn splat(v: f32) -> Vec2 {
        Vec2 { x: v, y: v }
    }

    pub fn set(&mut self, x: f32, y: f32) {
        self.x = x;
        self.y = y;
    }

    /// Returns the component at `index`, or an error if `index` is not 0 or 1.
    pub fn try_get(&self, index: usize) -> Result<f32> {
        match index {
            0 => Ok(self.x),
            1 => Ok(self.y),
            _ => bail!("Vec2: index out of range: {index}"),
        }
    }

    /// Returns the squared length of the vector.
    ///
    /// Use this instead of [`len`](Vec2::len) when comparing lengths to avoid the square root.
    #[must_use]
    pub fn len_squared(&self) -> f32 {
        self.dot(*self)
    }

    #[must_use]
    pub fn len(&self) -> f32 {
        self.len_squared().sqrt()
    }

    /// Returns a unit vector in the same direction as this vector.
    ///
    /// If the length is at most [`EPSILON`](crate::core::config::EPSILON), returns the zero
    /// vector instead of dividing by a near-zero length.
    #[must_use]
    pub fn normed(&self) -> Vec2 {
        let len = self.len();
        if len > EPSILON {
            *self / len
        } else {
            Vec2::zero()
        }
    }

    pub fn normalise(&mut self) {
        *self = self.normed();
    }

    #[must_use]
    pub fn dot(&self, other: Vec2) -> f32 {
        self.x * other.x + self.y * other.y
    }

    /// Computes the 2D cross product, i.e. the signed area of the parallelogram spanned by the
    /// two vectors. Positive if `other` is counter-clockwise from `self`.
    #[must_use]
    pub fn cross(&self, other: Vec2) -> f32 {
        self.x * other.y - self.y * other.x
    }

    #[must_use]
    pub fn dist(&self, other: Vec2) -> f32 {
        (other - *self).len()
    }

    /// Returns the unsigned angle between the two vectors in degrees, in [0, 180].
    ///
    /// Returns 0 if either vector is (nearly) zero. The cosine is clamped to [-1, 1] so that
    /// rounding can never push it outside the domain of `acos`.
    #[must_use]
    pub fn angle_degrees(&self, other: Vec2) -> f32 {
        let denominator = (self.len_squared() * other.len_squared()).sqrt();
        if denominator < EPSILON_NORMAL_SQRT {
            return 0.0;
        }
        let cos = mathf::clamp(self.dot(other) / denominator, -1.0, 1.0);
        cos.acos() * RAD_TO_DEG
    }

    /// Returns the angle in degrees from `self` to `other`, positive when counter-clockwise.
    #[must_use]
    pub fn signed_angle_degrees(&self, other: Vec2) -> f32 {
        self.angle_degrees(other) * mathf::sign(self.cross(other))
    }

    /// Returns the vector rotated 90 degrees counter-clockwise.
    #[must_use]
    pub fn perpendicular(&self) -> Vec2 {
        Vec2 {
            x: -self.y,
            y: self.x,
        }
    }

    /// Reflects the vector off the surface defined by `normal`, which should be normalised.
    #[must_use]
    pub fn reflect(&self, normal: Vec2) -> Vec2 {
        let factor = -2.0 * normal.dot(*self);
        factor * normal + *self
    }

    /// Component-wise multiplication.
    #[must_use]
    pub fn scale(&self, other: Vec2) -> Vec2 {
        Vec2 {
            x: self.x * other.x,
            y: self.y * other.y,
        }
    }

    #[must_use]
    pub fn min(&self, other: Vec2) -> Vec2 {
        Vec2 {
            x: self.x.min(other.x),
            y: self.y.min(other.y),
        }
    }

    #[must_use]
    pub fn max(&self, other: Vec2) -> Vec2 {
        Vec2 {
            x: self.x.max(other.x),
            y: self.y.max(other.y),
        }
    }

    /// Returns a copy with its length clamped to at most `max_len`.
    #[must_use]
    pub fn clamp_len(&self, max_len: f32) -> Vec2 {
        let len_squared = self.len_squared();
        if len_squared > max_len * max_len {
            *self / len_squared.sqrt() * max_len
        } else {
            *self
        }
    }

    /// Moves towards `target` by at most `max_delta`, without overshooting.
    #[must_use]
    pub fn move_towards(&self, target: Vec2, max_delta: f32) -> Vec2 {
        let to_target = target - *self;
        let dist_squared = to_target.len_squared();
        if dist_squared == 0.0 || (max_delta >= 0.0 && dist_squared <= max_delta * max_delta) {
            return target;
        }
        *self + to_target / dist_squared.sqrt() * max_delta
    }

    /// Linearly interpolates towards `to`, with `t` clamped to [0, 1].
    #[must_use]
    pub fn lerp(&self, to: Vec2, t: f32) -> Vec2 {
        self.lerp_unclamped(to, mathf::clamp01(t))
    }

    #[must_use]
    pub fn lerp_unclamped(&self, to: Vec2, t: f32) -> Vec2 {
        Vec2 {
            x: self.x + (to.x - self.x) * t,
            y: self.y + (to.y - self.y) * t,
        }
    }

    /// Vector version of [`mathf::smooth_damp`]. The change per call is clamped in length to
    /// `max_speed * smooth_time`, and overshoot is detected with a dot product.
    #[must_use]
    pub fn smooth_damp(
        &self,
        target: Vec2,
        velocity: &mut Vec2,
        smooth_time: f32,
        max_speed: f32,
        delta_time: f32,
    ) -> Vec2 {
        let smooth_time = smooth_time.max(SMOOTH_DAMP_MIN_TIME);
        let omega = 2.0 / smooth_time;
        let x = omega * delta_time;
        let exp = 1.0 / (1.0 + x + 0.48 * x * x + 0.235 * x * x * x);

        let original_to = target;
        let max_change = max_speed * smooth_time;
        let change = (*self - target).clamp_len(max_change);
        let target = *self - change;

        let temp = (*velocity + omega * change) * delta_time;
        *velocity = (*velocity - omega * temp) * exp;
        let output = target + (change + temp) * exp;

        if (original_to - *self).dot(output - original_to) > 0.0 {
            *velocity = Vec2::zero();
            return original_to;
        }
        output
    }

    /// Same as `==`; provided so that all the value types share an `almost_eq()`.
    pub fn almost_eq(&self, rhs: Vec2) -> bool {
        *self == rhs
    }

    #[must_use]
    pub fn abs(&self) -> Vec2 {
        Vec2 {
            x: self.x.abs(),
            y: self.y.abs(),
        }
    }

    /// Rounds each component to the nearest integer, ties to even.
    #[must_use]
    pub fn round_to_int(&self) -> Vec2i {
        Vec2i {
            x: mathf::round_to_int(self.x),
            y: mathf::round_to_int(self.y),
        }
    }
    #[must_use]
    pub fn floor_to_int(&self) -> Vec2i {
        Vec2i {
            x: mathf::floor_to_int(self.x),
            y: mathf::floor_to_int(self.y),
        }
    }
    #[must_use]
    pub fn ceil_to_int(&self) -> Vec2i {
        Vec2i {
            x: mathf::ceil_to_int(self.x),
            y: mathf::ceil_to_int(self.y),
        }
    }
}

impl Index<usize> for Vec2 {
    type Output = f32;

    fn index(&self, index: usize) -> &Self::Output {
        check_lt!(index, 2);
        if index == 0 {
            &self.x
        } else {
            &self.y
        }
    }
}
impl IndexMut<usize> for Vec2 {
    fn index_mut(&mut self, index: usize) -> &mut Self::Output {
        check_lt!(index, 2);
        if index == 0 {
            &mut self.x
        } else {
            &mut self.y
        }
    }
}

impl Zero for Vec2 {
    fn zero() -> Self {
        Vec2::zero()
    }

    fn is_zero(&self) -> bool {
        *self == Vec2::zero()
    }
}

impl From<[f32; 2]> for Vec2 {
    fn from(value: [f32; 2]) -> Self {
        Vec2 {
            x: value[0],
            y: value[1],
        }
    }
}
impl From<Vec2> for [f32; 2] {
    fn from(value: Vec2) -> Self {
        [value.x, value.y]
    }
}
impl From<Vec3> for Vec2 {
    fn from(value: Vec3) -> Self {
        Vec2 {
            x: value.x,
            y: value.y,
        }
    }
}
impl From<Vec2i> for Vec2 {
    fn from(value: Vec2i) -> Self {
        Self {
            x: value.x as f32,
            y: value.y as f32,
        }
    }
}

impl fmt::Display for Vec2 {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "vec(")?;
        if let Some(p) = f.precision() {
            write!(f, "{0:.1$}, {2:.1$}", self.x, p, self.y)?;
        } else {
            write!(f, "{}, {}", self.x, self.y)?;
        }
        write!(f, ")")
    }
}

impl Add<Vec2> for Vec2 {
    type Output = Vec2;

    fn add(self, rhs: Vec2) -> Self::Output {
        Vec2 {
            x: self.x + rhs.x,
            y: self.y + rhs.y,
        }
    }
}
impl AddAssign<Vec2> for Vec2 {
    fn add_assign(&mut self, rhs: Vec2) {
        self.x += rhs.x;
        self.y += rhs.y;
    }
}

impl Sub<Vec2> for Vec2 {
    type Output = Vec2;

    fn sub(self, rhs: Vec2) -> Self::Output {
        Vec2 {
            x: self.x - rhs.x,
            y: self.y - rhs.y,
        }
    }
}
impl SubAssign<Vec2> for Vec2 {
    fn sub_assign(&mut self, rhs: Vec2) {
        self.x -= rhs.x;
        self.y -= rhs.y;
    }
}

impl Sum<Vec2> for Vec2 {
    fn sum<I: Iterator<Item = Vec2>>(iter: I) -> Self {
        iter.fold(Vec2::zero(), Vec2::add)
    }
}

impl Mul<Vec2> for Vec2 {
    type Output = Vec2;

    fn mul(self, rhs: Vec2) -> Self::Output {
        self.scale(rhs)
    }
}
impl Mul<f32> for Vec2 {
    type Output = Vec2;

    fn mul(self, rhs: f32) -> Self::Output {
        rhs * self
    }
}
impl Mul<Vec2> for f32 {
    type Output = Vec2;

    fn mul(self, rhs: Vec2) -> Self::Output {
        Vec2 {
            x: self * rhs.x,
            y: self * rhs.y,
        }
    }
}
impl MulAssign<f32> for Vec2 {
    fn mul_assign(&mut self, rhs: f32) {
        self.x *= rhs;
        self.y *= rhs;
    }
}

impl Div<Vec2> for Vec2 {
    type Output = Vec2;

    fn div(self, rhs: Vec2) -> Self::Output {
        Vec2 {
            x: self.x / rhs.x,
            y: self.y / rhs.y,
        }
    }
}
impl Div<f32> for Vec2 {
    type Output = Vec2;

    fn div(self, rhs: f32) -> Self::Output {
        Vec2 {
            x: self.x / rhs,
            y: self.y / rhs,
        }
    }
}
impl DivAssign<f32> for Vec2 {
    fn div_assign(&mut self, rhs: f32) {
        self.x /= rhs;
        self.y /= rhs;
    }
}

impl Neg for Vec2 {
    type Output = Vec2;

    fn neg(self) -> Self::Output {
        Vec2 {
            x: gg_float::force_positive_zero(-self.x),
            y: gg_float::force_positive_zero(-self.y),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    #[test]
    fn vec2_arithmetic() {
        let a = Vec2 { x: 1.0, y: 2.0 };
        let b = Vec2 { x: 3.0, y: -4.0 };
        assert_eq!(a + b, Vec2 { x: 4.0, y: -2.0 });
        assert_eq!(a - b, Vec2 { x: -2.0, y: 6.0 });
        assert_eq!(a * b, Vec2 { x: 3.0, y: -8.0 });
        assert_eq!(b / a, Vec2 { x: 3.0, y: -2.0 });
        assert_eq!(2.0 * a, Vec2 { x: 2.0, y: 4.0 });
        assert_eq!(a / 2.0, Vec2 { x: 0.5, y: 1.0 });
        assert_eq!(-a, Vec2 { x: -1.0, y: -2.0 });

        let mut c = a;
        c += b;
        c -= a;
        c *= 2.0;
        c /= 4.0;
        assert_eq!(c, Vec2 { x: 1.5, y: -2.0 });

        let sum: Vec2 = [a, b, Vec2::one()].into_iter().sum();
        assert_eq!(sum, Vec2 { x: 5.0, y: -1.0 });
    }

    #[test]
    fn vec2_index() {
        let mut v = Vec2 { x: 1.0, y: 2.0 };
        assert_eq!(v[0], 1.0);
        assert_eq!(v[1], 2.0);
        v[1] = 5.0;
        assert_eq!(v.y, 5.0);
        assert_eq!(v.try_get(0).unwrap(), 1.0);
        assert!(v.try_get(2).is_err());
    }

    #[test]
    #[should_panic(expected = "check failed")]
    fn vec2_index_out_of_range() {
        let v = Vec2::one();
        let _ = v[2];
    }

    #[test]
    fn vec2_equality_uses_squared_distance() {
        let a = Vec2 { x: 1.0, y: 1.0 };
        assert_eq!(a, Vec2 { x: 1.0 + 5e-6, y: 1.0 });
        assert_ne!(a, Vec2 { x: 1.0 + 2e-5, y: 1.0 });

        // Not transitive: each neighbour is within tolerance, the ends are not.
        let b = Vec2 { x: 1.0 + 8e-6, y: 1.0 };
        let c = Vec2 { x: 1.0 + 1.6e-5, y: 1.0 };
        assert_eq!(a, b);
        assert_eq!(b, c);
        assert_ne!(a, c);

        let nan = Vec2 { x: f32::NAN, y: 0.0 };
        assert_ne!(nan, nan);
    }

    #[test]
    fn vec2_normed() {
        let v = Vec2 { x: 3.0, y: 4.0 };
        assert_eq!(v.normed(), Vec2 { x: 0.6, y: 0.8 });
        assert_eq!(Vec2 { x: 1e-6, y: 0.0 }.normed(), Vec2::zero());
        assert_eq!(Vec2::zero().normed(), Vec2::zero());

        let mut w = v;
        w.normalise();
        assert!((w.len() - 1.0).abs() < EPSILON);
    }

    #[test]
    fn vec2_normed_is_unit_or_zero() {
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..1000 {
            let scale = 10f32.powi(rng.gen_range(-7..4));
            let v = Vec2 {
                x: rng.gen_range(-1.0f32..1.0) * scale,
                y: rng.gen_range(-1.0f32..1.0) * scale,
            };
            let n = v.normed();
            if v.len() <= EPSILON {
                assert_eq!(n, Vec2::zero());
            } else {
                assert!((n.len() - 1.0).abs() < EPSILON, "{v} -> {n}");
            }
        }
    }

    #[test]
    fn vec2_lerp() {
        let a = Vec2 { x: 0.0, y: 0.0 };
        let b = Vec2 { x: 10.0, y: 20.0 };
        assert_eq!(a.lerp(b, 0.0), a);
        assert_eq!(a.lerp(b, 1.0), b);
        assert_eq!(a.lerp(b, 0.5), Vec2 { x: 5.0, y: 10.0 });
        assert_eq!(a.lerp(b, 2.0), b);
        assert_eq!(a.lerp(b, -1.0), a);
        assert_eq!(Vec2::zero().lerp_unclamped(Vec2::one(), 2.0), Vec2 { x: 2.0, y: 2.0 });
    }

    #[test]
    fn vec2_angles() {
        assert!((Vec2::right().angle_degrees(Vec2::up()) - 90.0).abs() < 1e-4);
        assert!((Vec2::right().angle_degrees(Vec2::left()) - 180.0).abs() < 1e-4);
        assert_eq!(Vec2::right().angle_degrees(Vec2::zero()), 0.0);
        // Nearly-parallel vectors whose cosine rounds past 1 do not produce NaN.
        let a = Vec2 { x: 0.1, y: 0.3 };
        assert!(!a.angle_degrees(a * 3.0).is_nan());

        assert!((Vec2::right().signed_angle_degrees(Vec2::up()) - 90.0).abs() < 1e-4);
        assert!((Vec2::right().signed_angle_degrees(Vec2::down()) + 90.0).abs() < 1e-4);
    }

    #[test]
    fn vec2_geometry() {
        assert_eq!(Vec2::right().perpendicular(), Vec2::up());
        assert_eq!(
            Vec2 { x: 1.0, y: -1.0 }.reflect(Vec2::up()),
            Vec2 { x: 1.0, y: 1.0 }
        );
        assert_eq!(Vec2 { x: 3.0, y: 4.0 }.dist(Vec2::zero()), 5.0);
        assert_eq!(Vec2 { x: 2.0, y: 0.0 }.cross(Vec2 { x: 0.0, y: 3.0 }), 6.0);
        assert_eq!(
            Vec2 { x: 1.0, y: 5.0 }.min(Vec2 { x: 2.0, y: -1.0 }),
            Vec2 { x: 1.0, y: -1.0 }
        );
        assert_eq!(
            Vec2 { x: 1.0, y: 5.0 }.max(Vec2 { x: 2.0, y: -1.0 }),
            Vec2 { x: 2.0, y: 5.0 }
        );
        assert_eq!(Vec2 { x: 6.0, y: 8.0 }.clamp_len(5.0), Vec2 { x: 3.0, y: 4.0 });
        assert_eq!(Vec2 { x: 0.6, y: 0.8 }.clamp_len(5.0), Vec2 { x: 0.6, y: 0.8 });
    }

    #[test]
    fn vec2_move_towards() {
        let target = Vec2 { x: 10.0, y: 0.0 };
        assert_eq!(Vec2::zero().move_towards(target, 3.0), Vec2 { x: 3.0, y: 0.0 });
        assert_eq!(Vec2::zero().move_towards(target, 30.0), target);
        assert_eq!(Vec2::zero().move_towards(target, -1.0), Vec2 { x: -1.0, y: 0.0 });
    }

    #[test]
    fn vec2_smooth_damp() {
        let target = Vec2 { x: 5.0, y: -5.0 };
        let mut current = Vec2::zero();
        let mut velocity = Vec2::zero();
        for _ in 0..300 {
            current = current.smooth_damp(target, &mut velocity, 0.2, f32::INFINITY, 0.02);
        }
        assert_eq!(current, target);
        assert!(velocity.len() < 1e-3);
    }

    #[test]
    fn vec2_rounding() {
        let v = Vec2 { x: 2.5, y: -1.2 };
        assert_eq!(v.round_to_int(), Vec2i { x: 2, y: -1 });
        assert_eq!(v.floor_to_int(), Vec2i { x: 2, y: -2 });
        assert_eq!(v.ceil_to_int(), Vec2i { x: 3, y: -1 });
    }

    #[test]
    fn vec2_display() {
        let v = Vec2 { x: 1.0, y: 2.5 };
        assert_eq!(format!("{v}"), "vec(1, 2.5)");
        assert_eq!(format!("{v:.2}"), "vec(1.00, 2.50)");
    }

    #[test]
    fn vec2_conversions() {
        let v: Vec2 = [1.0, 2.0].into();
        assert_eq!(v, Vec2 { x: 1.0, y: 2.0 });
        let arr: [f32; 2] = v.into();
        assert_eq!(arr, [1.0, 2.0]);
        assert_eq!(Vec2::from(Vec3::new(1.0, 2.0, 3.0)), v);
        assert_eq!(Vec2::from(Vec2i { x: 1, y: 2 }), v);
        assert!(Vec2::zero().is_zero());
    }
}
