#[allow(unused_imports)]
use crate::core::prelude::*;

use crate::util::assert::check_lt;
use bytemuck::{Pod, Zeroable};
use num_traits::{One, Zero};
use serde::{Deserialize, Serialize};
use std::{
    fmt,
    fmt::Formatter,
    ops::{Index, IndexMut, Mul, MulAssign, Neg},
};

/// A rotation, stored as a quaternion `(x, y, z, w)` with `w` the scalar part.
///
/// `lhs * rhs` composes two rotations so that `rhs` is applied first, and `q * v` rotates a
/// [`Vec3`]. Angles in the public API are in degrees; Euler angles are applied in Z, X, Y order.
///
/// # Equality
/// Two quaternions compare equal when their dot product exceeds
/// `1 - `[`QUATERNION_EPSILON`](crate::core::config::QUATERNION_EPSILON). Note that `q` and `-q`
/// describe the same rotation but have a dot product of -1, so they do *not* compare equal.
/// Use [`angle_degrees`](Quaternion::angle_degrees) to compare rotations regardless of sign.
///
/// ```
/// use glongge_math::core::prelude::*;
///
/// let yaw = Quaternion::angle_axis(90.0, Vec3::up());
/// assert_eq!(yaw * Vec3::forward(), Vec3::right());
/// assert_ne!(yaw, -yaw);
/// assert_eq!(yaw.angle_degrees(-yaw), 0.0);
/// ```
#[repr(C)]
#[derive(
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
pub struct Quaternion {
    pub x: f32,
    pub y: f32,
    pub z: f32,
    pub w: f32,
}

impl Default for Quaternion {
    fn default() -> Self {
        Self::identity()
    }
}

impl PartialEq for Quaternion {
    fn eq(&self, other: &Self) -> bool {
        self.dot(*other) > 1.0 - QUATERNION_EPSILON
    }
}

impl Quaternion {
    pub const fn new(x: f32, y: f32, z: f32, w: f32) -> Quaternion {
        Quaternion { x, y, z, w }
    }

    #[must_use]
    pub fn identity() -> Quaternion {
        Quaternion::new(0.0, 0.0, 0.0, 1.0)
    }

    pub fn set(&mut self, x: f32, y: f32, z: f32, w: f32) {
        *self = Quaternion::new(x, y, z, w);
    }

    pub fn try_get(&self, index: usize) -> Result<f32> {
        match index {
            0 => Ok(self.x),
            1 => Ok(self.y),
            2 => Ok(self.z),
            3 => Ok(self.w),
            _ => bail!("Quaternion: index out of range: {index}"),
        }
    }

    /// Rotation of `degrees` around `axis`. A zero axis gives the identity.
    #[must_use]
    pub fn angle_axis(degrees: f32, axis: Vec3) -> Quaternion {
        let axis = axis.normed();
        if axis.is_zero() {
            return Quaternion::identity();
        }
        let (s, c) = (degrees * DEG_TO_RAD * 0.5).sin_cos();
        Quaternion::new(axis.x * s, axis.y * s, axis.z * s, c)
    }

    /// Inverse of [`angle_axis`](Quaternion::angle_axis): returns `(degrees, axis)`.
    ///
    /// For a rotation of (nearly) zero the axis is arbitrary and [`Vec3::right`] is returned.
    pub fn to_angle_axis(&self) -> (f32, Vec3) {
        let q = self.normed();
        let degrees = 2.0 * mathf::clamp(q.w, -1.0, 1.0).acos() * RAD_TO_DEG;
        let s = (1.0 - q.w * q.w).max(0.0).sqrt();
        if mathf::approximately(degrees, 0.0) || s < 1e-4 {
            (degrees, Vec3::right())
        } else {
            (degrees, Vec3::new(q.x / s, q.y / s, q.z / s))
        }
    }

    /// The rotation taking the direction of `from` to the direction of `to` along the shortest
    /// arc. Zero inputs give the identity; opposite inputs rotate 180° around an arbitrary
    /// perpendicular axis.
    #[must_use]
    pub fn from_to_rotation(from: Vec3, to: Vec3) -> Quaternion {
        let from = from.normed();
        let to = to.normed();
        if from.is_zero() || to.is_zero() {
            return Quaternion::identity();
        }
        let cos = from.dot(to);
        if cos >= 1.0 - QUATERNION_EPSILON {
            Quaternion::identity()
        } else if cos <= -1.0 + QUATERNION_EPSILON {
            Quaternion::angle_axis(180.0, from.any_orthonormal())
        } else {
            let axis = from.cross(to);
            let s = ((1.0 + cos) * 2.0).sqrt();
            Quaternion::new(axis.x / s, axis.y / s, axis.z / s, s * 0.5).normed()
        }
    }

    pub fn set_from_to_rotation(&mut self, from: Vec3, to: Vec3) {
        *self = Quaternion::from_to_rotation(from, to);
    }

    /// The rotation whose `+Z` axis faces `forward` and whose `+Y` axis is as close to `up` as
    /// possible.
    ///
    /// A zero `forward` is a caller error: it is logged and the identity is returned. If `up`
    /// is parallel to `forward` the result falls back to
    /// [`from_to_rotation`](Quaternion::from_to_rotation) from [`Vec3::forward`].
    #[must_use]
    pub fn look_rotation(forward: Vec3, up: Vec3) -> Quaternion {
        let z = forward.normed();
        if z.is_zero() {
            warn!("Quaternion::look_rotation(): zero forward vector, returning identity");
            return Quaternion::identity();
        }
        let x = up.cross(z);
        if x.len_squared() < EPSILON_SQUARED {
            return Quaternion::from_to_rotation(Vec3::forward(), z);
        }
        let x = x.normed();
        let y = z.cross(x);
        Quaternion::from_basis(x, y, z)
    }

    pub fn set_look_rotation(&mut self, forward: Vec3, up: Vec3) {
        *self = Quaternion::look_rotation(forward, up);
    }

    /// Builds a quaternion from the columns of an orthonormal rotation matrix.
    #[must_use]
    pub fn from_basis(x_axis: Vec3, y_axis: Vec3, z_axis: Vec3) -> Quaternion {
        let (m00, m10, m20) = (x_axis.x, x_axis.y, x_axis.z);
        let (m01, m11, m21) = (y_axis.x, y_axis.y, y_axis.z);
        let (m02, m12, m22) = (z_axis.x, z_axis.y, z_axis.z);
        let trace = m00 + m11 + m22;
        let q = if trace > 0.0 {
            let s = (trace + 1.0).sqrt() * 2.0;
            Quaternion::new((m21 - m12) / s, (m02 - m20) / s, (m10 - m01) / s, 0.25 * s)
        } else if m00 > m11 && m00 > m22 {
            let s = (1.0 + m00 - m11 - m22).sqrt() * 2.0;
            Quaternion::new(0.25 * s, (m01 + m10) / s, (m02 + m20) / s, (m21 - m12) / s)
        } else if m11 > m22 {
            let s = (1.0 + m11 - m00 - m22).sqrt() * 2.0;
            Quaternion::new((m01 + m10) / s, 0.25 * s, (m12 + m21) / s, (m02 - m20) / s)
        } else {
            let s = (1.0 + m22 - m00 - m11).sqrt() * 2.0;
            Quaternion::new((m02 + m20) / s, (m12 + m21) / s, 0.25 * s, (m10 - m01) / s)
        };
        q.normed()
    }

    /// Rotation of `z` degrees around the z-axis, then `x` degrees around the x-axis, then `y`
    /// degrees around the y-axis.
    #[must_use]
    pub fn euler(x: f32, y: f32, z: f32) -> Quaternion {
        Quaternion::angle_axis(y, Vec3::up())
            * Quaternion::angle_axis(x, Vec3::right())
            * Quaternion::angle_axis(z, Vec3::forward())
    }

    #[must_use]
    pub fn from_euler(degrees: Vec3) -> Quaternion {
        Quaternion::euler(degrees.x, degrees.y, degrees.z)
    }

    pub fn set_euler_angles(&mut self, degrees: Vec3) {
        *self = Quaternion::from_euler(degrees);
    }

    /// Returns the Euler angles in degrees, each in `[0, 360)` up to a small tolerance around
    /// zero. `Quaternion::from_euler(q.euler_angles())` is the same rotation as `q`.
    pub fn euler_angles(&self) -> Vec3 {
        let [m00, _, m02, m10, m11, m12, m20, _, m22] = self.normed().rotation_matrix_rows();
        let radians = if m12.abs() < 0.999_999 {
            Vec3::new((-m12).asin(), m02.atan2(m22), m10.atan2(m11))
        } else {
            // Gimbal lock: x is ±90°, so only y + z is determined.
            Vec3::new(
                mathf::clamp(-m12, -1.0, 1.0).asin(),
                (-m20).atan2(m00),
                0.0,
            )
        };
        let degrees = radians * RAD_TO_DEG;
        Vec3::new(
            Self::make_positive(degrees.x),
            Self::make_positive(degrees.y),
            Self::make_positive(degrees.z),
        )
    }

    fn make_positive(degrees: f32) -> f32 {
        let negative_flip = -1e-4 * RAD_TO_DEG;
        let positive_flip = 360.0 + negative_flip;
        if degrees < negative_flip {
            degrees + 360.0
        } else if degrees > positive_flip {
            degrees - 360.0
        } else {
            degrees
        }
    }

    /// The 3x3 rotation matrix, in row-major order.
    pub(crate) fn rotation_matrix_rows(&self) -> [f32; 9] {
        let x2 = self.x * 2.0;
        let y2 = self.y * 2.0;
        let z2 = self.z * 2.0;
        let xx = self.x * x2;
        let yy = self.y * y2;
        let zz = self.z * z2;
        let xy = self.x * y2;
        let xz = self.x * z2;
        let yz = self.y * z2;
        let wx = self.w * x2;
        let wy = self.w * y2;
        let wz = self.w * z2;
        [
            1.0 - (yy + zz),
            xy - wz,
            xz + wy,
            xy + wz,
            1.0 - (xx + zz),
            yz - wx,
            xz - wy,
            yz + wx,
            1.0 - (xx + yy),
        ]
    }

    pub fn dot(&self, other: Quaternion) -> f32 {
        self.x * other.x + self.y * other.y + self.z * other.z + self.w * other.w
    }

    /// Angle between two rotations in degrees, in [0, 180]. Ignores the sign of the
    /// quaternions.
    pub fn angle_degrees(&self, other: Quaternion) -> f32 {
        let cos = self.dot(other).abs().min(1.0);
        if cos > 1.0 - QUATERNION_EPSILON {
            0.0
        } else {
            cos.acos() * 2.0 * RAD_TO_DEG
        }
    }

    pub fn len(&self) -> f32 {
        self.dot(*self).sqrt()
    }

    /// Returns the unit quaternion, or the identity if the magnitude is too small to divide by.
    #[must_use]
    pub fn normed(&self) -> Quaternion {
        let len = self.len();
        if len < MIN_POSITIVE_SUBNORMAL {
            return Quaternion::identity();
        }
        self.scaled(1.0 / len)
    }

    pub fn normalise(&mut self) {
        *self = self.normed();
    }

    #[must_use]
    pub fn conjugate(&self) -> Quaternion {
        Quaternion::new(-self.x, -self.y, -self.z, self.w)
    }

    /// The opposite rotation. Equal to [`conjugate`](Quaternion::conjugate) for unit
    /// quaternions.
    #[must_use]
    pub fn inverse(&self) -> Quaternion {
        let len_squared = self.dot(*self);
        if len_squared < MIN_POSITIVE_SUBNORMAL {
            return Quaternion::identity();
        }
        self.conjugate().scaled(1.0 / len_squared)
    }

    fn scaled(&self, s: f32) -> Quaternion {
        Quaternion::new(self.x * s, self.y * s, self.z * s, self.w * s)
    }

    /// Spherical interpolation along the shortest path, with `t` clamped to [0, 1].
    #[must_use]
    pub fn slerp(&self, to: Quaternion, t: f32) -> Quaternion {
        self.slerp_unclamped(to, mathf::clamp01(t))
    }

    #[must_use]
    pub fn slerp_unclamped(&self, to: Quaternion, t: f32) -> Quaternion {
        let mut cos = self.dot(to);
        let to = if cos < 0.0 {
            cos = -cos;
            -to
        } else {
            to
        };
        if cos > 1.0 - EPSILON {
            return self.lerp_components(to, t);
        }
        let angle = cos.acos();
        let sin = angle.sin();
        let s0 = ((1.0 - t) * angle).sin() / sin;
        let s1 = (t * angle).sin() / sin;
        Quaternion::new(
            s0 * self.x + s1 * to.x,
            s0 * self.y + s1 * to.y,
            s0 * self.z + s1 * to.z,
            s0 * self.w + s1 * to.w,
        )
        .normed()
    }

    /// Normalised component-wise interpolation, with `t` clamped to [0, 1]. Faster than
    /// [`slerp`](Quaternion::slerp) but not constant-speed.
    #[must_use]
    pub fn lerp(&self, to: Quaternion, t: f32) -> Quaternion {
        self.lerp_unclamped(to, mathf::clamp01(t))
    }

    #[must_use]
    pub fn lerp_unclamped(&self, to: Quaternion, t: f32) -> Quaternion {
        let to = if self.dot(to) < 0.0 { -to } else { to };
        self.lerp_components(to, t)
    }

    fn lerp_components(&self, to: Quaternion, t: f32) -> Quaternion {
        Quaternion::new(
            self.x + (to.x - self.x) * t,
            self.y + (to.y - self.y) * t,
            self.z + (to.z - self.z) * t,
            self.w + (to.w - self.w) * t,
        )
        .normed()
    }

    /// Rotates towards `to` by at most `max_degrees_delta`. A negative delta rotates away.
    #[must_use]
    pub fn rotate_towards(&self, to: Quaternion, max_degrees_delta: f32) -> Quaternion {
        let angle = self.angle_degrees(to);
        if angle == 0.0 {
            return to;
        }
        self.slerp_unclamped(to, (max_degrees_delta / angle).min(1.0))
    }

    pub fn almost_eq(&self, rhs: Quaternion) -> bool {
        *self == rhs
    }
}

impl Index<usize> for Quaternion {
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
impl IndexMut<usize> for Quaternion {
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

impl One for Quaternion {
    fn one() -> Self {
        Quaternion::identity()
    }
}

impl Mul<Quaternion> for Quaternion {
    type Output = Quaternion;

    fn mul(self, rhs: Quaternion) -> Self::Output {
        Quaternion::new(
            self.w * rhs.x + self.x * rhs.w + self.y * rhs.z - self.z * rhs.y,
            self.w * rhs.y + self.y * rhs.w + self.z * rhs.x - self.x * rhs.z,
            self.w * rhs.z + self.z * rhs.w + self.x * rhs.y - self.y * rhs.x,
            self.w * rhs.w - self.x * rhs.x - self.y * rhs.y - self.z * rhs.z,
        )
    }
}
impl MulAssign<Quaternion> for Quaternion {
    fn mul_assign(&mut self, rhs: Quaternion) {
        *self = *self * rhs;
    }
}

impl Mul<Vec3> for Quaternion {
    type Output = Vec3;

    fn mul(self, rhs: Vec3) -> Self::Output {
        let [m00, m01, m02, m10, m11, m12, m20, m21, m22] = self.rotation_matrix_rows();
        Vec3 {
            x: m00 * rhs.x + m01 * rhs.y + m02 * rhs.z,
            y: m10 * rhs.x + m11 * rhs.y + m12 * rhs.z,
            z: m20 * rhs.x + m21 * rhs.y + m22 * rhs.z,
        }
    }
}

impl Neg for Quaternion {
    type Output = Quaternion;

    fn neg(self) -> Self::Output {
        self.scaled(-1.0)
    }
}

impl From<[f32; 4]> for Quaternion {
    fn from(value: [f32; 4]) -> Self {
        Quaternion::new(value[0], value[1], value[2], value[3])
    }
}
impl From<Quaternion> for [f32; 4] {
    fn from(value: Quaternion) -> Self {
        [value.x, value.y, value.z, value.w]
    }
}

impl fmt::Display for Quaternion {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "quat(")?;
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

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    fn random_rotation(rng: &mut StdRng) -> Quaternion {
        let axis = Vec3::new(
            rng.gen_range(-1.0..1.0),
            rng.gen_range(-1.0..1.0),
            rng.gen_range(-1.0..1.0),
        );
        Quaternion::angle_axis(rng.gen_range(-180.0..180.0), axis + Vec3::splat(0.01))
    }

    #[test]
    fn identity_leaves_vectors_alone() {
        let v = Vec3::new(1.0, -2.0, 3.0);
        assert_eq!(Quaternion::identity() * v, v);
        assert_eq!(Quaternion::default(), Quaternion::identity());
        assert_eq!(Quaternion::one(), Quaternion::identity());
    }

    #[test]
    fn rotation_directions() {
        let yaw = Quaternion::angle_axis(90.0, Vec3::up());
        assert_eq!(yaw * Vec3::forward(), Vec3::right());
        assert_eq!(yaw * Vec3::right(), Vec3::back());
        let pitch = Quaternion::angle_axis(90.0, Vec3::right());
        assert_eq!(pitch * Vec3::forward(), Vec3::down());
        let roll = Quaternion::angle_axis(90.0, Vec3::forward());
        assert_eq!(roll * Vec3::right(), Vec3::up());
        assert_eq!(Quaternion::angle_axis(45.0, Vec3::zero()), Quaternion::identity());
    }

    #[test]
    fn composition_applies_rhs_first() {
        let yaw = Quaternion::angle_axis(90.0, Vec3::up());
        let pitch = Quaternion::angle_axis(90.0, Vec3::right());
        // pitch first: forward -> down, then yaw leaves down alone.
        assert_eq!((yaw * pitch) * Vec3::forward(), Vec3::down());
        // yaw first: forward -> right, then pitch leaves right alone.
        assert_eq!((pitch * yaw) * Vec3::forward(), Vec3::right());
    }

    #[test]
    fn composition_matches_sequential_rotation() {
        let mut rng = StdRng::seed_from_u64(42);
        for _ in 0..500 {
            let a = random_rotation(&mut rng);
            let b = random_rotation(&mut rng);
            let v = Vec3::new(
                rng.gen_range(-5.0..5.0),
                rng.gen_range(-5.0..5.0),
                rng.gen_range(-5.0..5.0),
            );
            let lhs = (a * b) * v;
            let rhs = a * (b * v);
            assert!(lhs.dist(rhs) < 1e-4, "{lhs} vs. {rhs}");
        }
    }

    #[test]
    fn inverse_undoes_rotation() {
        let mut rng = StdRng::seed_from_u64(5);
        for _ in 0..200 {
            let q = random_rotation(&mut rng);
            assert!((q * q.inverse()).angle_degrees(Quaternion::identity()) < 0.01);
            assert!(q.conjugate().angle_degrees(q.inverse()) < 0.01);
        }
        let unnormalised = Quaternion::new(0.0, 2.0, 0.0, 0.0);
        assert_eq!(unnormalised * unnormalised.inverse(), Quaternion::identity());
    }

    #[test]
    fn normed_handles_zero() {
        assert_eq!(
            Quaternion::new(0.0, 0.0, 0.0, 0.0).normed(),
            Quaternion::identity()
        );
        let q = Quaternion::new(0.0, 0.0, 0.0, 3.0).normed();
        assert_eq!(q, Quaternion::identity());
        assert!((Quaternion::new(1.0, 2.0, 3.0, 4.0).normed().len() - 1.0).abs() < EPSILON);
    }

    #[test]
    fn sign_asymmetry() {
        let q = Quaternion::angle_axis(30.0, Vec3::new(1.0, 1.0, 0.0));
        assert_ne!(q, -q);
        assert_eq!(q.angle_degrees(-q), 0.0);
        assert_eq!((-q) * Vec3::up(), q * Vec3::up());
    }

    #[test]
    fn angle_between_rotations() {
        let a = Quaternion::identity();
        let b = Quaternion::angle_axis(90.0, Vec3::up());
        assert!((a.angle_degrees(b) - 90.0).abs() < 1e-3);
        assert_eq!(b.angle_degrees(b), 0.0);
    }

    #[test]
    fn angle_axis_roundtrip() {
        let axis = Vec3::new(1.0, 1.0, 0.0).normed();
        let (degrees, back) = Quaternion::angle_axis(60.0, axis).to_angle_axis();
        assert!((degrees - 60.0).abs() < 1e-3);
        assert_eq!(back, axis);
        assert_eq!(Quaternion::identity().to_angle_axis(), (0.0, Vec3::right()));
    }

    #[test]
    fn from_to_rotation() {
        assert_eq!(
            Quaternion::from_to_rotation(Vec3::up(), Vec3::right()) * Vec3::up(),
            Vec3::right()
        );
        assert_eq!(
            Quaternion::from_to_rotation(Vec3::up(), Vec3::down()) * Vec3::up(),
            Vec3::down()
        );
        assert_eq!(
            Quaternion::from_to_rotation(Vec3::up(), Vec3::up() * 5.0),
            Quaternion::identity()
        );
        assert_eq!(
            Quaternion::from_to_rotation(Vec3::zero(), Vec3::up()),
            Quaternion::identity()
        );

        let mut rng = StdRng::seed_from_u64(9);
        for _ in 0..200 {
            let from = random_rotation(&mut rng) * Vec3::forward();
            let to = random_rotation(&mut rng) * Vec3::up();
            let q = Quaternion::from_to_rotation(from, to);
            assert!((q * from).dist(to) < 1e-3, "{from} -> {to}");
        }
    }

    #[test]
    fn look_rotation() {
        let q = Quaternion::look_rotation(Vec3::right(), Vec3::up());
        assert_eq!(q * Vec3::forward(), Vec3::right());
        assert_eq!(q * Vec3::up(), Vec3::up());

        let q = Quaternion::look_rotation(Vec3::new(1.0, 1.0, 1.0), Vec3::up());
        assert_eq!(q * Vec3::forward(), Vec3::new(1.0, 1.0, 1.0).normed());
        assert!((q * Vec3::right()).y.abs() < EPSILON);

        // up parallel to forward
        let q = Quaternion::look_rotation(Vec3::up(), Vec3::up());
        assert_eq!(q * Vec3::forward(), Vec3::up());

        assert_eq!(
            Quaternion::look_rotation(Vec3::zero(), Vec3::up()),
            Quaternion::identity()
        );

        let mut q = Quaternion::identity();
        q.set_look_rotation(Vec3::back(), Vec3::up());
        assert_eq!(q * Vec3::forward(), Vec3::back());
    }

    #[test]
    fn euler_order_is_zxy() {
        let q = Quaternion::euler(90.0, 90.0, 0.0);
        // x first (forward -> down), then y leaves down alone.
        assert_eq!(q * Vec3::forward(), Vec3::down());
        let q = Quaternion::euler(0.0, 90.0, 90.0);
        // z first (right -> up), then y leaves up alone.
        assert_eq!(q * Vec3::right(), Vec3::up());
        assert_eq!(Quaternion::euler(0.0, 90.0, 0.0) * Vec3::forward(), Vec3::right());
    }

    #[test]
    fn euler_angles_roundtrip() {
        let angles = Quaternion::euler(30.0, 45.0, 60.0).euler_angles();
        assert!(angles.dist(Vec3::new(30.0, 45.0, 60.0)) < 1e-2, "{angles}");

        let mut rng = StdRng::seed_from_u64(1234);
        for _ in 0..500 {
            let degrees = Vec3::new(
                rng.gen_range(-80.0..80.0),
                rng.gen_range(0.0..360.0),
                rng.gen_range(0.0..360.0),
            );
            let q = Quaternion::from_euler(degrees);
            let angles = q.euler_angles();
            assert!(
                Quaternion::from_euler(angles).angle_degrees(q) < 0.05,
                "{degrees} -> {angles}"
            );
        }
    }

    #[test]
    fn euler_angles_are_positive() {
        let angles = Quaternion::euler(-10.0, -20.0, -30.0).euler_angles();
        assert!(angles.dist(Vec3::new(350.0, 340.0, 330.0)) < 1e-2, "{angles}");
        // Tiny negative values are left alone rather than wrapped to ~360.
        let angles = Quaternion::euler(0.0, -0.001, 0.0).euler_angles();
        assert!(angles.y < 0.0 && angles.y > -0.01, "{angles}");
    }

    #[test]
    fn euler_angles_gimbal_lock() {
        let q = Quaternion::euler(90.0, 30.0, 0.0);
        let angles = q.euler_angles();
        assert!((angles.x - 90.0).abs() < 0.1, "{angles}");
        assert!(Quaternion::from_euler(angles).angle_degrees(q) < 0.1);
    }

    #[test]
    fn slerp_and_lerp() {
        let a = Quaternion::identity();
        let b = Quaternion::angle_axis(90.0, Vec3::up());
        assert_eq!(a.slerp(b, 0.0), a);
        assert_eq!(a.slerp(b, 1.0), b);
        assert_eq!(a.slerp(b, 0.5), Quaternion::angle_axis(45.0, Vec3::up()));
        assert_eq!(a.slerp(b, 2.0), b);
        assert_eq!(
            a.slerp_unclamped(b, 2.0),
            Quaternion::angle_axis(180.0, Vec3::up())
        );
        // Shortest path, even when the target has the opposite sign.
        assert_eq!(a.slerp(-b, 0.5), Quaternion::angle_axis(45.0, Vec3::up()));

        assert_eq!(a.lerp(b, 0.5), Quaternion::angle_axis(45.0, Vec3::up()));
        assert_eq!(a.lerp(-b, 1.0), b);
        assert!((a.lerp(b, 0.3).len() - 1.0).abs() < EPSILON);
    }

    #[test]
    fn rotate_towards() {
        let a = Quaternion::identity();
        let b = Quaternion::angle_axis(90.0, Vec3::up());
        let stepped = a.rotate_towards(b, 30.0);
        assert!((stepped.angle_degrees(a) - 30.0).abs() < 1e-2);
        assert_eq!(a.rotate_towards(b, 120.0), b);
        assert_eq!(b.rotate_towards(b, 10.0), b);
    }

    #[test]
    fn index_and_display() {
        let mut q = Quaternion::new(1.0, 2.0, 3.0, 4.0);
        assert_eq!(q[3], 4.0);
        q[0] = 0.5;
        assert_eq!(q.try_get(0).unwrap(), 0.5);
        assert!(q.try_get(4).is_err());
        assert_eq!(format!("{q}"), "quat(0.5, 2, 3, 4)");
        assert_eq!(format!("{q:.1}"), "quat(0.5, 2.0, 3.0, 4.0)");
    }
}
