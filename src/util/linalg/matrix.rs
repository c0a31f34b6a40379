#[allow(unused_imports)]
use crate::core::prelude::*;

use crate::util::assert::check_lt;
use bytemuck::{Pod, Zeroable};
use itertools::iproduct;
use num_traits::One;
use serde::{Deserialize, Serialize};
use std::{
    fmt,
    fmt::Formatter,
    ops::{Index, IndexMut, Mul, MulAssign},
};

/// The six clip planes of a projection, as passed to [`Mat4x4::frustum`].
#[derive(
    Default, Debug, Copy, Clone, PartialEq, Serialize, Deserialize, bincode::Encode, bincode::Decode,
)]
pub struct FrustumPlanes {
    pub left: f32,
    pub right: f32,
    pub bottom: f32,
    pub top: f32,
    pub z_near: f32,
    pub z_far: f32,
}

/// A 4x4 matrix of `f32`, acting on column vectors (`p' = M * p`).
///
/// Field `mRC` is row `R`, column `C`. The fields are laid out column-major, so the linear index
/// `m[i]` is `i = row + 4 * col` and [`bytemuck::cast_slice`] on a `&[Mat4x4]` gives the layout
/// GPUs expect.
///
/// Projection builders produce OpenGL-style clip space (depth in `[-1, 1]`) from a view space
/// whose camera looks down `-Z`.
///
/// ```
/// use glongge_math::core::prelude::*;
///
/// let m = Mat4x4::trs(Vec3::new(1.0, 2.0, 3.0), Quaternion::identity(), Vec3::splat(2.0));
/// assert_eq!(m.multiply_point(Vec3::one()), Vec3::new(3.0, 4.0, 5.0));
/// assert_eq!(m[(0, 3)], 1.0);
/// assert_eq!(m[12], 1.0);
/// ```
#[repr(C)]
#[derive(
    Debug,
    Copy,
    Clone,
    PartialEq,
    Pod,
    Zeroable,
    Serialize,
    Deserialize,
    bincode::Encode,
    bincode::Decode,
)]
pub struct Mat4x4 {
    pub m00: f32,
    pub m10: f32,
    pub m20: f32,
    pub m30: f32,
    pub m01: f32,
    pub m11: f32,
    pub m21: f32,
    pub m31: f32,
    pub m02: f32,
    pub m12: f32,
    pub m22: f32,
    pub m32: f32,
    pub m03: f32,
    pub m13: f32,
    pub m23: f32,
    pub m33: f32,
}

impl Default for Mat4x4 {
    fn default() -> Self {
        Self::identity()
    }
}

impl Mat4x4 {
    #[must_use]
    pub fn zero() -> Mat4x4 {
        Mat4x4::zeroed()
    }

    #[must_use]
    pub fn identity() -> Mat4x4 {
        Mat4x4 {
            m00: 1.0,
            m11: 1.0,
            m22: 1.0,
            m33: 1.0,
            ..Mat4x4::zeroed()
        }
    }

    #[must_use]
    pub fn from_columns(c0: Vec4, c1: Vec4, c2: Vec4, c3: Vec4) -> Mat4x4 {
        let mut rv = Mat4x4::zeroed();
        rv.set_column(0, c0);
        rv.set_column(1, c1);
        rv.set_column(2, c2);
        rv.set_column(3, c3);
        rv
    }

    /// Builds a matrix from 16 values in column-major order.
    #[must_use]
    pub fn from_cols_array(values: [f32; 16]) -> Mat4x4 {
        bytemuck::cast(values)
    }
    pub fn to_cols_array(&self) -> [f32; 16] {
        bytemuck::cast(*self)
    }

    pub fn try_get(&self, index: usize) -> Result<f32> {
        self.to_cols_array()
            .get(index)
            .copied()
            .with_context(|| format!("Mat4x4: index out of range: {index}"))
    }

    pub fn try_get_rc(&self, row: usize, col: usize) -> Result<f32> {
        if row >= 4 || col >= 4 {
            bail!("Mat4x4: index out of range: ({row}, {col})");
        }
        self.try_get(row + 4 * col)
    }

    pub fn column(&self, index: usize) -> Vec4 {
        check_lt!(index, 4);
        Vec4::new(
            self[4 * index],
            self[4 * index + 1],
            self[4 * index + 2],
            self[4 * index + 3],
        )
    }
    pub fn set_column(&mut self, index: usize, column: Vec4) {
        check_lt!(index, 4);
        for row in 0..4 {
            self[4 * index + row] = column[row];
        }
    }
    pub fn row(&self, index: usize) -> Vec4 {
        check_lt!(index, 4);
        Vec4::new(
            self[index],
            self[index + 4],
            self[index + 8],
            self[index + 12],
        )
    }
    pub fn set_row(&mut self, index: usize, row: Vec4) {
        check_lt!(index, 4);
        for col in 0..4 {
            self[index + 4 * col] = row[col];
        }
    }

    #[must_use]
    pub fn translate(v: Vec3) -> Mat4x4 {
        Mat4x4 {
            m03: v.x,
            m13: v.y,
            m23: v.z,
            ..Mat4x4::identity()
        }
    }

    #[must_use]
    pub fn scale(v: Vec3) -> Mat4x4 {
        Mat4x4 {
            m00: v.x,
            m11: v.y,
            m22: v.z,
            ..Mat4x4::identity()
        }
    }

    #[must_use]
    pub fn rotate(q: Quaternion) -> Mat4x4 {
        let [m00, m01, m02, m10, m11, m12, m20, m21, m22] = q.rotation_matrix_rows();
        Mat4x4 {
            m00,
            m01,
            m02,
            m10,
            m11,
            m12,
            m20,
            m21,
            m22,
            ..Mat4x4::identity()
        }
    }

    /// Translation, rotation and scale, applied to points in the order scale, rotate,
    /// translate (`T * R * S`).
    #[must_use]
    pub fn trs(position: Vec3, rotation: Quaternion, scale: Vec3) -> Mat4x4 {
        let r = Mat4x4::rotate(rotation);
        Mat4x4::from_columns(
            r.column(0) * scale.x,
            r.column(1) * scale.y,
            r.column(2) * scale.z,
            Vec4::new(position.x, position.y, position.z, 1.0),
        )
    }

    pub fn set_trs(&mut self, position: Vec3, rotation: Quaternion, scale: Vec3) {
        *self = Mat4x4::trs(position, rotation, scale);
    }

    #[must_use]
    pub fn ortho(left: f32, right: f32, bottom: f32, top: f32, z_near: f32, z_far: f32) -> Mat4x4 {
        Mat4x4 {
            m00: 2.0 / (right - left),
            m11: 2.0 / (top - bottom),
            m22: -2.0 / (z_far - z_near),
            m03: -(right + left) / (right - left),
            m13: -(top + bottom) / (top - bottom),
            m23: -(z_far + z_near) / (z_far - z_near),
            ..Mat4x4::identity()
        }
    }

    /// Symmetric perspective projection with a vertical field of view in degrees.
    #[must_use]
    pub fn perspective(fov_degrees: f32, aspect: f32, z_near: f32, z_far: f32) -> Mat4x4 {
        let cot = 1.0 / (fov_degrees * DEG_TO_RAD * 0.5).tan();
        Mat4x4 {
            m00: cot / aspect,
            m11: cot,
            m22: (z_far + z_near) / (z_near - z_far),
            m23: 2.0 * z_far * z_near / (z_near - z_far),
            m32: -1.0,
            ..Mat4x4::zeroed()
        }
    }

    /// Off-centre perspective projection. `left`, `right`, `bottom` and `top` are measured on
    /// the near plane.
    #[must_use]
    pub fn frustum(
        left: f32,
        right: f32,
        bottom: f32,
        top: f32,
        z_near: f32,
        z_far: f32,
    ) -> Mat4x4 {
        Mat4x4 {
            m00: 2.0 * z_near / (right - left),
            m02: (right + left) / (right - left),
            m11: 2.0 * z_near / (top - bottom),
            m12: (top + bottom) / (top - bottom),
            m22: -(z_far + z_near) / (z_far - z_near),
            m23: -2.0 * z_far * z_near / (z_far - z_near),
            m32: -1.0,
            ..Mat4x4::zeroed()
        }
    }

    #[must_use]
    pub fn frustum_from_planes(planes: FrustumPlanes) -> Mat4x4 {
        Mat4x4::frustum(
            planes.left,
            planes.right,
            planes.bottom,
            planes.top,
            planes.z_near,
            planes.z_far,
        )
    }

    /// Object-to-world transform placed at `from`, with `+Z` facing `to` and `+Y` as close to
    /// `up` as possible.
    #[must_use]
    pub fn look_at(from: Vec3, to: Vec3, up: Vec3) -> Mat4x4 {
        Mat4x4::trs(from, Quaternion::look_rotation(to - from, up), Vec3::one())
    }

    /// Recovers the clip planes of a matrix built by [`frustum`](Mat4x4::frustum),
    /// [`perspective`](Mat4x4::perspective) or [`ortho`](Mat4x4::ortho).
    pub fn decompose_projection(&self) -> FrustumPlanes {
        if self.m32 == 0.0 {
            let z_near = (self.m23 + 1.0) / self.m22;
            let z_far = (self.m23 - 1.0) / self.m22;
            FrustumPlanes {
                left: (-1.0 - self.m03) / self.m00,
                right: (1.0 - self.m03) / self.m00,
                bottom: (-1.0 - self.m13) / self.m11,
                top: (1.0 - self.m13) / self.m11,
                z_near,
                z_far,
            }
        } else {
            let z_near = self.m23 / (self.m22 - 1.0);
            let z_far = self.m23 / (self.m22 + 1.0);
            FrustumPlanes {
                left: z_near * (self.m02 - 1.0) / self.m00,
                right: z_near * (self.m02 + 1.0) / self.m00,
                bottom: z_near * (self.m12 - 1.0) / self.m11,
                top: z_near * (self.m12 + 1.0) / self.m11,
                z_near,
                z_far,
            }
        }
    }

    #[must_use]
    pub fn transpose(&self) -> Mat4x4 {
        let mut rv = Mat4x4::zeroed();
        for (row, col) in iproduct!(0..4, 0..4) {
            rv[(col, row)] = self[(row, col)];
        }
        rv
    }

    pub fn determinant(&self) -> f32 {
        let (s, c) = self.sub_determinants();
        s[0] * c[5] - s[1] * c[4] + s[2] * c[3] + s[3] * c[2] - s[4] * c[1] + s[5] * c[0]
    }

    // 2x2 determinants of the top two rows and of the bottom two rows.
    fn sub_determinants(&self) -> ([f32; 6], [f32; 6]) {
        let m = self;
        (
            [
                m.m00 * m.m11 - m.m10 * m.m01,
                m.m00 * m.m12 - m.m10 * m.m02,
                m.m00 * m.m13 - m.m10 * m.m03,
                m.m01 * m.m12 - m.m11 * m.m02,
                m.m01 * m.m13 - m.m11 * m.m03,
                m.m02 * m.m13 - m.m12 * m.m03,
            ],
            [
                m.m20 * m.m31 - m.m30 * m.m21,
                m.m20 * m.m32 - m.m30 * m.m22,
                m.m20 * m.m33 - m.m30 * m.m23,
                m.m21 * m.m32 - m.m31 * m.m22,
                m.m21 * m.m33 - m.m31 * m.m23,
                m.m22 * m.m33 - m.m32 * m.m23,
            ],
        )
    }

    /// Returns the inverse, or `None` if the matrix is singular.
    pub fn try_inverse(&self) -> Option<Mat4x4> {
        let (s, c) = self.sub_determinants();
        let det = s[0] * c[5] - s[1] * c[4] + s[2] * c[3] + s[3] * c[2] - s[4] * c[1] + s[5] * c[0];
        if det.abs() < MIN_POSITIVE_SUBNORMAL || !det.is_finite() {
            return None;
        }
        let inv_det = 1.0 / det;
        let m = self;
        Some(Mat4x4 {
            m00: (m.m11 * c[5] - m.m12 * c[4] + m.m13 * c[3]) * inv_det,
            m01: (-m.m01 * c[5] + m.m02 * c[4] - m.m03 * c[3]) * inv_det,
            m02: (m.m31 * s[5] - m.m32 * s[4] + m.m33 * s[3]) * inv_det,
            m03: (-m.m21 * s[5] + m.m22 * s[4] - m.m23 * s[3]) * inv_det,
            m10: (-m.m10 * c[5] + m.m12 * c[2] - m.m13 * c[1]) * inv_det,
            m11: (m.m00 * c[5] - m.m02 * c[2] + m.m03 * c[1]) * inv_det,
            m12: (-m.m30 * s[5] + m.m32 * s[2] - m.m33 * s[1]) * inv_det,
            m13: (m.m20 * s[5] - m.m22 * s[2] + m.m23 * s[1]) * inv_det,
            m20: (m.m10 * c[4] - m.m11 * c[2] + m.m13 * c[0]) * inv_det,
            m21: (-m.m00 * c[4] + m.m01 * c[2] - m.m03 * c[0]) * inv_det,
            m22: (m.m30 * s[4] - m.m31 * s[2] + m.m33 * s[0]) * inv_det,
            m23: (-m.m20 * s[4] + m.m21 * s[2] - m.m23 * s[0]) * inv_det,
            m30: (-m.m10 * c[3] + m.m11 * c[1] - m.m12 * c[0]) * inv_det,
            m31: (m.m00 * c[3] - m.m01 * c[1] + m.m02 * c[0]) * inv_det,
            m32: (-m.m30 * s[3] + m.m31 * s[1] - m.m32 * s[0]) * inv_det,
            m33: (m.m20 * s[3] - m.m21 * s[1] + m.m22 * s[0]) * inv_det,
        })
    }

    /// Returns the inverse. A singular matrix has no inverse; this is logged and the zero
    /// matrix is returned. Use [`try_inverse`](Mat4x4::try_inverse) to handle that case.
    #[must_use]
    pub fn inverse(&self) -> Mat4x4 {
        self.try_inverse().unwrap_or_else(|| {
            warn!("Mat4x4::inverse(): singular matrix, returning zero:\n{self}");
            Mat4x4::zero()
        })
    }

    /// Inverts a matrix whose bottom row is `(0, 0, 0, 1)`, using only the 3x3 part and the
    /// translation. Returns `None` if the 3x3 part is singular.
    pub fn inverse_3d_affine(&self) -> Option<Mat4x4> {
        let m = self;
        let c00 = m.m11 * m.m22 - m.m12 * m.m21;
        let c01 = m.m12 * m.m20 - m.m10 * m.m22;
        let c02 = m.m10 * m.m21 - m.m11 * m.m20;
        let det = m.m00 * c00 + m.m01 * c01 + m.m02 * c02;
        if det.abs() < MIN_POSITIVE_SUBNORMAL || !det.is_finite() {
            return None;
        }
        let inv_det = 1.0 / det;
        let mut rv = Mat4x4 {
            m00: c00 * inv_det,
            m01: (m.m02 * m.m21 - m.m01 * m.m22) * inv_det,
            m02: (m.m01 * m.m12 - m.m02 * m.m11) * inv_det,
            m10: c01 * inv_det,
            m11: (m.m00 * m.m22 - m.m02 * m.m20) * inv_det,
            m12: (m.m02 * m.m10 - m.m00 * m.m12) * inv_det,
            m20: c02 * inv_det,
            m21: (m.m01 * m.m20 - m.m00 * m.m21) * inv_det,
            m22: (m.m00 * m.m11 - m.m01 * m.m10) * inv_det,
            ..Mat4x4::identity()
        };
        let t = -rv.multiply_vector(self.position());
        rv.m03 = t.x;
        rv.m13 = t.y;
        rv.m23 = t.z;
        Some(rv)
    }

    fn determinant_3x3(&self) -> f32 {
        self.m00 * (self.m11 * self.m22 - self.m12 * self.m21)
            - self.m01 * (self.m10 * self.m22 - self.m12 * self.m20)
            + self.m02 * (self.m10 * self.m21 - self.m11 * self.m20)
    }

    pub fn is_identity(&self) -> bool {
        self.almost_eq(Mat4x4::identity())
    }

    pub fn position(&self) -> Vec3 {
        Vec3::new(self.m03, self.m13, self.m23)
    }

    /// The scale of a TRS matrix: the lengths of the first three columns, with `x` negated if
    /// the matrix mirrors. Lossy because skew cannot be represented.
    pub fn lossy_scale(&self) -> Vec3 {
        let x = self.column(0).xyz().len();
        let scale = Vec3::new(x, self.column(1).xyz().len(), self.column(2).xyz().len());
        if self.determinant_3x3() < 0.0 {
            Vec3::new(-scale.x, scale.y, scale.z)
        } else {
            scale
        }
    }

    /// The rotation of a TRS matrix, with the scale divided out. Identity if any axis has zero
    /// scale.
    pub fn rotation(&self) -> Quaternion {
        let scale = self.lossy_scale();
        if scale.x.abs() < EPSILON || scale.y.abs() < EPSILON || scale.z.abs() < EPSILON {
            return Quaternion::identity();
        }
        Quaternion::from_basis(
            self.column(0).xyz() / scale.x,
            self.column(1).xyz() / scale.y,
            self.column(2).xyz() / scale.z,
        )
    }

    /// Whether the matrix can be expressed as [`trs`](Mat4x4::trs): finite, with bottom row
    /// `(0, 0, 0, 1)` and mutually orthogonal non-zero axes.
    pub fn valid_trs(&self) -> bool {
        if !self.to_cols_array().iter().all(|v| v.is_finite()) {
            return false;
        }
        if self.row(3) != Vec4::new(0.0, 0.0, 0.0, 1.0) {
            return false;
        }
        let axes = [
            self.column(0).xyz(),
            self.column(1).xyz(),
            self.column(2).xyz(),
        ];
        if axes.iter().any(|axis| axis.len() < EPSILON) {
            return false;
        }
        axes.iter()
            .tuple_combinations()
            .all(|(a, b)| a.dot(*b).abs() <= 1e-4 * a.len() * b.len())
    }

    /// Transforms a point, including the perspective divide.
    pub fn multiply_point(&self, p: Vec3) -> Vec3 {
        let v = *self * Vec4::new(p.x, p.y, p.z, 1.0);
        v.xyz() / v.w
    }

    /// Transforms a point by the top three rows only. Faster than
    /// [`multiply_point`](Mat4x4::multiply_point) but wrong for projections.
    pub fn multiply_point3x4(&self, p: Vec3) -> Vec3 {
        self.multiply_vector(p) + self.position()
    }

    /// Transforms a direction, ignoring translation.
    pub fn multiply_vector(&self, v: Vec3) -> Vec3 {
        Vec3::new(
            self.m00 * v.x + self.m01 * v.y + self.m02 * v.z,
            self.m10 * v.x + self.m11 * v.y + self.m12 * v.z,
            self.m20 * v.x + self.m21 * v.y + self.m22 * v.z,
        )
    }

    /// Transforms a plane by this matrix, using the inverse transpose.
    pub fn transform_plane(&self, plane: Plane) -> Plane {
        let inv = self.inverse();
        let p = Vec4::new(
            plane.normal.x,
            plane.normal.y,
            plane.normal.z,
            plane.distance,
        );
        let transformed = Vec4::new(
            inv.column(0).dot(p),
            inv.column(1).dot(p),
            inv.column(2).dot(p),
            inv.column(3).dot(p),
        );
        let len = transformed.xyz().len();
        if len < MIN_POSITIVE_SUBNORMAL {
            return Plane::default();
        }
        Plane {
            normal: transformed.xyz() / len,
            distance: transformed.w / len,
        }
    }

    /// Component-wise comparison within [`EPSILON`](crate::core::config::EPSILON).
    pub fn almost_eq(&self, rhs: Mat4x4) -> bool {
        self.to_cols_array()
            .into_iter()
            .zip(rhs.to_cols_array())
            .all(|(a, b)| (a - b).abs() < EPSILON)
    }
}

impl Index<usize> for Mat4x4 {
    type Output = f32;

    fn index(&self, index: usize) -> &Self::Output {
        check_lt!(index, 16);
        &bytemuck::cast_ref::<Mat4x4, [f32; 16]>(self)[index]
    }
}
impl IndexMut<usize> for Mat4x4 {
    fn index_mut(&mut self, index: usize) -> &mut Self::Output {
        check_lt!(index, 16);
        &mut bytemuck::cast_mut::<Mat4x4, [f32; 16]>(self)[index]
    }
}
impl Index<(usize, usize)> for Mat4x4 {
    type Output = f32;

    fn index(&self, (row, col): (usize, usize)) -> &Self::Output {
        check_lt!(row, 4);
        check_lt!(col, 4);
        &self[row + 4 * col]
    }
}
impl IndexMut<(usize, usize)> for Mat4x4 {
    fn index_mut(&mut self, (row, col): (usize, usize)) -> &mut Self::Output {
        check_lt!(row, 4);
        check_lt!(col, 4);
        &mut self[row + 4 * col]
    }
}

impl One for Mat4x4 {
    fn one() -> Self {
        Mat4x4::identity()
    }
}

impl Mul<Mat4x4> for Mat4x4 {
    type Output = Mat4x4;

    fn mul(self, rhs: Mat4x4) -> Self::Output {
        let mut rv = Mat4x4::zeroed();
        for (row, col) in iproduct!(0..4, 0..4) {
            rv[(row, col)] = self.row(row).dot(rhs.column(col));
        }
        rv
    }
}
impl MulAssign<Mat4x4> for Mat4x4 {
    fn mul_assign(&mut self, rhs: Mat4x4) {
        *self = *self * rhs;
    }
}
impl Mul<Vec4> for Mat4x4 {
    type Output = Vec4;

    fn mul(self, rhs: Vec4) -> Self::Output {
        Vec4::new(
            self.row(0).dot(rhs),
            self.row(1).dot(rhs),
            self.row(2).dot(rhs),
            self.row(3).dot(rhs),
        )
    }
}

impl From<[f32; 16]> for Mat4x4 {
    fn from(value: [f32; 16]) -> Self {
        Mat4x4::from_cols_array(value)
    }
}

impl fmt::Display for Mat4x4 {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let rows = (0..4).map(|i| self.row(i)).collect_vec();
        if let Some(p) = f.precision() {
            write!(
                f,
                "mat4x4[{:.4$}, {:.4$}, {:.4$}, {:.4$}]",
                rows[0], rows[1], rows[2], rows[3], p
            )
        } else {
            write!(
                f,
                "mat4x4[{}, {}, {}, {}]",
                rows[0], rows[1], rows[2], rows[3]
            )
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    fn assert_close(a: Mat4x4, b: Mat4x4, tolerance: f32) {
        for (i, (x, y)) in a.to_cols_array().into_iter().zip(b.to_cols_array()).enumerate() {
            assert!((x - y).abs() <= tolerance, "[{i}]: {x} vs. {y}\n{a}\n{b}");
        }
    }

    fn random_trs(rng: &mut StdRng) -> Mat4x4 {
        let position = Vec3::new(
            rng.gen_range(-10.0..10.0),
            rng.gen_range(-10.0..10.0),
            rng.gen_range(-10.0..10.0),
        );
        let rotation = Quaternion::euler(
            rng.gen_range(0.0..360.0),
            rng.gen_range(0.0..360.0),
            rng.gen_range(0.0..360.0),
        );
        let scale = Vec3::new(
            rng.gen_range(0.5..3.0),
            rng.gen_range(0.5..3.0),
            rng.gen_range(0.5..3.0),
        );
        Mat4x4::trs(position, rotation, scale)
    }

    #[test]
    fn layout_is_column_major() {
        let m = Mat4x4::from_cols_array(std::array::from_fn(|i| i as f32));
        assert_eq!(m.m00, 0.0);
        assert_eq!(m.m10, 1.0);
        assert_eq!(m.m01, 4.0);
        assert_eq!(m.m23, 14.0);
        assert_eq!(m[(2, 3)], 14.0);
        assert_eq!(m[7], 7.0);
        assert_eq!(m.column(1), Vec4::new(4.0, 5.0, 6.0, 7.0));
        assert_eq!(m.row(1), Vec4::new(1.0, 5.0, 9.0, 13.0));
        assert_eq!(m.try_get(15).unwrap(), 15.0);
        assert!(m.try_get(16).is_err());
        assert_eq!(m.try_get_rc(3, 0).unwrap(), 3.0);
        assert!(m.try_get_rc(0, 4).is_err());
    }

    #[test]
    #[should_panic(expected = "check failed")]
    fn index_out_of_range() {
        let _ = Mat4x4::identity()[(4, 0)];
    }

    #[test]
    fn rows_and_columns() {
        let mut m = Mat4x4::zero();
        m.set_row(2, Vec4::new(1.0, 2.0, 3.0, 4.0));
        assert_eq!(m.m21, 2.0);
        m.set_column(3, Vec4::one());
        assert_eq!(m.row(2), Vec4::new(1.0, 2.0, 3.0, 1.0));
        let mut n = m;
        n[(0, 0)] = 9.0;
        assert_eq!(n.m00, 9.0);
        assert_ne!(m, n);
    }

    #[test]
    fn multiplication() {
        let mut rng = StdRng::seed_from_u64(17);
        let a = random_trs(&mut rng);
        assert_eq!(Mat4x4::identity() * a, a);
        assert_eq!(a * Mat4x4::identity(), a);

        let b = random_trs(&mut rng);
        let p = Vec3::new(1.0, -2.0, 0.5);
        let lhs = (a * b).multiply_point(p);
        let rhs = a.multiply_point(b.multiply_point(p));
        assert!(lhs.dist(rhs) < 1e-3);

        let mut c = a;
        c *= b;
        assert_eq!(c, a * b);
    }

    #[test]
    fn trs_applies_scale_then_rotation_then_translation() {
        let m = Mat4x4::trs(
            Vec3::new(1.0, 2.0, 3.0),
            Quaternion::angle_axis(90.0, Vec3::up()),
            Vec3::splat(2.0),
        );
        assert_eq!(m.multiply_point(Vec3::forward()), Vec3::new(3.0, 2.0, 3.0));
        assert_eq!(m.multiply_point3x4(Vec3::forward()), Vec3::new(3.0, 2.0, 3.0));
        assert_eq!(m.multiply_vector(Vec3::forward()), Vec3::new(2.0, 0.0, 0.0));
        assert_eq!(m.position(), Vec3::new(1.0, 2.0, 3.0));

        let mut n = Mat4x4::zero();
        n.set_trs(Vec3::new(1.0, 2.0, 3.0), Quaternion::identity(), Vec3::one());
        assert_eq!(n, Mat4x4::translate(Vec3::new(1.0, 2.0, 3.0)));
        assert_eq!(
            Mat4x4::trs(Vec3::zero(), Quaternion::identity(), Vec3::new(1.0, 2.0, 3.0)),
            Mat4x4::scale(Vec3::new(1.0, 2.0, 3.0))
        );
    }

    #[test]
    fn inverse_of_trs() {
        let mut rng = StdRng::seed_from_u64(99);
        for _ in 0..200 {
            let m = random_trs(&mut rng);
            let inv = m.inverse();
            assert_close(m * inv, Mat4x4::identity(), 1e-3);
            assert_close(inv * m, Mat4x4::identity(), 1e-3);
            let affine = m.inverse_3d_affine().unwrap();
            assert_close(affine, inv, 1e-3);
        }
    }

    #[test]
    fn inverse_of_singular_matrix() {
        let singular = Mat4x4::scale(Vec3::new(1.0, 0.0, 1.0));
        assert!(singular.try_inverse().is_none());
        assert!(singular.inverse_3d_affine().is_none());
        assert_eq!(singular.inverse(), Mat4x4::zero());
        assert_eq!(Mat4x4::zero().inverse(), Mat4x4::zero());
    }

    #[test]
    fn determinant_and_transpose() {
        assert_eq!(Mat4x4::scale(Vec3::new(2.0, 3.0, 4.0)).determinant(), 24.0);
        assert_eq!(Mat4x4::identity().determinant(), 1.0);
        assert_eq!(Mat4x4::zero().determinant(), 0.0);
        let rotation = Mat4x4::rotate(Quaternion::euler(10.0, 20.0, 30.0));
        assert!((rotation.determinant() - 1.0).abs() < 1e-5);
        assert_close(rotation.transpose(), rotation.inverse(), 1e-5);

        let m = Mat4x4::from_cols_array(std::array::from_fn(|i| i as f32));
        assert_eq!(m.transpose().transpose(), m);
        assert_eq!(m.transpose().m01, m.m10);
    }

    #[test]
    fn derived_properties() {
        let q = Quaternion::euler(15.0, 70.0, -40.0);
        let m = Mat4x4::trs(Vec3::new(4.0, 5.0, 6.0), q, Vec3::new(2.0, 3.0, 4.0));
        assert_eq!(m.lossy_scale(), Vec3::new(2.0, 3.0, 4.0));
        assert!(m.rotation().angle_degrees(q) < 0.01);
        assert!(m.valid_trs());
        assert!(!m.is_identity());
        assert!(Mat4x4::identity().is_identity());

        let mirrored = Mat4x4::trs(Vec3::zero(), q, Vec3::new(-2.0, 3.0, 4.0));
        assert_eq!(mirrored.lossy_scale(), Vec3::new(-2.0, 3.0, 4.0));
        assert!(mirrored.rotation().angle_degrees(q) < 0.01);

        assert!(!Mat4x4::perspective(60.0, 1.0, 0.1, 100.0).valid_trs());
        assert!(!Mat4x4::scale(Vec3::new(1.0, 0.0, 1.0)).valid_trs());
        assert_eq!(
            Mat4x4::scale(Vec3::new(1.0, 0.0, 1.0)).rotation(),
            Quaternion::identity()
        );
        let mut skewed = Mat4x4::identity();
        skewed.m01 = 1.0;
        assert!(!skewed.valid_trs());
    }

    #[test]
    fn perspective_maps_near_and_far() {
        let m = Mat4x4::perspective(90.0, 2.0, 1.0, 100.0);
        let near = m.multiply_point(Vec3::new(0.0, 0.0, -1.0));
        assert!((near.z + 1.0).abs() < 1e-4, "{near}");
        let far = m.multiply_point(Vec3::new(0.0, 0.0, -100.0));
        assert!((far.z - 1.0).abs() < 1e-4, "{far}");
        // 90 degree vertical field of view: y = -z on the top edge.
        let top = m.multiply_point(Vec3::new(0.0, 5.0, -5.0));
        assert!((top.y - 1.0).abs() < 1e-4, "{top}");
        let right = m.multiply_point(Vec3::new(10.0, 0.0, -5.0));
        assert!((right.x - 1.0).abs() < 1e-4, "{right}");
    }

    #[test]
    fn ortho_maps_box_to_clip_space() {
        let m = Mat4x4::ortho(-2.0, 6.0, -1.0, 3.0, 0.5, 10.0);
        assert_eq!(
            m.multiply_point(Vec3::new(-2.0, -1.0, -0.5)),
            Vec3::new(-1.0, -1.0, -1.0)
        );
        assert_eq!(
            m.multiply_point(Vec3::new(6.0, 3.0, -10.0)),
            Vec3::new(1.0, 1.0, 1.0)
        );
    }

    #[test]
    fn decompose_projection_roundtrip() {
        let planes = FrustumPlanes {
            left: -0.3,
            right: 0.5,
            bottom: -0.2,
            top: 0.25,
            z_near: 0.5,
            z_far: 50.0,
        };
        let decomposed = Mat4x4::frustum_from_planes(planes).decompose_projection();
        assert!((decomposed.left - planes.left).abs() < 1e-4);
        assert!((decomposed.right - planes.right).abs() < 1e-4);
        assert!((decomposed.bottom - planes.bottom).abs() < 1e-4);
        assert!((decomposed.top - planes.top).abs() < 1e-4);
        assert!((decomposed.z_near - planes.z_near).abs() < 1e-4);
        assert!((decomposed.z_far - planes.z_far).abs() < 0.1);

        let decomposed = Mat4x4::ortho(-2.0, 6.0, -1.0, 3.0, 0.5, 10.0).decompose_projection();
        assert!((decomposed.left + 2.0).abs() < 1e-4);
        assert!((decomposed.right - 6.0).abs() < 1e-4);
        assert!((decomposed.bottom + 1.0).abs() < 1e-4);
        assert!((decomposed.top - 3.0).abs() < 1e-4);
        assert!((decomposed.z_near - 0.5).abs() < 1e-4);
        assert!((decomposed.z_far - 10.0).abs() < 1e-3);

        let decomposed = Mat4x4::perspective(90.0, 1.0, 1.0, 10.0).decompose_projection();
        assert!((decomposed.left + 1.0).abs() < 1e-4);
        assert!((decomposed.top - 1.0).abs() < 1e-4);
        assert!((decomposed.z_far - 10.0).abs() < 1e-3);
    }

    #[test]
    fn look_at() {
        let m = Mat4x4::look_at(Vec3::new(1.0, 0.0, 0.0), Vec3::new(5.0, 0.0, 0.0), Vec3::up());
        assert_eq!(m.multiply_vector(Vec3::forward()), Vec3::right());
        assert_eq!(m.multiply_vector(Vec3::up()), Vec3::up());
        assert_eq!(m.position(), Vec3::new(1.0, 0.0, 0.0));
        assert_eq!(m.multiply_point(Vec3::forward()), Vec3::new(2.0, 0.0, 0.0));
    }

    #[test]
    fn transform_plane() {
        let ground = Plane::from_normal_and_point(Vec3::up(), Vec3::zero());
        let raised = Mat4x4::translate(Vec3::new(0.0, 5.0, 0.0)).transform_plane(ground);
        assert_eq!(raised.normal, Vec3::up());
        assert!((raised.distance + 5.0).abs() < 1e-5);

        let scaled = Mat4x4::scale(Vec3::splat(2.0)).transform_plane(Plane::from_normal_and_point(
            Vec3::up(),
            Vec3::new(0.0, 1.0, 0.0),
        ));
        assert_eq!(scaled.normal, Vec3::up());
        assert!((scaled.distance + 2.0).abs() < 1e-5);
    }

    #[test]
    fn display() {
        assert_eq!(
            format!("{:.1}", Mat4x4::identity()),
            "mat4x4[vec(1.0, 0.0, 0.0, 0.0), vec(0.0, 1.0, 0.0, 0.0), \
             vec(0.0, 0.0, 1.0, 0.0), vec(0.0, 0.0, 0.0, 1.0)]"
        );
    }

    #[test]
    fn pod_layout() {
        let matrices = [Mat4x4::identity(), Mat4x4::translate(Vec3::one())];
        let floats: &[f32] = bytemuck::cast_slice(&matrices);
        assert_eq!(floats.len(), 32);
        assert_eq!(floats[0], 1.0);
        assert_eq!(floats[16 + 12], 1.0);
    }
}
