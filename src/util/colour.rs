#[allow(unused_imports)]
use crate::core::prelude::*;

use crate::util::assert::check_lt;
use bytemuck::{Pod, Zeroable};
use num_traits::Zero;
use serde::{Deserialize, Serialize};
use std::{
    fmt,
    fmt::Formatter,
    ops::{Add, AddAssign, Div, DivAssign, Index, IndexMut, Mul, MulAssign, Sub, SubAssign},
};

/// An RGBA colour with float channels.
///
/// Channels are nominally in [0, 1] but are never clamped, so HDR values survive arithmetic.
/// Equality is approximate, as for [`Vec4`].
#[derive(
    Default, Debug, Copy, Clone, Serialize, Deserialize, bincode::Encode, bincode::Decode,
)]
pub struct Colour {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl PartialEq for Colour {
    fn eq(&self, other: &Self) -> bool {
        Vec4::from(*self) == Vec4::from(*other)
    }
}

impl Colour {
    pub const fn new(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }
    pub const fn rgb(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b, a: 1.0 }
    }

    pub fn red() -> Self {
        Self::rgb(1.0, 0.0, 0.0)
    }
    pub fn green() -> Self {
        Self::rgb(0.0, 1.0, 0.0)
    }
    pub fn blue() -> Self {
        Self::rgb(0.0, 0.0, 1.0)
    }
    pub fn white() -> Self {
        Self::rgb(1.0, 1.0, 1.0)
    }
    pub fn black() -> Self {
        Self::rgb(0.0, 0.0, 0.0)
    }
    /// A warm yellow rather than pure `(1, 1, 0)`.
    pub fn yellow() -> Self {
        Self::rgb(1.0, 0.921_568_63, 0.015_686_275)
    }
    pub fn cyan() -> Self {
        Self::rgb(0.0, 1.0, 1.0)
    }
    pub fn magenta() -> Self {
        Self::rgb(1.0, 0.0, 1.0)
    }
    pub fn grey() -> Self {
        Self::rgb(0.5, 0.5, 0.5)
    }
    pub fn clear() -> Self {
        Self::new(0.0, 0.0, 0.0, 0.0)
    }

    pub fn try_get(&self, index: usize) -> Result<f32> {
        match index {
            0 => Ok(self.r),
            1 => Ok(self.g),
            2 => Ok(self.b),
            3 => Ok(self.a),
            _ => bail!("Colour: index out of range: {index}"),
        }
    }

    #[must_use]
    pub fn with_alpha(mut self, a: f32) -> Self {
        self.a = a;
        self
    }

    /// Interpolates every channel including alpha, with `t` clamped to [0, 1].
    #[must_use]
    pub fn lerp(&self, to: Colour, t: f32) -> Colour {
        self.lerp_unclamped(to, mathf::clamp01(t))
    }
    #[must_use]
    pub fn lerp_unclamped(&self, to: Colour, t: f32) -> Colour {
        Colour {
            r: self.r + (to.r - self.r) * t,
            g: self.g + (to.g - self.g) * t,
            b: self.b + (to.b - self.b) * t,
            a: self.a + (to.a - self.a) * t,
        }
    }

    /// Perceived brightness, using the Rec. 601 luma weights.
    pub fn grayscale(&self) -> f32 {
        0.299 * self.r + 0.587 * self.g + 0.114 * self.b
    }
    pub fn max_colour_component(&self) -> f32 {
        self.r.max(self.g).max(self.b)
    }

    /// Converts from gamma to linear space. Alpha is unchanged.
    #[must_use]
    pub fn linear(&self) -> Colour {
        Colour {
            r: mathf::gamma_to_linear_space(self.r),
            g: mathf::gamma_to_linear_space(self.g),
            b: mathf::gamma_to_linear_space(self.b),
            a: self.a,
        }
    }
    /// Converts from linear to gamma space. Alpha is unchanged.
    #[must_use]
    pub fn gamma(&self) -> Colour {
        Colour {
            r: mathf::linear_to_gamma_space(self.r),
            g: mathf::linear_to_gamma_space(self.g),
            b: mathf::linear_to_gamma_space(self.b),
            a: self.a,
        }
    }

    /// Returns `(hue, saturation, value)`, each in [0, 1] for non-HDR input. Alpha is ignored.
    ///
    /// Ties between channels go to blue only if it is strictly greatest, then to green over red.
    pub fn rgb_to_hsv(colour: Colour) -> (f32, f32, f32) {
        if colour.b > colour.g && colour.b > colour.r {
            Self::rgb_to_hsv_sector(4.0, colour.b, colour.r, colour.g)
        } else if colour.g > colour.r {
            Self::rgb_to_hsv_sector(2.0, colour.g, colour.b, colour.r)
        } else {
            Self::rgb_to_hsv_sector(0.0, colour.r, colour.g, colour.b)
        }
    }

    fn rgb_to_hsv_sector(offset: f32, dominant: f32, c1: f32, c2: f32) -> (f32, f32, f32) {
        if dominant == 0.0 {
            return (0.0, 0.0, dominant);
        }
        let smallest = c1.min(c2);
        let diff = dominant - smallest;
        let (mut h, s) = if diff == 0.0 {
            (offset + (c1 - c2), 0.0)
        } else {
            (offset + (c1 - c2) / diff, diff / dominant)
        };
        h /= 6.0;
        if h < 0.0 {
            h += 1.0;
        }
        (h, s, dominant)
    }

    /// Builds an opaque colour from hue, saturation and value. The hue wraps, so `1.5` and
    /// `-0.5` both mean `0.5`. Unless `hdr` is set, every channel is clamped to [0, 1].
    pub fn hsv_to_rgb(h: f32, s: f32, v: f32, hdr: bool) -> Colour {
        let mut rv = Colour::white();
        if s == 0.0 {
            rv.r = v;
            rv.g = v;
            rv.b = v;
        } else if v == 0.0 {
            rv.r = 0.0;
            rv.g = 0.0;
            rv.b = 0.0;
        } else {
            let h6 = h.rem_euclid(1.0) * 6.0;
            let sector = h6.floor();
            let f = h6 - sector;
            let p = v * (1.0 - s);
            let q = v * (1.0 - s * f);
            let t = v * (1.0 - s * (1.0 - f));
            #[allow(clippy::cast_possible_truncation)]
            let (r, g, b) = match sector as i32 {
                1 => (q, v, p),
                2 => (p, v, t),
                3 => (p, q, v),
                4 => (t, p, v),
                5 => (v, p, q),
                // Sector 0, or 6 when the wrapped hue rounds up to exactly 1.
                _ => (v, t, p),
            };
            rv.r = r;
            rv.g = g;
            rv.b = b;
            if !hdr {
                rv.r = mathf::clamp01(rv.r);
                rv.g = mathf::clamp01(rv.g);
                rv.b = mathf::clamp01(rv.b);
            }
        }
        rv
    }
}

impl Index<usize> for Colour {
    type Output = f32;

    fn index(&self, index: usize) -> &Self::Output {
        check_lt!(index, 4);
        match index {
            0 => &self.r,
            1 => &self.g,
            2 => &self.b,
            _ => &self.a,
        }
    }
}
impl IndexMut<usize> for Colour {
    fn index_mut(&mut self, index: usize) -> &mut Self::Output {
        check_lt!(index, 4);
        match index {
            0 => &mut self.r,
            1 => &mut self.g,
            2 => &mut self.b,
            _ => &mut self.a,
        }
    }
}

impl Zero for Colour {
    fn zero() -> Self {
        Colour::clear()
    }

    fn is_zero(&self) -> bool {
        *self == Colour::clear()
    }
}

impl From<Vec4> for Colour {
    fn from(value: Vec4) -> Self {
        Colour::new(value.x, value.y, value.z, value.w)
    }
}
impl From<Colour> for Vec4 {
    fn from(value: Colour) -> Self {
        Vec4::new(value.r, value.g, value.b, value.a)
    }
}
impl From<Colour> for [f32; 4] {
    fn from(value: Colour) -> Self {
        [value.r, value.g, value.b, value.a]
    }
}
impl From<Colour32> for Colour {
    fn from(value: Colour32) -> Self {
        Colour {
            r: f32::from(value.r) / 255.0,
            g: f32::from(value.g) / 255.0,
            b: f32::from(value.b) / 255.0,
            a: f32::from(value.a) / 255.0,
        }
    }
}

impl fmt::Display for Colour {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let p = f.precision().unwrap_or(3);
        write!(
            f,
            "RGBA({0:.1$}, {2:.1$}, {3:.1$}, {4:.1$})",
            self.r, p, self.g, self.b, self.a
        )
    }
}

impl Add<Colour> for Colour {
    type Output = Colour;

    fn add(self, rhs: Colour) -> Self::Output {
        Colour {
            r: self.r + rhs.r,
            g: self.g + rhs.g,
            b: self.b + rhs.b,
            a: self.a + rhs.a,
        }
    }
}
impl AddAssign<Colour> for Colour {
    fn add_assign(&mut self, rhs: Colour) {
        *self = *self + rhs;
    }
}
impl Sub<Colour> for Colour {
    type Output = Colour;

    fn sub(self, rhs: Colour) -> Self::Output {
        Colour {
            r: self.r - rhs.r,
            g: self.g - rhs.g,
            b: self.b - rhs.b,
            a: self.a - rhs.a,
        }
    }
}
impl SubAssign<Colour> for Colour {
    fn sub_assign(&mut self, rhs: Colour) {
        *self = *self - rhs;
    }
}
impl Mul<Colour> for Colour {
    type Output = Colour;

    fn mul(self, rhs: Colour) -> Self::Output {
        Colour {
            r: self.r * rhs.r,
            g: self.g * rhs.g,
            b: self.b * rhs.b,
            a: self.a * rhs.a,
        }
    }
}
impl MulAssign<Colour> for Colour {
    fn mul_assign(&mut self, rhs: Colour) {
        *self = *self * rhs;
    }
}
impl Mul<f32> for Colour {
    type Output = Colour;

    fn mul(self, rhs: f32) -> Self::Output {
        Colour {
            r: self.r * rhs,
            g: self.g * rhs,
            b: self.b * rhs,
            a: self.a * rhs,
        }
    }
}
impl Mul<Colour> for f32 {
    type Output = Colour;

    fn mul(self, rhs: Colour) -> Self::Output {
        rhs * self
    }
}
impl MulAssign<f32> for Colour {
    fn mul_assign(&mut self, rhs: f32) {
        *self = *self * rhs;
    }
}
impl Div<f32> for Colour {
    type Output = Colour;

    fn div(self, rhs: f32) -> Self::Output {
        Colour {
            r: self.r / rhs,
            g: self.g / rhs,
            b: self.b / rhs,
            a: self.a / rhs,
        }
    }
}
impl DivAssign<f32> for Colour {
    fn div_assign(&mut self, rhs: f32) {
        *self = *self / rhs;
    }
}

/// An RGBA colour with byte channels, laid out so that the four bytes alias one `u32`.
///
/// ```
/// use glongge_math::core::prelude::*;
///
/// let c = Colour32::from(Colour::new(1.0, 0.5, 0.0, 1.0));
/// assert_eq!((c.r, c.g, c.b, c.a), (255, 128, 0, 255));
/// assert_eq!(Colour32::from_rgba(c.rgba()), c);
/// ```
#[derive(
    Default,
    Debug,
    Copy,
    Clone,
    PartialEq,
    Eq,
    Hash,
    Pod,
    Zeroable,
    Serialize,
    Deserialize,
    bincode::Encode,
    bincode::Decode,
)]
#[repr(C, align(4))]
pub struct Colour32 {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Colour32 {
    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// The four channels read as one word in memory order, so `r` is the low byte on
    /// little-endian targets.
    pub fn rgba(&self) -> u32 {
        bytemuck::cast(*self)
    }
    pub fn from_rgba(rgba: u32) -> Self {
        bytemuck::cast(rgba)
    }

    pub fn try_get(&self, index: usize) -> Result<u8> {
        match index {
            0 => Ok(self.r),
            1 => Ok(self.g),
            2 => Ok(self.b),
            3 => Ok(self.a),
            _ => bail!("Colour32: index out of range: {index}"),
        }
    }

    /// Interpolates bytes with `t` clamped to [0, 1]. Intermediate values truncate.
    #[must_use]
    pub fn lerp(&self, to: Colour32, t: f32) -> Colour32 {
        self.lerp_unclamped(to, mathf::clamp01(t))
    }
    #[must_use]
    pub fn lerp_unclamped(&self, to: Colour32, t: f32) -> Colour32 {
        #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
        let channel = |a: u8, b: u8| (f32::from(a) + (f32::from(b) - f32::from(a)) * t) as u8;
        Colour32 {
            r: channel(self.r, to.r),
            g: channel(self.g, to.g),
            b: channel(self.b, to.b),
            a: channel(self.a, to.a),
        }
    }
}

impl From<Colour> for Colour32 {
    fn from(value: Colour) -> Self {
        #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
        let to_byte = |c: f32| (mathf::clamp01(c) * 255.0).round_ties_even() as u8;
        Colour32 {
            r: to_byte(value.r),
            g: to_byte(value.g),
            b: to_byte(value.b),
            a: to_byte(value.a),
        }
    }
}

impl Index<usize> for Colour32 {
    type Output = u8;

    fn index(&self, index: usize) -> &Self::Output {
        check_lt!(index, 4);
        match index {
            0 => &self.r,
            1 => &self.g,
            2 => &self.b,
            _ => &self.a,
        }
    }
}
impl IndexMut<usize> for Colour32 {
    fn index_mut(&mut self, index: usize) -> &mut Self::Output {
        check_lt!(index, 4);
        match index {
            0 => &mut self.r,
            1 => &mut self.g,
            2 => &mut self.b,
            _ => &mut self.a,
        }
    }
}

impl fmt::Display for Colour32 {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "RGBA({}, {}, {}, {})", self.r, self.g, self.b, self.a)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{rngs::StdRng, Rng, SeedableRng};

    fn close(a: f32, b: f32) -> bool {
        (a - b).abs() < 1e-4
    }

    #[test]
    fn arithmetic_is_not_clamped() {
        let c = Colour::white() + Colour::white();
        assert_eq!(c, Colour::new(2.0, 2.0, 2.0, 2.0));
        assert_eq!(c / 2.0, Colour::white());
        assert_eq!(Colour::grey() * 2.0, Colour::new(1.0, 1.0, 1.0, 2.0));
        assert_eq!(0.5 * Colour::white(), Colour::new(0.5, 0.5, 0.5, 0.5));
        assert_eq!(Colour::red() * Colour::grey(), Colour::new(0.5, 0.0, 0.0, 1.0));
        assert_eq!(Colour::white() - Colour::red(), Colour::new(0.0, 1.0, 1.0, 0.0));
        assert!(Colour::zero().is_zero());
        assert_eq!(Colour::default(), Colour::clear());
    }

    #[test]
    fn indexing() {
        let mut c = Colour::new(0.1, 0.2, 0.3, 0.4);
        assert_eq!(c[2], 0.3);
        c[3] = 1.0;
        assert_eq!(c.a, 1.0);
        assert_eq!(c.try_get(1).unwrap(), 0.2);
        assert!(c.try_get(4).is_err());

        let c32 = Colour32::new(1, 2, 3, 4);
        assert_eq!(c32[3], 4);
        assert!(c32.try_get(7).is_err());
    }

    #[test]
    #[should_panic]
    fn index_out_of_range() {
        let _ = Colour::white()[4];
    }

    #[test]
    fn lerp_and_helpers() {
        let c = Colour::black().lerp(Colour::white(), 0.25);
        assert_eq!(c, Colour::new(0.25, 0.25, 0.25, 1.0));
        assert_eq!(Colour::black().lerp(Colour::white(), 3.0), Colour::white());
        assert_eq!(
            Colour::black().lerp_unclamped(Colour::white(), 2.0),
            Colour::new(2.0, 2.0, 2.0, 1.0)
        );
        assert!(close(Colour::white().grayscale(), 1.0));
        assert!(close(Colour::red().grayscale(), 0.299));
        assert_eq!(Colour::new(0.2, 0.7, 0.4, 9.0).max_colour_component(), 0.7);
        assert_eq!(Colour::red().with_alpha(0.5).a, 0.5);
    }

    #[test]
    fn linear_gamma_roundtrip() {
        let c = Colour::new(0.5, 0.02, 0.9, 0.3);
        let linear = c.linear();
        assert!(linear.r < c.r);
        assert_eq!(linear.a, c.a);
        let back = linear.gamma();
        assert!(close(back.r, c.r) && close(back.g, c.g) && close(back.b, c.b));
    }

    #[test]
    fn hsv_primaries() {
        assert_eq!(Colour::hsv_to_rgb(0.0, 1.0, 1.0, false), Colour::red());
        assert_eq!(Colour::hsv_to_rgb(1.0 / 3.0, 1.0, 1.0, false), Colour::green());
        assert_eq!(Colour::hsv_to_rgb(2.0 / 3.0, 1.0, 1.0, false), Colour::blue());
        assert_eq!(Colour::hsv_to_rgb(0.5, 0.0, 0.3, false), Colour::rgb(0.3, 0.3, 0.3));
        assert_eq!(Colour::hsv_to_rgb(0.5, 1.0, 0.0, false), Colour::black());

        let (h, s, v) = Colour::rgb_to_hsv(Colour::hsv_to_rgb(0.0, 1.0, 1.0, false));
        assert!(close(h, 0.0) && close(s, 1.0) && close(v, 1.0));
        let (h, s, v) = Colour::rgb_to_hsv(Colour::blue());
        assert!(close(h, 2.0 / 3.0) && close(s, 1.0) && close(v, 1.0));
        assert_eq!(Colour::rgb_to_hsv(Colour::black()), (0.0, 0.0, 0.0));
    }

    #[test]
    fn hsv_hue_wraps() {
        assert_eq!(Colour::hsv_to_rgb(2.0, 1.0, 1.0, false), Colour::red());
        assert_eq!(Colour::hsv_to_rgb(1.5, 1.0, 1.0, false), Colour::cyan());
        assert_eq!(Colour::hsv_to_rgb(-0.5, 1.0, 1.0, false), Colour::cyan());
        assert_eq!(
            Colour::hsv_to_rgb(-1.0 / 6.0, 1.0, 1.0, false),
            Colour::magenta()
        );
        assert_eq!(
            Colour::hsv_to_rgb(1.0 + 2.0 / 3.0, 1.0, 1.0, false),
            Colour::blue()
        );
    }

    #[test]
    fn hsv_tie_break_order() {
        // Blue only wins when strictly greatest; green beats red only when strictly greater.
        let (h, _, _) = Colour::rgb_to_hsv(Colour::rgb(1.0, 0.0, 1.0));
        assert!(close(h, 5.0 / 6.0));
        let (h, _, _) = Colour::rgb_to_hsv(Colour::rgb(1.0, 1.0, 0.0));
        assert!(close(h, 1.0 / 6.0));
        let (h, s, v) = Colour::rgb_to_hsv(Colour::grey());
        assert_eq!((h, s, v), (0.0, 0.0, 0.5));
    }

    #[test]
    fn hsv_hdr() {
        let clamped = Colour::hsv_to_rgb(0.0, 0.5, 2.0, false);
        assert_eq!(clamped, Colour::rgb(1.0, 1.0, 1.0));
        let hdr = Colour::hsv_to_rgb(0.0, 0.5, 2.0, true);
        assert_eq!(hdr, Colour::rgb(2.0, 1.0, 1.0));
    }

    #[test]
    fn hsv_roundtrip() {
        let mut rng = StdRng::seed_from_u64(0x00c0_1000);
        for _ in 0..200 {
            let c = Colour::rgb(rng.gen(), rng.gen(), rng.gen());
            let (h, s, v) = Colour::rgb_to_hsv(c);
            let back = Colour::hsv_to_rgb(h, s, v, false);
            assert!(
                close(back.r, c.r) && close(back.g, c.g) && close(back.b, c.b),
                "{c} -> ({h}, {s}, {v}) -> {back}"
            );
        }
    }

    #[test]
    fn colour32_conversion() {
        let c = Colour::new(0.5, 0.5, 0.5, 1.0);
        let c32 = Colour32::from(c);
        assert_eq!(c32, Colour32::new(128, 128, 128, 255));
        let back = Colour::from(c32);
        assert!((back.r - c.r).abs() <= 1.0 / 255.0);
        assert_eq!(back.a, 1.0);

        let clamped = Colour32::from(Colour::new(-1.0, 2.0, 0.0, 1.0));
        assert_eq!(clamped, Colour32::new(0, 255, 0, 255));
    }

    #[test]
    fn colour32_aliases_word() {
        let c = Colour32::new(0x11, 0x22, 0x33, 0x44);
        assert_eq!(c.rgba().to_ne_bytes(), [0x11, 0x22, 0x33, 0x44]);
        assert_eq!(Colour32::from_rgba(c.rgba()), c);
        assert_eq!(std::mem::align_of::<Colour32>(), 4);
    }

    #[test]
    fn colour32_lerp_truncates() {
        let a = Colour32::new(0, 0, 0, 0);
        let b = Colour32::new(255, 10, 3, 255);
        assert_eq!(a.lerp(b, 0.5), Colour32::new(127, 5, 1, 127));
        assert_eq!(a.lerp(b, 5.0), b);
        assert_eq!(format!("{}", b), "RGBA(255, 10, 3, 255)");
    }

    #[test]
    fn display() {
        assert_eq!(format!("{}", Colour::red()), "RGBA(1.000, 0.000, 0.000, 1.000)");
        assert_eq!(format!("{:.1}", Colour::grey()), "RGBA(0.5, 0.5, 0.5, 1.0)");
    }
}
