//! Scalar helpers shared by every value type in the crate.
//!
//! Everything here is total: no function panics, and NaN or infinite inputs flow through
//! ordinary IEEE-754 arithmetic.
use crate::core::config::{
    DEFAULT_COLOUR_SPACE_CURVE, DEG_TO_RAD, MIN_POSITIVE_SUBNORMAL, RAD_TO_DEG,
    SMOOTH_DAMP_MIN_TIME,
};
use half::f16;
use serde::{Deserialize, Serialize};

/// The transfer curve used by [`gamma_to_linear_space`] and [`linear_to_gamma_space`].
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub enum ColourSpaceCurve {
    /// Piecewise sRGB curve. Values at or above 1 (HDR) use a plain 2.2 power.
    #[default]
    Srgb,
    /// `pow(c, 2.2)` in both directions, the cheap approximation.
    Power22,
}

/// Clamps `value` between `min` and `max`.
///
/// Unlike [`f32::clamp`], this never panics: if `min > max` the lower bound wins for values
/// below it and the upper bound for values above it.
pub fn clamp(value: f32, min: f32, max: f32) -> f32 {
    if value < min {
        min
    } else if value > max {
        max
    } else {
        value
    }
}

pub fn clamp_int(value: i32, min: i32, max: i32) -> i32 {
    if value < min {
        min
    } else if value > max {
        max
    } else {
        value
    }
}

pub fn clamp01(value: f32) -> f32 {
    clamp(value, 0.0, 1.0)
}

/// A linear interpolation between two values, with `t` clamped to [0, 1].
///
/// # Examples
/// ```
/// use glongge_math::core::prelude::*;
/// assert_eq!(mathf::lerp(0.0, 10.0, 0.5), 5.0);
/// assert_eq!(mathf::lerp(0.0, 10.0, 2.0), 10.0);
/// assert_eq!(mathf::lerp_unclamped(0.0, 10.0, 2.0), 20.0);
/// ```
pub fn lerp(a: f32, b: f32, t: f32) -> f32 {
    a + (b - a) * clamp01(t)
}

pub fn lerp_unclamped(a: f32, b: f32, t: f32) -> f32 {
    a + (b - a) * t
}

/// Returns where `value` lies between `a` and `b`, clamped to [0, 1]. Returns 0 if `a == b`.
pub fn inverse_lerp(a: f32, b: f32, value: f32) -> f32 {
    if a == b {
        0.0
    } else {
        clamp01((value - a) / (b - a))
    }
}

/// Like [`lerp`], but interpolates along the shortest arc when the values are angles in
/// degrees.
pub fn lerp_angle(a: f32, b: f32, t: f32) -> f32 {
    let mut delta = repeat(b - a, 360.0);
    if delta > 180.0 {
        delta -= 360.0;
    }
    a + delta * clamp01(t)
}

/// Loops `t` so that it is never larger than `length` and never smaller than 0.
pub fn repeat(t: f32, length: f32) -> f32 {
    clamp(t - (t / length).floor() * length, 0.0, length)
}

/// Bounces `t` back and forth between 0 and `length`.
pub fn ping_pong(t: f32, length: f32) -> f32 {
    let t = repeat(t, length * 2.0);
    length - (t - length).abs()
}

/// The shortest signed difference between two angles in degrees, in (-180, 180].
pub fn delta_angle(current: f32, target: f32) -> f32 {
    let mut delta = repeat(target - current, 360.0);
    if delta > 180.0 {
        delta -= 360.0;
    }
    delta
}

pub fn move_towards(current: f32, target: f32, max_delta: f32) -> f32 {
    if (target - current).abs() <= max_delta {
        target
    } else {
        current + sign(target - current) * max_delta
    }
}

pub fn move_towards_angle(current: f32, target: f32, max_delta: f32) -> f32 {
    let delta = delta_angle(current, target);
    if -max_delta < delta && delta < max_delta {
        return target;
    }
    move_towards(current, current + delta, max_delta)
}

/// Hermite interpolation between `from` and `to` with `t` clamped to [0, 1].
pub fn smooth_step(from: f32, to: f32, t: f32) -> f32 {
    let t = clamp01(t);
    let t = -2.0 * t * t * t + 3.0 * t * t;
    to * t + from * (1.0 - t)
}

/// Applies a power curve to `value / absmax`, preserving sign. Values beyond `absmax` pass
/// through unchanged.
pub fn gamma(value: f32, absmax: f32, gamma: f32) -> f32 {
    let negative = value < 0.0;
    let absval = value.abs();
    if absval > absmax {
        return if negative { -absval } else { absval };
    }
    let result = (absval / absmax).powf(gamma) * absmax;
    if negative {
        -result
    } else {
        result
    }
}

/// Compares two floats with a tolerance relative to their magnitude.
pub fn approximately(a: f32, b: f32) -> bool {
    (b - a).abs() < f32::max(1e-6 * f32::max(a.abs(), b.abs()), MIN_POSITIVE_SUBNORMAL * 8.0)
}

/// Returns 1 for zero and positive values, -1 otherwise.
pub fn sign(f: f32) -> f32 {
    if f >= 0.0 {
        1.0
    } else {
        -1.0
    }
}

/// Gradually moves `current` towards `target` using a critically damped spring.
///
/// `velocity` is owned by the caller and must be passed back in on every call. `smooth_time`
/// is roughly the time to reach the target and is floored at
/// [`SMOOTH_DAMP_MIN_TIME`](crate::core::config::SMOOTH_DAMP_MIN_TIME). A step that would
/// carry `current` past a target it is moving towards snaps to `target` and zeroes `velocity`.
/// Starting exactly at `target` is not moving towards it, so leftover velocity still applies.
pub fn smooth_damp(
    current: f32,
    target: f32,
    velocity: &mut f32,
    smooth_time: f32,
    max_speed: f32,
    delta_time: f32,
) -> f32 {
    // Game Programming Gems 4, ch. 1.10.
    let smooth_time = smooth_time.max(SMOOTH_DAMP_MIN_TIME);
    let omega = 2.0 / smooth_time;
    let x = omega * delta_time;
    let exp = 1.0 / (1.0 + x + 0.48 * x * x + 0.235 * x * x * x);

    let original_to = target;
    let max_change = max_speed * smooth_time;
    let change = clamp(current - target, -max_change, max_change);
    let target = current - change;

    let temp = (*velocity + omega * change) * delta_time;
    *velocity = (*velocity - omega * temp) * exp;
    let mut output = target + (change + temp) * exp;

    if (original_to - current > 0.0) == (output > original_to) {
        output = original_to;
        *velocity = 0.0;
    }
    output
}

pub fn smooth_damp_angle(
    current: f32,
    target: f32,
    velocity: &mut f32,
    smooth_time: f32,
    max_speed: f32,
    delta_time: f32,
) -> f32 {
    let target = current + delta_angle(current, target);
    smooth_damp(current, target, velocity, smooth_time, max_speed, delta_time)
}

// Negative inputs are treated as their two's-complement u32 bit pattern.
#[allow(clippy::cast_sign_loss, clippy::cast_possible_wrap)]
pub fn next_power_of_two(value: i32) -> i32 {
    let mut v = (value as u32).wrapping_sub(1);
    v |= v >> 16;
    v |= v >> 8;
    v |= v >> 4;
    v |= v >> 2;
    v |= v >> 1;
    v.wrapping_add(1) as i32
}

/// Returns whichever of the neighbouring powers of two is nearer to `value`, preferring the
/// larger on a tie. Works on the `u32` bit pattern like [`next_power_of_two`], so values above
/// 2^30 may round up to `i32::MIN` (bit pattern 2^31).
#[allow(clippy::cast_sign_loss, clippy::cast_possible_wrap)]
pub fn closest_power_of_two(value: i32) -> i32 {
    let v = value as u32;
    let next = next_power_of_two(value) as u32;
    let prev = next >> 1;
    if v.wrapping_sub(prev) < next.wrapping_sub(v) {
        prev as i32
    } else {
        next as i32
    }
}

#[allow(clippy::cast_sign_loss)]
pub fn is_power_of_two(value: i32) -> bool {
    let v = value as u32;
    v & v.wrapping_sub(1) == 0
}

/// Rounds to the nearest integer, ties to even. Out-of-range values saturate.
#[allow(clippy::cast_possible_truncation)]
pub fn round_to_int(f: f32) -> i32 {
    f.round_ties_even() as i32
}

#[allow(clippy::cast_possible_truncation)]
pub fn floor_to_int(f: f32) -> i32 {
    f.floor() as i32
}

#[allow(clippy::cast_possible_truncation)]
pub fn ceil_to_int(f: f32) -> i32 {
    f.ceil() as i32
}

pub fn deg_to_rad(degrees: f32) -> f32 {
    degrees * DEG_TO_RAD
}

pub fn rad_to_deg(radians: f32) -> f32 {
    radians * RAD_TO_DEG
}

pub fn gamma_to_linear_space(value: f32) -> f32 {
    gamma_to_linear_space_with(DEFAULT_COLOUR_SPACE_CURVE, value)
}

pub fn linear_to_gamma_space(value: f32) -> f32 {
    linear_to_gamma_space_with(DEFAULT_COLOUR_SPACE_CURVE, value)
}

pub fn gamma_to_linear_space_with(curve: ColourSpaceCurve, value: f32) -> f32 {
    match curve {
        ColourSpaceCurve::Srgb => {
            if value <= 0.04045 {
                value / 12.92
            } else if value < 1.0 {
                ((value + 0.055) / 1.055).powf(2.4)
            } else {
                value.powf(2.2)
            }
        }
        ColourSpaceCurve::Power22 => value.powf(2.2),
    }
}

pub fn linear_to_gamma_space_with(curve: ColourSpaceCurve, value: f32) -> f32 {
    match curve {
        ColourSpaceCurve::Srgb => {
            if value <= 0.0 {
                0.0
            } else if value <= 0.003_130_8 {
                value * 12.92
            } else if value < 1.0 {
                1.055 * value.powf(1.0 / 2.4) - 0.055
            } else {
                value.powf(1.0 / 2.2)
            }
        }
        ColourSpaceCurve::Power22 => value.powf(1.0 / 2.2),
    }
}

/// Encodes `value` as an IEEE-754 binary16, returning the raw bits.
pub fn float_to_half(value: f32) -> u16 {
    f16::from_f32(value).to_bits()
}

pub fn half_to_float(value: u16) -> f32 {
    f16::from_bits(value).to_f32()
}
