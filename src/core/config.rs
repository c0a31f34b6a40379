use crate::util::mathf::ColourSpaceCurve;

// Vector equality and normalisation threshold. Equality compares squared distance against
// EPSILON * EPSILON.
pub const EPSILON: f32 = 1e-5;
pub const EPSILON_SQUARED: f32 = EPSILON * EPSILON;
pub const EPSILON_NORMAL_SQRT: f32 = 1e-15;
pub const QUATERNION_EPSILON: f32 = 1e-6;
/// Smallest positive subnormal `f32`.
pub const MIN_POSITIVE_SUBNORMAL: f32 = 1.401_298_5e-45;

pub const DEG_TO_RAD: f32 = std::f32::consts::PI / 180.0;
pub const RAD_TO_DEG: f32 = 180.0 / std::f32::consts::PI;

pub const SMOOTH_DAMP_MIN_TIME: f32 = 1e-4;
pub const HASH_QUANTISATION_SCALE: f32 = 1000.0;
pub const DEFAULT_COLOUR_SPACE_CURVE: ColourSpaceCurve = ColourSpaceCurve::Srgb;
