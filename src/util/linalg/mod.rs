//! Vectors, quaternions and matrices.
//!
//! World space is left-handed with `y` up and `z` forward. Angles are in degrees unless a
//! function says otherwise.

mod matrix;
mod quaternion;
mod vec2;
mod vec3;
mod vec4;
mod vec_int;

pub use matrix::{FrustumPlanes, Mat4x4};
pub use quaternion::Quaternion;
pub use vec2::Vec2;
pub use vec3::Vec3;
pub use vec4::Vec4;
pub use vec_int::{Vec2i, Vec3i};
