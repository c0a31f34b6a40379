#[allow(unused_imports)]
use crate::core::prelude::*;

use crate::util::gg_float;
use blake3::Hasher;
use bytemuck::Pod;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fmt::Formatter;

/// A 128-bit content hash, e.g. for identifying assets or deduplicating geometry.
///
/// Values are built by folding inputs in with the `append_*` methods; each step hashes the
/// current value followed by the new bytes with BLAKE3 and keeps the first 128 bits. The
/// all-zero value is the starting point and is not [valid](Hash128::is_valid).
///
/// ```
/// use glongge_math::core::prelude::*;
///
/// let h = Hash128::default().append_str("mesh").append_i32(3);
/// assert!(h.is_valid());
/// assert_eq!(Hash128::parse(&h.to_string()).unwrap(), h);
/// ```
#[derive(
    Default,
    Debug,
    Copy,
    Clone,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    bincode::Encode,
    bincode::Decode,
)]
pub struct Hash128 {
    pub u64_0: u64,
    pub u64_1: u64,
}

impl Hash128 {
    pub const fn new(u64_0: u64, u64_1: u64) -> Self {
        Self { u64_0, u64_1 }
    }
    pub const fn from_u32s(u0: u32, u1: u32, u2: u32, u3: u32) -> Self {
        Self {
            u64_0: ((u1 as u64) << 32) | u0 as u64,
            u64_1: ((u3 as u64) << 32) | u2 as u64,
        }
    }

    pub fn is_valid(&self) -> bool {
        self.u64_0 != 0 || self.u64_1 != 0
    }

    pub fn to_bytes(&self) -> [u8; 16] {
        let mut rv = [0; 16];
        rv[..8].copy_from_slice(&self.u64_0.to_le_bytes());
        rv[8..].copy_from_slice(&self.u64_1.to_le_bytes());
        rv
    }
    pub fn from_bytes(bytes: [u8; 16]) -> Self {
        let mut lo = [0; 8];
        let mut hi = [0; 8];
        lo.copy_from_slice(&bytes[..8]);
        hi.copy_from_slice(&bytes[8..]);
        Self {
            u64_0: u64::from_le_bytes(lo),
            u64_1: u64::from_le_bytes(hi),
        }
    }

    /// Parses up to 32 hex digits. Shorter input is padded with zeros on the right, so a
    /// prefix of a hash's string form parses to the hash with its trailing bytes cleared.
    pub fn parse(s: &str) -> Result<Hash128> {
        if s.len() > 32 {
            bail!("Hash128: too long ({} chars): {s:?}", s.len());
        }
        let padded = format!("{s:0<32}");
        let mut bytes = [0; 16];
        hex::decode_to_slice(&padded, &mut bytes)
            .with_context(|| format!("Hash128: invalid hex: {s:?}"))?;
        Ok(Self::from_bytes(bytes))
    }

    pub fn compute(bytes: &[u8]) -> Hash128 {
        Hash128::default().append_bytes(bytes)
    }

    #[must_use]
    pub fn append_bytes(self, bytes: &[u8]) -> Hash128 {
        let mut hasher = Hasher::new();
        hasher.update(&self.to_bytes());
        hasher.update(bytes);
        let digest = hasher.finalize();
        let mut truncated = [0; 16];
        truncated.copy_from_slice(&digest.as_bytes()[..16]);
        Self::from_bytes(truncated)
    }
    #[must_use]
    pub fn append_str(self, s: &str) -> Hash128 {
        self.append_bytes(s.as_bytes())
    }
    #[must_use]
    pub fn append_i32(self, value: i32) -> Hash128 {
        self.append_bytes(&value.to_le_bytes())
    }
    #[must_use]
    pub fn append_u32(self, value: u32) -> Hash128 {
        self.append_bytes(&value.to_le_bytes())
    }
    #[must_use]
    pub fn append_f32(self, value: f32) -> Hash128 {
        self.append_bytes(&value.to_le_bytes())
    }
    #[must_use]
    pub fn append_hash(self, other: Hash128) -> Hash128 {
        self.append_bytes(&other.to_bytes())
    }
    /// Hashes the raw memory of `values`.
    #[must_use]
    pub fn append_pod_slice<T: Pod>(self, values: &[T]) -> Hash128 {
        self.append_bytes(bytemuck::cast_slice(values))
    }

    #[must_use]
    pub fn append_quantised_f32(self, value: f32) -> Hash128 {
        self.append_i32(quantise(value))
    }
    #[must_use]
    pub fn append_quantised_vec3(self, value: Vec3) -> Hash128 {
        self.append_pod_slice(&[quantise(value.x), quantise(value.y), quantise(value.z)])
    }
    #[must_use]
    pub fn append_quantised_mat4x4(self, value: &Mat4x4) -> Hash128 {
        self.append_pod_slice(&value.to_cols_array().map(quantise))
    }
}

fn quantise(value: f32) -> i32 {
    let scaled = (value * HASH_QUANTISATION_SCALE).round();
    gg_float::f32_to_i32(scaled).unwrap_or_else(|e| {
        warn!("quantising for hash: {e}");
        // Saturates, and maps NaN to 0.
        #[allow(clippy::cast_possible_truncation)]
        let saturated = scaled as i32;
        saturated
    })
}

impl fmt::Display for Hash128 {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}", hex::encode(self.to_bytes()))
    }
}
