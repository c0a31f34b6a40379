pub mod assert;
pub mod bounds;
pub mod colour;
pub mod geometry;
pub mod hash128;
pub mod linalg;
pub mod log;
pub mod mathf;
pub mod plane;
pub mod rect;

pub mod gg_float {
    use anyhow::{bail, Result};
    use num_traits::Zero;

    pub fn f32_to_i32(x: f32) -> Result<i32> {
        if !(x >= i32::MIN as f32 && x < i32::MAX as f32) {
            bail!("{x} does not fit in range of i32");
        }
        #[allow(clippy::cast_possible_truncation)]
        Ok(x as i32)
    }

    pub fn force_positive_zero(x: f32) -> f32 {
        if x.is_zero() {
            0.0
        } else {
            x
        }
    }

}
