#[allow(unused_imports)]
pub use itertools::Itertools;
#[allow(unused_imports)]
pub use num_traits;

#[allow(unused_imports)]
pub use anyhow::{anyhow, bail, Context, Result};
#[allow(unused_imports)]
pub use tracing::{error, info, warn};

#[allow(unused_imports)]
pub use crate::{
    core::config::*,
    util::{
        bounds::{Bounds, BoundsInt, BoundingSphere},
        colour::{Colour, Colour32},
        geometry,
        hash128::Hash128,
        linalg,
        linalg::{FrustumPlanes, Mat4x4, Quaternion, Vec2, Vec2i, Vec3, Vec3i, Vec4},
        mathf,
        plane::{Plane, Ray},
        rect::{Rect, RectInt},
    },
};
