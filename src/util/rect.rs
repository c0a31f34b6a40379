#[allow(unused_imports)]
use crate::core::prelude::*;

use itertools::iproduct;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fmt::Formatter;

/// A 2D rectangle stored as a corner `(x, y)` and a size.
///
/// The edge accessors are raw: `x_min()` is always `x` and `x_max()` is always `x + width`, so a
/// rectangle with negative width has `x_max() < x_min()`. Setting a minimum edge keeps the
/// opposite edge fixed, which can turn the size negative; nothing normalises it.
///
/// ```
/// use glongge_math::core::prelude::*;
///
/// let mut r = Rect::new(0.0, 0.0, 10.0, 5.0);
/// r.set_x_min(12.0);
/// assert_eq!(r.x_max(), 10.0);
/// assert_eq!(r.width, -2.0);
/// ```
#[derive(
    Default, Debug, Copy, Clone, PartialEq, Serialize, Deserialize, bincode::Encode, bincode::Decode,
)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }
    pub fn from_position_size(position: Vec2, size: Vec2) -> Self {
        Self::new(position.x, position.y, size.x, size.y)
    }
    pub fn min_max_rect(x_min: f32, y_min: f32, x_max: f32, y_max: f32) -> Self {
        Self::new(x_min, y_min, x_max - x_min, y_max - y_min)
    }
    pub fn zero() -> Self {
        Self::default()
    }

    pub fn x_min(&self) -> f32 {
        self.x
    }
    pub fn set_x_min(&mut self, value: f32) {
        let x_max = self.x_max();
        self.x = value;
        self.width = x_max - self.x;
    }
    pub fn y_min(&self) -> f32 {
        self.y
    }
    pub fn set_y_min(&mut self, value: f32) {
        let y_max = self.y_max();
        self.y = value;
        self.height = y_max - self.y;
    }
    pub fn x_max(&self) -> f32 {
        self.x + self.width
    }
    pub fn set_x_max(&mut self, value: f32) {
        self.width = value - self.x;
    }
    pub fn y_max(&self) -> f32 {
        self.y + self.height
    }
    pub fn set_y_max(&mut self, value: f32) {
        self.height = value - self.y;
    }

    pub fn position(&self) -> Vec2 {
        Vec2 {
            x: self.x,
            y: self.y,
        }
    }
    pub fn set_position(&mut self, position: Vec2) {
        self.x = position.x;
        self.y = position.y;
    }
    pub fn size(&self) -> Vec2 {
        Vec2 {
            x: self.width,
            y: self.height,
        }
    }
    pub fn set_size(&mut self, size: Vec2) {
        self.width = size.x;
        self.height = size.y;
    }
    pub fn centre(&self) -> Vec2 {
        Vec2 {
            x: self.x + self.width / 2.0,
            y: self.y + self.height / 2.0,
        }
    }
    pub fn set_centre(&mut self, centre: Vec2) {
        self.x = centre.x - self.width / 2.0;
        self.y = centre.y - self.height / 2.0;
    }
    pub fn min(&self) -> Vec2 {
        Vec2 {
            x: self.x_min(),
            y: self.y_min(),
        }
    }
    pub fn set_min(&mut self, min: Vec2) {
        self.set_x_min(min.x);
        self.set_y_min(min.y);
    }
    pub fn max(&self) -> Vec2 {
        Vec2 {
            x: self.x_max(),
            y: self.y_max(),
        }
    }
    pub fn set_max(&mut self, max: Vec2) {
        self.set_x_max(max.x);
        self.set_y_max(max.y);
    }

    /// Half-open containment: the minimum edges are inside, the maximum edges are not.
    pub fn contains(&self, point: Vec2) -> bool {
        point.x >= self.x_min()
            && point.x < self.x_max()
            && point.y >= self.y_min()
            && point.y < self.y_max()
    }

    /// Like [`contains`](Rect::contains), but if `allow_inverse` is set an axis with negative
    /// size is tested with its edges swapped.
    pub fn contains_allow_inverse(&self, point: Vec2, allow_inverse: bool) -> bool {
        if !allow_inverse {
            return self.contains(point);
        }
        let x_inside = (self.width < 0.0 && point.x <= self.x_min() && point.x > self.x_max())
            || (self.width >= 0.0 && point.x >= self.x_min() && point.x < self.x_max());
        let y_inside = (self.height < 0.0 && point.y <= self.y_min() && point.y > self.y_max())
            || (self.height >= 0.0 && point.y >= self.y_min() && point.y < self.y_max());
        x_inside && y_inside
    }

    /// Strict overlap test: rectangles that only share an edge do not overlap.
    pub fn overlaps(&self, other: &Rect) -> bool {
        other.x_max() > self.x_min()
            && other.x_min() < self.x_max()
            && other.y_max() > self.y_min()
            && other.y_min() < self.y_max()
    }

    pub fn overlaps_allow_inverse(&self, other: &Rect, allow_inverse: bool) -> bool {
        if allow_inverse {
            self.order_min_max().overlaps(&other.order_min_max())
        } else {
            self.overlaps(other)
        }
    }

    // Swaps edges so that the size is non-negative.
    fn order_min_max(&self) -> Rect {
        let mut rv = *self;
        if rv.x_min() > rv.x_max() {
            let x_min = rv.x_min();
            rv.set_x_min(rv.x_max());
            rv.set_x_max(x_min);
        }
        if rv.y_min() > rv.y_max() {
            let y_min = rv.y_min();
            rv.set_y_min(rv.y_max());
            rv.set_y_max(y_min);
        }
        rv
    }

    /// Maps normalised coordinates (clamped to [0, 1]) to a point inside the rectangle.
    pub fn normalised_to_point(&self, normalised: Vec2) -> Vec2 {
        Vec2 {
            x: mathf::lerp(self.x_min(), self.x_max(), normalised.x),
            y: mathf::lerp(self.y_min(), self.y_max(), normalised.y),
        }
    }

    /// Maps a point to normalised coordinates, clamped to [0, 1].
    pub fn point_to_normalised(&self, point: Vec2) -> Vec2 {
        Vec2 {
            x: mathf::inverse_lerp(self.x_min(), self.x_max(), point.x),
            y: mathf::inverse_lerp(self.y_min(), self.y_max(), point.y),
        }
    }
}

impl fmt::Display for Rect {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Rect[x={}, y={}, width={}, height={}]",
            self.x, self.y, self.width, self.height
        )
    }
}

impl From<RectInt> for Rect {
    fn from(value: RectInt) -> Self {
        Rect::new(
            value.x as f32,
            value.y as f32,
            value.width as f32,
            value.height as f32,
        )
    }
}

/// A rectangle of integer coordinates, e.g. a region of pixels or tiles.
///
/// Unlike [`Rect`], the edge accessors are normalised: `x_min()` is the smaller of `x` and
/// `x + width`.
#[derive(
    Default,
    Debug,
    Copy,
    Clone,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    bincode::Encode,
    bincode::Decode,
)]
pub struct RectInt {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
}

impl RectInt {
    pub fn new(x: i32, y: i32, width: i32, height: i32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }
    pub fn from_position_size(position: Vec2i, size: Vec2i) -> Self {
        Self::new(position.x, position.y, size.x, size.y)
    }

    pub fn x_min(&self) -> i32 {
        self.x.min(self.x + self.width)
    }
    pub fn set_x_min(&mut self, value: i32) {
        let x_max = self.x_max();
        self.x = value;
        self.width = x_max - self.x;
    }
    pub fn y_min(&self) -> i32 {
        self.y.min(self.y + self.height)
    }
    pub fn set_y_min(&mut self, value: i32) {
        let y_max = self.y_max();
        self.y = value;
        self.height = y_max - self.y;
    }
    pub fn x_max(&self) -> i32 {
        self.x.max(self.x + self.width)
    }
    pub fn set_x_max(&mut self, value: i32) {
        self.x = self.x_min();
        self.width = value - self.x;
    }
    pub fn y_max(&self) -> i32 {
        self.y.max(self.y + self.height)
    }
    pub fn set_y_max(&mut self, value: i32) {
        self.y = self.y_min();
        self.height = value - self.y;
    }

    pub fn position(&self) -> Vec2i {
        Vec2i {
            x: self.x,
            y: self.y,
        }
    }
    pub fn size(&self) -> Vec2i {
        Vec2i {
            x: self.width,
            y: self.height,
        }
    }
    pub fn min(&self) -> Vec2i {
        Vec2i {
            x: self.x_min(),
            y: self.y_min(),
        }
    }
    pub fn max(&self) -> Vec2i {
        Vec2i {
            x: self.x_max(),
            y: self.y_max(),
        }
    }
    pub fn centre(&self) -> Vec2 {
        Vec2 {
            x: self.x as f32 + self.width as f32 / 2.0,
            y: self.y as f32 + self.height as f32 / 2.0,
        }
    }

    pub fn set_min_max(&mut self, min: Vec2i, max: Vec2i) {
        self.x = min.x;
        self.y = min.y;
        self.width = max.x - min.x;
        self.height = max.y - min.y;
    }

    /// Shrinks this rectangle so that it lies within `bounds`.
    pub fn clamp_to_bounds(&mut self, bounds: &RectInt) {
        let position = self.position().component_clamp(bounds.min(), bounds.max());
        let size = self.size().component_min(bounds.max() - position);
        *self = RectInt::from_position_size(position, size);
    }

    /// Half-open containment, as for [`Rect::contains`].
    pub fn contains(&self, point: Vec2i) -> bool {
        point.x >= self.x_min()
            && point.y >= self.y_min()
            && point.x < self.x_max()
            && point.y < self.y_max()
    }

    pub fn overlaps(&self, other: &RectInt) -> bool {
        other.x_min() < self.x_max()
            && other.x_max() > self.x_min()
            && other.y_min() < self.y_max()
            && other.y_max() > self.y_min()
    }

    /// Iterates over every contained position, `x` fastest.
    pub fn all_positions_within(&self) -> impl Iterator<Item = Vec2i> {
        let (min, max) = (self.min(), self.max());
        iproduct!(min.y..max.y, min.x..max.x).map(|(y, x)| Vec2i { x, y })
    }
}

impl fmt::Display for RectInt {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "RectInt[x={}, y={}, width={}, height={}]",
            self.x, self.y, self.width, self.height
        )
    }
}
