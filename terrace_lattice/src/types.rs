// Copyright 2025 the Terrace Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Primitive integer geometry types and helpers.

use core::fmt;

/// A point on the integer lattice.
///
/// Points order lexicographically on `(x, y)`, which is the ordering boundary
/// segments are deduplicated and tie-broken with.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LatticePoint {
    /// Horizontal coordinate.
    pub x: i32,
    /// Vertical coordinate (grows downward).
    pub y: i32,
}

impl LatticePoint {
    /// The origin.
    pub const ORIGIN: Self = Self::new(0, 0);

    /// Create a new point.
    #[inline(always)]
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Return this point moved by `(dx, dy)`.
    #[inline]
    pub const fn offset(self, dx: i32, dy: i32) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
        }
    }
}

impl fmt::Display for LatticePoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

impl From<(i32, i32)> for LatticePoint {
    #[inline]
    fn from((x, y): (i32, i32)) -> Self {
        Self::new(x, y)
    }
}

impl From<LatticePoint> for kurbo::Point {
    #[inline]
    fn from(p: LatticePoint) -> Self {
        Self::new(f64::from(p.x), f64::from(p.y))
    }
}

/// A width/height pair on the integer lattice.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LatticeSize {
    /// Extent along x.
    pub width: i32,
    /// Extent along y.
    pub height: i32,
}

impl LatticeSize {
    /// Create a new size.
    #[inline(always)]
    pub const fn new(width: i32, height: i32) -> Self {
        Self { width, height }
    }

    /// A size with the same extent on both axes.
    #[inline]
    pub const fn splat(v: i32) -> Self {
        Self::new(v, v)
    }

    /// Whether either extent is zero or negative.
    #[inline]
    pub const fn is_empty(&self) -> bool {
        self.width <= 0 || self.height <= 0
    }

    /// Whether both extents are at most those of `bound`.
    #[inline]
    pub const fn fits_within(&self, bound: Self) -> bool {
        self.width <= bound.width && self.height <= bound.height
    }

    /// Area in a widened accumulator, zero for empty sizes.
    #[inline]
    pub fn area(&self) -> i64 {
        if self.is_empty() {
            return 0;
        }
        i64::from(self.width) * i64::from(self.height)
    }
}

impl From<(i32, i32)> for LatticeSize {
    #[inline]
    fn from((width, height): (i32, i32)) -> Self {
        Self::new(width, height)
    }
}

/// An axis-aligned rectangle on the integer lattice.
///
/// The rectangle covers the half-open ranges `[min.x, min.x + width)` and
/// `[min.y, min.y + height)`. Two rectangles that share an edge therefore
/// never both contain a point on that edge.
///
/// [`contains`](Self::contains) and [`overlaps`](Self::overlaps) work in a
/// widened range and accept any rectangle. [`max`](Self::max) and the split
/// methods return lattice points, so they require `min + size` to fit in `i32`.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LatticeRect {
    /// Top-left corner.
    pub min: LatticePoint,
    /// Extent.
    pub size: LatticeSize,
}

impl LatticeRect {
    /// Create a rectangle from its top-left corner and size.
    #[inline(always)]
    pub const fn new(min: LatticePoint, size: LatticeSize) -> Self {
        Self { min, size }
    }

    /// Create a rectangle from origin and size components.
    #[inline]
    pub const fn from_xywh(x: i32, y: i32, width: i32, height: i32) -> Self {
        Self::new(LatticePoint::new(x, y), LatticeSize::new(width, height))
    }

    /// Width of the rectangle.
    #[inline]
    pub const fn width(&self) -> i32 {
        self.size.width
    }

    /// Height of the rectangle.
    #[inline]
    pub const fn height(&self) -> i32 {
        self.size.height
    }

    /// Exclusive bottom-right corner.
    ///
    /// Overflows if `min + size` leaves the `i32` range.
    #[inline]
    pub const fn max(&self) -> LatticePoint {
        self.min.offset(self.size.width, self.size.height)
    }

    /// Return true if the rectangle has no area.
    #[inline]
    pub const fn is_empty(&self) -> bool {
        self.size.is_empty()
    }

    /// Area in a widened accumulator.
    #[inline]
    pub fn area(&self) -> i64 {
        self.size.area()
    }

    /// Whether the point lies inside the half-open rectangle.
    #[inline]
    pub const fn contains(&self, p: LatticePoint) -> bool {
        self.min.x <= p.x
            && (p.x as i64) < end(self.min.x, self.size.width)
            && self.min.y <= p.y
            && (p.y as i64) < end(self.min.y, self.size.height)
    }

    /// Whether the two rectangles share any interior cell.
    #[inline]
    pub const fn overlaps(&self, other: &Self) -> bool {
        (self.min.x as i64) < end(other.min.x, other.size.width)
            && (other.min.x as i64) < end(self.min.x, self.size.width)
            && (self.min.y as i64) < end(other.min.y, other.size.height)
            && (other.min.y as i64) < end(self.min.y, self.size.height)
    }

    /// Cut the rectangle with a vertical line `offset` cells from its left edge.
    ///
    /// Returns `(left, right)`. The offset is not clamped.
    #[inline]
    pub const fn split_vertical(&self, offset: i32) -> (Self, Self) {
        (
            Self::from_xywh(self.min.x, self.min.y, offset, self.size.height),
            Self::from_xywh(
                self.min.x + offset,
                self.min.y,
                self.size.width - offset,
                self.size.height,
            ),
        )
    }

    /// Cut the rectangle with a horizontal line `offset` cells from its top edge.
    ///
    /// Returns `(top, bottom)`. The offset is not clamped.
    #[inline]
    pub const fn split_horizontal(&self, offset: i32) -> (Self, Self) {
        (
            Self::from_xywh(self.min.x, self.min.y, self.size.width, offset),
            Self::from_xywh(
                self.min.x,
                self.min.y + offset,
                self.size.width,
                self.size.height - offset,
            ),
        )
    }

    /// The same rectangle as a [`kurbo::Rect`].
    #[inline]
    pub fn to_kurbo(&self) -> kurbo::Rect {
        let x = f64::from(self.min.x);
        let y = f64::from(self.min.y);
        kurbo::Rect::new(
            x,
            y,
            x + f64::from(self.size.width),
            y + f64::from(self.size.height),
        )
    }
}

/// Exclusive end of the span `[min, min + len)`, widened so it cannot overflow.
#[inline]
const fn end(min: i32, len: i32) -> i64 {
    min as i64 + len as i64
}

#[cfg(test)]
mod tests {
    use super::{LatticePoint, LatticeRect, LatticeSize};

    #[test]
    fn rect_containment_is_half_open() {
        let r = LatticeRect::from_xywh(2, 3, 4, 5);
        assert!(r.contains(LatticePoint::new(2, 3)));
        assert!(r.contains(LatticePoint::new(5, 7)));
        assert!(!r.contains(LatticePoint::new(6, 7)), "right edge is outside");
        assert!(!r.contains(LatticePoint::new(5, 8)), "bottom edge is outside");
        assert!(!r.contains(LatticePoint::new(1, 3)));
    }

    #[test]
    fn rects_at_the_edge_of_the_range() {
        let r = LatticeRect::from_xywh(i32::MAX - 4, i32::MIN, 10, 10);
        assert!(r.contains(LatticePoint::new(i32::MAX, i32::MIN)));
        assert!(r.contains(LatticePoint::new(i32::MAX - 4, i32::MIN + 9)));
        assert!(!r.contains(LatticePoint::new(i32::MAX - 5, i32::MIN)));
        assert!(!r.contains(LatticePoint::new(i32::MAX, i32::MIN + 10)));

        let neighbor = LatticeRect::from_xywh(i32::MAX - 1, i32::MIN + 5, 100, 100);
        assert!(r.overlaps(&neighbor));
        assert!(neighbor.overlaps(&r));
        let left = LatticeRect::from_xywh(i32::MAX - 10, i32::MIN, 6, 10);
        assert!(!r.overlaps(&left));

        let k = r.to_kurbo();
        assert_eq!(k.x1, f64::from(i32::MAX) + 6.0);
        assert_eq!(k.y1, f64::from(i32::MIN) + 10.0);
    }

    #[test]
    fn splits_partition_the_rect() {
        let r = LatticeRect::from_xywh(0, 0, 10, 6);
        let (l, rt) = r.split_vertical(4);
        assert_eq!(l, LatticeRect::from_xywh(0, 0, 4, 6));
        assert_eq!(rt, LatticeRect::from_xywh(4, 0, 6, 6));
        assert!(!l.overlaps(&rt));
        assert_eq!(l.area() + rt.area(), r.area());

        let (t, b) = r.split_horizontal(1);
        assert_eq!(t, LatticeRect::from_xywh(0, 0, 10, 1));
        assert_eq!(b, LatticeRect::from_xywh(0, 1, 10, 5));
    }

    #[test]
    fn area_and_empty() {
        let mut size = LatticeSize::new(3, 4);
        assert_eq!(size.area(), 12);
        assert!(!size.is_empty());

        // "negative" sizes are considered empty (and get zero area)
        size.width = -3;
        assert_eq!(size.area(), 0);
        assert!(size.is_empty());

        assert!(LatticeSize::splat(2).fits_within(LatticeSize::new(2, 3)));
        assert!(!LatticeSize::new(3, 2).fits_within(LatticeSize::splat(2)));
    }

    #[test]
    fn points_order_lexicographically() {
        let mut pts = [
            LatticePoint::new(1, 0),
            LatticePoint::new(0, 5),
            LatticePoint::new(0, 1),
        ];
        pts.sort();
        assert_eq!(
            pts,
            [
                LatticePoint::new(0, 1),
                LatticePoint::new(0, 5),
                LatticePoint::new(1, 0),
            ]
        );
        let p: kurbo::Point = LatticePoint::new(-2, 7).into();
        assert_eq!(p, kurbo::Point::new(-2.0, 7.0));
    }
}
