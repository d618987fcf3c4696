//! Foundation geometry types and rounding helpers.
//!
//! Everything the blur engine measures is expressed with these types:
//! device-space rectangles, radius pairs and standard-deviation points.
//! Rectangles are stored as two corners and are half-open: a pixel at
//! `(x, y)` is inside when `x1 <= x < x2` and `y1 <= y < y2`.

use core::ops::{Add, Sub};

// ============================================================================
// Rounding and conversion functions
// ============================================================================

/// Round a non-negative double to the nearest unsigned integer (round half up).
#[inline]
pub fn uround(v: f64) -> u32 {
    (v + 0.5) as u32
}

/// Floor of a double as a signed integer, saturating at the `i32` range.
#[inline]
pub fn ifloor(v: f64) -> i32 {
    v.floor() as i32
}

/// Ceiling of a double as a signed integer, saturating at the `i32` range.
#[inline]
pub fn iceil(v: f64) -> i32 {
    v.ceil() as i32
}

// ============================================================================
// Size
// ============================================================================

/// A width/height pair. Used both for raster dimensions and for
/// per-axis radii.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash)]
pub struct Size<T: Copy> {
    pub width: T,
    pub height: T,
}

impl<T: Copy> Size<T> {
    pub fn new(width: T, height: T) -> Self {
        Self { width, height }
    }
}

/// Size with `i32` components.
pub type SizeI = Size<i32>;

impl SizeI {
    /// Both components are zero.
    pub fn is_zero(&self) -> bool {
        self.width == 0 && self.height == 0
    }

    /// Either component is negative.
    pub fn is_negative(&self) -> bool {
        self.width < 0 || self.height < 0
    }

    /// Component-wise sum, or `None` on overflow.
    pub fn checked_add(&self, rhs: SizeI) -> Option<SizeI> {
        Some(SizeI::new(
            self.width.checked_add(rhs.width)?,
            self.height.checked_add(rhs.height)?,
        ))
    }
}

// ============================================================================
// Point
// ============================================================================

/// A 2D point.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point<T: Copy> {
    pub x: T,
    pub y: T,
}

impl<T: Copy> Point<T> {
    pub fn new(x: T, y: T) -> Self {
        Self { x, y }
    }
}

pub type PointD = Point<f64>;

// ============================================================================
// Rect
// ============================================================================

/// A rectangle defined by two corner points, `(x1, y1)` inclusive and
/// `(x2, y2)` exclusive.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect<T: Copy> {
    pub x1: T,
    pub y1: T,
    pub x2: T,
    pub y2: T,
}

impl<T> Rect<T>
where
    T: Copy + PartialOrd + Add<Output = T> + Sub<Output = T>,
{
    pub fn new(x1: T, y1: T, x2: T, y2: T) -> Self {
        Self { x1, y1, x2, y2 }
    }

    pub fn width(&self) -> T {
        self.x2 - self.x1
    }

    pub fn height(&self) -> T {
        self.y2 - self.y1
    }

    pub fn top_left(&self) -> Point<T> {
        Point::new(self.x1, self.y1)
    }

    /// Returns `true` if the rectangle covers no pixels.
    pub fn is_empty(&self) -> bool {
        !(self.x1 < self.x2 && self.y1 < self.y2)
    }

    /// Clip this rectangle to the intersection with `r`.
    /// Returns `true` if the result is non-empty.
    pub fn clip(&mut self, r: &Self) -> bool {
        if self.x2 > r.x2 {
            self.x2 = r.x2;
        }
        if self.y2 > r.y2 {
            self.y2 = r.y2;
        }
        if self.x1 < r.x1 {
            self.x1 = r.x1;
        }
        if self.y1 < r.y1 {
            self.y1 = r.y1;
        }
        !self.is_empty()
    }

    /// The intersection of two rectangles, or `None` when they do not overlap.
    pub fn intersect(&self, r: &Self) -> Option<Self> {
        let mut out = *self;
        if out.clip(r) {
            Some(out)
        } else {
            None
        }
    }

    /// Returns `true` if `r` lies entirely inside this rectangle.
    pub fn contains_rect(&self, r: &Self) -> bool {
        r.x1 >= self.x1 && r.y1 >= self.y1 && r.x2 <= self.x2 && r.y2 <= self.y2
    }

    pub fn contains_x(&self, x: T) -> bool {
        x >= self.x1 && x < self.x2
    }

    pub fn contains_y(&self, y: T) -> bool {
        y >= self.y1 && y < self.y2
    }

    /// Grow every edge outward by `dx` horizontally and `dy` vertically.
    pub fn inflate(&self, dx: T, dy: T) -> Self {
        Self::new(self.x1 - dx, self.y1 - dy, self.x2 + dx, self.y2 + dy)
    }

    /// Shrink every edge inward. The result may be empty.
    pub fn deflate(&self, dx: T, dy: T) -> Self {
        Self::new(self.x1 + dx, self.y1 + dy, self.x2 - dx, self.y2 - dy)
    }

    /// The same rectangle measured from `origin`.
    pub fn relative_to(&self, origin: Point<T>) -> Self {
        Self::new(
            self.x1 - origin.x,
            self.y1 - origin.y,
            self.x2 - origin.x,
            self.y2 - origin.y,
        )
    }
}

/// Rectangle with `i32` coordinates.
pub type RectI = Rect<i32>;
/// Rectangle with `f64` coordinates.
pub type RectD = Rect<f64>;

impl RectI {
    /// Width and height, or `None` when either does not fit in `i32`.
    pub fn checked_size(&self) -> Option<SizeI> {
        Some(SizeI::new(
            self.x2.checked_sub(self.x1)?,
            self.y2.checked_sub(self.y1)?,
        ))
    }
}

impl RectD {
    /// Smallest integer rectangle containing this one.
    pub fn round_out(&self) -> RectI {
        RectI::new(
            ifloor(self.x1),
            ifloor(self.y1),
            iceil(self.x2),
            iceil(self.y2),
        )
    }

    /// Largest integer rectangle contained in this one.
    pub fn round_in(&self) -> RectI {
        RectI::new(
            iceil(self.x1),
            iceil(self.y1),
            ifloor(self.x2),
            ifloor(self.y2),
        )
    }
}

impl From<RectI> for RectD {
    fn from(r: RectI) -> Self {
        RectD::new(r.x1 as f64, r.y1 as f64, r.x2 as f64, r.y2 as f64)
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_uround() {
        assert_eq!(uround(0.5), 1);
        assert_eq!(uround(0.49), 0);
        assert_eq!(uround(2.5), 3);
        assert_eq!(uround(0.0), 0);
    }

    #[test]
    fn test_ifloor_iceil() {
        assert_eq!(ifloor(1.7), 1);
        assert_eq!(ifloor(-1.7), -2);
        assert_eq!(ifloor(-1.0), -1);
        assert_eq!(iceil(1.1), 2);
        assert_eq!(iceil(-1.1), -1);
        assert_eq!(iceil(1.0), 1);
        assert_eq!(ifloor(-1e12), i32::MIN);
        assert_eq!(iceil(1e12), i32::MAX);
    }

    #[test]
    fn test_rect_extent() {
        let r = RectI::new(10, 20, 40, 60);
        assert_eq!(r.width(), 30);
        assert_eq!(r.height(), 40);
        assert!(!r.is_empty());
        assert!(RectI::new(5, 5, 5, 9).is_empty());
        assert!(RectI::new(5, 5, 2, 9).is_empty());
        assert_eq!(r.checked_size(), Some(SizeI::new(30, 40)));
    }

    #[test]
    fn test_rect_checked_size_overflow() {
        assert_eq!(RectI::new(i32::MIN, 0, i32::MAX, 1).checked_size(), None);
        assert_eq!(RectI::new(0, i32::MAX, 1, i32::MIN).checked_size(), None);
        assert_eq!(
            RectI::new(i32::MIN, 0, 0, 1).checked_size(),
            None,
            "0 - i32::MIN does not fit"
        );
        assert_eq!(
            RectI::new(-1, 0, i32::MAX - 1, 1).checked_size(),
            Some(SizeI::new(i32::MAX, 1))
        );
    }

    #[test]
    fn test_rect_half_open() {
        let r = RectI::new(0, 0, 8, 8);
        assert!(r.contains_x(0) && r.contains_y(0));
        assert!(r.contains_x(7) && r.contains_y(7));
        assert!(!r.contains_x(8));
        assert!(!r.contains_y(8));
        assert!(!r.contains_x(-1));
    }

    #[test]
    fn test_rect_intersect() {
        let a = RectI::new(10, 20, 100, 200);
        let b = RectI::new(50, 50, 80, 300);
        assert_eq!(a.intersect(&b), Some(RectI::new(50, 50, 80, 200)));

        let far = RectI::new(500, 500, 600, 600);
        assert_eq!(a.intersect(&far), None);
        // Touching edges share no pixels.
        let touching = RectI::new(100, 20, 150, 200);
        assert_eq!(a.intersect(&touching), None);
    }

    #[test]
    fn test_rect_contains_rect() {
        let outer = RectI::new(0, 0, 10, 10);
        assert!(outer.contains_rect(&RectI::new(2, 2, 10, 10)));
        assert!(!outer.contains_rect(&RectI::new(2, 2, 11, 10)));
    }

    #[test]
    fn test_rect_inflate_deflate() {
        let r = RectI::new(10, 10, 20, 30);
        assert_eq!(r.inflate(2, 3), RectI::new(8, 7, 22, 33));
        assert_eq!(r.deflate(2, 3), RectI::new(12, 13, 18, 27));
        assert!(r.deflate(6, 0).is_empty());
        assert_eq!(
            r.relative_to(r.top_left()),
            RectI::new(0, 0, 10, 20)
        );
        let far = RectI::new(i32::MIN, i32::MIN, i32::MIN + 4, i32::MIN + 2);
        assert_eq!(far.relative_to(far.top_left()), RectI::new(0, 0, 4, 2));
    }

    #[test]
    fn test_round_out_and_in() {
        let r = RectD::new(0.5, -1.25, 7.2, 8.0);
        assert_eq!(r.round_out(), RectI::new(0, -2, 8, 8));
        assert_eq!(r.round_in(), RectI::new(1, -1, 7, 8));
    }

    #[test]
    fn test_size_helpers() {
        let a = SizeI::new(3, 4);
        let b = SizeI::new(1, 0);
        assert_eq!(a.checked_add(b), Some(SizeI::new(4, 4)));
        assert_eq!(SizeI::new(i32::MAX, 0).checked_add(SizeI::new(1, 1)), None);
        assert!(SizeI::default().is_zero());
        assert!(SizeI::new(0, -1).is_negative());
        assert!(!a.is_negative());
    }
}
