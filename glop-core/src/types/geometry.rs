//! Geometric primitives: points, sizes and rectangles.

use num_traits::Num;
use serde::{Deserialize, Serialize};
use std::ops::{Add, Sub};

/// A 2D point with generic coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Point<T: Num + Copy> {
    pub x: T,
    pub y: T,
}

impl<T: Num + Copy> Point<T> {
    pub const fn new(x: T, y: T) -> Self {
        Point { x, y }
    }
}

impl<T: Num + Copy> Add for Point<T> {
    type Output = Self;
    fn add(self, other: Self) -> Self {
        Point::new(self.x + other.x, self.y + other.y)
    }
}

impl<T: Num + Copy> Sub for Point<T> {
    type Output = Self;
    fn sub(self, other: Self) -> Self {
        Point::new(self.x - other.x, self.y - other.y)
    }
}

/// A 2D size (width and height).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Size<T: Num + Copy> {
    pub width: T,
    pub height: T,
}

impl<T: Num + Copy + PartialOrd> Size<T> {
    pub const fn new(width: T, height: T) -> Self {
        Size { width, height }
    }

    /// `true` if either dimension is zero or negative.
    pub fn is_empty(&self) -> bool {
        self.width <= T::zero() || self.height <= T::zero()
    }
}

/// An axis-aligned rectangle described by its origin and size.
///
/// The origin is whatever corner the producing coordinate space uses; native
/// window geometry is top-left based.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Rect<T: Num + Copy> {
    pub origin: Point<T>,
    pub size: Size<T>,
}

impl<T: Num + Copy + PartialOrd> Rect<T> {
    pub const fn new(origin: Point<T>, size: Size<T>) -> Self {
        Rect { origin, size }
    }

    pub fn from_coords(x: T, y: T, width: T, height: T) -> Self {
        Rect::new(Point::new(x, y), Size::new(width, height))
    }

    pub fn x(&self) -> T {
        self.origin.x
    }

    pub fn y(&self) -> T {
        self.origin.y
    }

    pub fn width(&self) -> T {
        self.size.width
    }

    pub fn height(&self) -> T {
        self.size.height
    }

    /// Half-open containment test: the right and bottom edges are exclusive.
    pub fn contains(&self, point: Point<T>) -> bool {
        point.x >= self.origin.x
            && point.y >= self.origin.y
            && point.x < self.origin.x + self.size.width
            && point.y < self.origin.y + self.size.height
    }
}

/// Integer point in pixels.
pub type PointInt = Point<i32>;
/// Integer size in pixels.
pub type SizeInt = Size<i32>;
/// Integer rectangle in pixels.
pub type RectInt = Rect<i32>;

#[cfg(test)]
mod tests {
    use super::*;
    use static_assertions::assert_impl_all;

    assert_impl_all!(RectInt: Send, Sync, Copy, Eq, std::hash::Hash, Serialize);

    #[test]
    fn point_arithmetic() {
        let a = PointInt::new(3, 4);
        let b = PointInt::new(1, 1);
        assert_eq!(a + b, PointInt::new(4, 5));
        assert_eq!(a - b, PointInt::new(2, 3));
    }

    #[test]
    fn size_is_empty() {
        assert!(SizeInt::new(0, 10).is_empty());
        assert!(SizeInt::new(10, -1).is_empty());
        assert!(!SizeInt::new(1, 1).is_empty());
    }

    #[test]
    fn rect_accessors_and_contains() {
        let rect = RectInt::from_coords(10, 20, 100, 50);
        assert_eq!((rect.x(), rect.y(), rect.width(), rect.height()), (10, 20, 100, 50));
        assert!(rect.contains(PointInt::new(10, 20)));
        assert!(rect.contains(PointInt::new(109, 69)));
        assert!(!rect.contains(PointInt::new(110, 69)));
        assert!(!rect.contains(PointInt::new(9, 20)));
    }

    #[test]
    fn rect_serde_roundtrip_shape() {
        let rect = RectInt::from_coords(1, 2, 3, 4);
        let json = serde_json::to_string(&rect).unwrap();
        assert_eq!(json, r#"{"origin":{"x":1,"y":2},"size":{"width":3,"height":4}}"#);
    }
}
