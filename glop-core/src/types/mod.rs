//! Core data types shared across glop crates.

pub mod geometry;

pub use geometry::{Point, PointInt, Rect, RectInt, Size, SizeInt};
