//! Geometry primitives.
//!
//! Currently rectangles only, generic over their storage representation.

pub mod rect;

pub use rect::{Point, PointPoint, PointSize, Rect, RectStorage, Size};
