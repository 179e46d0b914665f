//! Pure math and data types for Scrim: geometry primitives and the
//! coordinate-space converter. This crate has no dependencies and no state.

mod convert;
mod geometry;

pub use convert::CoordinateConverter;
pub use geometry::{Point, Rect, Size};
