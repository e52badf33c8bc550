//! Planar (projected) coordinate types.

mod rect;

pub use rect::Rect;

/// Planar position used by the primitive model.
pub type Point2d = nalgebra::Point2<f64>;
