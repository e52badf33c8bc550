//! Map styling.
//!
//! A [`Symbol`] turns a feature and its geometry into a list of
//! [`PaintCommand`]s: resolution-independent drawing instructions a rendering
//! backend can consume. Symbols can use feature attributes to vary the style
//! between features of the same layer.

mod arbitrary;
mod contour;
mod paint;
mod point;
mod polygon;

pub use arbitrary::ArbitraryGeometrySymbol;
pub use contour::SimpleContourSymbol;
pub use paint::{LineCap, LinePaint, PaintCommand, PointPaint, PolygonPaint};
pub use point::CirclePointSymbol;
pub use polygon::SimplePolygonSymbol;

use carta_types::primitive::Primitive;

/// Defines how a feature is rendered.
pub trait Symbol<F> {
    /// Produces the drawing instructions for the feature with the given
    /// geometry.
    fn render(&self, feature: &F, geometry: &Primitive) -> Vec<PaintCommand>;
}
