use carta_types::cartesian::Point2d;
use carta_types::primitive::{Curve, SurfacePatch};
use serde::{Deserialize, Serialize};

use crate::Color;

/// Style of a rendered point.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PointPaint {
    /// Color of the point.
    pub color: Color,
    /// Diameter of the point in display units.
    pub diameter: f64,
}

/// Style of a rendered line.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LinePaint {
    /// Color of the line.
    pub color: Color,
    /// Width of the line in display units.
    pub width: f64,
    /// Shape of the line ends.
    pub line_cap: LineCap,
}

/// Shape of the line ends.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LineCap {
    /// Lines end flat at the last point.
    Butt,
    /// Lines end with a half-circle around the last point.
    Round,
}

/// Style of a rendered polygon interior.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PolygonPaint {
    /// Fill color.
    pub color: Color,
}

/// A single drawing instruction produced by a
/// [`Symbol`](crate::style::Symbol).
#[derive(Debug, Clone, PartialEq)]
pub enum PaintCommand {
    /// Draw a point.
    Point {
        /// Position of the point.
        position: Point2d,
        /// Style to draw with.
        paint: PointPaint,
    },
    /// Draw a line along the curve.
    Line {
        /// Curve to draw.
        curve: Curve,
        /// Style to draw with.
        paint: LinePaint,
    },
    /// Fill the surface patch.
    Polygon {
        /// Patch to fill.
        patch: SurfacePatch,
        /// Style to fill with.
        paint: PolygonPaint,
    },
}
