use carta_types::primitive::Primitive;

use crate::style::paint::{PaintCommand, PointPaint};
use crate::style::Symbol;
use crate::Color;

/// Renders point geometries as circles of the given color and size.
#[derive(Debug, Clone, Copy)]
pub struct CirclePointSymbol {
    /// Color of the circle.
    pub color: Color,
    /// Diameter of the circle.
    pub diameter: f64,
}

impl CirclePointSymbol {
    /// Creates a new symbol instance.
    pub fn new(color: Color, diameter: f64) -> Self {
        Self { color, diameter }
    }
}

impl<F> Symbol<F> for CirclePointSymbol {
    fn render(&self, _feature: &F, geometry: &Primitive) -> Vec<PaintCommand> {
        let paint = PointPaint {
            color: self.color,
            diameter: self.diameter,
        };

        match geometry {
            Primitive::Point(position) => vec![PaintCommand::Point {
                position: *position,
                paint,
            }],
            _ => vec![],
        }
    }
}

#[cfg(test)]
mod tests {
    use carta_types::cartesian::Point2d;
    use carta_types::primitive::Curve;

    use super::*;

    #[test]
    fn renders_points_only() {
        let symbol = CirclePointSymbol::new(Color::BLUE, 5.0);

        let point: Primitive = Point2d::new(1.0, 2.0).into();
        let commands = symbol.render(&(), &point);
        assert_eq!(commands.len(), 1);

        let curve: Primitive = Curve::new(vec![
            Point2d::new(0.0, 0.0),
            Point2d::new(1.0, 1.0),
        ])
        .expect("valid test curve")
        .into();
        assert!(symbol.render(&(), &curve).is_empty());
    }
}
