use carta_types::primitive::{Curve, Primitive, Ring};

use crate::style::paint::{LineCap, LinePaint, PaintCommand};
use crate::style::Symbol;
use crate::Color;

/// Renders curve and ring geometries as lines of the given color and width.
#[derive(Debug, Clone, Copy)]
pub struct SimpleContourSymbol {
    /// Color of the line.
    pub color: Color,
    /// Width of the line.
    pub width: f64,
}

impl SimpleContourSymbol {
    /// Creates a new symbol instance.
    pub fn new(color: Color, width: f64) -> Self {
        Self { color, width }
    }

    fn paint(&self) -> LinePaint {
        LinePaint {
            color: self.color,
            width: self.width,
            line_cap: LineCap::Butt,
        }
    }
}

impl<F> Symbol<F> for SimpleContourSymbol {
    fn render(&self, _feature: &F, geometry: &Primitive) -> Vec<PaintCommand> {
        match geometry {
            Primitive::Curve(curve) => vec![PaintCommand::Line {
                curve: curve.clone(),
                paint: self.paint(),
            }],
            Primitive::Ring(ring) => ring_to_line(ring)
                .map(|curve| {
                    vec![PaintCommand::Line {
                        curve,
                        paint: self.paint(),
                    }]
                })
                .unwrap_or_default(),
            _ => vec![],
        }
    }
}

/// Converts a ring boundary into a drawable curve.
pub(super) fn ring_to_line(ring: &Ring) -> Option<Curve> {
    Curve::new(ring.positions().to_vec()).ok()
}

#[cfg(test)]
mod tests {
    use carta_types::cartesian::Point2d;

    use super::*;

    #[test]
    fn renders_curves_and_rings() {
        let symbol = SimpleContourSymbol::new(Color::BLACK, 2.0);

        let curve: Primitive = Curve::new(vec![
            Point2d::new(0.0, 0.0),
            Point2d::new(1.0, 1.0),
        ])
        .expect("valid test curve")
        .into();
        assert_eq!(symbol.render(&(), &curve).len(), 1);

        let ring: Primitive = Ring::new(vec![
            Point2d::new(0.0, 0.0),
            Point2d::new(1.0, 0.0),
            Point2d::new(0.0, 1.0),
        ])
        .expect("valid test ring")
        .into();
        let commands = symbol.render(&(), &ring);
        assert_eq!(commands.len(), 1);
        let PaintCommand::Line { curve, .. } = &commands[0] else {
            panic!("ring rendered into a non-line command");
        };
        assert!(curve.is_closed());

        let point: Primitive = Point2d::new(0.0, 0.0).into();
        assert!(symbol.render(&(), &point).is_empty());
    }
}
