use carta_types::primitive::{Primitive, SurfacePatch};

use crate::style::contour::ring_to_line;
use crate::style::paint::{LineCap, LinePaint, PaintCommand, PolygonPaint};
use crate::style::Symbol;
use crate::Color;

/// Renders a surface geometry as a filled polygon with an outline.
#[derive(Debug, Clone, Copy)]
pub struct SimplePolygonSymbol {
    /// Color of the inner area of the polygon.
    pub fill_color: Color,
    /// Color of the outline.
    pub stroke_color: Color,
    /// Width of the outline in display units.
    pub stroke_width: f64,
}

impl SimplePolygonSymbol {
    /// Creates a new instance with transparent outline.
    pub fn new(fill_color: Color) -> Self {
        Self {
            fill_color,
            stroke_color: Default::default(),
            stroke_width: 0.0,
        }
    }

    /// Creates a new instance from a copy of the current, but with the given
    /// stroke color.
    pub fn with_stroke_color(&self, stroke_color: Color) -> Self {
        Self {
            stroke_color,
            ..*self
        }
    }

    /// Creates a new instance from a copy of the current, but with the given
    /// stroke width.
    pub fn with_stroke_width(&self, stroke_width: f64) -> Self {
        Self {
            stroke_width,
            ..*self
        }
    }

    fn render_patch(&self, patch: &SurfacePatch, commands: &mut Vec<PaintCommand>) {
        if !self.fill_color.is_transparent() {
            commands.push(PaintCommand::Polygon {
                patch: patch.clone(),
                paint: PolygonPaint {
                    color: self.fill_color,
                },
            });
        }

        if !self.stroke_color.is_transparent() && self.stroke_width > 0.0 {
            let paint = LinePaint {
                color: self.stroke_color,
                width: self.stroke_width,
                line_cap: LineCap::Butt,
            };

            for ring in std::iter::once(patch.exterior()).chain(patch.interiors().iter()) {
                if let Some(curve) = ring_to_line(ring) {
                    commands.push(PaintCommand::Line { curve, paint });
                }
            }
        }
    }
}

impl<F> Symbol<F> for SimplePolygonSymbol {
    fn render(&self, _feature: &F, geometry: &Primitive) -> Vec<PaintCommand> {
        let mut commands = vec![];

        match geometry {
            Primitive::Surface(patch) => self.render_patch(patch, &mut commands),
            Primitive::PolyhedralSurface(surface) => {
                for patch in surface.patches() {
                    self.render_patch(patch, &mut commands);
                }
            }
            _ => {}
        }

        commands
    }
}

#[cfg(test)]
mod tests {
    use carta_types::cartesian::Point2d;
    use carta_types::primitive::{PolyhedralSurface, Ring};

    use super::*;

    fn patch() -> SurfacePatch {
        let exterior = Ring::new(vec![
            Point2d::new(0.0, 0.0),
            Point2d::new(4.0, 0.0),
            Point2d::new(4.0, 4.0),
            Point2d::new(0.0, 4.0),
        ])
        .expect("valid test ring");
        let hole = Ring::new(vec![
            Point2d::new(1.0, 1.0),
            Point2d::new(2.0, 1.0),
            Point2d::new(2.0, 2.0),
            Point2d::new(1.0, 2.0),
        ])
        .expect("valid test ring");

        SurfacePatch::new(exterior, vec![hole])
    }

    #[test]
    fn fill_only() {
        let symbol = SimplePolygonSymbol::new(Color::GREEN);
        let commands = symbol.render(&(), &patch().into());
        assert_eq!(commands.len(), 1);
        assert!(matches!(commands[0], PaintCommand::Polygon { .. }));
    }

    #[test]
    fn fill_and_outline() {
        let symbol = SimplePolygonSymbol::new(Color::GREEN)
            .with_stroke_color(Color::BLACK)
            .with_stroke_width(1.0);

        // fill + exterior outline + hole outline
        let commands = symbol.render(&(), &patch().into());
        assert_eq!(commands.len(), 3);
    }

    #[test]
    fn renders_every_patch_of_a_surface() {
        let symbol = SimplePolygonSymbol::new(Color::GREEN);
        let surface: Primitive = PolyhedralSurface::new(vec![patch(), patch()]).into();
        assert_eq!(symbol.render(&(), &surface).len(), 2);
    }

    #[test]
    fn transparent_fill_is_skipped() {
        let symbol = SimplePolygonSymbol::new(Color::TRANSPARENT);
        assert!(symbol.render(&(), &patch().into()).is_empty());
    }
}
