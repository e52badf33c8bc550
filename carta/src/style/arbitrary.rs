use carta_types::primitive::Primitive;

use crate::style::paint::PaintCommand;
use crate::style::{CirclePointSymbol, SimpleContourSymbol, SimplePolygonSymbol, Symbol};
use crate::Color;

/// Renders geometries of any type with the symbol matching the geometry kind.
#[derive(Debug, Clone, Copy)]
pub struct ArbitraryGeometrySymbol {
    point: CirclePointSymbol,
    contour: SimpleContourSymbol,
    polygon: SimplePolygonSymbol,
}

impl ArbitraryGeometrySymbol {
    /// Creates a new instance from the symbols for each geometry kind.
    pub fn new(
        point: CirclePointSymbol,
        contour: SimpleContourSymbol,
        polygon: SimplePolygonSymbol,
    ) -> Self {
        Self {
            point,
            contour,
            polygon,
        }
    }
}

impl Default for ArbitraryGeometrySymbol {
    fn default() -> Self {
        Self {
            point: CirclePointSymbol::new(Color::GRAY, 4.0),
            contour: SimpleContourSymbol::new(Color::GRAY, 1.0),
            polygon: SimplePolygonSymbol::new(Color::GRAY.with_alpha(128)),
        }
    }
}

impl<F> Symbol<F> for ArbitraryGeometrySymbol {
    fn render(&self, feature: &F, geometry: &Primitive) -> Vec<PaintCommand> {
        match geometry {
            Primitive::Point(_) => self.point.render(feature, geometry),
            Primitive::Curve(_) | Primitive::Ring(_) => self.contour.render(feature, geometry),
            Primitive::Surface(_) | Primitive::PolyhedralSurface(_) => {
                self.polygon.render(feature, geometry)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use carta_types::cartesian::Point2d;
    use carta_types::primitive::{Curve, Ring, SurfacePatch};

    use super::*;

    #[test]
    fn dispatches_by_geometry_kind() {
        let symbol = ArbitraryGeometrySymbol::default();

        let point: Primitive = Point2d::new(0.0, 0.0).into();
        assert!(matches!(
            symbol.render(&(), &point)[0],
            PaintCommand::Point { .. }
        ));

        let curve: Primitive = Curve::new(vec![
            Point2d::new(0.0, 0.0),
            Point2d::new(1.0, 1.0),
        ])
        .expect("valid test curve")
        .into();
        assert!(matches!(
            symbol.render(&(), &curve)[0],
            PaintCommand::Line { .. }
        ));

        let ring = Ring::new(vec![
            Point2d::new(0.0, 0.0),
            Point2d::new(1.0, 0.0),
            Point2d::new(0.0, 1.0),
        ])
        .expect("valid test ring");
        let surface: Primitive = SurfacePatch::new(ring, vec![]).into();
        assert!(matches!(
            symbol.render(&(), &surface)[0],
            PaintCommand::Polygon { .. }
        ));
    }
}
