use crate::cartesian::Point2d;
use crate::error::CartaTypesError;
use crate::geodetic::{Crs, GeoPoint2d};
use crate::primitive::{Curve, PolyhedralSurface, Primitive, Ring, SurfacePatch};

/// Creates geometric primitives bound to a coordinate reference system.
///
/// The factory validates the coordinate data and, for geographic input,
/// projects it into the planar space of the factory CRS.
#[derive(Debug, Clone)]
pub struct PrimitiveFactory {
    crs: Crs,
}

impl PrimitiveFactory {
    /// Creates a factory producing primitives in the given CRS.
    pub fn new(crs: Crs) -> Self {
        Self { crs }
    }

    /// CRS of the primitives produced by this factory.
    pub fn crs(&self) -> &Crs {
        &self.crs
    }

    /// Creates a point primitive.
    pub fn create_point(&self, position: Point2d) -> Result<Primitive, CartaTypesError> {
        if !position.x.is_finite() || !position.y.is_finite() {
            return Err(CartaTypesError::InvalidGeometry(
                "positions must have finite coordinates".into(),
            ));
        }

        Ok(Primitive::Point(position))
    }

    /// Creates a curve primitive.
    pub fn create_curve(&self, positions: Vec<Point2d>) -> Result<Curve, CartaTypesError> {
        Curve::new(positions)
    }

    /// Creates a ring primitive.
    pub fn create_ring(&self, positions: Vec<Point2d>) -> Result<Ring, CartaTypesError> {
        Ring::new(positions)
    }

    /// Creates a surface patch bounded by the given rings.
    pub fn create_surface(&self, exterior: Ring, interiors: Vec<Ring>) -> SurfacePatch {
        SurfacePatch::new(exterior, interiors)
    }

    /// Creates a polyhedral surface from the given patches.
    pub fn create_polyhedral_surface(&self, patches: Vec<SurfacePatch>) -> PolyhedralSurface {
        PolyhedralSurface::new(patches)
    }

    /// Creates a curve from geographic positions, projecting them into the
    /// planar space of the factory CRS.
    pub fn create_curve_from_geo(
        &self,
        positions: &[GeoPoint2d],
    ) -> Result<Curve, CartaTypesError> {
        Curve::new(self.project_positions(positions)?)
    }

    /// Creates a ring from geographic positions, projecting them into the
    /// planar space of the factory CRS.
    pub fn create_ring_from_geo(&self, positions: &[GeoPoint2d]) -> Result<Ring, CartaTypesError> {
        Ring::new(self.project_positions(positions)?)
    }

    fn project_positions(
        &self,
        positions: &[GeoPoint2d],
    ) -> Result<Vec<Point2d>, CartaTypesError> {
        let projection = self.crs.get_projection().ok_or_else(|| {
            CartaTypesError::UnsupportedProjection(format!("{:?}", self.crs.projection_type()))
        })?;

        positions
            .iter()
            .map(|p| {
                projection.project(p).ok_or_else(|| {
                    CartaTypesError::InvalidGeometry(format!(
                        "position {p:?} cannot be projected"
                    ))
                })
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;

    use super::*;
    use crate::geodetic::{Datum, ProjectionType};
    use crate::latlon;

    #[test]
    fn planar_primitives_are_validated() {
        let factory = PrimitiveFactory::new(Crs::EPSG3857);

        assert!(factory.create_point(Point2d::new(0.0, f64::INFINITY)).is_err());
        assert!(factory.create_curve(vec![Point2d::new(0.0, 0.0)]).is_err());
        assert!(factory
            .create_ring(vec![
                Point2d::new(0.0, 0.0),
                Point2d::new(1.0, 0.0),
                Point2d::new(0.0, 1.0),
            ])
            .is_ok());
    }

    #[test]
    fn geographic_curve_is_projected() {
        let factory = PrimitiveFactory::new(Crs::EPSG3857);
        let curve = factory
            .create_curve_from_geo(&[latlon!(0.0, 0.0), latlon!(0.0, 90.0)])
            .unwrap();

        assert_relative_eq!(curve.start().x, 0.0, epsilon = 1e-6);
        assert_relative_eq!(curve.end().x, 10_018_754.17, epsilon = 0.01);
    }

    #[test]
    fn unknown_projection_is_reported() {
        let factory =
            PrimitiveFactory::new(Crs::new(Datum::WGS84, ProjectionType::Unknown));
        let result = factory.create_curve_from_geo(&[latlon!(0.0, 0.0), latlon!(1.0, 1.0)]);

        assert!(matches!(
            result,
            Err(CartaTypesError::UnsupportedProjection(_))
        ));
    }

    #[test]
    fn polar_positions_cannot_be_projected() {
        let factory = PrimitiveFactory::new(Crs::EPSG3857);
        let result = factory.create_curve_from_geo(&[latlon!(90.0, 0.0), latlon!(0.0, 0.0)]);

        assert!(matches!(result, Err(CartaTypesError::InvalidGeometry(_))));
    }
}
