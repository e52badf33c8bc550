use crate::cartesian::Point2d;
use crate::geodetic::{Datum, GeoPoint2d};

/// Conversion between geographic and projected planar coordinates.
pub trait Projection {
    /// Converts a geographic point into the planar space. Returns `None` if
    /// the point cannot be represented in the target space.
    fn project(&self, input: &GeoPoint2d) -> Option<Point2d>;

    /// Converts a planar point back into geographic coordinates.
    fn unproject(&self, input: &Point2d) -> Option<GeoPoint2d>;
}

/// Spherical Web Mercator projection (as used by most tile services).
#[derive(Debug, Copy, Clone)]
pub struct WebMercator {
    datum: Datum,
}

impl WebMercator {
    /// Creates a projection over the given datum.
    pub fn new(datum: Datum) -> Self {
        Self { datum }
    }
}

impl Default for WebMercator {
    fn default() -> Self {
        Self {
            datum: Datum::WGS84,
        }
    }
}

impl Projection for WebMercator {
    fn project(&self, input: &GeoPoint2d) -> Option<Point2d> {
        let x = self.datum.semimajor() * input.lon_rad();
        let y = self.datum.semimajor()
            * (std::f64::consts::FRAC_PI_4 + input.lat_rad() / 2.0)
                .tan()
                .ln();

        if x.is_finite() && y.is_finite() {
            Some(Point2d::new(x, y))
        } else {
            None
        }
    }

    fn unproject(&self, input: &Point2d) -> Option<GeoPoint2d> {
        let lat_rad =
            std::f64::consts::FRAC_PI_2 - 2.0 * (-input.y / self.datum.semimajor()).exp().atan();
        let lon_rad = input.x / self.datum.semimajor();

        if lat_rad.is_finite() && lon_rad.is_finite() {
            Some(GeoPoint2d::latlon(lat_rad.to_degrees(), lon_rad.to_degrees()))
        } else {
            None
        }
    }
}

/// Projection that uses geographic degrees directly as planar units.
#[derive(Debug, Copy, Clone, Default)]
pub struct IdentityProjection;

impl Projection for IdentityProjection {
    fn project(&self, input: &GeoPoint2d) -> Option<Point2d> {
        Some(Point2d::new(input.lon(), input.lat()))
    }

    fn unproject(&self, input: &Point2d) -> Option<GeoPoint2d> {
        Some(GeoPoint2d::latlon(input.y, input.x))
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;

    use super::*;

    #[test]
    fn web_mercator_known_values() {
        let projection = WebMercator::default();

        let origin = projection.project(&GeoPoint2d::latlon(0.0, 0.0)).unwrap();
        assert_relative_eq!(origin.x, 0.0, epsilon = 1e-6);
        assert_relative_eq!(origin.y, 0.0, epsilon = 1e-6);

        let edge = projection.project(&GeoPoint2d::latlon(0.0, 180.0)).unwrap();
        assert_relative_eq!(edge.x, 20_037_508.342789244, epsilon = 1e-3);
    }

    #[test]
    fn web_mercator_roundtrip() {
        let projection = WebMercator::default();
        let point = GeoPoint2d::latlon(55.7558, 37.6173);

        let projected = projection.project(&point).unwrap();
        let unprojected = projection.unproject(&projected).unwrap();

        assert_relative_eq!(unprojected.lat(), point.lat(), epsilon = 1e-9);
        assert_relative_eq!(unprojected.lon(), point.lon(), epsilon = 1e-9);
    }

    #[test]
    fn web_mercator_pole_is_rejected() {
        let projection = WebMercator::default();
        assert!(projection.project(&GeoPoint2d::latlon(90.0, 0.0)).is_none());
    }
}
