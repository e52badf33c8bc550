use geo::{EuclideanLength, LineInterpolatePoint};
use serde::{Deserialize, Serialize};

use crate::cartesian::{Point2d, Rect};
use crate::error::CartaTypesError;
use crate::primitive::check_positions;

/// A curve primitive: a sequence of planar positions with linear interpolation
/// between them.
///
/// A valid curve has at least two positions, so measurement operations never
/// have to deal with an empty coordinate sequence.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Curve {
    positions: Vec<Point2d>,
}

impl Curve {
    /// Creates a curve from the given positions.
    pub fn new(positions: Vec<Point2d>) -> Result<Self, CartaTypesError> {
        check_positions(&positions)?;
        if positions.len() < 2 {
            return Err(CartaTypesError::InvalidGeometry(
                "a curve requires at least 2 positions".into(),
            ));
        }

        Ok(Self { positions })
    }

    /// Positions of the curve.
    pub fn positions(&self) -> &[Point2d] {
        &self.positions
    }

    /// First position of the curve.
    pub fn start(&self) -> Point2d {
        self.positions[0]
    }

    /// Last position of the curve.
    pub fn end(&self) -> Point2d {
        self.positions[self.positions.len() - 1]
    }

    /// Returns true if the first and the last positions of the curve are
    /// equal.
    pub fn is_closed(&self) -> bool {
        self.start() == self.end()
    }

    /// Length of the curve in planar units.
    pub fn length(&self) -> f64 {
        self.to_line_string().euclidean_length()
    }

    /// Position on the curve at the given fraction of its length. The
    /// fraction is clamped to `0.0..=1.0`.
    pub fn point_at(&self, fraction: f64) -> Option<Point2d> {
        self.to_line_string()
            .line_interpolate_point(fraction.clamp(0.0, 1.0))
            .map(|p| Point2d::new(p.x(), p.y()))
    }

    /// Converts the curve into an engine line string.
    pub fn to_line_string(&self) -> geo_types::LineString<f64> {
        crate::primitive::line_string(&self.positions)
    }

    /// Smallest rectangle containing the curve.
    pub fn bounding_rect(&self) -> Rect {
        Rect::from_points(self.positions.iter().copied())
            .expect("curve positions are never empty")
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;

    use super::*;

    fn open_curve() -> Curve {
        Curve::new(vec![
            Point2d::new(0.0, 0.0),
            Point2d::new(3.0, 0.0),
            Point2d::new(3.0, 4.0),
        ])
        .unwrap()
    }

    #[test]
    fn construction_is_validated() {
        assert!(Curve::new(vec![]).is_err());
        assert!(Curve::new(vec![Point2d::new(0.0, 0.0)]).is_err());
        assert!(Curve::new(vec![Point2d::new(0.0, f64::NAN), Point2d::new(1.0, 0.0)]).is_err());
        assert!(Curve::new(vec![Point2d::new(0.0, 0.0), Point2d::new(1.0, 0.0)]).is_ok());
    }

    #[test]
    fn length_is_sum_of_segments() {
        assert_relative_eq!(open_curve().length(), 7.0);
    }

    #[test]
    fn point_at_interpolates_along_the_curve() {
        let curve = open_curve();
        let start = curve.point_at(0.0).unwrap();
        assert_relative_eq!(start.x, 0.0);

        let mid = curve.point_at(0.5).unwrap();
        assert_relative_eq!(mid.x, 3.0);
        assert_relative_eq!(mid.y, 0.5);

        let end = curve.point_at(2.0).unwrap();
        assert_relative_eq!(end.x, 3.0);
        assert_relative_eq!(end.y, 4.0);
    }

    #[test]
    fn closed_state() {
        assert!(!open_curve().is_closed());

        let closed = Curve::new(vec![
            Point2d::new(0.0, 0.0),
            Point2d::new(1.0, 0.0),
            Point2d::new(0.0, 1.0),
            Point2d::new(0.0, 0.0),
        ])
        .unwrap();
        assert!(closed.is_closed());
    }

    #[test]
    fn bounding_rect() {
        let rect = open_curve().bounding_rect();
        assert_eq!(rect, Rect::new(0.0, 0.0, 3.0, 4.0));
    }
}
