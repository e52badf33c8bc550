use geo::{Area, EuclideanLength};
use serde::{Deserialize, Serialize};

use crate::cartesian::{Point2d, Rect};
use crate::error::CartaTypesError;
use crate::primitive::check_positions;

/// A closed curve bounding a surface patch.
///
/// The stored position sequence is always closed: the last position equals
/// the first one. Construction closes the input if needed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Ring {
    positions: Vec<Point2d>,
}

impl Ring {
    /// Creates a ring from the given positions, closing the sequence if the
    /// input is not closed.
    pub fn new(mut positions: Vec<Point2d>) -> Result<Self, CartaTypesError> {
        check_positions(&positions)?;

        if positions.first() != positions.last() {
            let first = positions[0];
            positions.push(first);
        }

        // 3 distinct positions and the closing one
        if positions.len() < 4 {
            return Err(CartaTypesError::InvalidGeometry(
                "a ring requires at least 3 distinct positions".into(),
            ));
        }

        Ok(Self { positions })
    }

    /// Positions of the ring, including the closing one.
    pub fn positions(&self) -> &[Point2d] {
        &self.positions
    }

    /// Unsigned area enclosed by the ring.
    pub fn area(&self) -> f64 {
        self.to_polygon().unsigned_area()
    }

    /// Length of the ring boundary.
    pub fn perimeter(&self) -> f64 {
        self.to_line_string().euclidean_length()
    }

    /// Returns true if the ring positions are in counter-clockwise order.
    pub fn is_ccw(&self) -> bool {
        self.to_polygon().signed_area() > 0.0
    }

    /// Converts the ring into an engine line string.
    pub fn to_line_string(&self) -> geo_types::LineString<f64> {
        crate::primitive::line_string(&self.positions)
    }

    /// Converts the ring into an engine polygon without interior rings.
    pub fn to_polygon(&self) -> geo_types::Polygon<f64> {
        geo_types::Polygon::new(self.to_line_string(), vec![])
    }

    /// Smallest rectangle containing the ring.
    pub fn bounding_rect(&self) -> Rect {
        Rect::from_points(self.positions.iter().copied())
            .expect("ring positions are never empty")
    }
}
