use serde::{Deserialize, Serialize};

use crate::cartesian::Point2d;

/// Axis-aligned rectangle used as a bounding envelope.
#[derive(Debug, Copy, Clone, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    /// Minimum X coordinate.
    pub x_min: f64,
    /// Minimum Y coordinate.
    pub y_min: f64,
    /// Maximum X coordinate.
    pub x_max: f64,
    /// Maximum Y coordinate.
    pub y_max: f64,
}

impl Rect {
    /// Creates a new rectangle.
    pub fn new(x_min: f64, y_min: f64, x_max: f64, y_max: f64) -> Self {
        Self {
            x_min,
            y_min,
            x_max,
            y_max,
        }
    }

    /// Width of the rectangle.
    pub fn width(&self) -> f64 {
        self.x_max - self.x_min
    }

    /// Height of the rectangle.
    pub fn height(&self) -> f64 {
        self.y_max - self.y_min
    }

    /// Center point of the rectangle.
    pub fn center(&self) -> Point2d {
        Point2d::new(
            (self.x_min + self.x_max) / 2.0,
            (self.y_min + self.y_max) / 2.0,
        )
    }

    /// Degenerate rectangle containing a single point.
    pub fn from_point(p: Point2d) -> Self {
        Self {
            x_min: p.x,
            x_max: p.x,
            y_min: p.y,
            y_max: p.y,
        }
    }

    /// Smallest rectangle containing all the given points. Returns `None` for
    /// an empty input.
    pub fn from_points(points: impl IntoIterator<Item = Point2d>) -> Option<Self> {
        let mut points = points.into_iter();
        let mut rect = Self::from_point(points.next()?);

        for p in points {
            if rect.x_min > p.x {
                rect.x_min = p.x;
            }
            if rect.y_min > p.y {
                rect.y_min = p.y;
            }
            if rect.x_max < p.x {
                rect.x_max = p.x;
            }
            if rect.y_max < p.y {
                rect.y_max = p.y;
            }
        }

        Some(rect)
    }

    /// Smallest rectangle containing both operands.
    pub fn merge(&self, other: Self) -> Self {
        Self {
            x_min: self.x_min.min(other.x_min),
            y_min: self.y_min.min(other.y_min),
            x_max: self.x_max.max(other.x_max),
            y_max: self.y_max.max(other.y_max),
        }
    }

    /// Common part of the two rectangles, or `None` if they are disjoint.
    pub fn intersection(&self, other: Self) -> Option<Self> {
        let x_min = self.x_min.max(other.x_min);
        let y_min = self.y_min.max(other.y_min);
        let x_max = self.x_max.min(other.x_max);
        let y_max = self.y_max.min(other.y_max);

        if x_min <= x_max && y_min <= y_max {
            Some(Self {
                x_min,
                y_min,
                x_max,
                y_max,
            })
        } else {
            None
        }
    }

    /// Returns true if the rectangles have at least one common point.
    pub fn intersects(&self, other: &Self) -> bool {
        self.x_min <= other.x_max
            && self.x_max >= other.x_min
            && self.y_min <= other.y_max
            && self.y_max >= other.y_min
    }

    /// Returns true if the point lies inside the rectangle or on its boundary.
    pub fn contains(&self, point: &Point2d) -> bool {
        self.x_min <= point.x
            && self.x_max >= point.x
            && self.y_min <= point.y
            && self.y_max >= point.y
    }
}
