use geo::{Area, Contains, Intersects};
use serde::{Deserialize, Serialize};

use crate::cartesian::{Point2d, Rect};
use crate::primitive::Ring;

/// A planar polygon: one exterior ring and any number of interior rings
/// (holes).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SurfacePatch {
    exterior: Ring,
    interiors: Vec<Ring>,
}

impl SurfacePatch {
    /// Creates a patch with the given boundary rings.
    pub fn new(exterior: Ring, interiors: Vec<Ring>) -> Self {
        Self {
            exterior,
            interiors,
        }
    }

    /// Exterior ring of the patch.
    pub fn exterior(&self) -> &Ring {
        &self.exterior
    }

    /// Interior rings of the patch.
    pub fn interiors(&self) -> &[Ring] {
        &self.interiors
    }

    /// Area of the patch with the interior rings subtracted.
    pub fn area(&self) -> f64 {
        self.to_polygon().unsigned_area()
    }

    /// Total length of all boundary rings.
    pub fn perimeter(&self) -> f64 {
        self.exterior.perimeter() + self.interiors.iter().map(Ring::perimeter).sum::<f64>()
    }

    /// Returns true if the point lies inside the patch and outside of its
    /// holes.
    pub fn contains_point(&self, point: &Point2d) -> bool {
        self.to_polygon()
            .contains(&geo_types::Point::new(point.x, point.y))
    }

    /// Converts the patch into an engine polygon.
    pub fn to_polygon(&self) -> geo_types::Polygon<f64> {
        geo_types::Polygon::new(
            self.exterior.to_line_string(),
            self.interiors.iter().map(Ring::to_line_string).collect(),
        )
    }

    /// Smallest rectangle containing the patch.
    pub fn bounding_rect(&self) -> Rect {
        self.exterior.bounding_rect()
    }
}

/// A surface composed of planar patches.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PolyhedralSurface {
    patches: Vec<SurfacePatch>,
}

impl PolyhedralSurface {
    /// Creates a surface from the given patches.
    pub fn new(patches: Vec<SurfacePatch>) -> Self {
        Self { patches }
    }

    /// Patches of the surface.
    pub fn patches(&self) -> &[SurfacePatch] {
        &self.patches
    }

    /// Sum of the patch areas.
    pub fn area(&self) -> f64 {
        self.patches.iter().map(SurfacePatch::area).sum()
    }

    /// Converts the surface into an engine multi-polygon.
    pub fn to_multi_polygon(&self) -> geo_types::MultiPolygon<f64> {
        geo_types::MultiPolygon(self.patches.iter().map(SurfacePatch::to_polygon).collect())
    }

    /// Smallest rectangle containing all the patches. Returns `None` for a
    /// surface without patches.
    pub fn bounding_rect(&self) -> Option<Rect> {
        let mut patches = self.patches.iter();
        let mut rect = patches.next()?.bounding_rect();
        for patch in patches {
            rect = rect.merge(patch.bounding_rect());
        }

        Some(rect)
    }

    /// Returns true if the two surfaces have at least one common point.
    pub fn intersects(&self, other: &PolyhedralSurface) -> bool {
        self.to_multi_polygon().intersects(&other.to_multi_polygon())
    }
}
