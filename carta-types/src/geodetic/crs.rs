use serde::{Deserialize, Serialize};

use crate::geodetic::projection::{IdentityProjection, Projection, WebMercator};
use crate::geodetic::Datum;

/// Coordinate reference system descriptor.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Crs {
    datum: Datum,
    projection_type: ProjectionType,
}

/// Projection used by a [`Crs`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[non_exhaustive]
pub enum ProjectionType {
    /// The projection of the CRS is not known.
    Unknown,
    /// Geographic CRS without a projection. Coordinates are degrees.
    None,
    /// Spherical Web Mercator.
    WebMercator,
    /// Projection identified by the given definition string.
    Other(String),
}

impl Crs {
    /// Web Mercator CRS used by most web mapping services.
    pub const EPSG3857: Crs = Crs {
        datum: Datum::WGS84,
        projection_type: ProjectionType::WebMercator,
    };

    /// Geographic WGS84 CRS.
    pub const WGS84: Crs = Crs {
        datum: Datum::WGS84,
        projection_type: ProjectionType::None,
    };

    /// Creates a CRS with the given datum and projection.
    pub fn new(datum: Datum, projection_type: ProjectionType) -> Self {
        Self {
            datum,
            projection_type,
        }
    }

    /// Datum of the CRS.
    pub fn datum(&self) -> Datum {
        self.datum
    }

    /// Projection type of the CRS.
    pub fn projection_type(&self) -> &ProjectionType {
        &self.projection_type
    }

    /// Returns the projection into the planar space of this CRS, if one is
    /// known.
    pub fn get_projection(&self) -> Option<Box<dyn Projection>> {
        match self.projection_type {
            ProjectionType::WebMercator => Some(Box::new(WebMercator::new(self.datum))),
            ProjectionType::None => Some(Box::new(IdentityProjection)),
            _ => None,
        }
    }
}
