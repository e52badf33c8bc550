//! Geometric primitives over the planar engine.
//!
//! The types in this module follow the ISO-19107 primitive model: a point, a
//! curve with linear interpolation, a closed ring, a surface patch bounded by
//! rings and a polyhedral surface composed of patches. None of them implement
//! geometric algorithms themselves: measurement and predicates are delegated
//! to the [`geo`] engine through the `to_*` conversion methods.

mod curve;
mod factory;
mod ring;
mod surface;

pub use curve::Curve;
pub use factory::PrimitiveFactory;
pub use ring::Ring;
pub use surface::{PolyhedralSurface, SurfacePatch};

use crate::cartesian::{Point2d, Rect};
use crate::error::CartaTypesError;
use crate::geodetic::Projection;

use serde::{Deserialize, Serialize};

/// Geometry that can report the smallest rectangle containing it.
pub trait BoundedGeometry {
    /// Smallest rectangle containing the geometry, if the geometry is not
    /// empty.
    fn bounding_rect(&self) -> Option<Rect>;
}

impl BoundedGeometry for Point2d {
    fn bounding_rect(&self) -> Option<Rect> {
        Some(Rect::from_point(*self))
    }
}

impl BoundedGeometry for Curve {
    fn bounding_rect(&self) -> Option<Rect> {
        Some(Curve::bounding_rect(self))
    }
}

impl BoundedGeometry for Ring {
    fn bounding_rect(&self) -> Option<Rect> {
        Some(Ring::bounding_rect(self))
    }
}

impl BoundedGeometry for SurfacePatch {
    fn bounding_rect(&self) -> Option<Rect> {
        Some(SurfacePatch::bounding_rect(self))
    }
}

impl BoundedGeometry for PolyhedralSurface {
    fn bounding_rect(&self) -> Option<Rect> {
        PolyhedralSurface::bounding_rect(self)
    }
}

impl BoundedGeometry for Primitive {
    fn bounding_rect(&self) -> Option<Rect> {
        Primitive::bounding_rect(self)
    }
}

/// A geometric primitive of any kind.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Primitive {
    /// A single planar position.
    Point(Point2d),
    /// A curve.
    Curve(Curve),
    /// A closed ring.
    Ring(Ring),
    /// A single surface patch.
    Surface(SurfacePatch),
    /// A surface composed of patches.
    PolyhedralSurface(PolyhedralSurface),
}

impl Primitive {
    /// Smallest rectangle containing the primitive. Returns `None` only for
    /// an empty polyhedral surface.
    pub fn bounding_rect(&self) -> Option<Rect> {
        match self {
            Primitive::Point(p) => Some(Rect::from_point(*p)),
            Primitive::Curve(v) => Some(v.bounding_rect()),
            Primitive::Ring(v) => Some(v.bounding_rect()),
            Primitive::Surface(v) => Some(v.bounding_rect()),
            Primitive::PolyhedralSurface(v) => v.bounding_rect(),
        }
    }

    /// Converts the primitive from the planar space of the `from` projection
    /// into the planar space of the `to` projection.
    ///
    /// Returns `None` if any position cannot be represented in the target
    /// space.
    pub fn reproject(&self, from: &dyn Projection, to: &dyn Projection) -> Option<Primitive> {
        let convert = |positions: &[Point2d]| -> Option<Vec<Point2d>> {
            positions
                .iter()
                .map(|p| to.project(&from.unproject(p)?))
                .collect()
        };

        match self {
            Primitive::Point(p) => Some(Primitive::Point(to.project(&from.unproject(p)?)?)),
            Primitive::Curve(v) => Curve::new(convert(v.positions())?).ok().map(Into::into),
            Primitive::Ring(v) => Ring::new(convert(v.positions())?).ok().map(Into::into),
            Primitive::Surface(v) => {
                Some(Primitive::Surface(reproject_patch(v, &convert)?))
            }
            Primitive::PolyhedralSurface(v) => {
                let patches = v
                    .patches()
                    .iter()
                    .map(|patch| reproject_patch(patch, &convert))
                    .collect::<Option<Vec<_>>>()?;
                Some(Primitive::PolyhedralSurface(PolyhedralSurface::new(
                    patches,
                )))
            }
        }
    }
}

fn reproject_patch(
    patch: &SurfacePatch,
    convert: &impl Fn(&[Point2d]) -> Option<Vec<Point2d>>,
) -> Option<SurfacePatch> {
    let exterior = Ring::new(convert(patch.exterior().positions())?).ok()?;
    let interiors = patch
        .interiors()
        .iter()
        .map(|ring| Ring::new(convert(ring.positions())?).ok())
        .collect::<Option<Vec<_>>>()?;

    Some(SurfacePatch::new(exterior, interiors))
}

impl From<Point2d> for Primitive {
    fn from(value: Point2d) -> Self {
        Self::Point(value)
    }
}

impl From<Curve> for Primitive {
    fn from(value: Curve) -> Self {
        Self::Curve(value)
    }
}

impl From<Ring> for Primitive {
    fn from(value: Ring) -> Self {
        Self::Ring(value)
    }
}

impl From<SurfacePatch> for Primitive {
    fn from(value: SurfacePatch) -> Self {
        Self::Surface(value)
    }
}

impl From<PolyhedralSurface> for Primitive {
    fn from(value: PolyhedralSurface) -> Self {
        Self::PolyhedralSurface(value)
    }
}

pub(crate) fn line_string(positions: &[Point2d]) -> geo_types::LineString<f64> {
    geo_types::LineString::new(
        positions
            .iter()
            .map(|p| geo_types::Coord { x: p.x, y: p.y })
            .collect(),
    )
}

pub(crate) fn check_positions(positions: &[Point2d]) -> Result<(), CartaTypesError> {
    if positions.iter().any(|p| !p.x.is_finite() || !p.y.is_finite()) {
        return Err(CartaTypesError::InvalidGeometry(
            "positions must have finite coordinates".into(),
        ));
    }

    Ok(())
}
