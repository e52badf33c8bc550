//! Geometric primitives, planar envelopes and coordinate reference systems
//! used by the carta geospatial toolkit.
//!
//! The crate follows the classic split between *geographic* coordinates
//! (latitude/longitude on a datum, see [`geodetic`]) and *planar* coordinates
//! (projected units, see [`cartesian`]). Geometric computation is not
//! reimplemented here: the primitives in [`primitive`] own their coordinate
//! data and delegate measurement and predicates to the [`geo`] planar-geometry
//! engine.

pub mod cartesian;
pub mod error;
pub mod geodetic;
pub mod primitive;

pub use error::CartaTypesError;
