//! Carta is a geospatial toolkit built around three concerns: storing and
//! querying geographic features, styling them for display, and accessing
//! tiled map data.
//!
//! # Quick start
//!
//! Put features into a [`FeatureStore`](feature::store::FeatureStore) and
//! select them with a [`Query`](query::Query):
//!
//! ```
//! use carta::feature::store::FeatureStore;
//! use carta::feature::SimpleFeature;
//! use carta::query::{ComparisonOp, Filter, Query, SortBy};
//! use carta_types::cartesian::Point2d;
//! use carta_types::geodetic::Crs;
//!
//! let store = FeatureStore::with_features(
//!     Crs::EPSG3857,
//!     [
//!         SimpleFeature::new("city.1", Point2d::new(0.0, 0.0))
//!             .with_attribute("population", 709_037i64),
//!         SimpleFeature::new("city.2", Point2d::new(100.0, 100.0))
//!             .with_attribute("population", 291_189i64),
//!     ],
//! );
//!
//! let query = Query::builder()
//!     .filter(Filter::compare(ComparisonOp::Gt, "population", 300_000i64))
//!     .sort_by(SortBy::descending("population"))
//!     .build();
//!
//! let selected = store.select(&query).expect("select failed");
//! assert_eq!(selected.len(), 1);
//! ```
//!
//! Queries compose with [`Query::sub_query`](query::Query::sub_query), and
//! the spatial bound of any filter can be derived without running it with
//! [`extract_envelope`](query::extract_envelope), which is what stores use to
//! skip features that cannot match.
//!
//! The [`style`] module turns features into drawing instructions, and the
//! [`tiles`] module covers the tile side: tile matrix sets, index math, url
//! resolution and cached tile loading.

mod color;

pub mod error;
pub mod feature;
pub mod query;
pub mod style;
pub mod tiles;

pub use color::Color;
pub use error::CartaError;

// Reexport carta_types
pub use carta_types;
