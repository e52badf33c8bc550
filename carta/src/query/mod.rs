//! Feature queries and the filter algebra behind them.
//!
//! A [`Query`] describes which features to return and how: a [`Filter`]
//! constrains the feature set, the sort chain orders it, offset/limit page
//! through it, and the optional property list projects the attributes.
//! Queries compose: [`Query::sub_query`] restricts an outer query with an
//! inner one, which is how layered views over the same store are built.

mod envelope;
mod filter;
mod sort;

pub use envelope::{extract_envelope, FilterEnvelope};
pub use filter::{ComparisonOp, Filter};
pub use sort::{SortBy, SortOrder};

pub(crate) use sort::compare_features;

use carta_types::geodetic::Crs;
use serde::{Deserialize, Serialize};

/// Specification of a feature selection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Query {
    filter: Filter,
    properties: Option<Vec<String>>,
    sort_by: Vec<SortBy>,
    offset: usize,
    limit: Option<usize>,
    crs: Option<Crs>,
    resolution: Option<[f64; 2]>,
}

impl Query {
    /// The query matching every feature of a store.
    pub fn all() -> Self {
        Self {
            filter: Filter::Include,
            properties: None,
            sort_by: vec![],
            offset: 0,
            limit: None,
            crs: None,
            resolution: None,
        }
    }

    /// Creates a builder for a query.
    pub fn builder() -> QueryBuilder {
        QueryBuilder::default()
    }

    /// Filter of the query.
    pub fn filter(&self) -> &Filter {
        &self.filter
    }

    /// Attribute subset to return, or `None` for all attributes.
    pub fn properties(&self) -> Option<&[String]> {
        self.properties.as_deref()
    }

    /// Sort chain of the query.
    pub fn sort_by(&self) -> &[SortBy] {
        &self.sort_by
    }

    /// Number of leading features to skip.
    pub fn offset(&self) -> usize {
        self.offset
    }

    /// Maximum number of features to return, or `None` for no limit.
    pub fn limit(&self) -> Option<usize> {
        self.limit
    }

    /// CRS the query coordinates are expressed in, or `None` for the store
    /// native CRS.
    pub fn crs(&self) -> Option<&Crs> {
        self.crs.as_ref()
    }

    /// Linear resolution of the display the result is intended for, or
    /// `None` when full detail is requested.
    pub fn resolution(&self) -> Option<[f64; 2]> {
        self.resolution
    }

    /// Restricts this query with an inner one.
    ///
    /// The combined query selects the features the inner query would select
    /// from the result of the outer query:
    /// * filters are combined into a conjunction;
    /// * offsets are summed, the limit is the smaller of the two;
    /// * the sort chain is the outer chain followed by the inner one;
    /// * the inner CRS overrides the outer one;
    /// * the resolution is the finer of the two, per axis;
    /// * the property subset is the intersection of the two subsets.
    pub fn sub_query(&self, inner: &Query) -> Query {
        let limit = match (self.limit, inner.limit) {
            (Some(outer), Some(inner)) => Some(outer.min(inner)),
            (outer, inner) => outer.or(inner),
        };

        let resolution = match (self.resolution, inner.resolution) {
            (Some(outer), Some(inner)) => Some([outer[0].min(inner[0]), outer[1].min(inner[1])]),
            (outer, inner) => outer.or(inner),
        };

        let properties = match (&self.properties, &inner.properties) {
            (Some(outer), Some(inner)) => Some(
                outer
                    .iter()
                    .filter(|property| inner.contains(property))
                    .cloned()
                    .collect(),
            ),
            (outer, inner) => outer.clone().or_else(|| inner.clone()),
        };

        Query {
            filter: self.filter.clone().and(inner.filter.clone()),
            properties,
            sort_by: self
                .sort_by
                .iter()
                .chain(inner.sort_by.iter())
                .cloned()
                .collect(),
            offset: self.offset + inner.offset,
            limit,
            crs: inner.crs.clone().or_else(|| self.crs.clone()),
            resolution,
        }
    }
}

impl Default for Query {
    fn default() -> Self {
        Self::all()
    }
}

/// Builder for a [`Query`].
#[derive(Debug, Clone, Default)]
pub struct QueryBuilder {
    query: Query,
}

impl QueryBuilder {
    /// Sets the filter of the query.
    pub fn filter(mut self, filter: Filter) -> Self {
        self.query.filter = filter;
        self
    }

    /// Sets the attribute subset to return.
    pub fn properties(
        mut self,
        properties: impl IntoIterator<Item = impl Into<String>>,
    ) -> Self {
        self.query.properties = Some(properties.into_iter().map(Into::into).collect());
        self
    }

    /// Appends a term to the sort chain.
    pub fn sort_by(mut self, sort_by: SortBy) -> Self {
        self.query.sort_by.push(sort_by);
        self
    }

    /// Sets the number of leading features to skip.
    pub fn offset(mut self, offset: usize) -> Self {
        self.query.offset = offset;
        self
    }

    /// Sets the maximum number of features to return.
    pub fn limit(mut self, limit: usize) -> Self {
        self.query.limit = Some(limit);
        self
    }

    /// Sets the CRS the query coordinates are expressed in.
    pub fn crs(mut self, crs: Crs) -> Self {
        self.query.crs = Some(crs);
        self
    }

    /// Sets the linear resolution the result is intended for.
    pub fn resolution(mut self, resolution: [f64; 2]) -> Self {
        self.query.resolution = Some(resolution);
        self
    }

    /// Builds the query.
    pub fn build(self) -> Query {
        self.query
    }
}

#[cfg(test)]
mod tests {
    use carta_types::cartesian::Rect;

    use super::*;

    fn outer() -> Query {
        Query::builder()
            .filter(Filter::bbox(Rect::new(0.0, 0.0, 10.0, 10.0)))
            .properties(["name", "population"])
            .sort_by(SortBy::ascending("name"))
            .offset(5)
            .limit(100)
            .resolution([10.0, 10.0])
            .build()
    }

    fn inner() -> Query {
        Query::builder()
            .filter(Filter::compare(ComparisonOp::Gt, "population", 1000i64))
            .properties(["population", "mayor"])
            .sort_by(SortBy::descending("population"))
            .offset(2)
            .limit(20)
            .crs(Crs::EPSG3857)
            .resolution([5.0, 20.0])
            .build()
    }

    #[test]
    fn sub_query_combines_all_fields() {
        let combined = outer().sub_query(&inner());

        assert_eq!(
            combined.filter(),
            &Filter::And(vec![
                Filter::bbox(Rect::new(0.0, 0.0, 10.0, 10.0)),
                Filter::compare(ComparisonOp::Gt, "population", 1000i64),
            ])
        );
        assert_eq!(combined.offset(), 7);
        assert_eq!(combined.limit(), Some(20));
        assert_eq!(
            combined.sort_by(),
            &[
                SortBy::ascending("name"),
                SortBy::descending("population")
            ]
        );
        assert_eq!(combined.crs(), Some(&Crs::EPSG3857));
        assert_eq!(combined.resolution(), Some([5.0, 10.0]));
        assert_eq!(
            combined.properties(),
            Some(&["population".to_string()][..])
        );
    }

    #[test]
    fn sub_query_with_empty_query_is_identity() {
        let query = outer();

        let combined = query.sub_query(&Query::all());
        assert_eq!(combined, query);

        let combined = Query::all().sub_query(&query);
        assert_eq!(combined, query);
    }

    #[test]
    fn missing_fields_are_taken_from_either_side() {
        let with_limit = Query::builder().limit(10).build();
        let combined = Query::all().sub_query(&with_limit);
        assert_eq!(combined.limit(), Some(10));

        let combined = with_limit.sub_query(&Query::all());
        assert_eq!(combined.limit(), Some(10));
    }

    #[test]
    fn query_serialization_roundtrip() {
        let query = outer();
        let serialized = serde_json::to_string(&query).expect("serialization failed");
        let deserialized: Query = serde_json::from_str(&serialized).expect("parsing failed");
        assert_eq!(deserialized, query);
    }
}
