use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

use crate::feature::Feature;

/// Direction of a sort term.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SortOrder {
    /// Smallest values first.
    Ascending,
    /// Largest values first.
    Descending,
}

/// A single term of a sort chain.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SortBy {
    /// Name of the attribute to sort by.
    pub property: String,
    /// Direction of the sort.
    pub order: SortOrder,
}

impl SortBy {
    /// Creates an ascending sort term.
    pub fn ascending(property: impl Into<String>) -> Self {
        Self {
            property: property.into(),
            order: SortOrder::Ascending,
        }
    }

    /// Creates a descending sort term.
    pub fn descending(property: impl Into<String>) -> Self {
        Self {
            property: property.into(),
            order: SortOrder::Descending,
        }
    }
}

/// Compares two features over a sort chain.
///
/// Terms are applied in order until one of them breaks the tie. Features with
/// a missing or non-comparable attribute value sort after the comparable
/// ones, regardless of the sort direction.
pub(crate) fn compare_features<F: Feature>(sort_by: &[SortBy], a: &F, b: &F) -> Ordering {
    for term in sort_by {
        let left = a.attribute(&term.property);
        let right = b.attribute(&term.property);

        let ordering = match (&left, &right) {
            (None, None) => Ordering::Equal,
            (None, Some(_)) => Ordering::Greater,
            (Some(_), None) => Ordering::Less,
            (Some(left), Some(right)) => match left.compare(right) {
                Some(ordering) => match term.order {
                    SortOrder::Ascending => ordering,
                    SortOrder::Descending => ordering.reverse(),
                },
                None => Ordering::Equal,
            },
        };

        if ordering != Ordering::Equal {
            return ordering;
        }
    }

    Ordering::Equal
}

#[cfg(test)]
mod tests {
    use carta_types::cartesian::Point2d;

    use super::*;
    use crate::feature::SimpleFeature;

    fn feature(name: &str, population: i64) -> SimpleFeature {
        SimpleFeature::new(name, Point2d::new(0.0, 0.0))
            .with_attribute("name", name)
            .with_attribute("population", population)
    }

    #[test]
    fn single_term() {
        let a = feature("a", 10);
        let b = feature("b", 5);

        let sort = [SortBy::ascending("population")];
        assert_eq!(compare_features(&sort, &a, &b), Ordering::Greater);

        let sort = [SortBy::descending("population")];
        assert_eq!(compare_features(&sort, &a, &b), Ordering::Less);
    }

    #[test]
    fn tie_broken_by_next_term() {
        let a = feature("a", 10);
        let b = feature("b", 10);

        let sort = [SortBy::ascending("population"), SortBy::ascending("name")];
        assert_eq!(compare_features(&sort, &a, &b), Ordering::Less);
    }

    #[test]
    fn missing_values_sort_last() {
        let a = feature("a", 10);
        let b = SimpleFeature::new("b", Point2d::new(0.0, 0.0)).with_attribute("name", "b");

        let ascending = [SortBy::ascending("population")];
        assert_eq!(compare_features(&ascending, &a, &b), Ordering::Less);

        let descending = [SortBy::descending("population")];
        assert_eq!(compare_features(&descending, &a, &b), Ordering::Less);
    }
}
