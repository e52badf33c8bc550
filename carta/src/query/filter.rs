use std::cmp::Ordering;

use carta_types::cartesian::Rect;
use carta_types::primitive::BoundedGeometry;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::feature::{AttributeValue, Feature};

/// A predicate over features, structured after the OGC Filter Encoding model.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Filter {
    /// Matches every feature.
    Include,
    /// Matches no feature.
    Exclude,
    /// Matches features whose geometry envelope intersects the extent.
    BBox {
        /// Envelope to test feature geometries against.
        extent: Rect,
    },
    /// Compares an attribute against a literal value.
    Compare {
        /// Comparison operator.
        op: ComparisonOp,
        /// Name of the attribute to compare.
        property: String,
        /// Literal to compare against.
        value: AttributeValue,
    },
    /// Matches features whose attribute lies in the inclusive range.
    Between {
        /// Name of the attribute to test.
        property: String,
        /// Lower bound of the range.
        lower: AttributeValue,
        /// Upper bound of the range.
        upper: AttributeValue,
    },
    /// Matches string attributes against a pattern, where `%` matches any
    /// substring and `_` matches a single character.
    Like {
        /// Name of the attribute to test.
        property: String,
        /// Wildcard pattern.
        pattern: String,
    },
    /// Inverts the inner filter.
    Not(Box<Filter>),
    /// Matches features that match all the inner filters.
    And(Vec<Filter>),
    /// Matches features that match at least one of the inner filters.
    Or(Vec<Filter>),
}

/// Operator of a [`Filter::Compare`] predicate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ComparisonOp {
    /// Values are equal.
    Eq,
    /// Values are not equal.
    Neq,
    /// Attribute is less than the literal.
    Lt,
    /// Attribute is less than or equal to the literal.
    Lte,
    /// Attribute is greater than the literal.
    Gt,
    /// Attribute is greater than or equal to the literal.
    Gte,
}

impl ComparisonOp {
    fn matches(&self, ordering: Ordering) -> bool {
        match self {
            ComparisonOp::Eq => ordering == Ordering::Equal,
            ComparisonOp::Neq => ordering != Ordering::Equal,
            ComparisonOp::Lt => ordering == Ordering::Less,
            ComparisonOp::Lte => ordering != Ordering::Greater,
            ComparisonOp::Gt => ordering == Ordering::Greater,
            ComparisonOp::Gte => ordering != Ordering::Less,
        }
    }
}

impl Filter {
    /// Creates a comparison filter.
    pub fn compare(
        op: ComparisonOp,
        property: impl Into<String>,
        value: impl Into<AttributeValue>,
    ) -> Self {
        Filter::Compare {
            op,
            property: property.into(),
            value: value.into(),
        }
    }

    /// Creates a bounding box filter.
    pub fn bbox(extent: Rect) -> Self {
        Filter::BBox { extent }
    }

    /// Combines two filters into a conjunction.
    ///
    /// `Include` operands are dropped, and nested conjunctions are flattened.
    pub fn and(self, other: Filter) -> Filter {
        match (self, other) {
            (Filter::Include, f) | (f, Filter::Include) => f,
            (Filter::And(mut left), Filter::And(right)) => {
                left.extend(right);
                Filter::And(left)
            }
            (Filter::And(mut left), f) => {
                left.push(f);
                Filter::And(left)
            }
            (f, Filter::And(mut right)) => {
                right.insert(0, f);
                Filter::And(right)
            }
            (left, right) => Filter::And(vec![left, right]),
        }
    }

    /// Combines two filters into a disjunction.
    ///
    /// `Exclude` operands are dropped, and nested disjunctions are flattened.
    pub fn or(self, other: Filter) -> Filter {
        match (self, other) {
            (Filter::Exclude, f) | (f, Filter::Exclude) => f,
            (Filter::Or(mut left), Filter::Or(right)) => {
                left.extend(right);
                Filter::Or(left)
            }
            (Filter::Or(mut left), f) => {
                left.push(f);
                Filter::Or(left)
            }
            (f, Filter::Or(mut right)) => {
                right.insert(0, f);
                Filter::Or(right)
            }
            (left, right) => Filter::Or(vec![left, right]),
        }
    }

    /// Inverts the filter.
    pub fn not(self) -> Filter {
        Filter::Not(Box::new(self))
    }

    /// Tests the filter against a feature.
    ///
    /// Comparisons against a missing attribute or between values of
    /// unrelated types do not match.
    pub fn evaluate<F>(&self, feature: &F) -> bool
    where
        F: Feature,
        F::Geom: BoundedGeometry,
    {
        match self {
            Filter::Include => true,
            Filter::Exclude => false,
            Filter::BBox { extent } => feature
                .geometry()
                .bounding_rect()
                .is_some_and(|rect| extent.intersects(&rect)),
            Filter::Compare {
                op,
                property,
                value,
            } => feature
                .attribute(property)
                .and_then(|attribute| attribute.compare(value))
                .is_some_and(|ordering| op.matches(ordering)),
            Filter::Between {
                property,
                lower,
                upper,
            } => feature.attribute(property).is_some_and(|attribute| {
                attribute.compare(lower) == Some(Ordering::Greater)
                    && attribute.compare(upper) == Some(Ordering::Less)
                    || attribute.compare(lower) == Some(Ordering::Equal)
                    || attribute.compare(upper) == Some(Ordering::Equal)
            }),
            Filter::Like { property, pattern } => {
                match feature.attribute(property) {
                    Some(AttributeValue::String(value)) => wildcard_regex(pattern)
                        .map(|regex| regex.is_match(&value))
                        .unwrap_or(false),
                    _ => false,
                }
            }
            Filter::Not(inner) => !inner.evaluate(feature),
            Filter::And(inner) => inner.iter().all(|f| f.evaluate(feature)),
            Filter::Or(inner) => inner.iter().any(|f| f.evaluate(feature)),
        }
    }
}

/// Translates an OGC wildcard pattern (`%` for any substring, `_` for a
/// single character, `\` escapes) into an anchored regex.
fn wildcard_regex(pattern: &str) -> Option<Regex> {
    let mut translated = String::with_capacity(pattern.len() + 2);
    translated.push('^');

    let mut chars = pattern.chars();
    while let Some(c) = chars.next() {
        match c {
            '%' => translated.push_str(".*"),
            '_' => translated.push('.'),
            '\\' => {
                if let Some(escaped) = chars.next() {
                    translated.push_str(&regex::escape(&escaped.to_string()));
                }
            }
            other => translated.push_str(&regex::escape(&other.to_string())),
        }
    }

    translated.push('$');
    Regex::new(&translated).ok()
}

#[cfg(test)]
mod tests {
    use carta_types::cartesian::Point2d;

    use super::*;
    use crate::feature::SimpleFeature;

    fn feature() -> SimpleFeature {
        SimpleFeature::new("test.1", Point2d::new(10.0, 20.0))
            .with_attribute("name", "Bergen")
            .with_attribute("population", 291_189i64)
    }

    #[test]
    fn comparison() {
        let feature = feature();

        assert!(Filter::compare(ComparisonOp::Eq, "name", "Bergen").evaluate(&feature));
        assert!(Filter::compare(ComparisonOp::Gt, "population", 100_000i64).evaluate(&feature));
        assert!(Filter::compare(ComparisonOp::Lte, "population", 291_189.0).evaluate(&feature));
        assert!(!Filter::compare(ComparisonOp::Lt, "population", 100_000i64).evaluate(&feature));

        // missing attribute or type mismatch never matches
        assert!(!Filter::compare(ComparisonOp::Eq, "altitude", 0i64).evaluate(&feature));
        assert!(!Filter::compare(ComparisonOp::Eq, "name", 42i64).evaluate(&feature));
        assert!(!Filter::compare(ComparisonOp::Neq, "name", 42i64).evaluate(&feature));
    }

    #[test]
    fn between() {
        let feature = feature();
        let filter = Filter::Between {
            property: "population".into(),
            lower: 100_000i64.into(),
            upper: 300_000i64.into(),
        };
        assert!(filter.evaluate(&feature));

        let filter = Filter::Between {
            property: "population".into(),
            lower: 291_189i64.into(),
            upper: 291_189i64.into(),
        };
        assert!(filter.evaluate(&feature), "range bounds are inclusive");

        let filter = Filter::Between {
            property: "population".into(),
            lower: 300_000i64.into(),
            upper: 400_000i64.into(),
        };
        assert!(!filter.evaluate(&feature));
    }

    #[test]
    fn like_patterns() {
        let feature = feature();

        let like = |pattern: &str| Filter::Like {
            property: "name".into(),
            pattern: pattern.into(),
        };

        assert!(like("Bergen").evaluate(&feature));
        assert!(like("Ber%").evaluate(&feature));
        assert!(like("%gen").evaluate(&feature));
        assert!(like("B_rgen").evaluate(&feature));
        assert!(!like("Ber").evaluate(&feature));
        assert!(!like("b%").evaluate(&feature));

        let non_string = Filter::Like {
            property: "population".into(),
            pattern: "%".into(),
        };
        assert!(!non_string.evaluate(&feature));
    }

    #[test]
    fn bbox() {
        let feature = feature();

        assert!(Filter::bbox(Rect::new(0.0, 0.0, 15.0, 25.0)).evaluate(&feature));
        assert!(!Filter::bbox(Rect::new(0.0, 0.0, 5.0, 5.0)).evaluate(&feature));
    }

    #[test]
    fn logical_operators() {
        let feature = feature();
        let name = Filter::compare(ComparisonOp::Eq, "name", "Bergen");
        let small = Filter::compare(ComparisonOp::Lt, "population", 1000i64);

        assert!(name.clone().and(Filter::Include).evaluate(&feature));
        assert!(!name.clone().and(small.clone()).evaluate(&feature));
        assert!(name.clone().or(small.clone()).evaluate(&feature));
        assert!(small.clone().not().evaluate(&feature));
        assert!(!Filter::Exclude.evaluate(&feature));
    }

    #[test]
    fn constructors_flatten() {
        let a = Filter::compare(ComparisonOp::Eq, "a", 1i64);
        let b = Filter::compare(ComparisonOp::Eq, "b", 2i64);
        let c = Filter::compare(ComparisonOp::Eq, "c", 3i64);

        assert_eq!(a.clone().and(Filter::Include), a);
        assert_eq!(Filter::Include.and(a.clone()), a);

        let combined = a.clone().and(b.clone()).and(c.clone());
        assert_eq!(combined, Filter::And(vec![a.clone(), b.clone(), c.clone()]));

        let combined = a.clone().or(b.clone()).or(c.clone());
        assert_eq!(combined, Filter::Or(vec![a, b, c]));
    }
}
