//! Feature model of the toolkit.
//!
//! A feature is a geographic object: a geometry plus a set of named
//! attributes. Anything implementing the [`Feature`] trait can be stored in a
//! [`FeatureStore`](store::FeatureStore) and queried with the
//! [`query`](crate::query) module.

pub mod store;

use std::cmp::Ordering;

use carta_types::cartesian::Point2d;
use carta_types::primitive::{Curve, PolyhedralSurface, Primitive, Ring, SurfacePatch};
use serde::{Deserialize, Serialize};

/// Value of a feature attribute.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum AttributeValue {
    /// Missing value.
    Null,
    /// Boolean value.
    Boolean(bool),
    /// Integer value.
    Integer(i64),
    /// Floating point value.
    Float(f64),
    /// String value.
    String(String),
}

impl AttributeValue {
    /// Numeric view of the value, if it has one.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            AttributeValue::Integer(v) => Some(*v as f64),
            AttributeValue::Float(v) => Some(*v),
            _ => None,
        }
    }

    /// Compares two attribute values.
    ///
    /// Numeric values compare across the integer/float divide. Values of
    /// unrelated types, and `Null` values, are not comparable.
    pub fn compare(&self, other: &AttributeValue) -> Option<Ordering> {
        use AttributeValue::*;

        match (self, other) {
            (Boolean(a), Boolean(b)) => Some(a.cmp(b)),
            (String(a), String(b)) => Some(a.cmp(b)),
            (Integer(a), Integer(b)) => Some(a.cmp(b)),
            (Integer(_) | Float(_), Integer(_) | Float(_)) => {
                self.as_f64()?.partial_cmp(&other.as_f64()?)
            }
            _ => None,
        }
    }
}

impl From<&str> for AttributeValue {
    fn from(value: &str) -> Self {
        Self::String(value.into())
    }
}

impl From<String> for AttributeValue {
    fn from(value: String) -> Self {
        Self::String(value)
    }
}

impl From<i64> for AttributeValue {
    fn from(value: i64) -> Self {
        Self::Integer(value)
    }
}

impl From<f64> for AttributeValue {
    fn from(value: f64) -> Self {
        Self::Float(value)
    }
}

impl From<bool> for AttributeValue {
    fn from(value: bool) -> Self {
        Self::Boolean(value)
    }
}

/// A feature is an arbitrary geographic object.
pub trait Feature {
    /// Type of the geometry the feature returns.
    type Geom;

    /// Returns the geometry of the feature.
    fn geometry(&self) -> &Self::Geom;

    /// Returns the value of the named attribute, or `None` if the feature
    /// does not have it.
    fn attribute(&self, name: &str) -> Option<AttributeValue>;

    /// Names of the attributes of the feature.
    fn attribute_names(&self) -> Vec<&str>;
}

macro_rules! impl_feature {
    ($geom:ident) => {
        impl Feature for $geom {
            type Geom = Self;

            fn geometry(&self) -> &Self::Geom {
                self
            }

            fn attribute(&self, _name: &str) -> Option<AttributeValue> {
                None
            }

            fn attribute_names(&self) -> Vec<&str> {
                vec![]
            }
        }
    };
}

impl_feature!(Point2d);
impl_feature!(Curve);
impl_feature!(Ring);
impl_feature!(SurfacePatch);
impl_feature!(PolyhedralSurface);
impl_feature!(Primitive);

/// A feature with a primitive geometry and an ordered attribute map.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimpleFeature {
    id: String,
    geometry: Primitive,
    attributes: Vec<(String, AttributeValue)>,
}

impl SimpleFeature {
    /// Creates a feature with the given id and geometry and no attributes.
    pub fn new(id: impl Into<String>, geometry: impl Into<Primitive>) -> Self {
        Self {
            id: id.into(),
            geometry: geometry.into(),
            attributes: vec![],
        }
    }

    /// Adds an attribute to the feature.
    pub fn with_attribute(
        mut self,
        name: impl Into<String>,
        value: impl Into<AttributeValue>,
    ) -> Self {
        self.set_attribute(name, value);
        self
    }

    /// Identifier of the feature.
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Sets the value of an attribute, replacing the previous value if the
    /// attribute already exists.
    pub fn set_attribute(&mut self, name: impl Into<String>, value: impl Into<AttributeValue>) {
        let name = name.into();
        let value = value.into();
        match self.attributes.iter_mut().find(|(n, _)| *n == name) {
            Some((_, v)) => *v = value,
            None => self.attributes.push((name, value)),
        }
    }
}

impl Feature for SimpleFeature {
    type Geom = Primitive;

    fn geometry(&self) -> &Self::Geom {
        &self.geometry
    }

    fn attribute(&self, name: &str) -> Option<AttributeValue> {
        self.attributes
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v.clone())
    }

    fn attribute_names(&self) -> Vec<&str> {
        self.attributes.iter().map(|(n, _)| n.as_str()).collect()
    }
}

/// View of a feature restricted to a subset of its attributes.
///
/// Used to apply the property projection of a
/// [`Query`](crate::query::Query) without copying the feature.
pub struct Projected<'a, F> {
    feature: &'a F,
    properties: &'a [String],
}

impl<'a, F> Projected<'a, F> {
    /// Creates a view of `feature` exposing only the given properties.
    pub fn new(feature: &'a F, properties: &'a [String]) -> Self {
        Self {
            feature,
            properties,
        }
    }
}

impl<'a, F: Feature> Feature for Projected<'a, F> {
    type Geom = F::Geom;

    fn geometry(&self) -> &Self::Geom {
        self.feature.geometry()
    }

    fn attribute(&self, name: &str) -> Option<AttributeValue> {
        if self.properties.iter().any(|p| p == name) {
            self.feature.attribute(name)
        } else {
            None
        }
    }

    fn attribute_names(&self) -> Vec<&str> {
        self.feature
            .attribute_names()
            .into_iter()
            .filter(|name| self.properties.iter().any(|p| p == name))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn city() -> SimpleFeature {
        SimpleFeature::new("osm.1", Point2d::new(0.0, 0.0))
            .with_attribute("name", "Quito")
            .with_attribute("population", 2_011_388i64)
    }

    #[test]
    fn attribute_access() {
        let feature = city();
        assert_eq!(feature.attribute("name"), Some("Quito".into()));
        assert_eq!(feature.attribute("missing"), None);
        assert_eq!(feature.attribute_names(), vec!["name", "population"]);
    }

    #[test]
    fn attribute_replacement() {
        let mut feature = city();
        feature.set_attribute("population", 2_100_000i64);
        assert_eq!(
            feature.attribute("population"),
            Some(AttributeValue::Integer(2_100_000))
        );
        assert_eq!(feature.attribute_names().len(), 2);
    }

    #[test]
    fn value_comparison() {
        use AttributeValue::*;

        assert_eq!(
            Integer(1).compare(&Float(1.5)),
            Some(Ordering::Less)
        );
        assert_eq!(
            String("a".into()).compare(&String("b".into())),
            Some(Ordering::Less)
        );
        assert_eq!(String("a".into()).compare(&Integer(1)), None);
        assert_eq!(Null.compare(&Null), None);
    }

    #[test]
    fn projected_view_hides_attributes() {
        let feature = city();
        let properties = vec!["name".to_string()];
        let projected = Projected::new(&feature, &properties);

        assert_eq!(projected.attribute("name"), Some("Quito".into()));
        assert_eq!(projected.attribute("population"), None);
        assert_eq!(projected.attribute_names(), vec!["name"]);
    }
}
