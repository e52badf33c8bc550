//! In-memory feature storage.

use std::sync::Arc;

use carta_types::geodetic::Crs;
use carta_types::primitive::BoundedGeometry;
use parking_lot::Mutex;

use crate::error::CartaError;
use crate::feature::Feature;
use crate::query::{compare_features, extract_envelope, FilterEnvelope, Query};

/// Feature storage with change tracking.
///
/// All access operations return [`FeatureContainer`] or [`FeatureContainerMut`]
/// structs. These containers then allow access to references to the features
/// themselves. When a feature is modified through [`AsMut::as_mut`], the store
/// records a [`StoreEvent`], so listeners can update derived state (indices,
/// rendered output) without rescanning the whole feature set.
pub struct FeatureStore<F> {
    crs: Crs,
    features: Vec<FeatureEntry<F>>,
    events: Arc<Mutex<Vec<StoreEvent>>>,
}

/// Change notification recorded by a [`FeatureStore`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreEvent {
    /// A feature was added at the given index.
    Inserted {
        /// Index of the feature in the store.
        index: usize,
    },
    /// The feature at the given index was modified, shown or hidden.
    Updated {
        /// Index of the feature in the store.
        index: usize,
    },
    /// The feature at the given index was removed.
    Removed {
        /// Index the feature had before removal.
        index: usize,
    },
}

/// Immutable container for a feature in a [`FeatureStore`].
#[derive(Debug)]
pub struct FeatureContainer<'a, F> {
    feature: &'a F,
    index: usize,
}

impl<'a, F> FeatureContainer<'a, F> {
    /// Index of the feature in the store.
    pub fn index(&self) -> usize {
        self.index
    }
}

impl<'a, F> AsRef<F> for FeatureContainer<'a, F> {
    fn as_ref(&self) -> &F {
        self.feature
    }
}

/// Mutable container for a feature in a [`FeatureStore`].
///
/// Mutable access through [`AsMut::as_mut`] records an update event in the
/// store the container was obtained from.
pub struct FeatureContainerMut<'a, F> {
    entry: &'a mut FeatureEntry<F>,
    index: usize,
    is_updated: bool,
    events: Arc<Mutex<Vec<StoreEvent>>>,
}

impl<'a, F> FeatureContainerMut<'a, F> {
    /// Index of the feature in the store.
    pub fn index(&self) -> usize {
        self.index
    }

    /// Returns true if the feature is hidden.
    ///
    /// Hidden features keep their place in the store, but are not visible to
    /// queries.
    pub fn is_hidden(&self) -> bool {
        self.entry.is_hidden
    }

    /// Hides the feature from queries, but leaves it in the store.
    pub fn hide(&mut self) {
        if !self.entry.is_hidden {
            self.entry.is_hidden = true;
            self.record_update();
        }
    }

    /// Shows the previously hidden feature.
    pub fn show(&mut self) {
        if self.entry.is_hidden {
            self.entry.is_hidden = false;
            self.record_update();
        }
    }

    fn record_update(&mut self) {
        if !self.is_updated {
            self.events.lock().push(StoreEvent::Updated { index: self.index });
        }

        self.is_updated = true;
    }
}

impl<'a, F> AsRef<F> for FeatureContainerMut<'a, F> {
    fn as_ref(&self) -> &F {
        &self.entry.feature
    }
}

impl<'a, F> AsMut<F> for FeatureContainerMut<'a, F> {
    fn as_mut(&mut self) -> &mut F {
        self.record_update();
        &mut self.entry.feature
    }
}

struct FeatureEntry<F> {
    feature: F,
    is_hidden: bool,
}

impl<F> FeatureStore<F> {
    /// Creates an empty store with the given native CRS.
    pub fn new(crs: Crs) -> Self {
        Self {
            crs,
            features: vec![],
            events: Arc::new(Mutex::new(vec![])),
        }
    }

    /// Creates a store with the given feature set.
    pub fn with_features(crs: Crs, features: impl IntoIterator<Item = F>) -> Self {
        let mut store = Self::new(crs);
        for feature in features {
            store.insert(feature);
        }

        store
    }

    /// Native CRS of the stored features.
    pub fn crs(&self) -> &Crs {
        &self.crs
    }

    /// Number of features in the store, hidden ones included.
    pub fn len(&self) -> usize {
        self.features.len()
    }

    /// Returns true if the store has no features.
    pub fn is_empty(&self) -> bool {
        self.features.is_empty()
    }

    /// Adds a new feature to the store, returning its index.
    pub fn insert(&mut self, feature: F) -> usize {
        let index = self.features.len();
        self.features.push(FeatureEntry {
            feature,
            is_hidden: false,
        });
        self.events.lock().push(StoreEvent::Inserted { index });

        index
    }

    /// Returns a reference to the feature. Returns `None` if a feature with
    /// the given `index` does not exist.
    pub fn get(&self, index: usize) -> Option<&F> {
        self.features.get(index).map(|entry| &entry.feature)
    }

    /// Returns a mutable container for the feature. Returns `None` if a
    /// feature with the given `index` does not exist.
    pub fn get_mut(&mut self, index: usize) -> Option<FeatureContainerMut<'_, F>> {
        let events = self.events.clone();
        self.features.get_mut(index).map(|entry| FeatureContainerMut {
            entry,
            index,
            is_updated: false,
            events,
        })
    }

    /// Removes the feature with the given index, returning the feature.
    ///
    /// # Panics
    ///
    /// Panics if a feature with the given index does not exist.
    pub fn remove(&mut self, index: usize) -> F {
        let entry = self.features.remove(index);
        self.events.lock().push(StoreEvent::Removed { index });

        entry.feature
    }

    /// Takes the events recorded since the last call, leaving the event log
    /// empty.
    pub fn drain_events(&self) -> Vec<StoreEvent> {
        std::mem::take(&mut *self.events.lock())
    }

    /// Iterates over immutable containers of the visible features.
    pub fn iter(&self) -> impl Iterator<Item = FeatureContainer<'_, F>> {
        self.features
            .iter()
            .enumerate()
            .filter(|(_, entry)| !entry.is_hidden)
            .map(|(index, entry)| FeatureContainer {
                feature: &entry.feature,
                index,
            })
    }

    /// Iterates over mutable containers of all features, hidden ones
    /// included.
    pub fn iter_mut(&mut self) -> impl Iterator<Item = FeatureContainerMut<'_, F>> {
        let events = self.events.clone();
        self.features
            .iter_mut()
            .enumerate()
            .map(move |(index, entry)| FeatureContainerMut {
                entry,
                index,
                is_updated: false,
                events: events.clone(),
            })
    }
}

impl<F> FeatureStore<F>
where
    F: Feature,
    F::Geom: BoundedGeometry,
{
    /// Selects features matching the query.
    ///
    /// The filter envelope is extracted first: a filter that cannot match
    /// anything short-circuits to an empty result, and a bounded filter skips
    /// features whose envelope lies outside the bound without evaluating the
    /// filter itself. Surviving features are filtered, sorted with the query
    /// sort chain (stable, so store order breaks ties) and paged with
    /// offset/limit.
    ///
    /// Returns an error if the query CRS differs from the store CRS: stores
    /// serve features in their native CRS and expect the caller to reproject.
    pub fn select(&self, query: &Query) -> Result<Vec<FeatureContainer<'_, F>>, CartaError> {
        if let Some(crs) = query.crs() {
            if *crs != self.crs {
                return Err(CartaError::InvalidQuery(format!(
                    "query CRS {crs:?} does not match the store CRS {:?}",
                    self.crs
                )));
            }
        }

        let prefilter = match extract_envelope(query.filter()) {
            FilterEnvelope::None => return Ok(vec![]),
            FilterEnvelope::Within(rect) => Some(rect),
            FilterEnvelope::Any => None,
        };

        let mut selected: Vec<_> = self
            .iter()
            .filter(|container| {
                if let (Some(bound), Some(rect)) = (
                    prefilter,
                    container.as_ref().geometry().bounding_rect(),
                ) {
                    if !bound.intersects(&rect) {
                        return false;
                    }
                }

                query.filter().evaluate(container.as_ref())
            })
            .collect();

        if !query.sort_by().is_empty() {
            selected.sort_by(|a, b| {
                compare_features(query.sort_by(), a.as_ref(), b.as_ref())
            });
        }

        Ok(selected
            .into_iter()
            .skip(query.offset())
            .take(query.limit().unwrap_or(usize::MAX))
            .collect())
    }
}

impl<F> Default for FeatureStore<F> {
    fn default() -> Self {
        Self::new(Crs::EPSG3857)
    }
}
