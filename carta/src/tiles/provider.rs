use std::collections::HashMap;

use bytes::Bytes;

use crate::error::CartaError;
use crate::tiles::{PersistentCacheController, TileIndex};

/// Function converting a tile index into the url to load the tile from.
pub trait UrlSource<Key>: (Fn(&Key) -> String) + Send + Sync {}
impl<Key, T: Fn(&Key) -> String + Send + Sync> UrlSource<Key> for T {}

/// Tile url template with `{x}`, `{y}` and `{z}` placeholders.
///
/// ```
/// use carta::tiles::{TileIndex, UrlTemplate};
///
/// let template = UrlTemplate::new("https://tile.openstreetmap.org/{z}/{x}/{y}.png");
/// assert_eq!(
///     template.url(TileIndex::new(5, 3, 3)).unwrap(),
///     "https://tile.openstreetmap.org/3/5/3.png"
/// );
/// ```
#[derive(Debug, Clone)]
pub struct UrlTemplate {
    template: String,
}

impl UrlTemplate {
    /// Creates a template from the given string.
    pub fn new(template: impl Into<String>) -> Self {
        Self {
            template: template.into(),
        }
    }

    /// Resolves the template for the given tile index.
    pub fn url(&self, index: TileIndex) -> Result<String, CartaError> {
        let mut vars = HashMap::new();
        vars.insert("x".to_string(), index.x.to_string());
        vars.insert("y".to_string(), index.y.to_string());
        vars.insert("z".to_string(), index.z.to_string());

        strfmt::strfmt(&self.template, &vars)
            .map_err(|err| CartaError::Generic(format!("invalid tile url template: {err}")))
    }
}

/// Provider of tile data for a tile matrix set.
#[async_trait::async_trait]
pub trait TileProvider: Send + Sync {
    /// Loads the tile with the given index.
    async fn load(&self, index: TileIndex) -> Result<Bytes, CartaError>;
}

/// Tile provider that loads tiles one by one with REST HTTP GET requests.
///
/// This provider is able to load tiles from any protocol that uses separate
/// GET requests for each tile:
/// * OSM tile protocol
/// * OGC Tile Map Service (TMS)
/// * ArcGis TileService
/// * etc.
///
/// If constructed with a [`PersistentCacheController`] it will cache the
/// loaded tiles and only request new tiles from the source url if they are
/// not in the cache.
///
/// If configured to use offline mode, it will only use tiles from the cache
/// without attempting to load them from the source. Nevertheless, even in
/// this case the url source must be correct to identify the correct entries
/// in the cache.
pub struct RestTileProvider {
    url_source: Box<dyn UrlSource<TileIndex>>,
    cache: Option<Box<dyn PersistentCacheController<str, Bytes>>>,
    offline_mode: bool,
}

impl RestTileProvider {
    /// Creates a new instance of the provider.
    pub fn new(
        url_source: impl UrlSource<TileIndex> + 'static,
        cache: Option<Box<dyn PersistentCacheController<str, Bytes>>>,
        offline_mode: bool,
    ) -> Self {
        Self {
            url_source: Box::new(url_source),
            cache,
            offline_mode,
        }
    }

    /// Creates a provider resolving tile urls from the given template.
    pub fn from_template(
        template: UrlTemplate,
        cache: Option<Box<dyn PersistentCacheController<str, Bytes>>>,
        offline_mode: bool,
    ) -> Self {
        Self::new(
            move |index: &TileIndex| template.url(*index).unwrap_or_default(),
            cache,
            offline_mode,
        )
    }

    async fn download_tile(&self, index: TileIndex) -> Result<Bytes, CartaError> {
        let url = (self.url_source)(&index);

        if let Some(cache) = &self.cache {
            if let Some(data) = cache.get(&url) {
                return Ok(data);
            }
        }

        if self.offline_mode {
            return Err(CartaError::NotFound);
        }

        log::info!("Loading {url}");
        let data = reqwest::get(&url)
            .await?
            .error_for_status()?
            .bytes()
            .await?;

        if let Some(cache) = &self.cache {
            if let Err(error) = cache.insert(&url, &data) {
                log::warn!("Failed to write persistent cache entry: {error:?}");
            }
        }

        Ok(data)
    }
}

#[async_trait::async_trait]
impl TileProvider for RestTileProvider {
    async fn load(&self, index: TileIndex) -> Result<Bytes, CartaError> {
        self.download_tile(index).await
    }
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;

    use super::*;
    use crate::tiles::FileCacheController;

    fn test_cache(name: &str) -> FileCacheController {
        let path = std::env::temp_dir()
            .join("carta_provider_tests")
            .join(format!("{}_{name}", std::process::id()));
        FileCacheController::new(path).expect("cannot create cache")
    }

    #[test]
    fn template_substitution() {
        let template = UrlTemplate::new("https://tiles.example.com/{z}/{x}/{y}.png");
        assert_eq!(
            template.url(TileIndex::new(1, 2, 3)).unwrap(),
            "https://tiles.example.com/3/1/2.png"
        );

        let broken = UrlTemplate::new("https://tiles.example.com/{level}/{x}/{y}.png");
        assert_matches!(
            broken.url(TileIndex::new(1, 2, 3)),
            Err(CartaError::Generic(_))
        );
    }

    #[tokio::test]
    async fn offline_mode_serves_from_cache_only() {
        let cache = test_cache("offline");
        let url_source = |index: &TileIndex| {
            format!("https://tiles.example.com/{}/{}/{}.png", index.z, index.x, index.y)
        };

        cache
            .insert(
                "https://tiles.example.com/0/0/0.png",
                &Bytes::from_static(b"cached tile"),
            )
            .expect("cannot write cache");

        let provider = RestTileProvider::new(url_source, Some(Box::new(cache)), true);

        let tile = provider.load(TileIndex::new(0, 0, 0)).await.unwrap();
        assert_eq!(tile, Bytes::from_static(b"cached tile"));

        assert_matches!(
            provider.load(TileIndex::new(1, 0, 0)).await,
            Err(CartaError::NotFound)
        );
    }
}
