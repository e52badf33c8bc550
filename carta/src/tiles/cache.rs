use std::path::{Path, PathBuf};

use bytes::Bytes;
use log::debug;

use crate::error::CartaError;

/// Cache of binary data between application runs.
pub trait PersistentCacheController<K: ?Sized, V>: Send + Sync {
    /// Loads the cached value for the given key, if present.
    fn get(&self, key: &K) -> Option<V>;

    /// Stores the value for the given key.
    fn insert(&self, key: &K, data: &V) -> Result<(), CartaError>;
}

/// Stores the cached data as a set of files in the specified folder. It
/// generates file names from the given urls.
///
/// Currently, there is no eviction mechanism.
pub struct FileCacheController {
    folder_path: PathBuf,
}

impl PersistentCacheController<str, Bytes> for FileCacheController {
    fn get(&self, key: &str) -> Option<Bytes> {
        let file_path = self.file_path(key);
        std::fs::read(file_path).ok().map(Into::into)
    }

    fn insert(&self, key: &str, data: &Bytes) -> Result<(), CartaError> {
        let file_path = self.file_path(key);
        let folder = file_path.parent().ok_or_else(|| {
            debug!("Cannot cache {key}: path {file_path:?} has no parent folder");
            CartaError::Io
        })?;

        ensure_folder_exists(folder).map_err(|err| {
            debug!("Cannot cache {key}: failed to create folder {folder:?}: {err:?}");
            CartaError::FsIo(err)
        })?;

        std::fs::write(&file_path, data)?;
        debug!("Entry {key} saved to cache file {file_path:?}");

        Ok(())
    }
}

impl FileCacheController {
    /// Creates a new instance. The cache will be located in the given
    /// directory. If the directory doesn't exist, it will be created on
    /// startup. Each entry is stored in a nested folder structure based on
    /// the url it was loaded from.
    pub fn new(path: impl AsRef<Path>) -> Result<Self, CartaError> {
        ensure_folder_exists(path.as_ref())?;
        Ok(Self {
            folder_path: path.as_ref().into(),
        })
    }

    fn file_path(&self, url: &str) -> PathBuf {
        let stripped = url
            .strip_prefix("http://")
            .or_else(|| url.strip_prefix("https://"))
            .unwrap_or(url);

        self.folder_path.join(Path::new(stripped))
    }
}

fn ensure_folder_exists(folder_path: &Path) -> std::io::Result<()> {
    std::fs::create_dir_all(folder_path)
}
