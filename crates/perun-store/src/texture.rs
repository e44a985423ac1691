//! Store specialization for image-bearing binary extensions.
//!
//! Texture files carry no TXT/BIN marker line; they are decoded directly
//! as images and never routed through the converter.

use std::path::PathBuf;
use std::sync::Arc;

use image::{DynamicImage, ImageReader};
use parking_lot::Mutex;

use crate::index::FileIndex;
use crate::{Error, FxHashMap, Result};

/// Case-insensitive store of decoded texture images over one directory.
///
/// Same index and load-once cache semantics as
/// [`RawStore`](crate::RawStore), but the payload is a decoded image.
pub struct TextureStore {
    index: FileIndex,
    cache: Mutex<FxHashMap<String, Arc<DynamicImage>>>,
}

impl TextureStore {
    /// Open a store over `dir` for texture files with extension `ext`.
    pub fn open(dir: impl Into<PathBuf>, ext: &str) -> Result<Self> {
        Ok(Self {
            index: FileIndex::scan(dir, ext)?,
            cache: Mutex::new(FxHashMap::default()),
        })
    }

    /// All keys, exact-case as found on disk.
    pub fn keys(&self) -> &[String] {
        self.index.keys()
    }

    /// Whether a key is present, under any casing.
    pub fn contains(&self, key: &str) -> bool {
        self.index.contains(key)
    }

    /// The decoded image for a key, loading and caching it on first
    /// access. The format is guessed from the file content, not the
    /// extension.
    pub fn get(&self, key: &str) -> Result<Arc<DynamicImage>> {
        let (folded, path) = self
            .index
            .resolve(key)
            .ok_or_else(|| Error::NotFound(key.to_owned()))?;

        let mut cache = self.cache.lock();
        if let Some(img) = cache.get(&folded) {
            return Ok(Arc::clone(img));
        }
        let img = Arc::new(ImageReader::open(&path)?.with_guessed_format()?.decode()?);
        cache.insert(folded, Arc::clone(&img));
        Ok(img)
    }
}
