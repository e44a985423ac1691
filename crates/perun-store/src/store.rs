//! Lazily-loaded, cached document stores.
//!
//! [`RawStore`] maps case-insensitive keys to the content lines of data
//! files, reading each file at most once per process lifetime. Binary-form
//! files are routed through a [`Convert`] bridge first. [`TreeStore`]
//! layers the TXT decoder on top, handing out a fresh tree per access over
//! the cached lines.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use parking_lot::Mutex;
use perun_sinstxt::Tree;

use crate::convert::Convert;
use crate::index::FileIndex;
use crate::{Error, FxHashMap, Result, BIN_MARKER, TXT_MARKER};

/// The content lines of one decoded or converted file, marker consumed.
pub type RawDocument = Vec<String>;

type SharedConverter = Arc<dyn Convert + Send + Sync>;

/// Case-insensitive store of raw document lines over one directory.
///
/// The cache is keyed by folded key, has no eviction, and is never
/// invalidated by on-disk changes. A failed load leaves no cache entry and
/// does not affect other keys. The cache mutex is held across a first
/// load, so concurrent callers never load the same key twice.
pub struct RawStore {
    index: FileIndex,
    converter: Option<SharedConverter>,
    cache: Mutex<FxHashMap<String, Arc<RawDocument>>>,
}

impl RawStore {
    /// Open a store over `dir` for files with extension `ext`, with no
    /// converter. Binary-form files will fail to load.
    pub fn open(dir: impl Into<PathBuf>, ext: &str) -> Result<Self> {
        Ok(Self {
            index: FileIndex::scan(dir, ext)?,
            converter: None,
            cache: Mutex::new(FxHashMap::default()),
        })
    }

    /// Open a store that routes binary-form files through `converter`.
    pub fn with_converter(
        dir: impl Into<PathBuf>,
        ext: &str,
        converter: SharedConverter,
    ) -> Result<Self> {
        Ok(Self {
            index: FileIndex::scan(dir, ext)?,
            converter: Some(converter),
            cache: Mutex::new(FxHashMap::default()),
        })
    }

    /// All keys, exact-case as found on disk.
    pub fn keys(&self) -> &[String] {
        self.index.keys()
    }

    /// Whether a key is present, under any casing. Reflects the
    /// construction-time scan only.
    pub fn contains(&self, key: &str) -> bool {
        self.index.contains(key)
    }

    /// The document for a key, loading and caching it on first access.
    ///
    /// All casings of a key observe the same cached document.
    pub fn get(&self, key: &str) -> Result<Arc<RawDocument>> {
        let (folded, path) = self
            .index
            .resolve(key)
            .ok_or_else(|| Error::NotFound(key.to_owned()))?;

        let mut cache = self.cache.lock();
        if let Some(doc) = cache.get(&folded) {
            return Ok(Arc::clone(doc));
        }
        let doc = Arc::new(self.load(&path)?);
        cache.insert(folded, Arc::clone(&doc));
        Ok(doc)
    }

    /// Read a file and dispatch on its marker line.
    fn load(&self, path: &Path) -> Result<RawDocument> {
        let bytes = fs::read(path)?;
        let (first, rest) = split_first_line(&bytes);
        let marker = std::str::from_utf8(first).unwrap_or("").trim();

        match marker {
            TXT_MARKER => {
                let text = std::str::from_utf8(rest)?;
                Ok(text.lines().map(str::to_owned).collect())
            }
            BIN_MARKER => {
                let format_tag = path
                    .extension()
                    .and_then(|e| e.to_str())
                    .ok_or_else(|| Error::MissingExtension(path.to_path_buf()))?;
                let converter = self
                    .converter
                    .as_ref()
                    .ok_or_else(|| Error::NoConverter(path.to_path_buf()))?;
                converter.convert(path, format_tag)
            }
            other => Err(Error::BadMarker {
                path: path.to_path_buf(),
                marker: other.to_owned(),
            }),
        }
    }
}

/// Split off the first line of a byte buffer. The remainder of a BIN file
/// is opaque binary, so this cannot assume the buffer is valid UTF-8.
fn split_first_line(bytes: &[u8]) -> (&[u8], &[u8]) {
    match bytes.iter().position(|&b| b == b'\n') {
        Some(pos) => {
            let first = &bytes[..pos];
            let first = first.strip_suffix(b"\r").unwrap_or(first);
            (first, &bytes[pos + 1..])
        }
        None => (bytes, &[]),
    }
}

/// A [`RawStore`] whose documents are decoded into trees.
///
/// Raw lines are cached per key; the tree is rebuilt on each access, which
/// is cheap and keeps the cache small.
pub struct TreeStore {
    raw: RawStore,
}

impl TreeStore {
    /// Wrap an existing raw store.
    pub fn new(raw: RawStore) -> Self {
        Self { raw }
    }

    /// Open a store over `dir` for files with extension `ext`, with no
    /// converter.
    pub fn open(dir: impl Into<PathBuf>, ext: &str) -> Result<Self> {
        Ok(Self::new(RawStore::open(dir, ext)?))
    }

    /// Open a store that routes binary-form files through `converter`.
    pub fn with_converter(
        dir: impl Into<PathBuf>,
        ext: &str,
        converter: SharedConverter,
    ) -> Result<Self> {
        Ok(Self::new(RawStore::with_converter(dir, ext, converter)?))
    }

    /// All keys, exact-case as found on disk.
    pub fn keys(&self) -> &[String] {
        self.raw.keys()
    }

    /// Whether a key is present, under any casing.
    pub fn contains(&self, key: &str) -> bool {
        self.raw.contains(key)
    }

    /// Decode the document for a key into a tree.
    pub fn get(&self, key: &str) -> Result<Tree> {
        let doc = self.raw.get(key)?;
        Ok(Tree::decode(doc.iter())?)
    }

    /// The underlying raw store.
    pub fn raw(&self) -> &RawStore {
        &self.raw
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn write_files(files: &[(&str, &str)]) -> tempfile::TempDir {
        let dir = tempfile::tempdir().unwrap();
        for (name, content) in files {
            fs::write(dir.path().join(name), content).unwrap();
        }
        dir
    }

    /// Converter that serves canned lines and counts invocations.
    struct MockConverter {
        lines: Vec<String>,
        calls: AtomicUsize,
    }

    impl MockConverter {
        fn new(lines: &[&str]) -> Self {
            Self {
                lines: lines.iter().map(|s| s.to_string()).collect(),
                calls: AtomicUsize::new(0),
            }
        }
    }

    impl Convert for MockConverter {
        fn convert(&self, _source_path: &Path, format_tag: &str) -> Result<Vec<String>> {
            assert_eq!(format_tag, "entity");
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(self.lines.clone())
        }
    }

    #[test]
    fn test_get_text_document() {
        let dir = write_files(&[("Ship.entity", "TXT\nentityType Frigate\nslotCount 4.0\n")]);
        let store = RawStore::open(dir.path(), "entity").unwrap();

        let doc = store.get("Ship").unwrap();
        assert_eq!(*doc, ["entityType Frigate", "slotCount 4.0"]);
    }

    #[test]
    fn test_case_insensitive_get_shares_cache() {
        let dir = write_files(&[("Ship.entity", "TXT\na 1.0\n")]);
        let store = RawStore::open(dir.path(), "entity").unwrap();

        let first = store.get("SHIP").unwrap();
        let second = store.get("ship").unwrap();
        assert!(Arc::ptr_eq(&first, &second));
    }

    #[test]
    fn test_get_unknown_key() {
        let dir = write_files(&[("Ship.entity", "TXT\n")]);
        let store = RawStore::open(dir.path(), "entity").unwrap();
        assert!(matches!(store.get("Missing"), Err(Error::NotFound(_))));
    }

    #[test]
    fn test_bad_marker() {
        let dir = write_files(&[("Ship.entity", "XML\n<a/>\n")]);
        let store = RawStore::open(dir.path(), "entity").unwrap();
        assert!(matches!(store.get("Ship"), Err(Error::BadMarker { .. })));
        // A failed load leaves no cache entry and the error repeats.
        assert!(matches!(store.get("Ship"), Err(Error::BadMarker { .. })));
    }

    #[test]
    fn test_bin_document_converted_once() {
        let dir = write_files(&[("Ship.entity", "BIN\n\x00\x01\x02")]);
        let converter = Arc::new(MockConverter::new(&["entityType Frigate"]));
        let shared: Arc<dyn Convert + Send + Sync> = Arc::clone(&converter) as _;
        let store = RawStore::with_converter(dir.path(), "entity", shared).unwrap();

        let doc = store.get("Ship").unwrap();
        assert_eq!(*doc, ["entityType Frigate"]);

        // Cached: the converter runs once no matter how often we ask.
        store.get("ship").unwrap();
        store.get("SHIP").unwrap();
        assert_eq!(converter.calls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_bin_without_converter() {
        let dir = write_files(&[("Ship.entity", "BIN\n")]);
        let store = RawStore::open(dir.path(), "entity").unwrap();
        assert!(matches!(store.get("Ship"), Err(Error::NoConverter(_))));
    }

    #[test]
    fn test_tree_store_decodes() {
        let dir = write_files(&[(
            "Ship.entity",
            "TXT\nbasePrice\n\tcredits 500.0\n\tmetal 100.0\n",
        )]);
        let store = TreeStore::open(dir.path(), "entity").unwrap();

        let tree = store.get("ship").unwrap();
        assert_eq!(tree.root().single_text("basePrice/credits").unwrap(), "500.0");

        // Trees are rebuilt per access over the same cached lines.
        let again = store.get("Ship").unwrap();
        assert_eq!(tree, again);
    }

    #[test]
    fn test_tree_store_surfaces_decode_errors() {
        let dir = write_files(&[("Ship.entity", "TXT\na\n\t\tb\n")]);
        let store = TreeStore::open(dir.path(), "entity").unwrap();
        assert!(matches!(
            store.get("Ship"),
            Err(Error::Decode(perun_sinstxt::Error::LevelSkip { .. }))
        ));
    }
}
