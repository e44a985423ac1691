//! Case-insensitive file index over a single data directory.

use std::fs;
use std::path::{Path, PathBuf};

use crate::{Error, FxHashMap, Result};

/// Index of the immediate files with one extension in one directory.
///
/// Keys are file names with the extension removed: exact-case as found on
/// disk for listing, case-folded for lookup. The scan happens once at
/// construction; files added to the directory later are never seen.
#[derive(Debug)]
pub struct FileIndex {
    dir: PathBuf,
    keys: Vec<String>,
    // folded key -> on-disk file name
    files: FxHashMap<String, String>,
}

impl FileIndex {
    /// Scan `dir` for files whose extension case-insensitively matches
    /// `ext` (leading dot optional).
    ///
    /// Two files whose keys differ only in case are a configuration error.
    pub fn scan(dir: impl Into<PathBuf>, ext: &str) -> Result<Self> {
        let dir = dir.into();
        let ext_folded = ext.trim_start_matches('.').to_lowercase();

        let mut keys = Vec::new();
        let mut files = FxHashMap::default();
        for entry in fs::read_dir(&dir)? {
            let entry = entry?;
            if !entry.file_type()?.is_file() {
                continue;
            }
            let name = entry.file_name();
            let Some(name) = name.to_str() else {
                continue;
            };
            // Split on the name's own dot: case folding can change byte
            // lengths, so the folded extension must not index into `name`.
            let Some((key, file_ext)) = name.rsplit_once('.') else {
                continue;
            };
            if file_ext.to_lowercase() != ext_folded {
                continue;
            }
            if files.insert(key.to_lowercase(), name.to_owned()).is_some() {
                return Err(Error::DuplicateKey {
                    key: key.to_owned(),
                    dir,
                });
            }
            keys.push(key.to_owned());
        }
        keys.sort();

        Ok(Self { dir, keys, files })
    }

    /// The directory this index was scanned from.
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// All keys, exact-case as found on disk, sorted.
    pub fn keys(&self) -> &[String] {
        &self.keys
    }

    /// Whether a key is present, under any casing.
    pub fn contains(&self, key: &str) -> bool {
        self.files.contains_key(&key.to_lowercase())
    }

    /// Resolve a key (any casing) to its folded form and on-disk path.
    pub fn resolve(&self, key: &str) -> Option<(String, PathBuf)> {
        let folded = key.to_lowercase();
        let name = self.files.get(&folded)?;
        let path = self.dir.join(name);
        Some((folded, path))
    }
}
