//! Bridge to the game's external `ConvertData` executable.
//!
//! Binary-form data files cannot be decoded directly; the game ships a
//! converter that rewrites them into the TXT form. The bridge invokes it
//! with a scoped temporary output file and hands back the converted lines.
//!
//! The invocation blocks with no timeout: a hung converter hangs the
//! caller. That is acceptable for a local offline tool.

use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;

use crate::{Error, Result, TXT_MARKER};

/// Conversion of a binary-form file into the lines of its text form.
///
/// The store depends on this trait rather than on the external process, so
/// decoding and caching can be tested with a mock.
pub trait Convert {
    /// Convert `source_path` (whose format is named by `format_tag`, the
    /// extension without its dot) and return the content lines, marker
    /// already consumed.
    fn convert(&self, source_path: &Path, format_tag: &str) -> Result<Vec<String>>;
}

/// The game's `ConvertData` executable.
#[derive(Debug, Clone)]
pub struct ExternalConverter {
    exe: PathBuf,
}

impl ExternalConverter {
    /// Wrap a known converter executable.
    pub fn new(exe: impl Into<PathBuf>) -> Self {
        Self { exe: exe.into() }
    }

    /// Locate `ConvertData*.exe` directly under the game install root.
    ///
    /// Exactly one match is required; the patch level in the file name
    /// varies between installs, hence the glob.
    pub fn locate(game_root: impl AsRef<Path>) -> Result<Self> {
        let game_root = game_root.as_ref();
        let pattern = game_root.join("ConvertData*.exe");
        let not_found = |found| Error::ConverterNotFound {
            root: game_root.to_path_buf(),
            found,
        };

        let Some(pattern) = pattern.to_str() else {
            return Err(not_found(0));
        };
        let mut matches: Vec<PathBuf> = glob::glob(pattern)
            .map_err(|_| not_found(0))?
            .filter_map(std::result::Result::ok)
            .collect();
        if matches.len() != 1 {
            return Err(not_found(matches.len()));
        }
        Ok(Self::new(matches.remove(0)))
    }

    /// Path of the wrapped executable.
    pub fn exe(&self) -> &Path {
        &self.exe
    }
}

impl Convert for ExternalConverter {
    fn convert(&self, source_path: &Path, format_tag: &str) -> Result<Vec<String>> {
        // NamedTempFile removes the file on drop, on every exit path below.
        let temp = tempfile::Builder::new().suffix(".sins.txt").tempfile()?;

        let status = Command::new(&self.exe)
            .arg(format_tag)
            .arg(source_path)
            .arg(temp.path())
            .arg("txt")
            .status()?;
        if !status.success() {
            return Err(Error::ConverterFailed {
                source_path: source_path.to_path_buf(),
                status,
            });
        }

        read_converted(temp.path()).map_err(|reason| Error::ConverterOutput {
            source_path: source_path.to_path_buf(),
            reason,
        })
    }
}

/// Read a converter output file: UTF-8 with an optional BOM, first line the
/// TXT marker, remainder the document.
fn read_converted(path: &Path) -> std::result::Result<Vec<String>, String> {
    let bytes = fs::read(path).map_err(|e| e.to_string())?;
    let text = std::str::from_utf8(&bytes).map_err(|e| e.to_string())?;
    let text = text.strip_prefix('\u{feff}').unwrap_or(text);

    let mut lines = text.lines();
    match lines.next() {
        Some(first) if first.trim() == TXT_MARKER => {}
        first => return Err(format!("first line {:?} is not {}", first, TXT_MARKER)),
    }
    Ok(lines.map(str::to_owned).collect())
}
