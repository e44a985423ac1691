//! Error types for file stores and the converter bridge.

use std::path::PathBuf;
use std::process::ExitStatus;

use thiserror::Error;

/// Errors that can occur when indexing, loading, or converting data files.
#[derive(Debug, Error)]
pub enum Error {
    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Key absent from the store's index.
    #[error("no file for key {0:?}")]
    NotFound(String),

    /// Two files in one directory share a case-folded key.
    #[error("duplicate key {key:?} in {dir:?}")]
    DuplicateKey { key: String, dir: PathBuf },

    /// A document's first line is neither the TXT nor the BIN marker.
    #[error("{path:?}: bad marker line {marker:?} (expected TXT or BIN)")]
    BadMarker { path: PathBuf, marker: String },

    /// A binary file's path has no extension to derive the format tag from.
    #[error("{0:?}: binary file has no extension")]
    MissingExtension(PathBuf),

    /// A binary file was encountered but the store has no converter.
    #[error("{0:?}: binary file but no converter configured")]
    NoConverter(PathBuf),

    /// The converter executable could not be located under the game root.
    #[error("expected exactly one ConvertData*.exe under {root:?}, found {found}")]
    ConverterNotFound { root: PathBuf, found: usize },

    /// The converter process exited with a non-zero status.
    #[error("converter failed on {source_path:?} ({status})")]
    ConverterFailed {
        source_path: PathBuf,
        status: ExitStatus,
    },

    /// The converter exited successfully but its output is not a TXT
    /// document.
    #[error("converter output for {source_path:?} is corrupt: {reason}")]
    ConverterOutput {
        source_path: PathBuf,
        reason: String,
    },

    /// Document content failed to decode.
    #[error("decode error: {0}")]
    Decode(#[from] perun_sinstxt::Error),

    /// UTF-8 decoding error in a text document.
    #[error("UTF-8 error: {0}")]
    Utf8(#[from] std::str::Utf8Error),

    /// Texture file failed to decode as an image.
    #[cfg(feature = "textures")]
    #[error("image error: {0}")]
    Image(#[from] image::ImageError),
}

/// Result type alias for store operations.
pub type Result<T> = std::result::Result<T, Error>;
