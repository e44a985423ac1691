//! Decoder and path queries for the Sins of a Solar Empire TXT data format.
//!
//! Game data files (`.entity`, `.mesh`, `.particle`, `.brushes`, `.str`)
//! use a line-oriented indented format: leading tabs give the nesting
//! level, followed by an item name, an optional `:index` suffix, and an
//! optional typed value token. This crate decodes those lines into an
//! attributed [`Tree`] and answers structural [`Node`] queries over it.
//!
//! # Example
//!
//! ```
//! use perun_sinstxt::Tree;
//!
//! let tree = Tree::decode([
//!     "entityType Frigate",
//!     "basePrice",
//!     "\tcredits 500.0",
//! ])?;
//!
//! assert_eq!(tree.root().single_text("basePrice/credits")?, "500.0");
//! # Ok::<(), perun_sinstxt::Error>(())
//! ```

mod decoder;
mod error;
mod node;
mod query;
mod value;

#[cfg(feature = "json-export")]
pub mod export;

pub use decoder::Tree;
pub use error::{Error, Result};
pub use node::{Node, EMPTY_TAG, LEVEL_TAG, ROOT_TAG};
pub use value::{Value, ValueKind};
