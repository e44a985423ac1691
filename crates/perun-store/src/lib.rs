//! Indexed, cached stores over Sins of a Solar Empire data directories.
//!
//! A data directory holds files of one extension; the file name minus the
//! extension is the logical key, addressed case-insensitively. Each file's
//! first line declares its storage form: `TXT` files are decoded in place,
//! `BIN` files are routed through the game's external `ConvertData`
//! executable first. Loads happen lazily and are cached for the process
//! lifetime.
//!
//! # Example
//!
//! ```no_run
//! use perun_store::TreeStore;
//!
//! let entities = TreeStore::open("GameInfo", "entity")?;
//! let ship = entities.get("FrigatePsiScout")?;
//! println!("{}", ship.root().single_text("basePrice/credits")?);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

mod convert;
mod error;
mod game;
mod index;
mod store;

#[cfg(feature = "textures")]
mod texture;

pub use convert::{Convert, ExternalConverter};
pub use error::{Error, Result};
pub use game::GameData;
pub use index::FileIndex;
pub use store::{RawDocument, RawStore, TreeStore};

#[cfg(feature = "textures")]
pub use texture::TextureStore;

/// Marker line declaring a text-form document.
pub const TXT_MARKER: &str = "TXT";

/// Marker line declaring a binary-form document.
pub const BIN_MARKER: &str = "BIN";

pub(crate) type FxHashMap<K, V> =
    hashbrown::HashMap<K, V, std::hash::BuildHasherDefault<rustc_hash::FxHasher>>;
