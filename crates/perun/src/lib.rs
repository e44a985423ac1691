//! Perun - Sins of a Solar Empire: Rebellion game data reading library.
//!
//! This crate provides a unified interface to the Perun library ecosystem
//! for working with Rebellion game data files.
//!
//! # Crates
//!
//! - [`perun_sinstxt`] - TXT data format decoding, trees, and path queries
//! - [`perun_store`] - Indexed, cached file stores and the converter bridge
//!
//! # Example
//!
//! ```no_run
//! use perun::prelude::*;
//!
//! // Open the conventional stores under a game install root
//! let game = GameData::open(r"C:\Games\Sins of a Solar Empire Rebellion")?;
//!
//! // Resolve an entity and query it
//! let ship = game.entities.get("CapitalShipPsi")?;
//! let credits = ship.root().single_text("basePrice/credits")?;
//! println!("costs {credits} credits");
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

// Re-export all sub-crates
pub use perun_sinstxt as sinstxt;
pub use perun_store as store;

/// Prelude module for convenient imports.
pub mod prelude {
    pub use perun_sinstxt::{Node, Tree, Value, ValueKind};
    pub use perun_store::{Convert, ExternalConverter, GameData, RawStore, TreeStore};

    #[cfg(feature = "full")]
    pub use perun_store::TextureStore;
}

/// Version information.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
