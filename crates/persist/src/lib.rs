//! Persistence: JSON save files for the tile grid and player, plus a
//! directory of named save slots.
//!
//! # Invariants
//! - A save never loads into a partially built world.
//! - Tile payloads are verified against their recorded SHA-256.
//! - Files with a different schema version are rejected, not migrated.

mod save;
mod store;

pub use save::{PlayerSave, SaveFile, SAVE_SCHEMA_VERSION};
pub use store::{SaveStore, StoreError, read_save, write_save};
