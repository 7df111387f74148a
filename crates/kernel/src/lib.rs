//! World Kernel: the authoritative tile grid, terrain generation, and the
//! block-edit API every other crate goes through.
//!
//! # Invariants
//! - Grid indices are always bounds-checked; anything outside is solid.
//! - Edge columns are `Barrier` after generation.
//! - Tiles change only through `place_tile` / `break_tile`, and every
//!   effective change is recorded as a [`WorldEvent`].

mod error;
pub mod grid;
pub mod terrain;
pub mod world;

pub use error::WorldError;
pub use grid::TileGrid;
pub use world::{VisibleRange, World, WorldConfig, WorldEvent};
