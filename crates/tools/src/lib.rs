//! Developer Tooling: read-only world inspection for debugging and the CLI.
//!
//! # Invariants
//! - Tools never mutate the world.

mod inspector;

pub use inspector::{CellInfo, WorldInspector, WorldSummary};
