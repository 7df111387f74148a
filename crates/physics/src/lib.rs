//! Platformer physics: gravity, double jump, and binary per-axis collision
//! resolution of one AABB against a tile grid.
//!
//! # Invariants
//! - Horizontal motion resolves before vertical, every tick.
//! - A blocked horizontal move is rejected whole, never partially applied.
//! - A body below the world is always brought back to the spawn point.

mod body;
mod query;

pub use body::{PhysicsBody, PhysicsConfig, StepOutcome};
pub use query::SolidityQuery;
