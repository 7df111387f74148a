//! The player: owns its physics body and borrows the world only for the
//! duration of one update.

mod player;

pub use player::{AnimState, Player};
