//! Input: the action vocabulary the game loop consumes.
//!
//! # Invariants
//! - The session consumes [`Action`]s, never raw device events.
//! - Screen clicks become grid cells only through [`screen_to_grid`].

pub mod action;
mod held;

pub use action::{Action, screen_to_grid};
pub use held::{Direction, HeldKeys};
