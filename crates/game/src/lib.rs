//! Game layer: configuration, the per-frame session loop, and the screen
//! state machine.
//!
//! # Invariants
//! - Frame order is input, physics, camera, render. Nothing interleaves.
//! - The player borrows the world only inside one update.
//! - Screen transitions consume the old screen and return the next one.

mod config;
mod screen;
mod session;

pub use config::{ConfigError, GameConfig, ViewportConfig};
pub use screen::{MAX_NAME_LEN, Screen, ScreenEvent};
pub use session::{FrameReport, Session};
