//! Shared types for the sandbox engine: tile codes, colors, rectangles and the
//! draw-target trait every renderer implements.

pub mod types;

pub use types::{Canvas, Color, Rect, TileType, UnknownTileCode};
