use glam::{IVec2, Vec2};
use sandbox_common::TileType;
use serde::{Deserialize, Serialize};

/// A high-level command produced by whatever reads the devices.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum Action {
    MoveLeft,
    MoveRight,
    /// Stop horizontal movement.
    Stop,
    Jump,
    /// Place a tile under a screen-space point.
    Place { screen: Vec2, tile: TileType },
    /// Break the tile under a screen-space point.
    Break { screen: Vec2 },
    /// Unbound input.
    Noop,
}

/// Grid cell under a screen-space point: `floor((screen + camera) / tile)`.
///
/// The result may lie outside the grid; world edits ignore such cells.
pub fn screen_to_grid(screen: Vec2, camera_offset: Vec2, tile_size: u32) -> IVec2 {
    ((screen + camera_offset) / tile_size as f32).floor().as_ivec2()
}
