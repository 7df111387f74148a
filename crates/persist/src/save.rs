use glam::Vec2;
use sandbox_kernel::{World, WorldError};
use sandbox_player::Player;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use crate::store::StoreError;

/// Current save schema version.
pub const SAVE_SCHEMA_VERSION: u32 = 1;

/// Player fields worth keeping across sessions. Velocity is not saved;
/// a loaded player starts at rest.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PlayerSave {
    pub x: f32,
    pub y: f32,
    pub facing_right: bool,
}

impl PlayerSave {
    pub fn position(&self) -> Vec2 {
        Vec2::new(self.x, self.y)
    }
}

/// A complete saved game.
///
/// `tiles` is the row-major code table (`tiles[y][x]`, codes 0..=4).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SaveFile {
    pub schema_version: u32,
    pub tile_size: u32,
    pub cols: usize,
    pub rows: usize,
    pub tiles: Vec<Vec<u8>>,
    pub tiles_sha256: String,
    pub player: Option<PlayerSave>,
}

impl SaveFile {
    /// Capture the world and, optionally, the player.
    pub fn capture(world: &World, player: Option<&Player>) -> Self {
        let tiles = world.grid().to_codes();
        let (cols, rows) = world.grid_dimensions();
        Self {
            schema_version: SAVE_SCHEMA_VERSION,
            tile_size: world.tile_size(),
            cols,
            rows,
            tiles_sha256: tiles_hash(&tiles),
            tiles,
            player: player.map(|p| PlayerSave {
                x: p.position().x,
                y: p.position().y,
                facing_right: p.facing_right(),
            }),
        }
    }

    /// Whether the tile payload still matches its recorded hash.
    pub fn verify(&self) -> bool {
        tiles_hash(&self.tiles) == self.tiles_sha256
    }

    /// Rebuild the world. Checks schema, integrity and the declared
    /// dimensions before any grid is built.
    pub fn restore(&self) -> Result<(World, Option<PlayerSave>), StoreError> {
        if self.schema_version != SAVE_SCHEMA_VERSION {
            return Err(StoreError::SchemaMismatch {
                file_version: self.schema_version,
                expected_version: SAVE_SCHEMA_VERSION,
            });
        }
        let actual = tiles_hash(&self.tiles);
        if actual != self.tiles_sha256 {
            return Err(StoreError::IntegrityMismatch {
                expected: self.tiles_sha256.clone(),
                actual,
            });
        }
        let payload_rows = self.tiles.len();
        let payload_cols = self.tiles.first().map_or(0, Vec::len);
        if payload_rows != self.rows || payload_cols != self.cols {
            return Err(WorldError::DimensionMismatch {
                expected_cols: self.cols,
                expected_rows: self.rows,
                cols: payload_cols,
                rows: payload_rows,
            }
            .into());
        }
        let world = World::from_grid(&self.tiles, self.tile_size)?;
        Ok((world, self.player))
    }
}

fn tiles_hash(tiles: &[Vec<u8>]) -> String {
    let mut hasher = Sha256::new();
    for row in tiles {
        hasher.update((row.len() as u64).to_le_bytes());
        hasher.update(row);
    }
    format!("{:x}", hasher.finalize())
}
