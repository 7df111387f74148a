use std::ops::Range;

use sandbox_common::{Canvas, Rect, TileType};
use serde::{Deserialize, Serialize};

use crate::error::WorldError;
use crate::grid::TileGrid;
use crate::terrain;

/// An event record produced by every effective tile edit.
///
/// Consumers drain the log to persist edits or to learn that a redraw is due.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum WorldEvent {
    /// A tile was written, possibly over an occupied cell.
    TilePlaced {
        x: i32,
        y: i32,
        old: TileType,
        new: TileType,
    },
    /// An occupied tile was emptied.
    TileBroken { x: i32, y: i32, old: TileType },
}

/// Parameters for generating a fresh world.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WorldConfig {
    pub cols: usize,
    pub rows: usize,
    pub tile_size: u32,
    pub seed: u64,
}

impl Default for WorldConfig {
    fn default() -> Self {
        Self {
            cols: 10_000,
            rows: 300,
            tile_size: 32,
            seed: 42,
        }
    }
}

/// Half-open grid ranges covering a viewport.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VisibleRange {
    pub cols: Range<usize>,
    pub rows: Range<usize>,
}

impl VisibleRange {
    pub fn cell_count(&self) -> usize {
        self.cols.len() * self.rows.len()
    }
}

/// The authoritative tile world.
///
/// Owns the grid and the tile size that maps it to pixels. All mutation goes
/// through [`World::place_tile`] and [`World::break_tile`].
#[derive(Debug, Clone)]
pub struct World {
    grid: TileGrid,
    tile_size: u32,
    /// Append-only log of effective edits since the last drain.
    event_log: Vec<WorldEvent>,
    edit_count: u64,
}

impl World {
    /// Generate a world from terrain settings.
    pub fn generate(config: WorldConfig) -> Result<Self, WorldError> {
        check_tile_size(config.tile_size)?;
        let grid = terrain::generate(config.cols, config.rows, config.seed)?;
        tracing::info!(
            cols = config.cols,
            rows = config.rows,
            tile_size = config.tile_size,
            seed = config.seed,
            "world generated"
        );
        Self::from_tile_grid(grid, config.tile_size)
    }

    /// Load a persisted row-major code table.
    pub fn from_grid(codes: &[Vec<u8>], tile_size: u32) -> Result<Self, WorldError> {
        check_tile_size(tile_size)?;
        let grid = TileGrid::from_codes(codes)?;
        tracing::info!(
            cols = grid.cols(),
            rows = grid.rows(),
            tile_size,
            "world loaded from grid"
        );
        Self::from_tile_grid(grid, tile_size)
    }

    /// Wrap an already-built grid.
    pub fn from_tile_grid(grid: TileGrid, tile_size: u32) -> Result<Self, WorldError> {
        check_tile_size(tile_size)?;
        Ok(Self {
            grid,
            tile_size,
            event_log: Vec::new(),
            edit_count: 0,
        })
    }

    pub fn grid(&self) -> &TileGrid {
        &self.grid
    }

    pub fn grid_dimensions(&self) -> (usize, usize) {
        self.grid.dimensions()
    }

    pub fn tile_size(&self) -> u32 {
        self.tile_size
    }

    pub fn pixel_width(&self) -> f32 {
        (self.grid.cols() as u64 * self.tile_size as u64) as f32
    }

    pub fn pixel_height(&self) -> f32 {
        (self.grid.rows() as u64 * self.tile_size as u64) as f32
    }

    /// Grid cell containing a world-space coordinate.
    pub fn to_grid(&self, world_x: f32, world_y: f32) -> (i32, i32) {
        let ts = self.tile_size as f32;
        ((world_x / ts).floor() as i32, (world_y / ts).floor() as i32)
    }

    /// Whether the cell containing a world-space point blocks movement.
    /// Points outside the grid are solid.
    pub fn is_solid_at(&self, world_x: f32, world_y: f32) -> bool {
        let (gx, gy) = self.to_grid(world_x, world_y);
        self.grid.is_solid_cell(gx, gy)
    }

    pub fn tile_at(&self, gx: i32, gy: i32) -> TileType {
        self.grid.tile_at(gx, gy)
    }

    /// Overwrite a cell. Out-of-range coordinates are ignored.
    ///
    /// Barrier cells are not protected.
    pub fn place_tile(&mut self, gx: i32, gy: i32, tile: TileType) -> bool {
        let Some(old) = self.grid.place(gx, gy, tile) else {
            tracing::trace!(gx, gy, "place outside grid ignored");
            return false;
        };
        tracing::debug!(gx, gy, ?old, new = ?tile, "tile placed");
        self.record(WorldEvent::TilePlaced {
            x: gx,
            y: gy,
            old,
            new: tile,
        });
        true
    }

    /// Empty an occupied cell. Empty or out-of-range cells are left alone.
    pub fn break_tile(&mut self, gx: i32, gy: i32) -> bool {
        let Some(old) = self.grid.break_tile(gx, gy) else {
            return false;
        };
        tracing::debug!(gx, gy, ?old, "tile broken");
        self.record(WorldEvent::TileBroken { x: gx, y: gy, old });
        true
    }

    fn record(&mut self, event: WorldEvent) {
        self.edit_count += 1;
        self.event_log.push(event);
    }

    /// Total effective edits since construction.
    pub fn edit_count(&self) -> u64 {
        self.edit_count
    }

    /// Drain and return the event log.
    pub fn drain_events(&mut self) -> Vec<WorldEvent> {
        std::mem::take(&mut self.event_log)
    }

    /// Read-only access to the event log.
    pub fn events(&self) -> &[WorldEvent] {
        &self.event_log
    }

    /// Grid cells touched by a viewport at `(camera_x, camera_y)`.
    pub fn visible_range(
        &self,
        camera_x: f32,
        camera_y: f32,
        viewport_w: f32,
        viewport_h: f32,
    ) -> VisibleRange {
        let ts = self.tile_size as f32;
        let span = |start: f32, extent: f32, limit: usize| {
            let first = (start / ts).floor().max(0.0) as usize;
            let last = (((start + extent) / ts).floor() + 1.0).max(0.0) as usize;
            let last = last.min(limit);
            first.min(last)..last
        };
        VisibleRange {
            cols: span(camera_x, viewport_w, self.grid.cols()),
            rows: span(camera_y, viewport_h, self.grid.rows()),
        }
    }

    /// Draw every non-empty tile inside the viewport, one rectangle each,
    /// in screen space. Returns how many rectangles were issued.
    pub fn draw(
        &self,
        canvas: &mut (impl Canvas + ?Sized),
        camera_x: f32,
        camera_y: f32,
        viewport_w: f32,
        viewport_h: f32,
    ) -> usize {
        let range = self.visible_range(camera_x, camera_y, viewport_w, viewport_h);
        let ts = self.tile_size as f32;
        let mut drawn = 0;
        for row in range.rows.clone() {
            let tiles = self.grid.row_slice(row, range.cols.clone());
            for (offset, tile) in tiles.iter().enumerate() {
                if tile.is_empty() {
                    continue;
                }
                let col = range.cols.start + offset;
                let rect = Rect::new(
                    col as f32 * ts - camera_x,
                    row as f32 * ts - camera_y,
                    ts,
                    ts,
                );
                canvas.fill_rect(rect, tile.color());
                drawn += 1;
            }
        }
        tracing::trace!(drawn, cells = range.cell_count(), "world drawn");
        drawn
    }

    /// Deterministic hash of dimensions, tile size and every tile.
    pub fn state_hash(&self) -> u64 {
        let mut h: u64 = 0xcbf2_9ce4_8422_2325; // FNV offset basis
        let mix = |h: &mut u64, bytes: &[u8]| {
            for &b in bytes {
                *h ^= b as u64;
                *h = h.wrapping_mul(0x0100_0000_01b3);
            }
        };
        mix(&mut h, &(self.grid.cols() as u64).to_le_bytes());
        mix(&mut h, &(self.grid.rows() as u64).to_le_bytes());
        mix(&mut h, &self.tile_size.to_le_bytes());
        for tile in self.grid.tiles() {
            mix(&mut h, &[tile.code()]);
        }
        h
    }
}

fn check_tile_size(tile_size: u32) -> Result<(), WorldError> {
    if tile_size == 0 {
        return Err(WorldError::InvalidTileSize);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use sandbox_common::Color;

    #[derive(Default)]
    struct Recorder(Vec<(Rect, Color)>);

    impl Canvas for Recorder {
        fn fill_rect(&mut self, rect: Rect, color: Color) {
            self.0.push((rect, color));
        }
    }

    fn small_world() -> World {
        World::generate(WorldConfig {
            cols: 100,
            rows: 40,
            tile_size: 32,
            seed: 7,
        })
        .unwrap()
    }

    #[test]
    fn generated_dimensions() {
        let w = small_world();
        assert_eq!(w.grid_dimensions(), (100, 40));
        assert_eq!(w.tile_size(), 32);
        assert_eq!(w.pixel_width(), 3200.0);
        assert_eq!(w.pixel_height(), 1280.0);
    }

    #[test]
    fn outside_the_world_is_solid() {
        let w = small_world();
        assert!(w.is_solid_at(-1.0, 10.0));
        assert!(w.is_solid_at(10.0, -0.5));
        assert!(w.is_solid_at(3200.0, 10.0));
        assert!(w.is_solid_at(100.0, 1280.0));
        // Top of an interior column is sky.
        assert!(!w.is_solid_at(1600.0, 0.0));
    }

    #[test]
    fn place_then_read_back() {
        let mut w = small_world();
        assert!(w.place_tile(10, 2, TileType::Dirt));
        assert_eq!(w.tile_at(10, 2), TileType::Dirt);
        assert!(w.is_solid_at(10.0 * 32.0 + 1.0, 2.0 * 32.0 + 31.0));
    }

    #[test]
    fn place_overwrites_barrier() {
        let mut w = small_world();
        assert!(w.place_tile(0, 0, TileType::Grass));
        assert_eq!(w.tile_at(0, 0), TileType::Grass);
    }

    #[test]
    fn out_of_range_edits_are_ignored() {
        let mut w = small_world();
        let before = w.state_hash();
        assert!(!w.place_tile(-1, 0, TileType::Dirt));
        assert!(!w.place_tile(100, 0, TileType::Dirt));
        assert!(!w.break_tile(5, 40));
        assert_eq!(w.state_hash(), before);
        assert!(w.events().is_empty());
    }

    #[test]
    fn break_twice_is_idempotent() {
        let mut w = small_world();
        w.place_tile(5, 1, TileType::Stone);
        assert!(w.break_tile(5, 1));
        assert!(!w.break_tile(5, 1));
        assert_eq!(w.tile_at(5, 1), TileType::Empty);
        assert_eq!(w.edit_count(), 2);
    }

    #[test]
    fn edits_are_logged_in_order() {
        let mut w = small_world();
        w.place_tile(3, 1, TileType::Dirt);
        w.break_tile(3, 1);
        assert_eq!(
            w.drain_events(),
            vec![
                WorldEvent::TilePlaced {
                    x: 3,
                    y: 1,
                    old: TileType::Empty,
                    new: TileType::Dirt
                },
                WorldEvent::TileBroken {
                    x: 3,
                    y: 1,
                    old: TileType::Dirt
                },
            ]
        );
        assert!(w.events().is_empty());
    }

    #[test]
    fn visible_range_clips_to_grid() {
        let w = small_world();
        let r = w.visible_range(0.0, 0.0, 1280.0, 720.0);
        assert_eq!(r.cols, 0..41);
        assert_eq!(r.rows, 0..23);

        let r = w.visible_range(2000.0, 1000.0, 1280.0, 720.0);
        assert_eq!(r.cols, 62..100);
        assert_eq!(r.rows, 31..40);

        let r = w.visible_range(-500.0, -500.0, 100.0, 100.0);
        assert!(r.cols.is_empty());
        assert!(r.rows.is_empty());
    }

    #[test]
    fn draw_touches_only_visible_tiles() {
        let w = small_world();
        let mut canvas = Recorder::default();
        let range = w.visible_range(640.0, 400.0, 320.0, 240.0);
        let drawn = w.draw(&mut canvas, 640.0, 400.0, 320.0, 240.0);
        assert_eq!(drawn, canvas.0.len());
        assert!(drawn <= range.cell_count());
        for (rect, _) in &canvas.0 {
            assert!(rect.x > -32.0 && rect.x <= 320.0);
            assert!(rect.y > -32.0 && rect.y <= 240.0);
            assert_eq!(rect.w, 32.0);
        }
    }

    #[test]
    fn draw_uses_tile_colors() {
        let mut w = World::from_tile_grid(TileGrid::empty(10, 10).unwrap(), 16).unwrap();
        w.place_tile(2, 3, TileType::Stone);
        let mut canvas = Recorder::default();
        assert_eq!(w.draw(&mut canvas, 0.0, 0.0, 160.0, 160.0), 1);
        assert_eq!(
            canvas.0[0],
            (Rect::new(32.0, 48.0, 16.0, 16.0), TileType::Stone.color())
        );
    }

    #[test]
    fn from_grid_round_trip() {
        let w = small_world();
        let codes = w.grid().to_codes();
        let loaded = World::from_grid(&codes, 32).unwrap();
        assert_eq!(loaded.state_hash(), w.state_hash());
    }

    #[test]
    fn from_grid_rejects_bad_input() {
        assert_eq!(
            World::from_grid(&vec![vec![0u8; 3]; 3], 32).unwrap_err(),
            WorldError::DegenerateSize { cols: 3, rows: 3 }
        );
        assert_eq!(
            World::from_grid(&vec![vec![0u8; 8]; 8], 0).unwrap_err(),
            WorldError::InvalidTileSize
        );
    }

    #[test]
    fn same_seed_same_hash() {
        assert_eq!(small_world().state_hash(), small_world().state_hash());
        let other = World::generate(WorldConfig {
            cols: 100,
            rows: 40,
            tile_size: 32,
            seed: 8,
        })
        .unwrap();
        assert_ne!(other.state_hash(), small_world().state_hash());
    }
}
