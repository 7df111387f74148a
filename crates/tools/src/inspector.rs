use std::fmt;

use sandbox_common::TileType;
use sandbox_kernel::World;

/// World inspector for developer tooling.
///
/// Provides read-only queries against the world for debugging and the CLI.
pub struct WorldInspector;

impl WorldInspector {
    /// Produce a summary of the world.
    pub fn summary(world: &World) -> WorldSummary {
        let (cols, rows) = world.grid_dimensions();
        let grid = world.grid();
        let tile_counts = TileType::ALL.map(|t| (t, grid.count(t)));
        let heights: Vec<usize> = (0..cols as i32)
            .filter_map(|x| grid.surface_height(x))
            .collect();
        WorldSummary {
            cols,
            rows,
            tile_size: world.tile_size(),
            tile_counts,
            surface_min: heights.iter().min().copied(),
            surface_max: heights.iter().max().copied(),
            edit_count: world.edit_count(),
            state_hash: world.state_hash(),
        }
    }

    /// Describe the cell under a world-space point.
    pub fn inspect_point(world: &World, world_x: f32, world_y: f32) -> CellInfo {
        let (gx, gy) = world.to_grid(world_x, world_y);
        CellInfo {
            gx,
            gy,
            in_bounds: world.grid().in_bounds(gx, gy),
            tile: world.tile_at(gx, gy),
            solid: world.is_solid_at(world_x, world_y),
        }
    }

    /// Surface row of every column in `cols`, `None` for dug-out columns.
    pub fn surface_profile(world: &World, cols: std::ops::Range<usize>) -> Vec<Option<usize>> {
        cols.map(|x| world.grid().surface_height(x as i32)).collect()
    }
}

/// Summary of a world for the inspector.
#[derive(Debug, Clone)]
pub struct WorldSummary {
    pub cols: usize,
    pub rows: usize,
    pub tile_size: u32,
    pub tile_counts: [(TileType, usize); 5],
    pub surface_min: Option<usize>,
    pub surface_max: Option<usize>,
    pub edit_count: u64,
    pub state_hash: u64,
}

impl WorldSummary {
    pub fn count(&self, tile: TileType) -> usize {
        self.tile_counts
            .iter()
            .find(|(t, _)| *t == tile)
            .map_or(0, |(_, n)| *n)
    }
}

impl fmt::Display for WorldSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "World: {}x{} tiles @ {}px edits={} hash={:#018x}",
            self.cols, self.rows, self.tile_size, self.edit_count, self.state_hash
        )?;
        for (tile, n) in &self.tile_counts {
            writeln!(f, "  {tile:?}: {n}")?;
        }
        match (self.surface_min, self.surface_max) {
            (Some(lo), Some(hi)) => write!(f, "  surface rows: {lo}..={hi}"),
            _ => write!(f, "  surface rows: none"),
        }
    }
}

/// Detailed info about a single cell.
#[derive(Debug, Clone, PartialEq)]
pub struct CellInfo {
    pub gx: i32,
    pub gy: i32,
    pub in_bounds: bool,
    pub tile: TileType,
    pub solid: bool,
}

impl fmt::Display for CellInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.in_bounds {
            write!(f, "Cell ({}, {}) {:?} solid={}", self.gx, self.gy, self.tile, self.solid)
        } else {
            write!(f, "Cell ({}, {}) outside world (solid)", self.gx, self.gy)
        }
    }
}
