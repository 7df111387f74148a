//! Column-height terrain generation.
//!
//! The surface is a 1D height profile smoothed with a sequential 5-point
//! average. The scan updates in place, so column `x` sees the already
//! smoothed values of `x-2` and `x-1`; output parity depends on that.

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use sandbox_common::TileType;

use crate::error::WorldError;
use crate::grid::TileGrid;

/// Rows of dirt under the grass row.
pub const DIRT_DEPTH: usize = 3;

/// Largest per-column random nudge applied after smoothing.
pub const MAX_JITTER: i64 = 2;

/// Allowed surface rows for a grid of `rows` rows, inclusive.
pub fn surface_bounds(rows: usize) -> (usize, usize) {
    (rows / 3, 2 * rows / 3)
}

/// Compute one grass row per column.
pub fn surface_profile<R: Rng + ?Sized>(cols: usize, rows: usize, rng: &mut R) -> Vec<usize> {
    let (lo, hi) = surface_bounds(rows);
    let mut heights = vec![rows / 2; cols];
    for x in 2..cols.saturating_sub(2) {
        let window: usize = heights[x - 2..=x + 2].iter().sum();
        let jitter: i64 = rng.gen_range(-MAX_JITTER..=MAX_JITTER);
        let h = (window / 5) as i64 + jitter;
        heights[x] = h.clamp(lo as i64, hi as i64) as usize;
    }
    heights
}

/// Generate a full grid from a seed.
pub fn generate(cols: usize, rows: usize, seed: u64) -> Result<TileGrid, WorldError> {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    generate_with(cols, rows, &mut rng)
}

/// Generate a full grid drawing jitter from `rng`.
pub fn generate_with<R: Rng + ?Sized>(
    cols: usize,
    rows: usize,
    rng: &mut R,
) -> Result<TileGrid, WorldError> {
    let mut grid = TileGrid::empty(cols, rows)?;
    let heights = surface_profile(cols, rows, rng);

    for (x, &height) in heights.iter().enumerate() {
        grid.set(x, height, TileType::Grass);
        let dirt_end = (height + 1 + DIRT_DEPTH).min(rows);
        for y in height + 1..dirt_end {
            grid.set(x, y, TileType::Dirt);
        }
        for y in dirt_end..rows {
            grid.set(x, y, TileType::Stone);
        }
    }

    // Barrier wins over whatever terrain landed in the edge columns.
    for y in 0..rows {
        grid.set(0, y, TileType::Barrier);
        grid.set(cols - 1, y, TileType::Barrier);
    }

    tracing::debug!(
        cols,
        rows,
        min_surface = heights.iter().min().copied().unwrap_or(0),
        max_surface = heights.iter().max().copied().unwrap_or(0),
        "terrain generated"
    );
    Ok(grid)
}
