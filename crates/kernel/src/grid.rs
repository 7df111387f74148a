use sandbox_common::TileType;

use crate::error::WorldError;

/// Smallest grid the terrain smoothing window and clamp range can work with.
pub const MIN_GRID_DIM: usize = 5;

/// Fixed-size tile grid stored as one row-major buffer.
///
/// Grid coordinates are signed so callers can pass raw conversions of
/// world or screen positions; anything outside `[0, cols) x [0, rows)` is
/// handled by the accessors rather than by the caller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TileGrid {
    cols: usize,
    rows: usize,
    tiles: Vec<TileType>,
}

impl TileGrid {
    /// All-empty grid.
    pub fn empty(cols: usize, rows: usize) -> Result<Self, WorldError> {
        Self::filled(cols, rows, TileType::Empty)
    }

    pub fn filled(cols: usize, rows: usize, tile: TileType) -> Result<Self, WorldError> {
        if cols < MIN_GRID_DIM || rows < MIN_GRID_DIM {
            return Err(WorldError::DegenerateSize { cols, rows });
        }
        let len = cols
            .checked_mul(rows)
            .ok_or(WorldError::TooLarge { cols, rows })?;
        Ok(Self {
            cols,
            rows,
            tiles: vec![tile; len],
        })
    }

    /// Build from the persisted row-major code table.
    ///
    /// Fails on the first ragged row or unknown code; never substitutes.
    pub fn from_codes(codes: &[Vec<u8>]) -> Result<Self, WorldError> {
        let rows = codes.len();
        let cols = codes.first().map(Vec::len).ok_or(WorldError::EmptyGrid)?;
        let mut grid = Self::empty(cols, rows)?;
        for (y, row) in codes.iter().enumerate() {
            if row.len() != cols {
                return Err(WorldError::RaggedRow {
                    row: y,
                    expected: cols,
                    actual: row.len(),
                });
            }
            for (x, &code) in row.iter().enumerate() {
                let tile = TileType::from_code(code)
                    .map_err(|e| WorldError::UnknownTileCode { x, y, code: e.0 })?;
                grid.tiles[y * cols + x] = tile;
            }
        }
        Ok(grid)
    }

    /// Persisted form: one `Vec` of codes per row, top row first.
    pub fn to_codes(&self) -> Vec<Vec<u8>> {
        self.tiles
            .chunks(self.cols)
            .map(|row| row.iter().map(|t| t.code()).collect())
            .collect()
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn dimensions(&self) -> (usize, usize) {
        (self.cols, self.rows)
    }

    fn index(&self, gx: i32, gy: i32) -> Option<usize> {
        if gx < 0 || gy < 0 {
            return None;
        }
        let (x, y) = (gx as usize, gy as usize);
        (x < self.cols && y < self.rows).then(|| y * self.cols + x)
    }

    pub fn in_bounds(&self, gx: i32, gy: i32) -> bool {
        self.index(gx, gy).is_some()
    }

    pub fn get(&self, gx: i32, gy: i32) -> Option<TileType> {
        self.index(gx, gy).map(|i| self.tiles[i])
    }

    /// Tile at a cell, with `Barrier` standing in for anything out of range.
    pub fn tile_at(&self, gx: i32, gy: i32) -> TileType {
        self.get(gx, gy).unwrap_or(TileType::Barrier)
    }

    /// Out-of-range cells count as solid: the world is closed.
    pub fn is_solid_cell(&self, gx: i32, gy: i32) -> bool {
        !self.tile_at(gx, gy).is_empty()
    }

    /// Overwrite a cell unconditionally. Returns the previous tile, or `None`
    /// when the coordinate is outside the grid and nothing changed.
    pub fn place(&mut self, gx: i32, gy: i32, tile: TileType) -> Option<TileType> {
        let i = self.index(gx, gy)?;
        Some(std::mem::replace(&mut self.tiles[i], tile))
    }

    /// Empty an occupied cell. Returns what was removed.
    pub fn break_tile(&mut self, gx: i32, gy: i32) -> Option<TileType> {
        let i = self.index(gx, gy)?;
        let old = self.tiles[i];
        if old.is_empty() {
            return None;
        }
        self.tiles[i] = TileType::Empty;
        Some(old)
    }

    /// Row of the topmost terrain tile in a column, ignoring barriers.
    pub fn surface_height(&self, gx: i32) -> Option<usize> {
        if gx < 0 || gx as usize >= self.cols {
            return None;
        }
        (0..self.rows).find(|&y| {
            let t = self.tiles[y * self.cols + gx as usize];
            !t.is_empty() && t != TileType::Barrier
        })
    }

    /// Slice of one row's tiles over a column range. Both bounds must already
    /// be clipped to the grid.
    pub(crate) fn row_slice(&self, row: usize, cols: std::ops::Range<usize>) -> &[TileType] {
        let start = row * self.cols;
        &self.tiles[start + cols.start..start + cols.end]
    }

    pub(crate) fn set(&mut self, x: usize, y: usize, tile: TileType) {
        self.tiles[y * self.cols + x] = tile;
    }

    pub fn count(&self, tile: TileType) -> usize {
        self.tiles.iter().filter(|&&t| t == tile).count()
    }

    pub(crate) fn tiles(&self) -> &[TileType] {
        &self.tiles
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn too_small_grid_is_rejected() {
        assert_eq!(
            TileGrid::empty(4, 10),
            Err(WorldError::DegenerateSize { cols: 4, rows: 10 })
        );
        assert!(TileGrid::empty(10, 4).is_err());
        assert!(TileGrid::empty(5, 5).is_ok());
    }

    #[test]
    fn overflowing_size_is_an_error() {
        assert_eq!(
            TileGrid::empty(usize::MAX, 5),
            Err(WorldError::TooLarge {
                cols: usize::MAX,
                rows: 5
            })
        );
    }

    #[test]
    fn out_of_range_reads_are_barrier() {
        let grid = TileGrid::empty(8, 8).unwrap();
        assert_eq!(grid.tile_at(-1, 0), TileType::Barrier);
        assert_eq!(grid.tile_at(8, 0), TileType::Barrier);
        assert_eq!(grid.tile_at(0, 8), TileType::Barrier);
        assert_eq!(grid.get(0, -3), None);
        assert!(grid.is_solid_cell(100, 100));
        assert!(!grid.is_solid_cell(3, 3));
    }

    #[test]
    fn place_overwrites_and_reports_previous() {
        let mut grid = TileGrid::empty(8, 8).unwrap();
        assert_eq!(grid.place(2, 3, TileType::Dirt), Some(TileType::Empty));
        assert_eq!(grid.place(2, 3, TileType::Stone), Some(TileType::Dirt));
        assert_eq!(grid.tile_at(2, 3), TileType::Stone);
        assert_eq!(grid.place(-1, 3, TileType::Stone), None);
    }

    #[test]
    fn break_is_noop_on_empty() {
        let mut grid = TileGrid::empty(8, 8).unwrap();
        grid.place(1, 1, TileType::Grass);
        assert_eq!(grid.break_tile(1, 1), Some(TileType::Grass));
        assert_eq!(grid.break_tile(1, 1), None);
        assert_eq!(grid.tile_at(1, 1), TileType::Empty);
        assert_eq!(grid.break_tile(99, 1), None);
    }

    #[test]
    fn codes_round_trip() {
        let mut grid = TileGrid::empty(6, 5).unwrap();
        grid.place(0, 0, TileType::Barrier);
        grid.place(5, 4, TileType::Stone);
        let codes = grid.to_codes();
        assert_eq!(codes.len(), 5);
        assert_eq!(codes[0].len(), 6);
        assert_eq!(codes[4][5], 3);
        assert_eq!(TileGrid::from_codes(&codes).unwrap(), grid);
    }

    #[test]
    fn ragged_rows_fail_fast() {
        let mut codes = vec![vec![0u8; 6]; 5];
        codes[3].pop();
        assert_eq!(
            TileGrid::from_codes(&codes),
            Err(WorldError::RaggedRow {
                row: 3,
                expected: 6,
                actual: 5
            })
        );
    }

    #[test]
    fn unknown_codes_fail_fast() {
        let mut codes = vec![vec![0u8; 6]; 5];
        codes[2][4] = 9;
        assert_eq!(
            TileGrid::from_codes(&codes),
            Err(WorldError::UnknownTileCode { x: 4, y: 2, code: 9 })
        );
    }

    #[test]
    fn empty_code_table_fails() {
        assert_eq!(TileGrid::from_codes(&[]), Err(WorldError::EmptyGrid));
    }

    #[test]
    fn surface_height_skips_barrier() {
        let mut grid = TileGrid::empty(6, 6).unwrap();
        for y in 0..6 {
            grid.place(0, y, TileType::Barrier);
        }
        grid.place(0, 4, TileType::Dirt);
        grid.place(2, 3, TileType::Grass);
        assert_eq!(grid.surface_height(0), Some(4));
        assert_eq!(grid.surface_height(2), Some(3));
        assert_eq!(grid.surface_height(1), None);
        assert_eq!(grid.surface_height(-1), None);
    }
}
