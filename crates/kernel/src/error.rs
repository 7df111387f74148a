/// Construction-time failures. Query-time edge cases never produce these.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum WorldError {
    #[error("world of {cols}x{rows} tiles is too small (minimum 5x5)")]
    DegenerateSize { cols: usize, rows: usize },
    #[error("world of {cols}x{rows} tiles does not fit in memory")]
    TooLarge { cols: usize, rows: usize },
    #[error("tile size must be positive")]
    InvalidTileSize,
    #[error("persisted grid has no rows")]
    EmptyGrid,
    #[error("persisted grid row {row} has {actual} columns, expected {expected}")]
    RaggedRow {
        row: usize,
        expected: usize,
        actual: usize,
    },
    #[error("persisted grid has unknown tile code {code} at ({x}, {y})")]
    UnknownTileCode { x: usize, y: usize, code: u8 },
    #[error("persisted grid is {cols}x{rows}, declared {expected_cols}x{expected_rows}")]
    DimensionMismatch {
        expected_cols: usize,
        expected_rows: usize,
        cols: usize,
        rows: usize,
    },
}
