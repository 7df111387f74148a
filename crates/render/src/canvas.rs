use sandbox_common::{Canvas, Color, Rect, TileType};

/// One recorded `fill_rect` call.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DrawCommand {
    pub rect: Rect,
    pub color: Color,
}

/// Canvas that keeps every command, for tests and replay.
#[derive(Debug, Default)]
pub struct RecordingCanvas {
    commands: Vec<DrawCommand>,
}

impl RecordingCanvas {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    pub fn clear(&mut self) {
        self.commands.clear();
    }

    pub fn len(&self) -> usize {
        self.commands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }
}

impl Canvas for RecordingCanvas {
    fn fill_rect(&mut self, rect: Rect, color: Color) {
        self.commands.push(DrawCommand { rect, color });
    }
}

/// Character-cell canvas for terminal output.
///
/// Each cell covers `cell_px` square pixels. A rectangle marks every cell
/// whose center it covers; colors that match a tile use its glyph, anything
/// else is drawn as `@`.
#[derive(Debug)]
pub struct TextCanvas {
    cols: usize,
    rows: usize,
    cell_px: f32,
    cells: Vec<char>,
}

impl TextCanvas {
    pub fn new(width_px: f32, height_px: f32, cell_px: f32) -> Self {
        let cols = (width_px / cell_px).ceil().max(0.0) as usize;
        let rows = (height_px / cell_px).ceil().max(0.0) as usize;
        Self {
            cols,
            rows,
            cell_px,
            cells: vec![' '; cols * rows],
        }
    }

    fn glyph_for(color: Color) -> char {
        TileType::ALL
            .iter()
            .find(|t| !t.is_empty() && t.color() == color)
            .map_or('@', |t| t.glyph())
    }

    pub fn to_text(&self) -> String {
        let mut out = String::with_capacity((self.cols + 1) * self.rows);
        for row in self.cells.chunks(self.cols.max(1)) {
            out.extend(row.iter());
            out.push('\n');
        }
        out
    }
}

impl Canvas for TextCanvas {
    fn fill_rect(&mut self, rect: Rect, color: Color) {
        let glyph = Self::glyph_for(color);
        let c = self.cell_px;
        // Cells whose centers fall inside [left, right) x [top, bottom).
        let first = |start: f32| ((start / c) - 0.5).ceil().max(0.0) as usize;
        let end = |stop: f32| ((stop / c) - 0.5).ceil().max(0.0) as usize;
        let (x0, x1) = (first(rect.left()), end(rect.right()).min(self.cols));
        let (y0, y1) = (first(rect.top()), end(rect.bottom()).min(self.rows));
        for y in y0..y1 {
            for x in x0..x1 {
                self.cells[y * self.cols + x] = glyph;
            }
        }
    }
}
