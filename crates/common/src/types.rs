use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Persisted code did not name a known tile type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("unknown tile code {0}")]
pub struct UnknownTileCode(pub u8);

/// The kind of a single grid cell.
///
/// Discriminants are the persisted codes and must stay stable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[repr(u8)]
pub enum TileType {
    #[default]
    Empty = 0,
    Dirt = 1,
    Grass = 2,
    Stone = 3,
    /// Indestructible edge column.
    Barrier = 4,
}

impl TileType {
    pub const ALL: [TileType; 5] = [
        TileType::Empty,
        TileType::Dirt,
        TileType::Grass,
        TileType::Stone,
        TileType::Barrier,
    ];

    /// Persisted small-integer code.
    pub fn code(self) -> u8 {
        self as u8
    }

    pub fn from_code(code: u8) -> Result<Self, UnknownTileCode> {
        match code {
            0 => Ok(Self::Empty),
            1 => Ok(Self::Dirt),
            2 => Ok(Self::Grass),
            3 => Ok(Self::Stone),
            4 => Ok(Self::Barrier),
            other => Err(UnknownTileCode(other)),
        }
    }

    pub fn is_empty(self) -> bool {
        self == Self::Empty
    }

    /// Display color. `Empty` maps to the sky color but is never drawn.
    pub fn color(self) -> Color {
        match self {
            Self::Empty => Color::rgb(135, 206, 235),
            Self::Dirt => Color::rgb(139, 69, 19),
            Self::Grass => Color::rgb(34, 139, 34),
            Self::Stone => Color::rgb(128, 128, 128),
            Self::Barrier => Color::rgb(40, 40, 40),
        }
    }

    /// Single-character glyph used by text renderers.
    pub fn glyph(self) -> char {
        match self {
            Self::Empty => ' ',
            Self::Dirt => '#',
            Self::Grass => '"',
            Self::Stone => '%',
            Self::Barrier => '|',
        }
    }
}

/// 8-bit RGB color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }
}

/// Axis-aligned rectangle in pixels. `y` grows downward.
///
/// `right()` and `bottom()` are exclusive edges: the first pixel outside the box.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub w: f32,
    pub h: f32,
}

impl Rect {
    pub const fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self { x, y, w, h }
    }

    pub fn left(&self) -> f32 {
        self.x
    }

    pub fn top(&self) -> f32 {
        self.y
    }

    pub fn right(&self) -> f32 {
        self.x + self.w
    }

    pub fn bottom(&self) -> f32 {
        self.y + self.h
    }

    pub fn position(&self) -> Vec2 {
        Vec2::new(self.x, self.y)
    }

    pub fn center(&self) -> Vec2 {
        Vec2::new(self.x + self.w * 0.5, self.y + self.h * 0.5)
    }

    /// Same size, shifted by `offset`.
    pub fn translated(&self, offset: Vec2) -> Self {
        Self {
            x: self.x + offset.x,
            y: self.y + offset.y,
            ..*self
        }
    }

    pub fn intersects(&self, other: &Rect) -> bool {
        self.x < other.right()
            && other.x < self.right()
            && self.y < other.bottom()
            && other.y < self.bottom()
    }
}

/// A draw target that only knows filled axis-aligned rectangles.
///
/// Rectangles arrive in screen space; the caller has already applied the
/// camera offset.
pub trait Canvas {
    fn fill_rect(&mut self, rect: Rect, color: Color);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tile_codes_round_trip() {
        for tile in TileType::ALL {
            assert_eq!(TileType::from_code(tile.code()), Ok(tile));
        }
    }

    #[test]
    fn unknown_code_rejected() {
        assert_eq!(TileType::from_code(5), Err(UnknownTileCode(5)));
        assert_eq!(TileType::from_code(255), Err(UnknownTileCode(255)));
    }

    #[test]
    fn only_empty_is_empty() {
        assert!(TileType::Empty.is_empty());
        assert!(!TileType::Barrier.is_empty());
        assert!(!TileType::Dirt.is_empty());
    }

    #[test]
    fn rect_edges_are_exclusive() {
        let r = Rect::new(10.0, 20.0, 48.0, 64.0);
        assert_eq!(r.right(), 58.0);
        assert_eq!(r.bottom(), 84.0);
        assert_eq!(r.center(), Vec2::new(34.0, 52.0));
    }

    #[test]
    fn touching_rects_do_not_intersect() {
        let a = Rect::new(0.0, 0.0, 32.0, 32.0);
        let b = Rect::new(32.0, 0.0, 32.0, 32.0);
        assert!(!a.intersects(&b));
        assert!(a.intersects(&Rect::new(31.0, 31.0, 2.0, 2.0)));
    }

    #[test]
    fn translated_keeps_size() {
        let r = Rect::new(5.0, 5.0, 2.0, 3.0).translated(Vec2::new(-5.0, 1.0));
        assert_eq!(r, Rect::new(0.0, 6.0, 2.0, 3.0));
    }
}
