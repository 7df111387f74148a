use glam::Vec2;
use sandbox_common::Canvas;
use sandbox_kernel::World;
use sandbox_player::Player;

use crate::camera::Camera;

/// Viewport placement for one frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RenderView {
    /// World-space top-left of the viewport.
    pub offset: Vec2,
    /// Viewport size in pixels.
    pub size: Vec2,
}

impl RenderView {
    pub fn new(offset: Vec2, size: Vec2) -> Self {
        Self { offset, size }
    }

    pub fn from_camera(camera: &Camera) -> Self {
        Self {
            offset: camera.position(),
            size: camera.viewport(),
        }
    }
}

impl Default for RenderView {
    fn default() -> Self {
        Self {
            offset: Vec2::ZERO,
            size: Vec2::new(1280.0, 720.0),
        }
    }
}

/// Counters for one composed frame.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FrameStats {
    pub tiles_drawn: usize,
    pub visible_cells: usize,
}

/// Draw the visible slice of the world, then the player on top.
pub fn draw_frame(
    canvas: &mut (impl Canvas + ?Sized),
    world: &World,
    player: Option<&Player>,
    view: &RenderView,
) -> FrameStats {
    let range = world.visible_range(view.offset.x, view.offset.y, view.size.x, view.size.y);
    let tiles_drawn = world.draw(&mut *canvas, view.offset.x, view.offset.y, view.size.x, view.size.y);
    if let Some(player) = player {
        player.draw(canvas, view.offset);
    }
    let stats = FrameStats {
        tiles_drawn,
        visible_cells: range.cell_count(),
    };
    tracing::trace!(?stats, "frame composed");
    stats
}
