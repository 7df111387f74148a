use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Camera easing parameters.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraConfig {
    /// Fraction of the remaining distance covered per frame.
    pub smoothing: f32,
    /// Distance in pixels below which the camera snaps and stops moving.
    pub settle_epsilon: f32,
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            smoothing: 0.1,
            settle_epsilon: 0.1,
        }
    }
}

/// 2D follow camera. Its position is the world-space top-left of the
/// viewport, kept inside `[0, world - viewport]` on each axis.
///
/// Camera motion is presentation state; it is not part of the world.
#[derive(Debug, Clone)]
pub struct Camera {
    position: Vec2,
    viewport: Vec2,
    config: CameraConfig,
}

impl Camera {
    pub fn new(viewport: Vec2, config: CameraConfig) -> Self {
        Self {
            position: Vec2::ZERO,
            viewport,
            config,
        }
    }

    /// World-space offset to subtract when drawing.
    pub fn position(&self) -> Vec2 {
        self.position
    }

    pub fn viewport(&self) -> Vec2 {
        self.viewport
    }

    pub fn set_viewport(&mut self, viewport: Vec2) {
        self.viewport = viewport;
    }

    /// Where the camera wants to be to center `focus`, clamped so the
    /// viewport stays inside the world. A world smaller than the viewport
    /// pins that axis to 0.
    pub fn target_for(&self, focus: Vec2, world_size: Vec2) -> Vec2 {
        let max = (world_size - self.viewport).max(Vec2::ZERO);
        (focus - self.viewport * 0.5).clamp(Vec2::ZERO, max)
    }

    /// Ease toward the target for `focus`. Returns whether the camera moved
    /// enough to need a redraw; once within the settle distance it snaps
    /// onto the target and reports `false`.
    pub fn follow(&mut self, focus: Vec2, world_size: Vec2) -> bool {
        let target = self.target_for(focus, world_size);
        let delta = target - self.position;
        if delta.length() <= self.config.settle_epsilon {
            self.position = target;
            return false;
        }
        self.position += delta * self.config.smoothing;
        true
    }

    /// Jump straight to the target, e.g. on spawn or load.
    pub fn snap_to(&mut self, focus: Vec2, world_size: Vec2) {
        self.position = self.target_for(focus, world_size);
    }
}
