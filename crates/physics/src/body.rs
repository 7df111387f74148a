use std::ops::RangeInclusive;

use glam::Vec2;
use sandbox_common::Rect;
use serde::{Deserialize, Serialize};

use crate::query::SolidityQuery;

/// Edges are exclusive at pixel granularity: a box whose bottom sits exactly
/// on a cell boundary does not span the cell below it.
const EDGE_INSET: f32 = 1.0;

/// Movement tuning. Values are per frame at a capped 60 Hz, not scaled by
/// elapsed time.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PhysicsConfig {
    /// Added to `dy` every airborne frame.
    pub gravity: f32,
    pub max_fall_speed: f32,
    /// Initial `dy` of a grounded jump. Negative is up.
    pub jump_power: f32,
    /// Multiplier applied to `jump_power` for airborne jumps.
    pub double_jump_factor: f32,
    /// Horizontal speed set by the move commands.
    pub move_speed: f32,
    pub max_jumps: u8,
    pub body_width: f32,
    pub body_height: f32,
}

impl Default for PhysicsConfig {
    fn default() -> Self {
        Self {
            gravity: 0.8,
            max_fall_speed: 20.0,
            jump_power: -15.0,
            double_jump_factor: 0.8,
            move_speed: 5.0,
            max_jumps: 2,
            body_width: 48.0,
            body_height: 64.0,
        }
    }
}

/// What happened during one [`PhysicsBody::step`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct StepOutcome {
    /// The horizontal move was rejected.
    pub blocked_x: bool,
    /// The body touched ground this frame after being airborne.
    pub landed: bool,
    pub hit_ceiling: bool,
    /// The body left the world and was teleported back to spawn.
    pub respawned: bool,
}

/// Axis-aligned body with platformer velocity state.
#[derive(Debug, Clone, PartialEq)]
pub struct PhysicsBody {
    pub rect: Rect,
    pub dx: f32,
    pub dy: f32,
    pub on_ground: bool,
    pub jumps_left: u8,
    pub facing_right: bool,
}

enum Contact {
    None,
    Floor,
    Ceiling,
}

impl PhysicsBody {
    /// Airborne body at rest with a full set of jumps.
    pub fn new(position: Vec2, config: &PhysicsConfig) -> Self {
        Self {
            rect: Rect::new(
                position.x,
                position.y,
                config.body_width,
                config.body_height,
            ),
            dx: 0.0,
            dy: 0.0,
            on_ground: false,
            jumps_left: config.max_jumps,
            facing_right: true,
        }
    }

    pub fn position(&self) -> Vec2 {
        self.rect.position()
    }

    /// Spawn point used on creation and after leaving the world.
    pub fn spawn_point(world: &impl SolidityQuery) -> Vec2 {
        Vec2::new(world.extent().0 / 2.0, 0.0)
    }

    /// Advance one frame with horizontal speed `x_speed`.
    ///
    /// Order: gravity, horizontal pass, vertical pass, out-of-world check.
    pub fn step(
        &mut self,
        x_speed: f32,
        world: &impl SolidityQuery,
        config: &PhysicsConfig,
    ) -> StepOutcome {
        let was_grounded = self.on_ground;
        self.dx = x_speed;
        if !self.on_ground {
            self.dy = (self.dy + config.gravity).min(config.max_fall_speed);
        }

        let blocked_x = self.resolve_horizontal(world);
        let contact = self.resolve_vertical(world, config);

        let mut outcome = StepOutcome {
            blocked_x,
            landed: matches!(contact, Contact::Floor) && !was_grounded,
            hit_ceiling: matches!(contact, Contact::Ceiling),
            respawned: false,
        };

        let (_, world_h) = world.extent();
        if self.rect.top() > world_h {
            tracing::warn!(
                x = self.rect.x,
                y = self.rect.y,
                "body fell out of the world, respawning"
            );
            self.respawn(Self::spawn_point(world));
            outcome.respawned = true;
        }
        outcome
    }

    /// Jump if any jumps remain. Airborne jumps are weaker.
    pub fn jump(&mut self, config: &PhysicsConfig) -> bool {
        if self.jumps_left == 0 {
            return false;
        }
        self.dy = if self.on_ground {
            config.jump_power
        } else {
            config.jump_power * config.double_jump_factor
        };
        self.jumps_left -= 1;
        self.on_ground = false;
        tracing::debug!(dy = self.dy, jumps_left = self.jumps_left, "jump");
        true
    }

    pub fn respawn(&mut self, at: Vec2) {
        self.rect.x = at.x;
        self.rect.y = at.y;
        self.dx = 0.0;
        self.dy = 0.0;
        self.on_ground = false;
    }

    /// Try the whole horizontal move; keep the old `x` if any spanned row is
    /// solid at the leading edge. Returns whether the move was rejected.
    fn resolve_horizontal(&mut self, world: &impl SolidityQuery) -> bool {
        if self.dx == 0.0 {
            return false;
        }
        let s = world.cell_size();
        let new_x = self.rect.x + self.dx;
        let leading = if self.dx > 0.0 {
            new_x + self.rect.w
        } else {
            new_x
        };
        let col = (leading / s).floor() as i32;
        let blocked = span(self.rect.y, self.rect.h, s).any(|row| world.is_solid_cell(col, row));
        if blocked {
            tracing::trace!(x = self.rect.x, dx = self.dx, col, "horizontal move rejected");
        } else {
            self.rect.x = new_x;
        }
        blocked
    }

    /// Move by `dy`, snapping to the first solid cell found along the
    /// leading edge. A body resting with `dy == 0` probes the cell under
    /// its feet so it stays grounded.
    fn resolve_vertical(&mut self, world: &impl SolidityQuery, config: &PhysicsConfig) -> Contact {
        self.on_ground = false;
        let s = world.cell_size();
        let new_y = self.rect.y + self.dy;
        let mut cols = span(self.rect.x, self.rect.w, s);

        if self.dy >= 0.0 {
            let row = ((new_y + self.rect.h) / s).floor() as i32;
            if cols.any(|col| world.is_solid_cell(col, row)) {
                self.rect.y = row as f32 * s - self.rect.h;
                self.dy = 0.0;
                self.on_ground = true;
                self.jumps_left = config.max_jumps;
                return Contact::Floor;
            }
        } else {
            let row = (new_y / s).floor() as i32;
            if cols.any(|col| world.is_solid_cell(col, row)) {
                self.rect.y = (row + 1) as f32 * s;
                self.dy = 0.0;
                return Contact::Ceiling;
            }
        }
        self.rect.y = new_y;
        Contact::None
    }
}

/// Cells covered by `[start, start + len)` along one axis.
fn span(start: f32, len: f32, cell: f32) -> RangeInclusive<i32> {
    let first = (start / cell).floor() as i32;
    let last = ((start + len - EDGE_INSET) / cell).floor() as i32;
    first..=last.max(first)
}
