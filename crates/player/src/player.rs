use glam::Vec2;
use sandbox_common::{Canvas, Color, Rect};
use sandbox_kernel::World;
use sandbox_physics::{PhysicsBody, PhysicsConfig, StepOutcome};
use serde::{Deserialize, Serialize};

const PLAYER_COLOR: Color = Color::rgb(220, 60, 60);

/// Presentation label for the current motion. Physics never reads it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum AnimState {
    #[default]
    Idle,
    Walk,
    Jump,
}

impl AnimState {
    pub fn for_motion(x_speed: f32, on_ground: bool) -> Self {
        if !on_ground {
            Self::Jump
        } else if x_speed != 0.0 {
            Self::Walk
        } else {
            Self::Idle
        }
    }
}

/// The controllable character.
///
/// Commands only set intent; [`Player::update`] applies it against the world.
#[derive(Debug, Clone)]
pub struct Player {
    body: PhysicsBody,
    x_speed: f32,
    anim: AnimState,
    config: PhysicsConfig,
}

impl Player {
    /// Create a player at the world's spawn point.
    pub fn spawn(world: &World, config: PhysicsConfig) -> Self {
        Self::at(PhysicsBody::spawn_point(world), config)
    }

    pub fn at(position: Vec2, config: PhysicsConfig) -> Self {
        Self {
            body: PhysicsBody::new(position, &config),
            x_speed: 0.0,
            anim: AnimState::Jump,
            config,
        }
    }

    pub fn move_left(&mut self) {
        self.x_speed = -self.config.move_speed;
        self.body.facing_right = false;
    }

    pub fn move_right(&mut self) {
        self.x_speed = self.config.move_speed;
        self.body.facing_right = true;
    }

    pub fn stop(&mut self) {
        self.x_speed = 0.0;
    }

    /// Returns whether a jump was available.
    pub fn jump(&mut self) -> bool {
        let jumped = self.body.jump(&self.config);
        if jumped {
            self.anim = AnimState::Jump;
        }
        jumped
    }

    /// Advance one frame against `world`.
    pub fn update(&mut self, world: &World) -> StepOutcome {
        let outcome = self.body.step(self.x_speed, world, &self.config);
        if outcome.landed {
            tracing::trace!(x = self.body.rect.x, y = self.body.rect.y, "player landed");
        }
        self.anim = AnimState::for_motion(self.x_speed, self.body.on_ground);
        outcome
    }

    /// Teleport, clearing velocity. Used when loading a save.
    pub fn place_at(&mut self, position: Vec2, facing_right: bool) {
        tracing::debug!(x = position.x, y = position.y, "player placed");
        self.body.respawn(position);
        self.body.facing_right = facing_right;
        self.x_speed = 0.0;
        self.anim = AnimState::for_motion(0.0, self.body.on_ground);
    }

    pub fn body(&self) -> &PhysicsBody {
        &self.body
    }

    pub fn rect(&self) -> Rect {
        self.body.rect
    }

    pub fn position(&self) -> Vec2 {
        self.body.position()
    }

    pub fn center(&self) -> Vec2 {
        self.body.rect.center()
    }

    pub fn x_speed(&self) -> f32 {
        self.x_speed
    }

    pub fn anim(&self) -> AnimState {
        self.anim
    }

    pub fn facing_right(&self) -> bool {
        self.body.facing_right
    }

    pub fn config(&self) -> &PhysicsConfig {
        &self.config
    }

    /// Fill the player's box, shifted by the camera offset.
    pub fn draw(&self, canvas: &mut (impl Canvas + ?Sized), camera: Vec2) {
        canvas.fill_rect(self.body.rect.translated(-camera), PLAYER_COLOR);
    }
}
