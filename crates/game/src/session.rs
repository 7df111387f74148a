use glam::Vec2;
use sandbox_common::Canvas;
use sandbox_input::{Action, screen_to_grid};
use sandbox_kernel::{World, WorldError};
use sandbox_persist::{SaveFile, StoreError};
use sandbox_physics::{PhysicsConfig, StepOutcome};
use sandbox_player::Player;
use sandbox_render::{Camera, FrameStats, RenderView, draw_frame};

use crate::config::GameConfig;

/// Result of one simulated frame.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FrameReport {
    /// Something visible changed: the player, the camera, or a tile.
    pub needs_redraw: bool,
    /// Effective tile edits applied this frame.
    pub edits: usize,
    pub step: StepOutcome,
}

/// A running game: the world, the player in it, and the camera on them.
pub struct Session {
    world: World,
    player: Player,
    camera: Camera,
    player_name: String,
    frame: u64,
}

impl Session {
    /// Generate a fresh world and spawn the player in it.
    pub fn new(config: &GameConfig, player_name: impl Into<String>) -> Result<Self, WorldError> {
        let world = World::generate(config.world)?;
        let player = Player::spawn(&world, config.physics);
        Ok(Self::from_parts(world, player, config, player_name))
    }

    /// Rebuild a session from a save. A save without a player spawns one.
    pub fn from_save(
        save: &SaveFile,
        config: &GameConfig,
        player_name: impl Into<String>,
    ) -> Result<Self, StoreError> {
        let (world, saved_player) = save.restore()?;
        let mut player = Player::spawn(&world, config.physics);
        if let Some(p) = saved_player {
            if fits_in_world(&world, p.position(), &config.physics) {
                player.place_at(p.position(), p.facing_right);
            } else {
                tracing::warn!(
                    x = p.x,
                    y = p.y,
                    "saved player outside the world, spawning instead"
                );
            }
        }
        Ok(Self::from_parts(world, player, config, player_name))
    }

    fn from_parts(
        world: World,
        player: Player,
        config: &GameConfig,
        player_name: impl Into<String>,
    ) -> Self {
        let mut camera = Camera::new(config.viewport.size(), config.camera);
        camera.snap_to(player.center(), world_size(&world));
        Self {
            world,
            player,
            camera,
            player_name: player_name.into(),
            frame: 0,
        }
    }

    /// Swap in a different world. The player is rebuilt at the new world's
    /// spawn point so it never refers to stale terrain.
    pub fn replace_world(&mut self, world: World) {
        let config = *self.player.config();
        self.player = Player::spawn(&world, config);
        self.world = world;
        self.camera.snap_to(self.player.center(), world_size(&self.world));
        tracing::info!("world replaced, player respawned");
    }

    pub fn world(&self) -> &World {
        &self.world
    }

    pub fn player(&self) -> &Player {
        &self.player
    }

    pub fn camera(&self) -> &Camera {
        &self.camera
    }

    pub fn player_name(&self) -> &str {
        &self.player_name
    }

    pub fn frame_count(&self) -> u64 {
        self.frame
    }

    /// Apply one input action. Returns whether it changed a tile.
    pub fn apply(&mut self, action: Action) -> bool {
        match action {
            Action::MoveLeft => self.player.move_left(),
            Action::MoveRight => self.player.move_right(),
            Action::Stop => self.player.stop(),
            Action::Jump => {
                self.player.jump();
            }
            Action::Place { screen, tile } => {
                let cell = self.cell_under(screen);
                return self.world.place_tile(cell.x, cell.y, tile);
            }
            Action::Break { screen } => {
                let cell = self.cell_under(screen);
                return self.world.break_tile(cell.x, cell.y);
            }
            Action::Noop => {}
        }
        false
    }

    fn cell_under(&self, screen: Vec2) -> glam::IVec2 {
        screen_to_grid(screen, self.camera.position(), self.world.tile_size())
    }

    /// Run one frame: input, then physics, then camera.
    pub fn frame(&mut self, actions: &[Action]) -> FrameReport {
        let edits = actions.iter().filter(|&&a| self.apply(a)).count();
        for event in self.world.drain_events() {
            tracing::debug!(?event, "tile edited");
        }

        let before = (self.player.rect(), self.player.anim());
        let step = self.player.update(&self.world);
        let player_changed = before != (self.player.rect(), self.player.anim());

        let camera_moved = self.camera.follow(self.player.center(), world_size(&self.world));

        self.frame += 1;
        let report = FrameReport {
            needs_redraw: edits > 0 || player_changed || camera_moved,
            edits,
            step,
        };
        tracing::trace!(frame = self.frame, ?report, "frame simulated");
        report
    }

    /// Draw the current frame.
    pub fn render(&self, canvas: &mut (impl Canvas + ?Sized)) -> FrameStats {
        draw_frame(
            canvas,
            &self.world,
            Some(&self.player),
            &RenderView::from_camera(&self.camera),
        )
    }

    /// Snapshot for saving.
    pub fn capture(&self) -> SaveFile {
        SaveFile::capture(&self.world, Some(&self.player))
    }
}

fn world_size(world: &World) -> Vec2 {
    Vec2::new(world.pixel_width(), world.pixel_height())
}

/// Whether a body at `position` starts inside the world. Cells outside the
/// grid are solid, so a body left of, right of or below it can never return.
fn fits_in_world(world: &World, position: Vec2, physics: &PhysicsConfig) -> bool {
    position.is_finite()
        && position.x >= 0.0
        && position.x <= world.pixel_width() - physics.body_width
        && position.y < world.pixel_height()
}
