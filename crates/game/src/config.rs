use std::path::Path;

use glam::Vec2;
use sandbox_kernel::WorldConfig;
use sandbox_physics::PhysicsConfig;
use sandbox_render::CameraConfig;
use serde::{Deserialize, Serialize};

/// Errors from loading or validating a [`GameConfig`].
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),
    #[error("invalid config: {0}")]
    Invalid(String),
}

/// Window size in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewportConfig {
    pub width: f32,
    pub height: f32,
}

impl Default for ViewportConfig {
    fn default() -> Self {
        Self {
            width: 1280.0,
            height: 720.0,
        }
    }
}

impl ViewportConfig {
    pub fn size(&self) -> Vec2 {
        Vec2::new(self.width, self.height)
    }
}

/// Everything tunable about a session. Every section and field is
/// optional in YAML; missing values take their defaults.
///
/// ```yaml
/// world:
///   cols: 2000
///   seed: 7
/// physics:
///   gravity: 0.6
/// viewport:
///   width: 1920
///   height: 1080
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    pub world: WorldConfig,
    pub physics: PhysicsConfig,
    pub camera: CameraConfig,
    pub viewport: ViewportConfig,
}

impl GameConfig {
    pub fn from_yaml_str(text: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_yaml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path.as_ref())?;
        let config = Self::from_yaml_str(&text)?;
        tracing::info!(path = %path.as_ref().display(), "config loaded");
        Ok(config)
    }

    /// Reject values the simulation cannot run with. World dimensions are
    /// checked later by world construction.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.viewport.width <= 0.0 || self.viewport.height <= 0.0 {
            return Err(ConfigError::Invalid("viewport must be positive".into()));
        }
        if self.world.tile_size == 0 {
            return Err(ConfigError::Invalid("tile_size must be positive".into()));
        }
        if self.physics.body_width < 1.0 || self.physics.body_height < 1.0 {
            return Err(ConfigError::Invalid(
                "player body must be at least 1px on each side".into(),
            ));
        }
        if !(0.0..=1.0).contains(&self.camera.smoothing) || self.camera.smoothing == 0.0 {
            return Err(ConfigError::Invalid(
                "camera smoothing must be in (0, 1]".into(),
            ));
        }
        // Faster falls can skip a whole tile between frames.
        if self.physics.max_fall_speed >= self.world.tile_size as f32 {
            return Err(ConfigError::Invalid(format!(
                "max_fall_speed {} must be below tile_size {}",
                self.physics.max_fall_speed, self.world.tile_size
            )));
        }
        Ok(())
    }
}
