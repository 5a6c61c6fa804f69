use glam::Vec3;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Errors from loading or validating a [`Config`].
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),
    #[error("invalid config value `{field}`: {reason}")]
    Invalid { field: &'static str, reason: String },
}

/// Startup constants for the harness.
///
/// Any subset of fields may be given in a YAML file; the rest keep their
/// defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Window title.
    pub title: String,
    /// Surface width in pixels.
    pub width: u32,
    /// Surface height in pixels.
    pub height: u32,
    pub fullscreen: bool,
    /// Iteration cap for the frame loop.
    pub target_fps: u32,
    /// World units travelled per millisecond of frame time.
    pub move_speed: f32,
    /// Degrees of rotation per pixel of mouse motion.
    pub mouse_sensitivity: f32,
    /// Vertical field of view in degrees.
    pub field_of_view: f32,
    pub near_clip: f32,
    pub far_clip: f32,
    /// Initial camera position.
    pub start_position: Vec3,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            title: "freelook".into(),
            width: 1280,
            height: 720,
            fullscreen: false,
            target_fps: 60,
            move_speed: 0.01,
            mouse_sensitivity: 0.15,
            field_of_view: 70.0,
            near_clip: 0.3,
            far_clip: 1000.0,
            start_position: Vec3::new(0.0, 0.0, -10.0),
        }
    }
}

impl Config {
    /// Read a YAML config file and validate it.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)?;
        let config = Self::from_yaml(&text)?;
        tracing::debug!(path = %path.display(), "config loaded");
        Ok(config)
    }

    /// Parse YAML text and validate the result.
    pub fn from_yaml(text: &str) -> Result<Self, ConfigError> {
        let config: Config = serde_yaml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Width over height of the render surface.
    pub fn aspect_ratio(&self) -> f32 {
        self.width as f32 / self.height.max(1) as f32
    }

    /// Check every option against its allowed range.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.width == 0 {
            return Err(invalid("width", "must be non-zero"));
        }
        if self.height == 0 {
            return Err(invalid("height", "must be non-zero"));
        }
        if self.target_fps == 0 {
            return Err(invalid("target_fps", "must be non-zero"));
        }
        if !(self.move_speed.is_finite() && self.move_speed > 0.0) {
            return Err(invalid("move_speed", "must be positive and finite"));
        }
        if !(self.mouse_sensitivity.is_finite() && self.mouse_sensitivity > 0.0) {
            return Err(invalid("mouse_sensitivity", "must be positive and finite"));
        }
        if !(self.field_of_view > 0.0 && self.field_of_view < 180.0) {
            return Err(invalid("field_of_view", "must lie in (0, 180) degrees"));
        }
        if !(self.near_clip.is_finite() && self.near_clip > 0.0) {
            return Err(invalid("near_clip", "must be positive and finite"));
        }
        if !(self.far_clip.is_finite() && self.far_clip > self.near_clip) {
            return Err(invalid("far_clip", "must be finite and beyond near_clip"));
        }
        if !self.start_position.is_finite() {
            return Err(invalid("start_position", "must be finite"));
        }
        Ok(())
    }
}

fn invalid(field: &'static str, reason: &str) -> ConfigError {
    ConfigError::Invalid {
        field,
        reason: reason.into(),
    }
}
