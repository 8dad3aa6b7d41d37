use crate::anim::{Animation, EasingKind, Millis};
use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    #[serde(default = "default_cursor")]
    pub cursor: CursorConfig,

    #[serde(default = "default_window")]
    pub window: Size,

    #[serde(default = "default_fps_cap")]
    pub fps_cap: u32,

    /// Length of the scripted demo session.
    #[serde(default = "default_session_ms")]
    pub session_ms: Millis,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CursorConfig {
    #[serde(default = "default_duration_ms")]
    pub duration_ms: Millis,

    #[serde(default = "default_min_radius")]
    pub min_radius: f32,

    #[serde(default = "default_max_radius")]
    pub max_radius: f32,

    #[serde(default = "default_easing")]
    pub easing: EasingKind,

    #[serde(default)]
    pub mode: CursorMode,
}

/// How the cursor radius reacts to the left button.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CursorMode {
    /// Grow while held, shrink on release.
    #[default]
    Hold,
    /// Grow and shrink back on every press.
    Pulse,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Size {
    pub width: u32,
    pub height: u32,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            cursor: default_cursor(),
            window: default_window(),
            fps_cap: default_fps_cap(),
            session_ms: default_session_ms(),
        }
    }
}

impl Default for CursorConfig {
    fn default() -> Self {
        default_cursor()
    }
}

fn default_cursor() -> CursorConfig {
    CursorConfig {
        duration_ms: default_duration_ms(),
        min_radius: default_min_radius(),
        max_radius: default_max_radius(),
        easing: default_easing(),
        mode: CursorMode::default(),
    }
}

fn default_duration_ms() -> Millis {
    250.0
}

fn default_min_radius() -> f32 {
    12.0
}

fn default_max_radius() -> f32 {
    24.0
}

fn default_easing() -> EasingKind {
    EasingKind::Quadratic
}

fn default_window() -> Size {
    Size {
        width: 1200,
        height: 800,
    }
}

fn default_fps_cap() -> u32 {
    60
}

fn default_session_ms() -> Millis {
    3000.0
}

impl Config {
    pub fn path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| anyhow::anyhow!("Could not find config directory"))?;
        Ok(config_dir.join("pulsar").join("config.toml"))
    }

    pub fn load() -> Result<Self> {
        Self::load_from(&Self::path()?)
    }

    /// Missing files load as the defaults.
    pub fn load_from(config_path: &Path) -> Result<Self> {
        if config_path.exists() {
            let contents = std::fs::read_to_string(config_path)?;
            Self::from_toml_str(&contents)
        } else {
            Ok(Config::default())
        }
    }

    pub fn from_toml_str(contents: &str) -> Result<Self> {
        let config: Config = toml::from_str(contents)?;
        config.validate()?;
        Ok(config)
    }

    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::path()?)
    }

    pub fn save_to(&self, config_path: &Path) -> Result<()> {
        if let Some(dir) = config_path.parent() {
            std::fs::create_dir_all(dir)?;
        }

        let contents = toml::to_string_pretty(self)?;
        std::fs::write(config_path, contents)?;

        Ok(())
    }

    pub fn validate(&self) -> Result<()> {
        let cursor = &self.cursor;
        if !(cursor.duration_ms.is_finite() && cursor.duration_ms > 0.0) {
            anyhow::bail!("cursor.duration_ms must be positive, got {}", cursor.duration_ms);
        }
        if !cursor.min_radius.is_finite() || !cursor.max_radius.is_finite() {
            anyhow::bail!(
                "cursor radii must be finite, got {} and {}",
                cursor.min_radius,
                cursor.max_radius
            );
        }
        if self.fps_cap == 0 {
            anyhow::bail!("fps_cap must be at least 1");
        }
        if !(self.session_ms.is_finite() && self.session_ms >= 0.0) {
            anyhow::bail!("session_ms must be non-negative, got {}", self.session_ms);
        }
        Ok(())
    }
}

impl CursorConfig {
    /// The cursor radius animation described by this config. Expects a
    /// validated config; a non-positive duration panics.
    pub fn build_animation(&self) -> Animation {
        Animation::new(self.duration_ms, self.min_radius, self.max_radius, self.easing)
            .with_bounce(self.mode == CursorMode::Pulse)
    }
}
