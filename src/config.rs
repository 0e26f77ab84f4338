//! Application configuration
//!
//! Configuration is loaded from multiple sources with the following priority (lowest to highest):
//! 1. `config/default.toml` (version controlled)
//! 2. `config/user.toml` (gitignored, user overrides)
//! 3. Environment variables (`LGFX_SECTION__KEY`)

use figment::{Figment, providers::{Format, Toml, Env}};
use learngfx_core::Color;
use serde::{Serialize, Deserialize};
use std::path::{Path, PathBuf};

/// Main application configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub window: WindowConfig,
    #[serde(default)]
    pub camera: CameraConfig,
    #[serde(default)]
    pub input: InputConfig,
    /// Deck coloring and starting slide
    #[serde(default)]
    pub slides: SlidesConfig,
    /// Where shaders, textures, fonts and models live
    #[serde(default)]
    pub assets: AssetsConfig,
    /// Header overlay
    #[serde(default)]
    pub text: TextConfig,
    #[serde(default)]
    pub debug: DebugConfig,
}

impl AppConfig {
    /// Load configuration from default locations
    ///
    /// Priority (lowest to highest):
    /// 1. `config/default.toml`
    /// 2. `config/user.toml`
    /// 3. Environment variables (`LGFX_*`)
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from("config")
    }

    /// Load configuration from a specific config directory
    pub fn load_from<P: AsRef<Path>>(config_dir: P) -> Result<Self, ConfigError> {
        let config_dir = config_dir.as_ref();
        let default_path = config_dir.join("default.toml");
        let user_path = config_dir.join("user.toml");

        let mut figment = Figment::new();

        if default_path.exists() {
            figment = figment.merge(Toml::file(&default_path));
        }

        if user_path.exists() {
            figment = figment.merge(Toml::file(&user_path));
        }

        // LGFX_WINDOW__TITLE=Test -> window.title = "Test"
        figment = figment.merge(Env::prefixed("LGFX_").split("__"));

        figment.extract().map_err(ConfigError::from)
    }
}

/// Window configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WindowConfig {
    /// Base window title; the current slide is appended
    pub title: String,
    pub width: u32,
    pub height: u32,
    /// Start in fullscreen mode
    pub fullscreen: bool,
    pub vsync: bool,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            title: "LearnOpenGL".to_string(),
            width: 800,
            height: 600,
            fullscreen: false,
            vsync: true,
        }
    }
}

/// Camera configuration for the camera-driven slides
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CameraConfig {
    /// Starting position [x, y, z]
    pub start_position: [f32; 3],
    /// Initial field of view in degrees
    pub fov: f32,
    pub near: f32,
    pub far: f32,
    /// Maximum pitch angle in degrees
    pub pitch_limit: f32,
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            start_position: [0.0, 0.0, 3.0],
            fov: 45.0,
            near: 0.1,
            far: 100.0,
            pitch_limit: 89.0,
        }
    }
}

/// Input configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InputConfig {
    /// Movement speed (units per second)
    pub move_speed: f32,
    /// Degrees of rotation per pixel of mouse movement
    pub mouse_sensitivity: f32,
}

impl Default for InputConfig {
    fn default() -> Self {
        Self {
            move_speed: 3.0,
            mouse_sensitivity: 0.25,
        }
    }
}

/// Deck configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SlidesConfig {
    /// Background of the first slide
    pub gradient_start: Color,
    /// Background of the last slide
    pub gradient_end: Color,
    /// Slide shown at startup (clamped to the deck)
    pub start_index: usize,
}

impl Default for SlidesConfig {
    fn default() -> Self {
        Self {
            gradient_start: Color::MAGENTA,
            gradient_end: Color::BLACK,
            start_index: 0,
        }
    }
}

/// Asset locations
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AssetsConfig {
    /// Root directory; everything else is relative to it
    pub root: PathBuf,
    /// Overlay font, relative to `root`
    pub font: PathBuf,
    /// Model shown by the model loading slide, relative to `root`
    pub model: PathBuf,
}

impl Default for AssetsConfig {
    fn default() -> Self {
        Self {
            root: PathBuf::from("assets"),
            font: PathBuf::from("fonts/DejaVuSans.ttf"),
            model: PathBuf::from("models/cube/cube.obj"),
        }
    }
}

impl AssetsConfig {
    pub fn shaders_dir(&self) -> PathBuf {
        self.root.join("shaders")
    }

    pub fn textures_dir(&self) -> PathBuf {
        self.root.join("textures")
    }

    pub fn font_path(&self) -> PathBuf {
        self.root.join(&self.font)
    }

    pub fn model_path(&self) -> PathBuf {
        self.root.join(&self.model)
    }
}

/// Overlay text configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TextConfig {
    /// Pixel size glyphs are rasterized at; lines scale from this
    pub size: f32,
    /// Fixed header color; picked from the slide background when unset
    pub color: Option<Color>,
}

impl Default for TextConfig {
    fn default() -> Self {
        Self {
            size: 64.0,
            color: None,
        }
    }
}

/// Debug configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DebugConfig {
    /// Log level (error, warn, info, debug, trace)
    pub log_level: String,
    /// Show frames per second in the window title
    pub show_fps: bool,
}

impl Default for DebugConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            show_fps: true,
        }
    }
}

/// Configuration error
#[derive(Debug)]
pub struct ConfigError {
    message: String,
}

impl From<figment::Error> for ConfigError {
    fn from(e: figment::Error) -> Self {
        ConfigError {
            message: e.to_string(),
        }
    }
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Configuration error: {}", self.message)
    }
}

impl std::error::Error for ConfigError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = AppConfig::default();
        assert_eq!(config.window.width, 800);
        assert_eq!(config.window.height, 600);
        assert_eq!(config.camera.start_position, [0.0, 0.0, 3.0]);
        assert_eq!(config.slides.gradient_start, Color::MAGENTA);
        assert!(config.text.color.is_none());
    }

    #[test]
    fn test_config_serialization() {
        let config = AppConfig::default();
        let toml = toml::to_string(&config).unwrap();
        assert!(toml.contains("title"));
        assert!(toml.contains("gradient_start"));
        assert!(toml.contains("[assets]"));
    }

    #[test]
    fn test_asset_paths() {
        let assets = AssetsConfig::default();
        assert_eq!(assets.shaders_dir(), PathBuf::from("assets/shaders"));
        assert_eq!(assets.font_path(), PathBuf::from("assets/fonts/DejaVuSans.ttf"));
        assert_eq!(assets.model_path(), PathBuf::from("assets/models/cube/cube.obj"));
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let config: AppConfig = toml::from_str("[window]\ntitle = \"x\"\nwidth = 1024\nheight = 768\nfullscreen = false\nvsync = false\n").unwrap();
        assert_eq!(config.window.width, 1024);
        assert_eq!(config.debug.log_level, "info");
        assert_eq!(config.input.move_speed, 3.0);
    }
}
