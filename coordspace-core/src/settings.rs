//! Persisted settings
//!
//! Settings are stored as JSON. Every section is `#[serde(default)]`, so a
//! partial file only overrides the keys it names.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to access settings file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("malformed settings: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("invalid settings: {0}")]
    Invalid(String),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WindowSettings {
    pub title: String,
    pub width: u32,
    pub height: u32,
    pub vsync: bool,
    pub fullscreen: bool,
}

impl Default for WindowSettings {
    fn default() -> Self {
        Self {
            title: "Coordinate Systems".to_string(),
            width: 800,
            height: 600,
            vsync: true,
            fullscreen: false,
        }
    }
}

/// A texture file and the sampler uniform it feeds. The texture unit is the
/// entry's position in [`AssetSettings::textures`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextureSettings {
    pub path: PathBuf,
    pub sampler: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AssetSettings {
    pub vertex_shader: PathBuf,
    pub fragment_shader: PathBuf,
    pub textures: Vec<TextureSettings>,
}

impl Default for AssetSettings {
    fn default() -> Self {
        Self {
            vertex_shader: PathBuf::from("assets/shaders/vert.glsl"),
            fragment_shader: PathBuf::from("assets/shaders/frag.glsl"),
            textures: vec![
                TextureSettings {
                    path: PathBuf::from("assets/textures/container.png"),
                    sampler: "texture0".to_string(),
                },
                TextureSettings {
                    path: PathBuf::from("assets/textures/awesomeface.png"),
                    sampler: "texture1".to_string(),
                },
            ],
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderSettings {
    pub clear_color: [f32; 4],
    /// Degrees per second.
    pub spin_rate: f64,
}

impl Default for RenderSettings {
    fn default() -> Self {
        Self {
            clear_color: [0.2, 0.3, 0.3, 1.0],
            spin_rate: crate::transform::DEFAULT_SPIN_RATE,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LogSettings {
    pub level: log::LevelFilter,
    pub file: Option<PathBuf>,
}

impl Default for LogSettings {
    fn default() -> Self {
        Self {
            level: log::LevelFilter::Info,
            file: None,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub window: WindowSettings,
    pub assets: AssetSettings,
    pub render: RenderSettings,
    pub log: LogSettings,
}

impl Settings {
    pub fn from_json(s: &str) -> Result<Self, ConfigError> {
        let settings: Settings = serde_json::from_str(s)?;
        settings.validate()?;
        Ok(settings)
    }

    pub fn to_json(&self) -> Result<String, ConfigError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.window.width == 0 || self.window.height == 0 {
            return Err(ConfigError::Invalid(format!(
                "window size {}x{} has a zero side",
                self.window.width, self.window.height
            )));
        }
        if self.assets.vertex_shader.as_os_str().is_empty()
            || self.assets.fragment_shader.as_os_str().is_empty()
        {
            return Err(ConfigError::Invalid("shader path is empty".to_string()));
        }
        if !self.render.spin_rate.is_finite() || self.render.spin_rate < 0.0 {
            return Err(ConfigError::Invalid(format!(
                "spin rate {} must be a finite non-negative number",
                self.render.spin_rate
            )));
        }
        Ok(())
    }

    /// Reads settings from `path`, or returns the defaults when the file
    /// does not exist yet.
    pub fn load_or_default(path: &Path) -> Result<Self, ConfigError> {
        match std::fs::read_to_string(path) {
            Ok(s) => Self::from_json(&s),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                log::info!("No settings at {}, using defaults", path.display());
                Ok(Self::default())
            }
            Err(source) => Err(ConfigError::Io {
                path: path.to_path_buf(),
                source,
            }),
        }
    }

    /// Writes the settings to `path`, creating parent directories.
    pub fn save(&self, path: &Path) -> Result<(), ConfigError> {
        let io_err = |source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        };
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(io_err)?;
        }
        std::fs::write(path, self.to_json()?).map_err(io_err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_json_fills_defaults() {
        let settings = Settings::from_json(r#"{ "window": { "width": 1024 } }"#).unwrap();
        assert_eq!(settings.window.width, 1024);
        assert_eq!(settings.window.height, 600);
        assert_eq!(settings.assets, AssetSettings::default());
        assert_eq!(settings.render.spin_rate, 4.0);
        assert_eq!(settings.log.level, log::LevelFilter::Info);
    }

    #[test]
    fn test_invalid_settings_are_rejected() {
        assert!(matches!(
            Settings::from_json(r#"{ "window": { "height": 0 } }"#),
            Err(ConfigError::Invalid(_))
        ));
        assert!(matches!(
            Settings::from_json(r#"{ "render": { "spin_rate": -1.0 } }"#),
            Err(ConfigError::Invalid(_))
        ));
        assert!(matches!(
            Settings::from_json(r#"{ "assets": { "vertex_shader": "" } }"#),
            Err(ConfigError::Invalid(_))
        ));
        assert!(matches!(
            Settings::from_json("{ not json"),
            Err(ConfigError::Parse(_))
        ));
    }

    #[test]
    fn test_save_then_load() {
        let dir = std::env::temp_dir().join(format!("coordspace-test-{}", std::process::id()));
        let path = dir.join("nested").join("settings.json");

        let mut settings = Settings::default();
        settings.window.width = 1280;
        settings.window.height = 720;
        settings.log.level = log::LevelFilter::Debug;
        settings.save(&path).unwrap();

        let loaded = Settings::load_or_default(&path).unwrap();
        assert_eq!(loaded, settings);

        std::fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn test_missing_file_gives_defaults() {
        let path = std::env::temp_dir().join("coordspace-does-not-exist.json");
        assert_eq!(Settings::load_or_default(&path).unwrap(), Settings::default());
    }
}
