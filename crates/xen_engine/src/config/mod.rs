//! Configuration system
//!
//! Configuration structs implement [`Config`] to load and save themselves as
//! TOML or RON, picked by file extension.

pub use serde::{Serialize, Deserialize};
use std::path::Path;

/// Configuration trait
pub trait Config: Serialize + for<'de> Deserialize<'de> + Default {
    /// Load configuration from file
    ///
    /// # Errors
    ///
    /// I/O failures, parse failures, and extensions other than `.toml`/`.ron`.
    fn load_from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path)?;

        match extension(path) {
            Some("toml") => toml::from_str(&contents).map_err(|e| ConfigError::Parse(e.to_string())),
            Some("ron") => ron::from_str(&contents).map_err(|e| ConfigError::Parse(e.to_string())),
            _ => Err(ConfigError::UnsupportedFormat(path.display().to_string())),
        }
    }

    /// Save configuration to file
    ///
    /// # Errors
    ///
    /// I/O failures, serialization failures, and unsupported extensions.
    fn save_to_file(&self, path: impl AsRef<Path>) -> Result<(), ConfigError> {
        let path = path.as_ref();
        let contents = match extension(path) {
            Some("toml") => toml::to_string_pretty(self).map_err(|e| ConfigError::Serialize(e.to_string()))?,
            Some("ron") => ron::ser::to_string_pretty(self, ron::ser::PrettyConfig::default())
                .map_err(|e| ConfigError::Serialize(e.to_string()))?,
            _ => return Err(ConfigError::UnsupportedFormat(path.display().to_string())),
        };

        std::fs::write(path, contents).map_err(ConfigError::Io)
    }
}

fn extension(path: &Path) -> Option<&str> {
    path.extension().and_then(|ext| ext.to_str())
}

/// Configuration errors
#[derive(thiserror::Error, Debug)]
pub enum ConfigError {
    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Parse error
    #[error("Parse error: {0}")]
    Parse(String),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialize(String),

    /// Unsupported format
    #[error("Unsupported format: {0}")]
    UnsupportedFormat(String),

    /// A value failed validation
    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

/// # Scene Configuration
///
/// Per-scene behavior.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SceneConfig {
    /// Scene name, used in log output
    pub name: String,
    /// Give every new entity an identity `TransformComponent`
    pub auto_transform_component: bool,
}

impl SceneConfig {
    /// Create a configuration for a named scene
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            auto_transform_component: true,
        }
    }

    /// Enable or disable automatic transform components
    pub fn with_auto_transform_component(mut self, enabled: bool) -> Self {
        self.auto_transform_component = enabled;
        self
    }

    /// Validate the configuration
    ///
    /// # Errors
    ///
    /// [`ConfigError::Invalid`] for an empty name.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.name.trim().is_empty() {
            return Err(ConfigError::Invalid("Scene name cannot be empty".to_string()));
        }
        Ok(())
    }
}

impl Default for SceneConfig {
    fn default() -> Self {
        Self::new("Untitled Scene")
    }
}

impl Config for SceneConfig {}

/// # Engine Configuration
///
/// Process-wide settings: logging plus the default scene.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// `env_logger` filter used when `RUST_LOG` is unset
    pub log_level: String,
    /// Configuration of the initial scene
    pub scene: SceneConfig,
}

impl EngineConfig {
    /// Create a new engine configuration
    pub fn new() -> Self {
        Self {
            log_level: "info".to_string(),
            scene: SceneConfig::default(),
        }
    }

    /// Set log level
    pub fn with_log_level(mut self, level: impl Into<String>) -> Self {
        self.log_level = level.into();
        self
    }

    /// Set the scene configuration
    pub fn with_scene(mut self, scene: SceneConfig) -> Self {
        self.scene = scene;
        self
    }

    /// Validate the entire configuration
    ///
    /// # Errors
    ///
    /// [`ConfigError::Invalid`] for an empty log level or an invalid scene.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.log_level.trim().is_empty() {
            return Err(ConfigError::Invalid("Log level cannot be empty".to_string()));
        }
        self.scene.validate()
    }
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl Config for EngineConfig {}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_path(file_name: &str) -> std::path::PathBuf {
        std::env::temp_dir().join(format!("xen_engine_{}_{file_name}", std::process::id()))
    }

    #[test]
    fn test_toml_roundtrip() {
        let path = temp_path("engine.toml");
        let config = EngineConfig::new()
            .with_log_level("debug")
            .with_scene(SceneConfig::new("Level 1").with_auto_transform_component(false));

        config.save_to_file(&path).unwrap();
        let loaded = EngineConfig::load_from_file(&path).unwrap();
        std::fs::remove_file(&path).ok();

        assert_eq!(loaded, config);
    }

    #[test]
    fn test_ron_roundtrip() {
        let path = temp_path("scene.ron");
        let config = SceneConfig::new("Arena");

        config.save_to_file(&path).unwrap();
        let loaded = SceneConfig::load_from_file(&path).unwrap();
        std::fs::remove_file(&path).ok();

        assert_eq!(loaded, config);
    }

    #[test]
    fn test_missing_fields_use_defaults() {
        let config: EngineConfig = toml::from_str("log_level = \"warn\"").unwrap();
        assert_eq!(config.log_level, "warn");
        assert_eq!(config.scene, SceneConfig::default());
    }

    #[test]
    fn test_unsupported_extension() {
        let result = SceneConfig::default().save_to_file(temp_path("scene.json"));
        assert!(matches!(result, Err(ConfigError::UnsupportedFormat(_))));
    }

    #[test]
    fn test_validate_rejects_empty_name() {
        assert!(SceneConfig::new("  ").validate().is_err());
        assert!(EngineConfig::default().validate().is_ok());
    }
}
