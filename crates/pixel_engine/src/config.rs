//! Configuration system

pub use serde::{Deserialize, Serialize};

/// Configuration trait
///
/// Blanket file loading/saving for any serializable config type. The
/// format is picked from the file extension (TOML or RON).
pub trait Config: Serialize + for<'de> Deserialize<'de> + Default {
    /// Load configuration from file
    fn load_from_file(path: &str) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path).map_err(ConfigError::Io)?;

        if path.ends_with(".toml") {
            toml::from_str(&contents).map_err(|e| ConfigError::Parse(e.to_string()))
        } else if path.ends_with(".ron") {
            ron::from_str(&contents).map_err(|e| ConfigError::Parse(e.to_string()))
        } else {
            Err(ConfigError::UnsupportedFormat(path.to_string()))
        }
    }

    /// Save configuration to file
    fn save_to_file(&self, path: &str) -> Result<(), ConfigError> {
        let contents = if path.ends_with(".toml") {
            toml::to_string_pretty(self).map_err(|e| ConfigError::Serialize(e.to_string()))?
        } else if path.ends_with(".ron") {
            ron::ser::to_string_pretty(self, Default::default())
                .map_err(|e| ConfigError::Serialize(e.to_string()))?
        } else {
            return Err(ConfigError::UnsupportedFormat(path.to_string()));
        };

        std::fs::write(path, contents).map_err(ConfigError::Io)
    }
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
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::EngineConfig;

    #[test]
    fn test_engine_config_toml_round_trip() {
        let config = EngineConfig::default();
        let text = toml::to_string_pretty(&config).unwrap();
        let parsed: EngineConfig = toml::from_str(&text).unwrap();
        assert_eq!(parsed.window.width, config.window.width);
        assert_eq!(parsed.backbuffer.height, config.backbuffer.height);
        assert_eq!(parsed.gamepads, config.gamepads);
    }

    #[test]
    fn test_unsupported_extension_is_rejected() {
        let result = EngineConfig::load_from_file("engine.yaml");
        assert!(matches!(result, Err(ConfigError::UnsupportedFormat(_))));
    }

    #[test]
    fn test_missing_file_is_an_io_error() {
        let result = EngineConfig::load_from_file("/nonexistent/engine.toml");
        assert!(matches!(result, Err(ConfigError::Io(_))));
    }
}
