//! Configuration system
//!
//! Session and window settings can be kept in `.toml` or `.ron` files and
//! loaded through the [`Config`] trait.

use std::path::Path;

pub use serde::{Deserialize, Serialize};

mod options;

pub use options::{MonitorSelection, SessionConfig, WindowOptions};

/// Configuration trait
pub trait Config: Serialize + for<'de> Deserialize<'de> + Default {
    /// Load configuration from file, picking the format by extension
    fn load_from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let format = Format::of(path)?;
        let contents = std::fs::read_to_string(path)?;
        format.parse(&contents)
    }

    /// Save configuration to file, picking the format by extension
    fn save_to_file(&self, path: impl AsRef<Path>) -> Result<(), ConfigError> {
        let path = path.as_ref();
        let contents = Format::of(path)?.render(self)?;
        std::fs::write(path, contents)?;
        Ok(())
    }
}

/// Supported file formats
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    /// `.toml`
    Toml,
    /// `.ron`
    Ron,
}

impl Format {
    /// The format implied by the file extension
    pub fn of(path: &Path) -> Result<Self, ConfigError> {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some("toml") => Ok(Self::Toml),
            Some("ron") => Ok(Self::Ron),
            _ => Err(ConfigError::UnsupportedFormat(path.display().to_string())),
        }
    }

    /// Deserialize `contents`
    pub fn parse<T: for<'de> Deserialize<'de>>(self, contents: &str) -> Result<T, ConfigError> {
        match self {
            Self::Toml => toml::from_str(contents).map_err(|e| ConfigError::Parse(e.to_string())),
            Self::Ron => ron::from_str(contents).map_err(|e| ConfigError::Parse(e.to_string())),
        }
    }

    /// Serialize `value` in a readable layout
    pub fn render<T: Serialize>(self, value: &T) -> Result<String, ConfigError> {
        match self {
            Self::Toml => toml::to_string_pretty(value).map_err(|e| ConfigError::Serialize(e.to_string())),
            Self::Ron => ron::ser::to_string_pretty(value, ron::ser::PrettyConfig::default())
                .map_err(|e| ConfigError::Serialize(e.to_string())),
        }
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

    fn scratch(name: &str) -> std::path::PathBuf {
        std::env::temp_dir().join(format!("quickwindow-{}-{name}", std::process::id()))
    }

    #[test]
    fn test_format_by_extension() {
        assert_eq!(Format::of(Path::new("a/session.toml")).unwrap(), Format::Toml);
        assert_eq!(Format::of(Path::new("session.ron")).unwrap(), Format::Ron);
        assert!(matches!(
            Format::of(Path::new("session.json")),
            Err(ConfigError::UnsupportedFormat(_))
        ));
        assert!(Format::of(Path::new("session")).is_err());
    }

    #[test]
    fn test_save_and_load_toml() {
        let path = scratch("save.toml");
        let mut config = SessionConfig::default();
        config.title = "saved".to_string();
        config.frame_limit = Some(30.0);
        config.options.samples = Some(4);

        config.save_to_file(&path).unwrap();
        let loaded = SessionConfig::load_from_file(&path).unwrap();
        std::fs::remove_file(&path).unwrap();
        assert_eq!(loaded, config);
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let error = SessionConfig::load_from_file(scratch("missing.ron")).unwrap_err();
        assert!(matches!(error, ConfigError::Io(_)));
    }

    #[test]
    fn test_malformed_file_is_parse_error() {
        let error = Format::Toml.parse::<SessionConfig>("width = \"wide\"").unwrap_err();
        assert!(matches!(error, ConfigError::Parse(_)));
    }
}
