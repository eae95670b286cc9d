//! Render configuration supplied by the caller.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::artifact::OutputFormat;
use crate::color::Color;
use crate::error::{Error, Result};
use crate::grid::EcLevel;

/// Default output edge length in pixels.
pub const DEFAULT_SIZE: u32 = 256;

/// Everything needed to turn a module grid into an artifact.
///
/// Missing fields take their [`Default`] values when deserialized, so a JSON
/// config file only needs to mention what it changes:
///
/// ```rust
/// use qirender::{Color, RenderConfig};
///
/// let config: RenderConfig = serde_json::from_str(r##"{ "size": 512, "foreground": "#036" }"##).unwrap();
/// assert_eq!(config.size, 512);
/// assert_eq!(config.foreground, Color::rgb(0x00, 0x33, 0x66));
/// assert_eq!(config.background, Color::WHITE);
/// ```
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderConfig {
    /// Edge length of the square output, in pixels (or SVG user units).
    pub size: u32,
    pub foreground: Color,
    pub background: Color,
    pub ec_level: EcLevel,
    pub format: OutputFormat,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            size: DEFAULT_SIZE,
            foreground: Color::BLACK,
            background: Color::WHITE,
            ec_level: EcLevel::default(),
            format: OutputFormat::default(),
        }
    }
}

impl RenderConfig {
    pub fn validate(&self) -> Result<()> {
        if self.size == 0 {
            return Err(Error::InvalidInput("size must be a positive number of pixels".into()));
        }
        Ok(())
    }

    /// Loads a (possibly partial) configuration from a JSON file.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)
            .map_err(|e| Error::Config(format!("{}: {}", path.display(), e)))?;
        let config: RenderConfig = serde_json::from_str(&text)
            .map_err(|e| Error::Config(format!("{}: {}", path.display(), e)))?;
        log::debug!("loaded render config from {}", path.display());
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn default_is_black_on_white_png() {
        let config = RenderConfig::default();
        assert_eq!(config.size, 256);
        assert_eq!(config.foreground.to_string(), "#000000");
        assert_eq!(config.background.to_string(), "#ffffff");
        assert_eq!(config.ec_level, EcLevel::M);
        assert_eq!(config.format, OutputFormat::Png);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn zero_size_is_invalid() {
        let config = RenderConfig {
            size: 0,
            ..Default::default()
        };
        assert!(matches!(config.validate(), Err(Error::InvalidInput(_))));
    }

    #[test]
    fn loads_partial_json_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r##"{{ "format": "svg", "ec_level": "H", "background": "#ffeeDD" }}"##).unwrap();
        let config = RenderConfig::from_json_file(file.path()).unwrap();
        assert_eq!(config.format, OutputFormat::Svg);
        assert_eq!(config.ec_level, EcLevel::H);
        assert_eq!(config.background, Color::rgb(0xff, 0xee, 0xdd));
        assert_eq!(config.size, DEFAULT_SIZE);
    }

    #[test]
    fn bad_json_is_config_error() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{ "foreground": "red" }}"#).unwrap();
        let err = RenderConfig::from_json_file(file.path()).unwrap_err();
        assert!(matches!(err, Error::Config(_)));

        let missing = RenderConfig::from_json_file("/definitely/not/here.json").unwrap_err();
        assert!(matches!(missing, Error::Config(_)));
    }
}
