//! The finished output of one generate call.

use std::fmt;
use std::io::Cursor;
use std::str::FromStr;

use base64::{engine::general_purpose::STANDARD, Engine};
use image::{DynamicImage, RgbaImage};
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::svg::SvgDocument;

/// Which renderer produces the artifact.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Raster image encoded as PNG.
    #[default]
    #[serde(alias = "raster")]
    Png,
    /// Vector markup.
    #[serde(alias = "vector")]
    Svg,
}

impl OutputFormat {
    pub fn extension(self) -> &'static str {
        match self {
            OutputFormat::Png => "png",
            OutputFormat::Svg => "svg",
        }
    }

    pub fn mime_type(self) -> &'static str {
        match self {
            OutputFormat::Png => "image/png",
            OutputFormat::Svg => "image/svg+xml",
        }
    }
}

impl FromStr for OutputFormat {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "png" | "raster" => Ok(OutputFormat::Png),
            "svg" | "vector" => Ok(OutputFormat::Svg),
            other => Err(Error::InvalidInput(format!(
                "unknown output format '{}' (expected png or svg)",
                other
            ))),
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.extension())
    }
}

/// A rendered QR code, replaced whole on every regeneration.
#[derive(Clone, Debug, PartialEq)]
pub enum Artifact {
    Raster(RgbaImage),
    Vector(SvgDocument),
}

impl Artifact {
    pub fn format(&self) -> OutputFormat {
        match self {
            Artifact::Raster(_) => OutputFormat::Png,
            Artifact::Vector(_) => OutputFormat::Svg,
        }
    }

    pub fn mime_type(&self) -> &'static str {
        self.format().mime_type()
    }

    pub fn extension(&self) -> &'static str {
        self.format().extension()
    }

    /// Edge length in pixels.
    pub fn size(&self) -> u32 {
        match self {
            Artifact::Raster(img) => img.width(),
            Artifact::Vector(doc) => doc.size(),
        }
    }

    /// The artifact as a file body: PNG bytes or UTF-8 markup.
    pub fn to_bytes(&self) -> Result<Vec<u8>> {
        match self {
            Artifact::Raster(img) => {
                let mut bytes = Vec::new();
                DynamicImage::ImageRgba8(img.clone())
                    .write_to(&mut Cursor::new(&mut bytes), image::ImageFormat::Png)
                    .map_err(|e| Error::Export(format!("PNG encoding failed: {}", e)))?;
                Ok(bytes)
            }
            Artifact::Vector(doc) => Ok(doc.to_string().into_bytes()),
        }
    }

    /// `data:<mime>;base64,...` form of [`Artifact::to_bytes`].
    pub fn to_data_url(&self) -> Result<String> {
        let bytes = self.to_bytes()?;
        Ok(format!("data:{};base64,{}", self.mime_type(), STANDARD.encode(bytes)))
    }

    /// Timestamped download name, e.g. `qr-2024-05-01T12-30-00.png`.
    pub fn default_file_name(&self) -> String {
        let stamp = chrono::Utc::now().format("%Y-%m-%dT%H-%M-%S");
        format!("qr-{}.{}", stamp, self.extension())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::RenderConfig;
    use crate::grid::ModuleMatrix;
    use crate::raster::render_raster;
    use crate::svg::render_vector;

    fn grid() -> ModuleMatrix {
        ModuleMatrix::from_fn(21, |row, col| (row * 7 + col) % 3 == 0)
    }

    #[test]
    fn format_parses_aliases() {
        assert_eq!("PNG".parse::<OutputFormat>().unwrap(), OutputFormat::Png);
        assert_eq!("vector".parse::<OutputFormat>().unwrap(), OutputFormat::Svg);
        assert!("gif".parse::<OutputFormat>().is_err());
        let from_json: OutputFormat = serde_json::from_str("\"raster\"").unwrap();
        assert_eq!(from_json, OutputFormat::Png);
    }

    #[test]
    fn raster_bytes_are_png_and_decode_back() {
        let img = render_raster(&grid(), &RenderConfig::default()).unwrap();
        let artifact = Artifact::Raster(img.clone());
        let bytes = artifact.to_bytes().unwrap();
        assert!(bytes.starts_with(&[0x89, b'P', b'N', b'G']));
        let decoded = image::load_from_memory(&bytes).unwrap().to_rgba8();
        assert_eq!(decoded, img);
    }

    #[test]
    fn vector_bytes_are_markup() {
        let doc = render_vector(&grid(), &RenderConfig::default()).unwrap();
        let artifact = Artifact::Vector(doc.clone());
        assert_eq!(artifact.to_bytes().unwrap(), doc.to_string().into_bytes());
        assert_eq!(artifact.mime_type(), "image/svg+xml");
        assert_eq!(artifact.size(), 256);
    }

    #[test]
    fn data_url_carries_mime() {
        let doc = render_vector(&grid(), &RenderConfig::default()).unwrap();
        let url = Artifact::Vector(doc).to_data_url().unwrap();
        assert!(url.starts_with("data:image/svg+xml;base64,"));
    }

    #[test]
    fn file_name_has_prefix_and_extension() {
        let img = RgbaImage::new(1, 1);
        let name = Artifact::Raster(img).default_file_name();
        assert!(name.starts_with("qr-"));
        assert!(name.ends_with(".png"));
        assert!(!name.contains(':'));
    }
}
