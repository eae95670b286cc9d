//! Handing finished artifacts to the outside world.

use std::fs;
use std::path::PathBuf;

use crate::artifact::Artifact;
use crate::error::{Error, Result};

/// Where an export ended up.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ExportOutcome {
    /// Written to a file.
    Saved(PathBuf),
    /// Placed on the clipboard in the artifact's own format.
    Copied,
    /// Placed on the clipboard as a `data:` URL because the native format was refused.
    CopiedAsDataUrl,
}

/// Consumes a finished artifact. Failures are reported as [`Error::Export`].
pub trait Exporter {
    fn export(&self, artifact: &Artifact) -> Result<ExportOutcome>;
}

/// Saves artifacts into a directory, creating it if needed.
#[derive(Clone, Debug)]
pub struct FileExporter {
    directory: PathBuf,
    file_name: Option<String>,
}

impl Default for FileExporter {
    fn default() -> Self {
        Self::new("generated")
    }
}

impl FileExporter {
    pub fn new(directory: impl Into<PathBuf>) -> Self {
        Self {
            directory: directory.into(),
            file_name: None,
        }
    }

    /// Uses a fixed file stem instead of a timestamp. The extension follows the artifact.
    pub fn with_file_name(mut self, stem: impl Into<String>) -> Self {
        self.file_name = Some(stem.into());
        self
    }

    fn target_path(&self, artifact: &Artifact) -> PathBuf {
        let name = match &self.file_name {
            Some(stem) => format!("{}.{}", stem, artifact.extension()),
            None => artifact.default_file_name(),
        };
        self.directory.join(name)
    }
}

impl Exporter for FileExporter {
    fn export(&self, artifact: &Artifact) -> Result<ExportOutcome> {
        if !self.directory.exists() {
            fs::create_dir_all(&self.directory).map_err(|e| {
                Error::Export(format!("cannot create {}: {}", self.directory.display(), e))
            })?;
        }
        let path = self.target_path(artifact);
        let bytes = artifact.to_bytes()?;
        fs::write(&path, bytes)
            .map_err(|e| Error::Export(format!("cannot write {}: {}", path.display(), e)))?;
        log::info!("saved {} to {}", artifact.mime_type(), path.display());
        Ok(ExportOutcome::Saved(path))
    }
}

/// Copies artifacts to the system clipboard.
///
/// Raster artifacts go on as an image. If the clipboard refuses images, the PNG
/// is copied as a data URL instead. Vector artifacts are copied as markup text.
#[cfg(feature = "clipboard")]
#[derive(Clone, Copy, Debug, Default)]
pub struct ClipboardExporter;

#[cfg(feature = "clipboard")]
impl Exporter for ClipboardExporter {
    fn export(&self, artifact: &Artifact) -> Result<ExportOutcome> {
        let mut clipboard = arboard::Clipboard::new()
            .map_err(|e| Error::Export(format!("failed to access clipboard: {}", e)))?;
        match artifact {
            Artifact::Raster(img) => {
                let image_data = arboard::ImageData {
                    width: img.width() as usize,
                    height: img.height() as usize,
                    bytes: std::borrow::Cow::Borrowed(img.as_raw()),
                };
                match clipboard.set_image(image_data) {
                    Ok(()) => {
                        log::info!("PNG copied to clipboard ({}x{})", img.width(), img.height());
                        Ok(ExportOutcome::Copied)
                    }
                    Err(e) => {
                        log::warn!("clipboard refused image ({}), copying data URL", e);
                        clipboard
                            .set_text(artifact.to_data_url()?)
                            .map_err(|e| Error::Export(format!("failed to copy data URL: {}", e)))?;
                        Ok(ExportOutcome::CopiedAsDataUrl)
                    }
                }
            }
            Artifact::Vector(doc) => {
                clipboard
                    .set_text(doc.to_string())
                    .map_err(|e| Error::Export(format!("failed to copy SVG: {}", e)))?;
                log::info!("SVG copied to clipboard");
                Ok(ExportOutcome::Copied)
            }
        }
    }
}
