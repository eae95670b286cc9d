//! The generate pipeline: encode, render, overlay, commit.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};

use crate::artifact::{Artifact, OutputFormat};
use crate::config::RenderConfig;
use crate::error::Result;
use crate::grid::{ModuleMatrix, QrEncoder, QrcodeEncoder};
use crate::logo::{overlay_logo_raster, overlay_logo_vector, ImageLogoDecoder, LogoDecoder};
use crate::raster::render_raster;
use crate::svg::render_vector;

/// Input for one generate call.
#[derive(Clone, Debug, Default)]
pub struct GenerateRequest {
    pub text: String,
    pub config: RenderConfig,
    /// Raw logo file contents, if a logo should be overlaid.
    pub logo: Option<Vec<u8>>,
}

impl GenerateRequest {
    pub fn new(text: impl Into<String>, config: RenderConfig) -> Self {
        Self {
            text: text.into(),
            config,
            logo: None,
        }
    }

    pub fn with_logo(mut self, bytes: Vec<u8>) -> Self {
        self.logo = Some(bytes);
        self
    }
}

/// Result of a successful generate call.
#[derive(Clone, Debug)]
pub struct Generated {
    pub artifact: Arc<Artifact>,
    /// Non-fatal problems, such as a logo that failed to load.
    pub warnings: Vec<String>,
    pub generation: u64,
    /// False when a newer generation started before this one finished, so the artifact was not stored.
    pub committed: bool,
}

/// Holds the current artifact. Each render takes a ticket before it starts and
/// may only commit if no newer ticket has been handed out in the meantime.
#[derive(Debug, Default)]
pub struct ArtifactSlot {
    next: AtomicU64,
    current: Mutex<Option<(u64, Arc<Artifact>)>>,
}

impl ArtifactSlot {
    pub fn new() -> Self {
        Self::default()
    }

    /// Hands out the next generation number. Numbers start at 1 and only increase.
    pub fn begin(&self) -> u64 {
        self.next.fetch_add(1, Ordering::SeqCst) + 1
    }

    /// Stores `artifact` only if `generation` is still the latest one handed out.
    pub fn commit(&self, generation: u64, artifact: Arc<Artifact>) -> bool {
        let mut current = self.current.lock().unwrap_or_else(|e| e.into_inner());
        if generation < self.latest_generation() {
            return false;
        }
        if matches!(current.as_ref(), Some((stored, _)) if *stored > generation) {
            return false;
        }
        *current = Some((generation, artifact));
        true
    }

    /// The latest committed artifact and its generation.
    pub fn current(&self) -> Option<(u64, Arc<Artifact>)> {
        self.current
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .clone()
    }

    /// The generation most recently handed out by [`ArtifactSlot::begin`].
    pub fn latest_generation(&self) -> u64 {
        self.next.load(Ordering::SeqCst)
    }
}

/// Runs generate calls against an injected encoder and logo decoder.
///
/// ```rust
/// use qirender::{Generator, GenerateRequest, RenderConfig, OutputFormat};
///
/// let generator: Generator = Generator::default();
/// let config = RenderConfig { size: 200, format: OutputFormat::Svg, ..Default::default() };
/// let out = generator.generate(&GenerateRequest::new("https://example.com", config)).unwrap();
/// assert!(out.committed);
/// assert_eq!(out.artifact.size(), 200);
/// ```
#[derive(Debug)]
pub struct Generator<E = QrcodeEncoder, D = ImageLogoDecoder> {
    encoder: E,
    decoder: D,
    slot: ArtifactSlot,
}

impl Default for Generator {
    fn default() -> Self {
        Self::new(QrcodeEncoder, ImageLogoDecoder)
    }
}

impl<E: QrEncoder, D: LogoDecoder> Generator<E, D> {
    pub fn new(encoder: E, decoder: D) -> Self {
        Self {
            encoder,
            decoder,
            slot: ArtifactSlot::new(),
        }
    }

    pub fn slot(&self) -> &ArtifactSlot {
        &self.slot
    }

    /// Encodes `text` without rendering, for previews.
    pub fn encode(&self, request: &GenerateRequest) -> Result<ModuleMatrix> {
        self.encoder.encode(&request.text, request.config.ec_level)
    }

    /// Produces an artifact for `request` and commits it to the slot.
    ///
    /// Invalid geometry and encoder failures abort the call. A logo that cannot
    /// be loaded is reported in [`Generated::warnings`] and the artifact is
    /// returned without it.
    pub fn generate(&self, request: &GenerateRequest) -> Result<Generated> {
        let generation = self.slot.begin();
        let config = &request.config;
        config.validate()?;

        let grid = self.encode(request)?;
        let mut artifact = match config.format {
            OutputFormat::Png => Artifact::Raster(render_raster(&grid, config)?),
            OutputFormat::Svg => Artifact::Vector(render_vector(&grid, config)?),
        };

        let mut warnings = Vec::new();
        if let Some(bytes) = &request.logo {
            match self.decoder.decode(bytes) {
                Ok(logo) => match &mut artifact {
                    Artifact::Raster(img) => overlay_logo_raster(img, &logo, config.size),
                    Artifact::Vector(doc) => overlay_logo_vector(doc, &logo, config.size),
                },
                Err(e) => {
                    log::warn!("Failed to embed logo: {}", e);
                    warnings.push(e.to_string());
                }
            }
        }

        let artifact = Arc::new(artifact);
        let committed = self.slot.commit(generation, Arc::clone(&artifact));
        if committed {
            log::info!(
                "generation {}: {} {}x{} ready",
                generation,
                config.format,
                config.size,
                config.size
            );
        } else {
            log::warn!("generation {} finished after a newer one started, discarding", generation);
        }
        Ok(Generated {
            artifact,
            warnings,
            generation,
            committed,
        })
    }
}
