//! # qirender
//!
//! A Rust library for turning QR module grids into PNG and SVG images that match pixel for pixel.
//!
//! `qirender` takes the square grid of dark and light modules produced by any QR encoder and lays
//! it out inside a square target of a chosen size. The same geometry drives both the raster and
//! the vector renderer, so a PNG and an SVG of the same code at the same size draw identical
//! rectangles. An optional logo can be placed in the center on a white plate.
//!
//! ## Features
//!
//! - Margin of `max(4, 5%)` and per-edge rounding that leaves no seams between modules.
//! - Raster output as an RGBA buffer, encodable to PNG.
//! - Vector output as a self-contained SVG document.
//! - Center logo overlay (PNG or JPEG) with identical placement in both formats.
//! - Pluggable encoder and logo decoder, with a default encoder backed by the `qrcode` crate.
//! - Export to files or, with the `clipboard` feature, to the system clipboard.
//!
//! ## Example
//!
//! Render a code as SVG with custom colors:
//!
//! ```rust
//! use qirender::{Generator, GenerateRequest, OutputFormat, RenderConfig};
//!
//! let config = RenderConfig {
//!     size: 300,
//!     foreground: "#1e3a8a".parse().unwrap(),
//!     background: "#fff".parse().unwrap(),
//!     format: OutputFormat::Svg,
//!     ..Default::default()
//! };
//! let generator: Generator = Generator::default();
//! let out = generator
//!     .generate(&GenerateRequest::new("https://example.com", config))
//!     .unwrap();
//! let svg = String::from_utf8(out.artifact.to_bytes().unwrap()).unwrap();
//! assert!(svg.contains("viewBox=\"0 0 300 300\""));
//! ```
//!
//! Render an existing grid directly:
//!
//! ```rust
//! use qirender::{render_raster, ModuleMatrix, RenderConfig};
//!
//! let grid = ModuleMatrix::from_fn(21, |row, col| (row + col) % 2 == 0);
//! let img = render_raster(&grid, &RenderConfig::default()).unwrap();
//! assert_eq!(img.dimensions(), (256, 256));
//! ```
//!
//! ## Modules
//!
//! - [`geometry`]: Margin, pitch and per-module rectangles.
//! - [`raster`] and [`svg`]: The two renderers.
//! - [`logo`]: Logo decoding and overlay.
//! - [`generator`]: The encode, render, overlay and commit pipeline.
//! - [`export`]: File and clipboard export.

pub mod artifact;
pub mod color;
pub mod config;
pub mod error;
pub mod export;
pub mod generator;
pub mod geometry;
pub mod grid;
pub mod logo;
pub mod raster;
pub mod svg;

pub use artifact::{Artifact, OutputFormat};
pub use color::Color;
pub use config::RenderConfig;
pub use error::{Error, Result};
pub use export::{ExportOutcome, Exporter, FileExporter};
#[cfg(feature = "clipboard")]
pub use export::ClipboardExporter;
pub use generator::{ArtifactSlot, GenerateRequest, Generated, Generator};
pub use geometry::{plan, GeometryPlan, ModuleRect};
pub use grid::{EcLevel, ModuleGrid, ModuleMatrix, QrEncoder, QrcodeEncoder};
pub use logo::{overlay_logo_raster, overlay_logo_vector, ImageLogoDecoder, LogoDecoder, LogoImage, LogoPlacement};
pub use raster::render_raster;
pub use svg::{render_vector, SvgDocument, SvgElement};
