//! Center logo overlay for both output formats.
//!
//! The overlay is sized from the target size alone, so a PNG and an SVG of the
//! same size place the plate and the logo identically. The plate is always
//! white so the logo stays readable whatever the module colors are.

use base64::{engine::general_purpose::STANDARD, Engine};
use image::imageops::{self, FilterType};
use image::{DynamicImage, ImageFormat, RgbaImage};

use crate::color::Color;
use crate::error::{Error, Result};
use crate::geometry::ModuleRect;
use crate::raster::fill_rect;
use crate::svg::{SvgDocument, SvgElement};

/// Largest accepted logo file.
pub const MAX_LOGO_BYTES: usize = 2 * 1024 * 1024;

/// Plate color behind the logo.
pub const PLATE_COLOR: Color = Color::WHITE;

/// A logo that has been checked and decoded.
///
/// The original bytes are kept so the vector overlay can embed them unchanged.
#[derive(Clone, Debug)]
pub struct LogoImage {
    bytes: Vec<u8>,
    format: ImageFormat,
    bitmap: DynamicImage,
}

impl LogoImage {
    pub fn format(&self) -> ImageFormat {
        self.format
    }

    pub fn bitmap(&self) -> &DynamicImage {
        &self.bitmap
    }

    /// `data:image/png;base64,...` for embedding in markup.
    pub fn data_url(&self) -> String {
        format!("data:{};base64,{}", self.format.to_mime_type(), STANDARD.encode(&self.bytes))
    }
}

/// Decodes logo files. Implementations report every failure as [`Error::LogoDecode`].
pub trait LogoDecoder {
    fn decode(&self, bytes: &[u8]) -> Result<LogoImage>;
}

/// [`LogoDecoder`] using the `image` crate. Accepts PNG and JPEG up to [`MAX_LOGO_BYTES`].
#[derive(Clone, Copy, Debug, Default)]
pub struct ImageLogoDecoder;

impl LogoDecoder for ImageLogoDecoder {
    fn decode(&self, bytes: &[u8]) -> Result<LogoImage> {
        if bytes.is_empty() {
            return Err(Error::LogoDecode("logo file is empty".into()));
        }
        if bytes.len() > MAX_LOGO_BYTES {
            return Err(Error::LogoDecode(format!(
                "logo is {} bytes, limit is {}",
                bytes.len(),
                MAX_LOGO_BYTES
            )));
        }
        let format = image::guess_format(bytes)
            .map_err(|e| Error::LogoDecode(format!("unrecognized image data: {}", e)))?;
        if !matches!(format, ImageFormat::Png | ImageFormat::Jpeg) {
            return Err(Error::LogoDecode(format!(
                "{} logos are not supported, use PNG or JPEG",
                format.to_mime_type()
            )));
        }
        let bitmap = image::load_from_memory_with_format(bytes, format)
            .map_err(|e| Error::LogoDecode(e.to_string()))?;
        log::debug!(
            "decoded {} logo, {}x{}",
            format.to_mime_type(),
            bitmap.width(),
            bitmap.height()
        );
        Ok(LogoImage {
            bytes: bytes.to_vec(),
            format,
            bitmap,
        })
    }
}

/// Where the plate and logo go in a square target.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct LogoPlacement {
    /// Edge length of the logo, `floor(size * 0.2)`.
    pub logo_size: u32,
    /// Plate border around the logo, `floor(logo_size * 0.1)`.
    pub padding: u32,
    /// Top-left of the logo on both axes. Half-integral when `size - logo_size` is odd.
    pub origin: f64,
}

impl LogoPlacement {
    pub fn for_target(target_size: u32) -> Self {
        let logo_size = target_size / 5;
        let padding = logo_size / 10;
        Self {
            logo_size,
            padding,
            origin: f64::from(target_size - logo_size) / 2.0,
        }
    }

    pub fn plate_origin(&self) -> f64 {
        self.origin - f64::from(self.padding)
    }

    pub fn plate_size(&self) -> u32 {
        self.logo_size + 2 * self.padding
    }

    /// Logo origin snapped down to the pixel grid.
    fn pixel_origin(&self) -> u32 {
        self.origin.floor() as u32
    }
}

/// Paints the white plate and the scaled logo over the center of `img`.
pub fn overlay_logo_raster(img: &mut RgbaImage, logo: &LogoImage, target_size: u32) {
    let place = LogoPlacement::for_target(target_size);
    if place.logo_size == 0 {
        log::debug!("target {}px too small for a logo, skipping overlay", target_size);
        return;
    }
    let origin = place.pixel_origin();
    let plate = ModuleRect {
        x: origin - place.padding,
        y: origin - place.padding,
        width: place.plate_size(),
        height: place.plate_size(),
    };
    fill_rect(img, plate, PLATE_COLOR.to_rgba());

    let scaled = imageops::resize(
        &logo.bitmap.to_rgba8(),
        place.logo_size,
        place.logo_size,
        FilterType::Triangle,
    );
    imageops::overlay(img, &scaled, i64::from(origin), i64::from(origin));
}

/// Appends the white plate and an embedded logo image to `doc`, on top of all modules.
pub fn overlay_logo_vector(doc: &mut SvgDocument, logo: &LogoImage, target_size: u32) {
    let place = LogoPlacement::for_target(target_size);
    if place.logo_size == 0 {
        log::debug!("target {}px too small for a logo, skipping overlay", target_size);
        return;
    }
    let plate = f64::from(place.plate_size());
    doc.push(SvgElement::Rect {
        x: place.plate_origin(),
        y: place.plate_origin(),
        width: plate,
        height: plate,
        fill: PLATE_COLOR,
    });
    let size = f64::from(place.logo_size);
    doc.push(SvgElement::Image {
        href: logo.data_url(),
        x: place.origin,
        y: place.origin,
        width: size,
        height: size,
    });
}
