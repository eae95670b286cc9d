//! Vector output.
//!
//! The document is kept as a list of elements until it is serialized so that a
//! logo overlay can append to it after the modules are laid out.

use std::fmt;

use crate::color::Color;
use crate::config::RenderConfig;
use crate::error::Result;
use crate::geometry::{plan_for_grid, ModuleRect};
use crate::grid::ModuleGrid;

/// One drawable element. Paint order is document order.
#[derive(Clone, Debug, PartialEq)]
pub enum SvgElement {
    /// Full-canvas rectangle.
    Background { fill: Color },
    /// Filled axis-aligned rectangle. Coordinates are `f64` because an overlay
    /// centered in an odd-sized canvas sits on half pixels.
    Rect {
        x: f64,
        y: f64,
        width: f64,
        height: f64,
        fill: Color,
    },
    /// Embedded image referenced by `href`, usually a data URI. It is stretched
    /// to fill its box, as the raster overlay does.
    Image {
        href: String,
        x: f64,
        y: f64,
        width: f64,
        height: f64,
    },
}

impl SvgElement {
    pub fn module(rect: ModuleRect, fill: Color) -> Self {
        SvgElement::Rect {
            x: f64::from(rect.x),
            y: f64::from(rect.y),
            width: f64::from(rect.width),
            height: f64::from(rect.height),
            fill,
        }
    }
}

/// A square SVG document with a `0 0 size size` viewBox.
#[derive(Clone, Debug, PartialEq)]
pub struct SvgDocument {
    size: u32,
    elements: Vec<SvgElement>,
}

impl SvgDocument {
    pub fn new(size: u32) -> Self {
        Self {
            size,
            elements: Vec::new(),
        }
    }

    pub fn size(&self) -> u32 {
        self.size
    }

    pub fn elements(&self) -> &[SvgElement] {
        &self.elements
    }

    /// Appends an element on top of everything already in the document.
    pub fn push(&mut self, element: SvgElement) {
        self.elements.push(element);
    }
}

impl fmt::Display for SvgDocument {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "<svg xmlns=\"http://www.w3.org/2000/svg\" width=\"{0}\" height=\"{0}\" viewBox=\"0 0 {0} {0}\" role=\"img\" aria-label=\"Generated QR code\">",
            self.size
        )?;
        for element in &self.elements {
            match element {
                SvgElement::Background { fill } => {
                    writeln!(f, "\t<rect width=\"100%\" height=\"100%\" fill=\"{}\"/>", fill)?
                }
                SvgElement::Rect { x, y, width, height, fill } => writeln!(
                    f,
                    "\t<rect x=\"{}\" y=\"{}\" width=\"{}\" height=\"{}\" fill=\"{}\"/>",
                    x, y, width, height, fill
                )?,
                SvgElement::Image { href, x, y, width, height } => writeln!(
                    f,
                    "\t<image href=\"{}\" x=\"{}\" y=\"{}\" width=\"{}\" height=\"{}\" preserveAspectRatio=\"none\"/>",
                    escape_attr(href),
                    x,
                    y,
                    width,
                    height
                )?,
            }
        }
        writeln!(f, "</svg>")
    }
}

fn escape_attr(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            _ => out.push(c),
        }
    }
    out
}

/// Lays out `grid` as a vector document: one background rectangle, then one
/// rectangle per dark module at the planner's pixel coordinates.
pub fn render_vector<G>(grid: &G, config: &RenderConfig) -> Result<SvgDocument>
where
    G: ModuleGrid + ?Sized,
{
    config.validate()?;
    let plan = plan_for_grid(grid, config.size)?;
    let mut doc = SvgDocument::new(config.size);
    doc.push(SvgElement::Background {
        fill: config.background,
    });
    for rect in plan.dark_rects(grid) {
        doc.push(SvgElement::module(rect, config.foreground));
    }
    log::debug!(
        "vector: {} elements in {}x{} document",
        doc.elements.len(),
        config.size,
        config.size
    );
    Ok(doc)
}
