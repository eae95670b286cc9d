//! Pixel geometry shared by the raster and vector renderers.
//!
//! Both output formats draw exactly the rectangles produced here. Every edge
//! coordinate is rounded on its own from the continuous pitch function, so the
//! left edge of a module and the right edge of its neighbour come from the same
//! value and no background shows between dark modules.

use crate::error::{Error, Result};
use crate::grid::ModuleGrid;

/// Minimum border in pixels around the module area.
pub const MIN_MARGIN: u32 = 4;

/// Fraction of the target size reserved as border on each side.
pub const MARGIN_RATIO: f64 = 0.05;

/// Integer pixel rectangle covering one module.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct ModuleRect {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

impl ModuleRect {
    pub fn right(&self) -> u32 {
        self.x + self.width
    }

    pub fn bottom(&self) -> u32 {
        self.y + self.height
    }
}

/// Layout of a module grid inside a square target.
#[derive(Clone, Debug, PartialEq)]
pub struct GeometryPlan {
    module_count: usize,
    target_size: u32,
    margin: u32,
    pitch: f64,
}

/// Computes the layout for `module_count` modules per side in a `target_size` square.
///
/// Fails with [`Error::InvalidInput`] when either argument is zero, or when the
/// margins leave no room for modules.
pub fn plan(module_count: usize, target_size: u32) -> Result<GeometryPlan> {
    if module_count == 0 {
        return Err(Error::InvalidInput("module count must be positive".into()));
    }
    if target_size == 0 {
        return Err(Error::InvalidInput("target size must be positive".into()));
    }
    let margin = margin_for(target_size);
    if margin * 2 >= target_size {
        return Err(Error::InvalidInput(format!(
            "target size {}px leaves no drawable area inside a {}px margin",
            target_size, margin
        )));
    }
    let pitch = f64::from(target_size - 2 * margin) / module_count as f64;
    log::debug!(
        "plan: {} modules in {}px, margin {}px, pitch {:.4}px",
        module_count,
        target_size,
        margin,
        pitch
    );
    Ok(GeometryPlan {
        module_count,
        target_size,
        margin,
        pitch,
    })
}

/// `max(4, floor(size * 0.05))`
pub fn margin_for(target_size: u32) -> u32 {
    let scaled = (f64::from(target_size) * MARGIN_RATIO).floor() as u32;
    scaled.max(MIN_MARGIN)
}

impl GeometryPlan {
    pub fn module_count(&self) -> usize {
        self.module_count
    }

    pub fn target_size(&self) -> u32 {
        self.target_size
    }

    pub fn margin(&self) -> u32 {
        self.margin
    }

    /// Unrounded module edge length.
    pub fn pitch(&self) -> f64 {
        self.pitch
    }

    /// Continuous position of module boundary `index` along either axis,
    /// `margin + index * pitch`.
    fn edge(&self, index: usize) -> f64 {
        f64::from(self.margin) + index as f64 * self.pitch
    }

    /// Rectangle for the module at `(row, col)`, whether dark or not.
    pub fn rect_for(&self, row: usize, col: usize) -> ModuleRect {
        let x = self.edge(col).round() as u32;
        let y = self.edge(row).round() as u32;
        let right = self.edge(col + 1).ceil() as u32;
        let bottom = self.edge(row + 1).ceil() as u32;
        ModuleRect {
            x,
            y,
            width: right.saturating_sub(x),
            height: bottom.saturating_sub(y),
        }
    }

    /// Rectangles of every dark module in row-major order.
    ///
    /// The grid must have the module count this plan was made for.
    pub fn dark_rects<'a, G>(&'a self, grid: &'a G) -> impl Iterator<Item = ModuleRect> + 'a
    where
        G: ModuleGrid + ?Sized,
    {
        let n = self.module_count;
        (0..n)
            .flat_map(move |row| (0..n).map(move |col| (row, col)))
            .filter(move |&(row, col)| grid.is_dark(row, col))
            .map(move |(row, col)| self.rect_for(row, col))
    }
}

/// Plans for `grid` itself, so renderers cannot pair a grid with the wrong plan.
pub fn plan_for_grid<G: ModuleGrid + ?Sized>(grid: &G, target_size: u32) -> Result<GeometryPlan> {
    plan(grid.module_count(), target_size)
}
