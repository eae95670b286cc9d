//! Raster output.

use image::{Rgba, RgbaImage};

use crate::config::RenderConfig;
use crate::error::Result;
use crate::geometry::{plan_for_grid, ModuleRect};
use crate::grid::ModuleGrid;

/// Paints `grid` onto a `size × size` RGBA buffer: background first, then every
/// dark module as a solid block. No anti-aliasing.
pub fn render_raster<G>(grid: &G, config: &RenderConfig) -> Result<RgbaImage>
where
    G: ModuleGrid + ?Sized,
{
    config.validate()?;
    let plan = plan_for_grid(grid, config.size)?;
    let mut img = RgbaImage::from_pixel(config.size, config.size, config.background.to_rgba());
    let paint = config.foreground.to_rgba();
    let mut painted = 0usize;
    for rect in plan.dark_rects(grid) {
        fill_rect(&mut img, rect, paint);
        painted += 1;
    }
    log::debug!("raster: painted {} modules on {}x{}", painted, config.size, config.size);
    Ok(img)
}

/// Fills `rect` with `color`, clipped to the image bounds.
pub(crate) fn fill_rect(img: &mut RgbaImage, rect: ModuleRect, color: Rgba<u8>) {
    let x_end = rect.right().min(img.width());
    let y_end = rect.bottom().min(img.height());
    for y in rect.y.min(y_end)..y_end {
        for x in rect.x.min(x_end)..x_end {
            img.put_pixel(x, y, color);
        }
    }
}
