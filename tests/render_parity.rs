use image::{Rgba, RgbaImage};
use qirender::{
    overlay_logo_raster, overlay_logo_vector, plan, render_raster, render_vector, Color, EcLevel,
    ImageLogoDecoder, LogoDecoder, ModuleGrid, ModuleMatrix, ModuleRect, QrEncoder, QrcodeEncoder, RenderConfig,
};

/// Pulls `x y width height` out of every `<rect x=...>` line.
fn svg_module_rects(svg: &str) -> Vec<ModuleRect> {
    svg.lines()
        .map(str::trim)
        .filter(|line| line.starts_with("<rect x="))
        .map(|line| {
            let attr = |name: &str| -> u32 {
                let key = format!(" {}=\"", name);
                let start = line.find(&key).unwrap() + key.len();
                let end = start + line[start..].find('"').unwrap();
                line[start..end].parse().unwrap()
            };
            ModuleRect {
                x: attr("x"),
                y: attr("y"),
                width: attr("width"),
                height: attr("height"),
            }
        })
        .collect()
}

fn paint(size: u32, rects: &[ModuleRect], bg: Color, fg: Color) -> RgbaImage {
    let mut img = RgbaImage::from_pixel(size, size, bg.to_rgba());
    for r in rects {
        for y in r.y..r.bottom() {
            for x in r.x..r.right() {
                img.put_pixel(x, y, fg.to_rgba());
            }
        }
    }
    img
}

#[test]
fn raster_and_vector_draw_the_same_modules() {
    let grid = QrcodeEncoder
        .encode("https://example.com/parity", EcLevel::Q)
        .unwrap();
    for size in [128, 200, 257, 512, 1024] {
        let config = RenderConfig {
            size,
            foreground: "#224466".parse().unwrap(),
            background: "#fafafa".parse().unwrap(),
            ..Default::default()
        };
        let raster = render_raster(&grid, &config).unwrap();
        let svg = render_vector(&grid, &config).unwrap().to_string();

        let rects = svg_module_rects(&svg);
        let p = plan(grid.module_count(), size).unwrap();
        let planned: Vec<_> = p.dark_rects(&grid).collect();
        assert_eq!(rects, planned, "size {size}");

        let repainted = paint(size, &rects, config.background, config.foreground);
        assert!(raster == repainted, "pixel mismatch at size {size}");
    }
}

#[test]
fn logo_geometry_matches_across_formats() {
    let mut bytes = Vec::new();
    image::DynamicImage::ImageRgba8(RgbaImage::from_pixel(3, 3, Rgba([200, 0, 0, 255])))
        .write_to(&mut std::io::Cursor::new(&mut bytes), image::ImageFormat::Png)
        .unwrap();
    let logo = ImageLogoDecoder.decode(&bytes).unwrap();

    let grid = QrcodeEncoder.encode("logo parity", EcLevel::H).unwrap();
    let config = RenderConfig {
        size: 300,
        ..Default::default()
    };
    let mut raster = render_raster(&grid, &config).unwrap();
    overlay_logo_raster(&mut raster, &logo, config.size);
    let mut doc = render_vector(&grid, &config).unwrap();
    overlay_logo_vector(&mut doc, &logo, config.size);

    let svg = doc.to_string();
    let plate = svg_module_rects(&svg).pop().unwrap();
    assert_eq!(plate, ModuleRect { x: 114, y: 114, width: 72, height: 72 });
    assert!(svg.contains("x=\"120\" y=\"120\" width=\"60\" height=\"60\" preserveAspectRatio=\"none\"/>"));

    let white = Color::WHITE.to_rgba();
    for i in 0..72 {
        assert_eq!(*raster.get_pixel(114 + i, 114), white);
        assert_eq!(*raster.get_pixel(114, 114 + i), white);
    }
    for y in 120..180 {
        for x in 120..180 {
            assert_eq!(*raster.get_pixel(x, y), Rgba([200, 0, 0, 255]));
        }
    }
}

#[test]
fn logo_skew_at_odd_remainder_is_under_half_a_pixel() {
    let mut bytes = Vec::new();
    image::DynamicImage::ImageRgba8(RgbaImage::from_pixel(3, 3, Rgba([200, 0, 0, 255])))
        .write_to(&mut std::io::Cursor::new(&mut bytes), image::ImageFormat::Png)
        .unwrap();
    let logo = ImageLogoDecoder.decode(&bytes).unwrap();

    // every module dark so the pixels around the plate are foreground
    let grid = ModuleMatrix::from_fn(25, |_, _| true);
    let config = RenderConfig {
        size: 256,
        ..Default::default()
    };
    let mut raster = render_raster(&grid, &config).unwrap();
    overlay_logo_raster(&mut raster, &logo, config.size);
    let mut doc = render_vector(&grid, &config).unwrap();
    overlay_logo_vector(&mut doc, &logo, config.size);

    let svg = doc.to_string();
    assert!(svg.contains("<rect x=\"97.5\" y=\"97.5\" width=\"61\" height=\"61\" fill=\"#ffffff\"/>"));
    assert!(svg.contains("x=\"102.5\" y=\"102.5\" width=\"51\" height=\"51\" preserveAspectRatio=\"none\"/>"));

    // raster snaps the same boxes down to 97 and 102
    let white = Color::WHITE.to_rgba();
    let black = Color::BLACK.to_rgba();
    let red = Rgba([200, 0, 0, 255]);
    for (at, expected) in [(96, black), (97, white), (101, white), (102, red), (152, red), (153, white), (157, white), (158, black)] {
        assert_eq!(*raster.get_pixel(at, 128), expected, "x = {at}");
        assert_eq!(*raster.get_pixel(128, at), expected, "y = {at}");
    }
}

#[test]
fn svg_ends_with_overlay_elements() {
    let grid = QrcodeEncoder.encode("order", EcLevel::M).unwrap();
    let config = RenderConfig::default();
    let mut doc = render_vector(&grid, &config).unwrap();
    let modules = doc.elements().len();

    let mut bytes = Vec::new();
    image::DynamicImage::ImageRgba8(RgbaImage::new(1, 1))
        .write_to(&mut std::io::Cursor::new(&mut bytes), image::ImageFormat::Png)
        .unwrap();
    overlay_logo_vector(&mut doc, &ImageLogoDecoder.decode(&bytes).unwrap(), config.size);

    assert_eq!(doc.elements().len(), modules + 2);
    let svg = doc.to_string();
    let image_at = svg.find("<image").unwrap();
    let plate_at = svg.rfind("fill=\"#ffffff\"").unwrap();
    let last_module_at = svg.rfind("fill=\"#000000\"").unwrap();
    assert!(last_module_at < plate_at && plate_at < image_at);
}
