//! Compositing primitives: loading assets and layering them on the canvas.

use std::path::Path;

use image::imageops::FilterType;
use image::{DynamicImage, Rgba, RgbImage, RgbaImage};
use imageproc::drawing::draw_filled_rect_mut;
use imageproc::rect::Rect;
use tracing::debug;

use crate::error::{RenderError, RenderResult};

/// Promote an opaque RGB canvas to RGBA for compositing.
pub fn canvas_from_rgb(rgb: RgbImage) -> RgbaImage {
    DynamicImage::ImageRgb8(rgb).to_rgba8()
}

/// Decode any raster format supported by the `image` crate.
pub fn load_raster(path: &Path) -> RenderResult<RgbaImage> {
    let img = image::open(path).map_err(|source| RenderError::Image {
        path: path.to_path_buf(),
        source,
    })?;
    debug!(path = %path.display(), width = img.width(), height = img.height(), "Loaded raster");
    Ok(img.to_rgba8())
}

/// Render an SVG file into a `width`×`height` image.
///
/// The drawing is scaled uniformly to fit and centered; uncovered pixels are
/// transparent.
pub fn load_svg(path: &Path, width: u32, height: u32) -> RenderResult<RgbaImage> {
    let svg_error = |message: String| RenderError::Svg {
        path: path.to_path_buf(),
        message,
    };

    let content = std::fs::read_to_string(path)?;
    let opt = usvg::Options::default();
    let tree = usvg::Tree::from_str(&content, &opt).map_err(|e| svg_error(e.to_string()))?;

    let mut pixmap = tiny_skia::Pixmap::new(width, height)
        .ok_or_else(|| svg_error(format!("cannot allocate {}x{} pixmap", width, height)))?;

    let svg_size = tree.size();
    let scale = (width as f32 / svg_size.width()).min(height as f32 / svg_size.height());
    let offset_x = (width as f32 - svg_size.width() * scale) / 2.0;
    let offset_y = (height as f32 - svg_size.height() * scale) / 2.0;

    let transform = tiny_skia::Transform::from_scale(scale, scale).post_translate(offset_x, offset_y);
    resvg::render(&tree, transform, &mut pixmap.as_mut());

    // tiny-skia stores premultiplied alpha
    let mut out = RgbaImage::new(width, height);
    for (dst, src) in out.pixels_mut().zip(pixmap.pixels()) {
        let c = src.demultiply();
        *dst = Rgba([c.red(), c.green(), c.blue(), c.alpha()]);
    }

    debug!(path = %path.display(), width, height, "Rendered SVG");
    Ok(out)
}

/// Load an asset at exactly `width`×`height`, picking the SVG or raster path
/// by extension.
pub fn load_asset(path: &Path, width: u32, height: u32) -> RenderResult<RgbaImage> {
    let is_svg = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.eq_ignore_ascii_case("svg"))
        .unwrap_or(false);

    if is_svg {
        return load_svg(path, width, height);
    }

    let img = load_raster(path)?;
    if img.dimensions() == (width, height) {
        return Ok(img);
    }
    Ok(image::imageops::resize(&img, width, height, FilterType::Lanczos3))
}

/// Scale to `height`, keeping the aspect ratio.
pub fn resize_to_height(img: &RgbaImage, height: u32) -> RgbaImage {
    if img.height() == height || img.height() == 0 {
        return img.clone();
    }
    let ratio = height as f64 / img.height() as f64;
    let width = ((img.width() as f64 * ratio).round() as u32).max(1);
    image::imageops::resize(img, width, height.max(1), FilterType::Lanczos3)
}

/// Alpha-composite `top` onto `canvas` with its top-left corner at (x, y).
///
/// Parts of `top` that fall outside the canvas are dropped.
pub fn overlay(canvas: &mut RgbaImage, top: &RgbaImage, x: i64, y: i64) {
    let (cw, ch) = (canvas.width() as i64, canvas.height() as i64);

    for (tx, ty, src) in top.enumerate_pixels() {
        let cx = x + tx as i64;
        let cy = y + ty as i64;
        if cx < 0 || cy < 0 || cx >= cw || cy >= ch {
            continue;
        }

        let src_a = src[3];
        if src_a == 0 {
            continue;
        }
        let dst = canvas.get_pixel_mut(cx as u32, cy as u32);
        if src_a == 255 {
            *dst = *src;
            continue;
        }

        *dst = blend(*dst, *src);
    }
}

/// Source-over blending of straight (non-premultiplied) RGBA.
fn blend(dst: Rgba<u8>, src: Rgba<u8>) -> Rgba<u8> {
    let sa = src[3] as f32 / 255.0;
    let da = dst[3] as f32 / 255.0;
    let out_a = sa + da * (1.0 - sa);
    if out_a <= 0.0 {
        return Rgba([0, 0, 0, 0]);
    }

    let channel = |i: usize| {
        let v = (src[i] as f32 * sa + dst[i] as f32 * da * (1.0 - sa)) / out_a;
        v.round().clamp(0.0, 255.0) as u8
    };

    Rgba([
        channel(0),
        channel(1),
        channel(2),
        (out_a * 255.0).round() as u8,
    ])
}

/// Paint an opaque rectangle, clipped to the canvas.
pub fn fill_rect(canvas: &mut RgbaImage, x: i32, y: i32, width: u32, height: u32, color: Rgba<u8>) {
    if width == 0 || height == 0 {
        return;
    }
    draw_filled_rect_mut(canvas, Rect::at(x, y).of_size(width, height), color);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blend_half_alpha_over_opaque() {
        let out = blend(Rgba([0, 0, 0, 255]), Rgba([255, 255, 255, 128]));
        assert_eq!(out[3], 255);
        assert!((127..=129).contains(&out[0]));
    }

    #[test]
    fn test_blend_onto_transparent_keeps_source() {
        let out = blend(Rgba([0, 0, 0, 0]), Rgba([200, 100, 50, 128]));
        assert_eq!(&out.0[..3], &[200, 100, 50]);
        assert_eq!(out[3], 128);
    }

    #[test]
    fn test_canvas_from_rgb_is_opaque() {
        let rgb = RgbImage::from_pixel(2, 2, image::Rgb([1, 2, 3]));
        let rgba = canvas_from_rgb(rgb);
        assert_eq!(rgba.get_pixel(1, 1).0, [1, 2, 3, 255]);
    }
}
