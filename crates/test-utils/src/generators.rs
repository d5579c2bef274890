//! Test data generators for creating synthetic image assets.
//!
//! These generators create predictable, verifiable pixel patterns that stand
//! in for the map, logos and weather icons.

use std::path::{Path, PathBuf};

use image::{Rgba, RgbaImage};

/// Creates an image filled with a single colour.
///
/// # Example
///
/// ```
/// use test_utils::solid_image;
///
/// let img = solid_image(4, 2, [255, 0, 0, 255]);
/// assert_eq!(img.dimensions(), (4, 2));
/// assert_eq!(img.get_pixel(3, 1).0, [255, 0, 0, 255]);
/// ```
pub fn solid_image(width: u32, height: u32, rgba: [u8; 4]) -> RgbaImage {
    RgbaImage::from_pixel(width, height, Rgba(rgba))
}

/// Creates a checkerboard of two colours with square cells of `cell` pixels.
///
/// The cell at (0, 0) uses `a`.
pub fn checker_image(width: u32, height: u32, cell: u32, a: [u8; 4], b: [u8; 4]) -> RgbaImage {
    let cell = cell.max(1);
    RgbaImage::from_fn(width, height, |x, y| {
        if (x / cell + y / cell) % 2 == 0 {
            Rgba(a)
        } else {
            Rgba(b)
        }
    })
}

/// Creates an image whose left half is opaque `rgb` and right half fully
/// transparent.
///
/// Useful for checking that overlays only touch covered pixels.
pub fn half_transparent_image(width: u32, height: u32, rgb: [u8; 3]) -> RgbaImage {
    RgbaImage::from_fn(width, height, |x, _| {
        if x < width / 2 {
            Rgba([rgb[0], rgb[1], rgb[2], 255])
        } else {
            Rgba([rgb[0], rgb[1], rgb[2], 0])
        }
    })
}

/// A minimal SVG document of the given size holding one filled rectangle.
pub fn simple_svg(width: u32, height: u32, fill: &str) -> String {
    format!(
        r#"<svg xmlns="http://www.w3.org/2000/svg" width="{w}" height="{h}" viewBox="0 0 {w} {h}"><rect x="0" y="0" width="{w}" height="{h}" fill="{fill}"/></svg>"#,
        w = width,
        h = height,
        fill = fill
    )
}

/// Saves `img` as a PNG under `dir/relative`, creating parent directories.
///
/// Returns the full path written.
pub fn write_png_asset(dir: &Path, relative: &str, img: &RgbaImage) -> PathBuf {
    let path = dir.join(relative);
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).expect("Failed to create asset directory");
    }
    img.save(&path).expect("Failed to write PNG asset");
    path
}
