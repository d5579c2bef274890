//! Tests for asset loading and compositing.

use image::{Rgba, RgbaImage};
use renderer::compose::{fill_rect, load_asset, load_raster, load_svg, overlay, resize_to_height};
use renderer::RenderError;
use test_utils::{half_transparent_image, simple_svg, solid_image, temp_test_dir, write_png_asset};

const RED: [u8; 4] = [255, 0, 0, 255];
const BLUE: [u8; 4] = [0, 0, 255, 255];

// ============================================================================
// overlay
// ============================================================================

#[test]
fn test_overlay_opaque_replaces() {
    let mut canvas = solid_image(10, 10, BLUE);
    overlay(&mut canvas, &solid_image(2, 2, RED), 3, 4);

    assert_eq!(canvas.get_pixel(3, 4).0, RED);
    assert_eq!(canvas.get_pixel(4, 5).0, RED);
    assert_eq!(canvas.get_pixel(5, 4).0, BLUE);
    assert_eq!(canvas.get_pixel(2, 4).0, BLUE);
}

#[test]
fn test_overlay_transparent_leaves_canvas() {
    let mut canvas = solid_image(8, 2, BLUE);
    overlay(&mut canvas, &half_transparent_image(8, 2, [255, 0, 0]), 0, 0);

    for y in 0..2 {
        for x in 0..4 {
            assert_eq!(canvas.get_pixel(x, y).0, RED);
        }
        for x in 4..8 {
            assert_eq!(canvas.get_pixel(x, y).0, BLUE);
        }
    }
}

#[test]
fn test_overlay_blends_partial_alpha() {
    let mut canvas = solid_image(1, 1, [0, 0, 0, 255]);
    overlay(&mut canvas, &solid_image(1, 1, [200, 100, 0, 128]), 0, 0);

    let px = canvas.get_pixel(0, 0);
    assert_eq!(px[3], 255);
    assert!((99..=101).contains(&px[0]), "red {}", px[0]);
    assert!((49..=51).contains(&px[1]), "green {}", px[1]);
}

#[test]
fn test_overlay_clips_at_edges() {
    let mut canvas = solid_image(4, 4, BLUE);
    overlay(&mut canvas, &solid_image(3, 3, RED), -2, 2);

    assert_eq!(canvas.get_pixel(0, 2).0, RED);
    assert_eq!(canvas.get_pixel(0, 3).0, RED);
    assert_eq!(canvas.get_pixel(1, 3).0, BLUE);
    assert_eq!(canvas.get_pixel(0, 1).0, BLUE);
}

#[test]
fn test_overlay_fully_outside_is_noop() {
    let mut canvas = solid_image(4, 4, BLUE);
    let before = canvas.clone();
    overlay(&mut canvas, &solid_image(3, 3, RED), 10, -10);
    assert_eq!(canvas, before);
}

// ============================================================================
// fill_rect
// ============================================================================

#[test]
fn test_fill_rect_clips() {
    let mut canvas = solid_image(6, 6, BLUE);
    fill_rect(&mut canvas, 4, 1, 10, 2, Rgba(RED));

    assert_eq!(canvas.get_pixel(5, 1).0, RED);
    assert_eq!(canvas.get_pixel(4, 2).0, RED);
    assert_eq!(canvas.get_pixel(3, 1).0, BLUE);
    assert_eq!(canvas.get_pixel(5, 3).0, BLUE);
}

#[test]
fn test_fill_rect_zero_size_is_noop() {
    let mut canvas = solid_image(3, 3, BLUE);
    fill_rect(&mut canvas, 0, 0, 0, 3, Rgba(RED));
    assert!(canvas.pixels().all(|p| p.0 == BLUE));
}

// ============================================================================
// Loading
// ============================================================================

#[test]
fn test_load_raster_round_trip() {
    let dir = temp_test_dir();
    let path = write_png_asset(dir.path(), "logos/logo.png", &solid_image(5, 3, RED));

    let img = load_raster(&path).unwrap();
    assert_eq!(img.dimensions(), (5, 3));
    assert_eq!(img.get_pixel(4, 2).0, RED);
}

#[test]
fn test_load_raster_missing_file() {
    let dir = temp_test_dir();
    let result = load_raster(&dir.path().join("nope.png"));
    assert!(matches!(result, Err(RenderError::Image { .. })));
}

#[test]
fn test_load_asset_resizes_raster() {
    let dir = temp_test_dir();
    let path = write_png_asset(dir.path(), "icon.png", &solid_image(100, 100, RED));

    let img = load_asset(&path, 50, 50).unwrap();
    assert_eq!(img.dimensions(), (50, 50));
    let px = img.get_pixel(25, 25);
    assert!(px[0] >= 254 && px[1] <= 1 && px[3] >= 254, "{:?}", px);
}

#[test]
fn test_load_svg_scales_to_box() {
    let dir = temp_test_dir();
    let path = dir.path().join("map.svg");
    std::fs::write(&path, simple_svg(10, 20, "#00ff00")).unwrap();

    let img = load_svg(&path, 40, 80).unwrap();
    assert_eq!(img.dimensions(), (40, 80));
    assert_eq!(img.get_pixel(20, 40).0, [0, 255, 0, 255]);
}

#[test]
fn test_load_svg_letterboxes_with_transparency() {
    let dir = temp_test_dir();
    let path = dir.path().join("square.svg");
    std::fs::write(&path, simple_svg(10, 10, "#ff0000")).unwrap();

    // A square drawing in a tall box leaves bands above and below
    let img = load_svg(&path, 20, 60).unwrap();
    assert_eq!(img.get_pixel(10, 2)[3], 0);
    assert_eq!(img.get_pixel(10, 30).0, RED);
    assert_eq!(img.get_pixel(10, 57)[3], 0);
}

#[test]
fn test_load_asset_picks_svg_by_extension() {
    let dir = temp_test_dir();
    let path = dir.path().join("MAP.SVG");
    std::fs::write(&path, simple_svg(4, 4, "#0000ff")).unwrap();

    let img = load_asset(&path, 8, 8).unwrap();
    assert_eq!(img.get_pixel(4, 4).0, BLUE);
}

#[test]
fn test_load_svg_rejects_garbage() {
    let dir = temp_test_dir();
    let path = dir.path().join("bad.svg");
    std::fs::write(&path, "this is not svg").unwrap();

    assert!(matches!(load_svg(&path, 4, 4), Err(RenderError::Svg { .. })));
}

// ============================================================================
// Resizing
// ============================================================================

#[test]
fn test_resize_to_height_keeps_aspect() {
    let img: RgbaImage = solid_image(200, 100, RED);
    let resized = resize_to_height(&img, 50);
    assert_eq!(resized.dimensions(), (100, 50));
}

#[test]
fn test_resize_to_same_height_is_identity() {
    let img = solid_image(7, 3, RED);
    assert_eq!(resize_to_height(&img, 3), img);
}
