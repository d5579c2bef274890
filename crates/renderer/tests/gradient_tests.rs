//! Tests for the linear-gradient rasterizer.

use image::Rgb;
use renderer::gradient::{interpolate, rasterize, ColorStop, GradientAxis, GradientSpec};
use renderer::RenderError;
use test_utils::assert_approx_eq;

fn black_white() -> Vec<ColorStop> {
    vec![
        ColorStop::new((0, 0, 0), 0.0),
        ColorStop::new((255, 255, 255), 100.0),
    ]
}

/// Color of a row sampled on the center column, where the horizontal term of
/// the projection is exactly zero.
fn row_color(img: &image::RgbImage, y: u32) -> Rgb<u8> {
    *img.get_pixel(img.width() / 2, y)
}

// ============================================================================
// Input validation
// ============================================================================

#[test]
fn test_zero_width_is_invalid() {
    assert!(matches!(
        rasterize(0, 10, 0.0, &black_white()),
        Err(RenderError::InvalidInput(_))
    ));
}

#[test]
fn test_zero_height_is_invalid() {
    assert!(matches!(
        rasterize(10, 0, 0.0, &black_white()),
        Err(RenderError::InvalidInput(_))
    ));
}

#[test]
fn test_empty_stops_is_invalid() {
    assert!(matches!(
        rasterize(10, 10, 0.0, &[]),
        Err(RenderError::InvalidInput(_))
    ));
}

// ============================================================================
// Orientation
// ============================================================================

#[test]
fn test_zero_degrees_points_up() {
    // 0° points toward the top, so the top row is the far end of the axis.
    let img = rasterize(4, 4, 0.0, &black_white()).unwrap();

    assert_eq!(img.dimensions(), (4, 4));
    assert_eq!(row_color(&img, 0), Rgb([255, 255, 255]));
    assert_eq!(row_color(&img, 1), Rgb([191, 191, 191]));
    assert_eq!(row_color(&img, 2), Rgb([127, 127, 127]));
    assert_eq!(row_color(&img, 3), Rgb([63, 63, 63]));

    // Off-center columns agree within one unit of truncation
    for y in 0..4 {
        for x in 0..4 {
            let diff = (img.get_pixel(x, y)[0] as i32 - row_color(&img, y)[0] as i32).abs();
            assert!(diff <= 1, "pixel ({}, {})", x, y);
        }
    }
}

#[test]
fn test_180_degrees_points_down() {
    let img = rasterize(4, 4, 180.0, &black_white()).unwrap();

    assert_eq!(row_color(&img, 0), Rgb([0, 0, 0]));
    for y in 1..3 {
        let (above, here) = (row_color(&img, y)[0], row_color(&img, y + 1)[0]);
        assert!(above < here, "row {} should be darker than row {}", y, y + 1);
    }
}

#[test]
fn test_rows_are_uniform_for_vertical_gradient() {
    let img = rasterize(16, 8, 180.0, &black_white()).unwrap();
    for y in 0..8 {
        let first = *img.get_pixel(0, y);
        for x in 1..16 {
            assert_eq!(*img.get_pixel(x, y), first, "pixel ({}, {})", x, y);
        }
    }
}

#[test]
fn test_90_degrees_runs_left_to_right() {
    let img = rasterize(10, 3, 90.0, &black_white()).unwrap();

    assert_eq!(*img.get_pixel(0, 1), Rgb([0, 0, 0]));
    for x in 1..10 {
        assert!(img.get_pixel(x - 1, 1)[0] < img.get_pixel(x, 1)[0]);
    }
    // Columns are uniform
    for x in 0..10 {
        assert_eq!(img.get_pixel(x, 0), img.get_pixel(x, 2));
    }
}

#[test]
fn test_angle_wraps_around() {
    let a = rasterize(12, 7, 90.0, &black_white()).unwrap();
    for angle in [450.0, -270.0] {
        let b = rasterize(12, 7, angle, &black_white()).unwrap();
        for (pa, pb) in a.pixels().zip(b.pixels()) {
            assert!((pa[0] as i32 - pb[0] as i32).abs() <= 1, "angle {}", angle);
        }
    }
}

// ============================================================================
// Interpolation properties
// ============================================================================

#[test]
fn test_monotonic_along_axis() {
    let stops = vec![
        ColorStop::new((10, 200, 0), 0.0),
        ColorStop::new((250, 20, 0), 100.0),
    ];
    let img = rasterize(64, 1, 90.0, &stops).unwrap();

    for x in 1..64 {
        let prev = img.get_pixel(x - 1, 0);
        let cur = img.get_pixel(x, 0);
        assert!(cur[0] >= prev[0], "red must not decrease at x={}", x);
        assert!(cur[1] <= prev[1], "green must not increase at x={}", x);
        assert_eq!(cur[2], 0);
        // No overshoot past the stop colors
        assert!((10..=250).contains(&cur[0]));
        assert!((20..=200).contains(&cur[1]));
    }
}

#[test]
fn test_boundary_clamp_with_inner_stops() {
    // Stops well inside the axis: both ends of the canvas show pure colors.
    let stops = vec![
        ColorStop::new((255, 0, 0), 30.0),
        ColorStop::new((0, 0, 255), 70.0),
    ];
    let img = rasterize(100, 1, 90.0, &stops).unwrap();

    for x in 0..30 {
        assert_eq!(*img.get_pixel(x, 0), Rgb([255, 0, 0]), "x={}", x);
    }
    for x in 71..100 {
        assert_eq!(*img.get_pixel(x, 0), Rgb([0, 0, 255]), "x={}", x);
    }
}

#[test]
fn test_out_of_range_stops_never_reach_endpoints() {
    let stops = vec![
        ColorStop::new((0, 0, 0), -100.0),
        ColorStop::new((200, 200, 200), 200.0),
    ];
    let img = rasterize(20, 1, 90.0, &stops).unwrap();

    for x in 0..20 {
        let v = img.get_pixel(x, 0)[0];
        assert!(v > 0 && v < 200, "x={} value={}", x, v);
    }
}

#[test]
fn test_unsorted_stops_are_sorted() {
    let sorted = black_white();
    let reversed: Vec<_> = sorted.iter().rev().cloned().collect();
    assert_eq!(
        rasterize(9, 9, 33.0, &sorted).unwrap(),
        rasterize(9, 9, 33.0, &reversed).unwrap()
    );
}

#[test]
fn test_single_stop_fills_canvas() {
    let img = rasterize(5, 5, 123.0, &[ColorStop::new((9, 8, 7), 50.0)]).unwrap();
    assert!(img.pixels().all(|p| *p == Rgb([9, 8, 7])));
}

#[test]
fn test_three_stops() {
    let stops = vec![
        ColorStop::new((255, 0, 0), 0.0),
        ColorStop::new((0, 255, 0), 50.0),
        ColorStop::new((0, 0, 255), 100.0),
    ];
    assert_eq!(interpolate(&stops, 25.0), Rgb([127, 127, 0]));
    assert_eq!(interpolate(&stops, 50.0), Rgb([0, 255, 0]));
    assert_eq!(interpolate(&stops, 75.0), Rgb([0, 127, 127]));
}

// ============================================================================
// Degenerate sizes and determinism
// ============================================================================

#[test]
fn test_single_pixel() {
    // The pixel sits at the canvas corner, the far end of an upward axis.
    let img = rasterize(1, 1, 0.0, &black_white()).unwrap();
    assert_eq!(img.dimensions(), (1, 1));
    assert!(img.get_pixel(0, 0).0.iter().all(|&c| c >= 254));
}

#[test]
fn test_axis_positions_span_zero_to_hundred() {
    // Left to right across a single-row canvas
    let axis = GradientAxis::new(100, 1, 90.0);
    assert_approx_eq!(axis.max_dist(), 50.0, 1e-9);
    assert_approx_eq!(axis.position_at(0.0, 0.0), 0.0, 1e-9);
    assert_approx_eq!(axis.position_at(50.0, 0.0), 50.0, 1e-9);
    assert_approx_eq!(axis.position_at(100.0, 0.0), 100.0, 1e-9);
}

#[test]
fn test_zero_length_axis_is_midpoint() {
    let axis = GradientAxis::new(0, 0, 0.0);
    assert_eq!(axis.max_dist(), 0.0);
    assert_eq!(axis.position_at(3.0, 4.0), 50.0);
}

#[test]
fn test_deterministic() {
    let stops = vec![
        ColorStop::new((220, 255, 87), -62.6),
        ColorStop::new((34, 178, 255), 112.14),
    ];
    let a = rasterize(108, 192, 346.0, &stops).unwrap();
    let b = rasterize(108, 192, 346.0, &stops).unwrap();
    assert_eq!(a.as_raw(), b.as_raw());
}

#[test]
fn test_matches_sequential_reference() {
    let stops = vec![
        ColorStop::new((220, 255, 87), -62.6),
        ColorStop::new((34, 178, 255), 112.14),
    ];
    let (w, h) = (37, 53);
    let img = rasterize(w, h, 346.0, &stops).unwrap();

    let axis = GradientAxis::new(w, h, 346.0);
    for y in 0..h {
        for x in 0..w {
            let expected = interpolate(&stops, axis.position_at(x as f64, y as f64));
            assert_eq!(*img.get_pixel(x, y), expected, "pixel ({}, {})", x, y);
        }
    }
}

#[test]
fn test_gradient_spec_rasterize() {
    let spec = GradientSpec::new(180.0, black_white());
    let img = spec.rasterize(3, 6).unwrap();
    assert_eq!(img.dimensions(), (3, 6));
    assert_eq!(*img.get_pixel(1, 0), Rgb([0, 0, 0]));
}
