//! Tests for text ordering, font loading and drawing.
//!
//! Drawing tests need a real TrueType file and are skipped when none is
//! found (see `test_utils::find_test_file`).

use std::path::PathBuf;

use image::Rgba;
use renderer::text::{draw_centered, draw_text, measure, visual_order, wrap_lines, FontSet};
use renderer::RenderError;
use test_utils::{require_test_file, solid_image, temp_test_dir};

const FONT_FILE: &str = "DejaVuSans.ttf";
const WHITE: Rgba<u8> = Rgba([255, 255, 255, 255]);

// ============================================================================
// visual_order
// ============================================================================

#[test]
fn test_visual_order_leaves_latin_alone() {
    assert_eq!(visual_order("Tel Aviv"), "Tel Aviv");
    assert_eq!(visual_order("04/12/2025"), "04/12/2025");
    assert_eq!(visual_order("18-27°C"), "18-27°C");
    assert_eq!(visual_order(""), "");
}

#[test]
fn test_visual_order_reverses_hebrew() {
    assert_eq!(visual_order("חיפה"), "הפיח");
    assert_eq!(visual_order("תל אביב"), "ביבא לת");
}

#[test]
fn test_visual_order_keeps_numbers_intact() {
    assert_eq!(visual_order("שלום 25"), "25 םולש");
    assert_eq!(visual_order("חום 30°C היום"), "םויה 30°C םוח");
}

#[test]
fn test_visual_order_date_inside_hebrew() {
    assert_eq!(visual_order("תחזית 04/12/2025"), "04/12/2025 תיזחת");
}

#[test]
fn test_visual_order_keeps_latin_phrase_order() {
    assert_eq!(visual_order("שלום Tel Aviv"), "Tel Aviv םולש");
    assert_eq!(visual_order("רוחות UV index גבוה"), "הובג UV index תוחור");
}

#[test]
fn test_visual_order_mirrors_brackets() {
    assert_eq!(visual_order("חם (30)"), "(30) םח");
    assert_eq!(visual_order("גשם [צפון]"), "[ןופצ] םשג");
}

#[test]
fn test_visual_order_trailing_period_goes_left() {
    assert_eq!(visual_order("מעונן חלקית."), ".תיקלח ןנועמ");
}

#[test]
fn test_visual_order_is_involution_for_pure_hebrew() {
    let text = "מעונן חלקית";
    assert_eq!(visual_order(&visual_order(text)), text);
}

// ============================================================================
// Font loading
// ============================================================================

#[test]
fn test_load_first_reports_every_candidate() {
    let dir = temp_test_dir();
    let not_a_font = dir.path().join("broken.ttf");
    std::fs::write(&not_a_font, b"not a font").unwrap();
    let candidates = vec![dir.path().join("missing.ttf"), not_a_font];

    match FontSet::load_first(&candidates) {
        Err(RenderError::FontUnavailable { tried }) => assert_eq!(tried, candidates),
        other => panic!("unexpected: {:?}", other),
    }
}

#[test]
fn test_load_first_falls_back() {
    let font = require_test_file!(FONT_FILE);
    let candidates = vec![PathBuf::from("/nonexistent/NotoSansHebrew-Black.ttf"), font.clone()];

    let loaded = FontSet::load_first(&candidates).unwrap();
    assert_eq!(loaded.path, font);
}

#[test]
fn test_semibold_falls_back_to_heavy() {
    let font = require_test_file!(FONT_FILE);
    let set = FontSet::load(&[font.clone()], &[PathBuf::from("/nonexistent.ttf")]).unwrap();
    assert_eq!(set.semibold.path, font);
}

// ============================================================================
// Drawing
// ============================================================================

#[test]
fn test_measure_grows_with_text() {
    let path = require_test_file!(FONT_FILE);
    let font = FontSet::load_first(&[path]).unwrap().font;

    let (short, h) = measure(&font, 24.0, "12");
    let (long, _) = measure(&font, 24.0, "12-34°C");
    assert!(h > 0);
    assert!(long > short);
}

#[test]
fn test_draw_text_marks_canvas() {
    let path = require_test_file!(FONT_FILE);
    let font = FontSet::load_first(&[path]).unwrap().font;

    let mut canvas = solid_image(200, 60, [0, 0, 0, 255]);
    draw_text(&mut canvas, &font, 32.0, 10, 10, WHITE, "04/12/2025");
    assert!(canvas.pixels().any(|p| p[0] > 128));
}

#[test]
fn test_draw_centered_is_symmetric() {
    let path = require_test_file!(FONT_FILE);
    let font = FontSet::load_first(&[path]).unwrap().font;

    let mut canvas = solid_image(300, 60, [0, 0, 0, 255]);
    let width = draw_centered(&mut canvas, &font, 32.0, 150, 10, WHITE, "HHHH");
    assert!(width > 0);

    let lit: Vec<u32> = canvas
        .enumerate_pixels()
        .filter(|(_, _, p)| p[0] > 128)
        .map(|(x, _, _)| x)
        .collect();
    let (min, max) = (*lit.iter().min().unwrap(), *lit.iter().max().unwrap());
    let center = (min + max) as i32 / 2;
    assert!((center - 150).abs() <= 4, "ink centered at {}", center);
}

#[test]
fn test_wrap_lines_respects_width() {
    let path = require_test_file!(FONT_FILE);
    let font = FontSet::load_first(&[path]).unwrap().font;

    let text = "Partly cloudy with light rain in the north and along the coast";
    let lines = wrap_lines(&font, 20.0, text, 200);

    assert!(lines.len() > 1);
    assert_eq!(lines.join(" "), text);
    for line in &lines {
        if line.contains(' ') {
            assert!(measure(&font, 20.0, line).0 <= 200, "line too wide: {}", line);
        }
    }
}

#[test]
fn test_wrap_lines_long_word_gets_own_line() {
    let path = require_test_file!(FONT_FILE);
    let font = FontSet::load_first(&[path]).unwrap().font;

    let lines = wrap_lines(&font, 20.0, "a Supercalifragilistic b", 30);
    assert_eq!(lines, vec!["a", "Supercalifragilistic", "b"]);
}

#[test]
fn test_wrap_lines_empty() {
    let path = require_test_file!(FONT_FILE);
    let font = FontSet::load_first(&[path]).unwrap().font;
    assert!(wrap_lines(&font, 20.0, "   ", 100).is_empty());
}
