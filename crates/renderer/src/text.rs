//! Text drawing with TrueType fonts loaded from disk.
//!
//! The drawing backend (imageproc + rusttype) lays glyphs out strictly left
//! to right, so Hebrew strings are converted to visual order with
//! [`visual_order`] (unicode-bidi) before they are drawn. Strings without
//! Hebrew letters pass through untouched.

use std::path::{Path, PathBuf};

use image::{Rgba, RgbaImage};
use imageproc::drawing::{draw_text_mut, text_size};
use rusttype::{Font, Scale};
use tracing::{debug, info, warn};
use unicode_bidi::BidiInfo;

use crate::error::{RenderError, RenderResult};

/// A parsed font and the file it came from.
#[derive(Clone)]
pub struct LoadedFont {
    pub font: Font<'static>,
    pub path: PathBuf,
}

impl std::fmt::Debug for LoadedFont {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LoadedFont").field("path", &self.path).finish()
    }
}

impl LoadedFont {
    pub fn from_file(path: &Path) -> RenderResult<Self> {
        let bytes = std::fs::read(path)?;
        let font = Font::try_from_vec(bytes).ok_or_else(|| {
            RenderError::InvalidInput(format!("{} is not a TrueType font", path.display()))
        })?;
        Ok(Self {
            font,
            path: path.to_path_buf(),
        })
    }
}

/// The two typefaces used on the story: a heavy face for names and headings
/// and a semi-bold face for temperatures.
#[derive(Debug, Clone)]
pub struct FontSet {
    pub heavy: LoadedFont,
    pub semibold: LoadedFont,
}

impl FontSet {
    /// Load the first usable font from a priority list.
    ///
    /// Every fallback beyond the first candidate is logged.
    pub fn load_first(candidates: &[PathBuf]) -> RenderResult<LoadedFont> {
        for (i, path) in candidates.iter().enumerate() {
            match LoadedFont::from_file(path) {
                Ok(loaded) => {
                    if i == 0 {
                        debug!(path = %path.display(), "Loaded font");
                    } else {
                        info!(path = %path.display(), rank = i, "Loaded fallback font");
                    }
                    return Ok(loaded);
                }
                Err(e) => {
                    warn!(path = %path.display(), error = %e, "Font unavailable, trying next");
                }
            }
        }

        Err(RenderError::FontUnavailable {
            tried: candidates.to_vec(),
        })
    }

    /// Load both chains. The semi-bold face falls back to the heavy one.
    pub fn load(heavy: &[PathBuf], semibold: &[PathBuf]) -> RenderResult<Self> {
        let heavy = Self::load_first(heavy)?;
        let semibold = match Self::load_first(semibold) {
            Ok(font) => font,
            Err(e) => {
                warn!(error = %e, "Using heavy font for temperatures");
                heavy.clone()
            }
        };
        Ok(Self { heavy, semibold })
    }
}

fn is_hebrew(c: char) -> bool {
    ('\u{0590}'..='\u{05FF}').contains(&c) || ('\u{FB1D}'..='\u{FB4F}').contains(&c)
}

/// Glyph mirroring for paired punctuation drawn right to left.
fn mirror(c: char) -> char {
    match c {
        '(' => ')',
        ')' => '(',
        '[' => ']',
        ']' => '[',
        '{' => '}',
        '}' => '{',
        '<' => '>',
        '>' => '<',
        '«' => '»',
        '»' => '«',
        other => other,
    }
}

/// Reorder logical-order text into left-to-right visual order.
///
/// Runs the Unicode bidirectional algorithm with the paragraph direction
/// taken from the first strong character. Right-to-left runs are reversed
/// with their brackets mirrored; embedded Latin words and numbers keep their
/// reading order. Text with no Hebrew letters is returned unchanged.
pub fn visual_order(text: &str) -> String {
    if !text.chars().any(is_hebrew) {
        return text.to_string();
    }

    let bidi = BidiInfo::new(text, None);
    let mut out = String::with_capacity(text.len());

    for para in &bidi.paragraphs {
        let (levels, runs) = bidi.visual_runs(para, para.range.clone());
        for run in runs {
            if levels[run.start].is_rtl() {
                out.extend(text[run].chars().rev().map(mirror));
            } else {
                out.push_str(&text[run]);
            }
        }
    }

    out
}

/// Rendered width and height of `text` in pixels.
pub fn measure(font: &Font<'_>, size: f32, text: &str) -> (u32, u32) {
    let (w, h) = text_size(Scale::uniform(size), font, text);
    (w.max(0) as u32, h.max(0) as u32)
}

/// Draw logical-order `text` with its top-left corner at (x, y).
pub fn draw_text(
    canvas: &mut RgbaImage,
    font: &Font<'_>,
    size: f32,
    x: i32,
    y: i32,
    color: Rgba<u8>,
    text: &str,
) {
    let visual = visual_order(text);
    draw_text_mut(canvas, color, x, y, Scale::uniform(size), font, &visual);
}

/// Draw `text` horizontally centered on `center_x`. Returns the drawn width.
pub fn draw_centered(
    canvas: &mut RgbaImage,
    font: &Font<'_>,
    size: f32,
    center_x: i32,
    y: i32,
    color: Rgba<u8>,
    text: &str,
) -> u32 {
    let (w, _) = measure(font, size, text);
    draw_text(canvas, font, size, center_x - w as i32 / 2, y, color, text);
    w
}

/// Greedy word wrap so that no line exceeds `max_width` pixels.
///
/// A single word wider than `max_width` gets a line of its own.
pub fn wrap_lines(font: &Font<'_>, size: f32, text: &str, max_width: u32) -> Vec<String> {
    let mut lines = Vec::new();
    let mut current = String::new();

    for word in text.split_whitespace() {
        if current.is_empty() {
            current.push_str(word);
            continue;
        }
        let candidate = format!("{} {}", current, word);
        if measure(font, size, &candidate).0 <= max_width {
            current = candidate;
        } else {
            lines.push(std::mem::replace(&mut current, word.to_string()));
        }
    }
    if !current.is_empty() {
        lines.push(current);
    }

    lines
}
