//! Linear-gradient rasterization for the story background.
//!
//! Angles follow the CSS convention: 0° points toward the top of the canvas
//! and angles grow clockwise. Every pixel is projected onto the gradient axis
//! through the canvas center, turned into a percentage along that axis and
//! coloured by piecewise-linear interpolation between the stops.
//!
//! Stop positions are percentages but are not limited to 0..=100. Positions
//! outside that range stretch the blend so that the canvas never reaches the
//! pure endpoint colour.

use image::{Rgb, RgbImage};
use rayon::prelude::*;
use tracing::debug;

use crate::error::{RenderError, RenderResult};

/// A colour waypoint along the gradient axis.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ColorStop {
    pub color: Rgb<u8>,
    /// Percentage along the axis; may be negative or above 100.
    pub position: f64,
}

impl ColorStop {
    pub fn new((r, g, b): (u8, u8, u8), position: f64) -> Self {
        Self {
            color: Rgb([r, g, b]),
            position,
        }
    }
}

/// Angle plus stops, as configured for a canvas.
#[derive(Debug, Clone, PartialEq)]
pub struct GradientSpec {
    pub angle_degrees: f64,
    pub stops: Vec<ColorStop>,
}

impl GradientSpec {
    pub fn new(angle_degrees: f64, stops: Vec<ColorStop>) -> Self {
        Self {
            angle_degrees,
            stops,
        }
    }

    pub fn rasterize(&self, width: u32, height: u32) -> RenderResult<RgbImage> {
        rasterize(width, height, self.angle_degrees, &self.stops)
    }
}

/// Direction, center and half-length of the gradient axis for one canvas.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GradientAxis {
    dx: f64,
    dy: f64,
    cx: f64,
    cy: f64,
    max_dist: f64,
}

impl GradientAxis {
    pub fn new(width: u32, height: u32, angle_degrees: f64) -> Self {
        // CSS angle to math angle; y is negated since image rows grow downward.
        let theta = (90.0 - angle_degrees).to_radians();
        let dx = theta.cos();
        let dy = -theta.sin();

        let w = width as f64;
        let h = height as f64;
        let cx = w / 2.0;
        let cy = h / 2.0;

        let max_dist = [(0.0, 0.0), (w, 0.0), (0.0, h), (w, h)]
            .iter()
            .map(|&(x, y)| ((x - cx) * dx + (y - cy) * dy).abs())
            .fold(0.0_f64, f64::max);

        Self {
            dx,
            dy,
            cx,
            cy,
            max_dist,
        }
    }

    /// Unit direction vector in image space.
    pub fn direction(&self) -> (f64, f64) {
        (self.dx, self.dy)
    }

    /// Half the axis length needed to cover every corner.
    pub fn max_dist(&self) -> f64 {
        self.max_dist
    }

    /// Position of a pixel along the axis, in percent.
    ///
    /// A zero-length axis maps everything to the midpoint.
    pub fn position_at(&self, x: f64, y: f64) -> f64 {
        if self.max_dist == 0.0 {
            return 50.0;
        }
        let projection = (x - self.cx) * self.dx + (y - self.cy) * self.dy;
        (projection + self.max_dist) / (2.0 * self.max_dist) * 100.0
    }
}

/// Colour at `position` for stops already sorted by position.
///
/// Positions outside the stop range clamp to the first or last colour.
/// Between two stops at the same position the earlier one wins.
/// Channels are truncated, not rounded.
pub fn interpolate(sorted_stops: &[ColorStop], position: f64) -> Rgb<u8> {
    let (first, last) = match (sorted_stops.first(), sorted_stops.last()) {
        (Some(first), Some(last)) => (first, last),
        _ => return Rgb([0, 0, 0]),
    };

    if position <= first.position {
        return first.color;
    }
    if position >= last.position {
        return last.color;
    }

    for pair in sorted_stops.windows(2) {
        let (a, b) = (&pair[0], &pair[1]);
        if a.position <= position && position <= b.position {
            let span = b.position - a.position;
            let factor = if span == 0.0 {
                0.0
            } else {
                (position - a.position) / span
            };
            return Rgb([
                mix(a.color[0], b.color[0], factor),
                mix(a.color[1], b.color[1], factor),
                mix(a.color[2], b.color[2], factor),
            ]);
        }
    }

    last.color
}

#[inline]
fn mix(a: u8, b: u8, factor: f64) -> u8 {
    (a as f64 * (1.0 - factor) + b as f64 * factor) as u8
}

/// Rasterize a linear gradient onto a fresh `width`×`height` canvas.
///
/// Stops may be given in any order. Rows are filled in parallel; the result
/// is identical to a sequential pass.
///
/// # Errors
///
/// [`RenderError::InvalidInput`] for a zero dimension or an empty stop list.
pub fn rasterize(
    width: u32,
    height: u32,
    angle_degrees: f64,
    stops: &[ColorStop],
) -> RenderResult<RgbImage> {
    if width == 0 || height == 0 {
        return Err(RenderError::InvalidInput(format!(
            "canvas must be non-empty, got {}x{}",
            width, height
        )));
    }
    if stops.is_empty() {
        return Err(RenderError::InvalidInput(
            "gradient needs at least one color stop".to_string(),
        ));
    }

    let mut sorted = stops.to_vec();
    sorted.sort_by(|a, b| a.position.total_cmp(&b.position));

    let axis = GradientAxis::new(width, height, angle_degrees);
    debug!(
        width,
        height,
        angle = angle_degrees,
        stops = sorted.len(),
        max_dist = axis.max_dist(),
        "Rasterizing gradient"
    );

    let mut canvas = RgbImage::new(width, height);
    let row_len = width as usize * 3;
    let pixels: &mut [u8] = &mut canvas;

    pixels
        .par_chunks_mut(row_len)
        .enumerate()
        .for_each(|(y, row)| {
            for (x, px) in row.chunks_exact_mut(3).enumerate() {
                let position = axis.position_at(x as f64, y as f64);
                px.copy_from_slice(&interpolate(&sorted, position).0);
            }
        });

    Ok(canvas)
}
