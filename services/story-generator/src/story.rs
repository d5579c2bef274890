//! Phase-by-phase composition of the story image.

use std::fmt;

use forecast_common::{time, CityForecast, ForecastDay};
use image::{Rgba, RgbaImage};
use renderer::compose::{canvas_from_rgb, fill_rect, load_asset, load_raster, overlay, resize_to_height};
use renderer::layout::{CityLayout, CityPlacement, HeaderLayout, LayoutConfig};
use renderer::text::{self, FontSet};
use tracing::{debug, error, info, instrument, warn};

use crate::assets::AssetPaths;
use crate::error::{StoryError, StoryResult};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Canvas,
    Map,
    Header,
    Cities,
    Description,
    Logos,
}

impl Phase {
    /// Phases drawn on top of the background, in order.
    pub const OVERLAYS: [Phase; 5] = [
        Phase::Map,
        Phase::Header,
        Phase::Cities,
        Phase::Description,
        Phase::Logos,
    ];
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Phase::Canvas => "canvas",
            Phase::Map => "map",
            Phase::Header => "header",
            Phase::Cities => "cities",
            Phase::Description => "description",
            Phase::Logos => "logos",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PhaseOutcome {
    Rendered,
    /// An input was missing (asset, font, text).
    Skipped(String),
    Failed(String),
}

/// What happened to each phase of one render.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RenderReport {
    pub phases: Vec<(Phase, PhaseOutcome)>,
}

impl RenderReport {
    pub fn outcome(&self, phase: Phase) -> Option<&PhaseOutcome> {
        self.phases
            .iter()
            .find(|(p, _)| *p == phase)
            .map(|(_, outcome)| outcome)
    }

    pub fn rendered(&self) -> usize {
        self.phases
            .iter()
            .filter(|(_, o)| *o == PhaseOutcome::Rendered)
            .count()
    }

    pub fn is_complete(&self) -> bool {
        self.rendered() == self.phases.len()
    }

    pub fn log_summary(&self) {
        let skipped = self
            .phases
            .iter()
            .filter(|(_, o)| matches!(o, PhaseOutcome::Skipped(_)))
            .count();
        let failed = self
            .phases
            .iter()
            .filter(|(_, o)| matches!(o, PhaseOutcome::Failed(_)))
            .count();

        if self.is_complete() {
            info!(rendered = self.rendered(), "Story rendered");
        } else {
            warn!(
                rendered = self.rendered(),
                skipped,
                failed,
                "Story rendered with missing elements"
            );
        }
    }
}

/// Top-left corners of the icon and of the text block for a city whose
/// anchor is `anchor`.
fn arrange(
    layout: CityLayout,
    anchor: (i64, i64),
    icon: i64,
    spacing: i64,
    text_size: (i64, i64),
) -> ((i64, i64), (i64, i64)) {
    let (x, y) = anchor;
    let (text_w, text_h) = text_size;
    let beside_y = y + (icon - text_h) / 2;

    match layout {
        CityLayout::Rtl => ((x, y), (x + icon + spacing, beside_y)),
        CityLayout::Ltr => ((x + text_w + spacing, y), (x, beside_y)),
        CityLayout::Ttb => ((x, y), (x + (icon - text_w) / 2, y + icon + spacing)),
    }
}

/// Separator bar as (x, y, width, height). Both edges are inclusive:
/// x covers `padding..=canvas_width - padding` and y covers
/// `separator_y..=separator_y + separator_height`.
fn separator_rect(canvas_width: u32, header: &HeaderLayout) -> (i32, i32, u32, u32) {
    let width = canvas_width.saturating_sub(2 * header.padding) + 1;
    (
        header.padding as i32,
        header.separator_y,
        width,
        header.separator_height + 1,
    )
}

/// Draws a [`ForecastDay`] with a fixed layout and asset set.
///
/// Fonts are loaded once, up front. Without any usable font the text phases
/// are skipped.
pub struct StoryRenderer {
    layout: LayoutConfig,
    assets: AssetPaths,
    fonts: Option<FontSet>,
}

impl StoryRenderer {
    pub fn new(layout: LayoutConfig, assets: AssetPaths) -> Self {
        let fonts = match FontSet::load(&assets.heavy_fonts, &assets.semibold_fonts) {
            Ok(fonts) => {
                info!(
                    heavy = %fonts.heavy.path.display(),
                    semibold = %fonts.semibold.path.display(),
                    "Fonts loaded"
                );
                Some(fonts)
            }
            Err(e) => {
                warn!(error = %e, "No font available, text will be skipped");
                None
            }
        };

        Self {
            layout,
            assets,
            fonts,
        }
    }

    pub fn layout(&self) -> &LayoutConfig {
        &self.layout
    }

    pub fn has_fonts(&self) -> bool {
        self.fonts.is_some()
    }

    pub fn render(&self, day: &ForecastDay) -> StoryResult<RgbaImage> {
        self.render_with_report(day).map(|(image, _)| image)
    }

    /// Draw every phase. Only a failing background is an error.
    #[instrument(skip(self, day), fields(date = %day.date, cities = day.cities.len()))]
    pub fn render_with_report(&self, day: &ForecastDay) -> StoryResult<(RgbaImage, RenderReport)> {
        let mut canvas = self.draw_canvas()?;
        let mut report = RenderReport::default();
        report.phases.push((Phase::Canvas, PhaseOutcome::Rendered));

        for phase in Phase::OVERLAYS {
            let result = match phase {
                Phase::Map => self.draw_map(&mut canvas),
                Phase::Header => self.draw_header(&mut canvas, day),
                Phase::Cities => self.draw_cities(&mut canvas, &day.cities),
                Phase::Description => self.draw_description(&mut canvas, day.description.as_deref()),
                Phase::Logos => self.draw_logos(&mut canvas),
                Phase::Canvas => continue,
            };

            let outcome = match result {
                Ok(()) => {
                    info!(%phase, "Phase rendered");
                    PhaseOutcome::Rendered
                }
                Err(e) if e.is_skip() => {
                    warn!(%phase, reason = %e, "Phase skipped");
                    PhaseOutcome::Skipped(e.to_string())
                }
                Err(e) => {
                    error!(%phase, error = %e, "Phase failed");
                    PhaseOutcome::Failed(e.to_string())
                }
            };
            report.phases.push((phase, outcome));
        }

        Ok((canvas, report))
    }

    fn fonts(&self) -> StoryResult<&FontSet> {
        self.fonts.as_ref().ok_or(StoryError::NoFont)
    }

    fn text_color(&self) -> StoryResult<Rgba<u8>> {
        Ok(self.layout.text_rgba()?)
    }

    fn draw_canvas(&self) -> StoryResult<RgbaImage> {
        let spec = self.layout.gradient_spec()?;
        let (width, height) = (self.layout.canvas.width, self.layout.canvas.height);
        info!(
            width,
            height,
            angle = spec.angle_degrees,
            stops = spec.stops.len(),
            "Drawing gradient background"
        );
        Ok(canvas_from_rgb(spec.rasterize(width, height)?))
    }

    fn draw_map(&self, canvas: &mut RgbaImage) -> StoryResult<()> {
        let path = self
            .assets
            .map_path()
            .ok_or_else(|| StoryError::MissingAsset(self.assets.map_png.clone()))?;

        let map = &self.layout.map;
        let img = load_asset(path, map.width, map.height)?;
        overlay(canvas, &img, map.x, map.y);

        debug!(path = %path.display(), x = map.x, y = map.y, "Map placed");
        Ok(())
    }

    fn draw_header(&self, canvas: &mut RgbaImage, day: &ForecastDay) -> StoryResult<()> {
        let fonts = self.fonts()?;
        let color = self.text_color()?;
        let header = &self.layout.header;
        let width = canvas.width();

        let date = time::display_date(day.date);
        text::draw_centered(
            canvas,
            &fonts.heavy.font,
            header.font_size,
            (width / 2) as i32,
            header.text_y,
            color,
            &date,
        );

        let (x, y, w, h) = separator_rect(width, header);
        fill_rect(canvas, x, y, w, h, color);

        debug!(%date, "Header drawn");
        Ok(())
    }

    fn draw_cities(&self, canvas: &mut RgbaImage, cities: &[CityForecast]) -> StoryResult<()> {
        let fonts = self.fonts()?;
        if cities.is_empty() {
            return Err(StoryError::NothingToDraw("no cities".to_string()));
        }
        let color = self.text_color()?;

        let mut drawn = 0;
        for city in cities {
            let Some(placement) = self.layout.cities.placement_for(&city.name_eng) else {
                warn!(city = %city.name_eng, "No placement for city");
                continue;
            };
            self.draw_city(canvas, fonts, color, city, placement);
            drawn += 1;
        }

        if drawn == 0 {
            return Err(StoryError::NothingToDraw(
                "no city matches a placement".to_string(),
            ));
        }
        info!(drawn, total = cities.len(), "Cities drawn");
        Ok(())
    }

    fn draw_city(
        &self,
        canvas: &mut RgbaImage,
        fonts: &FontSet,
        color: Rgba<u8>,
        city: &CityForecast,
        placement: &CityPlacement,
    ) {
        let c = &self.layout.cities;

        let icon_file = self.layout.icons.icon_for(city.weather_code);
        let icon = match load_asset(&self.assets.icon_path(icon_file), c.icon_size, c.icon_size) {
            Ok(icon) => Some(icon),
            Err(e) => {
                warn!(city = %city.name_eng, icon = icon_file, error = %e, "Weather icon unavailable");
                None
            }
        };

        let temp = city.temperature_label();
        let (name_w, name_h) = text::measure(&fonts.heavy.font, c.name_font_size, &city.name_heb);
        let (temp_w, temp_h) = text::measure(&fonts.semibold.font, c.temp_font_size, &temp);
        let text_w = name_w.max(temp_w) as i64;
        let text_h = name_h as i64 + c.line_spacing + temp_h as i64;

        let anchor = (
            self.layout.map.x + placement.x,
            self.layout.map.y + placement.y,
        );
        let ((icon_x, icon_y), (text_x, text_y)) = arrange(
            placement.layout,
            anchor,
            c.icon_size as i64,
            c.icon_spacing,
            (text_w, text_h),
        );

        if let Some(icon) = &icon {
            overlay(canvas, icon, icon_x, icon_y);
        }

        // Both lines centered within the text block
        text::draw_text(
            canvas,
            &fonts.heavy.font,
            c.name_font_size,
            (text_x + (text_w - name_w as i64) / 2) as i32,
            text_y as i32,
            color,
            &city.name_heb,
        );
        text::draw_text(
            canvas,
            &fonts.semibold.font,
            c.temp_font_size,
            (text_x + (text_w - temp_w as i64) / 2) as i32,
            (text_y + name_h as i64 + c.line_spacing) as i32,
            color,
            &temp,
        );

        debug!(city = %city.name_eng, layout = ?placement.layout, icon_x, icon_y, "City drawn");
    }

    fn draw_description(&self, canvas: &mut RgbaImage, description: Option<&str>) -> StoryResult<()> {
        let fonts = self.fonts()?;
        let body = description
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .ok_or_else(|| StoryError::NothingToDraw("no description".to_string()))?;
        let color = self.text_color()?;

        let d = &self.layout.description;
        let font = &fonts.heavy.font;
        let lines = text::wrap_lines(font, d.font_size, body, d.max_width);
        let center = (canvas.width() / 2) as i32;
        let line_height = d.font_size.ceil() as i32 + d.line_spacing;

        for (i, line) in lines.iter().enumerate() {
            text::draw_centered(canvas, font, d.font_size, center, d.y + i as i32 * line_height, color, line);
        }

        debug!(lines = lines.len(), "Description drawn");
        Ok(())
    }

    fn draw_logos(&self, canvas: &mut RgbaImage) -> StoryResult<()> {
        let logos = &self.layout.logos;
        let mut x = logos.x;
        let mut drawn = 0;

        for path in &self.assets.logos {
            if !path.is_file() {
                warn!(path = %path.display(), "Logo not found");
                continue;
            }
            let logo = resize_to_height(&load_raster(path)?, logos.height);
            overlay(canvas, &logo, x, logos.y);
            x += logo.width() as i64 + logos.spacing;
            drawn += 1;
        }

        if drawn == 0 {
            return Err(match self.assets.logos.first() {
                Some(path) => StoryError::MissingAsset(path.clone()),
                None => StoryError::NothingToDraw("no logos configured".to_string()),
            });
        }
        Ok(())
    }
}
