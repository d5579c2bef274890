//! Story layout configuration.
//!
//! Every value has a default matching the 1080×1920 story design, so a YAML
//! override file only needs to name what it changes:
//!
//! ```yaml
//! gradient:
//!   angle: 180
//! header:
//!   font_size: 40
//! ```

use std::collections::BTreeMap;
use std::path::Path;

use image::Rgba;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::error::{RenderError, RenderResult};
use crate::gradient::{ColorStop, GradientSpec};

/// Parse hex color string to RGB
pub fn hex_to_rgb(hex: &str) -> Option<(u8, u8, u8)> {
    let hex = hex.trim().trim_start_matches('#');
    if hex.len() != 6 || !hex.is_ascii() {
        return None;
    }

    let r = u8::from_str_radix(&hex[0..2], 16).ok()?;
    let g = u8::from_str_radix(&hex[2..4], 16).ok()?;
    let b = u8::from_str_radix(&hex[4..6], 16).ok()?;

    Some((r, g, b))
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LayoutConfig {
    pub canvas: CanvasLayout,
    pub gradient: GradientLayout,
    /// Color of all text and the header separator.
    pub text_color: String,
    pub header: HeaderLayout,
    pub map: MapLayout,
    pub cities: CitiesLayout,
    pub description: DescriptionLayout,
    pub logos: LogosLayout,
    pub icons: IconTable,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            canvas: CanvasLayout::default(),
            gradient: GradientLayout::default(),
            text_color: "#FFFFFF".to_string(),
            header: HeaderLayout::default(),
            map: MapLayout::default(),
            cities: CitiesLayout::default(),
            description: DescriptionLayout::default(),
            logos: LogosLayout::default(),
            icons: IconTable::default(),
        }
    }
}

impl LayoutConfig {
    pub fn from_yaml_str(yaml: &str) -> RenderResult<Self> {
        serde_yaml::from_str(yaml).map_err(|e| RenderError::Config(e.to_string()))
    }

    /// Load overrides from a YAML file; missing keys keep their defaults.
    pub fn from_yaml_file(path: &Path) -> RenderResult<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Self = serde_yaml::from_str(&content)
            .map_err(|e| RenderError::Config(format!("{}: {}", path.display(), e)))?;
        info!(path = %path.display(), "Loaded layout configuration");
        Ok(config)
    }

    /// Gradient with colors parsed and checked.
    pub fn gradient_spec(&self) -> RenderResult<GradientSpec> {
        let stops = self
            .gradient
            .stops
            .iter()
            .map(|stop| {
                hex_to_rgb(&stop.color)
                    .map(|rgb| ColorStop::new(rgb, stop.position))
                    .ok_or_else(|| {
                        RenderError::Config(format!("invalid gradient color '{}'", stop.color))
                    })
            })
            .collect::<RenderResult<Vec<_>>>()?;

        debug!(angle = self.gradient.angle, stops = stops.len(), "Built gradient spec");
        Ok(GradientSpec::new(self.gradient.angle, stops))
    }

    pub fn text_rgba(&self) -> RenderResult<Rgba<u8>> {
        let (r, g, b) = hex_to_rgb(&self.text_color)
            .ok_or_else(|| RenderError::Config(format!("invalid text color '{}'", self.text_color)))?;
        Ok(Rgba([r, g, b, 255]))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CanvasLayout {
    pub width: u32,
    pub height: u32,
}

impl Default for CanvasLayout {
    fn default() -> Self {
        Self {
            width: 1080,
            height: 1920,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StopConfig {
    pub color: String,
    pub position: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GradientLayout {
    /// CSS-style angle in degrees.
    pub angle: f64,
    pub stops: Vec<StopConfig>,
}

impl Default for GradientLayout {
    fn default() -> Self {
        Self {
            angle: 346.0,
            stops: vec![
                StopConfig {
                    color: "#DCFF57".to_string(),
                    position: -62.6,
                },
                StopConfig {
                    color: "#22B2FF".to_string(),
                    position: 112.14,
                },
            ],
        }
    }
}

/// Date line and the separator bar under it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HeaderLayout {
    pub text_y: i32,
    pub font_size: f32,
    /// Top row of the separator. The bar spans `separator_y..=separator_y + separator_height`.
    pub separator_y: i32,
    pub separator_height: u32,
    /// Horizontal inset of the separator; both end columns are painted.
    pub padding: u32,
}

impl Default for HeaderLayout {
    fn default() -> Self {
        Self {
            text_y: 57,
            font_size: 36.0,
            separator_y: 135,
            separator_height: 7,
            padding: 100,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MapLayout {
    pub x: i64,
    pub y: i64,
    pub width: u32,
    pub height: u32,
}

impl Default for MapLayout {
    fn default() -> Self {
        Self {
            x: 258,
            y: 288,
            width: 533,
            height: 1495,
        }
    }
}

/// How a city's icon and text blocks are arranged around its anchor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CityLayout {
    /// Icon on the left, text to its right.
    Rtl,
    /// Icon on top, text centered below.
    Ttb,
    /// Text on the left, icon to its right.
    Ltr,
}

/// Anchor of one city, relative to the map's top-left corner.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CityPlacement {
    pub name: String,
    pub x: i64,
    pub y: i64,
    pub layout: CityLayout,
    #[serde(default)]
    pub aliases: Vec<String>,
}

impl CityPlacement {
    fn new(name: &str, x: i64, y: i64, layout: CityLayout, aliases: &[&str]) -> Self {
        Self {
            name: name.to_string(),
            x,
            y,
            layout,
            aliases: aliases.iter().map(|a| a.to_string()).collect(),
        }
    }

    /// Case-insensitive match against a feed name such as `Tel Aviv - Yafo`.
    pub fn matches(&self, name_eng: &str) -> bool {
        let name_eng = name_eng.trim();
        let short = name_eng.split(" - ").next().unwrap_or(name_eng).trim();

        std::iter::once(&self.name)
            .chain(self.aliases.iter())
            .any(|candidate| {
                candidate.eq_ignore_ascii_case(name_eng) || candidate.eq_ignore_ascii_case(short)
            })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CitiesLayout {
    pub icon_size: u32,
    /// Gap between the icon and the text block.
    pub icon_spacing: i64,
    /// Gap between the name line and the temperature line.
    pub line_spacing: i64,
    pub name_font_size: f32,
    pub temp_font_size: f32,
    pub placements: Vec<CityPlacement>,
}

impl CitiesLayout {
    pub fn placement_for(&self, name_eng: &str) -> Option<&CityPlacement> {
        self.placements.iter().find(|p| p.matches(name_eng))
    }
}

impl Default for CitiesLayout {
    fn default() -> Self {
        use CityLayout::*;
        Self {
            icon_size: 50,
            icon_spacing: 16,
            line_spacing: 4,
            name_font_size: 24.0,
            temp_font_size: 20.0,
            placements: vec![
                CityPlacement::new("Zefat", 335, 19, Rtl, &["Safed", "Tzfat"]),
                CityPlacement::new("Nazareth", 424, 180, Rtl, &[]),
                CityPlacement::new("Katzrin", 681, 170, Ttb, &["Qazrin"]),
                CityPlacement::new("Tiberias", 588, 331, Rtl, &[]),
                CityPlacement::new("Haifa", 159, 224, Rtl, &[]),
                CityPlacement::new("Afula", 424, 289, Ttb, &[]),
                CityPlacement::new("Tel Aviv", 99, 421, Rtl, &["Tel Aviv-Yafo"]),
                CityPlacement::new("Lod", 337, 457, Ttb, &[]),
                CityPlacement::new("Beit Shean", 574, 490, Ttb, &["Bet Shean"]),
                CityPlacement::new("Ashdod", 75, 567, Rtl, &[]),
                CityPlacement::new("Jerusalem", 328, 623, Rtl, &[]),
                CityPlacement::new("Ein Gedi", 571, 702, Ltr, &["En Gedi"]),
                CityPlacement::new("Beer Sheva", 300, 738, Ttb, &["Beersheba", "Be'er Sheva"]),
                CityPlacement::new("Mitzpe Ramon", 265, 981, Ttb, &[]),
                CityPlacement::new("Eilat", 315, 1260, Ttb, &[]),
            ],
        }
    }
}

/// Country-wide forecast text block.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DescriptionLayout {
    pub y: i32,
    pub font_size: f32,
    pub max_width: u32,
    pub line_spacing: i32,
}

impl Default for DescriptionLayout {
    fn default() -> Self {
        Self {
            y: 170,
            font_size: 28.0,
            max_width: 880,
            line_spacing: 8,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LogosLayout {
    pub x: i64,
    pub y: i64,
    pub height: u32,
    pub spacing: i64,
}

impl Default for LogosLayout {
    fn default() -> Self {
        Self {
            x: 633,
            y: 1709,
            height: 60,
            spacing: 20,
        }
    }
}

/// IMS weather code to icon file name.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct IconTable {
    pub codes: BTreeMap<u32, String>,
    pub default_icon: String,
}

impl IconTable {
    pub fn icon_for(&self, code: u32) -> &str {
        self.codes
            .get(&code)
            .map(String::as_str)
            .unwrap_or(self.default_icon.as_str())
    }
}

impl Default for IconTable {
    fn default() -> Self {
        let codes = [
            (1250, "clear.png"),
            (1220, "partly_cloudy.png"),
            (1230, "cloudy.png"),
            (1260, "mostly_clear.png"),
            (1270, "mostly_cloudy.png"),
            (1530, "partly_cloudy_rain.png"),
            (1140, "rainy.png"),
            (1540, "heavy_rain.png"),
            (1020, "thunderstorm.png"),
            (1010, "thunderstorm_dry.png"),
            (1060, "snow.png"),
            (1300, "frost.png"),
            (1160, "cloudy.png"),
            (1580, "very_hot.png"),
            (1590, "hot.png"),
            (1570, "windy.png"),
        ]
        .into_iter()
        .map(|(code, icon)| (code, icon.to_string()))
        .collect();

        Self {
            codes,
            default_icon: "clear.png".to_string(),
        }
    }
}
