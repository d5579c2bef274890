//! Daily forecast story generation.
//!
//! Reads the converted feeds saved by the downloader, builds a
//! [`ForecastDay`](forecast_common::ForecastDay) and draws it onto a
//! 1080×1920 story canvas:
//!
//! 1. gradient background
//! 2. map
//! 3. header (date and separator)
//! 4. cities (icon, name, temperature range)
//! 5. country-wide description
//! 6. logos
//!
//! Only the background is required. Every later phase logs and moves on
//! when an asset or font is missing, and its outcome is recorded in a
//! [`RenderReport`].

pub mod assets;
pub mod error;
pub mod forecast;
pub mod output;
pub mod story;

pub use assets::AssetPaths;
pub use error::{StoryError, StoryResult};
pub use forecast::load_forecast_day;
pub use output::{save_image, OutputFormat};
pub use story::{Phase, PhaseOutcome, RenderReport, StoryRenderer};
