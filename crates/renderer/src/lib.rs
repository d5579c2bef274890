//! Image rendering for the daily forecast story.
//!
//! - [`gradient`]: arbitrary-angle linear-gradient background
//! - [`compose`]: asset loading and alpha compositing
//! - [`text`]: font loading and Hebrew-aware text drawing
//! - [`layout`]: positions, sizes and colors of every story element
//! - [`png`]: PNG encoding

pub mod compose;
pub mod error;
pub mod gradient;
pub mod layout;
pub mod png;
pub mod text;

pub use error::{RenderError, RenderResult};
pub use gradient::{interpolate, rasterize, ColorStop, GradientAxis, GradientSpec};
pub use layout::{hex_to_rgb, CityLayout, CityPlacement, IconTable, LayoutConfig};
pub use text::{visual_order, FontSet, LoadedFont};
