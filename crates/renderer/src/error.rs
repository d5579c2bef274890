//! Error types for rendering operations.

use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur while building the story image.
#[derive(Error, Debug)]
pub enum RenderError {
    /// Caller supplied dimensions, stops or buffers that cannot be rendered.
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("No usable font among: {}", format_paths(.tried))]
    FontUnavailable { tried: Vec<PathBuf> },

    #[error("Image error for {path}: {source}")]
    Image {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    #[error("SVG error for {path}: {message}")]
    Svg { path: PathBuf, message: String },

    #[error("Invalid layout configuration: {0}")]
    Config(String),

    #[error("PNG encoding failed: {0}")]
    Encode(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

fn format_paths(paths: &[PathBuf]) -> String {
    if paths.is_empty() {
        return "(no candidates)".to_string();
    }
    paths
        .iter()
        .map(|p| p.display().to_string())
        .collect::<Vec<_>>()
        .join(", ")
}

/// Result type alias for rendering operations.
pub type RenderResult<T> = Result<T, RenderError>;
