//! Error types for story generation.

use std::path::PathBuf;

use ims_parser::ParseError;
use renderer::RenderError;
use thiserror::Error;

pub type StoryResult<T> = Result<T, StoryError>;

#[derive(Debug, Error)]
pub enum StoryError {
    #[error("Cannot read feed {}: {source}", path.display())]
    Feed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Feed parsing failed: {0}")]
    Parse(#[from] ParseError),

    #[error("Render error: {0}")]
    Render(#[from] RenderError),

    #[error("Asset not found: {}", .0.display())]
    MissingAsset(PathBuf),

    #[error("No usable font loaded")]
    NoFont,

    #[error("Nothing to draw: {0}")]
    NothingToDraw(String),

    #[error("Unsupported output format '{0}', expected .png, .jpg or .jpeg")]
    UnsupportedFormat(String),

    #[error("Image encoding failed: {0}")]
    Encode(#[from] image::ImageError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl StoryError {
    /// Missing inputs skip a phase; anything else is a failure.
    pub fn is_skip(&self) -> bool {
        matches!(
            self,
            StoryError::MissingAsset(_) | StoryError::NoFont | StoryError::NothingToDraw(_)
        )
    }
}
