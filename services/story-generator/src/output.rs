//! Writing the finished story to disk.

use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

use image::codecs::jpeg::JpegEncoder;
use image::{DynamicImage, RgbaImage};
use tracing::{info, instrument};

use crate::error::{StoryError, StoryResult};

const JPEG_QUALITY: u8 = 95;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Png,
    Jpeg,
}

impl OutputFormat {
    /// Pick the format from the file extension, case-insensitively.
    pub fn from_path(path: &Path) -> StoryResult<Self> {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or_default()
            .to_ascii_lowercase();

        match ext.as_str() {
            "png" => Ok(OutputFormat::Png),
            "jpg" | "jpeg" => Ok(OutputFormat::Jpeg),
            _ => Err(StoryError::UnsupportedFormat(ext)),
        }
    }
}

/// Save `image` as PNG or JPEG depending on the extension of `path`,
/// creating parent directories. JPEG drops the alpha channel.
#[instrument(skip(image), fields(path = %path.display()))]
pub fn save_image(image: &RgbaImage, path: &Path) -> StoryResult<()> {
    let format = OutputFormat::from_path(path)?;

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)?;
    }

    match format {
        OutputFormat::Png => {
            let bytes = renderer::png::encode_png(image)?;
            std::fs::write(path, bytes)?;
        }
        OutputFormat::Jpeg => {
            let rgb = DynamicImage::ImageRgba8(image.clone()).to_rgb8();
            let mut writer = BufWriter::new(File::create(path)?);
            JpegEncoder::new_with_quality(&mut writer, JPEG_QUALITY).encode_image(&rgb)?;
        }
    }

    info!(?format, width = image.width(), height = image.height(), "Image saved");
    Ok(())
}
