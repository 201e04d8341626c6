use std::path::{Path, PathBuf};

use image::{DynamicImage, ImageError, ImageReader};
use tracing::info;

use crate::error::{Error, Result};
use crate::types::OutputFormat;

/// A decoded source image. Dropping it releases the pixel buffer.
#[derive(Debug, Clone)]
pub struct SourceImage {
    pub path: PathBuf,
    pub image: DynamicImage,
    /// Codec detected from the file content
    pub format: Option<OutputFormat>,
}

impl SourceImage {
    /// Open and fully decode an image, guessing the codec from its content.
    pub fn open(path: &Path) -> Result<Self> {
        let read_error = |source: ImageError| Error::Read {
            path: path.to_path_buf(),
            source,
        };

        let reader = ImageReader::open(path)
            .map_err(|e| read_error(ImageError::IoError(e)))?
            .with_guessed_format()
            .map_err(|e| read_error(ImageError::IoError(e)))?;
        let format = reader.format().and_then(OutputFormat::from_image_format);
        let image = reader.decode().map_err(read_error)?;

        info!(
            "Opened {:?}: {}x{} ({:?}, {})",
            path,
            image.width(),
            image.height(),
            image.color(),
            format.map(|f| f.to_string()).unwrap_or_else(|| "unknown".to_string())
        );

        Ok(Self {
            path: path.to_path_buf(),
            image,
            format,
        })
    }

    pub fn width(&self) -> u32 {
        self.image.width()
    }

    pub fn height(&self) -> u32 {
        self.image.height()
    }
}
