//! Shared types and enums used across stepcrop.
//! Includes `OutputFormat`, `ErrorPolicy`, and aspect-ratio parsing.
use std::path::Path;

use clap::ValueEnum;
use image::ImageFormat;
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

#[derive(
    Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, ValueEnum, Serialize, Deserialize,
)]
pub enum OutputFormat {
    #[value(alias = "jpg")]
    Jpeg, // Lossy, alpha is dropped
    Png,
    Bmp,
    #[value(alias = "tif")]
    Tiff,
    Webp, // Lossless
}

impl OutputFormat {
    /// Detect a format from a file extension, case-insensitively.
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext.to_ascii_lowercase().as_str() {
            "jpg" | "jpeg" => Some(OutputFormat::Jpeg),
            "png" => Some(OutputFormat::Png),
            "bmp" => Some(OutputFormat::Bmp),
            "tif" | "tiff" => Some(OutputFormat::Tiff),
            "webp" => Some(OutputFormat::Webp),
            _ => None,
        }
    }

    pub fn from_path(path: &Path) -> Option<Self> {
        path.extension()
            .and_then(|e| e.to_str())
            .and_then(Self::from_extension)
    }

    /// Canonical extension (without dot) used when a format is requested explicitly.
    pub fn extension(&self) -> &'static str {
        match self {
            OutputFormat::Jpeg => "jpg",
            OutputFormat::Png => "png",
            OutputFormat::Bmp => "bmp",
            OutputFormat::Tiff => "tiff",
            OutputFormat::Webp => "webp",
        }
    }

    pub fn image_format(&self) -> ImageFormat {
        match self {
            OutputFormat::Jpeg => ImageFormat::Jpeg,
            OutputFormat::Png => ImageFormat::Png,
            OutputFormat::Bmp => ImageFormat::Bmp,
            OutputFormat::Tiff => ImageFormat::Tiff,
            OutputFormat::Webp => ImageFormat::WebP,
        }
    }

    pub fn from_image_format(format: ImageFormat) -> Option<Self> {
        match format {
            ImageFormat::Jpeg => Some(OutputFormat::Jpeg),
            ImageFormat::Png => Some(OutputFormat::Png),
            ImageFormat::Bmp => Some(OutputFormat::Bmp),
            ImageFormat::Tiff => Some(OutputFormat::Tiff),
            ImageFormat::WebP => Some(OutputFormat::Webp),
            _ => None,
        }
    }
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            OutputFormat::Jpeg => "JPEG",
            OutputFormat::Png => "PNG",
            OutputFormat::Bmp => "BMP",
            OutputFormat::Tiff => "TIFF",
            OutputFormat::Webp => "WebP",
        };
        write!(f, "{}", s)
    }
}

/// What to do when a single frame or file fails to save.
#[derive(
    Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Debug, Default, ValueEnum, Serialize, Deserialize,
)]
pub enum ErrorPolicy {
    /// Stop at the first failure and return it. Files already written stay on disk.
    #[default]
    Abort,
    /// Record the failure and keep going.
    Continue,
}

impl std::fmt::Display for ErrorPolicy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ErrorPolicy::Abort => write!(f, "abort"),
            ErrorPolicy::Continue => write!(f, "continue"),
        }
    }
}

/// Parse an aspect ratio written as `16/9`, `16:9` or a plain decimal like `1.5`.
pub fn parse_ratio(text: &str) -> Result<f64> {
    let trimmed = text.trim();
    let invalid = || Error::invalid_argument("aspect_ratio", trimmed);

    let value = match trimmed.split_once(['/', ':']) {
        Some((num, den)) => {
            let num: f64 = num.trim().parse().map_err(|_| invalid())?;
            let den: f64 = den.trim().parse().map_err(|_| invalid())?;
            if den == 0.0 {
                return Err(invalid());
            }
            num / den
        }
        None => trimmed.parse().map_err(|_| invalid())?,
    };

    if !value.is_finite() || value <= 0.0 {
        return Err(invalid());
    }
    Ok(value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_fraction_colon_and_decimal() {
        assert_eq!(parse_ratio("16/9").unwrap(), 16.0 / 9.0);
        assert_eq!(parse_ratio(" 4:3 ").unwrap(), 4.0 / 3.0);
        assert_eq!(parse_ratio("1.5").unwrap(), 1.5);
        assert_eq!(parse_ratio("1").unwrap(), 1.0);
    }

    #[test]
    fn rejects_degenerate_ratios() {
        for bad in ["0", "-1", "3/0", "abc", "1/x", "", "inf"] {
            assert!(parse_ratio(bad).is_err(), "{bad:?} should be rejected");
        }
    }

    #[test]
    fn extension_detection_is_case_insensitive() {
        assert_eq!(OutputFormat::from_extension("JPG"), Some(OutputFormat::Jpeg));
        assert_eq!(OutputFormat::from_extension("jpeg"), Some(OutputFormat::Jpeg));
        assert_eq!(OutputFormat::from_extension("TIF"), Some(OutputFormat::Tiff));
        assert_eq!(OutputFormat::from_extension("gif"), None);
        assert_eq!(
            OutputFormat::from_path(Path::new("/a/b/Photo.WebP")),
            Some(OutputFormat::Webp)
        );
    }
}
