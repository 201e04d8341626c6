use serde::{Deserialize, Serialize};

use crate::core::color::Color;
use crate::error::{Error, Result};
use crate::types::{ErrorPolicy, OutputFormat};

pub const DEFAULT_JPEG_QUALITY: u8 = 95;

/// Stepwise crop series parameters suitable for config files and presets
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SeriesParams {
    /// Width decrement per step, in pixels
    pub step_pixels: u32,
    /// Target width / height of every frame
    pub aspect_ratio: f64,
    /// Smallest allowed area (and side) relative to the initial frame, in (0, 1]
    pub min_size_ratio: f64,
    /// Smallest allowed width and height in pixels
    pub min_pixel_limit: u32,
    pub on_error: ErrorPolicy,
    pub jpeg_quality: u8,
    /// If true, write a JSON run report next to the generated frames
    pub write_report: bool,
}

impl Default for SeriesParams {
    fn default() -> Self {
        Self {
            step_pixels: 20,
            aspect_ratio: 1.0,
            min_size_ratio: 0.1,
            min_pixel_limit: 100,
            on_error: ErrorPolicy::Abort,
            jpeg_quality: DEFAULT_JPEG_QUALITY,
            write_report: false,
        }
    }
}

impl SeriesParams {
    pub fn new(step_pixels: u32, aspect_ratio: f64) -> Self {
        Self {
            step_pixels,
            aspect_ratio,
            ..Default::default()
        }
    }

    /// Reject parameters that would make the series meaningless or non-terminating.
    pub fn validate(&self) -> Result<()> {
        if self.step_pixels == 0 {
            return Err(Error::invalid_argument("step_pixels", self.step_pixels));
        }
        validate_ratio(self.aspect_ratio)?;
        if !(self.min_size_ratio > 0.0 && self.min_size_ratio <= 1.0) {
            return Err(Error::invalid_argument(
                "min_size_ratio",
                self.min_size_ratio,
            ));
        }
        if self.min_pixel_limit == 0 {
            return Err(Error::invalid_argument(
                "min_pixel_limit",
                self.min_pixel_limit,
            ));
        }
        validate_jpeg_quality(self.jpeg_quality)
    }
}

/// Batch crop-to-ratio parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BatchCropParams {
    /// Target ratio; None keeps each image's own ratio (format conversion only)
    pub aspect_ratio: Option<f64>,
    /// Output format; None keeps each source's format and extension
    pub format: Option<OutputFormat>,
    pub on_error: ErrorPolicy,
    pub jpeg_quality: u8,
}

impl Default for BatchCropParams {
    fn default() -> Self {
        Self {
            aspect_ratio: None,
            format: None,
            on_error: ErrorPolicy::Continue,
            jpeg_quality: DEFAULT_JPEG_QUALITY,
        }
    }
}

impl BatchCropParams {
    pub fn validate(&self) -> Result<()> {
        if let Some(ratio) = self.aspect_ratio {
            validate_ratio(ratio)?;
        }
        validate_jpeg_quality(self.jpeg_quality)
    }
}

/// Batch expand-to-ratio parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BatchExpandParams {
    pub aspect_ratio: f64,
    pub background: Color,
    pub format: Option<OutputFormat>,
    pub on_error: ErrorPolicy,
    pub jpeg_quality: u8,
}

impl Default for BatchExpandParams {
    fn default() -> Self {
        Self {
            aspect_ratio: 1.0,
            background: Color::Rgb(255, 255, 255),
            format: None,
            on_error: ErrorPolicy::Continue,
            jpeg_quality: DEFAULT_JPEG_QUALITY,
        }
    }
}

impl BatchExpandParams {
    pub fn validate(&self) -> Result<()> {
        validate_ratio(self.aspect_ratio)?;
        self.background.resolve()?;
        validate_jpeg_quality(self.jpeg_quality)
    }
}

fn validate_ratio(ratio: f64) -> Result<()> {
    if !ratio.is_finite() || ratio <= 0.0 {
        return Err(Error::invalid_argument("aspect_ratio", ratio));
    }
    Ok(())
}

fn validate_jpeg_quality(quality: u8) -> Result<()> {
    if !(1..=100).contains(&quality) {
        return Err(Error::invalid_argument("jpeg_quality", quality));
    }
    Ok(())
}
