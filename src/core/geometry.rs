//! Frame geometry shared by the crop, expand and series tools: fitting the largest
//! centered frame of a given aspect ratio, centering offsets, and area ratios.
use serde::{Deserialize, Serialize};

/// A width x height rectangle in pixels. Position is always derived by centering.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
pub struct CropFrame {
    pub width: u32,
    pub height: u32,
}

impl CropFrame {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    pub fn area(&self) -> u64 {
        self.width as u64 * self.height as u64
    }

    /// Top-left corner that centers this frame inside a `source_w` x `source_h` image.
    /// Uses floor division, so odd margins put the extra pixel on the right/bottom.
    pub fn centered_in(&self, source_w: u32, source_h: u32) -> (u32, u32) {
        (
            source_w.saturating_sub(self.width) / 2,
            source_h.saturating_sub(self.height) / 2,
        )
    }
}

impl std::fmt::Display for CropFrame {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}x{}", self.width, self.height)
    }
}

/// Round half to even, matching the rounding used for frame sizes everywhere.
pub fn round_half_even(value: f64) -> f64 {
    value.round_ties_even()
}

/// Round to five decimal places, the precision carried by area ratios.
///
/// Rounds the exact decimal expansion of `value`; scaling by 1e5 first can
/// manufacture a tie that breaks the wrong way.
pub fn round_ratio(value: f64) -> f64 {
    format!("{:.5}", value).parse().unwrap_or(value)
}

/// Largest frame of `aspect_ratio` that fits inside `width` x `height`.
///
/// A source wider than the target keeps its height; otherwise it keeps its width.
/// The derived side is rounded, and never exceeds the source.
pub fn largest_centered_frame(width: u32, height: u32, aspect_ratio: f64) -> CropFrame {
    let (w, h) = (width as f64, height as f64);
    if w / h > aspect_ratio {
        let fitted = round_half_even(h * aspect_ratio).clamp(0.0, w);
        CropFrame::new(fitted as u32, height)
    } else {
        let fitted = round_half_even(w / aspect_ratio).clamp(0.0, h);
        CropFrame::new(width, fitted as u32)
    }
}

/// Smallest canvas of `aspect_ratio` that contains the whole `width` x `height` source.
pub fn smallest_enclosing_frame(width: u32, height: u32, aspect_ratio: f64) -> CropFrame {
    let (w, h) = (width as f64, height as f64);
    if w / h > aspect_ratio {
        let grown = round_half_even(w / aspect_ratio).max(h);
        CropFrame::new(width, grown.min(u32::MAX as f64) as u32)
    } else {
        let grown = round_half_even(h * aspect_ratio).max(w);
        CropFrame::new(grown.min(u32::MAX as f64) as u32, height)
    }
}

/// Area of `frame` relative to `reference`, rounded to five decimals.
/// A degenerate reference yields 0.0 so limit checks reject it.
pub fn area_ratio(frame_w: i64, frame_h: i64, reference: CropFrame) -> f64 {
    let reference_area = reference.area();
    if reference_area == 0 {
        return 0.0;
    }
    round_ratio((frame_w * frame_h) as f64 / reference_area as f64)
}

/// Render an area ratio the way it appears in file names: shortest round-trip
/// decimal with at least one fractional digit (`1.0`, `0.5`, `0.98765`).
pub fn format_area_ratio(ratio: f64) -> String {
    if ratio.fract() == 0.0 {
        format!("{:.1}", ratio)
    } else {
        format!("{}", ratio)
    }
}
