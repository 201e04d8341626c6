use image::DynamicImage;
use tracing::debug;

use crate::core::geometry::{CropFrame, largest_centered_frame};
use crate::core::series::SeriesItem;

/// Crop the largest centered region of `ratio` out of `image`.
/// `None` returns the image unchanged.
pub fn crop_to_ratio(image: &DynamicImage, ratio: Option<f64>) -> DynamicImage {
    let Some(ratio) = ratio else {
        return image.clone();
    };

    let (width, height) = (image.width(), image.height());
    let frame = largest_centered_frame(width, height, ratio);
    let (left, top) = frame.centered_in(width, height);
    debug!(
        "crop_to_ratio: {}x{} -> {} at ({}, {})",
        width, height, frame, left, top
    );
    crop_region(image, left, top, frame)
}

/// Crop one frame of a stepwise series.
pub fn crop_series_item(image: &DynamicImage, item: &SeriesItem) -> DynamicImage {
    crop_region(image, item.left, item.top, item.frame)
}

pub fn crop_region(image: &DynamicImage, left: u32, top: u32, frame: CropFrame) -> DynamicImage {
    image.crop_imm(left, top, frame.width.max(1), frame.height.max(1))
}
