use image::{DynamicImage, Rgb, RgbImage, Rgba, RgbaImage, imageops};
use tracing::debug;

use crate::core::geometry::smallest_enclosing_frame;
use crate::error::{Error, Result};

/// Largest canvas `expand_to_ratio` will allocate, in pixels (1 GiB as RGBA).
pub const MAX_CANVAS_PIXELS: u64 = 1 << 28;

/// Grow `image` to `ratio` by centering it on a `background` canvas.
///
/// Sources with alpha get an RGBA canvas that keeps the background's alpha;
/// opaque sources get an RGB canvas. A canvas over [`MAX_CANVAS_PIXELS`] is
/// rejected with `Error::ImageTooLarge` before anything is allocated.
pub fn expand_to_ratio(image: &DynamicImage, ratio: f64, background: Rgba<u8>) -> Result<DynamicImage> {
    let (width, height) = (image.width(), image.height());
    let canvas = smallest_enclosing_frame(width, height, ratio);
    if canvas.area() > MAX_CANVAS_PIXELS {
        return Err(Error::ImageTooLarge {
            width: canvas.width,
            height: canvas.height,
            format: "expand canvas",
        });
    }
    let pad_left = (canvas.width - width) / 2;
    let pad_top = (canvas.height - height) / 2;

    debug!(
        "expand_to_ratio: {}x{} -> {} at ({}, {})",
        width, height, canvas, pad_left, pad_top
    );

    let expanded = if image.color().has_alpha() {
        let mut expanded = RgbaImage::from_pixel(canvas.width, canvas.height, background);
        imageops::replace(&mut expanded, &image.to_rgba8(), pad_left as i64, pad_top as i64);
        DynamicImage::ImageRgba8(expanded)
    } else {
        let [r, g, b, _] = background.0;
        let mut expanded = RgbImage::from_pixel(canvas.width, canvas.height, Rgb([r, g, b]));
        imageops::replace(&mut expanded, &image.to_rgb8(), pad_left as i64, pad_top as i64);
        DynamicImage::ImageRgb8(expanded)
    };
    Ok(expanded)
}
