use std::borrow::Cow;

use image::{ColorType, DynamicImage};

use crate::types::OutputFormat;

/// Bring `image` into a pixel layout the encoder for `format` accepts.
///
/// JPEG has no alpha channel, so alpha is dropped (grayscale stays grayscale).
/// BMP and WebP get 8-bit RGB or RGBA. TIFF widens gray+alpha to RGBA.
/// PNG keeps the layout as is.
pub fn prepare_for_format(image: &DynamicImage, format: OutputFormat) -> Cow<'_, DynamicImage> {
    let color = image.color();
    match format {
        OutputFormat::Jpeg => match color {
            ColorType::L8 | ColorType::Rgb8 => Cow::Borrowed(image),
            ColorType::La8 | ColorType::L16 | ColorType::La16 => {
                Cow::Owned(DynamicImage::ImageLuma8(image.to_luma8()))
            }
            _ => Cow::Owned(DynamicImage::ImageRgb8(image.to_rgb8())),
        },
        OutputFormat::Bmp | OutputFormat::Webp => match color {
            ColorType::Rgb8 | ColorType::Rgba8 => Cow::Borrowed(image),
            c if c.has_alpha() => Cow::Owned(DynamicImage::ImageRgba8(image.to_rgba8())),
            _ => Cow::Owned(DynamicImage::ImageRgb8(image.to_rgb8())),
        },
        // The TIFF encoder has no gray+alpha layout.
        OutputFormat::Tiff => match color {
            ColorType::La8 => Cow::Owned(DynamicImage::ImageRgba8(image.to_rgba8())),
            ColorType::La16 => Cow::Owned(DynamicImage::ImageRgba16(image.to_rgba16())),
            _ => Cow::Borrowed(image),
        },
        OutputFormat::Png => Cow::Borrowed(image),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{GrayAlphaImage, LumaA, Rgba, RgbaImage};

    #[test]
    fn jpeg_drops_alpha() {
        let img = DynamicImage::ImageRgba8(RgbaImage::from_pixel(2, 2, Rgba([1, 2, 3, 4])));
        let prepared = prepare_for_format(&img, OutputFormat::Jpeg);
        assert_eq!(prepared.color(), ColorType::Rgb8);
    }

    #[test]
    fn jpeg_keeps_grayscale() {
        let img = DynamicImage::ImageLumaA8(GrayAlphaImage::from_pixel(2, 2, LumaA([7, 255])));
        let prepared = prepare_for_format(&img, OutputFormat::Jpeg);
        assert_eq!(prepared.color(), ColorType::L8);
    }

    #[test]
    fn tiff_widens_gray_alpha() {
        let img = DynamicImage::ImageLumaA8(GrayAlphaImage::from_pixel(2, 2, LumaA([7, 128])));
        let prepared = prepare_for_format(&img, OutputFormat::Tiff);
        assert_eq!(prepared.color(), ColorType::Rgba8);
    }

    #[test]
    fn png_is_untouched() {
        let img = DynamicImage::ImageRgba8(RgbaImage::new(1, 1));
        assert!(matches!(
            prepare_for_format(&img, OutputFormat::Png),
            Cow::Borrowed(_)
        ));
    }
}
