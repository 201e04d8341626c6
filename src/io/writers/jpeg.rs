use image::DynamicImage;
use jpeg_encoder::{ColorType, Encoder};

use crate::error::{Error, Result};

/// Encode an 8-bit grayscale or RGB image to JPEG bytes.
/// Callers prepare the layout first (see `core::processing::prepare_for_format`).
pub fn encode_jpeg(image: &DynamicImage, quality: u8) -> Result<Vec<u8>> {
    let (width, height) = (image.width(), image.height());
    let too_large = || Error::ImageTooLarge {
        width,
        height,
        format: "JPEG",
    };
    let cols = u16::try_from(width).map_err(|_| too_large())?;
    let rows = u16::try_from(height).map_err(|_| too_large())?;

    let mut buffer = Vec::new();
    let encoder = Encoder::new(&mut buffer, quality);
    match image {
        DynamicImage::ImageLuma8(gray) => {
            encoder.encode(gray.as_raw(), cols, rows, ColorType::Luma)?
        }
        other => {
            let rgb = other.to_rgb8();
            encoder.encode(rgb.as_raw(), cols, rows, ColorType::Rgb)?
        }
    }
    Ok(buffer)
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{GrayImage, Luma, Rgb, RgbImage};

    #[test]
    fn encodes_rgb_and_gray() {
        let rgb = DynamicImage::ImageRgb8(RgbImage::from_pixel(16, 8, Rgb([200, 10, 10])));
        let bytes = encode_jpeg(&rgb, 90).unwrap();
        assert_eq!(&bytes[..2], &[0xFF, 0xD8]);
        let decoded = image::load_from_memory(&bytes).unwrap();
        assert_eq!((decoded.width(), decoded.height()), (16, 8));

        let gray = DynamicImage::ImageLuma8(GrayImage::from_pixel(5, 7, Luma([128])));
        let decoded = image::load_from_memory(&encode_jpeg(&gray, 90).unwrap()).unwrap();
        assert_eq!((decoded.width(), decoded.height()), (5, 7));
    }

    #[test]
    fn rejects_frames_beyond_the_encoder_limit() {
        let wide = DynamicImage::ImageLuma8(GrayImage::new(70_000, 1));
        assert!(matches!(
            encode_jpeg(&wide, 90),
            Err(Error::ImageTooLarge { width: 70_000, .. })
        ));
    }
}
