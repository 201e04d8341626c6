use std::fs;
use std::io::Cursor;
use std::path::Path;

use image::DynamicImage;
use tracing::debug;

use crate::core::processing::prepare_for_format;
use crate::error::Result;
use crate::io::writers::jpeg::encode_jpeg;
use crate::types::OutputFormat;

/// Encode `image` as `format` in memory. JPEG goes through `jpeg-encoder` at
/// `jpeg_quality`; the other formats use the `image` codecs.
pub fn convert_format(image: &DynamicImage, format: OutputFormat, jpeg_quality: u8) -> Result<Vec<u8>> {
    let prepared = prepare_for_format(image, format);
    match format {
        OutputFormat::Jpeg => encode_jpeg(&prepared, jpeg_quality),
        other => {
            let mut cursor = Cursor::new(Vec::new());
            prepared.write_to(&mut cursor, other.image_format())?;
            Ok(cursor.into_inner())
        }
    }
}

/// Encode and write `image` to `output` in one blocking write.
pub fn save_image(
    image: &DynamicImage,
    output: &Path,
    format: OutputFormat,
    jpeg_quality: u8,
) -> Result<()> {
    let bytes = convert_format(image, format, jpeg_quality)?;
    fs::write(output, &bytes)?;
    debug!("save_image: {} {} bytes -> {:?}", format, bytes.len(), output);
    Ok(())
}
