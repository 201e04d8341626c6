#![allow(dead_code)]

use std::path::{Path, PathBuf};

use image::{DynamicImage, ImageFormat, Rgb, RgbImage};

/// Gradient whose red and green channels encode the pixel's x and y (modulo 256),
/// so a crop's origin can be read back from its first pixel.
pub fn coordinate_image(width: u32, height: u32) -> DynamicImage {
    let img = RgbImage::from_fn(width, height, |x, y| Rgb([x as u8, y as u8, 0]));
    DynamicImage::ImageRgb8(img)
}

/// Write a synthetic image into `dir` and return its path.
pub fn write_image(dir: &Path, name: &str, width: u32, height: u32, format: ImageFormat) -> PathBuf {
    let path = dir.join(name);
    coordinate_image(width, height)
        .save_with_format(&path, format)
        .expect("write synthetic image");
    path
}

/// Sorted file names directly inside `dir`.
pub fn file_names(dir: &Path) -> Vec<String> {
    let mut names: Vec<String> = std::fs::read_dir(dir)
        .expect("read dir")
        .map(|e| e.expect("dir entry").file_name().to_string_lossy().into_owned())
        .collect();
    names.sort();
    names
}
