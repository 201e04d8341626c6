//! Deterministic output names. Identical inputs always map to identical paths.
use std::path::{Path, PathBuf};

use crate::core::geometry::{CropFrame, format_area_ratio};
use crate::core::series::SeriesItem;
use crate::types::OutputFormat;

/// Split a path's file name into stem and extension (extension keeps its dot and case).
pub fn split_file_name(path: &Path) -> (String, String) {
    let stem = path
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();
    let ext = path
        .extension()
        .map(|e| format!(".{}", e.to_string_lossy()))
        .unwrap_or_default();
    (stem, ext)
}

/// `photos/cat.jpg` -> `photos/cat_output`
pub fn series_output_dir(input: &Path) -> PathBuf {
    let (stem, _) = split_file_name(input);
    input.with_file_name(format!("{}_output", stem))
}

/// `{stem}_crop{index}_{width}_{height}_{area_ratio}{ext}` with the extension lower-cased.
pub fn series_file_name(stem: &str, item: &SeriesItem, ext: &str) -> String {
    format!(
        "{}_crop{}_{}_{}_{}{}",
        stem,
        item.index,
        item.frame.width,
        item.frame.height,
        format_area_ratio(item.area_ratio),
        ext.to_lowercase()
    )
}

pub fn crop_file_name(stem: &str, frame: CropFrame, ext: &str) -> String {
    format!("{}_crop_{}_{}{}", stem, frame.width, frame.height, ext)
}

pub fn expand_file_name(stem: &str, frame: CropFrame, ext: &str) -> String {
    format!("{}_expand_{}_{}{}", stem, frame.width, frame.height, ext)
}

pub fn report_file_name(stem: &str) -> String {
    format!("{}_series.json", stem)
}

/// Keep the source extension unless an explicit format was requested.
pub fn output_extension(source_ext: &str, format: Option<OutputFormat>) -> String {
    match format {
        Some(f) => format!(".{}", f.extension()),
        None => source_ext.to_string(),
    }
}
