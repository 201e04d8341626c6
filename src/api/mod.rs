//! High-level, ergonomic library API: generate a stepwise crop series from an image
//! file or an in-memory image, and batch crop/expand every image of a directory.
//! Prefer these entrypoints over the low-level `core` modules when integrating stepcrop.
use std::fs;
use std::path::{Path, PathBuf};

use image::DynamicImage;
use serde::Serialize;
use tracing::{debug, info, warn};

use crate::core::geometry::CropFrame;
use crate::core::params::{BatchCropParams, BatchExpandParams, SeriesParams};
use crate::core::processing::{crop_series_item, crop_to_ratio, expand_to_ratio};
use crate::core::series::{CropSeries, SeriesItem, SeriesPlan, StopReport};
use crate::error::{Error, Result};
use crate::io::SourceImage;
use crate::io::naming::{
    crop_file_name, expand_file_name, output_extension, report_file_name, series_file_name,
    series_output_dir, split_file_name,
};
use crate::io::writers::{save_image, write_json_sidecar};
use crate::types::{ErrorPolicy, OutputFormat};

/// A frame that was written to disk
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SavedFrame {
    #[serde(flatten)]
    pub item: SeriesItem,
    pub path: PathBuf,
}

/// A frame that failed to save under `ErrorPolicy::Continue`
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FailedFrame {
    #[serde(flatten)]
    pub item: SeriesItem,
    pub path: PathBuf,
    pub error: String,
}

/// Result of one stepwise series run
#[derive(Debug, Clone, Serialize)]
pub struct SeriesReport {
    pub source: PathBuf,
    pub output_dir: PathBuf,
    pub plan: SeriesPlan,
    pub saved: Vec<SavedFrame>,
    pub failures: Vec<FailedFrame>,
    /// None only if the series was cut short by an error
    pub stop: Option<StopReport>,
}

impl SeriesReport {
    /// Number of images written
    pub fn generated(&self) -> usize {
        self.saved.len()
    }
}

/// Batch processing report
#[derive(Debug, Clone, Default, Serialize)]
pub struct BatchReport {
    pub processed: usize,
    pub skipped: usize,
    pub errors: usize,
    pub outputs: Vec<PathBuf>,
}

/// Plan the series for an in-memory image without touching the filesystem.
/// Crop each yielded item with [`crop_series_item`].
pub fn series_frames(image: &DynamicImage, params: &SeriesParams) -> Result<CropSeries> {
    Ok(SeriesPlan::new(image.width(), image.height(), params)?.iter())
}

/// Generate the stepwise center-crop series for `input`.
///
/// Frames are written to `{input without extension}_output/`, which is created
/// even if no frame ends up being generated. Under `ErrorPolicy::Abort` the first
/// failed save returns `Error::Save` and frames already written stay on disk.
pub fn generate_series(input: &Path, params: &SeriesParams) -> Result<SeriesReport> {
    params.validate()?;
    let format = OutputFormat::from_path(input).ok_or_else(|| Error::UnsupportedFormat {
        path: input.to_path_buf(),
    })?;

    let output_dir = series_output_dir(input);
    fs::create_dir_all(&output_dir)?;

    let source = SourceImage::open(input)?;
    let plan = SeriesPlan::new(source.width(), source.height(), params)?;
    info!(
        "Series plan: source {}x{}, initial frame {}, step {} px, min allowed {:.2}x{:.2}",
        plan.source_width,
        plan.source_height,
        plan.initial,
        plan.step_pixels,
        plan.limits.min_width,
        plan.limits.min_height
    );

    let (stem, ext) = split_file_name(input);
    let mut report = SeriesReport {
        source: input.to_path_buf(),
        output_dir: output_dir.clone(),
        plan,
        saved: Vec::new(),
        failures: Vec::new(),
        stop: None,
    };

    let mut series = plan.iter();
    for item in series.by_ref() {
        let path = output_dir.join(series_file_name(&stem, &item, &ext));
        let frame = crop_series_item(&source.image, &item);

        match save_image(&frame, &path, format, params.jpeg_quality) {
            Ok(()) => {
                debug!("Saved frame {} ({}) -> {:?}", item.index, item.frame, path);
                report.saved.push(SavedFrame { item, path });
            }
            Err(e) => match params.on_error {
                ErrorPolicy::Abort => {
                    return Err(Error::Save {
                        index: item.index,
                        path,
                        source: Box::new(e),
                    });
                }
                ErrorPolicy::Continue => {
                    warn!("Failed to save frame {} to {:?}: {}", item.index, path, e);
                    report.failures.push(FailedFrame {
                        item,
                        path,
                        error: e.to_string(),
                    });
                }
            },
        }
    }

    report.stop = series.into_stop_report();
    if let Some(stop) = &report.stop {
        info!(
            "Series stopped before frame {} ({:?} check, {}x{})",
            stop.index, stop.phase, stop.width, stop.height
        );
    }
    info!(
        "Generated {} images in {:?}",
        report.generated(),
        report.output_dir
    );

    if params.write_report {
        write_json_sidecar(&report, &output_dir.join(report_file_name(&stem)))?;
    }

    Ok(report)
}

/// True for files with a supported raster extension
pub fn is_supported_image(path: &Path) -> bool {
    path.is_file() && OutputFormat::from_path(path).is_some()
}

fn sorted_entries(input_dir: &Path) -> Result<Vec<PathBuf>> {
    let mut paths = Vec::new();
    for entry in fs::read_dir(input_dir)? {
        paths.push(entry?.path());
    }
    paths.sort();
    Ok(paths)
}

/// Return an iterator over the supported images directly inside `input_dir`, in name order
pub fn iterate_images(input_dir: &Path) -> Result<std::vec::IntoIter<PathBuf>> {
    let images: Vec<PathBuf> = sorted_entries(input_dir)?
        .into_iter()
        .filter(|p| is_supported_image(p))
        .collect();
    Ok(images.into_iter())
}

fn run_batch<F>(input_dir: &Path, policy: ErrorPolicy, mut process: F) -> Result<BatchReport>
where
    F: FnMut(&Path) -> Result<PathBuf>,
{
    let mut report = BatchReport::default();

    for path in sorted_entries(input_dir)? {
        if !is_supported_image(&path) {
            debug!("Skipping non-image: {:?}", path);
            report.skipped += 1;
            continue;
        }

        match process(&path) {
            Ok(output) => {
                report.processed += 1;
                report.outputs.push(output);
            }
            Err(e) => {
                report.errors += 1;
                warn!("Error processing {:?}: {}", path, e);
                if policy == ErrorPolicy::Abort {
                    return Err(e);
                }
            }
        }
    }

    info!(
        "Batch complete: processed={} skipped={} errors={}",
        report.processed, report.skipped, report.errors
    );
    Ok(report)
}

/// Output format for a batch item: the requested one, else what the source was.
fn batch_format(source: &SourceImage, requested: Option<OutputFormat>) -> Result<OutputFormat> {
    requested
        .or(source.format)
        .or_else(|| OutputFormat::from_path(&source.path))
        .ok_or_else(|| Error::UnsupportedFormat {
            path: source.path.clone(),
        })
}

/// Crop every image of `input_dir` to `params.aspect_ratio` into `output_dir`.
pub fn crop_directory(
    input_dir: &Path,
    output_dir: &Path,
    params: &BatchCropParams,
) -> Result<BatchReport> {
    params.validate()?;
    fs::create_dir_all(output_dir)?;
    info!("Cropping images from {:?} into {:?}", input_dir, output_dir);

    run_batch(input_dir, params.on_error, |path| {
        let source = SourceImage::open(path)?;
        let format = batch_format(&source, params.format)?;
        let cropped = crop_to_ratio(&source.image, params.aspect_ratio);

        let (stem, ext) = split_file_name(path);
        let frame = CropFrame::new(cropped.width(), cropped.height());
        let output = output_dir.join(crop_file_name(
            &stem,
            frame,
            &output_extension(&ext, params.format),
        ));
        save_image(&cropped, &output, format, params.jpeg_quality)?;
        info!("Processed: {:?} -> Size: {}", path, frame);
        Ok(output)
    })
}

/// Expand every image of `input_dir` to `params.aspect_ratio` on the background color.
pub fn expand_directory(
    input_dir: &Path,
    output_dir: &Path,
    params: &BatchExpandParams,
) -> Result<BatchReport> {
    params.validate()?;
    let background = params.background.resolve()?;
    fs::create_dir_all(output_dir)?;
    info!(
        "Expanding images from {:?} into {:?} on {}",
        input_dir, output_dir, params.background
    );

    run_batch(input_dir, params.on_error, |path| {
        let source = SourceImage::open(path)?;
        let format = batch_format(&source, params.format)?;
        let expanded = expand_to_ratio(&source.image, params.aspect_ratio, background)?;

        let (stem, ext) = split_file_name(path);
        let frame = CropFrame::new(expanded.width(), expanded.height());
        let output = output_dir.join(expand_file_name(
            &stem,
            frame,
            &output_extension(&ext, params.format),
        ));
        save_image(&expanded, &output, format, params.jpeg_quality)?;
        info!("Processed: {:?} -> Size: {}", path, frame);
        Ok(output)
    })
}
