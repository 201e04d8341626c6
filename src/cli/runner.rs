use std::fs;

use tracing::info;
use tracing_subscriber::EnvFilter;

use stepcrop::{
    BatchCropParams, BatchExpandParams, BatchReport, LimitViolation, SeriesParams, SeriesReport,
    StopPhase, StopReport, crop_directory, expand_directory, generate_series,
};

use super::args::{CliArgs, Command, CropArgs, ExpandArgs, SeriesArgs};
use super::errors::AppError;

/// Merge an optional JSON preset with the explicit flags. Flags win.
fn series_params(args: &SeriesArgs) -> Result<SeriesParams, AppError> {
    let mut params = match &args.config {
        Some(path) => {
            let text = fs::read_to_string(path)?;
            serde_json::from_str::<SeriesParams>(&text).map_err(|e| AppError::InvalidConfig {
                path: path.clone(),
                reason: e.to_string(),
            })?
        }
        None => {
            let step = args.step.ok_or(AppError::MissingArgument {
                arg: "--step".to_string(),
            })?;
            SeriesParams::new(step, 1.0)
        }
    };

    if let Some(step) = args.step {
        params.step_pixels = step;
    }
    if let Some(ratio) = args.aspect_ratio {
        params.aspect_ratio = ratio;
    }
    if let Some(ratio) = args.min_size_ratio {
        params.min_size_ratio = ratio;
    }
    if let Some(limit) = args.min_pixel_limit {
        params.min_pixel_limit = limit;
    }
    if let Some(quality) = args.jpeg_quality {
        params.jpeg_quality = quality;
    }
    if let Some(policy) = args.on_error {
        params.on_error = policy;
    }
    if args.report {
        params.write_report = true;
    }
    Ok(params)
}

fn describe_violation(violation: &LimitViolation, phase: StopPhase) -> String {
    let prefix = match phase {
        StopPhase::Current => "",
        StopPhase::LookAhead => "Next step ",
    };
    match violation {
        LimitViolation::SizeBelowMinimum {
            width,
            height,
            min_width,
            min_height,
        } => format!(
            "{}width/height limit(width={}, height={}) < min allowed values(width={}, height={})",
            prefix, width, height, min_width, min_height
        ),
        LimitViolation::AreaRatioBelowMinimum {
            area_ratio,
            min_size_ratio,
        } => format!(
            "{}area ratio limit(current ratio={}) < min ratio({})",
            prefix, area_ratio, min_size_ratio
        ),
    }
}

fn describe_stop(stop: &StopReport) -> String {
    let reasons: Vec<String> = stop
        .reasons
        .iter()
        .map(|v| describe_violation(v, stop.phase))
        .collect();
    format!(
        "Stop generating image {}, reasons: {}",
        stop.index,
        reasons.join(", ")
    )
}

fn print_series_summary(report: &SeriesReport) {
    if let Some(stop) = &report.stop {
        println!("{}", describe_stop(stop));
    }
    for failure in &report.failures {
        println!(
            "Failed to save image {} ({:?}): {}",
            failure.item.index, failure.path, failure.error
        );
    }
    println!(
        "Completed! Generated {} images saved in {} folder",
        report.generated(),
        report.output_dir.display()
    );
}

fn print_batch_summary(report: &BatchReport, args_summary: &[(&str, String)]) {
    println!();
    println!("Processing completed");
    for (label, value) in args_summary {
        println!("{}: {}", label, value);
    }
    println!(
        "Processed: {}  Skipped: {}  Errors: {}",
        report.processed, report.skipped, report.errors
    );
}

fn run_series(args: SeriesArgs) -> Result<(), AppError> {
    let params = series_params(&args)?;
    info!("Generating crop series for {:?} with {:?}", args.input, params);

    let report = generate_series(&args.input, &params)?;
    print_series_summary(&report);
    Ok(())
}

fn run_crop(args: CropArgs) -> Result<(), AppError> {
    let params = BatchCropParams {
        aspect_ratio: args.aspect_ratio,
        format: args.format,
        on_error: args.on_error,
        jpeg_quality: args.jpeg_quality,
    };

    let report = crop_directory(&args.input_dir, &args.output_dir, &params)?;
    print_batch_summary(
        &report,
        &[
            ("Input directory", args.input_dir.display().to_string()),
            ("Output directory", args.output_dir.display().to_string()),
            (
                "Crop ratio",
                args.aspect_ratio
                    .map(|r| format!("{:.2}", r))
                    .unwrap_or_else(|| "original".to_string()),
            ),
        ],
    );
    Ok(())
}

fn run_expand(args: ExpandArgs) -> Result<(), AppError> {
    let params = BatchExpandParams {
        aspect_ratio: args.aspect_ratio,
        background: args.background.clone(),
        format: args.format,
        on_error: args.on_error,
        jpeg_quality: args.jpeg_quality,
    };

    let report = expand_directory(&args.input_dir, &args.output_dir, &params)?;
    print_batch_summary(
        &report,
        &[
            ("Input directory", args.input_dir.display().to_string()),
            ("Output directory", args.output_dir.display().to_string()),
            ("Target ratio", format!("{:.2}", args.aspect_ratio)),
            ("Background color", args.background.to_string()),
        ],
    );
    Ok(())
}

pub fn run(args: CliArgs) -> Result<(), Box<dyn std::error::Error>> {
    if args.log {
        let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("debug"));
        tracing_subscriber::fmt().with_env_filter(filter).init();
    }

    match args.command {
        Command::Series(series) => run_series(series)?,
        Command::Crop(crop) => run_crop(crop)?,
        Command::Expand(expand) => run_expand(expand)?,
    }
    Ok(())
}
