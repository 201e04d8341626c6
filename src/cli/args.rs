use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

use stepcrop::{Color, ErrorPolicy, OutputFormat, parse_ratio};

#[derive(Parser)]
#[command(name = "stepcrop", version, about = "stepcrop CLI")]
pub struct CliArgs {
    /// Enable logging (RUST_LOG overrides the default debug level)
    #[arg(long, global = true, default_value_t = false)]
    pub log: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Generate ever smaller centered crops of one image until a size limit is reached
    Series(SeriesArgs),
    /// Crop every image of a directory to an aspect ratio
    Crop(CropArgs),
    /// Pad every image of a directory out to an aspect ratio
    Expand(ExpandArgs),
}

#[derive(Args)]
pub struct SeriesArgs {
    /// Input image; frames go to a sibling `<name>_output` directory
    #[arg(short, long)]
    pub input: PathBuf,

    /// Width decrement per step, in pixels
    #[arg(short, long)]
    pub step: Option<u32>,

    /// Frame aspect ratio: 16/9, 16:9 or a decimal [default: 1]
    #[arg(short, long, value_parser = ratio_arg)]
    pub aspect_ratio: Option<f64>,

    /// Smallest area relative to the first frame, in (0, 1] [default: 0.1]
    #[arg(long)]
    pub min_size_ratio: Option<f64>,

    /// Smallest allowed width and height in pixels [default: 100]
    #[arg(long)]
    pub min_pixel_limit: Option<u32>,

    /// JPEG quality, 1-100 [default: 95]
    #[arg(long)]
    pub jpeg_quality: Option<u8>,

    /// What to do when a frame fails to save [default: abort]
    #[arg(long, value_enum)]
    pub on_error: Option<ErrorPolicy>,

    /// Also write a JSON report into the output directory
    #[arg(long, default_value_t = false)]
    pub report: bool,

    /// JSON preset with series parameters; explicit flags override it
    #[arg(long)]
    pub config: Option<PathBuf>,
}

#[derive(Args)]
pub struct CropArgs {
    /// Directory with the source images
    #[arg(long)]
    pub input_dir: PathBuf,

    /// Directory for the cropped images
    #[arg(long)]
    pub output_dir: PathBuf,

    /// Target aspect ratio; omit to keep each image's ratio and only convert formats
    #[arg(short, long, value_parser = ratio_arg)]
    pub aspect_ratio: Option<f64>,

    /// Output format; omit to keep each image's format
    #[arg(short = 'f', long, value_enum)]
    pub format: Option<OutputFormat>,

    #[arg(long, default_value_t = stepcrop::core::params::DEFAULT_JPEG_QUALITY)]
    pub jpeg_quality: u8,

    #[arg(long, value_enum, default_value_t = ErrorPolicy::Continue)]
    pub on_error: ErrorPolicy,
}

#[derive(Args)]
pub struct ExpandArgs {
    /// Directory with the source images
    #[arg(long)]
    pub input_dir: PathBuf,

    /// Directory for the expanded images
    #[arg(long)]
    pub output_dir: PathBuf,

    /// Target aspect ratio: 16/9, 16:9 or a decimal
    #[arg(short, long, value_parser = ratio_arg)]
    pub aspect_ratio: f64,

    /// Fill color: a name (white), r,g,b (33,129,161) or hex (#2181A1)
    #[arg(short, long, value_parser = color_arg, default_value = "white")]
    pub background: Color,

    /// Output format; omit to keep each image's format
    #[arg(short = 'f', long, value_enum)]
    pub format: Option<OutputFormat>,

    #[arg(long, default_value_t = stepcrop::core::params::DEFAULT_JPEG_QUALITY)]
    pub jpeg_quality: u8,

    #[arg(long, value_enum, default_value_t = ErrorPolicy::Continue)]
    pub on_error: ErrorPolicy,
}

fn ratio_arg(s: &str) -> Result<f64, String> {
    parse_ratio(s).map_err(|e| e.to_string())
}

fn color_arg(s: &str) -> Result<Color, String> {
    let color: Color = s.parse().map_err(|e: stepcrop::Error| e.to_string())?;
    color.resolve().map_err(|e| e.to_string())?;
    Ok(color)
}
