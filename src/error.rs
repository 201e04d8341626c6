//! Crate-level error type and `Result` alias for stable, structured error handling.
//! Converts underlying I/O, codec and serialization errors, and provides semantic
//! variants for argument validation, color parsing and per-frame save failures.
use std::path::PathBuf;

use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Image codec error: {0}")]
    Image(#[from] image::ImageError),

    #[error("JPEG encoder error: {0}")]
    Jpeg(#[from] jpeg_encoder::EncodingError),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid argument: {arg}={value}")]
    InvalidArgument { arg: &'static str, value: String },

    #[error("Invalid color: {0}")]
    InvalidColor(String),

    #[error("Unsupported image format: {path}")]
    UnsupportedFormat { path: PathBuf },

    #[error("Image {width}x{height} exceeds the {format} size limit")]
    ImageTooLarge {
        width: u32,
        height: u32,
        format: &'static str,
    },

    #[error("Failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    #[error("Failed to save frame {index} to {path}: {source}")]
    Save {
        index: u32,
        path: PathBuf,
        #[source]
        source: Box<Error>,
    },
}

impl Error {
    pub fn invalid_argument<V: std::fmt::Display>(arg: &'static str, value: V) -> Self {
        Error::InvalidArgument {
            arg,
            value: value.to_string(),
        }
    }
}
