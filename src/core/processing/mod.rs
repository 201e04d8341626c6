//! Single-pass image transforms: aspect-ratio crop and expand, series frame
//! cropping, and per-format pixel layout preparation before encoding.
pub mod convert;
pub mod crop;
pub mod expand;

pub use convert::prepare_for_format;
pub use crop::{crop_region, crop_series_item, crop_to_ratio};
pub use expand::expand_to_ratio;
