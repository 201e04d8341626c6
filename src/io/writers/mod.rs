//! Output encoders: JPEG via `jpeg-encoder`, the remaining formats via the
//! `image` codecs, and the JSON report sidecar.
pub mod encode;
pub mod jpeg;
pub mod report;

pub use encode::{convert_format, save_image};
pub use report::write_json_sidecar;
