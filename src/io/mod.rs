//! I/O layer: decoding source images, deterministic output naming, and
//! `writers` for encoded frames and JSON report sidecars.
pub mod naming;
pub mod reader;
pub use reader::SourceImage;

pub mod writers;
