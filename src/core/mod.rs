//! Core building blocks: frame geometry, the stepwise series state machine,
//! background colors, parameters, and single-pass image transforms. These are
//! internal primitives consumed by the high-level `api` module.
pub mod color;
pub mod geometry;
pub mod params;
pub mod processing;
pub mod series;
