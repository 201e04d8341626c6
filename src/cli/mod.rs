//! Command Line Interface (CLI) layer for stepcrop.
//!
//! This module defines argument parsing (`args`), error types (`errors`),
//! and the orchestration logic (`runner`) for the `series`, `crop` and
//! `expand` subcommands. It wires user-provided options to the library
//! functionality exposed via `stepcrop::api`.
//!
//! If you are embedding stepcrop into another application, prefer using
//! the high-level `stepcrop::api` module instead of calling the CLI code.
pub mod args;
pub mod errors;
pub mod runner;

pub use args::CliArgs;
pub use runner::run;
