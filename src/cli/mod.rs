//! The `floorpro` command line: `args` declares the flags, `errors` holds
//! the binary-side error type, and `runner` maps the parsed flags onto the
//! library's single-file and batch entrypoints.
//!
//! Nothing here is meant to be consumed programmatically; embedders should
//! call `floorpro::api` directly.
pub mod args;
pub mod errors;
pub mod runner;

pub use args::CliArgs;
pub use runner::run;
