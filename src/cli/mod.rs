//! CLI module
//!
//! Command-line interface for the tap.
//!
//! # Modes
//!
//! - `--about` - Print tap metadata and config schema
//! - `--discover` - Print the stream catalog
//! - default - Extract records as Singer messages on stdout

mod commands;
mod runner;

pub use commands::{Cli, Mode};
pub use runner::Runner;
