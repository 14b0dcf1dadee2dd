//! CLI arguments

use clap::Parser;
use std::path::PathBuf;

/// Singer tap for Workday workers
#[derive(Parser, Debug)]
#[command(name = "tap-workday")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Configuration file (JSON)
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Print the catalog of available streams
    #[arg(short, long)]
    pub discover: bool,

    /// Catalog file selecting the streams to sync
    #[arg(long, visible_alias = "properties")]
    pub catalog: Option<PathBuf>,

    /// State file (accepted for compatibility; every run is a full extract)
    #[arg(short, long)]
    pub state: Option<PathBuf>,

    /// Print tap metadata and the config schema
    #[arg(long)]
    pub about: bool,
}

/// What a CLI invocation does
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    /// Print metadata
    About,
    /// Print the catalog
    Discover,
    /// Extract records
    Sync,
}

impl Cli {
    /// Mode selected by the flags; `--about` wins over `--discover`
    pub fn mode(&self) -> Mode {
        if self.about {
            Mode::About
        } else if self.discover {
            Mode::Discover
        } else {
            Mode::Sync
        }
    }
}
