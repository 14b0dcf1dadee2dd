//! CLI runner
//!
//! Executes the mode chosen on the command line. Messages and JSON
//! documents go to the output writer; logs go to stderr.

use super::commands::{Cli, Mode};
use crate::config::TapConfig;
use crate::engine::{SyncEngine, SyncStats};
use crate::error::{Error, Result};
use crate::http::{HttpClient, HttpClientConfig};
use crate::output::MessageWriter;
use crate::schema::{all_streams, Catalog, StreamDefinition};
use crate::types::JsonValue;
use crate::{NAME, VERSION};
use serde_json::json;
use std::io::{self, Write};
use tracing::{debug, info, warn};

/// CLI runner
pub struct Runner {
    cli: Cli,
}

impl Runner {
    /// Create a new runner
    pub fn new(cli: Cli) -> Self {
        Self { cli }
    }

    /// Run the CLI command against stdout
    pub async fn run(&self) -> Result<()> {
        self.run_with(io::stdout()).await
    }

    /// Run the CLI command, writing output to `out`
    pub async fn run_with<W: Write>(&self, mut out: W) -> Result<()> {
        match self.cli.mode() {
            Mode::About => Self::print_json(&mut out, &Self::about()),
            Mode::Discover => {
                self.load_config()?;
                let catalog = Catalog::discover(&all_streams()?);
                writeln!(out, "{}", catalog.to_json_pretty()?)?;
                Ok(())
            }
            Mode::Sync => {
                self.sync(out).await?;
                Ok(())
            }
        }
    }

    /// Tap metadata printed by `--about`
    pub fn about() -> JsonValue {
        json!({
            "name": NAME,
            "version": VERSION,
            "capabilities": ["catalog", "discover", "about"],
            "settings": TapConfig::config_schema(),
        })
    }

    /// Load the config named by `--config`
    fn load_config(&self) -> Result<TapConfig> {
        let path = self
            .cli
            .config
            .as_ref()
            .ok_or_else(|| Error::missing_field("--config"))?;
        let config = TapConfig::from_file(path)?;
        debug!("Loaded config: {:?}", config);
        Ok(config)
    }

    /// Streams to sync, filtered by `--catalog` when given
    fn selected_streams(&self) -> Result<Vec<StreamDefinition>> {
        let streams = all_streams()?;
        match &self.cli.catalog {
            Some(path) => Ok(Catalog::from_file(path)?.select(streams)),
            None => Ok(streams),
        }
    }

    async fn sync<W: Write>(&self, out: W) -> Result<SyncStats> {
        let config = self.load_config()?;
        if !config.has_credentials() {
            warn!("username or password not set; requests carry empty credentials");
        }
        if let Some(state) = &self.cli.state {
            debug!("Ignoring state file {}: full extract", state.display());
        }

        let streams = self.selected_streams()?;
        info!(
            "Syncing {} stream(s) from {}",
            streams.len(),
            config.endpoint()?
        );

        let client = HttpClient::with_config(
            HttpClientConfig::builder()
                .timeout(config.timeout())
                .build(),
        )?;
        let mut engine = SyncEngine::from_config(client, &config)?;
        let mut writer = MessageWriter::new(out);

        engine.run(&streams, &mut writer).await
    }

    fn print_json<W: Write>(out: &mut W, value: &JsonValue) -> Result<()> {
        writeln!(out, "{}", serde_json::to_string_pretty(value)?)?;
        Ok(())
    }
}
