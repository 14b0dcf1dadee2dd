//! Execution engine module
//!
//! Main page loop and stream orchestration.
//!
//! # Overview
//!
//! The engine module provides:
//! - `SyncEngine` - drives the pager against a transport, one page at a time
//! - `SyncStats` - counters returned at the end of a run
//!
//! Every record of a page is written to the sink before the next page is
//! requested.

mod types;

pub use types::SyncStats;

use crate::config::TapConfig;
use crate::decode::RecordPath;
use crate::error::{Error, Result};
use crate::http::Transport;
use crate::output::{Message, MessageSink};
use crate::pagination::{NextPage, Pager};
use crate::schema::StreamDefinition;
use crate::soap::{parse_fault, parse_workers_response, EnvelopeBuilder, WorkersPage};
use crate::types::JsonValue;
use std::time::Instant;
use tracing::{debug, info, warn};

/// Sync engine for orchestrating data extraction
pub struct SyncEngine<T: Transport> {
    /// Transport for SOAP calls
    transport: T,
    /// Service endpoint
    endpoint: String,
    /// Request builder
    envelope: EnvelopeBuilder,
    /// Page cursor controller
    pager: Pager,
    /// Statistics
    stats: SyncStats,
}

impl<T: Transport> SyncEngine<T> {
    /// Create a new sync engine
    pub fn new(
        transport: T,
        endpoint: impl Into<String>,
        envelope: EnvelopeBuilder,
        pager: Pager,
    ) -> Self {
        Self {
            transport,
            endpoint: endpoint.into(),
            envelope,
            pager,
            stats: SyncStats::default(),
        }
    }

    /// Create an engine from tap configuration
    pub fn from_config(transport: T, config: &TapConfig) -> Result<Self> {
        Ok(Self::new(
            transport,
            config.endpoint()?,
            EnvelopeBuilder::from_config(config),
            Pager::new(config.max_pages),
        ))
    }

    /// Get statistics
    pub fn stats(&self) -> &SyncStats {
        &self.stats
    }

    /// Service endpoint requests are sent to
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Request and parse one page
    ///
    /// A non-success status whose body is a SOAP fault is reported as the
    /// fault.
    pub async fn fetch_page(&self, page: u32) -> Result<WorkersPage> {
        let body = self.envelope.build(page)?;
        debug!("Request for page {}: {}", page, self.envelope.build_masked(page)?);

        let response = match self.transport.post_xml(&self.endpoint, body).await {
            Ok(response) => response,
            Err(Error::HttpStatus { status, body }) => {
                return Err(parse_fault(&body).unwrap_or(Error::HttpStatus { status, body }));
            }
            Err(e) => return Err(e),
        };

        parse_workers_response(&response)
    }

    /// Walk every page, handing each record to `on_record` in order
    pub async fn extract<F>(&mut self, record_path: &RecordPath, mut on_record: F) -> Result<usize>
    where
        F: FnMut(JsonValue) -> Result<()>,
    {
        let mut state = self.pager.start();
        let mut total = 0usize;

        loop {
            let page = self.fetch_page(state.page).await?;
            self.stats.add_page();

            let total_pages = page.total_pages;
            let workers = page.worker_count();
            let mut count = 0usize;
            for record in record_path.extract(page.workers) {
                on_record(record.into_json())?;
                count += 1;
            }
            self.stats.add_records(count);
            total += count;

            if count < workers {
                self.stats.add_skipped(workers - count);
                warn!(
                    "Page {}: {} of {} workers have no match for {}, skipped",
                    state.page,
                    workers - count,
                    workers,
                    record_path
                );
            }

            info!(
                "Page {}/{}: {} records",
                state.page,
                total_pages.unwrap_or(0),
                count
            );

            let (next, step) = self.pager.advance(state, total_pages);
            state = next;
            match step {
                NextPage::Continue(_) => {}
                NextPage::Done => break,
                NextPage::LimitReached { limit, total_pages } => {
                    return Err(Error::PageLimitExceeded { limit, total_pages });
                }
            }
        }

        Ok(total)
    }

    /// Sync one stream: its SCHEMA message followed by every record
    pub async fn sync_stream<S: MessageSink>(
        &mut self,
        stream: &StreamDefinition,
        sink: &mut S,
    ) -> Result<usize> {
        info!("Starting sync for stream: {}", stream.name);

        sink.write_message(&Message::schema(
            &stream.name,
            stream.schema_json(),
            stream.key_properties.clone(),
        ))?;

        let name = stream.name.as_str();
        let count = self
            .extract(&stream.record_path, |record| {
                sink.write_message(&Message::record(name, record))
            })
            .await?;

        self.stats.add_stream();
        info!("Completed sync for {}: {} records", stream.name, count);
        Ok(count)
    }

    /// Sync every stream, then emit the final STATE message
    pub async fn run<S: MessageSink>(
        &mut self,
        streams: &[StreamDefinition],
        sink: &mut S,
    ) -> Result<SyncStats> {
        let start = Instant::now();

        for stream in streams {
            self.sync_stream(stream, sink).await?;
        }
        sink.write_message(&Message::empty_state())?;

        #[allow(clippy::cast_possible_truncation)]
        self.stats.set_duration(start.elapsed().as_millis() as u64);

        info!(
            "Sync finished: {} records in {} pages ({} ms)",
            self.stats.records_synced, self.stats.pages_fetched, self.stats.duration_ms
        );
        Ok(self.stats.clone())
    }
}

impl<T: Transport> std::fmt::Debug for SyncEngine<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SyncEngine")
            .field("endpoint", &self.endpoint)
            .field("envelope", &self.envelope)
            .field("pager", &self.pager)
            .field("stats", &self.stats)
            .finish_non_exhaustive()
    }
}
