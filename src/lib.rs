//! # tap-workday
//!
//! A Singer tap that extracts worker records from the Workday
//! `Human_Resources` SOAP service (`Get_Workers`).
//!
//! ## Features
//!
//! - **SOAP requests**: WS-Security username token, fixed worker criteria
//! - **XML normalization**: responses become a tree with `prefix_Name` keys
//! - **Page-numbered extraction**: one page in flight, stops at `Total_Pages`
//! - **Singer output**: SCHEMA, RECORD and STATE messages as JSON lines
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use tap_workday::config::TapConfig;
//! use tap_workday::engine::SyncEngine;
//! use tap_workday::http::HttpClient;
//! use tap_workday::output::MessageWriter;
//! use tap_workday::schema::all_streams;
//!
//! #[tokio::main]
//! async fn main() -> tap_workday::Result<()> {
//!     let config = TapConfig::from_file("config.json")?;
//!     let mut engine = SyncEngine::from_config(HttpClient::new()?, &config)?;
//!     let stats = engine
//!         .run(&all_streams()?, &mut MessageWriter::stdout())
//!         .await?;
//!     eprintln!("{} records", stats.records_synced);
//!     Ok(())
//! }
//! ```
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────┐   page n   ┌───────────┐  envelope  ┌───────────┐
//! │    Pager     │──────────▶│  Envelope │──────────▶│ Transport │
//! └──────────────┘            └───────────┘            └─────┬─────┘
//!        ▲ Total_Pages                                       │ XML
//! ┌──────┴───────┐  workers   ┌───────────┐   records  ┌─────▼─────┐
//! │   Response   │──────────▶│ RecordPath│──────────▶│   Sink    │
//! └──────────────┘            └───────────┘            └───────────┘
//! ```

#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::doc_markdown)]

// ============================================================================
// Module declarations
// ============================================================================

/// Error types for the tap
pub mod error;

/// Common types and type aliases
pub mod types;

/// HTTP transport
pub mod http;

/// Page cursor state machine
pub mod pagination;

/// XML normalization and record paths
pub mod decode;

/// Get_Workers request and response handling
pub mod soap;

/// Singer message output
pub mod output;

/// Main execution engine
pub mod engine;

/// Tap configuration
pub mod config;

/// Template interpolation
pub mod template;

/// Command-line interface
pub mod cli;

/// Stream definitions and catalog
pub mod schema;

// ============================================================================
// Re-exports
// ============================================================================

pub use error::{Error, Result};
pub use types::*;

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Crate name
pub const NAME: &str = env!("CARGO_PKG_NAME");
