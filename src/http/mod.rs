//! HTTP client module
//!
//! Provides the transport for SOAP requests.
//!
//! # Features
//!
//! - **Transport trait**: the engine depends on [`Transport`], not on reqwest
//! - **HttpClient**: reqwest-backed implementation with timeout and default
//!   headers
//! - **Fail fast**: non-success statuses become `Error::HttpStatus`

mod client;
mod transport;

pub use client::{HttpClient, HttpClientConfig, HttpClientConfigBuilder, RequestConfig};
pub use transport::Transport;
