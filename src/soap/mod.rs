//! Workday Get_Workers SOAP operation
//!
//! Request construction and response parsing for the `Human_Resources`
//! service.
//!
//! # Overview
//!
//! - [`EnvelopeBuilder`] renders the request body for a page
//! - [`parse_workers_response`] normalizes a response and locates the page
//!   counters and the worker collection
//! - [`parse_fault`] recognizes SOAP faults in error bodies

mod envelope;
mod response;

pub use envelope::{build_workers_request, EnvelopeBuilder, GET_WORKERS_TEMPLATE, MASKED_PASSWORD};
pub use response::{parse_fault, parse_workers_response, WorkersPage};

#[cfg(test)]
pub(crate) mod fixtures;

/// Content type of SOAP request bodies
pub const CONTENT_TYPE: &str = "application/xml";
