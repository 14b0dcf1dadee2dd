//! Get_Workers response parsing
//!
//! Locates the page counters and the worker collection inside a normalized
//! response envelope:
//!
//! ```text
//! env_Envelope
//! └── env_Body
//!     └── wd_Get_Workers_Response
//!         ├── wd_Response_Results
//!         │   ├── wd_Total_Results
//!         │   ├── wd_Total_Pages
//!         │   └── wd_Page
//!         └── wd_Response_Data
//!             └── wd_Worker (one or many)
//! ```

use crate::decode::{self, Node, NORMALIZED_SEPARATOR};
use crate::error::{Error, Result};
use tracing::{debug, warn};

const ENVELOPE: &str = "env_Envelope";
const BODY: &str = "env_Body";
const GET_WORKERS_RESPONSE: &str = "wd_Get_Workers_Response";
const RESPONSE_RESULTS: &str = "wd_Response_Results";
const TOTAL_RESULTS: &str = "wd_Total_Results";
const TOTAL_PAGES: &str = "wd_Total_Pages";
const PAGE: &str = "wd_Page";
const RESPONSE_DATA: &str = "wd_Response_Data";
const WORKER: &str = "wd_Worker";

/// One page of a Get_Workers response
#[derive(Debug, Clone, PartialEq)]
pub struct WorkersPage {
    /// Pages in the full result set; `None` if absent or not a number
    pub total_pages: Option<u64>,
    /// Workers in the full result set
    pub total_results: Option<u64>,
    /// Page number the service says it returned
    pub page: Option<u32>,
    /// Worker nodes on this page, always a sequence
    pub workers: Node,
}

impl WorkersPage {
    /// Number of workers on this page
    pub fn worker_count(&self) -> usize {
        self.workers.sequence_len()
    }
}

/// Parse a Get_Workers response body
///
/// Malformed XML, a SOAP fault, or a body without `Get_Workers_Response`
/// is an error. A missing or unparsable `Total_Pages` is not: it comes back
/// as `None` and the pager treats it as zero pages.
pub fn parse_workers_response(xml: &str) -> Result<WorkersPage> {
    let mut root = decode::normalize(xml)?;
    if let Some(fault) = find_fault(&root) {
        return Err(fault);
    }

    let mut body = root
        .take(ENVELOPE)
        .ok_or_else(|| Error::missing_path(ENVELOPE))?
        .take(BODY)
        .ok_or_else(|| Error::missing_path(format!("{ENVELOPE}.{BODY}")))?;

    let mut response = body
        .take(GET_WORKERS_RESPONSE)
        .ok_or_else(|| Error::missing_path(format!("{ENVELOPE}.{BODY}.{GET_WORKERS_RESPONSE}")))?;

    let results = response.get(RESPONSE_RESULTS);
    let total_pages = results.and_then(|r| read_number::<u64>(r, TOTAL_PAGES));
    let total_results = results.and_then(|r| read_number::<u64>(r, TOTAL_RESULTS));
    let page = results.and_then(|r| read_number::<u32>(r, PAGE));

    let workers = match response.take(RESPONSE_DATA) {
        Some(mut data) => data.take(WORKER).unwrap_or_default(),
        None if total_pages.unwrap_or(0) == 0 || total_results == Some(0) => {
            debug!("Response carries no {RESPONSE_DATA}; treating page as empty");
            Node::null()
        }
        None => {
            return Err(Error::missing_path(format!(
                "{ENVELOPE}.{BODY}.{GET_WORKERS_RESPONSE}.{RESPONSE_DATA}"
            )))
        }
    };

    Ok(WorkersPage {
        total_pages,
        total_results,
        page,
        workers: Node::Sequence(workers.into_sequence()),
    })
}

/// Read a numeric child of `Response_Results`
fn read_number<T: std::str::FromStr>(results: &Node, key: &str) -> Option<T> {
    let node = results.get(key)?;
    let text = node.as_text().or_else(|| node.get(decode::TEXT_KEY)?.as_text());
    match text.map(str::trim).map(str::parse::<T>) {
        Some(Ok(n)) => Some(n),
        Some(Err(_)) | None => {
            warn!("{RESPONSE_RESULTS}.{key} is not a number: {:?}", text);
            None
        }
    }
}

/// Build an error from an `env_Fault` node
fn fault_error(fault: &Node) -> Error {
    let code = fault
        .get("faultcode")
        .and_then(Node::as_text)
        .unwrap_or("unknown");
    let message = fault
        .get("faultstring")
        .and_then(Node::as_text)
        .unwrap_or("no fault string");
    Error::soap_fault(code, message)
}

/// Extract a SOAP fault from a response body, if it holds one
pub fn parse_fault(xml: &str) -> Option<Error> {
    find_fault(&decode::normalize(xml).ok()?)
}

/// Fault responses use a different envelope prefix (`SOAP-ENV`) than data
/// responses (`env`), so the fault is located by local name.
fn find_fault(root: &Node) -> Option<Error> {
    let envelope = find_local(root, "Envelope")?;
    let body = find_local(envelope, "Body")?;
    find_local(body, "Fault").map(fault_error)
}

/// Child whose key is `local`, with or without a normalized prefix
fn find_local<'a>(node: &'a Node, local: &str) -> Option<&'a Node> {
    let Node::Mapping(entries) = node else {
        return None;
    };
    entries
        .iter()
        .find(|(key, _)| {
            key == local
                || key
                    .split_once(NORMALIZED_SEPARATOR)
                    .is_some_and(|(_, name)| name == local)
        })
        .map(|(_, child)| child)
}
