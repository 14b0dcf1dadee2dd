//! Output module
//!
//! Singer-format messages written as JSON lines.
//!
//! # Overview
//!
//! - [`Message`] - SCHEMA, RECORD and STATE messages
//! - [`MessageSink`] - where the engine sends messages
//! - [`MessageWriter`] - JSON lines on any `Write` (stdout in the tap)
//! - [`CollectingSink`] - in-memory sink

mod message;
mod writer;

pub use message::Message;
pub use writer::{CollectingSink, MessageSink, MessageWriter};
