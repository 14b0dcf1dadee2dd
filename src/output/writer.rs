//! Message sinks
//!
//! [`MessageWriter`] writes newline-delimited JSON to any `Write`, flushing
//! after every message so a downstream target sees records as they arrive.

use super::message::Message;
use crate::error::{Error, Result};
use std::io::{self, Stdout, Write};

/// Destination for emitted messages
pub trait MessageSink {
    /// Write one message
    fn write_message(&mut self, message: &Message) -> Result<()>;
}

impl<S: MessageSink + ?Sized> MessageSink for &mut S {
    fn write_message(&mut self, message: &Message) -> Result<()> {
        (**self).write_message(message)
    }
}

/// Writes messages as JSON lines
pub struct MessageWriter<W: Write> {
    writer: W,
    messages_written: usize,
}

impl MessageWriter<Stdout> {
    /// Writer on process stdout
    pub fn stdout() -> Self {
        Self::new(io::stdout())
    }
}

impl<W: Write> MessageWriter<W> {
    /// Wrap a writer
    pub fn new(writer: W) -> Self {
        Self {
            writer,
            messages_written: 0,
        }
    }

    /// Number of messages written so far
    #[must_use]
    pub fn messages_written(&self) -> usize {
        self.messages_written
    }

    /// Unwrap the inner writer
    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl<W: Write> MessageSink for MessageWriter<W> {
    fn write_message(&mut self, message: &Message) -> Result<()> {
        let line = serde_json::to_string(message)?;
        writeln!(self.writer, "{line}")
            .and_then(|()| self.writer.flush())
            .map_err(|e| Error::output(format!("Failed to write message: {e}")))?;
        self.messages_written += 1;
        Ok(())
    }
}

impl<W: Write> std::fmt::Debug for MessageWriter<W> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MessageWriter")
            .field("messages_written", &self.messages_written)
            .finish_non_exhaustive()
    }
}

/// Keeps messages in memory
#[derive(Debug, Clone, Default)]
pub struct CollectingSink {
    messages: Vec<Message>,
}

impl CollectingSink {
    /// Create an empty sink
    pub fn new() -> Self {
        Self::default()
    }

    /// All messages received, in order
    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    /// Record bodies received, in order
    pub fn records(&self) -> Vec<&serde_json::Value> {
        self.messages.iter().filter_map(Message::as_record).collect()
    }

    /// Take ownership of the collected messages
    pub fn into_messages(self) -> Vec<Message> {
        self.messages
    }
}

impl MessageSink for CollectingSink {
    fn write_message(&mut self, message: &Message) -> Result<()> {
        self.messages.push(message.clone());
        Ok(())
    }
}
