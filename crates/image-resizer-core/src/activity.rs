//! Append-only record of what the resizer decided and did.
//!
//! Everything user-visible goes through an [`ActivitySink`]. The session keeps an
//! [`ActivityLog`]; background runs stream lines through a [`ChannelSink`] and the
//! session drains them back in order.

use crossbeam::channel::Sender;
use log::info;

/// Destination for activity lines
pub trait ActivitySink {
    fn append(&mut self, line: String);
}

/// Ordered list of activity lines for one session
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ActivityLog {
    entries: Vec<String>,
}

impl ActivityLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn entries(&self) -> &[String] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }
}

impl ActivitySink for ActivityLog {
    fn append(&mut self, line: String) {
        info!("{}", line);
        self.entries.push(line);
    }
}

/// Forwards activity lines to another thread.
///
/// A dropped receiver means nobody is watching anymore; lines are then discarded.
pub struct ChannelSink {
    tx: Sender<String>,
}

impl ChannelSink {
    pub fn new(tx: Sender<String>) -> Self {
        Self { tx }
    }
}

impl ActivitySink for ChannelSink {
    fn append(&mut self, line: String) {
        let _ = self.tx.send(line);
    }
}

impl ActivitySink for Vec<String> {
    fn append(&mut self, line: String) {
        self.push(line);
    }
}
