//! Log stream sink
//!
//! Append-only, time-ordered log of everything the agents say. Entries are
//! created empty and streaming, grow by appended chunks, and freeze once
//! finalized. Entry order is `begin` call order and never changes.

use opsdiag_model::{AgentId, LogMessage, MessageId, MessageKind, Sender};
use parking_lot::RwLock;
use std::collections::HashMap;

#[derive(Debug, Default)]
struct LogInner {
    entries: Vec<LogMessage>,
    index: HashMap<MessageId, usize>,
}

/// Append-only log stream
#[derive(Debug, Default)]
pub struct LogStream {
    inner: RwLock<LogInner>,
}

impl LogStream {
    /// Create an empty stream
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Open a new, empty, streaming entry and return its id
    pub fn begin(&self, from: Sender, to: Option<AgentId>, kind: MessageKind) -> MessageId {
        let entry = LogMessage::open(from, to, kind);
        let id = entry.id;

        let mut inner = self.inner.write();
        let position = inner.entries.len();
        inner.entries.push(entry);
        inner.index.insert(id, position);
        id
    }

    /// Append text to an open entry
    ///
    /// No-op if the id is unknown or the entry was already finalized.
    pub fn append_chunk(&self, id: MessageId, text: &str) {
        let mut inner = self.inner.write();
        let Some(&position) = inner.index.get(&id) else {
            tracing::debug!(%id, "chunk for unknown log entry dropped");
            return;
        };
        let entry = &mut inner.entries[position];
        if !entry.is_streaming {
            tracing::debug!(%id, "chunk for finalized log entry dropped");
            return;
        }
        entry.content.push_str(text);
    }

    /// Close an entry; later appends become no-ops
    pub fn finalize(&self, id: MessageId) {
        let mut inner = self.inner.write();
        let Some(&position) = inner.index.get(&id) else {
            return;
        };
        inner.entries[position].is_streaming = false;
    }

    /// Finalize every entry still streaming
    ///
    /// Used by the engine when a run is cancelled mid-stream.
    pub fn finalize_open(&self) {
        let mut inner = self.inner.write();
        for entry in &mut inner.entries {
            entry.is_streaming = false;
        }
    }

    /// Snapshot of all entries so far, in `begin` order
    #[must_use]
    pub fn entries(&self) -> Vec<LogMessage> {
        self.inner.read().entries.clone()
    }

    /// Snapshot of a single entry
    #[must_use]
    pub fn entry(&self, id: MessageId) -> Option<LogMessage> {
        let inner = self.inner.read();
        inner
            .index
            .get(&id)
            .map(|&position| inner.entries[position].clone())
    }

    /// Number of entries
    #[must_use]
    pub fn len(&self) -> usize {
        self.inner.read().entries.len()
    }

    /// True when no entries exist
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.inner.read().entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sender() -> Sender {
        Sender::new(AgentId::new(), "worker")
    }

    #[test]
    fn begin_creates_empty_streaming_entry() {
        let log = LogStream::new();
        let id = log.begin(sender(), None, MessageKind::Report);

        let entry = log.entry(id).unwrap();
        assert!(entry.content.is_empty());
        assert!(entry.is_streaming);
    }

    #[test]
    fn chunks_accumulate_in_order() {
        let log = LogStream::new();
        let id = log.begin(sender(), None, MessageKind::Report);

        log.append_chunk(id, "Checking ");
        log.append_chunk(id, "replication ");
        log.append_chunk(id, "lag.");

        assert_eq!(log.entry(id).unwrap().content, "Checking replication lag.");
    }

    #[test]
    fn append_after_finalize_is_noop() {
        let log = LogStream::new();
        let id = log.begin(sender(), None, MessageKind::Report);

        log.append_chunk(id, "done");
        log.finalize(id);
        log.append_chunk(id, " extra");

        let entry = log.entry(id).unwrap();
        assert_eq!(entry.content, "done");
        assert!(!entry.is_streaming);
    }

    #[test]
    fn append_to_unknown_id_is_noop() {
        let log = LogStream::new();
        log.append_chunk(MessageId::new(), "lost");
        assert!(log.is_empty());
    }

    #[test]
    fn entries_keep_begin_order() {
        let log = LogStream::new();
        let first = log.begin(sender(), None, MessageKind::Instruction);
        let second = log.begin(sender(), None, MessageKind::Report);

        // Finish the second entry before the first ever gets content.
        log.append_chunk(second, "second");
        log.finalize(second);
        log.append_chunk(first, "first");
        log.finalize(first);

        let ids: Vec<MessageId> = log.entries().iter().map(|e| e.id).collect();
        assert_eq!(ids, vec![first, second]);
    }

    #[test]
    fn finalize_open_closes_everything() {
        let log = LogStream::new();
        let a = log.begin(sender(), None, MessageKind::Report);
        let b = log.begin(sender(), None, MessageKind::Report);
        log.finalize(a);

        log.finalize_open();

        assert!(log.entries().iter().all(|e| !e.is_streaming));
        log.append_chunk(b, "late");
        assert!(log.entry(b).unwrap().content.is_empty());
    }
}
