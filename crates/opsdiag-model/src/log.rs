//! Log stream entries
//!
//! Entries start empty and streaming; content grows by appended chunks
//! until the producing stream ends, at which point the entry is finalized
//! and becomes immutable.

use crate::ids::{AgentId, MessageId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Category of a log entry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageKind {
    /// Directive from a supervisor to a subordinate
    Instruction,
    /// Work output flowing back up the hierarchy
    Report,
    /// Internal reasoning surfaced for the viewer
    Thought,
    /// Engine bookkeeping visible in the stream
    System,
}

/// Sender identity recorded on a log entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Sender {
    /// Agent id of the sender
    pub id: AgentId,
    /// Display name captured at send time
    pub name: String,
}

impl Sender {
    /// Create a sender identity
    #[inline]
    #[must_use]
    pub fn new(id: AgentId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
        }
    }
}

/// One entry in the append-only log stream
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogMessage {
    /// Stable identifier
    pub id: MessageId,
    /// Creation time
    pub timestamp: DateTime<Utc>,
    /// Sender identity
    pub from: Sender,
    /// Optional recipient
    pub to: Option<AgentId>,
    /// Accumulated content
    pub content: String,
    /// Entry category
    pub kind: MessageKind,
    /// True while the producing stream is still running
    pub is_streaming: bool,
}

impl LogMessage {
    /// Create an empty, streaming entry
    #[inline]
    #[must_use]
    pub fn open(from: Sender, to: Option<AgentId>, kind: MessageKind) -> Self {
        Self {
            id: MessageId::new(),
            timestamp: Utc::now(),
            from,
            to,
            content: String::new(),
            kind,
            is_streaming: true,
        }
    }
}
