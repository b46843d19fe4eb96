//! Diagnosis sessions and run scope
//!
//! A session is created `Running` when a run starts and mutated exactly
//! once afterwards, to `Completed` or `Failed`. Both states are terminal.

use crate::agent::Findings;
use crate::ids::{ResourceId, SessionId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Subset of teams a run is restricted to
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Scope {
    /// Every team in the roster
    Global,
    /// A named topology group
    Group {
        /// Group identifier in the topology inventory
        id: String,
        /// Display label recorded on the session
        label: String,
    },
}

impl Scope {
    /// Label shown in the session history
    #[must_use]
    pub fn label(&self) -> &str {
        match self {
            Scope::Global => "Global",
            Scope::Group { label, .. } => label,
        }
    }

    /// Group id, if scoped to a group
    #[must_use]
    pub fn group_id(&self) -> Option<&str> {
        match self {
            Scope::Global => None,
            Scope::Group { id, .. } => Some(id),
        }
    }
}

/// Session state machine: `Running -> {Completed, Failed}`, both terminal
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SessionStatus {
    /// Run in flight
    Running,
    /// Run finished and findings aggregated
    Completed,
    /// Run aborted or cancelled
    Failed,
}

impl SessionStatus {
    /// True for `Completed` and `Failed`
    #[inline]
    #[must_use]
    pub fn is_terminal(self) -> bool {
        matches!(self, SessionStatus::Completed | SessionStatus::Failed)
    }
}

/// One record in the session history ledger
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DiagnosisSession {
    /// Stable identifier
    pub id: SessionId,
    /// Original query text
    pub query: String,
    /// Run start time
    pub started_at: DateTime<Utc>,
    /// Current state
    pub status: SessionStatus,
    /// Aggregated findings, summed across all workers of the run
    pub findings: Findings,
    /// Scope label captured at start
    pub scope_label: String,
    /// Group id when the run was scope-restricted
    pub scope_id: Option<String>,
    /// Resources touched by the run
    pub resource_ids: Vec<ResourceId>,
}

impl DiagnosisSession {
    /// Create a running session
    #[must_use]
    pub fn start(query: impl Into<String>, scope: &Scope, resource_ids: Vec<ResourceId>) -> Self {
        Self {
            id: SessionId::new(),
            query: query.into(),
            started_at: Utc::now(),
            status: SessionStatus::Running,
            findings: Findings::default(),
            scope_label: scope.label().to_string(),
            scope_id: scope.group_id().map(str::to_string),
            resource_ids,
        }
    }
}
