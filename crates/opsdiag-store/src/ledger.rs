//! Session history ledger
//!
//! Append-only record of past and in-flight diagnosis runs. A session is
//! created `Running` and transitions exactly once, to `Completed` or
//! `Failed`. Transitions attempted on a terminal session are ignored, so
//! a finished record can never be observed changing.

use indexmap::IndexMap;
use opsdiag_model::{
    DiagnosisSession, Findings, ResourceId, Scope, SessionId, SessionStatus,
};
use parking_lot::RwLock;

/// Append-only diagnosis-run ledger
#[derive(Debug, Default)]
pub struct SessionLedger {
    sessions: RwLock<IndexMap<SessionId, DiagnosisSession>>,
}

impl SessionLedger {
    /// Create an empty ledger
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a new run in `Running` state
    pub fn start(
        &self,
        query: impl Into<String>,
        scope: &Scope,
        resource_ids: Vec<ResourceId>,
    ) -> SessionId {
        let session = DiagnosisSession::start(query, scope, resource_ids);
        let id = session.id;
        self.sessions.write().insert(id, session);
        id
    }

    /// Terminal transition to `Completed` with the final aggregated counts
    ///
    /// Ignored if the session is unknown or already terminal.
    pub fn complete(&self, id: SessionId, findings: Findings) {
        self.transition(id, SessionStatus::Completed, Some(findings));
    }

    /// Terminal transition to `Failed`
    ///
    /// Ignored if the session is unknown or already terminal.
    pub fn fail(&self, id: SessionId) {
        self.transition(id, SessionStatus::Failed, None);
    }

    fn transition(&self, id: SessionId, status: SessionStatus, findings: Option<Findings>) {
        let mut sessions = self.sessions.write();
        let Some(session) = sessions.get_mut(&id) else {
            tracing::debug!(%id, "transition on unknown session ignored");
            return;
        };
        if session.status.is_terminal() {
            tracing::debug!(%id, ?status, "transition on terminal session ignored");
            return;
        }
        session.status = status;
        if let Some(findings) = findings {
            session.findings = findings;
        }
    }

    /// Snapshot of a single session
    #[must_use]
    pub fn session(&self, id: SessionId) -> Option<DiagnosisSession> {
        self.sessions.read().get(&id).cloned()
    }

    /// Snapshot of all sessions in start order
    #[must_use]
    pub fn sessions(&self) -> Vec<DiagnosisSession> {
        self.sessions.read().values().cloned().collect()
    }

    /// Sessions restricted to a topology group
    #[must_use]
    pub fn sessions_for_scope(&self, scope_id: &str) -> Vec<DiagnosisSession> {
        self.sessions
            .read()
            .values()
            .filter(|s| s.scope_id.as_deref() == Some(scope_id))
            .cloned()
            .collect()
    }

    /// Number of recorded sessions
    #[must_use]
    pub fn len(&self) -> usize {
        self.sessions.read().len()
    }

    /// True when no sessions are recorded
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.sessions.read().is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn start_records_running_session() {
        let ledger = SessionLedger::new();
        let id = ledger.start("check Order DB consistency", &Scope::Global, vec![]);

        let session = ledger.session(id).unwrap();
        assert_eq!(session.status, SessionStatus::Running);
        assert_eq!(session.query, "check Order DB consistency");
    }

    #[test]
    fn complete_is_terminal() {
        let ledger = SessionLedger::new();
        let id = ledger.start("q", &Scope::Global, vec![]);

        ledger.complete(id, Findings::new(2, 1));
        ledger.fail(id);
        ledger.complete(id, Findings::new(9, 9));

        let session = ledger.session(id).unwrap();
        assert_eq!(session.status, SessionStatus::Completed);
        assert_eq!(session.findings, Findings::new(2, 1));
    }

    #[test]
    fn fail_is_terminal() {
        let ledger = SessionLedger::new();
        let id = ledger.start("q", &Scope::Global, vec![]);

        ledger.fail(id);
        ledger.complete(id, Findings::new(1, 1));

        let session = ledger.session(id).unwrap();
        assert_eq!(session.status, SessionStatus::Failed);
        assert!(session.findings.is_clean());
    }

    #[test]
    fn transition_on_unknown_session_is_noop() {
        let ledger = SessionLedger::new();
        ledger.complete(SessionId::new(), Findings::new(1, 0));
        assert!(ledger.is_empty());
    }

    #[test]
    fn sessions_keep_start_order_and_filter_by_scope() {
        let ledger = SessionLedger::new();
        let scope = Scope::Group {
            id: "g-1".to_string(),
            label: "Payments".to_string(),
        };
        let first = ledger.start("a", &Scope::Global, vec![]);
        let second = ledger.start("b", &scope, vec![]);

        let ids: Vec<SessionId> = ledger.sessions().iter().map(|s| s.id).collect();
        assert_eq!(ids, vec![first, second]);

        let scoped = ledger.sessions_for_scope("g-1");
        assert_eq!(scoped.len(), 1);
        assert_eq!(scoped[0].id, second);
    }
}
