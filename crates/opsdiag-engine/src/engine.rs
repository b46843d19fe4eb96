//! The diagnosis orchestrator
//!
//! Runs one end-to-end diagnosis for a user query against a chosen scope,
//! producing a fully populated session record and a complete, time-ordered
//! log stream. The whole run is strictly sequential: teams execute in plan
//! order, workers in delegation order, and each team's summary streams
//! only after all of that team's workers finished. One outstanding await
//! at a time; the suspension points are the plan call, each delegation
//! call, and each stream fragment.
//!
//! Runs are serialized: starting a second run while one is in flight is
//! refused, so the shared stores are only ever written by a single task.

use crate::cancel::CancelFlag;
use crate::config::EngineConfig;
use crate::delegator::{Delegator, SpecialtyDelegator};
use crate::error::EngineError;
use crate::planner::{KeywordPlanner, Planner};
use futures::StreamExt;
use opsdiag_model::{
    Agent, AgentRole, AgentStatus, Findings, MessageKind, Scope, Sender, SessionId, Team, TeamId,
};
use opsdiag_narrate::{extract_summary, Narrator, ScriptedNarrator};
use opsdiag_store::{ActivityBoard, LogStream, SessionLedger, TeamRoster};
use parking_lot::RwLock;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// The diagnosis run orchestrator
///
/// Owns the lifecycle transitions of agent status and findings and the
/// creation of log entries and session records; the stores themselves are
/// passive containers shared with the rendering surface.
pub struct DiagnosisEngine {
    config: EngineConfig,
    roster: Arc<TeamRoster>,
    log: Arc<LogStream>,
    ledger: Arc<SessionLedger>,
    activity: Arc<ActivityBoard>,
    planner: Arc<dyn Planner>,
    delegator: Arc<dyn Delegator>,
    narrator: Arc<dyn Narrator>,
    global: RwLock<Agent>,
    cancel: CancelFlag,
    running: AtomicBool,
}

impl DiagnosisEngine {
    /// Create an engine over shared stores, with the default collaborators
    /// (keyword planner, specialty delegator, scripted narrator)
    #[must_use]
    pub fn new(
        config: EngineConfig,
        roster: Arc<TeamRoster>,
        log: Arc<LogStream>,
        ledger: Arc<SessionLedger>,
    ) -> Self {
        let global = Agent::new(
            config.global_supervisor_name.clone(),
            AgentRole::GlobalSupervisor,
        );
        Self {
            config,
            roster,
            log,
            ledger,
            activity: Arc::new(ActivityBoard::new()),
            planner: Arc::new(KeywordPlanner::new()),
            delegator: Arc::new(SpecialtyDelegator::new()),
            narrator: Arc::new(ScriptedNarrator::new()),
            global: RwLock::new(global),
            cancel: CancelFlag::new(),
            running: AtomicBool::new(false),
        }
    }

    /// With a custom planner
    #[must_use]
    pub fn with_planner(mut self, planner: Arc<dyn Planner>) -> Self {
        self.planner = planner;
        self
    }

    /// With a custom delegator
    #[must_use]
    pub fn with_delegator(mut self, delegator: Arc<dyn Delegator>) -> Self {
        self.delegator = delegator;
        self
    }

    /// With a custom narrator
    #[must_use]
    pub fn with_narrator(mut self, narrator: Arc<dyn Narrator>) -> Self {
        self.narrator = narrator;
        self
    }

    /// Shared team roster
    #[inline]
    #[must_use]
    pub fn roster(&self) -> &Arc<TeamRoster> {
        &self.roster
    }

    /// Shared log stream
    #[inline]
    #[must_use]
    pub fn log(&self) -> &Arc<LogStream> {
        &self.log
    }

    /// Shared session ledger
    #[inline]
    #[must_use]
    pub fn ledger(&self) -> &Arc<SessionLedger> {
        &self.ledger
    }

    /// Active-set board for topology highlighting
    #[inline]
    #[must_use]
    pub fn activity(&self) -> &Arc<ActivityBoard> {
        &self.activity
    }

    /// Handle for cancelling the run in flight
    #[inline]
    #[must_use]
    pub fn cancel_flag(&self) -> CancelFlag {
        self.cancel.clone()
    }

    /// Snapshot of the top-level supervising agent
    #[must_use]
    pub fn global_supervisor(&self) -> Agent {
        self.global.read().clone()
    }

    /// True while a run is in flight
    #[must_use]
    pub fn is_running(&self) -> bool {
        self.running.load(Ordering::SeqCst)
    }

    /// Run one end-to-end diagnosis
    ///
    /// Results land in the shared stores; the returned id locates the
    /// session record. A cancelled or empty-plan run still returns its
    /// session id, with the session marked `Failed`.
    ///
    /// # Errors
    /// - `EngineError::RunInProgress` when another run is active
    /// - `EngineError::Plan` / `EngineError::Delegate` when a collaborator
    ///   fails; the session is marked `Failed` first
    pub async fn run_diagnosis(
        &self,
        query: &str,
        scope: &Scope,
        scope_teams: &[Team],
    ) -> Result<SessionId, EngineError> {
        if self
            .running
            .compare_exchange(false, true, Ordering::SeqCst, Ordering::SeqCst)
            .is_err()
        {
            return Err(EngineError::RunInProgress);
        }
        let _guard = RunGuard { engine: self };

        let resource_ids = scope_teams.iter().map(|t| t.resource_id).collect();
        let session_id = self.ledger.start(query, scope, resource_ids);
        tracing::info!(%session_id, query, scope = scope.label(), "diagnosis run started");

        self.set_global_status(AgentStatus::Thinking);

        if self.cancel.is_cancelled() {
            self.abort_run(session_id, &[]);
            return Ok(session_id);
        }

        let plan = match self.planner.plan(query, scope_teams).await {
            Ok(plan) => plan,
            Err(error) => {
                self.set_global_status(AgentStatus::Idle);
                self.ledger.fail(session_id);
                return Err(error.into());
            }
        };

        if plan.is_empty() {
            // Terminate the record instead of leaving it running forever.
            self.set_global_status(AgentStatus::Idle);
            self.ledger.fail(session_id);
            tracing::info!(%session_id, "empty plan, nothing to diagnose");
            return Ok(session_id);
        }

        self.set_global_status(AgentStatus::Waiting);

        let planned: Vec<TeamId> = plan.iter().map(|s| s.team_id).collect();
        for step in &plan {
            if let Some(team) = self.roster.team(step.team_id) {
                self.activity.mark(team.id, team.resource_id);
            }
        }

        let mut totals = Findings::default();
        let global_id = self.global.read().id;

        for step in &plan {
            let Some(team) = self.roster.team(step.team_id) else {
                tracing::debug!(team_id = %step.team_id, "planned team no longer exists, skipped");
                continue;
            };
            tracing::info!(team = %team.name, "plan step started");

            self.roster
                .set_agent_status(team.id, team.supervisor.id, AgentStatus::Thinking);

            if self.cancel.is_cancelled() {
                self.abort_run(session_id, &planned);
                return Ok(session_id);
            }

            let delegation = match self.delegator.delegate(&team, &step.instruction).await {
                Ok(delegation) => delegation,
                Err(error) => {
                    self.abort_run(session_id, &planned);
                    return Err(error.into());
                }
            };

            self.roster
                .set_agent_status(team.id, team.supervisor.id, AgentStatus::Waiting);

            let mut worker_reports = Vec::with_capacity(delegation.len());

            for assignment in &delegation {
                let Some(worker) = team.members.iter().find(|m| m.id == assignment.worker_id)
                else {
                    tracing::debug!(worker_id = %assignment.worker_id, "delegated worker not in team, skipped");
                    continue;
                };

                self.roster
                    .set_agent_status(team.id, worker.id, AgentStatus::Working);

                let entry = self.log.begin(
                    Sender::new(worker.id, worker.name.clone()),
                    Some(team.supervisor.id),
                    MessageKind::Report,
                );
                let context = worker
                    .config
                    .as_ref()
                    .and_then(|c| c.default_context.as_deref())
                    .or(self.config.default_worker_context.as_deref());

                let mut stream = self.narrator.worker_report(worker, &assignment.task, context);
                while let Some(fragment) = stream.next().await {
                    self.log.append_chunk(entry, &fragment);
                    if self.cancel.is_cancelled() {
                        self.abort_run(session_id, &planned);
                        return Ok(session_id);
                    }
                }
                self.log.finalize(entry);

                let report = self
                    .log
                    .entry(entry)
                    .map(|e| e.content)
                    .unwrap_or_default();
                if let Some(findings) = extract_summary(&report) {
                    self.roster.record_findings(team.id, worker.id, findings);
                    totals = totals.combine(findings);
                } else {
                    tracing::warn!(worker = %worker.name, "report carried no summary marker");
                }
                worker_reports.push(report);

                self.roster
                    .set_agent_status(team.id, worker.id, AgentStatus::Completed);
            }

            self.roster
                .set_agent_status(team.id, team.supervisor.id, AgentStatus::Working);

            let entry = self.log.begin(
                Sender::new(team.supervisor.id, team.supervisor.name.clone()),
                Some(global_id),
                MessageKind::Report,
            );
            let mut stream = self
                .narrator
                .team_summary(&team, &step.instruction, &worker_reports);
            while let Some(fragment) = stream.next().await {
                self.log.append_chunk(entry, &fragment);
                if self.cancel.is_cancelled() {
                    self.abort_run(session_id, &planned);
                    return Ok(session_id);
                }
            }
            self.log.finalize(entry);

            self.roster
                .set_agent_status(team.id, team.supervisor.id, AgentStatus::Completed);
        }

        self.set_global_status(AgentStatus::Completed);
        self.ledger.complete(session_id, totals);
        tracing::info!(
            %session_id,
            warnings = totals.warnings,
            critical = totals.critical,
            "diagnosis run completed"
        );
        Ok(session_id)
    }

    fn set_global_status(&self, status: AgentStatus) {
        self.global.write().status = status;
    }

    /// Cancellation bookkeeping: close every open log entry, idle the
    /// touched agents, and fail the session. Happens-after all appends of
    /// the run so far.
    fn abort_run(&self, session_id: SessionId, planned: &[TeamId]) {
        self.log.finalize_open();
        self.roster.reset_statuses(planned);
        self.set_global_status(AgentStatus::Idle);
        self.ledger.fail(session_id);
        tracing::info!(%session_id, "diagnosis run cancelled");
    }
}

struct RunGuard<'a> {
    engine: &'a DiagnosisEngine,
}

impl Drop for RunGuard<'_> {
    fn drop(&mut self) {
        self.engine.activity.clear();
        self.engine.cancel.reset();
        self.engine.running.store(false, Ordering::SeqCst);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use opsdiag_model::{Resource, ResourceKind};

    fn engine_with_teams(resources: &[Resource]) -> DiagnosisEngine {
        let teams = crate::provision::provision_teams(resources);
        let roster = Arc::new(TeamRoster::from_teams(teams));
        DiagnosisEngine::new(
            EngineConfig::new(),
            roster,
            Arc::new(LogStream::new()),
            Arc::new(SessionLedger::new()),
        )
        .with_narrator(Arc::new(
            ScriptedNarrator::new().with_token_delay(std::time::Duration::ZERO),
        ))
    }

    #[tokio::test]
    async fn empty_scope_fails_session_without_logging() {
        let engine = engine_with_teams(&[]);

        let session_id = engine
            .run_diagnosis("check things", &Scope::Global, &[])
            .await
            .unwrap();

        let session = engine.ledger().session(session_id).unwrap();
        assert_eq!(session.status, opsdiag_model::SessionStatus::Failed);
        assert!(engine.log().is_empty());
        assert_eq!(engine.global_supervisor().status, AgentStatus::Idle);
    }

    #[tokio::test]
    async fn run_flag_clears_after_completion() {
        let resources = vec![Resource::new("Order DB", ResourceKind::Database)];
        let engine = engine_with_teams(&resources);
        let scope_teams = engine.roster().teams();

        assert!(!engine.is_running());
        engine
            .run_diagnosis("check order db", &Scope::Global, &scope_teams)
            .await
            .unwrap();
        assert!(!engine.is_running());
    }

    #[tokio::test]
    async fn activity_board_clears_after_run() {
        let resources = vec![Resource::new("Order DB", ResourceKind::Database)];
        let engine = engine_with_teams(&resources);
        let scope_teams = engine.roster().teams();
        let team_id = scope_teams[0].id;

        engine
            .run_diagnosis("check order db", &Scope::Global, &scope_teams)
            .await
            .unwrap();

        assert!(!engine.activity().team_active(team_id));
    }
}
