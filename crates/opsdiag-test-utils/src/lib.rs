//! Testing utilities for the opsdiag workspace
//!
//! Shared fixtures and a deterministic narrator for exercising the run
//! loop without pacing delays or canned phrase lists.

#![allow(missing_docs)]

use futures::stream;
use opsdiag_model::{Agent, AgentRole, Resource, ResourceId, ResourceKind, Team};
use opsdiag_narrate::{Narrator, TextStream};
use parking_lot::Mutex;
use std::collections::VecDeque;

/// The one-team, one-worker fixture used across engine tests
pub fn order_db_team() -> Team {
    Team::new(
        "Order DB Team",
        ResourceId::new(),
        Agent::new("DB Supervisor", AgentRole::TeamSupervisor),
    )
    .with_member(Agent::worker("Consistency Checker", "consistency checks"))
}

/// A small mixed inventory
pub fn demo_resources() -> Vec<Resource> {
    vec![
        Resource::new("Order DB", ResourceKind::Database),
        Resource::new("Payments API", ResourceKind::Service),
    ]
}

/// Narrator that replays exact, pre-configured fragments
///
/// Each `worker_report` call pops the next script from the queue; calls
/// beyond the configured scripts yield a single placeholder fragment.
/// `team_summary` always yields one fixed fragment.
pub struct FixedNarrator {
    worker_scripts: Mutex<VecDeque<Vec<String>>>,
    summary_text: String,
}

impl FixedNarrator {
    pub fn new(worker_scripts: Vec<Vec<&str>>) -> Self {
        Self {
            worker_scripts: Mutex::new(
                worker_scripts
                    .into_iter()
                    .map(|script| script.into_iter().map(str::to_string).collect())
                    .collect(),
            ),
            summary_text: "team summary".to_string(),
        }
    }

    pub fn with_summary_text(mut self, text: impl Into<String>) -> Self {
        self.summary_text = text.into();
        self
    }
}

impl Narrator for FixedNarrator {
    fn worker_report(&self, _agent: &Agent, _task: &str, _context: Option<&str>) -> TextStream {
        let script = self
            .worker_scripts
            .lock()
            .pop_front()
            .unwrap_or_else(|| vec!["unscripted report".to_string()]);
        Box::pin(stream::iter(script))
    }

    fn team_summary(
        &self,
        _team: &Team,
        _instruction: &str,
        _worker_reports: &[String],
    ) -> TextStream {
        Box::pin(stream::iter(vec![self.summary_text.clone()]))
    }
}
