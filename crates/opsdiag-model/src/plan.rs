//! Ephemeral planning structures
//!
//! Plan and delegation steps exist only for the duration of a run; they
//! are never persisted.

use crate::ids::{AgentId, TeamId};
use serde::{Deserialize, Serialize};

/// One (team, instruction) pair produced by the planner
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlanStep {
    /// Team assigned to this step
    pub team_id: TeamId,
    /// Instruction handed to the team supervisor
    pub instruction: String,
}

impl PlanStep {
    /// Create a plan step
    #[inline]
    #[must_use]
    pub fn new(team_id: TeamId, instruction: impl Into<String>) -> Self {
        Self {
            team_id,
            instruction: instruction.into(),
        }
    }
}

/// One (worker, task) pair produced by delegation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DelegationStep {
    /// Worker assigned to this task
    pub worker_id: AgentId,
    /// Task text handed to the worker
    pub task: String,
}

impl DelegationStep {
    /// Create a delegation step
    #[inline]
    #[must_use]
    pub fn new(worker_id: AgentId, task: impl Into<String>) -> Self {
        Self {
            worker_id,
            task: task.into(),
        }
    }
}
