//! Error types for the state containers
//!
//! Most lookup misses are deliberate no-ops (ids go stale when the
//! resource set changes mid-run); errors are reserved for operations the
//! caller must not silently lose.

use opsdiag_model::{AgentId, TeamId};

/// Store error type
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// Supervisors are fixed at team creation and cannot be removed
    #[error("agent {agent_id} is the supervisor of team {team_id} and cannot be removed")]
    SupervisorFixed {
        /// Team whose supervisor was targeted
        team_id: TeamId,
        /// The supervisor agent
        agent_id: AgentId,
    },

    /// Membership change targeted a team that does not exist
    #[error("unknown team: {0}")]
    UnknownTeam(TeamId),
}
