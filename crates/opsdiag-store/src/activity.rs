//! Active-set tracking
//!
//! Records which teams and resources the current run touches. This is a
//! presentation aid for topology highlighting, not a concurrency
//! construct: the engine writes it at plan time and clears it when the
//! run ends, and a rendering surface may read it at any point in between.

use dashmap::DashSet;
use opsdiag_model::{ResourceId, TeamId};

/// Teams and resources touched by the run in flight
#[derive(Debug, Default)]
pub struct ActivityBoard {
    teams: DashSet<TeamId>,
    resources: DashSet<ResourceId>,
}

impl ActivityBoard {
    /// Create an empty board
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Mark a team and its resource active
    pub fn mark(&self, team_id: TeamId, resource_id: ResourceId) {
        self.teams.insert(team_id);
        self.resources.insert(resource_id);
    }

    /// Clear both sets
    pub fn clear(&self) {
        self.teams.clear();
        self.resources.clear();
    }

    /// True while the team is part of the active run
    #[must_use]
    pub fn team_active(&self, team_id: TeamId) -> bool {
        self.teams.contains(&team_id)
    }

    /// True while the resource is part of the active run
    #[must_use]
    pub fn resource_active(&self, resource_id: ResourceId) -> bool {
        self.resources.contains(&resource_id)
    }

    /// Snapshot of active team ids
    #[must_use]
    pub fn active_teams(&self) -> Vec<TeamId> {
        self.teams.iter().map(|t| *t).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mark_and_clear() {
        let board = ActivityBoard::new();
        let (team, resource) = (TeamId::new(), ResourceId::new());

        board.mark(team, resource);
        assert!(board.team_active(team));
        assert!(board.resource_active(resource));

        board.clear();
        assert!(!board.team_active(team));
        assert!(!board.resource_active(resource));
    }
}
