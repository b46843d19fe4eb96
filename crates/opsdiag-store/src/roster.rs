//! Team roster
//!
//! The canonical Team/Agent collection. The roster is a passive container:
//! only the diagnosis engine mutates agent state, through the narrow update
//! operations below. Status and findings updates on unknown ids are silent
//! no-ops because ids can go stale if the resource set changes mid-run.

use crate::error::StoreError;
use indexmap::IndexMap;
use opsdiag_model::{Agent, AgentId, AgentRole, AgentStatus, Findings, Team, TeamId};
use parking_lot::RwLock;

/// Shared Team/Agent state store
#[derive(Debug, Default)]
pub struct TeamRoster {
    teams: RwLock<IndexMap<TeamId, Team>>,
}

impl TeamRoster {
    /// Create an empty roster
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a roster from generated teams
    #[must_use]
    pub fn from_teams(teams: Vec<Team>) -> Self {
        let roster = Self::new();
        for team in teams {
            roster.insert_team(team);
        }
        roster
    }

    /// Register a team. Re-inserting an existing id replaces the team.
    pub fn insert_team(&self, team: Team) {
        self.teams.write().insert(team.id, team);
    }

    /// Snapshot of all teams in insertion order
    #[must_use]
    pub fn teams(&self) -> Vec<Team> {
        self.teams.read().values().cloned().collect()
    }

    /// Snapshot of a single team
    #[must_use]
    pub fn team(&self, team_id: TeamId) -> Option<Team> {
        self.teams.read().get(&team_id).cloned()
    }

    /// Number of registered teams
    #[must_use]
    pub fn len(&self) -> usize {
        self.teams.read().len()
    }

    /// True when no teams are registered
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.teams.read().is_empty()
    }

    /// Snapshot of one agent within a team
    #[must_use]
    pub fn agent(&self, team_id: TeamId, agent_id: AgentId) -> Option<Agent> {
        self.teams
            .read()
            .get(&team_id)
            .and_then(|t| t.agent(agent_id))
            .cloned()
    }

    /// Replace an agent's status
    ///
    /// Locates the agent by id within the team, supervisor first, then
    /// members. No-op if the team or agent is unknown. Idempotent:
    /// re-applying the same status has no further effect.
    pub fn set_agent_status(&self, team_id: TeamId, agent_id: AgentId, status: AgentStatus) {
        let mut teams = self.teams.write();
        let Some(agent) = teams.get_mut(&team_id).and_then(|t| t.agent_mut(agent_id)) else {
            tracing::debug!(%team_id, %agent_id, "status update on unknown agent ignored");
            return;
        };
        agent.status = status;
    }

    /// Replace an agent's findings with the freshly parsed per-step counts
    ///
    /// Replace, not accumulate: the stored findings reflect the agent's most
    /// recent task only. Session-level totals are accumulated by the engine.
    /// No-op if the team or agent is unknown.
    pub fn record_findings(&self, team_id: TeamId, agent_id: AgentId, findings: Findings) {
        let mut teams = self.teams.write();
        let Some(agent) = teams.get_mut(&team_id).and_then(|t| t.agent_mut(agent_id)) else {
            tracing::debug!(%team_id, %agent_id, "findings update on unknown agent ignored");
            return;
        };
        agent.findings = findings;
    }

    /// Append a worker to a team's member list
    ///
    /// # Errors
    /// `StoreError::UnknownTeam` if the team does not exist.
    pub fn add_member(&self, team_id: TeamId, mut member: Agent) -> Result<(), StoreError> {
        let mut teams = self.teams.write();
        let team = teams
            .get_mut(&team_id)
            .ok_or(StoreError::UnknownTeam(team_id))?;
        member.role = AgentRole::Worker;
        team.members.push(member);
        Ok(())
    }

    /// Remove a worker from a team's member list
    ///
    /// # Errors
    /// - `StoreError::UnknownTeam` if the team does not exist
    /// - `StoreError::SupervisorFixed` if the id names the team supervisor
    pub fn remove_member(&self, team_id: TeamId, agent_id: AgentId) -> Result<(), StoreError> {
        let mut teams = self.teams.write();
        let team = teams
            .get_mut(&team_id)
            .ok_or(StoreError::UnknownTeam(team_id))?;

        if team.supervisor.id == agent_id {
            return Err(StoreError::SupervisorFixed { team_id, agent_id });
        }

        team.members.retain(|m| m.id != agent_id);
        Ok(())
    }

    /// Reset every agent in the given teams to `Idle`
    ///
    /// Used by the engine when a run is cancelled mid-flight.
    pub fn reset_statuses(&self, team_ids: &[TeamId]) {
        let mut teams = self.teams.write();
        for team_id in team_ids {
            if let Some(team) = teams.get_mut(team_id) {
                team.supervisor.status = AgentStatus::Idle;
                for member in &mut team.members {
                    member.status = AgentStatus::Idle;
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use opsdiag_model::ResourceId;

    fn sample_team() -> Team {
        Team::new(
            "Order DB Team",
            ResourceId::new(),
            Agent::new("DB Supervisor", AgentRole::TeamSupervisor),
        )
        .with_member(Agent::worker("Query Analyst", "slow query analysis"))
        .with_member(Agent::worker("Replication Checker", "replication lag"))
    }

    #[test]
    fn status_update_is_idempotent() {
        let roster = TeamRoster::new();
        let team = sample_team();
        let (team_id, worker_id) = (team.id, team.members[0].id);
        roster.insert_team(team);

        roster.set_agent_status(team_id, worker_id, AgentStatus::Working);
        roster.set_agent_status(team_id, worker_id, AgentStatus::Working);

        assert_eq!(
            roster.agent(team_id, worker_id).unwrap().status,
            AgentStatus::Working
        );
    }

    #[test]
    fn status_update_on_unknown_agent_is_noop() {
        let roster = TeamRoster::new();
        let team = sample_team();
        let team_id = team.id;
        roster.insert_team(team);

        roster.set_agent_status(team_id, AgentId::new(), AgentStatus::Error);
        roster.set_agent_status(TeamId::new(), AgentId::new(), AgentStatus::Error);

        let team = roster.team(team_id).unwrap();
        assert_eq!(team.supervisor.status, AgentStatus::Idle);
        assert!(team.members.iter().all(|m| m.status == AgentStatus::Idle));
    }

    #[test]
    fn findings_are_replaced_not_merged() {
        let roster = TeamRoster::new();
        let team = sample_team();
        let (team_id, worker_id) = (team.id, team.members[0].id);
        roster.insert_team(team);

        roster.record_findings(team_id, worker_id, Findings::new(2, 1));
        roster.record_findings(team_id, worker_id, Findings::new(1, 0));

        assert_eq!(
            roster.agent(team_id, worker_id).unwrap().findings,
            Findings::new(1, 0)
        );
    }

    #[test]
    fn supervisor_cannot_be_removed() {
        let roster = TeamRoster::new();
        let team = sample_team();
        let (team_id, sup_id) = (team.id, team.supervisor.id);
        roster.insert_team(team);

        let result = roster.remove_member(team_id, sup_id);
        assert!(matches!(result, Err(StoreError::SupervisorFixed { .. })));
        assert!(roster.agent(team_id, sup_id).is_some());
    }

    #[test]
    fn member_add_and_remove() {
        let roster = TeamRoster::new();
        let team = sample_team();
        let team_id = team.id;
        roster.insert_team(team);

        let extra = Agent::worker("Storage Checker", "disk usage");
        let extra_id = extra.id;
        roster.add_member(team_id, extra).unwrap();
        assert_eq!(roster.team(team_id).unwrap().members.len(), 3);

        roster.remove_member(team_id, extra_id).unwrap();
        assert_eq!(roster.team(team_id).unwrap().members.len(), 2);
    }

    #[test]
    fn reset_statuses_idles_whole_team() {
        let roster = TeamRoster::new();
        let team = sample_team();
        let (team_id, sup_id, worker_id) = (team.id, team.supervisor.id, team.members[1].id);
        roster.insert_team(team);

        roster.set_agent_status(team_id, sup_id, AgentStatus::Waiting);
        roster.set_agent_status(team_id, worker_id, AgentStatus::Working);
        roster.reset_statuses(&[team_id]);

        let team = roster.team(team_id).unwrap();
        assert_eq!(team.supervisor.status, AgentStatus::Idle);
        assert!(team.members.iter().all(|m| m.status == AgentStatus::Idle));
    }

    #[test]
    fn teams_keep_insertion_order() {
        let roster = TeamRoster::new();
        let first = sample_team();
        let second = Team::new(
            "Cache Team",
            ResourceId::new(),
            Agent::new("Cache Supervisor", AgentRole::TeamSupervisor),
        );
        let (first_id, second_id) = (first.id, second.id);
        roster.insert_team(first);
        roster.insert_team(second);

        let ids: Vec<TeamId> = roster.teams().iter().map(|t| t.id).collect();
        assert_eq!(ids, vec![first_id, second_id]);
    }
}
