//! Team provisioning
//!
//! Setup-time generation of the roster: one team per monitored resource,
//! with a specialist worker set chosen by resource kind. Runs once when
//! the inventory is loaded; later membership changes go through the
//! roster's add/remove operations.

use opsdiag_model::{Agent, AgentRole, Resource, ResourceKind, Team};

fn specialists(kind: ResourceKind) -> &'static [(&'static str, &'static str)] {
    match kind {
        ResourceKind::Database => &[
            ("Query Analyst", "slow query analysis"),
            ("Replication Monitor", "replication lag"),
            ("Storage Auditor", "storage growth"),
        ],
        ResourceKind::Service => &[
            ("Latency Profiler", "request latency"),
            ("Error Rate Monitor", "error rates"),
        ],
        ResourceKind::Network => &[
            ("Packet Inspector", "packet loss"),
            ("Route Verifier", "routing tables"),
        ],
        ResourceKind::Cache => &[
            ("Hit Rate Analyst", "hit ratio"),
            ("Eviction Monitor", "eviction pressure"),
        ],
        ResourceKind::Queue => &[
            ("Backlog Monitor", "consumer lag"),
            ("Throughput Profiler", "publish throughput"),
        ],
    }
}

/// Generate one team per resource
#[must_use]
pub fn provision_teams(resources: &[Resource]) -> Vec<Team> {
    resources
        .iter()
        .map(|resource| {
            let supervisor = Agent::new(
                format!("{} Supervisor", resource.name),
                AgentRole::TeamSupervisor,
            );
            let mut team = Team::new(format!("{} Team", resource.name), resource.id, supervisor);
            for (name, specialty) in specialists(resource.kind) {
                team.members.push(Agent::worker(*name, *specialty));
            }
            tracing::debug!(team = %team.name, workers = team.members.len(), "team provisioned");
            team
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn one_team_per_resource() {
        let resources = vec![
            Resource::new("Order DB", ResourceKind::Database),
            Resource::new("Payments API", ResourceKind::Service),
        ];

        let teams = provision_teams(&resources);

        assert_eq!(teams.len(), 2);
        assert_eq!(teams[0].name, "Order DB Team");
        assert_eq!(teams[0].resource_id, resources[0].id);
        assert_eq!(teams[0].members.len(), 3);
        assert_eq!(teams[1].members.len(), 2);
    }

    #[test]
    fn workers_carry_specialties() {
        let resources = vec![Resource::new("Session Cache", ResourceKind::Cache)];
        let teams = provision_teams(&resources);

        let specialties: Vec<&str> = teams[0]
            .members
            .iter()
            .map(Agent::specialty_or_name)
            .collect();
        assert_eq!(specialties, vec!["hit ratio", "eviction pressure"]);
    }

    #[test]
    fn supervisors_are_supervisors() {
        let resources = vec![Resource::new("Edge Network", ResourceKind::Network)];
        let teams = provision_teams(&resources);
        assert_eq!(teams[0].supervisor.role, AgentRole::TeamSupervisor);
        assert_eq!(teams[0].supervisor.name, "Edge Network Supervisor");
    }
}
