//! Teams and the monitored resources they supervise
//!
//! Every monitored resource gets exactly one team: a fixed supervisor plus
//! an ordered, mutable list of workers.

use crate::agent::{Agent, AgentRole};
use crate::ids::{AgentId, ResourceId, TeamId};
use serde::{Deserialize, Serialize};

/// Category of a monitored infrastructure resource
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResourceKind {
    /// Relational or document database
    Database,
    /// Application service
    Service,
    /// Network segment or load balancer
    Network,
    /// In-memory cache tier
    Cache,
    /// Message queue or event bus
    Queue,
}

/// A monitored infrastructure resource
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Resource {
    /// Stable identifier
    pub id: ResourceId,
    /// Display name
    pub name: String,
    /// Resource category
    pub kind: ResourceKind,
}

impl Resource {
    /// Create a resource
    #[inline]
    #[must_use]
    pub fn new(name: impl Into<String>, kind: ResourceKind) -> Self {
        Self {
            id: ResourceId::new(),
            name: name.into(),
            kind,
        }
    }
}

/// A diagnosis team bound to one resource
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Team {
    /// Stable identifier
    pub id: TeamId,
    /// The resource this team supervises
    pub resource_id: ResourceId,
    /// Display name
    pub name: String,
    /// Fixed team supervisor
    pub supervisor: Agent,
    /// Ordered worker list
    pub members: Vec<Agent>,
}

impl Team {
    /// Create a team with a supervisor and no workers
    ///
    /// The supervisor's role is forced to `TeamSupervisor` regardless of
    /// how the agent was constructed.
    #[inline]
    #[must_use]
    pub fn new(name: impl Into<String>, resource_id: ResourceId, mut supervisor: Agent) -> Self {
        supervisor.role = AgentRole::TeamSupervisor;
        Self {
            id: TeamId::new(),
            resource_id,
            name: name.into(),
            supervisor,
            members: Vec::new(),
        }
    }

    /// With a worker appended
    #[inline]
    #[must_use]
    pub fn with_member(mut self, member: Agent) -> Self {
        self.members.push(member);
        self
    }

    /// Find an agent by id, supervisor first
    #[must_use]
    pub fn agent(&self, agent_id: AgentId) -> Option<&Agent> {
        if self.supervisor.id == agent_id {
            return Some(&self.supervisor);
        }
        self.members.iter().find(|m| m.id == agent_id)
    }

    /// Mutable lookup, supervisor first
    pub fn agent_mut(&mut self, agent_id: AgentId) -> Option<&mut Agent> {
        if self.supervisor.id == agent_id {
            return Some(&mut self.supervisor);
        }
        self.members.iter_mut().find(|m| m.id == agent_id)
    }

    /// Keyword used by query matching: the team name lowercased with the
    /// trailing "team" suffix stripped
    #[must_use]
    pub fn keyword(&self) -> String {
        self.name
            .to_lowercase()
            .trim_end_matches("team")
            .trim()
            .to_string()
    }
}
