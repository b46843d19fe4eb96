//! Agents and their run-time state
//!
//! Agents come in three roles: a single global supervisor, one supervisor
//! per team, and the workers underneath them. Status and findings are the
//! only fields mutated during a diagnosis run.

use crate::ids::AgentId;
use serde::{Deserialize, Serialize};

/// Position of an agent in the supervision hierarchy
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AgentRole {
    /// Top-level agent supervising all teams
    GlobalSupervisor,
    /// Supervisor of a single team
    TeamSupervisor,
    /// Specialist worker inside a team
    Worker,
}

/// Run-time status of an agent
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AgentStatus {
    /// Not participating in a run
    #[default]
    Idle,
    /// Producing a plan or delegation
    Thinking,
    /// Executing a task or composing a report
    Working,
    /// All assigned work finished
    Completed,
    /// Waiting on subordinates
    Waiting,
    /// Failed terminally
    Error,
}

/// Issue counters attributed to an agent or a session
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Findings {
    /// Non-critical issues found
    pub warnings: u32,
    /// Critical issues found
    pub critical: u32,
}

impl Findings {
    /// Create findings with explicit counts
    #[inline]
    #[must_use]
    pub fn new(warnings: u32, critical: u32) -> Self {
        Self { warnings, critical }
    }

    /// Sum two findings, saturating on overflow
    #[inline]
    #[must_use]
    pub fn combine(self, other: Self) -> Self {
        Self {
            warnings: self.warnings.saturating_add(other.warnings),
            critical: self.critical.saturating_add(other.critical),
        }
    }

    /// Total issue count
    #[inline]
    #[must_use]
    pub fn total(self) -> u32 {
        self.warnings.saturating_add(self.critical)
    }

    /// True when nothing was found
    #[inline]
    #[must_use]
    pub fn is_clean(self) -> bool {
        self.warnings == 0 && self.critical == 0
    }
}

/// Generation settings attached to an agent
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AgentConfig {
    /// Backend model name
    pub model: String,
    /// Sampling temperature
    pub temperature: f64,
    /// System instruction prepended to every request
    pub system_instruction: String,
    /// Default context appended to tasks when none is given
    pub default_context: Option<String>,
}

impl Default for AgentConfig {
    fn default() -> Self {
        Self {
            model: "gemini-2.0-flash".to_string(),
            temperature: 0.4,
            system_instruction: String::new(),
            default_context: None,
        }
    }
}

/// A diagnosis agent
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Agent {
    /// Stable identifier
    pub id: AgentId,
    /// Display name
    pub name: String,
    /// Hierarchy role
    pub role: AgentRole,
    /// Current run-time status
    pub status: AgentStatus,
    /// Findings from the most recent task
    pub findings: Findings,
    /// Worker specialty, used to derive delegated tasks
    pub specialty: Option<String>,
    /// Optional generation settings
    pub config: Option<AgentConfig>,
}

impl Agent {
    /// Create an idle agent with no findings
    #[inline]
    #[must_use]
    pub fn new(name: impl Into<String>, role: AgentRole) -> Self {
        Self {
            id: AgentId::new(),
            name: name.into(),
            role,
            status: AgentStatus::Idle,
            findings: Findings::default(),
            specialty: None,
            config: None,
        }
    }

    /// Create a worker with a specialty
    #[inline]
    #[must_use]
    pub fn worker(name: impl Into<String>, specialty: impl Into<String>) -> Self {
        Self::new(name, AgentRole::Worker).with_specialty(specialty)
    }

    /// With specialty
    #[inline]
    #[must_use]
    pub fn with_specialty(mut self, specialty: impl Into<String>) -> Self {
        self.specialty = Some(specialty.into());
        self
    }

    /// With generation settings
    #[inline]
    #[must_use]
    pub fn with_config(mut self, config: AgentConfig) -> Self {
        self.config = Some(config);
        self
    }

    /// Specialty, falling back to the display name
    #[inline]
    #[must_use]
    pub fn specialty_or_name(&self) -> &str {
        self.specialty.as_deref().unwrap_or(&self.name)
    }
}
