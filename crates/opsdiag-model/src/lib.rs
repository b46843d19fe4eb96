//! opsdiag data model
//!
//! The shared vocabulary of the diagnosis engine:
//! - Agents, roles, statuses, and findings counters
//! - Teams bound to monitored resources
//! - Append-only log entries
//! - Diagnosis sessions and run scope
//! - Ephemeral plan and delegation steps

#![warn(unreachable_pub)]

pub mod agent;
pub mod ids;
pub mod log;
pub mod plan;
pub mod session;
pub mod team;

pub use agent::{Agent, AgentConfig, AgentRole, AgentStatus, Findings};
pub use ids::{AgentId, MessageId, ResourceId, SessionId, TeamId};
pub use log::{LogMessage, MessageKind, Sender};
pub use plan::{DelegationStep, PlanStep};
pub use session::{DiagnosisSession, Scope, SessionStatus};
pub use team::{Resource, ResourceKind, Team};

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
