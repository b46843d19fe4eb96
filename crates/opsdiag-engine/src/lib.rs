//! opsdiag diagnosis engine
//!
//! The orchestration sequence behind a diagnosis run:
//! - Plan generation over the teams in scope
//! - Per-team delegation across specialist workers
//! - Streamed worker and team-summary narration into the log stream
//! - Findings aggregation and session bookkeeping
//!
//! # Example
//!
//! ```rust,ignore
//! use opsdiag_engine::{provision_teams, DiagnosisEngine, EngineConfig};
//! use opsdiag_model::{Resource, ResourceKind, Scope};
//! use opsdiag_store::{LogStream, SessionLedger, TeamRoster};
//! use std::sync::Arc;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let resources = vec![Resource::new("Order DB", ResourceKind::Database)];
//! let roster = Arc::new(TeamRoster::from_teams(provision_teams(&resources)));
//! let engine = DiagnosisEngine::new(
//!     EngineConfig::new(),
//!     Arc::clone(&roster),
//!     Arc::new(LogStream::new()),
//!     Arc::new(SessionLedger::new()),
//! );
//!
//! let session = engine
//!     .run_diagnosis("check Order DB consistency", &Scope::Global, &roster.teams())
//!     .await?;
//! println!("session {session} finished");
//! # Ok(())
//! # }
//! ```

#![warn(unreachable_pub)]

pub mod cancel;
pub mod config;
pub mod delegator;
pub mod engine;
pub mod error;
pub mod planner;
pub mod provision;

pub use cancel::CancelFlag;
pub use config::EngineConfig;
pub use delegator::{Delegator, SpecialtyDelegator};
pub use engine::DiagnosisEngine;
pub use error::{DelegateError, EngineError, PlanError};
pub use planner::{KeywordPlanner, Planner};
pub use provision::provision_teams;

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
