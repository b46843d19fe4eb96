//! opsdiag state containers
//!
//! Passive shared state mutated only by the diagnosis engine:
//! - `TeamRoster`: the canonical Team/Agent collection
//! - `LogStream`: the append-only log sink
//! - `SessionLedger`: the diagnosis-run history
//! - `ActivityBoard`: which teams/resources the current run touches
//!
//! All containers are cheap to share behind `Arc` and safe to read from a
//! rendering surface while a run is writing.

#![warn(unreachable_pub)]

pub mod activity;
pub mod error;
pub mod ledger;
pub mod log_stream;
pub mod roster;

pub use activity::ActivityBoard;
pub use error::StoreError;
pub use ledger::SessionLedger;
pub use log_stream::LogStream;
pub use roster::TeamRoster;
