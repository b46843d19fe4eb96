//! The streaming narration contract
//!
//! A producer is a lazy, finite, forward-only sequence of text fragments.
//! Exhaustion is the completion signal; there is no end sentinel. Producers
//! are not restartable: a fresh stream must be requested for a repeat run.
//!
//! Producers never surface errors as items. A backend that fails mid-way
//! yields a user-visible fallback fragment instead, so consumers can append
//! every item into the log unconditionally.

use futures::Stream;
use opsdiag_model::{Agent, Team};
use std::pin::Pin;

/// A finite, forward-only sequence of text fragments
pub type TextStream = Pin<Box<dyn Stream<Item = String> + Send>>;

/// Source of streamed narration for the two orchestrator call sites
///
/// Implementations are interchangeable from the engine's point of view:
/// the scripted producer and the live Gemini backend satisfy the same
/// contract.
pub trait Narrator: Send + Sync {
    /// Narrate one worker executing its delegated task
    ///
    /// Worker output may end with a `SUMMARY: {"warnings": w, "critical": c}`
    /// line; see [`crate::summary::extract_summary`].
    fn worker_report(&self, agent: &Agent, task: &str, context: Option<&str>) -> TextStream;

    /// Narrate a team supervisor aggregating its workers' reports
    fn team_summary(&self, team: &Team, instruction: &str, worker_reports: &[String])
        -> TextStream;
}
