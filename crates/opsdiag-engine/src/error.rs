//! Error types for the diagnosis engine
//!
//! The run loop itself has a narrow error surface: collaborator failures
//! during planning or delegation, and the refusal to start overlapping
//! runs. Everything downstream of delegation degrades instead of failing
//! (fallback fragments, ignored markers, no-op updates).

/// Planning errors
#[derive(Debug, thiserror::Error)]
pub enum PlanError {
    /// The planning backend failed to produce a plan
    #[error("plan generation failed: {0}")]
    Failed(String),
}

/// Delegation errors
#[derive(Debug, thiserror::Error)]
pub enum DelegateError {
    /// The delegation backend failed to split the instruction
    #[error("delegation failed: {0}")]
    Failed(String),
}

/// Main engine error type
#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    /// A diagnosis run is already in flight; runs are serialized
    #[error("a diagnosis run is already in progress")]
    RunInProgress,

    /// Plan generation failed
    #[error(transparent)]
    Plan(#[from] PlanError),

    /// Delegation failed
    #[error(transparent)]
    Delegate(#[from] DelegateError),
}
