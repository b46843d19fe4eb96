//! Delegation
//!
//! Splits a team-level instruction into (worker, task) pairs. Workers are
//! assigned in member order; a team with no workers yields an empty
//! delegation and the supervisor reports alone.

use crate::error::DelegateError;
use async_trait::async_trait;
use opsdiag_model::{DelegationStep, Team};

/// Splits one plan step across a team's workers
#[async_trait]
pub trait Delegator: Send + Sync {
    /// Produce one task per selected worker
    async fn delegate(
        &self,
        team: &Team,
        instruction: &str,
    ) -> Result<Vec<DelegationStep>, DelegateError>;
}

/// Specialty-based delegator
///
/// Every worker gets one task derived from its specialty, with the team
/// instruction carried along as context.
#[derive(Debug, Clone, Copy, Default)]
pub struct SpecialtyDelegator;

impl SpecialtyDelegator {
    /// Create a specialty delegator
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl Delegator for SpecialtyDelegator {
    async fn delegate(
        &self,
        team: &Team,
        instruction: &str,
    ) -> Result<Vec<DelegationStep>, DelegateError> {
        let steps = team
            .members
            .iter()
            .map(|worker| {
                DelegationStep::new(
                    worker.id,
                    format!(
                        "Execute {}. Context: {}",
                        worker.specialty_or_name(),
                        instruction
                    ),
                )
            })
            .collect();
        Ok(steps)
    }
}
