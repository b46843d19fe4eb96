//! Plan generation
//!
//! The planner turns a user query and the teams in scope into a list of
//! (team, instruction) pairs. Any deterministic selection function is
//! acceptable as long as it never returns more teams than exist in scope
//! and returns at least one team whenever both scope and query are
//! non-empty.

use crate::error::PlanError;
use async_trait::async_trait;
use opsdiag_model::{PlanStep, Team};

/// Produces the global plan for one diagnosis run
#[async_trait]
pub trait Planner: Send + Sync {
    /// Select teams and compose their instructions
    async fn plan(&self, query: &str, teams: &[Team]) -> Result<Vec<PlanStep>, PlanError>;
}

/// Keyword-matching planner
///
/// Selects every team whose name-derived keyword occurs in the query,
/// case-insensitively. When nothing matches, the first team in scope is
/// selected so a non-empty scope always yields a non-empty plan.
#[derive(Debug, Clone, Copy, Default)]
pub struct KeywordPlanner;

impl KeywordPlanner {
    /// Create a keyword planner
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    fn instruction(query: &str, team: &Team) -> String {
        format!("Analyze: {} for {}.", query.trim(), team.name)
    }
}

#[async_trait]
impl Planner for KeywordPlanner {
    async fn plan(&self, query: &str, teams: &[Team]) -> Result<Vec<PlanStep>, PlanError> {
        if teams.is_empty() || query.trim().is_empty() {
            return Ok(Vec::new());
        }

        let query_lower = query.to_lowercase();
        let mut steps: Vec<PlanStep> = teams
            .iter()
            .filter(|team| {
                let keyword = team.keyword();
                !keyword.is_empty() && query_lower.contains(&keyword)
            })
            .map(|team| PlanStep::new(team.id, Self::instruction(query, team)))
            .collect();

        if steps.is_empty() {
            let first = &teams[0];
            steps.push(PlanStep::new(first.id, Self::instruction(query, first)));
        }

        tracing::debug!(teams = steps.len(), "plan generated");
        Ok(steps)
    }
}
