//! Scripted narration
//!
//! In-process producer that fakes token-by-token generation from canned
//! phrase lists, pacing fragments with a configurable delay. Worker
//! narration ends with a summary marker whose counts are derived
//! deterministically from the task text, so repeated runs over the same
//! plan produce the same findings.

use crate::stream::{Narrator, TextStream};
use crate::summary::summary_line;
use opsdiag_model::{Agent, Findings, Team};
use std::time::Duration;

const WORKER_PHRASES: &[&str] = &[
    "Collecting recent metrics for the target.",
    "Cross-referencing the last deployment window.",
    "Sampling live traffic for anomalies.",
    "Comparing against the seven day baseline.",
    "Inspecting error budgets and saturation.",
    "Correlating with upstream dependency health.",
];

const SUMMARY_PHRASES: &[&str] = &[
    "All worker reports are in.",
    "Consolidating the findings below.",
    "The team's assessment follows.",
];

/// Canned streaming producer for worker and team narration
#[derive(Debug, Clone)]
pub struct ScriptedNarrator {
    token_delay: Duration,
}

impl ScriptedNarrator {
    /// Create a narrator with the default pacing
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self {
            token_delay: Duration::from_millis(30),
        }
    }

    /// With a custom per-token delay (zero disables pacing)
    #[inline]
    #[must_use]
    pub fn with_token_delay(mut self, delay: Duration) -> Self {
        self.token_delay = delay;
        self
    }

    fn stream_text(text: String, delay: Duration) -> TextStream {
        Box::pin(async_stream::stream! {
            for token in tokenize(&text) {
                if !delay.is_zero() {
                    tokio::time::sleep(delay).await;
                }
                yield token;
            }
        })
    }
}

impl Default for ScriptedNarrator {
    fn default() -> Self {
        Self::new()
    }
}

impl Narrator for ScriptedNarrator {
    fn worker_report(&self, agent: &Agent, task: &str, context: Option<&str>) -> TextStream {
        let mut text = format!(
            "Starting {}: {}\n",
            agent.specialty_or_name(),
            task.trim_end_matches('.')
        );
        if let Some(context) = context {
            text.push_str(&format!("Context noted: {context}\n"));
        }

        let seed = fold_text(task);
        for index in 0..3 {
            let phrase = WORKER_PHRASES[(seed as usize + index) % WORKER_PHRASES.len()];
            text.push_str(phrase);
            text.push('\n');
        }

        let findings = derive_findings(seed);
        text.push_str(&summary_line(findings));

        Self::stream_text(text, self.token_delay)
    }

    fn team_summary(
        &self,
        team: &Team,
        instruction: &str,
        worker_reports: &[String],
    ) -> TextStream {
        let seed = fold_text(instruction);
        let phrase = SUMMARY_PHRASES[seed as usize % SUMMARY_PHRASES.len()];

        let text = format!(
            "Team report for {}: {} {} specialist task(s) executed for \"{}\".",
            team.name,
            phrase,
            worker_reports.len(),
            instruction.trim_end_matches('.')
        );

        Self::stream_text(text, self.token_delay)
    }
}

/// Split text into whitespace-delimited fragments, keeping the separator
/// on the preceding fragment so concatenation reproduces the input exactly
fn tokenize(text: &str) -> Vec<String> {
    let mut tokens = Vec::new();
    let mut current = String::new();

    for ch in text.chars() {
        current.push(ch);
        if ch.is_whitespace() {
            tokens.push(std::mem::take(&mut current));
        }
    }
    if !current.is_empty() {
        tokens.push(current);
    }
    tokens
}

fn fold_text(text: &str) -> u32 {
    text.bytes().fold(0u32, |acc, b| {
        acc.wrapping_mul(31).wrapping_add(u32::from(b))
    })
}

fn derive_findings(seed: u32) -> Findings {
    Findings::new(seed % 3, (seed / 3) % 2)
}
