//! Structured-summary extraction
//!
//! Worker narration is free text that may carry one structured payload: a
//! JSON object following the literal token `SUMMARY:`, anywhere in the
//! accumulated text. Extraction is permissive and failure is silent; a
//! missing or malformed marker simply yields nothing.

use once_cell::sync::Lazy;
use opsdiag_model::Findings;
use regex::Regex;
use serde::Deserialize;

static SUMMARY_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"SUMMARY:\s*(\{[^{}]*\})").expect("valid summary pattern"));

#[derive(Debug, Deserialize)]
struct SummaryPayload {
    warnings: u32,
    critical: u32,
}

/// Extract the findings summary from finished worker output
///
/// Returns `None` when no marker is present or the payload does not parse;
/// parsing failures are never fatal to the run.
#[must_use]
pub fn extract_summary(text: &str) -> Option<Findings> {
    let captures = SUMMARY_PATTERN.captures(text)?;
    let payload = captures.get(1)?.as_str();

    match serde_json::from_str::<SummaryPayload>(payload) {
        Ok(summary) => Some(Findings::new(summary.warnings, summary.critical)),
        Err(error) => {
            tracing::warn!(%error, "malformed summary marker ignored");
            None
        }
    }
}

/// Render the marker line a worker appends to its report
#[must_use]
pub fn summary_line(findings: Findings) -> String {
    format!(
        "SUMMARY: {{\"warnings\": {}, \"critical\": {}}}",
        findings.warnings, findings.critical
    )
}
