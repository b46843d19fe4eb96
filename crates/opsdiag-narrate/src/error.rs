//! Error types for narration setup
//!
//! Producers themselves never return errors; failures inside a stream
//! become fallback fragments. These errors cover client construction only.

/// Narration error type
#[derive(Debug, thiserror::Error)]
pub enum NarrateError {
    /// The live backend needs an API key
    #[error("GEMINI_API_KEY is not set")]
    MissingApiKey,
}
