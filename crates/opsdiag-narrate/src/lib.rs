//! opsdiag streaming text producers
//!
//! The narration layer of the diagnosis engine:
//! - The `TextStream`/`Narrator` contract consumed by the orchestrator
//! - A scripted producer that fakes token-by-token generation
//! - A Gemini-backed live producer, also powering the chat feature
//! - Extraction of the `SUMMARY:` marker from finished worker output
//!
//! Both producers satisfy the same contract and are interchangeable from
//! the orchestrator's point of view.

#![warn(unreachable_pub)]

pub mod error;
pub mod gemini;
pub mod scripted;
mod sse;
pub mod stream;
pub mod summary;

pub use error::NarrateError;
pub use gemini::{GeminiClient, GeminiNarrator, FALLBACK_FRAGMENT};
pub use scripted::ScriptedNarrator;
pub use stream::{Narrator, TextStream};
pub use summary::{extract_summary, summary_line};
