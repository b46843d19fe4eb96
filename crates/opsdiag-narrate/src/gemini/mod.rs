//! Gemini-backed live narration
//!
//! Wraps the `streamGenerateContent` SSE endpoint. The same client powers
//! the free-form chat feature and, through [`GeminiNarrator`], the
//! diagnosis call sites, so the live backend is a drop-in replacement for
//! the scripted producer.
//!
//! Failure policy: a producer never surfaces transport or API errors to
//! its consumer. Any failure ends the stream with a single apologetic
//! fallback fragment, which lands inline in the log like any other text.

use crate::error::NarrateError;
use crate::stream::{Narrator, TextStream};
use futures::StreamExt;
use opsdiag_model::{Agent, AgentConfig, Team};
use reqwest::Client;

mod types;
use crate::sse::{parse_data_lines, SseBuffer};
use types::{Content, GenerateContentRequest, GenerateContentResponse, GenerationConfig};

/// Fragment yielded when the live backend cannot be reached
pub const FALLBACK_FRAGMENT: &str =
    "Apologies, the live diagnosis backend is unreachable right now. Please retry shortly.";

const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";

/// Client for the Gemini streaming completion API
#[derive(Debug, Clone)]
pub struct GeminiClient {
    api_key: String,
    client: Client,
    base_url: String,
}

impl GeminiClient {
    /// Create a client with an explicit API key
    #[must_use]
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            client: Client::new(),
            base_url: DEFAULT_BASE_URL.to_string(),
        }
    }

    /// Create a client from the `GEMINI_API_KEY` environment variable
    ///
    /// # Errors
    /// `NarrateError::MissingApiKey` when the variable is unset or empty.
    pub fn from_env() -> Result<Self, NarrateError> {
        match std::env::var("GEMINI_API_KEY") {
            Ok(key) if !key.trim().is_empty() => Ok(Self::new(key)),
            _ => Err(NarrateError::MissingApiKey),
        }
    }

    /// With a custom endpoint base
    #[inline]
    #[must_use]
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Stream generated text for a prompt
    ///
    /// Fragments are the `text` parts of each SSE frame, in arrival order.
    /// Transport and API errors terminate the stream with
    /// [`FALLBACK_FRAGMENT`].
    #[must_use]
    pub fn stream_generate(
        &self,
        model: &str,
        system_instruction: Option<&str>,
        prompt: &str,
        temperature: f64,
    ) -> TextStream {
        let url = format!(
            "{}/models/{}:streamGenerateContent?alt=sse&key={}",
            self.base_url, model, self.api_key
        );
        let request = GenerateContentRequest {
            contents: vec![Content::user(prompt)],
            system_instruction: system_instruction.map(Content::system),
            generation_config: GenerationConfig { temperature },
        };
        let client = self.client.clone();

        Box::pin(async_stream::stream! {
            let response = match client.post(&url).json(&request).send().await {
                Ok(response) => response,
                Err(error) => {
                    tracing::warn!(%error, "narration request failed");
                    yield FALLBACK_FRAGMENT.to_string();
                    return;
                }
            };

            if let Err(error) = response.error_for_status_ref() {
                tracing::warn!(%error, "narration request rejected");
                yield FALLBACK_FRAGMENT.to_string();
                return;
            }

            let mut byte_stream = response.bytes_stream();
            let mut sse_buffer = SseBuffer::new();

            while let Some(chunk) = byte_stream.next().await {
                let chunk = match chunk {
                    Ok(chunk) => chunk,
                    Err(error) => {
                        tracing::warn!(%error, "narration stream interrupted");
                        yield FALLBACK_FRAGMENT.to_string();
                        return;
                    }
                };
                sse_buffer.push_chunk(&chunk);

                while let Some(block) = sse_buffer.next_event_block() {
                    for data in parse_data_lines(&block) {
                        let Ok(frame) = serde_json::from_str::<GenerateContentResponse>(data)
                        else {
                            continue;
                        };

                        if let Some(error) = frame.error {
                            tracing::warn!(message = %error.message, "narration api error");
                            yield FALLBACK_FRAGMENT.to_string();
                            return;
                        }

                        for candidate in frame.candidates.unwrap_or_default() {
                            let Some(content) = candidate.content else {
                                continue;
                            };
                            for part in content.parts {
                                if let Some(text) = part.text {
                                    if !text.is_empty() {
                                        yield text;
                                    }
                                }
                            }
                        }
                    }
                }
            }
        })
    }

    /// Stream a free-form chat reply
    #[must_use]
    pub fn stream_chat(&self, prompt: &str, model: &str) -> TextStream {
        self.stream_generate(model, None, prompt, 0.7)
    }
}

/// Live [`Narrator`] backed by [`GeminiClient`]
pub struct GeminiNarrator {
    client: GeminiClient,
    defaults: AgentConfig,
}

impl GeminiNarrator {
    /// Create a narrator with default generation settings
    #[must_use]
    pub fn new(client: GeminiClient) -> Self {
        Self {
            client,
            defaults: AgentConfig::default(),
        }
    }

    /// With different default generation settings
    #[inline]
    #[must_use]
    pub fn with_defaults(mut self, defaults: AgentConfig) -> Self {
        self.defaults = defaults;
        self
    }

    fn config_for<'a>(&'a self, agent: &'a Agent) -> &'a AgentConfig {
        agent.config.as_ref().unwrap_or(&self.defaults)
    }
}

impl Narrator for GeminiNarrator {
    fn worker_report(&self, agent: &Agent, task: &str, context: Option<&str>) -> TextStream {
        let config = self.config_for(agent);
        let prompt = worker_prompt(agent, task, context);
        let system = if config.system_instruction.is_empty() {
            None
        } else {
            Some(config.system_instruction.as_str())
        };
        self.client
            .stream_generate(&config.model, system, &prompt, config.temperature)
    }

    fn team_summary(
        &self,
        team: &Team,
        instruction: &str,
        worker_reports: &[String],
    ) -> TextStream {
        let config = self.config_for(&team.supervisor);
        let prompt = summary_prompt(team, instruction, worker_reports);
        self.client
            .stream_generate(&config.model, None, &prompt, config.temperature)
    }
}

fn worker_prompt(agent: &Agent, task: &str, context: Option<&str>) -> String {
    let mut prompt = format!(
        "You are {}, a specialist in {}. Execute the following diagnosis task \
         and narrate your observations concisely.\nTask: {}\n",
        agent.name,
        agent.specialty_or_name(),
        task
    );
    if let Some(context) = context {
        prompt.push_str(&format!("Context: {context}\n"));
    }
    prompt.push_str(
        "End your report with a line of the exact form \
         SUMMARY: {\"warnings\": <int>, \"critical\": <int>}",
    );
    prompt
}

fn summary_prompt(team: &Team, instruction: &str, worker_reports: &[String]) -> String {
    let mut prompt = format!(
        "You supervise {}. Summarize the following specialist reports into one \
         short assessment for the instruction: {}\n",
        team.name, instruction
    );
    for (index, report) in worker_reports.iter().enumerate() {
        prompt.push_str(&format!("Report {}:\n{}\n", index + 1, report));
    }
    prompt
}

#[cfg(test)]
mod tests {
    use super::*;
    use futures::StreamExt;
    use opsdiag_model::{AgentRole, ResourceId};

    #[test]
    fn worker_prompt_carries_task_and_marker_convention() {
        let agent = Agent::worker("Query Analyst", "slow query analysis");
        let prompt = worker_prompt(&agent, "Check indexes.", Some("prod incident"));

        assert!(prompt.contains("Check indexes."));
        assert!(prompt.contains("prod incident"));
        assert!(prompt.contains("SUMMARY: {\"warnings\": <int>, \"critical\": <int>}"));
    }

    #[test]
    fn summary_prompt_numbers_reports() {
        let team = Team::new(
            "Order DB Team",
            ResourceId::new(),
            Agent::new("sup", AgentRole::TeamSupervisor),
        );
        let reports = vec!["alpha".to_string(), "beta".to_string()];
        let prompt = summary_prompt(&team, "Analyze the database.", &reports);

        assert!(prompt.contains("Report 1:\nalpha"));
        assert!(prompt.contains("Report 2:\nbeta"));
    }

    #[tokio::test]
    async fn unreachable_backend_yields_fallback_fragment() {
        let client = GeminiClient::new("test-key").with_base_url("http://127.0.0.1:1");
        let fragments: Vec<String> = client
            .stream_generate("gemini-2.0-flash", None, "hello", 0.4)
            .collect()
            .await;

        assert_eq!(fragments, vec![FALLBACK_FRAGMENT.to_string()]);
    }

    #[test]
    fn from_env_requires_key() {
        // Only meaningful when the variable is absent in the test env.
        if std::env::var("GEMINI_API_KEY").is_err() {
            assert!(matches!(
                GeminiClient::from_env(),
                Err(NarrateError::MissingApiKey)
            ));
        }
    }
}
