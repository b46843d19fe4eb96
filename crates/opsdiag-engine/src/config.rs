//! Engine configuration

use serde::{Deserialize, Serialize};

/// Diagnosis engine configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Display name of the top-level supervising agent
    pub global_supervisor_name: String,
    /// Context handed to workers whose config carries none
    pub default_worker_context: Option<String>,
}

impl EngineConfig {
    /// Create the default configuration
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// With a global supervisor name
    #[inline]
    #[must_use]
    pub fn with_global_supervisor_name(mut self, name: impl Into<String>) -> Self {
        self.global_supervisor_name = name.into();
        self
    }

    /// With a default worker context
    #[inline]
    #[must_use]
    pub fn with_default_worker_context(mut self, context: impl Into<String>) -> Self {
        self.default_worker_context = Some(context.into());
        self
    }
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            global_supervisor_name: "Global Supervisor".to_string(),
            default_worker_context: None,
        }
    }
}
