//! Analysis configuration: optional LLM credentials and call budget.
//!
//! | Env | Default | Description |
//! |-----|---------|-------------|
//! | TWINSIGHT_LLM_API_KEY / OPENROUTER_API_KEY | unset | Bearer key. Unset or blank disables the LLM path. |
//! | TWINSIGHT_LLM_MODEL | meta-llama/llama-3.3-70b-instruct | Model identifier. |
//! | TWINSIGHT_LLM_API_URL | https://openrouter.ai/api/v1 | OpenAI-compatible base URL. |
//! | TWINSIGHT_LLM_TIMEOUT_SECS | 20 | Client timeout for one completion. |
//! | TWINSIGHT_LLM_TEMPERATURE | 0.65 | Sampling temperature (0.0–2.0). |
//! | TWINSIGHT_LLM_MAX_TOKENS | 600 | Completion token budget. |
//!
//! A TOML file with an `[llm]` table can be loaded instead; values in the file win over env.

use crate::error::ConfigError;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use std::time::Duration;

pub const DEFAULT_API_URL: &str = "https://openrouter.ai/api/v1";
pub const DEFAULT_MODEL: &str = "meta-llama/llama-3.3-70b-instruct";

fn default_api_url() -> String {
    DEFAULT_API_URL.to_string()
}

fn default_model() -> String {
    DEFAULT_MODEL.to_string()
}

fn default_timeout_secs() -> u64 {
    20
}

fn default_temperature() -> f32 {
    0.65
}

fn default_max_tokens() -> u32 {
    600
}

/// Credentials and budget for the external completion service.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LlmConfig {
    pub api_key: String,
    #[serde(default = "default_model")]
    pub model: String,
    #[serde(default = "default_api_url")]
    pub api_url: String,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    #[serde(default = "default_temperature")]
    pub temperature: f32,
    #[serde(default = "default_max_tokens")]
    pub max_tokens: u32,
}

impl LlmConfig {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into().trim().to_string(),
            model: default_model(),
            api_url: default_api_url(),
            timeout_secs: default_timeout_secs(),
            temperature: default_temperature(),
            max_tokens: default_max_tokens(),
        }
    }

    pub fn with_model(mut self, model: &str) -> Self {
        self.model = model.to_string();
        self
    }

    pub fn with_api_url(mut self, api_url: &str) -> Self {
        self.api_url = api_url.trim_end_matches('/').to_string();
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout_secs = timeout.as_secs().max(1);
        self
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs.max(1))
    }
}

/// Everything the orchestrator needs at construction time.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AnalysisConfig {
    /// `None` means rule-based analysis only.
    #[serde(default)]
    pub llm: Option<LlmConfig>,
}

impl AnalysisConfig {
    /// Rule-based only; no network calls.
    pub fn rule_based() -> Self {
        Self { llm: None }
    }

    pub fn with_llm(llm: LlmConfig) -> Self {
        Self { llm: Some(llm) }
    }

    /// Load from process environment (see module table).
    pub fn from_env() -> Self {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Load from an arbitrary variable source. Unset or unparsable values use defaults.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |name: &str| {
            lookup(name)
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty())
        };

        let Some(api_key) = get("TWINSIGHT_LLM_API_KEY").or_else(|| get("OPENROUTER_API_KEY"))
        else {
            return Self::rule_based();
        };

        let mut llm = LlmConfig::new(api_key);
        if let Some(model) = get("TWINSIGHT_LLM_MODEL") {
            llm.model = model;
        }
        if let Some(url) = get("TWINSIGHT_LLM_API_URL") {
            llm = llm.with_api_url(&url);
        }
        if let Some(secs) = get("TWINSIGHT_LLM_TIMEOUT_SECS").and_then(|v| v.parse::<u64>().ok()) {
            llm.timeout_secs = secs.max(1);
        }
        if let Some(t) = get("TWINSIGHT_LLM_TEMPERATURE").and_then(|v| v.parse::<f32>().ok()) {
            llm.temperature = t.clamp(0.0, 2.0);
        }
        if let Some(n) = get("TWINSIGHT_LLM_MAX_TOKENS").and_then(|v| v.parse::<u32>().ok()) {
            llm.max_tokens = n.max(1);
        }
        Self::with_llm(llm)
    }

    /// Load from a TOML file. A missing file, or a file without a usable key, falls back to env.
    pub fn load_from_path(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            return Ok(Self::from_env());
        }
        let content = fs::read_to_string(path)?;
        let mut config: AnalysisConfig = toml::from_str(&content)?;
        config.llm = config.llm.filter(|llm| !llm.api_key.trim().is_empty());
        if config.llm.is_none() {
            config.llm = Self::from_env().llm;
        }
        Ok(config)
    }

    pub fn llm_enabled(&self) -> bool {
        self.llm.is_some()
    }
}
