//! Error types for the analysis core.
//! None of these reach the orchestrator's caller: LLM errors are absorbed by the fallback.

use thiserror::Error;

/// Failures talking to the external text-completion service.
#[derive(Error, Debug)]
pub enum LlmError {
    #[error("completion request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("completion service returned {status}: {body}")]
    Status { status: u16, body: String },

    #[error("completion response could not be decoded: {0}")]
    Decode(String),

    #[error("completion response had no content")]
    EmptyCompletion,

    #[error("completion timed out after {0:?}")]
    Timeout(std::time::Duration),

    #[error("completion client error: {0}")]
    Other(String),
}

/// Failures loading analysis configuration from disk.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("config read failed: {0}")]
    Io(#[from] std::io::Error),

    #[error("config parse failed: {0}")]
    Parse(#[from] toml::de::Error),
}
