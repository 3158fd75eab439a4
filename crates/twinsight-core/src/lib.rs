//! Twinsight — Core library.
//! Journal analysis for the twin individuation program: lexicon scorer, feedback composer,
//! LLM adapter with rule-based fallback, and weekly insight aggregation.

pub mod analyzer;
pub mod config;
pub mod error;
pub mod feedback;
pub mod insights;
pub mod lexicon;
pub mod llm;
pub mod orchestrator;
pub mod types;

pub use analyzer::analyze;
pub use config::{AnalysisConfig, LlmConfig};
pub use error::{ConfigError, LlmError};
pub use feedback::compose_feedback;
pub use insights::{history, weekly_insights, HistoryEntry, JournalRecord, WeeklyInsights};
pub use llm::{CompletionClient, LlmAnalyzer, OpenRouterClient};
pub use orchestrator::JournalAnalyzer;
pub use types::{AnalysisRequest, AnalysisResult, AnalysisSource, SentimentLabel};

/// Minimum entry length the HTTP layer accepts, in characters.
pub const MIN_ENTRY_CHARS: usize = 20;

pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
