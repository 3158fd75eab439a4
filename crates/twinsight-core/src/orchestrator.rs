//! Analysis orchestrator: the single entry point the HTTP layer calls.
//! LLM first when configured, rule-based analyzer on any miss. Never fails.

use crate::analyzer;
use crate::config::AnalysisConfig;
use crate::llm::{CompletionClient, LlmAnalyzer};
use crate::types::{AnalysisRequest, AnalysisResult};
use std::sync::Arc;
use std::time::Duration;

/// Stateless and `Send + Sync`; share one instance behind an `Arc`.
#[derive(Clone, Default)]
pub struct JournalAnalyzer {
    llm: Option<LlmAnalyzer>,
}

impl JournalAnalyzer {
    pub fn new(config: &AnalysisConfig) -> Self {
        Self {
            llm: config.llm.as_ref().map(LlmAnalyzer::from_config),
        }
    }

    /// Rule-based only.
    pub fn rule_based() -> Self {
        Self { llm: None }
    }

    /// Use a custom completion backend (tests, alternate providers).
    pub fn with_client(client: Arc<dyn CompletionClient>, timeout: Duration) -> Self {
        Self {
            llm: Some(LlmAnalyzer::new(client, timeout)),
        }
    }

    pub fn llm_enabled(&self) -> bool {
        self.llm.is_some()
    }

    pub async fn analyze_entry(&self, request: &AnalysisRequest) -> AnalysisResult {
        let week = request.week_number();

        if let Some(llm) = &self.llm {
            if let Some(result) = llm.try_analyze(request).await {
                tracing::info!(
                    target: "twinsight::orchestrator",
                    source = "llm",
                    score = result.sentiment_score,
                    themes = result.themes.len(),
                    week = week,
                    "journal entry analyzed"
                );
                return result;
            }
        }

        let result = analyzer::analyze(&request.text, request.mood_label(), week);
        tracing::info!(
            target: "twinsight::orchestrator",
            source = "rule_based",
            llm_configured = self.llm.is_some(),
            score = result.sentiment_score,
            themes = result.themes.len(),
            week = week,
            "journal entry analyzed"
        );
        result
    }
}
