//! LLM analysis adapter: prompt, completion call, and tolerant JSON extraction.
//!
//! The adapter is best-effort. Every failure (transport, non-2xx, empty completion,
//! timeout, no JSON object, unparsable JSON, missing required fields) is logged and turned
//! into `None` so the orchestrator can fall back to the rule-based analyzer.
//! Journal text goes into the prompt but is never written to logs.

use crate::config::LlmConfig;
use crate::error::LlmError;
use crate::lexicon::{fold_case, theme_vocabulary, week_theme, DEFAULT_THEME, MAX_THEMES};
use crate::types::{AnalysisRequest, AnalysisResult, AnalysisSource, SentimentLabel};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::Duration;

/// A text-completion backend. One prompt in, the model's free-form reply out.
#[async_trait]
pub trait CompletionClient: Send + Sync {
    async fn complete(&self, prompt: &str) -> Result<String, LlmError>;
}

// OpenAI-compatible request/response
#[derive(Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
    temperature: f32,
    max_tokens: u32,
}

#[derive(Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Deserialize)]
struct ChatResponse {
    #[serde(default)]
    choices: Vec<ChatChoice>,
}

#[derive(Deserialize)]
struct ChatChoice {
    message: Option<ChatMessageResponse>,
}

#[derive(Deserialize)]
struct ChatMessageResponse {
    content: Option<String>,
}

/// Chat-completion client for OpenRouter or any OpenAI-compatible endpoint.
pub struct OpenRouterClient {
    config: LlmConfig,
    client: reqwest::Client,
}

impl OpenRouterClient {
    pub fn new(config: LlmConfig) -> Self {
        let client = reqwest::Client::builder()
            .timeout(config.timeout())
            .build()
            .unwrap_or_else(|_| reqwest::Client::new());
        Self { config, client }
    }

    fn endpoint(&self) -> String {
        format!("{}/chat/completions", self.config.api_url.trim_end_matches('/'))
    }
}

#[async_trait]
impl CompletionClient for OpenRouterClient {
    async fn complete(&self, prompt: &str) -> Result<String, LlmError> {
        let body = ChatRequest {
            model: &self.config.model,
            messages: vec![ChatMessage {
                role: "user",
                content: prompt,
            }],
            temperature: self.config.temperature,
            max_tokens: self.config.max_tokens,
        };

        let res = self
            .client
            .post(self.endpoint())
            .bearer_auth(&self.config.api_key)
            .header("X-Title", "Twinsight-Journal")
            .json(&body)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    LlmError::Timeout(self.config.timeout())
                } else {
                    LlmError::Request(e)
                }
            })?;

        let status = res.status();
        if !status.is_success() {
            let body = res.text().await.unwrap_or_default();
            return Err(LlmError::Status {
                status: status.as_u16(),
                body: body.chars().take(300).collect(),
            });
        }

        let parsed: ChatResponse = res
            .json()
            .await
            .map_err(|e| LlmError::Decode(e.to_string()))?;

        parsed
            .choices
            .into_iter()
            .next()
            .and_then(|c| c.message)
            .and_then(|m| m.content)
            .filter(|c| !c.trim().is_empty())
            .ok_or(LlmError::EmptyCompletion)
    }
}

/// Builds the single user-role prompt for one journal entry.
pub fn build_prompt(request: &AnalysisRequest) -> String {
    let week = request.week_number();
    let vocabulary = theme_vocabulary().collect::<Vec<_>>().join(", ");
    let mut context = format!(
        "Program haftası: {} ({})\nRuh hali: {}",
        week,
        week_theme(week).unwrap_or(""),
        request.mood_label(),
    );
    if let Some(icon) = request.mood_icon.as_deref() {
        context.push_str(&format!(" {}", icon));
    }
    if let Some(q) = request.guided_question.as_deref().filter(|q| !q.trim().is_empty()) {
        context.push_str(&format!("\nYönlendirici soru: {}", q.trim()));
    }

    format!(
        "Sen ikiz ergenlerin bireyselleşme sürecinde uzman bir gelişim psikoloğusun. \
Aşağıdaki günlük yazısını analiz et.\n\n{}\n\nGünlük:\n\"\"\"\n{}\n\"\"\"\n\n\
SADECE aşağıdaki alanlara sahip bir JSON nesnesi döndür, başka hiçbir metin yazma:\n\
{{\n  \"sentiment\": \"positive\" | \"neutral\" | \"negative\",\n  \"sentimentScore\": 0-100 arası tam sayı,\n  \
\"themes\": en fazla 5 tema, yalnızca şu listeden: [{}],\n  \
\"meRatio\": 0 ile 1 arasında bireysel odak oranı (\"ben\" dili / toplam \"ben\" + \"biz\" dili),\n  \
\"summary\": tek cümlelik özet,\n  \"feedback\": gence hitap eden 2-3 cümlelik destekleyici geri bildirim,\n  \
\"insights\": [iki kısa içgörü]\n}}",
        context,
        request.text.trim(),
        vocabulary,
    )
}

/// Returns the first balanced `{...}` span in `text`, honoring JSON string quoting.
pub fn extract_json_object(text: &str) -> Option<&str> {
    let start = text.find('{')?;
    let mut depth = 0usize;
    let mut in_string = false;
    let mut escaped = false;

    for (i, ch) in text[start..].char_indices() {
        if escaped {
            escaped = false;
            continue;
        }
        match ch {
            '\\' if in_string => escaped = true,
            '"' => in_string = !in_string,
            '{' if !in_string => depth += 1,
            '}' if !in_string => {
                depth -= 1;
                if depth == 0 {
                    return Some(&text[start..start + i + ch.len_utf8()]);
                }
            }
            _ => {}
        }
    }
    None
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct LlmPayload {
    #[serde(default)]
    sentiment: Option<String>,
    #[serde(default, alias = "sentiment_score")]
    sentiment_score: Option<f64>,
    #[serde(default)]
    themes: Vec<String>,
    #[serde(default, alias = "me_ratio", alias = "selfRatio")]
    me_ratio: Option<f64>,
    #[serde(default)]
    summary: Option<String>,
    #[serde(default)]
    feedback: Option<String>,
    #[serde(default)]
    insights: Vec<String>,
}

/// Parses a model reply into a result. Requires `sentimentScore` and a non-empty
/// `feedback`; everything else falls back to neutral defaults.
pub fn parse_completion(raw: &str) -> Result<AnalysisResult, LlmError> {
    let json = extract_json_object(raw)
        .ok_or_else(|| LlmError::Decode("no JSON object in completion".to_string()))?;
    let payload: LlmPayload =
        serde_json::from_str(json).map_err(|e| LlmError::Decode(e.to_string()))?;

    let score = payload
        .sentiment_score
        .ok_or_else(|| LlmError::Decode("missing sentimentScore".to_string()))?
        .round()
        .clamp(0.0, 100.0) as u8;
    let feedback = payload
        .feedback
        .map(|f| f.trim().to_string())
        .filter(|f| !f.is_empty())
        .ok_or_else(|| LlmError::Decode("missing feedback".to_string()))?;

    // The label always follows the score thresholds; a disagreeing category is ignored.
    let sentiment_label = SentimentLabel::from_score(score);
    if let Some(reported) = payload.sentiment.as_deref().and_then(SentimentLabel::parse_loose) {
        if reported != sentiment_label {
            tracing::debug!(
                target: "twinsight::llm",
                reported = ?reported,
                derived = ?sentiment_label,
                score = score,
                "model sentiment category disagrees with its score"
            );
        }
    }
    let self_ratio = payload
        .me_ratio
        .filter(|r| r.is_finite())
        .unwrap_or(0.5)
        .clamp(0.0, 1.0);

    // Only the fixed vocabulary is kept, in its canonical spelling.
    let mut themes: Vec<String> = Vec::new();
    for raw in &payload.themes {
        if themes.len() == MAX_THEMES {
            break;
        }
        let folded = fold_case(raw.trim());
        let Some(theme) = theme_vocabulary().find(|v| fold_case(v) == folded) else {
            continue;
        };
        if !themes.iter().any(|t| t == theme) {
            themes.push(theme.to_string());
        }
    }
    if themes.is_empty() {
        themes.push(DEFAULT_THEME.to_string());
    }

    Ok(AnalysisResult {
        sentiment_label,
        sentiment_score: score,
        self_ratio,
        group_ratio: 1.0 - self_ratio,
        themes,
        feedback,
        summary: payload
            .summary
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty()),
        insights: payload
            .insights
            .into_iter()
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect(),
        source: AnalysisSource::Llm,
    })
}

/// Wraps a [`CompletionClient`] with prompt construction, a hard deadline and parsing.
#[derive(Clone)]
pub struct LlmAnalyzer {
    client: Arc<dyn CompletionClient>,
    timeout: Duration,
}

impl LlmAnalyzer {
    pub fn new(client: Arc<dyn CompletionClient>, timeout: Duration) -> Self {
        Self { client, timeout }
    }

    /// OpenRouter-backed analyzer using the config's timeout for both client and deadline.
    pub fn from_config(config: &LlmConfig) -> Self {
        Self::new(
            Arc::new(OpenRouterClient::new(config.clone())),
            config.timeout(),
        )
    }

    /// One attempt, no retries. `None` on any failure.
    pub async fn try_analyze(&self, request: &AnalysisRequest) -> Option<AnalysisResult> {
        let prompt = build_prompt(request);
        let raw = match tokio::time::timeout(self.timeout, self.client.complete(&prompt)).await {
            Ok(Ok(raw)) => raw,
            Ok(Err(e)) => {
                tracing::warn!(target: "twinsight::llm", error = %e, "LLM analysis unavailable");
                return None;
            }
            Err(_) => {
                tracing::warn!(
                    target: "twinsight::llm",
                    timeout_ms = self.timeout.as_millis() as u64,
                    "LLM analysis timed out"
                );
                return None;
            }
        };

        match parse_completion(&raw) {
            Ok(result) => Some(result),
            Err(e) => {
                tracing::warn!(
                    target: "twinsight::llm",
                    error = %e,
                    reply_len = raw.len(),
                    "LLM reply was not a usable analysis"
                );
                None
            }
        }
    }
}
