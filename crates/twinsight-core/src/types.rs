//! Request and result value objects shared by every analysis path.

use serde::{Deserialize, Serialize};

/// Inbound journal entry plus the context the participant selected.
/// Field names follow the journal form payload (`content`, `moodIcon`, `guidedQuestion`, `week`).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisRequest {
    #[serde(rename = "content")]
    pub text: String,
    /// Mood label (e.g. "Mutlu", "Sakin", "Kaygılı"). Informational, never scored.
    #[serde(default)]
    pub mood: Option<String>,
    #[serde(default)]
    pub mood_icon: Option<String>,
    #[serde(default)]
    pub guided_question: Option<String>,
    #[serde(default)]
    pub week: Option<i64>,
}

impl AnalysisRequest {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            ..Default::default()
        }
    }

    pub fn with_mood(mut self, mood: &str) -> Self {
        self.mood = Some(mood.to_string());
        self
    }

    pub fn with_week(mut self, week: i64) -> Self {
        self.week = Some(week);
        self
    }

    /// Program week in 1..=6. Missing or out-of-range values fall back to week 1.
    pub fn week_number(&self) -> i64 {
        match self.week {
            Some(w) if (1..=6).contains(&w) => w,
            _ => 1,
        }
    }

    /// Mood label or an empty string.
    pub fn mood_label(&self) -> &str {
        self.mood.as_deref().unwrap_or("")
    }
}

/// Three-way sentiment bucket. Serialized with the labels the journal UI renders.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SentimentLabel {
    #[serde(rename = "Pozitif 😊", alias = "Pozitif", alias = "Positive")]
    Positive,
    #[serde(rename = "Nötr 😐", alias = "Nötr", alias = "Neutral")]
    Neutral,
    #[serde(rename = "Negatif 😔", alias = "Negatif", alias = "Negative")]
    Negative,
}

impl SentimentLabel {
    /// ≥60 Positive, ≤40 Negative, otherwise Neutral.
    pub fn from_score(score: u8) -> Self {
        if score >= 60 {
            SentimentLabel::Positive
        } else if score <= 40 {
            SentimentLabel::Negative
        } else {
            SentimentLabel::Neutral
        }
    }

    /// Lenient parse of a model-reported category ("positive", "Pozitif", "negatif", ...).
    pub fn parse_loose(raw: &str) -> Option<Self> {
        let s = crate::lexicon::fold_case(raw.trim());
        if s.starts_with("pos") || s.starts_with("poz") || s.starts_with("olumlu") {
            Some(SentimentLabel::Positive)
        } else if s.starts_with("neg") || s.starts_with("olumsuz") {
            Some(SentimentLabel::Negative)
        } else if s.starts_with("neu") || s.starts_with("nötr") || s.starts_with("notr") {
            Some(SentimentLabel::Neutral)
        } else {
            None
        }
    }

    /// Short label without the emoji, as shown in the history list.
    pub fn short_tr(&self) -> &'static str {
        match self {
            SentimentLabel::Positive => "Pozitif",
            SentimentLabel::Neutral => "Nötr",
            SentimentLabel::Negative => "Negatif",
        }
    }
}

/// Which path produced a result.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AnalysisSource {
    Llm,
    RuleBased,
}

/// Normalized analysis of one journal entry. Serializes to the response shape the
/// journal page and the persistence layer already consume.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisResult {
    #[serde(rename = "sentiment")]
    pub sentiment_label: SentimentLabel,
    #[serde(rename = "sentimentScore")]
    pub sentiment_score: u8,
    #[serde(rename = "me_ratio")]
    pub self_ratio: f64,
    #[serde(rename = "we_ratio")]
    pub group_ratio: f64,
    pub themes: Vec<String>,
    pub feedback: String,
    /// Only the LLM path writes a summary.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,
    /// Only the LLM path writes insights.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub insights: Vec<String>,
    #[serde(rename = "analyzedBy")]
    pub source: AnalysisSource,
}
