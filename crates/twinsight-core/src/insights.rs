//! Journal records, history previews and the weekly insight digest.
//!
//! Storage lives outside this crate. The persistence layer stores [`JournalRecord`]s as
//! opaque documents and hands them back here for the history list and the weekly digest.

use crate::types::{AnalysisRequest, AnalysisResult, AnalysisSource, SentimentLabel};
use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

const DEFAULT_MOOD_ICON: &str = "😐";
const PREVIEW_CHARS: usize = 100;
const TOP_THEME_COUNT: usize = 5;
pub const HISTORY_LIMIT: usize = 30;

fn default_score() -> u8 {
    50
}

fn default_ratio() -> f64 {
    0.5
}

/// One analyzed entry as handed to persistence.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JournalRecord {
    pub text: String,
    #[serde(default)]
    pub mood: Option<String>,
    #[serde(default)]
    pub mood_icon: Option<String>,
    #[serde(default)]
    pub guided_question: Option<String>,
    #[serde(default)]
    pub week: Option<i64>,
    #[serde(default = "default_score")]
    pub sentiment_score: u8,
    #[serde(default = "default_ratio")]
    pub me_ratio: f64,
    #[serde(default = "default_ratio")]
    pub we_ratio: f64,
    #[serde(default)]
    pub themes: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub analyzed_by: Option<AnalysisSource>,
    pub timestamp: DateTime<Utc>,
}

impl JournalRecord {
    pub fn from_analysis(
        request: &AnalysisRequest,
        result: &AnalysisResult,
        timestamp: DateTime<Utc>,
    ) -> Self {
        Self {
            text: request.text.clone(),
            mood: request.mood.clone(),
            mood_icon: request.mood_icon.clone(),
            guided_question: request.guided_question.clone(),
            week: Some(request.week_number()),
            sentiment_score: result.sentiment_score,
            me_ratio: result.self_ratio,
            we_ratio: result.group_ratio,
            themes: result.themes.clone(),
            analyzed_by: Some(result.source),
            timestamp,
        }
    }

    fn mood_icon_or_default(&self) -> &str {
        self.mood_icon
            .as_deref()
            .filter(|m| !m.is_empty())
            .unwrap_or(DEFAULT_MOOD_ICON)
    }
}

/// Row in the journal history list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoryEntry {
    pub date: DateTime<Utc>,
    pub mood: String,
    pub preview: String,
    pub sentiment: String,
    pub themes: Vec<String>,
}

impl HistoryEntry {
    pub fn from_record(record: &JournalRecord) -> Self {
        let mut preview: String = record.text.chars().take(PREVIEW_CHARS).collect();
        preview.push_str("...");
        Self {
            date: record.timestamp,
            mood: record.mood_icon_or_default().to_string(),
            preview,
            sentiment: SentimentLabel::from_score(record.sentiment_score)
                .short_tr()
                .to_string(),
            themes: record.themes.clone(),
        }
    }
}

/// Newest first, at most `limit` rows.
pub fn history(records: &[JournalRecord], limit: usize) -> Vec<HistoryEntry> {
    let mut sorted: Vec<&JournalRecord> = records.iter().collect();
    sorted.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));
    sorted
        .into_iter()
        .take(limit)
        .map(HistoryEntry::from_record)
        .collect()
}

/// Seven-day digest of a participant's entries.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WeeklyInsights {
    pub total_entries: usize,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub mood_distribution: BTreeMap<String, usize>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub top_themes: Vec<String>,
    /// Average self-focus, in percent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avg_me_ratio: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avg_sentiment: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,
    /// Only set when there is nothing to summarize.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

/// Digest of records timestamped within the seven days before `now`.
pub fn weekly_insights(records: &[JournalRecord], now: DateTime<Utc>) -> WeeklyInsights {
    let since = now - Duration::days(7);
    let recent: Vec<&JournalRecord> = records.iter().filter(|r| r.timestamp >= since).collect();

    if recent.is_empty() {
        return WeeklyInsights {
            message: Some("Henüz yeterli veri yok".to_string()),
            ..Default::default()
        };
    }

    let mut mood_distribution = BTreeMap::new();
    let mut theme_counts: Vec<(String, usize)> = Vec::new();
    let mut total_me = 0.0;
    let mut total_sentiment = 0.0;

    for record in &recent {
        *mood_distribution
            .entry(record.mood_icon_or_default().to_string())
            .or_insert(0) += 1;
        for theme in &record.themes {
            match theme_counts.iter_mut().find(|(t, _)| t == theme) {
                Some((_, n)) => *n += 1,
                None => theme_counts.push((theme.clone(), 1)),
            }
        }
        total_me += record.me_ratio.clamp(0.0, 1.0);
        total_sentiment += f64::from(record.sentiment_score);
    }

    // Stable sort keeps first-seen order among equal counts.
    theme_counts.sort_by(|a, b| b.1.cmp(&a.1));
    let top_themes = theme_counts
        .into_iter()
        .take(TOP_THEME_COUNT)
        .map(|(t, _)| t)
        .collect();

    let n = recent.len() as f64;
    let avg_me_ratio = (total_me / n * 100.0).round() as u32;
    let avg_sentiment = (total_sentiment / n).round() as u32;

    WeeklyInsights {
        total_entries: recent.len(),
        mood_distribution,
        top_themes,
        avg_me_ratio: Some(avg_me_ratio),
        avg_sentiment: Some(avg_sentiment),
        summary: Some(weekly_summary(avg_sentiment, avg_me_ratio, recent.len())),
        message: None,
    }
}

fn weekly_summary(avg_sentiment: u32, avg_me_ratio: u32, entries: usize) -> String {
    let mut summary = String::new();
    summary.push_str(if avg_sentiment >= 60 {
        "Bu hafta genel olarak olumlu bir ruh hali içindesin. "
    } else if avg_sentiment <= 40 {
        "Bu hafta bazı zorluklarla karşılaşmış olabilirsin. "
    } else {
        "Bu hafta dengeli bir dönem geçirdin. "
    });
    if avg_me_ratio >= 60 {
        summary.push_str("Bireysel odağın yüksek. ");
    } else if avg_me_ratio <= 40 {
        summary.push_str("İkizin hakkında çok düşünüyorsun. ");
    }
    summary.push_str(&format!("Bu hafta {} günlük yazısı yazdın!", entries));
    summary
}
