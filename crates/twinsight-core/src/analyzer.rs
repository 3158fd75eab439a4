//! Deterministic analyzer: lexicon-based sentiment, self/group focus, and themes.
//!
//! This is the baseline every request can fall back to. It never fails: empty or
//! adversarial text scores 50, ratio 0.5, themes `["Genel"]`.
//!
//! Sentiment and theme markers are matched as substrings of the case-folded text so
//! Turkish suffixes ("gururluyum", "okulda") still count. Pronoun markers are matched on
//! whole words only, otherwise "ben" would hit inside unrelated tokens.

use crate::feedback::compose_feedback;
use crate::lexicon::{
    fold_case, BASELINE_SCORE, DEFAULT_THEME, GROUP_MARKERS, MAX_THEMES, NEGATING_SUFFIXES,
    NEGATIVE_WORDS, POSITIVE_WORDS, SELF_MARKERS, SENTIMENT_STEP, THEME_TRIGGERS,
};
use crate::types::{AnalysisResult, AnalysisSource, SentimentLabel};
use once_cell::sync::Lazy;
use regex::Regex;

static SELF_PATTERN: Lazy<Regex> = Lazy::new(|| whole_word_pattern(SELF_MARKERS));
static GROUP_PATTERN: Lazy<Regex> = Lazy::new(|| whole_word_pattern(GROUP_MARKERS));

fn whole_word_pattern(words: &[&str]) -> Regex {
    let alternation = words
        .iter()
        .map(|w| regex::escape(w))
        .collect::<Vec<_>>()
        .join("|");
    Regex::new(&format!(r"\b(?:{})\b", alternation)).expect("marker table compiles to a regex")
}

/// Raw marker counts, before any ratio or clamping.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MarkerCounts {
    pub positive: usize,
    pub negative: usize,
    pub self_refs: usize,
    pub group_refs: usize,
}

impl MarkerCounts {
    pub fn scan(text: &str) -> Self {
        let folded = fold_case(text);
        let (positive, negated) = count_positive(&folded);
        Self {
            positive,
            negative: count_substrings(&folded, NEGATIVE_WORDS) + negated,
            self_refs: SELF_PATTERN.find_iter(&folded).count(),
            group_refs: GROUP_PATTERN.find_iter(&folded).count(),
        }
    }
}

fn count_substrings(folded: &str, words: &[&str]) -> usize {
    words.iter().map(|w| folded.matches(w).count()).sum()
}

/// Positive hits split into (plain, negated by a privative suffix).
fn count_positive(folded: &str) -> (usize, usize) {
    let mut plain = 0;
    let mut negated = 0;
    for word in POSITIVE_WORDS {
        for (i, hit) in folded.match_indices(word) {
            let rest = &folded[i + hit.len()..];
            if NEGATING_SUFFIXES.iter().any(|s| rest.starts_with(s)) {
                negated += 1;
            } else {
                plain += 1;
            }
        }
    }
    (plain, negated)
}

/// Baseline 50, ±10 per marker occurrence, saturating into [0,100].
pub fn sentiment_score(counts: &MarkerCounts) -> u8 {
    let delta = (counts.positive as i64 - counts.negative as i64).saturating_mul(SENTIMENT_STEP);
    BASELINE_SCORE.saturating_add(delta).clamp(0, 100) as u8
}

/// `self / (self + group + 1)`; 0.5 when neither marker set appears.
/// The `+ 1` keeps the ratio strictly below 1.0 for self-only text.
pub fn self_ratio(counts: &MarkerCounts) -> f64 {
    if counts.self_refs == 0 && counts.group_refs == 0 {
        return 0.5;
    }
    counts.self_refs as f64 / (counts.self_refs + counts.group_refs + 1) as f64
}

/// Theme labels in table order, capped at five, `["Genel"]` when nothing matches.
pub fn detect_themes(text: &str) -> Vec<String> {
    let folded = fold_case(text);
    let mut themes: Vec<String> = THEME_TRIGGERS
        .iter()
        .filter(|(_, triggers)| triggers.iter().any(|t| folded.contains(t)))
        .map(|(theme, _)| theme.to_string())
        .take(MAX_THEMES)
        .collect();
    if themes.is_empty() {
        themes.push(DEFAULT_THEME.to_string());
    }
    themes
}

/// Rule-based analysis of one entry. `mood` is accepted for parity with the LLM path but
/// does not affect scoring.
pub fn analyze(text: &str, mood: &str, week: i64) -> AnalysisResult {
    let counts = MarkerCounts::scan(text);
    let score = sentiment_score(&counts);
    let self_ratio = self_ratio(&counts);
    let group_ratio = 1.0 - self_ratio;
    let themes = detect_themes(text);

    tracing::debug!(
        target: "twinsight::analyzer",
        mood = mood,
        week = week,
        positive = counts.positive,
        negative = counts.negative,
        self_refs = counts.self_refs,
        group_refs = counts.group_refs,
        score = score,
        "rule-based analysis complete"
    );

    AnalysisResult {
        sentiment_label: SentimentLabel::from_score(score),
        sentiment_score: score,
        self_ratio,
        group_ratio,
        feedback: compose_feedback(self_ratio, group_ratio, score, week),
        themes,
        summary: None,
        insights: Vec::new(),
        source: AnalysisSource::RuleBased,
    }
}
