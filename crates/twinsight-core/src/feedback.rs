//! Feedback composer: turns rule-based scores into one short paragraph of guidance.

use crate::lexicon::week_suffix;

const INDIVIDUAL_FOCUS: &str =
    "Yazında bireysel odak yüksek - bireyselleşme sürecinde olumlu bir işaret!";
const GROUP_FOCUS: &str =
    "Yazında ikizin ve \"biz\" kavramı öne çıkıyor. Kendi alanını da oluşturmaya çalış.";
const BALANCED_FOCUS: &str = "Dengeli bir bakış açısı görüyorum.";

const STRONGLY_POSITIVE: &str = "Olumlu bir ruh hali içindesin!";
const SEEK_SUPPORT: &str = "Kendine nazik ol ve destek almaktan çekinme.";
const MILDLY_NEGATIVE: &str =
    "Zor anlar yaşıyor olabilirsin; bunları yazıya dökmen çok değerli.";
const NEUTRAL_MOOD: &str = "Her duygu geçerlidir, yazmaya devam et.";

/// Composes focus, mood and week clauses, in that order, separated by single spaces.
/// Weeks outside 1..=6 contribute no clause.
pub fn compose_feedback(self_ratio: f64, group_ratio: f64, sentiment_score: u8, week: i64) -> String {
    let focus = if self_ratio > 0.6 {
        INDIVIDUAL_FOCUS
    } else if group_ratio > 0.6 {
        GROUP_FOCUS
    } else {
        BALANCED_FOCUS
    };

    let mood = match sentiment_score {
        s if s >= 70 => STRONGLY_POSITIVE,
        s if s <= 30 => SEEK_SUPPORT,
        s if s <= 40 => MILDLY_NEGATIVE,
        _ => NEUTRAL_MOOD,
    };

    let mut out = format!("{} {}", focus, mood);
    if let Some(suffix) = week_suffix(week) {
        out.push(' ');
        out.push_str(suffix);
    }
    out
}
