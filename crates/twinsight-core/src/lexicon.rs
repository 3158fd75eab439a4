//! Lexicon tables for the rule-based journal scorer.
//! Turkish marker words for sentiment, self/group focus, and program themes. Pure data.

/// Score change applied per sentiment marker occurrence.
pub const SENTIMENT_STEP: i64 = 10;

/// Neutral starting score before any marker is counted.
pub const BASELINE_SCORE: i64 = 50;

/// Theme reported when no trigger matches.
pub const DEFAULT_THEME: &str = "Genel";

/// Maximum number of themes carried on a result.
pub const MAX_THEMES: usize = 5;

/// Positive markers. Matched as substrings so suffixed forms ("gururluyum") count.
/// A hit directly followed by a [`NEGATING_SUFFIXES`] entry ("umutsuz", "huzursuz") is
/// scored as negative instead.
pub const POSITIVE_WORDS: &[&str] = &[
    "mutlu", "harika", "güzel", "seviyorum", "başardım", "gurur", "huzur", "iyi", "keyif",
    "sevinç", "umut",
];

/// Negative markers. Matched as substrings.
pub const NEGATIVE_WORDS: &[&str] = &[
    "üzgün", "kötü", "sinir", "kızgın", "korku", "endişe", "stres", "kaygı", "yalnız", "bıktım",
    "zor",
];

/// Privative "-siz" forms. A positive marker carrying one of these means its absence.
pub const NEGATING_SUFFIXES: &[&str] = &["suz", "süz", "sız", "siz"];

/// First-person singular pronouns and possessives. Whole-word matches only.
pub const SELF_MARKERS: &[&str] = &["ben", "benim", "kendim", "kendi", "bana", "beni"];

/// Plural "we", twin/sibling and togetherness terms. Whole-word matches only.
pub const GROUP_MARKERS: &[&str] = &["biz", "bizim", "ikizim", "kardeşim", "beraber", "birlikte"];

/// Ordered (theme, triggers) table. Scan order is the order themes are reported in.
pub const THEME_TRIGGERS: &[(&str, &[&str])] = &[
    ("Akademik", &["okul", "ders", "sınav"]),
    ("Sosyal", &["arkadaş", "sosyal"]),
    ("Aile", &["aile", "anne", "baba"]),
    ("İkizlik", &["ikiz", "kardeş"]),
    ("Karar Alma", &["karar", "seçtim"]),
    ("Sınır Koyma", &["sınır", "hayır"]),
    ("Gelecek", &["gelecek", "hedef"]),
];

/// One closing sentence per program week (1..=6).
pub const WEEK_SUFFIXES: [&str; 6] = [
    "Bu hafta kimliğini keşfediyoruz: seni sen yapan özellikleri fark etmeye devam et.",
    "Bu haftanın konusu sınırlar: kendi alanını korumak da sevgi göstermenin bir yoludur.",
    "Bu hafta karar almayı çalışıyoruz: kendi seçimlerini yapmak cesaret ister.",
    "Bu hafta duygusal farkındalık haftası: duygularını adlandırmak onları yönetmenin ilk adımıdır.",
    "Bu hafta sosyal kimliğini ele alıyoruz: kendi arkadaşlıklarını kurmak seni güçlendirir.",
    "Bu son hafta her şeyi birleştiriyoruz: hem birey hem ikiz olarak yolunu çiziyorsun.",
];

/// Program week titles (1..=6), used in the LLM prompt.
pub const WEEK_THEMES: [&str; 6] = [
    "Kimlik",
    "Sınırlar",
    "Karar Alma",
    "Duygusal Farkındalık",
    "Sosyal Kimlik",
    "Bütünleşme",
];

/// Theme vocabulary offered to the LLM, in table order.
pub fn theme_vocabulary() -> impl Iterator<Item = &'static str> {
    THEME_TRIGGERS.iter().map(|(theme, _)| *theme)
}

/// Week-theme sentence for `week`, or `None` outside 1..=6.
pub fn week_suffix(week: i64) -> Option<&'static str> {
    if (1..=6).contains(&week) {
        WEEK_SUFFIXES.get((week - 1) as usize).copied()
    } else {
        None
    }
}

/// Week title for `week`, or `None` outside 1..=6.
pub fn week_theme(week: i64) -> Option<&'static str> {
    if (1..=6).contains(&week) {
        WEEK_THEMES.get((week - 1) as usize).copied()
    } else {
        None
    }
}

/// Lowercases with Turkish dotted/dotless I rules, so "İKİZ" folds to "ikiz" and "I" to "ı".
pub fn fold_case(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            'İ' => out.push('i'),
            'I' => out.push('ı'),
            _ => out.extend(c.to_lowercase()),
        }
    }
    out
}
