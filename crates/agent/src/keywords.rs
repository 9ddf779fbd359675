//! Keyword tables for emotion and crisis detection
//!
//! Emotion keywords are tuned for noisy speech-to-text input: plain feeling
//! words plus the short phrases recognizers actually produce. Crisis
//! keywords are kept apart from the hot-reloadable emotion configuration on
//! purpose: the safety net must hold even when the quote document is broken.
//! They can be overridden through the `CRISIS_KEYWORDS` environment variable
//! (JSON array or comma-separated) or a keyword file, but never emptied.

use std::path::Path;
use tracing::{info, warn};

/// Emotion used when the input is empty or matches nothing
///
/// Anxiety is the most common state that leads callers to seek support, and
/// its responses stay safe when the guess is wrong.
pub const DEFAULT_EMOTION: &str = "anxiety";

/// Tie-break order, most specific emotion first
pub const EMOTION_PRIORITY: [&str; 5] = [
    "uncertainty",
    "overwhelm",
    "frustration",
    "sadness",
    "anxiety",
];

/// Keyword sets for the supported emotions
pub const EMOTION_KEYWORDS: [(&str, &[&str]); 5] = [
    (
        "anxiety",
        &[
            "anxious", "anxiety", "worried", "worry", "nervous", "stressed",
            "stress", "panic", "panicked", "tension", "tense", "fearful",
            "afraid", "scared", "apprehensive", "restless", "jittery",
            "on edge",
        ],
    ),
    (
        "sadness",
        &[
            "sad", "sadness", "depressed", "depression", "down", "low",
            "blue", "melancholy", "grief", "grieving", "heartbroken",
            "disappointed", "hopeless", "despair", "lonely", "empty", "hurt",
            "pain", "anguish", "sorrow", "mourning",
        ],
    ),
    (
        "frustration",
        &[
            "frustrated", "frustration", "mad", "irritated", "annoyed",
            "pissed", "furious", "rage", "upset", "bothered", "aggravated",
            "exasperated", "fed up", "resentful", "bitter", "outraged",
            "livid", "heated", "steamed", "i'm angry", "feel angry",
            "so angry", "really angry", "very angry", "getting angry",
        ],
    ),
    (
        "uncertainty",
        &[
            "uncertain", "uncertainty", "confused", "confusion", "lost",
            "unclear", "unsure", "doubt", "doubtful", "puzzled",
            "bewildered", "perplexed", "mixed up", "torn", "conflicted",
            "indecisive", "questioning", "wondering", "hesitant",
            "undecided",
        ],
    ),
    (
        "overwhelm",
        &[
            "overwhelmed", "overwhelm", "too much", "overloaded", "swamped",
            "drowning", "suffocated", "exhausted", "burnt out", "burnout",
            "overworked", "pressured", "burdened", "weighed down", "crushed",
            "stretched thin", "at capacity", "maxed out",
        ],
    ),
];

/// Default crisis keyword set
pub const DEFAULT_CRISIS_KEYWORDS: [&str; 15] = [
    "suicide",
    "suicidal",
    "kill myself",
    "end it all",
    "want it all to end",
    "hurt myself",
    "self harm",
    "no point",
    "no point living",
    "give up",
    "can't go on",
    "want to die",
    "better off dead",
    "take my life",
    "not worth living",
];

/// Resolve the crisis keyword list from overrides, defaulting to the
/// built-in set
///
/// Precedence: `CRISIS_KEYWORDS` environment variable, then the optional
/// keyword file (`.json` array or one keyword per line), then defaults. An
/// unreadable or empty override falls back rather than weakening detection.
pub fn load_crisis_keywords(source: Option<&Path>) -> Vec<String> {
    if let Ok(raw) = std::env::var("CRISIS_KEYWORDS") {
        let keywords = parse_keyword_override(&raw);
        if !keywords.is_empty() {
            info!(count = keywords.len(), "loaded crisis keywords from CRISIS_KEYWORDS");
            return keywords;
        }
        warn!("CRISIS_KEYWORDS is set but empty, using defaults");
    }

    if let Some(path) = source {
        match read_keyword_file(path) {
            Ok(keywords) if !keywords.is_empty() => {
                info!(count = keywords.len(), path = %path.display(), "loaded crisis keywords from file");
                return keywords;
            }
            Ok(_) => warn!(path = %path.display(), "crisis keyword file is empty, using defaults"),
            Err(e) => warn!(path = %path.display(), error = %e, "failed to read crisis keyword file, using defaults"),
        }
    }

    DEFAULT_CRISIS_KEYWORDS
        .iter()
        .map(|s| s.to_string())
        .collect()
}

fn parse_keyword_override(raw: &str) -> Vec<String> {
    if let Ok(keywords) = serde_json::from_str::<Vec<String>>(raw) {
        return keywords
            .into_iter()
            .filter(|k| !k.trim().is_empty())
            .collect();
    }
    raw.split(',')
        .map(|k| k.trim().to_string())
        .filter(|k| !k.is_empty())
        .collect()
}

fn read_keyword_file(path: &Path) -> std::io::Result<Vec<String>> {
    let raw = std::fs::read_to_string(path)?;
    if path.extension().map(|e| e.eq_ignore_ascii_case("json")) == Some(true) {
        return Ok(serde_json::from_str::<Vec<String>>(&raw)
            .unwrap_or_default()
            .into_iter()
            .filter(|k| !k.trim().is_empty())
            .collect());
    }
    Ok(raw
        .lines()
        .map(|l| l.trim().to_string())
        .filter(|l| !l.is_empty())
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_parse_json_override() {
        let keywords = parse_keyword_override(r#"["harm", "danger phrase"]"#);
        assert_eq!(keywords, vec!["harm", "danger phrase"]);
    }

    #[test]
    fn test_parse_comma_override() {
        let keywords = parse_keyword_override("harm , danger phrase,,");
        assert_eq!(keywords, vec!["harm", "danger phrase"]);
    }

    #[test]
    fn test_keyword_file_lines() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "harm\n\n danger phrase ").unwrap();
        let keywords = read_keyword_file(file.path()).unwrap();
        assert_eq!(keywords, vec!["harm", "danger phrase"]);
    }

    #[test]
    fn test_missing_file_falls_back_to_defaults() {
        let keywords = load_crisis_keywords(Some(Path::new("/nonexistent/keywords.txt")));
        assert_eq!(keywords.len(), DEFAULT_CRISIS_KEYWORDS.len());
    }

    #[test]
    fn test_priority_covers_all_emotions() {
        for (emotion, keywords) in EMOTION_KEYWORDS {
            assert!(EMOTION_PRIORITY.contains(&emotion));
            assert!(!keywords.is_empty());
        }
    }
}
