//! Keyword-based emotion and crisis classification
//!
//! The crisis scan always runs first and short-circuits emotion scoring:
//! safety-keyword precedence is the one invariant this module must never
//! trade away. All matching is whole-word and case-insensitive so that
//! substrings crossing word boundaries ("assassin", "nomadic") cannot
//! trigger false positives.
//!
//! Classification never fails. Empty, whitespace-only or keyword-free input
//! degrades to the default emotion with `fallback = true`.

use crate::keywords::{
    load_crisis_keywords, DEFAULT_EMOTION, EMOTION_KEYWORDS, EMOTION_PRIORITY,
};
use regex::Regex;
use std::path::Path;
use tracing::{debug, error, info, warn};
use unicode_segmentation::UnicodeSegmentation;
use voiceback_core::{ClassificationResult, EmotionKey};

/// Compiled keyword classifier
///
/// Stateless after construction; safe to share across concurrent calls.
pub struct EmotionClassifier {
    patterns: Vec<(EmotionKey, Regex)>,
    crisis_pattern: Regex,
    priority: Vec<EmotionKey>,
    default_emotion: EmotionKey,
}

impl EmotionClassifier {
    /// Classifier with built-in keyword tables and crisis overrides resolved
    /// from the environment
    pub fn new() -> Self {
        Self::with_crisis_source(None)
    }

    /// Classifier with crisis keywords resolved from an optional file source
    pub fn with_crisis_source(crisis_source: Option<&Path>) -> Self {
        let crisis_keywords = load_crisis_keywords(crisis_source);
        Self::with_crisis_keywords(&crisis_keywords)
    }

    /// Classifier with an explicit crisis keyword set
    pub fn with_crisis_keywords(crisis_keywords: &[String]) -> Self {
        let patterns = EMOTION_KEYWORDS
            .iter()
            .map(|(emotion, keywords)| {
                let key = EmotionKey::new(*emotion).expect("built-in emotion key is valid");
                (key, compile_phrase_set(keywords))
            })
            .collect();

        let crisis_pattern = compile_phrase_set(crisis_keywords);

        let priority = EMOTION_PRIORITY
            .iter()
            .map(|name| EmotionKey::new(*name).expect("built-in emotion key is valid"))
            .collect();

        Self {
            patterns,
            crisis_pattern,
            priority,
            default_emotion: EmotionKey::new(DEFAULT_EMOTION)
                .expect("built-in emotion key is valid"),
        }
    }

    /// Override the emotion returned when nothing matches
    pub fn with_default_emotion(mut self, default_emotion: EmotionKey) -> Self {
        self.default_emotion = default_emotion;
        self
    }

    pub fn default_emotion(&self) -> &EmotionKey {
        &self.default_emotion
    }

    /// Classify a transcript against the configured emotion set
    ///
    /// `configured` is the live key set from the config store; only those
    /// keys are scored, so a reload that removes an emotion immediately
    /// stops it from winning.
    pub fn classify(&self, transcript: &str, configured: &[EmotionKey]) -> ClassificationResult {
        let trimmed = transcript.trim();
        if trimmed.is_empty() {
            warn!("empty transcript, using default emotion");
            return ClassificationResult::fallback(self.default_emotion.clone(), Vec::new());
        }

        let text = trimmed.to_lowercase();

        if self.crisis_pattern.is_match(&text) {
            let matched: Vec<&str> = self
                .crisis_pattern
                .find_iter(&text)
                .map(|m| m.as_str())
                .collect();
            error!(
                event_type = "crisis_detection",
                keywords = ?matched,
                transcript = %transcript,
                "crisis keywords detected in transcript"
            );
            return ClassificationResult::crisis();
        }

        let total_words = text.unicode_words().count().max(1);
        let mut hits: Vec<(EmotionKey, usize)> = Vec::with_capacity(configured.len());
        for key in configured {
            if let Some((_, pattern)) = self.patterns.iter().find(|(k, _)| k == key) {
                let count = pattern.find_iter(&text).count();
                if count > 0 {
                    debug!(emotion = %key, matches = count, "emotion keywords matched");
                }
                hits.push((key.clone(), count));
            }
        }

        let scores: Vec<(EmotionKey, f32)> = hits
            .iter()
            .map(|(key, count)| (key.clone(), normalize(*count, total_words)))
            .collect();

        let best = hits.iter().map(|(_, count)| *count).max().unwrap_or(0);
        if best == 0 {
            info!(transcript = %transcript, default = %self.default_emotion,
                "no emotion keywords found, using default emotion");
            return ClassificationResult::fallback(self.default_emotion.clone(), scores);
        }

        let top: Vec<&EmotionKey> = hits
            .iter()
            .filter(|(_, count)| *count == best)
            .map(|(key, _)| key)
            .collect();
        let winner = self
            .priority
            .iter()
            .find(|candidate| top.iter().any(|k| k == candidate))
            .or_else(|| top.iter().copied().min())
            .cloned()
            .expect("at least one emotion scored");

        let confidence = normalize(best, total_words);
        info!(emotion = %winner, confidence, "detected emotion");

        ClassificationResult {
            category: winner.into(),
            confidence,
            fallback: false,
            scores,
        }
    }

    /// Whether the transcript contains crisis language
    pub fn is_crisis(&self, transcript: &str) -> bool {
        let trimmed = transcript.trim();
        !trimmed.is_empty() && self.crisis_pattern.is_match(&trimmed.to_lowercase())
    }
}

impl Default for EmotionClassifier {
    fn default() -> Self {
        Self::new()
    }
}

/// Match count normalized by transcript length, clamped to [0, 1]
///
/// Zero exactly when nothing matched, strictly increasing in match count
/// for a fixed transcript.
fn normalize(count: usize, total_words: usize) -> f32 {
    (count as f32 / total_words as f32).min(1.0)
}

/// Whole-word, case-insensitive alternation over literal phrases
fn compile_phrase_set(phrases: &[impl AsRef<str>]) -> Regex {
    let alternation = phrases
        .iter()
        .map(|p| regex::escape(p.as_ref()))
        .collect::<Vec<_>>()
        .join("|");
    Regex::new(&format!(r"(?i)\b(?:{alternation})\b")).expect("escaped phrase set is a valid regex")
}

#[cfg(test)]
mod tests {
    use super::*;
    use voiceback_core::Category;

    fn configured() -> Vec<EmotionKey> {
        ["anxiety", "sadness", "frustration", "uncertainty", "overwhelm"]
            .iter()
            .map(|name| EmotionKey::new(*name).unwrap())
            .collect()
    }

    fn classifier() -> EmotionClassifier {
        let defaults: Vec<String> = crate::keywords::DEFAULT_CRISIS_KEYWORDS
            .iter()
            .map(|s| s.to_string())
            .collect();
        EmotionClassifier::with_crisis_keywords(&defaults)
    }

    #[test]
    fn test_detects_anxiety() {
        let result = classifier().classify(
            "I've been feeling really anxious about my job lately",
            &configured(),
        );
        assert_eq!(result.category.as_str(), "anxiety");
        assert!(result.confidence > 0.0);
        assert!(!result.fallback);
    }

    #[test]
    fn test_crisis_short_circuits_emotions() {
        let result = classifier().classify(
            "I'm anxious and want to kill myself",
            &configured(),
        );
        assert_eq!(result.category, Category::Crisis);
        assert_eq!(result.confidence, 1.0);
        assert!(!result.fallback);
        assert!(result.scores.is_empty());
    }

    #[test]
    fn test_crisis_phrasing_variants() {
        let c = classifier();
        for text in [
            "I don't know what to do anymore, I just want it all to end",
            "there is no point in trying",
            "I feel suicidal tonight",
        ] {
            assert!(c.is_crisis(text), "{text} should be crisis");
        }
    }

    #[test]
    fn test_word_boundaries_prevent_false_positives() {
        let c = classifier();
        // "mad" inside "nomad", "low" inside "yellow", "down" inside "showdown"
        let result = c.classify("the nomad wore a yellow hat to the showdown", &configured());
        assert!(result.fallback);
        // "suicide" inside a longer token must not trip the crisis scan
        assert!(!c.is_crisis("the suicidegame documentary was on"));
    }

    #[test]
    fn test_empty_and_whitespace_fall_back() {
        let c = classifier();
        for text in ["", "   ", "\n\t"] {
            let result = c.classify(text, &configured());
            assert_eq!(result.category.as_str(), "anxiety");
            assert!(result.fallback);
            assert_eq!(result.confidence, 0.0);
        }
    }

    #[test]
    fn test_no_match_falls_back_with_zero_confidence() {
        let result = classifier().classify("the weather is nice today", &configured());
        assert_eq!(result.category.as_str(), "anxiety");
        assert!(result.fallback);
        assert_eq!(result.confidence, 0.0);
        assert!(result.scores.iter().all(|(_, s)| *s == 0.0));
    }

    #[test]
    fn test_tie_break_uses_priority_order() {
        // One sadness keyword and one anxiety keyword: sadness outranks
        // anxiety in the priority list
        let result = classifier().classify("I feel sad and worried", &configured());
        assert_eq!(result.category.as_str(), "sadness");

        // Uncertainty outranks everything
        let result = classifier().classify("I feel lost and sad and worried today ok", &configured());
        assert_eq!(result.category.as_str(), "uncertainty");
    }

    #[test]
    fn test_confidence_increases_with_matches() {
        let c = classifier();
        let one = c.classify("I am worried about one thing and fine otherwise", &configured());
        let two = c.classify("I am worried and anxious about one thing here too", &configured());
        assert!(two.confidence > one.confidence);
    }

    #[test]
    fn test_unconfigured_emotions_are_not_scored() {
        let only_sadness = vec![EmotionKey::new("sadness").unwrap()];
        let result = classifier().classify("I feel anxious", &only_sadness);
        // anxiety is not configured, so nothing matches
        assert!(result.fallback);
    }

    #[test]
    fn test_multi_word_phrases_match() {
        let result = classifier().classify("it's all just too much right now", &configured());
        assert_eq!(result.category.as_str(), "overwhelm");
    }
}
