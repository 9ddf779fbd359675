//! Classification output types

use crate::emotion::{Category, EmotionKey};
use serde::Serialize;

/// Result of classifying a single transcript
///
/// Created per request and never persisted. Confidence is in [0, 1] and is
/// exactly 0.0 when no keyword matched (the fallback case).
#[derive(Debug, Clone, Serialize)]
pub struct ClassificationResult {
    /// Winning category
    pub category: Category,
    /// Normalized confidence in [0, 1]
    pub confidence: f32,
    /// True when the category is a default guess rather than a keyword match
    pub fallback: bool,
    /// Normalized score for every emotion that was considered
    pub scores: Vec<(EmotionKey, f32)>,
}

impl ClassificationResult {
    /// A crisis result: always full confidence, never a fallback
    pub fn crisis() -> Self {
        Self {
            category: Category::Crisis,
            confidence: 1.0,
            fallback: false,
            scores: Vec::new(),
        }
    }

    /// The default-category result used when nothing matched
    pub fn fallback(default_emotion: EmotionKey, scores: Vec<(EmotionKey, f32)>) -> Self {
        Self {
            category: Category::Emotion(default_emotion),
            confidence: 0.0,
            fallback: true,
            scores,
        }
    }

    pub fn is_crisis(&self) -> bool {
        self.category.is_crisis()
    }
}
