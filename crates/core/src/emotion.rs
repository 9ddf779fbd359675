//! Emotion category identifiers
//!
//! An `EmotionKey` names one configured emotion (e.g. "anxiety"). The
//! reserved crisis outcome is not an `EmotionKey`: it lives outside the
//! configured set and is modelled by `Category::Crisis` so it can never be
//! shadowed or removed by a configuration reload.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use thiserror::Error;

/// Maximum length of an emotion key
pub const MAX_KEY_LENGTH: usize = 50;

/// Reserved name for the crisis category
pub const CRISIS_NAME: &str = "crisis";

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EmotionKeyError {
    #[error("emotion key cannot be empty or whitespace")]
    Empty,

    #[error("emotion key '{0}' is too long (max {MAX_KEY_LENGTH} characters)")]
    TooLong(String),

    #[error("emotion key '{0}' must match [a-zA-Z_][a-zA-Z0-9_]*")]
    InvalidSyntax(String),
}

/// A validated emotion identifier
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EmotionKey(String);

impl EmotionKey {
    /// Validate and construct an emotion key
    pub fn new(raw: impl Into<String>) -> Result<Self, EmotionKeyError> {
        let raw = raw.into();
        if raw.trim().is_empty() {
            return Err(EmotionKeyError::Empty);
        }
        if raw.len() > MAX_KEY_LENGTH {
            return Err(EmotionKeyError::TooLong(raw));
        }
        let mut chars = raw.chars();
        let head_ok = chars
            .next()
            .map(|c| c.is_ascii_alphabetic() || c == '_')
            .unwrap_or(false);
        if !head_ok || !chars.all(|c| c.is_ascii_alphanumeric() || c == '_') {
            return Err(EmotionKeyError::InvalidSyntax(raw));
        }
        Ok(Self(raw))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for EmotionKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl std::str::FromStr for EmotionKey {
    type Err = EmotionKeyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl Serialize for EmotionKey {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.0)
    }
}

impl<'de> Deserialize<'de> for EmotionKey {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        EmotionKey::new(raw).map_err(serde::de::Error::custom)
    }
}

/// Classification outcome: a configured emotion or the reserved crisis marker
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Category {
    /// Self-harm or suicidal language was detected; fixed safety script applies
    Crisis,
    /// A configured emotion
    Emotion(EmotionKey),
}

impl Category {
    pub fn as_str(&self) -> &str {
        match self {
            Category::Crisis => CRISIS_NAME,
            Category::Emotion(key) => key.as_str(),
        }
    }

    pub fn is_crisis(&self) -> bool {
        matches!(self, Category::Crisis)
    }

    /// The emotion key, if this is not the crisis category
    pub fn emotion(&self) -> Option<&EmotionKey> {
        match self {
            Category::Crisis => None,
            Category::Emotion(key) => Some(key),
        }
    }
}

impl From<EmotionKey> for Category {
    fn from(key: EmotionKey) -> Self {
        Category::Emotion(key)
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for Category {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for Category {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        if raw == CRISIS_NAME {
            return Ok(Category::Crisis);
        }
        EmotionKey::new(raw)
            .map(Category::Emotion)
            .map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_keys() {
        for name in ["anxiety", "overwhelm", "_private", "mixed_up2"] {
            assert!(EmotionKey::new(name).is_ok(), "{name} should be valid");
        }
    }

    #[test]
    fn test_rejects_empty_and_whitespace() {
        assert_eq!(EmotionKey::new(""), Err(EmotionKeyError::Empty));
        assert_eq!(EmotionKey::new("   "), Err(EmotionKeyError::Empty));
    }

    #[test]
    fn test_rejects_bad_syntax() {
        assert!(matches!(
            EmotionKey::new("2fast"),
            Err(EmotionKeyError::InvalidSyntax(_))
        ));
        assert!(matches!(
            EmotionKey::new("mixed up"),
            Err(EmotionKeyError::InvalidSyntax(_))
        ));
    }

    #[test]
    fn test_rejects_too_long() {
        let long = "a".repeat(MAX_KEY_LENGTH + 1);
        assert!(matches!(
            EmotionKey::new(long),
            Err(EmotionKeyError::TooLong(_))
        ));
    }

    #[test]
    fn test_category_round_trip() {
        let crisis: Category = serde_json::from_str("\"crisis\"").unwrap();
        assert!(crisis.is_crisis());
        assert_eq!(serde_json::to_string(&crisis).unwrap(), "\"crisis\"");

        let anxiety: Category = serde_json::from_str("\"anxiety\"").unwrap();
        assert_eq!(anxiety.emotion().unwrap().as_str(), "anxiety");
    }

    #[test]
    fn test_category_display() {
        let key = EmotionKey::new("sadness").unwrap();
        assert_eq!(Category::from(key).to_string(), "sadness");
        assert_eq!(Category::Crisis.to_string(), "crisis");
    }
}
