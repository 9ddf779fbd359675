//! Composed response types
//!
//! A `ComposedResponse` is an ordered list of text segments, each tagged with
//! the pause the voice-delivery layer should insert before speaking it. The
//! core never performs audio timing itself; the hints are the contract with
//! the delivery collaborator.

use serde::{Deserialize, Serialize};

/// Speaking rate used for duration estimates
pub const WORDS_PER_MINUTE: f32 = 150.0;

/// Pause to insert before speaking a segment
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PacingHint {
    #[default]
    None,
    ShortPause,
    LongPause,
}

/// Role a segment plays within the response
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SegmentKind {
    /// Empathetic acknowledgment of the caller's emotion
    Acknowledgment,
    /// Introduction of the historical figure with a context line
    Introduction,
    /// The verbatim quote
    Quote,
    /// Encouragement line
    Encouragement,
    /// Hotline or other crisis resource
    CrisisResource,
    /// Statement that the service keeps listening (crisis path only)
    Listening,
    /// Mandatory non-crisis disclaimer
    Disclaimer,
}

/// One spoken segment with its pacing hint
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResponseSegment {
    pub kind: SegmentKind,
    pub text: String,
    pub pacing: PacingHint,
}

impl ResponseSegment {
    pub fn new(kind: SegmentKind, text: impl Into<String>) -> Self {
        Self {
            kind,
            text: text.into(),
            pacing: PacingHint::None,
        }
    }

    pub fn with_pacing(mut self, pacing: PacingHint) -> Self {
        self.pacing = pacing;
        self
    }
}

/// Complete response ready for the voice-delivery collaborator
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComposedResponse {
    pub segments: Vec<ResponseSegment>,
    /// True when the fixed crisis protocol was used
    pub crisis: bool,
}

impl ComposedResponse {
    pub fn new(segments: Vec<ResponseSegment>, crisis: bool) -> Self {
        Self { segments, crisis }
    }

    /// Flatten to plain text, marking long pauses for TTS engines that
    /// accept inline markers
    pub fn rendered(&self) -> String {
        let mut out = String::new();
        for segment in &self.segments {
            if !out.is_empty() {
                if segment.pacing == PacingHint::LongPause {
                    out.push_str(" [pause]");
                }
                out.push(' ');
            }
            out.push_str(&segment.text);
        }
        out
    }

    /// The verbatim quote segment, if present
    pub fn quote(&self) -> Option<&str> {
        self.segments
            .iter()
            .find(|s| s.kind == SegmentKind::Quote)
            .map(|s| s.text.as_str())
    }

    pub fn has_disclaimer(&self) -> bool {
        self.segments
            .iter()
            .any(|s| s.kind == SegmentKind::Disclaimer)
    }

    /// Approximate word count across all segments
    pub fn word_count(&self) -> usize {
        self.segments
            .iter()
            .map(|s| s.text.split_whitespace().count())
            .sum()
    }

    /// Estimated speaking time in seconds at a typical TTS rate
    pub fn estimated_speaking_secs(&self) -> f32 {
        self.word_count() as f32 / WORDS_PER_MINUTE * 60.0
    }
}
