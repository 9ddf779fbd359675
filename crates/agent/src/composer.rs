//! Response composition
//!
//! Assembles the spoken reply from a classification category and the config
//! store. Two paths:
//!
//! - Crisis: a fixed, non-randomized safety script with hotline numbers for
//!   every supported region, ending with a statement that the line stays
//!   open. Never touches the quote configuration.
//! - Emotion: acknowledgment, figure introduction, long pause, the verbatim
//!   quote, encouragement, and the mandatory disclaimer.
//!
//! Composition never fails: a store miss (unknown key, reload race) or a
//! malformed entry degrades to a built-in figure instead of surfacing an
//! error mid-call.

use rand::seq::SliceRandom;
use rand::Rng;
use tracing::{info, warn};
use voiceback_config::{ConfigStore, HistoricalFigure};
use voiceback_core::{
    Category, ComposedResponse, EmotionKey, PacingHint, ResponseSegment, SegmentKind,
};

/// Closing disclaimer for every non-crisis response
pub const DISCLAIMER: &str =
    "Please remember, Voiceback offers inspiration and support, not professional advice.";

/// Acknowledgment used for emotions without a dedicated pool
const DEFAULT_ACKNOWLEDGMENT: &str = "I hear you.";

/// Per-emotion acknowledgment pools
const EMOTION_ACKNOWLEDGMENTS: [(&str, &[&str]); 5] = [
    (
        "anxiety",
        &[
            "That's completely understandable.",
            "Many people experience this feeling.",
            "You're not alone in feeling this way.",
            "It's natural to feel anxious sometimes.",
        ],
    ),
    (
        "sadness",
        &[
            "I can hear the heaviness in that.",
            "Sadness is a natural part of the human experience.",
            "It's okay to feel this deeply.",
            "Your feelings are valid and important.",
        ],
    ),
    (
        "frustration",
        &[
            "That frustration sounds really difficult.",
            "It's clear this has been weighing on you.",
            "Frustration can be so overwhelming.",
            "I can understand why you'd feel that way.",
        ],
    ),
    (
        "uncertainty",
        &[
            "Uncertainty can feel unsettling.",
            "Not knowing what's ahead is challenging.",
            "It's hard when the path isn't clear.",
            "Feeling uncertain is part of being human.",
        ],
    ),
    (
        "overwhelm",
        &[
            "That sounds like so much to handle.",
            "Being overwhelmed is exhausting.",
            "It's understandable to feel swamped.",
            "Sometimes life can feel like too much.",
        ],
    ),
];

/// Fixed crisis script: acknowledgment, one hotline per supported region,
/// professional-help encouragement, and a keep-listening close
const CRISIS_SCRIPT: [(SegmentKind, &str); 5] = [
    (
        SegmentKind::Acknowledgment,
        "I'm truly sorry you're feeling this way. You're not alone, and there are people who want to help.",
    ),
    (
        SegmentKind::CrisisResource,
        "If you're in the US, please reach out to the Suicide and Crisis Lifeline at 988. They're available around the clock with trained counselors ready to help.",
    ),
    (
        SegmentKind::CrisisResource,
        "If you're in India, please contact AASRA at 9152987821. They provide confidential support at any hour.",
    ),
    (
        SegmentKind::Encouragement,
        "You don't have to go through this alone. People trained to help with exactly what you're experiencing are ready to talk right now.",
    ),
    (
        SegmentKind::Listening,
        "I'm still here with you, and I'll keep listening for as long as you need.",
    ),
];

/// Built-in figure used when the store cannot supply one
fn fallback_figure() -> HistoricalFigure {
    HistoricalFigure {
        name: "Seneca".to_string(),
        context_lines: vec!["who believed we have the strength to face any challenge".to_string()],
        quote: "We suffer more often in imagination than in reality.".to_string(),
        encouragement_lines: vec!["You have the power to overcome this moment.".to_string()],
    }
}

/// Stateless response composer; safe to share across concurrent calls
pub struct ResponseComposer;

impl ResponseComposer {
    pub fn new() -> Self {
        Self
    }

    /// Compose a response for a category using the injected random source
    pub fn compose<R: Rng + ?Sized>(
        &self,
        category: &Category,
        store: &ConfigStore,
        rng: &mut R,
    ) -> ComposedResponse {
        match category {
            Category::Crisis => self.crisis_response(),
            Category::Emotion(key) => self.emotion_response(key, store, rng),
        }
    }

    /// The fixed safety script; identical on every invocation
    pub fn crisis_response(&self) -> ComposedResponse {
        warn!("composing crisis response");
        let segments = CRISIS_SCRIPT
            .iter()
            .enumerate()
            .map(|(i, (kind, text))| {
                let pacing = if i == 0 {
                    PacingHint::None
                } else {
                    PacingHint::ShortPause
                };
                ResponseSegment::new(*kind, *text).with_pacing(pacing)
            })
            .collect();
        ComposedResponse::new(segments, true)
    }

    fn emotion_response<R: Rng + ?Sized>(
        &self,
        key: &EmotionKey,
        store: &ConfigStore,
        rng: &mut R,
    ) -> ComposedResponse {
        let figure = match store.pick_figure(key, rng) {
            Ok(figure) => match figure.validate(key.as_str()) {
                Ok(()) => figure,
                Err(e) => {
                    warn!(emotion = %key, error = %e, "configured figure is malformed, using built-in fallback");
                    fallback_figure()
                }
            },
            Err(e) => {
                warn!(emotion = %key, error = %e, "no configured figure available, using built-in fallback");
                fallback_figure()
            }
        };

        let context = pick_line(&figure.context_lines, rng);
        let encouragement = pick_line(&figure.encouragement_lines, rng);
        let acknowledgment = acknowledgment_for(key, rng);

        info!(emotion = %key, figure = %figure.name, "composing response");

        let segments = vec![
            ResponseSegment::new(
                SegmentKind::Acknowledgment,
                format!("It sounds like you're feeling {key}. {acknowledgment}"),
            ),
            ResponseSegment::new(
                SegmentKind::Introduction,
                format!("You remind me of {}, {context}.", figure.name),
            ),
            // The pause before the quote is always long; delivery quality
            // downstream depends on it
            ResponseSegment::new(SegmentKind::Quote, figure.quote.clone())
                .with_pacing(PacingHint::LongPause),
            ResponseSegment::new(SegmentKind::Encouragement, encouragement.to_string())
                .with_pacing(PacingHint::ShortPause),
            ResponseSegment::new(SegmentKind::Disclaimer, DISCLAIMER)
                .with_pacing(PacingHint::ShortPause),
        ];
        ComposedResponse::new(segments, false)
    }
}

impl Default for ResponseComposer {
    fn default() -> Self {
        Self::new()
    }
}

fn pick_line<'a, R: Rng + ?Sized>(lines: &'a [String], rng: &mut R) -> &'a str {
    lines
        .choose(rng)
        .map(String::as_str)
        .unwrap_or("who understood life's challenges")
}

fn acknowledgment_for<R: Rng + ?Sized>(key: &EmotionKey, rng: &mut R) -> &'static str {
    EMOTION_ACKNOWLEDGMENTS
        .iter()
        .find(|(emotion, _)| *emotion == key.as_str())
        .and_then(|(_, pool)| pool.choose(rng))
        .copied()
        .unwrap_or(DEFAULT_ACKNOWLEDGMENT)
}
