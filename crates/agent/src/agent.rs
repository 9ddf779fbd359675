//! Call-level facade
//!
//! The boundary of the core: one transcript string in, one structured reply
//! out. Speech recognition upstream and voice delivery downstream are
//! external collaborators.

use crate::classifier::EmotionClassifier;
use crate::composer::ResponseComposer;
use rand::Rng;
use serde::Serialize;
use std::sync::Arc;
use tracing::info;
use voiceback_config::ConfigStore;
use voiceback_core::{ClassificationResult, ComposedResponse};

/// Opening line spoken when a call connects
pub const GREETING: &str = "Hello! I'm here to share wisdom from historical figures \
who faced challenges much like yours. What's on your mind today?";

/// Closing line spoken when a call ends
pub const GOODBYE: &str = "May you find wisdom and peace on your journey. Farewell.";

/// Reply payload handed to the voice-delivery collaborator
#[derive(Debug, Clone, Serialize)]
pub struct AgentReply {
    pub classification: ClassificationResult,
    pub response: ComposedResponse,
}

/// Classifier and composer wired to a shared config store
pub struct VoicebackAgent {
    store: Arc<ConfigStore>,
    classifier: EmotionClassifier,
    composer: ResponseComposer,
}

impl VoicebackAgent {
    pub fn new(store: Arc<ConfigStore>) -> Self {
        Self::with_parts(store, EmotionClassifier::new(), ResponseComposer::new())
    }

    pub fn with_parts(
        store: Arc<ConfigStore>,
        classifier: EmotionClassifier,
        composer: ResponseComposer,
    ) -> Self {
        Self {
            store,
            classifier,
            composer,
        }
    }

    pub fn store(&self) -> &Arc<ConfigStore> {
        &self.store
    }

    /// Classify a transcript and compose the spoken reply
    ///
    /// Never fails: classification defaults rather than erroring, and the
    /// composer recovers every store fault with a built-in figure.
    pub fn respond(&self, transcript: &str) -> AgentReply {
        self.respond_with(transcript, &mut rand::thread_rng())
    }

    /// `respond` with an injected random source, for deterministic tests
    pub fn respond_with<R: Rng + ?Sized>(&self, transcript: &str, rng: &mut R) -> AgentReply {
        let configured = self.store.emotions().unwrap_or_default();
        let classification = self.classifier.classify(transcript, &configured);
        let response = self
            .composer
            .compose(&classification.category, &self.store, rng);

        info!(
            category = %classification.category,
            confidence = classification.confidence,
            fallback = classification.fallback,
            crisis = response.crisis,
            segments = response.segments.len(),
            "composed reply"
        );

        AgentReply {
            classification,
            response,
        }
    }
}
