//! Emotion classification and response composition for Voiceback calls
//!
//! The request path is a pure pipeline over a config-store snapshot:
//!
//! transcript → [`EmotionClassifier`] → [`ResponseComposer`] → [`AgentReply`]
//!
//! Classifier and composer are stateless and safe to invoke from concurrent
//! calls; the config store is the only shared mutable resource and publishes
//! snapshots atomically. Nothing in this crate performs I/O on the request
//! path.

pub mod agent;
pub mod classifier;
pub mod composer;
pub mod keywords;

pub use agent::{AgentReply, VoicebackAgent, GOODBYE, GREETING};
pub use classifier::EmotionClassifier;
pub use composer::{ResponseComposer, DISCLAIMER};
