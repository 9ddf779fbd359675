//! Core types for the Voiceback emotion response engine
//!
//! This crate provides the foundational types shared by all other crates:
//! - Emotion category identifiers (`EmotionKey`, `Category`)
//! - Classification output (`ClassificationResult`)
//! - Composed response types (`ResponseSegment`, `ComposedResponse`, pacing hints)

pub mod classification;
pub mod emotion;
pub mod response;

pub use classification::ClassificationResult;
pub use emotion::{Category, EmotionKey, EmotionKeyError};
pub use response::{ComposedResponse, PacingHint, ResponseSegment, SegmentKind};
