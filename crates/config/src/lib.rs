//! Configuration management for the Voiceback emotion response engine
//!
//! The emotion-to-quote mapping lives in a single JSON document:
//!
//! ```json
//! {
//!   "anxiety": [
//!     {
//!       "figure": "Seneca",
//!       "context_lines": ["who faced exile with composure"],
//!       "quote": "We suffer more often in imagination than in reality.",
//!       "encouragement_lines": ["You have the power to overcome this moment."]
//!     }
//!   ]
//! }
//! ```
//!
//! Loading validates the document in full (JSON Schema plus business rules)
//! before publishing it; a partially invalid document never becomes active.
//! Readers always see a complete snapshot, and a failed reload leaves the
//! previous configuration in effect.
//!
//! Crisis keywords and hotline numbers are deliberately NOT part of this
//! document: they are safety-critical and must not depend on the validity of
//! the general configuration. See the agent crate's crisis registry.

pub mod figure;
pub mod schema;
pub mod stats;
pub mod store;

pub use figure::{EmotionEntry, HistoricalFigure};
pub use stats::ConfigurationStats;
pub use store::{ConfigStore, Configuration};

use thiserror::Error;
use voiceback_core::EmotionKey;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("configuration file not found: {0}")]
    FileNotFound(String),

    #[error("failed to read configuration file {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid JSON in configuration file: {0}")]
    ParseError(String),

    #[error("configuration validation failed at '{path}': {message}")]
    SchemaViolation { path: String, message: String },

    #[error("invalid value for {field}: {message}")]
    InvalidValue { field: String, message: String },

    #[error("configuration not loaded")]
    NotLoaded,

    #[error("unknown emotion: {0}")]
    UnknownEmotion(EmotionKey),
}
