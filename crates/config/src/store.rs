//! Configuration store with atomic snapshot publication
//!
//! The store owns the only mutable state in the core. A load validates the
//! whole document off-lock, then publishes the new `Configuration` with a
//! single `Arc` swap: in-flight readers keep their old snapshot, new readers
//! see the new one, and nobody ever observes a mix.

use crate::figure::{EmotionEntry, HistoricalFigure};
use crate::stats::ConfigurationStats;
use crate::{schema, ConfigError};
use parking_lot::RwLock;
use rand::seq::SliceRandom;
use rand::Rng;
use serde_json::Value;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::SystemTime;
use tracing::{debug, info};
use voiceback_core::emotion::CRISIS_NAME;
use voiceback_core::EmotionKey;

/// An immutable, fully validated emotion-to-quote mapping
#[derive(Debug, Clone, PartialEq)]
pub struct Configuration {
    entries: BTreeMap<EmotionKey, EmotionEntry>,
}

impl Configuration {
    /// Decode and validate a raw document
    pub fn from_document(document: Value) -> Result<Self, ConfigError> {
        schema::validate_document(&document)?;

        let entries: BTreeMap<EmotionKey, EmotionEntry> = serde_json::from_value(document)
            .map_err(|e| ConfigError::ParseError(e.to_string()))?;

        let config = Self { entries };
        config.validate_rules()?;
        Ok(config)
    }

    /// Business rules the schema cannot express
    fn validate_rules(&self) -> Result<(), ConfigError> {
        if self.entries.is_empty() {
            return Err(ConfigError::InvalidValue {
                field: "root".to_string(),
                message: "configuration must contain at least one emotion".to_string(),
            });
        }

        for (key, figures) in &self.entries {
            if key.as_str() == CRISIS_NAME {
                return Err(ConfigError::InvalidValue {
                    field: key.to_string(),
                    message: "'crisis' is reserved and cannot be configured".to_string(),
                });
            }
            for (i, figure) in figures.iter().enumerate() {
                figure.validate(&format!("{key}[{i}]"))?;
            }
        }
        Ok(())
    }

    /// All configured emotion keys, in stable order
    pub fn emotions(&self) -> Vec<EmotionKey> {
        self.entries.keys().cloned().collect()
    }

    pub fn contains(&self, key: &EmotionKey) -> bool {
        self.entries.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// The figures configured for one emotion
    pub fn entry(&self, key: &EmotionKey) -> Result<&EmotionEntry, ConfigError> {
        self.entries
            .get(key)
            .ok_or_else(|| ConfigError::UnknownEmotion(key.clone()))
    }

    /// Uniform random figure for an emotion; draws are independent across
    /// calls, callers wanting anti-repetition track history themselves
    pub fn pick_figure<R: Rng + ?Sized>(
        &self,
        key: &EmotionKey,
        rng: &mut R,
    ) -> Result<&HistoricalFigure, ConfigError> {
        let figures = self.entry(key)?;
        figures
            .choose(rng)
            .ok_or_else(|| ConfigError::UnknownEmotion(key.clone()))
    }

    pub fn iter(&self) -> impl Iterator<Item = (&EmotionKey, &EmotionEntry)> {
        self.entries.iter()
    }

    pub fn stats(&self) -> ConfigurationStats {
        ConfigurationStats::from_configuration(self)
    }
}

#[derive(Default)]
struct StoreState {
    active: Option<Arc<Configuration>>,
    mtime: Option<SystemTime>,
}

/// Thread-safe store for the active configuration
///
/// Readers clone the current `Arc<Configuration>` under a brief read lock
/// and never wait on a reload; validation happens entirely outside the lock.
pub struct ConfigStore {
    path: PathBuf,
    state: RwLock<StoreState>,
}

impl ConfigStore {
    /// Create a store for the given document path; nothing is read yet
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            state: RwLock::new(StoreState::default()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load the document, skipping revalidation when the source is unchanged
    ///
    /// On failure the previously active configuration (if any) stays in
    /// effect.
    pub fn load(&self) -> Result<Arc<Configuration>, ConfigError> {
        let mtime = self.source_mtime()?;
        {
            let state = self.state.read();
            if let (Some(active), Some(cached)) = (&state.active, state.mtime) {
                if mtime <= cached {
                    debug!(path = %self.path.display(), "configuration source unchanged, using cache");
                    return Ok(Arc::clone(active));
                }
            }
        }
        self.load_and_publish(mtime)
    }

    /// Re-validate and republish regardless of the cached modification time
    pub fn reload(&self) -> Result<Arc<Configuration>, ConfigError> {
        info!(path = %self.path.display(), "force reloading configuration");
        let mtime = self.source_mtime()?;
        self.load_and_publish(mtime)
    }

    fn load_and_publish(&self, mtime: SystemTime) -> Result<Arc<Configuration>, ConfigError> {
        let document = read_document(&self.path)?;
        let config = Arc::new(Configuration::from_document(document)?);

        let mut state = self.state.write();
        state.active = Some(Arc::clone(&config));
        state.mtime = Some(mtime);
        drop(state);

        info!(
            path = %self.path.display(),
            emotions = config.len(),
            "configuration loaded"
        );
        Ok(config)
    }

    fn source_mtime(&self) -> Result<SystemTime, ConfigError> {
        let metadata = std::fs::metadata(&self.path)
            .map_err(|_| ConfigError::FileNotFound(self.path.display().to_string()))?;
        metadata.modified().map_err(|source| ConfigError::Io {
            path: self.path.display().to_string(),
            source,
        })
    }

    /// The active configuration, if one has been published
    pub fn snapshot(&self) -> Result<Arc<Configuration>, ConfigError> {
        self.state
            .read()
            .active
            .as_ref()
            .map(Arc::clone)
            .ok_or(ConfigError::NotLoaded)
    }

    pub fn is_loaded(&self) -> bool {
        self.state.read().active.is_some()
    }

    /// Modification time of the document behind the active configuration
    pub fn loaded_mtime(&self) -> Option<SystemTime> {
        self.state.read().mtime
    }

    /// All configured emotion keys
    pub fn emotions(&self) -> Result<Vec<EmotionKey>, ConfigError> {
        Ok(self.snapshot()?.emotions())
    }

    /// The figures configured for one emotion
    pub fn entry(&self, key: &EmotionKey) -> Result<EmotionEntry, ConfigError> {
        Ok(self.snapshot()?.entry(key)?.clone())
    }

    /// Uniform random figure for an emotion
    pub fn pick_figure<R: Rng + ?Sized>(
        &self,
        key: &EmotionKey,
        rng: &mut R,
    ) -> Result<HistoricalFigure, ConfigError> {
        Ok(self.snapshot()?.pick_figure(key, rng)?.clone())
    }

    pub fn stats(&self) -> Result<ConfigurationStats, ConfigError> {
        Ok(self.snapshot()?.stats())
    }

    /// Validate a document without publishing it anywhere
    pub fn validate_file(path: impl AsRef<Path>) -> Result<(), ConfigError> {
        let document = read_document(path.as_ref())?;
        Configuration::from_document(document).map(|_| ())
    }
}

fn read_document(path: &Path) -> Result<Value, ConfigError> {
    if !path.exists() {
        return Err(ConfigError::FileNotFound(path.display().to_string()));
    }
    let raw = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
        path: path.display().to_string(),
        source,
    })?;
    serde_json::from_str(&raw).map_err(|e| ConfigError::ParseError(e.to_string()))
}
