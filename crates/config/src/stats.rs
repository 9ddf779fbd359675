//! Configuration statistics for operational visibility

use crate::store::Configuration;
use serde::Serialize;
use std::collections::HashSet;
use std::fmt;
use voiceback_core::response::WORDS_PER_MINUTE;

/// Summary of a loaded configuration, logged after load and exposed to
/// health endpoints by the (external) transport layer
#[derive(Debug, Clone, Serialize)]
pub struct ConfigurationStats {
    pub total_emotions: usize,
    pub total_figures: usize,
    pub emotions_with_multiple_figures: usize,
    pub unique_figures: usize,
    pub total_context_lines: usize,
    pub total_encouragement_lines: usize,
    /// Time to speak every configured line once, at a typical TTS rate
    pub estimated_speaking_secs: f32,
}

impl ConfigurationStats {
    pub fn from_configuration(config: &Configuration) -> Self {
        let mut total_figures = 0;
        let mut multiple = 0;
        let mut names: HashSet<&str> = HashSet::new();
        let mut context_lines = 0;
        let mut encouragement_lines = 0;
        let mut words = 0;

        for (_, figures) in config.iter() {
            total_figures += figures.len();
            if figures.len() > 1 {
                multiple += 1;
            }
            for figure in figures {
                names.insert(figure.name.as_str());
                context_lines += figure.context_lines.len();
                encouragement_lines += figure.encouragement_lines.len();

                words += figure.quote.split_whitespace().count();
                words += figure
                    .context_lines
                    .iter()
                    .chain(&figure.encouragement_lines)
                    .map(|l| l.split_whitespace().count())
                    .sum::<usize>();
            }
        }

        Self {
            total_emotions: config.len(),
            total_figures,
            emotions_with_multiple_figures: multiple,
            unique_figures: names.len(),
            total_context_lines: context_lines,
            total_encouragement_lines: encouragement_lines,
            estimated_speaking_secs: words as f32 / WORDS_PER_MINUTE * 60.0,
        }
    }
}

impl fmt::Display for ConfigurationStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} emotions, {} figures ({} unique), ~{:.1}s of speech",
            self.total_emotions,
            self.total_figures,
            self.unique_figures,
            self.estimated_speaking_secs
        )
    }
}
