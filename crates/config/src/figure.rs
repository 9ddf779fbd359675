//! Historical figure data model

use crate::ConfigError;
use serde::{Deserialize, Serialize};

/// Maximum length of a figure name
pub const MAX_NAME_LENGTH: usize = 100;
/// Maximum length of a quote
pub const MAX_QUOTE_LENGTH: usize = 1000;
/// Maximum length of a context or encouragement line
pub const MAX_LINE_LENGTH: usize = 500;
/// Maximum number of context or encouragement lines per figure
pub const MAX_LINES: usize = 10;

/// Figure names that indicate missing curation rather than a real person
const PLACEHOLDER_NAMES: [&str; 4] = ["unknown", "anonymous", "n/a", "none"];

/// A historical figure with a quote and its supporting lines
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoricalFigure {
    #[serde(rename = "figure")]
    pub name: String,
    pub context_lines: Vec<String>,
    pub quote: String,
    pub encouragement_lines: Vec<String>,
}

/// The figures configured for one emotion, in document order
pub type EmotionEntry = Vec<HistoricalFigure>;

impl HistoricalFigure {
    /// True for generic names rejected as configuration errors
    pub fn is_placeholder_name(name: &str) -> bool {
        let name = name.trim().to_lowercase();
        PLACEHOLDER_NAMES.contains(&name.as_str())
    }

    /// Validate all fields; `path` prefixes field references in errors
    pub fn validate(&self, path: &str) -> Result<(), ConfigError> {
        let invalid = |field: String, message: &str| ConfigError::InvalidValue {
            field,
            message: message.to_string(),
        };

        if self.name.trim().is_empty() {
            return Err(invalid(format!("{path}.figure"), "name cannot be empty"));
        }
        if self.name.len() > MAX_NAME_LENGTH {
            return Err(invalid(format!("{path}.figure"), "name too long"));
        }
        if Self::is_placeholder_name(&self.name) {
            return Err(invalid(
                format!("{path}.figure"),
                "placeholder figure names are not allowed",
            ));
        }

        if self.quote.trim().is_empty() {
            return Err(invalid(format!("{path}.quote"), "quote cannot be empty"));
        }
        if self.quote.len() > MAX_QUOTE_LENGTH {
            return Err(invalid(format!("{path}.quote"), "quote too long"));
        }

        Self::validate_lines(&self.context_lines, &format!("{path}.context_lines"))?;
        Self::validate_lines(
            &self.encouragement_lines,
            &format!("{path}.encouragement_lines"),
        )?;

        Ok(())
    }

    fn validate_lines(lines: &[String], path: &str) -> Result<(), ConfigError> {
        if lines.is_empty() {
            return Err(ConfigError::InvalidValue {
                field: path.to_string(),
                message: "must have at least one line".to_string(),
            });
        }
        if lines.len() > MAX_LINES {
            return Err(ConfigError::InvalidValue {
                field: path.to_string(),
                message: format!("too many lines (max {MAX_LINES})"),
            });
        }
        for (i, line) in lines.iter().enumerate() {
            if line.trim().is_empty() {
                return Err(ConfigError::InvalidValue {
                    field: format!("{path}[{i}]"),
                    message: "line cannot be empty".to_string(),
                });
            }
            if line.len() > MAX_LINE_LENGTH {
                return Err(ConfigError::InvalidValue {
                    field: format!("{path}[{i}]"),
                    message: format!("line too long (max {MAX_LINE_LENGTH} characters)"),
                });
            }
        }
        Ok(())
    }
}
