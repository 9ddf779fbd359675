//! JSON Schema validation for the responses document
//!
//! Structural validation runs before typed decoding so that errors carry the
//! offending instance path from the raw document. Business rules that a
//! schema cannot express (placeholder figure names, the reserved crisis key)
//! are checked afterwards on the typed configuration.

use crate::figure::{MAX_LINES, MAX_LINE_LENGTH, MAX_NAME_LENGTH, MAX_QUOTE_LENGTH};
use crate::ConfigError;
use jsonschema::JSONSchema;
use once_cell::sync::Lazy;
use serde_json::{json, Value};
use voiceback_core::emotion::MAX_KEY_LENGTH;

static RESPONSE_SCHEMA: Lazy<Value> = Lazy::new(|| {
    json!({
        "$schema": "http://json-schema.org/draft-07/schema#",
        "type": "object",
        "minProperties": 1,
        "additionalProperties": false,
        "patternProperties": {
            "^[a-zA-Z_][a-zA-Z0-9_]*$": {
                "type": "array",
                "minItems": 1,
                "items": {
                    "type": "object",
                    "required": ["figure", "context_lines", "quote", "encouragement_lines"],
                    "additionalProperties": false,
                    "properties": {
                        "figure": {
                            "type": "string",
                            "minLength": 1,
                            "maxLength": MAX_NAME_LENGTH
                        },
                        "context_lines": {
                            "type": "array",
                            "minItems": 1,
                            "maxItems": MAX_LINES,
                            "items": {
                                "type": "string",
                                "minLength": 1,
                                "maxLength": MAX_LINE_LENGTH
                            }
                        },
                        "quote": {
                            "type": "string",
                            "minLength": 1,
                            "maxLength": MAX_QUOTE_LENGTH
                        },
                        "encouragement_lines": {
                            "type": "array",
                            "minItems": 1,
                            "maxItems": MAX_LINES,
                            "items": {
                                "type": "string",
                                "minLength": 1,
                                "maxLength": MAX_LINE_LENGTH
                            }
                        }
                    }
                }
            }
        },
        "propertyNames": { "maxLength": MAX_KEY_LENGTH }
    })
});

static VALIDATOR: Lazy<JSONSchema> =
    Lazy::new(|| JSONSchema::compile(&RESPONSE_SCHEMA).expect("response schema is valid"));

/// Validate the raw document against the response schema
///
/// Reports the first violation with its instance path ("root" for the
/// top-level object).
pub fn validate_document(document: &Value) -> Result<(), ConfigError> {
    if let Err(mut errors) = VALIDATOR.validate(document) {
        if let Some(error) = errors.next() {
            let path = error.instance_path.to_string();
            let path = if path.is_empty() {
                "root".to_string()
            } else {
                path
            };
            return Err(ConfigError::SchemaViolation {
                path,
                message: error.to_string(),
            });
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_document() -> Value {
        json!({
            "anxiety": [{
                "figure": "Seneca",
                "context_lines": ["who faced exile with composure"],
                "quote": "We suffer more often in imagination than in reality.",
                "encouragement_lines": ["You have the power to overcome this moment."]
            }]
        })
    }

    #[test]
    fn test_accepts_valid_document() {
        assert!(validate_document(&valid_document()).is_ok());
    }

    #[test]
    fn test_rejects_empty_document() {
        let err = validate_document(&json!({})).unwrap_err();
        assert!(matches!(err, ConfigError::SchemaViolation { path, .. } if path == "root"));
    }

    #[test]
    fn test_rejects_missing_quote() {
        let mut doc = valid_document();
        doc["anxiety"][0].as_object_mut().unwrap().remove("quote");
        let err = validate_document(&doc).unwrap_err();
        assert!(matches!(err, ConfigError::SchemaViolation { path, .. } if path.contains("anxiety")));
    }

    #[test]
    fn test_rejects_empty_figure_list() {
        let err = validate_document(&json!({"anxiety": []})).unwrap_err();
        assert!(matches!(err, ConfigError::SchemaViolation { .. }));
    }

    #[test]
    fn test_rejects_empty_context_line() {
        let mut doc = valid_document();
        doc["anxiety"][0]["context_lines"][0] = json!("");
        assert!(validate_document(&doc).is_err());
    }

    #[test]
    fn test_rejects_bad_emotion_key() {
        let err = validate_document(&json!({"not a key": []})).unwrap_err();
        assert!(matches!(err, ConfigError::SchemaViolation { .. }));
    }

    #[test]
    fn test_rejects_unknown_field() {
        let mut doc = valid_document();
        doc["anxiety"][0]["extra"] = json!("field");
        assert!(validate_document(&doc).is_err());
    }
}
