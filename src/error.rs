//! Structured error types for the Folio report engine.
//!
//! Three variants cover the real error sources: JSON parsing of report
//! input, font resolution, and final PDF serialization. Layout itself
//! never fails — over-wide content degrades to character splitting and
//! extra pages, not errors.

use thiserror::Error;

/// The unified error type returned by all public Folio API functions.
#[derive(Debug, Error)]
pub enum FolioError {
    /// JSON input failed to parse as a valid record set or report request.
    #[error("failed to parse report input: {source}{}", hint_suffix(.hint))]
    Parse {
        source: serde_json::Error,
        hint: String,
    },

    /// A font could not be resolved.
    #[error("font error: {0}")]
    Font(String),

    /// Writing the final PDF byte stream failed. No partial document
    /// is returned on this path.
    #[error("failed to serialize document: {0}")]
    Serialize(String),
}

fn hint_suffix(hint: &str) -> String {
    if hint.is_empty() {
        String::new()
    } else {
        format!("\n  Hint: {}", hint)
    }
}

impl From<serde_json::Error> for FolioError {
    fn from(e: serde_json::Error) -> Self {
        let hint = match e.classify() {
            serde_json::error::Category::Syntax => {
                "Check for trailing commas, missing quotes, or unescaped characters.".to_string()
            }
            serde_json::error::Category::Data => {
                "The JSON is valid but doesn't match the record schema. Check field names and types."
                    .to_string()
            }
            serde_json::error::Category::Eof => {
                "Unexpected end of input — is the JSON truncated?".to_string()
            }
            serde_json::error::Category::Io => String::new(),
        };
        FolioError::Parse { source: e, hint }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_error_carries_hint() {
        let bad = serde_json::from_str::<serde_json::Value>("{ not json").unwrap_err();
        let err = FolioError::from(bad);
        let msg = err.to_string();
        assert!(msg.contains("failed to parse report input"));
        assert!(msg.contains("Hint:"));
    }

    #[test]
    fn serialize_error_display() {
        let err = FolioError::Serialize("xref offset overflow".to_string());
        assert_eq!(
            err.to_string(),
            "failed to serialize document: xref offset overflow"
        );
    }
}
