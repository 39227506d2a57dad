//! Error types for the harvester.
//!
//! Network and listing-shape failures are fatal and abort the run; the
//! partition checkpoints bound how much work a rerun has to redo.

use std::path::PathBuf;

use thiserror::Error;

/// Main error type for the harvester library.
#[derive(Debug, Error)]
pub enum HarvesterError {
    /// HTTP client could not be constructed or a request failed outright.
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// Fetching a specific page failed (connection error or non-success status).
    #[error("Failed to fetch {url}: {source}")]
    Fetch {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    /// Expected element or attribute absent on a listing page.
    #[error("Missing required element: {element} in {context}")]
    MissingElement { element: String, context: String },

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization error.
    #[error("JSON serialization failed: {0}")]
    Json(#[from] serde_json::Error),

    /// A dataset file exists but cannot be decoded.
    #[error("Failed to decode dataset {}: {source}", .path.display())]
    Dataset {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// Source name not known to the harvester.
    #[error("Unknown source: '{0}'. Expected one of gesetze-im-internet, dejure, lexparency")]
    UnknownSource(String),
}

impl HarvesterError {
    /// Shorthand for a listing-page shape error.
    pub fn missing(element: impl Into<String>, context: impl Into<String>) -> Self {
        Self::MissingElement {
            element: element.into(),
            context: context.into(),
        }
    }
}

/// Result type alias for harvester operations.
pub type Result<T> = std::result::Result<T, HarvesterError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_element_display() {
        let err = HarvesterError::missing("abbr[title]", "Teilliste_B.html");
        assert_eq!(
            err.to_string(),
            "Missing required element: abbr[title] in Teilliste_B.html"
        );
    }

    #[test]
    fn test_unknown_source_display() {
        let err = HarvesterError::UnknownSource("buzer".to_string());
        assert!(err.to_string().contains("'buzer'"));
        assert!(err.to_string().contains("lexparency"));
    }

    #[test]
    fn test_dataset_error_names_path() {
        let source = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let err = HarvesterError::Dataset {
            path: PathBuf::from("dejure/A.json"),
            source,
        };
        assert!(err.to_string().starts_with("Failed to decode dataset dejure/A.json"));
    }
}
