//! The single failure the engine reports.
//!
//! Everything other than unparseable input is handled as a repair and ends
//! up in the change log instead.

use thiserror::Error;

/// The (preprocessed) input text is not a JSON document.
#[derive(Debug, Error)]
#[error("failed to parse JSON: {source}")]
pub struct MalformedInputError {
    #[from]
    source: serde_json::Error,
}

impl MalformedInputError {
    /// 1-based line of the parse failure.
    pub fn line(&self) -> usize {
        self.source.line()
    }

    /// 1-based column of the parse failure.
    pub fn column(&self) -> usize {
        self.source.column()
    }
}
