//! Error types for comment extraction.
//!
//! Every variant is scoped to a single source buffer: callers scanning many
//! files record the failure and move on to the next file.

use thiserror::Error;

use crate::grammar::Language;

/// Result type for extraction operations.
pub type Result<T> = std::result::Result<T, ExtractError>;

#[derive(Debug, Error)]
pub enum ExtractError {
    /// No grammar is registered for the extension. The file should be skipped.
    #[error("unsupported language: no grammar registered for extension {extension:?}")]
    UnsupportedLanguage { extension: String },

    /// The parser could not be configured for the grammar or produced no tree.
    #[error("failed to parse {language} source: {message}")]
    Parse { language: Language, message: String },

    /// The comment query did not compile against the grammar.
    #[error("invalid comment query for {language}: {message}")]
    Query { language: Language, message: String },
}

impl ExtractError {
    /// True when the error only means "skip this file".
    pub fn is_unsupported(&self) -> bool {
        matches!(self, ExtractError::UnsupportedLanguage { .. })
    }
}
