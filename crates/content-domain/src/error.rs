use serde_json::{json, Value};
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DomainError {
    #[error("invalid content: {0}")]
    InvalidContent(String),
    #[error("Content too short: {word_count} words")]
    ContentTooShort { word_count: usize, min_words: usize },
    #[error("invalid parameter: {0}")]
    InvalidParameter(String),
}

impl DomainError {
    /// Código estable usado al cruzar la frontera del engine.
    pub fn code(&self) -> &'static str {
        match self {
            DomainError::InvalidContent(_) => "invalid_content",
            DomainError::ContentTooShort { .. } => "content_too_short",
            DomainError::InvalidParameter(_) => "invalid_parameter",
        }
    }

    pub fn details(&self) -> Value {
        match self {
            DomainError::ContentTooShort { word_count, min_words } => {
                json!({ "wordCount": word_count, "minWords": min_words })
            }
            _ => Value::Null,
        }
    }
}
