use content_core::schema::Violation;
use content_core::{Boundary, CoreEngineError};
use thiserror::Error;

/// Errores visibles para quien invoca un workflow de contenido.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ContentError {
    #[error("schema violation at {step_id} ({boundary}): {}", join(violations))]
    Schema {
        step_id: String,
        boundary: Boundary,
        violations: Vec<Violation>,
    },
    #[error("invalid content: {0}")]
    InvalidContent(String),
    #[error("Content too short: {word_count} words")]
    ContentTooShort { word_count: usize },
    #[error("invalid parameter: {0}")]
    InvalidParameter(String),
    #[error("could not decode workflow output: {0}")]
    Decode(String),
    #[error(transparent)]
    Engine(CoreEngineError),
}

impl ContentError {
    /// `true` cuando la causa es la entrada del usuario y no un fallo interno.
    pub fn is_rejection(&self) -> bool {
        matches!(self,
                 ContentError::Schema { .. } | ContentError::InvalidContent(_) | ContentError::ContentTooShort { .. })
    }
}

fn join(violations: &[Violation]) -> String {
    violations.iter().map(ToString::to_string).collect::<Vec<_>>().join("; ")
}

impl From<CoreEngineError> for ContentError {
    fn from(err: CoreEngineError) -> Self {
        match err {
            CoreEngineError::SchemaViolation { step_id, boundary, violations } => {
                ContentError::Schema { step_id, boundary, violations }
            }
            CoreEngineError::Rejected { step_id, code, message, details } => match code.as_str() {
                "content_too_short" => {
                    let word_count = details.get("wordCount").and_then(|v| v.as_u64()).unwrap_or_default();
                    ContentError::ContentTooShort { word_count: word_count as usize }
                }
                "invalid_content" => ContentError::InvalidContent(message),
                "invalid_parameter" => ContentError::InvalidParameter(message),
                _ => ContentError::Engine(CoreEngineError::Rejected { step_id, code, message, details }),
            },
            other => ContentError::Engine(other),
        }
    }
}
