use content_adapters::ContentError;
use thiserror::Error;

/// Errores al registrar o ejecutar workflows.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum WorkflowError {
    #[error("unknown workflow '{0}'")]
    UnknownWorkflow(String),
    #[error("workflow '{0}' is already registered")]
    DuplicateWorkflow(String),
    #[error(transparent)]
    Content(#[from] ContentError),
}

impl WorkflowError {
    /// `true` si el fallo se debe a la entrada (schema o reglas de dominio).
    pub fn is_rejection(&self) -> bool {
        matches!(self, WorkflowError::Content(e) if e.is_rejection())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rejection_classification() {
        assert!(WorkflowError::Content(ContentError::ContentTooShort { word_count: 2 }).is_rejection());
        assert!(!WorkflowError::Content(ContentError::Decode("x".into())).is_rejection());
        assert!(!WorkflowError::UnknownWorkflow("x".into()).is_rejection());
    }
}
