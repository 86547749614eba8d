//! Steps del pipeline de contenido.

pub mod enhance;
pub mod summarize;
pub mod validate;

use content_core::CoreEngineError;
use content_domain::DomainError;

pub use enhance::{EnhanceContentStep, EnhanceParams};
pub use summarize::{GenerateSummaryStep, SummaryParams};
pub use validate::{ValidateContentStep, ValidateParams};

pub const VALIDATE_STEP_ID: &str = "validate-content";
pub const ENHANCE_STEP_ID: &str = "enhance-content";
pub const SUMMARY_STEP_ID: &str = "generate-summary";

/// Traduce un error de dominio al rechazo neutral del engine.
pub(crate) fn reject(step_id: &str, err: DomainError) -> CoreEngineError {
    CoreEngineError::Rejected { step_id: step_id.to_string(),
                                code: err.code().to_string(),
                                message: err.to_string(),
                                details: err.details() }
}
