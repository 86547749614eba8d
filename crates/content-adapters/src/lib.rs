//! content-adapters: capa de adaptación Dominio ↔ Core.
//!
//! Este crate provee:
//! - Artifacts tipados (`RawContentInput` → `ValidatedContent` →
//!   `EnhancedContent` → `SummarizedContent`) con sus esquemas de borde.
//! - Los steps `validate-content`, `enhance-content` y `generate-summary`,
//!   que delegan el cálculo en `content-domain`.
//! - Las dos composiciones de pipeline y `ContentWorkflow`, que arma un
//!   engine nuevo por ejecución con reloj y settings inyectados.
//!
//! Nota: el core sólo ve `Artifact { kind, hash, payload, metadata }`; los
//! errores de dominio cruzan la frontera como `CoreEngineError::Rejected` y
//! se reconstruyen aquí como `ContentError`.

pub mod artifacts;
pub mod error;
pub mod steps;
pub mod workflows;

pub use artifacts::{ContentMetadata, EnhancedContent, RawContentInput, SummarizedContent, ValidatedContent};
pub use error::ContentError;
pub use workflows::{basic_pipeline, content_pipeline, ContentOutput, ContentWorkflow, PipelineSettings, PipelineVariant,
                    BASIC_WORKFLOW_ID, CONTENT_WORKFLOW_ID};
