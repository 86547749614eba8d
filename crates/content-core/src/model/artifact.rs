//! Artifact neutral del flujo.
//!
//! Un `Artifact` es la unidad de datos intercambiada entre steps. Es neutral:
//! - `payload` es JSON genérico; el motor sólo lo valida contra el `Schema`
//!   declarado por el step, no interpreta su semántica.
//! - `hash` lo calcula el engine sobre el JSON canonicalizado (ver
//!   `hashing::to_canonical_json`) y sirve como identidad en la store de
//!   artifacts.
//! - `metadata` permite anotar información auxiliar que no entra al hash.
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Tipos neutrales de artifact.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum ArtifactKind {
    /// JSON genérico sin semántica.
    GenericJson,
}

/// Artifact neutral producido/consumido por Steps.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Artifact {
    pub kind: ArtifactKind,
    pub hash: String,            // hash canonical del payload (asignado por engine)
    pub payload: Value,          // contenido neutro JSON
    pub metadata: Option<Value>, // información auxiliar (no entra al hash)
}

impl Artifact {
    /// Artifact sin hash; el engine lo completa al almacenarlo.
    pub fn new_unhashed(kind: ArtifactKind, payload: Value, metadata: Option<Value>) -> Self {
        Self { kind,
               hash: String::new(),
               payload,
               metadata }
    }

    /// Envuelve un JSON externo (p. ej. la entrada de un flujo) como artifact
    /// genérico.
    pub fn from_json(payload: Value) -> Self {
        Self::new_unhashed(ArtifactKind::GenericJson, payload, None)
    }
}
