//! Tipado fuerte opcional para `Artifact`, manteniendo el núcleo agnóstico.
//! Un tipo de datos concreto se describe con su `Schema`, una versión y una
//! validación semántica ligera; serde hace el resto.

use serde::{de::DeserializeOwned, Serialize};
use serde_json::Value;
use thiserror::Error;

use super::{Artifact, ArtifactKind};
use crate::schema::{Schema, SchemaError};

/// Errores posibles al decodificar un artifact tipado.
#[derive(Debug, Error)]
pub enum ArtifactDecodeError {
    #[error("artifact kind mismatch: expected {expected:?}, found {found:?}")]
    KindMismatch { expected: ArtifactKind, found: ArtifactKind },
    #[error("schema version mismatch: expected {expected}, found {found}")]
    VersionMismatch { expected: u32, found: u32 },
    #[error(transparent)]
    Schema(#[from] SchemaError),
    #[error("deserialize: {0}")]
    Deserialize(String),
    #[error("validation: {0}")]
    Validation(String),
}

/// Especificación abstracta de un artifact tipado.
pub trait ArtifactSpec: Sized + Serialize + DeserializeOwned + Clone {
    /// Kind asociado (permite distinguir en runtime).
    const KIND: ArtifactKind = ArtifactKind::GenericJson;
    /// Versión de esquema (incrementar en cambios incompatibles).
    const SCHEMA_VERSION: u32 = 1;

    /// Forma declarada del payload. Se comprueba en cada borde de step.
    fn schema() -> Schema {
        Schema::Any
    }

    /// Validación semántica ligera (sin efectos secundarios). Opcional.
    fn validate(&self) -> Result<(), String> {
        Ok(())
    }

    /// Clave de `Artifact.metadata` que lleva la versión. Vive fuera del
    /// payload para no colisionar con campos del llamador.
    fn version_field_name() -> &'static str {
        "schema_version"
    }

    /// Serializa a `Artifact` sin hash (lo añade el engine).
    fn into_artifact(self) -> Result<Artifact, serde_json::Error> {
        let value = serde_json::to_value(&self)?;
        let mut metadata = serde_json::Map::new();
        metadata.insert(Self::version_field_name().to_string(), Value::from(Self::SCHEMA_VERSION));
        Ok(Artifact::new_unhashed(Self::KIND, value, Some(Value::Object(metadata))))
    }

    /// Decodifica desde un artifact neutro: kind, versión, schema (con
    /// defaults), deserialización y validación, en ese orden.
    ///
    /// Un artifact sin versión en `metadata` (JSON externo que entra al flujo)
    /// se acepta como versión actual; una versión distinta se rechaza.
    fn from_artifact(a: &Artifact) -> Result<Self, ArtifactDecodeError> {
        if a.kind != Self::KIND {
            return Err(ArtifactDecodeError::KindMismatch { expected: Self::KIND,
                                                           found: a.kind.clone() });
        }
        let found_version = a.metadata.as_ref().and_then(|m| m.get(Self::version_field_name()));
        if let Some(v) = found_version {
            if v.as_u64() != Some(u64::from(Self::SCHEMA_VERSION)) {
                let found = v.as_u64().and_then(|n| u32::try_from(n).ok()).unwrap_or(u32::MAX);
                return Err(ArtifactDecodeError::VersionMismatch { expected: Self::SCHEMA_VERSION,
                                                                  found });
            }
        }
        let normalized = Self::schema().validate(&a.payload)?;
        let decoded: Self =
            serde_json::from_value(normalized).map_err(|e| ArtifactDecodeError::Deserialize(e.to_string()))?;
        decoded.validate().map_err(ArtifactDecodeError::Validation)?;
        Ok(decoded)
    }
}
