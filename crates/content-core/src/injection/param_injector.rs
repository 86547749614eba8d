//! Contrato para inyectores de parámetros.
//!
//! Un `ParamInjector` recibe los params acumulados del step y el
//! `ExecutionContext` y devuelve un `Value` que se mergea sobre ellos.

use crate::model::ExecutionContext;
use serde_json::Value;

/// Trait para inyectores de parámetros.
pub trait ParamInjector: Send + Sync + std::fmt::Debug {
    /// Devuelve una estructura JSON que será mergeada sobre `base`.
    fn inject(&self, base: &Value, ctx: &ExecutionContext) -> Value;
}
