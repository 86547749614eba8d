//! Errores específicos del core.
//!
//! `CoreEngineError` es serializable porque viaja dentro de `StepFailed` en el
//! log de eventos.

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

use crate::schema::Violation;

/// Lado del step donde se detectó una violación de esquema.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Boundary {
    Input,
    Output,
}

impl fmt::Display for Boundary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Boundary::Input => f.write_str("input"),
            Boundary::Output => f.write_str("output"),
        }
    }
}

#[derive(Debug, Error, PartialEq, Clone, Serialize, Deserialize)]
pub enum CoreEngineError {
    #[error("flow already completed")]
    FlowCompleted,
    #[error("flow has failed previously (stop-on-failure invariant)")]
    FlowHasFailed,
    #[error("missing required inputs")]
    MissingInputs,
    #[error("flow definition has no steps")]
    EmptyDefinition,
    #[error("schema violation at {step_id} {boundary}: {}", join_violations(.violations))]
    SchemaViolation {
        step_id: String,
        boundary: Boundary,
        violations: Vec<Violation>,
    },
    #[error("cannot decode artifact for step {step_id}: {message}")]
    Decode { step_id: String, message: String },
    /// Rechazo explícito de la lógica de un step (error de dominio).
    #[error("step {step_id} rejected input ({code}): {message}")]
    Rejected {
        step_id: String,
        code: String,
        message: String,
        details: Value,
    },
    #[error("internal: {0}")]
    Internal(String),
}

impl CoreEngineError {
    /// Código estable del rechazo, si el error proviene de la lógica del step.
    pub fn rejection_code(&self) -> Option<&str> {
        match self {
            CoreEngineError::Rejected { code, .. } => Some(code),
            _ => None,
        }
    }
}

fn join_violations(violations: &[Violation]) -> String {
    violations.iter().map(|v| v.to_string()).collect::<Vec<_>>().join("; ")
}
