//! Tipos de evento del flujo y estructura `FlowEvent`.
//!
//! Rol en el flujo:
//! - Cada ejecución del `FlowEngine` emite eventos a un `EventStore`
//!   append-only.
//! - El `FlowRepository` reconstruye el estado de la ejecución (replay) a
//!   partir de estos eventos, sin estructuras mutables compartidas.
//! - `FlowEventKind` es el contrato observable y estable del motor.
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors::CoreEngineError;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum FlowEventKind {
    /// Emisión inicial de un flujo: fija la `definition_hash`, la cantidad de
    /// steps y el hash de la entrada ya validada. Invariante: primer evento de
    /// un `flow_id`.
    FlowInitialized {
        definition_hash: String,
        step_count: usize,
        input_hash: String,
    },
    /// Un step comenzó su ejecución. No implica éxito.
    StepStarted { step_index: usize, step_id: String },
    /// Un step terminó correctamente, con sus outputs (hashes) y fingerprint.
    StepFinished {
        step_index: usize,
        step_id: String,
        outputs: Vec<String>,
        fingerprint: String,
    },
    /// Un step terminó con error terminal. El flujo no continúa
    /// (stop-on-failure).
    StepFailed {
        step_index: usize,
        step_id: String,
        error: CoreEngineError,
        fingerprint: String,
    },
    /// Cierre con fingerprint agregado del flujo (hash de los fingerprints de
    /// steps en orden).
    FlowCompleted { flow_fingerprint: String },
}

impl FlowEventKind {
    /// Letra compacta del evento, útil para asserts de secuencia.
    pub fn variant_code(&self) -> &'static str {
        match self {
            FlowEventKind::FlowInitialized { .. } => "I",
            FlowEventKind::StepStarted { .. } => "S",
            FlowEventKind::StepFinished { .. } => "F",
            FlowEventKind::StepFailed { .. } => "X",
            FlowEventKind::FlowCompleted { .. } => "C",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FlowEvent {
    pub seq: u64, // asignado por el EventStore (orden append)
    pub flow_id: Uuid,
    pub kind: FlowEventKind,
    pub ts: DateTime<Utc>, // metadato (no entra en fingerprint)
}
