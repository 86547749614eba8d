//! Tipos de repositorio: estado reconstruido (FlowInstance) y definición
//! (FlowDefinition).
//!
//! El repositorio aplica un replay lineal: consume eventos en orden y produce
//! un `FlowInstance`. No almacena artifacts completos (sólo hashes).
use serde_json::json;
use uuid::Uuid;

use crate::event::{FlowEvent, FlowEventKind};
use crate::hashing::hash_value;
use crate::schema::Schema;
use crate::step::{FlowStatus, StepDefinition, StepStatus};

#[derive(Debug)]
pub struct FlowInstance {
    pub id: Uuid,
    pub input_hash: Option<String>,
    pub steps: Vec<StepSlot>,
    pub cursor: usize,
    pub completed: bool,
}

/// Estado de un step en la instancia.
#[derive(Debug)]
pub struct StepSlot {
    pub step_id: String,
    pub status: StepStatus,
    pub fingerprint: Option<String>,
    pub outputs: Vec<String>, // sólo hashes; los artifacts viven en la store del engine
}

impl FlowInstance {
    pub fn failed_step(&self) -> Option<usize> {
        self.steps.iter().position(|s| s.status == StepStatus::Failed)
    }

    /// Estado agregado según la cadena lineal de la ejecución.
    pub fn status(&self) -> FlowStatus {
        if let Some(step_index) = self.failed_step() {
            return FlowStatus::Failed { step_index };
        }
        if self.completed {
            return FlowStatus::Completed;
        }
        if let Some(step_index) = self.steps.iter().position(|s| s.status == StepStatus::Running) {
            return FlowStatus::Running { step_index };
        }
        match self.cursor {
            0 => FlowStatus::NotStarted,
            n => FlowStatus::StepDone { step_index: n - 1 },
        }
    }
}

/// Trait para reconstruir (`replay`) el estado de un flow a partir de eventos.
pub trait FlowRepository {
    fn load(&self, flow_id: Uuid, events: &[FlowEvent], definition: &FlowDefinition) -> FlowInstance;
}

/// Definición inmutable del Flow: steps en orden y contrato de entrada/salida.
#[derive(Debug)]
pub struct FlowDefinition {
    pub steps: Vec<Box<dyn StepDefinition>>,
    pub definition_hash: String,
    /// Esquema de entrada del flujo (el del primer step).
    pub input_schema: Schema,
    /// Esquema de salida del flujo (el del último step).
    pub output_schema: Schema,
}

impl FlowDefinition {
    pub fn new(steps: Vec<Box<dyn StepDefinition>>, definition_hash: String) -> Self {
        let input_schema = steps.first().map(|s| s.input_schema()).unwrap_or(Schema::Any);
        let output_schema = steps.last().map(|s| s.output_schema()).unwrap_or(Schema::Any);
        Self { steps,
               definition_hash,
               input_schema,
               output_schema }
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    pub fn step_ids(&self) -> Vec<&str> {
        self.steps.iter().map(|s| s.id()).collect()
    }
}

#[derive(Debug, Default)]
pub struct InMemoryFlowRepository;

impl InMemoryFlowRepository {
    pub fn new() -> Self {
        Self
    }
}

impl FlowRepository for InMemoryFlowRepository {
    fn load(&self, flow_id: Uuid, events: &[FlowEvent], definition: &FlowDefinition) -> FlowInstance {
        let mut steps: Vec<StepSlot> = definition.steps
                                                 .iter()
                                                 .map(|s| StepSlot { step_id: s.id().to_string(),
                                                                     status: StepStatus::Pending,
                                                                     fingerprint: None,
                                                                     outputs: vec![] })
                                                 .collect();
        let mut completed = false;
        let mut input_hash = None;
        for ev in events {
            match &ev.kind {
                FlowEventKind::FlowInitialized { input_hash: h, .. } => input_hash = Some(h.clone()),
                FlowEventKind::StepStarted { step_index, .. } => {
                    if let Some(slot) = steps.get_mut(*step_index) {
                        slot.status = StepStatus::Running;
                    }
                }
                FlowEventKind::StepFinished { step_index,
                                              fingerprint,
                                              outputs,
                                              .. } => {
                    if let Some(slot) = steps.get_mut(*step_index) {
                        slot.status = StepStatus::FinishedOk;
                        slot.fingerprint = Some(fingerprint.clone());
                        slot.outputs = outputs.clone();
                    }
                }
                FlowEventKind::StepFailed { step_index, fingerprint, .. } => {
                    if let Some(slot) = steps.get_mut(*step_index) {
                        slot.status = StepStatus::Failed;
                        slot.fingerprint = Some(fingerprint.clone());
                    }
                }
                FlowEventKind::FlowCompleted { .. } => completed = true,
            }
        }
        let cursor = steps.iter()
                          .position(|s| s.status != StepStatus::FinishedOk)
                          .unwrap_or(steps.len());
        FlowInstance { id: flow_id,
                       input_hash,
                       steps,
                       cursor,
                       completed }
    }
}

/// Construye la definición; el hash cubre ids y hashes de definición de cada
/// step, en orden.
pub fn build_flow_definition(steps: Vec<Box<dyn StepDefinition>>) -> FlowDefinition {
    let parts: Vec<_> = steps.iter()
                             .map(|s| json!({ "id": s.id(), "definition_hash": s.definition_hash() }))
                             .collect();
    let definition_hash = hash_value(&json!(parts));
    FlowDefinition::new(steps, definition_hash)
}
