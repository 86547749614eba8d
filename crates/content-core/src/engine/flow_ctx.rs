//! Flow context implementation

use uuid::Uuid;

use crate::engine::FlowEngine;
use crate::errors::CoreEngineError;
use crate::event::EventStore;
use crate::repo::FlowRepository;
use crate::step::FlowStatus;
use crate::FlowDefinition;

/// Contexto de ejecución para un flujo ya inicializado.
///
/// API ergonómica para avanzar paso a paso y observar el estado intermedio.
pub struct FlowCtx<'a, E: EventStore, R: FlowRepository> {
    pub engine: &'a mut FlowEngine<E, R>,
    pub flow_id: Uuid,
    pub definition: &'a FlowDefinition,
}

impl<'a, E: EventStore, R: FlowRepository> FlowCtx<'a, E, R> {
    #[inline]
    pub fn new(engine: &'a mut FlowEngine<E, R>, flow_id: Uuid, definition: &'a FlowDefinition) -> Self {
        Self { engine,
               flow_id,
               definition }
    }

    /// Ejecuta el siguiente paso del flujo.
    #[inline]
    pub fn step(&mut self) -> Result<(), CoreEngineError> {
        self.engine.next_with(self.flow_id, self.definition)
    }

    /// Ejecuta hasta `n` pasos o hasta que ocurra un error terminal.
    #[inline]
    pub fn run_n(&mut self, n: usize) -> Result<(), CoreEngineError> {
        for _ in 0..n {
            match self.step() {
                Ok(()) => continue,
                Err(CoreEngineError::FlowCompleted) => return Ok(()),
                Err(e) => return Err(e),
            }
        }
        Ok(())
    }

    #[inline]
    pub fn status(&self) -> FlowStatus {
        self.engine.status_of(self.flow_id, self.definition)
    }
}
