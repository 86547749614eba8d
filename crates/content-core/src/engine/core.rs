//! Core FlowEngine implementation

use std::collections::HashMap;
use std::sync::Arc;

use log::{debug, info, warn};
use serde_json::json;
use uuid::Uuid;

use crate::constants::{ENGINE_VERSION, ENTRY_BOUNDARY_ID, EXIT_BOUNDARY_ID};
use crate::engine::EngineBuilderInit;
use crate::errors::{Boundary, CoreEngineError};
use crate::event::{EventStore, FlowEvent, FlowEventKind, InMemoryEventStore};
use crate::hashing::hash_value;
use crate::injection::{CompositeInjector, ParamInjector};
use crate::model::{Artifact, ExecutionContext};
use crate::repo::{FlowDefinition, FlowRepository, InMemoryFlowRepository};
use crate::schema::Schema;
use crate::step::{FlowStatus, StepDefinition, StepRunResult};

/// Motor de ejecución de flujos lineales deterministas.
///
/// Orquesta la ejecución de pasos en orden estricto, valida cada borde contra
/// los esquemas declarados y registra la ejecución como eventos. El estado de
/// un flujo se reconstruye siempre desde el `EventStore`.
#[derive(Debug)]
pub struct FlowEngine<E, R>
    where E: EventStore,
          R: FlowRepository
{
    event_store: E,
    repository: R,
    artifact_store: HashMap<String, Artifact>,
    injectors: CompositeInjector,
    default_definition: Option<Arc<FlowDefinition>>,
    last_flow_id: Option<Uuid>,
}

impl FlowEngine<InMemoryEventStore, InMemoryFlowRepository> {
    /// Crea un nuevo engine con stores en memoria.
    #[inline]
    pub fn new() -> EngineBuilderInit<InMemoryEventStore, InMemoryFlowRepository> {
        EngineBuilderInit { event_store: InMemoryEventStore::default(),
                            repository: InMemoryFlowRepository::new() }
    }
}

impl<E, R> FlowEngine<E, R>
    where E: EventStore,
          R: FlowRepository
{
    /// Crea un nuevo builder con las stores proporcionadas.
    #[inline]
    pub fn builder(event_store: E, repository: R) -> EngineBuilderInit<E, R> {
        EngineBuilderInit { event_store, repository }
    }

    /// Crea un nuevo motor con los stores proporcionados y sin definición.
    pub fn new_with_stores(event_store: E, repository: R) -> Self {
        Self { event_store,
               repository,
               artifact_store: HashMap::new(),
               injectors: CompositeInjector::new(),
               default_definition: None,
               last_flow_id: None }
    }

    /// Añade un inyector de parámetros (se aplican en orden de registro).
    pub fn add_injector(&mut self, injector: Box<dyn ParamInjector>) {
        self.injectors.push(injector);
    }

    /// Configura la definición por defecto del flujo.
    pub fn set_default_definition(&mut self, definition: FlowDefinition) {
        self.default_definition = Some(Arc::new(definition));
    }

    pub fn default_definition(&self) -> Option<&FlowDefinition> {
        self.default_definition.as_deref()
    }

    pub fn event_store(&self) -> &E {
        &self.event_store
    }

    /// `flow_id` de la última ejecución iniciada con este engine.
    pub fn last_flow_id(&self) -> Option<Uuid> {
        self.last_flow_id
    }

    fn store_artifact(&mut self, mut artifact: Artifact) -> String {
        let h = hash_value(&artifact.payload);
        artifact.hash = h.clone();
        self.artifact_store.insert(h.clone(), artifact);
        h
    }

    /// Inicia un flujo nuevo con la definición por defecto y lo ejecuta hasta
    /// completarse. Devuelve el id del flujo o el primer error encontrado.
    pub fn start(&mut self, input: Artifact) -> Result<Uuid, CoreEngineError> {
        let def = self.default_definition
                      .clone()
                      .ok_or_else(|| CoreEngineError::Internal("no default definition configured".into()))?;
        let flow_id = Uuid::new_v4();
        self.start_flow(flow_id, &def, input)?;
        Ok(flow_id)
    }

    /// Valida la entrada, emite `FlowInitialized` y ejecuta todos los steps.
    pub fn start_flow(&mut self, flow_id: Uuid, definition: &FlowDefinition, input: Artifact) -> Result<(), CoreEngineError> {
        self.init_flow(flow_id, definition, input)?;
        self.run_flow_to_completion(flow_id, definition)
    }

    /// Valida la entrada contra el esquema del flujo y emite
    /// `FlowInitialized`, sin ejecutar steps (ver `FlowCtx` para avanzar paso
    /// a paso).
    ///
    /// Una entrada inválida no emite ningún evento.
    pub fn init_flow(&mut self, flow_id: Uuid, definition: &FlowDefinition, input: Artifact) -> Result<(), CoreEngineError> {
        if definition.is_empty() {
            return Err(CoreEngineError::EmptyDefinition);
        }
        if !self.event_store.list(flow_id).is_empty() {
            return Err(CoreEngineError::Internal(format!("flow {flow_id} already initialized")));
        }
        self.last_flow_id = Some(flow_id);

        let payload = check(&definition.input_schema, &input.payload, ENTRY_BOUNDARY_ID, Boundary::Input)?;
        let input_hash = self.store_artifact(Artifact { payload, ..input });
        self.event_store.append_kind(flow_id,
                                     FlowEventKind::FlowInitialized { definition_hash: definition.definition_hash.clone(),
                                                                      step_count: definition.len(),
                                                                      input_hash });
        debug!("flow {flow_id} initialized with {} step(s)", definition.len());
        Ok(())
    }

    /// Ejecuta un flujo ya inicializado hasta su finalización y verifica la
    /// salida final contra el esquema de salida del flujo.
    pub fn run_flow_to_completion(&mut self, flow_id: Uuid, definition: &FlowDefinition) -> Result<(), CoreEngineError> {
        loop {
            match self.next_with(flow_id, definition) {
                Ok(()) => continue,
                Err(CoreEngineError::FlowCompleted) => break,
                Err(e) => return Err(e),
            }
        }
        let output = self.final_output(flow_id)
                         .ok_or_else(|| CoreEngineError::Internal(format!("flow {flow_id} completed without output")))?;
        check(&definition.output_schema, &output.payload, EXIT_BOUNDARY_ID, Boundary::Output)?;
        Ok(())
    }

    /// Ejecuta el siguiente step pendiente del flujo.
    ///
    /// Devuelve `FlowCompleted` cuando no quedan steps y `FlowHasFailed` si
    /// algún step falló antes (no hay reintentos).
    pub fn next_with(&mut self, flow_id: Uuid, definition: &FlowDefinition) -> Result<(), CoreEngineError> {
        let events = self.event_store.list(flow_id);
        let instance = self.repository.load(flow_id, &events, definition);

        let Some(input_hash) = instance.input_hash.clone() else {
            return Err(CoreEngineError::Internal(format!("flow {flow_id} not initialized")));
        };
        if instance.failed_step().is_some() {
            return Err(CoreEngineError::FlowHasFailed);
        }
        if instance.completed || instance.cursor >= definition.len() {
            return Err(CoreEngineError::FlowCompleted);
        }

        let cursor = instance.cursor;
        let step_def = definition.steps[cursor].as_ref();
        let input_ref = if cursor == 0 {
            Some(input_hash)
        } else {
            instance.steps.get(cursor - 1).and_then(|s| s.outputs.first().cloned())
        };
        let input = input_ref.as_deref().and_then(|h| self.artifact_store.get(h)).cloned();

        self.event_store.append_kind(flow_id,
                                     FlowEventKind::StepStarted { step_index: cursor,
                                                                  step_id: step_def.id().to_string() });
        debug!("flow {flow_id}: step {} ({cursor}) started", step_def.id());

        let mut ctx = ExecutionContext::new(step_def.id(), None, json!({}));
        let Some(input) = input else {
            return self.handle_step_failure(flow_id, cursor, step_def, &ctx, CoreEngineError::MissingInputs);
        };
        match check(&step_def.input_schema(), &input.payload, step_def.id(), Boundary::Input) {
            Ok(payload) => ctx.input = Some(Artifact { payload, ..input }),
            Err(e) => return self.handle_step_failure(flow_id, cursor, step_def, &ctx, e),
        }
        ctx.params = self.injectors.apply(&step_def.base_params(), &ctx);

        match step_def.run(&ctx) {
            StepRunResult::Success { outputs } => {
                let output_schema = step_def.output_schema();
                let mut checked = Vec::with_capacity(outputs.len());
                for o in outputs {
                    match check(&output_schema, &o.payload, step_def.id(), Boundary::Output) {
                        Ok(payload) => checked.push(Artifact { payload, ..o }),
                        Err(e) => return self.handle_step_failure(flow_id, cursor, step_def, &ctx, e),
                    }
                }
                self.handle_step_success(flow_id, cursor, step_def, &ctx, checked, definition)
            }
            StepRunResult::Failure { error } => self.handle_step_failure(flow_id, cursor, step_def, &ctx, error),
        }
    }

    fn handle_step_success(&mut self,
                           flow_id: Uuid,
                           cursor: usize,
                           step_def: &dyn StepDefinition,
                           ctx: &ExecutionContext,
                           outputs: Vec<Artifact>,
                           definition: &FlowDefinition)
                           -> Result<(), CoreEngineError> {
        let output_hashes: Vec<String> = outputs.into_iter().map(|o| self.store_artifact(o)).collect();
        let fp = step_fingerprint(cursor, step_def, ctx, &output_hashes, &definition.definition_hash);

        self.event_store.append_kind(flow_id,
                                     FlowEventKind::StepFinished { step_index: cursor,
                                                                   step_id: step_def.id().to_string(),
                                                                   outputs: output_hashes,
                                                                   fingerprint: fp });
        debug!("flow {flow_id}: step {} finished", step_def.id());

        if cursor + 1 == definition.len() {
            self.complete_flow(flow_id, definition);
        }
        Ok(())
    }

    fn handle_step_failure(&mut self,
                           flow_id: Uuid,
                           cursor: usize,
                           step_def: &dyn StepDefinition,
                           ctx: &ExecutionContext,
                           error: CoreEngineError)
                           -> Result<(), CoreEngineError> {
        let fp = hash_value(&json!({
            "engine_version": ENGINE_VERSION,
            "definition_hash": step_def.definition_hash(),
            "step_index": cursor,
            "input_hash": ctx.input.as_ref().map(|a| hash_value(&a.payload)),
            "params": ctx.params
        }));
        warn!("flow {flow_id}: step {} failed: {error}", step_def.id());

        self.event_store.append_kind(flow_id,
                                     FlowEventKind::StepFailed { step_index: cursor,
                                                                 step_id: step_def.id().to_string(),
                                                                 error: error.clone(),
                                                                 fingerprint: fp });
        Err(error)
    }

    fn complete_flow(&mut self, flow_id: Uuid, definition: &FlowDefinition) {
        let step_fps: Vec<String> = self.event_store
                                        .list(flow_id)
                                        .into_iter()
                                        .filter_map(|e| match e.kind {
                                            FlowEventKind::StepFinished { fingerprint, .. } => Some(fingerprint),
                                            _ => None,
                                        })
                                        .collect();

        let flow_fingerprint = hash_value(&json!({
            "engine_version": ENGINE_VERSION,
            "definition_hash": definition.definition_hash,
            "step_fingerprints": step_fps
        }));
        info!("flow {flow_id} completed");
        self.event_store.append_kind(flow_id, FlowEventKind::FlowCompleted { flow_fingerprint });
    }

    /// Artifact final de un flujo completado (primer output del último step).
    pub fn final_output(&self, flow_id: Uuid) -> Option<Artifact> {
        let events = self.event_store.list(flow_id);
        if !events.iter().any(|e| matches!(e.kind, FlowEventKind::FlowCompleted { .. })) {
            return None;
        }
        events.iter()
              .rev()
              .find_map(|e| match &e.kind {
                  FlowEventKind::StepFinished { outputs, .. } => outputs.first(),
                  _ => None,
              })
              .and_then(|h| self.artifact_store.get(h))
              .cloned()
    }

    /// Lista los eventos de un flujo.
    pub fn events_for(&self, flow_id: Uuid) -> Vec<FlowEvent> {
        self.event_store.list(flow_id)
    }

    /// Variante compacta de eventos (`I`, `S`, `F`, `X`, `C`).
    pub fn event_variants(&self, flow_id: Uuid) -> Vec<&'static str> {
        self.events_for(flow_id).iter().map(|e| e.kind.variant_code()).collect()
    }

    /// Fingerprint del flujo si está completado.
    pub fn flow_fingerprint(&self, flow_id: Uuid) -> Option<String> {
        self.events_for(flow_id).into_iter().rev().find_map(|e| match e.kind {
                                                      FlowEventKind::FlowCompleted { flow_fingerprint } => Some(flow_fingerprint),
                                                      _ => None,
                                                  })
    }

    /// Estado agregado del flujo según el replay de sus eventos.
    pub fn status_of(&self, flow_id: Uuid, definition: &FlowDefinition) -> FlowStatus {
        let events = self.event_store.list(flow_id);
        self.repository.load(flow_id, &events, definition).status()
    }
}

impl Default for FlowEngine<InMemoryEventStore, InMemoryFlowRepository> {
    fn default() -> Self {
        Self::new_with_stores(InMemoryEventStore::default(), InMemoryFlowRepository::new())
    }
}

fn check(schema: &Schema,
         payload: &serde_json::Value,
         step_id: &str,
         boundary: Boundary)
         -> Result<serde_json::Value, CoreEngineError> {
    schema.validate(payload)
          .map_err(|e| CoreEngineError::SchemaViolation { step_id: step_id.to_string(),
                                                          boundary,
                                                          violations: e.violations })
}

fn step_fingerprint(cursor: usize,
                    step_def: &dyn StepDefinition,
                    ctx: &ExecutionContext,
                    output_hashes: &[String],
                    definition_hash: &str)
                    -> String {
    hash_value(&json!({
        "engine_version": ENGINE_VERSION,
        "definition_hash": definition_hash,
        "step_definition_hash": step_def.definition_hash(),
        "step_index": cursor,
        "input_hash": ctx.input.as_ref().map(|a| hash_value(&a.payload)),
        "output_hashes": output_hashes,
        "params": ctx.params
    }))
}
