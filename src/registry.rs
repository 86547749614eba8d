//! Registro de workflows y trait async de ejecución.
//!
//! Cada ejecución es independiente: los workflows de contenido arman un
//! engine nuevo por llamada, así que el registro puede compartirse entre
//! tareas sin sincronización adicional.

use std::collections::BTreeMap;
use std::sync::Arc;

use async_trait::async_trait;
use content_adapters::{ContentWorkflow, PipelineVariant};
use content_core::{Clock, Schema, SystemClock};
use log::info;
use serde_json::Value;

use crate::config::Config;
use crate::errors::WorkflowError;

/// Workflow ejecutable por el host.
#[async_trait]
pub trait Workflow: Send + Sync {
    fn id(&self) -> &str;
    fn description(&self) -> &str;
    fn input_schema(&self) -> Schema;
    fn output_schema(&self) -> Schema;
    async fn execute(&self, input: Value) -> Result<Value, WorkflowError>;
}

#[async_trait]
impl Workflow for ContentWorkflow {
    fn id(&self) -> &str {
        ContentWorkflow::id(self)
    }

    fn description(&self) -> &str {
        ContentWorkflow::description(self)
    }

    fn input_schema(&self) -> Schema {
        ContentWorkflow::input_schema(self)
    }

    fn output_schema(&self) -> Schema {
        ContentWorkflow::output_schema(self)
    }

    async fn execute(&self, input: Value) -> Result<Value, WorkflowError> {
        let output = self.process(input)?;
        Ok(output.to_value()?)
    }
}

/// Workflows disponibles indexados por id (orden estable).
#[derive(Default)]
pub struct WorkflowRegistry {
    workflows: BTreeMap<String, Arc<dyn Workflow>>,
}

impl WorkflowRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registra los dos pipelines de contenido con los ajustes de `config`.
    pub fn with_defaults(config: &Config) -> Result<Self, WorkflowError> {
        Self::with_clock(config, Arc::new(SystemClock))
    }

    /// Igual que `with_defaults` pero con un reloj explícito.
    pub fn with_clock(config: &Config, clock: Arc<dyn Clock>) -> Result<Self, WorkflowError> {
        let mut registry = Self::new();
        for variant in [PipelineVariant::Basic, PipelineVariant::WithSummary] {
            let workflow = ContentWorkflow::new(variant).with_settings(config.settings)
                                                        .with_clock(clock.clone());
            registry.register(Arc::new(workflow))?;
        }
        Ok(registry)
    }

    pub fn register(&mut self, workflow: Arc<dyn Workflow>) -> Result<(), WorkflowError> {
        let id = workflow.id().to_string();
        if self.workflows.contains_key(&id) {
            return Err(WorkflowError::DuplicateWorkflow(id));
        }
        self.workflows.insert(id, workflow);
        Ok(())
    }

    pub fn get(&self, id: &str) -> Option<Arc<dyn Workflow>> {
        self.workflows.get(id).cloned()
    }

    pub fn ids(&self) -> Vec<&str> {
        self.workflows.keys().map(String::as_str).collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Arc<dyn Workflow>> {
        self.workflows.values()
    }

    pub async fn execute(&self, id: &str, input: Value) -> Result<Value, WorkflowError> {
        let workflow = self.get(id).ok_or_else(|| WorkflowError::UnknownWorkflow(id.to_string()))?;
        info!("executing workflow {id}");
        workflow.execute(input).await
    }
}
