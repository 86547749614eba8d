use serde::de::DeserializeOwned;
use serde_json::Value;

use super::Artifact;

/// Contexto de ejecución entregado a `StepDefinition::run`.
#[derive(Debug, Clone)]
pub struct ExecutionContext {
    pub step_id: String,
    pub input: Option<Artifact>, // artifact único encadenado (entrada del flujo para el primer step)
    pub params: Value,           // base_params + inyectores
}

impl ExecutionContext {
    pub fn new(step_id: impl Into<String>, input: Option<Artifact>, params: Value) -> Self {
        Self { step_id: step_id.into(),
               input,
               params }
    }

    /// Decodifica los params efectivos al tipo del step.
    pub fn params_as<T: DeserializeOwned>(&self) -> Result<T, serde_json::Error> {
        serde_json::from_value(self.params.clone())
    }
}
