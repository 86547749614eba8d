use std::sync::Arc;

use serde_json::{json, Value};

use super::ParamInjector;
use crate::clock::{format_timestamp, Clock};
use crate::model::ExecutionContext;

/// Inyecta el instante actual del `Clock` bajo `key` en los steps indicados
/// (todos si `steps` está vacío). El reloj se consulta en el momento de
/// ejecutar el step.
#[derive(Debug, Clone)]
pub struct ClockInjector {
    clock: Arc<dyn Clock>,
    key: String,
    steps: Vec<String>,
}

impl ClockInjector {
    pub fn new(clock: Arc<dyn Clock>, key: impl Into<String>) -> Self {
        Self { clock,
               key: key.into(),
               steps: Vec::new() }
    }

    /// Restringe la inyección a un step concreto (acumulable).
    pub fn for_step(mut self, step_id: impl Into<String>) -> Self {
        self.steps.push(step_id.into());
        self
    }
}

impl ParamInjector for ClockInjector {
    fn inject(&self, _base: &Value, ctx: &ExecutionContext) -> Value {
        if !self.steps.is_empty() && !self.steps.iter().any(|s| *s == ctx.step_id) {
            return json!({});
        }
        let mut out = serde_json::Map::new();
        out.insert(self.key.clone(), Value::String(format_timestamp(self.clock.now())));
        Value::Object(out)
    }
}
