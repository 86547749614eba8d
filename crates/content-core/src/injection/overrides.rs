use std::collections::BTreeMap;

use serde_json::{json, Value};

use super::ParamInjector;
use crate::model::ExecutionContext;

/// Overrides de params por id de step (típicamente desde configuración).
#[derive(Debug, Clone, Default)]
pub struct StepParamsInjector {
    overrides: BTreeMap<String, Value>,
}

impl StepParamsInjector {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registra overrides para `step_id`; llamadas repetidas se mergean.
    pub fn with(mut self, step_id: impl Into<String>, params: Value) -> Self {
        let entry = self.overrides.entry(step_id.into()).or_insert_with(|| json!({}));
        *entry = super::merge_json(entry, &params);
        self
    }
}

impl ParamInjector for StepParamsInjector {
    fn inject(&self, _base: &Value, ctx: &ExecutionContext) -> Value {
        self.overrides.get(&ctx.step_id).cloned().unwrap_or_else(|| json!({}))
    }
}
