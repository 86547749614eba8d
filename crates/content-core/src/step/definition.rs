use std::fmt::Debug;

use serde_json::{json, Value};

use super::run_result::StepRunResult;
use crate::model::ExecutionContext;
use crate::schema::Schema;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepKind {
    /// Verifica y normaliza la entrada; puede rechazarla.
    Check,
    /// Deriva un nuevo registro a partir del anterior.
    Transform,
}

/// Trait que define un Step. Implementaciones deben ser puras respecto a inputs + params.
pub trait StepDefinition: Debug {
    /// Identificador estable y único dentro del Flow.
    fn id(&self) -> &str;

    /// Nombre opcional amigable.
    fn name(&self) -> &str {
        self.id()
    }

    fn description(&self) -> &str {
        ""
    }

    /// Parámetros base deterministas (defaults). Se mergean con los inyectores.
    fn base_params(&self) -> Value;

    /// Forma exigida al artifact de entrada antes de ejecutar.
    fn input_schema(&self) -> Schema {
        Schema::Any
    }

    /// Forma exigida a cada artifact de salida antes de aceptarlo.
    fn output_schema(&self) -> Schema {
        Schema::Any
    }

    /// Ejecución pura del step. Debe usar únicamente inputs + params.
    fn run(&self, ctx: &ExecutionContext) -> StepRunResult;

    /// Tipo general del step.
    fn kind(&self) -> StepKind;

    /// Hash de la definición del step (entra en los fingerprints).
    fn definition_hash(&self) -> String {
        crate::hashing::hash_value(&json!({
            "id": self.id(),
            "kind": format!("{:?}", self.kind()),
            "base_params": self.base_params(),
        }))
    }
}
