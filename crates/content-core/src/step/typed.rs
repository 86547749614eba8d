use std::fmt::Debug;

use serde::{de::DeserializeOwned, Serialize};
use serde_json::{json, Value};

use super::{StepKind, StepRunResult};
use crate::errors::CoreEngineError;
use crate::model::{ArtifactSpec, ExecutionContext};
use crate::schema::Schema;

/// Resultado tipado de ejecutar un `TypedStep`.
///
/// Permite trabajar con outputs fuertemente tipados durante la implementación
/// de pasos y convertirlos a la representación neutra que el engine usa.
#[derive(Debug)]
pub enum StepRunResultTyped<Out: ArtifactSpec> {
    Success { outputs: Vec<Out> },
    Failure { error: CoreEngineError },
}

impl<Out: ArtifactSpec> StepRunResultTyped<Out> {
    /// Convierte a `StepRunResult` neutro serializando los outputs con
    /// `ArtifactSpec::into_artifact`.
    pub fn into_neutral(self) -> StepRunResult {
        match self {
            StepRunResultTyped::Success { outputs } => {
                match outputs.into_iter().map(ArtifactSpec::into_artifact).collect::<Result<Vec<_>, _>>() {
                    Ok(arts) => StepRunResult::Success { outputs: arts },
                    Err(e) => StepRunResult::Failure { error: CoreEngineError::Internal(format!("serialize output: {e}")) },
                }
            }
            StepRunResultTyped::Failure { error } => StepRunResult::Failure { error },
        }
    }
}

impl<Out: ArtifactSpec> From<Result<Out, CoreEngineError>> for StepRunResultTyped<Out> {
    fn from(r: Result<Out, CoreEngineError>) -> Self {
        match r {
            Ok(out) => StepRunResultTyped::Success { outputs: vec![out] },
            Err(error) => StepRunResultTyped::Failure { error },
        }
    }
}

/// Interfaz de alto nivel para definir Steps con tipos fuertes
/// (Params / Input / Output).
///
/// Implementadores escriben `run_typed` con tipos concretos; el adaptador de
/// abajo convierte esa ejecución a la interfaz neutra `StepDefinition`.
pub trait TypedStep {
    /// Parámetros deserializables y clonables (soportan `Default`).
    type Params: DeserializeOwned + Serialize + Clone + Default;
    /// Tipo concreto esperado como input.
    type Input: ArtifactSpec;
    /// Tipo concreto producido como output.
    type Output: ArtifactSpec;

    /// Identificador estable del step dentro del flow.
    fn id(&self) -> &'static str;

    /// Nombre amigable (por defecto usa el id).
    fn name(&self) -> &str {
        self.id()
    }

    fn description(&self) -> &'static str {
        ""
    }

    /// Tipo general del step.
    fn kind(&self) -> StepKind;

    /// Parámetros por defecto deterministas.
    fn params_default(&self) -> Self::Params {
        Default::default()
    }

    /// Ejecución tipada. `input` es `None` sólo si el engine no encontró
    /// artifact previo.
    fn run_typed(&self, input: Option<Self::Input>, params: Self::Params) -> StepRunResultTyped<Self::Output>;
}

// -------------------------------------------------------------
// Adaptador: cualquier `TypedStep` implementa `StepDefinition` neutro.
// -------------------------------------------------------------
impl<T> crate::step::StepDefinition for T where T: TypedStep + Debug + 'static
{
    fn id(&self) -> &str {
        <Self as TypedStep>::id(self)
    }

    fn name(&self) -> &str {
        <Self as TypedStep>::name(self)
    }

    fn description(&self) -> &str {
        <Self as TypedStep>::description(self)
    }

    fn base_params(&self) -> Value {
        // Params con Serialize derivado no fallan; un objeto vacío deja que
        // `#[serde(default)]` complete en la decodificación.
        serde_json::to_value(self.params_default()).unwrap_or_else(|_| json!({}))
    }

    fn input_schema(&self) -> Schema {
        <T::Input as ArtifactSpec>::schema()
    }

    fn output_schema(&self) -> Schema {
        <T::Output as ArtifactSpec>::schema()
    }

    fn run(&self, ctx: &ExecutionContext) -> StepRunResult {
        let step_id = <Self as TypedStep>::id(self);
        let params: T::Params = match ctx.params_as() {
            Ok(p) => p,
            Err(e) => {
                return StepRunResult::Failure { error: CoreEngineError::Decode { step_id: step_id.to_string(),
                                                                                 message: format!("params: {e}") } }
            }
        };

        let typed_in = match ctx.input.as_ref().map(<T::Input as ArtifactSpec>::from_artifact) {
            None => None,
            Some(Ok(v)) => Some(v),
            Some(Err(e)) => {
                return StepRunResult::Failure { error: CoreEngineError::Decode { step_id: step_id.to_string(),
                                                                                 message: e.to_string() } }
            }
        };

        <Self as TypedStep>::run_typed(self, typed_in, params).into_neutral()
    }

    fn kind(&self) -> StepKind {
        <Self as TypedStep>::kind(self)
    }

    fn definition_hash(&self) -> String {
        crate::hashing::hash_value(&json!({
            "id": <Self as TypedStep>::id(self),
            "kind": format!("{:?}", <Self as TypedStep>::kind(self)),
            "base_params": crate::step::StepDefinition::base_params(self),
            "type": std::any::type_name::<T>()
        }))
    }
}
