//! Definiciones relacionadas a Steps.
//!
//! Un Step es una unidad determinista que transforma un `Artifact` de entrada
//! en 0..n artifacts de salida, con esquemas de entrada/salida declarados.
//! Este módulo define:
//! - `StepDefinition`: interfaz neutral usada por el engine.
//! - `TypedStep`: interfaz de alto nivel con tipos fuertes.
//! - `StepRunResult` / `StepRunResultTyped`.
//! - `Pipe` para construir pipelines tipados que validan IO en compilación.

pub mod definition;
pub mod macros;
pub mod pipeline;
mod run_result;
mod status;
pub mod typed;

pub use definition::{StepDefinition, StepKind};
pub use pipeline::{Pipe, SameAs};
pub use run_result::StepRunResult;
pub use status::{FlowStatus, StepStatus};
pub use typed::{StepRunResultTyped, TypedStep};
