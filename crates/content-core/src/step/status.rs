/// Estado de un Step en tiempo de ejecución.
///
/// Las transiciones válidas son:
/// - `Pending` -> `Running`
/// - `Running` -> `FinishedOk`
/// - `Running` -> `Failed`
///
/// No se permiten reversiones o saltos arbitrarios entre estados.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepStatus {
    /// El paso está pendiente de ejecución.
    Pending,
    /// El paso está en ejecución.
    Running,
    /// El paso finalizó correctamente.
    FinishedOk,
    /// El paso falló.
    Failed,
}

/// Estado agregado de una ejecución, derivado del replay de eventos.
///
/// Cadena lineal: `NotStarted -> Running(0) -> StepDone(0) -> Running(1) ->
/// ... -> Completed`, con salto directo a `Failed` desde cualquier step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlowStatus {
    NotStarted,
    Running { step_index: usize },
    StepDone { step_index: usize },
    Completed,
    Failed { step_index: usize },
}
