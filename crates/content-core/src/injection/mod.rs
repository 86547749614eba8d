//! Inyección de parámetros determinista.
//!
//! Orden de merge: `base_params` del step -> inyectores (en orden de registro).
//! Así llegan a los steps el timestamp del reloj y los overrides de
//! configuración sin que los steps lean estado global.

mod clock;
mod composite;
mod merge;
mod overrides;
mod param_injector;

pub use clock::ClockInjector;
pub use composite::CompositeInjector;
pub use merge::merge_json;
pub use overrides::StepParamsInjector;
pub use param_injector::ParamInjector;
