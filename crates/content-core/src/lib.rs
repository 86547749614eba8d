//! content-core: motor lineal determinista de steps con bordes validados por
//! esquema.
pub mod clock;
pub mod constants;
pub mod engine;
pub mod errors;
pub mod event;
pub mod hashing;
pub mod injection;
pub mod model;
pub mod repo;
pub mod schema;
pub mod step;

pub use clock::{Clock, FixedClock, SystemClock};
pub use engine::{FlowCtx, FlowEngine};
pub use errors::{Boundary, CoreEngineError};
pub use event::{EventStore, FlowEvent, FlowEventKind, InMemoryEventStore};
pub use injection::{ClockInjector, CompositeInjector, ParamInjector, StepParamsInjector};
pub use model::{Artifact, ArtifactKind, ArtifactSpec, ExecutionContext};
pub use repo::{build_flow_definition, FlowDefinition, FlowRepository, InMemoryFlowRepository};
pub use schema::{Field, Schema, SchemaError, Violation};
pub use step::{FlowStatus, Pipe, SameAs, StepDefinition, StepKind, StepRunResult, StepRunResultTyped, StepStatus, TypedStep};
