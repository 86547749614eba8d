//! Builder para `FlowEngine`.
//!
//! Patrón builder seguro en tiempo de compilación: se declara el primer paso y
//! se encadenan pasos cuyos tipos de entrada y salida sean compatibles.
//!
//! - `EngineBuilderInit` es el estado inicial: stores (event_store +
//!   repository) presentes, sin pasos.
//! - `EngineBuilder<S, E, R>` conserva el tipo de salida del último paso
//!   `S::Output` (mediante `PhantomData`) y la lista de pasos como
//!   `Vec<Box<dyn StepDefinition>>`.
//! - `add_step` exige `N::Input: SameAs<S::Output>`.
//!
//! ```ignore
//! let engine = FlowEngine::new()
//!     .first_step(ValidateStep)
//!     .add_step(EnhanceStep)
//!     .with_injector(Box::new(clock_injector))
//!     .build();
//! ```

use std::fmt::Debug;
use std::marker::PhantomData;

use crate::engine::FlowEngine;
use crate::event::EventStore;
use crate::injection::ParamInjector;
use crate::repo::{build_flow_definition, FlowRepository};
use crate::step::{SameAs, StepDefinition, TypedStep};

/// Estado inicial del builder.
#[derive(Debug)]
pub struct EngineBuilderInit<E: EventStore, R: FlowRepository> {
    /// Store de eventos que usará el engine.
    pub event_store: E,
    /// Repositorio que reconstruye el estado de los flujos.
    pub repository: R,
}

impl<E: EventStore, R: FlowRepository> EngineBuilderInit<E, R> {
    /// Define el primer paso del flujo y transiciona al builder completo.
    #[inline]
    pub fn first_step<S>(self, step: S) -> EngineBuilder<S, E, R>
        where S: TypedStep + Debug + 'static
    {
        EngineBuilder { event_store: self.event_store,
                        repository: self.repository,
                        steps: vec![Box::new(step)],
                        injectors: Vec::new(),
                        _out: PhantomData::<S::Output> }
    }
}

/// Builder principal que acumula pasos y garantiza compatibilidad de tipos.
#[derive(Debug)]
pub struct EngineBuilder<S: TypedStep + Debug + 'static, E: EventStore, R: FlowRepository> {
    event_store: E,
    repository: R,
    /// Lista de pasos que conforman la definición del flujo.
    steps: Vec<Box<dyn StepDefinition>>,
    injectors: Vec<Box<dyn ParamInjector>>,
    /// Marcador de tipo para el output del último paso añadido.
    _out: PhantomData<S::Output>,
}

impl<S: TypedStep + Debug + 'static, E: EventStore, R: FlowRepository> EngineBuilder<S, E, R> {
    /// Añade el siguiente paso; `N::Input` debe coincidir con `S::Output`.
    #[inline]
    pub fn add_step<N>(mut self, next: N) -> EngineBuilder<N, E, R>
        where N: TypedStep + Debug + 'static,
              N::Input: SameAs<S::Output>
    {
        self.steps.push(Box::new(next));

        EngineBuilder { event_store: self.event_store,
                        repository: self.repository,
                        steps: self.steps,
                        injectors: self.injectors,
                        _out: PhantomData }
    }

    /// Registra un inyector de parámetros.
    #[inline]
    pub fn with_injector(mut self, injector: Box<dyn ParamInjector>) -> Self {
        self.injectors.push(injector);
        self
    }

    /// Construye el `FlowEngine` con la definición generada a partir de los
    /// pasos como definición por defecto.
    #[inline]
    pub fn build(self) -> FlowEngine<E, R> {
        let mut engine = FlowEngine::new_with_stores(self.event_store, self.repository);
        engine.set_default_definition(build_flow_definition(self.steps));
        for injector in self.injectors {
            engine.add_injector(injector);
        }
        engine
    }
}
