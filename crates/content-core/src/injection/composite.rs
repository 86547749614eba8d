//! `CompositeInjector`: aplica una secuencia de `ParamInjector` en orden y
//! devuelve los params resultantes.

use crate::model::ExecutionContext;
use serde_json::Value;

use super::merge::merge_json;
use super::param_injector::ParamInjector;

#[derive(Debug, Default)]
pub struct CompositeInjector {
    pub injectors: Vec<Box<dyn ParamInjector>>,
}

impl CompositeInjector {
    pub fn new() -> Self {
        Self { injectors: vec![] }
    }

    pub fn with_injectors(inj: Vec<Box<dyn ParamInjector>>) -> Self {
        Self { injectors: inj }
    }

    pub fn push(&mut self, injector: Box<dyn ParamInjector>) {
        self.injectors.push(injector);
    }

    pub fn is_empty(&self) -> bool {
        self.injectors.is_empty()
    }

    /// Aplica los inyectores sobre `base` y devuelve los params resultantes.
    pub fn apply(&self, base: &Value, ctx: &ExecutionContext) -> Value {
        let mut accumulated = base.clone();
        for i in self.injectors.iter() {
            let v = i.inject(&accumulated, ctx);
            accumulated = merge_json(&accumulated, &v);
        }
        accumulated
    }
}
