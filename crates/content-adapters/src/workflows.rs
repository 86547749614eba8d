//! Composición de los pipelines de contenido y su fachada `ContentWorkflow`.

use std::sync::Arc;

use content_core::{ArtifactSpec, Clock, ClockInjector, FlowDefinition, FlowEngine, Pipe, Schema, StepParamsInjector,
                   SystemClock};
use log::debug;
use serde::Serialize;
use serde_json::{json, Value};

use crate::artifacts::{EnhancedContent, RawContentInput, SummarizedContent};
use crate::error::ContentError;
use crate::steps::{EnhanceContentStep, GenerateSummaryStep, ValidateContentStep, ENHANCE_STEP_ID, SUMMARY_STEP_ID,
                   VALIDATE_STEP_ID};

pub const BASIC_WORKFLOW_ID: &str = "content-basic-workflow";
pub const CONTENT_WORKFLOW_ID: &str = "content-processing-workflow";

/// Clave bajo la que el reloj inyecta el instante de procesado.
pub const PROCESSED_AT_PARAM: &str = "processedAt";

/// validate → enhance.
pub fn basic_pipeline() -> FlowDefinition {
    Pipe::new(ValidateContentStep::new()).then(EnhanceContentStep::new()).build()
}

/// validate → enhance → summarize.
pub fn content_pipeline() -> FlowDefinition {
    Pipe::new(ValidateContentStep::new()).then(EnhanceContentStep::new())
                                         .then(GenerateSummaryStep::new())
                                         .build()
}

/// Ajustes numéricos de los steps, aplicados como overrides de params.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PipelineSettings {
    pub min_words: usize,
    pub words_per_minute: u32,
    pub detail_threshold: usize,
}

impl Default for PipelineSettings {
    fn default() -> Self {
        Self { min_words: 5,
               words_per_minute: 200,
               detail_threshold: 50 }
    }
}

impl PipelineSettings {
    pub fn injector(&self) -> StepParamsInjector {
        StepParamsInjector::new().with(VALIDATE_STEP_ID, json!({ "minWords": self.min_words }))
                                 .with(ENHANCE_STEP_ID, json!({ "wordsPerMinute": self.words_per_minute }))
                                 .with(SUMMARY_STEP_ID, json!({ "detailThreshold": self.detail_threshold }))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PipelineVariant {
    Basic,
    WithSummary,
}

impl PipelineVariant {
    pub fn id(&self) -> &'static str {
        match self {
            PipelineVariant::Basic => BASIC_WORKFLOW_ID,
            PipelineVariant::WithSummary => CONTENT_WORKFLOW_ID,
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            PipelineVariant::Basic => "Validates and enhances content",
            PipelineVariant::WithSummary => "Validates, enhances and summarizes content",
        }
    }

    pub fn definition(&self) -> FlowDefinition {
        match self {
            PipelineVariant::Basic => basic_pipeline(),
            PipelineVariant::WithSummary => content_pipeline(),
        }
    }
}

/// Resultado final según la variante ejecutada.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum ContentOutput {
    Enhanced(EnhancedContent),
    Summarized(SummarizedContent),
}

impl ContentOutput {
    pub fn to_value(&self) -> Result<Value, ContentError> {
        serde_json::to_value(self).map_err(|e| ContentError::Decode(e.to_string()))
    }

    pub fn summary(&self) -> Option<&str> {
        match self {
            ContentOutput::Enhanced(_) => None,
            ContentOutput::Summarized(s) => Some(&s.summary),
        }
    }
}

/// Pipeline de contenido listo para ejecutar: variante, reloj y settings.
///
/// Cada llamada a `process` arma un engine nuevo, así que un mismo
/// `ContentWorkflow` puede compartirse entre invocaciones concurrentes.
#[derive(Debug, Clone)]
pub struct ContentWorkflow {
    variant: PipelineVariant,
    clock: Arc<dyn Clock>,
    settings: PipelineSettings,
}

impl ContentWorkflow {
    pub fn new(variant: PipelineVariant) -> Self {
        Self { variant,
               clock: Arc::new(SystemClock),
               settings: PipelineSettings::default() }
    }

    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    pub fn with_settings(mut self, settings: PipelineSettings) -> Self {
        self.settings = settings;
        self
    }

    pub fn id(&self) -> &'static str {
        self.variant.id()
    }

    pub fn description(&self) -> &'static str {
        self.variant.description()
    }

    pub fn input_schema(&self) -> Schema {
        RawContentInput::schema()
    }

    pub fn output_schema(&self) -> Schema {
        match self.variant {
            PipelineVariant::Basic => EnhancedContent::schema(),
            PipelineVariant::WithSummary => SummarizedContent::schema(),
        }
    }

    /// Engine en memoria con la definición de la variante y los inyectores
    /// de reloj y settings ya instalados.
    pub fn engine(&self) -> FlowEngine<content_core::InMemoryEventStore, content_core::InMemoryFlowRepository> {
        let mut engine = FlowEngine::default();
        engine.set_default_definition(self.variant.definition());
        engine.add_injector(Box::new(ClockInjector::new(self.clock.clone(), PROCESSED_AT_PARAM).for_step(ENHANCE_STEP_ID)));
        engine.add_injector(Box::new(self.settings.injector()));
        engine
    }

    /// Ejecuta el pipeline sobre un payload JSON arbitrario.
    pub fn process(&self, input: Value) -> Result<ContentOutput, ContentError> {
        let mut engine = self.engine();
        let flow_id = engine.start(content_core::Artifact::from_json(input))?;
        debug!("{}: flow {flow_id} finished", self.id());

        let artifact = engine.final_output(flow_id)
                             .ok_or_else(|| ContentError::Decode(format!("flow {flow_id} produced no output")))?;
        let decode = |e: content_core::model::ArtifactDecodeError| ContentError::Decode(e.to_string());
        match self.variant {
            PipelineVariant::Basic => EnhancedContent::from_artifact(&artifact).map(ContentOutput::Enhanced).map_err(decode),
            PipelineVariant::WithSummary => {
                SummarizedContent::from_artifact(&artifact).map(ContentOutput::Summarized).map_err(decode)
            }
        }
    }

    /// Variante tipada de `process`.
    pub fn process_raw(&self, input: RawContentInput) -> Result<ContentOutput, ContentError> {
        let payload = serde_json::to_value(&input).map_err(|e| ContentError::Decode(e.to_string()))?;
        self.process(payload)
    }
}
