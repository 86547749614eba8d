use std::sync::Arc;

use content_adapters::{ContentError, ContentWorkflow, PipelineVariant};
use content_core::FixedClock;
use contentflow::{Config, Workflow, WorkflowError, WorkflowRegistry};
use serde_json::json;

fn fixed(variant: PipelineVariant) -> Arc<ContentWorkflow> {
    let clock = FixedClock::parse("2024-01-01T00:00:00Z").unwrap();
    Arc::new(ContentWorkflow::new(variant).with_clock(Arc::new(clock)))
}

#[test]
fn defaults_register_both_pipelines() {
    let registry = WorkflowRegistry::with_defaults(&Config::default()).unwrap();
    assert_eq!(registry.ids(), vec!["content-basic-workflow", "content-processing-workflow"]);
    let wf = registry.get("content-processing-workflow").unwrap();
    assert!(wf.output_schema().field("summary").is_some());
    assert!(wf.input_schema().field("type").is_some());
}

#[test]
fn defaults_can_be_extended_but_not_duplicated() {
    let clock = Arc::new(FixedClock::parse("2024-01-01T00:00:00Z").unwrap());
    let mut registry = WorkflowRegistry::with_clock(&Config::default(), clock).unwrap();
    let err = registry.register(fixed(PipelineVariant::WithSummary)).unwrap_err();
    assert_eq!(err, WorkflowError::DuplicateWorkflow("content-processing-workflow".into()));
    assert_eq!(registry.ids().len(), 2);
}

#[test]
fn duplicate_ids_are_rejected() {
    let mut registry = WorkflowRegistry::new();
    registry.register(fixed(PipelineVariant::Basic)).unwrap();
    let err = registry.register(fixed(PipelineVariant::Basic)).unwrap_err();
    assert_eq!(err, WorkflowError::DuplicateWorkflow("content-basic-workflow".into()));
}

#[tokio::test]
async fn unknown_id_fails() {
    let registry = WorkflowRegistry::with_defaults(&Config::default()).unwrap();
    let err = registry.execute("missing", json!({"content": "a b c d e"})).await.unwrap_err();
    assert_eq!(err, WorkflowError::UnknownWorkflow("missing".into()));
}

#[tokio::test]
async fn execute_returns_summarized_json() {
    let mut registry = WorkflowRegistry::new();
    registry.register(fixed(PipelineVariant::WithSummary)).unwrap();
    let out = registry.execute("content-processing-workflow",
                               json!({"content": "Buy milk eggs bread and cheese", "type": "article"}))
                      .await
                      .unwrap();
    assert_eq!(out,
               json!({
                   "content": "Buy milk eggs bread and cheese",
                   "type": "article",
                   "wordCount": 6,
                   "metadata": {"readingTime": 1, "difficulty": "easy", "processedAt": "2024-01-01T00:00:00.000Z"},
                   "summary": "Buy milk eggs bread and cheese."
               }));
}

#[tokio::test]
async fn rejections_surface_as_content_errors() {
    let registry = WorkflowRegistry::with_defaults(&Config::default()).unwrap();
    let err = registry.execute("content-basic-workflow", json!({"content": "short", "type": "blog"}))
                      .await
                      .unwrap_err();
    assert_eq!(err, WorkflowError::Content(ContentError::ContentTooShort { word_count: 1 }));
    assert!(err.is_rejection());
}

#[tokio::test]
async fn concurrent_invocations_share_nothing() {
    let registry = Arc::new(WorkflowRegistry::with_defaults(&Config::default()).unwrap());
    let handles: Vec<_> = (0..8).map(|i| {
                                    let registry = registry.clone();
                                    tokio::spawn(async move {
                                        let content = format!("run {i} has exactly six words");
                                        registry.execute("content-basic-workflow", json!({ "content": content })).await
                                    })
                                })
                                .collect();
    for h in handles {
        let out = h.await.unwrap().unwrap();
        assert_eq!(out["wordCount"], json!(6));
    }
}

#[test]
fn config_settings_reach_the_steps() {
    let cfg = Config::from_lookup(|k| (k == "CONTENTFLOW_MIN_WORDS").then(|| "1".to_string())).unwrap();
    let registry = WorkflowRegistry::with_defaults(&cfg).unwrap();
    let out = tokio_test::block_on(registry.execute("content-basic-workflow", json!({"content": "short"}))).unwrap();
    assert_eq!(out["wordCount"], json!(1));
}
