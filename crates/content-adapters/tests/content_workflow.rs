//! Escenarios end-to-end de los pipelines de contenido.

use std::sync::Arc;

use content_adapters::{ContentError, ContentOutput, ContentWorkflow, PipelineSettings, PipelineVariant, RawContentInput};
use content_adapters::steps::EnhanceContentStep;
use content_core::{Artifact, Boundary, CoreEngineError, FixedClock, FlowEngine, FlowStatus};
use content_domain::{ContentType, Difficulty};
use serde_json::{json, Value};

const FIXED_AT: &str = "2024-05-01T12:00:00.000Z";

fn workflow(variant: PipelineVariant) -> ContentWorkflow {
    let clock = FixedClock::parse(FIXED_AT).expect("valid timestamp");
    ContentWorkflow::new(variant).with_clock(Arc::new(clock))
}

fn words(n: usize) -> String {
    (0..n).map(|i| format!("word{i}")).collect::<Vec<_>>().join(" ")
}

#[test]
fn scenario_a_short_article_is_summarized_without_detail() {
    let out = workflow(PipelineVariant::WithSummary).process(json!({"content": "Buy milk eggs bread and cheese", "type": "article"}))
                                                    .unwrap();
    let ContentOutput::Summarized(s) = out else { panic!("expected summarized output") };
    assert_eq!(s.word_count, 6);
    assert_eq!(s.metadata.reading_time, 1);
    assert_eq!(s.metadata.difficulty, Difficulty::Easy);
    assert_eq!(s.metadata.processed_at, FIXED_AT);
    assert_eq!(s.summary, "Buy milk eggs bread and cheese.");
}

#[test]
fn scenario_b_too_short_stops_at_validation() {
    let wf = workflow(PipelineVariant::WithSummary);
    let err = wf.process(json!({"content": "short", "type": "blog"})).unwrap_err();
    assert_eq!(err, ContentError::ContentTooShort { word_count: 1 });
    assert!(err.is_rejection());

    let mut engine = wf.engine();
    assert!(engine.start(Artifact::from_json(json!({"content": "short", "type": "blog"}))).is_err());
    let flow_id = engine.last_flow_id().unwrap();
    assert_eq!(engine.event_variants(flow_id), vec!["I", "S", "X"]);
    let def = engine.default_definition().unwrap();
    assert_eq!(engine.status_of(flow_id, def), FlowStatus::Failed { step_index: 0 });
}

#[test]
fn scenario_c_difficulty_and_reading_time() {
    let wf = workflow(PipelineVariant::Basic);
    for (n, difficulty, reading_time) in [(120, Difficulty::Medium, 1), (350, Difficulty::Hard, 2)] {
        let ContentOutput::Enhanced(e) = wf.process(json!({ "content": words(n) })).unwrap() else {
            panic!("expected enhanced output")
        };
        assert_eq!(e.word_count, n);
        assert_eq!(e.content_type, ContentType::Article);
        assert_eq!((e.metadata.difficulty, e.metadata.reading_time), (difficulty, reading_time));
    }
}

#[test]
fn long_content_gets_detail_sentence() {
    let content = format!("Opening line here! {}", words(60));
    let out = workflow(PipelineVariant::WithSummary).process_raw(RawContentInput::new(content, ContentType::Blog))
                                                    .unwrap();
    assert_eq!(out.summary(),
               Some("Opening line here. This blog contains 63 words and takes approximately 1 minute(s) to read."));
}

#[test]
fn successful_run_emits_full_event_sequence() {
    let wf = workflow(PipelineVariant::WithSummary);
    let mut engine = wf.engine();
    let flow_id = engine.start(Artifact::from_json(json!({"content": words(10)}))).unwrap();
    assert_eq!(engine.event_variants(flow_id), vec!["I", "S", "F", "S", "F", "S", "F", "C"]);
    assert_eq!(engine.status_of(flow_id, engine.default_definition().unwrap()), FlowStatus::Completed);
}

#[test]
fn entry_schema_failures_emit_no_events() {
    let wf = workflow(PipelineVariant::Basic);
    for input in [json!({"content": ""}), json!({"content": "a b c d e", "type": "poem"}), json!({"type": "blog"})] {
        let err = wf.process(input.clone()).unwrap_err();
        let ContentError::Schema { step_id, boundary, violations } = err else { panic!("expected schema error") };
        assert_eq!((step_id.as_str(), boundary), ("$entry", Boundary::Input));
        assert_eq!(violations.len(), 1);

        let mut engine = wf.engine();
        assert!(engine.start(Artifact::from_json(input)).is_err());
        assert!(engine.events_for(engine.last_flow_id().unwrap()).is_empty());
    }
}

#[test]
fn blank_content_is_invalid() {
    let err = workflow(PipelineVariant::Basic).process(json!({"content": "   \n\t "})).unwrap_err();
    assert!(matches!(err, ContentError::InvalidContent(_)));
}

#[test]
fn fixed_clock_makes_runs_identical() {
    let wf = workflow(PipelineVariant::WithSummary);
    let input = json!({"content": words(75), "type": "social"});
    let run = || {
        let mut engine = wf.engine();
        let id = engine.start(Artifact::from_json(input.clone())).unwrap();
        (engine.final_output(id).unwrap().payload, engine.flow_fingerprint(id).unwrap())
    };
    assert_eq!(run(), run());
    assert_eq!(wf.process(input.clone()).unwrap(), wf.process(input).unwrap());
}

#[test]
fn system_clock_stamps_rfc3339() {
    let out = ContentWorkflow::new(PipelineVariant::Basic).process(json!({"content": words(5)})).unwrap();
    let ContentOutput::Enhanced(e) = out else { panic!("expected enhanced output") };
    assert!(chrono::DateTime::parse_from_rfc3339(&e.metadata.processed_at).is_ok());
    assert!(e.metadata.processed_at.ends_with('Z'));
}

#[test]
fn settings_override_step_params() {
    let settings = PipelineSettings { min_words: 2,
                                      words_per_minute: 10,
                                      detail_threshold: 2 };
    let wf = workflow(PipelineVariant::WithSummary).with_settings(settings);
    let out = wf.process(json!({"content": "Tiny note here", "type": "social"})).unwrap();
    let ContentOutput::Summarized(s) = out else { panic!("expected summarized output") };
    assert_eq!(s.metadata.reading_time, 1);
    assert_eq!(s.summary, "Tiny note here. This social contains 3 words and takes approximately 1 minute(s) to read.");

    let zero = PipelineSettings { words_per_minute: 0, ..PipelineSettings::default() };
    let err = workflow(PipelineVariant::Basic).with_settings(zero).process(json!({"content": words(6)})).unwrap_err();
    assert!(matches!(err, ContentError::InvalidParameter(_)));
}

#[test]
fn output_serializes_to_declared_shape() {
    let out = workflow(PipelineVariant::Basic).process(json!({"content": words(5), "type": "blog"})).unwrap();
    let v: Value = out.to_value().unwrap();
    assert_eq!(v["metadata"], json!({"readingTime": 1, "difficulty": "easy", "processedAt": FIXED_AT}));
    assert!(v.get("schema_version").is_none());
    assert!(workflow(PipelineVariant::Basic).output_schema().validate(&v).is_ok());
}

#[test]
fn enhance_requires_an_injected_timestamp() {
    let mut engine = FlowEngine::new().first_step(EnhanceContentStep::new()).build();
    let input = json!({"content": "a b c d e", "type": "blog", "wordCount": 5, "isValid": true});
    let err = engine.start(Artifact::from_json(input)).unwrap_err();
    assert!(matches!(err, CoreEngineError::Internal(ref m) if m.contains("processedAt")));
}

#[test]
fn four_words_are_one_short() {
    let err = workflow(PipelineVariant::Basic).process(json!({"content": "one two three four"})).unwrap_err();
    assert_eq!(err, ContentError::ContentTooShort { word_count: 4 });

    let ok = workflow(PipelineVariant::Basic).process(json!({"content": "one two three four five"})).unwrap();
    let ContentOutput::Enhanced(e) = ok else { panic!("expected enhanced output") };
    assert_eq!(e.word_count, 5);
}

#[test]
fn caller_fields_named_like_the_version_tag_are_plain_data() {
    let wf = workflow(PipelineVariant::WithSummary);
    for extra in [json!(2), json!("x")] {
        let out = wf.process(json!({"content": "a b c d e", "schema_version": extra})).unwrap();
        let v = out.to_value().unwrap();
        assert_eq!(v["wordCount"], json!(5));
        assert!(v.get("schema_version").is_none());
    }
}

#[test]
fn byte_order_mark_counts_as_a_separator() {
    let out = workflow(PipelineVariant::Basic).process(json!({"content": "\u{FEFF}a\u{FEFF}b c d e"})).unwrap();
    let ContentOutput::Enhanced(e) = out else { panic!("expected enhanced output") };
    assert_eq!((e.word_count, e.content.as_str()), (5, "a\u{FEFF}b c d e"));
}
