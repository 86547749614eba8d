//! Engine module for FlowEngine implementation
//!
//! Provides the core engine, builder pattern, and flow context for
//! deterministic, schema-checked workflow execution.

pub mod builder;
pub mod core;
pub mod flow_ctx;

pub use builder::{EngineBuilder, EngineBuilderInit};
pub use core::FlowEngine;
pub use flow_ctx::FlowCtx;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::FixedClock;
    use crate::errors::{Boundary, CoreEngineError};
    use crate::injection::{ClockInjector, StepParamsInjector};
    use crate::model::Artifact;
    use crate::schema::{Field, Schema};
    use crate::step::{FlowStatus, Pipe, StepKind};
    use crate::{typed_artifact, typed_step};
    use serde_json::json;
    use std::sync::Arc;
    use uuid::Uuid;

    typed_artifact!(Num { value: i64 } schema: Schema::object([Field::required("value", Schema::integer())]));

    typed_artifact!(Label { text: String } schema: Schema::object([Field::required("text", Schema::non_empty_string())]));

    #[derive(Clone, Default, serde::Serialize, serde::Deserialize)]
    pub struct NoParams {}

    #[derive(Clone, Default, serde::Serialize, serde::Deserialize)]
    #[serde(default)]
    pub struct RenderParams {
        pub prefix: String,
        pub at: Option<String>,
    }

    typed_step! {
        step Double {
            id: "double",
            description: "doubles the value",
            kind: StepKind::Transform,
            input: Num,
            output: Num,
            params: NoParams,
            run(_me, inp, _p) { Ok(Num { value: inp.value * 2 }) }
        }
    }

    typed_step! {
        step Guard {
            id: "guard",
            description: "rejects negative values",
            kind: StepKind::Check,
            input: Num,
            output: Num,
            params: NoParams,
            run(_me, inp, _p) {
                if inp.value < 0 {
                    Err(CoreEngineError::Rejected { step_id: "guard".into(),
                                                    code: "negative".into(),
                                                    message: "value is negative".into(),
                                                    details: json!({ "value": inp.value }) })
                } else {
                    Ok(inp)
                }
            }
        }
    }

    typed_step! {
        step Render {
            id: "render",
            description: "renders the value",
            kind: StepKind::Transform,
            input: Num,
            output: Label,
            params: RenderParams,
            run(_me, inp, p) {
                let prefix = if p.prefix.is_empty() { "n=" } else { p.prefix.as_str() };
                Ok(Label { text: format!("{prefix}{}{}", inp.value, p.at.map(|a| format!("@{a}")).unwrap_or_default()) })
            }
        }
    }

    typed_step! {
        step Blank {
            id: "blank",
            description: "emits an invalid label",
            kind: StepKind::Transform,
            input: Num,
            output: Label,
            params: NoParams,
            run(_me, _inp, _p) { Ok(Label { text: String::new() }) }
        }
    }

    fn num(v: serde_json::Value) -> Artifact {
        Artifact::from_json(json!({ "value": v }))
    }

    #[test]
    fn builder_runs_every_step_in_order() {
        let mut engine = FlowEngine::new().first_step(Double::new()).add_step(Render::new()).build();
        let flow_id = engine.start(num(json!(3))).expect("flow should complete");

        assert_eq!(engine.event_variants(flow_id), vec!["I", "S", "F", "S", "F", "C"]);
        let out = engine.final_output(flow_id).expect("final output");
        assert_eq!(out.payload["text"], json!("n=6"));
        assert_eq!(out.hash.len(), 64);
        assert!(engine.flow_fingerprint(flow_id).is_some());
    }

    #[test]
    fn entry_violation_emits_no_events() {
        let mut engine = FlowEngine::new().first_step(Double::new()).build();
        let err = engine.start(num(json!("three"))).unwrap_err();
        match err {
            CoreEngineError::SchemaViolation { step_id, boundary, violations } => {
                assert_eq!(step_id, "$entry");
                assert_eq!(boundary, Boundary::Input);
                assert_eq!(violations[0].path, "$.value");
            }
            other => panic!("unexpected error: {other:?}"),
        }
        let flow_id = engine.last_flow_id().expect("flow id assigned");
        assert!(engine.events_for(flow_id).is_empty());
    }

    #[test]
    fn rejection_stops_the_flow() {
        let mut engine = FlowEngine::new().first_step(Guard::new()).add_step(Double::new()).build();
        let err = engine.start(num(json!(-1))).unwrap_err();
        assert_eq!(err.rejection_code(), Some("negative"));

        let flow_id = engine.last_flow_id().unwrap();
        assert_eq!(engine.event_variants(flow_id), vec!["I", "S", "X"]);
        assert!(engine.final_output(flow_id).is_none());

        let def = engine.default_definition().unwrap();
        assert_eq!(engine.status_of(flow_id, def), FlowStatus::Failed { step_index: 0 });
    }

    #[test]
    fn failed_flow_cannot_advance() {
        let def = Pipe::new(Guard::new()).then(Double::new()).build();
        let mut engine = FlowEngine::default();
        let flow_id = Uuid::new_v4();
        assert!(engine.start_flow(flow_id, &def, num(json!(-5))).is_err());
        assert_eq!(engine.next_with(flow_id, &def), Err(CoreEngineError::FlowHasFailed));
    }

    #[test]
    fn output_violation_is_reported_for_the_step() {
        let mut engine = FlowEngine::new().first_step(Blank::new()).build();
        let err = engine.start(num(json!(1))).unwrap_err();
        assert!(matches!(err,
                         CoreEngineError::SchemaViolation { ref step_id, boundary: Boundary::Output, .. }
                         if step_id == "blank"));
    }

    #[test]
    fn flow_ctx_walks_the_state_machine() {
        let def = Pipe::new(Double::new()).then(Render::new()).build();
        let mut engine = FlowEngine::default();
        let flow_id = Uuid::new_v4();
        assert_eq!(engine.status_of(flow_id, &def), FlowStatus::NotStarted);
        engine.init_flow(flow_id, &def, num(json!(2))).unwrap();

        let mut ctx = FlowCtx::new(&mut engine, flow_id, &def);
        assert_eq!(ctx.status(), FlowStatus::NotStarted);
        ctx.step().unwrap();
        assert_eq!(ctx.status(), FlowStatus::StepDone { step_index: 0 });
        ctx.run_n(5).unwrap();
        assert_eq!(ctx.status(), FlowStatus::Completed);
        assert_eq!(ctx.step(), Err(CoreEngineError::FlowCompleted));
    }

    #[test]
    fn injectors_feed_params_and_fixed_clock_is_reproducible() {
        let run = || {
            let clock = Arc::new(FixedClock::parse("2024-01-01T00:00:00Z").unwrap());
            let mut engine = FlowEngine::new().first_step(Double::new())
                                              .add_step(Render::new())
                                              .with_injector(Box::new(ClockInjector::new(clock, "at").for_step("render")))
                                              .with_injector(Box::new(StepParamsInjector::new().with("render", json!({"prefix": "#"}))))
                                              .build();
            let id = engine.start(num(json!(21))).unwrap();
            (engine.final_output(id).unwrap().payload, engine.flow_fingerprint(id).unwrap())
        };
        let (out_a, fp_a) = run();
        let (out_b, fp_b) = run();
        assert_eq!(out_a["text"], json!("#42@2024-01-01T00:00:00.000Z"));
        assert_eq!(out_a, out_b);
        assert_eq!(fp_a, fp_b);
    }

    #[test]
    fn definition_records_flow_schemas() {
        let def = Pipe::new(Double::new()).then(Render::new()).build();
        assert_eq!(def.step_ids(), vec!["double", "render"]);
        assert!(def.input_schema.field("value").is_some());
        assert!(def.output_schema.field("text").is_some());
    }
}
