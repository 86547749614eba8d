//! `generate-summary`: primera oración del texto más una línea de detalle
//! para textos largos.

use content_core::{step::StepKind, typed_step};
use content_domain::summarize;
use log::info;
use serde::{Deserialize, Serialize};

use super::SUMMARY_STEP_ID;
use crate::artifacts::{EnhancedContent, SummarizedContent};

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SummaryParams {
    /// La línea de detalle se añade cuando `wordCount` supera este valor.
    pub detail_threshold: usize,
}

impl Default for SummaryParams {
    fn default() -> Self {
        Self { detail_threshold: 50 }
    }
}

typed_step! {
    step GenerateSummaryStep {
        id: SUMMARY_STEP_ID,
        description: "Creates a summary of the content",
        kind: StepKind::Transform,
        input: EnhancedContent,
        output: SummarizedContent,
        params: SummaryParams,
        run(_me, inp, p) {
            let summary = summarize(&inp.content,
                                    inp.content_type,
                                    inp.word_count,
                                    inp.metadata.reading_time,
                                    p.detail_threshold);
            info!("generated summary: {} characters", summary.chars().count());
            Ok(SummarizedContent { content: inp.content,
                                   content_type: inp.content_type,
                                   word_count: inp.word_count,
                                   metadata: inp.metadata,
                                   summary })
        }
    }
}
