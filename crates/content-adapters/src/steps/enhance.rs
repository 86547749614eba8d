//! `enhance-content`: adjunta tiempo de lectura, dificultad y el instante de
//! procesado. El instante llega como parámetro `processedAt` (inyectado por
//! el reloj del workflow); el step nunca lee el reloj del sistema.

use std::num::NonZeroU32;

use content_core::{step::StepKind, typed_step, CoreEngineError};
use content_domain::{difficulty, reading_time, DomainError};
use serde::{Deserialize, Serialize};

use super::{reject, ENHANCE_STEP_ID};
use crate::artifacts::{ContentMetadata, EnhancedContent, ValidatedContent};

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct EnhanceParams {
    pub words_per_minute: u32,
    pub processed_at: Option<String>,
}

impl Default for EnhanceParams {
    fn default() -> Self {
        Self { words_per_minute: 200,
               processed_at: None }
    }
}

typed_step! {
    step EnhanceContentStep {
        id: ENHANCE_STEP_ID,
        description: "Adds metadata to validated content",
        kind: StepKind::Transform,
        input: ValidatedContent,
        output: EnhancedContent,
        params: EnhanceParams,
        run(_me, inp, p) {
            let wpm = NonZeroU32::new(p.words_per_minute)
                .ok_or_else(|| reject(ENHANCE_STEP_ID, DomainError::InvalidParameter("wordsPerMinute must be positive".into())));
            let processed_at = p.processed_at
                .ok_or_else(|| CoreEngineError::Internal(format!("{ENHANCE_STEP_ID}: no processedAt was injected")));
            match (wpm, processed_at) {
                (Ok(wpm), Ok(processed_at)) => {
                    let metadata = ContentMetadata { reading_time: reading_time(inp.word_count, wpm),
                                                     difficulty: difficulty(inp.word_count),
                                                     processed_at };
                    Ok(EnhancedContent { content: inp.content,
                                         content_type: inp.content_type,
                                         word_count: inp.word_count,
                                         metadata })
                }
                (Err(e), _) | (_, Err(e)) => Err(e),
            }
        }
    }
}
