//! `validate-content`: rechaza texto vacío o demasiado corto y cuenta
//! palabras.

use content_core::{step::StepKind, typed_step};
use content_domain::{trim_content, word_count, DomainError};
use serde::{Deserialize, Serialize};

use super::{reject, VALIDATE_STEP_ID};
use crate::artifacts::{RawContentInput, ValidatedContent};

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ValidateParams {
    pub min_words: usize,
}

impl Default for ValidateParams {
    fn default() -> Self {
        Self { min_words: 5 }
    }
}

typed_step! {
    step ValidateContentStep {
        id: VALIDATE_STEP_ID,
        description: "Validates incoming text content",
        kind: StepKind::Check,
        input: RawContentInput,
        output: ValidatedContent,
        params: ValidateParams,
        run(_me, inp, p) {
            let content = trim_content(&inp.content);
            let words = word_count(content);
            if content.is_empty() {
                Err(reject(VALIDATE_STEP_ID, DomainError::InvalidContent("content is blank".into())))
            } else if words < p.min_words {
                Err(reject(VALIDATE_STEP_ID, DomainError::ContentTooShort { word_count: words, min_words: p.min_words }))
            } else {
                Ok(ValidatedContent { content: content.to_string(),
                                      content_type: inp.content_type,
                                      word_count: words,
                                      is_valid: true })
            }
        }
    }
}
