//! Artifacts tipados que fluyen entre los steps de contenido.
//!
//! Cada tipo declara el esquema de su payload JSON (camelCase); el engine lo
//! usa para validar los bordes antes y después de cada step.

use content_core::schema::{Field, Schema};
use content_core::typed_artifact;
use content_domain::{ContentType, Difficulty};
use serde::{Deserialize, Serialize};

fn type_field() -> Field {
    Field::required("type", Schema::one_of(ContentType::ALL.map(|t| t.as_str())))
}

fn metadata_schema() -> Schema {
    Schema::object([Field::required("readingTime", Schema::integer_min(1)),
                    Field::required("difficulty", Schema::one_of(["easy", "medium", "hard"])),
                    Field::required("processedAt", Schema::non_empty_string())])
}

fn enhanced_fields() -> Vec<Field> {
    vec![Field::required("content", Schema::string()),
         type_field(),
         Field::required("wordCount", Schema::integer_min(0)),
         Field::required("metadata", metadata_schema())]
}

// Entrada externa del flujo; `type` es opcional y vale `article` por defecto.
typed_artifact!(RawContentInput {
    content: String,
    #[serde(rename = "type", default)]
    content_type: ContentType,
} schema: Schema::object([Field::required("content", Schema::non_empty_string()),
                          Field::with_default("type",
                                              Schema::one_of(ContentType::ALL.map(|t| t.as_str())),
                                              serde_json::json!("article"))]));

typed_artifact!(ValidatedContent {
    content: String,
    #[serde(rename = "type")]
    content_type: ContentType,
    word_count: usize,
    is_valid: bool,
} schema: Schema::object([Field::required("content", Schema::string()),
                          type_field(),
                          Field::required("wordCount", Schema::integer_min(0)),
                          Field::required("isValid", Schema::Boolean)]),
  validate(|me| {
      if me.is_valid { Ok(()) } else { Err("validated content must be marked valid".into()) }
  }));

/// Métricas derivadas del texto.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContentMetadata {
    pub reading_time: usize,
    pub difficulty: Difficulty,
    pub processed_at: String,
}

typed_artifact!(EnhancedContent {
    content: String,
    #[serde(rename = "type")]
    content_type: ContentType,
    word_count: usize,
    metadata: ContentMetadata,
} schema: Schema::object(enhanced_fields()));

typed_artifact!(SummarizedContent {
    content: String,
    #[serde(rename = "type")]
    content_type: ContentType,
    word_count: usize,
    metadata: ContentMetadata,
    summary: String,
} schema: Schema::object(enhanced_fields().into_iter()
                                           .chain([Field::required("summary", Schema::string())])));

impl RawContentInput {
    pub fn new(content: impl Into<String>, content_type: ContentType) -> Self {
        Self { content: content.into(),
               content_type }
    }
}
