//! Validación de forma (schema) para payloads JSON en los bordes de cada step.
//!
//! Un `Schema` describe presencia de campos, tipo, pertenencia a un enum,
//! longitud mínima de strings y tipo numérico. `validate` devuelve el valor
//! normalizado (con defaults aplicados) o la lista completa de violaciones,
//! cada una con su ruta (`$.metadata.difficulty`).
//!
//! Las claves desconocidas de un objeto se conservan sin validar.

mod describe;

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use thiserror::Error;

/// Ruta raíz usada en las violaciones.
pub const ROOT_PATH: &str = "$";

/// Violación concreta detectada durante la validación.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Violation {
    pub path: String,
    pub message: String,
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.path, self.message)
    }
}

#[derive(Debug, Clone, PartialEq, Error)]
#[error("{} schema violation(s): {}", .violations.len(), render(.violations))]
pub struct SchemaError {
    pub violations: Vec<Violation>,
}

fn render(violations: &[Violation]) -> String {
    violations.iter().map(|v| v.to_string()).collect::<Vec<_>>().join("; ")
}

/// Descripción declarativa de la forma de un valor.
#[derive(Debug, Clone, PartialEq)]
pub enum Schema {
    /// Acepta cualquier valor.
    Any,
    Object(Vec<Field>),
    /// `min_len` se mide en caracteres; con `trim` se ignoran los espacios de
    /// los extremos al medir (el valor no se modifica).
    String { min_len: usize, trim: bool },
    Number,
    Integer { min: Option<i64> },
    Boolean,
    Enum(Vec<String>),
}

/// Campo de un `Schema::Object`.
#[derive(Debug, Clone, PartialEq)]
pub struct Field {
    pub name: String,
    pub schema: Schema,
    pub required: bool,
    /// Valor insertado cuando la clave falta. Sólo aplica a claves ausentes,
    /// nunca a valores inválidos.
    pub default: Option<Value>,
}

impl Field {
    pub fn required(name: impl Into<String>, schema: Schema) -> Self {
        Self { name: name.into(),
               schema,
               required: true,
               default: None }
    }

    pub fn optional(name: impl Into<String>, schema: Schema) -> Self {
        Self { name: name.into(),
               schema,
               required: false,
               default: None }
    }

    pub fn with_default(name: impl Into<String>, schema: Schema, default: Value) -> Self {
        Self { name: name.into(),
               schema,
               required: false,
               default: Some(default) }
    }
}

impl Schema {
    pub fn object(fields: impl IntoIterator<Item = Field>) -> Self {
        Schema::Object(fields.into_iter().collect())
    }

    pub fn string() -> Self {
        Schema::String { min_len: 0, trim: false }
    }

    pub fn non_empty_string() -> Self {
        Schema::String { min_len: 1, trim: false }
    }

    pub fn integer() -> Self {
        Schema::Integer { min: None }
    }

    pub fn integer_min(min: i64) -> Self {
        Schema::Integer { min: Some(min) }
    }

    pub fn one_of<I, S>(values: I) -> Self
        where I: IntoIterator<Item = S>,
              S: Into<String>
    {
        Schema::Enum(values.into_iter().map(Into::into).collect())
    }

    /// Busca el esquema de un campo (sólo para `Object`).
    pub fn field(&self, name: &str) -> Option<&Field> {
        match self {
            Schema::Object(fields) => fields.iter().find(|f| f.name == name),
            _ => None,
        }
    }

    /// Valida `value` y devuelve la versión normalizada (defaults aplicados).
    pub fn validate(&self, value: &Value) -> Result<Value, SchemaError> {
        let mut violations = Vec::new();
        let normalized = self.check(value, ROOT_PATH, &mut violations);
        if violations.is_empty() {
            Ok(normalized)
        } else {
            Err(SchemaError { violations })
        }
    }

    fn check(&self, value: &Value, path: &str, out: &mut Vec<Violation>) -> Value {
        match self {
            Schema::Any => {}
            Schema::Object(fields) => {
                let Some(map) = value.as_object() else {
                    out.push(expected(path, "object", value));
                    return value.clone();
                };
                let mut normalized: Map<String, Value> = map.clone();
                for field in fields {
                    let field_path = format!("{path}.{}", field.name);
                    match map.get(&field.name) {
                        Some(v) => {
                            let nv = field.schema.check(v, &field_path, out);
                            normalized.insert(field.name.clone(), nv);
                        }
                        None => {
                            if let Some(default) = &field.default {
                                normalized.insert(field.name.clone(), default.clone());
                            } else if field.required {
                                out.push(Violation { path: field_path,
                                                     message: "required field is missing".into() });
                            }
                        }
                    }
                }
                return Value::Object(normalized);
            }
            Schema::String { min_len, trim } => match value.as_str() {
                Some(s) => {
                    let measured = if *trim { s.trim() } else { s };
                    if measured.chars().count() < *min_len {
                        out.push(Violation { path: path.to_string(),
                                             message: format!("must contain at least {min_len} character(s)") });
                    }
                }
                None => out.push(expected(path, "string", value)),
            },
            Schema::Number => {
                if !value.is_number() {
                    out.push(expected(path, "number", value));
                }
            }
            Schema::Integer { min } => match value.as_i64().or_else(|| value.as_u64().map(|_| i64::MAX)) {
                Some(n) => {
                    if let Some(min) = min {
                        if n < *min {
                            out.push(Violation { path: path.to_string(),
                                                 message: format!("must be greater than or equal to {min}") });
                        }
                    }
                }
                None => out.push(expected(path, "integer", value)),
            },
            Schema::Boolean => {
                if !value.is_boolean() {
                    out.push(expected(path, "boolean", value));
                }
            }
            Schema::Enum(values) => match value.as_str() {
                Some(s) if values.iter().any(|v| v == s) => {}
                Some(s) => out.push(Violation { path: path.to_string(),
                                                message: format!("expected one of {}, found '{s}'", quoted(values)) }),
                None => out.push(expected(path, "string", value)),
            },
        }
        value.clone()
    }
}

fn quoted(values: &[String]) -> String {
    values.iter().map(|v| format!("'{v}'")).collect::<Vec<_>>().join(" | ")
}

fn expected(path: &str, kind: &str, found: &Value) -> Violation {
    Violation { path: path.to_string(),
                message: format!("expected {kind}, found {}", type_name(found)) }
}

pub(crate) fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
