//! Representación JSON (estilo JSON Schema) de un `Schema`, para exponer los
//! contratos de entrada/salida de un flujo a clientes externos.

use serde_json::{json, Map, Value};

use super::Schema;

impl Schema {
    pub fn describe(&self) -> Value {
        match self {
            Schema::Any => json!({}),
            Schema::Object(fields) => {
                let mut properties = Map::new();
                let mut required = Vec::new();
                for f in fields {
                    let mut d = f.schema.describe();
                    if let (Some(default), Value::Object(m)) = (&f.default, &mut d) {
                        m.insert("default".into(), default.clone());
                    }
                    properties.insert(f.name.clone(), d);
                    if f.required {
                        required.push(Value::String(f.name.clone()));
                    }
                }
                json!({ "type": "object", "properties": properties, "required": required })
            }
            Schema::String { min_len, .. } if *min_len > 0 => json!({ "type": "string", "minLength": min_len }),
            Schema::String { .. } => json!({ "type": "string" }),
            Schema::Number => json!({ "type": "number" }),
            Schema::Integer { min: Some(min) } => json!({ "type": "integer", "minimum": min }),
            Schema::Integer { min: None } => json!({ "type": "integer" }),
            Schema::Boolean => json!({ "type": "boolean" }),
            Schema::Enum(values) => json!({ "type": "string", "enum": values }),
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::schema::{Field, Schema};
    use serde_json::json;

    #[test]
    fn describe_object_lists_required_and_defaults() {
        let s = Schema::object([Field::required("content", Schema::non_empty_string()),
                                Field::with_default("type", Schema::one_of(["article", "blog"]), json!("article"))]);
        let d = s.describe();
        assert_eq!(d["required"], json!(["content"]));
        assert_eq!(d["properties"]["content"]["minLength"], json!(1));
        assert_eq!(d["properties"]["type"]["default"], json!("article"));
        assert_eq!(d["properties"]["type"]["enum"], json!(["article", "blog"]));
    }
}
