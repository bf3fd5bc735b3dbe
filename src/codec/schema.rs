use serde_json::{json, Map, Value};

use crate::model::field::{Field, FieldKind};
use crate::model::list::FieldList;

/// Builds the JSON Schema an LLM response must satisfy: an object with one
/// required `top_level_key`, holding `items`, an array whose elements are one
/// of the field variants (in list order).
pub fn build_schema(fields: &FieldList, top_level_key: &str) -> Value {
    let variants: Vec<Value> = fields.iter().map(field_variant).collect();

    let mut properties = Map::new();
    properties.insert(
        top_level_key.to_string(),
        json!({
            "type": "object",
            "additionalProperties": false,
            "properties": {
                "items": {
                    "type": "array",
                    "additionalProperties": false,
                    "items": { "oneOf": variants }
                }
            },
            "required": ["items"]
        }),
    );

    json!({
        "type": "object",
        "additionalProperties": false,
        "properties": properties,
        "required": [top_level_key]
    })
}

/// Pretty-printed (2-space) rendering of [`build_schema`].
pub fn render_schema(fields: &FieldList, top_level_key: &str) -> String {
    format!("{:#}", build_schema(fields, top_level_key))
}

fn field_variant(field: &Field) -> Value {
    json!({
        "type": "object",
        "additionalProperties": false,
        "properties": {
            "type": { "const": field.kind.as_str() },
            "key": { "const": field.key },
            "description": { "const": field.description },
            "payload": {
                "type": "object",
                "properties": {
                    "value": value_schema(field)
                },
                "required": ["value"]
            }
        },
        "required": ["type", "key", "description", "payload"]
    })
}

fn value_schema(field: &Field) -> Value {
    let value_type = match field.kind {
        FieldKind::MultipleSelect => "array",
        FieldKind::Text | FieldKind::SingleSelect => "string",
    };

    let mut value = Map::new();
    value.insert("type".into(), json!(value_type));
    if field.kind.is_select() {
        // A select field with no options yet gets no `enum` at all.
        let mut items = Map::new();
        items.insert("type".into(), json!("string"));
        if let Some(options) = &field.options {
            items.insert("enum".into(), json!(options));
        }
        value.insert("items".into(), Value::Object(items));
    }
    Value::Object(value)
}
