use schemars::schema_for;
use serde::Serialize;
use serde_json::{json, Map, Value};

use crate::model::field::Field;

/// JSON Schema of the `items` share-link parameter, with every `$ref`
/// inlined so it can be read on its own.
pub fn state_format_schema() -> serde_json::Result<Value> {
    let mut schema = inline_schema(schema_for!(Vec<Field>))?;
    if let Value::Object(map) = &mut schema {
        map.insert(
            "description".to_string(),
            json!("Value of the `items` query parameter of a share link."),
        );
    }
    Ok(schema)
}

/// Resolves `definitions` / `$defs` references in a generated schema and
/// strips the root-only keywords.
pub fn inline_schema<T: Serialize>(root: T) -> serde_json::Result<Value> {
    let mut root_val = serde_json::to_value(root)?;

    let definitions = root_val
        .get("definitions")
        .or_else(|| root_val.get("$defs"))
        .and_then(Value::as_object)
        .cloned()
        .unwrap_or_default();

    inline_node(&mut root_val, &definitions, 0);

    if let Value::Object(map) = &mut root_val {
        map.remove("$schema");
        map.remove("title");
        map.remove("definitions");
        map.remove("$defs");
    }

    Ok(root_val)
}

fn inline_node(node: &mut Value, definitions: &Map<String, Value>, depth: usize) {
    if depth > 20 {
        *node = json!({ "type": "object" });
        return;
    }

    let mut resolve_attempts = 0;
    while let Some(target) = node.get("$ref").and_then(Value::as_str).map(str::to_string) {
        resolve_attempts += 1;
        if resolve_attempts > 10 {
            break;
        }
        let def_name = target.rsplit('/').next().unwrap_or_default();
        match definitions.get(def_name) {
            Some(def) => *node = def.clone(),
            None => {
                log::warn!("Unresolvable schema reference {target}");
                break;
            }
        }
    }

    match node {
        Value::Object(map) => {
            // schemars wraps a documented `$ref` in a single-element allOf
            let wrapped = match map.get("allOf") {
                Some(Value::Array(all_of)) if all_of.len() == 1 => Some(all_of[0].clone()),
                _ => None,
            };
            if let Some(mut inner) = wrapped {
                map.remove("allOf");
                inline_node(&mut inner, definitions, depth + 1);
                if let Value::Object(inner_map) = inner {
                    for (k, v) in inner_map {
                        map.entry(k).or_insert(v);
                    }
                }
            }

            if let Some(Value::Object(props)) = map.get_mut("properties") {
                for val in props.values_mut() {
                    inline_node(val, definitions, depth + 1);
                }
            }

            if let Some(val) = map.get_mut("items") {
                inline_node(val, definitions, depth + 1);
            }

            for key in ["allOf", "anyOf", "oneOf"] {
                if let Some(Value::Array(arr)) = map.get_mut(key) {
                    for item in arr.iter_mut() {
                        inline_node(item, definitions, depth + 1);
                    }
                }
            }
        }
        Value::Array(arr) => {
            for item in arr.iter_mut() {
                inline_node(item, definitions, depth + 1);
            }
        }
        _ => {}
    }
}
