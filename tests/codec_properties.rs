use llm_output_format_gen::codec::state::{decode_params, encode_params};
use llm_output_format_gen::{
    build_schema, decode_query, encode_query, AppConfig, Edit, Field, FieldKind, FieldList,
    Generator,
};
use pretty_assertions::assert_eq;
use proptest::prelude::*;
use serde_json::{json, Value};

fn one_of(schema: &Value, top_level_key: &str) -> Vec<Value> {
    schema["properties"][top_level_key]["properties"]["items"]["items"]["oneOf"]
        .as_array()
        .cloned()
        .unwrap_or_default()
}

#[test]
fn mood_example_produces_expected_value_schema() {
    let fields = FieldList::from(vec![Field::select(
        FieldKind::SingleSelect,
        "mood",
        "user mood",
        ["happy", "sad"],
    )]);
    let schema = build_schema(&fields, "result");

    assert_eq!(
        schema["properties"]["result"]["properties"]["items"]["items"]["oneOf"][0]["properties"]
            ["payload"]["properties"]["value"],
        json!({ "type": "string", "items": { "type": "string", "enum": ["happy", "sad"] } })
    );
    assert_eq!(schema["required"], json!(["result"]));
    assert_eq!(
        schema["properties"]["result"]["required"],
        json!(["items"])
    );
}

#[test]
fn full_variant_for_text_field() {
    let fields = FieldList::from(vec![Field::text("summary", "one sentence")]);
    let schema = build_schema(&fields, "result");

    assert_eq!(
        one_of(&schema, "result"),
        vec![json!({
            "type": "object",
            "additionalProperties": false,
            "properties": {
                "type": { "const": "text" },
                "key": { "const": "summary" },
                "description": { "const": "one sentence" },
                "payload": {
                    "type": "object",
                    "properties": { "value": { "type": "string" } },
                    "required": ["value"]
                }
            },
            "required": ["type", "key", "description", "payload"]
        })]
    );
}

#[test]
fn malformed_state_hydrates_empty() {
    let generator = Generator::new(AppConfig::default());
    let editor = generator.hydrate("?items=not%20json");
    assert!(editor.fields.is_empty());
    assert_eq!(editor.top_level_key, "result");
}

#[test]
fn closed_kind_rejection_through_apply() {
    let list = FieldList::new().add_field();
    let list = list.apply(&Edit::SetKind { index: 0, value: "bogus".into() });
    assert_eq!(list.get(0).map(|f| f.kind), Some(FieldKind::Text));
}

#[test]
fn reorder_moves_only_affected_variants() {
    let fields = FieldList::from(vec![
        Field::text("a", ""),
        Field::select(FieldKind::MultipleSelect, "b", "", ["x"]),
        Field::text("c", ""),
    ]);
    let before = one_of(&build_schema(&fields, "r"), "r");

    let swapped = fields.move_field(2, 1).unwrap();
    let after = one_of(&build_schema(&swapped, "r"), "r");

    assert_eq!(after[0], before[0]);
    assert_eq!(after[1], before[2]);
    assert_eq!(after[2], before[1]);
}

#[test]
fn duplicate_then_edit_keeps_original_options() {
    let fields = FieldList::from(vec![Field::select(
        FieldKind::SingleSelect,
        "mood",
        "",
        ["happy", "sad"],
    )]);
    let fields = fields
        .duplicate_field(0)
        .and_then(|l| l.set_option(1, 1, "angry"))
        .and_then(|l| l.add_option(1))
        .unwrap();

    assert_eq!(
        fields.get(0).and_then(|f| f.options.clone()),
        Some(vec!["happy".to_string(), "sad".to_string()])
    );
    assert_eq!(
        fields.get(1).and_then(|f| f.options.clone()),
        Some(vec!["happy".to_string(), "angry".to_string(), String::new()])
    );
}

fn arb_field() -> impl Strategy<Value = Field> {
    let text = ("\\PC{0,12}", "\\PC{0,24}").prop_map(|(key, description)| Field {
        key,
        kind: FieldKind::Text,
        description,
        options: None,
    });
    let select = (
        prop_oneof![Just(FieldKind::SingleSelect), Just(FieldKind::MultipleSelect)],
        "\\PC{0,12}",
        "\\PC{0,24}",
        proptest::option::of(prop::collection::vec("\\PC{0,8}", 0..5)),
    )
        .prop_map(|(kind, key, description, options)| Field {
            key,
            kind,
            description,
            options,
        });
    prop_oneof![text, select]
}

fn arb_fields() -> impl Strategy<Value = FieldList> {
    prop::collection::vec(arb_field(), 0..8).prop_map(FieldList::from)
}

proptest! {
    #[test]
    fn params_round_trip(fields in arb_fields(), key in "\\PC{1,16}") {
        let params = encode_params(&fields, &key).unwrap();
        let state = decode_params(Some(params[0].1.as_str()), Some(params[1].1.as_str())).unwrap();
        prop_assert_eq!(state.fields, fields);
        prop_assert_eq!(state.top_level_key, Some(key));
    }

    #[test]
    fn query_round_trip(fields in arb_fields(), key in "[ -~]{1,16}") {
        let query = encode_query(&fields, &key).unwrap();
        let state = decode_query(&query).unwrap();
        prop_assert_eq!(state.fields, fields);
        prop_assert_eq!(state.top_level_key, Some(key));
    }

    #[test]
    fn one_of_follows_list_order(fields in arb_fields()) {
        let variants = one_of(&build_schema(&fields, "result"), "result");
        prop_assert_eq!(variants.len(), fields.len());
        for (variant, field) in variants.iter().zip(fields.iter()) {
            prop_assert_eq!(&variant["properties"]["key"]["const"], &json!(field.key));
            prop_assert_eq!(&variant["properties"]["type"]["const"], &json!(field.kind.as_str()));
        }
    }

    #[test]
    fn value_shape_follows_kind(field in arb_field()) {
        let schema = build_schema(&FieldList::from(vec![field.clone()]), "result");
        let variants = one_of(&schema, "result");
        let value = &variants[0]["properties"]["payload"]["properties"]["value"];

        match field.kind {
            FieldKind::Text => {
                prop_assert_eq!(&value["type"], &json!("string"));
                prop_assert!(value.get("items").is_none());
            }
            FieldKind::SingleSelect | FieldKind::MultipleSelect => {
                let expected = if field.kind == FieldKind::MultipleSelect { "array" } else { "string" };
                prop_assert_eq!(&value["type"], &json!(expected));
                match &field.options {
                    Some(options) => {
                        prop_assert_eq!(&value["items"]["enum"], &json!(options));
                    }
                    None => {
                        prop_assert!(value["items"].get("enum").is_none());
                    }
                }
            }
        }
    }
}
