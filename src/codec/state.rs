//! Share-link state: the field list and top-level key carried in a URL query.
//!
//! The query holds two parameters, `items` (compact JSON array of fields) and
//! `topLevelKey`, form-encoded the way a browser's `URLSearchParams` writes
//! them.

use url::{form_urlencoded, Url};

use crate::error::{Result, SchemaGenError};
use crate::model::field::Field;
use crate::model::list::FieldList;

pub const ITEMS_PARAM: &str = "items";
pub const TOP_LEVEL_KEY_PARAM: &str = "topLevelKey";

/// Decoded share-link state. `top_level_key` is `None` when the link did not
/// carry one; the caller picks the default.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SharedState {
    pub fields: FieldList,
    pub top_level_key: Option<String>,
}

impl SharedState {
    pub fn top_level_key_or<'a>(&'a self, default: &'a str) -> &'a str {
        self.top_level_key.as_deref().unwrap_or(default)
    }
}

/// Query parameters for `fields` and `top_level_key`, in link order.
pub fn encode_params(fields: &FieldList, top_level_key: &str) -> Result<Vec<(&'static str, String)>> {
    let items = serde_json::to_string(fields)?;
    Ok(vec![
        (ITEMS_PARAM, items),
        (TOP_LEVEL_KEY_PARAM, top_level_key.to_string()),
    ])
}

/// Form-encoded query string, without the leading `?`.
pub fn encode_query(fields: &FieldList, top_level_key: &str) -> Result<String> {
    Ok(form_urlencoded::Serializer::new(String::new())
        .extend_pairs(encode_params(fields, top_level_key)?)
        .finish())
}

/// Full share link: `base_url` (origin and path) plus the encoded query.
/// Any query or fragment already on `base_url` is replaced.
pub fn share_url(base_url: &str, fields: &FieldList, top_level_key: &str) -> Result<String> {
    let mut url = Url::parse(base_url)?;
    url.set_fragment(None);
    url.query_pairs_mut()
        .clear()
        .extend_pairs(encode_params(fields, top_level_key)?);
    Ok(url.into())
}

/// Decodes already-extracted parameter values.
///
/// A missing or empty `items` is the "no state" case and yields an empty
/// list. An empty `topLevelKey` counts as missing. Options on a `text` field
/// are dropped.
pub fn decode_params(items: Option<&str>, top_level_key: Option<&str>) -> Result<SharedState> {
    let fields = match items {
        Some(raw) if !raw.is_empty() => serde_json::from_str::<FieldList>(raw)
            .map_err(|e| SchemaGenError::MalformedState(format!("items: {e}")))?
            .into_iter()
            .map(Field::normalized)
            .collect(),
        _ => FieldList::new(),
    };
    let top_level_key = top_level_key
        .filter(|key| !key.is_empty())
        .map(str::to_string);

    Ok(SharedState { fields, top_level_key })
}

/// Decodes a query string or a full URL. The first occurrence of each
/// parameter wins; unrelated parameters are ignored.
pub fn decode_query(input: &str) -> Result<SharedState> {
    let mut items: Option<String> = None;
    let mut top_level_key: Option<String> = None;

    for (name, value) in parse_query(input) {
        match name.as_str() {
            ITEMS_PARAM if items.is_none() => items = Some(value),
            TOP_LEVEL_KEY_PARAM if top_level_key.is_none() => top_level_key = Some(value),
            _ => {}
        }
    }

    decode_params(items.as_deref(), top_level_key.as_deref())
}

/// Splits `input` into decoded `(name, value)` pairs. A whole URL contributes
/// its query; anything else is a query with an optional leading `?`.
/// Invalid escapes decode lossily, as in a browser.
pub fn parse_query(input: &str) -> Vec<(String, String)> {
    let query = match Url::parse(input) {
        Ok(url) => url.query().unwrap_or_default().to_string(),
        Err(_) => {
            let without_fragment = input.split('#').next().unwrap_or_default();
            without_fragment
                .strip_prefix('?')
                .unwrap_or(without_fragment)
                .to_string()
        }
    };

    form_urlencoded::parse(query.as_bytes())
        .into_owned()
        .collect()
}
