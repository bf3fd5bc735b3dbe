use std::fmt;
use std::str::FromStr;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::error::SchemaGenError;

/// The value shape an LLM must produce for a field: a free-form string, one
/// of the field's options, or an array drawn from the options.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub enum FieldKind {
    Text,
    SingleSelect,
    MultipleSelect,
}

impl FieldKind {
    pub const ALL: [FieldKind; 3] = [
        FieldKind::Text,
        FieldKind::SingleSelect,
        FieldKind::MultipleSelect,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            FieldKind::Text => "text",
            FieldKind::SingleSelect => "singleSelect",
            FieldKind::MultipleSelect => "multipleSelect",
        }
    }

    /// Select kinds carry an `options` enumeration.
    pub fn is_select(self) -> bool {
        matches!(self, FieldKind::SingleSelect | FieldKind::MultipleSelect)
    }
}

impl fmt::Display for FieldKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FieldKind {
    type Err = SchemaGenError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        FieldKind::ALL
            .into_iter()
            .find(|kind| kind.as_str() == s)
            .ok_or_else(|| SchemaGenError::InvalidKind(s.to_string()))
    }
}

/// One user-defined entry of the output format.
///
/// In share links the kind is stored under `type`; `kind` is accepted too.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct Field {
    #[schemars(description = "Property name the LLM must echo back.")]
    pub key: String,
    #[serde(rename = "type", alias = "kind")]
    pub kind: FieldKind,
    #[schemars(description = "Instruction for the LLM, emitted as a constant.")]
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[schemars(description = "Allowed values for select kinds, in enum order.")]
    pub options: Option<Vec<String>>,
}

impl Default for Field {
    fn default() -> Self {
        Self {
            key: String::new(),
            kind: FieldKind::Text,
            description: String::new(),
            options: None,
        }
    }
}

impl Field {
    pub fn text(key: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            kind: FieldKind::Text,
            description: description.into(),
            options: None,
        }
    }

    pub fn select<I, S>(
        kind: FieldKind,
        key: impl Into<String>,
        description: impl Into<String>,
        options: I,
    ) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            key: key.into(),
            kind,
            description: description.into(),
            options: Some(options.into_iter().map(Into::into).collect()),
        }
    }

    /// Drops options from a kind that cannot carry them.
    pub fn normalized(mut self) -> Self {
        if !self.kind.is_select() {
            self.options = None;
        }
        self
    }
}
