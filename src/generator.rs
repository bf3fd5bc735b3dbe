use crate::codec::schema::render_schema;
use crate::codec::state::{self, SharedState};
use crate::config::AppConfig;
use crate::error::Result;
use crate::model::list::{Edit, FieldList};

/// What the "generate" action hands back to the UI.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Generated {
    pub schema: String,
    pub share_url: String,
}

/// The list being edited together with its top-level key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditorState {
    pub fields: FieldList,
    pub top_level_key: String,
}

impl EditorState {
    pub fn apply(&self, edit: &Edit) -> Self {
        Self {
            fields: self.fields.apply(edit),
            top_level_key: self.top_level_key.clone(),
        }
    }

    pub fn with_top_level_key(&self, top_level_key: impl Into<String>) -> Self {
        Self {
            fields: self.fields.clone(),
            top_level_key: top_level_key.into(),
        }
    }
}

pub struct Generator {
    config: AppConfig,
}

impl Generator {
    pub fn new(config: AppConfig) -> Self {
        Self { config }
    }

    /// Fresh editor state: no fields, default top-level key.
    pub fn empty_state(&self) -> EditorState {
        EditorState {
            fields: FieldList::new(),
            top_level_key: self.config.default_top_level_key.clone(),
        }
    }

    /// Page-load path. A malformed link is logged and treated like a link
    /// without state.
    pub fn hydrate(&self, query: &str) -> EditorState {
        match state::decode_query(query) {
            Ok(shared) => self.from_shared(shared),
            Err(e) => {
                log::warn!("Discarding share-link state: {e}");
                self.empty_state()
            }
        }
    }

    pub fn from_shared(&self, shared: SharedState) -> EditorState {
        let top_level_key = shared
            .top_level_key
            .unwrap_or_else(|| self.config.default_top_level_key.clone());
        EditorState {
            fields: shared.fields,
            top_level_key,
        }
    }

    pub fn generate(&self, editor: &EditorState) -> Result<Generated> {
        let schema = render_schema(&editor.fields, &editor.top_level_key);
        let share_url = state::share_url(&self.config.base_url, &editor.fields, &editor.top_level_key)?;

        log::info!(
            "Generated schema for {} field(s) under '{}'",
            editor.fields.len(),
            editor.top_level_key
        );
        log::debug!("items: {}", truncate(&serde_json::to_string(&editor.fields)?, 300));
        log::debug!("shareUrl: {}", truncate(&share_url, 300));

        Ok(Generated { schema, share_url })
    }
}

fn truncate(s: &str, max_chars: usize) -> String {
    match s.char_indices().nth(max_chars) {
        Some((cut, _)) => format!("{}... (len: {})", &s[..cut], s.len()),
        None => s.to_string(),
    }
}
