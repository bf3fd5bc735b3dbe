//! Builds JSON Schemas that pin LLM output to a user-defined list of fields,
//! and share links that carry the field list in the URL.

pub mod config;
pub mod error;
pub mod generator;
pub mod model {
    pub mod field;
    pub mod list;
}
pub mod codec {
    pub mod schema;
    pub mod schema_utils;
    pub mod state;
}

pub use codec::schema::{build_schema, render_schema};
pub use codec::state::{decode_query, encode_query, share_url, SharedState};
pub use config::AppConfig;
pub use error::SchemaGenError;
pub use generator::{EditorState, Generated, Generator};
pub use model::field::{Field, FieldKind};
pub use model::list::{Edit, FieldList};
