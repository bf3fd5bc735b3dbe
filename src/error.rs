use thiserror::Error;

#[derive(Error, Debug)]
pub enum SchemaGenError {
    #[error("Invalid field kind: {0:?}")]
    InvalidKind(String),

    #[error("Index {index} out of range (len {len})")]
    IndexOutOfRange { index: usize, len: usize },

    #[error("Field {index} has no options")]
    MissingOptions { index: usize },

    #[error("Field {index} is not a select kind")]
    NotSelect { index: usize },

    #[error("Malformed state: {0}")]
    MalformedState(String),

    #[error("Invalid base URL: {0}")]
    BaseUrl(#[from] url::ParseError),

    #[error("JSON Error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, SchemaGenError>;
