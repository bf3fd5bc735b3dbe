use std::env;

pub const BASE_URL_VAR: &str = "LLM_SCHEMA_BASE_URL";
pub const TOP_LEVEL_KEY_VAR: &str = "LLM_SCHEMA_TOP_LEVEL_KEY";

pub const DEFAULT_BASE_URL: &str = "http://localhost:3000/";
pub const DEFAULT_TOP_LEVEL_KEY: &str = "result";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    /// Origin and path that share links are built on.
    pub base_url: String,
    /// Top-level key used when neither the user nor a share link sets one.
    pub default_top_level_key: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            default_top_level_key: DEFAULT_TOP_LEVEL_KEY.to_string(),
        }
    }
}

impl AppConfig {
    /// Reads the process environment. Call `dotenv()` first to pick up `.env`.
    pub fn from_env() -> Self {
        Self::from_lookup(|name| env::var(name).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        let non_empty = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());

        Self {
            base_url: non_empty(BASE_URL_VAR).unwrap_or(defaults.base_url),
            default_top_level_key: non_empty(TOP_LEVEL_KEY_VAR)
                .unwrap_or(defaults.default_top_level_key),
        }
    }
}
