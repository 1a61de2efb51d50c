use std::env;
use std::path::PathBuf;

use async_openai::config::OpenAIConfig;

/// GitHub Models OpenAI-compatible endpoint.
pub const DEFAULT_BASE_URL: &str = "https://models.inference.ai.azure.com";

/// Model used by `chat` when neither `-m` nor `GITHUB_MODELS_MODEL` is given.
pub const DEFAULT_MODEL: &str = "gpt-4o-mini";

pub const TOKEN_VAR: &str = "GITHUB_TOKEN";
pub const BASE_URL_VAR: &str = "GITHUB_MODELS_BASE_URL";
pub const MODEL_VAR: &str = "GITHUB_MODELS_MODEL";
pub const KNOWN_TABLE_VAR: &str = "GITHUB_MODELS_KNOWN_TABLE";
pub const RULES_VAR: &str = "GITHUB_MODELS_RULES";
pub const DEBUG_CHAT_VAR: &str = "DEBUG_GITHUB_CHAT_COMPLETION";

#[derive(Debug, Clone)]
pub struct Config {
    pub openai_config: OpenAIConfig,
    pub base_url: String,
    pub model_id: String,
    /// Log outbound chat completion payloads.
    pub debug_chat_completion: bool,
}

#[derive(Debug)]
pub enum ConfigError {
    MissingToken,
    KnownTable { path: PathBuf, reason: String },
    Rules { path: Option<PathBuf>, reason: String },
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::MissingToken => write!(f, "{} is not set", TOKEN_VAR),
            ConfigError::KnownTable { path, reason } => {
                write!(f, "Invalid known-model table {}: {}", path.display(), reason)
            }
            ConfigError::Rules {
                path: Some(path),
                reason,
            } => write!(f, "Invalid capability rules {}: {}", path.display(), reason),
            ConfigError::Rules { path: None, reason } => {
                write!(f, "Invalid capability rules: {}", reason)
            }
        }
    }
}

impl std::error::Error for ConfigError {}

/// Load configuration from environment. Returns an error if the token is missing.
pub fn load() -> Result<Config, ConfigError> {
    from_lookup(|key| env::var(key).ok())
}

/// Build configuration from a variable lookup (the process environment in `load`).
pub fn from_lookup<F>(lookup: F) -> Result<Config, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    let base_url = non_empty(lookup(BASE_URL_VAR)).unwrap_or_else(|| DEFAULT_BASE_URL.to_string());
    let token = non_empty(lookup(TOKEN_VAR)).ok_or(ConfigError::MissingToken)?;
    let model_id = non_empty(lookup(MODEL_VAR)).unwrap_or_else(|| DEFAULT_MODEL.to_string());
    let debug_chat_completion = is_debug_flag(lookup(DEBUG_CHAT_VAR).as_deref());

    let openai_config = OpenAIConfig::new()
        .with_api_base(base_url.clone())
        .with_api_key(token);

    Ok(Config {
        openai_config,
        base_url,
        model_id,
        debug_chat_completion,
    })
}

/// Base endpoint, without requiring a token (for the `config` command).
pub fn base_url() -> String {
    non_empty(env::var(BASE_URL_VAR).ok()).unwrap_or_else(|| DEFAULT_BASE_URL.to_string())
}

/// Whether a token is present in the environment.
pub fn has_token() -> bool {
    non_empty(env::var(TOKEN_VAR).ok()).is_some()
}

/// `DEBUG_GITHUB_CHAT_COMPLETION=1` enables payload logging.
pub fn debug_chat_completion() -> bool {
    is_debug_flag(env::var(DEBUG_CHAT_VAR).ok().as_deref())
}

/// Known-model table path from `GITHUB_MODELS_KNOWN_TABLE`.
pub fn known_table_override() -> Option<PathBuf> {
    non_empty(env::var(KNOWN_TABLE_VAR).ok()).map(PathBuf::from)
}

/// Capability rules path from `GITHUB_MODELS_RULES`.
pub fn rules_override() -> Option<PathBuf> {
    non_empty(env::var(RULES_VAR).ok()).map(PathBuf::from)
}

fn is_debug_flag(value: Option<&str>) -> bool {
    value.map(str::trim) == Some("1")
}

fn non_empty(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}
