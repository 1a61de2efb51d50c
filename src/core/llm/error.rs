//! Provider error taxonomy and mapping from SDK errors.

use std::sync::LazyLock;

use regex::Regex;

/// Shown after an authentication failure.
pub const TOKEN_GUIDANCE: &str = "\
Your GitHub token was rejected (401 Unauthorized).
  1. Create a personal access token at https://github.com/settings/tokens
  2. Make sure GitHub Models access is enabled for your account
  3. Export it: export GITHUB_TOKEN=<token> (or put it in .env)";

/// Errors from calls to the GitHub Models endpoint.
#[derive(Debug, thiserror::Error)]
pub enum ProviderError {
    /// The endpoint rejected the token. Never retried.
    #[error("Invalid GitHub token: {0}")]
    InvalidToken(String),
    #[error("API error: {0}")]
    ApiMessage(String),
    #[error("{0}")]
    Other(Box<dyn std::error::Error + Send + Sync + 'static>),
}

impl ProviderError {
    pub fn is_auth(&self) -> bool {
        matches!(self, ProviderError::InvalidToken(_))
    }

    pub(crate) fn other(msg: impl Into<String>) -> Self {
        ProviderError::Other(msg.into().into())
    }
}

/// Map async-openai or API errors into ProviderError.
pub fn map_api_error<E>(e: E) -> ProviderError
where
    E: std::fmt::Display + Into<Box<dyn std::error::Error + Send + Sync + 'static>>,
{
    let s = e.to_string();
    let message = json_message(&s);
    if is_unauthorized(&s) {
        return ProviderError::InvalidToken(message.unwrap_or(s));
    }
    if let Some(msg) = message {
        return ProviderError::ApiMessage(msg);
    }
    ProviderError::Other(e.into())
}

/// A 401 only counts when it is the HTTP status, not any number in the text.
static STATUS_401: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\b(?:status(?:\s+code)?|http)[\s:=]*401\b").expect("valid regex")
});

fn is_unauthorized(s: &str) -> bool {
    let lower = s.to_lowercase();
    lower.contains("unauthorized") || lower.contains("bad credentials") || STATUS_401.is_match(s)
}

fn json_message(s: &str) -> Option<String> {
    if let Some((_, rest)) = s.split_once("\"message\":\"")
        && let Some((msg, _)) = rest.split_once('"')
    {
        return Some(msg.to_string());
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn map_api_error_401() {
        let e = std::io::Error::other("HTTP status 401 Unauthorized");
        let err = map_api_error(e);
        assert!(err.is_auth(), "expected InvalidToken, got {:?}", err);
    }

    #[test]
    fn map_api_error_unauthorized_code_with_message() {
        let e = std::io::Error::other(
            r#"{"error":{"code":"unauthorized","message":"Bad credentials"}}"#,
        );
        match map_api_error(e) {
            ProviderError::InvalidToken(msg) => assert_eq!(msg, "Bad credentials"),
            other => panic!("expected InvalidToken, got {:?}", other),
        }
    }

    #[test]
    fn map_api_error_http_status_401() {
        let e = std::io::Error::other("http status: 401");
        assert!(map_api_error(e).is_auth());
    }

    #[test]
    fn map_api_error_rendered_api_error_keeps_server_message() {
        let e = std::io::Error::other("Bad credentials (code: unauthorized)");
        match map_api_error(e) {
            ProviderError::InvalidToken(msg) => {
                assert_eq!(msg, "Bad credentials (code: unauthorized)")
            }
            other => panic!("expected InvalidToken, got {:?}", other),
        }
    }

    #[test]
    fn map_api_error_401_in_message_text_is_not_auth() {
        let e = std::io::Error::other(
            r#"{"error":{"code":"RateLimitReached","message":"Please wait 401 seconds before retrying."}}"#,
        );
        match map_api_error(e) {
            ProviderError::ApiMessage(msg) => {
                assert_eq!(msg, "Please wait 401 seconds before retrying.")
            }
            other => panic!("expected ApiMessage, got {:?}", other),
        }
    }

    #[test]
    fn map_api_error_401_in_port_is_not_auth() {
        let e = std::io::Error::other("error sending request for url (http://127.0.0.1:4010/models)");
        let err = map_api_error(e);
        assert!(!err.is_auth());
        assert!(matches!(err, ProviderError::Other(_)));
    }

    #[test]
    fn map_api_error_json_message() {
        let e = std::io::Error::other(
            r#"{"error":{"code":"RateLimitReached","message":"Rate limit of 15 per 60s exceeded"}}"#,
        );
        let err = map_api_error(e);
        match &err {
            ProviderError::ApiMessage(msg) => assert_eq!(msg, "Rate limit of 15 per 60s exceeded"),
            _ => panic!("expected ApiMessage, got {:?}", err),
        }
        assert!(!err.is_auth());
    }

    #[test]
    fn map_api_error_generic() {
        let e = std::io::Error::new(std::io::ErrorKind::ConnectionRefused, "connection refused");
        let err = map_api_error(e);
        assert!(matches!(err, ProviderError::Other(_)));
        assert_eq!(err.to_string(), "connection refused");
    }

    #[test]
    fn guidance_names_token_variable() {
        assert!(TOKEN_GUIDANCE.contains("GITHUB_TOKEN"));
    }
}
