//! Single chat completion against the GitHub Models endpoint.

mod error;
pub mod payload;

use async_openai::Client;
use futures::StreamExt;
use serde_json::Value;

use crate::core::config::Config;

pub use error::{ProviderError, TOKEN_GUIDANCE, map_api_error};

/// Max content size (2MB) to prevent unbounded memory growth from malformed streams.
const MAX_CONTENT_BYTES: usize = 2 * 1024 * 1024;

/// Callback for each streamed content chunk (text only).
pub type OnContentChunk = Box<dyn Fn(&str) + Send>;

/// Parameters for a single chat turn.
pub struct ChatRequest<'a> {
    pub config: &'a Config,
    pub model: &'a str,
    pub prompt: &'a str,
    pub system: Option<&'a str>,
    /// Caller's streaming preference; `None` lets the payload policy decide.
    pub stream: Option<bool>,
    pub on_content_chunk: Option<OnContentChunk>,
}

/// Answer of a chat turn.
#[derive(Debug)]
pub struct ChatResult {
    pub content: String,
    /// Whether the answer was delivered through `on_content_chunk`.
    pub streamed: bool,
}

/// Send one prompt. The payload policy decides whether the request streams.
pub async fn chat(request: ChatRequest<'_>) -> Result<ChatResult, ProviderError> {
    let client = Client::with_config(request.config.openai_config.clone());

    let payload = payload::handle_payload(payload::build_chat_payload(
        request.model,
        request.prompt,
        request.system,
        request.stream,
    ));
    if request.config.debug_chat_completion {
        log::info!(
            "[github] chat completion payload: {}",
            serde_json::to_string_pretty(&payload).unwrap_or_default()
        );
    }

    if !payload::wants_stream(&payload) {
        let response: Value = client
            .chat()
            .create_byot(payload)
            .await
            .map_err(map_api_error)?;
        if request.config.debug_chat_completion {
            log::info!("[github] chat completion response: {}", response);
        }
        return Ok(ChatResult {
            content: response_content(&response),
            streamed: false,
        });
    }

    let mut stream = client
        .chat()
        .create_stream_byot::<_, Value>(payload)
        .await
        .map_err(map_api_error)?;

    let mut content = String::new();
    while let Some(chunk_result) = stream.next().await {
        let chunk = chunk_result.map_err(map_api_error)?;

        if let Some(err) = chunk.get("error") {
            let msg = err
                .get("message")
                .and_then(|v| v.as_str())
                .unwrap_or("Unknown error");
            return Err(ProviderError::ApiMessage(msg.to_string()));
        }

        let Some(delta) = delta_content(&chunk) else {
            continue;
        };
        if content.len() + delta.len() > MAX_CONTENT_BYTES {
            log::warn!("Response exceeded {} bytes; truncating", MAX_CONTENT_BYTES);
            break;
        }
        content.push_str(delta);
        if let Some(ref cb) = request.on_content_chunk {
            cb(delta);
        }
    }

    Ok(ChatResult {
        streamed: request.on_content_chunk.is_some(),
        content,
    })
}

/// Text of the first choice of a non-streamed response.
fn response_content(response: &Value) -> String {
    response["choices"][0]["message"]["content"]
        .as_str()
        .unwrap_or_default()
        .to_string()
}

/// Text delta of a streamed chunk, if any.
fn delta_content(chunk: &Value) -> Option<&str> {
    chunk
        .get("choices")?
        .as_array()?
        .first()?
        .get("delta")?
        .get("content")?
        .as_str()
        .filter(|s| !s.is_empty())
}
