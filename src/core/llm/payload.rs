//! Outbound chat payload policy: reasoning-model pruning and the stream default.

use serde_json::{Map, Value, json};

/// Model id prefixes whose requests are pruned and never streamed.
const NON_STREAMING_PREFIXES: &[&str] = &["o1", "o3"];

/// Whether requests to `model` must be pruned and sent without streaming.
pub fn is_non_streaming_reasoning_model(model: &str) -> bool {
    let model = model.to_lowercase();
    NON_STREAMING_PREFIXES.iter().any(|p| model.starts_with(p))
}

/// Apply the payload policy for the payload's `model`.
///
/// Reasoning models get fixed sampling parameters, system messages re-labelled as user
/// messages, and `stream: false` regardless of the caller. Other models keep the caller's
/// `stream` or default it to `true`.
pub fn handle_payload(mut payload: Value) -> Value {
    let model = payload
        .get("model")
        .and_then(Value::as_str)
        .unwrap_or_default()
        .to_string();
    let Some(obj) = payload.as_object_mut() else {
        return payload;
    };
    if is_non_streaming_reasoning_model(&model) {
        prune_reasoning_payload(obj);
    } else if obj.get("stream").is_none_or(Value::is_null) {
        obj.insert("stream".to_string(), json!(true));
    }
    payload
}

fn prune_reasoning_payload(obj: &mut Map<String, Value>) {
    obj.insert("frequency_penalty".to_string(), json!(0));
    obj.insert("presence_penalty".to_string(), json!(0));
    obj.insert("temperature".to_string(), json!(1));
    obj.insert("top_p".to_string(), json!(1));
    obj.insert("stream".to_string(), json!(false));
    if let Some(Value::Array(messages)) = obj.get_mut("messages") {
        for message in messages.iter_mut() {
            if message.get("role").and_then(Value::as_str) == Some("system") {
                message["role"] = json!("user");
            }
        }
    }
}

/// Effective `stream` flag of a payload after `handle_payload`.
pub fn wants_stream(payload: &Value) -> bool {
    payload
        .get("stream")
        .and_then(Value::as_bool)
        .unwrap_or(false)
}

/// Minimal chat payload: optional system message then the user prompt.
pub fn build_chat_payload(model: &str, prompt: &str, system: Option<&str>, stream: Option<bool>) -> Value {
    let mut messages = Vec::new();
    if let Some(system) = system {
        messages.push(json!({ "role": "system", "content": system }));
    }
    messages.push(json!({ "role": "user", "content": prompt }));
    let mut payload = json!({
        "model": model,
        "messages": messages,
    });
    if let Some(stream) = stream {
        payload["stream"] = json!(stream);
    }
    payload
}
