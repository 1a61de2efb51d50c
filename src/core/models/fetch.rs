//! Fetch the GitHub Models catalog and enrich it.

use async_openai::Client;
use serde_json::Value;

use crate::core::config::Config;
use crate::core::llm::{ProviderError, map_api_error};
use crate::core::util;

use super::enrich;
use super::info::{EnrichedModelCard, KnownModelEntry, RemoteModelDescriptor};
use super::rules::CapabilityRules;

/// Filter cards by query (case-insensitive match on id or display name).
pub fn filter_models<'a>(models: &'a [EnrichedModelCard], query: &str) -> Vec<&'a EnrichedModelCard> {
    util::filter_by_query(models, query, |m| (m.id.as_str(), m.display_name.as_str()))
}

/// Parse a list response. Accepts a bare array or an OpenAI-style `{ "data": [...] }` page.
/// Entries that do not deserialize (e.g. no `name`) are skipped with a warning.
pub fn parse_model_list(body: Value) -> Result<Vec<RemoteModelDescriptor>, ProviderError> {
    let entries = match body {
        Value::Array(entries) => entries,
        Value::Object(mut page) => match page.remove("data") {
            Some(Value::Array(entries)) => entries,
            _ => return Err(ProviderError::other("Malformed model list: missing `data` array")),
        },
        other => {
            return Err(ProviderError::other(format!(
                "Malformed model list: expected array, got {}",
                type_name(&other)
            )));
        }
    };

    let total = entries.len();
    let models: Vec<RemoteModelDescriptor> = entries
        .into_iter()
        .enumerate()
        .filter_map(|(i, entry)| match serde_json::from_value(entry) {
            Ok(model) => Some(model),
            Err(e) => {
                log::warn!("Skipping model list entry {}: {}", i, e);
                None
            }
        })
        .collect();
    log::debug!("Parsed {} of {} model list entries", models.len(), total);
    Ok(models)
}

fn type_name(v: &Value) -> &'static str {
    match v {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// One list call against `{base}/models` with the configured token.
pub async fn fetch_remote_models(config: &Config) -> Result<Vec<RemoteModelDescriptor>, ProviderError> {
    let client = Client::with_config(config.openai_config.clone());
    log::info!("Fetching model list from {}", config.base_url);

    let body: Value = client
        .models()
        .list_byot()
        .await
        .map_err(map_api_error)?;

    parse_model_list(body)
}

/// Fetch then enrich. Fetch failures short-circuit; no partial results.
pub async fn fetch_enriched_models(
    config: &Config,
    known: &[KnownModelEntry],
    rules: &CapabilityRules,
) -> Result<Vec<EnrichedModelCard>, ProviderError> {
    let remote = fetch_remote_models(config).await?;
    Ok(enrich::enrich(&remote, known, rules))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn card(id: &str, name: &str) -> EnrichedModelCard {
        EnrichedModelCard {
            id: id.to_string(),
            display_name: name.to_string(),
            description: String::new(),
            enabled: false,
            context_window_tokens: None,
            max_output: None,
            function_call: false,
            vision: false,
            reasoning: false,
        }
    }

    #[test]
    fn parse_bare_array() {
        let body = json!([
            {
                "id": "azureml://registries/azure-openai/models/gpt-4o/versions/2",
                "name": "gpt-4o",
                "friendly_name": "OpenAI GPT-4o",
                "description": "Multimodal model with vision and function calling",
                "tags": ["multipurpose", "multilingual", "multimodal"],
                "task": "chat-completion"
            },
            { "name": "o1-mini", "friendly_name": "OpenAI o1-mini" }
        ]);
        let models = parse_model_list(body).unwrap();
        assert_eq!(models.len(), 2);
        assert_eq!(models[0].name, "gpt-4o");
        assert_eq!(models[0].tags.len(), 3);
        assert_eq!(models[1].description, "");
    }

    #[test]
    fn parse_data_page() {
        let body = json!({ "object": "list", "data": [{ "name": "Phi-4" }] });
        let models = parse_model_list(body).unwrap();
        assert_eq!(models.len(), 1);
        assert_eq!(models[0].name, "Phi-4");
    }

    #[test]
    fn parse_skips_entries_without_name() {
        let body = json!([
            { "name": "gpt-4o" },
            { "friendly_name": "nameless" },
            "garbage",
            { "name": "o3-mini" }
        ]);
        let names: Vec<String> = parse_model_list(body)
            .unwrap()
            .into_iter()
            .map(|m| m.name)
            .collect();
        assert_eq!(names, vec!["gpt-4o", "o3-mini"]);
    }

    #[test]
    fn parse_rejects_non_list() {
        assert!(parse_model_list(json!("nope")).is_err());
        assert!(parse_model_list(json!({ "models": [] })).is_err());
    }

    #[test]
    fn filter_by_id_or_display_name() {
        let cards = vec![card("gpt-4o", "OpenAI GPT-4o"), card("Phi-4", "Microsoft Phi 4")];
        assert_eq!(filter_models(&cards, "").len(), 2);
        let out = filter_models(&cards, "microsoft");
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].id, "Phi-4");
        assert_eq!(filter_models(&cards, "GPT")[0].id, "gpt-4o");
    }

    #[test]
    fn parse_keeps_named_entries_with_null_fields() {
        let body = json!([
            { "name": "gpt-4o", "friendly_name": "GPT-4o", "description": null },
            { "name": "Phi-4", "friendly_name": "Phi 4", "tags": null, "task": null }
        ]);
        let models = parse_model_list(body).unwrap();
        let names: Vec<&str> = models.iter().map(|m| m.name.as_str()).collect();
        assert_eq!(names, vec!["gpt-4o", "Phi-4"]);
        assert_eq!(models[0].description, "");
        assert!(models[1].tags.is_empty());
    }

    fn config_for(server: &wiremock::MockServer) -> Config {
        let uri = server.uri();
        crate::core::config::from_lookup(move |key| match key {
            "GITHUB_TOKEN" => Some("ghp_test".to_string()),
            "GITHUB_MODELS_BASE_URL" => Some(uri.clone()),
            _ => None,
        })
        .unwrap()
    }

    #[tokio::test]
    async fn fetch_enriched_models_from_endpoint() {
        use wiremock::matchers::{header, method, path};
        use wiremock::{Mock, MockServer, ResponseTemplate};

        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/models"))
            .and(header("authorization", "Bearer ghp_test"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([
                {
                    "name": "gpt-4o",
                    "friendly_name": "OpenAI GPT-4o",
                    "description": "Supports vision",
                    "tags": [],
                    "task": "chat-completion"
                },
                { "name": "o3-mini", "friendly_name": "OpenAI o3-mini", "description": null }
            ])))
            .expect(1)
            .mount(&server)
            .await;

        let known = [KnownModelEntry {
            id: "GPT-4o".to_string(),
            context_window_tokens: Some(134_144),
            enabled: true,
            abilities: None,
        }];
        let cards = fetch_enriched_models(&config_for(&server), &known, &CapabilityRules::default())
            .await
            .unwrap();

        assert_eq!(cards.len(), 2);
        assert_eq!(cards[0].id, "gpt-4o");
        assert!(cards[0].enabled);
        assert!(cards[0].vision);
        assert_eq!(cards[0].context_window_tokens, Some(134_144));
        assert_eq!(cards[1].display_name, "OpenAI o3-mini");
        assert!(cards[1].reasoning);
        assert!(!cards[1].enabled);
    }

    #[tokio::test]
    async fn fetch_enriched_models_unauthorized_short_circuits() {
        use wiremock::matchers::{method, path};
        use wiremock::{Mock, MockServer, ResponseTemplate};

        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/models"))
            .respond_with(ResponseTemplate::new(401).set_body_json(json!({
                "error": { "code": "unauthorized", "message": "Bad credentials", "details": "Bad credentials" }
            })))
            .mount(&server)
            .await;

        let err = fetch_enriched_models(&config_for(&server), &[], &CapabilityRules::default())
            .await
            .unwrap_err();
        assert!(err.is_auth(), "expected InvalidToken, got {:?}", err);
        assert!(err.to_string().contains("Bad credentials"));
    }
}
