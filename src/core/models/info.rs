//! Model data types shared by fetch, enrichment, and the CLI (no dependencies on the API).

use serde::{Deserialize, Deserializer, Serialize};

/// One model as returned by the GitHub Models list endpoint.
///
/// Only `name` is required; the other fields fall back to empty when missing or `null`.
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
pub struct RemoteModelDescriptor {
    #[serde(default, deserialize_with = "null_as_default")]
    #[allow(dead_code)]
    pub id: String,
    /// Identifier used in API calls.
    pub name: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub friendly_name: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub description: String,
    #[serde(default, deserialize_with = "null_as_default")]
    #[allow(dead_code)]
    pub tags: Vec<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    #[allow(dead_code)]
    pub task: String,
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Capabilities curated in the known-model table.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ModelAbilities {
    pub function_call: bool,
    pub vision: bool,
    pub reasoning: bool,
}

/// Locally curated metadata for a model the endpoint does not describe fully.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct KnownModelEntry {
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub context_window_tokens: Option<u64>,
    #[serde(default)]
    pub enabled: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub abilities: Option<ModelAbilities>,
}

impl KnownModelEntry {
    /// Curated abilities, all false when the entry carries none.
    pub fn abilities(&self) -> ModelAbilities {
        self.abilities.unwrap_or_default()
    }
}

/// Normalized, capability-annotated model for display and selection.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EnrichedModelCard {
    pub id: String,
    pub display_name: String,
    pub description: String,
    pub enabled: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub context_window_tokens: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_output: Option<u64>,
    pub function_call: bool,
    pub vision: bool,
    pub reasoning: bool,
}
