//! Join remote descriptors against the known-model table and derive capability flags.

use super::info::{EnrichedModelCard, KnownModelEntry, RemoteModelDescriptor};
use super::rules::CapabilityRules;

/// First entry whose id equals `name`, compared lower-cased.
pub fn find_known<'a>(known: &'a [KnownModelEntry], name: &str) -> Option<&'a KnownModelEntry> {
    let name = name.to_lowercase();
    known.iter().find(|k| k.id.to_lowercase() == name)
}

/// Enrich one descriptor. Detected and curated capabilities are OR-ed.
pub fn enrich_one(
    remote: &RemoteModelDescriptor,
    known: &[KnownModelEntry],
    rules: &CapabilityRules,
) -> EnrichedModelCard {
    let known_model = find_known(known, &remote.name);
    let detected = rules.detect(&remote.name, &remote.description);
    let curated = known_model.map(KnownModelEntry::abilities).unwrap_or_default();

    EnrichedModelCard {
        id: remote.name.clone(),
        display_name: remote.friendly_name.clone(),
        description: remote.description.clone(),
        enabled: known_model.is_some_and(|k| k.enabled),
        context_window_tokens: known_model.and_then(|k| k.context_window_tokens),
        max_output: None,
        function_call: detected.function_call || curated.function_call,
        vision: detected.vision || curated.vision,
        reasoning: detected.reasoning || curated.reasoning,
    }
}

/// Enrich every descriptor. Output keeps input order and length.
pub fn enrich(
    remote: &[RemoteModelDescriptor],
    known: &[KnownModelEntry],
    rules: &CapabilityRules,
) -> Vec<EnrichedModelCard> {
    remote
        .iter()
        .map(|m| enrich_one(m, known, rules))
        .collect()
}

/// `enrich` with the default rule set.
#[cfg(test)]
pub fn enrich_with_defaults(
    remote: &[RemoteModelDescriptor],
    known: &[KnownModelEntry],
) -> Vec<EnrichedModelCard> {
    enrich(remote, known, &CapabilityRules::default())
}

/// Card counts per capability.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ModelSummary {
    pub total: usize,
    pub enabled: usize,
    pub function_call: usize,
    pub vision: usize,
    pub reasoning: usize,
}

pub fn summarize(cards: &[EnrichedModelCard]) -> ModelSummary {
    cards.iter().fold(
        ModelSummary {
            total: cards.len(),
            ..Default::default()
        },
        |mut s, c| {
            s.enabled += usize::from(c.enabled);
            s.function_call += usize::from(c.function_call);
            s.vision += usize::from(c.vision);
            s.reasoning += usize::from(c.reasoning);
            s
        },
    )
}
