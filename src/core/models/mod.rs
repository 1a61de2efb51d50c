//! Model discovery: remote list, known-model table, capability rules, and enrichment.

mod enrich;
mod fetch;
mod info;
mod known;
pub mod rules;

pub use enrich::{ModelSummary, summarize};
pub use fetch::{fetch_enriched_models, filter_models};
pub use info::{EnrichedModelCard, KnownModelEntry};
pub use known::{load_known_models, table_source};
pub use rules::{CapabilityRules, RulesSource, load_rules};
