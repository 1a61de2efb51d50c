//! CLI-only commands: config info, models list, capability summary.
//!
//! These produce plain text (or JSON) on stdout and exit with status 1 on failure.

use std::path::Path;

use crate::core::app;
use crate::core::config::{self, Config};
use crate::core::llm::{ProviderError, TOKEN_GUIDANCE};
use crate::core::models::{
    self, CapabilityRules, EnrichedModelCard, KnownModelEntry, ModelSummary, RulesSource,
};
use crate::core::paths;
use crate::core::util;

/// Cards shown by the `summary` command.
const SUMMARY_PREVIEW: usize = 5;

/// Print a provider error (with token guidance on 401) and exit with status 1.
pub fn exit_with_provider_error(e: &ProviderError) -> ! {
    eprintln!("Error: {}", e);
    if e.is_auth() {
        eprintln!("\n{}", TOKEN_GUIDANCE);
    }
    std::process::exit(1);
}

/// Run the `config` command: display endpoint, token status, and data sources.
pub fn run_config(known_path: Option<&Path>, rules_path: Option<&Path>) {
    let config_dir = paths::config_dir()
        .map(|p| p.display().to_string())
        .unwrap_or_else(|| "—".to_string());
    let token_status = if config::has_token() { "set ✓" } else { "not set" };
    let (rules_source, rule_lines) = match models::load_rules(rules_path) {
        Ok((rules, RulesSource::Default)) => ("default".to_string(), rules.describe()),
        Ok((rules, RulesSource::File(p))) => (p.display().to_string(), rules.describe()),
        Err(e) => (format!("error: {}", e), Vec::new()),
    };
    let debug = if config::debug_chat_completion() { "on" } else { "off" };

    println!("Version:       {} {}", app::NAME, app::VERSION);
    println!("Config:        {}", config_dir);
    println!("Endpoint:      {}", config::base_url());
    println!("Token:         {} ({})", token_status, config::TOKEN_VAR);
    println!("Known models:  {}", models::table_source(known_path));
    println!("Rules:         {}", rules_source);
    println!("Debug chat:    {} ({})", debug, config::DEBUG_CHAT_VAR);
    for line in rule_lines {
        println!("  {}", line);
    }
}

/// Run the `models` command: fetch, enrich, and list as a table or JSON array.
pub async fn run_models(
    config: &Config,
    known: &[KnownModelEntry],
    rules: &CapabilityRules,
    query: Option<&str>,
    json: bool,
) {
    let cards = match models::fetch_enriched_models(config, known, rules).await {
        Ok(c) => c,
        Err(e) => exit_with_provider_error(&e),
    };

    let filtered: Vec<&EnrichedModelCard> = models::filter_models(&cards, query.unwrap_or(""));

    if json {
        match serde_json::to_string_pretty(&filtered) {
            Ok(s) => println!("{}", s),
            Err(e) => {
                eprintln!("Error: {}", e);
                std::process::exit(1);
            }
        }
        return;
    }

    if filtered.is_empty() {
        println!("No models found.");
        return;
    }

    let id_w = filtered
        .iter()
        .map(|m| m.id.len())
        .max()
        .unwrap_or(20)
        .max(20);
    let name_w = filtered
        .iter()
        .map(|m| m.display_name.len())
        .max()
        .unwrap_or(30)
        .max(30);

    println!("{:<id_w$}  {:<name_w$}  {:>7}  {}", "ID", "Name", "Context", "Abilities");
    println!("{}  {}  -------  ---------", "-".repeat(id_w), "-".repeat(name_w));
    for m in &filtered {
        println!(
            "{:<id_w$}  {:<name_w$}  {:>7}  {}",
            m.id,
            m.display_name,
            context_label(m),
            ability_badges(m)
        );
    }

    println!("\n{} model(s) listed", filtered.len());
}

/// Run the `summary` command: capability counts and the first few cards.
pub async fn run_summary(config: &Config, known: &[KnownModelEntry], rules: &CapabilityRules) {
    println!("Fetching models from {} ...", config.base_url);
    let cards = match models::fetch_enriched_models(config, known, rules).await {
        Ok(c) => c,
        Err(e) => exit_with_provider_error(&e),
    };
    print!("{}", format_summary(&models::summarize(&cards), &cards));
}

fn format_summary(summary: &ModelSummary, cards: &[EnrichedModelCard]) -> String {
    let mut out = format!(
        "\nFound {} models\n  enabled:        {}\n  function call:  {}\n  vision:         {}\n  reasoning:      {}\n",
        summary.total, summary.enabled, summary.function_call, summary.vision, summary.reasoning
    );
    if cards.is_empty() {
        return out;
    }
    out.push_str(&format!(
        "\nFirst {} models:\n",
        cards.len().min(SUMMARY_PREVIEW)
    ));
    for (i, card) in cards.iter().take(SUMMARY_PREVIEW).enumerate() {
        out.push_str(&format!("{}. {} ({})\n", i + 1, card.display_name, card.id));
        if !card.description.is_empty() {
            out.push_str(&format!("   {}\n", first_line(&card.description)));
        }
        out.push_str(&format!(
            "   context: {}  abilities: {}  enabled: {}\n",
            context_label(card),
            ability_badges(card),
            card.enabled
        ));
    }
    out
}

fn context_label(card: &EnrichedModelCard) -> String {
    card.context_window_tokens
        .map(util::format_tokens)
        .unwrap_or_else(|| "—".to_string())
}

fn ability_badges(card: &EnrichedModelCard) -> String {
    let badges: Vec<&str> = [
        (card.function_call, "tools"),
        (card.vision, "vision"),
        (card.reasoning, "reasoning"),
    ]
    .into_iter()
    .filter_map(|(on, label)| on.then_some(label))
    .collect();
    if badges.is_empty() {
        "—".to_string()
    } else {
        badges.join(",")
    }
}

fn first_line(s: &str) -> &str {
    s.lines().next().unwrap_or_default().trim()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn card(id: &str, reasoning: bool, ctx: Option<u64>) -> EnrichedModelCard {
        EnrichedModelCard {
            id: id.to_string(),
            display_name: id.to_uppercase(),
            description: "First line\nsecond line".to_string(),
            enabled: false,
            context_window_tokens: ctx,
            max_output: None,
            function_call: false,
            vision: false,
            reasoning,
        }
    }

    #[test]
    fn badges_and_context_labels() {
        let c = card("o3-mini", true, Some(200_000));
        assert_eq!(ability_badges(&c), "reasoning");
        assert_eq!(context_label(&c), "200k");
        let c = card("plain", false, None);
        assert_eq!(ability_badges(&c), "—");
        assert_eq!(context_label(&c), "—");
    }

    #[test]
    fn summary_lists_at_most_five() {
        let cards: Vec<EnrichedModelCard> =
            (0..7).map(|i| card(&format!("m{}", i), i % 2 == 0, None)).collect();
        let out = format_summary(&models::summarize(&cards), &cards);
        assert!(out.contains("Found 7 models"));
        assert!(out.contains("reasoning:      4"));
        assert!(out.contains("First 5 models:"));
        assert!(out.contains("5. M4 (m4)"));
        assert!(!out.contains("M5"));
        assert!(out.contains("   First line\n"));
        assert!(!out.contains("second line"));
    }

    #[test]
    fn summary_empty_catalog() {
        let out = format_summary(&ModelSummary::default(), &[]);
        assert!(out.contains("Found 0 models"));
        assert!(!out.contains("First"));
    }
}
