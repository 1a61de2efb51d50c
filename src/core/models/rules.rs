//! Capability detection rules: ordered `(field, pattern, capability)` triples.
//!
//! Fields are lower-cased with `str::to_lowercase` before matching; `contains` and `prefix`
//! patterns are lower-cased when the rule is built and `regex` patterns are compiled
//! case-insensitive. Any matching rule sets its capability.

use std::fs;
use std::path::{Path, PathBuf};

use regex::{Regex, RegexBuilder};
use serde::{Deserialize, Serialize};

use super::info::ModelAbilities;
use crate::core::config::{self, ConfigError};
use crate::core::paths;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Capability {
    FunctionCall,
    Vision,
    Reasoning,
}

/// Which descriptor field a rule inspects.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MatchField {
    Name,
    Description,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MatchKind {
    #[default]
    Contains,
    Prefix,
    Regex,
}

#[derive(Clone, Debug)]
enum Pattern {
    Contains(String),
    Prefix(String),
    Regex(Regex),
}

impl Capability {
    pub fn as_str(self) -> &'static str {
        match self {
            Capability::FunctionCall => "functionCall",
            Capability::Vision => "vision",
            Capability::Reasoning => "reasoning",
        }
    }
}

impl MatchField {
    pub fn as_str(self) -> &'static str {
        match self {
            MatchField::Name => "name",
            MatchField::Description => "description",
        }
    }
}

impl MatchKind {
    pub fn as_str(self) -> &'static str {
        match self {
            MatchKind::Contains => "contains",
            MatchKind::Prefix => "prefix",
            MatchKind::Regex => "regex",
        }
    }
}

/// A single detection rule.
#[derive(Clone, Debug)]
pub struct CapabilityRule {
    pub field: MatchField,
    pub capability: Capability,
    pattern: Pattern,
}

/// On-disk form of a rule.
#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct RawRule {
    field: MatchField,
    #[serde(rename = "match", default)]
    kind: MatchKind,
    pattern: String,
    capability: Capability,
}

impl CapabilityRule {
    pub fn contains(field: MatchField, pattern: &str, capability: Capability) -> Self {
        Self {
            field,
            capability,
            pattern: Pattern::Contains(pattern.to_lowercase()),
        }
    }

    pub fn prefix(field: MatchField, pattern: &str, capability: Capability) -> Self {
        Self {
            field,
            capability,
            pattern: Pattern::Prefix(pattern.to_lowercase()),
        }
    }

    pub fn regex(
        field: MatchField,
        pattern: &str,
        capability: Capability,
    ) -> Result<Self, regex::Error> {
        Ok(Self {
            field,
            capability,
            pattern: Pattern::Regex(RegexBuilder::new(pattern).case_insensitive(true).build()?),
        })
    }

    pub fn kind(&self) -> MatchKind {
        match self.pattern {
            Pattern::Contains(_) => MatchKind::Contains,
            Pattern::Prefix(_) => MatchKind::Prefix,
            Pattern::Regex(_) => MatchKind::Regex,
        }
    }

    pub fn pattern(&self) -> &str {
        match &self.pattern {
            Pattern::Contains(p) | Pattern::Prefix(p) => p,
            Pattern::Regex(re) => re.as_str(),
        }
    }

    /// Match against an already lower-cased field value.
    pub fn matches(&self, lowered: &str) -> bool {
        match &self.pattern {
            Pattern::Contains(p) => lowered.contains(p.as_str()),
            Pattern::Prefix(p) => lowered.starts_with(p.as_str()),
            Pattern::Regex(re) => re.is_match(lowered),
        }
    }

    fn from_raw(raw: RawRule) -> Result<Self, String> {
        if raw.pattern.is_empty() {
            return Err("empty pattern".to_string());
        }
        match raw.kind {
            MatchKind::Contains => Ok(Self::contains(raw.field, &raw.pattern, raw.capability)),
            MatchKind::Prefix => Ok(Self::prefix(raw.field, &raw.pattern, raw.capability)),
            MatchKind::Regex => Self::regex(raw.field, &raw.pattern, raw.capability)
                .map_err(|e| e.to_string()),
        }
    }
}

/// Ordered rule set used by enrichment.
#[derive(Clone, Debug)]
pub struct CapabilityRules {
    rules: Vec<CapabilityRule>,
}

impl Default for CapabilityRules {
    fn default() -> Self {
        use Capability::*;
        use MatchField::*;
        Self::new(vec![
            CapabilityRule::contains(Description, "function", FunctionCall),
            CapabilityRule::contains(Description, "tool", FunctionCall),
            CapabilityRule::contains(Description, "vision", Vision),
            CapabilityRule::contains(Name, "deepseek-r1", Reasoning),
            CapabilityRule::contains(Name, "o1", Reasoning),
            CapabilityRule::contains(Name, "o3", Reasoning),
        ])
    }
}

impl CapabilityRules {
    pub fn new(rules: Vec<CapabilityRule>) -> Self {
        Self { rules }
    }

    pub fn rules(&self) -> &[CapabilityRule] {
        &self.rules
    }

    /// Parse a JSON array of rules.
    pub fn from_json(json: &str) -> Result<Self, String> {
        let raws: Vec<RawRule> = serde_json::from_str(json).map_err(|e| e.to_string())?;
        let rules = raws
            .into_iter()
            .enumerate()
            .map(|(i, raw)| CapabilityRule::from_raw(raw).map_err(|e| format!("rule {}: {}", i, e)))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self::new(rules))
    }

    /// One line per rule, e.g. `name prefix "o1" -> reasoning`.
    pub fn describe(&self) -> Vec<String> {
        self.rules
            .iter()
            .map(|r| {
                format!(
                    "{} {} {:?} -> {}",
                    r.field.as_str(),
                    r.kind().as_str(),
                    r.pattern(),
                    r.capability.as_str()
                )
            })
            .collect()
    }

    /// Capabilities inferred from a model's name and description.
    pub fn detect(&self, name: &str, description: &str) -> ModelAbilities {
        let name = name.to_lowercase();
        let description = description.to_lowercase();
        let mut abilities = ModelAbilities::default();
        for rule in &self.rules {
            let value = match rule.field {
                MatchField::Name => &name,
                MatchField::Description => &description,
            };
            if rule.matches(value) {
                match rule.capability {
                    Capability::FunctionCall => abilities.function_call = true,
                    Capability::Vision => abilities.vision = true,
                    Capability::Reasoning => abilities.reasoning = true,
                }
            }
        }
        abilities
    }
}

/// Where the active rule set came from.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum RulesSource {
    Default,
    File(PathBuf),
}

/// Load rules: explicit path, then `GITHUB_MODELS_RULES`, then the config dir file, then defaults.
pub fn load_rules(path: Option<&Path>) -> Result<(CapabilityRules, RulesSource), ConfigError> {
    match resolve_rules_path(path) {
        Some(path) => {
            let json = fs::read_to_string(&path).map_err(|e| ConfigError::Rules {
                path: Some(path.clone()),
                reason: e.to_string(),
            })?;
            let rules = CapabilityRules::from_json(&json).map_err(|reason| ConfigError::Rules {
                path: Some(path.clone()),
                reason,
            })?;
            log::debug!("Loaded {} capability rules from {}", rules.rules().len(), path.display());
            Ok((rules, RulesSource::File(path)))
        }
        None => Ok((CapabilityRules::default(), RulesSource::Default)),
    }
}

fn resolve_rules_path(path: Option<&Path>) -> Option<PathBuf> {
    if let Some(p) = path {
        return Some(p.to_path_buf());
    }
    if let Some(p) = config::rules_override() {
        return Some(p);
    }
    paths::rules_path().filter(|p| p.is_file())
}
