//! Known-model reference table: builtin copy, config-dir override, or explicit file.

use std::fs;
use std::path::{Path, PathBuf};

use super::info::KnownModelEntry;
use crate::core::config::{self, ConfigError};
use crate::core::paths;

/// Table compiled into the binary; validated by build.rs.
const BUILTIN_TABLE: &str = include_str!("../../../config/known-models.json");

/// Where the active table came from.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum TableSource {
    Builtin,
    File(PathBuf),
}

impl std::fmt::Display for TableSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TableSource::Builtin => write!(f, "builtin"),
            TableSource::File(p) => write!(f, "{}", p.display()),
        }
    }
}

/// Builtin table. Falls back to empty (with a warning) if the embedded JSON is unreadable.
pub fn builtin_known_models() -> Vec<KnownModelEntry> {
    serde_json::from_str(BUILTIN_TABLE).unwrap_or_else(|e| {
        log::warn!("Builtin known-model table is invalid: {}", e);
        Vec::new()
    })
}

/// Parse a known-model table from a JSON file.
pub fn load_from_file(path: &Path) -> Result<Vec<KnownModelEntry>, ConfigError> {
    let table_err = |reason: String| ConfigError::KnownTable {
        path: path.to_path_buf(),
        reason,
    };
    let data = fs::read_to_string(path).map_err(|e| table_err(e.to_string()))?;
    serde_json::from_str(&data).map_err(|e| table_err(e.to_string()))
}

/// Load the table: explicit path, then `GITHUB_MODELS_KNOWN_TABLE`, then the config dir
/// file if present, then the builtin copy.
pub fn load_known_models(
    path: Option<&Path>,
) -> Result<(Vec<KnownModelEntry>, TableSource), ConfigError> {
    match resolve_table_path(path) {
        Some(path) => {
            let entries = load_from_file(&path)?;
            log::debug!("Loaded {} known models from {}", entries.len(), path.display());
            Ok((entries, TableSource::File(path)))
        }
        None => Ok((builtin_known_models(), TableSource::Builtin)),
    }
}

/// Source that `load_known_models` would use, without reading it.
pub fn table_source(path: Option<&Path>) -> TableSource {
    resolve_table_path(path).map_or(TableSource::Builtin, TableSource::File)
}

fn resolve_table_path(path: Option<&Path>) -> Option<PathBuf> {
    if let Some(p) = path {
        return Some(p.to_path_buf());
    }
    if let Some(p) = config::known_table_override() {
        return Some(p);
    }
    paths::known_models_path().filter(|p| p.is_file())
}
