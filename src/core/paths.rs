//! Centralized path helpers for the config directory.

use std::path::PathBuf;

use crate::core::app;

/// Project directories from the standard platform locations.
pub fn project_dirs() -> Option<directories::ProjectDirs> {
    directories::ProjectDirs::from("io", app::VENDOR, app::NAME)
}

/// Config directory (~/.config/github-models/).
pub fn config_dir() -> Option<PathBuf> {
    project_dirs().map(|d| d.config_dir().to_path_buf())
}

/// Known-model table override in the config directory.
pub fn known_models_path() -> Option<PathBuf> {
    config_dir().map(|d| d.join("known-models.json"))
}

/// Capability rules override in the config directory.
pub fn rules_path() -> Option<PathBuf> {
    config_dir().map(|d| d.join("capability-rules.json"))
}
