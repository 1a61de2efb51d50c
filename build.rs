//! Build script: validates known-models.json at compile time.

use std::path::PathBuf;

fn main() {
    let manifest_dir =
        std::env::var("CARGO_MANIFEST_DIR").expect("CARGO_MANIFEST_DIR set by Cargo");
    let table_path: PathBuf = [&manifest_dir, "config", "known-models.json"]
        .iter()
        .collect();
    println!("cargo:rerun-if-changed={}", table_path.display());
    let json = std::fs::read_to_string(&table_path).unwrap_or_else(|e| {
        panic!(
            "Failed to read {}: {}. known-models.json must exist and be valid.",
            table_path.display(),
            e
        )
    });
    #[derive(serde::Deserialize)]
    #[allow(dead_code)]
    #[serde(rename_all = "camelCase")]
    struct KnownModelEntry {
        id: String,
        #[serde(default)]
        context_window_tokens: Option<u64>,
        #[serde(default)]
        enabled: bool,
    }
    let entries: Vec<KnownModelEntry> = serde_json::from_str(&json).unwrap_or_else(|e| {
        panic!(
            "known-models.json is invalid JSON: {}. Fix the file and rebuild.",
            e
        )
    });
    if let Some(entry) = entries.iter().find(|e| e.id.trim().is_empty()) {
        panic!(
            "known-models.json has an entry with an empty id (context window {:?})",
            entry.context_window_tokens
        );
    }
}
