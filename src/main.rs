//! # github-models
//!
//! Lists the models offered by GitHub Models through its OpenAI-compatible endpoint,
//! annotates them with capability flags from a known-model table and detection rules,
//! and sends single chat prompts.

mod cli;
mod core;
mod run;

use clap::{CommandFactory, Parser};
use dotenv::dotenv;

use crate::cli::{Args, Commands};
use crate::core::config::{self, ConfigError};
use crate::core::models;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load environment variables from .env file
    dotenv().ok();

    let args = Args::parse();
    run::init_logger(&args);

    match &args.command {
        Commands::Config => {
            core::cli::run_config(args.known_models.as_deref(), args.rules.as_deref());
        }
        Commands::Completions { shell } => {
            let mut cmd = Args::command();
            cli::generate(*shell, &mut cmd, core::app::NAME, &mut std::io::stdout());
        }
        Commands::Summary => {
            let config = load_config_or_exit();
            let (known, rules) = load_catalog_or_exit(&args);
            core::cli::run_summary(&config, &known, &rules).await;
        }
        Commands::Models { query, json } => {
            let config = load_config_or_exit();
            let (known, rules) = load_catalog_or_exit(&args);
            core::cli::run_models(&config, &known, &rules, query.as_deref(), *json).await;
        }
        Commands::Chat {
            prompt,
            model,
            system,
            no_stream,
        } => {
            let config = load_config_or_exit();
            run::run_chat(
                &config,
                prompt,
                model.as_deref(),
                system.as_deref(),
                *no_stream,
            )
            .await?;
        }
    }

    Ok(())
}

/// Load configuration or exit with a user-facing message (Display, not Debug).
fn load_config_or_exit() -> config::Config {
    config::load().unwrap_or_else(|e| exit_with_config_error(&e))
}

/// Known-model table and capability rules, both resolved before any network call.
fn load_catalog_or_exit(args: &Args) -> (Vec<models::KnownModelEntry>, models::CapabilityRules) {
    let (known, source) = models::load_known_models(args.known_models.as_deref())
        .unwrap_or_else(|e| exit_with_config_error(&e));
    log::debug!("Known-model table: {} ({} entries)", source, known.len());
    let (rules, _) = models::load_rules(args.rules.as_deref())
        .unwrap_or_else(|e| exit_with_config_error(&e));
    (known, rules)
}

fn exit_with_config_error(e: &ConfigError) -> ! {
    eprintln!("Error: {}", e);
    if matches!(e, ConfigError::MissingToken) {
        eprintln!(
            "Create a personal access token at https://github.com/settings/tokens and export {}.",
            config::TOKEN_VAR
        );
    }
    std::process::exit(1);
}
