//! CLI definitions: argument parsing, subcommands, and help text.

use std::path::PathBuf;

use clap::{ArgAction, Parser, Subcommand};
use clap_complete::Shell;

pub use clap_complete::generate;

const AFTER_HELP: &str = "\
ENVIRONMENT:
  GITHUB_TOKEN                    Personal access token (required for network commands)
  GITHUB_MODELS_BASE_URL          Endpoint override (default https://models.inference.ai.azure.com)
  GITHUB_MODELS_MODEL             Default chat model (default gpt-4o-mini)
  GITHUB_MODELS_KNOWN_TABLE       Known-model table JSON file
  GITHUB_MODELS_RULES             Capability rules JSON file
  DEBUG_GITHUB_CHAT_COMPLETION=1  Log chat completion payloads

EXAMPLES:
  github-models summary                 Capability counts and the first five models
  github-models models --query phi      List models matching \"phi\"
  github-models models --json           Enriched model list as a JSON array
  github-models chat -p \"hello\"         Single prompt, streamed to stdout
  github-models chat -m o3-mini -p -    Read prompt from stdin (reasoning models never stream)
  github-models config                  Show endpoint, token status, and data sources
  github-models completions bash        Generate bash completions
";

/// Command-line arguments for the application.
#[derive(Parser)]
#[command(
    author,
    version,
    about = "List and annotate GitHub Models through their OpenAI-compatible endpoint",
    after_help = AFTER_HELP
)]
pub struct Args {
    #[command(subcommand)]
    pub command: Commands,

    /// Known-model table (JSON array) instead of the builtin one
    #[arg(long, global = true, value_name = "PATH")]
    pub known_models: Option<PathBuf>,

    /// Capability rules (JSON array) instead of the default rules
    #[arg(long, global = true, value_name = "PATH")]
    pub rules: Option<PathBuf>,

    /// Increase log verbosity (use multiple times for debug)
    #[arg(short = 'v', long = "verbose", action = ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Reduce log output (errors only)
    #[arg(short = 'q', long = "quiet", global = true)]
    pub quiet: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Print capability counts and the first five models
    Summary,
    /// List available models with capability flags
    Models {
        /// Filter models by id or display name
        #[arg(long)]
        query: Option<String>,
        /// Print the enriched list as a JSON array
        #[arg(long)]
        json: bool,
    },
    /// Send a single prompt and print the answer
    Chat {
        /// Prompt text ('-' reads from stdin)
        #[arg(short = 'p', long)]
        prompt: String,
        /// Model name (e.g. gpt-4o, o3-mini)
        #[arg(short = 'm', long)]
        model: Option<String>,
        /// System message
        #[arg(long)]
        system: Option<String>,
        /// Wait for the full response instead of streaming
        #[arg(long)]
        no_stream: bool,
    },
    /// Show endpoint, token status, and data sources
    Config,
    /// Generate shell completion script
    Completions {
        /// Shell to generate completions for (bash, zsh, fish, powershell, elvish)
        #[arg(value_parser = clap::value_parser!(Shell))]
        shell: Shell,
    },
}

impl Args {
    /// Log level based on -v/-q flags: error, warn, info, or debug.
    pub fn log_level(&self) -> &'static str {
        if self.quiet {
            "error"
        } else if self.verbose >= 2 {
            "debug"
        } else if self.verbose >= 1 {
            "info"
        } else {
            "warn"
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn log_level_from_flags() {
        let args = Args::parse_from(["github-models", "summary"]);
        assert_eq!(args.log_level(), "warn");
        let args = Args::parse_from(["github-models", "-vv", "summary"]);
        assert_eq!(args.log_level(), "debug");
        let args = Args::parse_from(["github-models", "summary", "-q"]);
        assert_eq!(args.log_level(), "error");
    }

    #[test]
    fn chat_flags_parse() {
        let args = Args::parse_from(["github-models", "chat", "-m", "o1", "-p", "hi", "--no-stream"]);
        match args.command {
            Commands::Chat {
                prompt,
                model,
                no_stream,
                system,
            } => {
                assert_eq!(prompt, "hi");
                assert_eq!(model.as_deref(), Some("o1"));
                assert!(no_stream);
                assert!(system.is_none());
            }
            _ => panic!("expected chat"),
        }
    }

    #[test]
    fn cli_definition_is_valid() {
        use clap::CommandFactory;
        Args::command().debug_assert();
    }
}
