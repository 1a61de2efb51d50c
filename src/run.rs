//! Application run modes: logger init and single prompt chat.

use std::io::{self, Write};

use crate::cli::Args;
use crate::core;
use crate::core::config::Config;

/// Initialize env_logger from -v/-q. Chat payload debugging raises the level to at least info.
pub fn init_logger(args: &Args) {
    let log_level = effective_log_level(args.log_level(), core::config::debug_chat_completion());
    let _ = env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(log_level))
        .try_init();
}

fn effective_log_level(level: &'static str, debug_chat: bool) -> &'static str {
    match level {
        "error" | "warn" if debug_chat => "info",
        other => other,
    }
}

/// Run single prompt mode: chat with the model, print the answer to stdout.
pub async fn run_chat(
    config: &Config,
    prompt_arg: &str,
    model: Option<&str>,
    system: Option<&str>,
    no_stream: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let prompt = if prompt_arg == "-" {
        io::read_to_string(io::stdin())?
    } else {
        prompt_arg.to_string()
    };
    let prompt = prompt.trim();
    if prompt.is_empty() {
        eprintln!("Error: empty prompt");
        std::process::exit(1);
    }

    let model = model.unwrap_or(&config.model_id);
    if core::llm::payload::is_non_streaming_reasoning_model(model) && !no_stream {
        log::info!("{} does not support streaming; waiting for the full response", model);
    }

    let on_content_chunk: Option<core::llm::OnContentChunk> = if no_stream {
        None
    } else {
        Some(Box::new(|s| {
            let _ = io::stdout().write_all(s.as_bytes());
            let _ = io::stdout().flush();
        }))
    };

    let result = core::llm::chat(core::llm::ChatRequest {
        config,
        model,
        prompt,
        system,
        stream: no_stream.then_some(false),
        on_content_chunk,
    })
    .await;

    match result {
        Ok(answer) => {
            // Streamed content was already printed chunk by chunk.
            if answer.streamed {
                println!();
            } else {
                println!("{}", answer.content);
            }
            Ok(())
        }
        Err(e) => core::cli::exit_with_provider_error(&e),
    }
}
