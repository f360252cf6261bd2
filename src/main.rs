use anyhow::Result;
use clap::Parser;
use colored::Colorize;
use std::sync::Arc;

use banter::api::HttpTransport;
use banter::app::repl::{self, ConsoleRetryPrompt};
use banter::cli::Cli;
use banter::config::{self, FileConfig};
use banter::logging::TranscriptLogger;
use banter::session::ChatSession;
use banter::tokenizer::{BpeTokenizer, HeuristicTokenizer, Tokenizer};

#[tokio::main]
async fn main() -> Result<()> {
    // Load environment variables from .env file if it exists
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    let file = match cli.config.clone().or_else(FileConfig::default_path) {
        Some(path) => FileConfig::load(&path),
        None => FileConfig::default(),
    };
    let settings = config::merge(&cli, file);

    if settings.config.debug {
        eprintln!("api_key:     \"{}\"", mask(&settings.api_key));
        eprintln!("max_tokens:  \"{}\"", settings.params.max_tokens);
        eprintln!("temperature: \"{}\"", settings.params.temperature);
        eprintln!("name:        \"{}\"", settings.params.persona_name);
        eprintln!("prompt:      \"{}\"", settings.params.prompt_template);
        eprintln!();
    }

    if settings.api_key.is_empty() {
        eprintln!(
            "{} An API key must be provided either in the configuration file or on the command line.",
            "FATAL ERROR:".bright_red().bold()
        );
        std::process::exit(1);
    }

    let tokenizer: Arc<dyn Tokenizer> = match BpeTokenizer::new() {
        Ok(bpe) => Arc::new(bpe),
        Err(err) => {
            eprintln!(
                "{} BPE tokenizer unavailable ({}); falling back to a character estimate",
                "⚠️".yellow(),
                err
            );
            Arc::new(HeuristicTokenizer::new())
        }
    };

    let session = ChatSession::new(
        settings.config,
        settings.params,
        settings.api_key,
        tokenizer,
        Arc::new(HttpTransport::new()),
        Box::new(ConsoleRetryPrompt),
    )?;

    let logger = match TranscriptLogger::new() {
        Ok(logger) => {
            println!(
                "{}",
                format!("Transcript: {}", logger.path().display()).bright_black()
            );
            Some(logger)
        }
        Err(err) => {
            eprintln!("Logging disabled: {}", err);
            None
        }
    };

    repl::run(session, logger).await
}

fn mask(key: &str) -> String {
    if key.is_empty() {
        return String::new();
    }
    format!("{}***", key.chars().take(8).collect::<String>())
}
