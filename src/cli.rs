use clap::Parser;
use std::path::PathBuf;

/// CLI arguments for banter
#[derive(Debug, Parser)]
#[command(name = "banter")]
#[command(about = "Persona-driven terminal chat for OpenAI-compatible endpoints")]
#[command(version)]
pub struct Cli {
    /// Prompt template wrapped around every message ($Message marks where
    /// the typed text goes; $PersonaName and $UserName are substituted)
    #[arg(short = 'p', long)]
    pub prompt: Option<String>,

    /// System prompt template ($Prompt expands to the resolved prompt)
    #[arg(long)]
    pub sys_prompt: Option<String>,

    /// Name the assistant should adopt
    #[arg(short = 'n', long)]
    pub name: Option<String>,

    /// Name the assistant should call you
    #[arg(short = 'u', long)]
    pub user_name: Option<String>,

    /// API key (falls back to the config file, then $OPENAI_API_KEY)
    #[arg(short = 'k', long)]
    pub key: Option<String>,

    /// Maximum tokens the model may spend on one reply
    #[arg(short = 'M', long)]
    pub max_tokens: Option<u32>,

    /// Sampling temperature
    #[arg(short = 'T', long, allow_hyphen_values = true)]
    pub temperature: Option<f64>,

    /// Path to the JSON config file (default: config.json next to the binary)
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Debugging mode
    #[arg(long, hide = true)]
    pub debug: bool,
}
