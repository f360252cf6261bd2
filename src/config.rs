//! Startup configuration: built-in defaults, the optional JSON config
//! file, then command-line overrides, merged in that order.

use colored::Colorize;
use serde::Deserialize;
use std::env;
use std::path::{Path, PathBuf};

use crate::cli::Cli;
use crate::session::SessionParams;

pub const OPENAI_CHAT_URL: &str = "https://api.openai.com/v1/chat/completions";
pub const DEFAULT_MODEL: &str = "gpt-3.5-turbo";
// Roughly two thirds of the gpt-3.5 context window; the remainder is left
// for the reply and for tokenizer mismatch. Tunable, not load-bearing.
pub const DEFAULT_BUDGET_CEILING: usize = 2730;
pub const DEFAULT_SAFETY_MARGIN: usize = 350;

/// Fixed per-run settings for the endpoint and the token budget.
/// Immutable once the session is constructed.
#[derive(Debug, Clone)]
pub struct SessionConfig {
    pub model: String,
    pub api_url: String,
    /// Upper bound for serialized history plus anticipated output.
    pub budget_ceiling: usize,
    /// Reserve absorbing the gap between local and remote tokenization.
    pub safety_margin: usize,
    pub debug: bool,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            model: DEFAULT_MODEL.to_string(),
            api_url: OPENAI_CHAT_URL.to_string(),
            budget_ceiling: DEFAULT_BUDGET_CEILING,
            safety_margin: DEFAULT_SAFETY_MARGIN,
            debug: false,
        }
    }
}

/// On-disk config file with PascalCase keys. Every field is optional.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct FileConfig {
    pub prompt: Option<String>,
    pub sys_prompt: Option<String>,
    pub name: Option<String>,
    pub user_name: Option<String>,
    pub api_key: Option<String>,
    pub max_tokens: Option<u32>,
    pub temperature: Option<f64>,
    pub model: Option<String>,
    pub api_url: Option<String>,
    pub context_tokens: Option<usize>,
    pub safety_margin: Option<usize>,
    pub debug: Option<bool>,
}

impl FileConfig {
    /// Read `path` if it exists. A malformed file is reported and ignored
    /// rather than aborting startup; a missing file is simply empty.
    pub fn load(path: &Path) -> Self {
        let text = match std::fs::read_to_string(path) {
            Ok(text) => text,
            Err(_) => return Self::default(),
        };
        match serde_json::from_str(&text) {
            Ok(config) => config,
            Err(err) => {
                eprintln!(
                    "{} Ignoring malformed config file {}: {}",
                    "⚠️".yellow(),
                    path.display(),
                    err
                );
                Self::default()
            }
        }
    }

    /// Default location: `config.json` next to the executable.
    pub fn default_path() -> Option<PathBuf> {
        Some(env::current_exe().ok()?.parent()?.join("config.json"))
    }
}

/// Fully merged startup settings.
#[derive(Debug)]
pub struct Settings {
    pub config: SessionConfig,
    pub params: SessionParams,
    pub api_key: String,
}

/// Merge precedence: command line over config file over built-in defaults;
/// the API key additionally falls back to `$OPENAI_API_KEY`.
pub fn merge(cli: &Cli, file: FileConfig) -> Settings {
    let mut params = SessionParams::default();
    let mut config = SessionConfig::default();

    if let Some(prompt) = file.prompt {
        params.prompt_template = prompt;
    }
    if let Some(sys_prompt) = file.sys_prompt {
        params.sys_prompt_template = sys_prompt;
    }
    if let Some(name) = file.name {
        params.persona_name = name;
    }
    if let Some(user_name) = file.user_name {
        params.user_name = user_name;
    }
    if let Some(max_tokens) = file.max_tokens {
        params.max_tokens = max_tokens;
    }
    if let Some(temperature) = file.temperature {
        params.temperature = temperature;
    }
    if let Some(model) = file.model {
        config.model = model;
    }
    if let Some(api_url) = file.api_url {
        config.api_url = api_url;
    }
    if let Some(context_tokens) = file.context_tokens {
        config.budget_ceiling = context_tokens;
    }
    if let Some(safety_margin) = file.safety_margin {
        config.safety_margin = safety_margin;
    }
    config.debug = file.debug.unwrap_or(false) || cli.debug;

    if let Some(ref prompt) = cli.prompt {
        params.prompt_template = prompt.clone();
    }
    if let Some(ref sys_prompt) = cli.sys_prompt {
        params.sys_prompt_template = sys_prompt.clone();
    }
    if let Some(ref name) = cli.name {
        params.persona_name = name.clone();
    }
    if let Some(ref user_name) = cli.user_name {
        params.user_name = user_name.clone();
    }
    if let Some(max_tokens) = cli.max_tokens {
        params.max_tokens = max_tokens;
    }
    if let Some(temperature) = cli.temperature {
        params.temperature = temperature;
    }

    let api_key = cli
        .key
        .clone()
        .or(file.api_key)
        .or_else(|| env::var("OPENAI_API_KEY").ok())
        .unwrap_or_default();

    Settings {
        config,
        params,
        api_key,
    }
}
