//! Transcript and debug logging.

use anyhow::{Context, Result};
use chrono::Local;
use colored::Colorize;
use std::fs::{self, File, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

/// Append-only plaintext transcript, one file per run.
pub struct TranscriptLogger {
    file: File,
    path: PathBuf,
}

impl TranscriptLogger {
    /// Create `~/.banter/logs/banter-<timestamp>.log`.
    pub fn new() -> Result<Self> {
        let logs_dir = logs_dir()?;
        let filename = format!("banter-{}.log", Local::now().format("%Y-%m-%d-%H%M%S"));
        let path = logs_dir.join(filename);
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&path)
            .with_context(|| format!("failed to open transcript log {}", path.display()))?;
        Ok(Self { file, path })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Append one turn. A write failure is reported, never fatal.
    pub fn log(&mut self, role: &str, content: &str) {
        let line = format!("[{}] {}: {}\n", Local::now().to_rfc3339(), role, content);
        if let Err(err) = self.file.write_all(line.as_bytes()) {
            eprintln!("[Logging error] {}", err);
        }
    }
}

/// Get or create the logs directory (~/.banter/logs)
fn logs_dir() -> Result<PathBuf> {
    let home = std::env::var("HOME")
        .or_else(|_| std::env::var("USERPROFILE"))
        .context("failed to get home directory")?;

    let dir = PathBuf::from(home).join(".banter").join("logs");
    fs::create_dir_all(&dir).with_context(|| format!("failed to create {}", dir.display()))?;
    Ok(dir)
}

/// Dump an outgoing request body to stderr in debug mode.
pub fn log_request(url: &str, body: &str, debug: bool) {
    if !debug {
        return;
    }
    eprintln!("{}", format!("--- Making request to {}:", url).bright_black());
    eprintln!("{}", body.bright_black());
    eprintln!();
}
