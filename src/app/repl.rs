use anyhow::Result;
use colored::Colorize;
use rustyline::error::ReadlineError;
use rustyline::DefaultEditor;
use std::io::{self, BufRead, Write};

use crate::commands::{self, Command, SENTINEL};
use crate::logging::TranscriptLogger;
use crate::session::{ChatSession, RetryPrompt};

/// Blocking y/N question on the terminal, offered after a failed request.
pub struct ConsoleRetryPrompt;

impl RetryPrompt for ConsoleRetryPrompt {
    fn should_retry(&mut self, _detail: &str) -> bool {
        eprint!("{} ", "Retry the request? [y/N]:".bright_yellow());
        let _ = io::stderr().flush();

        let mut answer = String::new();
        if io::stdin().lock().read_line(&mut answer).is_err() {
            return false;
        }
        matches!(answer.trim().to_ascii_lowercase().as_str(), "y" | "yes")
    }
}

/// Run the interactive conversation loop.
pub async fn run(mut session: ChatSession, mut logger: Option<TranscriptLogger>) -> Result<()> {
    println!("{}", "banter".bright_cyan().bold());
    println!(
        "{}",
        format!(
            "Talking as {} with {}",
            session.params().persona_name, session.params().user_name
        )
        .bright_black()
    );
    println!(
        "{}",
        format!(
            "Type {s}exit to quit, {s}max or {s}temp to adjust parameters, {s}reset to start over; end a line with \\ to continue it\n",
            s = SENTINEL
        )
        .bright_black()
    );

    if let Some(logger) = &mut logger {
        if let Some(system) = session.history().first() {
            logger.log("system", &system.content);
        }
    }

    let mut rl = DefaultEditor::new()?;

    loop {
        let readline = rl.readline(&format!("{} ", "You:".bright_green().bold()));

        match readline {
            Ok(line) => {
                let input = match gather_continuations(&mut rl, line) {
                    Some(input) => input,
                    None => break,
                };
                let input = input.trim();

                if input.is_empty() {
                    continue;
                }

                rl.add_history_entry(input)?;

                if input.starts_with(SENTINEL) {
                    match commands::parse(input) {
                        Ok(Command::Exit) => {
                            println!("{}", "Goodbye!".bright_cyan());
                            break;
                        }
                        Ok(command) => {
                            println!("{}", session.apply_command(&command).bright_black())
                        }
                        Err(err) => {
                            eprintln!("{} {}", "Command error:".bright_red().bold(), err)
                        }
                    }
                    continue;
                }

                if let Some(logger) = &mut logger {
                    logger.log("user", input);
                }

                match session.post(input).await {
                    Ok(reply) => {
                        if let Some(logger) = &mut logger {
                            logger.log("assistant", &reply);
                        }
                        let name = format!("{}:", session.params().persona_name);
                        println!("\n{} {}\n", name.bright_blue().bold(), reply);
                    }
                    Err(err) => {
                        eprintln!("{} {}\n", "Error:".bright_red().bold(), err);
                    }
                }
            }
            Err(ReadlineError::Interrupted) => {
                println!("{}", "^C".bright_black());
                continue;
            }
            Err(ReadlineError::Eof) => {
                println!("{}", "Goodbye!".bright_cyan());
                break;
            }
            Err(err) => {
                eprintln!("{} {}", "Error:".bright_red().bold(), err);
                break;
            }
        }
    }

    Ok(())
}

/// A line ending in `\` continues onto the next one; the backslash becomes
/// a newline in the message. Returns None on EOF mid-continuation.
fn gather_continuations(rl: &mut DefaultEditor, first: String) -> Option<String> {
    let mut input = first.trim_end().to_string();

    while let Some(stripped) = input.strip_suffix('\\') {
        input = format!("{}\n", stripped);
        match rl.readline(&format!("{} ", "...".bright_black())) {
            Ok(more) => input.push_str(more.trim_end()),
            Err(ReadlineError::Interrupted) => return Some(String::new()),
            Err(_) => return None,
        }
    }

    Some(input)
}
