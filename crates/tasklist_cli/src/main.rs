//! Terminal front-end for the task list.
//!
//! # Responsibility
//! - Compose config, logging, store session and controller at startup.
//! - Translate typed gestures into controller intents and redraw the list.
//!
//! # Invariants
//! - Store failures are logged and never stop the loop.

use anyhow::{Context, Result};
use clap::Parser;
use log::{info, warn};
use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use tasklist_core::config::home_dir;
use tasklist_core::view::command::{parse_command, parse_prompt_answer, Command, PromptAnswer};
use tasklist_core::view::render::{
    describe_row_change, render_prompt, render_rows, EDIT_TASK_TITLE, HELP_TEXT, NEW_TASK_TITLE,
};
use tasklist_core::{
    core_version, init_logging, AppConfig, DispatchOutcome, StoreSession, StoreTarget,
    TaskIntent, TaskListController,
};

/// Single-screen task list.
#[derive(Parser, Debug)]
#[command(name = "tasklist", version, about = "Single-screen task list")]
struct Cli {
    /// Path to the SQLite task database.
    #[arg(long)]
    db_path: Option<PathBuf>,

    /// Directory for rolling log files.
    #[arg(long)]
    log_dir: Option<PathBuf>,

    /// trace|debug|info|warn|error
    #[arg(long)]
    log_level: Option<String>,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = AppConfig::resolve(cli.db_path, cli.log_dir, cli.log_level, &home_dir());

    init_logging(&config.log_level, &config.log_dir).with_context(|| {
        format!(
            "failed to initialize logging in {}",
            config.log_dir.display()
        )
    })?;
    info!(
        "event=cli_start module=cli status=ok core_version={} db_path={}",
        core_version(),
        config.db_path.display()
    );

    let session = StoreSession::new(StoreTarget::File(config.db_path.clone()));
    let mut controller = TaskListController::load(session);

    let stdin = io::stdin();
    let mut input = stdin.lock();
    let mut out = io::stdout().lock();

    write!(out, "{}", render_rows(&controller.titles()))?;
    loop {
        write!(out, "tasks> ")?;
        out.flush()?;
        let Some(line) = read_line(&mut input)? else {
            break;
        };

        let command = match parse_command(&line) {
            Ok(command) => command,
            Err(err) => {
                writeln!(out, "{err}")?;
                continue;
            }
        };

        let intent = match command {
            Command::Quit => break,
            Command::Help => {
                writeln!(out, "{HELP_TEXT}")?;
                continue;
            }
            Command::List => {
                write!(out, "{}", render_rows(&controller.titles()))?;
                continue;
            }
            Command::Add => {
                write!(out, "{}", render_prompt(NEW_TASK_TITLE, None))?;
                out.flush()?;
                match ask(&mut input)? {
                    Some(text) => TaskIntent::Add(text),
                    None => continue,
                }
            }
            Command::Edit(index) => {
                let Some(current) = controller.title_at(index) else {
                    writeln!(out, "no row {}", index + 1)?;
                    continue;
                };
                write!(out, "{}", render_prompt(EDIT_TASK_TITLE, Some(current)))?;
                out.flush()?;
                match ask(&mut input)? {
                    Some(text) => TaskIntent::Edit(index, text),
                    None => continue,
                }
            }
            Command::Delete(index) => TaskIntent::Delete(index),
        };

        match controller.dispatch(intent) {
            Ok(DispatchOutcome::Applied(change)) => {
                writeln!(out, "{}", describe_row_change(change))?;
            }
            Ok(DispatchOutcome::Ignored) | Ok(DispatchOutcome::RolledBack(_)) => {}
            Err(err) => {
                warn!("event=cli_dispatch module=cli status=error error={err}");
                writeln!(out, "{err}")?;
            }
        }
        write!(out, "{}", render_rows(&controller.titles()))?;
    }

    info!("event=cli_exit module=cli status=ok");
    Ok(())
}

/// Reads one line; `None` at end of input.
fn read_line(input: &mut impl BufRead) -> Result<Option<String>> {
    let mut line = String::new();
    let read = input
        .read_line(&mut line)
        .context("failed to read from stdin")?;
    if read == 0 {
        return Ok(None);
    }
    Ok(Some(line))
}

/// Runs the Save/Cancel prompt; `None` means Cancel or end of input.
fn ask(input: &mut impl BufRead) -> Result<Option<String>> {
    Ok(match read_line(input)? {
        Some(line) => match parse_prompt_answer(&line) {
            PromptAnswer::Save(text) => Some(text),
            PromptAnswer::Cancel => None,
        },
        None => None,
    })
}
