mod board;
mod cli;
mod config;
mod filter;
mod models;
mod ui;

use anyhow::{Context, Result};
use clap::{CommandFactory, Parser};
use cli::{Cli, Commands, ConfigAction};
use board::TaskBoard;
use config::BoardConfig;
use filter::filter_tasks;
use std::fs::{self, OpenOptions};
use ui::run_tui;

fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = BoardConfig::load(cli.config.as_deref())?;

    let interactive = matches!(cli.command, None | Some(Commands::Tui));
    init_logging(&config, interactive)?;
    log::debug!("effective config: {:?}", config);

    let board = if config.seed {
        TaskBoard::seeded(config.default_priority)
    } else {
        TaskBoard::new(config.default_priority)
    };

    match cli.command {
        Some(Commands::List { filter, priority }) => {
            let tasks = board.tasks();
            let query = filter.unwrap_or_default();
            for i in filter_tasks(tasks, &query) {
                let task = &tasks[i];
                if priority.is_some_and(|p| p != task.priority) {
                    continue;
                }
                let mark = if task.completed { "x" } else { " " };
                let assignee = task
                    .assignee
                    .as_ref()
                    .map(|a| format!(" @{}", a.name))
                    .unwrap_or_default();
                println!("[{}] {} [{}]{}", mark, task.text, task.priority, assignee);
            }
        }
        Some(Commands::Summary) => {
            println!("{}", board.summary());
        }
        Some(Commands::Config { action }) => match action {
            ConfigAction::Show => {
                print!("{}", config.to_toml()?);
            }
            ConfigAction::Path => {
                let path = cli.config.unwrap_or_else(config::default_config_path);
                println!("{}", path.display());
            }
        },
        Some(Commands::Completions { shell }) => {
            let mut cmd = Cli::command();
            clap_complete::generate(shell, &mut cmd, "taskboard", &mut std::io::stdout());
        }
        Some(Commands::Tui) | None => {
            run_tui(board)?;
        }
    }

    Ok(())
}

/// The TUI owns the terminal, so interactive runs log to a file instead of stderr.
fn init_logging(config: &BoardConfig, interactive: bool) -> Result<()> {
    let env = env_logger::Env::default().default_filter_or(config.log_level.as_str());
    let mut builder = env_logger::Builder::from_env(env);

    if interactive {
        let path = config.log_file_path();
        if let Some(dir) = path.parent() {
            fs::create_dir_all(dir)
                .with_context(|| format!("Failed to create log directory {}", dir.display()))?;
        }
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&path)
            .with_context(|| format!("Failed to open log file {}", path.display()))?;
        builder.target(env_logger::Target::Pipe(Box::new(file)));
    }

    builder.init();
    Ok(())
}
