use clap::{Parser, Subcommand};
use clap_complete::Shell;
use std::path::PathBuf;

use crate::models::Priority;

#[derive(Parser)]
#[command(author, version, about = "Terminal task board", long_about = None)]
pub struct Cli {
    /// Use this config file instead of the default location
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Launch the interactive board
    Tui,
    /// Print the starting tasks
    List {
        /// Only show tasks fuzzy-matching this text
        #[arg(short, long)]
        filter: Option<String>,
        /// Only show tasks with this priority
        #[arg(short, long, value_enum)]
        priority: Option<Priority>,
    },
    /// Print completed/total for the starting tasks
    Summary,
    /// Inspect configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
    /// Generate shell completions
    Completions {
        #[arg(value_name = "SHELL", value_enum)]
        shell: Shell,
    },
}

#[derive(Subcommand)]
pub enum ConfigAction {
    /// Print the effective configuration as TOML
    Show,
    /// Print the config file location
    Path,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_subcommand_defaults_to_none() {
        let cli = Cli::try_parse_from(["taskboard"]).unwrap();
        assert!(cli.command.is_none());
        assert!(cli.config.is_none());
    }

    #[test]
    fn test_list_flags() {
        let cli = Cli::try_parse_from(["taskboard", "list", "-f", "img", "--priority", "high"])
            .unwrap();
        match cli.command {
            Some(Commands::List { filter, priority }) => {
                assert_eq!(filter.as_deref(), Some("img"));
                assert_eq!(priority, Some(Priority::High));
            }
            _ => panic!("expected list"),
        }
    }

    #[test]
    fn test_global_config_flag() {
        let cli =
            Cli::try_parse_from(["taskboard", "config", "show", "--config", "/tmp/c.toml"]).unwrap();
        assert_eq!(cli.config, Some(PathBuf::from("/tmp/c.toml")));
        assert!(matches!(
            cli.command,
            Some(Commands::Config { action: ConfigAction::Show })
        ));
    }

    #[test]
    fn test_completions_shell() {
        let cli = Cli::try_parse_from(["taskboard", "completions", "zsh"]).unwrap();
        assert!(matches!(
            cli.command,
            Some(Commands::Completions { shell: Shell::Zsh })
        ));
        assert!(Cli::try_parse_from(["taskboard", "completions", "tcsh"]).is_err());
    }

    #[test]
    fn test_rejects_unknown_priority() {
        assert!(Cli::try_parse_from(["taskboard", "list", "-p", "urgent"]).is_err());
    }
}
