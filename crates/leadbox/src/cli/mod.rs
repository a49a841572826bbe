//! Command-line interface for leadbox.
//!
//! This module provides the CLI structure for the `leadbox` binary. The
//! `submit` command plays the part of the lead form; the remaining commands
//! make up the admin console.

mod commands;

use std::path::PathBuf;

use clap::{Parser, Subcommand};

pub use commands::{
    ClearCommand, ConfigCommand, DeleteCommand, ExportCommand, ListCommand, OutputFormat,
    StatsCommand, SubmitCommand,
};

/// leadbox - Collect course applications and manage them locally
///
/// Stores submitted leads in a local database, lists them, and exports
/// them to CSV for spreadsheets.
#[derive(Debug, Parser)]
#[command(name = "leadbox")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Path to custom configuration file
    #[arg(short, long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Increase verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress all output except errors
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// The command to execute
    #[command(subcommand)]
    pub command: Command,
}

/// Available commands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Submit a new application
    Submit(SubmitCommand),

    /// List stored applications
    List(ListCommand),

    /// Delete one application by id
    Delete(DeleteCommand),

    /// Delete all applications
    Clear(ClearCommand),

    /// Export applications to a CSV file
    Export(ExportCommand),

    /// Show application counters
    Stats(StatsCommand),

    /// View or validate configuration
    #[command(subcommand)]
    Config(ConfigCommand),
}

impl Cli {
    /// Get the verbosity level based on flags.
    #[must_use]
    pub fn verbosity(&self) -> crate::logging::Verbosity {
        if self.quiet {
            crate::logging::Verbosity::Quiet
        } else {
            match self.verbose {
                0 => crate::logging::Verbosity::Normal,
                1 => crate::logging::Verbosity::Info,
                2 => crate::logging::Verbosity::Verbose,
                _ => crate::logging::Verbosity::Trace,
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lead::LeadId;
    use crate::logging::Verbosity;
    use clap::CommandFactory;

    fn cli_with(verbose: u8, quiet: bool) -> Cli {
        Cli {
            config: None,
            verbose,
            quiet,
            command: Command::Stats(StatsCommand { json: false }),
        }
    }

    #[test]
    fn test_cli_name() {
        assert_eq!(Cli::command().get_name(), "leadbox");
    }

    #[test]
    fn test_cli_verify() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_verbosity_levels() {
        assert_eq!(cli_with(0, true).verbosity(), Verbosity::Quiet);
        assert_eq!(cli_with(3, true).verbosity(), Verbosity::Quiet);
        assert_eq!(cli_with(0, false).verbosity(), Verbosity::Normal);
        assert_eq!(cli_with(1, false).verbosity(), Verbosity::Info);
        assert_eq!(cli_with(2, false).verbosity(), Verbosity::Verbose);
        assert_eq!(cli_with(5, false).verbosity(), Verbosity::Trace);
    }

    #[test]
    fn test_parse_submit() {
        let args = [
            "leadbox",
            "submit",
            "--full-name",
            "Иван Иванов",
            "-t",
            "@ivan",
            "-e",
            "ivan@example.com",
        ];
        let cli = Cli::try_parse_from(args).unwrap();
        let Command::Submit(cmd) = cli.command else {
            panic!("expected submit");
        };
        assert_eq!(cmd.full_name, "Иван Иванов");
        assert_eq!(cmd.telegram, "@ivan");
        assert!(cmd.message.is_empty());
    }

    #[test]
    fn test_parse_submit_requires_email() {
        let args = ["leadbox", "submit", "--full-name", "A", "-t", "@a"];
        assert!(Cli::try_parse_from(args).is_err());
    }

    #[test]
    fn test_parse_list_default_format() {
        let cli = Cli::try_parse_from(["leadbox", "list"]).unwrap();
        assert!(matches!(
            cli.command,
            Command::List(ListCommand {
                format: OutputFormat::Table
            })
        ));
    }

    #[test]
    fn test_parse_list_json() {
        let cli = Cli::try_parse_from(["leadbox", "list", "-f", "json"]).unwrap();
        assert!(matches!(
            cli.command,
            Command::List(ListCommand {
                format: OutputFormat::Json
            })
        ));
    }

    #[test]
    fn test_parse_delete() {
        let cli = Cli::try_parse_from(["leadbox", "delete", "1705314600000"]).unwrap();
        let Command::Delete(cmd) = cli.command else {
            panic!("expected delete");
        };
        assert_eq!(cmd.id, LeadId(1_705_314_600_000));
    }

    #[test]
    fn test_parse_delete_rejects_non_numeric_id() {
        assert!(Cli::try_parse_from(["leadbox", "delete", "abc"]).is_err());
    }

    #[test]
    fn test_parse_clear_yes() {
        let cli = Cli::try_parse_from(["leadbox", "clear", "--yes"]).unwrap();
        assert!(matches!(cli.command, Command::Clear(ClearCommand { yes: true })));
    }

    #[test]
    fn test_parse_export_output() {
        let cli = Cli::try_parse_from(["leadbox", "export", "-o", "/tmp/out"]).unwrap();
        let Command::Export(cmd) = cli.command else {
            panic!("expected export");
        };
        assert_eq!(cmd.output, Some(PathBuf::from("/tmp/out")));
    }

    #[test]
    fn test_parse_with_config() {
        let args = ["leadbox", "-c", "/custom/config.toml", "stats"];
        let cli = Cli::try_parse_from(args).unwrap();
        assert_eq!(cli.config, Some(PathBuf::from("/custom/config.toml")));
    }

    #[test]
    fn test_parse_with_quiet() {
        let cli = Cli::try_parse_from(["leadbox", "-q", "list"]).unwrap();
        assert!(cli.quiet);
    }
}
