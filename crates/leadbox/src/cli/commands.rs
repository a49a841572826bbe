//! CLI command definitions.
//!
//! This module defines the structure of all CLI subcommands.

use std::path::PathBuf;

use clap::{Args, Subcommand, ValueEnum};

use crate::lead::{LeadForm, LeadId};

/// Submit command arguments.
#[derive(Debug, Args)]
pub struct SubmitCommand {
    /// Full name of the applicant
    #[arg(long)]
    pub full_name: String,

    /// Telegram handle (with or without @)
    #[arg(short, long)]
    pub telegram: String,

    /// Email address
    #[arg(short, long)]
    pub email: String,

    /// Optional comment
    #[arg(short, long, default_value = "")]
    pub message: String,
}

impl From<SubmitCommand> for LeadForm {
    fn from(cmd: SubmitCommand) -> Self {
        LeadForm::new(cmd.full_name, cmd.telegram, cmd.email).with_message(cmd.message)
    }
}

/// List command arguments.
#[derive(Debug, Args)]
pub struct ListCommand {
    /// Output format
    #[arg(short, long, value_enum, default_value = "table")]
    pub format: OutputFormat,
}

/// Delete command arguments.
#[derive(Debug, Args)]
pub struct DeleteCommand {
    /// Id of the lead to delete
    pub id: LeadId,
}

/// Clear command arguments.
#[derive(Debug, Args)]
pub struct ClearCommand {
    /// Skip confirmation prompt
    #[arg(short, long)]
    pub yes: bool,
}

/// Export command arguments.
#[derive(Debug, Args)]
pub struct ExportCommand {
    /// Directory to write the CSV file into
    #[arg(short, long, value_name = "DIR")]
    pub output: Option<PathBuf>,
}

/// Stats command arguments.
#[derive(Debug, Args)]
pub struct StatsCommand {
    /// Output as JSON
    #[arg(short, long)]
    pub json: bool,
}

/// Configuration commands.
#[derive(Debug, Subcommand)]
pub enum ConfigCommand {
    /// Show current configuration
    Show {
        /// Output as JSON
        #[arg(short, long)]
        json: bool,
    },

    /// Show the configuration file path
    Path,

    /// Validate configuration
    Validate {
        /// Path to configuration file to validate
        #[arg(short, long)]
        file: Option<PathBuf>,
    },
}

/// Output format for commands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    /// Plain text output
    #[default]
    Plain,
    /// Formatted table
    Table,
    /// JSON output
    Json,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_submit_command_into_form() {
        let cmd = SubmitCommand {
            full_name: "Иван Иванов".to_string(),
            telegram: "@ivan".to_string(),
            email: "ivan@example.com".to_string(),
            message: String::new(),
        };
        let form = LeadForm::from(cmd);
        assert_eq!(
            form,
            LeadForm::new("Иван Иванов", "@ivan", "ivan@example.com")
        );
    }

    #[test]
    fn test_output_format_default() {
        assert_eq!(OutputFormat::default(), OutputFormat::Plain);
    }

    #[test]
    fn test_config_command_debug() {
        let cmd = ConfigCommand::Show { json: false };
        let debug_str = format!("{cmd:?}");
        assert!(debug_str.contains("Show"));
    }

    #[test]
    fn test_delete_command_debug() {
        let cmd = DeleteCommand {
            id: LeadId(1_705_314_600_000),
        };
        assert!(format!("{cmd:?}").contains("1705314600000"));
    }
}
