//! CLI command definitions.
//!
//! This module defines the structure of all CLI subcommands.

use std::path::PathBuf;

use clap::{Args, Subcommand, ValueEnum};

/// Decode command arguments.
#[derive(Debug, Args)]
pub struct DecodeCommand {
    /// VINs to decode
    #[arg(required = true, value_name = "VIN")]
    pub vins: Vec<String>,

    /// Output format (defaults to the configured format)
    #[arg(short, long, value_enum)]
    pub format: Option<OutputFormat>,

    /// Also report whether position 9 matches the computed check digit
    #[arg(long)]
    pub check_digit: bool,
}

/// Validate command arguments.
#[derive(Debug, Args)]
pub struct ValidateCommand {
    /// VINs to validate
    #[arg(required = true, value_name = "VIN")]
    pub vins: Vec<String>,
}

/// Normalize command arguments.
#[derive(Debug, Args)]
pub struct NormalizeCommand {
    /// VINs to normalize
    #[arg(required = true, value_name = "VIN")]
    pub vins: Vec<String>,
}

/// Describe command arguments.
#[derive(Debug, Args)]
pub struct DescribeCommand {
    /// VINs to describe
    #[arg(required = true, value_name = "VIN")]
    pub vins: Vec<String>,
}

/// Batch command arguments.
#[derive(Debug, Args)]
pub struct BatchCommand {
    /// File with one VIN per line, or `-` for stdin
    #[arg(value_name = "FILE")]
    pub input: PathBuf,

    /// Output format (defaults to the configured format)
    #[arg(short, long, value_enum)]
    pub format: Option<OutputFormat>,

    /// Leave malformed VINs out of the output
    #[arg(long)]
    pub skip_invalid: bool,

    /// Also report whether position 9 matches the computed check digit
    #[arg(long)]
    pub check_digit: bool,
}

/// Fill command arguments.
#[derive(Debug, Args)]
pub struct FillCommand {
    /// Fleet JSON file (an array of truck records)
    #[arg(value_name = "FILE")]
    pub input: PathBuf,

    /// Write the filled fleet here instead of stdout
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// Write compact JSON
    #[arg(long)]
    pub compact: bool,

    /// Fill even if the same VIN appears on several trucks
    #[arg(long)]
    pub allow_duplicates: bool,
}

/// Search command arguments.
#[derive(Debug, Args)]
pub struct SearchCommand {
    /// Fleet JSON file (an array of truck records)
    #[arg(value_name = "FILE")]
    pub input: PathBuf,

    /// Matches model, VIN, engine number or unit number
    pub term: String,

    /// Output format (defaults to the configured format)
    #[arg(short, long, value_enum)]
    pub format: Option<OutputFormat>,
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

impl OutputFormat {
    /// Parse a configured format name, case-insensitively.
    #[must_use]
    pub fn from_config(name: &str) -> Option<Self> {
        <Self as ValueEnum>::from_str(name, true).ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_output_format_default() {
        assert_eq!(OutputFormat::default(), OutputFormat::Plain);
    }

    #[test]
    fn test_output_format_from_config() {
        assert_eq!(OutputFormat::from_config("plain"), Some(OutputFormat::Plain));
        assert_eq!(OutputFormat::from_config("TABLE"), Some(OutputFormat::Table));
        assert_eq!(OutputFormat::from_config("json"), Some(OutputFormat::Json));
        assert_eq!(OutputFormat::from_config("xml"), None);
    }

    #[test]
    fn test_decode_command_debug() {
        let cmd = DecodeCommand {
            vins: vec!["1XKDP4TX0KJ123456".to_string()],
            format: None,
            check_digit: true,
        };
        let debug_str = format!("{cmd:?}");
        assert!(debug_str.contains("1XKDP4TX0KJ123456"));
        assert!(debug_str.contains("check_digit"));
    }

    #[test]
    fn test_config_command_debug() {
        let cmd = ConfigCommand::Show { json: false };
        let debug_str = format!("{cmd:?}");
        assert!(debug_str.contains("Show"));
    }

    #[test]
    fn test_output_format_debug() {
        let format = OutputFormat::Json;
        let debug_str = format!("{format:?}");
        assert_eq!(debug_str, "Json");
    }
}
