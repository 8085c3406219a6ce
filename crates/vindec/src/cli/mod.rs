//! Command-line interface for vindec.
//!
//! This module provides the CLI structure and output rendering for the
//! `vindec` binary.

mod commands;
pub mod render;

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::logging::Verbosity;

pub use commands::{
    BatchCommand, ConfigCommand, DecodeCommand, DescribeCommand, FillCommand, NormalizeCommand,
    OutputFormat, SearchCommand, ValidateCommand,
};

/// vindec - Decode heavy-truck VINs
///
/// Decodes Vehicle Identification Numbers into manufacturer, model, model
/// year and country of manufacture, and fills empty fields in fleet records.
#[derive(Debug, Parser)]
#[command(name = "vindec")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Path to custom configuration file
    #[arg(short, long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Increase verbosity (-v for debug, -vv for trace)
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
    /// Decode one or more VINs
    Decode(DecodeCommand),

    /// Check VIN format; exits non-zero if any is malformed
    Validate(ValidateCommand),

    /// Uppercase VINs and strip disallowed characters
    Normalize(NormalizeCommand),

    /// Print a one-line summary per VIN
    Describe(DescribeCommand),

    /// Decode VINs read from a file or stdin
    Batch(BatchCommand),

    /// Fill empty manufacturer, model and year fields in a fleet file
    Fill(FillCommand),

    /// Search trucks in a fleet file
    Search(SearchCommand),

    /// View or validate configuration
    #[command(subcommand)]
    Config(ConfigCommand),
}

impl Cli {
    /// Get the verbosity level based on flags.
    #[must_use]
    pub fn verbosity(&self) -> Verbosity {
        Verbosity::from_flags(self.verbose, self.quiet)
    }
}
