//! `vindec` - CLI for the VIN decoder
//!
//! This binary decodes VINs given on the command line or in files, and fills
//! empty fields in fleet JSON files from decoded VINs.

#![warn(missing_debug_implementations)]
#![deny(unsafe_code)]

use std::io::Read;
use std::path::Path;
use std::process::ExitCode;

use anyhow::{bail, Context};
use clap::Parser;
use tracing::{debug, info, warn};

use vindec::cli::render::{batch_lines, render_records, render_trucks, DecodeRecord};
use vindec::cli::{
    BatchCommand, Cli, Command, ConfigCommand, DecodeCommand, FillCommand, OutputFormat,
    SearchCommand,
};
use vindec::{decode, describe, init_logging, is_valid_format, normalize, Config, Fleet};

fn main() -> anyhow::Result<ExitCode> {
    let cli = Cli::parse();

    init_logging(cli.verbosity());

    let config = Config::load_from(cli.config.clone()).context("loading configuration")?;

    match cli.command {
        Command::Decode(cmd) => handle_decode(&config, &cmd),
        Command::Validate(cmd) => Ok(handle_validate(&cmd.vins)),
        Command::Normalize(cmd) => {
            for vin in &cmd.vins {
                println!("{}", normalize(vin));
            }
            Ok(ExitCode::SUCCESS)
        }
        Command::Describe(cmd) => {
            for vin in &cmd.vins {
                println!("{}", describe(&decode(vin)));
            }
            Ok(ExitCode::SUCCESS)
        }
        Command::Batch(cmd) => handle_batch(&config, &cmd),
        Command::Fill(cmd) => handle_fill(&config, &cmd),
        Command::Search(cmd) => handle_search(&config, &cmd),
        Command::Config(cmd) => handle_config(&config, cmd),
    }
}

/// The CLI flag wins, then the configured format.
fn output_format(config: &Config, flag: Option<OutputFormat>) -> OutputFormat {
    flag.or_else(|| OutputFormat::from_config(&config.output.format))
        .unwrap_or_default()
}

fn handle_decode(config: &Config, cmd: &DecodeCommand) -> anyhow::Result<ExitCode> {
    let check_digit = cmd.check_digit || config.decode.report_check_digit;
    let records: Vec<DecodeRecord> = cmd
        .vins
        .iter()
        .map(|vin| DecodeRecord::new(vin, check_digit))
        .collect();

    print!(
        "{}",
        render_records(&records, output_format(config, cmd.format))?
    );
    Ok(ExitCode::SUCCESS)
}

fn handle_validate(vins: &[String]) -> ExitCode {
    let mut all_valid = true;
    for vin in vins {
        let valid = is_valid_format(vin);
        all_valid &= valid;
        println!("{vin}: {}", if valid { "valid" } else { "invalid" });
    }

    if all_valid {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    }
}

fn read_input(path: &Path) -> anyhow::Result<String> {
    if path == Path::new("-") {
        let mut text = String::new();
        std::io::stdin()
            .read_to_string(&mut text)
            .context("reading VINs from stdin")?;
        Ok(text)
    } else {
        std::fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))
    }
}

fn handle_batch(config: &Config, cmd: &BatchCommand) -> anyhow::Result<ExitCode> {
    let text = read_input(&cmd.input)?;
    let check_digit = cmd.check_digit || config.decode.report_check_digit;
    let skip_invalid = cmd.skip_invalid || config.batch.skip_invalid;

    let lines = batch_lines(&text);
    let total = lines.len();
    let records: Vec<DecodeRecord> = lines
        .into_iter()
        .map(|vin| DecodeRecord::new(vin, check_digit))
        .filter(|record| !skip_invalid || record.decoded.is_valid)
        .collect();

    if records.len() < total {
        info!("Skipped {} malformed VINs", total - records.len());
    }
    debug!("Decoded {} of {} VINs", records.len(), total);

    print!(
        "{}",
        render_records(&records, output_format(config, cmd.format))?
    );
    Ok(ExitCode::SUCCESS)
}

fn handle_fill(config: &Config, cmd: &FillCommand) -> anyhow::Result<ExitCode> {
    let mut fleet = Fleet::load(&cmd.input)?;

    let duplicates = fleet.duplicate_vins();
    if !duplicates.is_empty() {
        if config.fill.reject_duplicates && !cmd.allow_duplicates {
            fleet.ensure_unique_vins()?;
        }
        warn!(vins = ?duplicates, "Fleet lists the same VIN more than once");
    }

    let report = fleet.autofill();
    info!(
        "Filled {} of {} trucks ({} with malformed VINs)",
        report.updated(),
        report.entries.len(),
        report.invalid()
    );
    for entry in report.entries.iter().filter(|e| !e.filled.is_empty()) {
        let fields: Vec<String> = entry.filled.iter().map(ToString::to_string).collect();
        debug!("{}: filled {}", entry.vin, fields.join(", "));
    }

    let pretty = config.fill.pretty && !cmd.compact;
    match &cmd.output {
        Some(path) => fleet.save(path, pretty)?,
        None => println!("{}", fleet.to_json(pretty)?),
    }
    Ok(ExitCode::SUCCESS)
}

fn handle_search(config: &Config, cmd: &SearchCommand) -> anyhow::Result<ExitCode> {
    let fleet = Fleet::load(&cmd.input)?;
    let matches: Vec<_> = fleet.search(&cmd.term).collect();
    if matches.is_empty() {
        warn!(term = %cmd.term, "No trucks matched");
    }

    print!(
        "{}",
        render_trucks(&matches, output_format(config, cmd.format))?
    );
    Ok(ExitCode::SUCCESS)
}

fn handle_config(config: &Config, cmd: ConfigCommand) -> anyhow::Result<ExitCode> {
    match cmd {
        ConfigCommand::Show { json } => {
            if json {
                println!("{}", serde_json::to_string_pretty(config)?);
            } else {
                println!("Current Configuration");
                println!("=====================");
                println!();
                println!("[Output]");
                println!("  Format:             {}", config.output.format);
                println!();
                println!("[Decode]");
                println!(
                    "  Report check digit: {}",
                    config.decode.report_check_digit
                );
                println!();
                println!("[Batch]");
                println!("  Skip invalid:       {}", config.batch.skip_invalid);
                println!();
                println!("[Fill]");
                println!("  Pretty JSON:        {}", config.fill.pretty);
                println!("  Reject duplicates:  {}", config.fill.reject_duplicates);
            }
        }
        ConfigCommand::Path => {
            println!("{}", Config::default_config_path().display());
        }
        ConfigCommand::Validate { file } => {
            let path = file.unwrap_or_else(Config::default_config_path);
            println!("Validating configuration: {}", path.display());
            if let Err(e) = Config::load_from(Some(path)) {
                bail!("configuration error: {e}");
            }
            println!("Configuration is valid.");
        }
    }
    Ok(ExitCode::SUCCESS)
}
