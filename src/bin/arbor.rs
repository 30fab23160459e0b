//! arbor CLI Binary
//!
//! Command-line interface for creating, tagging, categorizing and grouping Treants.

use anyhow::Context;
use arbor::cli::{command_name, map_error, Cli, RunContext};
use arbor::config::ConfigLoader;
use arbor::logging::{init_logging, LoggingConfig};
use arbor::TreantError;
use clap::Parser;
use std::path::Path;
use std::process;
use tracing::{error, info};

fn main() {
    let cli = Cli::parse();

    let logging_config = build_logging_config(&cli);
    if let Err(e) = init_logging(Some(&logging_config)) {
        eprintln!("Failed to initialize logging: {}", e);
        process::exit(1);
    }

    match run(&cli) {
        Ok(output) => {
            info!(command = %command_name(&cli.command), "Command completed successfully");
            println!("{}", output);
        }
        Err(e) => {
            error!(command = %command_name(&cli.command), "Command failed: {:#}", e);
            match e.downcast_ref::<TreantError>() {
                Some(treant_error) => eprintln!("{}", map_error(treant_error)),
                None => eprintln!("error: {:#}", e),
            }
            process::exit(1);
        }
    }
}

fn run(cli: &Cli) -> anyhow::Result<String> {
    let context = RunContext::new(cli.root.clone(), cli.config.clone())
        .context("Failed to open workspace")?;
    info!(root = %context.workspace().root().display(), "Workspace ready");

    Ok(context.execute(&cli.command)?)
}

/// Build logging configuration from CLI args, environment, and config file
fn build_logging_config(cli: &Cli) -> LoggingConfig {
    if !cli.verbose && cli.log_level.is_none() {
        return LoggingConfig {
            level: "off".to_string(),
            ..LoggingConfig::default()
        };
    }

    let loaded = match (&cli.config, &cli.root) {
        (Some(path), _) => ConfigLoader::load_from_file(path),
        (None, Some(root)) => ConfigLoader::load(root),
        (None, None) => ConfigLoader::load(Path::new(".")),
    };
    let mut config = loaded.map(|c| c.logging).unwrap_or_default();

    // CLI arguments take precedence over files
    if let Some(ref level) = cli.log_level {
        config.level = level.clone();
    }
    if let Some(ref format) = cli.log_format {
        config.format = format.clone();
    }
    if let Some(ref output) = cli.log_output {
        config.output = output.clone();
    }
    config
}
