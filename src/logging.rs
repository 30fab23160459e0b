//! Logging System
//!
//! Structured logging with `tracing`. Level, format and destination come from
//! [`LoggingConfig`] and may be overridden by `ARBOR_LOG`, `ARBOR_LOG_FORMAT`,
//! `ARBOR_LOG_OUTPUT` and `ARBOR_LOG_MODULES`.

use crate::error::TreantError;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::PathBuf;
use tracing_subscriber::fmt::time::ChronoUtc;
use tracing_subscriber::fmt::writer::BoxMakeWriter;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Registry};

/// Logging configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level: trace, debug, info, warn, error, off
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Output format: json, text (default: text)
    #[serde(default = "default_format")]
    pub format: String,

    /// Output destination: stdout, stderr, file (default: stderr)
    #[serde(default = "default_output")]
    pub output: String,

    /// Log file path when output is "file"
    #[serde(default = "default_log_file")]
    pub file: PathBuf,

    /// Colored output (text format on a terminal only)
    #[serde(default = "default_true")]
    pub color: bool,

    /// Module-specific log levels
    #[serde(default)]
    pub modules: HashMap<String, String>,
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_format() -> String {
    "text".to_string()
}

fn default_output() -> String {
    "stderr".to_string()
}

fn default_log_file() -> PathBuf {
    PathBuf::from(".arbor/arbor.log")
}

fn default_true() -> bool {
    true
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_format(),
            output: default_output(),
            file: default_log_file(),
            color: default_true(),
            modules: HashMap::new(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Format {
    Text,
    Json,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Output {
    Stdout,
    Stderr,
    File,
}

/// Initialize the global subscriber.
///
/// Priority order (highest to lowest): `ARBOR_LOG*` environment variables,
/// the given config, defaults.
pub fn init_logging(config: Option<&LoggingConfig>) -> Result<(), TreantError> {
    let defaults = LoggingConfig::default();
    let config = config.unwrap_or(&defaults);

    let filter = build_env_filter(config)?;
    let format = determine_format(config)?;
    let output = determine_output(config)?;

    let writer = match output {
        Output::Stdout => BoxMakeWriter::new(std::io::stdout),
        Output::Stderr => BoxMakeWriter::new(std::io::stderr),
        Output::File => BoxMakeWriter::new(open_log_file(config)?),
    };
    let ansi = config.color && format == Format::Text && output != Output::File;

    let layer = fmt::layer()
        .with_target(true)
        .with_timer(ChronoUtc::rfc_3339())
        .with_writer(writer);

    let result = match format {
        Format::Json => Registry::default().with(filter).with(layer.json()).try_init(),
        Format::Text => Registry::default()
            .with(filter)
            .with(layer.with_ansi(ansi))
            .try_init(),
    };
    result.map_err(|e| TreantError::Config(format!("Failed to install logger: {}", e)))
}

fn open_log_file(config: &LoggingConfig) -> Result<std::fs::File, TreantError> {
    if let Some(parent) = config.file.parent() {
        std::fs::create_dir_all(parent)
            .map_err(|e| TreantError::Config(format!("Failed to create log directory: {}", e)))?;
    }
    std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(&config.file)
        .map_err(|e| {
            TreantError::Config(format!("Failed to open log file {:?}: {}", config.file, e))
        })
}

/// Build the filter from `ARBOR_LOG`, else from level and module directives
fn build_env_filter(config: &LoggingConfig) -> Result<EnvFilter, TreantError> {
    if let Ok(filter) = EnvFilter::try_from_env("ARBOR_LOG") {
        return Ok(filter);
    }

    if config.level == "off" {
        return Ok(EnvFilter::new("off"));
    }

    let mut directives: Vec<String> = config
        .modules
        .iter()
        .map(|(module, level)| format!("{}={}", module, level))
        .collect();

    if let Ok(modules) = std::env::var("ARBOR_LOG_MODULES") {
        directives.extend(parse_module_directives(&modules));
    }

    let mut filter = EnvFilter::new(&config.level);
    for directive in directives {
        filter = filter.add_directive(
            directive
                .parse()
                .map_err(|e| TreantError::Config(format!("Invalid log directive: {}", e)))?,
        );
    }
    Ok(filter)
}

/// `mod=level,mod=level` into directives; malformed entries are skipped.
fn parse_module_directives(directives: &str) -> Vec<String> {
    directives
        .split(',')
        .filter_map(|entry| {
            let (module, level) = entry.split_once('=')?;
            let (module, level) = (module.trim(), level.trim());
            (!module.is_empty() && !level.is_empty()).then(|| format!("{}={}", module, level))
        })
        .collect()
}

fn determine_format(config: &LoggingConfig) -> Result<Format, TreantError> {
    let format = std::env::var("ARBOR_LOG_FORMAT").unwrap_or_else(|_| config.format.clone());
    parse_format(&format)
}

fn parse_format(format: &str) -> Result<Format, TreantError> {
    match format {
        "text" => Ok(Format::Text),
        "json" => Ok(Format::Json),
        other => Err(TreantError::Config(format!(
            "Invalid log format: {} (must be 'json' or 'text')",
            other
        ))),
    }
}

fn determine_output(config: &LoggingConfig) -> Result<Output, TreantError> {
    let output = std::env::var("ARBOR_LOG_OUTPUT").unwrap_or_else(|_| config.output.clone());
    parse_output(&output)
}

fn parse_output(output: &str) -> Result<Output, TreantError> {
    match output {
        "stdout" => Ok(Output::Stdout),
        "stderr" => Ok(Output::Stderr),
        "file" => Ok(Output::File),
        other => Err(TreantError::Config(format!(
            "Invalid log output: {} (must be 'stdout', 'stderr' or 'file')",
            other
        ))),
    }
}
