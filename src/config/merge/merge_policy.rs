//! Merge rules: built-in defaults underneath every other source.

use config::builder::DefaultState;
use config::Config;
use config::ConfigBuilder;
use config::ConfigError;

/// Create a Config builder with the built-in defaults applied.
pub fn builder_with_defaults() -> Result<ConfigBuilder<DefaultState>, ConfigError> {
    Config::builder()
        .set_default("discovery.follow_symlinks", false)?
        .set_default(
            "discovery.ignore_patterns",
            vec![".git", "target", "node_modules"],
        )?
        .set_default("map.default_processes", 1)?
        .set_default("logging.level", "info")?
        .set_default("logging.format", "text")?
        .set_default("logging.output", "stderr")
}
