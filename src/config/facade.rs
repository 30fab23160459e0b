//! Loading entry points over the layered sources.

use super::merge::merge_policy;
use super::sources::{environment, global_file, workspace_file};
use super::ArborConfig;
use config::File;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Configuration loader
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load configuration for a workspace.
    ///
    /// Precedence, lowest first: defaults, global file, workspace file,
    /// `ARBOR__*` environment variables.
    pub fn load(workspace_root: &Path) -> Result<ArborConfig, config::ConfigError> {
        let builder = merge_policy::builder_with_defaults()?;
        let builder = global_file::add_to_builder(builder)?;
        let builder = workspace_file::add_to_builder(builder, workspace_root)?;
        let builder = environment::add_to_builder(builder);

        let config: ArborConfig = builder.build()?.try_deserialize()?;
        debug!(workspace_root = %workspace_root.display(), "Loaded configuration");
        Ok(config)
    }

    /// Load one explicit file over the defaults.
    pub fn load_from_file(path: &Path) -> Result<ArborConfig, config::ConfigError> {
        merge_policy::builder_with_defaults()?
            .add_source(File::from(path.to_path_buf()))
            .build()?
            .try_deserialize()
    }

    /// Global config path (`$XDG_CONFIG_HOME/arbor/config.toml` or
    /// `~/.config/arbor/config.toml`); `None` without a home directory.
    pub fn xdg_config_path() -> Option<PathBuf> {
        global_file::global_config_path()
    }
}
