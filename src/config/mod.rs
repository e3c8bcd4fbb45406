//! Client configuration for the admin CLI.
//!
//! Settings are resolved once per process from four layers, lowest
//! precedence first: built-in defaults, a TOML config file, `IMMUADMIN_*`
//! environment variables and command-line flags.

mod error;
mod loading;
mod paths;
mod settings;


use std::path::{Path, PathBuf};

use tracing::debug;

pub use error::{ConfigError, Result};
pub use loading::{Environment, LoadedConfig, env_prefix, env_var_name, load};
pub use paths::ConfigPaths;
pub use settings::{
    ClientSettings, DEFAULT_ADDRESS, DEFAULT_PORT, DEFAULT_SERVERNAME, DEFAULT_TOKENFILE,
    SettingsOverrides,
};

/// Process-wide configuration holder.
///
/// Created empty at startup. Flag values are recorded on it after argument
/// parsing, then [`Options::init_config`] resolves the settings exactly once.
/// From then on it is only read.
#[derive(Debug, Default)]
pub struct Options {
    config_file: Option<PathBuf>,
    overrides: SettingsOverrides,
    loaded: Option<LoadedConfig>,
}

impl Options {
    /// Creates an empty, uninitialized holder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Records an explicit config file, as passed with `--config`.
    pub fn set_config_file(&mut self, path: Option<PathBuf>) {
        self.config_file = path;
    }

    /// Records the values passed on the command line.
    pub fn set_overrides(&mut self, overrides: SettingsOverrides) {
        self.overrides = overrides;
    }

    /// Resolves the settings for `app` from the process environment.
    ///
    /// Calling it again after a successful load does nothing.
    ///
    /// # Errors
    ///
    /// Returns any error produced while loading; see [`load`].
    pub fn init_config(&mut self, app: &str) -> Result<()> {
        if self.is_initialized() {
            return Ok(());
        }

        self.init_config_with(app, &Environment::capture())
    }

    /// Same as [`Options::init_config`] with an explicit environment.
    ///
    /// # Errors
    ///
    /// Returns any error produced while loading; see [`load`].
    pub fn init_config_with(&mut self, app: &str, env: &Environment) -> Result<()> {
        if self.is_initialized() {
            debug!("Configuration already initialized");
            return Ok(());
        }

        let loaded = load(app, self.config_file.as_deref(), &self.overrides, env)?;
        self.loaded = Some(loaded);

        Ok(())
    }

    /// Whether the settings have been resolved.
    pub fn is_initialized(&self) -> bool {
        self.loaded.is_some()
    }

    /// Returns the resolved settings.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::NotInitialized` before [`Options::init_config`]
    /// has succeeded.
    pub fn settings(&self) -> Result<&ClientSettings> {
        self.loaded
            .as_ref()
            .map(|loaded| &loaded.settings)
            .ok_or(ConfigError::NotInitialized)
    }

    /// Returns the config file that was read, if any.
    pub fn config_file_used(&self) -> Option<&Path> {
        self.loaded.as_ref()?.source.as_deref()
    }
}
