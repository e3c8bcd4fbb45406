mod env;
mod merging;

pub use env::{Environment, env_prefix, env_var_name};

use std::{
    fs,
    path::{Path, PathBuf},
};

use toml::{Value, map::Map};
use tracing::{debug, info, instrument};

use super::{ClientSettings, ConfigError, ConfigPaths, Result, SettingsOverrides};
use env::env_layer;
use merging::merge_layers;

/// Settings produced by a successful load, plus the file they came from.
#[derive(Debug, Clone, PartialEq)]
pub struct LoadedConfig {
    /// Fully resolved and validated settings
    pub settings: ClientSettings,
    /// Config file that contributed a layer, if any
    pub source: Option<PathBuf>,
}

/// Resolves the client settings from every layer.
///
/// Precedence, lowest first: defaults, config file, environment, flags.
/// An explicit `config_file` must exist; otherwise the search path from
/// [`ConfigPaths::search_dirs`] is used and a missing file is not an error.
///
/// # Errors
///
/// Returns an error if:
/// - The explicit config file does not exist or cannot be read
/// - The TOML content is invalid or contains unknown keys
/// - An environment variable cannot be coerced to its setting's type
/// - The merged settings fail validation
#[instrument(skip(overrides, env))]
pub fn load(
    app: &str,
    config_file: Option<&Path>,
    overrides: &SettingsOverrides,
    env: &Environment,
) -> Result<LoadedConfig> {
    let defaults = ClientSettings::default().to_toml()?;

    let source = match config_file {
        Some(path) if !path.is_file() => {
            return Err(ConfigError::FileNotFound {
                path: path.to_path_buf(),
            });
        }
        Some(path) => Some(path.to_path_buf()),
        None => ConfigPaths::find_config_file(app, env),
    };

    let file_layer = match &source {
        Some(path) => {
            info!("Using config file: {}", path.display());
            read_config_file(path)?
        }
        None => {
            debug!("No config file found, using defaults");
            Value::Table(Map::new())
        }
    };

    let env_layer = env_layer(app, &defaults, env)?;
    let flag_layer = overrides.to_toml()?;

    let merged = merge_layers([defaults, file_layer, env_layer, flag_layer]);
    let settings: ClientSettings = merged
        .try_into()
        .map_err(|e: toml::de::Error| ConfigError::InvalidSettings {
            details: e.to_string(),
        })?;

    settings.validate()?;

    Ok(LoadedConfig { settings, source })
}

fn read_config_file(path: &Path) -> Result<Value> {
    let content = fs::read_to_string(path).map_err(|e| ConfigError::io(&e, path))?;

    let value: Value =
        toml::from_str(&content).map_err(|e| ConfigError::toml_parse(e, Some(path)))?;

    Ok(value)
}
