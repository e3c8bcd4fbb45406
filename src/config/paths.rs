use std::path::PathBuf;

use super::Environment;

/// Utility struct for locating the client configuration file
///
/// The file is named after the application (`<app>.toml`) and searched in a
/// fixed list of directories; the first existing file wins.
pub struct ConfigPaths;

impl ConfigPaths {
    /// Directory searched relative to the working directory
    pub const LOCAL_DIR: &'static str = "configs";

    /// Returns the config file name for the application
    pub fn file_name(app: &str) -> String {
        format!("{app}.toml")
    }

    /// Returns the directories searched for the config file, in order
    ///
    /// - `./configs`
    /// - `$XDG_CONFIG_HOME/<app>`, falling back to `$HOME/.config/<app>`
    /// - `$HOME`
    ///
    /// Directories whose base variable is unset are skipped.
    pub fn search_dirs(app: &str, env: &Environment) -> Vec<PathBuf> {
        let mut dirs = vec![PathBuf::from(Self::LOCAL_DIR)];

        let config_home = env
            .get("XDG_CONFIG_HOME")
            .map(PathBuf::from)
            .or_else(|| env.get("HOME").map(|home| PathBuf::from(home).join(".config")));

        if let Some(config_home) = config_home {
            dirs.push(config_home.join(app));
        }

        if let Some(home) = env.get("HOME") {
            dirs.push(PathBuf::from(home));
        }

        dirs
    }

    /// Finds the first existing config file for the application
    pub fn find_config_file(app: &str, env: &Environment) -> Option<PathBuf> {
        let file_name = Self::file_name(app);

        Self::search_dirs(app, env)
            .into_iter()
            .map(|dir| dir.join(&file_name))
            .find(|candidate| candidate.is_file())
    }
}
