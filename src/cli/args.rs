//! Global connection flags.
//!
//! These are attached to the root command and accepted after any
//! subcommand. Values that are passed become the highest precedence
//! configuration layer.

use std::path::PathBuf;

use clap::{ArgMatches, Args, FromArgMatches};

use crate::config::{Options, SettingsOverrides};

use super::CliError;

/// Connection flags shared by every command.
#[derive(Args, Debug, Clone, Default, PartialEq)]
pub struct ConnectionArgs {
    /// Config file (default: immuadmin.toml in ./configs, the user config
    /// dir or $HOME)
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// immudb server address
    #[arg(short, long, global = true)]
    pub address: Option<String>,

    /// immudb server port number
    #[arg(short, long, global = true)]
    pub port: Option<u16>,

    /// Enable mutual TLS authentication
    #[arg(
        long,
        global = true,
        num_args = 0..=1,
        require_equals = true,
        default_missing_value = "true"
    )]
    pub mtls: Option<bool>,

    /// Server name used to verify the server certificate
    #[arg(long, global = true)]
    pub servername: Option<String>,

    /// Client certificate file path
    #[arg(long, global = true, value_name = "PATH")]
    pub certificate: Option<PathBuf>,

    /// Client private key file path
    #[arg(long, global = true, value_name = "PATH")]
    pub pkey: Option<PathBuf>,

    /// Client certificate authority file path
    #[arg(long, global = true, value_name = "PATH")]
    pub clientcas: Option<PathBuf>,

    /// File where the admin session token is stored
    #[arg(long, global = true, value_name = "PATH")]
    pub tokenfile: Option<String>,
}

impl ConnectionArgs {
    /// Splits the flags into the config file path and the override layer.
    pub fn into_overrides(self) -> (Option<PathBuf>, SettingsOverrides) {
        let overrides = SettingsOverrides {
            address: self.address,
            port: self.port,
            mtls: self.mtls,
            servername: self.servername,
            certificate: self.certificate,
            pkey: self.pkey,
            clientcas: self.clientcas,
            tokenfile: self.tokenfile,
        };

        (self.config, overrides)
    }

    /// Reads the flags from parsed arguments and records them on `options`.
    ///
    /// # Errors
    ///
    /// Returns `CliError::InvalidArguments` if the matches were not built
    /// from a command carrying these flags.
    pub fn bind(matches: &ArgMatches, options: &mut Options) -> Result<(), CliError> {
        let args = Self::from_arg_matches(matches)
            .map_err(|e| CliError::InvalidArguments(e.to_string()))?;
        let (config_file, overrides) = args.into_overrides();

        options.set_config_file(config_file);
        options.set_overrides(overrides);

        Ok(())
    }
}
