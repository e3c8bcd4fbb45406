use std::path::PathBuf;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use toml::Value;

use super::{ConfigError, Result};

/// Default server address.
pub const DEFAULT_ADDRESS: &str = "127.0.0.1";
/// Default server port.
pub const DEFAULT_PORT: u16 = 3322;
/// Default TLS server name.
pub const DEFAULT_SERVERNAME: &str = "localhost";
/// Default file holding the admin session token.
pub const DEFAULT_TOKENFILE: &str = "token_admin";

/// Connection settings for the admin client.
///
/// This is the schema of `immuadmin.toml`. Every field is optional in the
/// file; missing fields keep their defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(default, deny_unknown_fields)]
pub struct ClientSettings {
    /// Address of the immudb server.
    pub address: String,

    /// Port of the immudb server.
    pub port: u16,

    /// Enable mutual TLS authentication.
    pub mtls: bool,

    /// Server name used to verify the server certificate.
    pub servername: String,

    /// Client certificate file.
    pub certificate: PathBuf,

    /// Client private key file.
    pub pkey: PathBuf,

    /// Client certificate authority file.
    pub clientcas: PathBuf,

    /// File where the admin session token is stored.
    pub tokenfile: String,
}

impl Default for ClientSettings {
    fn default() -> Self {
        Self {
            address: DEFAULT_ADDRESS.to_string(),
            port: DEFAULT_PORT,
            mtls: false,
            servername: DEFAULT_SERVERNAME.to_string(),
            certificate: PathBuf::new(),
            pkey: PathBuf::new(),
            clientcas: PathBuf::new(),
            tokenfile: DEFAULT_TOKENFILE.to_string(),
        }
    }
}

impl ClientSettings {
    /// Checks constraints serde cannot express.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidField` for an empty address, port 0, or
    /// mutual TLS enabled without its certificate files.
    pub fn validate(&self) -> Result<()> {
        if self.address.trim().is_empty() {
            return Err(invalid_field("address", "must not be empty"));
        }

        if self.port == 0 {
            return Err(invalid_field("port", "must be between 1 and 65535"));
        }

        if self.mtls {
            let required = [
                ("certificate", &self.certificate),
                ("pkey", &self.pkey),
                ("clientcas", &self.clientcas),
            ];

            for (field, path) in required {
                if path.as_os_str().is_empty() {
                    return Err(invalid_field(field, "required when mtls is enabled"));
                }
            }
        }

        Ok(())
    }

    /// Converts the settings into a TOML table.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Serialization` if a path is not valid UTF-8.
    pub fn to_toml(&self) -> Result<Value> {
        Value::try_from(self).map_err(|e| ConfigError::Serialization(e.to_string()))
    }

    /// Returns the value of a single setting by key.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::UnknownKey` when `key` names no setting.
    pub fn get(&self, key: &str) -> Result<Value> {
        let table = self.to_toml()?;

        table
            .get(key)
            .cloned()
            .ok_or_else(|| ConfigError::UnknownKey(key.to_string()))
    }
}

fn invalid_field(field: &str, reason: &str) -> ConfigError {
    ConfigError::InvalidField {
        field: field.to_string(),
        reason: reason.to_string(),
    }
}

/// Values given on the command line.
///
/// Only fields that were actually passed are `Some`; they form the highest
/// precedence layer.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct SettingsOverrides {
    /// Overrides `address`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    /// Overrides `port`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub port: Option<u16>,
    /// Overrides `mtls`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mtls: Option<bool>,
    /// Overrides `servername`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub servername: Option<String>,
    /// Overrides `certificate`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub certificate: Option<PathBuf>,
    /// Overrides `pkey`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pkey: Option<PathBuf>,
    /// Overrides `clientcas`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub clientcas: Option<PathBuf>,
    /// Overrides `tokenfile`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tokenfile: Option<String>,
}

impl SettingsOverrides {
    pub(super) fn to_toml(&self) -> Result<Value> {
        Value::try_from(self).map_err(|e| ConfigError::Serialization(e.to_string()))
    }
}
