use std::{collections::HashMap, env};

use toml::{Value, map::Map};

use crate::config::{ConfigError, Result};

/// Snapshot of the process environment.
///
/// Loading reads variables through this type instead of `std::env` so the
/// same code path can be driven from tests with a fixed set of variables.
#[derive(Debug, Clone, Default)]
pub struct Environment {
    vars: HashMap<String, String>,
}

impl Environment {
    /// Captures the current process environment. Variables whose name or
    /// value is not valid UTF-8 are skipped.
    pub fn capture() -> Self {
        let vars = env::vars_os()
            .filter_map(|(key, value)| Some((key.into_string().ok()?, value.into_string().ok()?)))
            .collect();

        Self { vars }
    }

    /// Returns the value of a variable, treating empty values as unset.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.vars
            .get(key)
            .map(String::as_str)
            .filter(|value| !value.is_empty())
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for Environment {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            vars: iter
                .into_iter()
                .map(|(key, value)| (key.into(), value.into()))
                .collect(),
        }
    }
}

/// Returns the variable prefix for an application, e.g. `IMMUADMIN_`.
pub fn env_prefix(app: &str) -> String {
    format!("{}_", app.to_uppercase().replace('-', "_"))
}

/// Returns the variable name that overrides `key`.
pub fn env_var_name(app: &str, key: &str) -> String {
    format!("{}{}", env_prefix(app), key.to_uppercase().replace('-', "_"))
}

/// Builds the environment layer.
///
/// Only keys present in `defaults` are looked up; each raw string is coerced
/// to the type of its default value.
pub(super) fn env_layer(app: &str, defaults: &Value, env: &Environment) -> Result<Value> {
    let mut layer = Map::new();

    let Value::Table(defaults) = defaults else {
        return Ok(Value::Table(layer));
    };

    for (key, default) in defaults {
        let var = env_var_name(app, key);
        let Some(raw) = env.get(&var) else {
            continue;
        };

        let value = coerce(raw, default).map_err(|reason| ConfigError::InvalidEnvVar {
            var: var.clone(),
            value: raw.to_string(),
            reason,
        })?;

        layer.insert(key.clone(), value);
    }

    Ok(Value::Table(layer))
}

fn coerce(raw: &str, like: &Value) -> std::result::Result<Value, String> {
    match like {
        Value::Integer(_) => raw
            .trim()
            .parse::<i64>()
            .map(Value::Integer)
            .map_err(|e| format!("expected an integer ({e})")),
        Value::Boolean(_) => parse_bool(raw.trim())
            .map(Value::Boolean)
            .ok_or_else(|| "expected a boolean".to_string()),
        _ => Ok(Value::String(raw.to_string())),
    }
}

fn parse_bool(raw: &str) -> Option<bool> {
    match raw {
        "1" | "t" | "T" | "true" | "TRUE" | "True" => Some(true),
        "0" | "f" | "F" | "false" | "FALSE" | "False" => Some(false),
        _ => None,
    }
}
