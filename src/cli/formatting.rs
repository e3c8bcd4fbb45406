//! Formatting utilities for CLI output.
//!
//! Terminal styling for error messages and plain rendering of configuration
//! values.

use toml::Value;

/// ANSI color codes for terminal output
pub struct Colors;

impl Colors {
    /// Reset all formatting
    pub const RESET: &'static str = "\x1b[0m";
    /// Bold text
    pub const BOLD: &'static str = "\x1b[1m";
    /// Red color
    pub const RED: &'static str = "\x1b[31m";
}

/// Formats error messages with red styling
pub fn format_error(text: &str) -> String {
    format!("{}{}{}{}", Colors::BOLD, Colors::RED, text, Colors::RESET)
}

/// Formats a TOML value for script-friendly CLI output.
///
/// Strings are printed without quotes; other scalars use their TOML
/// representation. Complex types show their size rather than full contents.
///
/// # Examples
///
/// ```
/// use immuadmin::cli::formatting::format_toml_value;
///
/// let value = toml::Value::String("127.0.0.1".to_string());
/// assert_eq!(format_toml_value(&value), "127.0.0.1");
///
/// let value = toml::Value::Integer(3322);
/// assert_eq!(format_toml_value(&value), "3322");
/// ```
pub fn format_toml_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Integer(i) => i.to_string(),
        Value::Float(f) => f.to_string(),
        Value::Boolean(b) => b.to_string(),
        Value::Array(arr) => format!("[{}]", arr.len()),
        Value::Table(table) => format!("{{{}}}", table.len()),
        _ => "complex_value".to_string(),
    }
}
