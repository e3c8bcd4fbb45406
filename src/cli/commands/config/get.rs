use crate::cli::{
    CliError, Command, CommandResult,
    formatting::format_toml_value,
    types::{CommandArg, CommandContext, CommandMetadata},
};

/// Command printing a single resolved setting.
///
/// # Example Usage
///
/// ```bash
/// immuadmin config get address
/// immuadmin config get port --port 3323
/// ```
pub struct GetCommand;

impl Command for GetCommand {
    /// Looks up `key` in the resolved settings.
    ///
    /// # Errors
    ///
    /// * `CliError::InvalidArguments` - If no key argument is provided
    /// * `CliError::Config` - If the key is unknown
    fn execute(&self, ctx: &CommandContext<'_>) -> CommandResult {
        let key = ctx.arg("key").ok_or_else(|| {
            CliError::InvalidArguments("Expected <key> argument for 'get' command".to_string())
        })?;

        let value = ctx.options.settings()?.get(key)?;

        Ok(format_toml_value(&value))
    }

    fn metadata(&self) -> CommandMetadata {
        CommandMetadata {
            name: "get".to_string(),
            description: "Print a single configuration value".to_string(),
            args: vec![CommandArg {
                name: "key".to_string(),
                description: "Setting name (e.g., address, port, mtls)".to_string(),
                required: true,
            }],
            examples: vec![
                "immuadmin config get address".to_string(),
                "immuadmin config get port --port 3323".to_string(),
            ],
        }
    }
}
