use crate::{
    cli::{
        Command, CommandResult,
        types::{CommandContext, CommandMetadata},
    },
    config::ConfigError,
};

/// Command printing every resolved setting as TOML.
pub struct ShowCommand;

impl Command for ShowCommand {
    fn execute(&self, ctx: &CommandContext<'_>) -> CommandResult {
        let settings = ctx.options.settings()?;
        let rendered =
            toml::to_string(settings).map_err(|e| ConfigError::Serialization(e.to_string()))?;

        Ok(rendered)
    }

    fn metadata(&self) -> CommandMetadata {
        CommandMetadata {
            name: "show".to_string(),
            description: "Print the resolved configuration".to_string(),
            args: Vec::new(),
            examples: vec!["IMMUADMIN_PORT=3323 immuadmin config show".to_string()],
        }
    }
}
