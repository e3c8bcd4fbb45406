use crate::cli::{
    Command, CommandResult,
    types::{CommandContext, CommandMetadata},
};

/// Command printing which config file was read.
pub struct PathCommand;

impl Command for PathCommand {
    fn execute(&self, ctx: &CommandContext<'_>) -> CommandResult {
        let path = match ctx.options.config_file_used() {
            Some(path) => path.display().to_string(),
            None => "(none)".to_string(),
        };

        Ok(path)
    }

    fn metadata(&self) -> CommandMetadata {
        CommandMetadata {
            name: "path".to_string(),
            description: "Print the config file in use".to_string(),
            args: Vec::new(),
            examples: Vec::new(),
        }
    }
}
