use schemars::schema_for;

use crate::{
    cli::{
        Command, CommandResult,
        types::{CommandContext, CommandMetadata},
    },
    config::{ClientSettings, ConfigError},
};

/// Command printing the JSON Schema of the config file.
pub struct SchemaCommand;

impl Command for SchemaCommand {
    fn execute(&self, _ctx: &CommandContext<'_>) -> CommandResult {
        let schema = schema_for!(ClientSettings);
        let rendered = serde_json::to_string_pretty(&schema)
            .map_err(|e| ConfigError::Serialization(e.to_string()))?;

        Ok(rendered)
    }

    fn metadata(&self) -> CommandMetadata {
        CommandMetadata {
            name: "schema".to_string(),
            description: "Print the JSON Schema of the config file".to_string(),
            args: Vec::new(),
            examples: vec!["immuadmin config schema > immuadmin.schema.json".to_string()],
        }
    }
}
