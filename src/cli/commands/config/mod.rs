//! Configuration inspection commands.
mod get;
mod path;
mod schema;
mod show;

pub use get::GetCommand;
pub use path::PathCommand;
pub use schema::SchemaCommand;
pub use show::ShowCommand;

use crate::cli::CommandNode;

/// Builds the `config` group.
///
/// The group itself has no execution function; `immuadmin config` prints
/// its help.
pub fn command() -> CommandNode {
    let mut group = CommandNode::new("config", "Inspect the resolved client configuration");

    group.add_command(CommandNode::from_command(ShowCommand));
    group.add_command(CommandNode::from_command(GetCommand));
    group.add_command(CommandNode::from_command(PathCommand));
    group.add_command(CommandNode::from_command(SchemaCommand));

    group
}
