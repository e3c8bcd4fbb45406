//! Command-line interface for the immudb admin client.
//!
//! The command tree is built from [`CommandNode`]s: the root carries the
//! global connection flags, the command registry in [`commands`] attaches
//! the command groups and [`version`] reports the build identity. The
//! [`Dispatcher`] parses arguments, loads the configuration right before
//! the selected command runs and returns any error to `main`, which hands
//! it to [`report::quit_to_stderr`].

mod args;
pub mod commands;
mod dispatcher;
pub mod formatting;
mod node;
pub mod report;
mod root;
mod types;
pub mod version;

#[cfg(test)]
mod tests;

pub use args::ConnectionArgs;
pub use dispatcher::{DispatchState, Dispatcher};
pub use node::CommandNode;
pub use root::{build, root_command};
pub use types::{CliError, Command, CommandArg, CommandContext, CommandMetadata, CommandResult};
