//! Command registry: attaches the administrative commands to the root.

pub mod config;

use clap::Args;

use super::{ConnectionArgs, Dispatcher};

/// Registers the global connection flags and every command group.
///
/// Flags are declared on the root so any subcommand accepts them; their
/// parsed values are recorded on the options before the configuration hook
/// runs.
pub fn init(dispatcher: &mut Dispatcher) {
    dispatcher.root_mut().augment(ConnectionArgs::augment_args);
    dispatcher.bind_flags(ConnectionArgs::bind);

    dispatcher.add_command(config::command());
}
