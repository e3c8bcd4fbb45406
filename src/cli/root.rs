use crate::{
    config::{DEFAULT_ADDRESS, DEFAULT_PORT, Options, env_var_name},
    identity::{APP_NAME, AppIdentity},
};

use super::{CommandNode, Dispatcher, commands, version::version_command};

const SHORT: &str = "CLI admin client for immudb - the lightweight, high-speed immutable database for systems and applications";

/// Builds the root command.
///
/// The root has no execution function, so invoking it without a subcommand
/// prints its help. Usage and error printing are silenced: errors travel
/// back to `main` and are reported exactly once.
pub fn root_command() -> CommandNode {
    let long = format!(
        "{SHORT}.\n\nEnvironment variables:\n  {}={}\n  {}={}\n  {}=true",
        env_var_name(APP_NAME, "address"),
        DEFAULT_ADDRESS,
        env_var_name(APP_NAME, "port"),
        DEFAULT_PORT,
        env_var_name(APP_NAME, "mtls"),
    );

    CommandNode::new(APP_NAME, SHORT)
        .long_about(long)
        .silence_usage(true)
        .silence_errors(true)
        .disable_auto_gen_tag(true)
}

/// Assembles the full command tree.
///
/// Registers the configuration hook, lets the command registry attach its
/// commands and finally attaches `version`.
pub fn build(identity: &AppIdentity) -> Dispatcher {
    let mut dispatcher = Dispatcher::new(root_command(), Options::new());

    dispatcher.on_initialize(|options| options.init_config(APP_NAME));
    commands::init(&mut dispatcher);
    dispatcher.add_command(version_command(identity));

    dispatcher
}
