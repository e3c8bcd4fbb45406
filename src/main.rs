//! immuadmin entry point
//!
//! Builds the command tree, executes the selected command and maps any
//! error to a message on stderr and a non-zero exit status.

use immuadmin::{
    cli::{self, report::quit_to_stderr},
    identity::AppIdentity,
    tracing_config,
};

fn main() {
    let log_guard = match tracing_config::init_cli_mode() {
        Ok(guard) => guard,
        Err(e) => quit_to_stderr(&e),
    };

    let mut dispatcher = cli::build(&AppIdentity::from_build());

    if let Err(e) = dispatcher.execute() {
        drop(log_guard);
        quit_to_stderr(&e);
    }
}
