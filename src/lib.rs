//! immuadmin - CLI admin client for immudb.
//!
//! This crate is the bootstrap layer of the admin tool: it assembles the
//! command tree, resolves the client configuration lazily right before a
//! command runs, reports the build identity and turns command errors into a
//! single message and a failure exit status.
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use immuadmin::{cli, identity::AppIdentity};
//!
//! let mut dispatcher = cli::build(&AppIdentity::from_build());
//! if let Err(e) = dispatcher.execute() {
//!     cli::report::quit_to_stderr(&e);
//! }
//! ```

/// Command tree, dispatcher and terminal error reporting.
pub mod cli;

/// Layered client configuration.
pub mod config;

/// Markdown reference pages for the command tree.
pub mod docs;

/// Build-time application identity.
pub mod identity;

/// Logging setup.
pub mod tracing_config;

pub use cli::{CliError, CommandNode, Dispatcher};
pub use config::{ConfigError, Options};
