use clap::ArgMatches;
use thiserror::Error;

use crate::config::{ConfigError, Options};

/// Errors that can occur during CLI command execution.
///
/// The dispatcher does not classify these any further: whichever variant
/// reaches it is printed once and ends the process with a failure status.
#[derive(Error, Debug)]
pub enum CliError {
    /// Invalid arguments were provided to a command.
    ///
    /// Covers everything the argument parser rejects (unknown subcommands,
    /// missing or surplus arguments) as well as values a command refuses.
    #[error("{0}")]
    InvalidArguments(String),

    /// An error occurred while resolving or reading the configuration.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// A command failed while doing its work.
    #[error("{0}")]
    ExecutionError(String),

    /// An I/O operation failed.
    ///
    /// This automatically converts from `std::io::Error`, e.g. when writing
    /// command output fails.
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

/// Type alias for command execution results.
///
/// Commands return their output as a `String`; the dispatcher writes it to
/// standard output. An empty string prints nothing.
pub type CommandResult = Result<String, CliError>;

/// A single positional command argument.
#[derive(Debug, Clone)]
pub struct CommandArg {
    /// The name of the argument (e.g., "key").
    pub name: String,

    /// Human-readable description of what this argument does.
    pub description: String,

    /// Whether this argument is required for command execution.
    pub required: bool,
}

/// Complete metadata for a CLI command.
///
/// Used to build the command's parser definition and help text.
#[derive(Debug, Clone)]
pub struct CommandMetadata {
    /// The command name (e.g., "get", "show", "version").
    pub name: String,

    /// Brief description of what this command does.
    pub description: String,

    /// Positional arguments this command accepts, in order.
    pub args: Vec<CommandArg>,

    /// Example usage strings to show in help text.
    pub examples: Vec<String>,
}

/// Everything a command can see while it runs.
pub struct CommandContext<'a> {
    /// Resolved configuration. Always initialized when a command runs.
    pub options: &'a Options,

    /// Parsed arguments of the selected command.
    pub matches: &'a ArgMatches,
}

impl CommandContext<'_> {
    /// Returns a positional argument by name.
    pub fn arg(&self, name: &str) -> Option<&str> {
        self.matches
            .try_get_one::<String>(name)
            .ok()
            .flatten()
            .map(String::as_str)
    }
}

/// Trait defining the interface for CLI commands.
///
/// Commands receive their dependencies through their constructors and the
/// resolved configuration through [`CommandContext`].
pub trait Command {
    /// Executes the command.
    ///
    /// # Errors
    ///
    /// Returns `CliError` for any execution failure, including invalid
    /// argument values and configuration errors.
    fn execute(&self, ctx: &CommandContext<'_>) -> CommandResult;

    /// Returns the complete metadata for this command.
    fn metadata(&self) -> CommandMetadata;
}
