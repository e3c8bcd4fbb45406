use std::{
    env,
    ffi::OsString,
    io::{self, Write},
};

use clap::{ArgMatches, error::ErrorKind};
use tracing::{debug, info, instrument};

use super::{CliError, CommandContext, CommandNode};
use crate::config::{ConfigError, Options};

type InitHook = Box<dyn FnOnce(&mut Options) -> Result<(), ConfigError>>;
type FlagBinder = Box<dyn Fn(&ArgMatches, &mut Options) -> Result<(), CliError>>;

/// Lifecycle of a dispatcher. Each process walks it exactly once.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DispatchState {
    /// Tree built, hooks registered, nothing parsed yet
    Assembled,
    /// Arguments parsed, initialization hooks about to run
    Dispatching,
    /// The selected command is executing
    Running,
    /// Finished without error
    Succeeded,
    /// Finished with an error
    Failed,
}

/// Root dispatcher: owns the command tree and the configuration holder.
///
/// The dispatcher parses the arguments, runs the initialization hooks just
/// before the selected command and executes it. It never terminates the
/// process; errors are returned to the caller, which hands them to the
/// terminal error reporter.
pub struct Dispatcher {
    root: CommandNode,
    options: Options,
    hooks: Vec<InitHook>,
    binder: Option<FlagBinder>,
    state: DispatchState,
}

impl Dispatcher {
    /// Creates a dispatcher around a root node and an empty options holder.
    pub fn new(root: CommandNode, options: Options) -> Self {
        Self {
            root,
            options,
            hooks: Vec::new(),
            binder: None,
            state: DispatchState::Assembled,
        }
    }

    /// Registers a callback run once, right before the selected command.
    ///
    /// Hooks run in registration order and never for invocations that only
    /// display help.
    pub fn on_initialize<F>(&mut self, hook: F)
    where
        F: FnOnce(&mut Options) -> Result<(), ConfigError> + 'static,
    {
        self.hooks.push(Box::new(hook));
    }

    /// Registers how parsed global flags are recorded on the options.
    ///
    /// The binder runs after parsing and before the initialization hooks.
    pub fn bind_flags<F>(&mut self, binder: F)
    where
        F: Fn(&ArgMatches, &mut Options) -> Result<(), CliError> + 'static,
    {
        self.binder = Some(Box::new(binder));
    }

    /// Attaches a child to the root command.
    pub fn add_command(&mut self, child: CommandNode) {
        self.root.add_command(child);
    }

    /// The root command.
    pub fn root(&self) -> &CommandNode {
        &self.root
    }

    /// Mutable access to the root command while assembling the tree.
    pub fn root_mut(&mut self) -> &mut CommandNode {
        &mut self.root
    }

    /// The configuration holder.
    pub fn options(&self) -> &Options {
        &self.options
    }

    /// Current lifecycle state.
    pub fn state(&self) -> DispatchState {
        self.state
    }

    /// Executes the command selected by the process arguments, writing
    /// command output to standard output.
    ///
    /// # Errors
    ///
    /// Returns the error of the selected command, or of argument parsing or
    /// configuration loading.
    pub fn execute(&mut self) -> Result<(), CliError> {
        let stdout = io::stdout();
        let stderr = io::stderr();

        self.execute_from(env::args_os(), &mut stdout.lock(), &mut stderr.lock())
    }

    /// Executes the command selected by `args`.
    ///
    /// `args` includes the binary name. Help and command output go to `out`;
    /// `err` is only written to when the root does not silence errors.
    ///
    /// # Errors
    ///
    /// Returns the error of the selected command, or of argument parsing or
    /// configuration loading.
    #[instrument(skip_all, fields(root = self.root.name()))]
    pub fn execute_from<I, T>(
        &mut self,
        args: I,
        out: &mut dyn Write,
        err: &mut dyn Write,
    ) -> Result<(), CliError>
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString> + Clone,
    {
        if self.state != DispatchState::Assembled {
            return Err(CliError::ExecutionError(
                "command tree has already been executed".to_string(),
            ));
        }

        let result = self.dispatch(args, out);

        self.state = if result.is_ok() {
            DispatchState::Succeeded
        } else {
            DispatchState::Failed
        };

        if let Err(e) = &result {
            if !self.root.is_errors_silenced() {
                // A failed write must not replace the command's error.
                let _ = writeln!(err, "Error: {e}");
            }
        }

        result
    }

    fn dispatch<I, T>(&mut self, args: I, out: &mut dyn Write) -> Result<(), CliError>
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString> + Clone,
    {
        let mut parser = self.root.to_clap();

        let matches = match parser.try_get_matches_from_mut(args) {
            Ok(matches) => matches,
            Err(e) if matches!(e.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion) => {
                write!(out, "{}", e.render())?;
                return Ok(());
            }
            Err(e) => return Err(parse_error(&e, self.root.is_usage_silenced())),
        };

        let (path, leaf_matches) = selected_path(&matches);

        let runnable = self
            .root
            .find_path(path.as_slice())
            .is_some_and(CommandNode::is_runnable);

        if !runnable {
            debug!(command = %path.join(" "), "Selected command is a group, showing help");
            let help = path
                .iter()
                .try_fold(&mut parser, |cmd, name| cmd.find_subcommand_mut(name))
                .map(|cmd| cmd.render_help());

            if let Some(help) = help {
                write!(out, "{help}")?;
            }
            return Ok(());
        }

        self.state = DispatchState::Dispatching;

        if let Some(binder) = &self.binder {
            binder(&leaf_matches, &mut self.options)?;
        }

        for hook in self.hooks.drain(..) {
            hook(&mut self.options)?;
        }

        self.state = DispatchState::Running;
        info!(command = %path.join(" "), "Running command");

        let Some(node) = self.root.find_path(path.as_slice()) else {
            return Err(CliError::ExecutionError(format!(
                "command '{}' is not registered",
                path.join(" ")
            )));
        };

        let ctx = CommandContext {
            options: &self.options,
            matches: &leaf_matches,
        };
        let output = node.execute(&ctx)?;

        if !output.is_empty() {
            writeln!(out, "{}", output.trim_end())?;
        }

        Ok(())
    }
}

/// Walks the matched subcommands from the root.
///
/// Returns the names below the root and the matches of the deepest one.
fn selected_path(matches: &ArgMatches) -> (Vec<String>, ArgMatches) {
    let mut path = Vec::new();
    let mut current = matches;

    while let Some((name, sub)) = current.subcommand() {
        path.push(name.to_string());
        current = sub;
    }

    (path, current.clone())
}

fn parse_error(e: &clap::Error, silence_usage: bool) -> CliError {
    let rendered = e.render().to_string();

    let message = if silence_usage {
        error_summary(&rendered)
    } else {
        rendered.trim_end().to_string()
    };

    CliError::InvalidArguments(message)
}

/// Collapses a rendered clap error into one line.
///
/// Keeps the header and its detail lines (e.g. the list of missing
/// arguments) and drops everything from the first blank line or usage block.
fn error_summary(rendered: &str) -> String {
    rendered
        .lines()
        .map(str::trim)
        .take_while(|line| !line.is_empty() && !line.starts_with("Usage:"))
        .map(|line| line.trim_start_matches("error: "))
        .collect::<Vec<_>>()
        .join(" ")
}
