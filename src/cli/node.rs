use std::fmt;

use clap::Arg;
use tracing::debug;

use super::{Command, CommandContext, CommandResult};

type RunFn = Box<dyn Fn(&CommandContext<'_>) -> CommandResult>;

/// A named unit in the command tree.
///
/// A node carries its parser definition (name, help text, own arguments),
/// its children and an optional execution function. Nodes without an
/// execution function are groups: selecting one prints its help.
///
/// # Example Structure
///
/// ```text
/// immuadmin
/// ├── config
/// │   ├── get
/// │   ├── path
/// │   ├── schema
/// │   └── show
/// └── version
/// ```
pub struct CommandNode {
    command: clap::Command,
    children: Vec<CommandNode>,
    run: Option<RunFn>,
    silence_usage: bool,
    silence_errors: bool,
    disable_auto_gen_tag: bool,
}

impl CommandNode {
    /// Creates a group node with a name and a one-line description.
    pub fn new(name: impl Into<String>, short: impl Into<String>) -> Self {
        let name: String = name.into();
        let short: String = short.into();

        Self {
            command: clap::Command::new(name).about(short),
            children: Vec::new(),
            run: None,
            silence_usage: false,
            silence_errors: false,
            disable_auto_gen_tag: false,
        }
    }

    /// Builds a runnable node from a [`Command`] implementation.
    ///
    /// The command's metadata becomes the node's help text and positional
    /// arguments; its examples are listed after the help.
    pub fn from_command<C>(command: C) -> Self
    where
        C: Command + 'static,
    {
        let metadata = command.metadata();
        let mut node = Self::new(metadata.name, metadata.description);

        for arg in metadata.args {
            node = node.arg(
                Arg::new(arg.name.clone())
                    .value_name(arg.name.to_uppercase())
                    .help(arg.description)
                    .required(arg.required),
            );
        }

        if !metadata.examples.is_empty() {
            let examples = metadata
                .examples
                .iter()
                .map(|example| format!("  {example}"))
                .collect::<Vec<_>>()
                .join("\n");
            node.command = node.command.after_help(format!("Examples:\n{examples}"));
        }

        node.run(move |ctx| command.execute(ctx))
    }

    /// Sets the long description shown by `--help`.
    pub fn long_about(mut self, long: impl Into<String>) -> Self {
        let long: String = long.into();
        self.command = self.command.long_about(long);
        self
    }

    /// Adds an argument owned by this node.
    pub fn arg(mut self, arg: Arg) -> Self {
        self.command = self.command.arg(arg);
        self
    }

    /// Applies a transformation to the node's parser definition.
    ///
    /// Used to attach derived argument groups, e.g. `Args::augment_args`.
    pub fn augment(&mut self, f: impl FnOnce(clap::Command) -> clap::Command) {
        let command = std::mem::take(&mut self.command);
        self.command = f(command);
    }

    /// Sets the execution function.
    pub fn run<F>(mut self, f: F) -> Self
    where
        F: Fn(&CommandContext<'_>) -> CommandResult + 'static,
    {
        self.run = Some(Box::new(f));
        self
    }

    /// Do not print usage when an argument error occurs.
    pub fn silence_usage(mut self, silence: bool) -> Self {
        self.silence_usage = silence;
        self
    }

    /// Do not let the dispatcher print errors; the caller reports them.
    pub fn silence_errors(mut self, silence: bool) -> Self {
        self.silence_errors = silence;
        self
    }

    /// Omit the "Auto generated" footer from generated reference docs.
    pub fn disable_auto_gen_tag(mut self, disable: bool) -> Self {
        self.disable_auto_gen_tag = disable;
        self
    }

    /// Attaches a child node.
    ///
    /// A child with the same name replaces the existing one in place, so the
    /// last registration wins and exactly one command answers to a name.
    pub fn add_command(&mut self, child: CommandNode) {
        let position = self.children.iter().position(|c| c.name() == child.name());

        match position {
            Some(index) => {
                debug!(
                    parent = self.name(),
                    command = child.name(),
                    "Replacing previously registered command"
                );
                self.children[index] = child;
            }
            None => self.children.push(child),
        }
    }

    /// The node's name, as typed on the command line.
    pub fn name(&self) -> &str {
        self.command.get_name()
    }

    /// The one-line description.
    pub fn short(&self) -> String {
        self.command
            .get_about()
            .map(ToString::to_string)
            .unwrap_or_default()
    }

    /// The long description, if one was set.
    pub fn long(&self) -> Option<String> {
        self.command.get_long_about().map(ToString::to_string)
    }

    /// Child nodes in registration order.
    pub fn children(&self) -> &[CommandNode] {
        &self.children
    }

    /// Looks up a direct child by name.
    pub fn find(&self, name: &str) -> Option<&CommandNode> {
        self.children.iter().find(|c| c.name() == name)
    }

    /// Follows a path of child names from this node.
    pub fn find_path<S: AsRef<str>>(&self, path: &[S]) -> Option<&CommandNode> {
        path.iter()
            .try_fold(self, |node, name| node.find(name.as_ref()))
    }

    /// Whether the node has an execution function.
    pub fn is_runnable(&self) -> bool {
        self.run.is_some()
    }

    /// Runs the execution function. Group nodes produce no output.
    ///
    /// # Errors
    ///
    /// Returns whatever the execution function returns.
    pub fn execute(&self, ctx: &CommandContext<'_>) -> CommandResult {
        match &self.run {
            Some(run) => run(ctx),
            None => Ok(String::new()),
        }
    }

    /// Whether usage printing is suppressed on argument errors.
    pub fn is_usage_silenced(&self) -> bool {
        self.silence_usage
    }

    /// Whether the dispatcher leaves error printing to its caller.
    pub fn is_errors_silenced(&self) -> bool {
        self.silence_errors
    }

    /// Whether generated docs omit the "Auto generated" footer.
    pub fn is_auto_gen_tag_disabled(&self) -> bool {
        self.disable_auto_gen_tag
    }

    /// Builds the parser definition for this node and all descendants.
    pub fn to_clap(&self) -> clap::Command {
        self.command
            .clone()
            .subcommands(self.children.iter().map(CommandNode::to_clap))
    }
}

impl fmt::Debug for CommandNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CommandNode")
            .field("name", &self.name())
            .field("children", &self.children)
            .field("runnable", &self.is_runnable())
            .finish()
    }
}
