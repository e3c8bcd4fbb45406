use chrono::DateTime;

use crate::identity::AppIdentity;

use super::{
    CommandNode, CommandResult,
    types::{Command, CommandContext, CommandMetadata},
};

const PLACEHOLDER: &str = "-";

/// Command printing the build metadata.
///
/// # Example Output
///
/// ```text
/// immuadmin 1.2.3
/// Commit  : abc123
/// Built by: ci
/// Built at: 2020-01-01
/// ```
pub struct VersionCommand {
    identity: AppIdentity,
}

impl VersionCommand {
    /// Creates a version command reporting `identity`.
    pub fn new(identity: AppIdentity) -> Self {
        Self { identity }
    }
}

impl Command for VersionCommand {
    fn execute(&self, _ctx: &CommandContext<'_>) -> CommandResult {
        Ok(render_version(&self.identity))
    }

    fn metadata(&self) -> CommandMetadata {
        CommandMetadata {
            name: "version".to_string(),
            description: format!("Show the {} version", self.identity.name),
            args: Vec::new(),
            examples: Vec::new(),
        }
    }
}

/// Builds the `version` node for an identity.
pub fn version_command(identity: &AppIdentity) -> CommandNode {
    CommandNode::from_command(VersionCommand::new(identity.clone()))
}

/// Renders the version report. Never fails; missing fields render as `-`.
pub fn render_version(identity: &AppIdentity) -> String {
    let title = if identity.version.is_empty() {
        identity.name.clone()
    } else {
        format!("{} {}", identity.name, identity.version)
    };

    format!(
        "{}\nCommit  : {}\nBuilt by: {}\nBuilt at: {}",
        title,
        or_placeholder(&identity.commit),
        or_placeholder(&identity.built_by),
        display_built_at(&identity.built_at),
    )
}

fn or_placeholder(value: &str) -> &str {
    if value.is_empty() { PLACEHOLDER } else { value }
}

/// Unix seconds become an RFC 2822 date; anything else is shown verbatim.
fn display_built_at(raw: &str) -> String {
    if !raw.is_empty() && raw.bytes().all(|b| b.is_ascii_digit()) {
        let parsed = raw
            .parse::<i64>()
            .ok()
            .and_then(|secs| DateTime::from_timestamp(secs, 0));

        if let Some(built_at) = parsed {
            return built_at.to_rfc2822();
        }
    }

    or_placeholder(raw).to_string()
}
