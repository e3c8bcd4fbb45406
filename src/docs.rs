//! Markdown reference generation for the command tree.
//!
//! Produces one page per command, named after its full path
//! (`immuadmin_config_get.md`). Pages end with an "Auto generated" footer
//! unless the root disables it.

use chrono::{NaiveDate, Utc};

use crate::cli::CommandNode;

/// A rendered documentation page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocPage {
    /// File name, e.g. `immuadmin_version.md`
    pub file_name: String,
    /// Markdown content
    pub content: String,
}

/// Renders pages for `root` and all its descendants, dated today.
pub fn generate_pages(root: &CommandNode) -> Vec<DocPage> {
    generate_pages_on(root, Utc::now().date_naive())
}

/// Renders pages for `root` and all its descendants.
///
/// `today` is used for the "Auto generated" footer.
pub fn generate_pages_on(root: &CommandNode, today: NaiveDate) -> Vec<DocPage> {
    let footer = if root.is_auto_gen_tag_disabled() {
        None
    } else {
        Some(format!(
            "###### Auto generated by {} on {}\n",
            root.name(),
            today.format("%-d-%b-%Y")
        ))
    };

    let mut pages = Vec::new();
    collect_pages(root, &[], footer.as_deref(), &mut pages);
    pages
}

fn collect_pages(
    node: &CommandNode,
    parents: &[&str],
    footer: Option<&str>,
    pages: &mut Vec<DocPage>,
) {
    let mut path: Vec<&str> = parents.to_vec();
    path.push(node.name());

    pages.push(DocPage {
        file_name: format!("{}.md", path.join("_")),
        content: command_page(node, &path, footer),
    });

    for child in node.children() {
        collect_pages(child, &path, footer, pages);
    }
}

fn command_page(node: &CommandNode, path: &[&str], footer: Option<&str>) -> String {
    let title = path.join(" ");
    let mut content = format!("## {title}\n\n{}\n\n", node.short());

    if let Some(long) = node.long() {
        content.push_str(&format!("### Synopsis\n\n{long}\n\n"));
    }

    let mut help_parser = node.to_clap().bin_name(title.clone());
    content.push_str(&format!(
        "```\n{}\n```\n\n",
        help_parser.render_usage().to_string().trim_end()
    ));

    if !node.children().is_empty() {
        content.push_str("### Subcommands\n\n");
        for child in node.children() {
            let child_path = format!("{}_{}", path.join("_"), child.name());
            content.push_str(&format!(
                "* [{title} {}]({child_path}.md)\t - {}\n",
                child.name(),
                child.short()
            ));
        }
        content.push('\n');
    }

    if let Some(footer) = footer {
        content.push_str(footer);
    }

    content
}
