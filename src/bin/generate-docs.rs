//! Writes the markdown command reference for immuadmin.
use std::{fs, path::PathBuf};

use clap::{Parser, Subcommand};
use immuadmin::{cli, docs, identity::AppIdentity};

#[derive(Parser)]
#[command(name = "generate-docs")]
#[command(about = "Generate markdown reference pages for immuadmin commands")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Write every page into the output directory
    All {
        #[arg(short, long, default_value = "docs/cli")]
        output: PathBuf,
    },
    /// List the pages that would be written
    List,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let dispatcher = cli::build(&AppIdentity::from_build());
    let pages = docs::generate_pages(dispatcher.root());

    match cli.command {
        Commands::All { output } => {
            fs::create_dir_all(&output)?;
            for page in &pages {
                let path = output.join(&page.file_name);
                fs::write(&path, &page.content)?;
                println!("Generated {}", path.display());
            }
        }
        Commands::List => {
            println!("Available pages:");
            for page in &pages {
                println!("  - {}", page.file_name);
            }
        }
    }

    Ok(())
}
