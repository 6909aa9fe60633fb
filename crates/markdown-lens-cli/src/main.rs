use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand};
use markdown_lens_config::Config;
use std::{
    io::stdout,
    path::{Path, PathBuf},
    process,
};

mod commands;
mod viewer;

use commands::Format;

/// Inspect the decorations and links markdown-lens extracts from markdown.
#[derive(Debug, Parser)]
#[command(name = "markdown-lens", version)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Print the decorations of a document
    Decorations {
        file: PathBuf,
        #[arg(long, value_enum, default_value_t = Format::Text)]
        format: Format,
    },
    /// Print the navigable links of a document and where they lead
    Links {
        file: PathBuf,
        #[arg(long, value_enum, default_value_t = Format::Text)]
        format: Format,
    },
    /// Extract every markdown file under a directory and validate the output
    Check {
        /// Defaults to `notes_path` from the config file
        dir: Option<PathBuf>,
    },
    /// Open a document in the terminal viewer
    View { file: PathBuf },
}

fn main() -> Result<()> {
    env_logger::Builder::from_default_env()
        .filter_level(log::LevelFilter::Info)
        .init();

    let cli = Cli::parse();
    let config = Config::load_or_default().with_context(|| {
        format!(
            "Failed to load config file at {}",
            Config::config_path().display()
        )
    })?;

    match cli.command {
        Command::Decorations { file, format } => {
            let text = read(&file)?;
            commands::print_decorations(&text, format, &mut stdout())?;
        }
        Command::Links { file, format } => {
            let text = read(&file)?;
            commands::print_links(&text, &file, format, &mut stdout())?;
        }
        Command::Check { dir } => {
            let Some(dir) = dir.or(config.notes_path.clone()) else {
                bail!(
                    "No directory given and no notes_path in {}",
                    Config::config_path().display()
                );
            };
            let report = commands::check(&dir)?;
            report.print(&mut stdout())?;
            if !report.is_clean() {
                process::exit(1);
            }
        }
        Command::View { file } => {
            let text = read(&file)?;
            viewer::run(&file, text, &config)?;
        }
    }

    Ok(())
}

fn read(file: &Path) -> Result<String> {
    std::fs::read_to_string(file).with_context(|| format!("Failed to read {}", file.display()))
}
