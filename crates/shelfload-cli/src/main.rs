//! shelfload - bulk loader for Open Library author and work dumps
//!
//! Reads the authors dump into an author store, then the works dump into a
//! book store with each work's author ids resolved to names.

use anyhow::Result;
use clap::{Parser, Subcommand};

mod cmd;
mod config;

use config::Config;

#[derive(Parser)]
#[command(name = "shelfload")]
#[command(about = "Bulk loader for Open Library author and work dumps")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// Enable debug logging
    #[arg(long, global = true)]
    debug: bool,

    /// Config file path (default: ./shelfload.toml or ~/.config/shelfload/config.toml)
    #[arg(short, long, global = true)]
    config: Option<std::path::PathBuf>,
}

#[derive(Subcommand)]
enum Command {
    /// Load authors, then works
    Load(cmd::load::LoadArgs),
    /// Load the authors dump only
    Authors(cmd::load::AuthorsArgs),
    /// Load the works dump only, resolving names from stored authors
    Works(cmd::load::WorksArgs),
    /// Print a stored author or book
    Show(cmd::show::ShowArgs),
    /// Show current configuration
    Config,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let progress = shelfload_core::ProgressContext::new();

    // Logging:
    //   TTY:     quiet (warn) unless --debug; progress bars show activity
    //   non-TTY: info unless --debug; logs are the only progress indicator
    let is_tty = progress.is_tty();
    let multi = if is_tty { Some(progress.multi()) } else { None };
    let quiet = if is_tty { !cli.debug } else { false };
    shelfload_core::init_logging(quiet, cli.debug, multi);

    let config = if let Some(path) = cli.config {
        Config::from_file(&path)?
    } else {
        Config::load()?
    };

    match cli.command {
        Command::Load(args) => cmd::load::run(args, &config, &progress),
        Command::Authors(args) => cmd::load::authors(args, &config, &progress),
        Command::Works(args) => cmd::load::works(args, &config, &progress),
        Command::Show(args) => cmd::show::run(args, &config),
        Command::Config => {
            cmd::print_table(
                "Setting",
                &[
                    ("Authors dump", config.dumps.authors.display().to_string()),
                    ("Works dump", config.dumps.works.display().to_string()),
                    ("Store", config.store.kind.to_string()),
                    ("Store directory", config.store.dir.display().to_string()),
                    ("Works line limit", config.works.line_limit.to_string()),
                    ("Author gate", config.works.author_gate.to_string()),
                    ("Strict phases", config.run.strict_phases.to_string()),
                ],
            );
            Ok(())
        }
    }
}
