pub mod load;
pub mod show;

use std::path::PathBuf;

use anyhow::Result;
use clap::Args;
use comfy_table::{Cell, Color, Table, modifiers::UTF8_ROUND_CORNERS, presets::UTF8_FULL};
use shelfload_store::json::Collection;
use shelfload_store::{AuthorStore, BookStore, JsonStore, MemoryStore};

use crate::config::{Config, StoreKind};

/// Store selection shared by every subcommand that touches records
#[derive(Args, Debug, Clone)]
pub struct StoreArgs {
    /// Store backend (overrides `store.kind`)
    #[arg(long, value_enum)]
    pub store: Option<StoreKind>,

    /// Store directory for the json backend (overrides `store.dir`)
    #[arg(short, long)]
    pub dir: Option<PathBuf>,
}

/// An opened store backend
pub enum Backend {
    Json(JsonStore),
    Memory(MemoryStore),
}

impl Backend {
    /// Open the store picked by CLI flags, falling back to config.
    pub fn open(args: &StoreArgs, config: &Config) -> Result<Self> {
        match args.store.unwrap_or(config.store.kind) {
            StoreKind::Json => {
                let dir = args.dir.as_deref().unwrap_or(&config.store.dir);
                log::info!("Store: {}", dir.display());
                Ok(Self::Json(JsonStore::new(dir)?))
            }
            StoreKind::Memory => {
                log::info!("Store: in-memory (records are discarded on exit)");
                Ok(Self::Memory(MemoryStore::new()))
            }
        }
    }

    pub fn authors(&self) -> &dyn AuthorStore {
        match self {
            Self::Json(store) => store,
            Self::Memory(store) => store,
        }
    }

    pub fn books(&self) -> &dyn BookStore {
        match self {
            Self::Json(store) => store,
            Self::Memory(store) => store,
        }
    }

    /// `(authors, books)` currently held
    pub fn counts(&self) -> Result<(usize, usize)> {
        match self {
            Self::Json(store) => Ok((
                store.count(Collection::Authors)?,
                store.count(Collection::Books)?,
            )),
            Self::Memory(store) => Ok((store.author_count(), store.book_count())),
        }
    }

    pub fn location(&self) -> String {
        match self {
            Self::Json(store) => store.base().display().to_string(),
            Self::Memory(_) => "memory".to_string(),
        }
    }
}

/// Print a key-value table on stderr
pub fn print_table(title: &str, rows: &[(&str, String)]) {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_header(vec![
            Cell::new(title).fg(Color::Cyan),
            Cell::new("Value").fg(Color::Cyan),
        ]);
    for (label, value) in rows {
        table.add_row(vec![Cell::new(label), Cell::new(value)]);
    }
    eprintln!("\n{table}");
}
