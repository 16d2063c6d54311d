//! Load subcommands: both phases, or one phase on its own

use std::path::PathBuf;

use anyhow::Result;
use clap::Args;
use shelfload_core::{ProgressContext, fmt_num};
use shelfload_openlibrary::{
    AuthorGate, LoadConfig, PhaseOutcome, PhaseStats, load_authors, load_works,
};

use super::{Backend, StoreArgs, print_table};
use crate::config::{Config, StoreKind};

/// Work phase flags, shared by `load` and `works`
#[derive(Args, Debug, Clone)]
pub struct WorkArgs {
    /// Works dump (overrides `dumps.works`)
    #[arg(long)]
    pub works: Option<PathBuf>,

    /// Number of works dump lines to read (overrides `works.line_limit`)
    #[arg(short = 'l', long)]
    pub line_limit: Option<usize>,

    /// Array that decides whether a work becomes a book: authors or covers
    #[arg(long, value_parser = parse_gate)]
    pub author_gate: Option<AuthorGate>,
}

#[derive(Args, Debug)]
pub struct LoadArgs {
    /// Authors dump (overrides `dumps.authors`)
    #[arg(long)]
    pub authors: Option<PathBuf>,

    #[command(flatten)]
    pub work: WorkArgs,

    /// Skip the work phase if the author phase fails
    #[arg(long)]
    pub strict: bool,

    #[command(flatten)]
    pub store: StoreArgs,
}

#[derive(Args, Debug)]
pub struct AuthorsArgs {
    /// Authors dump (overrides `dumps.authors`)
    pub dump: Option<PathBuf>,

    #[command(flatten)]
    pub store: StoreArgs,
}

#[derive(Args, Debug)]
pub struct WorksArgs {
    #[command(flatten)]
    pub work: WorkArgs,

    #[command(flatten)]
    pub store: StoreArgs,
}

fn parse_gate(s: &str) -> Result<AuthorGate, String> {
    AuthorGate::from_name(s).ok_or_else(|| format!("unknown gate `{s}` (expected authors or covers)"))
}

/// Config values with CLI flags applied on top
fn resolve(config: &Config, authors: Option<PathBuf>, work: WorkArgs) -> LoadConfig {
    let mut load = config.load_config();
    if let Some(path) = authors {
        load.authors_dump = path;
    }
    if let Some(path) = work.works {
        load.works_dump = path;
    }
    if let Some(limit) = work.line_limit {
        load.works.line_limit = limit;
    }
    if let Some(gate) = work.author_gate {
        load.works.author_gate = gate;
    }
    load
}

/// `shelfload load`: author phase, then work phase
pub fn run(args: LoadArgs, config: &Config, progress: &ProgressContext) -> Result<()> {
    let mut load = resolve(config, args.authors, args.work);
    load.strict_phases |= args.strict;
    let backend = Backend::open(&args.store, config)?;

    log::info!("Loading Open Library dumps");
    log::info!("  Authors: {}", load.authors_dump.display());
    log::info!("  Works: {}", load.works_dump.display());
    log::info!(
        "  Works line limit: {} (gate: {})",
        load.works.line_limit,
        load.works.author_gate
    );

    let summary = shelfload_openlibrary::run(&load, backend.authors(), backend.books(), progress);

    let (authors, books) = backend.counts()?;
    print_table(
        "Load",
        &[
            ("Authors phase", phase_label(&summary.authors)),
            ("Works phase", phase_label(&summary.works)),
            ("Store", backend.location()),
            ("Stored", format!("{} authors, {} books", fmt_num(authors), fmt_num(books))),
            ("Time", format!("{:.1}s", summary.elapsed.as_secs_f64())),
        ],
    );

    if !summary.is_success() {
        anyhow::bail!("Load finished with failed phases");
    }
    Ok(())
}

fn phase_label(outcome: &PhaseOutcome) -> String {
    match outcome {
        PhaseOutcome::Completed(stats) => format!(
            "{} written, {} skipped",
            fmt_num(stats.records_written),
            fmt_num(stats.total_skipped())
        ),
        PhaseOutcome::Failed(e) => format!("FAILED: {e}"),
        PhaseOutcome::NotRun => "not run".to_string(),
    }
}

/// `shelfload authors`: author phase only
pub fn authors(args: AuthorsArgs, config: &Config, progress: &ProgressContext) -> Result<()> {
    let path = args.dump.unwrap_or_else(|| config.dumps.authors.clone());
    let backend = Backend::open(&args.store, config)?;

    let pb = progress.phase_bar("authors");
    let stats = load_authors(&path, backend.authors(), &pb)?;
    stats.log();
    print_phase(&stats, &backend)
}

/// `shelfload works`: work phase only, against authors already in the store
pub fn works(args: WorksArgs, config: &Config, progress: &ProgressContext) -> Result<()> {
    let load = resolve(config, None, args.work);
    let backend = Backend::open(&args.store, config)?;
    if args.store.store.unwrap_or(config.store.kind) == StoreKind::Memory {
        log::warn!("in-memory store holds no authors; every name resolves to Unknown Author");
    }

    let pb = progress.phase_bar("works");
    let stats = load_works(
        &load.works_dump,
        &load.works,
        backend.authors(),
        backend.books(),
        &pb,
    )?;
    stats.log();
    print_phase(&stats, &backend)
}

fn print_phase(stats: &PhaseStats, backend: &Backend) -> Result<()> {
    let (authors, books) = backend.counts()?;
    let mut rows = vec![
        ("Lines read", fmt_num(stats.lines_read)),
        ("Written", fmt_num(stats.records_written)),
        ("Filtered", fmt_num(stats.filtered)),
        (
            "Skipped",
            format!(
                "{} malformed, {} missing field, {} bad timestamp",
                stats.malformed, stats.missing_field, stats.bad_timestamp
            ),
        ),
        ("Stored", format!("{} authors, {} books", fmt_num(authors), fmt_num(books))),
        ("Time", format!("{:.1}s", stats.elapsed.as_secs_f64())),
    ];
    if let Some(first) = stats.skipped.first() {
        rows.push(("First skip", format!("line {}: {}", first.line_no, first.error)));
    }
    print_table(stats.phase.name(), &rows);
    Ok(())
}
