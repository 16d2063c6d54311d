//! `shelfload show` - print a stored author or book

use anyhow::Result;
use clap::{Args, Subcommand};
use shelfload_store::{Author, Book};

use super::{Backend, StoreArgs, print_table};
use crate::config::Config;

#[derive(Args, Debug)]
pub struct ShowArgs {
    #[command(subcommand)]
    pub target: ShowTarget,

    #[command(flatten)]
    pub store: StoreArgs,
}

#[derive(Subcommand, Debug)]
pub enum ShowTarget {
    /// Show an author by id (e.g. OL1A)
    Author { id: String },
    /// Show a book by id (e.g. OL45W)
    Book { id: String },
}

pub fn run(args: ShowArgs, config: &Config) -> Result<()> {
    let backend = Backend::open(&args.store, config)?;
    match args.target {
        ShowTarget::Author { id } => match backend.authors().find_author(&id)? {
            Some(author) => print_table("Author", &author_rows(&author)),
            None => anyhow::bail!("No author with id {id} in {}", backend.location()),
        },
        ShowTarget::Book { id } => match backend.books().find_book(&id)? {
            Some(book) => print_table("Book", &book_rows(&book)),
            None => anyhow::bail!("No book with id {id} in {}", backend.location()),
        },
    }
    Ok(())
}

fn author_rows(author: &Author) -> Vec<(&'static str, String)> {
    vec![
        ("Id", author.id.clone()),
        ("Name", author.name.clone()),
        ("Personal name", author.personal_name.clone()),
    ]
}

fn book_rows(book: &Book) -> Vec<(&'static str, String)> {
    let authors = book
        .author_ids
        .iter()
        .zip(&book.author_names)
        .map(|(id, name)| format!("{name} ({id})"))
        .collect::<Vec<_>>()
        .join(", ");
    vec![
        ("Id", book.id.clone()),
        ("Title", book.name.clone()),
        ("Description", book.description.clone().unwrap_or_default()),
        (
            "Published",
            book.published_date
                .map(|d| d.to_string())
                .unwrap_or_default(),
        ),
        ("Covers", book.cover_ids.join(", ")),
        ("Authors", authors),
    ]
}
