//! # Melomane - Music Directory
//!
//! Command-line front end for the melomane library. Each invocation opens the
//! directory's JSON file, runs one command and exits.
//!
//! ## Usage
//!
//! ```bash
//! melomane add --artist Queen --album "A Night at the Opera" --genre Rock --year 1975
//! melomane list --artist queen
//! melomane edit 1 --rating 9
//! melomane recommend
//! melomane export collection.csv
//! ```

use anyhow::{Context, Result};
use clap::{CommandFactory, Parser};
use log::{debug, info};
use melomane::cli::{self, Command, StatsKind};
use melomane::completion;
use melomane::config::RuntimeConfig;
use melomane::directory::Directory;
use melomane::entry::{EntryUpdate, NewEntry};
use melomane::query::ListQuery;
use melomane::table;

/// Main entry point for the Melomane application.
///
/// Logging goes through `env_logger`, controlled by `RUST_LOG`:
/// - `RUST_LOG=info melomane list` - Show load/save activity
/// - `RUST_LOG=melomane::query=debug melomane list --sort bogus` - Query details
fn main() -> Result<()> {
    env_logger::init();

    let args = cli::Args::parse();

    let config = RuntimeConfig::resolve(args.data)?;
    debug!("Using directory file {}", config.data_path.display());
    let mut directory = Directory::open(&config.data_path);

    match args.command {
        Command::Add { artist, album, genre, year, rating, notes } => {
            let draft = NewEntry::new(artist, album, genre, year)
                .with_rating(rating)
                .with_notes(notes);
            let entry = directory.add(draft).context("Failed to add entry")?;
            println!("Added: ID={} - {} - {}", entry.id, entry.artist, entry.album);
        }
        Command::List { sort, reverse, artist, album, genre, year, rating } => {
            let mut query = ListQuery::new().sort_by(&sort).reverse(reverse);
            for (field, pattern) in [
                ("artist", artist),
                ("album", album),
                ("genre", genre),
                ("year", year),
                ("rating", rating),
            ] {
                if let Some(pattern) = pattern {
                    query = query.filter(field, &pattern);
                }
            }
            println!("{}", table::render_entries(&directory.list(&query)));
        }
        Command::Show { id } => match directory.get(id) {
            Some(entry) => {
                println!("{}", table::render_entries(std::slice::from_ref(entry)));
                println!("Added on {}", entry.created_at);
            }
            None => anyhow::bail!("No entry with ID {id}"),
        },
        Command::Edit { id, artist, album, genre, year, rating, clear_rating, notes } => {
            let update = EntryUpdate {
                artist,
                album,
                genre,
                year,
                rating: if clear_rating { Some(None) } else { rating.map(Some) },
                notes,
            };
            if update.is_empty() {
                println!("Nothing to change.");
                return Ok(());
            }
            if !directory.edit(id, update).context("Failed to edit entry")? {
                anyhow::bail!("No entry with ID {id}");
            }
            println!("Updated entry {id}.");
        }
        Command::Delete { id } => {
            if !directory.delete(id).context("Failed to delete entry")? {
                anyhow::bail!("No entry with ID {id}");
            }
            println!("Deleted entry {id}.");
        }
        Command::Export { path } => {
            directory
                .export_csv(&path)
                .with_context(|| format!("Failed to export to {}", path.display()))?;
            println!("Exported {} entries to {}", directory.len(), path.display());
        }
        Command::Import { path } => {
            let report = directory
                .import_csv(&path)
                .with_context(|| format!("Failed to import {}", path.display()))?;
            for skipped in &report.skipped {
                eprintln!("Skipped line {}: {}", skipped.line, skipped.reason);
            }
            info!("Import finished with {} skipped rows", report.skipped.len());
            println!("Import finished, added entries: {}", report.added);
        }
        Command::Recommend => match directory.recommend() {
            Some(entry) => {
                println!("You should listen to:");
                println!("{}", table::render_entries(std::slice::from_ref(entry)));
            }
            None => println!("Nothing to recommend yet - add some entries."),
        },
        Command::Stats { by } => {
            let rendered = match by {
                StatsKind::Genre => table::render_counts("Genre", &directory.stats_by_genre()),
                StatsKind::Year => table::render_counts("Year", &directory.stats_by_year()),
            };
            println!("{rendered}");
        }
        Command::Completion { shell } => {
            let mut cmd = cli::Args::command();
            completion::generate_completions(completion::shell_to_completion_shell(shell), &mut cmd);
        }
        Command::CompleteGenres => {
            completion::print_genre_completions(&directory);
        }
    }

    Ok(())
}
