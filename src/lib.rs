//! A melomaniac's music directory: catalogue releases, rate them, get a
//! recommendation.
//!
//! Core modules:
//! - [`directory`] - The collection and all of its operations
//! - [`entry`] - Release records, partial updates, transport form
//! - [`query`] - Filtering and sorting for listings
//! - [`ranking`] - Recommendation order and statistics
//!
//! ### Supporting Modules
//!
//! - [`validation`] - The rule every stored entry satisfies
//! - [`store`] - JSON backing file
//! - [`interchange`] - Semicolon CSV export/import
//! - [`error`] - Error types
//! - [`config`] - Backing file location
//! - [`cli`] - Command-line interface definitions with clap integration
//! - [`completion`] - Shell completion generation
//! - [`table`] - Text tables for the CLI
//!
//! ## Quick Start Example
//!
//! ```no_run
//! use melomane::directory::Directory;
//! use melomane::entry::NewEntry;
//! use melomane::query::ListQuery;
//! use std::path::Path;
//!
//! let mut directory = Directory::open("melomaniac_data.json");
//! directory.add(NewEntry::new("The Beatles", "Abbey Road", "Rock", 1969).with_rating(Some(10)))?;
//! directory.add(NewEntry::new("John Coltrane", "A Love Supreme", "Jazz", 1965))?;
//!
//! let beatles = directory.list(&ListQuery::new().filter("artist", "beatl"));
//! assert_eq!(beatles.len(), 1);
//!
//! if let Some(pick) = directory.recommend() {
//!     println!("Listen to {} by {}", pick.album, pick.artist);
//! }
//!
//! for (genre, count) in directory.stats_by_genre() {
//!     println!("{genre}: {count}");
//! }
//!
//! directory.export_csv(Path::new("export.csv"))?;
//! # Ok::<(), melomane::error::DirectoryError>(())
//! ```
//!
//! ## Persistence
//!
//! Every mutating call rewrites the whole JSON file before returning. There
//! is no locking and no atomic replace: one process should own a file at a
//! time. A file that cannot be parsed is logged and treated as empty.
//!
//! ## Error Handling
//!
//! Library functions return [`error::Result`]. Validation failures never
//! change state; CSV import skips bad rows instead of failing.

pub mod cli;
pub mod completion;
pub mod config;
pub mod directory;
pub mod entry;
pub mod error;
pub mod interchange;
pub mod query;
pub mod ranking;
pub mod store;
pub mod table;
pub mod validation;

pub use directory::{Directory, ImportReport};
pub use entry::{Entry, EntryUpdate, Field, NewEntry};
pub use error::{DirectoryError, Result};
