//! # Command-Line Interface Module
//!
//! Clap derive definitions for the `melomane` binary. Each subcommand maps to
//! one directory operation; `main` does the dispatch and printing.
//!
//! ## Commands
//!
//! - `add`: Add a release
//! - `list`: Show releases, optionally filtered and sorted
//! - `show`, `edit`, `delete`: Work on one release by id
//! - `export`, `import`: Semicolon CSV interchange
//! - `recommend`: Pick something to listen to
//! - `stats`: Counts per genre or per year
//!
//! ## Examples
//!
//! ```bash
//! melomane add --artist "Miles Davis" --album "Kind of Blue" --genre Jazz --year 1959 --rating 10
//! melomane list --genre jazz --sort year --reverse
//! melomane --data ~/music.json recommend
//! ```

use crate::config::DATA_ENV_VAR;
use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// Shell types supported for completion generation
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, ValueEnum, Debug)]
#[allow(clippy::enum_variant_names)]
pub enum Shell {
    /// Bash shell
    Bash,
    /// Zsh shell
    Zsh,
    /// Fish shell
    Fish,
    /// PowerShell
    PowerShell,
    /// Elvish shell
    Elvish,
}

/// What `stats` groups entries by
#[derive(Copy, Clone, PartialEq, Eq, ValueEnum, Debug, Default)]
pub enum StatsKind {
    /// Count per genre, most common first
    #[default]
    Genre,
    /// Count per release year, oldest first
    Year,
}

/// Main application arguments structure.
#[derive(Parser, Debug)]
#[command(name = "melomane")]
#[command(about = "Melomane: a melomaniac's music directory")]
#[command(version)]
pub struct Args {
    /// JSON file holding the directory
    ///
    /// Defaults to melomaniac_data.json in the current directory.
    #[arg(long, global = true, env = DATA_ENV_VAR, value_hint = clap::ValueHint::FilePath)]
    pub data: Option<PathBuf>,

    /// The subcommand to execute
    #[command(subcommand)]
    pub command: Command,
}

/// Enumeration of all available subcommands.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Add a release to the directory
    ///
    /// Artist, album and genre must not be blank; the year must lie between
    /// 1900 and next year; the rating, if given, between 1 and 10.
    Add {
        #[arg(long)]
        artist: String,

        #[arg(long)]
        album: String,

        #[arg(long)]
        genre: String,

        #[arg(long)]
        year: i32,

        /// Rating from 1 to 10 (omit for unrated)
        #[arg(long)]
        rating: Option<u8>,

        #[arg(long, default_value = "")]
        notes: String,
    },

    /// List releases
    ///
    /// Filters are case-insensitive substrings and must all match.
    /// Without --sort, releases are listed by id.
    List {
        /// Field to sort by: id, artist, album, genre, year, rating, notes, created_at
        ///
        /// Unknown field names sort by id.
        #[arg(long, default_value = "id")]
        sort: String,

        /// Sort in descending order
        #[arg(short, long)]
        reverse: bool,

        #[arg(long)]
        artist: Option<String>,

        #[arg(long)]
        album: Option<String>,

        #[arg(long)]
        genre: Option<String>,

        #[arg(long)]
        year: Option<String>,

        #[arg(long)]
        rating: Option<String>,
    },

    /// Show a single release
    Show {
        id: u64,
    },

    /// Change fields of a release
    ///
    /// Only the given fields change. The result is validated like a new
    /// release before it is stored.
    Edit {
        id: u64,

        #[arg(long)]
        artist: Option<String>,

        #[arg(long)]
        album: Option<String>,

        #[arg(long)]
        genre: Option<String>,

        #[arg(long)]
        year: Option<i32>,

        /// New rating from 1 to 10
        #[arg(long, conflicts_with = "clear_rating")]
        rating: Option<u8>,

        /// Mark the release as unrated
        #[arg(long)]
        clear_rating: bool,

        #[arg(long)]
        notes: Option<String>,
    },

    /// Delete a release
    Delete {
        id: u64,
    },

    /// Export all releases as semicolon-separated CSV
    Export {
        #[arg(default_value = "export.csv", value_hint = clap::ValueHint::FilePath)]
        path: PathBuf,
    },

    /// Import releases from a semicolon-separated CSV file
    ///
    /// Rows are matched by header name; id and created_at columns are
    /// ignored. Invalid rows are skipped and reported.
    Import {
        #[arg(value_hint = clap::ValueHint::FilePath)]
        path: PathBuf,
    },

    /// Recommend something to listen to
    ///
    /// Highest rating wins, then the newest release, then artist name.
    Recommend,

    /// Show collection statistics
    Stats {
        #[arg(long, value_enum, default_value_t = StatsKind::Genre)]
        by: StatsKind,
    },

    /// Generate shell completions
    ///
    /// Usage: melomane completion bash > ~/.local/share/bash-completion/completions/melomane
    Completion {
        /// Shell to generate completions for
        shell: Shell,
    },

    /// List known genres for completion (hidden command)
    #[command(hide = true)]
    CompleteGenres,
}
