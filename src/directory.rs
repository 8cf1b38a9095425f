//! # Directory Module
//!
//! The in-memory collection of [`Entry`] records and every operation on it.
//!
//! A [`Directory`] is bound to one JSON backing file. It loads the file when
//! opened and rewrites it in full after every successful mutation
//! (`add`, `edit`, `delete`, `import_csv`). Queries never touch the disk.
//!
//! ## Identifiers
//!
//! Ids start at 1 and grow by one per added entry. The next id is not stored:
//! it is rebuilt on load as `max(id) + 1`. Deleting an entry never frees its
//! id for the running directory, but if the highest-id entry is removed from
//! the file by hand, that id will be handed out again.
//!
//! ## Example
//!
//! ```no_run
//! use melomane::directory::Directory;
//! use melomane::entry::{EntryUpdate, NewEntry};
//! use melomane::query::ListQuery;
//!
//! let mut directory = Directory::open("melomaniac_data.json");
//! let entry = directory.add(
//!     NewEntry::new("Miles Davis", "Kind of Blue", "Jazz", 1959).with_rating(Some(10)),
//! )?;
//! directory.edit(entry.id, EntryUpdate::new().notes("modal jazz"))?;
//!
//! for entry in directory.list(&ListQuery::new().filter("genre", "jazz")) {
//!     println!("{} - {}", entry.artist, entry.album);
//! }
//! # Ok::<(), melomane::error::DirectoryError>(())
//! ```

use crate::entry::{timestamp_now, Entry, EntryUpdate, NewEntry};
use crate::error::{DirectoryError, Result};
use crate::query::ListQuery;
use crate::{interchange, ranking, store, validation};
use log::{debug, info, warn};
use std::path::{Path, PathBuf};

/// Outcome of [`Directory::import_csv`].
#[derive(Debug, Default)]
pub struct ImportReport {
    /// Rows that became entries.
    pub added: usize,
    /// Rows that were skipped, in file order.
    pub skipped: Vec<SkippedRow>,
}

/// A CSV row that could not be imported.
#[derive(Debug)]
pub struct SkippedRow {
    pub line: u64,
    pub reason: DirectoryError,
}

/// Music directory bound to a JSON backing file.
#[derive(Debug)]
pub struct Directory {
    path: PathBuf,
    entries: Vec<Entry>,
    next_id: u64,
}

impl Directory {
    /// Open the directory stored at `path`, loading it if the file exists.
    ///
    /// Never fails: a missing or unreadable file yields an empty directory.
    pub fn open(path: impl Into<PathBuf>) -> Self {
        let mut directory = Self {
            path: path.into(),
            entries: Vec::new(),
            next_id: 1,
        };
        directory.load();
        directory
    }

    /// Replace the in-memory state with the backing file's contents.
    ///
    /// A malformed file is logged and treated as empty; its contents are
    /// lost on the next save.
    pub fn load(&mut self) {
        match store::read_entries(&self.path) {
            Ok(Some(entries)) => {
                info!("Loaded {} entries from {}", entries.len(), self.path.display());
                self.entries = entries;
            }
            Ok(None) => {
                info!("No directory file at {}, starting empty", self.path.display());
                self.entries.clear();
            }
            Err(e) => {
                warn!("Could not load directory, starting empty: {e}");
                self.entries.clear();
            }
        }
        self.next_id = self.entries.iter().map(|e| e.id).max().map_or(1, |max| max + 1);
    }

    /// Write the full collection to the backing file.
    ///
    /// # Errors
    ///
    /// [`DirectoryError::Persistence`] if the file cannot be written.
    pub fn save(&self) -> Result<()> {
        store::write_entries(&self.path, &self.entries)
    }

    /// Validate `draft`, store it under the next id and persist.
    ///
    /// # Errors
    ///
    /// [`DirectoryError::Validation`] if the draft breaks the validation rule
    /// (nothing changes), [`DirectoryError::Persistence`] if saving fails.
    pub fn add(&mut self, draft: NewEntry) -> Result<Entry> {
        validation::validate(&draft.artist, &draft.album, &draft.genre, draft.year, draft.rating)?;

        let entry = Entry::from_draft(self.next_id, &draft, timestamp_now());
        self.entries.push(entry.clone());
        self.next_id += 1;
        self.save()?;

        info!("Added entry {}: {} - {}", entry.id, entry.artist, entry.album);
        Ok(entry)
    }

    /// Filtered, sorted copy of the entries.
    #[must_use]
    pub fn list(&self, query: &ListQuery) -> Vec<Entry> {
        let result = query.apply(&self.entries);
        debug!("Query matched {} of {} entries", result.len(), self.entries.len());
        result
    }

    /// Remove the entry with `id`. Returns whether one was removed.
    ///
    /// # Errors
    ///
    /// [`DirectoryError::Persistence`] if saving after the removal fails.
    pub fn delete(&mut self, id: u64) -> Result<bool> {
        let Some(position) = self.entries.iter().position(|e| e.id == id) else {
            debug!("Delete: no entry with id {id}");
            return Ok(false);
        };

        let removed = self.entries.remove(position);
        self.save()?;
        info!("Deleted entry {}: {} - {}", removed.id, removed.artist, removed.album);
        Ok(true)
    }

    /// Apply `update` to the entry with `id`. Returns `false` if there is none.
    ///
    /// The merged values are validated before anything is changed.
    ///
    /// # Errors
    ///
    /// [`DirectoryError::Validation`] if the merged entry breaks the rule
    /// (the stored entry stays as it was), [`DirectoryError::Persistence`]
    /// if saving fails.
    pub fn edit(&mut self, id: u64, update: EntryUpdate) -> Result<bool> {
        let Some(current) = self.entries.iter_mut().find(|e| e.id == id) else {
            debug!("Edit: no entry with id {id}");
            return Ok(false);
        };

        let merged = update.merged_over(current);
        validation::validate(&merged.artist, &merged.album, &merged.genre, merged.year, merged.rating)?;
        *current = merged;

        self.save()?;
        info!("Edited entry {id}");
        Ok(true)
    }

    /// Entry with `id`, if any.
    #[must_use]
    pub fn get(&self, id: u64) -> Option<&Entry> {
        self.entries.iter().find(|e| e.id == id)
    }

    /// Export every entry, in directory order, as semicolon CSV.
    ///
    /// # Errors
    ///
    /// [`DirectoryError::Persistence`] or [`DirectoryError::Csv`] on write failure.
    pub fn export_csv(&self, path: &Path) -> Result<()> {
        interchange::write_csv(path, &self.entries)?;
        info!("Exported {} entries to {}", self.entries.len(), path.display());
        Ok(())
    }

    /// Add every valid row of the CSV file at `path`.
    ///
    /// Rows that fail to decode, coerce or validate are skipped and listed in
    /// the report; they never abort the import.
    ///
    /// # Errors
    ///
    /// [`DirectoryError::NotFound`] if `path` does not exist,
    /// [`DirectoryError::Csv`] if the header cannot be read,
    /// [`DirectoryError::Persistence`] if saving after an added row fails. The
    /// import stops there and, as with [`Directory::add`], the row stays in memory.
    pub fn import_csv(&mut self, path: &Path) -> Result<ImportReport> {
        let mut report = ImportReport::default();

        for row in interchange::read_csv(path)? {
            let outcome = match row.draft {
                Ok(draft) => match self.add(draft) {
                    Err(reason) if !reason.is_validation() => return Err(reason),
                    outcome => outcome,
                },
                Err(reason) => Err(reason),
            };
            match outcome {
                Ok(_) => report.added += 1,
                Err(reason) => {
                    warn!("Skipped CSV line {} ({reason})", row.line);
                    report.skipped.push(SkippedRow { line: row.line, reason });
                }
            }
        }

        info!(
            "Imported {} entries from {} ({} skipped)",
            report.added,
            path.display(),
            report.skipped.len()
        );
        Ok(report)
    }

    /// What to listen to next: highest rating, then newest, then artist name.
    #[must_use]
    pub fn recommend(&self) -> Option<&Entry> {
        ranking::recommend(&self.entries)
    }

    /// Entry count per genre, most common first.
    #[must_use]
    pub fn stats_by_genre(&self) -> Vec<(String, usize)> {
        ranking::genre_counts(&self.entries)
    }

    /// Entry count per release year, oldest first.
    #[must_use]
    pub fn stats_by_year(&self) -> Vec<(i32, usize)> {
        ranking::year_counts(&self.entries)
    }

    /// Distinct genres in first-seen order.
    #[must_use]
    pub fn genres(&self) -> Vec<&str> {
        let mut genres: Vec<&str> = Vec::new();
        for entry in &self.entries {
            if !genres.contains(&entry.genre.as_str()) {
                genres.push(&entry.genre);
            }
        }
        genres
    }

    /// Entries in directory order.
    #[must_use]
    pub fn entries(&self) -> &[Entry] {
        &self.entries
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Id the next added entry will get.
    #[must_use]
    pub const fn next_id(&self) -> u64 {
        self.next_id
    }

    /// Backing file location.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }
}
