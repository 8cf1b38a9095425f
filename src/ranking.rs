//! Recommendation ordering and collection statistics.
//!
//! The recommendation is a plain total order, no scoring model:
//!
//! 1. rating, highest first (unrated counts as 0)
//! 2. year, newest first
//! 3. artist, alphabetical ignoring case
//!
//! Entries still tied after that keep their directory order.

use crate::entry::Entry;
use std::cmp::Ordering;
use std::collections::HashMap;

/// Ordering used by [`recommend`]; `Less` means "recommend first".
#[must_use]
pub fn recommendation_order(a: &Entry, b: &Entry) -> Ordering {
    let rating = |e: &Entry| e.rating.unwrap_or(0);
    rating(b)
        .cmp(&rating(a))
        .then_with(|| b.year.cmp(&a.year))
        .then_with(|| a.artist.to_lowercase().cmp(&b.artist.to_lowercase()))
}

/// Best entry to listen to next, `None` for an empty slice.
#[must_use]
pub fn recommend(entries: &[Entry]) -> Option<&Entry> {
    // min_by keeps the first of equal elements
    entries.iter().min_by(|a, b| recommendation_order(a, b))
}

/// Entry count per genre: count descending, then genre ascending ignoring case.
///
/// Genres are grouped by exact string, so `"Rock"` and `"rock"` are
/// counted separately.
#[must_use]
pub fn genre_counts(entries: &[Entry]) -> Vec<(String, usize)> {
    let mut counts: Vec<(String, usize)> = Vec::new();
    let mut index: HashMap<&str, usize> = HashMap::new();

    for entry in entries {
        match index.get(entry.genre.as_str()) {
            Some(&slot) => counts[slot].1 += 1,
            None => {
                index.insert(&entry.genre, counts.len());
                counts.push((entry.genre.clone(), 1));
            }
        }
    }

    counts.sort_by(|(genre_a, count_a), (genre_b, count_b)| {
        count_b
            .cmp(count_a)
            .then_with(|| genre_a.to_lowercase().cmp(&genre_b.to_lowercase()))
    });
    counts
}

/// Entry count per release year, oldest year first.
#[must_use]
pub fn year_counts(entries: &[Entry]) -> Vec<(i32, usize)> {
    let mut counts: HashMap<i32, usize> = HashMap::new();
    for entry in entries {
        *counts.entry(entry.year).or_default() += 1;
    }
    let mut counts: Vec<(i32, usize)> = counts.into_iter().collect();
    counts.sort_unstable_by_key(|&(year, _)| year);
    counts
}
