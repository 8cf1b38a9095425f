//! The validation rule shared by `add` and `edit`.

use crate::error::{DirectoryError, Result};
use chrono::Datelike;

/// Earliest release year accepted.
pub const MIN_YEAR: i32 = 1900;

/// Accepted rating bounds (inclusive).
pub const RATING_RANGE: std::ops::RangeInclusive<u8> = 1..=10;

/// Current year according to the local clock.
#[must_use]
pub fn current_year() -> i32 {
    chrono::Local::now().year()
}

/// Latest release year accepted right now: next year, so announced releases fit.
#[must_use]
pub fn max_year() -> i32 {
    current_year() + 1
}

/// Check a full set of entry values against the rule.
///
/// # Errors
///
/// Returns [`DirectoryError::Validation`] naming the first violated constraint.
pub fn validate(artist: &str, album: &str, genre: &str, year: i32, rating: Option<u8>) -> Result<()> {
    validate_with_max_year(artist, album, genre, year, rating, max_year())
}

pub(crate) fn validate_with_max_year(
    artist: &str,
    album: &str,
    genre: &str,
    year: i32,
    rating: Option<u8>,
    max_year: i32,
) -> Result<()> {
    require("artist", artist)?;
    require("album", album)?;
    require("genre", genre)?;

    if !(MIN_YEAR..=max_year).contains(&year) {
        return Err(DirectoryError::validation(format!(
            "year must be between {MIN_YEAR} and {max_year}, got {year}"
        )));
    }

    if let Some(rating) = rating {
        if !RATING_RANGE.contains(&rating) {
            return Err(DirectoryError::validation(format!(
                "rating must be between {} and {}, got {rating}",
                RATING_RANGE.start(),
                RATING_RANGE.end()
            )));
        }
    }

    Ok(())
}

fn require(field: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(DirectoryError::validation(format!("{field} is required")));
    }
    Ok(())
}
