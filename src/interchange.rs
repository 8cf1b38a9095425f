//! # CSV Interchange
//!
//! Semicolon-delimited export/import of the directory.
//!
//! Export writes the fixed header [`CSV_HEADER`] followed by one row per entry.
//! Import reads rows by header name, so column order in hand-made files does
//! not matter and missing columns read as empty. `id` and `created_at` are
//! ignored on import: imported rows become new entries.

use crate::entry::{coerce_int, coerce_rating, Entry, NewEntry};
use crate::error::{DirectoryError, Result};
use csv::{ReaderBuilder, StringRecord, WriterBuilder};
use serde_json::Value;
use std::path::Path;

/// Field delimiter for both directions.
pub const DELIMITER: u8 = b';';

/// Column order of exported files.
pub const CSV_HEADER: [&str; 8] = [
    "id",
    "artist",
    "album",
    "genre",
    "year",
    "rating",
    "notes",
    "created_at",
];

/// Write `entries` to `path` in the given order.
///
/// # Errors
///
/// [`DirectoryError::Persistence`] when the file cannot be created or written.
pub fn write_csv(path: &Path, entries: &[Entry]) -> Result<()> {
    let mut writer = WriterBuilder::new()
        .delimiter(DELIMITER)
        .from_path(path)
        .map_err(|e| DirectoryError::persistence(path, e))?;

    writer.write_record(CSV_HEADER)?;
    for entry in entries {
        writer.write_record([
            entry.id.to_string(),
            entry.artist.clone(),
            entry.album.clone(),
            entry.genre.clone(),
            entry.year.to_string(),
            entry.rating.map(|r| r.to_string()).unwrap_or_default(),
            entry.notes.clone(),
            entry.created_at.clone(),
        ])?;
    }
    writer.flush().map_err(|e| DirectoryError::persistence(path, e))?;
    Ok(())
}

/// One data row of an import file.
#[derive(Debug)]
pub struct CsvRow {
    /// 1-based line number in the file (the header is line 1).
    pub line: u64,
    /// The draft, or why the row could not be turned into one.
    pub draft: Result<NewEntry>,
}

/// Parse every data row of `path` into an entry draft.
///
/// Rows that fail to decode or coerce are returned as errors in their
/// [`CsvRow`] rather than aborting the read.
///
/// # Errors
///
/// [`DirectoryError::NotFound`] when `path` does not exist,
/// [`DirectoryError::Csv`] when the file or its header cannot be read.
pub fn read_csv(path: &Path) -> Result<Vec<CsvRow>> {
    if !path.exists() {
        return Err(DirectoryError::not_found(path));
    }

    let mut reader = ReaderBuilder::new()
        .delimiter(DELIMITER)
        .flexible(true)
        .from_path(path)?;
    let header = reader.headers()?.clone();

    let rows = reader
        .records()
        .enumerate()
        .map(|(index, record)| {
            let position = match &record {
                Ok(record) => record.position(),
                Err(e) => e.position(),
            };
            let line = position.map_or(index as u64 + 2, |p| p.line());
            let draft = record
                .map_err(DirectoryError::from)
                .and_then(|record| draft_from_record(&header, &record));
            CsvRow { line, draft }
        })
        .collect();

    Ok(rows)
}

fn draft_from_record(header: &StringRecord, record: &StringRecord) -> Result<NewEntry> {
    let cell = |name: &str| column(header, record, name).to_string();

    let year = coerce_int("year", &Value::String(cell("year")))?;
    let year = i32::try_from(year)
        .map_err(|_| DirectoryError::validation(format!("year {year} is out of range")))?;
    let rating = coerce_rating(Some(&Value::String(cell("rating"))))?;

    Ok(NewEntry::new(cell("artist"), cell("album"), cell("genre"), year)
        .with_rating(rating)
        .with_notes(cell("notes")))
}

/// Cell under the header `name`, empty when the column or cell is missing.
fn column<'a>(header: &StringRecord, record: &'a StringRecord, name: &str) -> &'a str {
    header
        .iter()
        .position(|h| h.trim() == name)
        .and_then(|i| record.get(i))
        .unwrap_or("")
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn entry(id: u64, notes: &str, rating: Option<u8>) -> Entry {
        Entry {
            id,
            artist: "Portishead".to_string(),
            album: "Dummy".to_string(),
            genre: "Trip-hop".to_string(),
            year: 1994,
            rating,
            notes: notes.to_string(),
            created_at: "2024-02-02 08:00:00".to_string(),
        }
    }

    #[test]
    fn test_export_layout() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("out.csv");
        write_csv(&path, &[entry(1, "", Some(9)), entry(2, "", None)]).unwrap();

        let raw = fs::read_to_string(&path).unwrap();
        let lines: Vec<&str> = raw.lines().collect();
        assert_eq!(lines[0], "id;artist;album;genre;year;rating;notes;created_at");
        assert_eq!(lines[1], "1;Portishead;Dummy;Trip-hop;1994;9;;2024-02-02 08:00:00");
        assert_eq!(lines[2], "2;Portishead;Dummy;Trip-hop;1994;;;2024-02-02 08:00:00");
    }

    #[test]
    fn test_export_quotes_delimiters() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("out.csv");
        write_csv(&path, &[entry(1, "best; ever", None)]).unwrap();

        let rows = read_csv(&path).unwrap();
        let draft = rows[0].draft.as_ref().unwrap();
        assert_eq!(draft.notes, "best; ever");
    }

    #[test]
    fn test_read_missing_file() {
        let dir = TempDir::new().unwrap();
        let err = read_csv(&dir.path().join("nope.csv")).unwrap_err();
        assert!(matches!(err, DirectoryError::NotFound(_)));
    }

    #[test]
    fn test_read_by_header_name() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("in.csv");
        fs::write(&path, "year;genre;artist;album\n1971;Rock;Led Zeppelin;IV\n").unwrap();

        let rows = read_csv(&path).unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].line, 2);
        let draft = rows[0].draft.as_ref().unwrap();
        assert_eq!(draft.artist, "Led Zeppelin");
        assert_eq!(draft.year, 1971);
        assert_eq!(draft.rating, None);
        assert_eq!(draft.notes, "");
    }

    #[test]
    fn test_bad_rows_are_reported_not_fatal() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("in.csv");
        fs::write(
            &path,
            "artist;album;genre;year;rating\n\
             A;B;C;not-a-year;\n\
             A;B;C;2000;ten\n\
             A;B;C;2000;None\n",
        )
        .unwrap();

        let rows = read_csv(&path).unwrap();
        assert_eq!(rows.len(), 3);
        assert!(rows[0].draft.as_ref().unwrap_err().is_validation());
        assert!(rows[1].draft.is_err());
        assert_eq!(rows[2].draft.as_ref().unwrap().rating, None);
        assert_eq!(rows[2].line, 4);
    }

    #[test]
    fn test_line_numbers_follow_multiline_cells() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("in.csv");
        fs::write(
            &path,
            b"artist;album;genre;year;notes\n\
              A;B;C;2000;\"first\nsecond\nthird\"\n\
              A;B;C;2000;not utf-8 \xff\n",
        )
        .unwrap();

        let rows = read_csv(&path).unwrap();
        assert_eq!(rows[0].line, 2);
        assert_eq!(rows[0].draft.as_ref().unwrap().notes, "first\nsecond\nthird");
        assert!(rows[1].draft.is_err());
        assert_eq!(rows[1].line, 5);
    }
}
