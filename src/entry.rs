//! # Entry Module
//!
//! One music release in the directory, plus the types used to create and
//! change it:
//!
//! - [`Entry`]: the stored record
//! - [`Field`]: fixed enumeration of entry fields, used for sorting and filtering
//! - [`NewEntry`]: draft handed to `Directory::add`
//! - [`EntryUpdate`]: partial update handed to `Directory::edit`
//!
//! ## Transport Form
//!
//! Entries are persisted as flat JSON objects (see [`Entry::to_transport`]).
//! [`Entry::from_transport`] coerces loosely typed values back into an entry:
//! numbers may arrive as strings, a rating may be `null`, `""` or `"None"`.

use crate::error::{DirectoryError, Result};
use serde_json::{Map, Number, Value};
use std::cmp::Ordering;

/// Flat field-name to primitive-value mapping used for persistence.
pub type Transport = Map<String, Value>;

/// Timestamp layout of `created_at`.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Current local time formatted for `created_at`.
#[must_use]
pub fn timestamp_now() -> String {
    chrono::Local::now().format(TIMESTAMP_FORMAT).to_string()
}

/// A single music release.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entry {
    /// Assigned by the directory, never reused.
    pub id: u64,
    pub artist: String,
    pub album: String,
    pub genre: String,
    pub year: i32,
    /// 1..=10, `None` when unrated.
    pub rating: Option<u8>,
    pub notes: String,
    /// Set once at creation.
    pub created_at: String,
}

/// Entry fields addressable by name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Field {
    #[default]
    Id,
    Artist,
    Album,
    Genre,
    Year,
    Rating,
    Notes,
    CreatedAt,
}

impl Field {
    /// All fields in column order.
    pub const ALL: [Field; 8] = [
        Field::Id,
        Field::Artist,
        Field::Album,
        Field::Genre,
        Field::Year,
        Field::Rating,
        Field::Notes,
        Field::CreatedAt,
    ];

    /// Column / transport key of this field.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Field::Id => "id",
            Field::Artist => "artist",
            Field::Album => "album",
            Field::Genre => "genre",
            Field::Year => "year",
            Field::Rating => "rating",
            Field::Notes => "notes",
            Field::CreatedAt => "created_at",
        }
    }

    /// Look a field up by its exact lowercase name.
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|field| field.name() == name)
    }
}

impl Entry {
    pub(crate) fn from_draft(id: u64, draft: &NewEntry, created_at: String) -> Self {
        Self {
            id,
            artist: draft.artist.trim().to_string(),
            album: draft.album.trim().to_string(),
            genre: draft.genre.trim().to_string(),
            year: draft.year,
            rating: draft.rating,
            notes: draft.notes.trim().to_string(),
            created_at,
        }
    }

    /// Stringified value of `field`, `None` only for an unset rating.
    #[must_use]
    pub fn value_text(&self, field: Field) -> Option<String> {
        match field {
            Field::Id => Some(self.id.to_string()),
            Field::Artist => Some(self.artist.clone()),
            Field::Album => Some(self.album.clone()),
            Field::Genre => Some(self.genre.clone()),
            Field::Year => Some(self.year.to_string()),
            Field::Rating => self.rating.map(|r| r.to_string()),
            Field::Notes => Some(self.notes.clone()),
            Field::CreatedAt => Some(self.created_at.clone()),
        }
    }

    /// Compare two entries on a single field.
    ///
    /// Strings compare byte-wise; an unset rating sorts before any rating.
    #[must_use]
    pub fn cmp_by(&self, other: &Self, field: Field) -> Ordering {
        match field {
            Field::Id => self.id.cmp(&other.id),
            Field::Artist => self.artist.cmp(&other.artist),
            Field::Album => self.album.cmp(&other.album),
            Field::Genre => self.genre.cmp(&other.genre),
            Field::Year => self.year.cmp(&other.year),
            Field::Rating => self.rating.cmp(&other.rating),
            Field::Notes => self.notes.cmp(&other.notes),
            Field::CreatedAt => self.created_at.cmp(&other.created_at),
        }
    }

    /// Flatten into a field-name to primitive-value map.
    #[must_use]
    pub fn to_transport(&self) -> Transport {
        let mut map = Map::new();
        map.insert("id".into(), Value::Number(Number::from(self.id)));
        map.insert("artist".into(), Value::String(self.artist.clone()));
        map.insert("album".into(), Value::String(self.album.clone()));
        map.insert("genre".into(), Value::String(self.genre.clone()));
        map.insert("year".into(), Value::Number(Number::from(self.year)));
        map.insert(
            "rating".into(),
            self.rating.map_or(Value::Null, |r| Value::Number(Number::from(r))),
        );
        map.insert("notes".into(), Value::String(self.notes.clone()));
        map.insert("created_at".into(), Value::String(self.created_at.clone()));
        map
    }

    /// Rebuild an entry from its transport form.
    ///
    /// Only coerces types; the validation rule is not applied here.
    ///
    /// # Errors
    ///
    /// [`DirectoryError::Validation`] when a required key is missing or a value
    /// cannot be coerced to the expected type.
    pub fn from_transport(map: &Transport) -> Result<Self> {
        let id = required_int(map, "id")?;
        let id = u64::try_from(id)
            .ok()
            .filter(|id| *id > 0)
            .ok_or_else(|| DirectoryError::validation(format!("id must be a positive integer, got {id}")))?;

        let year = required_int(map, "year")?;
        let year = i32::try_from(year)
            .map_err(|_| DirectoryError::validation(format!("year {year} is out of range")))?;

        Ok(Self {
            id,
            artist: required_text(map, "artist")?,
            album: required_text(map, "album")?,
            genre: required_text(map, "genre")?,
            year,
            rating: coerce_rating(map.get("rating"))?,
            notes: optional_text(map, "notes")?.unwrap_or_default(),
            created_at: optional_text(map, "created_at")?.unwrap_or_else(timestamp_now),
        })
    }
}

/// Parse a loosely typed integer: JSON integers, integral floats and numeric strings.
pub(crate) fn coerce_int(field: &str, value: &Value) -> Result<i64> {
    let parsed = match value {
        Value::Number(n) => n.as_i64().or_else(|| {
            // i64::MAX as f64 rounds up to 2^63, so the upper bound is exclusive
            n.as_f64()
                .filter(|f| f.fract() == 0.0 && *f >= i64::MIN as f64 && *f < i64::MAX as f64)
                .map(|f| f as i64)
        }),
        Value::String(s) => s.trim().parse::<i64>().ok(),
        _ => None,
    };
    parsed.ok_or_else(|| DirectoryError::validation(format!("{field} must be an integer, got {value}")))
}

/// Null, missing, `""` and `"None"` all mean "unrated".
pub(crate) fn coerce_rating(value: Option<&Value>) -> Result<Option<u8>> {
    let value = match value {
        None | Some(Value::Null) => return Ok(None),
        Some(Value::String(s)) if s.trim().is_empty() || s.trim() == "None" => return Ok(None),
        Some(value) => value,
    };
    let rating = coerce_int("rating", value)?;
    u8::try_from(rating)
        .map(Some)
        .map_err(|_| DirectoryError::validation(format!("rating {rating} does not fit in 0..=255")))
}

fn required_int(map: &Transport, key: &str) -> Result<i64> {
    match map.get(key) {
        None | Some(Value::Null) => Err(DirectoryError::validation(format!("missing field `{key}`"))),
        Some(value) => coerce_int(key, value),
    }
}

fn required_text(map: &Transport, key: &str) -> Result<String> {
    optional_text(map, key)?.ok_or_else(|| DirectoryError::validation(format!("missing field `{key}`")))
}

fn optional_text(map: &Transport, key: &str) -> Result<Option<String>> {
    match map.get(key) {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(s)) => Ok(Some(s.clone())),
        Some(Value::Number(n)) => Ok(Some(n.to_string())),
        Some(other) => Err(DirectoryError::validation(format!("{key} must be a string, got {other}"))),
    }
}

/// Values for a new entry, before an id is assigned.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewEntry {
    pub artist: String,
    pub album: String,
    pub genre: String,
    pub year: i32,
    pub rating: Option<u8>,
    pub notes: String,
}

impl NewEntry {
    /// Unrated draft with empty notes.
    pub fn new(
        artist: impl Into<String>,
        album: impl Into<String>,
        genre: impl Into<String>,
        year: i32,
    ) -> Self {
        Self {
            artist: artist.into(),
            album: album.into(),
            genre: genre.into(),
            year,
            rating: None,
            notes: String::new(),
        }
    }

    #[must_use]
    pub fn with_rating(mut self, rating: Option<u8>) -> Self {
        self.rating = rating;
        self
    }

    #[must_use]
    pub fn with_notes(mut self, notes: impl Into<String>) -> Self {
        self.notes = notes.into();
        self
    }
}

/// Partial update: `None` keeps the current value.
///
/// `rating` is doubly optional so an update can clear a rating
/// (`Some(None)`) as well as leave it alone (`None`).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EntryUpdate {
    pub artist: Option<String>,
    pub album: Option<String>,
    pub genre: Option<String>,
    pub year: Option<i32>,
    pub rating: Option<Option<u8>>,
    pub notes: Option<String>,
}

impl EntryUpdate {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn artist(mut self, artist: impl Into<String>) -> Self {
        self.artist = Some(artist.into());
        self
    }

    #[must_use]
    pub fn album(mut self, album: impl Into<String>) -> Self {
        self.album = Some(album.into());
        self
    }

    #[must_use]
    pub fn genre(mut self, genre: impl Into<String>) -> Self {
        self.genre = Some(genre.into());
        self
    }

    #[must_use]
    pub fn year(mut self, year: i32) -> Self {
        self.year = Some(year);
        self
    }

    #[must_use]
    pub fn rating(mut self, rating: Option<u8>) -> Self {
        self.rating = Some(rating);
        self
    }

    #[must_use]
    pub fn notes(mut self, notes: impl Into<String>) -> Self {
        self.notes = Some(notes.into());
        self
    }

    /// True when the update would change nothing.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    /// Merge over `current`, trimming text. `id` and `created_at` are kept.
    pub(crate) fn merged_over(&self, current: &Entry) -> Entry {
        let text = |update: &Option<String>, current: &str| {
            update.as_deref().unwrap_or(current).trim().to_string()
        };
        Entry {
            id: current.id,
            artist: text(&self.artist, &current.artist),
            album: text(&self.album, &current.album),
            genre: text(&self.genre, &current.genre),
            year: self.year.unwrap_or(current.year),
            rating: self.rating.unwrap_or(current.rating),
            notes: text(&self.notes, &current.notes),
            created_at: current.created_at.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn sample() -> Entry {
        Entry {
            id: 3,
            artist: "Miles Davis".to_string(),
            album: "Kind of Blue".to_string(),
            genre: "Jazz".to_string(),
            year: 1959,
            rating: Some(10),
            notes: "modal".to_string(),
            created_at: "2024-05-01 12:00:00".to_string(),
        }
    }

    fn transport(value: Value) -> Transport {
        match value {
            Value::Object(map) => map,
            other => panic!("expected object, got {other}"),
        }
    }

    #[test]
    fn test_transport_is_flat_and_primitive() {
        let map = sample().to_transport();
        assert_eq!(map.len(), 8);
        assert_eq!(map["id"], json!(3));
        assert_eq!(map["year"], json!(1959));
        assert_eq!(map["rating"], json!(10));
        assert_eq!(map["created_at"], json!("2024-05-01 12:00:00"));

        let unrated = Entry { rating: None, ..sample() };
        assert_eq!(unrated.to_transport()["rating"], Value::Null);
    }

    #[test]
    fn test_from_transport_inverts_to_transport() {
        let entry = sample();
        let back = Entry::from_transport(&entry.to_transport()).expect("should coerce");
        assert_eq!(back, entry);
    }

    #[test]
    fn test_from_transport_coerces_numeric_strings() {
        let map = transport(json!({
            "id": "7", "artist": "Can", "album": "Tago Mago", "genre": "Krautrock",
            "year": " 1971 ", "rating": "9", "notes": "", "created_at": "2024-01-01 00:00:00"
        }));
        let entry = Entry::from_transport(&map).expect("numeric strings should coerce");
        assert_eq!(entry.id, 7);
        assert_eq!(entry.year, 1971);
        assert_eq!(entry.rating, Some(9));
    }

    #[test]
    fn test_from_transport_rating_absent_forms() {
        for rating in [Value::Null, json!(""), json!("None")] {
            let mut map = sample().to_transport();
            map.insert("rating".into(), rating);
            assert_eq!(Entry::from_transport(&map).unwrap().rating, None);
        }
        let mut map = sample().to_transport();
        map.remove("rating");
        assert_eq!(Entry::from_transport(&map).unwrap().rating, None);
    }

    #[test]
    fn test_from_transport_rejects_non_integer_year() {
        let mut map = sample().to_transport();
        map.insert("year".into(), json!("nineteen fifty-nine"));
        let err = Entry::from_transport(&map).unwrap_err();
        assert!(err.is_validation());
        assert!(err.to_string().contains("year"));

        map.insert("year".into(), json!(1959.5));
        assert!(Entry::from_transport(&map).is_err());
    }

    #[test]
    fn test_from_transport_rejects_bad_rating_and_id() {
        let mut map = sample().to_transport();
        map.insert("rating".into(), json!("great"));
        assert!(Entry::from_transport(&map).is_err());

        let mut map = sample().to_transport();
        map.insert("id".into(), json!(0));
        assert!(Entry::from_transport(&map).is_err());

        let mut map = sample().to_transport();
        map.remove("artist");
        assert!(Entry::from_transport(&map).unwrap_err().to_string().contains("artist"));
    }

    #[test]
    fn test_from_transport_defaults_optional_fields() {
        let map = transport(json!({
            "id": 1, "artist": "A", "album": "B", "genre": "C", "year": 2000
        }));
        let entry = Entry::from_transport(&map).unwrap();
        assert_eq!(entry.notes, "");
        assert_eq!(entry.rating, None);
        assert_eq!(entry.created_at.len(), "2024-01-01 00:00:00".len());
    }

    #[test]
    fn test_field_lookup() {
        assert_eq!(Field::from_name("artist"), Some(Field::Artist));
        assert_eq!(Field::from_name("created_at"), Some(Field::CreatedAt));
        assert_eq!(Field::from_name("title"), None);
        assert_eq!(Field::from_name("Artist"), None);
        assert_eq!(Field::from_name(" year"), None);
        for field in Field::ALL {
            assert_eq!(Field::from_name(field.name()), Some(field));
        }
    }

    #[test]
    fn test_from_transport_rejects_ids_beyond_i64() {
        for id in [json!(10_000_000_000_000_000_000u64), json!(1.1e19), json!(-1e300)] {
            let mut map = sample().to_transport();
            map.insert("id".into(), id.clone());
            let err = Entry::from_transport(&map).unwrap_err();
            assert!(err.is_validation(), "{id}: {err}");
        }

        let mut map = sample().to_transport();
        map.insert("id".into(), json!(42.0));
        assert_eq!(Entry::from_transport(&map).unwrap().id, 42);
    }

    #[test]
    fn test_rating_coercion_bound_message() {
        let mut map = sample().to_transport();
        map.insert("rating".into(), json!(300));
        let err = Entry::from_transport(&map).unwrap_err();
        assert!(err.to_string().contains("rating 300 does not fit in 0..=255"), "{err}");

        map.insert("rating".into(), json!(11));
        assert_eq!(Entry::from_transport(&map).unwrap().rating, Some(11));
    }

    #[test]
    fn test_value_text_and_ordering() {
        let a = sample();
        let b = Entry { id: 4, rating: None, year: 1960, ..sample() };
        assert_eq!(a.value_text(Field::Year).as_deref(), Some("1959"));
        assert_eq!(b.value_text(Field::Rating), None);
        assert_eq!(b.cmp_by(&a, Field::Rating), Ordering::Less);
        assert_eq!(a.cmp_by(&b, Field::Year), Ordering::Less);
        assert_eq!(a.cmp_by(&b, Field::Artist), Ordering::Equal);
    }

    #[test]
    fn test_update_merge_keeps_identity() {
        let current = sample();
        let merged = EntryUpdate::new()
            .album("  Sketches of Spain ")
            .rating(None)
            .merged_over(&current);
        assert_eq!(merged.id, current.id);
        assert_eq!(merged.created_at, current.created_at);
        assert_eq!(merged.album, "Sketches of Spain");
        assert_eq!(merged.artist, current.artist);
        assert_eq!(merged.rating, None);
        assert!(EntryUpdate::new().is_empty());
        assert!(!EntryUpdate::new().year(1960).is_empty());
    }
}
