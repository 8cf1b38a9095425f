//! List queries: substring filters plus a single sort field.

use crate::entry::{Entry, Field};
use log::debug;

/// One `field contains pattern` condition.
#[derive(Debug, Clone, PartialEq, Eq)]
struct FieldFilter {
    /// `None` when the requested field name is unknown; such a filter matches nothing.
    field: Option<Field>,
    pattern: String,
}

impl FieldFilter {
    fn matches(&self, entry: &Entry) -> bool {
        let Some(field) = self.field else {
            return false;
        };
        entry
            .value_text(field)
            .is_some_and(|text| text.to_lowercase().contains(&self.pattern))
    }
}

/// How `Directory::list` should filter and order entries.
///
/// ```
/// use melomane::query::ListQuery;
///
/// let query = ListQuery::new()
///     .sort_by("year")
///     .reverse(true)
///     .filter("genre", "rock");
/// # let _ = query;
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListQuery {
    sort_field: Field,
    reverse: bool,
    filters: Vec<FieldFilter>,
}

impl ListQuery {
    /// Every entry, ascending by id.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sort by the named field. Unknown names fall back to `id`.
    #[must_use]
    pub fn sort_by(mut self, name: &str) -> Self {
        self.sort_field = Field::from_name(name).unwrap_or_else(|| {
            debug!("Unknown sort field `{name}', sorting by id");
            Field::Id
        });
        self
    }

    #[must_use]
    pub fn reverse(mut self, reverse: bool) -> Self {
        self.reverse = reverse;
        self
    }

    /// Require the named field to contain `pattern`, ignoring case.
    ///
    /// Empty patterns are ignored. A filter on an unknown field name
    /// excludes every entry.
    #[must_use]
    pub fn filter(mut self, name: &str, pattern: &str) -> Self {
        if pattern.is_empty() {
            return self;
        }
        let field = Field::from_name(name);
        if field.is_none() {
            debug!("Filter on unknown field `{name}' will match nothing");
        }
        self.filters.push(FieldFilter {
            field,
            pattern: pattern.to_lowercase(),
        });
        self
    }

    /// True if every filter accepts `entry`.
    #[must_use]
    pub fn matches(&self, entry: &Entry) -> bool {
        self.filters.iter().all(|filter| filter.matches(entry))
    }

    /// Filtered, sorted copy of `entries`. The input order is left alone.
    ///
    /// The sort is stable in both directions: ties keep their input order.
    #[must_use]
    pub fn apply(&self, entries: &[Entry]) -> Vec<Entry> {
        let mut selected: Vec<Entry> = entries
            .iter()
            .filter(|entry| self.matches(entry))
            .cloned()
            .collect();

        let field = self.sort_field;
        if self.reverse {
            selected.sort_by(|a, b| b.cmp_by(a, field));
        } else {
            selected.sort_by(|a, b| a.cmp_by(b, field));
        }
        selected
    }
}
