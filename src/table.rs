//! Plain-text table rendering for the CLI.

use crate::entry::Entry;

const ENTRY_COLUMNS: [&str; 7] = ["ID", "Artist", "Album", "Genre", "Year", "Rating", "Notes"];

/// Render entries as a padded table, or `No entries.` when empty.
#[must_use]
pub fn render_entries(entries: &[Entry]) -> String {
    if entries.is_empty() {
        return "No entries.".to_string();
    }

    let rows: Vec<Vec<String>> = entries
        .iter()
        .map(|e| {
            vec![
                e.id.to_string(),
                e.artist.clone(),
                e.album.clone(),
                e.genre.clone(),
                e.year.to_string(),
                e.rating.map_or_else(|| "-".to_string(), |r| r.to_string()),
                if e.notes.is_empty() { "-".to_string() } else { e.notes.clone() },
            ]
        })
        .collect();

    render(&ENTRY_COLUMNS, &rows)
}

/// Render `(key, count)` pairs under the given key heading.
#[must_use]
pub fn render_counts<K: ToString>(heading: &str, counts: &[(K, usize)]) -> String {
    if counts.is_empty() {
        return "No statistics yet.".to_string();
    }
    let rows: Vec<Vec<String>> = counts
        .iter()
        .map(|(key, count)| vec![key.to_string(), count.to_string()])
        .collect();
    render(&[heading, "Count"], &rows)
}

fn render(columns: &[&str], rows: &[Vec<String>]) -> String {
    let mut widths: Vec<usize> = columns.iter().map(|c| c.chars().count()).collect();
    for row in rows {
        for (width, cell) in widths.iter_mut().zip(row) {
            *width = (*width).max(cell.chars().count());
        }
    }

    let mut out = Vec::with_capacity(rows.len() + 2);
    out.push(format_line(columns.iter().copied(), &widths));
    out.push(widths.iter().map(|&w| "-".repeat(w)).collect::<Vec<_>>().join("-+-"));
    for row in rows {
        out.push(format_line(row.iter().map(String::as_str), &widths));
    }
    out.join("\n")
}

fn format_line<'a>(cells: impl Iterator<Item = &'a str>, widths: &[usize]) -> String {
    cells
        .zip(widths)
        .map(|(cell, &width)| format!("{cell:<width$}"))
        .collect::<Vec<_>>()
        .join(" | ")
        .trim_end()
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(id: u64, artist: &str, rating: Option<u8>, notes: &str) -> Entry {
        Entry {
            id,
            artist: artist.to_string(),
            album: "Album".to_string(),
            genre: "Rock".to_string(),
            year: 2001,
            rating,
            notes: notes.to_string(),
            created_at: "2024-01-01 00:00:00".to_string(),
        }
    }

    #[test]
    fn test_empty_table() {
        assert_eq!(render_entries(&[]), "No entries.");
        assert_eq!(render_counts::<String>("Genre", &[]), "No statistics yet.");
    }

    #[test]
    fn test_columns_are_aligned() {
        let out = render_entries(&[entry(1, "Björk", Some(9), ""), entry(12, "The Strokes", None, "debut")]);
        let lines: Vec<&str> = out.lines().collect();
        assert_eq!(lines.len(), 4);
        assert!(lines[0].starts_with("ID | Artist      | Album | Genre | Year | Rating | Notes"));
        assert!(lines[1].starts_with("---+-------------+-"));
        assert_eq!(lines[2], "1  | Björk       | Album | Rock  | 2001 | 9      | -");
        assert_eq!(lines[3], "12 | The Strokes | Album | Rock  | 2001 | -      | debut");
    }

    #[test]
    fn test_counts_table() {
        let out = render_counts("Genre", &[("Rock".to_string(), 2), ("Jazz".to_string(), 1)]);
        assert_eq!(out, "Genre | Count\n------+------\nRock  | 2\nJazz  | 1");
    }
}
