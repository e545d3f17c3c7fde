//! Parses block-shape figures out of a row/column CSV layout.
//!
//! A figure starts on a header row (decimal row index in column 0, figure id
//! in column 1) and collects `"x,y"` coordinate cells from column 8 onward,
//! continuing across rows until the next header or end of input.

use csv::ReaderBuilder;
use serde::Serialize;
use std::collections::HashMap;
use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};

/// First column that can hold coordinate cells. Columns 0-7 carry the row
/// index, the figure id, and reserved metadata, and are never scanned.
pub const COORD_COLUMN_OFFSET: usize = 8;

/// One occupied cell of a figure, parsed from a `"x,y"` token.
pub type Coord = (i32, i32);

/// All figures from one file, keyed by figure id. A later definition of an
/// id replaces the earlier one wholesale.
pub type FigureSet = HashMap<String, Vec<Coord>>;

/// Errors that can occur while reading a figures file.
#[derive(Debug, thiserror::Error)]
pub enum FigureError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Parses the figures file at `path`.
///
/// Only an unreadable path is an error; malformed rows and tokens inside the
/// file are skipped without comment.
pub fn parse_file(path: impl AsRef<Path>) -> Result<FigureSet, FigureError> {
    let path = path.as_ref();
    let file = File::open(path).map_err(|source| FigureError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(parse_reader(file))
}

/// Parses figures from any CSV byte stream.
pub fn parse_reader<R: Read>(source: R) -> FigureSet {
    let mut reader = ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(source);

    let mut figures = FigureSet::new();
    let mut current: Option<(String, Vec<Coord>)> = None;

    for record in reader.records() {
        // A record the reader cannot decode is just one more malformed row.
        let Ok(record) = record else { continue };

        if record.iter().all(|cell| cell.trim().is_empty()) {
            continue;
        }

        if is_header_row(&record) {
            commit(&mut figures, current.take());
            current = Some((record[1].trim().to_string(), Vec::new()));
        } else if current.is_none() || record.len() <= COORD_COLUMN_OFFSET {
            continue;
        }

        if let Some((_, coords)) = current.as_mut() {
            for cell in record.iter().skip(COORD_COLUMN_OFFSET) {
                if let Some(coord) = parse_coord_token(cell) {
                    coords.push(coord);
                }
            }
        }
    }

    commit(&mut figures, current.take());
    figures
}

/// A header row has more than two cells, an all-digit row index in cell 0,
/// and a non-empty id in cell 1.
fn is_header_row(record: &csv::StringRecord) -> bool {
    record.len() > 2 && is_all_digits(record[0].trim()) && !record[1].trim().is_empty()
}

/// Commits a pending figure. Figures that never accumulated a coordinate are
/// dropped rather than stored.
fn commit(figures: &mut FigureSet, pending: Option<(String, Vec<Coord>)>) {
    if let Some((id, coords)) = pending
        && !coords.is_empty()
    {
        figures.insert(id, coords);
    }
}

/// Parses a cell of the exact form `<digits>,<digits>`.
///
/// Anything else -- embedded whitespace, signs, a missing half, trailing
/// characters, values too large for `i32` -- is not a coordinate.
pub fn parse_coord_token(cell: &str) -> Option<Coord> {
    let token = cell.trim();
    let (x, y) = token.split_once(',')?;
    if !is_all_digits(x) || !is_all_digits(y) {
        return None;
    }
    Some((x.parse().ok()?, y.parse().ok()?))
}

fn is_all_digits(s: &str) -> bool {
    !s.is_empty() && s.bytes().all(|b| b.is_ascii_digit())
}

/// Sort key used for every ordered listing: ids containing a decimal number
/// order first by that number then by text; ids with no digits come after,
/// by text alone.
pub fn sort_key(id: &str) -> (u8, u128, String) {
    match embedded_number(id) {
        Some(n) => (0, n, id.to_string()),
        None => (1, 0, id.to_string()),
    }
}

/// First run of decimal digits in the id, if any.
fn embedded_number(id: &str) -> Option<u128> {
    let start = id.find(|c: char| c.is_ascii_digit())?;
    let digits: String = id[start..]
        .chars()
        .take_while(|c| c.is_ascii_digit())
        .collect();
    digits.parse().ok()
}

/// Returns the figures sorted by [`sort_key`].
pub fn sorted_figures(figures: &FigureSet) -> Vec<(&str, &[Coord])> {
    let mut entries: Vec<(&str, &[Coord])> = figures
        .iter()
        .map(|(id, coords)| (id.as_str(), coords.as_slice()))
        .collect();
    entries.sort_by_cached_key(|(id, _)| sort_key(id));
    entries
}

/// Serializable form of one parsed figure, used by the `--json` export.
#[derive(Debug, Serialize)]
pub struct FigureExport<'a> {
    pub id: &'a str,
    pub blocks: usize,
    pub coords: &'a [Coord],
}

/// Renders the whole figure set as pretty-printed JSON, in listing order.
pub fn export_json_string(figures: &FigureSet) -> serde_json::Result<String> {
    let entries: Vec<FigureExport> = sorted_figures(figures)
        .into_iter()
        .map(|(id, coords)| FigureExport {
            id,
            blocks: coords.len(),
            coords,
        })
        .collect();
    serde_json::to_string_pretty(&entries)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn parse_str(csv: &str) -> FigureSet {
        parse_reader(Cursor::new(csv))
    }

    #[test]
    fn header_row_starts_figure_with_trimmed_id() {
        let figures = parse_str("7, fig1 ,,,,,,,\"0,0\",\"1,0\"\n");
        assert_eq!(figures.len(), 1);
        assert_eq!(figures["fig1"], vec![(0, 0), (1, 0)]);
    }

    #[test]
    fn continuation_rows_extend_current_figure() {
        let csv = "0,fig1,,,,,,,\"0,0\"\n,,,,,,,,\"1,0\",\"1,1\"\n";
        let figures = parse_str(csv);
        assert_eq!(figures["fig1"], vec![(0, 0), (1, 0), (1, 1)]);
    }

    #[test]
    fn rows_before_any_header_are_dropped() {
        let csv = ",,,,,,,,\"5,5\"\n0,fig1,,,,,,,\"0,0\"\n";
        let figures = parse_str(csv);
        assert_eq!(figures.len(), 1);
        assert_eq!(figures["fig1"], vec![(0, 0)]);
    }

    #[test]
    fn short_continuation_rows_are_ignored() {
        // Eight cells only: nothing at or past the coordinate offset.
        let csv = "0,fig1,,,,,,,\"0,0\"\na,b,c,d,e,f,g,h\n";
        let figures = parse_str(csv);
        assert_eq!(figures["fig1"], vec![(0, 0)]);
    }

    #[test]
    fn token_grammar_accepts_exactly_digits_comma_digits() {
        assert_eq!(parse_coord_token("12,7"), Some((12, 7)));
        assert_eq!(parse_coord_token("  3,4 "), Some((3, 4)));
        assert_eq!(parse_coord_token("12, 7"), None);
        assert_eq!(parse_coord_token("-1,2"), None);
        assert_eq!(parse_coord_token("12"), None);
        assert_eq!(parse_coord_token("a,b"), None);
        assert_eq!(parse_coord_token("1,2,3"), None);
        assert_eq!(parse_coord_token(""), None);
        assert_eq!(parse_coord_token("99999999999,1"), None);
    }

    #[test]
    fn duplicate_ids_keep_only_the_later_figure() {
        let csv = "0,fig1,,,,,,,\"0,0\",\"1,0\"\n1,fig1,,,,,,,\"9,9\"\n";
        let figures = parse_str(csv);
        assert_eq!(figures["fig1"], vec![(9, 9)]);
    }

    #[test]
    fn figures_without_coordinates_are_never_stored() {
        let csv = "0,empty,,\n1,fig1,,,,,,,\"2,2\"\n2,trailing,,\n";
        let figures = parse_str(csv);
        assert_eq!(figures.len(), 1);
        assert!(figures.contains_key("fig1"));
    }

    #[test]
    fn header_without_coordinate_cells_still_switches_figures() {
        // fig1's header has no coordinate cells of its own; the continuation
        // row below it must land on fig1, not the figure before it.
        let csv = "0,fig0,,,,,,,\"0,0\"\n1,fig1,,\n,,,,,,,,\"3,3\"\n";
        let figures = parse_str(csv);
        assert_eq!(figures["fig0"], vec![(0, 0)]);
        assert_eq!(figures["fig1"], vec![(3, 3)]);
    }

    #[test]
    fn sort_key_orders_numbered_ids_numerically() {
        let mut ids = vec!["fig10", "alpha", "fig9", "beta", "fig2"];
        ids.sort_by_cached_key(|id| sort_key(id));
        assert_eq!(ids, vec!["fig2", "fig9", "fig10", "alpha", "beta"]);
    }

    #[test]
    fn export_json_lists_figures_in_sorted_order() {
        let csv = "0,fig2,,,,,,,\"0,0\"\n1,fig1,,,,,,,\"1,1\",\"2,1\"\n";
        let figures = parse_str(csv);
        let json = export_json_string(&figures).expect("export failed");
        let value: serde_json::Value = serde_json::from_str(&json).expect("invalid json");
        let entries = value.as_array().expect("not an array");
        assert_eq!(entries[0]["id"], "fig1");
        assert_eq!(entries[0]["blocks"], 2);
        assert_eq!(entries[1]["id"], "fig2");
        assert_eq!(entries[1]["coords"][0], serde_json::json!([0, 0]));
    }
}
