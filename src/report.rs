//! Human-readable summary output: the figure dictionary listing, sample
//! visualizations, and the blocks-count grouping.

use std::collections::BTreeMap;
use std::fmt::Write;

use crate::block_grid;
use crate::figures::{Coord, FigureSet, sorted_figures};

/// How many figures the visualization section shows by default.
pub const DEFAULT_VISUALIZATION_LIMIT: usize = 10;

/// Brace-delimited listing of every figure and its coordinates, one per
/// line, in numeric-aware id order.
pub fn figure_dictionary(figures: &FigureSet) -> String {
    let mut out = String::from("Figure Dictionary:\n{\n");
    for (id, coords) in sorted_figures(figures) {
        let _ = writeln!(out, "    '{id}': [{}],", coord_list(coords));
    }
    out.push('}');
    out
}

fn coord_list(coords: &[Coord]) -> String {
    coords
        .iter()
        .map(|&(x, y)| format!("({x}, {y})"))
        .collect::<Vec<_>>()
        .join(", ")
}

/// ASCII renders of the first `limit` figures in listing order, each headed
/// by the figure id and block count and closed by a dashed rule.
pub fn sample_visualizations(figures: &FigureSet, limit: usize) -> String {
    let mut out = String::from("Sample Figure Visualizations:\n");
    out.push_str(&"=".repeat(50));

    for (id, coords) in sorted_figures(figures).into_iter().take(limit) {
        let _ = write!(
            out,
            "\n\nFigure {id} ({} blocks):\n{}\n{}",
            coords.len(),
            block_grid::render(coords),
            "-".repeat(20)
        );
    }

    out
}

/// One line per distinct block count, ascending, each listing its figure
/// ids alphabetically.
pub fn blocks_grouping(figures: &FigureSet) -> String {
    let mut by_count: BTreeMap<usize, Vec<&str>> = BTreeMap::new();
    for (id, coords) in figures {
        by_count.entry(coords.len()).or_default().push(id);
    }

    let mut out = String::from("Figures grouped by number of blocks:");
    for (count, mut ids) in by_count {
        ids.sort_unstable();
        let _ = write!(out, "\n{count} blocks: {}", ids.join(", "));
    }
    out
}

/// The full stdout report: total count, dictionary, sample visualizations,
/// and the blocks grouping.
pub fn full_report(figures: &FigureSet, limit: usize) -> String {
    format!(
        "Total figures parsed: {}\n\n{}\n\n\n{}\n\n\n{}",
        figures.len(),
        figure_dictionary(figures),
        sample_visualizations(figures, limit),
        blocks_grouping(figures)
    )
}
