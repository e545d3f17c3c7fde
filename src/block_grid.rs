//! Bounding-box rasterization of one figure's coordinates into a character
//! grid, plus a JSON cell-matrix form of the same grid.

use crate::figures::Coord;

/// Marker drawn at every occupied cell.
pub const BLOCK_MARKER: &str = "#";

/// Placeholder returned when asked to render a figure with no coordinates.
pub const EMPTY_FIGURE: &str = "Empty figure";

/// Builds the raster as a cell matrix: `grid[y - min_y][x - min_x]` is the
/// block marker for every coordinate, spaces elsewhere. Empty input yields
/// an empty grid.
pub fn grid_cells(coords: &[Coord]) -> Vec<Vec<String>> {
    let Some(&(first_x, first_y)) = coords.first() else {
        return Vec::new();
    };

    let (mut min_x, mut max_x) = (first_x, first_x);
    let (mut min_y, mut max_y) = (first_y, first_y);
    for &(x, y) in coords {
        min_x = min_x.min(x);
        max_x = max_x.max(x);
        min_y = min_y.min(y);
        max_y = max_y.max(y);
    }

    let width = (max_x - min_x) as usize + 1;
    let height = (max_y - min_y) as usize + 1;

    let mut grid = vec![vec![" ".to_string(); width]; height];
    for &(x, y) in coords {
        grid[(y - min_y) as usize][(x - min_x) as usize] = BLOCK_MARKER.to_string();
    }

    grid
}

/// Renders coordinates as text: rows joined top to bottom in increasing y,
/// cropped to the bounding box. An empty figure renders as [`EMPTY_FIGURE`].
pub fn render(coords: &[Coord]) -> String {
    let grid = grid_cells(coords);
    if grid.is_empty() {
        return EMPTY_FIGURE.to_string();
    }

    grid.iter()
        .map(|row| row.concat())
        .collect::<Vec<_>>()
        .join("\n")
}

/// Writes a cell matrix as nested JSON arrays, one grid row per line.
pub fn write_grid_json_string(grid: &[Vec<String>]) -> String {
    if grid.is_empty() {
        return "[]".to_string();
    }

    let rows: Vec<String> = grid
        .iter()
        .map(|row| {
            let cells: Vec<String> = row.iter().map(|cell| format!("\"{cell}\"")).collect();
            format!("  [{}]", cells.join(", "))
        })
        .collect();

    format!("[\n{}\n]", rows.join(",\n"))
}
