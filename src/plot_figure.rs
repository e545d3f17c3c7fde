//! In-memory PNG plot rendering of figure shapes.

use plotters::prelude::*;

use crate::figures::Coord;

/// Pixel size of one block cell in the rendered plot.
pub const CELL_PIXELS: u32 = 24;

const BLOCK_FILL: RGBColor = RGBColor(60, 110, 220);
const GRID_LINE: RGBColor = RGBColor(210, 210, 210);

/// Errors that can occur while plotting a figure.
#[derive(Debug, thiserror::Error)]
pub enum PlotError {
    #[error("figure has no coordinates")]
    EmptyFigure,

    #[error("plot dimensions overflow")]
    DimensionsOverflow,

    #[error("draw failed: {0}")]
    Draw(String),
}

/// Renders a figure's blocks as filled cells on a white background.
///
/// Returns `(width, height, rgba_pixels)` ready for
/// `image::RgbaImage::from_raw`. The raster is cropped to the figure's
/// bounding box, one [`CELL_PIXELS`]-sized square per block, with light
/// grid lines on the cell boundaries.
pub fn render_figure_rgba(coords: &[Coord]) -> Result<(u32, u32, Vec<u8>), PlotError> {
    let Some(&(first_x, first_y)) = coords.first() else {
        return Err(PlotError::EmptyFigure);
    };

    let (mut min_x, mut max_x) = (first_x, first_x);
    let (mut min_y, mut max_y) = (first_y, first_y);
    for &(x, y) in coords {
        min_x = min_x.min(x);
        max_x = max_x.max(x);
        min_y = min_y.min(y);
        max_y = max_y.max(y);
    }

    let cols = (max_x - min_x) as u32 + 1;
    let rows = (max_y - min_y) as u32 + 1;
    let width = cols
        .checked_mul(CELL_PIXELS)
        .and_then(|w| w.checked_add(1))
        .ok_or(PlotError::DimensionsOverflow)?;
    let height = rows
        .checked_mul(CELL_PIXELS)
        .and_then(|h| h.checked_add(1))
        .ok_or(PlotError::DimensionsOverflow)?;
    let pixel_count = (width as usize)
        .checked_mul(height as usize)
        .ok_or(PlotError::DimensionsOverflow)?;

    let mut rgb = vec![255u8; pixel_count * 3];

    {
        let root = BitMapBackend::with_buffer(&mut rgb, (width, height)).into_drawing_area();
        root.fill(&WHITE).map_err(|e| PlotError::Draw(e.to_string()))?;

        for &(x, y) in coords {
            let cx = (x - min_x) as i32 * CELL_PIXELS as i32;
            let cy = (y - min_y) as i32 * CELL_PIXELS as i32;
            root.draw(&Rectangle::new(
                [
                    (cx, cy),
                    (cx + CELL_PIXELS as i32, cy + CELL_PIXELS as i32),
                ],
                BLOCK_FILL.filled(),
            ))
            .map_err(|e| PlotError::Draw(e.to_string()))?;
        }

        // Boundary lines go on top of the fills.
        for col in 0..=cols {
            let x = (col * CELL_PIXELS).min(width - 1) as i32;
            root.draw(&PathElement::new([(x, 0), (x, height as i32 - 1)], GRID_LINE))
                .map_err(|e| PlotError::Draw(e.to_string()))?;
        }
        for row in 0..=rows {
            let y = (row * CELL_PIXELS).min(height - 1) as i32;
            root.draw(&PathElement::new([(0, y), (width as i32 - 1, y)], GRID_LINE))
                .map_err(|e| PlotError::Draw(e.to_string()))?;
        }

        root.present().map_err(|e| PlotError::Draw(e.to_string()))?;
    }

    let mut rgba = vec![255u8; pixel_count * 4];
    for i in 0..pixel_count {
        rgba[i * 4] = rgb[i * 3];
        rgba[i * 4 + 1] = rgb[i * 3 + 1];
        rgba[i * 4 + 2] = rgb[i * 3 + 2];
        rgba[i * 4 + 3] = 255;
    }

    Ok((width, height, rgba))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plot_dimensions_follow_bounding_box() {
        let (w, h, pixels) = render_figure_rgba(&[(0, 0), (1, 0), (0, 1)]).expect("render");
        assert_eq!(w, 2 * CELL_PIXELS + 1);
        assert_eq!(h, 2 * CELL_PIXELS + 1);
        assert_eq!(pixels.len(), (w as usize) * (h as usize) * 4);
    }

    #[test]
    fn plot_paints_block_cells() {
        let (w, _, pixels) = render_figure_rgba(&[(0, 0)]).expect("render");
        // Sample mid-cell: must be the block fill, not background white.
        let mid = CELL_PIXELS / 2;
        let idx = ((mid * w + mid) * 4) as usize;
        assert_eq!(
            (pixels[idx], pixels[idx + 1], pixels[idx + 2]),
            (BLOCK_FILL.0, BLOCK_FILL.1, BLOCK_FILL.2)
        );
    }

    #[test]
    fn empty_figure_is_an_error() {
        assert!(matches!(render_figure_rgba(&[]), Err(PlotError::EmptyFigure)));
    }
}
