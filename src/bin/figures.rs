use clap::Parser;
use std::error::Error;
use std::fs;
use std::path::{Path, PathBuf};

use figure_reader::block_grid::{grid_cells, write_grid_json_string};
use figure_reader::figures::{export_json_string, parse_file, sorted_figures};
use figure_reader::plot_figure::render_figure_rgba;
use figure_reader::report;

#[derive(Parser, Debug)]
#[command(
    name = "figures",
    about = "Parse block-shape figures from CSV, render them, and group by size",
    version
)]
struct Cli {
    /// Path to the figures CSV file
    #[arg(short = 'f', long = "file", default_value = "csv/figures.csv")]
    file: PathBuf,

    /// How many figures the visualization and file outputs cover
    #[arg(short = 'l', long = "limit", default_value_t = report::DEFAULT_VISUALIZATION_LIMIT)]
    limit: usize,

    /// Write the parsed figure set to figures.json
    #[arg(long = "json", short = 'j')]
    json: bool,

    /// Write each rendered grid as a JSON cell matrix
    #[arg(long = "grids", short = 'g')]
    grids: bool,

    /// Write one PNG plot per figure
    #[arg(long = "plot", short = 'p')]
    plot: bool,
}

fn write_text_file(path: &Path, contents: &str) -> Result<(), Box<dyn Error>> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        fs::create_dir_all(parent)?;
    }
    fs::write(path, contents)?;
    Ok(())
}

fn main() -> Result<(), Box<dyn Error>> {
    let cli = Cli::parse();

    let figures = parse_file(&cli.file)?;
    println!("{}", report::full_report(&figures, cli.limit));

    if cli.json {
        let out_json = PathBuf::from("figures.json");
        match export_json_string(&figures) {
            Ok(s) => {
                if let Err(e) = write_text_file(&out_json, &s) {
                    eprintln!("Failed to write {}: {e}", out_json.display());
                }
            }
            Err(e) => eprintln!("Failed to serialize figures: {e}"),
        }
    }

    if !cli.grids && !cli.plot {
        return Ok(());
    }

    for (i, (id, coords)) in sorted_figures(&figures).into_iter().take(cli.limit).enumerate() {
        if cli.grids {
            let out_grid = PathBuf::from(format!("figure_{i}_grid.json"));
            let s = write_grid_json_string(&grid_cells(coords));
            if let Err(e) = write_text_file(&out_grid, &s) {
                eprintln!("Failed to write grid {} for {id}: {e}", out_grid.display());
            }
        }

        if cli.plot {
            let out_plot = PathBuf::from(format!("figure_{i}_plot.png"));
            match render_figure_rgba(coords) {
                Ok((w, h, pixels)) => {
                    if let Some(rgba) = image::RgbaImage::from_raw(w, h, pixels) {
                        if let Err(e) = rgba.save(&out_plot) {
                            eprintln!("Failed to save plot {} for {id}: {e}", out_plot.display());
                        }
                    } else {
                        eprintln!(
                            "Failed to build RGBA image for plot {} ({w}x{h})",
                            out_plot.display()
                        );
                    }
                }
                Err(e) => {
                    eprintln!("Failed to render plot {} for {id}: {e}", out_plot.display());
                }
            }
        }
    }

    Ok(())
}
