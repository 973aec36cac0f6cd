//! Grid composition
//!
//! All screenshots of one month/day are pasted onto a white canvas,
//! left-to-right and top-to-bottom in ascending year order. The first
//! image's dimensions become the uniform cell size; anything captured at a
//! different resolution is resized to fit its cell.

use std::path::{Path, PathBuf};

use image::imageops::FilterType;
use image::{imageops, Rgb, RgbImage};

use super::scan::{collage_filename, scan_screenshots};
use super::CollageError;

/// Number of grid rows needed for `count` cells at `columns` per row
pub fn grid_rows(count: usize, columns: u32) -> u32 {
    let count = count as u32;
    count.div_ceil(columns)
}

/// Paste `cells` onto a fresh white canvas, `columns` per row.
///
/// Every cell is assumed to share the dimensions of the first one; callers
/// resize beforehand. `cells` must not be empty.
pub fn render_grid(cells: &[RgbImage], columns: u32) -> RgbImage {
    let cell_width = cells[0].width();
    let cell_height = cells[0].height();
    let rows = grid_rows(cells.len(), columns);

    let mut canvas = RgbImage::from_pixel(
        columns * cell_width,
        rows * cell_height,
        Rgb([255, 255, 255]),
    );

    for (index, cell) in cells.iter().enumerate() {
        let col = index as u32 % columns;
        let row = index as u32 / columns;
        let x = i64::from(col * cell_width);
        let y = i64::from(row * cell_height);
        imageops::replace(&mut canvas, cell, x, y);
    }

    canvas
}

/// Compose the collage for one month/day from the screenshots on disk.
///
/// Scans `screenshot_dir`, decodes every matching year (skipping unreadable
/// files with a warning), and writes the grid to `collage_dir`. Returns the
/// written path, or `None` when there was nothing usable to compose. That
/// case is a diagnostic, not an error.
pub fn build_collage(
    screenshot_dir: &Path,
    collage_dir: &Path,
    month: u32,
    day: u32,
    columns: u32,
) -> Result<Option<PathBuf>, CollageError> {
    let shots = scan_screenshots(screenshot_dir, month, day)?;

    // Decode what we can; a corrupt file costs us one year, not the collage
    let mut years: Vec<i32> = Vec::new();
    let mut cells: Vec<RgbImage> = Vec::new();
    for shot in &shots {
        match image::open(&shot.path) {
            Ok(img) => {
                years.push(shot.year);
                cells.push(img.to_rgb8());
            }
            Err(e) => {
                eprintln!("⚠️  Skipping unreadable {}: {}", shot.path.display(), e);
            }
        }
    }

    if cells.is_empty() {
        println!(
            "⚠️  No screenshots for {:02}-{:02} in {}, skipping collage",
            month,
            day,
            screenshot_dir.display()
        );
        return Ok(None);
    }

    // First image sets the cell size; resize any stragglers to match
    let cell_width = cells[0].width();
    let cell_height = cells[0].height();
    for cell in cells.iter_mut() {
        if cell.width() != cell_width || cell.height() != cell_height {
            *cell = imageops::resize(cell, cell_width, cell_height, FilterType::Lanczos3);
        }
    }

    let canvas = render_grid(&cells, columns);

    let min_year = years[0];
    let max_year = years[years.len() - 1];

    std::fs::create_dir_all(collage_dir)?;
    let output = collage_dir.join(collage_filename(month, day, min_year, max_year));
    canvas.save(&output)?;

    println!(
        "✅ Collage saved to {} ({} years, {}x{})",
        output.display(),
        cells.len(),
        canvas.width(),
        canvas.height()
    );

    Ok(Some(output))
}
