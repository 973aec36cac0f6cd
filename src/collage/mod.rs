//! Collage composition
//!
//! This module handles:
//! - Scanning the screenshot directory for one month/day across all years (scan.rs)
//! - Composing the matching screenshots into a single grid image (compose.rs)
//!
//! The grid is `columns` wide and `ceil(n / columns)` tall; trailing cells
//! stay white. Everything here works purely off filenames and pixels, so a
//! collage can be rebuilt from historical screenshots without a browser.

pub mod compose;
pub mod scan;

pub use compose::build_collage;
pub use scan::{collage_filename, scan_screenshots, YearShot};

use thiserror::Error;

#[derive(Debug, Error)]
pub enum CollageError {
    #[error("image error: {0}")]
    Image(#[from] image::ImageError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
