//! Multi-year path overlay
//!
//! This module handles:
//! - Fetching per-year GPX exports from the Reitti REST API (api.rs)
//! - Parsing track points out of the GPX payloads (gpx.rs)
//! - Rendering one interactive Leaflet map with every year's path (map.rs)
//!
//! Where the collage shows what the dashboard looked like, the overlay
//! draws the underlying tracks themselves on a single map.

pub mod api;
pub mod gpx;
pub mod map;

pub use api::ReittiApi;
pub use gpx::{parse_gpx_points, TrackPoint};
pub use map::{overlay_filename, render_overlay_map, YearTrack};

use thiserror::Error;

#[derive(Debug, Error)]
pub enum OverlayError {
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("GPX parse error: {0}")]
    Parse(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
