//! Reitti "this day that year" tools
//!
//! Two run-to-completion binaries share this crate:
//! - `reitti-collage` screenshots the dashboard for today's month/day in
//!   every year since a configured start and composes the shots into one
//!   grid image.
//! - `path-overlay` fetches the same days' GPX tracks from the REST API
//!   and renders them as one multi-year Leaflet map.
//!
//! Both are configured entirely via environment variables and are meant to
//! be fired daily by cron or a container restart policy.

pub mod capture;
pub mod collage;
pub mod config;
pub mod dates;
pub mod overlay;
pub mod report;
