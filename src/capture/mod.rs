//! Screenshot capture
//!
//! This module handles:
//! - Building the per-date dashboard URL
//! - Driving a headless Chromium session (session.rs)
//! - Recording the per-date outcome for the run report
//!
//! A failed date never aborts the run; it is logged, recorded as failed and
//! simply missing from the collage.

pub mod session;

pub use session::BrowserSession;

use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::dates::TargetDate;

/// The `{date}` marker a URL template may carry
const DATE_PLACEHOLDER: &str = "{date}";

#[derive(Debug, Error)]
pub enum CaptureError {
    #[error("browser setup failed: {0}")]
    Setup(String),

    #[error("browser protocol error: {0}")]
    Cdp(#[from] chromiumoxide::error::CdpError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("login failed: {0}")]
    Login(String),
}

/// Outcome of one date's capture attempt
#[derive(Debug, Clone)]
pub enum CaptureOutcome {
    /// Screenshot written to this path
    Saved(PathBuf),
    /// Capture failed; the message is what the log line showed
    Failed(String),
}

/// Associates a target date with how its capture went
#[derive(Debug, Clone)]
pub struct CaptureResult {
    pub date: TargetDate,
    pub outcome: CaptureOutcome,
}

impl CaptureResult {
    pub fn saved(date: TargetDate, path: PathBuf) -> Self {
        Self {
            date,
            outcome: CaptureOutcome::Saved(path),
        }
    }

    pub fn failed(date: TargetDate, message: String) -> Self {
        Self {
            date,
            outcome: CaptureOutcome::Failed(message),
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self.outcome, CaptureOutcome::Saved(_))
    }
}

/// Build the request URL for one target date.
///
/// A template containing `{date}` gets the date substituted in place;
/// otherwise the date is appended as a `?date=` query parameter, which is
/// how the Reitti dashboard selects a historical day.
pub fn capture_url(template: &str, date: &TargetDate) -> String {
    let date_str = date.to_string();
    if template.contains(DATE_PLACEHOLDER) {
        template.replace(DATE_PLACEHOLDER, &date_str)
    } else {
        format!("{}?date={}", template, date_str)
    }
}

/// File name for one date's screenshot, e.g. "reitti_2013-11-06.png"
pub fn screenshot_filename(date: &TargetDate) -> String {
    format!("reitti_{}.png", date)
}

/// Full path for one date's screenshot inside the screenshot directory
pub fn screenshot_path(dir: &Path, date: &TargetDate) -> PathBuf {
    dir.join(screenshot_filename(date))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_url_appends_date_query() {
        let date = TargetDate::new(2013, 11, 6);

        assert_eq!(
            capture_url("http://reitti.local/", &date),
            "http://reitti.local/?date=2013-11-06"
        );
    }

    #[test]
    fn test_url_substitutes_placeholder() {
        let date = TargetDate::new(2013, 11, 6);

        assert_eq!(
            capture_url("http://reitti.local/day/{date}/map", &date),
            "http://reitti.local/day/2013-11-06/map"
        );
    }

    #[test]
    fn test_screenshot_filename_contract() {
        let date = TargetDate::new(2013, 11, 6);

        assert_eq!(screenshot_filename(&date), "reitti_2013-11-06.png");
    }

    #[test]
    fn test_screenshot_path_joins_dir() {
        let date = TargetDate::new(2020, 1, 2);
        let path = screenshot_path(Path::new("/out/screenshots"), &date);

        assert_eq!(path, PathBuf::from("/out/screenshots/reitti_2020-01-02.png"));
    }

    #[test]
    fn test_result_success_flag() {
        let date = TargetDate::new(2020, 1, 2);

        assert!(CaptureResult::saved(date, PathBuf::from("x.png")).is_success());
        assert!(!CaptureResult::failed(date, "timeout".into()).is_success());
    }
}
