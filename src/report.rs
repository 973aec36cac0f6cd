//! Run report
//!
//! A machine-readable record of one run: every date attempted, how it went,
//! and whether a collage came out of it. Serialized to JSON next to the
//! screenshots so the scheduler's last run can be inspected without
//! scrolling container logs.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::capture::{CaptureOutcome, CaptureResult};

/// Outcome of a single date within a run
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct RunEntry {
    /// The target date as "YYYY-MM-DD"
    pub date: String,
    pub ok: bool,
    /// Path the screenshot was saved to, on success
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub path: Option<String>,
    /// What went wrong, on failure
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub error: Option<String>,
}

/// Summary of one full run
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct RunReport {
    /// The fixed month/day as "MM-DD"
    pub month_day: String,
    pub attempted: usize,
    pub succeeded: usize,
    pub entries: Vec<RunEntry>,
    /// Path of the collage written by this run, if any
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub collage: Option<String>,
}

impl RunReport {
    /// Build the report from the capture loop's results
    pub fn from_results(
        month_day: String,
        results: &[CaptureResult],
        collage: Option<&Path>,
    ) -> Self {
        let entries: Vec<RunEntry> = results
            .iter()
            .map(|result| match &result.outcome {
                CaptureOutcome::Saved(path) => RunEntry {
                    date: result.date.to_string(),
                    ok: true,
                    path: Some(path.display().to_string()),
                    error: None,
                },
                CaptureOutcome::Failed(message) => RunEntry {
                    date: result.date.to_string(),
                    ok: false,
                    path: None,
                    error: Some(message.clone()),
                },
            })
            .collect();

        let succeeded = entries.iter().filter(|e| e.ok).count();

        Self {
            month_day,
            attempted: entries.len(),
            succeeded,
            entries,
            collage: collage.map(|p| p.display().to_string()),
        }
    }

    /// Convert to pretty JSON for writing to disk
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Parse from JSON
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}

/// File name the report is written under, e.g. "reitti_run_11-06.json"
pub fn report_filename(month_day: &str) -> String {
    format!("reitti_run_{}.json", month_day)
}
