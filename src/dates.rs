//! Target date enumeration
//!
//! "This day that year": hold today's month and day fixed and walk the
//! year back to a configured start. Dates are plain (year, month, day)
//! triples so every year in the range gets an entry, whether or not the
//! calendar date exists in it (Feb 29 is the dashboard's problem).

use std::fmt;

use chrono::{Datelike, NaiveDate};

/// One (year, fixed month, fixed day) combination scheduled for capture
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TargetDate {
    /// Calendar year (e.g. 2013)
    pub year: i32,
    /// Month of year, 1-12, fixed for the whole run
    pub month: u32,
    /// Day of month, 1-31, fixed for the whole run
    pub day: u32,
}

impl TargetDate {
    pub fn new(year: i32, month: u32, day: u32) -> Self {
        Self { year, month, day }
    }

    /// The fixed part of the date as "MM-DD" (e.g. "11-06")
    pub fn month_day(&self) -> String {
        format!("{:02}-{:02}", self.month, self.day)
    }
}

impl fmt::Display for TargetDate {
    /// Formats as "YYYY-MM-DD", the form Reitti expects in its date query
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}-{:02}", self.year, self.month, self.day)
    }
}

/// Enumerate the target dates for one run: today's month/day in every year
/// from `start_year` through today's year, ascending.
///
/// If `start_year` is in the future the sequence still contains the current
/// year, so a run is never empty.
pub fn enumerate_target_dates(start_year: i32, today: NaiveDate) -> Vec<TargetDate> {
    let current_year = today.year();
    let first_year = start_year.min(current_year);

    (first_year..=current_year)
        .map(|year| TargetDate::new(year, today.month(), today.day()))
        .collect()
}
