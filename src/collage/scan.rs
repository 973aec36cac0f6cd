//! Screenshot directory scanning
//!
//! Collages are rebuilt from whatever is on disk, not just from the current
//! run, so older years captured by earlier runs keep appearing. Only files
//! matching the fixed month/day are eligible; cross-day mixing is never
//! allowed.

use std::path::{Path, PathBuf};

use walkdir::WalkDir;

use super::CollageError;

/// One on-disk screenshot attributed to its year
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct YearShot {
    pub year: i32,
    pub path: PathBuf,
}

/// Scan `dir` for screenshots of the given month/day, across all years.
///
/// Returns the matches sorted ascending by year. A missing directory is
/// treated the same as an empty one.
pub fn scan_screenshots(dir: &Path, month: u32, day: u32) -> Result<Vec<YearShot>, CollageError> {
    let mut shots = Vec::new();

    for entry in WalkDir::new(dir)
        .max_depth(1)
        .into_iter()
        .filter_map(|e| e.ok())
    {
        let path = entry.path();
        if !path.is_file() {
            continue;
        }

        let Some(name) = path.file_name().and_then(|n| n.to_str()) else {
            continue;
        };

        if let Some((year, file_month, file_day)) = parse_screenshot_name(name) {
            if file_month == month && file_day == day {
                shots.push(YearShot {
                    year,
                    path: path.to_path_buf(),
                });
            }
        }
    }

    shots.sort_by_key(|shot| shot.year);
    Ok(shots)
}

/// Parse "reitti_YYYY-MM-DD.png" into (year, month, day)
fn parse_screenshot_name(name: &str) -> Option<(i32, u32, u32)> {
    let date_str = name.strip_prefix("reitti_")?.strip_suffix(".png")?;

    let mut parts = date_str.splitn(3, '-');
    let year: i32 = parts.next()?.parse().ok()?;
    let month: u32 = parts.next()?.parse().ok()?;
    let day: u32 = parts.next()?.parse().ok()?;

    Some((year, month, day))
}

/// File name for a composed collage, e.g. "reitti_collage_11-06_2012-2025.png"
pub fn collage_filename(month: u32, day: u32, min_year: i32, max_year: i32) -> String {
    format!(
        "reitti_collage_{:02}-{:02}_{}-{}.png",
        month, day, min_year, max_year
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn test_parse_screenshot_name() {
        assert_eq!(
            parse_screenshot_name("reitti_2013-11-06.png"),
            Some((2013, 11, 6))
        );
        assert_eq!(parse_screenshot_name("reitti_2013-11-06.jpg"), None);
        assert_eq!(parse_screenshot_name("collage_2013-11-06.png"), None);
        assert_eq!(parse_screenshot_name("reitti_notadate.png"), None);
    }

    #[test]
    fn test_collage_filename_contract() {
        assert_eq!(
            collage_filename(11, 6, 2012, 2025),
            "reitti_collage_11-06_2012-2025.png"
        );
    }

    #[test]
    fn test_scan_filters_and_sorts() {
        let dir = tempfile::tempdir().unwrap();

        // Out of order on purpose; plus a different day and a stray file
        for name in [
            "reitti_2020-11-06.png",
            "reitti_2013-11-06.png",
            "reitti_2015-11-06.png",
            "reitti_2014-11-07.png",
            "notes.txt",
        ] {
            fs::write(dir.path().join(name), b"x").unwrap();
        }

        let shots = scan_screenshots(dir.path(), 11, 6).unwrap();

        let years: Vec<i32> = shots.iter().map(|s| s.year).collect();
        assert_eq!(years, vec![2013, 2015, 2020]);
    }

    #[test]
    fn test_scan_missing_dir_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("does-not-exist");

        let shots = scan_screenshots(&missing, 11, 6).unwrap();

        assert!(shots.is_empty());
    }
}
