//! Environment-variable configuration
//!
//! Both binaries are configured entirely through the environment, the way
//! they run inside a container. Anything missing or malformed here is fatal
//! at startup; nothing else in the pipeline is allowed to abort the run.

use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use chrono::{Datelike, Local, NaiveDate};
use thiserror::Error;

/// Configuration problems are the only fatal error class in the system
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{0} is not set")]
    Missing(&'static str),

    #[error("invalid value for {name}: {value:?}")]
    Invalid { name: &'static str, value: String },

    #[error("{0} must be greater than zero")]
    NotPositive(&'static str),

    #[error("START_YEAR must be 1900 or later, got {0}")]
    StartYearTooEarly(i32),

    #[error("REITTI_USERNAME and REITTI_PASSWORD must be set together")]
    PartialCredentials,
}

/// Settings for the screenshot/collage run
#[derive(Debug, Clone)]
pub struct CollageConfig {
    /// Base URL of the Reitti instance, or a template containing `{date}`
    pub base_url: String,
    /// Optional login credentials; both set or neither
    pub username: Option<String>,
    pub password: Option<String>,
    /// First year to capture (walking forward to the current year)
    pub start_year: i32,
    /// Settle wait after navigation, before the screenshot is taken
    pub wait_time: Duration,
    /// Settle wait after submitting the login form
    pub login_wait_time: Duration,
    /// Viewport size of the captured page
    pub width: u32,
    pub height: u32,
    /// Number of columns in the collage grid
    pub columns: u32,
    /// Root output directory (screenshots/ and collages/ live below it)
    pub output_dir: PathBuf,
}

impl CollageConfig {
    /// Read the configuration from the process environment
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Build from an arbitrary lookup function so tests never have to touch
    /// the process environment
    pub fn from_lookup<F>(get: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |name: &'static str| get(name).filter(|v| !v.trim().is_empty());

        let base_url = get("REITTI_URL").ok_or(ConfigError::Missing("REITTI_URL"))?;

        let username = get("REITTI_USERNAME");
        let password = get("REITTI_PASSWORD");
        if username.is_some() != password.is_some() {
            return Err(ConfigError::PartialCredentials);
        }

        let start_year: i32 = parse_or("START_YEAR", get("START_YEAR"), 2012)?;
        if start_year < 1900 {
            return Err(ConfigError::StartYearTooEarly(start_year));
        }

        let wait_secs: u64 = parse_or("WAIT_TIME", get("WAIT_TIME"), 5)?;
        let login_wait_secs: u64 = parse_or("LOGIN_WAIT_TIME", get("LOGIN_WAIT_TIME"), 3)?;

        let width: u32 = parse_or("SCREENSHOT_WIDTH", get("SCREENSHOT_WIDTH"), 1920)?;
        let height: u32 = parse_or("SCREENSHOT_HEIGHT", get("SCREENSHOT_HEIGHT"), 1080)?;
        if width == 0 {
            return Err(ConfigError::NotPositive("SCREENSHOT_WIDTH"));
        }
        if height == 0 {
            return Err(ConfigError::NotPositive("SCREENSHOT_HEIGHT"));
        }

        let columns: u32 = parse_or("COLLAGE_COLUMNS", get("COLLAGE_COLUMNS"), 3)?;
        if columns == 0 {
            return Err(ConfigError::NotPositive("COLLAGE_COLUMNS"));
        }

        let output_dir = PathBuf::from(get("OUTPUT_DIR").unwrap_or_else(|| "output".to_string()));

        Ok(Self {
            base_url,
            username,
            password,
            start_year,
            wait_time: Duration::from_secs(wait_secs),
            login_wait_time: Duration::from_secs(login_wait_secs),
            width,
            height,
            columns,
            output_dir,
        })
    }

    /// Directory the per-date screenshots are written to
    pub fn screenshot_dir(&self) -> PathBuf {
        self.output_dir.join("screenshots")
    }

    /// Directory the composed collages are written to
    pub fn collage_dir(&self) -> PathBuf {
        self.output_dir.join("collages")
    }

    /// Credentials as a pair, if login is configured
    pub fn credentials(&self) -> Option<(&str, &str)> {
        match (&self.username, &self.password) {
            (Some(user), Some(pass)) => Some((user, pass)),
            _ => None,
        }
    }
}

/// Settings for the path-overlay run
#[derive(Debug, Clone)]
pub struct OverlayConfig {
    /// Base URL of the Reitti instance
    pub base_url: String,
    /// API token sent as X-API-TOKEN on every export request
    pub api_token: String,
    /// Year span to fetch, inclusive on both ends
    pub start_year: i32,
    pub end_year: i32,
    /// The day being overlaid; defaults to today
    pub target_date: NaiveDate,
    /// Root output directory
    pub output_dir: PathBuf,
}

impl OverlayConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok(), Local::now().date_naive())
    }

    pub fn from_lookup<F>(get: F, today: NaiveDate) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |name: &'static str| get(name).filter(|v| !v.trim().is_empty());

        let base_url = get("REITTI_URL").ok_or(ConfigError::Missing("REITTI_URL"))?;
        let api_token = get("REITTI_API_TOKEN").ok_or(ConfigError::Missing("REITTI_API_TOKEN"))?;

        let start_year: i32 = parse_or("START_YEAR", get("START_YEAR"), 2012)?;
        let end_year: i32 = parse_or("END_YEAR", get("END_YEAR"), today.year())?;

        let target_date = match get("TARGET_DATE") {
            Some(raw) => NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d").map_err(|_| {
                ConfigError::Invalid {
                    name: "TARGET_DATE",
                    value: raw,
                }
            })?,
            None => today,
        };

        let output_dir = PathBuf::from(get("OUTPUT_DIR").unwrap_or_else(|| "output".to_string()));

        Ok(Self {
            base_url,
            api_token,
            start_year,
            end_year,
            target_date,
            output_dir,
        })
    }
}

/// Parse an optional environment value, falling back to a default
fn parse_or<T: FromStr>(
    name: &'static str,
    raw: Option<String>,
    default: T,
) -> Result<T, ConfigError> {
    match raw {
        Some(value) => match value.trim().parse::<T>() {
            Ok(parsed) => Ok(parsed),
            Err(_) => Err(ConfigError::Invalid { name, value }),
        },
        None => Ok(default),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn env(vars: &[(&str, &str)]) -> HashMap<String, String> {
        vars.iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    fn lookup(vars: HashMap<String, String>) -> impl Fn(&str) -> Option<String> {
        move |name| vars.get(name).cloned()
    }

    #[test]
    fn test_defaults() {
        let config =
            CollageConfig::from_lookup(lookup(env(&[("REITTI_URL", "http://reitti.local/")])))
                .unwrap();

        assert_eq!(config.base_url, "http://reitti.local/");
        assert_eq!(config.start_year, 2012);
        assert_eq!(config.wait_time, Duration::from_secs(5));
        assert_eq!(config.login_wait_time, Duration::from_secs(3));
        assert_eq!(config.width, 1920);
        assert_eq!(config.height, 1080);
        assert_eq!(config.columns, 3);
        assert_eq!(config.output_dir, PathBuf::from("output"));
        assert!(config.credentials().is_none());
    }

    #[test]
    fn test_missing_url_is_fatal() {
        let result = CollageConfig::from_lookup(lookup(env(&[])));

        assert!(matches!(result, Err(ConfigError::Missing("REITTI_URL"))));
    }

    #[test]
    fn test_overrides() {
        let config = CollageConfig::from_lookup(lookup(env(&[
            ("REITTI_URL", "http://reitti.local/"),
            ("START_YEAR", "2018"),
            ("WAIT_TIME", "10"),
            ("SCREENSHOT_WIDTH", "1280"),
            ("SCREENSHOT_HEIGHT", "720"),
            ("COLLAGE_COLUMNS", "4"),
            ("OUTPUT_DIR", "/data/out"),
        ])))
        .unwrap();

        assert_eq!(config.start_year, 2018);
        assert_eq!(config.wait_time, Duration::from_secs(10));
        assert_eq!((config.width, config.height), (1280, 720));
        assert_eq!(config.columns, 4);
        assert_eq!(config.screenshot_dir(), PathBuf::from("/data/out/screenshots"));
        assert_eq!(config.collage_dir(), PathBuf::from("/data/out/collages"));
    }

    #[test]
    fn test_invalid_number_is_fatal() {
        let result = CollageConfig::from_lookup(lookup(env(&[
            ("REITTI_URL", "http://reitti.local/"),
            ("WAIT_TIME", "soon"),
        ])));

        assert!(matches!(
            result,
            Err(ConfigError::Invalid { name: "WAIT_TIME", .. })
        ));
    }

    #[test]
    fn test_zero_columns_rejected() {
        let result = CollageConfig::from_lookup(lookup(env(&[
            ("REITTI_URL", "http://reitti.local/"),
            ("COLLAGE_COLUMNS", "0"),
        ])));

        assert!(matches!(
            result,
            Err(ConfigError::NotPositive("COLLAGE_COLUMNS"))
        ));
    }

    #[test]
    fn test_start_year_before_1900_rejected() {
        let result = CollageConfig::from_lookup(lookup(env(&[
            ("REITTI_URL", "http://reitti.local/"),
            ("START_YEAR", "1899"),
        ])));

        assert!(matches!(result, Err(ConfigError::StartYearTooEarly(1899))));
    }

    #[test]
    fn test_half_configured_credentials_rejected() {
        let result = CollageConfig::from_lookup(lookup(env(&[
            ("REITTI_URL", "http://reitti.local/"),
            ("REITTI_USERNAME", "admin"),
        ])));

        assert!(matches!(result, Err(ConfigError::PartialCredentials)));
    }

    #[test]
    fn test_credentials_pair_accepted() {
        let config = CollageConfig::from_lookup(lookup(env(&[
            ("REITTI_URL", "http://reitti.local/"),
            ("REITTI_USERNAME", "admin"),
            ("REITTI_PASSWORD", "hunter2"),
        ])))
        .unwrap();

        assert_eq!(config.credentials(), Some(("admin", "hunter2")));
    }

    #[test]
    fn test_empty_value_counts_as_unset() {
        let result = CollageConfig::from_lookup(lookup(env(&[("REITTI_URL", "  ")])));

        assert!(matches!(result, Err(ConfigError::Missing("REITTI_URL"))));
    }

    #[test]
    fn test_overlay_defaults_to_today() {
        let today = NaiveDate::from_ymd_opt(2025, 11, 6).unwrap();
        let config = OverlayConfig::from_lookup(
            lookup(env(&[
                ("REITTI_URL", "http://reitti.local"),
                ("REITTI_API_TOKEN", "token123"),
            ])),
            today,
        )
        .unwrap();

        assert_eq!(config.start_year, 2012);
        assert_eq!(config.end_year, 2025);
        assert_eq!(config.target_date, today);
    }

    #[test]
    fn test_overlay_target_date_override() {
        let today = NaiveDate::from_ymd_opt(2025, 11, 6).unwrap();
        let config = OverlayConfig::from_lookup(
            lookup(env(&[
                ("REITTI_URL", "http://reitti.local"),
                ("REITTI_API_TOKEN", "token123"),
                ("TARGET_DATE", "2024-02-29"),
                ("END_YEAR", "2024"),
            ])),
            today,
        )
        .unwrap();

        assert_eq!(
            config.target_date,
            NaiveDate::from_ymd_opt(2024, 2, 29).unwrap()
        );
        assert_eq!(config.end_year, 2024);
    }

    #[test]
    fn test_overlay_requires_token() {
        let today = NaiveDate::from_ymd_opt(2025, 11, 6).unwrap();
        let result = OverlayConfig::from_lookup(
            lookup(env(&[("REITTI_URL", "http://reitti.local")])),
            today,
        );

        assert!(matches!(
            result,
            Err(ConfigError::Missing("REITTI_API_TOKEN"))
        ));
    }

    #[test]
    fn test_overlay_bad_target_date() {
        let today = NaiveDate::from_ymd_opt(2025, 11, 6).unwrap();
        let result = OverlayConfig::from_lookup(
            lookup(env(&[
                ("REITTI_URL", "http://reitti.local"),
                ("REITTI_API_TOKEN", "token123"),
                ("TARGET_DATE", "11-06"),
            ])),
            today,
        );

        assert!(matches!(
            result,
            Err(ConfigError::Invalid { name: "TARGET_DATE", .. })
        ));
    }
}
