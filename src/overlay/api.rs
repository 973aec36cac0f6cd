//! Reitti REST API client
//!
//! Only one endpoint is consumed: the GPX export for a single day. The API
//! authenticates with a static token header rather than the web login.

use std::time::Duration;

use reqwest::{Client, StatusCode};

use super::OverlayError;
use crate::dates::TargetDate;

/// Request timeout; the export endpoint can be slow on big days
const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// A GPX export under this size carries headers but no real track
const MIN_GPX_BYTES: usize = 1000;

pub struct ReittiApi {
    client: Client,
    base_url: String,
    api_token: String,
}

impl ReittiApi {
    pub fn new(base_url: &str, api_token: &str) -> Result<Self, OverlayError> {
        let client = Client::builder().timeout(REQUEST_TIMEOUT).build()?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            api_token: api_token.to_string(),
        })
    }

    /// Fetch the GPX export for one day.
    ///
    /// Returns `Ok(None)` when the instance has nothing for that day: a
    /// non-200 status, or a body too small to hold a track. Transport
    /// errors bubble up for the caller to log.
    pub async fn fetch_day_gpx(&self, date: &TargetDate) -> Result<Option<String>, OverlayError> {
        let url = format!(
            "{}/api/v1/gpx/export?start={}&end={}",
            self.base_url, date, date
        );

        let response = self
            .client
            .get(&url)
            .header("X-API-TOKEN", &self.api_token)
            .send()
            .await?;

        if response.status() != StatusCode::OK {
            return Ok(None);
        }

        let body = response.text().await?;
        if body.len() <= MIN_GPX_BYTES {
            return Ok(None);
        }

        Ok(Some(body))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_base_url_trailing_slash_is_trimmed() {
        let api = ReittiApi::new("http://reitti.local/", "token").unwrap();

        assert_eq!(api.base_url, "http://reitti.local");
    }
}
