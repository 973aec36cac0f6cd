//! Headless browser session
//!
//! One Chromium process and one page are launched up front and reused for
//! every date in the run. Navigation, the settle wait and the viewport
//! screenshot all go through the DevTools protocol via chromiumoxide.

use std::path::Path;
use std::time::Duration;

use chromiumoxide::browser::{Browser, BrowserConfig};
use chromiumoxide::cdp::browser_protocol::page::CaptureScreenshotFormat;
use chromiumoxide::handler::viewport::Viewport;
use chromiumoxide::page::{Page, ScreenshotParams};
use futures::StreamExt;
use tokio::task::JoinHandle;
use tokio::time::sleep;

use super::CaptureError;

/// A running headless Chromium with a single reusable page
pub struct BrowserSession {
    browser: Browser,
    page: Page,
    event_task: JoinHandle<()>,
}

impl BrowserSession {
    /// Launch headless Chromium with the configured viewport.
    ///
    /// The flags mirror what a containerized Chromium needs: no sandbox and
    /// no /dev/shm reliance.
    pub async fn launch(width: u32, height: u32) -> Result<Self, CaptureError> {
        let config = BrowserConfig::builder()
            .no_sandbox()
            .arg("--disable-dev-shm-usage")
            .arg("--disable-gpu")
            .window_size(width, height)
            .viewport(Viewport {
                width,
                height,
                ..Default::default()
            })
            .build()
            .map_err(CaptureError::Setup)?;

        let (browser, mut handler) = Browser::launch(config).await?;

        // The handler stream must be drained for the whole session lifetime
        let event_task = tokio::spawn(async move {
            while let Some(event) = handler.next().await {
                if event.is_err() {
                    break;
                }
            }
        });

        let page = browser.new_page("about:blank").await?;

        Ok(Self {
            browser,
            page,
            event_task,
        })
    }

    /// Log in through the Reitti web form.
    ///
    /// Loads the base URL, fills the username/password fields, submits, and
    /// verifies the session actually left the login page.
    pub async fn login(
        &self,
        base_url: &str,
        username: &str,
        password: &str,
        settle: Duration,
    ) -> Result<(), CaptureError> {
        self.page.goto(base_url).await?;
        sleep(settle).await;

        self.page
            .find_element("input#username")
            .await
            .map_err(|e| CaptureError::Login(format!("no username field: {}", e)))?
            .click()
            .await?
            .type_str(username)
            .await?;

        self.page
            .find_element("input#password")
            .await
            .map_err(|e| CaptureError::Login(format!("no password field: {}", e)))?
            .click()
            .await?
            .type_str(password)
            .await?;

        self.page
            .find_element("button[type='submit']")
            .await
            .map_err(|e| CaptureError::Login(format!("no submit button: {}", e)))?
            .click()
            .await?;

        // Wait for the post-login redirect before judging the result
        sleep(settle).await;

        let still_on_login = match self.page.url().await? {
            Some(url) => url.contains("/login"),
            None => false,
        };
        let content = self.page.content().await.unwrap_or_default();

        if still_on_login || content.contains("login-container") {
            return Err(CaptureError::Login(
                "still on the login page, check the credentials".to_string(),
            ));
        }

        Ok(())
    }

    /// Navigate to `url`, wait `settle` for client-side rendering, then
    /// capture the viewport as a PNG at `output`.
    pub async fn capture_to(
        &self,
        url: &str,
        settle: Duration,
        output: &Path,
    ) -> Result<(), CaptureError> {
        self.page.goto(url).await?;
        sleep(settle).await;

        self.page
            .save_screenshot(
                ScreenshotParams::builder()
                    .format(CaptureScreenshotFormat::Png)
                    .full_page(false)
                    .build(),
                output,
            )
            .await?;

        Ok(())
    }

    /// Shut the browser down and stop the event task
    pub async fn close(mut self) -> Result<(), CaptureError> {
        self.browser.close().await?;
        self.browser.wait().await?;
        let _ = self.event_task.await;
        Ok(())
    }
}
