use std::time::Duration;

use thirtyfour::{
    error::WebDriverError, CapabilitiesHelper, ChromiumLikeCapabilities, DesiredCapabilities,
    PageLoadStrategy, WebDriver,
};

use super::fetcher::USER_AGENT;
use crate::configuration::WebDriverSettings;

/// One WebDriver session, scoped to a single extraction call. Eager page-load
/// strategy: we only need the DOM constructed, not every tracker finished.
pub struct Droid {
    pub driver: WebDriver,
}

impl Droid {
    pub async fn new(settings: &WebDriverSettings) -> Result<Self, WebDriverError> {
        let mut caps = DesiredCapabilities::chrome();
        caps.add_arg("--headless=new")?;
        caps.add_arg(&format!("--user-agent={}", USER_AGENT))?;
        caps.set_page_load_strategy(PageLoadStrategy::Eager)?;

        let driver = WebDriver::new(&settings.endpoint, caps).await?;
        driver
            .set_page_load_timeout(Duration::from_secs(settings.navigation_timeout_secs))
            .await?;

        Ok(Droid { driver })
    }

    /// Sessions must be released on every exit path; a failed quit only
    /// leaks a browser process, it never fails the extraction.
    pub async fn quit(self) {
        if let Err(e) = self.driver.quit().await {
            log::warn!("Failed to quit webdriver session: {}", e);
        }
    }
}
