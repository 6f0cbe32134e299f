//! Thin wrapper around a fantoccini WebDriver session.
//!
//! Owns the connection plus the wait budget, and exposes the handful of
//! operations the search flow needs: navigation, candidate-selector
//! lookup, cookie-consent dismissal and page-source capture.

use std::time::Duration;

use fantoccini::elements::Element;
use fantoccini::{Client, ClientBuilder, Locator};
use serde_json::json;
use tracing::{debug, warn};

use crate::error::{Result, ScrapeError};

const COOKIE_BUTTON_SELECTORS: [&str; 3] = [
    "button[data-testid*='cookie'][data-testid*='accept']",
    "button[id*='onetrust-accept']",
    "button[class*='cookie'][class*='accept']",
];

// Clicks the consent button the CSS candidates missed, matching on the
// Turkish accept label.
const COOKIE_CLICK_SCRIPT: &str = r#"
    const direct = document.querySelector('button#onetrust-accept-btn-handler');
    if (direct) { direct.click(); return true; }
    for (const btn of document.querySelectorAll('button')) {
        if (btn.textContent.trim().toLowerCase().includes('kabul')) {
            btn.click();
            return true;
        }
    }
    return false;
"#;

pub struct BrowserSession {
    client: Client,
    max_wait: Duration,
}

impl BrowserSession {
    /// Connect to a WebDriver server and start a Chrome session with the
    /// site's locale. `headless` switches on the new headless mode.
    pub async fn connect(webdriver_url: &str, headless: bool, max_wait: Duration) -> Result<Self> {
        let mut args = vec![
            "--disable-dev-shm-usage",
            "--disable-gpu",
            "--no-sandbox",
            "--window-size=1600,1200",
        ];
        if headless {
            args.push("--headless=new");
        }

        let mut caps = serde_json::map::Map::new();
        caps.insert(
            "goog:chromeOptions".to_string(),
            json!({
                "args": args,
                "prefs": { "intl.accept_languages": "tr-TR,tr" },
            }),
        );

        let client = ClientBuilder::native()
            .capabilities(caps)
            .connect(webdriver_url)
            .await
            .map_err(|err| ScrapeError::Session(err.to_string()))?;

        debug!("WebDriver session established via {}", webdriver_url);
        Ok(Self { client, max_wait })
    }

    pub fn max_wait(&self) -> Duration {
        self.max_wait
    }

    pub async fn goto(&self, url: &str) -> Result<()> {
        self.client
            .goto(url)
            .await
            .map_err(|err| ScrapeError::Navigation(format!("{url}: {err}")))
    }

    pub async fn current_url(&self) -> Result<String> {
        self.client
            .current_url()
            .await
            .map(|url| url.to_string())
            .map_err(|err| ScrapeError::Navigation(err.to_string()))
    }

    pub async fn page_source(&self) -> Result<String> {
        self.client
            .source()
            .await
            .map_err(|err| ScrapeError::Navigation(err.to_string()))
    }

    /// Wait up to `within` for the first of `selectors` to appear.
    pub async fn wait_for_any(&self, selectors: &[&str], within: Duration) -> Option<Element> {
        let grouped = selectors.join(", ");
        self.client
            .wait()
            .at_most(within)
            .for_element(Locator::Css(&grouped))
            .await
            .ok()
    }

    /// First currently-present element among `selectors`, no waiting.
    pub async fn find_first(&self, selectors: &[&str]) -> Option<Element> {
        for selector in selectors {
            if let Ok(mut found) = self.client.find_all(Locator::Css(selector)).await
                && !found.is_empty()
            {
                return Some(found.remove(0));
            }
        }
        None
    }

    pub async fn find_all(&self, selector: &str) -> Vec<Element> {
        self.client
            .find_all(Locator::Css(selector))
            .await
            .unwrap_or_default()
    }

    /// Best-effort cookie-consent dismissal. Consent banners differ per
    /// region and sometimes never appear; failures are logged, not raised.
    pub async fn dismiss_cookie_banner(&self) {
        if let Some(button) = self
            .wait_for_any(&COOKIE_BUTTON_SELECTORS, Duration::from_secs(2))
            .await
        {
            match button.click().await {
                Ok(()) => {
                    debug!("cookie banner dismissed");
                    return;
                }
                Err(err) => debug!("cookie button click failed: {}", err),
            }
        }

        match self.client.execute(COOKIE_CLICK_SCRIPT, vec![]).await {
            Ok(value) if value.as_bool() == Some(true) => debug!("cookie banner dismissed via script"),
            Ok(_) => debug!("no cookie banner found"),
            Err(err) => warn!("cookie dismissal script failed: {}", err),
        }
    }

    /// End the WebDriver session. Close failures only warrant a warning;
    /// the work is already done by the time this runs.
    pub async fn close(self) {
        if let Err(err) = self.client.close().await {
            warn!("failed to close WebDriver session: {}", err);
        }
    }
}
