//! chromiumoxide-backed implementation of the page port

use std::path::PathBuf;

use async_trait::async_trait;
use chromiumoxide::browser::{Browser, BrowserConfig};
use chromiumoxide::Page;
use futures::StreamExt;
use serde::de::DeserializeOwned;
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use crate::js;
use crate::port::{PageError, PagePort};

/// Chromium binaries probed when no explicit path is given.
const BROWSER_CANDIDATES: &[&str] = &[
    "google-chrome",
    "google-chrome-stable",
    "chromium",
    "chromium-browser",
    "chrome",
];

/// Launch options for the browser session.
#[derive(Clone, Debug)]
pub struct BrowserOptions {
    pub headless: bool,
    /// Explicit browser binary; otherwise `$PATH` is probed.
    pub browser_path: Option<PathBuf>,
    pub window_size: (u32, u32),
}

impl Default for BrowserOptions {
    fn default() -> Self {
        Self {
            headless: false,
            browser_path: None,
            window_size: (1280, 720),
        }
    }
}

/// Owns the Chromium process, its CDP handler task, and one page.
pub struct BrowserSession {
    browser: Browser,
    page: Page,
    handler: JoinHandle<()>,
}

impl BrowserSession {
    /// Launch Chromium and open a blank page.
    pub async fn launch(opts: &BrowserOptions) -> Result<Self, PageError> {
        let mut builder = BrowserConfig::builder()
            .no_sandbox()
            .window_size(opts.window_size.0, opts.window_size.1);
        if !opts.headless {
            builder = builder.with_head();
        }
        if let Some(path) = resolve_browser_path(opts) {
            debug!("using browser binary at {}", path.display());
            builder = builder.chrome_executable(path);
        }
        let config = builder.build().map_err(PageError::Session)?;

        info!(headless = opts.headless, "launching browser");
        let (browser, mut handler) = Browser::launch(config)
            .await
            .map_err(|e| PageError::Session(format!("failed to launch browser: {e}")))?;

        // Pump CDP messages until the connection drops.
        let handler = tokio::spawn(async move {
            while let Some(event) = handler.next().await {
                if event.is_err() {
                    debug!("CDP handler event loop ended");
                    break;
                }
            }
        });

        let page = browser
            .new_page("about:blank")
            .await
            .map_err(|e| PageError::Session(format!("failed to open page: {e}")))?;

        Ok(Self {
            browser,
            page,
            handler,
        })
    }

    /// Navigate the session's page and wait for it to load.
    pub async fn goto(&self, url: &str) -> Result<(), PageError> {
        url::Url::parse(url).map_err(|e| PageError::Session(format!("bad URL {url}: {e}")))?;
        info!("navigating to {url}");
        self.page
            .goto(url)
            .await
            .map_err(|e| PageError::Session(format!("navigation to {url} failed: {e}")))?;
        if let Err(e) = self.page.wait_for_navigation().await {
            // Captive portals redirect in odd ways; a late load event
            // is not fatal as long as the document is reachable.
            debug!("wait_for_navigation: {e}");
        }
        Ok(())
    }

    /// Port handle onto the session's page.
    pub fn page(&self) -> CdpPage {
        CdpPage {
            page: self.page.clone(),
        }
    }

    /// Shut the browser down.
    pub async fn close(mut self) {
        if let Err(e) = self.browser.close().await {
            warn!("error closing browser: {e}");
        }
        let _ = self.handler.await;
    }
}

fn resolve_browser_path(opts: &BrowserOptions) -> Option<PathBuf> {
    if let Some(path) = &opts.browser_path {
        return Some(path.clone());
    }
    BROWSER_CANDIDATES
        .iter()
        .find_map(|name| which::which(name).ok())
}

/// [`PagePort`] over one chromiumoxide page.
#[derive(Clone)]
pub struct CdpPage {
    page: Page,
}

impl CdpPage {
    async fn eval<T: DeserializeOwned>(&self, script: String) -> Result<T, PageError> {
        let result = self
            .page
            .evaluate(script)
            .await
            .map_err(|e| PageError::Eval(e.to_string()))?;
        result
            .into_value::<T>()
            .map_err(|e| PageError::Eval(format!("unexpected script result: {e}")))
    }
}

#[async_trait]
impl PagePort for CdpPage {
    async fn current_url(&self) -> Result<String, PageError> {
        self.page
            .url()
            .await
            .map_err(|e| PageError::Session(e.to_string()))?
            .ok_or_else(|| PageError::Session("page has no URL".into()))
    }

    async fn query_exists(&self, selector: &str) -> Result<bool, PageError> {
        let verdict: String = self.eval(js::probe_selector(selector)).await?;
        match verdict.as_str() {
            "found" => Ok(true),
            "missing" => Ok(false),
            "invalid" => Err(PageError::InvalidSelector(selector.to_string())),
            other => Err(PageError::Eval(format!("probe returned {other:?}"))),
        }
    }

    async fn click(&self, selector: &str) -> Result<(), PageError> {
        let element = self
            .page
            .find_element(selector)
            .await
            .map_err(|_| PageError::ElementNotFound(selector.to_string()))?;
        element
            .click()
            .await
            .map_err(|e| PageError::Session(format!("click on {selector} failed: {e}")))?;
        Ok(())
    }

    async fn click_unchecked_checkboxes(&self) -> Result<Vec<String>, PageError> {
        self.eval(js::click_unchecked_checkboxes()).await
    }

    async fn fill_native(&self, selector: &str, value: &str) -> Result<(), PageError> {
        let verdict: String = self.eval(js::native_fill(selector, value)).await?;
        match verdict.as_str() {
            "ok" => Ok(()),
            "missing" => Err(PageError::ElementNotFound(selector.to_string())),
            "invalid" => Err(PageError::InvalidSelector(selector.to_string())),
            other => Err(PageError::Eval(format!("fill returned {other:?}"))),
        }
    }

    async fn click_button_labeled(&self, labels: &[&str]) -> Result<bool, PageError> {
        self.eval(js::click_button_labeled(labels)).await
    }

    async fn submit_enclosing_form(&self, selector: &str) -> Result<bool, PageError> {
        self.eval(js::submit_enclosing_form(selector)).await
    }

    async fn show_banner(&self, message: &str, is_error: bool) -> Result<(), PageError> {
        let _: bool = self
            .eval(js::show_banner(message, is_error, js::BANNER_LIFETIME_MS))
            .await?;
        Ok(())
    }
}
