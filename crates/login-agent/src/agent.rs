//! The attempt runner: consent, discovery, fill, delayed submit
//!
//! Two-state flow: one attempt, and at most one retry if the required
//! fields are not on the page yet. Ordering against the portal's own
//! reactive script is enforced with fixed delays; the constants live
//! in [`Timings`] so tests can shrink them.

use std::time::Duration;

use page_adapter::{PageError, PagePort};
use portal_store::{codec, StoredConfig};
use tokio::time::sleep;
use tracing::{debug, error, info, warn};

use crate::selectors::{is_login_page, locate, FieldKind};

/// Delays separating the agent's steps from the host page's reactions.
#[derive(Clone, Copy, Debug)]
pub struct Timings {
    /// Pause after page load before the first attempt.
    pub startup: Duration,
    /// Pause before the single retry when fields are missing.
    pub retry: Duration,
    /// Pause between filling and submitting, so the portal's consent
    /// handler has enabled its submit control.
    pub pre_submit: Duration,
}

impl Default for Timings {
    fn default() -> Self {
        Self {
            startup: Duration::from_millis(800),
            retry: Duration::from_secs(2),
            pre_submit: Duration::from_secs(1),
        }
    }
}

/// Which branch of the submit fallback chain fired.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SubmitPath {
    /// The discovered submit control was clicked.
    Control,
    /// A button-like element with a matching label was clicked.
    LabelScan,
    /// The enclosing form was submitted natively.
    FormSubmit,
}

/// Why a run ended without touching the page.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SkipReason {
    NotLoginPage,
    MissingCredentials,
}

/// Terminal state of one agent run.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum AttemptOutcome {
    Submitted(SubmitPath),
    /// Fields were filled but no submit path was found.
    FilledNoSubmitPath,
    /// Required fields absent even after the retry.
    MissingFields(Vec<FieldKind>),
    Skipped(SkipReason),
    /// An unexpected page error; caught, surfaced, never propagated.
    Errored(String),
}

impl AttemptOutcome {
    pub fn is_submitted(&self) -> bool {
        matches!(self, AttemptOutcome::Submitted(_))
    }
}

enum Flow {
    Retry,
    Done(AttemptOutcome),
}

/// Runs the login sequence against one page.
#[derive(Clone, Debug, Default)]
pub struct LoginAgent {
    timings: Timings,
}

impl LoginAgent {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_timings(timings: Timings) -> Self {
        Self { timings }
    }

    /// Run the full sequence. Never fails: every error is converted
    /// into a terminal outcome, with an on-page banner where one can
    /// still be shown.
    pub async fn run(&self, page: &dyn PagePort, config: &StoredConfig) -> AttemptOutcome {
        let url = match page.current_url().await {
            Ok(url) => url,
            Err(err) => {
                error!("page address unavailable: {err}");
                return AttemptOutcome::Errored(err.to_string());
            }
        };
        if !is_login_page(&url) {
            debug!("not a login page, skipping: {url}");
            return AttemptOutcome::Skipped(SkipReason::NotLoginPage);
        }

        let password = codec::decode(&config.password);
        if config.reg_number.is_empty() || password.is_empty() {
            warn!("missing credentials; run the config editor to set them");
            return AttemptOutcome::Skipped(SkipReason::MissingCredentials);
        }

        // Let the page finish rendering before the first pass.
        sleep(self.timings.startup).await;

        let mut is_retry = false;
        loop {
            match self.attempt(page, config, &password, is_retry).await {
                Ok(Flow::Done(outcome)) => return outcome,
                Ok(Flow::Retry) => {
                    info!("login form not found yet, retrying in {:?}", self.timings.retry);
                    sleep(self.timings.retry).await;
                    is_retry = true;
                }
                Err(err) => {
                    error!("error during autofill: {err}");
                    let message = format!("Auto-login error: {err}");
                    if let Err(banner_err) = page.show_banner(&message, true).await {
                        warn!("could not show error banner: {banner_err}");
                    }
                    return AttemptOutcome::Errored(err.to_string());
                }
            }
        }
    }

    async fn attempt(
        &self,
        page: &dyn PagePort,
        config: &StoredConfig,
        password: &str,
        is_retry: bool,
    ) -> Result<Flow, PageError> {
        info!(retry = is_retry, "attempting auto-login");

        // Consent step. The portal listens for the click event, not
        // the checked state, to unlock its submit control.
        for name in page.click_unchecked_checkboxes().await? {
            debug!("activated consent checkbox: {name}");
        }

        let username = locate(page, FieldKind::Username, config.username_selector.as_deref()).await;
        let password_field =
            locate(page, FieldKind::Password, config.password_selector.as_deref()).await;
        let submit = locate(page, FieldKind::Submit, config.submit_selector.as_deref()).await;

        let (username, password_field) = match (username, password_field) {
            (Some(u), Some(p)) => (u, p),
            (username, password_field) => {
                if !is_retry {
                    return Ok(Flow::Retry);
                }
                let mut missing = Vec::new();
                if username.is_none() {
                    missing.push(FieldKind::Username);
                }
                if password_field.is_none() {
                    missing.push(FieldKind::Password);
                }
                let names: Vec<&str> = missing.iter().map(FieldKind::label).collect();
                error!("could not locate: {}", names.join(", "));
                page.show_banner(&format!("Could not find: {}", names.join(", ")), true)
                    .await?;
                return Ok(Flow::Done(AttemptOutcome::MissingFields(missing)));
            }
        };

        page.fill_native(&username, &config.reg_number).await?;
        page.fill_native(&password_field, password).await?;
        info!("credentials filled");

        // The portal needs a beat to process the consent click and
        // enable its submit control.
        sleep(self.timings.pre_submit).await;

        if let Some(submit) = submit {
            page.click(&submit).await?;
            info!("submit control clicked: {submit}");
            page.show_banner("Auto-login submitted!", false).await?;
            return Ok(Flow::Done(AttemptOutcome::Submitted(SubmitPath::Control)));
        }

        if page.click_button_labeled(&["Login", "login"]).await? {
            info!("submit via labeled button scan");
            page.show_banner("Auto-login submitted!", false).await?;
            return Ok(Flow::Done(AttemptOutcome::Submitted(SubmitPath::LabelScan)));
        }

        if page.submit_enclosing_form(&username).await? {
            info!("submit via enclosing form");
            page.show_banner("Auto-login submitted (via form)!", false)
                .await?;
            return Ok(Flow::Done(AttemptOutcome::Submitted(SubmitPath::FormSubmit)));
        }

        warn!("credentials filled but no submit path found");
        page.show_banner("Credentials filled but no Login button found.", true)
            .await?;
        Ok(Flow::Done(AttemptOutcome::FilledNoSubmitPath))
    }
}
