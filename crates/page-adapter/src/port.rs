//! The page port: every primitive the login sequence needs

use async_trait::async_trait;
use thiserror::Error;

/// Page access error enumeration
#[derive(Debug, Error, Clone)]
pub enum PageError {
    /// Selector text is not valid CSS selector syntax. Distinguished
    /// so user-supplied overrides can fall through to built-ins.
    #[error("invalid selector: {0}")]
    InvalidSelector(String),

    /// Selector is valid but matched nothing at interaction time
    #[error("element not found: {0}")]
    ElementNotFound(String),

    /// Script evaluation in the page failed or returned garbage
    #[error("script evaluation failed: {0}")]
    Eval(String),

    /// Browser/session level failure (launch, transport, navigation)
    #[error("browser session error: {0}")]
    Session(String),
}

/// Async access to one live page.
///
/// Interactions must have user-input parity: clicks fire the page's
/// own click handlers (inline `onclick` included) and fills are
/// observable to the page's change detection exactly like keystrokes.
#[async_trait]
pub trait PagePort: Send + Sync {
    /// Address of the page as currently loaded.
    async fn current_url(&self) -> Result<String, PageError>;

    /// Whether `selector` currently resolves to an element.
    /// `Err(InvalidSelector)` for syntactically bad selectors.
    async fn query_exists(&self, selector: &str) -> Result<bool, PageError>;

    /// Simulated user click on the first element matching `selector`.
    async fn click(&self, selector: &str) -> Result<(), PageError>;

    /// Invoke native `click()` on every unchecked checkbox input.
    /// Returns one identifier per checkbox activated, for logging.
    async fn click_unchecked_checkboxes(&self) -> Result<Vec<String>, PageError>;

    /// Set an input's value through the native value setter, then
    /// dispatch bubbling `input` and `change` events.
    async fn fill_native(&self, selector: &str, value: &str) -> Result<(), PageError>;

    /// Scan button-like elements for one whose label matches any of
    /// `labels` exactly; click the first match. Returns whether a
    /// match was found.
    async fn click_button_labeled(&self, labels: &[&str]) -> Result<bool, PageError>;

    /// Native `submit()` on the closest form enclosing the element
    /// matching `selector`. Returns whether a form was submitted.
    async fn submit_enclosing_form(&self, selector: &str) -> Result<bool, PageError>;

    /// Show the transient on-page notification banner, replacing any
    /// banner already visible.
    async fn show_banner(&self, message: &str, is_error: bool) -> Result<(), PageError>;
}
