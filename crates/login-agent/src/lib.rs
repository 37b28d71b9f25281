//! Login automation agent for the 24Online captive portal
//!
//! Given a loaded configuration and a live page behind
//! [`page_adapter::PagePort`], the agent runs the scripted sequence:
//! consent checkboxes, heuristic field discovery with ordered selector
//! fallbacks, native-parity filling, and a delayed submit with its own
//! fallback chain. At most one retry; every terminal outcome shows an
//! on-page banner and is reported to the caller. No error escapes the
//! agent.

pub mod agent;
pub mod selectors;

pub use agent::{AttemptOutcome, LoginAgent, SkipReason, SubmitPath, Timings};
pub use selectors::{is_login_page, locate, FieldKind, DEFAULT_PORTAL_URL};
