//! Page access layer for the login agent
//!
//! The agent never talks to a browser directly; it drives a page
//! through the [`PagePort`] trait. [`CdpPage`] implements the port
//! over a chromiumoxide page, and [`BrowserSession`] owns the
//! Chromium process behind it. Tests substitute their own port.

pub mod cdp;
pub mod js;
pub mod port;

pub use cdp::{BrowserOptions, BrowserSession, CdpPage};
pub use port::{PageError, PagePort};
