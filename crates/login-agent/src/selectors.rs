//! Activation patterns and selector fallback tables
//!
//! The fallback lists cover the markup variants the 24Online portal
//! has shipped, most specific first. A user-supplied override is
//! always tried before the built-ins; an override that is not valid
//! selector syntax is skipped, never fatal.

use page_adapter::{PageError, PagePort};
use tracing::{debug, warn};

/// The portal login page this tool targets.
pub const DEFAULT_PORTAL_URL: &str = "https://internet.lpu.in/24online/webpages/client.jsp";

/// Case-insensitive address substrings identifying the login page
/// (and not the post-login servlet page).
const LOGIN_PAGE_MARKERS: &[&str] = &["client.jsp", "/webpages/", "24online"];

/// Whether `url` is the portal login page.
pub fn is_login_page(url: &str) -> bool {
    let lower = url.to_lowercase();
    LOGIN_PAGE_MARKERS.iter().any(|marker| lower.contains(marker))
}

/// The three controls the login sequence needs to find.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FieldKind {
    Username,
    Password,
    Submit,
}

impl FieldKind {
    /// Human-readable name used in notifications and logs.
    pub fn label(&self) -> &'static str {
        match self {
            FieldKind::Username => "username field",
            FieldKind::Password => "password field",
            FieldKind::Submit => "submit control",
        }
    }

    /// Built-in candidate selectors, in priority order.
    pub fn fallbacks(&self) -> &'static [&'static str] {
        match self {
            FieldKind::Username => &[
                r#"input[name="username"]"#,
                r#"input[name="userName"]"#,
                r#"input[name="user"]"#,
                r#"input[name="userid"]"#,
                r#"input[name="loginid"]"#,
                r#"input[name="LoginUserPassword_username"]"#,
                r#"input[id="username"]"#,
                r#"input[type="text"]"#,
            ],
            FieldKind::Password => &[
                r#"input[name="password"]"#,
                r#"input[name="passwd"]"#,
                r#"input[name="pass"]"#,
                r#"input[name="LoginUserPassword_password"]"#,
                r#"input[id="password"]"#,
                r#"input[type="password"]"#,
            ],
            FieldKind::Submit => &[
                r#"input[type="submit"][value="Login"]"#,
                r#"input[type="submit"][value="login"]"#,
                r#"input[type="button"][value="Login"]"#,
                r#"input[type="button"][value="login"]"#,
                r#"button[type="submit"]"#,
                r#"input[type="submit"]"#,
                r#"button[name="login"]"#,
                r#"input[name="login"]"#,
                "#loginBtn",
                "button.btn-primary",
                r#"input[type="button"][onclick*="logon"]"#,
                r#"input[type="button"][onclick*="Login"]"#,
                r#"input[type="button"][onclick*="login"]"#,
            ],
        }
    }
}

/// Resolve a control to the first live selector: the user override if
/// it resolves, otherwise the first built-in fallback that does.
pub async fn locate(
    page: &dyn PagePort,
    kind: FieldKind,
    override_selector: Option<&str>,
) -> Option<String> {
    if let Some(selector) = override_selector.filter(|s| !s.is_empty()) {
        match page.query_exists(selector).await {
            Ok(true) => return Some(selector.to_string()),
            Ok(false) => debug!("{} override {selector:?} matched nothing", kind.label()),
            Err(PageError::InvalidSelector(_)) => {
                warn!("invalid {} override selector: {selector:?}", kind.label());
            }
            Err(err) => warn!("{} override probe failed: {err}", kind.label()),
        }
    }

    for selector in kind.fallbacks() {
        match page.query_exists(selector).await {
            Ok(true) => return Some(selector.to_string()),
            Ok(false) => {}
            Err(err) => debug!("fallback probe {selector:?} failed: {err}"),
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_login_page_markers() {
        assert!(is_login_page(
            "https://internet.lpu.in/24online/webpages/client.jsp"
        ));
        assert!(is_login_page("HTTPS://HOST/24ONLINE/"));
        assert!(is_login_page("http://10.0.0.1/webpages/loggedout"));
        assert!(!is_login_page("https://example.com/login"));
        assert!(!is_login_page("https://internet.lpu.in/"));
    }

    #[test]
    fn test_fallback_tables_ordered_specific_first() {
        let username = FieldKind::Username.fallbacks();
        assert_eq!(username.first(), Some(&r#"input[name="username"]"#));
        assert_eq!(username.last(), Some(&r#"input[type="text"]"#));

        let password = FieldKind::Password.fallbacks();
        assert_eq!(password.last(), Some(&r#"input[type="password"]"#));
    }

    #[test]
    fn test_labels() {
        assert_eq!(FieldKind::Username.label(), "username field");
        assert_eq!(FieldKind::Password.label(), "password field");
        assert_eq!(FieldKind::Submit.label(), "submit control");
    }
}
