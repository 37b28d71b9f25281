//! Script builders for in-page primitives
//!
//! Each builder returns a self-contained IIFE evaluated through
//! `Runtime.evaluate`. These programs run inside the host page's
//! execution context, so they only touch standard DOM surface and
//! report back JSON-friendly values. String arguments are embedded as
//! JSON literals, which is also valid JavaScript literal syntax.

/// How long the notification banner stays up before fading out.
pub const BANNER_LIFETIME_MS: u64 = 4_000;

fn js_str(value: &str) -> String {
    // serde_json string encoding is valid JS and handles quoting.
    serde_json::to_string(value).expect("string serialization is infallible")
}

/// Probe a selector. Returns "found", "missing", or "invalid".
pub fn probe_selector(selector: &str) -> String {
    format!(
        r#"(() => {{
  try {{ return document.querySelector({sel}) ? "found" : "missing"; }}
  catch (e) {{ return "invalid"; }}
}})()"#,
        sel = js_str(selector)
    )
}

/// Click every unchecked checkbox through its native `click()`.
///
/// Must stay `click()` and never `checked = true`: the portal's own
/// script listens for the click event to enable its submit control.
pub fn click_unchecked_checkboxes() -> String {
    r#"(() => {
  const clicked = [];
  document.querySelectorAll('input[type="checkbox"]').forEach((cb) => {
    if (!cb.checked) {
      cb.click();
      clicked.push(cb.name || cb.id || "unnamed");
    }
  });
  return clicked;
})()"#
        .to_string()
}

/// Set a field's value with keystroke parity.
///
/// Goes through the prototype's native value setter (bypassing any
/// overridden accessor) and then dispatches bubbling `input` and
/// `change` events, so the host page's change detection fires no
/// matter which strategy it uses. Returns "ok", "missing", or
/// "invalid".
pub fn native_fill(selector: &str, value: &str) -> String {
    format!(
        r#"(() => {{
  let el;
  try {{ el = document.querySelector({sel}); }} catch (e) {{ return "invalid"; }}
  if (!el) return "missing";
  const setter = Object.getOwnPropertyDescriptor(
    window.HTMLInputElement.prototype, "value"
  ).set;
  setter.call(el, {value});
  el.dispatchEvent(new Event("input", {{ bubbles: true }}));
  el.dispatchEvent(new Event("change", {{ bubbles: true }}));
  return "ok";
}})()"#,
        sel = js_str(selector),
        value = js_str(value)
    )
}

/// Click the first button-like element whose label matches exactly.
pub fn click_button_labeled(labels: &[&str]) -> String {
    let labels =
        serde_json::to_string(labels).expect("string array serialization is infallible");
    format!(
        r#"(() => {{
  const labels = {labels};
  const all = document.querySelectorAll(
    'input[type="button"], input[type="submit"], button'
  );
  for (const el of all) {{
    const label = (el.value || el.textContent || "").trim();
    if (labels.includes(label)) {{
      el.click();
      return true;
    }}
  }}
  return false;
}})()"#
    )
}

/// Native submit of the form enclosing `selector`, if any.
pub fn submit_enclosing_form(selector: &str) -> String {
    format!(
        r#"(() => {{
  let el;
  try {{ el = document.querySelector({sel}); }} catch (e) {{ return false; }}
  if (!el) return false;
  const form = el.closest("form");
  if (!form) return false;
  form.submit();
  return true;
}})()"#,
        sel = js_str(selector)
    )
}

/// Inject the transient notification banner. A single banner exists
/// at a time; showing a new one replaces the old.
pub fn show_banner(message: &str, is_error: bool, lifetime_ms: u64) -> String {
    let background = if is_error {
        "linear-gradient(135deg, #ff416c, #ff4b2b)"
    } else {
        "linear-gradient(135deg, #6c63ff, #48c6ef)"
    };
    format!(
        r#"(() => {{
  const prior = document.getElementById("__portal_autologin_banner");
  if (prior) prior.remove();
  const el = document.createElement("div");
  el.id = "__portal_autologin_banner";
  el.textContent = {msg};
  el.style.cssText =
    "position:fixed;bottom:20px;right:20px;z-index:2147483647;" +
    "padding:12px 20px;border-radius:12px;" +
    "font-family:'Inter',system-ui,sans-serif;font-size:13px;" +
    "font-weight:600;color:#fff;box-shadow:0 8px 32px rgba(0,0,0,0.3);" +
    "transition:opacity 0.4s ease;" +
    "background:{background};";
  document.body.appendChild(el);
  setTimeout(() => {{
    el.style.opacity = "0";
    setTimeout(() => el.remove(), 400);
  }}, {lifetime_ms});
  return true;
}})()"#,
        msg = js_str(message)
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_probe_embeds_selector_as_literal() {
        let script = probe_selector(r#"input[name="username"]"#);
        assert!(script.contains(r#"document.querySelector("input[name=\"username\"]")"#));
        assert!(script.contains("\"invalid\""));
    }

    #[test]
    fn test_native_fill_uses_prototype_setter() {
        let script = native_fill("#password", "p\"w'd");
        assert!(script.contains("HTMLInputElement.prototype"));
        assert!(script.contains(r#""p\"w'd""#));
        assert!(script.contains("dispatchEvent(new Event(\"input\""));
        assert!(script.contains("dispatchEvent(new Event(\"change\""));
    }

    #[test]
    fn test_checkbox_script_clicks_not_assigns() {
        let script = click_unchecked_checkboxes();
        assert!(script.contains("cb.click()"));
        assert!(!script.contains("checked = true"));
    }

    #[test]
    fn test_label_scan_covers_button_kinds() {
        let script = click_button_labeled(&["Login", "login"]);
        assert!(script.contains(r#"["Login","login"]"#));
        assert!(script.contains("input[type=\"submit\"]"));
        assert!(script.contains("button"));
    }

    #[test]
    fn test_banner_styles_differ_by_outcome() {
        let ok = show_banner("done", false, BANNER_LIFETIME_MS);
        let err = show_banner("broken", true, BANNER_LIFETIME_MS);
        assert_ne!(ok, err);
        assert!(ok.contains("4000"));
        assert!(err.contains("#ff416c"));
    }
}
