/* crates/vitrine-injector/src/page_context.rs */

use serde_json::Value;

use crate::locate::inject_end;
use crate::sanitize::sanitize_json;

/// Opening tag of the page-context script element. This exact byte sequence
/// doubles as the idempotency marker clients and servers grep for; its shape
/// must not change.
pub const PAGE_CONTEXT_SCRIPT_OPEN: &str =
  r#"<script id="vite-plugin-ssr_pageContext" type="application/json">"#;

/// Whether `html` already carries a page-context payload.
pub fn has_page_context(html: &str) -> bool {
  html.contains(PAGE_CONTEXT_SCRIPT_OPEN)
}

/// Build the page-context script element around a sanitized payload.
pub fn page_context_script(payload: &Value) -> String {
  format!("{PAGE_CONTEXT_SCRIPT_OPEN}{}</script>", sanitize_json(payload))
}

/// Inject the page-context script before the closing body/html tag, appending
/// when neither exists.
pub fn inject_page_context(html: &str, payload: &Value) -> String {
  inject_end(html, &page_context_script(payload))
}
