/* crates/vitrine-injector/src/locate.rs */

// Landmark discovery over raw HTML text. No DOM parse: opening tags are found
// by regex (first match wins), closing tags by literal substring (last
// occurrence wins). Documents are never assumed to be well-formed; the
// begin/end entry points always have a fallback anchor.

use std::sync::LazyLock;

use regex::Regex;

static HEAD_OPEN_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"<head[^>]*>").unwrap());
static HTML_OPEN_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"<html[^>]*>").unwrap());

pub fn has_head_tag(html: &str) -> bool {
  HEAD_OPEN_RE.is_match(html)
}

/// Insert an empty `<head></head>` when the document has none, at the best
/// available anchor (see `inject_begin`).
pub fn ensure_head_tag(html: String) -> String {
  if has_head_tag(&html) {
    return html;
  }
  inject_begin(&html, "<head></head>")
}

/// Insert `injection` immediately after the first match of `opening_tag`.
/// Returns `None` when the tag does not occur.
pub fn inject_at_opening_tag(html: &str, opening_tag: &Regex, injection: &str) -> Option<String> {
  let m = opening_tag.find(html)?;
  let mut out = String::with_capacity(html.len() + injection.len());
  out.push_str(&html[..m.end()]);
  out.push_str(injection);
  out.push_str(&html[m.end()..]);
  Some(out)
}

/// Insert `injection` immediately before the last literal occurrence of
/// `closing_tag`. The last occurrence is chosen so that a closing tag quoted
/// earlier in text content (e.g. inside a code sample) is not picked as the
/// anchor. Returns `None` when the tag does not occur.
pub fn inject_at_closing_tag(html: &str, closing_tag: &str, injection: &str) -> Option<String> {
  let pos = html.rfind(closing_tag)?;
  let mut out = String::with_capacity(html.len() + injection.len());
  out.push_str(&html[..pos]);
  out.push_str(injection);
  out.push_str(&html[pos..]);
  Some(out)
}

/// Insert at the start of the document: after the opening `<head>` tag, else
/// after the opening `<html>` tag, else on the line following a leading
/// doctype, else prepended to the whole document.
pub fn inject_begin(html: &str, injection: &str) -> String {
  if let Some(out) = inject_at_opening_tag(html, &HEAD_OPEN_RE, injection) {
    return out;
  }
  if let Some(out) = inject_at_opening_tag(html, &HTML_OPEN_RE, injection) {
    return out;
  }
  if html.get(..9).is_some_and(|lead| lead.eq_ignore_ascii_case("<!doctype")) {
    let mut lines: Vec<&str> = html.split('\n').collect();
    lines.insert(1, injection);
    return lines.join("\n");
  }
  format!("{injection}\n{html}")
}

/// Insert at the end of the document: before the last `</body>`, else before
/// the last `</html>`, else appended to the whole document.
pub fn inject_end(html: &str, injection: &str) -> String {
  if let Some(out) = inject_at_closing_tag(html, "</body>", injection) {
    return out;
  }
  if let Some(out) = inject_at_closing_tag(html, "</html>", injection) {
    return out;
  }
  format!("{html}\n{injection}")
}

#[cfg(test)]
mod tests {
  use super::*;

  // -- has_head_tag / ensure_head_tag --

  #[test]
  fn detects_plain_head() {
    assert!(has_head_tag("<html><head></head></html>"));
  }

  #[test]
  fn detects_head_with_attributes() {
    assert!(has_head_tag(r#"<head prefix="og: https://ogp.me/ns#">"#));
  }

  #[test]
  fn header_element_matches_head_pattern() {
    // <header> matches the <head[^>]*> pattern; documents with a <header> but
    // no <head> keep the inherited first-match behavior.
    assert!(has_head_tag("<body><header>nav</header></body>"));
  }

  #[test]
  fn ensure_head_inserts_after_html_open() {
    let out = ensure_head_tag("<html><body>hi</body></html>".to_string());
    assert_eq!(out, "<html><head></head><body>hi</body></html>");
    assert_eq!(out.matches("<head></head>").count(), 1);
  }

  #[test]
  fn ensure_head_keeps_existing_head() {
    let html = "<html><head><title>t</title></head><body></body></html>";
    assert_eq!(ensure_head_tag(html.to_string()), html);
  }

  #[test]
  fn ensure_head_after_doctype_line() {
    let out = ensure_head_tag("<!doctype html>\n<body>hi</body>".to_string());
    assert_eq!(out, "<!doctype html>\n<head></head>\n<body>hi</body>");
  }

  #[test]
  fn ensure_head_doctype_case_insensitive() {
    let out = ensure_head_tag("<!DOCTYPE html>\n<body>hi</body>".to_string());
    assert!(out.starts_with("<!DOCTYPE html>\n<head></head>"));
  }

  #[test]
  fn ensure_head_prepends_on_bare_fragment() {
    let out = ensure_head_tag("<p>fragment</p>".to_string());
    assert_eq!(out, "<head></head>\n<p>fragment</p>");
  }

  // -- inject_at_opening_tag --

  #[test]
  fn opening_tag_first_match_wins() {
    let out = inject_at_opening_tag("<head></head><head></head>", &HEAD_OPEN_RE, "X");
    assert_eq!(out.as_deref(), Some("<head>X</head><head></head>"));
  }

  #[test]
  fn opening_tag_absent_returns_none() {
    assert!(inject_at_opening_tag("<body></body>", &HEAD_OPEN_RE, "X").is_none());
  }

  #[test]
  fn opening_tag_with_attributes() {
    let out = inject_at_opening_tag(r#"<html lang="en"><body></body></html>"#, &HTML_OPEN_RE, "X");
    assert_eq!(out.as_deref(), Some(r#"<html lang="en">X<body></body></html>"#));
  }

  // -- inject_at_closing_tag --

  #[test]
  fn closing_tag_last_occurrence_wins() {
    // The first </body> sits inside a code sample; the real one is last.
    let html = "<body><pre>&lt;p&gt;</body></pre></body>";
    let out = inject_at_closing_tag(html, "</body>", "X");
    assert_eq!(out.as_deref(), Some("<body><pre>&lt;p&gt;</body></pre>X</body>"));
  }

  #[test]
  fn closing_tag_absent_returns_none() {
    assert!(inject_at_closing_tag("<body>", "</body>", "X").is_none());
  }

  // -- inject_begin / inject_end fallbacks --

  #[test]
  fn begin_prefers_head_over_html() {
    let out = inject_begin("<html><head></head></html>", "X");
    assert_eq!(out, "<html><head>X</head></html>");
  }

  #[test]
  fn end_prefers_body_over_html() {
    let out = inject_end("<html><body></body></html>", "X");
    assert_eq!(out, "<html><body>X</body></html>");
  }

  #[test]
  fn end_falls_back_to_html_close() {
    let out = inject_end("<html><div>x</div></html>", "X");
    assert_eq!(out, "<html><div>x</div>X</html>");
  }

  #[test]
  fn end_appends_when_no_closing_tags() {
    let out = inject_end("<p>loose</p>", "X");
    assert_eq!(out, "<p>loose</p>\nX");
  }
}
