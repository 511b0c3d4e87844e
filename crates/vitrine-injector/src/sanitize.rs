/* crates/vitrine-injector/src/sanitize.rs */

use serde_json::Value;

/// Serialize `value` for embedding inside a `<script>` element.
///
/// Walks the serialized text tracking whether the current position is inside a
/// JSON string (handling `\"` and `\\` correctly). A `<` inside a string is
/// rewritten to `\u003c` so the payload can never contain `</script` and
/// terminate its host element early. Outside strings, valid JSON never
/// contains `<`.
pub fn sanitize_json(value: &Value) -> String {
  let json = value.to_string();
  let mut out = String::with_capacity(json.len());
  let mut in_string = false;
  let mut chars = json.chars();

  while let Some(ch) = chars.next() {
    if in_string {
      if ch == '\\' {
        // Escaped character inside string -- push both and skip next
        out.push(ch);
        if let Some(next) = chars.next() {
          out.push(next);
        }
        continue;
      }
      if ch == '"' {
        in_string = false;
        out.push(ch);
        continue;
      }
      if ch == '<' {
        out.push_str("\\u003c");
        continue;
      }
      out.push(ch);
    } else {
      if ch == '"' {
        in_string = true;
      }
      out.push(ch);
    }
  }
  out
}
