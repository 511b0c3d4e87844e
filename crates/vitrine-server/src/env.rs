/* crates/vitrine-server/src/env.rs */

use std::sync::Arc;

use crate::errors::VitrineError;
use crate::manifest::Manifests;
use crate::page::BoxFuture;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RenderMode {
  Dev,
  Production,
}

/// Dev-toolchain HTML transform, e.g. Vite's `transformIndexHtml`. Receives
/// the normalized request URL and the current document; only invoked outside
/// production.
pub type HtmlTransformFn =
  Arc<dyn Fn(&str, String) -> BoxFuture<Result<String, VitrineError>> + Send + Sync>;

/// Immutable per-process SSR environment. Built once at startup and shared
/// read-only across concurrent render calls; nothing in the pipeline mutates
/// it.
pub struct SsrEnv {
  pub mode: RenderMode,
  /// Public base path every asset URL is served under. `"/"` for root.
  pub base_url: String,
  pub manifests: Manifests,
  pub transform: Option<HtmlTransformFn>,
}

impl SsrEnv {
  pub fn new(mode: RenderMode, base_url: impl Into<String>, manifests: Manifests) -> Self {
    Self { mode, base_url: base_url.into(), manifests, transform: None }
  }

  pub fn with_transform(mut self, transform: HtmlTransformFn) -> Self {
    self.transform = Some(transform);
    self
  }

  pub fn is_production(&self) -> bool {
    self.mode == RenderMode::Production
  }
}

/// Collapse redundant separators: `\` folds to `/`, runs of `/` to a single
/// one.
pub fn normalize_path(path: &str) -> String {
  let mut out = String::with_capacity(path.len());
  let mut prev_slash = false;
  for ch in path.chars() {
    let ch = if ch == '\\' { '/' } else { ch };
    if ch == '/' {
      if prev_slash {
        continue;
      }
      prev_slash = true;
    } else {
      prev_slash = false;
    }
    out.push(ch);
  }
  out
}

/// Prefix a root-relative URL with the configured public base path. A root
/// base leaves the URL untouched.
pub fn prepend_base_url(base_url: &str, url: &str) -> String {
  if base_url == "/" {
    return url.to_string();
  }
  let base = base_url.strip_suffix('/').unwrap_or(base_url);
  format!("{base}{url}")
}

#[cfg(test)]
mod tests {
  use super::*;

  // -- normalize_path --

  #[test]
  fn collapses_duplicate_slashes() {
    assert_eq!(normalize_path("/pages//index///page.js"), "/pages/index/page.js");
  }

  #[test]
  fn folds_backslashes() {
    assert_eq!(normalize_path(r"\pages\index.page.js"), "/pages/index.page.js");
  }

  #[test]
  fn clean_path_unchanged() {
    assert_eq!(normalize_path("/assets/entry.abc123.js"), "/assets/entry.abc123.js");
  }

  // -- prepend_base_url --

  #[test]
  fn root_base_is_identity() {
    assert_eq!(prepend_base_url("/", "/entry.js"), "/entry.js");
  }

  #[test]
  fn sub_path_base_with_trailing_slash() {
    assert_eq!(prepend_base_url("/docs/", "/entry.js"), "/docs/entry.js");
  }

  #[test]
  fn sub_path_base_without_trailing_slash() {
    assert_eq!(prepend_base_url("/docs", "/entry.js"), "/docs/entry.js");
  }

  // -- SsrEnv --

  #[test]
  fn production_flag() {
    let env = SsrEnv::new(RenderMode::Production, "/", Manifests::default());
    assert!(env.is_production());
    let env = SsrEnv::new(RenderMode::Dev, "/", Manifests::default());
    assert!(!env.is_production());
  }
}
