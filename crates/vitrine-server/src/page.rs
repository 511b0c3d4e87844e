/* crates/vitrine-server/src/page.rs */

use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

use serde_json::{Map, Value};

use crate::asset::PageAsset;
use crate::errors::VitrineError;

pub type BoxFuture<T> = Pin<Box<dyn Future<Output = T> + Send>>;

/// Async accessor for the page's ordered asset list. The list may be computed
/// per call or memoized by the caller; this core never caches it.
pub type GetPageAssetsFn =
  Arc<dyn Fn() -> BoxFuture<Result<Vec<PageAsset>, VitrineError>> + Send + Sync>;

/// Validated page context for one injection call.
#[derive(Clone)]
pub struct PageContext {
  pub url_normalized: String,
  pub page_id: String,
  pub page_client_path: String,
  /// Keys of `client_values` that are serialized into the page-context
  /// payload. Everything else stays server-side.
  pub pass_to_client: Vec<String>,
  pub get_page_assets: GetPageAssetsFn,
  pub client_values: Map<String, Value>,
}

impl std::fmt::Debug for PageContext {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    f.debug_struct("PageContext")
      .field("url_normalized", &self.url_normalized)
      .field("page_id", &self.page_id)
      .field("page_client_path", &self.page_client_path)
      .field("pass_to_client", &self.pass_to_client)
      .field("get_page_assets", &"<fn>")
      .field("client_values", &self.client_values)
      .finish()
  }
}

/// Unvalidated page-context parts, as handed to the public entry point.
/// `build` checks the minimum required shape and names the first missing
/// field.
#[derive(Clone, Default)]
pub struct PageContextParts {
  pub url_normalized: Option<String>,
  pub page_id: Option<String>,
  pub page_client_path: Option<String>,
  pub pass_to_client: Option<Vec<String>>,
  pub get_page_assets: Option<GetPageAssetsFn>,
  pub client_values: Map<String, Value>,
}

fn missing_field(field: &str) -> VitrineError {
  VitrineError::usage(format!(
    "[inject_assets(html, page_context)]: `page_context.{field}` is missing. Make sure that \
     `page_context` is the value that vitrine provided to your render hook."
  ))
}

impl PageContextParts {
  pub fn new() -> Self {
    Self::default()
  }

  pub fn url_normalized(mut self, url: impl Into<String>) -> Self {
    self.url_normalized = Some(url.into());
    self
  }

  pub fn page_id(mut self, page_id: impl Into<String>) -> Self {
    self.page_id = Some(page_id.into());
    self
  }

  pub fn page_client_path(mut self, path: impl Into<String>) -> Self {
    self.page_client_path = Some(path.into());
    self
  }

  pub fn pass_to_client(mut self, keys: Vec<String>) -> Self {
    self.pass_to_client = Some(keys);
    self
  }

  pub fn get_page_assets(mut self, accessor: GetPageAssetsFn) -> Self {
    self.get_page_assets = Some(accessor);
    self
  }

  pub fn client_value(mut self, key: impl Into<String>, value: Value) -> Self {
    self.client_values.insert(key.into(), value);
    self
  }

  pub fn build(self) -> Result<PageContext, VitrineError> {
    Ok(PageContext {
      url_normalized: self.url_normalized.ok_or_else(|| missing_field("url_normalized"))?,
      page_id: self.page_id.ok_or_else(|| missing_field("page_id"))?,
      page_client_path: self.page_client_path.ok_or_else(|| missing_field("page_client_path"))?,
      pass_to_client: self.pass_to_client.ok_or_else(|| missing_field("pass_to_client"))?,
      get_page_assets: self.get_page_assets.ok_or_else(|| missing_field("get_page_assets"))?,
      client_values: self.client_values,
    })
  }
}

/// Snapshot of page state that reaches the browser: the page id plus every
/// `pass_to_client` key found in the client value bag. Written exactly once
/// into the page-context script element.
pub fn serialize_page_context_client_side(ctx: &PageContext) -> Value {
  let mut out = Map::new();
  out.insert("_pageId".to_string(), Value::String(ctx.page_id.clone()));
  for key in &ctx.pass_to_client {
    if let Some(value) = ctx.client_values.get(key) {
      out.insert(key.clone(), value.clone());
    }
  }
  Value::Object(out)
}

#[cfg(test)]
mod tests {
  use serde_json::json;

  use super::*;

  fn no_assets() -> GetPageAssetsFn {
    Arc::new(|| Box::pin(async { Ok(Vec::new()) }))
  }

  fn full_parts() -> PageContextParts {
    PageContextParts::new()
      .url_normalized("/hello")
      .page_id("/pages/hello")
      .page_client_path("/pages/hello.page.client.js")
      .pass_to_client(vec!["pageProps".to_string()])
      .get_page_assets(no_assets())
  }

  #[test]
  fn build_succeeds_with_all_fields() {
    let ctx = full_parts().build().expect("complete parts");
    assert_eq!(ctx.page_id, "/pages/hello");
    assert_eq!(ctx.pass_to_client, ["pageProps"]);
  }

  #[test]
  fn build_names_each_missing_field() {
    let cases: [(&str, PageContextParts); 5] = [
      ("url_normalized", PageContextParts { url_normalized: None, ..full_parts() }),
      ("page_id", PageContextParts { page_id: None, ..full_parts() }),
      ("page_client_path", PageContextParts { page_client_path: None, ..full_parts() }),
      ("pass_to_client", PageContextParts { pass_to_client: None, ..full_parts() }),
      ("get_page_assets", PageContextParts { get_page_assets: None, ..full_parts() }),
    ];
    for (field, parts) in cases {
      let err = parts.build().expect_err("incomplete parts");
      assert!(err.is_usage());
      assert!(err.message().contains(&format!("`page_context.{field}`")), "field: {field}");
    }
  }

  #[test]
  fn serialization_keeps_only_whitelisted_keys() {
    let ctx = full_parts()
      .client_value("pageProps", json!({"title": "Hello"}))
      .client_value("secret", json!("do not ship"))
      .build()
      .expect("complete parts");
    let payload = serialize_page_context_client_side(&ctx);
    assert_eq!(payload["_pageId"], "/pages/hello");
    assert_eq!(payload["pageProps"]["title"], "Hello");
    assert!(payload.get("secret").is_none());
  }

  #[test]
  fn whitelisted_key_without_value_is_skipped() {
    let ctx = full_parts().build().expect("complete parts");
    let payload = serialize_page_context_client_side(&ctx);
    assert!(payload.get("pageProps").is_none());
  }
}
