/* crates/vitrine-server/src/lib.rs */

pub mod asset;
pub mod env;
pub mod errors;
pub mod inject;
pub mod manifest;
pub mod media_type;
pub mod page;
pub mod resolve;

// Re-exports for ergonomic use
pub use asset::{AssetType, PageAsset, sort_for_http_push};
pub use env::{HtmlTransformFn, RenderMode, SsrEnv, normalize_path, prepend_base_url};
pub use errors::{ErrorKind, VitrineError};
pub use inject::{inject_assets, inject_assets_after_render, inject_assets_before_render};
pub use manifest::{BuildManifest, ManifestEntry, Manifests, resolve_entry_url};
pub use media_type::{MediaType, PreloadType};
pub use page::{
  BoxFuture, GetPageAssetsFn, PageContext, PageContextParts, serialize_page_context_client_side,
};
pub use resolve::resolve_page_assets;
pub use vitrine_injector::PAGE_CONTEXT_SCRIPT_OPEN;
