/* crates/vitrine-server/src/resolve.rs */

use crate::asset::{PageAsset, sort_for_http_push};
use crate::env::{SsrEnv, normalize_path, prepend_base_url};
use crate::errors::VitrineError;
use crate::manifest::{BuildManifest, resolve_entry_url};

/// Asset source for one resolution pass, selected exactly once per call:
/// dev serves module paths verbatim, manifest mode maps them through the
/// production build output.
enum AssetMode<'a> {
  Dev,
  Manifest { client: &'a BuildManifest },
}

impl<'a> AssetMode<'a> {
  fn select(env: &'a SsrEnv, is_pre_rendering: bool) -> Result<Self, VitrineError> {
    if env.is_production() || is_pre_rendering {
      // Presence of BOTH manifests is checked here, before any lookup
      let (client, _server) = env.manifests.retrieve(is_pre_rendering)?;
      Ok(AssetMode::Manifest { client })
    } else {
      Ok(AssetMode::Dev)
    }
  }
}

/// Compute the final ordered asset list for one page.
///
/// `dependencies` are the discovered dependency paths of the page (root
/// absolute), `page_client_path` its client entry module. Pre-rendering
/// always requires manifests, regardless of the dev/production switch.
///
/// The result carries exactly one `Script` asset, 0..N style/preload assets,
/// normalized base-prefixed URLs, in priority-stable order.
pub fn resolve_page_assets(
  env: &SsrEnv,
  dependencies: &[String],
  page_client_path: &str,
  is_pre_rendering: bool,
) -> Result<Vec<PageAsset>, VitrineError> {
  if let Some(bad) = dependencies.iter().find(|dep| !dep.starts_with('/')) {
    return Err(VitrineError::assertion(format!(
      "page dependency `{bad}` is not root-absolute (dependencies: {dependencies:?})"
    )));
  }

  let mode = AssetMode::select(env, is_pre_rendering)?;

  let mut assets: Vec<PageAsset> =
    dependencies.iter().map(|dep| PageAsset::from_dependency(dep.as_str())).collect();

  let script_src = match mode {
    AssetMode::Dev => page_client_path.to_string(),
    AssetMode::Manifest { client } => resolve_entry_url(page_client_path, client)?,
  };
  assets.push(PageAsset::script(script_src));

  for asset in &mut assets {
    asset.src = prepend_base_url(&env.base_url, &normalize_path(&asset.src));
  }

  sort_for_http_push(&mut assets);
  Ok(assets)
}
