/* crates/vitrine-server/src/inject.rs */

// The injection pipeline: ensure structure, apply the dev transform, splice
// asset tags, then splice the page-context payload. Every step takes and
// returns a new String; nothing shared is mutated.

use vitrine_injector as injector;

use crate::asset::{AssetType, PageAsset};
use crate::env::SsrEnv;
use crate::errors::VitrineError;
use crate::media_type::PreloadType;
use crate::page::{PageContext, PageContextParts, serialize_page_context_client_side};

/// Public entry point: validate the page-context shape, then run both
/// injection passes.
pub async fn inject_assets(
  html: String,
  page_context: PageContextParts,
  env: &SsrEnv,
) -> Result<String, VitrineError> {
  if html.is_empty() {
    return Err(VitrineError::usage(
      "[inject_assets(html, page_context)]: argument `html` is empty.",
    ));
  }
  let ctx = page_context.build()?;
  let html = inject_assets_before_render(html, &ctx, env).await?;
  inject_assets_after_render(html, &ctx)
}

/// First pass: document structure, dev transform, script tag at the end of
/// body, style/preload link tags at the end of head.
pub async fn inject_assets_before_render(
  html: String,
  ctx: &PageContext,
  env: &SsrEnv,
) -> Result<String, VitrineError> {
  // The dev transform misbehaves on documents without a <head>
  let html = injector::ensure_head_tag(html);
  let html = apply_dev_transform(env, &ctx.url_normalized, html).await?;

  let assets = (ctx.get_page_assets)().await?;

  let scripts: Vec<&PageAsset> =
    assets.iter().filter(|asset| asset.asset_type == AssetType::Script).collect();
  if scripts.len() != 1 {
    return Err(VitrineError::assertion(format!(
      "expected exactly one script asset, found {} ({assets:?})",
      scripts.len()
    )));
  }
  // Bootstrap module loads late, at the end of body
  let html = injector::inject_end(&html, &infer_asset_tag(scripts[0], true));

  let link_tags: String = assets
    .iter()
    .filter(|asset| matches!(asset.asset_type, AssetType::Style | AssetType::Preload))
    .map(|asset| infer_asset_tag(asset, asset.preload_type == Some(PreloadType::Script)))
    .collect();
  let Some(html) = injector::inject_at_closing_tag(&html, "</head>", &link_tags) else {
    return Err(VitrineError::assertion(format!(
      "no `</head>` tag left to anchor {} link tag(s) after the dev transform",
      assets.len() - 1
    )));
  };
  Ok(html)
}

/// Second pass: the page-context payload, guarded against double injection.
pub fn inject_assets_after_render(
  html: String,
  ctx: &PageContext,
) -> Result<String, VitrineError> {
  if injector::has_page_context(&html) {
    return Err(VitrineError::usage(
      "Assets are being injected twice into your HTML. Make sure to remove your superfluous \
       `inject_assets()` call (vitrine already calls it for you).",
    ));
  }
  let payload = serialize_page_context_client_side(ctx);
  Ok(injector::inject_page_context(&html, &payload))
}

async fn apply_dev_transform(
  env: &SsrEnv,
  url_normalized: &str,
  html: String,
) -> Result<String, VitrineError> {
  if env.is_production() {
    return Ok(html);
  }
  match &env.transform {
    Some(transform) => transform(url_normalized, html).await,
    None => Ok(html),
  }
}

fn infer_asset_tag(asset: &PageAsset, is_es_module: bool) -> String {
  let src = &asset.src;
  match asset.asset_type {
    AssetType::Script => {
      if is_es_module {
        format!(r#"<script type="module" src="{src}"></script>"#)
      } else {
        format!(r#"<script src="{src}"></script>"#)
      }
    }
    AssetType::Style => format!(r#"<link rel="stylesheet" type="text/css" href="{src}">"#),
    AssetType::Preload => match asset.preload_type {
      Some(PreloadType::Font) => {
        // crossorigin is required for font fetches, same-origin included
        let attr_type =
          asset.media_type.map(|media| format!(r#" type="{media}""#)).unwrap_or_default();
        format!(r#"<link rel="preload" as="font" crossorigin{attr_type} href="{src}">"#)
      }
      Some(PreloadType::Script) if is_es_module => {
        format!(r#"<link rel="modulepreload" as="script" type="text/javascript" href="{src}">"#)
      }
      Some(PreloadType::Script) => {
        format!(r#"<link rel="preload" as="script" type="text/javascript" href="{src}">"#)
      }
      preload_type => {
        let attr_as =
          preload_type.map(|preload| format!(r#" as="{}""#, preload.as_attr())).unwrap_or_default();
        let attr_type =
          asset.media_type.map(|media| format!(r#" type="{media}""#)).unwrap_or_default();
        format!(r#"<link rel="preload" href="{src}"{attr_as}{attr_type}>"#)
      }
    },
  }
}
