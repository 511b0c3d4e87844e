/* crates/vitrine-server/src/asset.rs */

use crate::media_type::{MediaType, PreloadType};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AssetType {
  /// The page's own client entry module. Exactly one per resolved page.
  Script,
  /// A stylesheet dependency, loaded eagerly.
  Style,
  /// Any other dependency, eligible for an early-fetch hint.
  Preload,
}

/// One artifact a page depends on. Immutable once handed to the injector.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageAsset {
  pub src: String,
  pub asset_type: AssetType,
  pub media_type: Option<&'static str>,
  pub preload_type: Option<PreloadType>,
}

impl PageAsset {
  /// Candidate asset for a discovered dependency path: stylesheet media
  /// becomes a `Style` asset, everything else a `Preload`.
  pub fn from_dependency(src: impl Into<String>) -> Self {
    let src = src.into();
    let inferred = MediaType::infer(&src);
    let asset_type = match inferred {
      Some(media) if media.media_type == "text/css" => AssetType::Style,
      _ => AssetType::Preload,
    };
    Self {
      src,
      asset_type,
      media_type: inferred.map(|media| media.media_type),
      preload_type: inferred.map(|media| media.preload_type),
    }
  }

  /// The page's entry module asset.
  pub fn script(src: impl Into<String>) -> Self {
    Self {
      src: src.into(),
      asset_type: AssetType::Script,
      media_type: Some("text/javascript"),
      preload_type: None,
    }
  }
}

// Early-loading rank; lower loads earlier. Critical-rendering-path resources
// (styles, fonts, images) are hinted before the entry module, which loads
// last.
fn push_rank(asset: &PageAsset) -> u8 {
  if asset.asset_type == AssetType::Style {
    return 0;
  }
  if asset.preload_type == Some(PreloadType::Style) {
    return 1;
  }
  if asset.preload_type == Some(PreloadType::Font) {
    return 2;
  }
  if asset.preload_type == Some(PreloadType::Image) {
    return 3;
  }
  if asset.preload_type == Some(PreloadType::Script) {
    return 5;
  }
  if asset.asset_type == AssetType::Script {
    return 6;
  }
  4
}

/// Order assets for optimal early loading. Stable: equal-rank assets keep
/// their input order.
pub fn sort_for_http_push(assets: &mut [PageAsset]) {
  assets.sort_by_key(push_rank);
}
