/* crates/vitrine-server/src/media_type.rs */

/// Preload category of a non-stylesheet dependency, rendered into the `as=`
/// attribute of its link tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PreloadType {
  Font,
  Image,
  Script,
  Style,
}

impl PreloadType {
  pub fn as_attr(self) -> &'static str {
    match self {
      PreloadType::Font => "font",
      PreloadType::Image => "image",
      PreloadType::Script => "script",
      PreloadType::Style => "style",
    }
  }
}

/// Semantic content type inferred from a file extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MediaType {
  pub media_type: &'static str,
  pub preload_type: PreloadType,
}

const MEDIA_TYPES: &[(&str, MediaType)] = &[
  // code
  (".js", MediaType { media_type: "text/javascript", preload_type: PreloadType::Script }),
  (".mjs", MediaType { media_type: "text/javascript", preload_type: PreloadType::Script }),
  (".css", MediaType { media_type: "text/css", preload_type: PreloadType::Style }),
  // fonts
  (".ttf", MediaType { media_type: "font/ttf", preload_type: PreloadType::Font }),
  (".otf", MediaType { media_type: "font/otf", preload_type: PreloadType::Font }),
  (".woff", MediaType { media_type: "font/woff", preload_type: PreloadType::Font }),
  (".woff2", MediaType { media_type: "font/woff2", preload_type: PreloadType::Font }),
  // images
  (".png", MediaType { media_type: "image/png", preload_type: PreloadType::Image }),
  (".jpg", MediaType { media_type: "image/jpeg", preload_type: PreloadType::Image }),
  (".jpeg", MediaType { media_type: "image/jpeg", preload_type: PreloadType::Image }),
  (".webp", MediaType { media_type: "image/webp", preload_type: PreloadType::Image }),
  (".gif", MediaType { media_type: "image/gif", preload_type: PreloadType::Image }),
  (".svg", MediaType { media_type: "image/svg+xml", preload_type: PreloadType::Image }),
];

impl MediaType {
  /// Classify a file path by extension (case-insensitive suffix match).
  /// Unknown extensions return `None`; the asset then degrades to a generic
  /// preload tag with no `as=`/`type=` attributes.
  pub fn infer(path: &str) -> Option<Self> {
    let path = path.to_ascii_lowercase();
    MEDIA_TYPES.iter().find(|(suffix, _)| path.ends_with(suffix)).map(|&(_, media)| media)
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn classifies_scripts() {
    let media = MediaType::infer("/pages/index.page.client.js").expect("known");
    assert_eq!(media.media_type, "text/javascript");
    assert_eq!(media.preload_type, PreloadType::Script);
    assert!(MediaType::infer("/chunks/chunk-a1b2.mjs").is_some());
  }

  #[test]
  fn classifies_styles() {
    let media = MediaType::infer("/assets/index.abc123.css").expect("known");
    assert_eq!(media.media_type, "text/css");
    assert_eq!(media.preload_type, PreloadType::Style);
  }

  #[test]
  fn classifies_fonts() {
    for path in ["/a.ttf", "/a.otf", "/a.woff", "/a.woff2"] {
      let media = MediaType::infer(path).expect("known font");
      assert_eq!(media.preload_type, PreloadType::Font);
    }
    assert_eq!(MediaType::infer("/a.woff2").expect("known").media_type, "font/woff2");
  }

  #[test]
  fn classifies_images() {
    for path in ["/a.png", "/a.jpg", "/a.jpeg", "/a.webp", "/a.gif", "/a.svg"] {
      let media = MediaType::infer(path).expect("known image");
      assert_eq!(media.preload_type, PreloadType::Image);
    }
  }

  #[test]
  fn suffix_match_is_case_insensitive() {
    assert_eq!(MediaType::infer("/LOGO.PNG").expect("known").media_type, "image/png");
    assert_eq!(MediaType::infer("/Entry.JS").expect("known").media_type, "text/javascript");
  }

  #[test]
  fn unknown_extension_is_none() {
    assert!(MediaType::infer("/data/table.csv").is_none());
    assert!(MediaType::infer("/no-extension").is_none());
  }

  #[test]
  fn scss_is_not_css() {
    assert!(MediaType::infer("/styles/main.scss").is_none());
  }
}
