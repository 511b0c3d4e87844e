/* crates/vitrine-server/src/manifest.rs */

// Consumption of the Vite build manifests. The manifest format is treated as
// an opaque lookup table: module key -> emitted file + entry flag.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::errors::VitrineError;

/// One record of a build manifest.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ManifestEntry {
  pub file: String,
  #[serde(default, rename = "isEntry")]
  pub is_entry: bool,
  #[serde(default)]
  pub css: Vec<String>,
  #[serde(default)]
  pub assets: Vec<String>,
}

pub type BuildManifest = BTreeMap<String, ManifestEntry>;

/// The client and server build manifests, read from disk once per process
/// and shared read-only afterwards. Missing files are recorded as `None`;
/// only a manifest-mode render turns that into an error.
#[derive(Debug, Clone, Default)]
pub struct Manifests {
  client: Option<BuildManifest>,
  server: Option<BuildManifest>,
  client_path: PathBuf,
  server_path: PathBuf,
}

impl Manifests {
  /// Read `client/manifest.json` and `server/manifest.json` under the build
  /// output directory.
  pub fn load(dist_dir: impl AsRef<Path>) -> Result<Self, VitrineError> {
    let dist_dir = dist_dir.as_ref();
    let client_path = dist_dir.join("client").join("manifest.json");
    let server_path = dist_dir.join("server").join("manifest.json");
    Ok(Self {
      client: read_manifest(&client_path)?,
      server: read_manifest(&server_path)?,
      client_path,
      server_path,
    })
  }

  pub fn client_path(&self) -> &Path {
    &self.client_path
  }

  pub fn server_path(&self) -> &Path {
    &self.server_path
  }

  /// Both manifests, or the actionable build-instructions error. The
  /// `is_pre_rendering` flag only changes how the failing operation is named.
  pub fn retrieve(
    &self,
    is_pre_rendering: bool,
  ) -> Result<(&BuildManifest, &BuildManifest), VitrineError> {
    match (&self.client, &self.server) {
      (Some(client), Some(server)) => Ok((client, server)),
      _ => {
        let user_operation = if is_pre_rendering {
          "running `$ vitrine prerender`"
        } else {
          "running the server in production mode"
        };
        Err(VitrineError::usage(format!(
          "You are {user_operation} but you didn't build your app yet: make sure to run \
           `$ vite build && vite build --ssr` before. (Following build manifest is missing: \
           `{}` and/or `{}`.)",
          self.client_path.display(),
          self.server_path.display(),
        )))
      }
    }
  }
}

fn read_manifest(path: &Path) -> Result<Option<BuildManifest>, VitrineError> {
  if !path.exists() {
    return Ok(None);
  }
  let raw = fs::read_to_string(path).map_err(|err| {
    VitrineError::assertion(format!("failed to read build manifest `{}`: {err}", path.display()))
  })?;
  let manifest = serde_json::from_str(&raw).map_err(|err| {
    VitrineError::assertion(format!("malformed build manifest `{}`: {err}", path.display()))
  })?;
  Ok(Some(manifest))
}

/// Map a root-relative entry module path to its emitted production URL.
/// Only meaningful in manifest mode; dev mode serves the module path
/// verbatim. Every failure here is an internal invariant violation: the
/// resolver already confirmed manifest mode, so the record must exist and be
/// flagged as an entry point.
pub fn resolve_entry_url(
  entry_path: &str,
  manifest: &BuildManifest,
) -> Result<String, VitrineError> {
  if !entry_path.starts_with('/') {
    return Err(VitrineError::assertion(format!(
      "entry module path `{entry_path}` is not root-relative"
    )));
  }
  let manifest_key = &entry_path[1..];
  let Some(entry) = manifest.get(manifest_key) else {
    return Err(VitrineError::assertion(format!(
      "no build manifest record for `{manifest_key}` ({} records present)",
      manifest.len()
    )));
  };
  if !entry.is_entry {
    return Err(VitrineError::assertion(format!(
      "build manifest record `{manifest_key}` is not an entry point (file: `{}`)",
      entry.file
    )));
  }
  if entry.file.starts_with('/') {
    return Err(VitrineError::assertion(format!(
      "build manifest record `{manifest_key}` has an absolute output file `{}`",
      entry.file
    )));
  }
  Ok(format!("/{}", entry.file))
}
