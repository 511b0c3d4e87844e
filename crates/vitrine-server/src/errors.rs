/* crates/vitrine-server/src/errors.rs */

use std::fmt;

/// Failure tier. The pipeline never retries either kind; the distinction is
/// who can act on the message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
  /// Internal invariant violation. Rendering of the page must stop; the
  /// message carries the offending value for debugging.
  Assertion,
  /// Caller-actionable misuse: a missing build artifact, a malformed
  /// argument, a duplicate injection. Fixed by the caller, not by vitrine.
  Usage,
}

#[derive(Debug)]
pub struct VitrineError {
  kind: ErrorKind,
  message: String,
}

impl VitrineError {
  pub fn assertion(message: impl Into<String>) -> Self {
    Self { kind: ErrorKind::Assertion, message: message.into() }
  }

  pub fn usage(message: impl Into<String>) -> Self {
    Self { kind: ErrorKind::Usage, message: message.into() }
  }

  pub fn kind(&self) -> ErrorKind {
    self.kind
  }

  pub fn message(&self) -> &str {
    &self.message
  }

  pub fn is_usage(&self) -> bool {
    self.kind == ErrorKind::Usage
  }
}

impl fmt::Display for VitrineError {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self.kind {
      ErrorKind::Assertion => write!(f, "ASSERTION_FAILED: {}", self.message),
      ErrorKind::Usage => write!(f, "{}", self.message),
    }
  }
}

impl std::error::Error for VitrineError {}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn assertion_accessors() {
    let err = VitrineError::assertion("two script assets");
    assert_eq!(err.kind(), ErrorKind::Assertion);
    assert_eq!(err.message(), "two script assets");
    assert!(!err.is_usage());
  }

  #[test]
  fn usage_displays_message_verbatim() {
    let err = VitrineError::usage("run `$ vite build` first");
    assert!(err.is_usage());
    assert_eq!(err.to_string(), "run `$ vite build` first");
  }

  #[test]
  fn assertion_display_is_flagged() {
    let err = VitrineError::assertion("boom");
    assert_eq!(err.to_string(), "ASSERTION_FAILED: boom");
  }
}
