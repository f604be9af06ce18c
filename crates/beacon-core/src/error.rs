//! Error types for `beacon-core`.

use thiserror::Error;

/// Failure modes of push-identity acquisition.
///
/// The acquirer only fails; presenting the failure to the user is the
/// caller's responsibility.
#[derive(Debug, Error)]
pub enum AcquireError {
  /// The execution context is not a real device.
  #[error("push registration requires a physical device")]
  NoPhysicalDevice,

  /// The user declined, or had previously declined and did not grant on
  /// the single re-prompt.
  #[error("notification permission not granted")]
  PermissionDenied,

  /// Neither the primary nor the fallback configuration location carries a
  /// push project identifier.
  #[error("push project identifier missing from build configuration")]
  MissingProjectConfiguration,

  /// The underlying push gateway failed (channel setup or token fetch).
  #[error("push gateway error: {0}")]
  Gateway(#[source] Box<dyn std::error::Error + Send + Sync>),
}

/// Failure modes of the best-effort location stage.
///
/// These never abort the submission workflow; they are contained at the
/// stage boundary and replaced with the sentinel fix.
#[derive(Debug, Error)]
pub enum LocationError<E: std::error::Error> {
  #[error("location permission not granted")]
  PermissionDenied,

  /// The provider failed to deliver a fix (timeout, unavailable).
  #[error(transparent)]
  Provider(E),
}
