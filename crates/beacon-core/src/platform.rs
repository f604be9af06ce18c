//! Device identity and build-time configuration.

use serde::Deserialize;

// ─── Platform family ─────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PlatformFamily {
  Android,
  Ios,
  Other,
}

/// Abstraction over the execution context: which platform family this is and
/// whether it is a physical device (push registration requires one).
pub trait Platform: Send + Sync {
  fn family(&self) -> PlatformFamily;

  fn is_physical_device(&self) -> bool;
}

// ─── Build configuration ─────────────────────────────────────────────────────

/// Push project identifier as baked into the build, resolvable from one of
/// two configuration locations.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct BuildConfig {
  /// Primary location: the application manifest.
  pub project_id:        Option<String>,
  /// Fallback location: the legacy build configuration block.
  pub legacy_project_id: Option<String>,
}

impl BuildConfig {
  /// Primary first, then fallback. `None` when neither location is set.
  pub fn resolve_project_id(&self) -> Option<&str> {
    self
      .project_id
      .as_deref()
      .or(self.legacy_project_id.as_deref())
  }
}
