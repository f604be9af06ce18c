//! Harness configuration: a TOML file plus `BEACON_*` environment
//! variables, with CLI flags layered on top by `main`.

use beacon_core::{
  location::PositionFix,
  platform::{BuildConfig, PlatformFamily},
};
use beacon_store_firestore::FirestoreConfig;
use serde::Deserialize;

use crate::gateway::PermissionPolicy;

#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
  /// Remote collection receiving submitted records.
  #[serde(default = "default_collection")]
  pub collection: String,

  #[serde(default)]
  pub push: PushSettings,

  #[serde(default)]
  pub firestore: FirestoreConfig,

  #[serde(default)]
  pub location: LocationSettings,

  #[serde(default)]
  pub device: DeviceSettings,
}

fn default_collection() -> String { "users".to_owned() }

// ─── Push ────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Default, Deserialize)]
pub struct PushSettings {
  /// Primary project-identifier location.
  #[serde(default)]
  pub project_id: Option<String>,

  /// Fallback project-identifier location.
  #[serde(default)]
  pub legacy_project_id: Option<String>,

  #[serde(default)]
  pub permission: PermissionPolicy,
}

impl PushSettings {
  pub fn build_config(&self) -> BuildConfig {
    BuildConfig {
      project_id:        self.project_id.clone(),
      legacy_project_id: self.legacy_project_id.clone(),
    }
  }
}

// ─── Location ────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Deserialize)]
pub struct LocationSettings {
  /// Foreground location permission granted to the harness.
  #[serde(default = "default_true")]
  pub allow: bool,

  #[serde(default)]
  pub latitude: Option<f64>,

  #[serde(default)]
  pub longitude: Option<f64>,
}

impl LocationSettings {
  /// A fix requires both axes; anything less is a fix failure.
  pub fn fix(&self) -> Option<PositionFix> {
    match (self.latitude, self.longitude) {
      (Some(lat), Some(lon)) => Some(PositionFix::new(lat, lon)),
      _ => None,
    }
  }
}

impl Default for LocationSettings {
  fn default() -> Self {
    Self {
      allow:     true,
      latitude:  None,
      longitude: None,
    }
  }
}

// ─── Device ──────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Deserialize)]
pub struct DeviceSettings {
  /// Report a physical device (push registration requires one).
  #[serde(default = "default_true")]
  pub physical: bool,

  /// Override the platform family detected from the build target.
  #[serde(default)]
  pub family: Option<PlatformFamily>,
}

impl Default for DeviceSettings {
  fn default() -> Self {
    Self {
      physical: true,
      family:   None,
    }
  }
}

fn default_true() -> bool { true }
