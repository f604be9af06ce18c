//! Position fixes and the geolocation capability trait.

use std::future::Future;

use serde::{Deserialize, Serialize};

use crate::push::PermissionStatus;

// ─── PositionFix ─────────────────────────────────────────────────────────────

/// A one-shot geographic fix. Ephemeral — created fresh per workflow
/// invocation, never stored, never merged with prior fixes.
///
/// `Default` is the (0, 0) sentinel substituted when no real fix is
/// available, so downstream formatting proceeds uniformly.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct PositionFix {
  pub latitude:  f64,
  pub longitude: f64,
}

impl PositionFix {
  pub fn new(latitude: f64, longitude: f64) -> Self {
    Self {
      latitude,
      longitude,
    }
  }

  /// Render both axes with exactly 5 digits after the decimal point, the
  /// precision every user-facing message carries.
  pub fn format_fixed(&self) -> String {
    format!("Lat: {:.5}, Lon: {:.5}", self.latitude, self.longitude)
  }
}

// ─── Trait ───────────────────────────────────────────────────────────────────

/// Abstraction over the geolocation subsystem: a foreground permission query
/// and a one-shot position fix.
pub trait Locator: Send + Sync {
  type Error: std::error::Error + Send + Sync + 'static;

  /// Request authorization to read the position while the app is in use.
  fn request_foreground_permission(
    &self,
  ) -> impl Future<Output = Result<PermissionStatus, Self::Error>> + Send + '_;

  /// Obtain a single current position fix.
  fn current_position(
    &self,
  ) -> impl Future<Output = Result<PositionFix, Self::Error>> + Send + '_;
}
