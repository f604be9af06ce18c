//! Console stand-in for the geolocation subsystem.

use beacon_core::{
  location::{Locator, PositionFix},
  push::PermissionStatus,
};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum LocateError {
  #[error("no position fix configured")]
  NoFix,
}

/// Serves a fix from configuration. `allow = false` simulates a denied
/// foreground permission; a missing fix simulates acquisition failure.
pub struct ConsoleLocator {
  allow: bool,
  fix:   Option<PositionFix>,
}

impl ConsoleLocator {
  pub fn new(allow: bool, fix: Option<PositionFix>) -> Self {
    Self { allow, fix }
  }
}

impl Locator for ConsoleLocator {
  type Error = LocateError;

  async fn request_foreground_permission(
    &self,
  ) -> Result<PermissionStatus, LocateError> {
    Ok(if self.allow {
      PermissionStatus::Granted
    } else {
      PermissionStatus::Denied
    })
  }

  async fn current_position(&self) -> Result<PositionFix, LocateError> {
    self.fix.ok_or(LocateError::NoFix)
  }
}
