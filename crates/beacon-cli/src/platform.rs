//! Host platform identity for the harness.

use beacon_core::platform::{Platform, PlatformFamily};

pub struct HostPlatform {
  family:   PlatformFamily,
  physical: bool,
}

impl HostPlatform {
  /// Detect the family from the build target, with an optional config
  /// override (useful for exercising the Android channel path on a
  /// desktop).
  pub fn new(family_override: Option<PlatformFamily>, physical: bool) -> Self {
    let family = family_override.unwrap_or(if cfg!(target_os = "android") {
      PlatformFamily::Android
    } else if cfg!(target_os = "ios") {
      PlatformFamily::Ios
    } else {
      PlatformFamily::Other
    });
    Self { family, physical }
  }
}

impl Platform for HostPlatform {
  fn family(&self) -> PlatformFamily { self.family }

  fn is_physical_device(&self) -> bool { self.physical }
}
