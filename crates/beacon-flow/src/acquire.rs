//! Push-identity acquisition.

use beacon_core::{
  AcquireError,
  platform::{BuildConfig, Platform, PlatformFamily},
  push::{ChannelImportance, PushGateway, PushIdentity},
};
use tracing::debug;

/// Acquire this installation's push identity.
///
/// On the Android family a `"default"` notification channel with maximum
/// importance is ensured first — a platform prerequisite, not a permission,
/// and idempotent. At most one interactive permission prompt is issued: if
/// the status is still not granted after it, acquisition fails with
/// [`AcquireError::PermissionDenied`] and no further retry happens.
pub async fn acquire_identity<P, G>(
  platform: &P,
  gateway: &G,
  build: &BuildConfig,
) -> Result<PushIdentity, AcquireError>
where
  P: Platform,
  G: PushGateway,
{
  if platform.family() == PlatformFamily::Android {
    gateway
      .configure_channel("default", ChannelImportance::Max)
      .await
      .map_err(|e| AcquireError::Gateway(Box::new(e)))?;
  }

  if !platform.is_physical_device() {
    return Err(AcquireError::NoPhysicalDevice);
  }

  let mut status = gateway
    .permission_status()
    .await
    .map_err(|e| AcquireError::Gateway(Box::new(e)))?;

  if !status.is_granted() {
    debug!("notification permission not yet granted, prompting once");
    status = gateway
      .request_permission()
      .await
      .map_err(|e| AcquireError::Gateway(Box::new(e)))?;
  }

  if !status.is_granted() {
    return Err(AcquireError::PermissionDenied);
  }

  let project_id = build
    .resolve_project_id()
    .ok_or(AcquireError::MissingProjectConfiguration)?;

  gateway
    .push_identity(project_id)
    .await
    .map_err(|e| AcquireError::Gateway(Box::new(e)))
}
