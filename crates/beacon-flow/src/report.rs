//! Local-notification mirror of a workflow outcome.

use beacon_core::push::{NotificationContent, PushGateway};

/// Schedule an immediate local notification (no delay trigger — it fires as
/// soon as the platform can present it).
///
/// Fire-and-forget from the user's perspective, but awaited by the workflow
/// before its report step counts as complete, so a scheduling failure has an
/// explicit error channel instead of vanishing.
pub async fn report_immediately<G: PushGateway>(
  gateway: &G,
  title: &str,
  body: &str,
) -> Result<(), G::Error> {
  gateway
    .schedule(NotificationContent::new(title, body), None)
    .await
}
