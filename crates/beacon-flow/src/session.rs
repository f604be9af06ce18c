//! Session startup and teardown.

use beacon_core::{
  outcome::AlertSink,
  platform::{BuildConfig, Platform},
  push::{NotificationEvent, PushGateway, PushIdentity},
};
use tokio::sync::mpsc::{self, UnboundedReceiver};
use tracing::{info, warn};

use crate::{
  acquire,
  listeners::{self, ListenerHandles},
};

/// State owned by one running session: the acquired push identity (if any),
/// the two observer registrations, and the event channel they publish into.
pub struct Session<G: PushGateway> {
  /// Written once at startup, read thereafter; `None` when acquisition
  /// failed. Never persisted across sessions.
  pub push_identity: Option<PushIdentity>,
  /// Observed-notification events, drained by the session's coordinator.
  pub events:        UnboundedReceiver<NotificationEvent>,
  handles: ListenerHandles<G::Handle>,
}

impl<G: PushGateway> Session<G> {
  /// Run the startup flow: attach both observers, then acquire the push
  /// identity. An acquisition failure is alerted exactly once ("Push
  /// Error" plus the reason), leaves the identity empty, and blocks no
  /// other feature.
  pub async fn start<P, A>(
    platform: &P,
    gateway: &G,
    build: &BuildConfig,
    alerts: &A,
  ) -> Self
  where
    P: Platform,
    A: AlertSink,
  {
    let (tx, rx) = mpsc::unbounded_channel();
    let handles = listeners::attach(gateway, &tx);

    let push_identity =
      match acquire::acquire_identity(platform, gateway, build).await {
        Ok(identity) => {
          info!(token = %identity, "push identity acquired");
          Some(identity)
        }
        Err(e) => {
          warn!(error = %e, "push identity acquisition failed");
          alerts.alert("Push Error", &e.to_string());
          None
        }
      };

    Self {
      push_identity,
      events: rx,
      handles,
    }
  }

  /// Release the observer registrations. Idempotent; dropping the session
  /// also detaches.
  pub fn shutdown(&mut self) { self.handles.detach(); }
}
