//! Lifetime management for the two passive notification observers.

use beacon_core::push::{NotificationEvent, PushGateway, Subscription};
use tokio::sync::mpsc::UnboundedSender;

/// Owns the two observer registrations for the active session.
///
/// Each handle is released exactly once: `detach` takes them out of their
/// slots, so calling it again (or on a never-attached pair) is a no-op.
pub struct ListenerHandles<H: Subscription> {
  received: Option<H>,
  response: Option<H>,
}

impl<H: Subscription> ListenerHandles<H> {
  /// A never-attached pair. Detaching it does nothing.
  pub fn empty() -> Self {
    Self {
      received: None,
      response: None,
    }
  }

  pub fn is_attached(&self) -> bool {
    self.received.is_some() || self.response.is_some()
  }

  /// Release both registrations. Idempotent.
  pub fn detach(&mut self) {
    if let Some(h) = self.received.take() {
      h.remove();
    }
    if let Some(h) = self.response.take() {
      h.remove();
    }
  }
}

impl<H: Subscription> Drop for ListenerHandles<H> {
  // Covers abnormal teardown paths. A dangling platform registration is a
  // resource leak, not a crash.
  fn drop(&mut self) { self.detach(); }
}

/// Attach both observers for the lifetime of the session. Registration does
/// not fail in this design. Observed notifications are published as
/// [`NotificationEvent`]s on `events` for one coordinator to drain.
pub fn attach<G: PushGateway>(
  gateway: &G,
  events: &UnboundedSender<NotificationEvent>,
) -> ListenerHandles<G::Handle> {
  ListenerHandles {
    received: Some(gateway.add_received_listener(events.clone())),
    response: Some(gateway.add_response_listener(events.clone())),
  }
}
