//! Push identities, notification content, and the push gateway trait.
//!
//! Listener callbacks do not capture shared state: registration hands the
//! gateway an mpsc sender, and every observed notification is published as a
//! [`NotificationEvent`] to be drained by a single coordinator. Ordering and
//! lifetime stay explicit that way.

use std::{future::Future, time::Duration};

use serde::{Deserialize, Serialize};
use tokio::sync::mpsc::UnboundedSender;

// ─── PushIdentity ────────────────────────────────────────────────────────────

/// Opaque token identifying this installed app instance for push delivery.
///
/// Created once per session, held in session state, never persisted. It can
/// go stale server-side or OS-side outside this system's control; no renewal
/// logic exists.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PushIdentity(String);

impl PushIdentity {
  pub fn new(token: impl Into<String>) -> Self { Self(token.into()) }

  pub fn as_str(&self) -> &str { &self.0 }
}

impl std::fmt::Display for PushIdentity {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    f.write_str(&self.0)
  }
}

impl From<String> for PushIdentity {
  fn from(token: String) -> Self { Self(token) }
}

// ─── Permission status ───────────────────────────────────────────────────────

/// Outcome of a permission query or an interactive permission request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PermissionStatus {
  Granted,
  Denied,
  Undetermined,
}

impl PermissionStatus {
  pub fn is_granted(&self) -> bool { matches!(self, Self::Granted) }
}

// ─── Channels ────────────────────────────────────────────────────────────────

/// Importance ladder for Android notification channels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChannelImportance {
  Min,
  Low,
  Default,
  High,
  Max,
}

// ─── Notification content and events ─────────────────────────────────────────

/// Title/body pair carried by a scheduled local notification.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NotificationContent {
  pub title: String,
  pub body:  String,
}

impl NotificationContent {
  pub fn new(title: impl Into<String>, body: impl Into<String>) -> Self {
    Self {
      title: title.into(),
      body:  body.into(),
    }
  }
}

/// An observation published by a registered listener. No payload processing
/// happens on receipt in this version; the coordinator merely drains and
/// logs these.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NotificationEvent {
  /// A notification was presented while the app was foregrounded.
  Received(NotificationContent),
  /// The user interacted with a presented notification.
  Response(NotificationContent),
}

// ─── Subscriptions ───────────────────────────────────────────────────────────

/// An active listener registration. Consuming `remove` releases the
/// platform-level registration; a handle must be removed at most once.
pub trait Subscription: Send {
  fn remove(self);
}

// ─── Trait ───────────────────────────────────────────────────────────────────

/// Abstraction over the push/notification subsystem.
///
/// Listener registration is synchronous and cannot fail in this design;
/// everything else is asynchronous and fallible.
pub trait PushGateway: Send + Sync {
  type Error: std::error::Error + Send + Sync + 'static;
  type Handle: Subscription;

  /// Ensure a notification channel exists. Android-only platform
  /// prerequisite; idempotent, safe to repeat.
  fn configure_channel<'a>(
    &'a self,
    name: &'a str,
    importance: ChannelImportance,
  ) -> impl Future<Output = Result<(), Self::Error>> + Send + 'a;

  /// Query the current notification permission without prompting.
  fn permission_status(
    &self,
  ) -> impl Future<Output = Result<PermissionStatus, Self::Error>> + Send + '_;

  /// Issue one interactive permission request and return the resulting
  /// status.
  fn request_permission(
    &self,
  ) -> impl Future<Output = Result<PermissionStatus, Self::Error>> + Send + '_;

  /// Obtain the push identity for this installation under `project_id`.
  fn push_identity<'a>(
    &'a self,
    project_id: &'a str,
  ) -> impl Future<Output = Result<PushIdentity, Self::Error>> + Send + 'a;

  /// Schedule a local notification. `trigger = None` fires as soon as the
  /// platform can present it.
  fn schedule(
    &self,
    content: NotificationContent,
    trigger: Option<Duration>,
  ) -> impl Future<Output = Result<(), Self::Error>> + Send + '_;

  /// Register an observer for presented notifications.
  fn add_received_listener(
    &self,
    events: UnboundedSender<NotificationEvent>,
  ) -> Self::Handle;

  /// Register an observer for user responses to notifications.
  fn add_response_listener(
    &self,
    events: UnboundedSender<NotificationEvent>,
  ) -> Self::Handle;
}
