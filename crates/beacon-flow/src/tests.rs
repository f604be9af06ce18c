//! Tests for the orchestration flows, against hand-written fakes of the
//! platform capabilities.

use std::{
  sync::{
    Arc, Mutex,
    atomic::{AtomicUsize, Ordering},
  },
  time::Duration,
};

use beacon_core::{
  AcquireError,
  location::{Locator, PositionFix},
  outcome::{AlertSink, OutcomeMessage},
  platform::{BuildConfig, Platform, PlatformFamily},
  push::{
    ChannelImportance, NotificationContent, NotificationEvent,
    PermissionStatus, PushGateway, PushIdentity, Subscription,
  },
  store::{DocumentId, DocumentStore},
};
use serde_json::Value;
use tokio::sync::mpsc::{self, UnboundedSender};

use crate::{acquire, listeners, session::Session, workflow};

// ─── Fakes ───────────────────────────────────────────────────────────────────

#[derive(Debug, thiserror::Error)]
#[error("{0}")]
struct FakeError(String);

struct FakeSubscription {
  removals: Arc<AtomicUsize>,
}

impl Subscription for FakeSubscription {
  fn remove(self) {
    self.removals.fetch_add(1, Ordering::SeqCst);
  }
}

struct FakeGateway {
  status:            Mutex<PermissionStatus>,
  prompt_result:     PermissionStatus,
  prompts:           AtomicUsize,
  channels:          Mutex<Vec<(String, ChannelImportance)>>,
  scheduled:         Mutex<Vec<NotificationContent>>,
  schedule_fails:    bool,
  requested_project: Mutex<Option<String>>,
  removals:          Arc<AtomicUsize>,
  received_senders:  Mutex<Vec<UnboundedSender<NotificationEvent>>>,
}

impl FakeGateway {
  fn new(status: PermissionStatus, prompt_result: PermissionStatus) -> Self {
    Self {
      status: Mutex::new(status),
      prompt_result,
      prompts: AtomicUsize::new(0),
      channels: Mutex::new(Vec::new()),
      scheduled: Mutex::new(Vec::new()),
      schedule_fails: false,
      requested_project: Mutex::new(None),
      removals: Arc::new(AtomicUsize::new(0)),
      received_senders: Mutex::new(Vec::new()),
    }
  }

  fn granted() -> Self {
    Self::new(PermissionStatus::Granted, PermissionStatus::Granted)
  }

  fn prompt_count(&self) -> usize { self.prompts.load(Ordering::SeqCst) }

  fn removal_count(&self) -> usize { self.removals.load(Ordering::SeqCst) }
}

impl PushGateway for FakeGateway {
  type Error = FakeError;
  type Handle = FakeSubscription;

  async fn configure_channel(
    &self,
    name: &str,
    importance: ChannelImportance,
  ) -> Result<(), FakeError> {
    self
      .channels
      .lock()
      .unwrap()
      .push((name.to_owned(), importance));
    Ok(())
  }

  async fn permission_status(&self) -> Result<PermissionStatus, FakeError> {
    Ok(*self.status.lock().unwrap())
  }

  async fn request_permission(&self) -> Result<PermissionStatus, FakeError> {
    self.prompts.fetch_add(1, Ordering::SeqCst);
    *self.status.lock().unwrap() = self.prompt_result;
    Ok(self.prompt_result)
  }

  async fn push_identity(
    &self,
    project_id: &str,
  ) -> Result<PushIdentity, FakeError> {
    *self.requested_project.lock().unwrap() = Some(project_id.to_owned());
    Ok(PushIdentity::new(format!("token-for-{project_id}")))
  }

  async fn schedule(
    &self,
    content: NotificationContent,
    _trigger: Option<Duration>,
  ) -> Result<(), FakeError> {
    if self.schedule_fails {
      return Err(FakeError("scheduling rejected".into()));
    }
    for tx in self.received_senders.lock().unwrap().iter() {
      let _ = tx.send(NotificationEvent::Received(content.clone()));
    }
    self.scheduled.lock().unwrap().push(content);
    Ok(())
  }

  fn add_received_listener(
    &self,
    events: UnboundedSender<NotificationEvent>,
  ) -> FakeSubscription {
    self.received_senders.lock().unwrap().push(events);
    FakeSubscription {
      removals: Arc::clone(&self.removals),
    }
  }

  fn add_response_listener(
    &self,
    _events: UnboundedSender<NotificationEvent>,
  ) -> FakeSubscription {
    FakeSubscription {
      removals: Arc::clone(&self.removals),
    }
  }
}

struct FakePlatform {
  family:   PlatformFamily,
  physical: bool,
}

impl FakePlatform {
  fn physical(family: PlatformFamily) -> Self {
    Self {
      family,
      physical: true,
    }
  }
}

impl Platform for FakePlatform {
  fn family(&self) -> PlatformFamily { self.family }

  fn is_physical_device(&self) -> bool { self.physical }
}

#[derive(Debug, Clone, Copy)]
enum LocatorBehavior {
  Fix(PositionFix),
  PermissionDenied,
  FixFails,
}

struct FakeLocator {
  behavior: LocatorBehavior,
}

impl Locator for FakeLocator {
  type Error = FakeError;

  async fn request_foreground_permission(
    &self,
  ) -> Result<PermissionStatus, FakeError> {
    Ok(match self.behavior {
      LocatorBehavior::PermissionDenied => PermissionStatus::Denied,
      _ => PermissionStatus::Granted,
    })
  }

  async fn current_position(&self) -> Result<PositionFix, FakeError> {
    match self.behavior {
      LocatorBehavior::Fix(fix) => Ok(fix),
      _ => Err(FakeError("position fix unavailable".into())),
    }
  }
}

struct FakeStore {
  result: Result<String, String>,
  writes: Mutex<Vec<(String, Value)>>,
}

impl FakeStore {
  fn succeeding(id: &str) -> Self {
    Self {
      result: Ok(id.to_owned()),
      writes: Mutex::new(Vec::new()),
    }
  }

  fn failing(message: &str) -> Self {
    Self {
      result: Err(message.to_owned()),
      writes: Mutex::new(Vec::new()),
    }
  }

  fn write_count(&self) -> usize { self.writes.lock().unwrap().len() }
}

impl DocumentStore for FakeStore {
  type Error = FakeError;

  async fn create_document(
    &self,
    collection: &str,
    fields: Value,
  ) -> Result<DocumentId, FakeError> {
    self
      .writes
      .lock()
      .unwrap()
      .push((collection.to_owned(), fields));
    match &self.result {
      Ok(id) => Ok(DocumentId::new(id.clone())),
      Err(msg) => Err(FakeError(msg.clone())),
    }
  }
}

#[derive(Default)]
struct RecordingAlerts {
  entries: Mutex<Vec<(String, String)>>,
}

impl AlertSink for RecordingAlerts {
  fn alert(&self, title: &str, body: &str) {
    self
      .entries
      .lock()
      .unwrap()
      .push((title.to_owned(), body.to_owned()));
  }
}

fn build_config() -> BuildConfig {
  BuildConfig {
    project_id:        Some("proj-1".into()),
    legacy_project_id: None,
  }
}

// ─── Acquirer ────────────────────────────────────────────────────────────────

#[tokio::test]
async fn acquire_returns_identity_without_prompt_when_already_granted() {
  let platform = FakePlatform::physical(PlatformFamily::Ios);
  let gateway = FakeGateway::granted();

  let identity = acquire::acquire_identity(&platform, &gateway, &build_config())
    .await
    .unwrap();

  assert_eq!(identity.as_str(), "token-for-proj-1");
  assert_eq!(gateway.prompt_count(), 0);
}

#[tokio::test]
async fn acquire_prompts_once_then_succeeds_when_granted_on_request() {
  let platform = FakePlatform::physical(PlatformFamily::Ios);
  let gateway =
    FakeGateway::new(PermissionStatus::Undetermined, PermissionStatus::Granted);

  let identity = acquire::acquire_identity(&platform, &gateway, &build_config())
    .await
    .unwrap();

  assert_eq!(identity.as_str(), "token-for-proj-1");
  assert_eq!(gateway.prompt_count(), 1);
}

#[tokio::test]
async fn acquire_fails_after_single_denied_prompt() {
  let platform = FakePlatform::physical(PlatformFamily::Ios);
  let gateway =
    FakeGateway::new(PermissionStatus::Denied, PermissionStatus::Denied);

  let err = acquire::acquire_identity(&platform, &gateway, &build_config())
    .await
    .unwrap_err();

  assert!(matches!(err, AcquireError::PermissionDenied));
  assert_eq!(gateway.prompt_count(), 1);
}

#[tokio::test]
async fn acquire_rejects_non_physical_device_before_prompting() {
  let platform = FakePlatform {
    family:   PlatformFamily::Ios,
    physical: false,
  };
  let gateway = FakeGateway::granted();

  let err = acquire::acquire_identity(&platform, &gateway, &build_config())
    .await
    .unwrap_err();

  assert!(matches!(err, AcquireError::NoPhysicalDevice));
  assert_eq!(gateway.prompt_count(), 0);
}

#[tokio::test]
async fn acquire_configures_default_channel_on_android() {
  let platform = FakePlatform::physical(PlatformFamily::Android);
  let gateway = FakeGateway::granted();

  acquire::acquire_identity(&platform, &gateway, &build_config())
    .await
    .unwrap();

  let channels = gateway.channels.lock().unwrap();
  assert_eq!(*channels, vec![("default".to_owned(), ChannelImportance::Max)]);
}

#[tokio::test]
async fn acquire_skips_channel_setup_off_android() {
  let platform = FakePlatform::physical(PlatformFamily::Other);
  let gateway = FakeGateway::granted();

  acquire::acquire_identity(&platform, &gateway, &build_config())
    .await
    .unwrap();

  assert!(gateway.channels.lock().unwrap().is_empty());
}

#[tokio::test]
async fn acquire_fails_without_project_id() {
  let platform = FakePlatform::physical(PlatformFamily::Ios);
  let gateway = FakeGateway::granted();

  let err =
    acquire::acquire_identity(&platform, &gateway, &BuildConfig::default())
      .await
      .unwrap_err();

  assert!(matches!(err, AcquireError::MissingProjectConfiguration));
}

#[tokio::test]
async fn acquire_uses_fallback_project_id() {
  let platform = FakePlatform::physical(PlatformFamily::Ios);
  let gateway = FakeGateway::granted();
  let build = BuildConfig {
    project_id:        None,
    legacy_project_id: Some("legacy-9".into()),
  };

  acquire::acquire_identity(&platform, &gateway, &build)
    .await
    .unwrap();

  assert_eq!(
    gateway.requested_project.lock().unwrap().as_deref(),
    Some("legacy-9")
  );
}

// ─── Listener registry ───────────────────────────────────────────────────────

#[test]
fn detach_releases_both_handles_exactly_once() {
  let gateway = FakeGateway::granted();
  let (tx, _rx) = mpsc::unbounded_channel();

  let mut handles = listeners::attach(&gateway, &tx);
  assert!(handles.is_attached());

  handles.detach();
  assert_eq!(gateway.removal_count(), 2);
  assert!(!handles.is_attached());

  // Second detach must not double-release.
  handles.detach();
  assert_eq!(gateway.removal_count(), 2);
}

#[test]
fn detach_on_never_attached_handles_is_a_noop() {
  let mut handles = listeners::ListenerHandles::<FakeSubscription>::empty();
  handles.detach();
  assert!(!handles.is_attached());
}

#[test]
fn dropping_handles_detaches() {
  let gateway = FakeGateway::granted();
  let (tx, _rx) = mpsc::unbounded_channel();

  let handles = listeners::attach(&gateway, &tx);
  drop(handles);
  assert_eq!(gateway.removal_count(), 2);
}

#[test]
fn drop_after_detach_does_not_double_release() {
  let gateway = FakeGateway::granted();
  let (tx, _rx) = mpsc::unbounded_channel();

  let mut handles = listeners::attach(&gateway, &tx);
  handles.detach();
  drop(handles);
  assert_eq!(gateway.removal_count(), 2);
}

// ─── Workflow ────────────────────────────────────────────────────────────────

#[tokio::test]
async fn successful_submission_reports_exact_success_body() {
  let store = FakeStore::succeeding("abc123");
  let gateway = FakeGateway::granted();
  let locator = FakeLocator {
    behavior: LocatorBehavior::Fix(PositionFix::new(-6.2, 106.8167)),
  };
  let alerts = RecordingAlerts::default();

  let outcome =
    workflow::submit_record(&store, &gateway, &locator, &alerts, "users").await;

  assert!(outcome.is_success());
  let expected = "Success! ID: abc123\nLat: -6.20000, Lon: 106.81670";

  let entries = alerts.entries.lock().unwrap();
  assert_eq!(
    *entries,
    vec![("Firestore Success".to_owned(), expected.to_owned())]
  );

  let scheduled = gateway.scheduled.lock().unwrap();
  assert_eq!(scheduled.len(), 1);
  assert_eq!(scheduled[0].title, "Firestore Success");
  // Alert body and notification body are byte-identical.
  assert_eq!(scheduled[0].body, entries[0].1);

  let writes = store.writes.lock().unwrap();
  assert_eq!(writes[0].0, "users");
}

#[tokio::test]
async fn remote_failure_reports_exact_error_body_with_sentinel_fix() {
  let store = FakeStore::failing("network unreachable");
  let gateway = FakeGateway::granted();
  let locator = FakeLocator {
    behavior: LocatorBehavior::PermissionDenied,
  };
  let alerts = RecordingAlerts::default();

  let outcome =
    workflow::submit_record(&store, &gateway, &locator, &alerts, "users").await;

  assert!(!outcome.is_success());
  let expected = "Error: network unreachable\nLat: 0.00000, Lon: 0.00000";

  let entries = alerts.entries.lock().unwrap();
  assert_eq!(
    *entries,
    vec![("Firestore Error".to_owned(), expected.to_owned())]
  );

  let scheduled = gateway.scheduled.lock().unwrap();
  assert_eq!(scheduled.len(), 1);
  assert_eq!(scheduled[0].title, "Firestore Error");
  assert_eq!(scheduled[0].body, entries[0].1);
}

#[tokio::test]
async fn remote_write_happens_for_all_location_outcomes() {
  let behaviors = [
    LocatorBehavior::Fix(PositionFix::new(51.5, -0.12)),
    LocatorBehavior::PermissionDenied,
    LocatorBehavior::FixFails,
  ];

  for behavior in behaviors {
    let store = FakeStore::succeeding("id-1");
    let gateway = FakeGateway::granted();
    let locator = FakeLocator { behavior };
    let alerts = RecordingAlerts::default();

    let outcome =
      workflow::submit_record(&store, &gateway, &locator, &alerts, "users")
        .await;

    assert_eq!(store.write_count(), 1);

    // Only the successful fix carries real coordinates; both failure modes
    // fall back to the sentinel.
    let expected_fix = match behavior {
      LocatorBehavior::Fix(fix) => fix,
      _ => PositionFix::default(),
    };
    match outcome {
      OutcomeMessage::Success { fix, .. } => assert_eq!(fix, expected_fix),
      other => panic!("expected success outcome, got {other:?}"),
    }
  }
}

#[tokio::test]
async fn created_at_is_taken_at_submission() {
  let store = FakeStore::succeeding("id-1");
  let gateway = FakeGateway::granted();
  let locator = FakeLocator {
    behavior: LocatorBehavior::FixFails,
  };
  let alerts = RecordingAlerts::default();

  let before = chrono::Utc::now();
  workflow::submit_record(&store, &gateway, &locator, &alerts, "users").await;
  let after = chrono::Utc::now();

  let writes = store.writes.lock().unwrap();
  let created_at = writes[0].1["createdAt"].as_str().unwrap();
  let created_at = chrono::DateTime::parse_from_rfc3339(created_at)
    .unwrap()
    .with_timezone(&chrono::Utc);
  assert!(created_at >= before && created_at <= after);
}

#[tokio::test]
async fn scheduling_failure_is_logged_but_not_surfaced() {
  let store = FakeStore::succeeding("id-1");
  let mut gateway = FakeGateway::granted();
  gateway.schedule_fails = true;
  let locator = FakeLocator {
    behavior: LocatorBehavior::FixFails,
  };
  let alerts = RecordingAlerts::default();

  let outcome =
    workflow::submit_record(&store, &gateway, &locator, &alerts, "users").await;

  // The outcome and the alert are unaffected by the reporter failing.
  assert!(outcome.is_success());
  assert_eq!(alerts.entries.lock().unwrap().len(), 1);
  assert!(gateway.scheduled.lock().unwrap().is_empty());
}

#[test]
fn position_fix_always_renders_five_decimals() {
  let cases = [
    (PositionFix::new(-6.2, 106.8167), "Lat: -6.20000, Lon: 106.81670"),
    (PositionFix::default(), "Lat: 0.00000, Lon: 0.00000"),
    (
      PositionFix::new(89.123456789, -179.999999),
      "Lat: 89.12346, Lon: -180.00000",
    ),
  ];
  for (fix, expected) in cases {
    assert_eq!(fix.format_fixed(), expected);
  }
}

// ─── Session ─────────────────────────────────────────────────────────────────

#[tokio::test]
async fn session_start_acquires_identity_and_attaches_listeners() {
  let platform = FakePlatform::physical(PlatformFamily::Ios);
  let gateway = FakeGateway::granted();
  let alerts = RecordingAlerts::default();

  let mut session =
    Session::start(&platform, &gateway, &build_config(), &alerts).await;

  assert_eq!(
    session.push_identity.as_ref().map(PushIdentity::as_str),
    Some("token-for-proj-1")
  );
  assert!(alerts.entries.lock().unwrap().is_empty());

  session.shutdown();
  assert_eq!(gateway.removal_count(), 2);

  // Shutdown is idempotent.
  session.shutdown();
  assert_eq!(gateway.removal_count(), 2);
}

#[tokio::test]
async fn session_start_alerts_once_and_leaves_identity_empty_on_failure() {
  let platform = FakePlatform {
    family:   PlatformFamily::Ios,
    physical: false,
  };
  let gateway = FakeGateway::granted();
  let alerts = RecordingAlerts::default();

  let session =
    Session::start(&platform, &gateway, &build_config(), &alerts).await;

  assert!(session.push_identity.is_none());
  let entries = alerts.entries.lock().unwrap();
  assert_eq!(
    *entries,
    vec![(
      "Push Error".to_owned(),
      "push registration requires a physical device".to_owned()
    )]
  );
}

#[tokio::test]
async fn scheduled_notification_is_observed_through_event_channel() {
  let platform = FakePlatform::physical(PlatformFamily::Ios);
  let gateway = FakeGateway::granted();
  let alerts = RecordingAlerts::default();

  let mut session =
    Session::start(&platform, &gateway, &build_config(), &alerts).await;

  let content = NotificationContent::new("Firestore Success", "ok");
  gateway.schedule(content.clone(), None).await.unwrap();

  let event = session.events.try_recv().unwrap();
  assert_eq!(event, NotificationEvent::Received(content));
}
