//! Console stand-in for the platform push/notification subsystem.
//!
//! Scheduled notifications are printed to the terminal and replayed to the
//! registered received-listeners, so the whole observer path is exercised
//! end to end without a device.

use std::{
  collections::HashMap,
  io::{self, Write as _},
  sync::{Arc, Mutex, MutexGuard, PoisonError, Weak},
  time::Duration,
};

use beacon_core::push::{
  ChannelImportance, NotificationContent, NotificationEvent, PermissionStatus,
  PushGateway, PushIdentity, Subscription,
};
use serde::Deserialize;
use tokio::sync::mpsc::UnboundedSender;
use tracing::debug;
use uuid::Uuid;

// ─── Permission policy ───────────────────────────────────────────────────────

/// How the harness answers an interactive permission request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PermissionPolicy {
  /// Treat the permission as previously granted.
  Granted,
  /// Deny any interactive request.
  Denied,
  /// Ask on stdin (y/N).
  #[default]
  Prompt,
}

// ─── Gateway ─────────────────────────────────────────────────────────────────

type Listeners = Mutex<HashMap<Uuid, UnboundedSender<NotificationEvent>>>;

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
  mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

pub struct ConsoleGateway {
  policy:    PermissionPolicy,
  status:    Mutex<PermissionStatus>,
  channels:  Mutex<Vec<String>>,
  received:  Arc<Listeners>,
  responses: Arc<Listeners>,
}

impl ConsoleGateway {
  pub fn new(policy: PermissionPolicy) -> Self {
    let initial = match policy {
      PermissionPolicy::Granted => PermissionStatus::Granted,
      _ => PermissionStatus::Undetermined,
    };
    Self {
      policy,
      status: Mutex::new(initial),
      channels: Mutex::new(Vec::new()),
      received: Arc::new(Mutex::new(HashMap::new())),
      responses: Arc::new(Mutex::new(HashMap::new())),
    }
  }
}

/// Print the notification and replay it to the received-listeners.
fn present(listeners: &Listeners, content: &NotificationContent) {
  println!();
  println!("[notification] {}", content.title);
  for line in content.body.lines() {
    println!("  {line}");
  }
  for tx in lock(listeners).values() {
    let _ = tx.send(NotificationEvent::Received(content.clone()));
  }
}

async fn prompt_yes_no(question: &str) -> io::Result<bool> {
  let question = format!("{question} [y/N]: ");
  tokio::task::spawn_blocking(move || {
    let mut stdout = io::stdout();
    stdout.write_all(question.as_bytes())?;
    stdout.flush()?;
    let mut answer = String::new();
    io::stdin().read_line(&mut answer)?;
    Ok(answer.trim().eq_ignore_ascii_case("y"))
  })
  .await
  .map_err(io::Error::other)?
}

impl PushGateway for ConsoleGateway {
  type Error = io::Error;
  type Handle = ConsoleSubscription;

  async fn configure_channel(
    &self,
    name: &str,
    importance: ChannelImportance,
  ) -> io::Result<()> {
    let mut channels = lock(&self.channels);
    if !channels.iter().any(|c| c == name) {
      channels.push(name.to_owned());
    }
    debug!(channel = name, ?importance, "notification channel ensured");
    Ok(())
  }

  async fn permission_status(&self) -> io::Result<PermissionStatus> {
    Ok(*lock(&self.status))
  }

  async fn request_permission(&self) -> io::Result<PermissionStatus> {
    let granted = match self.policy {
      PermissionPolicy::Granted => true,
      PermissionPolicy::Denied => false,
      PermissionPolicy::Prompt => prompt_yes_no("Allow notifications?").await?,
    };
    let status = if granted {
      PermissionStatus::Granted
    } else {
      PermissionStatus::Denied
    };
    *lock(&self.status) = status;
    Ok(status)
  }

  async fn push_identity(&self, project_id: &str) -> io::Result<PushIdentity> {
    debug!(project_id, "issuing push identity");
    Ok(PushIdentity::new(format!(
      "PushToken[{}]",
      Uuid::new_v4().simple()
    )))
  }

  async fn schedule(
    &self,
    content: NotificationContent,
    trigger: Option<Duration>,
  ) -> io::Result<()> {
    match trigger {
      None => {
        present(&self.received, &content);
        Ok(())
      }
      Some(delay) => {
        let listeners = Arc::clone(&self.received);
        tokio::spawn(async move {
          tokio::time::sleep(delay).await;
          present(&listeners, &content);
        });
        Ok(())
      }
    }
  }

  fn add_received_listener(
    &self,
    events: UnboundedSender<NotificationEvent>,
  ) -> ConsoleSubscription {
    subscribe(&self.received, events)
  }

  fn add_response_listener(
    &self,
    events: UnboundedSender<NotificationEvent>,
  ) -> ConsoleSubscription {
    subscribe(&self.responses, events)
  }
}

// ─── Subscriptions ───────────────────────────────────────────────────────────

fn subscribe(
  registry: &Arc<Listeners>,
  events: UnboundedSender<NotificationEvent>,
) -> ConsoleSubscription {
  let id = Uuid::new_v4();
  lock(registry).insert(id, events);
  ConsoleSubscription {
    id,
    listeners: Arc::downgrade(registry),
  }
}

/// An active observer registration; removing it unhooks the sender.
pub struct ConsoleSubscription {
  id:        Uuid,
  listeners: Weak<Listeners>,
}

impl Subscription for ConsoleSubscription {
  fn remove(self) {
    if let Some(listeners) = self.listeners.upgrade() {
      lock(&listeners).remove(&self.id);
    }
  }
}
