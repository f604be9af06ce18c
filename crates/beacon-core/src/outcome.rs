//! User-facing outcome of one submission, and the alert surface it lands on.

use crate::{location::PositionFix, store::DocumentId};

// ─── OutcomeMessage ──────────────────────────────────────────────────────────

/// The exhaustive, mutually-exclusive outcome of one workflow invocation.
///
/// The rendered body is the single source of truth for the user-visible
/// message: the in-app alert and the local notification must carry it
/// byte-identically, so callers render it once and reuse the string.
#[derive(Debug, Clone, PartialEq)]
pub enum OutcomeMessage {
  Success {
    document_id: DocumentId,
    fix:         PositionFix,
  },
  Failure {
    /// The remote store's human-readable error message.
    detail: String,
    fix:    PositionFix,
  },
}

impl OutcomeMessage {
  pub fn is_success(&self) -> bool { matches!(self, Self::Success { .. }) }

  /// Notification/alert title for this outcome variant.
  pub fn title(&self) -> &'static str {
    match self {
      Self::Success { .. } => "Firestore Success",
      Self::Failure { .. } => "Firestore Error",
    }
  }

  /// Render the message body. Coordinates always carry exactly 5 digits
  /// after the decimal point, real fix or sentinel alike.
  pub fn body(&self) -> String {
    match self {
      Self::Success { document_id, fix } => {
        format!("Success! ID: {}\n{}", document_id, fix.format_fixed())
      }
      Self::Failure { detail, fix } => {
        format!("Error: {}\n{}", detail, fix.format_fixed())
      }
    }
  }
}

// ─── Alert surface ───────────────────────────────────────────────────────────

/// The in-app alert. Presentation is the implementor's concern; the
/// orchestration layer only guarantees the alert is delivered before the
/// triggering call returns.
pub trait AlertSink: Send + Sync {
  fn alert(&self, title: &str, body: &str);
}
