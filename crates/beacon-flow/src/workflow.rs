//! The record-submission workflow.
//!
//! Two independently-failing stages, each with its own containment boundary:
//! a best-effort location fix (never fatal), then a remote create-document
//! call whose result decides which outcome variant is reported. Every
//! invocation terminates in exactly one user-visible report; nothing is
//! propagated to the caller as an error.

use beacon_core::{
  LocationError,
  location::{Locator, PositionFix},
  outcome::{AlertSink, OutcomeMessage},
  push::PushGateway,
  record::UserRecord,
  store::DocumentStore,
};
use chrono::Utc;
use tracing::{error, info, warn};

use crate::report::report_immediately;

/// Run one submission: location (Stage A), remote write and report
/// (Stage B).
///
/// The in-app alert is delivered before this function returns; the local
/// notification carries the byte-identical body and may finish presenting
/// after. A second invocation before the first resolves is not guarded
/// against and may interleave remote writes.
pub async fn submit_record<S, G, L, A>(
  store: &S,
  gateway: &G,
  locator: &L,
  alerts: &A,
  collection: &str,
) -> OutcomeMessage
where
  S: DocumentStore,
  G: PushGateway,
  L: Locator,
  A: AlertSink,
{
  // Stage A — best-effort location. Completes (or is contained) before
  // Stage B starts.
  let fix = best_effort_fix(locator).await;

  // Stage B — remote write. The timestamp is taken here, at submission,
  // never cached.
  let record = UserRecord::submitted_at(Utc::now());
  let outcome = match store
    .create_document(collection, record.to_fields())
    .await
  {
    Ok(document_id) => OutcomeMessage::Success { document_id, fix },
    Err(e) => OutcomeMessage::Failure {
      detail: e.to_string(),
      fix,
    },
  };

  // Rendered once; the alert and the notification reuse the same string.
  let title = outcome.title();
  let body = outcome.body();
  if outcome.is_success() {
    info!(%body, "record submitted");
  } else {
    error!(%body, "record submission failed");
  }

  alerts.alert(title, &body);

  if let Err(e) = report_immediately(gateway, title, &body).await {
    warn!(error = %e, "failed to schedule outcome notification");
  }

  outcome
}

/// Stage A. Permission denial, a fix timeout, or an unavailable fix are all
/// logged and replaced with the sentinel — location enriches the outcome
/// message but is not required for the remote write.
async fn best_effort_fix<L: Locator>(locator: &L) -> PositionFix {
  match try_fix(locator).await {
    Ok(fix) => fix,
    Err(e) => {
      warn!(error = %e, "location unavailable, continuing with sentinel fix");
      PositionFix::default()
    }
  }
}

async fn try_fix<L: Locator>(
  locator: &L,
) -> Result<PositionFix, LocationError<L::Error>> {
  let status = locator
    .request_foreground_permission()
    .await
    .map_err(LocationError::Provider)?;

  if !status.is_granted() {
    return Err(LocationError::PermissionDenied);
  }

  locator.current_position().await.map_err(LocationError::Provider)
}
