//! The fixed-shape record submitted to the remote store.

use chrono::{DateTime, Utc};
use serde_json::{Value, json};

/// The structured payload written by the submission workflow.
///
/// The field set is a contract with the remote collection's schema, not user
/// input — there is no user-supplied variation in this version.
#[derive(Debug, Clone, PartialEq)]
pub struct UserRecord {
  pub first:      String,
  pub last:       String,
  pub born:       i64,
  pub created_at: DateTime<Utc>,
}

impl UserRecord {
  /// Build the hardcoded profile with `created_at` set to the moment of
  /// submission. Callers must pass a freshly-taken timestamp, never a
  /// cached one.
  pub fn submitted_at(created_at: DateTime<Utc>) -> Self {
    Self {
      first: "Raditya".into(),
      last: "HerKristito".into(),
      born: 2002,
      created_at,
    }
  }

  /// The field mapping handed to the remote store. Key names follow the
  /// remote schema; the timestamp is RFC 3339.
  pub fn to_fields(&self) -> Value {
    json!({
      "first":     self.first,
      "last":      self.last,
      "born":      self.born,
      "createdAt": self.created_at.to_rfc3339(),
    })
  }
}
