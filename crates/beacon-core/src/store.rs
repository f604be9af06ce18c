//! The `DocumentStore` trait — the remote document store boundary.
//!
//! The trait is implemented by storage backends (e.g.
//! `beacon-store-firestore`). The orchestration layer (`beacon-flow`) depends
//! on this abstraction, not on any concrete backend.

use std::future::Future;

use serde::{Deserialize, Serialize};
use serde_json::Value;

// ─── DocumentId ──────────────────────────────────────────────────────────────

/// Identifier generated by the remote store for a created document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentId(String);

impl DocumentId {
  pub fn new(id: impl Into<String>) -> Self { Self(id.into()) }

  pub fn as_str(&self) -> &str { &self.0 }
}

impl std::fmt::Display for DocumentId {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    f.write_str(&self.0)
  }
}

// ─── Trait ───────────────────────────────────────────────────────────────────

/// Abstraction over a remote document store. One operation is consumed:
/// create-document, which inserts a new structured record and returns the
/// store-generated identifier.
///
/// All methods return `Send` futures so the trait can be used in
/// multi-threaded async runtimes.
pub trait DocumentStore: Send + Sync {
  type Error: std::error::Error + Send + Sync + 'static;

  /// Insert `fields` as a new document in `collection`. Errors carry a
  /// human-readable message suitable for direct display.
  fn create_document<'a>(
    &'a self,
    collection: &'a str,
    fields: Value,
  ) -> impl Future<Output = Result<DocumentId, Self::Error>> + Send + 'a;
}
