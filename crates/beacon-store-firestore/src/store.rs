//! [`FirestoreStore`] — the Firestore REST implementation of
//! [`DocumentStore`].

use std::time::Duration;

use beacon_core::store::{DocumentId, DocumentStore};
use reqwest::Client;
use serde::Deserialize;
use serde_json::Value;
use tracing::debug;

use crate::{
  Error, Result,
  encode::{document_id_from_name, encode_document},
};

// ─── Configuration ───────────────────────────────────────────────────────────

/// Connection settings for one Firestore project.
#[derive(Debug, Clone, Deserialize)]
pub struct FirestoreConfig {
  #[serde(default)]
  pub project_id: String,

  /// Database within the project.
  #[serde(default = "default_database")]
  pub database: String,

  #[serde(default = "default_base_url")]
  pub base_url: String,

  /// Web API key, appended as the `key` query parameter when set.
  #[serde(default)]
  pub api_key: Option<String>,
}

fn default_database() -> String { "(default)".to_owned() }

fn default_base_url() -> String {
  "https://firestore.googleapis.com".to_owned()
}

impl Default for FirestoreConfig {
  fn default() -> Self {
    Self {
      project_id: String::new(),
      database:   default_database(),
      base_url:   default_base_url(),
      api_key:    None,
    }
  }
}

// ─── Store ───────────────────────────────────────────────────────────────────

/// A document store backed by the Firestore REST v1 API.
///
/// Cheap to clone — the inner [`reqwest::Client`] is `Arc`-based.
#[derive(Clone)]
pub struct FirestoreStore {
  client: Client,
  config: FirestoreConfig,
}

/// The slice of a created document resource we read back.
#[derive(Debug, Deserialize)]
struct CreatedDocument {
  name: String,
}

#[derive(Debug, Deserialize)]
struct ApiErrorBody {
  error: ApiErrorDetail,
}

#[derive(Debug, Deserialize)]
struct ApiErrorDetail {
  message: String,
}

impl FirestoreStore {
  pub fn new(config: FirestoreConfig) -> Result<Self> {
    let client = Client::builder()
      .timeout(Duration::from_secs(30))
      .build()?;
    Ok(Self { client, config })
  }

  pub(crate) fn collection_url(&self, collection: &str) -> String {
    format!(
      "{}/v1/projects/{}/databases/{}/documents/{}",
      self.config.base_url.trim_end_matches('/'),
      self.config.project_id,
      self.config.database,
      collection
    )
  }
}

impl DocumentStore for FirestoreStore {
  type Error = Error;

  async fn create_document(
    &self,
    collection: &str,
    fields: Value,
  ) -> Result<DocumentId> {
    let body = encode_document(&fields)?;

    let mut request = self
      .client
      .post(self.collection_url(collection))
      .json(&body);
    if let Some(key) = &self.config.api_key {
      request = request.query(&[("key", key)]);
    }

    let response = request.send().await?;
    let status = response.status();

    if !status.is_success() {
      // Prefer the server's own message; fall back to the status line.
      let message = response
        .json::<ApiErrorBody>()
        .await
        .map(|b| b.error.message)
        .unwrap_or_else(|_| status.to_string());
      return Err(Error::Api {
        status: status.as_u16(),
        message,
      });
    }

    let created: CreatedDocument = response.json().await?;
    let id = document_id_from_name(&created.name)?;
    debug!(collection, id = %id, "document created");
    Ok(id)
  }
}
