//! Error type for `beacon-store-firestore`.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  /// Transport-level failure (connect, timeout, TLS, body decode).
  #[error("{0}")]
  Http(#[from] reqwest::Error),

  /// The store rejected the request. `Display` is the server's own
  /// human-readable message, which flows verbatim into the user-facing
  /// outcome.
  #[error("{message}")]
  Api { status: u16, message: String },

  #[error("document fields must be a JSON object")]
  NotAnObject,

  #[error("unsupported field value: {0}")]
  UnsupportedValue(serde_json::Value),

  #[error("malformed store response: {0}")]
  MalformedResponse(String),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
