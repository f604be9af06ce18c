//! Firestore REST backend for the beacon document store.
//!
//! Implements [`beacon_core::store::DocumentStore`] over the Firestore v1
//! `createDocument` endpoint. Only document creation is consumed by the
//! orchestration layer, so nothing else of the API surface is wrapped.

mod encode;
mod store;

pub mod error;

pub use error::{Error, Result};
pub use store::{FirestoreConfig, FirestoreStore};
