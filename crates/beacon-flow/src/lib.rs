//! Orchestration flows for beacon.
//!
//! Two independent flows compose the capability traits from [`beacon_core`]:
//! the startup flow ([`session::Session::start`] — push-identity acquisition
//! plus listener registration) and the per-invocation record-submission
//! workflow ([`workflow::submit_record`]). Capabilities arrive as explicit
//! parameters, never as process-wide singletons, so tests substitute fakes.

pub mod acquire;
pub mod listeners;
pub mod report;
pub mod session;
pub mod workflow;

#[cfg(test)]
mod tests;
