//! Terminal rendering of in-app alerts.

use beacon_core::outcome::AlertSink;

pub struct TerminalAlerts;

impl AlertSink for TerminalAlerts {
  fn alert(&self, title: &str, body: &str) {
    println!();
    println!("*** {title} ***");
    for line in body.lines() {
      println!("{line}");
    }
  }
}
