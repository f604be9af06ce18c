//! `beacon` — terminal harness for the push/location/remote-record flows.
//!
//! Starts a session (listener registration plus push-identity acquisition),
//! prints the acquired identity, then waits for the "button": an empty line
//! or `a` runs the record-submission workflow, `q` quits.
//!
//! # Usage
//!
//! ```
//! beacon --config config.toml
//! beacon --lat -6.2 --lon 106.8167 --collection users
//! beacon --simulator     # exercise the acquisition failure path
//! ```

mod alerts;
mod gateway;
mod locator;
mod platform;
mod settings;

use std::path::PathBuf;

use anyhow::Context as _;
use beacon_flow::{session::Session, workflow};
use beacon_store_firestore::FirestoreStore;
use clap::Parser;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::{debug, level_filters::LevelFilter, warn};
use tracing_subscriber::EnvFilter;

use alerts::TerminalAlerts;
use gateway::ConsoleGateway;
use locator::ConsoleLocator;
use platform::HostPlatform;
use settings::AppConfig;

// ─── CLI args ─────────────────────────────────────────────────────────────────

#[derive(Parser)]
#[command(
  author,
  version,
  about = "Console harness for the beacon submission flows"
)]
struct Cli {
  /// Path to the TOML configuration file.
  #[arg(short, long, default_value = "config.toml")]
  config: PathBuf,

  /// Remote collection receiving submitted records.
  #[arg(long)]
  collection: Option<String>,

  /// Latitude served as the position fix (requires --lon).
  #[arg(long, requires = "lon")]
  lat: Option<f64>,

  /// Longitude served as the position fix (requires --lat).
  #[arg(long, requires = "lat")]
  lon: Option<f64>,

  /// Report a non-physical execution context.
  #[arg(long)]
  simulator: bool,
}

// ─── Entry point ──────────────────────────────────────────────────────────────

#[tokio::main]
async fn main() -> anyhow::Result<()> {
  // Initialise tracing.
  tracing_subscriber::fmt()
    .with_env_filter(
      EnvFilter::builder()
        .with_default_directive(LevelFilter::INFO.into())
        .from_env_lossy(),
    )
    .init();

  let cli = Cli::parse();

  // Load configuration: file, then environment, then CLI flags.
  let sources = config::Config::builder()
    .add_source(config::File::from(cli.config.clone()).required(false))
    .add_source(config::Environment::with_prefix("BEACON").separator("__"))
    .build()
    .context("failed to read configuration")?;
  let mut app: AppConfig = sources
    .try_deserialize()
    .context("failed to deserialise configuration")?;

  if let Some(collection) = cli.collection {
    app.collection = collection;
  }
  if let (Some(lat), Some(lon)) = (cli.lat, cli.lon) {
    app.location.latitude = Some(lat);
    app.location.longitude = Some(lon);
  }
  if cli.simulator {
    app.device.physical = false;
  }

  if app.firestore.project_id.is_empty() {
    warn!("firestore.project_id is not configured; remote writes will fail");
  }

  // Wire the capabilities.
  let store =
    FirestoreStore::new(app.firestore.clone()).context("building Firestore client")?;
  let gateway = ConsoleGateway::new(app.push.permission);
  let locator = ConsoleLocator::new(app.location.allow, app.location.fix());
  let platform = HostPlatform::new(app.device.family, app.device.physical);
  let alerts = TerminalAlerts;
  let build = app.push.build_config();

  // Startup flow: listeners + push identity.
  let mut session = Session::start(&platform, &gateway, &build, &alerts).await;

  println!("Your push token:");
  println!(
    "  {}",
    session
      .push_identity
      .as_ref()
      .map(|token| token.as_str())
      .unwrap_or("")
  );
  println!();
  println!("[enter/a] Add User & Notify    [q] quit");

  // Coordinator loop: the one consumer of the notification event channel.
  let mut lines = BufReader::new(tokio::io::stdin()).lines();
  loop {
    tokio::select! {
      line = lines.next_line() => {
        let Some(line) = line.context("reading stdin")? else { break };
        match line.trim() {
          "" | "a" | "add" => {
            workflow::submit_record(
              &store,
              &gateway,
              &locator,
              &alerts,
              &app.collection,
            )
            .await;
          }
          "q" | "quit" => break,
          other => println!("unrecognised command {other:?}"),
        }
      }
      Some(event) = session.events.recv() => {
        // Passive observers: nothing to process, just record the sighting.
        debug!(?event, "notification event observed");
      }
    }
  }

  session.shutdown();
  Ok(())
}
