//! Hyperliquid Bridge - Entry Point
//!
//! One process, one command, one line of JSON on stdout.
//!
//! Wiring sequence:
//! 1. Parse the command line (clap)
//! 2. Load the optional TOML config + validate
//! 3. Init tracing (JSON structured logging on stderr)
//! 4. Dispatch through the HTTP client factory
//! 5. Print the envelope
//!
//! Every failure after step 1 is reported as `{"error": ...}`. The exit
//! status is success whenever a JSON line was printed.

use clap::Parser;
use clap::error::ErrorKind;
use tracing::info;
use tracing_subscriber::EnvFilter;

use hyperliquid_bridge::adapters::api::HttpClientFactory;
use hyperliquid_bridge::cli::{Cli, parse_error_envelope};
use hyperliquid_bridge::config::loader::load_config;
use hyperliquid_bridge::error::BridgeError;
use hyperliquid_bridge::usecases::{Dispatcher, Envelope};

#[tokio::main(flavor = "current_thread")]
async fn main() {
  let envelope = run().await;
  println!("{}", envelope.to_line());
}

async fn run() -> Envelope {
  // ── 1. Command line ─────────────────────────────────────
  let cli = match Cli::try_parse() {
    Ok(cli) => cli,
    Err(e) => match e.kind() {
      ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => e.exit(),
      _ => return parse_error_envelope(&e),
    },
  };

  // ── 2. Configuration ────────────────────────────────────
  let config = match load_config(cli.config.as_deref()) {
    Ok(config) => config,
    Err(e) => return Envelope::from_error(&BridgeError::Config(format!("{e:#}"))),
  };

  // ── 3. Logging ──────────────────────────────────────────
  tracing_subscriber::fmt()
    .with_env_filter(log_filter(cli.verbose, &config.log.level))
    .with_writer(std::io::stderr)
    .json()
    .init();

  let Some(command) = cli.command else {
    return Envelope::unknown_command();
  };

  // ── 4. Dispatch ─────────────────────────────────────────
  let invocation = command.into_invocation();
  info!(
    version = env!("CARGO_PKG_VERSION"),
    command = %invocation.command,
    "Starting invocation"
  );

  Dispatcher::new(HttpClientFactory::new(config.api))
    .dispatch(&invocation)
    .await
}

/// `RUST_LOG` wins, then `-v` count, then the configured level.
fn log_filter(verbose: u8, configured: &str) -> EnvFilter {
  EnvFilter::try_from_default_env().unwrap_or_else(|_| {
    let level = match verbose {
      0 => configured,
      1 => "info",
      2 => "debug",
      _ => "trace",
    };
    EnvFilter::new(level)
  })
}
