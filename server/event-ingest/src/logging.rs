//! Tracing setup: stdout plus an append-only `app.log` file.

use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

pub const LOG_FILE: &str = "app.log";

/// Install the global subscriber. Level comes from `RUST_LOG`, default `info`.
///
/// Keep the returned guard alive for the life of the process; dropping it
/// flushes and stops the file writer.
pub fn init_logging(log_dir: &str) -> WorkerGuard {
  let file_appender = tracing_appender::rolling::never(log_dir, LOG_FILE);
  let (file_writer, guard) = tracing_appender::non_blocking(file_appender);

  let filter = EnvFilter::try_from_default_env()
    .unwrap_or_else(|_| EnvFilter::new("info,tower_http=info"));

  let result = tracing_subscriber::registry()
    .with(filter)
    .with(fmt::layer())
    .with(fmt::layer().with_ansi(false).with_writer(file_writer))
    .try_init();

  if let Err(e) = result {
    eprintln!("event-ingest: tracing already initialized: {}", e);
  }

  guard
}
