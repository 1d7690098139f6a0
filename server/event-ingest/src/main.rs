//! Binary entrypoint for the event ingest service.

use std::sync::Arc;
use tracing::info;

use event_ingest::{logging, AppState, Config, EventStore};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
  dotenvy::dotenv().ok();
  let config = Config::from_env()?;
  let _log_guard = logging::init_logging(&config.log_dir);

  let store = EventStore::connect(&config.database_url, config.db_max_connections).await?;
  store.init_schema().await?;
  info!("db ok");

  let state = Arc::new(AppState {
    store: store.clone(),
  });
  let app = event_ingest::router(state, config.cors_allowed_origin.clone());

  let addr = config.bind_addr();
  let listener = tokio::net::TcpListener::bind(addr).await?;
  info!("event-ingest listening on http://{}", addr);

  axum::serve(listener, app)
    .with_graceful_shutdown(shutdown_signal())
    .await?;

  store.close().await;
  info!("event-ingest stopped");
  Ok(())
}

async fn shutdown_signal() {
  if let Err(e) = tokio::signal::ctrl_c().await {
    tracing::error!("failed to listen for shutdown signal: {}", e);
    std::future::pending::<()>().await;
  }
}
