//! Camera Event Ingest
//!
//! HTTP service that accepts camera events, flags alert types, and appends each
//! event to the SQLite `events` table. Bind to 127.0.0.1 by default.

pub mod classify;
pub mod config;
mod error;
mod handlers;
pub mod logging;
mod state;
pub mod store;
pub mod types;

use axum::{
  http::HeaderValue,
  routing::{get, post},
  Router,
};
use std::sync::Arc;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tower_http::trace::TraceLayer;

pub use config::Config;
pub use error::ApiError;
pub use handlers::{create_event, health};
pub use state::AppState;
pub use store::{EventStore, StoreError};
pub use types::{EventIn, EventOut, EventType};

/// Full HTTP surface; `allowed_origin` is the only origin granted CORS access.
pub fn router(state: Arc<AppState>, allowed_origin: HeaderValue) -> Router {
  let cors = CorsLayer::new()
    .allow_origin(AllowOrigin::list([allowed_origin]))
    .allow_methods(Any)
    .allow_headers(Any);

  Router::new()
    .route("/health", get(health))
    .route("/event", post(create_event))
    .layer(cors)
    .layer(TraceLayer::new_for_http())
    .with_state(state)
}
