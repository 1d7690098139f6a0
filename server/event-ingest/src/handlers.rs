//! HTTP handlers for the event ingest service.

use axum::{extract::rejection::JsonRejection, extract::State, Json};
use std::sync::Arc;
use tracing::info;

use crate::classify;
use crate::error::ApiError;
use crate::state::AppState;
use crate::types::{EventIn, EventOut, NewEvent};

pub async fn health() -> &'static str {
  "ok"
}

/// `POST /event`: classify, append one row, echo the stored fields.
pub async fn create_event(
  State(state): State<Arc<AppState>>,
  payload: Result<Json<EventIn>, JsonRejection>,
) -> Result<Json<EventOut>, ApiError> {
  let Json(body) = payload?;

  let event = NewEvent {
    alert: classify::is_alert(body.event_type),
    camera_id: body.camera_id,
    event_type: body.event_type,
    timestamp: body.timestamp,
  };

  let stored = state.store.record(&event).await?;

  info!(
    event_type = stored.event_type.as_wire(),
    camera_id = %stored.camera_id,
    tag = classify::alert_tag(stored.alert),
    "event saved"
  );

  Ok(Json(stored.into()))
}
