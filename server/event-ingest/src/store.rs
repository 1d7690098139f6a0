//! Append-only SQLite store for camera events.

use std::str::FromStr;

use sqlx_core::row::Row;
use sqlx_sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions, SqliteRow};
use thiserror::Error;
use tracing::debug;

use crate::types::{EventType, NewEvent, StoredEvent};

const CREATE_EVENTS: &str = r#"
  CREATE TABLE IF NOT EXISTS events (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    camera_id TEXT NOT NULL,
    event_type TEXT NOT NULL,
    timestamp INTEGER NOT NULL,
    alert BOOLEAN NOT NULL,
    created_at DATETIME DEFAULT CURRENT_TIMESTAMP
  )
"#;

const EVENT_COLUMNS: &str = "id, camera_id, event_type, timestamp, alert, created_at";

#[derive(Debug, Error)]
pub enum StoreError {
  #[error("db: {0}")]
  Db(#[from] sqlx_core::Error),

  #[error("corrupt row {id}: unknown event_type {value:?}")]
  UnknownEventType { id: i64, value: String },
}

/// Handle to the `events` table. Cheap to clone; connections come from the pool
/// one statement at a time and go back on every exit path.
#[derive(Clone)]
pub struct EventStore {
  pool: SqlitePool,
}

impl EventStore {
  /// Open (creating the file if needed) the database at `database_url`.
  pub async fn connect(database_url: &str, max_connections: u32) -> Result<Self, StoreError> {
    let options = SqliteConnectOptions::from_str(database_url)?.create_if_missing(true);
    let pool = SqlitePoolOptions::new()
      .max_connections(max_connections)
      .connect_with(options)
      .await?;
    Ok(Self { pool })
  }

  /// Private in-memory database on a single pinned connection.
  pub async fn in_memory() -> Result<Self, StoreError> {
    let options = SqliteConnectOptions::from_str("sqlite::memory:")?;
    let pool = SqlitePoolOptions::new()
      .max_connections(1)
      .min_connections(1)
      .idle_timeout(None)
      .max_lifetime(None)
      .connect_with(options)
      .await?;
    Ok(Self { pool })
  }

  /// Create the `events` table if absent. Safe to call repeatedly.
  pub async fn init_schema(&self) -> Result<(), StoreError> {
    sqlx_core::query::query(CREATE_EVENTS)
      .execute(&self.pool)
      .await?;
    Ok(())
  }

  /// Append one event. Single statement, auto-committed.
  ///
  /// Only the store-assigned `id` and `created_at` are read back; every other
  /// field comes from `event`, so nothing after the commit can fail on them.
  pub async fn record(&self, event: &NewEvent) -> Result<StoredEvent, StoreError> {
    let row = sqlx_core::query::query(
      "INSERT INTO events (camera_id, event_type, timestamp, alert) VALUES (?, ?, ?, ?) RETURNING id, created_at",
    )
    .bind(event.camera_id.as_str())
    .bind(event.event_type.as_wire())
    .bind(event.timestamp)
    .bind(event.alert)
    .fetch_one(&self.pool)
    .await?;

    let stored = StoredEvent {
      id: row.try_get("id")?,
      camera_id: event.camera_id.clone(),
      event_type: event.event_type,
      timestamp: event.timestamp,
      alert: event.alert,
      created_at: row.try_get("created_at")?,
    };
    debug!(id = stored.id, camera_id = %stored.camera_id, "event row inserted");
    Ok(stored)
  }

  pub async fn count(&self) -> Result<i64, StoreError> {
    let n: i64 = sqlx_core::query_scalar::query_scalar("SELECT COUNT(*) FROM events")
      .fetch_one(&self.pool)
      .await?;
    Ok(n)
  }

  pub async fn get(&self, id: i64) -> Result<Option<StoredEvent>, StoreError> {
    let sql = format!("SELECT {} FROM events WHERE id = ?", EVENT_COLUMNS);
    let row = sqlx_core::query::query(&sql)
      .bind(id)
      .fetch_optional(&self.pool)
      .await?;
    row.as_ref().map(decode_row).transpose()
  }

  /// Most recently inserted row, if any.
  pub async fn latest(&self) -> Result<Option<StoredEvent>, StoreError> {
    let sql = format!("SELECT {} FROM events ORDER BY id DESC LIMIT 1", EVENT_COLUMNS);
    let row = sqlx_core::query::query(&sql)
      .fetch_optional(&self.pool)
      .await?;
    row.as_ref().map(decode_row).transpose()
  }

  /// Wait for checked-out connections to return, then close the pool.
  pub async fn close(&self) {
    self.pool.close().await;
  }
}

fn decode_row(row: &SqliteRow) -> Result<StoredEvent, StoreError> {
  let id: i64 = row.try_get("id")?;
  let raw_type: String = row.try_get("event_type")?;
  let event_type = EventType::from_wire(&raw_type)
    .ok_or(StoreError::UnknownEventType { id, value: raw_type })?;

  Ok(StoredEvent {
    id,
    camera_id: row.try_get("camera_id")?,
    event_type,
    timestamp: row.try_get("timestamp")?,
    alert: row.try_get("alert")?,
    created_at: row.try_get("created_at")?,
  })
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::classify;

  async fn fresh_store() -> EventStore {
    let store = EventStore::in_memory().await.unwrap();
    store.init_schema().await.unwrap();
    store
  }

  fn new_event(camera_id: &str, event_type: EventType, timestamp: i64) -> NewEvent {
    NewEvent {
      camera_id: camera_id.into(),
      event_type,
      timestamp,
      alert: classify::is_alert(event_type),
    }
  }

  #[tokio::test]
  async fn init_schema_is_idempotent() {
    let store = fresh_store().await;
    store.init_schema().await.unwrap();
    assert_eq!(store.count().await.unwrap(), 0);
  }

  #[tokio::test]
  async fn record_appends_one_row() {
    let store = fresh_store().await;
    let stored = store
      .record(&new_event("cam-1", EventType::Fall, 1000))
      .await
      .unwrap();

    assert_eq!(store.count().await.unwrap(), 1);
    assert_eq!(stored.camera_id, "cam-1");
    assert_eq!(stored.event_type, EventType::Fall);
    assert_eq!(stored.timestamp, 1000);
    assert!(stored.alert);
  }

  #[tokio::test]
  async fn ids_increase_and_rows_are_untouched() {
    let store = fresh_store().await;
    let first = store
      .record(&new_event("cam-1", EventType::Fall, 1))
      .await
      .unwrap();
    let before = store.get(first.id).await.unwrap().unwrap();

    let second = store
      .record(&new_event("cam-1", EventType::Movement, 2))
      .await
      .unwrap();

    assert!(second.id > first.id);
    assert_eq!(store.count().await.unwrap(), 2);

    let after = store.get(first.id).await.unwrap().unwrap();
    assert_eq!(after.id, before.id);
    assert_eq!(after.camera_id, before.camera_id);
    assert_eq!(after.event_type, EventType::Fall);
    assert_eq!(after.timestamp, before.timestamp);
    assert!(after.alert);
    assert_eq!(after.created_at, before.created_at);

    let latest = store.latest().await.unwrap().unwrap();
    assert_eq!(latest.id, second.id);
    assert!(!latest.alert);
  }

  #[tokio::test]
  async fn recorded_event_matches_stored_row() {
    let store = fresh_store().await;
    let returned = store
      .record(&new_event("cam-7", EventType::ProlongedInactivity, 42))
      .await
      .unwrap();

    let row = store.get(returned.id).await.unwrap().unwrap();
    assert_eq!(row.camera_id, returned.camera_id);
    assert_eq!(row.event_type, returned.event_type);
    assert_eq!(row.timestamp, returned.timestamp);
    assert_eq!(row.alert, returned.alert);
    assert_eq!(row.created_at, returned.created_at);
    assert!(store.get(returned.id + 1).await.unwrap().is_none());
  }

  #[tokio::test]
  async fn accented_wire_value_round_trips_through_table() {
    let store = fresh_store().await;
    store
      .record(&new_event("gate", EventType::PerimeterBreach, i64::MAX))
      .await
      .unwrap();

    let latest = store.latest().await.unwrap().unwrap();
    assert_eq!(latest.event_type, EventType::PerimeterBreach);
    assert_eq!(latest.timestamp, i64::MAX);
  }

  #[tokio::test]
  async fn latest_on_empty_table_is_none() {
    let store = fresh_store().await;
    assert!(store.latest().await.unwrap().is_none());
  }

  #[tokio::test]
  async fn record_fails_after_close() {
    let store = fresh_store().await;
    store.close().await;
    let err = store
      .record(&new_event("cam-1", EventType::Fall, 1))
      .await
      .unwrap_err();
    assert!(matches!(err, StoreError::Db(_)));
  }
}
