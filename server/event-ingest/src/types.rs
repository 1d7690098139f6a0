//! Request/response types and the fixed event-type enumeration.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Event type (wire values are fixed; callers depend on the exact strings)
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EventType {
  #[serde(rename = "movimento")]
  Movement,
  #[serde(rename = "parado")]
  Stationary,
  #[serde(rename = "queda")]
  Fall,
  #[serde(rename = "inatividade_prolongada")]
  ProlongedInactivity,
  #[serde(rename = "invasão_perimetro")]
  PerimeterBreach,
}

impl EventType {
  pub const ALL: [EventType; 5] = [
    Self::Movement,
    Self::Stationary,
    Self::Fall,
    Self::ProlongedInactivity,
    Self::PerimeterBreach,
  ];

  /// Exact wire string; must stay in sync with the serde renames above.
  pub fn as_wire(self) -> &'static str {
    match self {
      Self::Movement => "movimento",
      Self::Stationary => "parado",
      Self::Fall => "queda",
      Self::ProlongedInactivity => "inatividade_prolongada",
      Self::PerimeterBreach => "invasão_perimetro",
    }
  }

  /// Case- and accent-sensitive lookup.
  pub fn from_wire(s: &str) -> Option<Self> {
    Self::ALL.into_iter().find(|t| t.as_wire() == s)
  }
}

// ---------------------------------------------------------------------------
// HTTP contract
// ---------------------------------------------------------------------------

/// Body of `POST /event`. Unknown fields are ignored.
#[derive(Debug, Clone, Deserialize)]
pub struct EventIn {
  pub camera_id: String,
  pub event_type: EventType,
  pub timestamp: i64,
}

/// Response of `POST /event`: the persisted logical fields.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventOut {
  pub camera_id: String,
  pub event_type: String,
  pub timestamp: i64,
  pub alert: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct ErrorBody {
  pub detail: String,
}

// ---------------------------------------------------------------------------
// Store rows
// ---------------------------------------------------------------------------

/// A classified event ready to be appended.
#[derive(Debug, Clone)]
pub struct NewEvent {
  pub camera_id: String,
  pub event_type: EventType,
  pub timestamp: i64,
  pub alert: bool,
}

/// One row of the `events` table.
#[derive(Debug, Clone)]
pub struct StoredEvent {
  pub id: i64,
  pub camera_id: String,
  pub event_type: EventType,
  pub timestamp: i64,
  pub alert: bool,
  pub created_at: NaiveDateTime,
}

impl From<StoredEvent> for EventOut {
  fn from(ev: StoredEvent) -> Self {
    Self {
      camera_id: ev.camera_id,
      event_type: ev.event_type.as_wire().to_string(),
      timestamp: ev.timestamp,
      alert: ev.alert,
    }
  }
}
