//! Shared per-process state handed to every handler.

use crate::store::EventStore;

pub struct AppState {
  pub store: EventStore,
}
