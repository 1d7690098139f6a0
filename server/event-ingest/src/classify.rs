//! Alert classification from a static set of event types.

use crate::types::EventType;

/// Event types that flag an event as requiring attention.
pub const ALERT_TYPES: [EventType; 2] = [EventType::Fall, EventType::ProlongedInactivity];

/// True when `event_type` belongs to [`ALERT_TYPES`].
pub fn is_alert(event_type: EventType) -> bool {
  ALERT_TYPES.contains(&event_type)
}

/// Tag written to the audit log line.
pub fn alert_tag(alert: bool) -> &'static str {
  if alert {
    "ALERTA"
  } else {
    "ok"
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn alert_subset_is_flagged() {
    assert!(is_alert(EventType::Fall));
    assert!(is_alert(EventType::ProlongedInactivity));
  }

  #[test]
  fn other_types_are_not_alerts() {
    assert!(!is_alert(EventType::Movement));
    assert!(!is_alert(EventType::Stationary));
    assert!(!is_alert(EventType::PerimeterBreach));
  }

  #[test]
  fn exactly_two_alert_types() {
    let n = EventType::ALL.iter().filter(|t| is_alert(**t)).count();
    assert_eq!(n, ALERT_TYPES.len());
  }

  #[test]
  fn tags() {
    assert_eq!(alert_tag(true), "ALERTA");
    assert_eq!(alert_tag(false), "ok");
  }
}
