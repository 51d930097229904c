//! Projections from the API's round / rolling-event records into the shape
//! `eventData.json` has always had. The display layer relies on these
//! defaults, so every fallback here is deliberate.

use serde_json::{Value, json};

use super::models::{RawRecord, RollingEvent, Round};

const DEFAULT_ROUND_TYPE: &str = "Offline";
const DEFAULT_EVENT_STATUS: &str = "upcoming";

pub fn map_round(round: &RawRecord) -> Round {
    Round {
        id: round.get("id").map(id_text).unwrap_or_default(),
        round_number: passthrough(round, "round_number"),
        name: passthrough(round, "name"),
        mode: present(round, "mode").cloned(),
        club: passthrough(round, "club"),
        round_type: present(round, "type")
            .or_else(|| present(round, "mode"))
            .cloned()
            .unwrap_or_else(|| json!(DEFAULT_ROUND_TYPE)),
        date: passthrough(round, "date"),
        description: passthrough(round, "description"),
        extended_description: or_null(round, "extended_description"),
        form_link: or_null(round, "form_link"),
        contact: or_null(round, "contact"),
        venue: or_null(round, "venue"),
        status: passthrough(round, "status"),
        round_code: present(round, "round_code").cloned(),
        is_evaluated: or_null(round, "is_evaluated"),
        is_frozen: or_null(round, "is_frozen"),
        is_wildcard: or(round, "is_wildcard", Value::Bool(false)),
        criteria: or(round, "criteria", json!([])),
        max_score: or_null(round, "max_score"),
        min_score: or_null(round, "min_score"),
        avg_score: or_null(round, "avg_score"),
        created_at: present(round, "created_at").cloned(),
        updated_at: present(round, "updated_at").cloned(),
    }
}

pub fn map_rolling_event(event: &RawRecord) -> RollingEvent {
    RollingEvent {
        id: event.get("id").map(|id| match id {
            Value::Null => Value::Null,
            other => Value::String(id_text(other)),
        }),
        event_id: or_null(event, "event_id"),
        event_code: or_null(event, "event_code"),
        name: passthrough(event, "name"),
        event_type: passthrough(event, "type"),
        club: passthrough(event, "club"),
        date: or(event, "date", json!("")),
        start_date: or_null(event, "start_date"),
        end_date: or_null(event, "end_date"),
        venue: or_null(event, "venue"),
        description: passthrough(event, "description"),
        extended_description: or_null(event, "extended_description"),
        form_link: or_null(event, "form_link"),
        contact: or_null(event, "contact"),
        status: or(event, "status", json!(DEFAULT_EVENT_STATUS)),
        created_at: present(event, "created_at").cloned(),
        updated_at: present(event, "updated_at").cloned(),
    }
}

// --- Helper Functions ---

/// Value of `key` unless it is missing or `null`.
fn present<'a>(record: &'a RawRecord, key: &str) -> Option<&'a Value> {
    record.get(key).filter(|v| !v.is_null())
}

/// Value of `key` as sent, explicit `null` included.
fn passthrough(record: &RawRecord, key: &str) -> Option<Value> {
    record.get(key).cloned()
}

fn or(record: &RawRecord, key: &str, fallback: Value) -> Value {
    present(record, key).cloned().unwrap_or(fallback)
}

fn or_null(record: &RawRecord, key: &str) -> Value {
    or(record, key, Value::Null)
}

fn id_text(id: &Value) -> String {
    match id {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(value: Value) -> RawRecord {
        match value {
            Value::Object(map) => map,
            other => panic!("expected an object, got {other}"),
        }
    }

    #[test]
    fn test_round_type_falls_back_to_offline() {
        let round = map_round(&record(json!({"id": 4, "round_number": 1, "name": "Pitch"})));
        assert_eq!(round.round_type, json!("Offline"));
        assert_eq!(round.id, "4");
    }

    #[test]
    fn test_round_type_prefers_type_then_mode() {
        let typed = map_round(&record(json!({"id": 1, "type": "Online", "mode": "Hybrid"})));
        assert_eq!(typed.round_type, json!("Online"));

        let moded = map_round(&record(json!({"id": 1, "type": null, "mode": "Hybrid"})));
        assert_eq!(moded.round_type, json!("Hybrid"));
        assert_eq!(moded.mode, Some(json!("Hybrid")));
    }

    #[test]
    fn test_round_defaults() {
        let round = map_round(&record(json!({"id": "r1", "name": "Quiz", "club": null})));

        assert_eq!(round.is_wildcard, json!(false));
        assert!(!round.is_wildcard());
        assert_eq!(round.is_frozen, Value::Null);
        assert_eq!(round.is_evaluated, Value::Null);
        assert_eq!(round.criteria, json!([]));
        assert_eq!(round.max_score, Value::Null);
        assert_eq!(round.venue, Value::Null);
        assert_eq!(round.club, Some(Value::Null));
        assert_eq!(round.mode, None);
        assert_eq!(round.round_code, None);
    }

    #[test]
    fn test_round_serialized_shape() {
        let round = map_round(&record(json!({
            "id": 7,
            "round_number": 2,
            "mode": null,
            "is_wildcard": true,
            "max_score": 98.5,
            "created_at": "2025-09-01T10:00:00"
        })));

        let value = serde_json::to_value(&round).unwrap();
        let object = value.as_object().unwrap();
        assert_eq!(object["id"], json!("7"));
        assert_eq!(object["type"], json!("Offline"));
        assert_eq!(object["is_wildcard"], json!(true));
        assert_eq!(object["max_score"], json!(98.5));
        assert_eq!(object["form_link"], Value::Null);
        assert!(!object.contains_key("mode"));
        assert!(!object.contains_key("name"));
        assert!(!object.contains_key("updated_at"));
        assert_eq!(object["created_at"], json!("2025-09-01T10:00:00"));
    }

    #[test]
    fn test_rolling_event_defaults() {
        let event = map_rolling_event(&record(json!({"id": 12, "name": "Treasure Hunt"})));

        assert_eq!(event.id, Some(json!("12")));
        assert_eq!(event.status, json!("upcoming"));
        assert_eq!(event.date, json!(""));
        assert_eq!(event.event_id, Value::Null);
        assert_eq!(event.start_date, Value::Null);
        assert_eq!(event.event_type, None);
    }

    #[test]
    fn test_rolling_event_keeps_values() {
        let event = map_rolling_event(&record(json!({
            "id": "RE-1",
            "status": "completed",
            "date": "2025-09-20",
            "type": "Fun",
            "venue": "Hall B"
        })));

        assert_eq!(event.id, Some(json!("RE-1")));
        assert_eq!(event.status, json!("completed"));
        assert_eq!(event.date, json!("2025-09-20"));
        assert_eq!(event.event_type, Some(json!("Fun")));
        assert_eq!(event.venue, json!("Hall B"));
    }

    #[test]
    fn test_rolling_event_without_id() {
        let event = map_rolling_event(&record(json!({"name": "Open Mic"})));
        let value = serde_json::to_value(&event).unwrap();
        assert!(value.get("id").is_none());
    }
}
