//! Play entity - A named recording of player positions over time
//!
//! Field names serialize in camelCase so persisted and exported documents
//! stay readable by the browser UI.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Number, Value};

use crate::common::datetime::iso_millis;
use crate::PlayId;

/// Pitch coordinates of a player
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Position {
    pub x: f64,
    pub y: f64,
}

impl Position {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Opaque moment marker attached to a player state.
///
/// Nothing orders or compares these; a state only needs one to be present.
/// Numbers and strings are what the designer writes, but imported or
/// persisted files may carry any JSON value here and it is kept as-is.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum StateTimestamp {
    Millis(Number),
    Text(String),
    Other(Value),
}

impl StateTimestamp {
    pub fn millis(value: u64) -> Self {
        Self::Millis(Number::from(value))
    }

    /// `false`, `null`, zero, NaN and empty strings count as absent.
    pub fn is_present(&self) -> bool {
        match self {
            Self::Millis(n) => number_is_present(n),
            Self::Text(s) => !s.is_empty(),
            Self::Other(value) => match value {
                Value::Null => false,
                Value::Bool(b) => *b,
                Value::Number(n) => number_is_present(n),
                Value::String(s) => !s.is_empty(),
                Value::Array(_) | Value::Object(_) => true,
            },
        }
    }
}

fn number_is_present(n: &Number) -> bool {
    n.as_f64().is_some_and(|v| v != 0.0 && !v.is_nan())
}

impl From<Value> for StateTimestamp {
    fn from(value: Value) -> Self {
        match value {
            Value::Number(n) => Self::Millis(n),
            Value::String(s) => Self::Text(s),
            other => Self::Other(other),
        }
    }
}

/// One player's recorded position at a moment in time
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayerState {
    pub player_id: String,
    pub position: Position,
    pub timestamp: StateTimestamp,
}

impl PlayerState {
    pub fn new(player_id: impl Into<String>, position: Position, timestamp: StateTimestamp) -> Self {
        Self {
            player_id: player_id.into(),
            position,
            timestamp,
        }
    }
}

/// A named, timestamped collection of player states.
///
/// `player_states` keeps insertion order; replay walks it front to back.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Play {
    pub id: PlayId,
    pub name: String,
    #[serde(with = "iso_millis")]
    pub created_at: DateTime<Utc>,
    pub player_states: Vec<PlayerState>,
}

impl Play {
    pub fn new(id: PlayId, request: CreatePlayRequest, created_at: DateTime<Utc>) -> Self {
        Self {
            id,
            name: request.name,
            created_at,
            player_states: request.player_states,
        }
    }
}

/// Input for creating a play; the store assigns `id` and `created_at`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreatePlayRequest {
    pub name: String,
    pub player_states: Vec<PlayerState>,
}

impl CreatePlayRequest {
    pub fn new(name: impl Into<String>, player_states: Vec<PlayerState>) -> Self {
        Self {
            name: name.into(),
            player_states,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use serde_json::json;

    fn sample_play() -> Play {
        let request = CreatePlayRequest::new(
            "Lineout move",
            vec![PlayerState::new(
                "p1",
                Position::new(10.0, 20.5),
                StateTimestamp::millis(1_700_000_000_000),
            )],
        );
        let created_at = Utc.timestamp_millis_opt(1_705_314_600_123).unwrap();
        Play::new(PlayId::from("play_1_abc"), request, created_at)
    }

    #[test]
    fn play_serializes_with_camel_case_fields() {
        let value = serde_json::to_value(sample_play()).unwrap();
        assert_eq!(
            value,
            json!({
                "id": "play_1_abc",
                "name": "Lineout move",
                "createdAt": "2024-01-15T10:30:00.123Z",
                "playerStates": [{
                    "playerId": "p1",
                    "position": {"x": 10.0, "y": 20.5},
                    "timestamp": 1_700_000_000_000u64
                }]
            })
        );
    }

    #[test]
    fn play_deserializes_string_timestamps() {
        let play: Play = serde_json::from_value(json!({
            "id": "play_2_xyz",
            "name": "Scrum",
            "createdAt": "2024-01-15T10:30:00Z",
            "playerStates": [{
                "playerId": "p9",
                "position": {"x": 1, "y": 2},
                "timestamp": "2024-01-15T10:30:00Z"
            }]
        }))
        .unwrap();
        assert_eq!(
            play.player_states[0].timestamp,
            StateTimestamp::Text("2024-01-15T10:30:00Z".to_string())
        );
        assert_eq!(play.player_states[0].position, Position::new(1.0, 2.0));
    }

    #[test]
    fn timestamp_presence_follows_truthiness() {
        assert!(StateTimestamp::millis(5).is_present());
        assert!(!StateTimestamp::millis(0).is_present());
        assert!(StateTimestamp::Text("t0".into()).is_present());
        assert!(!StateTimestamp::Text(String::new()).is_present());

        assert!(StateTimestamp::from(json!(true)).is_present());
        assert!(StateTimestamp::from(json!({"frame": 3})).is_present());
        assert!(StateTimestamp::from(json!([])).is_present());
        assert!(!StateTimestamp::from(json!(false)).is_present());
        assert!(!StateTimestamp::from(Value::Null).is_present());
        assert!(!StateTimestamp::from(json!(0.0)).is_present());
    }

    #[test]
    fn non_scalar_timestamps_survive_a_round_trip() {
        let raw = json!({
            "playerId": "p4",
            "position": {"x": 3, "y": 4},
            "timestamp": {"frame": 12}
        });
        let state: PlayerState = serde_json::from_value(raw.clone()).unwrap();
        assert_eq!(
            state.timestamp,
            StateTimestamp::Other(json!({"frame": 12}))
        );
        assert_eq!(serde_json::to_value(&state).unwrap()["timestamp"], raw["timestamp"]);

        let flag: PlayerState = serde_json::from_value(json!({
            "playerId": "p5",
            "position": {"x": 0, "y": 0},
            "timestamp": true
        }))
        .unwrap();
        assert_eq!(flag.timestamp, StateTimestamp::Other(json!(true)));
    }
}
