//! Simple test fixtures used across unit tests.

use serde_json::{json, Value};
use squiggle_domain::{CreatePlayRequest, PlayerState, Position, StateTimestamp};

pub fn player_state(player_id: &str, x: f64, y: f64, at: u64) -> PlayerState {
    PlayerState::new(player_id, Position::new(x, y), StateTimestamp::millis(at))
}

/// A request with two players and three recorded states
pub fn create_request(name: &str) -> CreatePlayRequest {
    CreatePlayRequest::new(
        name,
        vec![
            player_state("p9", 50.0, 22.0, 1_000),
            player_state("p10", 45.5, 30.0, 1_000),
            player_state("p9", 58.0, 20.0, 2_000),
        ],
    )
}

/// An import entry that passes validation
pub fn import_entry(name: &str) -> Value {
    json!({
        "name": name,
        "playerStates": [
            {"playerId": "p1", "position": {"x": 10, "y": 20}, "timestamp": 1_000},
            {"playerId": "p2", "position": {"x": 15.5, "y": 25}, "timestamp": 1_500}
        ]
    })
}

/// Wrap entries in an import document
pub fn import_document(entries: Vec<Value>) -> String {
    json!({ "version": "1.0", "plays": entries }).to_string()
}
