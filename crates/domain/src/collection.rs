//! In-memory play list.
//!
//! The list mutation rules live here, away from any storage concern, so the
//! store only has to decide *when* to persist.

use serde::{Deserialize, Serialize};

use crate::{Play, PlayId};

/// Ordered list of plays, serialized as a bare JSON array.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PlayCollection {
    plays: Vec<Play>,
}

impl PlayCollection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a persisted array.
    pub fn from_json(raw: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(raw)
    }

    /// Serialize to the persisted array form.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    pub fn push(&mut self, play: Play) {
        self.plays.push(play);
    }

    /// Remove the play with `id`, returning it if it was present.
    pub fn remove(&mut self, id: &PlayId) -> Option<Play> {
        let index = self.plays.iter().position(|play| &play.id == id)?;
        Some(self.plays.remove(index))
    }

    pub fn get(&self, id: &PlayId) -> Option<&Play> {
        self.plays.iter().find(|play| &play.id == id)
    }

    pub fn contains(&self, id: &PlayId) -> bool {
        self.get(id).is_some()
    }

    pub fn clear(&mut self) {
        self.plays.clear();
    }

    pub fn as_slice(&self) -> &[Play] {
        &self.plays
    }

    pub fn ids(&self) -> impl Iterator<Item = &PlayId> {
        self.plays.iter().map(|play| &play.id)
    }

    pub fn len(&self) -> usize {
        self.plays.len()
    }

    pub fn is_empty(&self) -> bool {
        self.plays.is_empty()
    }
}

impl From<Vec<Play>> for PlayCollection {
    fn from(plays: Vec<Play>) -> Self {
        Self { plays }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::CreatePlayRequest;
    use chrono::{TimeZone, Utc};

    fn play(id: &str, name: &str) -> Play {
        let created_at = Utc.with_ymd_and_hms(2024, 3, 1, 12, 0, 0).unwrap();
        Play::new(
            PlayId::from(id),
            CreatePlayRequest::new(name, Vec::new()),
            created_at,
        )
    }

    #[test]
    fn push_keeps_insertion_order() {
        let mut plays = PlayCollection::new();
        plays.push(play("a", "First"));
        plays.push(play("b", "Second"));

        let names: Vec<_> = plays.as_slice().iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, vec!["First", "Second"]);
    }

    #[test]
    fn remove_returns_removed_play() {
        let mut plays = PlayCollection::from(vec![play("a", "First"), play("b", "Second")]);

        let removed = plays.remove(&PlayId::from("a")).unwrap();
        assert_eq!(removed.name, "First");
        assert_eq!(plays.len(), 1);
        assert!(!plays.contains(&PlayId::from("a")));
    }

    #[test]
    fn remove_missing_is_none() {
        let mut plays = PlayCollection::from(vec![play("a", "First")]);
        assert!(plays.remove(&PlayId::from("zzz")).is_none());
        assert_eq!(plays.len(), 1);
    }

    #[test]
    fn json_round_trip_is_stable() {
        let plays = PlayCollection::from(vec![play("a", "First"), play("b", "Second")]);
        let raw = plays.to_json().unwrap();

        assert!(raw.starts_with('['));
        let reloaded = PlayCollection::from_json(&raw).unwrap();
        assert_eq!(reloaded, plays);
        assert_eq!(reloaded.to_json().unwrap(), raw);
    }

    #[test]
    fn from_json_accepts_any_timestamp_shape() {
        let raw = r#"[{
            "id": "play_1_abc",
            "name": "Legacy",
            "createdAt": "2024-01-15T10:30:00.000Z",
            "playerStates": [
                {"playerId": "p1", "position": {"x": 1, "y": 2}, "timestamp": true},
                {"playerId": "p2", "position": {"x": 3, "y": 4}, "timestamp": {"frame": 2}},
                {"playerId": "p3", "position": {"x": 5, "y": 6}, "timestamp": 1000}
            ]
        }]"#;

        let plays = PlayCollection::from_json(raw).unwrap();
        let states = &plays.as_slice()[0].player_states;
        assert_eq!(states.len(), 3);
        assert!(states.iter().all(|s| s.timestamp.is_present()));
    }

    #[test]
    fn from_json_rejects_non_array() {
        assert!(PlayCollection::from_json("{\"plays\": []}").is_err());
    }
}
